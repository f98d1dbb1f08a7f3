//! LED pattern engine.
//!
//! Generates time-varying RGB values for the status indicator.  The main
//! loop calls `tick()` every spin with the elapsed milliseconds, and the
//! engine outputs the RGB tuple to push to the LED.
//!
//! ## Pattern types
//!
//! | Pattern | Description          | Rate |
//! |---------|----------------------|------|
//! | Solid   | Constant colour      | —    |
//! | Blink   | On/off square wave   | 1 Hz |
//! | Off     | Dark                 | —    |
//!
//! Changing the pattern or colour restarts the phase, so a fresh blink
//! always begins lit.

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

const BLINK_PERIOD_MS: u32 = 1000;

/// Pattern identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternId {
    Solid,
    Blink,
    Off,
}

/// A pattern request with colour and type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRequest {
    pub colour: Rgb,
    pub pattern: PatternId,
}

/// LED pattern engine. Stack-allocated, no heap.
pub struct LedPatternEngine {
    phase_ms: u32,
    active: Option<PatternRequest>,
    requested: Option<PatternRequest>,
}

impl LedPatternEngine {
    pub fn new() -> Self {
        Self {
            phase_ms: 0,
            active: None,
            requested: None,
        }
    }

    pub fn set_pattern(&mut self, colour: Rgb, pattern: PatternId) {
        self.requested = Some(PatternRequest { colour, pattern });
    }

    /// Clear the request; the LED goes dark.
    pub fn clear(&mut self) {
        self.requested = None;
        self.active = None;
        self.phase_ms = 0;
    }

    /// Advance the pattern phase and return the current RGB output.
    pub fn tick(&mut self, delta_ms: u32) -> Rgb {
        self.phase_ms = self.phase_ms.wrapping_add(delta_ms);

        if self.active != self.requested {
            self.phase_ms = 0;
            self.active = self.requested;
        }

        match &self.active {
            Some(req) => self.generate(req.colour, req.pattern),
            None => COLOUR_OFF,
        }
    }

    fn generate(&self, colour: Rgb, pattern: PatternId) -> Rgb {
        match pattern {
            PatternId::Solid => colour,
            PatternId::Off => COLOUR_OFF,
            PatternId::Blink => {
                let on = (self.phase_ms % BLINK_PERIOD_MS) < BLINK_PERIOD_MS / 2;
                if on { colour } else { COLOUR_OFF }
            }
        }
    }
}

impl Default for LedPatternEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ── Indicator colours ─────────────────────────────────────────

pub const COLOUR_GREEN: Rgb = (0, 255, 0);
pub const COLOUR_YELLOW: Rgb = (255, 200, 0);
pub const COLOUR_RED: Rgb = (255, 0, 0);
pub const COLOUR_OFF: Rgb = (0, 0, 0);
