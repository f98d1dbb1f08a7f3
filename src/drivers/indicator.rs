//! Status indicator driver.
//!
//! Maps the controller's [`IndicatorState`] onto an RGB pattern and feeds
//! the pattern engine.  `set_state` is called every control tick; only
//! actual changes are logged.
//!
//! | State         | Colour | Pattern |
//! |---------------|--------|---------|
//! | Normal        | green  | solid   |
//! | Watering      | yellow | solid   |
//! | MoistureAlert | red    | blink   |
//! | Error         | red    | solid   |

use log::info;

use super::led_patterns::{
    COLOUR_GREEN, COLOUR_RED, COLOUR_YELLOW, LedPatternEngine, PatternId, Rgb,
};
use crate::fsm::context::IndicatorState;

pub struct IndicatorDriver {
    state: Option<IndicatorState>,
    engine: LedPatternEngine,
    current: Rgb,
}

impl IndicatorDriver {
    pub fn new() -> Self {
        Self {
            state: None,
            engine: LedPatternEngine::new(),
            current: (0, 0, 0),
        }
    }

    /// Colour and pattern shown for `state`.
    pub fn pattern_for(state: IndicatorState) -> (Rgb, PatternId) {
        match state {
            IndicatorState::Normal => (COLOUR_GREEN, PatternId::Solid),
            IndicatorState::Watering => (COLOUR_YELLOW, PatternId::Solid),
            IndicatorState::MoistureAlert => (COLOUR_RED, PatternId::Blink),
            IndicatorState::Error => (COLOUR_RED, PatternId::Solid),
        }
    }

    /// Returns `true` when the state actually changed.
    pub fn set_state(&mut self, state: IndicatorState) -> bool {
        if self.state == Some(state) {
            return false;
        }
        let (colour, pattern) = Self::pattern_for(state);
        self.engine.set_pattern(colour, pattern);
        self.state = Some(state);
        info!("LED \u{2192} {}", describe(state));
        true
    }

    /// Advance blinking by `delta_ms` and return the colour to show.
    pub fn render(&mut self, delta_ms: u32) -> Rgb {
        self.current = self.engine.tick(delta_ms);
        self.current
    }

    pub fn state(&self) -> Option<IndicatorState> {
        self.state
    }

    pub fn current_colour(&self) -> Rgb {
        self.current
    }
}

impl Default for IndicatorDriver {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(state: IndicatorState) -> &'static str {
    match state {
        IndicatorState::Normal => "GREEN (Normal)",
        IndicatorState::Watering => "YELLOW (Watering)",
        IndicatorState::MoistureAlert => "RED BLINK (Too dry!)",
        IndicatorState::Error => "RED SOLID (Error)",
    }
}
