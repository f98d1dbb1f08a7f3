//! Function-pointer mode table driving the watering controller.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  ModeTable                                           │
//! │  ┌────────┬───────────┬──────────┬───────────────┐   │
//! │  │ Mode   │ on_enter  │ on_exit  │ on_update     │   │
//! │  ├────────┼───────────┼──────────┼───────────────┤   │
//! │  │ Auto   │ —         │ —        │ fn(ctx)       │   │
//! │  │ Manual │ fn(ctx)   │ fn(ctx)  │ fn(ctx)       │   │
//! │  └────────┴───────────┴──────────┴───────────────┘   │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the mode stored in
//! `ctx.state.mode`.  Modes only change on a mode-button edge: the engine
//! runs `on_exit` for the old mode, stores the new one and runs its
//! `on_enter`.  The pump on/off dimension is plain data in
//! [`ControllerState`](context::ControllerState) and is driven by the
//! handlers in [`states`].

pub mod context;
pub mod states;

use core::fmt;

use context::{ControllerState, FsmContext};
use log::info;

use crate::app::events::AppEvent;
use crate::config::Settings;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

/// Control strategy selector.
/// Must stay in sync with the table built in [`states::build_mode_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OperatingMode {
    /// Watering governed by the moisture thresholds.
    Auto = 0,
    /// Watering only on explicit user request, time bounded.
    Manual = 1,
}

impl OperatingMode {
    /// Total number of modes, used to size the table array.
    pub const COUNT: usize = 2;

    /// The other mode.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Auto => Self::Manual,
            Self::Manual => Self::Auto,
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "AUTO"),
            Self::Manual => write!(f, "MANUAL"),
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter`, `on_exit` and `on_update`.
pub type ModeActionFn = fn(&mut FsmContext);

/// Static descriptor for a single mode.
pub struct ModeDescriptor {
    pub id: OperatingMode,
    pub name: &'static str,
    pub on_enter: Option<ModeActionFn>,
    pub on_exit: Option<ModeActionFn>,
    pub on_update: ModeActionFn,
}

// ---------------------------------------------------------------------------
// Initialisation
// ---------------------------------------------------------------------------

/// Validate `settings` and produce the initial controller state.
pub fn init(settings: &Settings) -> Result<ControllerState> {
    settings.validate()?;
    Ok(ControllerState::initial())
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The mode table engine.
///
/// Holds no mode of its own: the active mode lives in the
/// [`FsmContext`] so the controller state stays a single value.
pub struct Fsm {
    /// Fixed-size table indexed by `OperatingMode as usize`.
    table: [ModeDescriptor; OperatingMode::COUNT],
}

impl Fsm {
    pub fn new(table: [ModeDescriptor; OperatingMode::COUNT]) -> Self {
        Self { table }
    }

    /// Run the initial `on_enter` for the starting mode.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        let desc = self.descriptor(ctx.state.mode);
        info!("FSM starting in mode: {}", desc.name);
        if let Some(enter) = desc.on_enter {
            enter(ctx);
        }
    }

    /// Run the current mode's rule set once.
    pub fn tick(&self, ctx: &mut FsmContext) {
        (self.descriptor(ctx.state.mode).on_update)(ctx);
    }

    /// Flip `Auto ⇄ Manual`.
    pub fn toggle_mode(&mut self, ctx: &mut FsmContext) {
        self.transition(ctx.state.mode.toggled(), ctx);
    }

    /// Switch to `next`, running the exit and enter actions.
    pub fn transition(&mut self, next: OperatingMode, ctx: &mut FsmContext) {
        let current = ctx.state.mode;
        if next == current {
            return;
        }

        info!(
            "FSM transition: {} -> {}",
            self.descriptor(current).name,
            self.descriptor(next).name
        );

        if let Some(exit) = self.descriptor(current).on_exit {
            exit(ctx);
        }

        ctx.state.mode = next;
        ctx.emit(AppEvent::ModeChanged(next));

        if let Some(enter) = self.descriptor(next).on_enter {
            enter(ctx);
        }
    }

    fn descriptor(&self, mode: OperatingMode) -> &ModeDescriptor {
        &self.table[mode as usize]
    }
}
