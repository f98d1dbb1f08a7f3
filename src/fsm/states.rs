//! Concrete mode handler functions and table builder.
//!
//! Each mode is defined by plain `fn` pointers.  No closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!             ┌──[moisture < min]──▶ PUMP ON ──[moisture > max]──▶ Normal
//!  AUTO  ─────┤                          └──[cap reached]──────▶ MoistureAlert
//!             └─ idle: Error | MoistureAlert | Normal
//!
//!  MANUAL ──[manual press]──▶ PUMP ON ──[manual duration]──▶ Normal
//!
//!  Any mode change with the pump on ──▶ PUMP OFF, Normal
//! ```

use super::context::{FsmContext, IndicatorState};
use super::{ModeDescriptor, OperatingMode};
use crate::app::events::AppEvent;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static mode table.  Called once at startup.
pub fn build_mode_table() -> [ModeDescriptor; OperatingMode::COUNT] {
    [
        // Index 0: Auto
        ModeDescriptor {
            id: OperatingMode::Auto,
            name: "Auto",
            on_enter: None,
            on_exit: None,
            on_update: auto_update,
        },
        // Index 1: Manual
        ModeDescriptor {
            id: OperatingMode::Manual,
            name: "Manual",
            on_enter: Some(manual_enter),
            on_exit: Some(manual_exit),
            on_update: manual_update,
        },
    ]
}

/// Stop a running cycle because the mode changed under it.
fn force_pump_off(ctx: &mut FsmContext) {
    if ctx.is_pumping() {
        ctx.stop_pump(IndicatorState::Normal);
        ctx.forced_stop = true;
        ctx.emit(AppEvent::PumpForcedOff);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  AUTO mode
// ═══════════════════════════════════════════════════════════════════════════

fn auto_update(ctx: &mut FsmContext) {
    let moisture = ctx.sample.moisture_percent;

    if !ctx.is_pumping() {
        if ctx.is_dry() && !ctx.sensor_fault && !ctx.forced_stop {
            ctx.start_pump();
            info!("AUTO: moisture {:.1}% below threshold, pump on", moisture);
            ctx.emit(AppEvent::AutoWateringStarted {
                moisture_percent: moisture,
            });
            return;
        }
    } else {
        ctx.state.watering_secs = ctx.state.watering_secs.saturating_add(1);
        let elapsed = ctx.state.watering_secs;

        // The cap is checked after the target so its indicator wins a tie.
        let mut stop = None;
        if ctx.is_wet() {
            stop = Some((
                IndicatorState::Normal,
                AppEvent::TargetReached {
                    moisture_percent: moisture,
                },
            ));
        }
        if elapsed >= ctx.settings.max_watering_secs {
            stop = Some((
                IndicatorState::MoistureAlert,
                AppEvent::WateringTimeout {
                    elapsed_secs: elapsed,
                },
            ));
        }

        if let Some((indicator, event)) = stop {
            info!("AUTO: pump off after {}s ({})", elapsed, indicator);
            ctx.stop_pump(indicator);
            ctx.emit(event);
        }
        return;
    }

    if ctx.forced_stop {
        return;
    }

    ctx.state.indicator = if ctx.sensor_fault {
        IndicatorState::Error
    } else if ctx.is_dry() {
        IndicatorState::MoistureAlert
    } else {
        IndicatorState::Normal
    };
}

// ═══════════════════════════════════════════════════════════════════════════
//  MANUAL mode
// ═══════════════════════════════════════════════════════════════════════════

fn manual_enter(ctx: &mut FsmContext) {
    force_pump_off(ctx);
    info!("MANUAL: waiting for watering button");
}

fn manual_exit(ctx: &mut FsmContext) {
    force_pump_off(ctx);
}

fn manual_update(ctx: &mut FsmContext) {
    if !ctx.is_pumping() {
        if ctx.manual_pressed {
            ctx.start_pump();
            info!(
                "MANUAL: pump on for {}s",
                ctx.settings.manual_watering_secs
            );
            ctx.emit(AppEvent::ManualWateringStarted);
        }
        return;
    }

    if ctx.manual_pressed {
        debug!("MANUAL: already watering, press ignored");
    }

    ctx.state.watering_secs = ctx.state.watering_secs.saturating_add(1);
    if ctx.state.watering_secs >= ctx.settings.manual_watering_secs {
        ctx.stop_pump(IndicatorState::Normal);
        info!("MANUAL: watering complete");
        ctx.emit(AppEvent::ManualWateringComplete);
    }
}
