//! End-to-end runs against the host simulation: environment model,
//! probes, button lines and LED driver behind the real hardware adapter.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use plantwater::adapters::hardware::SimulatedHardware;
use plantwater::adapters::keyboard::KeyboardButtons;
use plantwater::adapters::time::HostClock;
use plantwater::app::events::AppEvent;
use plantwater::app::service::AppService;
use plantwater::config::SystemConfig;
use plantwater::drivers::led_patterns::{COLOUR_GREEN, COLOUR_RED};
use plantwater::fsm::OperatingMode;
use plantwater::fsm::context::IndicatorState;
use plantwater::sensors::SensorHub;

use crate::mock_hw::RecordingSink;

fn boot(moisture: f32) -> (AppService, SimulatedHardware, RecordingSink) {
    let mut app = AppService::new(&SystemConfig::default()).expect("defaults are valid");
    let mut hw = SimulatedHardware::new(SensorHub::new(moisture));
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

fn run(app: &mut AppService, hw: &mut SimulatedHardware, sink: &mut RecordingSink, ticks: u32) {
    for _ in 0..ticks {
        hw.advance_environment(1.0);
        app.tick(hw, sink);
    }
}

#[test]
fn dry_pot_is_watered_to_target() {
    let (mut app, mut hw, mut sink) = boot(24.0);
    run(&mut app, &mut hw, &mut sink, 40);

    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::AutoWateringStarted { .. })),
        1
    );
    assert_eq!(sink.count(|e| matches!(e, AppEvent::TargetReached { .. })), 1);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::WateringTimeout { .. })), 0);
    assert!(!hw.pump_running());
    assert_eq!(hw.pump_cycles(), 1);
    assert!(hw.sensors_mut().true_moisture() > 70.0);
}

#[test]
fn keyboard_keys_drive_manual_cycle() {
    let (mut app, mut hw, mut sink) = boot(50.0);
    let keys = KeyboardButtons {
        mode: hw.mode_line(),
        manual: hw.manual_line(),
        quit: Arc::new(AtomicBool::new(false)),
        clock: HostClock::new(),
    };
    keys.pump_input(&b"m\nt\n"[..]);

    run(&mut app, &mut hw, &mut sink, 1);
    assert_eq!(app.state().mode, OperatingMode::Manual);
    assert!(hw.pump_running());
    assert_eq!(hw.indicator(), Some(IndicatorState::Watering));

    run(&mut app, &mut hw, &mut sink, 10);
    assert!(!hw.pump_running());
    assert_eq!(sink.count(|e| *e == AppEvent::ManualWateringComplete), 1);
    assert_eq!(hw.render_indicator(100), COLOUR_GREEN);
}

#[test]
fn unplugged_probe_lights_error() {
    let (mut app, mut hw, mut sink) = boot(50.0);
    hw.sensors_mut().set_moisture_disconnected(true);
    run(&mut app, &mut hw, &mut sink, 5);

    assert!(app.sensor_fault());
    assert_eq!(hw.indicator(), Some(IndicatorState::Error));
    assert_eq!(hw.render_indicator(100), COLOUR_RED);
    assert_eq!(hw.render_indicator(600), COLOUR_RED, "error is solid, not blinking");

    hw.sensors_mut().set_moisture_disconnected(false);
    run(&mut app, &mut hw, &mut sink, 5);
    assert!(!app.sensor_fault());
    assert_eq!(hw.indicator(), Some(IndicatorState::Normal));
}
