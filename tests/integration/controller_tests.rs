//! Integration tests for the AppService → mode table → actuators pipeline.
//!
//! Each test drives the controller tick by tick against the recording
//! mock and checks what reached the actuator ports.

use plantwater::app::events::AppEvent;
use plantwater::config::Settings;
use plantwater::error::SensorError;
use plantwater::fsm::OperatingMode;
use plantwater::fsm::context::{IndicatorState, PumpState};

use crate::mock_hw::{ActuatorCall, Rig};

// ── Scenario A: dry soil, auto watering hits the cap ─────────

#[test]
fn dry_soil_waters_until_cap_then_alerts() {
    let mut rig = Rig::new(20.0);

    rig.tick();
    assert_eq!(rig.app.state().pump, PumpState::On, "tick 1 starts pump");
    assert_eq!(rig.hw.last_indicator(), Some(IndicatorState::Watering));
    assert!(rig.hw.pump_on());

    rig.ticks(29);
    assert_eq!(rig.app.state().pump, PumpState::On, "still on at tick 30");

    rig.tick();
    let state = rig.app.state();
    assert_eq!(state.pump, PumpState::Off, "off by tick 31");
    assert_eq!(state.indicator, IndicatorState::MoistureAlert);
    assert!(!rig.hw.pump_on());
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::WateringTimeout { elapsed_secs: 30 })),
        1
    );
}

// ── Scenario B: moist soil, nothing to do ────────────────────

#[test]
fn moist_soil_never_waters() {
    let mut rig = Rig::new(75.0);
    rig.ticks(100);
    assert!(rig.hw.pump_commands().iter().all(|c| *c == ActuatorCall::PumpOff));
    assert_eq!(rig.app.state().indicator, IndicatorState::Normal);
    assert_eq!(rig.hw.last_indicator(), Some(IndicatorState::Normal));
}

// ── Scenario C: one manual press, one timed cycle ────────────

#[test]
fn manual_press_runs_one_timed_cycle() {
    let mut rig = Rig::new(50.0);
    rig.hw.press_mode();
    rig.hw.press_manual();

    rig.tick();
    assert_eq!(rig.app.state().mode, OperatingMode::Manual);
    assert_eq!(rig.app.state().pump, PumpState::On, "on at tick 1");

    rig.ticks(9);
    assert_eq!(rig.app.state().pump, PumpState::On, "on through tick 10");

    rig.tick();
    assert_eq!(rig.app.state().pump, PumpState::Off, "off at tick 11");
    assert_eq!(rig.app.state().indicator, IndicatorState::Normal);

    rig.ticks(5);
    assert_eq!(rig.app.state().indicator, IndicatorState::Normal);
    assert_eq!(
        rig.hw.pump_commands(),
        vec![ActuatorCall::PumpOff, ActuatorCall::PumpOn, ActuatorCall::PumpOff]
    );
    let lines = rig.sink.lines();
    assert!(lines.contains(&"MANUAL: Pump activated by user".to_string()));
    assert!(lines.contains(&"MANUAL: Watering duration complete - pump OFF".to_string()));
}

// ── Scenario D: mode change mid-cycle ────────────────────────

#[test]
fn mode_press_mid_cycle_forces_pump_off() {
    let mut rig = Rig::new(20.0);
    rig.ticks(4);
    assert!(rig.hw.pump_on());

    rig.hw.press_mode();
    rig.tick();
    let state = rig.app.state();
    assert_eq!(state.mode, OperatingMode::Manual);
    assert_eq!(state.pump, PumpState::Off, "off in the same tick");
    assert_eq!(state.indicator, IndicatorState::Normal);
    assert!(!rig.hw.pump_on());
    assert_eq!(rig.hw.last_indicator(), Some(IndicatorState::Normal));
    assert_eq!(rig.sink.count(|e| *e == AppEvent::PumpForcedOff), 1);
}

// ── Ordering and cadence ─────────────────────────────────────

#[test]
fn indicator_pushed_every_tick_pump_only_on_change() {
    let mut rig = Rig::new(20.0);
    rig.ticks(10);
    // One push from start plus one per tick.
    assert_eq!(rig.hw.indicator_pushes(), 11);
    assert_eq!(
        rig.hw.pump_commands(),
        vec![ActuatorCall::PumpOff, ActuatorCall::PumpOn]
    );
}

#[test]
fn sensors_refresh_on_interval_only() {
    let mut rig = Rig::new(50.0);
    assert_eq!(rig.hw.moisture_reads, 1, "primed at start");

    rig.hw.set_moisture(10.0);
    rig.ticks(4);
    assert_eq!(rig.hw.moisture_reads, 1);
    assert_eq!(rig.app.state().pump, PumpState::Off, "held sample still moist");

    rig.tick();
    assert_eq!(rig.hw.moisture_reads, 2);
    assert_eq!(rig.app.state().pump, PumpState::On, "fresh sample acted on same tick");
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::SensorsRead { .. })),
        2
    );
}

#[test]
fn target_reached_stops_with_normal_indicator() {
    let mut rig = Rig::new(20.0);
    rig.tick();
    rig.hw.set_moisture(80.0);
    rig.ticks(4); // read lands on tick 5
    let state = rig.app.state();
    assert_eq!(state.pump, PumpState::Off);
    assert_eq!(state.indicator, IndicatorState::Normal);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::TargetReached { .. })),
        1
    );
}

#[test]
fn startup_reports_initial_mode() {
    let rig = Rig::new(50.0);
    assert_eq!(
        rig.sink.events.last(),
        Some(&AppEvent::Started(OperatingMode::Auto))
    );
    assert_eq!(rig.hw.last_indicator(), Some(IndicatorState::Normal));
}

#[test]
fn leaving_manual_mid_cycle_stops_pump() {
    let mut rig = Rig::new(50.0);
    rig.hw.press_mode();
    rig.hw.press_manual();
    rig.ticks(3);
    assert!(rig.hw.pump_on());

    rig.hw.press_mode();
    rig.tick();
    assert_eq!(rig.app.state().mode, OperatingMode::Auto);
    assert!(!rig.hw.pump_on());
    rig.ticks(10);
    assert!(!rig.hw.pump_on(), "moist soil keeps auto idle");
}

#[test]
fn manual_press_ignored_in_auto() {
    let mut rig = Rig::new(50.0);
    rig.hw.press_manual();
    rig.tick();
    assert_eq!(rig.app.state().pump, PumpState::Off);
}

// ── Sensor faults ────────────────────────────────────────────

#[test]
fn sensor_fault_blocks_auto_and_recovers() {
    let mut rig = Rig::new(50.0);
    rig.hw.fail_moisture(SensorError::Unavailable);
    rig.ticks(5);
    assert!(rig.app.sensor_fault());
    assert_eq!(rig.app.state().indicator, IndicatorState::Error);
    assert_eq!(
        rig.sink.count(|e| *e == AppEvent::SensorFault(SensorError::Unavailable)),
        1
    );

    // Still failing: no duplicate fault event.
    rig.ticks(5);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::SensorFault(_))),
        1
    );

    rig.hw.set_moisture(10.0);
    rig.ticks(5);
    assert!(!rig.app.sensor_fault());
    assert_eq!(rig.sink.count(|e| *e == AppEvent::SensorRecovered), 1);
    assert_eq!(rig.app.state().pump, PumpState::On);
}

#[test]
fn fault_mid_cycle_keeps_cap_and_blocks_restart() {
    let mut rig = Rig::new(10.0);
    rig.tick();
    assert!(rig.hw.pump_on());

    // The read on tick 5 fails; the running cycle stays bounded by the cap.
    rig.hw.fail_moisture(SensorError::Unavailable);
    rig.ticks(30);
    assert!(!rig.hw.pump_on());
    assert_eq!(rig.app.state().indicator, IndicatorState::MoistureAlert);

    rig.tick();
    assert!(!rig.hw.pump_on(), "no restart while faulted");
    assert_eq!(rig.app.state().indicator, IndicatorState::Error);
}

#[test]
fn non_finite_moisture_is_a_fault() {
    let mut rig = Rig::new(50.0);
    rig.hw.set_moisture(f32::NAN);
    rig.ticks(5);
    assert_eq!(
        rig.sink.count(|e| *e == AppEvent::SensorFault(SensorError::OutOfRange)),
        1
    );
    assert!((rig.app.sample().moisture_percent - 50.0).abs() < f32::EPSILON);
}

#[test]
fn out_of_range_moisture_is_clamped() {
    let mut rig = Rig::new(150.0);
    assert!((rig.app.sample().moisture_percent - 100.0).abs() < f32::EPSILON);
    rig.hw.set_moisture(-5.0);
    rig.ticks(5);
    assert!(rig.app.sample().moisture_percent.abs() < f32::EPSILON);
}

#[test]
fn temperature_failure_holds_last_value() {
    let mut rig = Rig::new(50.0);
    rig.hw.temperature = Err(SensorError::Unavailable);
    rig.hw.set_moisture(55.0);
    rig.ticks(5);
    let sample = rig.app.sample();
    assert!((sample.temperature_c - 22.5).abs() < f32::EPSILON);
    assert!((sample.moisture_percent - 55.0).abs() < f32::EPSILON);
    assert!(!rig.app.sensor_fault());
}

#[test]
fn manual_watering_ignores_sensor_fault() {
    let mut rig = Rig::new(50.0);
    rig.hw.fail_moisture(SensorError::Unavailable);
    rig.ticks(5);
    rig.hw.press_mode();
    rig.hw.press_manual();
    rig.tick();
    assert!(rig.hw.pump_on());
}

// ── Telemetry ────────────────────────────────────────────────

#[test]
fn telemetry_snapshot_tracks_cycle() {
    let settings = Settings {
        max_watering_secs: 5,
        ..Settings::default()
    };
    let mut rig = Rig::with_settings(20.0, settings);
    rig.ticks(3);
    let t = rig.app.build_telemetry();
    assert_eq!(t.mode, OperatingMode::Auto);
    assert_eq!(t.pump, PumpState::On);
    assert_eq!(t.watering_secs, 2);
    assert_eq!(t.tick_count, 3);
    assert!(t.to_string().starts_with("Status - mode=AUTO pump=ON"));
}
