//! Smart plant watering controller — host entry point.
//!
//! Runs the controller against simulated hardware, with the keyboard
//! standing in for the two buttons.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SimulatedHardware         LogEventSink     JsonConfigFile     │
//! │  (Sensor+Actuator+Input)   (EventSink)      (ConfigPort)       │
//! │  KeyboardButtons           HostClock                           │
//! │  (button ISR)              (ClockPort)                         │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Mode table · Auto / Manual rules                      │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  TickScheduler (fixed rate) · Periodic (telemetry)             │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use plantwater::adapters::config_file::JsonConfigFile;
use plantwater::adapters::hardware::SimulatedHardware;
use plantwater::adapters::keyboard::KeyboardButtons;
use plantwater::adapters::log_sink::LogEventSink;
use plantwater::adapters::time::HostClock;
use plantwater::app::events::AppEvent;
use plantwater::app::ports::{ClockPort, ConfigPort, EventSink};
use plantwater::app::service::AppService;
use plantwater::scheduler::{Periodic, TickScheduler};
use plantwater::sensors::SensorHub;

/// Smart plant watering controller (host simulation)
///
/// Keys: m = toggle AUTO/MANUAL, t = manual watering, q = quit
/// (press Enter after each key).
#[derive(Parser)]
#[command(name = "plantwater")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path (JSON)
    #[arg(short, long, env = "SPWS_CONFIG")]
    config: Option<PathBuf>,

    /// Stop after this many control ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the control loop interval (milliseconds)
    #[arg(long)]
    interval_ms: Option<u32>,

    /// Initial simulated soil moisture (%)
    #[arg(long, default_value_t = 24.0)]
    moisture: f32,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("=== Smart Plant Watering System v{} ===", env!("CARGO_PKG_VERSION"));

    // ── 1. Configuration ──────────────────────────────────────
    let mut config = JsonConfigFile::new(cli.config.clone())
        .load()
        .context("failed to load configuration")?;
    if let Some(ms) = cli.interval_ms {
        config.control_loop_interval_ms = ms;
    }
    config.validate().context("invalid configuration")?;

    // ── 2. Construct adapters ─────────────────────────────────
    let clock = HostClock::new();
    let mut hw = SimulatedHardware::new(SensorHub::new(cli.moisture));
    let mut sink = LogEventSink::new();

    let quit = Arc::new(AtomicBool::new(false));
    let keys = KeyboardButtons {
        mode: hw.mode_line(),
        manual: hw.manual_line(),
        quit: Arc::clone(&quit),
        clock,
    };
    // Detached: a blocked stdin read cannot be joined.
    let _keyboard = keys.spawn().context("failed to start keyboard thread")?;
    info!("Press 'm' = toggle mode | 't' = manual water | 'q' = quit");

    // ── 3. Construct app service ──────────────────────────────
    let mut app = AppService::new(&config).context("controller rejected settings")?;
    app.start(&mut hw, &mut sink);

    // ── 4. Fixed-rate loop ────────────────────────────────────
    let mut ticker = TickScheduler::new(u64::from(config.control_loop_interval_ms), clock.now_ms());
    let mut telemetry = Periodic::new(config.telemetry_interval_secs);
    let tick_secs = config.control_loop_interval_ms as f32 / 1000.0;
    let idle = Duration::from_millis(u64::from(config.idle_delay_ms));
    let mut last_render_ms = clock.now_ms();

    loop {
        if quit.load(Ordering::Acquire) {
            info!("Quit requested");
            break;
        }
        if cli.ticks.is_some_and(|limit| app.tick_count() >= limit) {
            info!("Tick limit reached");
            break;
        }

        let now_ms = clock.now_ms();
        if ticker.poll(now_ms) {
            hw.advance_environment(tick_secs);
            app.tick(&mut hw, &mut sink);
            if telemetry.on_tick() {
                sink.emit(&AppEvent::Telemetry(app.build_telemetry()));
            }
        }

        hw.render_indicator(now_ms.wrapping_sub(last_render_ms) as u32);
        last_render_ms = now_ms;

        thread::sleep(idle);
    }

    app.shutdown(&mut hw);
    info!(
        "Stopped after {} ticks, {} pump cycles, {} events",
        app.tick_count(),
        hw.pump_cycles(),
        sink.emitted()
    );
    Ok(())
}
