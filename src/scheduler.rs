//! Tick scheduling for the control loop.
//!
//! The main loop spins fast (every `idle_delay_ms`) so the indicator can
//! blink and buttons stay responsive, but the controller itself only runs
//! once per `control_loop_interval_ms`.  [`TickScheduler`] gates that.
//! [`Periodic`] counts control ticks for slower side jobs such as the
//! telemetry line.
//!
//! ```text
//!  main loop ──every idle_delay──▶ TickScheduler::poll(now)
//!                                     │ due
//!                                     ▼
//!                              AppService::tick()
//!                                     │
//!                                     ▼
//!                              Periodic::on_tick() ──fires──▶ telemetry
//! ```

use log::debug;

// ═══════════════════════════════════════════════════════════════
//  Control tick timer
// ═══════════════════════════════════════════════════════════════

/// Fixed-period timer driven by a monotonic millisecond clock.
///
/// Uses wrapping arithmetic so a clock that rolls over keeps ticking.
#[derive(Debug, Clone, Copy)]
pub struct TickScheduler {
    period_ms: u64,
    last_tick_ms: u64,
}

impl TickScheduler {
    /// `start_ms` is the clock reading the first period counts from.
    pub fn new(period_ms: u64, start_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            last_tick_ms: start_ms,
        }
    }

    /// Returns `true` at most once per period.  Late polls do not
    /// accumulate: the next period is measured from `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let elapsed = now_ms.wrapping_sub(self.last_tick_ms);
        if elapsed < self.period_ms {
            return false;
        }
        if elapsed >= self.period_ms.saturating_mul(2) {
            debug!("control tick late by {} ms", elapsed - self.period_ms);
        }
        self.last_tick_ms = now_ms;
        true
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }
}

// ═══════════════════════════════════════════════════════════════
//  Periodic job counter
// ═══════════════════════════════════════════════════════════════

/// Fires every `interval_ticks` control ticks.  An interval of zero
/// disables the job.
#[derive(Debug, Clone, Copy)]
pub struct Periodic {
    interval_ticks: u32,
    elapsed_ticks: u32,
}

impl Periodic {
    pub fn new(interval_ticks: u32) -> Self {
        Self {
            interval_ticks,
            elapsed_ticks: 0,
        }
    }

    /// Advance by one control tick; `true` when the job is due.
    pub fn on_tick(&mut self) -> bool {
        if self.interval_ticks == 0 {
            return false;
        }
        self.elapsed_ticks += 1;
        if self.elapsed_ticks >= self.interval_ticks {
            self.elapsed_ticks = 0;
            return true;
        }
        false
    }

    pub fn is_enabled(&self) -> bool {
        self.interval_ticks > 0
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
