//! ISR-fed, debounced push-button driver.
//!
//! ## Hardware model
//!
//! Active-low momentary switch.  The interrupt (or, on the host, the
//! keyboard thread) records each falling edge into a [`ButtonLine`]: a
//! lock-free timestamp plus an edge counter.  The main loop calls
//! [`ButtonDriver::poll`], which reports each accepted press exactly once.
//!
//! | Button | Debounce | Source          |
//! |--------|----------|-----------------|
//! | Mode   | 300 ms   | `m` on the host |
//! | Manual | 50 ms    | `t` on the host |
//!
//! Edges closer than the debounce window to the last accepted press are
//! contact bounce and are dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use log::debug;

pub const MODE_DEBOUNCE_MS: u64 = 300;
pub const MANUAL_DEBOUNCE_MS: u64 = 50;

/// Shared edge register written from interrupt context.
#[derive(Debug, Default)]
pub struct ButtonLine {
    edges: AtomicU32,
    last_edge_ms: AtomicU64,
}

impl ButtonLine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// ISR handler: record a falling edge at `now_ms`.
    /// Lock-free, safe from any thread.
    pub fn isr_edge(&self, now_ms: u64) {
        self.last_edge_ms.store(now_ms, Ordering::Release);
        self.edges.fetch_add(1, Ordering::AcqRel);
    }

    fn snapshot(&self) -> (u32, u64) {
        let edges = self.edges.load(Ordering::Acquire);
        (edges, self.last_edge_ms.load(Ordering::Acquire))
    }
}

pub struct ButtonDriver {
    name: &'static str,
    line: Arc<ButtonLine>,
    debounce_ms: u64,
    seen_edges: u32,
    last_accepted_ms: Option<u64>,
}

impl ButtonDriver {
    pub fn new(name: &'static str, line: Arc<ButtonLine>, debounce_ms: u64) -> Self {
        Self {
            name,
            line,
            debounce_ms,
            seen_edges: 0,
            last_accepted_ms: None,
        }
    }

    /// Handle shared with the ISR side.
    pub fn line(&self) -> Arc<ButtonLine> {
        Arc::clone(&self.line)
    }

    /// `true` once per debounced press since the previous poll.
    pub fn poll(&mut self) -> bool {
        let (edges, edge_ms) = self.line.snapshot();
        if edges == self.seen_edges {
            return false;
        }
        self.seen_edges = edges;

        if let Some(last) = self.last_accepted_ms {
            if edge_ms.wrapping_sub(last) < self.debounce_ms {
                debug!("{} button: bounce ignored", self.name);
                return false;
            }
        }

        self.last_accepted_ms = Some(edge_ms);
        debug!("{} button pressed", self.name);
        true
    }
}
