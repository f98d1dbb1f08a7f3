//! Keyboard stand-in for the two push buttons.
//!
//! A background thread reads stdin and plays the role of the GPIO
//! interrupt: each key records an edge on the matching [`ButtonLine`].
//!
//! | Key | Action                |
//! |-----|-----------------------|
//! | `m` | mode button           |
//! | `t` | manual watering press |
//! | `q` | quit                  |
//!
//! Input is line-buffered, so keys take effect after Enter.  End of input
//! stops the thread but not the controller.

use std::io::{self, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use log::{debug, info};

use crate::app::ports::ClockPort;
use crate::drivers::button::ButtonLine;

/// What a single key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ModePress,
    ManualPress,
    Quit,
    Ignored,
}

pub fn classify(byte: u8) -> KeyAction {
    match byte {
        b'm' | b'M' => KeyAction::ModePress,
        b't' | b'T' => KeyAction::ManualPress,
        b'q' | b'Q' => KeyAction::Quit,
        _ => KeyAction::Ignored,
    }
}

/// Wiring between keys and the controller's inputs.
#[derive(Clone)]
pub struct KeyboardButtons<C> {
    pub mode: Arc<ButtonLine>,
    pub manual: Arc<ButtonLine>,
    pub quit: Arc<AtomicBool>,
    pub clock: C,
}

impl<C: ClockPort> KeyboardButtons<C> {
    /// Apply one key.  Returns `false` once the user asked to quit.
    pub fn handle(&self, byte: u8) -> bool {
        match classify(byte) {
            KeyAction::ModePress => {
                info!(">>> MODE BUTTON PRESSED <<<");
                self.mode.isr_edge(self.clock.now_ms());
            }
            KeyAction::ManualPress => {
                info!(">>> MANUAL WATERING BUTTON PRESSED <<<");
                self.manual.isr_edge(self.clock.now_ms());
            }
            KeyAction::Quit => {
                self.quit.store(true, Ordering::Release);
                return false;
            }
            KeyAction::Ignored => {}
        }
        true
    }

    /// Feed every byte of `input` until it ends or a quit key arrives.
    pub fn pump_input(&self, input: impl Read) {
        for byte in input.bytes() {
            match byte {
                Ok(b) => {
                    if !self.handle(b) {
                        return;
                    }
                }
                Err(e) => {
                    debug!("keyboard: read error: {}", e);
                    return;
                }
            }
        }
        debug!("keyboard: end of input");
    }
}

impl<C: ClockPort + Send + 'static> KeyboardButtons<C> {
    /// Start the stdin reader thread.
    pub fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("keyboard".into())
            .spawn(move || self.pump_input(io::stdin().lock()))
    }
}
