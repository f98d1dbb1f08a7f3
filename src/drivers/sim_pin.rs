//! In-memory GPIO output for host builds and tests.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

/// Output pin that just remembers its level.
#[derive(Debug, Default)]
pub struct SimOutputPin {
    high: bool,
    writes: u32,
}

impl SimOutputPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    /// Number of level writes so far.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ErrorType for SimOutputPin {
    type Error = Infallible;
}

impl OutputPin for SimOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}
