//! Application core: pure domain logic, zero I/O.
//!
//! Business rules for the watering controller: sensor cadence, mode
//! handling and actuator commands.  All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
