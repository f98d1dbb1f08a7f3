//! Actuator and input drivers.

pub mod button;
pub mod indicator;
pub mod led_patterns;
pub mod pump;
pub mod sim_pin;
