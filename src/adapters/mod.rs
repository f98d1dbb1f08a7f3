//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements    | Connects to                     |
//! |---------------|---------------|---------------------------------|
//! | `hardware`    | SensorPort    | soil probe, thermistor          |
//! |               | ActuatorPort  | pump relay, status LED          |
//! |               | InputPort     | mode and manual buttons         |
//! | `keyboard`    | (button ISR)  | stdin reader thread             |
//! | `log_sink`    | EventSink     | console log output              |
//! | `config_file` | ConfigPort    | JSON file                       |
//! | `time`        | ClockPort     | `std::time::Instant`            |

pub mod config_file;
pub mod hardware;
pub mod keyboard;
pub mod log_sink;
pub mod time;
