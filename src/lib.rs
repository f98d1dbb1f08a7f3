//! Smart plant watering controller library.
//!
//! Exposes the pure-logic modules for integration testing plus the host
//! simulation adapters used by the `plantwater` binary.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod fsm;
pub mod scheduler;

pub mod error;

pub mod adapters;
pub mod drivers;
pub mod sensors;
