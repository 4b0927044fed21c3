//! Single-car elevator simulator.
//!
//! The [`ElevatorController`] turns floor requests into a tick-by-tick trajectory with a
//! trapezoidal velocity profile and sequences the doors around each trip. Anything that draws
//! the car only reads [`CarState`] snapshots and forwards requests.

/* Modules */
pub mod config;
pub mod elevator;
pub mod script;
pub mod shared;


pub use config::{load_config, Config, ElevatorConfig, SimulationConfig};
pub use elevator::ElevatorController;
pub use shared::{Accepted, CarState, ConfigError, Direction, Phase, Rejection};
