//! Motor output simulator.
//!
//! A DC-motor-like actuator tracks a commanded output percentage under
//! optional PID and feedforward control, advanced at a fixed timestep with a
//! bounded desired-vs-actual history.

pub mod config;
pub mod controller;
pub mod error;
pub mod simulation;
pub mod telemetry;

pub use controller::{ControlConfig, FeedforwardGains, GainLimits, PidGains};
pub use error::{SimError, SimResult};
pub use simulation::{SimulationDriver, SimulationEngine, Snapshot, TickReport};
