//! # Motor Simulation Module
//!
//! Discrete-time simulation of a DC-motor-like actuator tracking a commanded
//! output percentage.
//!
//! ## Components
//!
//! - **Motor**: first-order velocity model with viscous damping and a clamped output
//! - **History**: rolling desired-vs-actual samples for charting
//! - **Engine**: owns all per-tick state and runs control law → motor → history
//! - **Driver**: fixed-rate tokio loop around a shared engine handle
//!
//! ## Usage
//!
//! ```rust
//! use motor_output_simulator::controller::{ControlConfig, PidGains};
//! use motor_output_simulator::simulation::SimulationEngine;
//!
//! let config = ControlConfig::default()
//!     .with_setpoint(50.0)
//!     .with_pid(PidGains::new(0.1, 0.0, 0.0));
//!
//! let mut engine = SimulationEngine::new(config);
//!
//! // Advance one 50 ms tick
//! let report = engine.tick(0.05).unwrap();
//! assert!((report.motor_voltage - 5.0).abs() < 1e-12);
//! assert_eq!(engine.history().len(), 1);
//! ```

pub mod driver;
pub mod engine;
pub mod history;
pub mod motor;

pub use driver::{shared, SharedEngine, SimulationDriver, SIMULATION_RATE};
pub use engine::{EngineState, SimulationEngine, Snapshot, TickReport};
pub use history::{HistoryBuffer, HistorySample, DEFAULT_HISTORY_CAPACITY};
pub use motor::{
    MotorModel, MotorState, DAMPING_CONSTANT, MOTOR_CONSTANT, OUTPUT_MAX, OUTPUT_MIN,
};
