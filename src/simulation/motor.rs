//! # Motor Model
//!
//! First-order DC motor with viscous damping, integrated with explicit Euler:
//!
//! dv/dt = V * K_motor - v * K_damp
//! dx/dt = v
//!
//! Where:
//! - V = applied voltage (V)
//! - v = output velocity (%/s)
//! - x = output position (%), clamped to [0, 100]
//!
//! The position update uses the *new* velocity (semi-implicit Euler).

use serde::{Deserialize, Serialize};

/// How strongly the motor responds to voltage
pub const MOTOR_CONSTANT: f64 = 0.15;
/// Natural damping/friction
pub const DAMPING_CONSTANT: f64 = 0.08;

pub const OUTPUT_MIN: f64 = 0.0;
pub const OUTPUT_MAX: f64 = 100.0;

/// Kinematic state of the motor output
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotorState {
    /// Output position (%)
    pub output: f64,
    /// Output velocity (%/s)
    pub velocity: f64,
    /// Velocity change over the last step divided by dt (%/s²)
    pub acceleration: f64,
    /// Voltage applied during the last step (V)
    pub voltage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorModel {
    pub motor_constant: f64,
    pub damping_constant: f64,
}

impl Default for MotorModel {
    fn default() -> Self {
        Self {
            motor_constant: MOTOR_CONSTANT,
            damping_constant: DAMPING_CONSTANT,
        }
    }
}

impl MotorModel {
    /// Advance the motor by one step.
    ///
    /// `dt` must already be validated as positive and finite; `voltage` is
    /// applied as given.
    pub fn step(&self, state: &MotorState, voltage: f64, dt: f64) -> MotorState {
        let velocity_change =
            (voltage * self.motor_constant - state.velocity * self.damping_constant) * dt;
        let velocity = state.velocity + velocity_change;
        let output = (state.output + velocity * dt).clamp(OUTPUT_MIN, OUTPUT_MAX);

        MotorState {
            output,
            velocity,
            acceleration: velocity_change / dt,
            voltage,
        }
    }
}
