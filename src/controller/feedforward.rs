//! Feedforward term.
//!
//! Static friction (`ks`), velocity (`kv`) and acceleration (`ka`) components.
//! The velocity component acts on the tracking error and the acceleration
//! component on the setpoint velocity estimated over the previous tick.

use serde::{Deserialize, Serialize};

/// Error magnitude at or below which the static friction component is held at zero.
pub const STATIC_DEADBAND: f64 = 0.5;

/// Feedforward gains
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedforwardGains {
    /// Static friction gain, as a fraction of the supply voltage
    pub ks: f64,
    /// Velocity gain (volts per percent of error)
    pub kv: f64,
    /// Acceleration gain (volts per percent/s of setpoint velocity)
    pub ka: f64,
}

impl FeedforwardGains {
    pub fn new(ks: f64, kv: f64, ka: f64) -> Self {
        Self { ks, kv, ka }
    }

    /// Voltage needed to break static friction, in the direction of the error.
    pub fn static_term(&self, error: f64, max_voltage: f64) -> f64 {
        if error.abs() > STATIC_DEADBAND {
            error.signum() * self.ks * max_voltage
        } else {
            0.0
        }
    }

    pub fn velocity_term(&self, error: f64) -> f64 {
        self.kv * error
    }

    pub fn acceleration_term(&self, setpoint_velocity: f64) -> f64 {
        self.ka * setpoint_velocity
    }

    /// Sum of all three components, unclamped.
    pub fn compute(&self, error: f64, setpoint_velocity: f64, max_voltage: f64) -> f64 {
        self.static_term(error, max_voltage)
            + self.velocity_term(error)
            + self.acceleration_term(setpoint_velocity)
    }
}
