//! Control law: combines the feedforward and PID terms into one voltage command.

use serde::{Deserialize, Serialize};

use super::{ControlConfig, PidController};
use crate::error::{check_timestep, SimResult};

/// Supply voltage envelope (V). Commands are clamped to ±MAX_VOLTAGE.
pub const MAX_VOLTAGE: f64 = 12.0;

/// Per-tick inputs derived from the setpoint and the measured output.
///
/// Construction validates the timestep, so every division by `dt` inside the
/// control law and the motor model is safe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlInputs {
    error: f64,
    setpoint_velocity: f64,
    dt: f64,
}

impl ControlInputs {
    /// # Arguments
    /// * `desired_output` - Setpoint for this tick (%)
    /// * `current_output` - Measured output before this tick (%)
    /// * `last_setpoint` - Setpoint captured at the end of the previous tick (%)
    /// * `dt` - Tick period (s)
    pub fn new(
        desired_output: f64,
        current_output: f64,
        last_setpoint: f64,
        dt: f64,
    ) -> SimResult<Self> {
        let dt = check_timestep(dt)?;
        Ok(Self {
            error: desired_output - current_output,
            setpoint_velocity: (desired_output - last_setpoint) / dt,
            dt,
        })
    }

    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn setpoint_velocity(&self) -> f64 {
        self.setpoint_velocity
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }
}

/// Breakdown of one voltage command
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlOutput {
    /// Feedforward contribution (0 when feedforward is disabled)
    pub feedforward: f64,
    /// PID contribution (0 when PID is disabled)
    pub feedback: f64,
    /// Clamped command applied to the motor
    pub voltage: f64,
    /// Whether the clamp changed the command
    pub saturated: bool,
}

/// Compute the clamped voltage command for one tick.
///
/// Feedforward is evaluated first, then PID. The PID integrator and previous
/// error are only touched when PID is enabled.
pub fn control_voltage(
    config: &ControlConfig,
    inputs: &ControlInputs,
    pid: &mut PidController,
) -> ControlOutput {
    let feedforward = if config.ff_enabled {
        config
            .feedforward
            .compute(inputs.error, inputs.setpoint_velocity, MAX_VOLTAGE)
    } else {
        0.0
    };

    let feedback = if config.pid_enabled {
        pid.update(&config.pid, inputs.error, inputs.dt)
    } else {
        0.0
    };

    let raw = feedforward + feedback;
    let voltage = raw.clamp(-MAX_VOLTAGE, MAX_VOLTAGE);

    ControlOutput {
        feedforward,
        feedback,
        voltage,
        saturated: voltage != raw,
    }
}
