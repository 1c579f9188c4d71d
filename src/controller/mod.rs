//! # Control
//!
//! Feedforward and PID terms combined by a single control law into a motor
//! voltage command. The two controllers are independent toggles; all four
//! on/off combinations are valid.

pub mod feedforward;
pub mod law;
pub mod limits;
pub mod pid;

use serde::{Deserialize, Serialize};

pub use feedforward::{FeedforwardGains, STATIC_DEADBAND};
pub use law::{control_voltage, ControlInputs, ControlOutput, MAX_VOLTAGE};
pub use limits::{GainBound, GainLimits, SETPOINT_MAX, SETPOINT_MIN};
pub use pid::{PidController, PidGains};

/// Externally mutable control configuration, read on every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlConfig {
    pub pid_enabled: bool,
    pub ff_enabled: bool,
    /// Setpoint (%), expected in [0, 100]. Callers clamp; the engine does not.
    pub desired_output: f64,
    pub pid: PidGains,
    pub feedforward: FeedforwardGains,
}

impl ControlConfig {
    pub fn with_setpoint(mut self, desired_output: f64) -> Self {
        self.desired_output = desired_output;
        self
    }

    pub fn with_pid(mut self, gains: PidGains) -> Self {
        self.pid_enabled = true;
        self.pid = gains;
        self
    }

    pub fn with_feedforward(mut self, gains: FeedforwardGains) -> Self {
        self.ff_enabled = true;
        self.feedforward = gains;
        self
    }
}
