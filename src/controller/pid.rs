/// PID (Proportional-Integral-Derivative) feedback term
///
/// The controller carries the integrator and the previous error between
/// ticks; the gains are read fresh every tick because they are owned by the
/// externally mutable configuration.
///
/// # Theory
/// - **P (Proportional)**: Responds to the current error
/// - **I (Integral)**: Responds to accumulated past errors
/// - **D (Derivative)**: Responds to the rate of error change
///
/// Output = Kp * error + Ki * ∫error*dt + Kd * d(error)/dt
///
/// The integrator is unbounded: there is no anti-windup clamp, so long
/// saturated runs keep accumulating until the error changes sign.
use serde::{Deserialize, Serialize};

/// Feedback gains
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    /// Proportional gain
    pub kp: f64,
    /// Integral gain
    pub ki: f64,
    /// Derivative gain
    pub kd: f64,
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    /// P-only gains
    pub fn p(kp: f64) -> Self {
        Self {
            kp,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PidController {
    /// Accumulated integral term
    integral: f64,
    /// Error seen on the previous tick, for the derivative estimate
    last_error: f64,
}

impl PidController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the integrator and derivative history
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.last_error = 0.0;
    }

    /// Advance the integrator by one tick and return the feedback contribution.
    ///
    /// # Arguments
    /// * `gains` - Gains in effect for this tick
    /// * `error` - Setpoint minus process value
    /// * `dt` - Tick period in seconds, already validated as positive
    pub fn update(&mut self, gains: &PidGains, error: f64, dt: f64) -> f64 {
        debug_assert!(dt > 0.0, "timestep must be validated before the PID update");

        let p_term = gains.kp * error;

        self.integral += error * dt;
        let i_term = gains.ki * self.integral;

        let derivative = (error - self.last_error) / dt;
        let d_term = gains.kd * derivative;

        self.last_error = error;

        p_term + i_term + d_term
    }

    /// Get current integral term
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Get the error recorded on the previous update
    pub fn last_error(&self) -> f64 {
        self.last_error
    }
}
