//! Gain and setpoint ranges offered to presentation layers.
//!
//! The engine accepts any non-negative gain; these bounds only describe the
//! ranges a slider or numeric input should offer.

use serde::{Deserialize, Serialize};

use super::{ControlConfig, FeedforwardGains, PidGains};

pub const SETPOINT_MIN: f64 = 0.0;
pub const SETPOINT_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainBound {
    pub max: f64,
    /// Input granularity
    pub step: f64,
}

impl GainBound {
    pub const fn new(max: f64, step: f64) -> Self {
        Self { max, step }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(0.0, self.max)
    }

    /// Clamp, then round to the nearest step.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = self.clamp(value);
        ((clamped / self.step).round() * self.step).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        (0.0..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainLimits {
    pub kp: GainBound,
    pub ki: GainBound,
    pub kd: GainBound,
    pub ks: GainBound,
    pub kv: GainBound,
    pub ka: GainBound,
}

impl Default for GainLimits {
    fn default() -> Self {
        Self {
            kp: GainBound::new(1.0, 0.001),
            ki: GainBound::new(0.1, 0.001),
            kd: GainBound::new(0.5, 0.001),
            ks: GainBound::new(1.0, 0.01),
            kv: GainBound::new(2.0, 0.01),
            ka: GainBound::new(1.0, 0.01),
        }
    }
}

impl GainLimits {
    pub fn clamp_pid(&self, gains: PidGains) -> PidGains {
        PidGains {
            kp: self.kp.clamp(gains.kp),
            ki: self.ki.clamp(gains.ki),
            kd: self.kd.clamp(gains.kd),
        }
    }

    pub fn clamp_feedforward(&self, gains: FeedforwardGains) -> FeedforwardGains {
        FeedforwardGains {
            ks: self.ks.clamp(gains.ks),
            kv: self.kv.clamp(gains.kv),
            ka: self.ka.clamp(gains.ka),
        }
    }

    /// Bring a whole configuration inside the presentation ranges,
    /// including the setpoint.
    pub fn clamp(&self, config: ControlConfig) -> ControlConfig {
        ControlConfig {
            desired_output: config.desired_output.clamp(SETPOINT_MIN, SETPOINT_MAX),
            pid: self.clamp_pid(config.pid),
            feedforward: self.clamp_feedforward(config.feedforward),
            ..config
        }
    }

    /// Names of the gains lying outside their presentation range.
    pub fn violations(&self, config: &ControlConfig) -> Vec<&'static str> {
        let checks = [
            ("kp", self.kp, config.pid.kp),
            ("ki", self.ki, config.pid.ki),
            ("kd", self.kd, config.pid.kd),
            ("ks", self.ks, config.feedforward.ks),
            ("kv", self.kv, config.feedforward.kv),
            ("ka", self.ka, config.feedforward.ka),
        ];

        checks
            .into_iter()
            .filter(|(_, bound, value)| !bound.contains(*value))
            .map(|(name, _, _)| name)
            .collect()
    }
}
