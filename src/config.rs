use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::controller::{ControlConfig, FeedforwardGains, PidGains};
use crate::simulation::DEFAULT_HISTORY_CAPACITY;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "MOTOR_SIM__";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub simulation: SimulationConfig,
    #[validate(nested)]
    pub control: ControlSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SimulationConfig {
    /// Tick period in milliseconds
    #[validate(range(min = 1))]
    pub rate_ms: u64,
    #[validate(range(min = 1))]
    pub history_capacity: usize,
    /// Stop after this many ticks; run until Ctrl+C when absent
    pub max_ticks: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rate_ms: 50,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            max_ticks: None,
        }
    }
}

impl SimulationConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.rate_ms)
    }
}

/// Initial control configuration, flat for TOML/env convenience
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ControlSettings {
    pub pid_enabled: bool,
    pub ff_enabled: bool,
    #[validate(range(min = 0.0, max = 100.0))]
    pub desired_output: f64,
    #[validate(range(min = 0.0))]
    pub kp: f64,
    #[validate(range(min = 0.0))]
    pub ki: f64,
    #[validate(range(min = 0.0))]
    pub kd: f64,
    #[validate(range(min = 0.0))]
    pub ks: f64,
    #[validate(range(min = 0.0))]
    pub kv: f64,
    #[validate(range(min = 0.0))]
    pub ka: f64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            pid_enabled: false,
            ff_enabled: false,
            desired_output: 50.0,
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            ks: 0.0,
            kv: 0.0,
            ka: 0.0,
        }
    }
}

impl ControlSettings {
    pub fn to_control_config(&self) -> ControlConfig {
        ControlConfig {
            pid_enabled: self.pid_enabled,
            ff_enabled: self.ff_enabled,
            desired_output: self.desired_output,
            pid: PidGains::new(self.kp, self.ki, self.kd),
            feedforward: FeedforwardGains::new(self.ks, self.kv, self.ka),
        }
    }
}

impl Config {
    /// Defaults, then `config/default.toml`, then `MOTOR_SIM__*` env vars
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        let cfg: Config = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }
}
