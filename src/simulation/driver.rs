//! Fixed-rate driver.
//!
//! Ticks a shared engine on a tokio interval. The mutex is the single-writer
//! point: presentation tasks adjust gains or the setpoint between ticks
//! through the same handle.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::engine::{SimulationEngine, TickReport};
use crate::error::{check_timestep, SimResult};

/// Default tick period
pub const SIMULATION_RATE: Duration = Duration::from_millis(50);

pub type SharedEngine = Arc<Mutex<SimulationEngine>>;

pub fn shared(engine: SimulationEngine) -> SharedEngine {
    Arc::new(Mutex::new(engine))
}

pub struct SimulationDriver {
    engine: SharedEngine,
    period: Duration,
}

impl SimulationDriver {
    pub fn new(engine: SharedEngine, period: Duration) -> SimResult<Self> {
        check_timestep(period.as_secs_f64())?;
        Ok(Self { engine, period })
    }

    pub fn engine(&self) -> SharedEngine {
        self.engine.clone()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Tick `ticks` times back to back without waiting on a timer.
    ///
    /// Returns the last report, or `None` when `ticks` is zero.
    pub fn run_for(&self, ticks: u64) -> SimResult<Option<TickReport>> {
        let dt = self.period.as_secs_f64();
        let mut engine = self.engine.lock();
        let mut last = None;
        for _ in 0..ticks {
            last = Some(engine.tick(dt)?);
        }
        Ok(last)
    }

    /// Tick once per period until `max_ticks` is reached or `shutdown`
    /// resolves. Late ticks are skipped rather than replayed in a burst.
    ///
    /// Returns the number of ticks performed.
    pub async fn run<F>(&self, max_ticks: Option<u64>, shutdown: F) -> SimResult<u64>
    where
        F: Future<Output = ()>,
    {
        let dt = self.period.as_secs_f64();
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(period_ms = self.period.as_millis() as u64, ?max_ticks, "simulation loop started");

        let mut ticks = 0u64;
        loop {
            if max_ticks.is_some_and(|max| ticks >= max) {
                break;
            }

            tokio::select! {
                _ = &mut shutdown => {
                    info!(ticks, "simulation loop stopping on shutdown");
                    break;
                }
                _ = interval.tick() => {
                    let report = self.engine.lock().tick(dt)?;
                    ticks += 1;
                    debug!(
                        time_s = report.elapsed_time,
                        desired_pct = report.desired_output,
                        output_pct = report.current_output,
                        voltage_v = report.motor_voltage,
                        velocity = report.velocity,
                        acceleration = report.acceleration,
                        "control tick"
                    );
                }
            }
        }

        Ok(ticks)
    }
}
