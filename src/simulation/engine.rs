//! # Simulation Engine
//!
//! Owns the control configuration, the motor and integrator state, and the
//! rolling history. One call to [`SimulationEngine::tick`] is one discrete
//! timestep:
//!
//! 1. error and setpoint velocity from the current setpoint
//! 2. control law (feedforward, then PID, then clamp)
//! 3. motor step
//! 4. clock advance and history sample
//! 5. setpoint captured for the next tick's velocity estimate
//!
//! The engine is not reentrant; share it through
//! [`SharedEngine`](super::SharedEngine) when several tasks need access.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::history::{HistoryBuffer, HistorySample};
use super::motor::{MotorModel, MotorState};
use crate::controller::{
    control_voltage, ControlConfig, ControlInputs, ControlOutput, FeedforwardGains,
    PidController, PidGains,
};
use crate::error::SimResult;

/// Everything the engine mutates while ticking
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngineState {
    pub motor: MotorState,
    pub pid: PidController,
    /// Setpoint seen at the end of the previous tick
    pub last_setpoint: f64,
    /// Simulation clock (s)
    pub elapsed_time: f64,
}

/// Published result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub elapsed_time: f64,
    pub desired_output: f64,
    pub current_output: f64,
    pub motor_voltage: f64,
    pub velocity: f64,
    pub acceleration: f64,
    /// Error that drove this tick (setpoint minus output before the step)
    pub error: f64,
    pub control: ControlOutput,
}

/// Serialisable view of the engine for consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub elapsed_time: f64,
    pub desired_output: f64,
    pub current_output: f64,
    pub motor_voltage: f64,
    pub velocity: f64,
    pub acceleration: f64,
    /// Setpoint minus current output
    pub error: f64,
    pub pid_enabled: bool,
    pub ff_enabled: bool,
    pub history: Vec<HistorySample>,
}

#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: ControlConfig,
    model: MotorModel,
    state: EngineState,
    history: HistoryBuffer,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(ControlConfig::default())
    }
}

impl SimulationEngine {
    /// Create an engine at rest with the default history capacity
    pub fn new(config: ControlConfig) -> Self {
        Self {
            config,
            model: MotorModel::default(),
            state: EngineState::default(),
            history: HistoryBuffer::default(),
        }
    }

    pub fn with_history_capacity(config: ControlConfig, capacity: usize) -> SimResult<Self> {
        Ok(Self {
            history: HistoryBuffer::new(capacity)?,
            ..Self::new(config)
        })
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// A non-positive or non-finite `dt` is rejected before any state changes.
    pub fn tick(&mut self, dt: f64) -> SimResult<TickReport> {
        let desired = self.config.desired_output;
        let inputs = ControlInputs::new(
            desired,
            self.state.motor.output,
            self.state.last_setpoint,
            dt,
        )?;

        let control = control_voltage(&self.config, &inputs, &mut self.state.pid);
        self.state.motor = self.model.step(&self.state.motor, control.voltage, inputs.dt());

        self.state.elapsed_time += inputs.dt();
        self.history.push(HistorySample {
            time: self.state.elapsed_time,
            desired,
            actual: self.state.motor.output,
        });

        self.state.last_setpoint = desired;

        if control.saturated {
            trace!(
                requested_v = control.feedforward + control.feedback,
                applied_v = control.voltage,
                "voltage command saturated"
            );
        }

        Ok(TickReport {
            elapsed_time: self.state.elapsed_time,
            desired_output: desired,
            current_output: self.state.motor.output,
            motor_voltage: self.state.motor.voltage,
            velocity: self.state.motor.velocity,
            acceleration: self.state.motor.acceleration,
            error: inputs.error(),
            control,
        })
    }

    /// Zero all engine state and clear the history. Configuration is kept.
    pub fn reset(&mut self) {
        self.state = EngineState::default();
        self.history.clear();
        debug!("simulation reset");
    }

    /// Toggle PID. Disabling discards the integrator and previous error so a
    /// later re-enable starts clean.
    pub fn set_pid_enabled(&mut self, enabled: bool) {
        if self.config.pid_enabled && !enabled {
            self.state.pid.reset();
            debug!("pid disabled, integrator cleared");
        }
        self.config.pid_enabled = enabled;
    }

    pub fn set_ff_enabled(&mut self, enabled: bool) {
        self.config.ff_enabled = enabled;
    }

    pub fn set_desired_output(&mut self, desired_output: f64) {
        self.config.desired_output = desired_output;
    }

    pub fn set_pid_gains(&mut self, gains: PidGains) {
        self.config.pid = gains;
    }

    pub fn set_feedforward_gains(&mut self, gains: FeedforwardGains) {
        self.config.feedforward = gains;
    }

    /// Replace the whole configuration. The PID flag goes through
    /// [`set_pid_enabled`](Self::set_pid_enabled) so its reset still applies.
    pub fn configure(&mut self, config: ControlConfig) {
        self.set_pid_enabled(config.pid_enabled);
        self.config = config;
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn pid_enabled(&self) -> bool {
        self.config.pid_enabled
    }

    pub fn ff_enabled(&self) -> bool {
        self.config.ff_enabled
    }

    pub fn current_output(&self) -> f64 {
        self.state.motor.output
    }

    pub fn motor_voltage(&self) -> f64 {
        self.state.motor.voltage
    }

    pub fn velocity(&self) -> f64 {
        self.state.motor.velocity
    }

    pub fn acceleration(&self) -> f64 {
        self.state.motor.acceleration
    }

    pub fn elapsed_time(&self) -> f64 {
        self.state.elapsed_time
    }

    /// Setpoint minus current output
    pub fn error(&self) -> f64 {
        self.config.desired_output - self.state.motor.output
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            elapsed_time: self.state.elapsed_time,
            desired_output: self.config.desired_output,
            current_output: self.state.motor.output,
            motor_voltage: self.state.motor.voltage,
            velocity: self.state.motor.velocity,
            acceleration: self.state.motor.acceleration,
            error: self.error(),
            pid_enabled: self.config.pid_enabled,
            ff_enabled: self.config.ff_enabled,
            history: self.history.to_vec(),
        }
    }
}
