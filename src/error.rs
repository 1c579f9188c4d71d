use thiserror::Error;

/// Simulation errors
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SimError {
    #[error("Invalid timestep: {0}s (must be finite and greater than zero)")]
    InvalidTimestep(f64),
    #[error("Invalid history capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),
}

pub type SimResult<T> = std::result::Result<T, SimError>;

/// Reject a timestep before it reaches any division.
pub fn check_timestep(dt: f64) -> SimResult<f64> {
    if dt.is_finite() && dt > 0.0 {
        Ok(dt)
    } else {
        Err(SimError::InvalidTimestep(dt))
    }
}
