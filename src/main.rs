use anyhow::Result;
use motor_output_simulator::{config, controller::GainLimits, simulation, telemetry};
use config::Config;
use simulation::{shared, SimulationDriver, SimulationEngine};
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;
    let control = cfg.control.to_control_config();

    for gain in GainLimits::default().violations(&control) {
        warn!(gain, "gain outside the usual tuning range; engine will use it as given");
    }

    let engine = SimulationEngine::with_history_capacity(control, cfg.simulation.history_capacity)?;
    let driver = SimulationDriver::new(shared(engine), cfg.simulation.period())?;

    info!(
        rate_ms = cfg.simulation.rate_ms,
        pid_enabled = control.pid_enabled,
        ff_enabled = control.ff_enabled,
        desired_pct = control.desired_output,
        "starting motor output simulator"
    );

    let ticks = driver
        .run(cfg.simulation.max_ticks, telemetry::shutdown_signal())
        .await?;

    let snapshot = driver.engine().lock().snapshot();
    info!(
        ticks,
        output_pct = snapshot.current_output,
        error_pct = snapshot.error,
        "simulation stopped"
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
