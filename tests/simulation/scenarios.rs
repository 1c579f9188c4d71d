use motor_output_simulator::controller::{
    ControlConfig, FeedforwardGains, PidGains, MAX_VOLTAGE,
};
use motor_output_simulator::simulation::{EngineState, SimulationEngine};
use rstest::rstest;

const DT: f64 = 0.05;

fn engine_with(config: ControlConfig) -> SimulationEngine {
    SimulationEngine::new(config)
}

#[test]
fn test_uncontrolled_motor_stays_at_rest() {
    let mut engine = engine_with(ControlConfig::default().with_setpoint(50.0));

    let report = engine.tick(DT).unwrap();

    assert_eq!(report.motor_voltage, 0.0);
    assert_eq!(report.velocity, 0.0);
    assert_eq!(report.current_output, 0.0);
}

#[test]
fn test_proportional_first_tick() {
    let mut engine = engine_with(
        ControlConfig::default()
            .with_setpoint(50.0)
            .with_pid(PidGains::p(0.1)),
    );

    let report = engine.tick(DT).unwrap();

    assert_eq!(report.error, 50.0);
    assert!((report.motor_voltage - 5.0).abs() < 1e-12);
    assert!((report.velocity - 0.0375).abs() < 1e-12);
    assert!((report.current_output - 0.001875).abs() < 1e-12);
}

#[rstest]
#[case(10.0, 6.0)]
#[case(-10.0, -6.0)]
#[case(0.4, 0.0)]
fn test_static_feedforward_term(#[case] error: f64, #[case] expected: f64) {
    let gains = FeedforwardGains::new(0.5, 0.0, 0.0);
    assert_eq!(gains.static_term(error, MAX_VOLTAGE), expected);
}

#[test]
fn test_static_feedforward_on_first_tick() {
    // last_setpoint starts at 0, so ka must be zero to isolate ks
    let mut engine = engine_with(
        ControlConfig::default()
            .with_setpoint(50.0)
            .with_feedforward(FeedforwardGains::new(0.5, 0.0, 0.0)),
    );

    let report = engine.tick(DT).unwrap();
    assert_eq!(report.motor_voltage, 6.0);
}

#[test]
fn test_static_feedforward_pushes_down_when_above_setpoint() {
    let mut engine = engine_with(
        ControlConfig::default()
            .with_setpoint(80.0)
            .with_pid(PidGains::new(0.1, 0.0, 0.5)),
    );
    for _ in 0..400 {
        engine.tick(DT).unwrap();
    }
    assert!(engine.current_output() > 20.0);

    engine.set_pid_enabled(false);
    engine.set_desired_output(0.0);
    engine.set_feedforward_gains(FeedforwardGains::new(0.5, 0.0, 0.0));
    engine.set_ff_enabled(true);

    // Skip the setpoint-velocity tick; ka is zero anyway
    let report = engine.tick(DT).unwrap();
    assert_eq!(report.motor_voltage, -6.0);
}

#[rstest]
#[case::both_off(false, false)]
#[case::pid_only(true, false)]
#[case::ff_only(false, true)]
#[case::both_on(true, true)]
fn test_controller_combinations(#[case] pid_enabled: bool, #[case] ff_enabled: bool) {
    let config = ControlConfig {
        pid_enabled,
        ff_enabled,
        desired_output: 30.0,
        pid: PidGains::new(0.05, 0.01, 0.0),
        feedforward: FeedforwardGains::new(0.1, 0.05, 0.0),
    };
    let mut engine = engine_with(config);

    let report = engine.tick(DT).unwrap();

    // error = 30 on the first tick
    let expected_ff = if ff_enabled { 0.1 * 12.0 + 0.05 * 30.0 } else { 0.0 };
    let expected_pid = if pid_enabled { 0.05 * 30.0 + 0.01 * 30.0 * DT } else { 0.0 };

    assert!((report.control.feedforward - expected_ff).abs() < 1e-12);
    assert!((report.control.feedback - expected_pid).abs() < 1e-12);
    assert!((report.motor_voltage - (expected_ff + expected_pid)).abs() < 1e-12);
    assert_eq!(engine.state().pid.last_error(), if pid_enabled { 30.0 } else { 0.0 });
}

#[test]
fn test_history_is_fifo_after_overflow() {
    let mut engine = SimulationEngine::with_history_capacity(
        ControlConfig::default()
            .with_setpoint(50.0)
            .with_pid(PidGains::p(0.2)),
        100,
    )
    .unwrap();

    let mut times = Vec::new();
    for _ in 0..107 {
        times.push(engine.tick(DT).unwrap().elapsed_time);
    }

    let history = engine.history().to_vec();
    assert_eq!(history.len(), 100);
    assert_eq!(history.first().map(|s| s.time), Some(times[7]));
    assert_eq!(history.last().map(|s| s.time), Some(times[106]));
    assert!(history.windows(2).all(|w| w[0].time < w[1].time));
}

#[test]
fn test_reenabled_pid_starts_clean() {
    let kd = 0.001;
    let mut engine = engine_with(
        ControlConfig::default()
            .with_setpoint(50.0)
            .with_pid(PidGains::new(0.0, 0.0, kd)),
    );
    for _ in 0..20 {
        engine.tick(DT).unwrap();
    }

    engine.set_pid_enabled(false);
    engine.set_pid_enabled(true);

    let report = engine.tick(DT).unwrap();
    // Derivative sees only this tick's error against a zeroed previous error
    let expected = kd * report.error / DT;
    assert!((report.control.feedback - expected).abs() < 1e-12);
    assert!((engine.state().pid.integral() - report.error * DT).abs() < 1e-12);
}

#[test]
fn test_reset_twice_is_idempotent() {
    let mut engine = engine_with(
        ControlConfig::default()
            .with_setpoint(70.0)
            .with_pid(PidGains::new(0.3, 0.02, 0.1))
            .with_feedforward(FeedforwardGains::new(0.1, 0.1, 0.01)),
    );
    for _ in 0..50 {
        engine.tick(DT).unwrap();
    }

    engine.reset();
    let first = *engine.state();
    let first_snapshot = engine.snapshot();
    engine.reset();

    assert_eq!(first, EngineState::default());
    assert_eq!(*engine.state(), first);
    assert_eq!(engine.snapshot(), first_snapshot);
    assert!(engine.history().is_empty());
    assert_eq!(engine.config().desired_output, 70.0);
}

#[test]
fn test_pd_tracks_setpoint() {
    let mut engine = engine_with(
        ControlConfig::default()
            .with_setpoint(50.0)
            .with_pid(PidGains::new(0.1, 0.0, 0.5)),
    );

    for _ in 0..2000 {
        engine.tick(DT).unwrap();
    }

    assert!(engine.error().abs() < 0.5, "error {}", engine.error());
}

#[test]
fn test_snapshot_serializes() {
    let mut engine = engine_with(
        ControlConfig::default()
            .with_setpoint(50.0)
            .with_pid(PidGains::p(0.1)),
    );
    engine.tick(DT).unwrap();

    let json = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(json["desired_output"], 50.0);
    assert_eq!(json["history"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["history"][0]["desired"], 50.0);
}
