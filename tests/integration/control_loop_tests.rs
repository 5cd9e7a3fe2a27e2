//! Supervisor ⇄ plant closed-loop scenarios.

use heaterctl::supervisor::HeaterSupervisor;
use heaterctl::{HeaterState, Outcome, Reason};

use super::mock_plant::MockPlant;

const DT: f32 = 1.0;

fn run(plant: &mut MockPlant, sup: &mut HeaterSupervisor, ticks: usize) {
    for _ in 0..ticks {
        let cmd = sup.step(plant.temperature, DT);
        plant.advance(cmd, DT);
    }
}

// ── Hysteresis ────────────────────────────────────────────────

#[test]
fn cold_ambient_cycles_between_band_edges() {
    let mut plant = MockPlant::new(20.0, -10.0);
    let mut sup = HeaterSupervisor::default();
    run(&mut plant, &mut sup, 2000);

    let switches = plant.switches();
    assert!(switches.len() >= 4, "expected repeated cycling, got {}", switches.len());

    // Every switch happens outside the dead band, never inside it.
    for (reading, cmd) in &switches {
        match cmd {
            HeaterState::On => assert!(*reading < 0.0, "switched ON at {reading}"),
            HeaterState::Off => assert!(*reading > 40.0, "switched OFF at {reading}"),
        }
    }

    assert!(!sup.is_latched());
    assert_eq!(sup.stats().safety_trips, 0);
    assert!(plant.min_temperature() > -15.0);
    assert!(plant.max_temperature() < 45.0);
}

#[test]
fn dead_band_prevents_chatter() {
    let mut plant = MockPlant::new(20.0, -10.0);
    let mut sup = HeaterSupervisor::default();
    run(&mut plant, &mut sup, 2000);

    // Consecutive switches are separated by a full traverse of the band.
    let ticks_between: Vec<usize> = plant
        .history
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0].1 != w[1].1)
        .map(|(i, _)| i)
        .collect::<Vec<_>>()
        .windows(2)
        .map(|w| w[1] - w[0])
        .collect();
    assert!(ticks_between.iter().all(|&n| n >= 5), "{ticks_between:?}");
}

#[test]
fn warm_ambient_never_switches_on() {
    let mut plant = MockPlant::new(30.0, 25.0);
    let mut sup = HeaterSupervisor::default();
    run(&mut plant, &mut sup, 500);
    assert!(plant.history.iter().all(|h| h.1 == HeaterState::Off));
}

// ── Sensor faults ─────────────────────────────────────────────

#[test]
fn sentinel_readings_skip_cycles_without_switching() {
    let mut plant = MockPlant::new(-5.0, -10.0);
    let mut sup = HeaterSupervisor::default();

    let mut injected = 0;
    for tick in 0..100 {
        let reading = if tick % 7 == 3 {
            injected += 1;
            999.0
        } else {
            plant.temperature
        };
        let before = sup.command();
        let cmd = sup.step(reading, DT);
        if reading == 999.0 {
            assert_eq!(cmd, before, "fault tick {tick} changed the command");
            assert_eq!(sup.last_decision().map(|d| d.reason), Some(Reason::SensorFault));
        }
        plant.advance(cmd, DT);
    }
    assert_eq!(sup.stats().skipped, injected);
    assert_eq!(sup.stats().steps, 100);
}

#[test]
fn zero_timestep_ticks_are_skipped() {
    let mut sup = HeaterSupervisor::new(HeaterState::On);
    assert_eq!(sup.step(-3.0, 0.0), HeaterState::On);
    assert_eq!(
        sup.last_decision().map(|d| d.outcome),
        Some(Outcome::InvalidInput)
    );
    assert_eq!(sup.step(41.0, -0.5), HeaterState::On);
    assert_eq!(sup.step(41.0, 0.5), HeaterState::Off);
}

// ── Safety ────────────────────────────────────────────────────

#[test]
fn failed_heater_trips_safety_and_holds_off() {
    let mut plant = MockPlant::new(5.0, -30.0);
    plant.heater_gain = 0.0;
    let mut sup = HeaterSupervisor::default();
    run(&mut plant, &mut sup, 300);

    assert!(sup.is_latched());
    assert_eq!(sup.stats().safety_trips, 1);
    assert_eq!(sup.command(), HeaterState::Off);
    assert!(sup.reset().is_err());

    // Everything after the trip is OFF.
    let trip = plant
        .history
        .iter()
        .position(|h| h.0 < -15.0)
        .expect("plant should cool past critical low");
    assert!(plant.history[trip..].iter().all(|h| h.1 == HeaterState::Off));
}

#[test]
fn recovery_requires_explicit_reset() {
    let mut plant = MockPlant::new(5.0, -30.0);
    plant.heater_gain = 0.0;
    let mut sup = HeaterSupervisor::default();
    run(&mut plant, &mut sup, 300);
    assert!(sup.is_latched());

    // Heater repaired, room warmed: reading back inside the envelope.
    plant.heater_gain = 5.0;
    plant.temperature = -5.0;
    plant.ambient = -10.0;
    assert_eq!(sup.step(plant.temperature, DT), HeaterState::Off);
    assert!(sup.is_latched());

    sup.reset().expect("reading is back inside the envelope");
    assert_eq!(sup.step(plant.temperature, DT), HeaterState::On);
}
