use std::sync::Arc;

use log::{LevelFilter, error, info};

use tune_rs::buttons::ButtonPanel;
use tune_rs::config::{
    ANGULAR_KD, ANGULAR_KI, ANGULAR_KP, DEFAULT_HEADINGS, DEFAULT_LENGTHS, LATERAL_KD, LATERAL_KI,
    LATERAL_KP,
};
use tune_rs::lcd::CharacterLcd;
use tune_rs::session::lock_session;
use tune_rs::sim_chassis::SimChassis;
use tune_rs::{Chassis, CyclicSequence, GainSet, PidTuner, Shutdown, logger};

// Controls:
//  X: switch between lateral and angular gains
//  R1/R2: kP +/-    Right/Left: kI +/-    L1/L2: kD +/-
//  Up/Down: step x10 / step /10
//  Y: next test target    B: run test motion    A: cancel motion
fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init(LevelFilter::Info)?;
    info!("Starting PID tuning session...");

    let lateral = GainSet::new(LATERAL_KP, LATERAL_KI, LATERAL_KD).shared();
    let angular = GainSet::new(ANGULAR_KP, ANGULAR_KI, ANGULAR_KD).shared();

    let shutdown = Shutdown::new();
    let handler_shutdown = shutdown.clone();
    ctrlc::set_handler(move || handler_shutdown.trigger())?;

    // Simulated drivetrain driven by the gains being tuned
    let chassis = Arc::new(SimChassis::new(Arc::clone(&lateral), Arc::clone(&angular)));
    let sim = chassis.spawn(shutdown.clone());

    let buttons = ButtonPanel::new()?;
    let lcd = CharacterLcd::new()?;

    let tuner = PidTuner::new(
        Arc::clone(&chassis),
        lateral,
        angular,
        CyclicSequence::new(DEFAULT_HEADINGS)?,
        CyclicSequence::new(DEFAULT_LENGTHS)?,
    );
    let handle = tuner.start(buttons, lcd, &shutdown);
    info!("Press Ctrl+C to exit.");

    let result = handle.join();
    chassis.cancel_all();
    if sim.join().is_err() {
        error!("Simulated chassis thread panicked");
    }

    match lock_session(tuner.session()).and_then(|session| session.snapshot()) {
        Ok(snapshot) => info!("Final {}", snapshot),
        Err(e) => error!("Could not read the final gains: {}", e),
    }

    result?;
    info!("Tuning session ended");
    Ok(())
}
