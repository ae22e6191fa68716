use std::thread;
use std::time::Duration;

use log::{LevelFilter, info};

use tune_rs::buttons::{ButtonPanel, DEFAULT_PINS};
use tune_rs::input::{Button, InputSource, KEYMAP};
use tune_rs::{Shutdown, logger};

/// Event a button triggers in the tuning session, for the printout.
fn bound_event(button: Button) -> String {
    KEYMAP
        .iter()
        .find(|(b, _)| *b == button)
        .map_or_else(|| "unbound".to_string(), |(_, event)| format!("{:?}", event))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init(LevelFilter::Info)?;

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║     Button Wiring Check                              ║");
    println!("╚══════════════════════════════════════════════════════╝\n");

    println!("Wiring (BCM pin -> button -> session event):");
    for (button, pin) in DEFAULT_PINS {
        println!(
            "  GPIO {:>2} -> {:<5} -> {}",
            pin,
            button.to_string(),
            bound_event(button)
        );
    }
    println!("\nPress each button once. Press Ctrl+C when done.\n");

    let shutdown = Shutdown::new();
    let handler_shutdown = shutdown.clone();
    ctrlc::set_handler(move || handler_shutdown.trigger())?;

    let mut panel = ButtonPanel::new()?;
    let held: Vec<String> = Button::ALL
        .iter()
        .filter(|b| panel.is_down(**b))
        .map(|b| b.to_string())
        .collect();
    if !held.is_empty() {
        println!("⚠ Down at startup, check for a short: {}\n", held.join(", "));
    }
    let mut seen = Vec::new();

    while !shutdown.is_triggered() {
        for button in Button::ALL {
            if panel.was_just_pressed(button) {
                info!("{} pressed ({})", button, bound_event(button));
                if !seen.contains(&button) {
                    seen.push(button);
                }
            }
        }
        thread::sleep(Duration::from_millis(10));
    }

    let missing: Vec<String> = Button::ALL
        .iter()
        .filter(|b| !seen.contains(*b))
        .map(|b| b.to_string())
        .collect();
    if missing.is_empty() {
        println!("\n✓ All {} buttons registered", Button::ALL.len());
    } else {
        println!("\n⚠ Never pressed: {}", missing.join(", "));
    }
    Ok(())
}
