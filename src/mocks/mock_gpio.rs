// This file is only compiled during tests

use std::cell::RefCell;
use std::collections::HashMap;

use rppal::gpio::Error;
pub use rppal::gpio::Level;

/// BCM pins broken out on the 40-pin header.
const HEADER_PINS: u8 = 28;

/// Electrical state of one simulated line: a button to ground plus the pull-up.
#[derive(Default)]
struct Line {
    claimed: bool,
    pulled_up: bool,
    grounded: bool,
}

impl Line {
    fn level(&self) -> Level {
        // an unconfigured line floats, read it as low so a missing pull-up shows up
        if self.pulled_up && !self.grounded {
            Level::High
        } else {
            Level::Low
        }
    }
}

thread_local! {
    static BOARD: RefCell<HashMap<u8, Line>> = RefCell::new(HashMap::new());
}

fn with_line<R>(pin: u8, f: impl FnOnce(&mut Line) -> R) -> R {
    BOARD.with(|board| f(board.borrow_mut().entry(pin).or_default()))
}

pub struct Gpio;

impl Gpio {
    pub fn new() -> rppal::gpio::Result<Self> {
        Ok(Gpio)
    }

    /// Claims a pin. Like rppal, a pin can only be held once at a time.
    pub fn get(&self, pin: u8) -> rppal::gpio::Result<Pin> {
        if pin >= HEADER_PINS {
            return Err(Error::PinNotAvailable(pin));
        }
        with_line(pin, |line| {
            if line.claimed {
                Err(Error::PinUsed(pin))
            } else {
                line.claimed = true;
                Ok(Pin { pin })
            }
        })
    }
}

pub struct Pin {
    pin: u8,
}

impl Pin {
    pub fn into_input_pullup(self) -> InputPin {
        with_line(self.pin, |line| line.pulled_up = true);
        InputPin { pin: self.pin }
    }
}

pub struct InputPin {
    pin: u8,
}

impl InputPin {
    pub fn read(&self) -> Level {
        with_line(self.pin, |line| line.level())
    }
}

impl Drop for InputPin {
    fn drop(&mut self) {
        with_line(self.pin, |line| {
            line.claimed = false;
            line.pulled_up = false;
        });
    }
}

/// Closes the button on `pin`, shorting the line to ground.
pub fn press(pin: u8) {
    with_line(pin, |line| line.grounded = true);
}

/// Opens the button on `pin`.
pub fn release(pin: u8) {
    with_line(pin, |line| line.grounded = false);
}

/// True if the pin was configured with its pull-up.
pub fn is_pulled_up(pin: u8) -> bool {
    with_line(pin, |line| line.pulled_up)
}

/// Releases every button and forgets all pin configuration.
pub fn reset_board() {
    BOARD.with(|board| board.borrow_mut().clear());
}
