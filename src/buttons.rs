use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use log::info;

// Use rppal in production
#[cfg(not(test))]
use rppal::gpio::{Gpio, InputPin, Level};

#[cfg(test)]
// This is only used in testing, not compiled in release.
use crate::mocks::mock_gpio::{Gpio, InputPin, Level};

use crate::config::{
    GPIO_BUTTON_A, GPIO_BUTTON_B, GPIO_BUTTON_DOWN, GPIO_BUTTON_L1, GPIO_BUTTON_L2,
    GPIO_BUTTON_LEFT, GPIO_BUTTON_R1, GPIO_BUTTON_R2, GPIO_BUTTON_RIGHT, GPIO_BUTTON_UP,
    GPIO_BUTTON_X, GPIO_BUTTON_Y,
};
use crate::error::TuneResult;
use crate::input::{Button, InputSource};

/// Default BCM pin of every button.
pub const DEFAULT_PINS: [(Button, u8); 12] = [
    (Button::A, GPIO_BUTTON_A),
    (Button::B, GPIO_BUTTON_B),
    (Button::X, GPIO_BUTTON_X),
    (Button::Y, GPIO_BUTTON_Y),
    (Button::Up, GPIO_BUTTON_UP),
    (Button::Down, GPIO_BUTTON_DOWN),
    (Button::Left, GPIO_BUTTON_LEFT),
    (Button::Right, GPIO_BUTTON_RIGHT),
    (Button::L1, GPIO_BUTTON_L1),
    (Button::L2, GPIO_BUTTON_L2),
    (Button::R1, GPIO_BUTTON_R1),
    (Button::R2, GPIO_BUTTON_R2),
];

struct ButtonPin {
    pin: InputPin,
    was_down: bool,
}

/// Push buttons wired between GPIO pins and ground.
///
/// Pins use the internal pull-up, so a pressed button reads low. A press is
/// reported on the released -> pressed transition only.
pub struct ButtonPanel {
    buttons: HashMap<Button, ButtonPin>,
}

impl ButtonPanel {
    pub fn new() -> TuneResult<Self> {
        Self::with_pins(&DEFAULT_PINS)
    }

    pub fn with_pins(pins: &[(Button, u8)]) -> TuneResult<Self> {
        let gpio = Gpio::new()?;

        let mut buttons = HashMap::new();
        for &(button, pin_number) in pins {
            let pin = gpio.get(pin_number)?.into_input_pullup();
            info!("Button {} on GPIO {}", button, pin_number);
            buttons.insert(
                button,
                ButtonPin {
                    pin,
                    was_down: false,
                },
            );
        }

        // let the pull-ups settle before the first read
        thread::sleep(Duration::from_millis(100));

        // a button held during startup must be released before it counts
        for state in buttons.values_mut() {
            state.was_down = state.pin.read() == Level::Low;
        }

        Ok(Self { buttons })
    }

    /// Current level of a button, without edge detection.
    pub fn is_down(&self, button: Button) -> bool {
        self.buttons
            .get(&button)
            .is_some_and(|state| state.pin.read() == Level::Low)
    }
}

impl InputSource for ButtonPanel {
    fn was_just_pressed(&mut self, button: Button) -> bool {
        let Some(state) = self.buttons.get_mut(&button) else {
            return false;
        };

        let down = state.pin.read() == Level::Low;
        let pressed = down && !state.was_down;
        state.was_down = down;
        pressed
    }
}
