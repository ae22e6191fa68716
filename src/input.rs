use std::fmt;

use crate::session::Event;

/// Operator buttons, named after a game controller layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    Up,
    Down,
    Left,
    Right,
    L1,
    L2,
    R1,
    R2,
}

impl Button {
    pub const ALL: [Button; 12] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::L1,
        Button::L2,
        Button::R1,
        Button::R2,
    ];
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Button each session event is bound to, in polling order.
pub const KEYMAP: [(Button, Event); 12] = [
    (Button::B, Event::RunTestMotion),
    (Button::Y, Event::CycleValue),
    (Button::A, Event::CancelMotion),
    (Button::X, Event::ToggleAxis),
    (Button::R1, Event::IncreaseP),
    (Button::R2, Event::DecreaseP),
    (Button::Left, Event::DecreaseI),
    (Button::Right, Event::IncreaseI),
    (Button::L1, Event::IncreaseD),
    (Button::L2, Event::DecreaseD),
    (Button::Down, Event::StepDown),
    (Button::Up, Event::StepUp),
];

/// Source of discrete button presses.
pub trait InputSource {
    /// True once per physical press: holding a button does not re-report it.
    fn was_just_pressed(&mut self, button: Button) -> bool;
}
