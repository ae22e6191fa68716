use std::fmt;
use std::sync::{Arc, Mutex};

/// Proportional, integral and derivative gains of one feedback controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainSet {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

/// A gain set shared between the tuning session and the chassis that uses it.
///
/// The tuner only mutates the fields behind the lock; the controller itself is
/// never replaced.
pub type SharedGains = Arc<Mutex<GainSet>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gain {
    P,
    I,
    D,
}

/// Which of the two controllers is being edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Distance controller of straight drives.
    Lateral,
    /// Heading controller of turns.
    Angular,
}

impl GainSet {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    pub fn shared(self) -> SharedGains {
        Arc::new(Mutex::new(self))
    }

    pub fn get(&self, gain: Gain) -> f64 {
        match gain {
            Gain::P => self.kp,
            Gain::I => self.ki,
            Gain::D => self.kd,
        }
    }

    /// Adds `delta` to one gain and returns the new value.
    pub fn adjust(&mut self, gain: Gain, delta: f64) -> f64 {
        let field = match gain {
            Gain::P => &mut self.kp,
            Gain::I => &mut self.ki,
            Gain::D => &mut self.kd,
        };
        *field += delta;
        *field
    }
}

impl fmt::Display for Gain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gain::P => write!(f, "kP"),
            Gain::I => write!(f, "kI"),
            Gain::D => write!(f, "kD"),
        }
    }
}

impl Axis {
    pub fn toggled(self) -> Self {
        match self {
            Axis::Lateral => Axis::Angular,
            Axis::Angular => Axis::Lateral,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Lateral => write!(f, "Lateral"),
            Axis::Angular => write!(f, "Angular"),
        }
    }
}
