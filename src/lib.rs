pub mod buttons;
pub mod config;
pub mod cycle;
pub mod display;
pub mod display_loop;
pub mod error;
pub mod gains;
pub mod input;
pub mod input_loop;
pub mod lcd;
pub mod logger;
pub mod motion;
pub mod session;
pub mod shutdown;
pub mod sim_chassis;
pub mod tuner;

// Re-export commonly used types
pub use cycle::CyclicSequence;
pub use error::{TuneError, TuneResult};
pub use gains::{Axis, GainSet, SharedGains};
pub use motion::{Chassis, Pose};
pub use session::{Event, TuningSession};
pub use shutdown::Shutdown;
pub use tuner::PidTuner;

#[cfg(test)]
pub(crate) mod mocks;
