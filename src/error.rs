//! Error handling for the tuning harness using thiserror 2.0

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuneError {
    #[error("a value cycle needs at least one value")]
    EmptyCycle,

    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    #[error("I2C error: {0}")]
    I2c(#[from] rppal::i2c::Error),

    #[error("text at row {row}, column {col} is outside the display")]
    DisplayBounds { row: u8, col: u8 },

    #[error("shared tuning state was poisoned by a panicking loop")]
    Poisoned,

    #[error("motion dispatcher thread has stopped")]
    DispatcherStopped,
}

pub type TuneResult<T> = Result<T, TuneError>;
