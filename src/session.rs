use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, info};

use crate::config::{INITIAL_STEP, MOTION_TIMEOUT_MS};
use crate::cycle::CyclicSequence;
use crate::error::{TuneError, TuneResult};
use crate::gains::{Axis, Gain, GainSet, SharedGains};
use crate::motion::MotionRequest;

/// Operator actions the session reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    ToggleAxis,
    CycleValue,
    IncreaseP,
    DecreaseP,
    IncreaseI,
    DecreaseI,
    IncreaseD,
    DecreaseD,
    StepDown,
    StepUp,
    RunTestMotion,
    CancelMotion,
}

/// Mutable state of one tuning run.
///
/// Shared between the input loop (the only writer) and the display loop
/// through a single lock, see [`SharedSession`].
pub struct TuningSession {
    active: Axis,
    headings: CyclicSequence<f64>,
    lengths: CyclicSequence<f64>,
    step: f64,
    lateral: SharedGains,
    angular: SharedGains,
}

pub type SharedSession = Arc<Mutex<TuningSession>>;

/// Consistent copy of everything the display shows from the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub active: Axis,
    pub gains: GainSet,
    /// Length target when lateral is active, heading target otherwise.
    pub target: f64,
    pub step: f64,
}

impl TuningSession {
    /// Starts with the lateral controller active and the initial step.
    pub fn new(
        lateral: SharedGains,
        angular: SharedGains,
        headings: CyclicSequence<f64>,
        lengths: CyclicSequence<f64>,
    ) -> Self {
        Self {
            active: Axis::Lateral,
            headings,
            lengths,
            step: INITIAL_STEP,
            lateral,
            angular,
        }
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn active(&self) -> Axis {
        self.active
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn current_heading(&self) -> f64 {
        *self.headings.current()
    }

    pub fn current_length(&self) -> f64 {
        *self.lengths.current()
    }

    fn active_gains(&self) -> &SharedGains {
        match self.active {
            Axis::Lateral => &self.lateral,
            Axis::Angular => &self.angular,
        }
    }

    /// Applies one operator event.
    ///
    /// Returns the motion the chassis should perform, if any. The caller
    /// dispatches it after releasing the session lock.
    pub fn apply(&mut self, event: Event) -> TuneResult<Option<MotionRequest>> {
        match event {
            Event::ToggleAxis => {
                self.active = self.active.toggled();
                info!("Editing {} gains", self.active);
            }
            Event::CycleValue => match self.active {
                Axis::Lateral => {
                    let length = self.lengths.advance();
                    info!("Length target: {:.2}", length);
                }
                Axis::Angular => {
                    let heading = self.headings.advance();
                    info!("Heading target: {:.2}", heading);
                }
            },
            Event::IncreaseP => self.adjust(Gain::P, self.step)?,
            Event::DecreaseP => self.adjust(Gain::P, -self.step)?,
            Event::IncreaseI => self.adjust(Gain::I, self.step)?,
            Event::DecreaseI => self.adjust(Gain::I, -self.step)?,
            Event::IncreaseD => self.adjust(Gain::D, self.step)?,
            Event::DecreaseD => self.adjust(Gain::D, -self.step)?,
            Event::StepDown => {
                self.step /= 10.0;
                info!("Step: {}", self.step);
            }
            Event::StepUp => {
                self.step *= 10.0;
                info!("Step: {}", self.step);
            }
            Event::RunTestMotion => {
                let timeout = Duration::from_millis(MOTION_TIMEOUT_MS);
                let request = match self.active {
                    Axis::Lateral => MotionRequest::Lateral {
                        distance: self.current_length(),
                        timeout,
                    },
                    Axis::Angular => MotionRequest::Heading {
                        heading: self.current_heading(),
                        timeout,
                    },
                };
                return Ok(Some(request));
            }
            Event::CancelMotion => return Ok(Some(MotionRequest::Cancel)),
        }
        Ok(None)
    }

    fn adjust(&mut self, gain: Gain, delta: f64) -> TuneResult<()> {
        let mut gains = lock_gains(self.active_gains())?;
        let value = gains.adjust(gain, delta);
        info!("{} {}: {:.4}", self.active, gain, value);
        Ok(())
    }

    pub fn snapshot(&self) -> TuneResult<SessionSnapshot> {
        let gains = *lock_gains(self.active_gains())?;
        let target = match self.active {
            Axis::Lateral => self.current_length(),
            Axis::Angular => self.current_heading(),
        };
        debug!("Snapshot of {} session taken", self.active);

        Ok(SessionSnapshot {
            active: self.active,
            gains,
            target,
            step: self.step,
        })
    }
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kP {:.3} kI {:.3} kD {:.3} target {:.1} step {}",
            self.active, self.gains.kp, self.gains.ki, self.gains.kd, self.target, self.step
        )
    }
}

fn lock_gains(gains: &SharedGains) -> TuneResult<MutexGuard<'_, GainSet>> {
    gains.lock().map_err(|_| TuneError::Poisoned)
}

/// Locks the shared session, mapping poisoning to [`TuneError::Poisoned`].
pub fn lock_session(session: &SharedSession) -> TuneResult<MutexGuard<'_, TuningSession>> {
    session.lock().map_err(|_| TuneError::Poisoned)
}
