use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::config::POLL_PERIOD_MS;
use crate::error::TuneResult;
use crate::input::{InputSource, KEYMAP};
use crate::motion::{Chassis, MotionDispatcher};
use crate::session::{SharedSession, lock_session};
use crate::shutdown::Shutdown;

/// Polls the buttons and applies their events to the session.
///
/// This loop is the only writer of the session. Motions are queued to a
/// [`MotionDispatcher`] after the session lock is released, so a running or
/// slow chassis call never delays the next poll.
pub struct InputLoop<I> {
    session: SharedSession,
    input: I,
    dispatcher: MotionDispatcher,
    period: Duration,
}

impl<I: InputSource> InputLoop<I> {
    pub fn new<C: Chassis + ?Sized + 'static>(
        session: SharedSession,
        input: I,
        chassis: Arc<C>,
    ) -> Self {
        Self {
            session,
            input,
            dispatcher: MotionDispatcher::spawn(chassis),
            period: Duration::from_millis(POLL_PERIOD_MS),
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Polls every bound button once. Returns how many events fired.
    pub fn poll_once(&mut self) -> TuneResult<usize> {
        let mut fired = 0;
        for (button, event) in KEYMAP {
            if !self.input.was_just_pressed(button) {
                continue;
            }
            fired += 1;

            let request = lock_session(&self.session)?.apply(event)?;
            if let Some(request) = request {
                info!("{} -> {:?}", button, request);
                self.dispatcher.send(request)?;
            }
        }
        Ok(fired)
    }

    /// Runs until shutdown. Only a poisoned session or a dead dispatcher ends
    /// it early.
    pub fn run(mut self, shutdown: &Shutdown) -> TuneResult<()> {
        info!("Input loop started");
        loop {
            if let Err(e) = self.poll_once() {
                warn!("Input loop stopped: {}", e);
                return Err(e);
            }
            if shutdown.is_triggered() {
                break;
            }
            thread::sleep(self.period);
        }
        info!("Input loop stopped");
        Ok(())
    }
}
