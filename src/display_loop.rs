use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{info, trace, warn};

use crate::config::POLL_PERIOD_MS;
use crate::display::{DisplaySink, Frame, render};
use crate::error::{TuneError, TuneResult};
use crate::motion::Chassis;
use crate::session::{SharedSession, lock_session};
use crate::shutdown::Shutdown;

/// Redraws the session state on the display every period.
///
/// The session lock is held only while the snapshot is taken; the slow
/// display writes happen after it is released.
pub struct DisplayLoop<D, C: ?Sized> {
    session: SharedSession,
    display: D,
    chassis: Arc<C>,
    period: Duration,
}

impl<D: DisplaySink, C: Chassis + ?Sized> DisplayLoop<D, C> {
    pub fn new(session: SharedSession, display: D, chassis: Arc<C>) -> Self {
        Self {
            session,
            display,
            chassis,
            period: Duration::from_millis(POLL_PERIOD_MS),
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Renders and draws one frame.
    pub fn refresh(&mut self) -> TuneResult<Frame> {
        let snapshot = lock_session(&self.session)?.snapshot()?;
        let frame = render(&snapshot, self.chassis.current_pose());
        trace!("Frame for {}", snapshot);

        frame.draw(&mut self.display)?;
        Ok(frame)
    }

    /// Runs until shutdown. Display errors are logged and the next frame is
    /// tried; only a poisoned session ends the loop early.
    pub fn run(mut self, shutdown: &Shutdown) -> TuneResult<()> {
        info!("Display loop started");
        loop {
            match self.refresh() {
                Ok(_) => {}
                Err(TuneError::Poisoned) => {
                    warn!("Display loop stopped: {}", TuneError::Poisoned);
                    return Err(TuneError::Poisoned);
                }
                Err(e) => warn!("Display write failed: {}", e),
            }
            if shutdown.is_triggered() {
                break;
            }
            thread::sleep(self.period);
        }
        info!("Display loop stopped");
        Ok(())
    }
}
