use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{error, info};

use crate::cycle::CyclicSequence;
use crate::display::DisplaySink;
use crate::display_loop::DisplayLoop;
use crate::error::{TuneError, TuneResult};
use crate::gains::SharedGains;
use crate::input::InputSource;
use crate::input_loop::InputLoop;
use crate::motion::Chassis;
use crate::session::{SharedSession, TuningSession};
use crate::shutdown::Shutdown;

/// One live tuning run: shared session plus the chassis it drives.
pub struct PidTuner<C: ?Sized> {
    session: SharedSession,
    chassis: Arc<C>,
}

/// Threads of a started tuning run.
pub struct TunerHandle {
    input: JoinHandle<TuneResult<()>>,
    display: JoinHandle<TuneResult<()>>,
}

impl<C: Chassis + ?Sized + 'static> PidTuner<C> {
    pub fn new(
        chassis: Arc<C>,
        lateral: SharedGains,
        angular: SharedGains,
        headings: CyclicSequence<f64>,
        lengths: CyclicSequence<f64>,
    ) -> Self {
        let session = TuningSession::new(lateral, angular, headings, lengths).into_shared();
        Self { session, chassis }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Spawns the input and display loops. Both run until `shutdown` is triggered.
    pub fn start<I, D>(&self, input: I, display: D, shutdown: &Shutdown) -> TunerHandle
    where
        I: InputSource + Send + 'static,
        D: DisplaySink + Send + 'static,
    {
        let input_loop =
            InputLoop::new(Arc::clone(&self.session), input, Arc::clone(&self.chassis));
        let display_loop =
            DisplayLoop::new(Arc::clone(&self.session), display, Arc::clone(&self.chassis));

        let input_shutdown = shutdown.clone();
        let input = thread::spawn(move || input_loop.run(&input_shutdown));

        let display_shutdown = shutdown.clone();
        let display = thread::spawn(move || display_loop.run(&display_shutdown));

        info!("Tuning session started");
        TunerHandle { input, display }
    }
}

impl TunerHandle {
    /// Waits for both loops to finish. Returns the first loop error, if any.
    pub fn join(self) -> TuneResult<()> {
        let input = join_loop("input", self.input);
        let display = join_loop("display", self.display);
        input.and(display)
    }
}

fn join_loop(name: &str, handle: JoinHandle<TuneResult<()>>) -> TuneResult<()> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => {
            error!("The {} loop panicked", name);
            Err(TuneError::Poisoned)
        }
    }
}
