//! Contract of the motion-execution subsystem.

use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use log::debug;

use crate::error::{TuneError, TuneResult};

/// Position (inches) and heading (degrees) of the robot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.1}°)", self.x, self.y, self.theta)
    }
}

/// A motion the tuning session asks the chassis to perform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionRequest {
    /// Drive straight until `pose.y` reaches the distance.
    Lateral { distance: f64, timeout: Duration },
    /// Turn in place to the heading.
    Heading { heading: f64, timeout: Duration },
    /// Stop anything in flight.
    Cancel,
}

/// Motion-execution subsystem driving the robot.
///
/// Motions run in the background, end on their own timeout, and may be
/// cancelled at any time. Calls should return promptly, but the input loop
/// goes through a [`MotionDispatcher`] so a slow call never delays polling.
pub trait Chassis: Send + Sync {
    fn move_to_lateral_target(&self, distance: f64, timeout: Duration);
    fn rotate_to_heading(&self, heading: f64, timeout: Duration);
    /// Cancels any in-flight motion. Safe to call when idle.
    fn cancel_all(&self);
    fn current_pose(&self) -> Pose;

    fn dispatch(&self, request: MotionRequest) {
        match request {
            MotionRequest::Lateral { distance, timeout } => {
                self.move_to_lateral_target(distance, timeout)
            }
            MotionRequest::Heading { heading, timeout } => self.rotate_to_heading(heading, timeout),
            MotionRequest::Cancel => self.cancel_all(),
        }
    }
}

/// Hands motion requests to a chassis on a worker thread, in arrival order.
///
/// The worker exits once the dispatcher is dropped and the queue is drained.
pub struct MotionDispatcher {
    sender: Sender<MotionRequest>,
}

impl MotionDispatcher {
    pub fn spawn<C: Chassis + ?Sized + 'static>(chassis: Arc<C>) -> Self {
        let (sender, receiver) = mpsc::channel::<MotionRequest>();
        thread::spawn(move || {
            for request in receiver {
                debug!("Dispatching {:?}", request);
                chassis.dispatch(request);
            }
            debug!("Motion dispatcher stopped");
        });
        Self { sender }
    }

    /// Queues a request without waiting for the chassis.
    pub fn send(&self, request: MotionRequest) -> TuneResult<()> {
        self.sender
            .send(request)
            .map_err(|_| TuneError::DispatcherStopped)
    }
}
