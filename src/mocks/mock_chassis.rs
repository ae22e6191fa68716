// This file is only compiled during tests

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crate::motion::{Chassis, MotionRequest, Pose};

/// Chassis that records every call and reports a fixed pose.
///
/// With a delay, each motion call sleeps before it is recorded, like a
/// drivetrain driver that blocks.
#[derive(Default)]
pub struct RecordingChassis {
    pub requests: Mutex<Vec<MotionRequest>>,
    pub pose: Mutex<Pose>,
    delay: Duration,
}

impl RecordingChassis {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<MotionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Waits up to two seconds for `count` requests to arrive.
    pub fn wait_for_requests(&self, count: usize) -> Vec<MotionRequest> {
        for _ in 0..2000 {
            let requests = self.requests();
            if requests.len() >= count {
                return requests;
            }
            thread::sleep(Duration::from_millis(1));
        }
        self.requests()
    }

    pub fn set_pose(&self, pose: Pose) {
        *self.pose.lock().unwrap() = pose;
    }

    fn record(&self, request: MotionRequest) {
        thread::sleep(self.delay);
        self.requests.lock().unwrap().push(request);
    }
}

impl Chassis for RecordingChassis {
    fn move_to_lateral_target(&self, distance: f64, timeout: Duration) {
        self.record(MotionRequest::Lateral { distance, timeout });
    }

    fn rotate_to_heading(&self, heading: f64, timeout: Duration) {
        self.record(MotionRequest::Heading { heading, timeout });
    }

    fn cancel_all(&self) {
        self.requests.lock().unwrap().push(MotionRequest::Cancel);
    }

    fn current_pose(&self) -> Pose {
        *self.pose.lock().unwrap()
    }
}
