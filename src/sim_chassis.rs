//! Simulated drivetrain for running the tuner without a robot.
//!
//! The chassis drives its pose toward the requested target with a PID loop
//! that reads the live shared gains every step, so gain edits made during a
//! test motion take effect immediately.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::{
    SIM_ANGULAR_TOLERANCE, SIM_LINEAR_TOLERANCE, SIM_MAX_ANGULAR_SPEED, SIM_MAX_LINEAR_SPEED,
    SIM_PERIOD_MS,
};
use crate::gains::{Axis, GainSet, SharedGains};
use crate::motion::{Chassis, Pose};
use crate::shutdown::Shutdown;

#[derive(Clone, Copy, Debug)]
struct Motion {
    axis: Axis,
    target: f64,
    deadline: Instant,
}

#[derive(Default)]
struct SimState {
    pose: Pose,
    motion: Option<Motion>,
    integral: f64,
    last_error: Option<f64>,
}

pub struct SimChassis {
    state: Mutex<SimState>,
    lateral: SharedGains,
    angular: SharedGains,
}

/// Wraps a heading error into (-180, 180] so turns take the short way round.
fn wrap_degrees(error: f64) -> f64 {
    let wrapped = error.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

impl SimChassis {
    pub fn new(lateral: SharedGains, angular: SharedGains) -> Self {
        Self {
            state: Mutex::new(SimState::default()),
            lateral,
            angular,
        }
    }

    fn state(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn gains(&self, axis: Axis) -> GainSet {
        let shared = match axis {
            Axis::Lateral => &self.lateral,
            Axis::Angular => &self.angular,
        };
        *shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start(&self, axis: Axis, target: f64, timeout: Duration) {
        let mut state = self.state();
        state.motion = Some(Motion {
            axis,
            target,
            deadline: Instant::now() + timeout,
        });
        state.integral = 0.0;
        state.last_error = None;
        info!("{} motion to {:.2} started", axis, target);
    }

    /// True while a motion is in flight.
    pub fn is_busy(&self) -> bool {
        self.state().motion.is_some()
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// The state lock is held for the whole step so a motion started or
    /// cancelled meanwhile is never overwritten. Lock order: state, then gains.
    pub fn step(&self, dt: f64) {
        let mut state = self.state();
        let Some(motion) = state.motion else {
            return;
        };
        let gains = self.gains(motion.axis);

        if Instant::now() >= motion.deadline {
            info!("{} motion timed out at {}", motion.axis, state.pose);
            state.motion = None;
            return;
        }

        let (error, tolerance, max_speed) = match motion.axis {
            Axis::Lateral => (
                motion.target - state.pose.y,
                SIM_LINEAR_TOLERANCE,
                SIM_MAX_LINEAR_SPEED,
            ),
            Axis::Angular => (
                wrap_degrees(motion.target - state.pose.theta),
                SIM_ANGULAR_TOLERANCE,
                SIM_MAX_ANGULAR_SPEED,
            ),
        };

        if error.abs() < tolerance {
            info!("{} motion settled at {}", motion.axis, state.pose);
            state.motion = None;
            return;
        }

        // PID calculations
        state.integral += error * dt;
        let derivative = state.last_error.map_or(0.0, |last| (error - last) / dt);
        state.last_error = Some(error);

        let output = (gains.kp * error + gains.ki * state.integral + gains.kd * derivative)
            .clamp(-max_speed, max_speed);

        match motion.axis {
            Axis::Lateral => state.pose.y += output * dt,
            Axis::Angular => state.pose.theta = (state.pose.theta + output * dt).rem_euclid(360.0),
        }
    }

    /// Runs the simulation on its own thread until shutdown.
    pub fn spawn(self: &Arc<Self>, shutdown: Shutdown) -> JoinHandle<()> {
        let chassis = Arc::clone(self);
        let period = Duration::from_millis(SIM_PERIOD_MS);

        thread::spawn(move || {
            debug!("Simulated chassis running");
            while !shutdown.is_triggered() {
                chassis.step(period.as_secs_f64());
                thread::sleep(period);
            }
            chassis.cancel_all();
        })
    }
}

impl Chassis for SimChassis {
    fn move_to_lateral_target(&self, distance: f64, timeout: Duration) {
        self.start(Axis::Lateral, distance, timeout);
    }

    fn rotate_to_heading(&self, heading: f64, timeout: Duration) {
        self.start(Axis::Angular, heading, timeout);
    }

    fn cancel_all(&self) {
        let mut state = self.state();
        if let Some(motion) = state.motion.take() {
            info!("{} motion cancelled at {}", motion.axis, state.pose);
        }
    }

    fn current_pose(&self) -> Pose {
        self.state().pose
    }
}
