//! Simulated-time driver.
//!
//! Steps a controller with a fixed `dt` as fast as possible instead of waiting on a clock.
//! An observer sees every post-tick state and may issue requests or stop the run early.

use crate::elevator::fsm::ElevatorController;
use crate::shared::{CarState, Phase};
use std::time::Duration;

/// What the observer wants after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Stop,
}

/// Why [`simulate`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Stopped { ticks: usize },
    TickLimitReached,
}

/// Advances `controller` by `dt` up to `max_ticks` times.
///
/// The observer runs between ticks, so requests it makes through the controller are applied
/// at a tick boundary.
pub fn simulate<F>(
    controller: &mut ElevatorController,
    dt: Duration,
    max_ticks: usize,
    mut observer: F,
) -> Status
where
    F: FnMut(&mut ElevatorController, &CarState) -> Action,
{
    for tick in 1..=max_ticks {
        controller.advance(dt);
        let state = controller.snapshot();
        if observer(&mut *controller, &state) == Action::Stop {
            return Status::Stopped { ticks: tick };
        }
    }
    Status::TickLimitReached
}

/// Runs until the car is idle with its doors shut and nothing left to do.
pub fn run_until_idle(controller: &mut ElevatorController, dt: Duration, max_ticks: usize) -> Status {
    simulate(controller, dt, max_ticks, |_, state| {
        if is_at_rest(state) {
            Action::Stop
        } else {
            Action::Continue
        }
    })
}

pub fn is_at_rest(state: &CarState) -> bool {
    state.phase == Phase::Idle
        && state.target_floor.is_none()
        && state.door_progress == 0.0
}
