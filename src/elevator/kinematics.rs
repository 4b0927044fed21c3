use crate::config::ElevatorConfig;
use crate::shared::{CarState, Direction};

/// Distance in meters at which braking starts early, so the car settles on the landing.
/// A car that comes to rest short of the landing snaps onto it, by at most this distance.
pub const ARRIVAL_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Travelling,
    Arrived,
}

/**
 * Trapezoidal velocity profile integrated with a forward Euler step.
 *
 * Each step decides between braking and accelerating by comparing the distance left to the
 * landing with the distance needed to stop from the current speed (`v² = 2·a·s`). Because the
 * test is re-evaluated every tick the same rule covers long runs that reach `max_speed` and
 * short hops that peak below it.
 */
#[derive(Debug, Clone)]
pub struct Kinematics {
    max_speed: f64,
    acceleration: f64,
    deceleration: f64,
}

impl Kinematics {
    pub fn new(config: &ElevatorConfig) -> Kinematics {
        Kinematics {
            max_speed: config.max_speed,
            acceleration: config.acceleration,
            deceleration: config.deceleration,
        }
    }

    /// Distance needed to come to rest from `velocity`.
    pub fn braking_distance(&self, velocity: f64) -> f64 {
        velocity * velocity / (2.0 * self.deceleration)
    }

    /// Advances `state` by `dt` seconds towards `target_y`.
    ///
    /// On arrival the position is snapped to `target_y` and the velocity zeroed, so the
    /// caller never sees integration drift at a landing.
    pub fn step(&self, state: &mut CarState, target_y: f64, direction: Direction, dt: f64) -> Motion {
        let distance_remaining = (target_y - state.position).abs();
        let braking = distance_remaining <= self.braking_distance(state.velocity) + ARRIVAL_TOLERANCE;

        if braking {
            state.velocity = (state.velocity - self.deceleration * dt).max(0.0);
        } else {
            state.velocity = (state.velocity + self.acceleration * dt).min(self.max_speed);
        }

        state.position += direction.sign() * state.velocity * dt;

        let crossed = match direction {
            Direction::Up => state.position >= target_y,
            Direction::Down => state.position <= target_y,
        };

        // A car that has braked to a standstill is within the tolerance of the landing.
        if crossed || (braking && state.velocity == 0.0) {
            state.position = target_y;
            state.velocity = 0.0;
            return Motion::Arrived;
        }

        Motion::Travelling
    }
}
