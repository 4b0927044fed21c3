/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Idle,
    DoorsClosing,
    MovingUp,
    MovingDown,
    DoorsOpening,
    DoorsOpen,
}

impl Phase {
    pub fn is_moving(&self) -> bool {
        matches!(self, Phase::MovingUp | Phase::MovingDown)
    }

    /// Direction of travel, `None` unless the car is moving.
    pub fn direction(&self) -> Option<Direction> {
        match *self {
            Phase::MovingUp => Some(Direction::Up),
            Phase::MovingDown => Some(Direction::Down),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Phase::Idle => "idle",
            Phase::DoorsClosing => "doors closing",
            Phase::MovingUp => "moving up",
            Phase::MovingDown => "moving down",
            Phase::DoorsOpening => "doors opening",
            Phase::DoorsOpen => "doors open",
        };
        f.write_str(name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Sign applied to the speed when integrating position.
    pub fn sign(&self) -> f64 {
        match *self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }

    pub fn towards(from: u8, to: u8) -> Direction {
        if to > from {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/**
 * Everything the outside world may know about the car.
 *
 * # Fields
 * - `current_floor`:   Last floor the car fully stopped at.
 * - `target_floor`:    Pending destination, if any.
 * - `position`:        Height of the car above floor 0 in meters.
 * - `velocity`:        Speed in m/s, never negative. Direction comes from `phase`.
 * - `door_progress`:   0.0 is fully closed, 1.0 is fully open.
 * - `phase`:           Current state machine phase.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CarState {
    #[serde(rename = "currentFloor")]
    pub current_floor: u8,
    #[serde(rename = "targetFloor")]
    pub target_floor: Option<u8>,
    pub position: f64,
    pub velocity: f64,
    #[serde(rename = "doorProgress")]
    pub door_progress: f64,
    pub phase: Phase,
}

impl CarState {
    pub fn new() -> CarState {
        CarState {
            current_floor: 0,
            target_floor: None,
            position: 0.0,
            velocity: 0.0,
            door_progress: 0.0,
            phase: Phase::Idle,
        }
    }
}

impl Default for CarState {
    fn default() -> Self {
        CarState::new()
    }
}

impl fmt::Display for CarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match self.target_floor {
            Some(floor) => floor.to_string(),
            None => "-".to_string(),
        };
        write!(
            f,
            "[{:<13}] floor {} -> {:<2} pos {:>6.2} m  vel {:>4.2} m/s  doors {:>3.0}%",
            self.phase.to_string(),
            self.current_floor,
            target,
            self.position,
            self.velocity,
            self.door_progress * 100.0
        )
    }
}
