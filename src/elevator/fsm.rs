use crate::config::ElevatorConfig;
use crate::elevator::doors::{DoorSequencer, HoldTimer, TimerHandle};
use crate::elevator::gate;
use crate::elevator::kinematics::{Kinematics, Motion};
use crate::shared::{Accepted, CarState, ConfigError, Direction, Phase, Rejection};
use crossbeam_channel as cbc;
use log::{debug, info};
use std::time::Duration;

/// Snapshots a subscriber may fall behind by before new ones are dropped for it.
const SUBSCRIBER_BUFFER: usize = 256;

/**
 * Drives a single elevator car.
 *
 * The `ElevatorController` is a fixed-timestep state machine. Every call to `advance` runs one
 * tick: the current phase either integrates the car's motion, ramps the doors, or waits on the
 * door hold timer. Floor requests are admitted between ticks through `select_floor`.
 *
 * # Fields
 * - `config`:          Physical parameters, fixed at construction.
 * - `state`:           The car. Only `advance` and `select_floor` mutate it.
 * - `kinematics`:      Velocity profile used while moving.
 * - `doors`:           Door ramps used while opening and closing.
 * - `hold_timer`:      Auto-close timer, pending only while the doors are open.
 * - `door_hold`:       Handle of the hold scheduled on the latest arrival. Any other handle
 *                      the timer hands back is stale and ignored.
 * - `clock`:           Simulation time accumulated from `advance`.
 * - `subscribers`:     Channels receiving a snapshot after every tick.
 */
pub struct ElevatorController {
    config: ElevatorConfig,
    state: CarState,
    kinematics: Kinematics,
    doors: DoorSequencer,
    hold_timer: HoldTimer,
    door_hold: Option<TimerHandle>,
    clock: Duration,
    subscribers: Vec<cbc::Sender<CarState>>,
}

impl ElevatorController {
    pub fn new(config: ElevatorConfig) -> Result<ElevatorController, ConfigError> {
        config.validate()?;

        Ok(ElevatorController {
            kinematics: Kinematics::new(&config),
            doors: DoorSequencer::new(&config),
            hold_timer: HoldTimer::new(),
            door_hold: None,
            state: CarState::new(),
            clock: Duration::ZERO,
            subscribers: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &ElevatorConfig {
        &self.config
    }

    pub fn snapshot(&self) -> CarState {
        self.state.clone()
    }

    /// Simulation time elapsed since construction.
    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    pub fn door_timer_pending(&self) -> bool {
        self.hold_timer.pending().is_some()
    }

    /// The hold currently keeping the doors open, if any.
    pub fn door_timer(&self) -> Option<TimerHandle> {
        self.door_hold.filter(|&handle| self.hold_timer.pending() == Some(handle))
    }

    pub fn is_selectable(&self, floor: u8) -> bool {
        gate::check(&self.state, floor, self.config.floor_count).is_ok()
    }

    /// Requests the car to go to `floor`.
    ///
    /// Requests made while the doors are opening or open are served once the hold timer
    /// expires.
    pub fn select_floor(&mut self, floor: u8) -> Result<Accepted, Rejection> {
        match gate::check(&self.state, floor, self.config.floor_count) {
            Ok(()) => {
                info!("Floor {} requested at floor {}", floor, self.state.current_floor);
                self.state.target_floor = Some(floor);
                Ok(Accepted { floor })
            }
            Err(reason) => {
                debug!("Request for floor {} rejected: {}", floor, reason);
                Err(reason)
            }
        }
    }

    /// Registers a new observer. Each tick sends it one snapshot; a full or dropped
    /// receiver never holds the tick up.
    pub fn subscribe(&mut self) -> cbc::Receiver<CarState> {
        let (tx, rx) = cbc::bounded(SUBSCRIBER_BUFFER);
        self.subscribers.push(tx);
        rx
    }

    /// Stops the controller: cancels the door timer, disconnects every subscriber and hands
    /// back the car's last state. The controller is consumed, so nothing can be requested of
    /// a car whose timer is gone.
    pub fn shutdown(mut self) -> CarState {
        self.hold_timer.cancel();
        self.subscribers.clear();
        self.state
    }

    /// Runs one tick of length `dt`. A zero-length advance is not a tick and changes nothing.
    pub fn advance(&mut self, dt: Duration) {
        if dt.is_zero() {
            return;
        }
        self.clock += dt;
        let dt = dt.as_secs_f64();

        match self.state.phase {
            Phase::Idle => {
                // Doors left open when the hold expired shut here.
                self.doors.close(&mut self.state.door_progress, dt);
                if self.pending_target().is_some() {
                    self.transition(Phase::DoorsClosing);
                }
            }
            Phase::DoorsClosing => {
                if self.doors.close(&mut self.state.door_progress, dt) {
                    match self.pending_target() {
                        Some(target) => {
                            match Direction::towards(self.state.current_floor, target) {
                                Direction::Up => self.transition(Phase::MovingUp),
                                Direction::Down => self.transition(Phase::MovingDown),
                            }
                        }
                        None => self.transition(Phase::Idle),
                    }
                }
            }
            Phase::MovingUp | Phase::MovingDown => self.travel(dt),
            Phase::DoorsOpening => {
                if self.doors.open(&mut self.state.door_progress, dt) {
                    self.transition(Phase::DoorsOpen);
                    let handle = self
                        .hold_timer
                        .schedule(self.clock, self.config.door_open_duration());
                    self.door_hold = Some(handle);
                }
            }
            Phase::DoorsOpen => {}
        }

        if let Some(fired) = self.hold_timer.poll(self.clock) {
            self.on_hold_expired(fired);
        }

        self.clamp();
        self.publish();
    }

    fn travel(&mut self, dt: f64) {
        let (target, direction) = match (self.state.target_floor, self.state.phase.direction()) {
            (Some(target), Some(direction)) => (target, direction),
            _ => {
                self.state.velocity = 0.0;
                self.transition(Phase::Idle);
                return;
            }
        };

        let target_y = self.config.floor_position(target);
        if self.kinematics.step(&mut self.state, target_y, direction, dt) == Motion::Arrived {
            self.state.current_floor = target;
            self.state.target_floor = None;
            self.state.velocity = 0.0;
            self.state.position = target_y;
            info!("Arrived at floor {}", target);
            self.transition(Phase::DoorsOpening);
        }
    }

    fn on_hold_expired(&mut self, fired: TimerHandle) {
        if self.door_hold != Some(fired) {
            debug!("Ignoring stale door timer {:?}", fired);
            return;
        }
        self.door_hold = None;
        // The phase may have moved on since the timer was scheduled.
        if self.state.phase != Phase::DoorsOpen {
            return;
        }
        match self.pending_target() {
            Some(_) => self.transition(Phase::DoorsClosing),
            None => self.transition(Phase::Idle),
        }
    }

    fn transition(&mut self, next: Phase) {
        if self.state.phase == Phase::DoorsOpen && next != Phase::DoorsOpen {
            self.hold_timer.cancel();
            self.door_hold = None;
        }
        debug!("{} -> {}", self.state.phase, next);
        self.state.phase = next;
    }

    fn pending_target(&self) -> Option<u8> {
        self.state
            .target_floor
            .filter(|&target| target != self.state.current_floor)
    }

    fn clamp(&mut self) {
        self.state.position = self.state.position.clamp(0.0, self.config.max_position());
        self.state.velocity = self.state.velocity.clamp(0.0, self.config.max_speed);
        self.state.door_progress = self.state.door_progress.clamp(0.0, 1.0);
    }

    fn publish(&mut self) {
        let state = &self.state;
        self.subscribers.retain(|tx| match tx.try_send(state.clone()) {
            Ok(()) | Err(cbc::TrySendError::Full(_)) => true,
            Err(cbc::TrySendError::Disconnected(_)) => false,
        });
    }
}
