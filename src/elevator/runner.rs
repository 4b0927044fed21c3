use crate::elevator::fsm::ElevatorController;
use crate::shared::{Accepted, CarState, Rejection};
use crossbeam_channel as cbc;
use log::{debug, info};
use std::thread::{Builder, JoinHandle};
use std::time::Duration;

/// Requests handled by the runner thread between ticks.
pub enum Command {
    SelectFloor(u8, cbc::Sender<Result<Accepted, Rejection>>),
    IsSelectable(u8, cbc::Sender<bool>),
    Snapshot(cbc::Sender<CarState>),
}

/**
 * Runs an `ElevatorController` in real time on its own thread.
 *
 * A `crossbeam_channel::tick` drives the controller with a fixed step. Commands are applied
 * between ticks, so a request never observes a half-finished tick.
 *
 * # Fields
 * - `controller`:      The controller being driven. Owned by the runner thread.
 * - `tick`:            Fixed step handed to `advance` on every tick.
 * - `command_rx`:      Receives floor requests and queries.
 * - `terminate_rx`:    Stops the loop when a message arrives or the sender is dropped.
 */
pub struct SimulationRunner {
    controller: ElevatorController,
    tick: Duration,
    command_rx: cbc::Receiver<Command>,
    terminate_rx: cbc::Receiver<()>,
}

impl SimulationRunner {
    pub fn new(
        controller: ElevatorController,
        tick: Duration,
        command_rx: cbc::Receiver<Command>,
        terminate_rx: cbc::Receiver<()>,
    ) -> SimulationRunner {
        SimulationRunner {
            controller,
            tick,
            command_rx,
            terminate_rx,
        }
    }

    /// Runs until terminated and returns the car's final state.
    pub fn run(mut self) -> CarState {
        let ticker = cbc::tick(self.tick);
        let mut command_rx = std::mem::replace(&mut self.command_rx, cbc::never());
        let mut commands_closed = false;
        info!("Simulation running with a {} ms tick", self.tick.as_millis());

        loop {
            cbc::select! {
                recv(ticker) -> _ => {
                    self.controller.advance(self.tick);
                }
                recv(command_rx) -> command => {
                    match command {
                        Ok(command) => self.handle_command(command),
                        Err(_) => commands_closed = true,
                    }
                }
                recv(self.terminate_rx) -> _ => {
                    break;
                }
            }

            if commands_closed {
                debug!("All command senders dropped, running without commands");
                command_rx = cbc::never();
                commands_closed = false;
            }
        }

        info!("Simulation stopped after {:.3} s", self.controller.elapsed().as_secs_f64());
        self.controller.shutdown()
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::SelectFloor(floor, reply_tx) => {
                let _ = reply_tx.send(self.controller.select_floor(floor));
            }
            Command::IsSelectable(floor, reply_tx) => {
                let _ = reply_tx.send(self.controller.is_selectable(floor));
            }
            Command::Snapshot(reply_tx) => {
                let _ = reply_tx.send(self.controller.snapshot());
            }
        }
    }
}

/// Client side of a runner thread started with [`spawn`].
pub struct SimulationHandle {
    command_tx: cbc::Sender<Command>,
    terminate_tx: cbc::Sender<()>,
    thread: JoinHandle<CarState>,
}

/// Starts `controller` on a new thread ticking every `tick`.
///
/// Subscribe to the controller before handing it over if snapshots are needed.
pub fn spawn(controller: ElevatorController, tick: Duration) -> std::io::Result<SimulationHandle> {
    let (command_tx, command_rx) = cbc::unbounded::<Command>();
    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();
    let runner = SimulationRunner::new(controller, tick, command_rx, terminate_rx);

    let thread = Builder::new()
        .name("elevator_sim".into())
        .spawn(move || runner.run())?;

    Ok(SimulationHandle {
        command_tx,
        terminate_tx,
        thread,
    })
}

impl SimulationHandle {
    /// Forwards a floor request. `None` if the runner has already stopped.
    pub fn select_floor(&self, floor: u8) -> Option<Result<Accepted, Rejection>> {
        let (reply_tx, reply_rx) = cbc::bounded(1);
        self.command_tx
            .send(Command::SelectFloor(floor, reply_tx))
            .ok()?;
        reply_rx.recv().ok()
    }

    pub fn is_selectable(&self, floor: u8) -> bool {
        let (reply_tx, reply_rx) = cbc::bounded(1);
        if self
            .command_tx
            .send(Command::IsSelectable(floor, reply_tx))
            .is_err()
        {
            return false;
        }
        reply_rx.recv().unwrap_or(false)
    }

    /// Current state of the car, as opposed to the possibly older snapshots queued on a
    /// subscription. `None` if the runner has already stopped.
    pub fn snapshot(&self) -> Option<CarState> {
        let (reply_tx, reply_rx) = cbc::bounded(1);
        self.command_tx.send(Command::Snapshot(reply_tx)).ok()?;
        reply_rx.recv().ok()
    }

    /// Stops the runner and waits for it, returning the last state of the car.
    pub fn stop(self) -> Option<CarState> {
        let _ = self.terminate_tx.send(());
        self.thread.join().ok()
    }
}
