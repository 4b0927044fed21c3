/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::warn;
use std::collections::VecDeque;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{CarState, Phase};

/**
 * A queue of floor requests fed to the car one at a time, the way a passenger pressing
 * buttons in sequence would.
 *
 * A floor is handed out only when the car has no outstanding target and the request gate
 * would accept it. Floors that can never be served from where the car stands are dropped
 * with a warning.
 */
#[derive(Debug, Clone, Default)]
pub struct RequestScript {
    pending: VecDeque<u8>,
}

impl RequestScript {
    pub fn new(floors: impl IntoIterator<Item = u8>) -> RequestScript {
        RequestScript {
            pending: floors.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Pops the next floor if it can be requested right now.
    pub fn next_ready<F>(&mut self, state: &CarState, floor_count: u8, is_selectable: F) -> Option<u8>
    where
        F: Fn(u8) -> bool,
    {
        while let Some(&floor) = self.pending.front() {
            if floor >= floor_count {
                warn!("Skipping floor {}: building has {} floors", floor, floor_count);
                self.pending.pop_front();
                continue;
            }
            if state.target_floor.is_some() {
                return None;
            }
            let stopped = !state.phase.is_moving() && state.phase != Phase::DoorsClosing;
            if stopped && floor == state.current_floor {
                warn!("Skipping floor {}: car is already there", floor);
                self.pending.pop_front();
                continue;
            }
            if is_selectable(floor) {
                return self.pending.pop_front();
            }
            return None;
        }
        None
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
