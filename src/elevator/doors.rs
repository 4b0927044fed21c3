use crate::config::ElevatorConfig;
use std::time::Duration;

/**
 * Linear door ramps.
 *
 * Door progress is a normalized scalar, 0.0 fully closed and 1.0 fully open. Converting it to
 * leaf offsets is up to whoever draws the doors.
 */
#[derive(Debug, Clone)]
pub struct DoorSequencer {
    animation_time: f64,
}

impl DoorSequencer {
    pub fn new(config: &ElevatorConfig) -> DoorSequencer {
        DoorSequencer {
            animation_time: config.door_animation_duration().as_secs_f64(),
        }
    }

    /// Moves the doors towards closed. Returns `true` once they are fully closed.
    pub fn close(&self, progress: &mut f64, dt: f64) -> bool {
        *progress = (*progress - self.stroke(dt)).max(0.0);
        *progress <= 0.0
    }

    /// Moves the doors towards open. Returns `true` once they are fully open.
    pub fn open(&self, progress: &mut f64, dt: f64) -> bool {
        *progress = (*progress + self.stroke(dt)).min(1.0);
        *progress >= 1.0
    }

    fn stroke(&self, dt: f64) -> f64 {
        if self.animation_time > 0.0 {
            dt / self.animation_time
        } else {
            1.0
        }
    }
}

/// Identifies one scheduling of the hold timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    handle: TimerHandle,
    deadline: Duration,
}

/**
 * One-shot door hold timer running on simulation time.
 *
 * At most one timer is pending: scheduling replaces whatever was there. Firing only hands back
 * the handle, it is up to the owner to check the live phase before acting on it.
 */
#[derive(Debug, Default)]
pub struct HoldTimer {
    pending: Option<PendingTimer>,
    next_id: u64,
}

impl HoldTimer {
    pub fn new() -> HoldTimer {
        HoldTimer::default()
    }

    pub fn schedule(&mut self, now: Duration, hold: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some(PendingTimer {
            handle,
            deadline: now + hold,
        });
        handle
    }

    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.pending.take().map(|timer| timer.handle)
    }

    /// Takes the pending timer if its deadline has passed.
    pub fn poll(&mut self, now: Duration) -> Option<TimerHandle> {
        match self.pending {
            Some(timer) if timer.deadline <= now => {
                self.pending = None;
                Some(timer.handle)
            }
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending.map(|timer| timer.handle)
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
