use crate::shared::{CarState, Phase, Rejection};

/// Admission rule for floor requests. Both `select_floor` and `is_selectable` go through here.
pub fn check(state: &CarState, floor: u8, floor_count: u8) -> Result<(), Rejection> {
    if floor >= floor_count {
        return Err(Rejection::FloorOutOfRange);
    }
    if floor == state.current_floor {
        return Err(Rejection::AlreadyAtFloor);
    }

    match state.phase {
        Phase::MovingUp | Phase::MovingDown => Err(Rejection::InTransit),
        Phase::DoorsClosing => Err(Rejection::DoorsClosing),
        Phase::Idle | Phase::DoorsOpening | Phase::DoorsOpen => Ok(()),
    }
}
