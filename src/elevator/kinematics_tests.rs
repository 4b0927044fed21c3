/*
 * Unit tests for the kinematics engine
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_braking_distance
 * - test_accelerates_from_rest
 * - test_cruises_at_max_speed
 * - test_brakes_near_landing
 * - test_crossing_snaps_to_landing
 * - test_stopping_short_settles_on_landing
 * - test_landing_snap_within_tolerance
 * - test_moves_down
 * - test_short_hop_peaks_below_max_speed
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod kinematics_tests {
    use crate::config::ElevatorConfig;
    use crate::elevator::kinematics::{Kinematics, Motion, ARRIVAL_TOLERANCE};
    use crate::shared::{CarState, Direction};
    use approx::assert_relative_eq;

    const DT: f64 = 0.016;

    fn setup_kinematics() -> Kinematics {
        Kinematics::new(&ElevatorConfig::default())
    }

    fn car_at(position: f64, velocity: f64) -> CarState {
        CarState {
            position,
            velocity,
            ..CarState::new()
        }
    }

    #[test]
    fn test_braking_distance() {
        // Arrange
        let kinematics = setup_kinematics();

        // Act & Assert
        assert_relative_eq!(kinematics.braking_distance(2.0), 2.0);
        assert_relative_eq!(kinematics.braking_distance(1.0), 0.5);
        assert_eq!(kinematics.braking_distance(0.0), 0.0);
    }

    #[test]
    fn test_accelerates_from_rest() {
        // Arrange
        let kinematics = setup_kinematics();
        let mut state = car_at(0.0, 0.0);

        // Act
        let motion = kinematics.step(&mut state, 12.0, Direction::Up, DT);

        // Assert
        assert_eq!(motion, Motion::Travelling);
        assert_relative_eq!(state.velocity, 0.016, epsilon = 1e-12);
        assert_relative_eq!(state.position, 0.016 * 0.016, epsilon = 1e-12);
    }

    #[test]
    fn test_cruises_at_max_speed() {
        // Arrange
        let kinematics = setup_kinematics();
        let mut state = car_at(4.0, 2.0);

        // Act
        let motion = kinematics.step(&mut state, 20.0, Direction::Up, DT);

        // Assert
        assert_eq!(motion, Motion::Travelling);
        assert_eq!(state.velocity, 2.0);
        assert_relative_eq!(state.position, 4.032, epsilon = 1e-12);
    }

    #[test]
    fn test_brakes_near_landing() {
        // Purpose: inside braking distance plus tolerance the car slows down

        // Arrange
        let kinematics = setup_kinematics();
        let mut state = car_at(10.0, 2.0);

        // Act
        let motion = kinematics.step(&mut state, 12.05, Direction::Up, DT);

        // Assert
        assert_eq!(motion, Motion::Travelling);
        assert_relative_eq!(state.velocity, 1.984, epsilon = 1e-12);
        assert_relative_eq!(state.position, 10.0 + 1.984 * DT, epsilon = 1e-12);
    }

    #[test]
    fn test_crossing_snaps_to_landing() {
        // Arrange
        let kinematics = setup_kinematics();
        let mut state = car_at(11.99, 2.0);

        // Act
        let motion = kinematics.step(&mut state, 12.0, Direction::Up, DT);

        // Assert
        assert_eq!(motion, Motion::Arrived);
        assert_eq!(state.position, 12.0);
        assert_eq!(state.velocity, 0.0);
    }

    #[test]
    fn test_stopping_short_settles_on_landing() {
        // Purpose: a car that brakes to rest within the tolerance is treated as arrived

        // Arrange
        let kinematics = setup_kinematics();
        let mut state = car_at(7.95, 0.01);

        // Act
        let motion = kinematics.step(&mut state, 8.0, Direction::Up, DT);

        // Assert
        assert_eq!(motion, Motion::Arrived);
        assert_eq!(state.position, 8.0);
        assert_eq!(state.velocity, 0.0);
    }

    #[test]
    fn test_landing_snap_within_tolerance() {
        // Arrange
        let kinematics = setup_kinematics();
        let mut state = car_at(0.0, 0.0);
        let mut before_arrival = state.position;

        // Act
        for _ in 0..10_000 {
            before_arrival = state.position;
            if kinematics.step(&mut state, 12.0, Direction::Up, DT) == Motion::Arrived {
                break;
            }
        }

        // Assert
        assert_eq!(state.position, 12.0);
        assert!(12.0 - before_arrival <= ARRIVAL_TOLERANCE);
    }

    #[test]
    fn test_moves_down() {
        // Arrange
        let kinematics = setup_kinematics();
        let mut state = car_at(8.0, 0.0);

        // Act
        let motion = kinematics.step(&mut state, 0.0, Direction::Down, DT);

        // Assert
        assert_eq!(motion, Motion::Travelling);
        assert_relative_eq!(state.velocity, 0.016, epsilon = 1e-12);
        assert_relative_eq!(state.position, 8.0 - 0.016 * 0.016, epsilon = 1e-12);
    }

    #[test]
    fn test_short_hop_peaks_below_max_speed() {
        // Purpose: over 1 m the car never reaches its 2 m/s cruise speed yet stops on the landing

        // Arrange
        let kinematics = setup_kinematics();
        let mut state = car_at(0.0, 0.0);
        let mut peak: f64 = 0.0;
        let mut arrived = false;

        // Act
        for _ in 0..1000 {
            let motion = kinematics.step(&mut state, 1.0, Direction::Up, DT);
            peak = peak.max(state.velocity);
            assert!(state.position <= 1.0);
            if motion == Motion::Arrived {
                arrived = true;
                break;
            }
        }

        // Assert
        assert!(arrived);
        assert!(peak < 2.0);
        assert!(peak > 0.5);
        assert_eq!(state.position, 1.0);
        assert_eq!(state.velocity, 0.0);
    }
}
