/*
 * Unit tests for the real-time runner
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_runner_serves_request
 * - test_runner_forwards_rejections
 * - test_runner_stops_when_terminate_sender_dropped
 * - test_runner_keeps_ticking_without_commands
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod runner_tests {
    use crate::config::ElevatorConfig;
    use crate::elevator::runner::{self, Command, SimulationRunner};
    use crate::elevator::ElevatorController;
    use crate::shared::Phase::{DoorsOpening, Idle};
    use crate::shared::Rejection;
    use crossbeam_channel::unbounded;
    use std::thread::spawn;
    use std::time::Duration;

    const TICK: Duration = Duration::from_millis(5);

    fn setup_controller() -> ElevatorController {
        // A short, quick car so a trip takes well under a second of wall-clock time
        let config = ElevatorConfig {
            floor_count: 3,
            floor_height: 1.0,
            max_speed: 10.0,
            acceleration: 20.0,
            deceleration: 20.0,
            door_open_time: 50,
            door_animation_time: 50,
        };
        ElevatorController::new(config).unwrap()
    }

    #[test]
    fn test_runner_serves_request() {
        // Purpose: a request sent to the runner thread is carried out on its own clock

        // Arrange
        let mut controller = setup_controller();
        let snapshot_rx = controller.subscribe();
        let handle = runner::spawn(controller, TICK).unwrap();

        // Act
        let reply = handle.select_floor(1);

        // Assert
        assert!(matches!(reply, Some(Ok(_))));
        loop {
            match snapshot_rx.recv_timeout(Duration::from_secs(5)) {
                Ok(state) => {
                    if state.phase == DoorsOpening {
                        assert_eq!(state.current_floor, 1);
                        assert_eq!(state.position, 1.0);
                        break;
                    }
                }
                Err(e) => panic!("Error receiving from snapshot_rx: {:?}", e),
            }
        }

        // Cleanup
        let last = handle.stop().unwrap();
        assert_eq!(last.current_floor, 1);
    }

    #[test]
    fn test_runner_forwards_rejections() {
        // Arrange
        let handle = runner::spawn(setup_controller(), TICK).unwrap();

        // Act
        let same_floor = handle.select_floor(0);
        let missing_floor = handle.select_floor(7);

        // Assert
        assert_eq!(same_floor, Some(Err(Rejection::AlreadyAtFloor)));
        assert_eq!(missing_floor, Some(Err(Rejection::FloorOutOfRange)));
        assert!(handle.is_selectable(2));
        assert_eq!(handle.snapshot().unwrap().phase, Idle);

        // Cleanup
        handle.stop().unwrap();
    }

    #[test]
    fn test_runner_stops_when_terminate_sender_dropped() {
        // Arrange
        let (_command_tx, command_rx) = unbounded::<Command>();
        let (terminate_tx, terminate_rx) = unbounded::<()>();
        let mut controller = setup_controller();
        let snapshot_rx = controller.subscribe();
        let runner = SimulationRunner::new(controller, TICK, command_rx, terminate_rx);
        let runner_thread = spawn(move || runner.run());

        // Act
        drop(terminate_tx);
        let last = runner_thread.join().unwrap();

        // Assert
        assert_eq!(last.phase, Idle);
        while snapshot_rx.try_recv().is_ok() {}
        assert!(snapshot_rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn test_runner_keeps_ticking_without_commands() {
        // Arrange
        let (command_tx, command_rx) = unbounded::<Command>();
        let (terminate_tx, terminate_rx) = unbounded::<()>();
        let mut controller = setup_controller();
        let snapshot_rx = controller.subscribe();
        let runner = SimulationRunner::new(controller, TICK, command_rx, terminate_rx);
        let runner_thread = spawn(move || runner.run());

        // Act
        drop(command_tx);

        // Assert
        for _ in 0..3 {
            match snapshot_rx.recv_timeout(Duration::from_secs(3)) {
                Ok(state) => assert_eq!(state.phase, Idle),
                Err(e) => panic!("Error receiving from snapshot_rx: {:?}", e),
            }
        }

        // Cleanup
        terminate_tx.send(()).unwrap();
        runner_thread.join().unwrap();
    }
}
