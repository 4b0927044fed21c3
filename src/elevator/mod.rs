pub mod doors;
pub mod fsm;
pub mod gate;
pub mod kinematics;
pub mod kinematics_tests;
pub mod runner;
pub mod runner_tests;
pub mod simulate;

pub use fsm::ElevatorController;
pub use runner::{SimulationHandle, SimulationRunner};
pub use simulate::{simulate, Action, Status};
