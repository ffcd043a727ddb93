pub mod action_select;
pub mod run;

pub use action_select::{select_action, PRIORITY_FLOOR};
pub use run::{RunOutcome, Simulation, SimulationTrace};
