// ABOUTME: Validated domain types for environments, stages, and artifacts.
// ABOUTME: Newtypes and phantom types prevent values from being swapped by accident.

mod env_name;
mod plan_file;
mod stage;
mod state_key;

pub use env_name::{EnvName, EnvNameError};
pub use plan_file::PlanFile;
pub use stage::Stage;
pub use state_key::{StateKey, StateKeyError};
