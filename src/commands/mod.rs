// ABOUTME: Command module aggregator for the terrapin CLI.
// ABOUTME: Re-exports the run and envs command handlers.

mod envs;
mod run;

pub use envs::list_environments;
pub use run::{RunRequest, RunTarget, run};
