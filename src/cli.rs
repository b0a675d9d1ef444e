// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};
use terrapin::gate::TriggerKind;
use terrapin::types::Stage;

#[derive(Parser)]
#[command(name = "terrapin")]
#[command(about = "Multi-environment Terraform pipeline runner")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output for CI
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// JSON lines output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new terrapin.yml configuration file
    Init {
        /// Project name written into the template
        #[arg(long)]
        project: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Run the pipeline for one or all environments
    Run {
        /// Target environment (defined in config)
        #[arg(short, long, required_unless_present = "all")]
        env: Option<String>,

        /// Run every registered environment concurrently
        #[arg(long, conflicts_with = "env")]
        all: bool,

        /// How the run was initiated
        #[arg(long, value_enum, default_value_t = TriggerArg::Manual)]
        trigger: TriggerArg,

        /// Exact stage set to request, replacing the configured defaults
        #[arg(long, value_delimiter = ',')]
        stages: Vec<StageArg>,

        /// Request the apply stage on top of the defaults
        #[arg(long)]
        apply: bool,

        /// Request the destroy stage on top of the defaults
        #[arg(long, conflicts_with = "apply")]
        destroy: bool,

        /// Reviewer who satisfied the approval gate upstream
        #[arg(long, value_name = "NAME")]
        approved_by: Option<String>,
    },

    /// Verify and plan an environment (no mutating stages)
    Plan {
        /// Target environment (defined in config)
        #[arg(short, long)]
        env: String,
    },

    /// Plan and apply an environment
    Apply {
        /// Target environment (defined in config)
        #[arg(short, long)]
        env: String,

        /// Reviewer who satisfied the approval gate upstream
        #[arg(long, value_name = "NAME")]
        approved_by: Option<String>,
    },

    /// Destroy an environment's infrastructure
    Destroy {
        /// Target environment (defined in config)
        #[arg(short, long)]
        env: String,

        /// Reviewer who satisfied the approval gate upstream
        #[arg(long, value_name = "NAME")]
        approved_by: Option<String>,
    },

    /// List registered environments
    Envs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TriggerArg {
    Push,
    Manual,
}

impl From<TriggerArg> for TriggerKind {
    fn from(arg: TriggerArg) -> Self {
        match arg {
            TriggerArg::Push => TriggerKind::Push,
            TriggerArg::Manual => TriggerKind::Manual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    Init,
    Fmt,
    Validate,
    Plan,
    Apply,
    Destroy,
}

impl From<StageArg> for Stage {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Init => Stage::Init,
            StageArg::Fmt => Stage::Fmt,
            StageArg::Validate => Stage::Validate,
            StageArg::Plan => Stage::Plan,
            StageArg::Apply => Stage::Apply,
            StageArg::Destroy => Stage::Destroy,
        }
    }
}
