// ABOUTME: Entry point for the terrapin CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use std::env;
use terrapin::commands::{self, RunRequest, RunTarget};
use terrapin::config::{self, Config};
use terrapin::error::Result;
use terrapin::gate::StageFlags;
use terrapin::output::{Output, OutputMode};
use terrapin::run::Approval;
use terrapin::types::Stage;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);
    output.start_timer();

    if let Err(e) = run(cli, &output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    match cli.command {
        Commands::Init { project, force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, project.as_deref(), force)?;
            output.success("Created terrapin.yml");
            Ok(())
        }
        Commands::Run {
            env: env_name,
            all,
            trigger,
            stages,
            apply,
            destroy,
            approved_by,
        } => {
            let config = discover_config()?;

            let mut requested = if stages.is_empty() {
                config.dispatch_defaults
            } else {
                let mut flags = StageFlags::none();
                for stage in &stages {
                    flags.set(Stage::from(*stage), true);
                }
                flags
            };
            if apply {
                requested.apply = true;
            }
            if destroy {
                requested.destroy = true;
            }

            let target = if all {
                RunTarget::All
            } else {
                // clap guarantees env is present when --all is absent
                RunTarget::Environment(env_name.unwrap_or_default())
            };

            let request = RunRequest {
                trigger: trigger.into(),
                requested,
                approval: approval_from(approved_by),
            };

            commands::run(&config, target, request, output).await
        }
        Commands::Plan { env: env_name } => {
            let config = discover_config()?;
            let request = RunRequest {
                trigger: terrapin::gate::TriggerKind::Manual,
                requested: StageFlags::through_plan(),
                approval: Approval::NotRequested,
            };
            commands::run(&config, RunTarget::Environment(env_name), request, output).await
        }
        Commands::Apply {
            env: env_name,
            approved_by,
        } => {
            let config = discover_config()?;
            let request = RunRequest {
                trigger: terrapin::gate::TriggerKind::Manual,
                requested: StageFlags {
                    apply: true,
                    ..StageFlags::through_plan()
                },
                approval: approval_from(approved_by),
            };
            commands::run(&config, RunTarget::Environment(env_name), request, output).await
        }
        Commands::Destroy {
            env: env_name,
            approved_by,
        } => {
            let config = discover_config()?;
            let request = RunRequest {
                trigger: terrapin::gate::TriggerKind::Manual,
                requested: StageFlags {
                    init: true,
                    destroy: true,
                    ..StageFlags::none()
                },
                approval: approval_from(approved_by),
            };
            commands::run(&config, RunTarget::Environment(env_name), request, output).await
        }
        Commands::Envs => {
            let config = discover_config()?;
            commands::list_environments(&config, output)
        }
    }
}

fn discover_config() -> Result<Config> {
    let cwd = env::current_dir()?;
    Config::discover(&cwd)
}

fn approval_from(approved_by: Option<String>) -> Approval {
    match approved_by {
        Some(by) => Approval::granted(by),
        None => Approval::NotRequested,
    }
}
