use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::env;

use rake_step::action::{Action, ExecutionContext, RakeAction};
use rake_step::agent::LocalAgent;
use rake_step::config::{RakeInvocationConfig, Settings, StepOverrides};
use rake_step::environment::Environment;
use rake_step::form;

/// rake-step - Run Rake as a configurable pipeline step
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new rake-step environment in the current directory
    Init,

    /// Run a step
    Run {
        #[command(flatten)]
        step: StepArgs,

        /// Source directory relative working directories resolve against
        #[arg(long)]
        source_dir: Option<String>,

        /// Application whose base directory `~` working directories resolve against
        #[arg(long, default_value = "default")]
        app_id: String,
    },

    /// Print the arguments a step passes to Rake
    Args {
        #[command(flatten)]
        step: StepArgs,
    },

    /// Print a one line description of a step
    Describe {
        #[command(flatten)]
        step: StepArgs,
    },

    /// Show a step as an editor form
    Form {
        #[command(flatten)]
        step: StepArgs,

        /// Print the configuration as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// List the available steps
    List,
}

#[derive(Args)]
struct StepArgs {
    /// Name of the step (defaults to the configured default step)
    name: Option<String>,

    /// Path to the Rake executable
    #[arg(long)]
    exe: Option<String>,

    /// Rakefile to use
    #[arg(long)]
    rakefile: Option<String>,

    /// Working directory, absolute, `~`-relative or source relative
    #[arg(long)]
    working_dir: Option<String>,

    /// Environment variable in the form VAR=VALUE (repeatable)
    #[arg(long = "var")]
    vars: Vec<String>,

    /// Space separated tasks to run
    #[arg(long)]
    tasks: Option<String>,
}

impl StepArgs {
    /// Load the named step and apply command line overrides
    fn resolve(self, env: &Environment, settings: &Settings) -> Result<RakeInvocationConfig> {
        let overrides = StepOverrides {
            rake_executable_path: self.exe,
            rake_file: self.rakefile,
            working_directory: self.working_dir,
            variable_values: self.vars,
            tasks: self.tasks,
        };

        env.resolve_step(self.name.as_deref(), overrides, settings)
    }
}

/// Load the settings of an existing environment, exiting when there is none
fn require_environment(env: &Environment) -> Result<Settings> {
    if !env.exists() {
        eprintln!("Error: No rake-step environment found. Run 'rake-step init' first.");
        std::process::exit(1);
    }

    env.settings()
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let current_dir = env::current_dir()?;
    let env = Environment::new(current_dir);

    match cli.command {
        Commands::Init => {
            println!("Initializing rake-step environment...");
            env.init()?;
            println!("rake-step environment initialized successfully.");
            Ok(())
        },
        Commands::Run { step, source_dir, app_id } => {
            let settings = require_environment(&env)?;
            let action = RakeAction::new(step.resolve(&env, &settings)?);

            let source_dir = source_dir
                .unwrap_or_else(|| env.root_dir().to_string_lossy().into_owned());
            let context = ExecutionContext::new(source_dir, app_id);
            let agent = LocalAgent::new(settings.base_directory());

            println!("{}", action);
            let exit_code = action.execute(&context, &agent)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        },
        Commands::Args { step } => {
            let settings = require_environment(&env)?;
            let action = RakeAction::new(step.resolve(&env, &settings)?);
            println!("{}", action.arguments());
            Ok(())
        },
        Commands::Describe { step } => {
            let settings = require_environment(&env)?;
            println!("{}", step.resolve(&env, &settings)?);
            Ok(())
        },
        Commands::Form { step, json } => {
            let settings = require_environment(&env)?;
            let fields = form::bind_to_form(&step.resolve(&env, &settings)?);
            // Round trip through the form so missing required fields are reported
            let config = form::create_from_form(&fields)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", form::render(&fields));
            }
            Ok(())
        },
        Commands::List => {
            let default_step = require_environment(&env)?.default_step;
            println!("Available steps:");
            for step in env.list_steps()? {
                if step == default_step {
                    println!("* {} (default)", step);
                } else {
                    println!("  {}", step);
                }
            }
            Ok(())
        },
    }
}
