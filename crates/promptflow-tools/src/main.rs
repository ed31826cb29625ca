//! Promptflow CLI - Runs the new-project wizard on the promptflow engine

mod wizard;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use promptflow_core::{
    parse_keys, ConsoleTerminal, FlowError, FlowExecutor, FlowResult, PromptTheme, ResultMode,
    ScriptedTerminal,
};
use std::path::PathBuf;
use wizard::WizardInputs;

/// Exit code used when the user cancels, matching Ctrl+C
const EXIT_CANCELLED: i32 = 130;

#[derive(Parser, Debug)]
#[command(name = "promptflow")]
#[command(about = "Interactive multi-step wizards for the terminal")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the new-project wizard
    New(NewArgs),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct NewArgs {
    /// Project name (skips the prompt)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Project description (skips the prompt)
    #[arg(long)]
    pub description: Option<String>,

    /// Project directory (skips the prompt; not checked for existence)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Build tool: cargo, gradle, maven (skips the prompt)
    #[arg(short, long)]
    pub build: Option<String>,

    /// Features to enable (comma-separated: http,database,logging,metrics)
    #[arg(short, long, value_delimiter = ',')]
    pub features: Option<Vec<String>>,

    /// Show prompts for supplied values, starting from them, instead of skipping
    #[arg(long)]
    pub verify: bool,

    /// Read input from a key script instead of the terminal (e.g. "enter,type:app,enter")
    #[arg(long)]
    pub keys: Option<String>,

    /// Use ASCII glyphs only
    #[arg(long)]
    pub ascii: bool,

    /// Output format for the collected values
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Yaml,
}

impl From<NewArgs> for WizardInputs {
    fn from(args: NewArgs) -> Self {
        WizardInputs {
            name: args.name,
            description: args.description,
            directory: args.directory,
            build: args.build,
            features: args.features,
            verify: args.verify,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(EXIT_CANCELLED);
    })
    .ok();

    init_tracing();

    let args = Args::parse();

    let result = match args.command {
        Some(Command::New(new_args)) => run_new(new_args).await,
        // No subcommand provided, default to the interactive wizard
        None => run_new(NewArgs::default()).await,
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

/// Engine diagnostics go to stderr, only when RUST_LOG is set
fn init_tracing() {
    if let Ok(filter) = tracing_subscriber::EnvFilter::try_from_default_env() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

async fn run_new(args: NewArgs) -> Result<()> {
    cliclack::intro("promptflow")?;

    let theme = if args.ascii {
        PromptTheme::ascii()
    } else {
        PromptTheme::default()
    };
    let format = args.format;
    let script = args.keys.clone();
    let inputs: WizardInputs = args.into();
    if inputs.verify && !inputs.has_supplied_values() {
        cliclack::log::warning("--verify has no effect without supplied values")?;
    }
    let flow = wizard::new_project_flow(&inputs)?;

    let needs_input = flow
        .steps()
        .iter()
        .any(|step| step.mode != ResultMode::Preset);

    // The flow blocks on terminal input, so it runs on a blocking task
    let handle = match script {
        Some(script) => {
            let keys = parse_keys(&script)?;
            cliclack::log::info(format!("Replaying {} scripted keys", keys.len()))?;
            tokio::task::spawn_blocking(move || -> Result<(FlowResult, Vec<String>), FlowError> {
                let mut terminal = ScriptedTerminal::from_keys(keys);
                let result = FlowExecutor::new(&mut terminal).with_theme(theme).run(&flow)?;
                Ok((result, terminal.lines().to_vec()))
            })
        }
        None => {
            let mut terminal = ConsoleTerminal::stderr();
            if needs_input && !terminal.is_interactive() {
                anyhow::bail!(
                    "Not running in a terminal. Pass --keys or supply every value with flags."
                );
            }
            tokio::task::spawn_blocking(move || -> Result<(FlowResult, Vec<String>), FlowError> {
                let result = FlowExecutor::new(&mut terminal).with_theme(theme).run(&flow)?;
                Ok((result, Vec::new()))
            })
        }
    };

    let (result, transcript) = handle.await??;
    for line in &transcript {
        cliclack::log::step(line)?;
    }

    if !result.is_completed() {
        cliclack::outro_cancel("Setup cancelled.")?;
        std::process::exit(EXIT_CANCELLED);
    }

    print_result(&result, format)?;
    cliclack::outro("Done")?;

    Ok(())
}

fn print_result(result: &FlowResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for (id, value) in result.context().iter() {
                cliclack::log::success(format!("{}: {}", id, value))?;
            }
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(result.context())?);
        }
    }
    Ok(())
}
