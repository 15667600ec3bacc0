//! `stencil`: create new projects from template archives.
//!
//! `main` loads `.env`, parses arguments, installs the tracing subscriber and
//! loads configuration before handing the command to a current-thread tokio
//! runtime. Failures are printed with suggestions and mapped to an exit code:
//! 1 internal, 2 bad input, 3 not found, 4 configuration, 5 network.

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("stencil: {e}");
        return ExitCode::from(1);
    }
    debug!(command = ?cli.command, "starting");

    let verbose = cli.global.verbose > 0;
    let config = match AppConfig::load(cli.global.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return handle_error(CliError::config(format!("{e:#}")), verbose),
    };
    let output = OutputManager::new(&cli.global, &config);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => return handle_error(e.into(), verbose),
    };

    match runtime.block_on(run(cli.command, config, output)) {
        Ok(()) => {
            info!("done");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

#[instrument(skip_all)]
async fn run(command: Commands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match command {
        Commands::New(args) => {
            let working_dir = std::env::current_dir()?;
            commands::new::execute(args, &working_dir, &config, &output).await
        }
        Commands::List(args) => commands::list::execute(args, &config, &output).await,
        Commands::Clean => commands::clean::execute(&config, &output),
        Commands::Init(args) => commands::init::execute(args, &output),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    let color = std::io::IsTerminal::is_terminal(&std::io::stderr());
    eprint!("{}", err.render(verbose, color));

    ExitCode::from(err.exit_code())
}
