//! Command-line interface entry point for `CoursePlanner`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::validate::ValidateOptions;
use course_planner::config::Config;
use course_planner::info;
use course_planner::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status when `--strict` is set and the report has errors
const EXIT_PLAN_ERRORS: u8 = 2;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    let verbose = init_logging(&args, &config);

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults).map(|()| ExitCode::SUCCESS)
        }
        Command::Validate {
            catalog,
            plan,
            requirements,
            max_units,
            no_summer,
            format,
            output,
            strict,
        } => {
            let options = ValidateOptions {
                catalog: &catalog,
                plan: &plan,
                requirements: requirements.as_deref(),
                max_units,
                no_summer,
                format: format.into(),
                output: output.as_deref(),
            };
            commands::validate::run(&options, &config).map(|has_errors| {
                if strict && has_errors {
                    ExitCode::from(EXIT_PLAN_ERRORS)
                } else {
                    ExitCode::SUCCESS
                }
            })
        }
        Command::Depths {
            catalog,
            codes,
            top,
            json,
        } => commands::depths::run(&catalog, &codes, top, json).map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(message) => {
            eprintln!("{message}");
            if verbose {
                eprintln!("Run with --debug for more detail.");
            }
            ExitCode::FAILURE
        }
    }
}

/// Configure level, verbosity, and file sink; returns whether verbose is on
fn init_logging(args: &Cli, config: &Config) -> bool {
    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let config_log_path = (!config.logging.file.is_empty())
        .then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    verbose
}
