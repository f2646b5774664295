use clap::Parser;
use colored::*;
use std::path::Path;

use fencefmt_lib::config::{Config, ConfigError};
use fencefmt_lib::editor::ExternalEditor;
use fencefmt_lib::exit_codes::exit;
use fencefmt_lib::prompt::TerminalPrompt;
use fencefmt_lib::CodeBlockProcessor;

mod cli_types;
mod file_processor;

use cli_types::{Cli, Commands};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            if e.use_stderr() {
                exit::failure();
            }
            exit::success();
        }
    };

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else if cli.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env().filter_level(level).init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::failure();
        }
    };

    let target = cli.command.target();
    let paths = match file_processor::find_documents(&target.path, &config) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            if e.downcast_ref::<ConfigError>().is_some() {
                exit::failure();
            }
            exit::tool_error();
        }
    };
    if paths.is_empty() {
        log::warn!("No documents found under {}", target.path.display());
    }

    match run(&cli, &config, &paths) {
        Ok(true) => exit::success(),
        Ok(false) => exit::failure(),
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}

/// Config file, then `--lang`, then validation.
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
    let mut config = Config::discover(cli.config.as_deref(), &cwd)?;
    if let Some(langs) = &cli.command.target().lang {
        config = config.with_languages(langs);
    }
    config.validate()?;
    Ok(config)
}

/// Returns `Ok(false)` when the run should exit with the failure code.
fn run(cli: &Cli, config: &Config, paths: &[std::path::PathBuf]) -> anyhow::Result<bool> {
    let processor = CodeBlockProcessor::new(config)?;

    match &cli.command {
        Commands::Format(args) => {
            let stats = file_processor::format_files(paths, &processor, args.check, cli.quiet)?;
            Ok(!(args.check && stats.needs_attention()))
        }
        Commands::Fix(_) => {
            let mut editor = ExternalEditor::resolve(config.editor.as_deref())?;
            let mut prompt = TerminalPrompt::stdio();
            file_processor::fix_files(paths, &processor, &mut editor, &mut prompt, cli.quiet)?;
            Ok(true)
        }
        Commands::Analyze(_) => {
            file_processor::analyze_files(paths, &processor, cli.quiet)?;
            Ok(true)
        }
    }
}
