use crate::utils::Result;
use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="parsimod",
          version=&**FULL_VERSION,
          about="Resolves ambiguous PTM site localizations from PSM evidence",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Modification Site and Region Resolver")]
    Resolve(ResolveArgs),
    #[clap(about = "PSM Table Validator")]
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct ResolveArgs {
    #[clap(required = true)]
    #[clap(help = "Tab-separated PSM table")]
    #[clap(value_name = "INPUT")]
    #[arg(value_parser = check_file_exists)]
    pub input_path: PathBuf,

    #[clap(required = true)]
    #[clap(help = "Output path for the site constraints table")]
    #[clap(value_name = "CONSTRAINTS_OUT")]
    #[arg(value_parser = check_output_path)]
    pub constraints_path: PathBuf,

    #[clap(required = true)]
    #[clap(help = "Output path for the best-evidence table")]
    #[clap(value_name = "EVIDENCE_OUT")]
    #[arg(value_parser = check_output_path)]
    pub evidence_path: PathBuf,

    #[clap(long = "experiment")]
    #[clap(help = "Track best evidence per value of the Experiment column")]
    pub by_experiment: bool,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct ValidateArgs {
    #[clap(required = true)]
    #[clap(help = "Tab-separated PSM table")]
    #[clap(value_name = "INPUT")]
    #[arg(value_parser = check_file_exists)]
    pub input_path: PathBuf,

    #[clap(long = "experiment")]
    #[clap(help = "Require and parse the Experiment column")]
    pub by_experiment: bool,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_output_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}
