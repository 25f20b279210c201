use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{generate_command, list_command};

/// Generate test mocks from type-checked Go interfaces
#[derive(Parser, Debug)]
#[command(name = "mockgen")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a mock file for the requested interfaces
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),
    /// List the interfaces declared by the loaded packages
    #[command(visible_alias = "l")]
    List(ListArgs),
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Package name of the generated file
    #[arg(short = 'p', long = "output-package")]
    pub output_package: Option<String>,

    /// Output file (prints to stdout when omitted)
    #[arg(short = 'f', long = "file")]
    pub output_file: Option<PathBuf>,

    /// Module path; imports below it are grouped as local
    #[arg(short = 'm', long = "module")]
    pub module: Option<String>,

    /// Directory to run from
    #[arg(short = 'C', long = "chdir")]
    pub chdir: Option<PathBuf>,

    /// Resolved package document produced by the type checker
    #[arg(short = 's', long = "packages")]
    pub packages_file: Option<PathBuf>,

    /// Format: <importpath>:<interface>[=struct][,<interface>[=struct]]...
    #[arg(short = 'i', long = "input", value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// Do not read .mockgen.json
    #[arg(long = "no-config")]
    pub no_config: bool,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Import paths to list (all packages when omitted)
    pub packages: Vec<String>,

    /// Directory to run from
    #[arg(short = 'C', long = "chdir")]
    pub chdir: Option<PathBuf>,

    /// Resolved package document produced by the type checker
    #[arg(short = 's', long = "packages")]
    pub packages_file: Option<PathBuf>,

    /// Do not read .mockgen.json
    #[arg(long = "no-config")]
    pub no_config: bool,
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Generate(args) => generate_command(args),
            Commands::List(args) => list_command(args),
        }
    }
}
