use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod call;
pub mod demo;
pub mod doctor;
pub mod list;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Invoke one procedure with a JSON payload.
    Call(CallArgs),
    /// Show the registered contract.
    List(ListArgs),
    /// Walk the demo flow end to end.
    Demo(DemoArgs),
    /// Run contract self-checks.
    Doctor(DoctorArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Call(args) => call::run(args, format),
        Command::List(args) => list::run(args, format),
        Command::Demo(args) => demo::run(args, format),
        Command::Doctor(args) => doctor::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct CallArgs {
    /// Procedure name, e.g. posts.list.
    pub procedure: String,

    /// Inline JSON payload.
    #[arg(long, value_name = "JSON", conflicts_with = "file")]
    pub json: Option<String>,

    /// Read the JSON payload from a file.
    #[arg(long, value_name = "PATH", conflicts_with = "json")]
    pub file: Option<PathBuf>,

    /// Call as the authenticated demo user.
    #[arg(long)]
    pub auth: bool,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {}

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Number of listing pages to walk.
    #[arg(long, default_value = "3")]
    pub pages: usize,

    /// Page size for the listing walk.
    #[arg(long, default_value = "5")]
    pub page_size: i64,
}

#[derive(Args, Debug, Default)]
pub struct DoctorArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
