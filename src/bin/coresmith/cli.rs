//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Coresmith - core registry and dependency resolver for hardware IP builds
#[derive(Parser)]
#[command(name = "coresmith")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Additional directory to search for cores (may be repeated)
    #[arg(long = "cores-root", value_name = "DIR", global = true)]
    pub cores_root: Vec<PathBuf>,

    /// Tool whose tool-specific dependencies are included
    #[arg(long, env = "CORESMITH_TOOL", global = true)]
    pub tool: Option<String>,

    /// Do not read configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all known cores
    List(ListArgs),

    /// Show details of one core
    Show(ShowArgs),

    /// List top-level system cores
    Systems,

    /// Print the build order of a core
    Deps(DepsArgs),

    /// Collect an attribute across a core and its dependencies
    Get(GetArgs),

    /// List the scanned cores roots
    Roots,
}

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Core name
    pub name: String,
}

#[derive(Args)]
pub struct DepsArgs {
    /// Core name
    pub name: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct GetArgs {
    /// Core name
    pub name: String,

    /// Attribute or section name (e.g. `verilog`, `description`)
    pub attribute: String,

    /// Only read the core itself, not its dependencies
    #[arg(long)]
    pub shallow: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
