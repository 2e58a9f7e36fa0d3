use clap::Parser;
use std::path::PathBuf;

/// graphshell - isolated GraphRAG workspaces with an interactive query loop
#[derive(Parser, Debug)]
#[command(name = "graphshell")]
#[command(about = "Run GraphRAG indexing and search in an isolated workspace", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Workspace name under <root>/workspaces
    #[arg(long, short = 'w')]
    pub workspace: String,

    /// Run the indexing pipeline before loading tables
    #[arg(long)]
    pub index: bool,

    /// Print a summary of the loaded tables and exit
    #[arg(long)]
    pub inspect: bool,

    /// Project root holding settings.toml and the workspaces directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,
}
