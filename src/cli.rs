use std::path::PathBuf;

use clap::Parser;

use crate::logger;

#[derive(Debug, Clone, Parser)]
#[clap(bin_name = env!("CARGO_PKG_NAME"), version = env!("CARGO_PKG_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    /// Path to an optional TOML configuration file, environment variables take precedence
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Write the feed to this file instead of uploading it to Cloud Storage
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    #[clap(long, env = "LOG_FORMAT", value_enum, default_value_t = logger::Format::Json)]
    pub log_format: logger::Format,
}
