use std::path::PathBuf;

use clap::Parser;

/// Driver daemon for OneTouch serial touchscreen overlays
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a config file. Searched for in the default locations if omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Serial device the panel is attached to. Overrides the config file.
    #[arg(short, long)]
    pub device: Option<String>,
    /// Read a captured report stream from this file instead of the serial port
    #[arg(short, long, conflicts_with = "device")]
    pub replay: Option<PathBuf>,
    /// Log pointer actions instead of creating a virtual pointer device
    #[arg(long)]
    pub dry_run: bool,
}
