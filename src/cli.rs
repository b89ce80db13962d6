// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "gallery-frame")]
#[command(about = "Picture frame on a lit wall, rendered with WebGPU", long_about = None)]
pub struct Cli {
    /// Disable the egui overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Picture to show in the frame at startup
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Wall texture (overrides the config file)
    #[arg(long)]
    pub wall: Option<PathBuf>,

    /// Scene configuration in JSON
    #[arg(long)]
    pub config: Option<PathBuf>,
}
