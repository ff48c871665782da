use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "lava", version, about = "Raymarched lava-blob background")]
pub struct Cli {
    /// Initial window width, or image width in headless mode.
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Initial window height, or image height in headless mode.
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Render without a window and write the last frame as PNG.
    #[arg(long)]
    pub headless: bool,

    /// Frames to render in headless mode.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    /// Simulated seconds before the first headless frame.
    #[arg(long, default_value_t = 0.0)]
    pub time: f32,

    /// Simulated frame rate in headless mode.
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,

    /// Output file in headless mode. Defaults to a timestamped file in the
    /// working directory.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// WGSL file to load and hot-reload in windowed mode.
    #[arg(long)]
    pub watch_shader: Option<PathBuf>,
}
