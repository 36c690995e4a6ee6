use clap::Parser;
use log::warn;
use shadowmask_runtime::Engine;

mod assets;
mod audio_device;
mod config;
mod demos;
mod host;
mod video;

/// Native canvas resolution; demos are authored for it.
const CANVAS_WIDTH: usize = 320;
const CANVAS_HEIGHT: usize = 240;

#[derive(Parser)]
#[command(name = "shadowmask", about = "Palette-indexed retro engine demos")]
struct Args {
    /// Demo to run (see `--list`).
    demo: Option<String>,

    /// List the available demos and exit.
    #[arg(long)]
    list: bool,

    /// Window scale factor (overrides the config file).
    #[arg(long)]
    scale: Option<u32>,

    /// PNG to use as the sprite atlas instead of the built-in one.
    #[arg(long)]
    atlas: Option<std::path::PathBuf>,

    /// Run without opening an audio device.
    #[arg(long)]
    no_audio: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if args.list {
        for name in demos::names() {
            println!("{name}");
        }
        return;
    }

    let Some(name) = args.demo.as_deref() else {
        eprintln!("Usage: shadowmask <demo> [--scale N] [--atlas PATH] [--no-audio]");
        eprintln!("Available: {}", demos::names().join(", "));
        std::process::exit(1);
    };

    let Some(mut game) = demos::create(name, args.atlas.as_deref()) else {
        eprintln!("Unknown demo: {name}");
        eprintln!("Available: {}", demos::names().join(", "));
        std::process::exit(1);
    };

    let config = config::load();
    let scale = args.scale.or(config.video.scale).unwrap_or(3).max(1);

    let mut engine = Engine::new(CANVAS_WIDTH, CANVAS_HEIGHT).expect("Failed to create engine");
    if let Some(gain) = config.audio.master_gain {
        engine.audio.lock().set_master_gain(gain);
    }

    if args.no_audio {
        warn!("audio disabled from the command line");
    }

    host::run(game.as_mut(), &mut engine, scale, args.no_audio);
}
