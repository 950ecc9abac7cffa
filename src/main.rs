//! Virtual mouse application: hand-tracked cursor control and gestures.

use anyhow::Result;
use clap::Parser;
use log::info;
use virtual_mouse::app::VirtualMouseApp;
use virtual_mouse::config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use
    #[arg(long, default_value = "0")]
    cam: i32,

    /// Path to the hand landmark ONNX model
    #[arg(short, long)]
    model: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Flip the scroll direction
    #[arg(long)]
    invert_scroll: bool,

    /// Run without the preview window
    #[arg(long)]
    headless: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Virtual Mouse");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line overrides
    config.camera.index = args.cam;
    if let Some(model) = args.model {
        config.tracking.model = model.into();
    }
    if args.invert_scroll {
        config.gestures.invert_scroll = true;
    }
    if args.headless {
        config.display.gui = false;
    }

    let mut app = VirtualMouseApp::new(config)?;

    let stop = app.stop_flag();
    ctrlc::set_handler(move || {
        stop.store(true, std::sync::atomic::Ordering::SeqCst);
    })?;

    app.run()?;

    Ok(())
}
