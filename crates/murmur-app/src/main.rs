//! Murmur - live transcription recorder
//!
//! Captures microphone audio into a scrolling waveform timeline with
//! speaker-labeled ranges and a synchronized transcript panel.
//!
//! ## Command line flags
//!
//! - `--wav PATH`: review a recording from disk instead of capturing
//! - `--transcript PATH`: transcript YAML; replayed on its own
//!   timestamps when capturing, loaded whole when reviewing
//! - `--device NAME`: input device for capture (default: system default)

mod app;
mod capture;
mod config;
mod feed;
mod import;
mod message;
mod transport;

use std::path::PathBuf;

use app::{BootOptions, MurmurApp};

fn main() -> iced::Result {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config_path = config::default_config_path();
    let first_run = !config_path.exists();
    let options = BootOptions {
        wav: flag_value(&args, "--wav").map(PathBuf::from),
        transcript: flag_value(&args, "--transcript").map(PathBuf::from),
        device: flag_value(&args, "--device"),
        config: config::load_config(&config_path),
    };
    if first_run {
        // Write the defaults out so users have a file to edit
        if let Err(e) = config::save_config(&options.config, &config_path) {
            log::warn!("could not write default config: {:#}", e);
        }
    }

    log::info!("murmur starting up");
    if let Some(wav) = &options.wav {
        log::info!("review mode: {:?}", wav);
    } else {
        log::info!("live capture mode");
    }

    let window_size = iced::Size::new(
        options.config.display.window_width,
        options.config.display.window_height,
    );

    iced::application(
        move || MurmurApp::new(options.clone()),
        MurmurApp::update,
        MurmurApp::view,
    )
    .subscription(MurmurApp::subscription)
    .theme(MurmurApp::theme)
    .title("Murmur")
    .window_size(window_size)
    .run()
}

/// Value following a `--flag` argument, if present
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
