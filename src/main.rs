//! `atomviz` binary: opens a window with the animated atom.
//!
//! Usage: `atomviz [options.toml]`. Logging is controlled by `RUST_LOG`.

use std::path::Path;
use std::process::ExitCode;

use atomviz::{AtomVizError, Options, Viewer};

fn run() -> Result<(), AtomVizError> {
    let options = match std::env::args().nth(1) {
        Some(path) => {
            let options = Options::load(Path::new(&path))?;
            log::info!("loaded options from {path}");
            options
        }
        None => Options::default(),
    };

    Viewer::builder()
        .with_options(options)
        .with_title("atomviz")
        .build()
        .run()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
