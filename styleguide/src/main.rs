use std::process::ExitCode;

use sassdown::error::Result;
use sassdown::markdown::SyntaxHighlight;
use sassdown::styleguide::{discover, Styleguide};

use crate::render::Renderer;

mod config;
mod flags;
mod render;

fn run(flags: flags::Sassdown) -> Result<()> {
    let cwd = config::cwd()?;
    let config = config::load(flags, &cwd)?;

    let start = std::time::Instant::now();
    let files = discover(&config)?;
    let styleguide = Styleguide::build(&config, &files)?;
    log::info!("build time: {}ms", start.elapsed().as_millis());

    if config.dry_run {
        return render::check_dry_run(&styleguide);
    }

    let dest = config.dest.clone();
    let render = std::time::Instant::now();
    Renderer::new(config, &cwd)?.write(&styleguide)?;
    log::info!("render time: {}ms", render.elapsed().as_millis());
    log::info!("styleguide written to {}", dest.display());
    Ok(())
}

pub fn main() -> ExitCode {
    let flags = flags::Sassdown::from_env_or_exit();
    let level = match flags.verbose {
        true => log::LevelFilter::Debug,
        false => log::LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    SyntaxHighlight::warm_up();
    match run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
