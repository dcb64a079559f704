mod config;
mod context;
mod fetch;
mod fs;
mod hipchat;
mod html;
mod http;
mod logging;
mod opt;
mod pack;
mod resolve;

use config::Config;
use context::Context;

use log::{error, LevelFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = Config::from_env();
    let level = config
        .as_ref()
        .map(|config| config.log_level)
        .unwrap_or(LevelFilter::Info);

    if let Err(err) = logging::init(level) {
        eprintln!("couldn't set up logging: {err}");
        std::process::exit(1);
    }

    let config = match config {
        Ok(val) => val,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    let ctx =
        Context::from_iter_safe(std::env::args_os(), config).unwrap_or_else(|err| err.exit());

    if let Err(err) = ctx.run().await {
        error!("{err:#}");
        std::process::exit(1);
    }
}
