use anyhow::Result;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

pub fn init(level: LevelFilter) -> Result<()> {
    TermLogger::init(
        level,
        ConfigBuilder::default()
            .add_filter_allow_str(env!("CARGO_CRATE_NAME"))
            .build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;
    Ok(())
}
