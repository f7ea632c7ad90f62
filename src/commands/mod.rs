//! Command implementations for promptgen.
//!
//! promptgen has a single command; the dispatcher resolves configuration
//! and the transport, then hands off to the generation pipeline.

pub mod generate;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::transport;
use chrono::Local;
use generate::GenerateOptions;

/// Run the generation pipeline described by the parsed CLI.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::from_env(cli.mock)?;
    let today = Local::now().date_naive();
    let options = GenerateOptions::from(&cli);

    tracing::info!(
        mode = config.mode_label(),
        count = options.count,
        file = %options.file.display(),
        dry_run = options.dry_run,
        "starting generation run"
    );

    let transport = transport::for_config(&config, options.count, today);
    let mut stdout = std::io::stdout().lock();
    generate::run(&options, &config, transport.as_ref(), today, &mut stdout)?;
    Ok(())
}
