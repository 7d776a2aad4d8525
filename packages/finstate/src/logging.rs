use std::{fs::File, sync::Mutex};

use chrono::Local;
use colored::{ColoredString, Colorize};
use finstate_lib::{config::LoggerConfig, logger::LogLevel};

/// The colored short tag of a level, as printed in front of CLI messages.
pub fn colored_tag(level: LogLevel) -> ColoredString {
    let tag = level.to_string_short();
    match level {
        LogLevel::Trace => tag.dimmed(),
        LogLevel::Debug => tag.bright_cyan(),
        LogLevel::Info => tag.bright_green(),
        LogLevel::Warn => tag.yellow(),
        LogLevel::Error => tag.bright_red(),
    }
}

/// Installs the global tracing subscriber described by `config`. Nothing is
/// installed if logging is disabled.
pub fn init(config: &LoggerConfig) -> anyhow::Result<()> {
    if !*config.get_enabled() {
        return Ok(());
    }

    let builder = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(*config.get_log_level()))
        .with_target(false);

    if *config.get_log_file() {
        std::fs::create_dir_all("./logs")?;
        let path = format!(
            "./logs/finstate_run_{}.txt",
            Local::now().format("%Y-%m-%d_%H-%M-%S")
        );
        let file = File::create(&path)?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();

        eprintln!("[{}] logging to {}", colored_tag(LogLevel::Info), path);
    } else {
        builder.with_writer(std::io::stderr).init();
    }

    Ok(())
}
