use std::io::{self, Write};

use chrono::Local;
use colored::{ColoredString, Colorize};
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

fn colored_level(level: Level) -> ColoredString {
    let name = level.as_str();
    match level {
        Level::Error => name.red(),
        Level::Warn => name.yellow(),
        Level::Info => name.green(),
        Level::Debug => name.blue(),
        Level::Trace => name.cyan(),
    }
}

/// Returns the log formatter for the given verbosity.
///
/// Up to `info` a line is just the level and the message. From
/// `debug` on it is prefixed with a timestamp and the log target,
/// which is the module that emitted it.
pub fn format_log(
    log_level: LevelFilter,
) -> impl Fn(&mut Formatter, &Record) -> io::Result<()> + Sync + Send {
    move |buf: &mut Formatter, record: &Record| {
        let level = colored_level(record.level());
        let sep = "=>".bold();

        match log_level {
            LevelFilter::Off => Ok(()),
            LevelFilter::Error | LevelFilter::Warn | LevelFilter::Info => {
                writeln!(buf, "{level:5} {sep} {}", record.args())
            }
            LevelFilter::Debug | LevelFilter::Trace => writeln!(
                buf,
                "[{} {level:5} {}] {sep} {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.target().bright_yellow(),
                record.args(),
            ),
        }
    }
}

/// Sets up the global logger for the binary.
#[derive(Debug, Clone)]
pub struct Logger {
    level: LevelFilter,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn filter_level(&mut self, filter_level: LevelFilter) -> &mut Self {
        self.level = filter_level;
        self
    }

    /// Installs the logger.
    ///
    /// Logs go to stderr so that command output on stdout
    /// can be piped into other tools.
    pub fn init(&mut self) {
        let mut builder = env_logger::Builder::new();

        builder
            .filter_level(self.level)
            .format(format_log(self.level))
            .target(env_logger::Target::Stderr);

        if let Err(e) = builder.try_init() {
            eprintln!("Failed to initialize logger: {e}");
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod test {
    use colored::Color;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::error(Level::Error, Color::Red)]
    #[case::warn(Level::Warn, Color::Yellow)]
    #[case::info(Level::Info, Color::Green)]
    #[case::debug(Level::Debug, Color::Blue)]
    #[case::trace(Level::Trace, Color::Cyan)]
    fn colors_level_name(#[case] level: Level, #[case] color: Color) {
        let colored = colored_level(level);

        assert_eq!(colored.fgcolor(), Some(color));
        assert_eq!(&*colored, level.as_str());
    }
}
