use slog::{Drain, Fuse, Level, LevelFilter, o};
use slog_term::{CompactFormat, TermDecorator};
use std::io;
use std::sync::Mutex;
use time::OffsetDateTime;

use crate::helpers::datetime::Timezone;

/// Terminal logger, `log` macros are routed here once `set_global` is called
pub struct Logger {
    logger: slog::Logger,
}

/// 0 = critical .. 5 = trace, anything else is debug
pub fn level_from_u8(log_level: u8) -> Level {
    match log_level {
        0 => Level::Critical,
        1 => Level::Error,
        2 => Level::Warning,
        3 => Level::Info,
        4 => Level::Debug,
        5 => Level::Trace,
        _ => Level::Debug,
    }
}

fn new_drain(level: Level) -> Fuse<Mutex<Fuse<LevelFilter<CompactFormat<TermDecorator>>>>> {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::CompactFormat::new(decorator)
        .use_custom_timestamp(|w: &mut dyn io::Write| {
            write!(
                w,
                "{}",
                OffsetDateTime::now_utc()
                    .to_localtime()
                    .to_formatted_string()
            )
        })
        .build()
        .filter_level(level)
        .fuse();
    Mutex::new(drain).fuse()
}

impl Logger {
    pub fn new(log_level: u8) -> Self {
        Logger {
            logger: slog::Logger::root(
                new_drain(level_from_u8(log_level)),
                o!("version" => env!("CARGO_PKG_VERSION")),
            ),
        }
    }

    pub fn set_global(&self) -> eyre::Result<&Self> {
        // slog_stdlog uses the logger from slog_scope, so set a logger there
        let guard = slog_scope::set_global_logger(self.logger.clone());
        // https://github.com/slog-rs/slog/issues/249
        guard.cancel_reset();
        slog_stdlog::init()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_levels() {
        assert_eq!(level_from_u8(0), Level::Critical);
        assert_eq!(level_from_u8(3), Level::Info);
        assert_eq!(level_from_u8(5), Level::Trace);
        assert_eq!(level_from_u8(42), Level::Debug);
    }

    #[test]
    fn logs_at_every_level() {
        let logger = Logger::new(1);
        slog::info!(logger.logger, "filtered");
        slog::error!(logger.logger, "kept"; "level" => 1);
    }
}
