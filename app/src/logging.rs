use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

use std::io::Write;

#[derive(Debug, Clone)]
pub struct ConsoleLoggerConfig {
    pub level: LevelFilter,
    pub colors: bool,
    pub include_module: bool,
}

impl ConsoleLoggerConfig {
    pub fn from_env() -> Self {
        let level = std::env::var("NEWENGINE_LOG")
            .ok()
            .and_then(|v| v.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Info);
        let colors = std::env::var("NEWENGINE_LOG_COLORS")
            .ok()
            .map(|v| v != "0")
            .unwrap_or(true);
        let include_module = std::env::var("NEWENGINE_LOG_MODULE")
            .ok()
            .map(|v| v != "0")
            .unwrap_or(true);

        Self {
            level,
            colors,
            include_module,
        }
    }
}

impl Default for ConsoleLoggerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

pub fn init(config: &ConsoleLoggerConfig) -> anyhow::Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(config.level);
    builder.write_style(if config.colors {
        WriteStyle::Auto
    } else {
        WriteStyle::Never
    });

    let include_module = config.include_module;
    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        if include_module {
            writeln!(
                buf,
                "[{style}{:<5}{style:#}] {:<25} {}",
                record.level(),
                record.target(),
                record.args()
            )
        } else {
            writeln!(buf, "[{style}{:<5}{style:#}] {}", record.level(), record.args())
        }
    });

    builder
        .try_init()
        .map_err(|e| anyhow::anyhow!("logger init failed: {e}"))
}
