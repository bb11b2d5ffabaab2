use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};

use crate::error::{ConfigError, ConfigResult};
use crate::level::Level;

pub const DEFAULT_MESSAGE_CAPACITY: usize = 1024;

/// Whether checks were compiled in for this build.
pub const ENABLED: bool =
    !cfg!(feature = "off") && (cfg!(debug_assertions) || cfg!(feature = "release-checks"));

const PROMPT_DEFAULT: bool = !cfg!(any(target_os = "ios", target_os = "android"));

static DEFAULT_LEVEL: AtomicI32 = AtomicI32::new(Level::DEBUG.value());
static MESSAGE_CAPACITY: AtomicUsize = AtomicUsize::new(DEFAULT_MESSAGE_CAPACITY);
static PROMPT: AtomicBool = AtomicBool::new(PROMPT_DEFAULT);

/// Runtime knobs of the assert facility.
///
/// Usually loaded from a TOML file or from `NEWENGINE_ASSERT_*` variables and
/// applied once at startup with [`AssertConfig::install`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertConfig {
    /// Level used by the unqualified `check!` form: "warning", "debug", "error", "fatal"
    /// or a raw integer.
    #[serde(default = "default_level_name")]
    pub default_level: String,
    /// Size of the buffer formatted messages are rendered into, terminator included.
    #[serde(default = "default_message_capacity")]
    pub message_capacity: usize,
    /// Ask on stdin for debug-range levels. When false the default handler breaks instead.
    #[serde(default = "default_prompt")]
    pub prompt: bool,
}

fn default_level_name() -> String { "debug".to_string() }
fn default_message_capacity() -> usize { DEFAULT_MESSAGE_CAPACITY }
fn default_prompt() -> bool { PROMPT_DEFAULT }

impl Default for AssertConfig {
    fn default() -> Self {
        Self {
            default_level: default_level_name(),
            message_capacity: default_message_capacity(),
            prompt: default_prompt(),
        }
    }
}

impl AssertConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let default_level = std::env::var("NEWENGINE_ASSERT_LEVEL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.default_level);
        let message_capacity = std::env::var("NEWENGINE_ASSERT_MESSAGE_CAPACITY")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(defaults.message_capacity);
        let prompt = std::env::var("NEWENGINE_ASSERT_PROMPT")
            .ok()
            .map(|v| v != "0")
            .unwrap_or(defaults.prompt);

        Self {
            default_level,
            message_capacity,
            prompt,
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&text).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    pub fn level(&self) -> ConfigResult<Level> {
        self.default_level.parse()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.level()?;
        if self.message_capacity == 0 {
            return Err(ConfigError::InvalidCapacity(self.message_capacity));
        }
        Ok(())
    }

    /// Validates the whole config, then applies it. Nothing changes on error.
    pub fn install(&self) -> ConfigResult<()> {
        self.validate()?;
        let level = self.level()?;

        DEFAULT_LEVEL.store(level.value(), Ordering::Relaxed);
        MESSAGE_CAPACITY.store(self.message_capacity, Ordering::Relaxed);
        PROMPT.store(self.prompt, Ordering::Relaxed);

        log::info!(
            "assert config installed: default level {}, message capacity {}, prompt {}",
            level,
            self.message_capacity,
            self.prompt
        );
        Ok(())
    }
}

/// Level of the unqualified `check!` form.
#[inline]
pub fn default_level() -> Level {
    Level::custom(DEFAULT_LEVEL.load(Ordering::Relaxed))
}

#[inline]
pub fn message_capacity() -> usize {
    MESSAGE_CAPACITY.load(Ordering::Relaxed)
}

#[inline]
pub fn prompt_enabled() -> bool {
    PROMPT.load(Ordering::Relaxed)
}
