//! Reading `epipearl.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};

use crate::error::ConfigError;
use crate::schema::ClientConfig;

/// Reads a [`ClientConfig`], substituting `${VAR}` placeholders from the
/// environment first so credentials need not live in the file.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> Result<ClientConfig, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Self::load_str(&fs::read_to_string(path)?)
    }

    pub fn load_str(text: &str) -> Result<ClientConfig, ConfigError> {
        let mut config: ClientConfig = toml::from_str(&Self::substitute(text)?)?;
        config.logging.directory = config
            .logging
            .directory
            .map(|dir| PathBuf::from(Self::expand_path(&dir.to_string_lossy())));
        Ok(config)
    }

    /// Replace every `${VAR}` with its value. The first unset variable
    /// aborts the load.
    fn substitute(text: &str) -> Result<String, ConfigError> {
        let placeholder = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        let mut unset = None;
        let substituted = placeholder.replace_all(text, |caps: &Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_else(|_| {
                unset.get_or_insert_with(|| caps[1].to_string());
                String::new()
            })
        });
        match unset {
            Some(name) => Err(ConfigError::EnvVarNotSet(name)),
            None => Ok(substituted.into_owned()),
        }
    }

    /// `~` and `~/...` resolve against the home directory.
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).into_owned()
    }
}
