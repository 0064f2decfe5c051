use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use carousel_core::CarouselOptions;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::sources::{self, CONFIG_PATH_VAR, EnvOverrides};
use crate::validation::{self, ConfigGuardRailError, ConfigWarnings};

const DEFAULT_CONFIG_LOCATIONS: &[&str] =
    &["carousel.toml", "config/carousel.toml"];

const DEFAULT_ENV_FILE: &str = ".env";

type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    /// Explicit env file. Unlike the implicit `./.env`, it must exist.
    pub env_file: Option<PathBuf>,
    /// Read no env file at all.
    pub no_env_file: bool,
    /// Skip the `carousel.toml` search in the working directory.
    pub no_default_locations: bool,
}

/// Resolves [`CarouselOptions`] from defaults, an optional TOML file, an
/// optional `.env` file and `CAROUSEL_*` variables, in that order of
/// increasing precedence. Variables already present in the process
/// environment win over the `.env` file.
#[derive(Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
    lookup: Option<EnvLookup>,
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("options", &self.options)
            .field("custom_lookup", &self.lookup.is_some())
            .finish()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self {
            options,
            lookup: None,
        }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self.options.no_env_file = false;
        self
    }

    pub fn without_env_file(mut self) -> Self {
        self.options.env_file = None;
        self.options.no_env_file = true;
        self
    }

    pub fn without_default_locations(mut self) -> Self {
        self.options.no_default_locations = true;
        self
    }

    /// Replace the process environment with `lookup`.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        self.lookup = Some(Box::new(lookup));
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let (dotenv, env_file) = self.read_env_file()?;
        let lookup = |key: &str| {
            self.env_var(key).or_else(|| dotenv.get(key).cloned())
        };

        let mut warnings = ConfigWarnings::default();
        let (mut options, config_path) =
            self.load_file(&lookup, &mut warnings)?;

        let overrides = EnvOverrides::gather(&lookup)?;
        let env_overrides = overrides.apply(&mut options);
        if !env_overrides.is_empty() {
            debug!(?env_overrides, "applied environment overrides");
        }

        warnings.extend(validation::apply_guard_rails(&options)?);
        for warning in warnings.iter() {
            warn!(hint = ?warning.hint, "{}", warning.message);
        }

        Ok(ConfigLoad {
            options,
            warnings,
            source: ConfigSource {
                config_path,
                env_file,
                env_overrides,
            },
        })
    }

    fn env_var(&self, key: &str) -> Option<String> {
        match &self.lookup {
            Some(lookup) => lookup(key),
            None => std::env::var(key).ok(),
        }
    }

    /// Entries of the `.env` file without touching the process environment.
    /// A missing implicit `./.env` is skipped; every other failure is an error.
    fn read_env_file(
        &self,
    ) -> Result<(HashMap<String, String>, Option<PathBuf>), ConfigLoadError>
    {
        if self.options.no_env_file {
            return Ok((HashMap::new(), None));
        }
        let (path, explicit) = match &self.options.env_file {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_ENV_FILE), false),
        };
        if path.is_dir() {
            return Err(ConfigLoadError::EnvFileIo {
                source: io::Error::new(
                    io::ErrorKind::IsADirectory,
                    "expected a file, found a directory",
                ),
                path,
            });
        }

        let iter = match dotenvy::from_path_iter(&path) {
            Ok(iter) => iter,
            Err(dotenvy::Error::Io(err))
                if !explicit && err.kind() == io::ErrorKind::NotFound =>
            {
                debug!(path = %path.display(), "no env file");
                return Ok((HashMap::new(), None));
            }
            Err(dotenvy::Error::Io(source)) => {
                return Err(ConfigLoadError::EnvFileIo { path, source });
            }
            Err(err) => return Err(err.into()),
        };
        let mut entries = HashMap::new();
        for entry in iter {
            let (key, value) = entry?;
            entries.insert(key, value);
        }
        debug!(path = %path.display(), count = entries.len(), "read env file");
        Ok((entries, Some(path)))
    }

    fn load_file<F>(
        &self,
        lookup: &F,
        warnings: &mut ConfigWarnings,
    ) -> Result<(CarouselOptions, Option<PathBuf>), ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| lookup(CONFIG_PATH_VAR).map(PathBuf::from));

        let path = match explicit {
            Some(path) if path.exists() => path,
            Some(path) => return Err(ConfigLoadError::MissingConfig { path }),
            None => {
                let found = if self.options.no_default_locations {
                    None
                } else {
                    DEFAULT_CONFIG_LOCATIONS
                        .iter()
                        .map(PathBuf::from)
                        .find(|candidate| candidate.exists())
                };
                match found {
                    Some(path) => path,
                    None => return Ok((CarouselOptions::default(), None)),
                }
            }
        };

        let options = parse_file(&path, warnings)?;
        Ok((options, Some(path)))
    }
}

fn parse_file(
    path: &Path,
    warnings: &mut ConfigWarnings,
) -> Result<CarouselOptions, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let parse_error = |source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let table: toml::Table = toml::from_str(&contents).map_err(parse_error)?;
    for key in sources::unknown_keys(&table) {
        warnings.push_with_hint(
            format!("unknown key `{key}` in {}", path.display()),
            "the key is ignored; check the spelling against the option list",
        );
    }
    table.try_into().map_err(parse_error)
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file {path} does not exist")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error("failed to read env file {path}")]
    EnvFileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

/// Where the effective options came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigSource {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Options overridden by `CAROUSEL_*` variables.
    pub env_overrides: Vec<&'static str>,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub options: CarouselOptions,
    pub warnings: ConfigWarnings,
    pub source: ConfigSource,
}
