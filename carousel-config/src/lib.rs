//! Configuration loading for [`carousel_core`]
//!
//! [`ConfigLoader`] layers defaults, a TOML file, a `.env` file and
//! `CAROUSEL_*` environment variables into one [`CarouselOptions`], then runs
//! the guard rails in [`validation`]. Hard errors stop the load; soft problems
//! come back as [`ConfigWarnings`] and are logged.
//!
//! ```no_run
//! use carousel_config::ConfigLoader;
//!
//! let load = ConfigLoader::new().with_config_path("carousel.toml").load()?;
//! for warning in load.warnings.iter() {
//!     eprintln!("warning: {}", warning.message);
//! }
//! # Ok::<(), carousel_config::ConfigLoadError>(())
//! ```
//!
//! [`CarouselOptions`]: carousel_core::CarouselOptions

#![allow(missing_docs)]

pub mod loader;
pub mod sources;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions, ConfigSource,
};
pub use sources::EnvOverrides;
pub use validation::{
    ConfigGuardRailError, ConfigWarning, ConfigWarnings, apply_guard_rails,
};
