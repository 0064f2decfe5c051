use std::time::Duration;

use carousel_core::{CarouselError, CarouselOptions};
use serde::Serialize;
use thiserror::Error;

/// Longest animation that does not draw a warning.
const MAX_COMFORTABLE_ANIMATION: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("autoplay is enabled with a zero interval")]
    ZeroAutoplayInterval,
    #[error(transparent)]
    Invalid(#[from] CarouselError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWarning {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

/// Reject options the engine would refuse at init and flag combinations that
/// run but probably do not do what was meant.
pub fn apply_guard_rails(
    options: &CarouselOptions,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    if options.auto_play && options.auto_play_interval.is_zero() {
        return Err(ConfigGuardRailError::ZeroAutoplayInterval);
    }
    options.validate()?;

    let mut warnings = ConfigWarnings::default();
    let window = options.settlement_window();

    if options.auto_play && options.auto_play_interval < window {
        warnings.push_with_hint(
            format!(
                "auto_play_interval ({}) is shorter than the settlement window ({})",
                humantime::format_duration(options.auto_play_interval),
                humantime::format_duration(window),
            ),
            "ticks that land inside a transition are dropped; raise the interval",
        );
    }

    if options.auto_play && !options.looping {
        warnings.push_with_hint(
            "autoplay is enabled with loop = false",
            "autoplay stops advancing once it reaches the last slide",
        );
    }

    if options.animation_duration > MAX_COMFORTABLE_ANIMATION {
        warnings.push(format!(
            "animation_duration of {} exceeds {}",
            humantime::format_duration(options.animation_duration),
            humantime::format_duration(MAX_COMFORTABLE_ANIMATION),
        ));
    }

    if options.settle_buffer.is_zero() {
        warnings.push_with_hint(
            "settle_buffer is zero",
            "the silent jump may run before the presentation layer finishes animating",
        );
    }

    if options.swipe_enabled && options.swipe_threshold == 0.0 {
        warnings.push_with_hint(
            "swipe_threshold is 0",
            "every tap on the carousel counts as a swipe",
        );
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_without_warnings() {
        let warnings = apply_guard_rails(&CarouselOptions::default()).unwrap();
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn zero_interval_with_autoplay_is_rejected() {
        let options = CarouselOptions {
            auto_play_interval: Duration::ZERO,
            ..CarouselOptions::default()
        };
        assert!(matches!(
            apply_guard_rails(&options),
            Err(ConfigGuardRailError::ZeroAutoplayInterval)
        ));
    }

    #[test]
    fn negative_swipe_threshold_is_rejected() {
        let options = CarouselOptions {
            swipe_threshold: -5.0,
            ..CarouselOptions::default()
        };
        let err = apply_guard_rails(&options).unwrap_err();
        assert!(matches!(
            err,
            ConfigGuardRailError::Invalid(CarouselError::InvalidOption {
                field: "swipe_threshold",
                ..
            })
        ));
    }

    #[test]
    fn risky_combinations_warn() {
        let options = CarouselOptions {
            auto_play_interval: Duration::from_millis(300),
            looping: false,
            animation_duration: Duration::from_secs(6),
            ..CarouselOptions::default()
        };
        let warnings = apply_guard_rails(&options).unwrap();
        assert_eq!(warnings.len(), 3);
        assert!(
            warnings
                .iter()
                .any(|w| w.message.contains("settlement window"))
        );
        assert!(warnings.iter().any(|w| w.message.contains("loop = false")));
    }
}
