//! Carousel options
//!
//! Every field has a default taken from [`crate::constants`], so hosts only
//! spell out what they change. Durations deserialize from either integer
//! milliseconds or humantime strings (`"600ms"`, `"5s"`).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{autoplay, gesture, limits, resize, transition};
use crate::transition::Easing;
use crate::error::{CarouselError, Result};

/// Options recognized by the carousel engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselOptions {
    /// Start the autoplay scheduler at init.
    pub auto_play: bool,
    /// Period of the autoplay timer.
    #[serde(with = "duration_serde")]
    pub auto_play_interval: Duration,
    /// Clone-based wraparound. When false, prev/next are no-ops at the ends
    /// and no clones are created.
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Generate indicator dots when the host supplied none.
    pub show_dots: bool,
    /// Generate prev/next arrows when the host supplied none.
    pub show_arrows: bool,
    /// Recognize pointer swipes.
    pub swipe_enabled: bool,
    /// Navigate with the keyboard while focus is inside the container.
    pub keyboard_enabled: bool,
    /// Pause autoplay while the pointer hovers the container.
    pub pause_on_hover: bool,
    /// Duration of the animated track move.
    #[serde(with = "duration_serde")]
    pub animation_duration: Duration,
    /// Added to `animation_duration` before a move counts as settled.
    #[serde(with = "duration_serde")]
    pub settle_buffer: Duration,
    /// Minimum horizontal travel (px) for a swipe.
    pub swipe_threshold: f32,
    /// Quiet period after the last resize event.
    #[serde(with = "duration_serde")]
    pub resize_debounce: Duration,
    /// Resume autoplay when a pointer gesture ends.
    pub resume_after_interaction: bool,
    /// Curve used for the interpolated track offset during a move.
    pub easing: Easing,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            auto_play: true,
            auto_play_interval: Duration::from_millis(autoplay::INTERVAL_MS),
            looping: true,
            show_dots: true,
            show_arrows: true,
            swipe_enabled: true,
            keyboard_enabled: true,
            pause_on_hover: true,
            animation_duration: Duration::from_millis(
                transition::ANIMATION_DURATION_MS,
            ),
            settle_buffer: Duration::from_millis(transition::SETTLE_BUFFER_MS),
            swipe_threshold: gesture::SWIPE_THRESHOLD_PX,
            resize_debounce: Duration::from_millis(resize::DEBOUNCE_MS),
            resume_after_interaction: true,
            easing: Easing::default(),
        }
    }
}

impl CarouselOptions {
    /// Animation duration plus safety buffer: how long the engine stays locked
    /// after accepting a navigation request.
    pub fn settlement_window(&self) -> Duration {
        self.animation_duration.saturating_add(self.settle_buffer)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        let max = Duration::from_millis(limits::MAX_DURATION_MS);
        for (field, value) in [
            ("auto_play_interval", self.auto_play_interval),
            ("animation_duration", self.animation_duration),
            ("settle_buffer", self.settle_buffer),
            ("resize_debounce", self.resize_debounce),
        ] {
            if value > max {
                return Err(CarouselError::InvalidOption {
                    field,
                    reason: format!(
                        "must be at most {}, got {}",
                        humantime::format_duration(max),
                        humantime::format_duration(value)
                    ),
                });
            }
        }
        if self.auto_play_interval.is_zero() {
            return Err(CarouselError::InvalidOption {
                field: "auto_play_interval",
                reason: "must be greater than zero".into(),
            });
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(CarouselError::InvalidOption {
                field: "swipe_threshold",
                reason: format!(
                    "must be a non-negative number of pixels, got {}",
                    self.swipe_threshold
                ),
            });
        }
        Ok(())
    }
}

/// Serde adapter for `Duration` fields: integer milliseconds or a humantime
/// string on input, humantime string on output.
pub mod duration_serde {
    use std::fmt;
    use std::time::Duration;

    use serde::{Deserializer, Serializer, de};

    /// Serialize as a humantime string such as `"600ms"`.
    pub fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer
            .serialize_str(&humantime::format_duration(*value).to_string())
    }

    /// Deserialize from integer milliseconds or a humantime string.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        deserializer.deserialize_any(DurationVisitor)
    }

    struct DurationVisitor;

    impl de::Visitor<'_> for DurationVisitor {
        type Value = Duration;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("milliseconds or a duration string such as \"600ms\"")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Duration, E> {
            Ok(Duration::from_millis(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Duration, E> {
            u64::try_from(v)
                .map(Duration::from_millis)
                .map_err(|_| E::custom("duration must not be negative"))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Duration, E> {
            humantime::parse_duration(v.trim()).map_err(E::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let options = CarouselOptions::default();
        assert!(options.auto_play);
        assert!(options.looping);
        assert_eq!(options.auto_play_interval, Duration::from_millis(5000));
        assert_eq!(options.settlement_window(), Duration::from_millis(650));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn durations_accept_millis_and_humantime() {
        let options: CarouselOptions = toml::from_str(
            r#"
            auto_play_interval = "3s"
            animation_duration = 450
            loop = false
            "#,
        )
        .unwrap();

        assert_eq!(options.auto_play_interval, Duration::from_secs(3));
        assert_eq!(options.animation_duration, Duration::from_millis(450));
        assert!(!options.looping);
        // untouched fields keep their defaults
        assert!(options.show_dots);
    }

    #[test]
    fn negative_duration_is_rejected() {
        let parsed: std::result::Result<CarouselOptions, _> =
            toml::from_str("animation_duration = -5");
        assert!(parsed.is_err());
    }

    #[test]
    fn serializes_durations_as_strings() {
        let json = serde_json::to_value(CarouselOptions::default()).unwrap();
        assert_eq!(json["animation_duration"], "600ms");
        assert_eq!(json["auto_play_interval"], "5s");
        assert_eq!(json["loop"], true);
    }

    #[test]
    fn zero_interval_is_invalid() {
        let options = CarouselOptions {
            auto_play_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(CarouselError::InvalidOption {
                field: "auto_play_interval",
                ..
            })
        ));
    }

    #[test]
    fn bad_swipe_threshold_is_invalid() {
        let options = CarouselOptions {
            swipe_threshold: f32::NAN,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn durations_past_one_day_are_invalid() {
        let huge: CarouselOptions =
            toml::from_str(r#"auto_play_interval = "500000000000years""#).unwrap();
        assert!(matches!(
            huge.validate(),
            Err(CarouselError::InvalidOption {
                field: "auto_play_interval",
                ..
            })
        ));

        let day = Duration::from_millis(limits::MAX_DURATION_MS);
        let over = day + Duration::from_millis(1);
        let cases: [(&str, CarouselOptions); 3] = [
            (
                "animation_duration",
                CarouselOptions {
                    animation_duration: over,
                    ..Default::default()
                },
            ),
            (
                "settle_buffer",
                CarouselOptions {
                    settle_buffer: over,
                    ..Default::default()
                },
            ),
            (
                "resize_debounce",
                CarouselOptions {
                    resize_debounce: over,
                    ..Default::default()
                },
            ),
        ];
        for (expected, options) in cases {
            match options.validate() {
                Err(CarouselError::InvalidOption { field, .. }) => {
                    assert_eq!(field, expected)
                }
                other => panic!("{expected}: expected InvalidOption, got {other:?}"),
            }
        }

        let at_limit = CarouselOptions {
            auto_play_interval: day,
            animation_duration: day,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn easing_is_read_in_kebab_case() {
        let options: CarouselOptions =
            toml::from_str(r#"easing = "ease-in-out""#).unwrap();
        assert_eq!(options.easing, Easing::EaseInOut);
        assert_eq!(CarouselOptions::default().easing, Easing::EaseOut);
        assert!(toml::from_str::<CarouselOptions>(r#"easing = "bounce""#).is_err());

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["easing"], "ease-in-out");
    }
}
