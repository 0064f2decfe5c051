//! Raw configuration sources: the TOML file and `CAROUSEL_*` variables

use std::time::Duration;

use carousel_core::{CarouselOptions, Easing};

use crate::loader::ConfigLoadError;

/// Keys accepted at the top level of a carousel TOML file.
pub const KNOWN_KEYS: &[&str] = &[
    "auto_play",
    "auto_play_interval",
    "loop",
    "show_dots",
    "show_arrows",
    "swipe_enabled",
    "keyboard_enabled",
    "pause_on_hover",
    "animation_duration",
    "settle_buffer",
    "swipe_threshold",
    "resize_debounce",
    "resume_after_interaction",
    "easing",
];

/// Variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "CAROUSEL_CONFIG";

/// Top-level keys in `table` that the engine does not know.
pub fn unknown_keys(table: &toml::Table) -> Vec<String> {
    table
        .keys()
        .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
        .cloned()
        .collect()
}

/// `CAROUSEL_*` overrides, each field set only when its variable is present.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnvOverrides {
    pub auto_play: Option<bool>,
    pub auto_play_interval: Option<Duration>,
    pub looping: Option<bool>,
    pub show_dots: Option<bool>,
    pub show_arrows: Option<bool>,
    pub swipe_enabled: Option<bool>,
    pub keyboard_enabled: Option<bool>,
    pub pause_on_hover: Option<bool>,
    pub animation_duration: Option<Duration>,
    pub settle_buffer: Option<Duration>,
    pub swipe_threshold: Option<f32>,
    pub resize_debounce: Option<Duration>,
    pub resume_after_interaction: Option<bool>,
    pub easing: Option<Easing>,
}

impl EnvOverrides {
    /// Read every override through `lookup`. Malformed values are errors
    /// rather than silently ignored.
    pub fn gather<F>(lookup: F) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |name: &'static str| parse_var(&lookup, name, parse_bool);
        let duration =
            |name: &'static str| parse_var(&lookup, name, parse_duration);

        Ok(Self {
            auto_play: flag("CAROUSEL_AUTO_PLAY")?,
            auto_play_interval: duration("CAROUSEL_AUTO_PLAY_INTERVAL")?,
            looping: flag("CAROUSEL_LOOP")?,
            show_dots: flag("CAROUSEL_SHOW_DOTS")?,
            show_arrows: flag("CAROUSEL_SHOW_ARROWS")?,
            swipe_enabled: flag("CAROUSEL_SWIPE_ENABLED")?,
            keyboard_enabled: flag("CAROUSEL_KEYBOARD_ENABLED")?,
            pause_on_hover: flag("CAROUSEL_PAUSE_ON_HOVER")?,
            animation_duration: duration("CAROUSEL_ANIMATION_DURATION")?,
            settle_buffer: duration("CAROUSEL_SETTLE_BUFFER")?,
            swipe_threshold: parse_var(
                &lookup,
                "CAROUSEL_SWIPE_THRESHOLD",
                parse_pixels,
            )?,
            resize_debounce: duration("CAROUSEL_RESIZE_DEBOUNCE")?,
            resume_after_interaction: flag(
                "CAROUSEL_RESUME_AFTER_INTERACTION",
            )?,
            easing: parse_var(&lookup, "CAROUSEL_EASING", |raw| {
                raw.parse::<Easing>()
            })?,
        })
    }

    /// Write the present overrides onto `options`. Returns the option names
    /// that were overridden.
    pub fn apply(&self, options: &mut CarouselOptions) -> Vec<&'static str> {
        let mut applied = Vec::new();
        macro_rules! overlay {
            ($field:ident, $name:literal) => {
                if let Some(value) = self.$field {
                    options.$field = value;
                    applied.push($name);
                }
            };
        }
        overlay!(auto_play, "auto_play");
        overlay!(auto_play_interval, "auto_play_interval");
        overlay!(looping, "loop");
        overlay!(show_dots, "show_dots");
        overlay!(show_arrows, "show_arrows");
        overlay!(swipe_enabled, "swipe_enabled");
        overlay!(keyboard_enabled, "keyboard_enabled");
        overlay!(pause_on_hover, "pause_on_hover");
        overlay!(animation_duration, "animation_duration");
        overlay!(settle_buffer, "settle_buffer");
        overlay!(swipe_threshold, "swipe_threshold");
        overlay!(resize_debounce, "resize_debounce");
        overlay!(resume_after_interaction, "resume_after_interaction");
        overlay!(easing, "easing");
        applied
    }
}

fn parse_var<F, T>(
    lookup: &F,
    name: &'static str,
    parse: fn(&str) -> Result<T, String>,
) -> Result<Option<T>, ConfigLoadError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    parse(raw.trim())
        .map(Some)
        .map_err(|reason| ConfigLoadError::InvalidEnv {
            var: name,
            value: raw,
            reason,
        })
}

pub(crate) fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected true/false, yes/no, on/off or 1/0".into()),
    }
}

/// Integer milliseconds or a humantime string.
pub(crate) fn parse_duration(raw: &str) -> Result<Duration, String> {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|err| err.to_string());
    }
    humantime::parse_duration(raw).map_err(|err| err.to_string())
}

fn parse_pixels(raw: &str) -> Result<f32, String> {
    raw.trim_end_matches("px")
        .parse::<f32>()
        .map_err(|err| err.to_string())
}
