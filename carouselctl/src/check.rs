//! `check-config`: show the effective options and where they came from

use std::io::Write;

use anyhow::Context;
use carousel_config::{ConfigLoad, ConfigSource, ConfigWarnings};
use carousel_core::CarouselOptions;
use serde::Serialize;

use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
struct Report<'a> {
    options: &'a CarouselOptions,
    settlement_window_ms: u128,
    warnings: &'a ConfigWarnings,
    source: &'a ConfigSource,
}

pub fn write_report<W: Write>(
    out: &mut W,
    format: OutputFormat,
    load: &ConfigLoad,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let report = Report {
                options: &load.options,
                settlement_window_ms: load
                    .options
                    .settlement_window()
                    .as_millis(),
                warnings: &load.warnings,
                source: &load.source,
            };
            serde_json::to_writer_pretty(&mut *out, &report)
                .context("failed to serialize report")?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            let source = &load.source;
            match &source.config_path {
                Some(path) => writeln!(out, "# config file: {}", path.display())?,
                None => writeln!(out, "# config file: none (defaults)")?,
            }
            if let Some(env_file) = &source.env_file {
                writeln!(out, "# env file: {}", env_file.display())?;
            }
            if !source.env_overrides.is_empty() {
                writeln!(
                    out,
                    "# environment overrides: {}",
                    source.env_overrides.join(", ")
                )?;
            }
            writeln!(
                out,
                "# settlement window: {}",
                humantime::format_duration(load.options.settlement_window())
            )?;

            let toml = toml::to_string(&load.options)
                .context("failed to render options as TOML")?;
            write!(out, "{toml}")?;

            for warning in load.warnings.iter() {
                writeln!(out, "warning: {}", warning.message)?;
                if let Some(hint) = &warning.hint {
                    writeln!(out, "  hint: {hint}")?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;

    fn load(options: CarouselOptions) -> ConfigLoad {
        let warnings = carousel_config::apply_guard_rails(&options).unwrap();
        ConfigLoad {
            options,
            warnings,
            source: ConfigSource {
                config_path: Some(PathBuf::from("carousel.toml")),
                env_file: None,
                env_overrides: vec!["loop"],
            },
        }
    }

    fn render(format: OutputFormat, load: &ConfigLoad) -> String {
        let mut out = Vec::new();
        write_report(&mut out, format, load).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_report_is_valid_toml_after_the_header() {
        let text = render(OutputFormat::Text, &load(CarouselOptions::default()));
        assert!(text.starts_with("# config file: carousel.toml\n"));
        assert!(text.contains("# environment overrides: loop\n"));
        assert!(text.contains("# settlement window: 650ms\n"));

        let parsed: CarouselOptions = toml::from_str(&text).unwrap();
        assert_eq!(parsed, CarouselOptions::default());
    }

    #[test]
    fn warnings_are_listed_with_hints() {
        let options = CarouselOptions {
            auto_play_interval: Duration::from_millis(400),
            ..CarouselOptions::default()
        };
        let text = render(OutputFormat::Text, &load(options));
        assert!(text.contains("warning: auto_play_interval (400ms)"));
        assert!(text.contains("  hint: "));
    }

    #[test]
    fn json_report_nests_options() {
        let json = render(OutputFormat::Json, &load(CarouselOptions::default()));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["options"]["loop"], true);
        assert_eq!(value["options"]["animation_duration"], "600ms");
        assert_eq!(value["settlement_window_ms"], 650);
        assert_eq!(value["source"]["env_overrides"][0], "loop");
        assert!(value["warnings"].as_array().unwrap().is_empty());
    }
}
