//! Argument parsing into an explicit capture configuration.
//!
//! Every parameter is optional; anything left out falls back to the
//! defaults, so a bare `screenshot` invocation captures the app-runner home
//! page into `output.png`.

use std::path::PathBuf;
use std::time::Duration;

use homeui_engine::{CaptureConfig, DEFAULT_OUTPUT_PATH, DEFAULT_TARGET_URL};

use crate::logging::LogDestination;

pub const USAGE: &str = "\
Usage: screenshot [--url <url>] [--output <path>] [--silent] [--settle-ms <n>] [--log-file]

  --url <url>       page to capture (default: http://localhost:8081/app-runner-home/)
  --output <path>   image file to write (default: output.png)
  --silent          skip the 404 check, wait 10s, log nothing
  --settle-ms <n>   override the settle delay in milliseconds
  --log-file        also write logs to ./screenshot.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub capture: CaptureConfig,
    pub log_destination: LogDestination,
}

pub fn parse<I>(args: I) -> Result<CliConfig, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut url: Option<String> = None;
    let mut output: Option<String> = None;
    let mut silent = false;
    let mut settle_ms: Option<u64> = None;
    let mut log_file = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => url = Some(expect_value(&mut args, "--url")?),
            "--output" => output = Some(expect_value(&mut args, "--output")?),
            "--silent" => silent = true,
            "--settle-ms" => {
                let raw = expect_value(&mut args, "--settle-ms")?;
                let parsed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--settle-ms expects a number, got '{raw}'"))?;
                settle_ms = Some(parsed);
            }
            "--log-file" => log_file = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    let url = url.unwrap_or_else(|| DEFAULT_TARGET_URL.to_string());
    let output = PathBuf::from(output.unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()));
    let mut capture = if silent {
        CaptureConfig::silent(url, output)
    } else {
        CaptureConfig::logged(url, output)
    };
    if let Some(ms) = settle_ms {
        capture.settle_delay = Duration::from_millis(ms);
    }

    let log_destination = if log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    };

    Ok(CliConfig {
        capture,
        log_destination,
    })
}

fn expect_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{flag} expects a value"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Result<CliConfig, String> {
        parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_uses_the_defaults() {
        let config = parse_args(&[]).unwrap();
        assert_eq!(config.capture.target_url, DEFAULT_TARGET_URL);
        assert_eq!(config.capture.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert!(config.capture.check_not_found);
        assert_eq!(config.capture.settle_delay, Duration::from_secs(5));
        assert_eq!(config.log_destination, LogDestination::Terminal);
    }

    #[test]
    fn explicit_url_and_output() {
        let config =
            parse_args(&["--url", "http://host:9000/page", "--output", "shots/a.png"]).unwrap();
        assert_eq!(config.capture.target_url, "http://host:9000/page");
        assert_eq!(config.capture.output_path, PathBuf::from("shots/a.png"));
    }

    #[test]
    fn silent_selects_the_always_capture_variant() {
        let config = parse_args(&["--silent"]).unwrap();
        assert!(!config.capture.check_not_found);
        assert!(!config.capture.verbose);
        assert_eq!(config.capture.settle_delay, Duration::from_secs(10));
    }

    #[test]
    fn settle_override_applies_to_either_variant() {
        let config = parse_args(&["--silent", "--settle-ms", "1500"]).unwrap();
        assert_eq!(config.capture.settle_delay, Duration::from_millis(1500));
    }

    #[test]
    fn log_file_enables_the_combined_destination() {
        let config = parse_args(&["--log-file"]).unwrap();
        assert_eq!(config.log_destination, LogDestination::Both);
    }

    #[test]
    fn unknown_argument_is_reported() {
        let err = parse_args(&["--pizza"]).unwrap_err();
        assert!(err.contains("--pizza"));
    }

    #[test]
    fn missing_value_is_reported() {
        let err = parse_args(&["--url"]).unwrap_err();
        assert!(err.contains("--url"));
    }

    #[test]
    fn non_numeric_settle_is_reported() {
        let err = parse_args(&["--settle-ms", "soon"]).unwrap_err();
        assert!(err.contains("soon"));
    }
}
