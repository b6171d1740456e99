//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::{api::commands::parse_size, overlay::Size};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-overlay")]
#[command(about = "A countdown timer overlay composited over an embedded video")]
#[command(version)]
pub struct Config {
    /// Countdown duration in seconds
    #[arg(short, long, default_value = "120")]
    pub duration: i64,

    /// Video URL to load at startup
    #[arg(short, long)]
    pub url: Option<String>,

    /// Container size the overlay is composited over, as WxH
    #[arg(short, long, default_value = "800x450")]
    pub container: String,

    /// Fullscreen exit chrome auto-hide delay in milliseconds
    #[arg(long, default_value = "3000")]
    pub hide_delay_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the container size
    pub fn container_size(&self) -> Result<Size, String> {
        parse_size(&self.container).map_err(|e| format!("Invalid --container value: {}", e))
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_preview_surface() {
        let config = Config::try_parse_from(["countdown-overlay"]).expect("defaults parse");
        assert_eq!(config.duration, 120);
        assert_eq!(config.container_size(), Ok(Size::new(800.0, 450.0)));
        assert_eq!(config.hide_delay(), Duration::from_secs(3));
        assert_eq!(config.log_level(), "info");
        assert!(config.url.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "countdown-overlay",
            "--duration",
            "90",
            "--url",
            "https://youtu.be/dQw4w9WgXcQ",
            "--container",
            "1280x720",
            "--hide-delay-ms",
            "500",
            "-v",
        ])
        .expect("flags parse");
        assert_eq!(config.duration, 90);
        assert_eq!(config.container_size(), Ok(Size::new(1280.0, 720.0)));
        assert_eq!(config.hide_delay(), Duration::from_millis(500));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn bad_container_is_reported() {
        let config = Config::try_parse_from(["countdown-overlay", "--container", "wide"]).expect("flags parse");
        assert!(config.container_size().is_err());
    }
}
