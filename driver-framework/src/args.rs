//! CLI argument parsing for drivers.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Common CLI arguments for all drivers.
#[derive(Parser, Debug, Clone)]
#[command(about = "Platform point driver")]
pub struct DriverArgs {
    /// Path to device configuration file.
    #[arg(short, long)]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: DriverCommand,
}

/// Operation to run against the configured device.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DriverCommand {
    /// Read a single point.
    Get {
        /// Point name.
        point: String,
    },
    /// Write a single point.
    Set {
        /// Point name.
        point: String,
        /// Value sent to the device.
        value: String,
    },
    /// Read every configured point.
    Scrape,
    /// List configured points.
    Points,
}

impl DriverArgs {
    /// Parse CLI arguments with a default config path.
    ///
    /// If no `--config` argument is provided, uses the default.
    pub fn parse_with_default(default_config: &'static str) -> Self {
        let matches = <Self as clap::CommandFactory>::command()
            .mut_arg("config", |arg| arg.default_value(default_config))
            .get_matches();

        <Self as clap::FromArgMatches>::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    /// Directory that relative paths in the config file are resolved against.
    pub fn config_dir(&self) -> PathBuf {
        self.config
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_command() {
        let args = DriverArgs::try_parse_from([
            "driver",
            "--config",
            "conf/device.json5",
            "--log-level",
            "debug",
            "set",
            "Temperature",
            "75",
        ])
        .unwrap();

        assert_eq!(args.config, PathBuf::from("conf/device.json5"));
        assert_eq!(args.log_level, Some("debug".to_string()));
        assert_eq!(
            args.command,
            DriverCommand::Set {
                point: "Temperature".to_string(),
                value: "75".to_string(),
            }
        );
        assert_eq!(args.config_dir(), PathBuf::from("conf"));
    }

    #[test]
    fn test_parse_points() {
        let args = DriverArgs::try_parse_from(["driver", "-c", "device.json5", "points"]).unwrap();
        assert_eq!(args.command, DriverCommand::Points);
        assert_eq!(args.config_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_revert_not_a_command() {
        // Revert state lives in one process; a one-shot CLI never has any.
        for args in [
            vec!["driver", "-c", "device.json5", "revert", "Temperature"],
            vec!["driver", "-c", "device.json5", "revert-all"],
        ] {
            assert!(DriverArgs::try_parse_from(args).is_err());
        }
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(DriverArgs::try_parse_from(["driver", "-c", "device.json5"]).is_err());
    }
}
