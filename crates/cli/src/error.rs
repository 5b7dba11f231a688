//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: sampler error (bad dimensions, bad config)
//! - 11: I/O error (script read, snapshot write)
//! - 12: input error (bad `--config` JSON, malformed input script)
//! - 13: serialization error

use langevin_core::SamplerError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    Sampler(SamplerError),
    Io(String),
    Input(String),
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Sampler(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Sampler(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<SamplerError> for CliError {
    fn from(e: SamplerError) -> Self {
        match e {
            SamplerError::Io(msg) => CliError::Io(msg),
            other => CliError::Sampler(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampler_error_exit_code_is_10() {
        let err = CliError::from(SamplerError::InvalidDimensions {
            width: 0,
            height: 0,
        });
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn from_sampler_io_routes_to_cli_io() {
        let cli_err = CliError::from(SamplerError::Io("disk full".into()));
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("disk full"));
    }

    #[test]
    fn input_error_exit_code_is_12() {
        assert_eq!(CliError::Input("bad script".into()).exit_code(), 12);
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }

    #[test]
    fn from_std_io_error_routes_to_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "script.json");
        let cli_err = CliError::from(io);
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("script.json"));
    }
}
