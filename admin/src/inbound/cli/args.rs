//! Command-line arguments for `user-admin`.

use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::config::AdminSettings;
use crate::domain::{FieldPath, FieldPathError};

/// Manage user records held by a remote user store.
#[derive(Debug, Parser)]
#[command(name = "user-admin", version, about)]
pub struct Cli {
    /// Root of the user store API (overrides USER_ADMIN_API_URL).
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
    /// Log output format: `text` or `json`.
    #[arg(long, global = true, value_name = "FORMAT")]
    pub log_format: Option<String>,
    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Apply flags given on the command line over loaded settings.
    pub fn merge_into(&self, settings: AdminSettings) -> AdminSettings {
        AdminSettings {
            api_url: self.api_url.clone().or(settings.api_url),
            timeout_secs: self.timeout_secs.unwrap_or(settings.timeout_secs),
            log_format: self.log_format.clone().or(settings.log_format),
        }
    }
}

/// Subcommands, one per view.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List every user with a summary line.
    List,
    /// Show one user in full.
    Show {
        /// User identifier.
        id: String,
    },
    /// Create a user from field assignments.
    Create {
        /// Field assignment such as `address.geo.lat=40.7`; repeatable.
        #[arg(long = "set", value_name = "PATH=VALUE")]
        assignments: Vec<Assignment>,
    },
    /// Load a user, apply field assignments and save it.
    Edit {
        /// User identifier.
        id: String,
        /// Field assignment such as `email=jane@example.com`; repeatable.
        #[arg(long = "set", value_name = "PATH=VALUE")]
        assignments: Vec<Assignment>,
    },
    /// Delete a user after confirmation.
    Delete {
        /// User identifier.
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Problems with a `--set` argument.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    /// No `=` separating path and value.
    #[error("expected PATH=VALUE, got `{0}`")]
    MissingSeparator(String),
    /// The path names no field.
    #[error(transparent)]
    Path(#[from] FieldPathError),
}

/// One `--set path=value` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Field to set.
    pub path: FieldPath,
    /// Raw value; may be empty and may itself contain `=`.
    pub value: String,
}

impl FromStr for Assignment {
    type Err = AssignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, value) = s
            .split_once('=')
            .ok_or_else(|| AssignmentError::MissingSeparator(s.to_owned()))?;
        Ok(Self {
            path: path.trim().parse()?,
            value: value.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AddressField, GeoField};
    use clap::CommandFactory;
    use rstest::rstest;

    #[rstest]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[rstest]
    fn parses_nested_assignments() {
        let cli = Cli::try_parse_from([
            "user-admin",
            "create",
            "--set",
            "name=Jane Doe",
            "--set",
            "address.geo.lat=40.7",
            "--set",
            "company=a=b",
        ])
        .expect("valid arguments");
        let Command::Create { assignments } = cli.command else {
            panic!("expected create");
        };
        assert_eq!(assignments.len(), 3);
        assert_eq!(
            assignments[1].path,
            FieldPath::Address(AddressField::Geo(GeoField::Lat))
        );
        assert_eq!(assignments[2].value, "a=b");
    }

    #[rstest]
    #[case("name")]
    #[case("address.country=US")]
    #[case("address.geo.lat.deg=1")]
    fn rejects_bad_assignments(#[case] raw: &str) {
        assert!(raw.parse::<Assignment>().is_err());
    }

    #[rstest]
    fn global_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "user-admin",
            "delete",
            "7",
            "--yes",
            "--api-url",
            "http://store.test/api",
        ])
        .expect("valid arguments");
        assert_eq!(
            cli.command,
            Command::Delete {
                id: "7".to_owned(),
                yes: true
            }
        );

        let merged = cli.merge_into(AdminSettings {
            api_url: Some("http://ignored.test".to_owned()),
            timeout_secs: 4,
            log_format: None,
        });
        assert_eq!(merged.api_url.as_deref(), Some("http://store.test/api"));
        assert_eq!(merged.timeout_secs, 4);
    }
}
