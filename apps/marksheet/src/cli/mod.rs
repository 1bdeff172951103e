//! # Marksheet CLI Module
//!
//! This module implements the CLI interface for Marksheet.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `status` - Show record count and backend
//! - `init` - Initialize new database
//! - `create` - Create a student from a JSON file
//! - `update-marks` - Replace the marks of a student
//! - `show` - Print one student record

mod commands;

use crate::config::{Backend, Config};
use clap::{Parser, Subcommand};
use marksheet_core::MarksheetError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Marksheet - student records server
///
/// Validates student records and derives total, average and pass/fail
/// from three subject marks.
#[derive(Parser, Debug)]
#[command(name = "marksheet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the record database (overrides the config file)
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Storage backend (overrides the config file)
    #[arg(short = 'B', long, global = true, value_enum)]
    pub backend: Option<Backend>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show record count and backend
    Status,

    /// Initialize a new empty database
    Init {
        /// Force initialization even if database exists
        #[arg(short, long)]
        force: bool,
    },

    /// Create a student record from a JSON file
    Create {
        /// Path to the JSON payload (same shape as `POST /students`)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Replace the marks of a student record
    UpdateMarks {
        /// Student id
        #[arg(long)]
        id: u64,

        #[arg(long, allow_negative_numbers = true)]
        marks1: Option<i64>,

        #[arg(long, allow_negative_numbers = true)]
        marks2: Option<i64>,

        #[arg(long, allow_negative_numbers = true)]
        marks3: Option<i64>,
    },

    /// Print one student record
    Show {
        /// Student id
        #[arg(long)]
        id: u64,
    },
}

impl Cli {
    /// Resolve the effective configuration: file and environment first,
    /// then the global flags on top.
    pub fn resolve_config(&self) -> Result<Config, MarksheetError> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(path) = &self.database {
            config.storage.path = path.clone();
        }
        if let Some(backend) = self.backend {
            config.storage.backend = backend;
        }
        Ok(config)
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), MarksheetError> {
    let mut config = cli.resolve_config()?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_server(&config).await
        }
        Some(Commands::Status) => cmd_status(&config, json_mode),
        Some(Commands::Init { force }) => cmd_init(&config, force),
        Some(Commands::Create { file }) => cmd_create(&config, json_mode, &file),
        Some(Commands::UpdateMarks {
            id,
            marks1,
            marks2,
            marks3,
        }) => cmd_update_marks(&config, json_mode, id, marks1, marks2, marks3),
        Some(Commands::Show { id }) => cmd_show(&config, json_mode, id),
        None => {
            // No subcommand - show status by default
            cmd_status(&config, json_mode)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "marksheet",
            "-B",
            "memory",
            "-D",
            "/tmp/other.redb",
            "status",
        ]);
        let config = cli.resolve_config().expect("config");

        assert_eq!(config.storage.backend, Backend::Memory);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/other.redb"));
    }

    #[test]
    fn update_marks_accepts_negative_values() {
        let cli = Cli::parse_from([
            "marksheet",
            "update-marks",
            "--id",
            "1",
            "--marks1",
            "-1",
            "--marks2",
            "50",
        ]);

        match cli.command {
            Some(Commands::UpdateMarks {
                id,
                marks1,
                marks2,
                marks3,
            }) => {
                assert_eq!(id, 1);
                assert_eq!(marks1, Some(-1));
                assert_eq!(marks2, Some(50));
                assert_eq!(marks3, None);
            }
            other => unreachable!("unexpected command: {:?}", other),
        }
    }
}
