//! Configuration for the `zoomit` command-line tool.
//!
//! Settings come from:
//! - Command-line arguments via clap
//! - Environment variables with `ZOOMIT_` prefix
//! - Defaults for everything but the content reference
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use zoomit::config::Cli;
//!
//! let cli = Cli::parse();
//! cli.validate()?;
//! println!("Querying {}", cli.api_path);
//! ```
//!
//! # Environment Variables
//!
//! - `ZOOMIT_API_PATH` - API root, must end with `/` (default: http://api.zoom.it/)
//! - `ZOOMIT_TIMEOUT` - Request timeout in seconds (default: 30)

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::api::{ApiBase, ContentReference, DEFAULT_API_PATH};
use crate::error::{ConfigError, ReferenceError};
use crate::transport::DEFAULT_TIMEOUT_SECS;

/// Upper bound on the request timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 600;

// =============================================================================
// CLI Arguments
// =============================================================================

/// zoomit - Query the Zoom.it deep-zoom API.
///
/// Fetches content, DZI or thumbnail info for an image and prints the
/// classified outcome as JSON.
#[derive(Parser, Debug, Clone)]
#[command(name = "zoomit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root of the web API. Must end with a slash.
    #[arg(long, default_value = DEFAULT_API_PATH, env = "ZOOMIT_API_PATH", global = true)]
    pub api_path: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "ZOOMIT_TIMEOUT", global = true)]
    pub timeout: u64,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Resource to query.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch content info (processing state, share URL, embed HTML).
    Content(ReferenceArgs),

    /// Fetch Deep Zoom descriptor info.
    Dzi(ReferenceArgs),

    /// Fetch thumbnail URLs.
    Thumbnail(ReferenceArgs),
}

/// Identifies the content to query. Exactly one of `--id` and `--url`.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ReferenceArgs {
    /// Content identifier assigned by the service.
    #[arg(long)]
    pub id: Option<String>,

    /// URL of the source image.
    #[arg(long)]
    pub url: Option<String>,
}

impl ReferenceArgs {
    /// Turn the flags into a content reference.
    pub fn reference(&self) -> Result<ContentReference, ReferenceError> {
        ContentReference::from_parts(self.id.clone(), self.url.clone())
    }
}

impl Command {
    /// The reference flags of whichever subcommand was given.
    pub fn reference_args(&self) -> &ReferenceArgs {
        match self {
            Command::Content(args) | Command::Dzi(args) | Command::Thumbnail(args) => args,
        }
    }
}

impl Cli {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.resolve().map(|_| ())
    }

    /// Validate the configuration and return the API root and content
    /// reference it names.
    pub fn resolve(&self) -> Result<(ApiBase, ContentReference), String> {
        let base = self.api_base().map_err(|e| e.to_string())?;

        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }
        if self.timeout > MAX_TIMEOUT_SECS {
            return Err(format!(
                "timeout must be at most {} seconds",
                MAX_TIMEOUT_SECS
            ));
        }

        let reference = self
            .command
            .reference_args()
            .reference()
            .map_err(|e| e.to_string())?;

        Ok((base, reference))
    }

    /// The validated API root.
    pub fn api_base(&self) -> Result<ApiBase, ConfigError> {
        ApiBase::new(self.api_path.as_str())
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

// =============================================================================
// Tests
// =============================================================================
