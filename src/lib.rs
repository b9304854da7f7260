//! cligpt - turn natural language into shell commands.
//!
//! The tool sends a task description to a chat-completion API, shows the
//! suggested command together with a brief explanation, and executes it under
//! the platform's default shell once the user confirms, relaying the child's
//! stdout and stderr line by line while it runs.
//!
//! # Architecture
//!
//! - [`config`] - Configuration management (API key, model parameters)
//! - [`error`] - Error taxonomy shared across modules
//! - [`shell`] - Platform default-shell resolution
//! - [`http_client`] - HTTP client abstraction
//! - [`completion`] - Prompt templates and completion API calls
//! - [`executor`] - Streaming child-process execution
//! - [`app`] - Entry-point flows (interactive, complete-only, explain-only)
//! - [`providers`] - Shared dependency injection traits
//!
//! # Example
//!
//! ```ignore
//! use cligpt::{app::App, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let app = App::new(&config)?;
//!     app.run_interactive("list files in current directory").await
//! }
//! ```

pub mod app;
pub mod completion;
pub mod config;
pub mod error;
pub mod executor;
pub mod http_client;
pub mod providers;
pub mod shell;
