//! Async client for the Bungie.net Platform API, focused on Destiny 2 PvP
//! stats.
//!
//! ```no_run
//! use crucible::{BungieClient, Client, Config};
//!
//! # async fn run() -> Result<(), crucible::Error> {
//! let client = BungieClient::new(Config::new("my-api-key"))?;
//! let players = client.search_destiny_player("Name#1234", Some("steam")).await?;
//! println!("{players:#}");
//! client.close();
//! # Ok(())
//! # }
//! ```

pub mod api_client;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod request;
pub mod throttle;
pub mod types;

pub use api_client::BungieClient;
pub use client::Client;
pub use config::Config;
pub use error::{ApiError, Error, ErrorDetails, ErrorKind};
pub use request::RequestSpec;
pub use types::{ActivityQuery, Platform, UserInfoCard};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
