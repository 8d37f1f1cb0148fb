//! Documentation-site Q&A client (config, search/notify wire format, answer panel).
//! Used by the `docs-qa` binary.

pub mod client;
pub mod config;
pub mod messages;
pub mod panel;

pub use client::{ClientError, SearchClient};
pub use config::{default_config_path, Config, ConfigError, NotifySection, SearchSection};
pub use messages::{Answer, Notification};
pub use panel::{ChatPanel, Exchange, ExchangeId, Reply, CONNECTION_ERROR_MESSAGE};
