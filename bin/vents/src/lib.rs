mod config;
pub use config::Config;

mod coordinator;
pub use coordinator::{Coordinator, CoordinatorListener, ListenerId};

mod error;
pub use error::Error;

mod group_vent;
pub use group_vent::GroupVent;

mod setup;
pub use setup::{setup_entry, unload_entry, Entry};

#[cfg(test)]
mod mock;

pub const DOMAIN: &str = "airtouch4";

pub type ErasedError = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
