mod controller;
pub use controller::Controller;

#[cfg(feature = "stub")]
pub use controller::StubController;

mod error;
pub use error::Error;

mod info;
pub use info::{Ac, Group, GroupDescriptor, Info};

pub type Result<T> = std::result::Result<T, Error>;
