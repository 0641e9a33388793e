mod cert;
mod client;
mod error;
pub mod uri;

pub use self::cert::{ClientConfigBuilder, ConfigBuilder};
pub use self::client::*;
pub use self::error::ClientError;
