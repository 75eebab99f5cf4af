pub mod limits;
pub mod public_url;
pub mod server;

pub use limits::UploadLimits;
pub use public_url::{PublicUrlPolicy, RequestOrigin};
pub use server::{ConfigError, DeploymentMode, ServerConfig};
