pub mod credentials;
pub mod omnidim;
pub mod settings;

pub use credentials::{CredentialProvider, StaticKey};
pub use omnidim::{CallConfig, DifficultyLevel, OmniDimClient, OmniDimError};
pub use settings::ClientSettings;
