//! Where the OmniDimension API key comes from.
//!
//! The client never looks up a key on its own; the caller picks a
//! [`CredentialProvider`] and the key is resolved once when the client is
//! built. The keyring provider stores the key in the OS's native secret
//! storage:
//! - Linux: kernel keyutils (cleared on logout/reboot)
//! - macOS: Keychain
//! - Windows: Credential Manager
//!
//! Never log the key value; use [`mask_key`] for display.

use keyring::Entry;

pub const DEFAULT_API_KEY_ENV: &str = "OMNIDIM_API_KEY";

const SERVICE_NAME: &str = "omnidim-interview";
const API_KEY_NAME: &str = "userOmnidimApiKey";

/// Source of an API key. Empty keys are reported as `None`.
pub trait CredentialProvider {
    fn api_key(&self) -> Option<String>;
}

fn non_empty(key: String) -> Option<String> {
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// A key supplied directly by the caller.
#[derive(Clone)]
pub struct StaticKey(String);

impl StaticKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl std::fmt::Debug for StaticKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticKey").field(&mask_key(&self.0)).finish()
    }
}

impl CredentialProvider for StaticKey {
    fn api_key(&self) -> Option<String> {
        non_empty(self.0.clone())
    }
}

/// Reads the key from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvKey {
    var: String,
}

impl EnvKey {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvKey {
    fn default() -> Self {
        Self::new(DEFAULT_API_KEY_ENV)
    }
}

impl CredentialProvider for EnvKey {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var).ok().and_then(non_empty)
    }
}

/// Key kept in the system keyring.
#[derive(Debug, Clone)]
pub struct KeyringKey {
    service: String,
    name: String,
}

impl Default for KeyringKey {
    fn default() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            name: API_KEY_NAME.to_string(),
        }
    }
}

impl KeyringKey {
    /// Keyring entry other than the default one.
    pub fn new(service: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            name: name.into(),
        }
    }

    fn entry(&self) -> Result<Entry, String> {
        Entry::new(&self.service, &self.name)
            .map_err(|e| format!("Failed to create keyring entry: {}", e))
    }

    /// Store the key in the system keyring.
    /// Pass None (or an empty key) to delete it.
    pub fn store(&self, key: Option<&str>) -> Result<(), String> {
        let entry = self.entry()?;

        match key {
            Some(k) if !k.is_empty() => {
                entry
                    .set_password(k)
                    .map_err(|e| format!("Failed to store API key: {}", e))?;
                // Log action without the key value
                log::info!("ApiKey: stored new OmniDimension API key");
            }
            _ => match entry.delete_credential() {
                Ok(()) => log::info!("ApiKey: deleted OmniDimension API key"),
                Err(keyring::Error::NoEntry) => {}
                Err(e) => return Err(format!("Failed to delete API key: {}", e)),
            },
        }

        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

impl CredentialProvider for KeyringKey {
    /// Errors are logged and reported as "no key".
    fn api_key(&self) -> Option<String> {
        let entry = match self.entry() {
            Ok(e) => e,
            Err(e) => {
                log::warn!("ApiKey: {}", e);
                return None;
            }
        };

        match entry.get_password() {
            Ok(key) => non_empty(key),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                log::warn!("ApiKey: failed to retrieve key: {}", e);
                None
            }
        }
    }
}

/// Tries each provider in order; the first key found wins.
#[derive(Default)]
pub struct ChainedProvider {
    providers: Vec<Box<dyn CredentialProvider + Send + Sync>>,
}

impl ChainedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: impl CredentialProvider + Send + Sync + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl CredentialProvider for ChainedProvider {
    fn api_key(&self) -> Option<String> {
        self.providers.iter().find_map(|p| p.api_key())
    }
}

/// Environment variable first, then the keyring.
pub fn default_provider(env_var: &str) -> ChainedProvider {
    ChainedProvider::new()
        .with(EnvKey::new(env_var))
        .with(KeyringKey::default())
}

/// Masked form of a key for display (e.g., "sk_...abc123").
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 6..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
