//! # Session Module
//!
//! Who is signed in.
//!
//! The identity cache is a local convenience and never authoritative: a
//! missing or unreadable cache falls back to `/auth/me`, and logout clears it
//! whether or not the server call succeeded.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use devmatch_core::{LoginRequest, User};
use tracing::{debug, info, warn};

use crate::client::DevMatchClient;
use crate::error::Error;

/// Source of the current user's identity.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The signed-in user, or `None` when nobody is.
    async fn current_identity(&self) -> Result<Option<User>, Error>;

    /// Sign in and remember the resulting identity.
    async fn login(&self, credentials: &LoginRequest) -> Result<User, Error>;

    /// Forget the current identity.
    async fn logout(&self) -> Result<(), Error>;
}

// =============================================================================
// IDENTITY CACHE
// =============================================================================

/// A user record persisted as JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct IdentityCache {
    path: PathBuf,
}

impl IdentityCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached user.
    ///
    /// A missing file is `None`. A corrupt file is also `None`, with a warning.
    pub fn load(&self) -> Result<Option<User>, Error> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable identity cache");
                Ok(None)
            }
        }
    }

    pub fn store(&self, user: &User) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_vec_pretty(user)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), user = %user.id, "identity cached");
        Ok(())
    }

    /// Remove the cache file. Clearing an absent cache is not an error.
    pub fn clear(&self) -> Result<(), Error> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// CACHED SESSION
// =============================================================================

/// Session backed by the server, with a local identity cache in front.
#[derive(Debug, Clone)]
pub struct CachedSession {
    client: DevMatchClient,
    cache: IdentityCache,
}

impl CachedSession {
    pub fn new(client: DevMatchClient, cache: IdentityCache) -> Self {
        Self { client, cache }
    }

    pub fn client(&self) -> &DevMatchClient {
        &self.client
    }

    pub fn cache(&self) -> &IdentityCache {
        &self.cache
    }

    /// Record a known identity without contacting the server.
    pub fn remember(&self, user: &User) -> Result<(), Error> {
        self.cache.store(user)?;
        info!(user = %user.id, "identity stored locally");
        Ok(())
    }

    /// The signed-in user, or [`Error::Unauthenticated`].
    pub async fn require_identity(&self) -> Result<User, Error> {
        self.current_identity().await?.ok_or(Error::Unauthenticated)
    }
}

#[async_trait]
impl SessionProvider for CachedSession {
    async fn current_identity(&self) -> Result<Option<User>, Error> {
        if let Some(user) = self.cache.load()? {
            return Ok(Some(user));
        }
        let user = self.client.current_user().await?;
        if let Some(user) = &user {
            self.cache.store(user)?;
        }
        Ok(user)
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<User, Error> {
        let returned = self.client.login(credentials).await?;
        let user = match self.client.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => returned.ok_or(Error::Unauthenticated)?,
            Err(e) => {
                debug!(error = %e, "identity lookup after login failed");
                returned.ok_or(e)?
            }
        };
        self.cache.store(&user)?;
        info!(user = %user.id, "signed in");
        Ok(user)
    }

    async fn logout(&self) -> Result<(), Error> {
        if let Err(e) = self.client.logout().await {
            warn!(error = %e, "server logout failed; clearing local identity anyway");
        }
        self.cache.clear()?;
        info!("signed out");
        Ok(())
    }
}
