//! Driving port for login.
//!
//! Inbound adapters call it to turn credentials into a [`UserId`] without
//! knowing how credentials are checked.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated member id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
