//! Directory-backed login.
//!
//! Credential storage is outside this service. Every directory member shares
//! one configured password, which is enough for demo deployments.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{LoginService, MemberDirectory};
use crate::domain::{Error, LoginCredentials, UserId};

#[derive(Clone)]
pub struct DirectoryLoginService<M> {
    directory: Arc<M>,
    shared_password: Zeroizing<String>,
}

impl<M> DirectoryLoginService<M> {
    pub fn new(directory: Arc<M>, shared_password: impl Into<String>) -> Self {
        Self {
            directory,
            shared_password: Zeroizing::new(shared_password.into()),
        }
    }
}

#[async_trait]
impl<M> LoginService for DirectoryLoginService<M>
where
    M: MemberDirectory,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let member = self.directory.find_by_username(credentials.username()).await?;
        match member {
            Some(member) if credentials.password() == self.shared_password.as_str() => {
                Ok(member.id().clone())
            }
            _ => {
                debug!(username = credentials.username(), "login rejected");
                Err(Error::unauthorized("invalid credentials"))
            }
        }
    }
}
