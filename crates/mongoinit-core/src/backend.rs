use async_trait::async_trait;

use crate::credentials::RootCredentials;
use crate::error::ProvisionError;
use crate::models::{NewUser, UserInfo};

/// Administrative interface of a database deployment.
///
/// `authenticate` yields a session that carries the root identity; every
/// other call runs under that session. Sessions are single use and handed
/// back through `close` once the caller is done.
#[async_trait]
pub trait AdminBackend: Send + Sync {
    type Session: Send + Sync;

    async fn authenticate(&self, root: &RootCredentials) -> Result<Self::Session, ProvisionError>;

    async fn create_user(
        &self,
        session: &Self::Session,
        user: &NewUser,
    ) -> Result<(), ProvisionError>;

    async fn find_user(
        &self,
        session: &Self::Session,
        database: &str,
        username: &str,
    ) -> Result<Option<UserInfo>, ProvisionError>;

    async fn close(&self, session: Self::Session);
}
