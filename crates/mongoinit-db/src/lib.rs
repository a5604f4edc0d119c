#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, Credential};
use mongodb::Client;
use mongoinit_core::{
    AdminBackend, NewUser, ProvisionError, RootCredentials, UserInfo, ADMIN_DATABASE,
};
use tracing::{debug, instrument};

pub mod errors;
pub mod users;

pub use crate::errors::{classify, classify_command, is_duplicate_user_code};

pub const DEFAULT_URI: &str = "mongodb://127.0.0.1:27017";
pub const DEFAULT_APP_NAME: &str = "mongoinit";

#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub uri: String,
    pub app_name: Option<String>,
    pub server_selection_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            app_name: Some(DEFAULT_APP_NAME.to_string()),
            server_selection_timeout: None,
            connect_timeout: None,
        }
    }
}

/// `AdminBackend` backed by the official MongoDB driver.
#[derive(Debug, Clone)]
pub struct MongoAdmin {
    options: ConnectOptions,
}

/// An authenticated client. Dropped through `AdminBackend::close`.
pub struct MongoSession {
    client: Client,
}

impl MongoAdmin {
    pub fn new(options: ConnectOptions) -> Self {
        Self { options }
    }

    async fn client_options(&self, root: &RootCredentials) -> Result<ClientOptions, ProvisionError> {
        let mut client_options = ClientOptions::parse(self.options.uri.as_str())
            .await
            .map_err(|err| classify(&err))?;
        client_options.credential = Some(
            Credential::builder()
                .username(root.username().to_string())
                .password(root.password().expose().to_string())
                .source(ADMIN_DATABASE.to_string())
                .build(),
        );
        if let Some(app_name) = self.options.app_name.clone() {
            client_options.app_name = Some(app_name);
        }
        if let Some(timeout) = self.options.server_selection_timeout {
            client_options.server_selection_timeout = Some(timeout);
        }
        if let Some(timeout) = self.options.connect_timeout {
            client_options.connect_timeout = Some(timeout);
        }
        Ok(client_options)
    }
}

#[async_trait]
impl AdminBackend for MongoAdmin {
    type Session = MongoSession;

    // The driver authenticates lazily; the ping forces the handshake so a bad
    // credential surfaces here rather than on createUser.
    #[instrument(level = "debug", skip_all, fields(root_username = %root.username()))]
    async fn authenticate(&self, root: &RootCredentials) -> Result<MongoSession, ProvisionError> {
        let client_options = self.client_options(root).await?;
        let client = Client::with_options(client_options).map_err(|err| classify(&err))?;
        client
            .database(ADMIN_DATABASE)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| classify(&err))?;
        debug!(event = "admin_ping_ok");
        Ok(MongoSession { client })
    }

    #[instrument(
        level = "debug",
        skip_all,
        fields(database = %user.database, username = %user.username)
    )]
    async fn create_user(&self, session: &MongoSession, user: &NewUser) -> Result<(), ProvisionError> {
        let command = users::create_user_command(user);
        match session
            .client
            .database(&user.database)
            .run_command(command)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => Err(users::create_user_error(classify(&err), user)),
        }
    }

    #[instrument(level = "debug", skip(self, session))]
    async fn find_user(
        &self,
        session: &MongoSession,
        database: &str,
        username: &str,
    ) -> Result<Option<UserInfo>, ProvisionError> {
        let reply = session
            .client
            .database(database)
            .run_command(users::users_info_command(database, username))
            .await
            .map_err(|err| classify(&err))?;
        users::parse_users_info(reply)
    }

    async fn close(&self, session: MongoSession) {
        session.client.shutdown().await;
        debug!(event = "session_closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_point_at_local_server() {
        let options = ConnectOptions::default();
        assert_eq!(options.uri, "mongodb://127.0.0.1:27017");
        assert_eq!(options.app_name.as_deref(), Some("mongoinit"));
        assert!(options.server_selection_timeout.is_none());
    }

    #[tokio::test]
    async fn malformed_uri_is_reported_before_connecting() {
        let admin = MongoAdmin::new(ConnectOptions {
            uri: "not-a-mongodb-uri".to_string(),
            ..ConnectOptions::default()
        });
        let root = RootCredentials::new("root", mongoinit_core::Secret::new("secret"))
            .expect("root");

        let err = match admin.authenticate(&root).await {
            Ok(_) => panic!("malformed uri accepted"),
            Err(err) => err,
        };

        assert_eq!(err.kind(), "driver_error");
    }
}
