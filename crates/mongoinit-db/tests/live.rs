#![cfg(feature = "mongo-tests")]

use std::env;
use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, Credential};
use mongodb::Client;
use mongoinit_core::{
    check, provision, AdminBackend, NewUser, ProvisionError, ProvisionRequest, ProvisionStatus,
    Role, RootCredentials, Secret, ADMIN_DATABASE,
};
use mongoinit_db::{ConnectOptions, MongoAdmin};
use uuid::Uuid;

fn setup_admin() -> MongoAdmin {
    let uri =
        env::var("TEST_MONGODB_URI").expect("TEST_MONGODB_URI must be set for MongoDB tests");
    MongoAdmin::new(ConnectOptions {
        uri,
        server_selection_timeout: Some(Duration::from_secs(5)),
        ..ConnectOptions::default()
    })
}

fn root_credentials(password_override: Option<&str>) -> RootCredentials {
    let username = env::var("TEST_MONGODB_ROOT_USERNAME").unwrap_or_else(|_| "root".to_string());
    let password = match password_override {
        Some(value) => value.to_string(),
        None => env::var("TEST_MONGODB_ROOT_PASSWORD").unwrap_or_else(|_| "secret".to_string()),
    };
    RootCredentials::new(&username, Secret::new(password)).expect("root credentials")
}

fn unique_database() -> String {
    format!("mongoinit_test_{}", Uuid::now_v7().simple())
}

/// Removes the users defined on `database`, then the database itself.
async fn drop_test_database(database: &str) {
    let uri =
        env::var("TEST_MONGODB_URI").expect("TEST_MONGODB_URI must be set for MongoDB tests");
    let root = root_credentials(None);
    let mut options = ClientOptions::parse(uri.as_str()).await.expect("client options");
    options.credential = Some(
        Credential::builder()
            .username(root.username().to_string())
            .password(root.password().expose().to_string())
            .source(ADMIN_DATABASE.to_string())
            .build(),
    );
    let client = Client::with_options(options).expect("client");
    let db = client.database(database);
    db.run_command(doc! { "dropAllUsersFromDatabase": 1 })
        .await
        .expect("drop users");
    db.drop().await.expect("drop database");
    client.shutdown().await;
}

fn request(database: &str, skip_existing: bool) -> ProvisionRequest {
    ProvisionRequest {
        root: root_credentials(None),
        user: NewUser::read_write("app", Secret::new("apppw"), database).expect("user"),
        skip_existing,
    }
}

#[tokio::test]
async fn valid_root_credentials_authenticate() {
    let admin = setup_admin();
    let session = admin
        .authenticate(&root_credentials(None))
        .await
        .expect("authenticate");
    admin.close(session).await;
}

#[tokio::test]
async fn invalid_root_credentials_are_rejected() {
    let admin = setup_admin();
    let database = unique_database();
    let request = ProvisionRequest {
        root: root_credentials(Some("definitely-wrong")),
        ..request(&database, false)
    };

    let err = provision(&admin, &request).await.expect_err("bad password");

    assert!(matches!(err, ProvisionError::AuthenticationFailed { .. }));
    let found = check(&admin, &root_credentials(None), &database, "app")
        .await
        .expect("check");
    assert!(found.is_none());

    drop_test_database(&database).await;
}

#[tokio::test]
async fn end_to_end_creates_read_write_user() {
    let admin = setup_admin();
    let database = unique_database();

    let outcome = provision(&admin, &request(&database, false))
        .await
        .expect("provision");
    assert_eq!(outcome.status, ProvisionStatus::Created);

    let info = check(&admin, &root_credentials(None), &database, "app")
        .await
        .expect("check")
        .expect("user exists");
    assert!(info.has_exactly(Role::ReadWrite, &database));

    drop_test_database(&database).await;
}

#[tokio::test]
async fn second_run_reports_duplicate_user() {
    let admin = setup_admin();
    let database = unique_database();
    provision(&admin, &request(&database, false))
        .await
        .expect("first run");

    let err = provision(&admin, &request(&database, false))
        .await
        .expect_err("second run");
    assert!(matches!(err, ProvisionError::UserExists { .. }));

    let outcome = provision(&admin, &request(&database, true))
        .await
        .expect("skip existing");
    assert_eq!(outcome.status, ProvisionStatus::AlreadyExists);

    drop_test_database(&database).await;
}
