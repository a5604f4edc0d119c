#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod backend;
pub mod credentials;
pub mod error;
pub mod models;
pub mod provision;
pub mod secrets;
pub mod validate;

pub use crate::backend::*;
pub use crate::credentials::*;
pub use crate::error::*;
pub use crate::models::*;
pub use crate::provision::*;
pub use crate::secrets::*;
pub use crate::validate::*;

/// Database the root credentials are checked against.
pub const ADMIN_DATABASE: &str = "admin";
