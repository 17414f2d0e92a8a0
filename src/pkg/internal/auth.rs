//! Session identity handed over by the identity provider in front of the service.
//!
//! The provider authenticates the browser and forwards the signed-in user as
//! `x-user-id`, `x-user-email` and optionally `x-user-name`. Nothing here checks
//! credentials; the user row is created on first sight.

use axum::http::HeaderMap;
use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::users::{mutators::UserMutator, spec::User},
    prelude::Result,
};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_NAME_HEADER: &str = "x-user-name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl Identity {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        Some(Identity {
            id: read(USER_ID_HEADER)?,
            email: read(USER_EMAIL_HEADER)?,
            name: read(USER_NAME_HEADER),
        })
    }

    /// Stored user for this identity, created on first sign-in.
    pub async fn resolve(&self, conn: &mut PgConnection) -> Result<User> {
        UserMutator::new(conn).ensure(self).await
    }
}
