use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    pkg::{
        internal::adaptors::{
            jobs::{selectors::JobSelector, spec::JobEntry},
            users::{
                mutators::UserMutator,
                selectors::UserSelector,
                spec::{AuthorRef, User},
            },
        },
        server::{
            extractors::JsonBody,
            state::{AppState, GetTxn},
        },
    },
    prelude::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub company: bool,
}

#[derive(Debug, Serialize)]
pub struct CompanyProfile {
    #[serde(flatten)]
    pub user: AuthorRef,
    pub jobs: Vec<JobEntry>,
}

pub async fn me(Extension(user): Extension<Arc<User>>) -> Json<User> {
    Json(user.as_ref().clone())
}

/// Setup: the client re-fetches `/me` afterwards instead of patching its own copy.
pub async fn setup(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    JsonBody(input): JsonBody<ProfileInput>,
) -> Result<Json<User>> {
    let input = ProfileInput {
        name: input.name.trim().to_string(),
        company: input.company,
    };
    input.validate()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let updated = UserMutator::new(&mut tx)
        .update_profile(&user.id, &input.name, input.company)
        .await?
        .ok_or_else(|| AppError::not_found(format!("user {} not found", &user.id)))?;
    tx.commit().await?;
    tracing::info!("user {} completed setup (company: {})", &updated.id, updated.company);
    Ok(Json(updated))
}

pub async fn profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CompanyProfile>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let user = UserSelector::new(&mut tx)
        .get_author(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("user {} not found", &id)))?;
    let jobs = JobSelector::new(&mut tx).get_published_by_author(&id).await?;
    Ok(Json(CompanyProfile { user, jobs }))
}
