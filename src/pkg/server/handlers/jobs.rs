use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgConnection;
use validator::Validate;

use crate::{
    pkg::{
        internal::adaptors::{
            applications::{selectors::ApplicationSelector, spec::ApplicationEntry},
            jobs::{
                mutators::JobMutator,
                selectors::JobSelector,
                spec::{JobEntry, JobWithAuthor, Visibility},
            },
            users::spec::User,
        },
        server::{
            extractors::JsonBody,
            state::{AppState, GetTxn},
        },
    },
    prelude::{AppError, Result},
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "company is required"))]
    pub company: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(default, alias = "salary")]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PatchJobInput {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "company cannot be empty"))]
    pub company: Option<String>,
    #[validate(length(min = 1, message = "location cannot be empty"))]
    pub location: Option<String>,
    #[validate(length(min = 1, message = "description cannot be empty"))]
    pub description: Option<String>,
    #[serde(alias = "salary")]
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
}

fn trim(value: String) -> String {
    value.trim().to_string()
}

fn trim_opt(value: Option<String>) -> Option<String> {
    value.map(trim)
}

impl CreateJobInput {
    /// Surrounding whitespace never counts as content; blank optional fields become `None`.
    pub fn trimmed(self) -> Self {
        CreateJobInput {
            title: trim(self.title),
            company: trim(self.company),
            location: trim(self.location),
            description: trim(self.description),
            salary_range: trim_opt(self.salary_range).filter(|v| !v.is_empty()),
            job_type: trim_opt(self.job_type).filter(|v| !v.is_empty()),
        }
    }
}

impl PatchJobInput {
    pub fn trimmed(self) -> Self {
        PatchJobInput {
            title: trim_opt(self.title),
            company: trim_opt(self.company),
            location: trim_opt(self.location),
            description: trim_opt(self.description),
            salary_range: trim_opt(self.salary_range),
            job_type: trim_opt(self.job_type),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub published: Option<bool>,
}

/// Loads a job and checks `user` wrote it.
async fn owned_job(conn: &mut PgConnection, id: i32, user: &User) -> Result<JobEntry> {
    let job = JobSelector::new(conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("job {} not found", id)))?;
    if job.author_id != user.id {
        tracing::warn!("user {} tried to manage job {} owned by {}", &user.id, id, &job.author_id);
        return Err(AppError::forbidden("only the author can manage this job"));
    }
    Ok(job)
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<JobEntry>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let jobs = JobSelector::new(&mut tx).get_all(query.published).await?;
    Ok(Json(jobs))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<JobWithAuthor>> {
    let mut tx = state.db_pool.begin_txn().await?;
    match JobSelector::new(&mut tx).get_with_author(id).await? {
        Some(job) => Ok(Json(job)),
        None => Err(AppError::not_found(format!("job {} not found", id))),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    JsonBody(input): JsonBody<CreateJobInput>,
) -> Result<(StatusCode, Json<JobEntry>)> {
    let input = input.trimmed();
    input.validate()?;
    if !user.company {
        return Err(AppError::forbidden("only company accounts can post jobs"));
    }
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx).create(&input, &user.id).await?;
    tx.commit().await?;
    tracing::info!("user {} posted job {}", &user.id, job.id);
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<i32>,
    JsonBody(input): JsonBody<PatchJobInput>,
) -> Result<Json<JobEntry>> {
    let input = input.trimmed();
    input.validate()?;
    let mut tx = state.db_pool.begin_txn().await?;
    owned_job(&mut tx, id, &user).await?;
    let job = JobMutator::new(&mut tx)
        .update(id, input)
        .await?
        .ok_or_else(|| AppError::not_found(format!("job {} not found", id)))?;
    tx.commit().await?;
    Ok(Json(job))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let mut tx = state.db_pool.begin_txn().await?;
    owned_job(&mut tx, id, &user).await?;
    if !JobMutator::new(&mut tx).delete(id).await? {
        return Err(AppError::not_found(format!("job {} not found", id)));
    }
    tx.commit().await?;
    tracing::info!("user {} deleted job {}", &user.id, id);
    Ok(Json(json!({ "message": "Job deleted successfully" })))
}

async fn set_visibility(
    state: &AppState,
    user: &User,
    id: i32,
    visibility: Visibility,
) -> Result<Json<JobEntry>> {
    let mut tx = state.db_pool.begin_txn().await?;
    owned_job(&mut tx, id, user).await?;
    let job = JobMutator::new(&mut tx)
        .set_visibility(id, visibility)
        .await?
        .ok_or_else(|| AppError::not_found(format!("job {} not found", id)))?;
    tx.commit().await?;
    tracing::debug!("job {} is now {:?}", id, visibility);
    Ok(Json(job))
}

pub async fn publish(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<i32>,
) -> Result<Json<JobEntry>> {
    set_visibility(&state, &user, id, Visibility::Published).await
}

pub async fn unpublish(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<i32>,
) -> Result<Json<JobEntry>> {
    set_visibility(&state, &user, id, Visibility::Unpublished).await
}

pub async fn applications(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ApplicationEntry>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    owned_job(&mut tx, id, &user).await?;
    let applications = ApplicationSelector::new(&mut tx).get_for_job(id).await?;
    Ok(Json(applications))
}
