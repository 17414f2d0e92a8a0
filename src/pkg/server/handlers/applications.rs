use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::{Validate, ValidationError};

use crate::{
    pkg::{
        internal::adaptors::{
            applications::{
                mutators::ApplicationMutator,
                selectors::ApplicationSelector,
                spec::{Applicant, ApplicationEntry},
            },
            jobs::selectors::JobSelector,
            users::spec::User,
        },
        server::{
            extractors::JsonBody,
            state::{AppState, GetTxn},
        },
    },
    prelude::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
pub struct ApplicationInput {
    #[serde(default, alias = "job")]
    #[validate(required(message = "job_id is required"))]
    pub job_id: Option<i32>,
    #[serde(default, alias = "coverLetter")]
    #[validate(length(min = 1, message = "cover letter is required"))]
    pub cover_letter: String,
    #[serde(default, alias = "resumeUrl")]
    #[validate(
        url(message = "resume url must be a valid url"),
        custom(function = "web_link")
    )]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub applicant_name: Option<String>,
    #[serde(default)]
    #[validate(email(message = "applicant email must be a valid email"))]
    pub applicant_email: Option<String>,
}

/// Resume links end up as `href`s on the company dashboard; only web links are kept.
fn web_link(url: &str) -> core::result::Result<(), ValidationError> {
    let scheme = url
        .trim_start()
        .split_once(':')
        .map(|(scheme, _)| scheme.to_ascii_lowercase());
    match scheme.as_deref() {
        Some("http") | Some("https") => Ok(()),
        _ => Err(ValidationError::new("web_link")
            .with_message("resume url must be an http or https link".into())),
    }
}

impl ApplicationInput {
    /// Name and email from the form, falling back to the session user.
    pub fn applicant(&self, user: &User) -> Result<Applicant> {
        let name = self
            .applicant_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .or(user.name.as_deref().filter(|n| !n.is_empty()))
            .ok_or_else(|| AppError::validation("applicant name is required"))?;
        let email = self
            .applicant_email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(user.email.as_str());
        if email.is_empty() {
            return Err(AppError::validation("applicant email is required"));
        }
        Ok(Applicant {
            id: user.id.clone(),
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    JsonBody(input): JsonBody<ApplicationInput>,
) -> Result<(StatusCode, Json<ApplicationEntry>)> {
    input.validate()?;
    let job_id = input
        .job_id
        .ok_or_else(|| AppError::validation("job_id is required"))?;
    let applicant = input.applicant(&user)?;

    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_by_id(job_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("job {} not found", job_id)))?;
    if job.author_id == user.id {
        return Err(AppError::forbidden("you cannot apply to a job you posted"));
    }
    let application = ApplicationMutator::new(&mut tx)
        .create(
            job_id,
            &applicant,
            &input.cover_letter,
            input.resume_url.as_deref(),
        )
        .await?;
    tx.commit().await?;
    tracing::info!("user {} applied to job {}", &user.id, job_id);
    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn check(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(job_id): Path<i32>,
) -> Result<Json<Value>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let applied = ApplicationSelector::new(&mut tx)
        .already_applied(&user.id, job_id)
        .await?;
    Ok(Json(json!({ "applied": applied })))
}
