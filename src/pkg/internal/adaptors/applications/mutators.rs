use sqlx::PgConnection;

use crate::pkg::internal::adaptors::applications::{
    selectors::ApplicationSelector,
    spec::{Applicant, ApplicationEntry},
};
use crate::prelude::{AppError, Result};

pub struct ApplicationMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ApplicationMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ApplicationMutator { pool }
    }

    /// One application per (applicant, job). The existence check answers early;
    /// the unique constraint settles concurrent submissions.
    pub async fn create(
        &mut self,
        job_id: i32,
        applicant: &Applicant,
        cover_letter: &str,
        resume_url: Option<&str>,
    ) -> Result<ApplicationEntry> {
        if ApplicationSelector::new(&mut *self.pool)
            .already_applied(&applicant.id, job_id)
            .await?
        {
            return Err(already_applied(job_id));
        }
        let row = sqlx::query_as::<_, ApplicationEntry>(
            r#"
            INSERT INTO applications (job_id, applicant_id, applicant_name, applicant_email, cover_letter, resume_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, job_id, applicant_id, applicant_name, applicant_email, cover_letter,
                      resume_url, applied_at
            "#,
        )
        .bind(job_id)
        .bind(&applicant.id)
        .bind(&applicant.name)
        .bind(&applicant.email)
        .bind(cover_letter)
        .bind(resume_url)
        .fetch_one(&mut *self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => already_applied(job_id),
            AppError::NotFound(_) => AppError::not_found(format!("job {} not found", job_id)),
            other => other,
        })?;
        Ok(row)
    }
}

fn already_applied(job_id: i32) -> AppError {
    AppError::conflict(format!("already applied to job {}", job_id))
}
