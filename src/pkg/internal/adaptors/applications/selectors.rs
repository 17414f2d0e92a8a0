use sqlx::PgConnection;

use crate::pkg::internal::adaptors::applications::spec::{
    ApplicationEntry, ApplicationJobRow, ApplicationWithJob,
};
use crate::prelude::Result;

pub struct ApplicationSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ApplicationSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ApplicationSelector { pool }
    }

    pub async fn already_applied(&mut self, applicant_id: &str, job_id: i32) -> Result<bool> {
        let applied = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM applications WHERE applicant_id = $1 AND job_id = $2)",
        )
        .bind(applicant_id)
        .bind(job_id)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(applied)
    }

    pub async fn get_for_job(&mut self, job_id: i32) -> Result<Vec<ApplicationEntry>> {
        let rows = sqlx::query_as::<_, ApplicationEntry>(
            "SELECT id, job_id, applicant_id, applicant_name, applicant_email, cover_letter,
                    resume_url, applied_at
             FROM applications WHERE job_id = $1 ORDER BY applied_at DESC, id DESC",
        )
        .bind(job_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_for_jobs(&mut self, job_ids: &[i32]) -> Result<Vec<ApplicationEntry>> {
        if job_ids.is_empty() {
            return Ok(vec![]);
        }
        let rows = sqlx::query_as::<_, ApplicationEntry>(
            "SELECT id, job_id, applicant_id, applicant_name, applicant_email, cover_letter,
                    resume_url, applied_at
             FROM applications WHERE job_id = ANY($1) ORDER BY applied_at DESC, id DESC",
        )
        .bind(job_ids)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_applicant(&mut self, applicant_id: &str) -> Result<Vec<ApplicationWithJob>> {
        let rows = sqlx::query_as::<_, ApplicationJobRow>(
            "SELECT a.id, a.job_id, a.applicant_id, a.applicant_name, a.applicant_email,
                    a.cover_letter, a.resume_url, a.applied_at,
                    j.title AS job_title, j.description AS job_description, j.company AS job_company
             FROM applications a
             JOIN jobs j ON j.id = a.job_id
             WHERE a.applicant_id = $1
             ORDER BY a.applied_at DESC, a.id DESC",
        )
        .bind(applicant_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows.into_iter().map(ApplicationWithJob::from).collect())
    }
}
