use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationEntry {
    pub id: i32,
    pub job_id: i32,
    pub applicant_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub cover_letter: String,
    pub resume_url: Option<String>,
    pub applied_at: DateTime<Utc>,
}

/// Who is applying, denormalized onto the application row.
#[derive(Debug, Clone)]
pub struct Applicant {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub company: String,
}

/// An application with the job it was sent to, for the applicant's dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationWithJob {
    #[serde(flatten)]
    pub application: ApplicationEntry,
    pub job: JobSummary,
}

#[derive(FromRow)]
pub(crate) struct ApplicationJobRow {
    pub id: i32,
    pub job_id: i32,
    pub applicant_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub cover_letter: String,
    pub resume_url: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub job_title: String,
    pub job_description: String,
    pub job_company: String,
}

impl From<ApplicationJobRow> for ApplicationWithJob {
    fn from(row: ApplicationJobRow) -> Self {
        ApplicationWithJob {
            job: JobSummary {
                id: row.job_id,
                title: row.job_title,
                description: row.job_description,
                company: row.job_company,
            },
            application: ApplicationEntry {
                id: row.id,
                job_id: row.job_id,
                applicant_id: row.applicant_id,
                applicant_name: row.applicant_name,
                applicant_email: row.applicant_email,
                cover_letter: row.cover_letter,
                resume_url: row.resume_url,
                applied_at: row.applied_at,
            },
        }
    }
}
