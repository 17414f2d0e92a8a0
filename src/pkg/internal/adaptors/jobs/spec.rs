use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pkg::internal::adaptors::{
    applications::spec::ApplicationEntry, users::spec::AuthorRef,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobEntry {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    pub published: bool,
    pub author_id: String,
    pub posted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobWithAuthor {
    #[serde(flatten)]
    pub job: JobEntry,
    pub author: AuthorRef,
}

/// A job as its author sees it on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct PostedJob {
    #[serde(flatten)]
    pub job: JobEntry,
    pub applications: Vec<ApplicationEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Published,
    Unpublished,
}

impl Visibility {
    pub fn is_published(self) -> bool {
        matches!(self, Visibility::Published)
    }
}
