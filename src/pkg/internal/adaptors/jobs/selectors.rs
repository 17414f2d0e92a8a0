use std::collections::HashMap;

use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::{
        applications::selectors::ApplicationSelector,
        jobs::spec::{JobEntry, JobWithAuthor, PostedJob},
        users::selectors::UserSelector,
    },
    prelude::Result,
};

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, description, company, location, salary_range, job_type, published,
                    author_id, posted_at, updated_at
             FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_with_author(&mut self, id: i32) -> Result<Option<JobWithAuthor>> {
        let Some(job) = self.get_by_id(id).await? else {
            return Ok(None);
        };
        let author = UserSelector::new(&mut *self.pool)
            .get_author(&job.author_id)
            .await?;
        Ok(author.map(|author| JobWithAuthor { job, author }))
    }

    /// Newest first. `None` lists every job regardless of its published flag.
    pub async fn get_all(&mut self, published: Option<bool>) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, description, company, location, salary_range, job_type, published,
                    author_id, posted_at, updated_at
             FROM jobs
             WHERE ($1::BOOLEAN IS NULL OR published = $1)
             ORDER BY posted_at DESC, id DESC",
        )
        .bind(published)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_author(&mut self, author_id: &str) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, description, company, location, salary_range, job_type, published,
                    author_id, posted_at, updated_at
             FROM jobs WHERE author_id = $1 ORDER BY posted_at DESC, id DESC",
        )
        .bind(author_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_published_by_author(&mut self, author_id: &str) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, description, company, location, salary_range, job_type, published,
                    author_id, posted_at, updated_at
             FROM jobs WHERE author_id = $1 AND published
             ORDER BY posted_at DESC, id DESC",
        )
        .bind(author_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    /// Jobs posted by `author_id`, each carrying the applications it received.
    pub async fn get_posted_with_applications(&mut self, author_id: &str) -> Result<Vec<PostedJob>> {
        let jobs = self.get_by_author(author_id).await?;
        let ids: Vec<i32> = jobs.iter().map(|j| j.id).collect();
        let mut by_job: HashMap<i32, Vec<_>> = HashMap::new();
        for application in ApplicationSelector::new(&mut *self.pool)
            .get_for_jobs(&ids)
            .await?
        {
            by_job.entry(application.job_id).or_default().push(application);
        }
        Ok(jobs
            .into_iter()
            .map(|job| PostedJob {
                applications: by_job.remove(&job.id).unwrap_or_default(),
                job,
            })
            .collect())
    }
}
