use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, Visibility};
use crate::pkg::server::handlers::jobs::{CreateJobInput, PatchJobInput};
use crate::prelude::Result;

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, job: &CreateJobInput, author_id: &str) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO jobs (title, description, company, location, salary_range, job_type, author_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, company, location, salary_range, job_type, published,
                      author_id, posted_at, updated_at
            "#,
        )
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.salary_range)
        .bind(&job.job_type)
        .bind(author_id)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Only the fields present in `job` are written; column names are fixed, values are bound.
    pub async fn update(&mut self, id: i32, job: PatchJobInput) -> Result<Option<JobEntry>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE jobs SET updated_at = CURRENT_TIMESTAMP");

        if let Some(title) = job.title {
            qb.push(", title = ").push_bind(title);
        }
        if let Some(description) = job.description {
            qb.push(", description = ").push_bind(description);
        }
        if let Some(company) = job.company {
            qb.push(", company = ").push_bind(company);
        }
        if let Some(location) = job.location {
            qb.push(", location = ").push_bind(location);
        }
        if let Some(salary_range) = job.salary_range {
            qb.push(", salary_range = ").push_bind(salary_range);
        }
        if let Some(job_type) = job.job_type {
            qb.push(", job_type = ").push_bind(job_type);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(
            " RETURNING id, title, description, company, location, salary_range, job_type, published,
                        author_id, posted_at, updated_at",
        );
        let row = qb
            .build_query_as::<JobEntry>()
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row)
    }

    pub async fn set_visibility(&mut self, id: i32, visibility: Visibility) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            UPDATE jobs SET published = $2, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, title, description, company, location, salary_range, job_type, published,
                      author_id, posted_at, updated_at
            "#,
        )
        .bind(id)
        .bind(visibility.is_published())
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Applications of the job go with it (`ON DELETE CASCADE`).
    pub async fn delete(&mut self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;
    use uuid::Uuid;

    use super::*;
    use crate::pkg::{
        internal::{
            adaptors::{
                applications::{
                    mutators::ApplicationMutator, selectors::ApplicationSelector, spec::Applicant,
                },
                jobs::selectors::JobSelector,
                users::{mutators::UserMutator, spec::User},
            },
            auth::Identity,
        },
        server::state::{test_state, GetTxn},
    };

    async fn user(conn: &mut PgConnection, company: bool) -> Result<User> {
        let id = Uuid::new_v4().to_string();
        let identity = Identity {
            email: format!("{}@example.com", &id),
            name: None,
            id,
        };
        UserMutator::new(&mut *conn).ensure(&identity).await?;
        Ok(UserMutator::new(&mut *conn)
            .update_profile(&identity.id, "tester", company)
            .await?
            .expect("user exists"))
    }

    fn backend_engineer() -> CreateJobInput {
        CreateJobInput {
            title: "Backend Engineer".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            description: "Build and run the job board API.".into(),
            salary_range: Some("100k-120k".into()),
            job_type: Some("Full-time".into()),
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn test_create_then_fetch() -> Result<()> {
        let Some(state) = test_state().await? else {
            return Ok(());
        };
        let mut tx = state.db_pool.begin_txn().await?;
        let author = user(&mut tx, true).await?;
        let input = backend_engineer();
        let created = JobMutator::new(&mut tx).create(&input, &author.id).await?;
        assert!(!created.published);

        let fetched = JobSelector::new(&mut tx)
            .get_with_author(created.id)
            .await?
            .expect("job exists");
        assert_eq!(fetched.job.id, created.id);
        assert_eq!(fetched.job.title, input.title);
        assert_eq!(fetched.job.company, input.company);
        assert_eq!(fetched.job.location, input.location);
        assert_eq!(fetched.job.description, input.description);
        assert_eq!(fetched.job.salary_range, input.salary_range);
        assert_eq!(fetched.job.job_type, input.job_type);
        assert_eq!(fetched.job.posted_at, created.posted_at);
        assert_eq!(fetched.author.id, author.id);
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_partial_update_keeps_other_fields() -> Result<()> {
        let Some(state) = test_state().await? else {
            return Ok(());
        };
        let mut tx = state.db_pool.begin_txn().await?;
        let author = user(&mut tx, true).await?;
        let created = JobMutator::new(&mut tx)
            .create(&backend_engineer(), &author.id)
            .await?;
        let patch = PatchJobInput {
            location: Some("Berlin".into()),
            ..Default::default()
        };
        let updated = JobMutator::new(&mut tx)
            .update(created.id, patch)
            .await?
            .expect("job exists");
        assert_eq!(updated.location, "Berlin");
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.salary_range, created.salary_range);

        let missing = JobMutator::new(&mut tx)
            .update(i32::MAX, PatchJobInput::default())
            .await?;
        assert!(missing.is_none());
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_visibility_toggle_is_idempotent() -> Result<()> {
        let Some(state) = test_state().await? else {
            return Ok(());
        };
        let mut tx = state.db_pool.begin_txn().await?;
        let author = user(&mut tx, true).await?;
        let job = JobMutator::new(&mut tx)
            .create(&backend_engineer(), &author.id)
            .await?;

        for _ in 0..2 {
            let j = JobMutator::new(&mut tx)
                .set_visibility(job.id, Visibility::Published)
                .await?
                .expect("job exists");
            assert!(j.published);
        }
        for _ in 0..2 {
            let j = JobMutator::new(&mut tx)
                .set_visibility(job.id, Visibility::Unpublished)
                .await?
                .expect("job exists");
            assert!(!j.published);
        }
        assert!(JobMutator::new(&mut tx)
            .set_visibility(i32::MAX, Visibility::Published)
            .await?
            .is_none());
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_delete_missing_and_cascade() -> Result<()> {
        let Some(state) = test_state().await? else {
            return Ok(());
        };
        let mut tx = state.db_pool.begin_txn().await?;
        assert!(!JobMutator::new(&mut tx).delete(i32::MAX).await?);

        let author = user(&mut tx, true).await?;
        let seeker = user(&mut tx, false).await?;
        let job = JobMutator::new(&mut tx)
            .create(&backend_engineer(), &author.id)
            .await?;
        ApplicationMutator::new(&mut tx)
            .create(
                job.id,
                &Applicant {
                    id: seeker.id.clone(),
                    name: "Sam".into(),
                    email: seeker.email.clone(),
                },
                "hello",
                None,
            )
            .await?;
        assert!(JobMutator::new(&mut tx).delete(job.id).await?);
        assert!(JobSelector::new(&mut tx).get_by_id(job.id).await?.is_none());
        assert!(ApplicationSelector::new(&mut tx)
            .get_for_job(job.id)
            .await?
            .is_empty());
        assert!(!ApplicationSelector::new(&mut tx)
            .already_applied(&seeker.id, job.id)
            .await?);
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_posted_by_only_returns_own_jobs() -> Result<()> {
        let Some(state) = test_state().await? else {
            return Ok(());
        };
        let mut tx = state.db_pool.begin_txn().await?;
        let mine = user(&mut tx, true).await?;
        let other = user(&mut tx, true).await?;
        let seeker = user(&mut tx, false).await?;
        let first = JobMutator::new(&mut tx).create(&backend_engineer(), &mine.id).await?;
        JobMutator::new(&mut tx).create(&backend_engineer(), &mine.id).await?;
        for _ in 0..3 {
            JobMutator::new(&mut tx).create(&backend_engineer(), &other.id).await?;
        }
        ApplicationMutator::new(&mut tx)
            .create(
                first.id,
                &Applicant {
                    id: seeker.id.clone(),
                    name: "Sam".into(),
                    email: seeker.email.clone(),
                },
                "cover",
                None,
            )
            .await?;

        let posted = JobSelector::new(&mut tx)
            .get_posted_with_applications(&mine.id)
            .await?;
        assert_eq!(posted.len(), 2);
        assert!(posted.iter().all(|p| p.job.author_id == mine.id));
        let with_application = posted.iter().find(|p| p.job.id == first.id).expect("first job");
        assert_eq!(with_application.applications.len(), 1);
        assert_eq!(with_application.applications[0].applicant_id, seeker.id);
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_list_orders_newest_first_and_filters() -> Result<()> {
        let Some(state) = test_state().await? else {
            return Ok(());
        };
        let mut tx = state.db_pool.begin_txn().await?;
        let author = user(&mut tx, true).await?;
        let job = JobMutator::new(&mut tx).create(&backend_engineer(), &author.id).await?;
        JobMutator::new(&mut tx)
            .set_visibility(job.id, Visibility::Published)
            .await?;

        let all = JobSelector::new(&mut tx).get_all(None).await?;
        assert!(all.windows(2).all(|w| w[0].posted_at >= w[1].posted_at));
        let published = JobSelector::new(&mut tx).get_all(Some(true)).await?;
        assert!(published.iter().all(|j| j.published));
        assert!(published.iter().any(|j| j.id == job.id));
        let drafts = JobSelector::new(&mut tx).get_all(Some(false)).await?;
        assert!(drafts.iter().all(|j| !j.published));
        Ok(())
    }
}
