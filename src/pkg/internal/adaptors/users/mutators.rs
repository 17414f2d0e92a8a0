use sqlx::PgConnection;

use crate::{
    pkg::internal::{
        adaptors::users::spec::{CleanReport, User},
        auth::Identity,
    },
    prelude::Result,
};

pub struct UserMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> UserMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        UserMutator { pool }
    }

    /// Inserts the user on first sign-in. Later sign-ins only refresh the email;
    /// name and company flag belong to setup.
    pub async fn ensure(&mut self, identity: &Identity) -> Result<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET email = EXCLUDED.email,
                name = COALESCE(users.name, EXCLUDED.name)
            RETURNING id, name, email, company, created_at
            "#,
        )
        .bind(&identity.id)
        .bind(&identity.email)
        .bind(&identity.name)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_profile(
        &mut self,
        id: &str,
        name: &str,
        company: bool,
    ) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET name = $2, company = $3
            WHERE id = $1
            RETURNING id, name, email, company, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(company)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn clean_database(&mut self) -> Result<CleanReport> {
        let applications = sqlx::query("DELETE FROM applications")
            .execute(&mut *self.pool)
            .await?
            .rows_affected();
        let jobs = sqlx::query("DELETE FROM jobs")
            .execute(&mut *self.pool)
            .await?
            .rows_affected();
        let users = sqlx::query("DELETE FROM users")
            .execute(&mut *self.pool)
            .await?
            .rows_affected();
        Ok(CleanReport {
            applications,
            jobs,
            users,
        })
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;
    use uuid::Uuid;

    use super::*;
    use crate::pkg::{
        internal::adaptors::users::selectors::UserSelector,
        server::state::{test_state, GetTxn},
    };

    fn identity(name: Option<&str>) -> Identity {
        let id = Uuid::new_v4().to_string();
        Identity {
            email: format!("{}@example.com", &id),
            name: name.map(String::from),
            id,
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn test_ensure_creates_once_and_keeps_profile() -> Result<()> {
        let Some(state) = test_state().await? else {
            return Ok(());
        };
        let mut tx = state.db_pool.begin_txn().await?;
        let who = identity(Some("from provider"));
        let created = UserMutator::new(&mut tx).ensure(&who).await?;
        assert_eq!(created.name.as_deref(), Some("from provider"));
        assert!(!created.company);

        UserMutator::new(&mut tx)
            .update_profile(&who.id, "Acme Hiring", true)
            .await?;
        let again = UserMutator::new(&mut tx).ensure(&who).await?;
        assert_eq!(again.name.as_deref(), Some("Acme Hiring"));
        assert!(again.company);
        assert_eq!(again.created_at, created.created_at);
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_shared_email_does_not_block_sign_in() -> Result<()> {
        let Some(state) = test_state().await? else {
            return Ok(());
        };
        let mut tx = state.db_pool.begin_txn().await?;
        let first = identity(None);
        let second = Identity {
            id: Uuid::new_v4().to_string(),
            email: first.email.clone(),
            name: None,
        };
        let a = UserMutator::new(&mut tx).ensure(&first).await?;
        let b = UserMutator::new(&mut tx).ensure(&second).await?;
        assert_ne!(a.id, b.id);
        assert_eq!(a.email, b.email);
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_missing_user_is_none() -> Result<()> {
        let Some(state) = test_state().await? else {
            return Ok(());
        };
        let mut tx = state.db_pool.begin_txn().await?;
        let missing = Uuid::new_v4().to_string();
        assert!(UserSelector::new(&mut tx).get_by_id(&missing).await?.is_none());
        assert!(UserMutator::new(&mut tx)
            .update_profile(&missing, "nobody", false)
            .await?
            .is_none());
        Ok(())
    }
}
