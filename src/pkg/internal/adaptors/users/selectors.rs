use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::users::spec::{AuthorRef, User},
    prelude::Result,
};

pub struct UserSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> UserSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        UserSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, name, email, company, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_author(&mut self, id: &str) -> Result<Option<AuthorRef>> {
        let row = sqlx::query_as::<_, AuthorRef>(
            "SELECT id, name, company FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }
}
