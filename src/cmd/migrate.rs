use sqlx::{migrate::Migrator, postgres::PgPoolOptions};

use crate::{conf::settings, prelude::Result};

pub(crate) static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn apply() -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(settings.connect_options()?)
        .await?;
    tracing::debug!("connected to db");

    MIGRATOR.run(&pool).await?;
    tracing::info!("migrations applied successfully");
    Ok(())
}
