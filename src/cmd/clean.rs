use crate::{
    pkg::{
        internal::adaptors::users::mutators::UserMutator,
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

pub async fn apply() -> Result<()> {
    let state = AppState::new()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let report = UserMutator::new(&mut tx).clean_database().await?;
    tx.commit().await?;
    tracing::info!(
        "database cleaned: {} applications, {} jobs, {} users removed",
        report.applications,
        report.jobs,
        report.users
    );
    Ok(())
}
