use axum::{extract::State, Json};

use crate::{
    pkg::{
        internal::adaptors::users::{mutators::UserMutator, spec::CleanReport},
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

/// Developer utility; only routed when `ENABLE_DEV_UTILS` is set.
pub async fn clean(State(state): State<AppState>) -> Result<Json<CleanReport>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let report = UserMutator::new(&mut tx).clean_database().await?;
    tx.commit().await?;
    tracing::warn!("database cleaned through the dev utility route");
    Ok(Json(report))
}
