use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::{
    pkg::{
        internal::{adaptors::users::spec::User, dashboard::Dashboard},
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

pub async fn show(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<Dashboard>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let dashboard = Dashboard::load(&mut tx, &user).await?;
    Ok(Json(dashboard))
}
