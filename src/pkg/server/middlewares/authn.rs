use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    pkg::{
        internal::auth::Identity,
        server::state::{AppState, GetTxn},
    },
    prelude::{AppError, Result},
};

/// Resolves the forwarded session identity into a stored user and hands it to
/// the handler as `Extension<Arc<User>>`.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let Some(identity) = Identity::from_headers(request.headers()) else {
        tracing::warn!("session identity missing, authentication denied");
        return Err(AppError::Unauthorized("sign in required".into()));
    };
    let mut tx = state.db_pool.begin_txn().await?;
    let user = identity.resolve(&mut tx).await?;
    tx.commit().await?;
    tracing::debug!("request from user {}", &user.id);
    request.extensions_mut().insert(Arc::new(user));
    Ok(next.run(request).await)
}
