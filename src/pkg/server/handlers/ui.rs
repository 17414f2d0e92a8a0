use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};

use crate::{
    pkg::{
        internal::{
            adaptors::{
                applications::selectors::ApplicationSelector,
                jobs::selectors::JobSelector,
                users::{selectors::UserSelector, spec::User},
            },
            auth::Identity,
            dashboard::Dashboard,
        },
        server::{
            state::{AppState, GetTxn},
            uispec::{
                ApplyPage, CompanyPage, DashboardPage, IndexPage, JobPage, NewJobPage, SetupPage,
            },
        },
    },
    prelude::{AppError, Result},
};

/// Public listing. Signed-in users without a name are sent to setup first.
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    let mut tx = state.db_pool.begin_txn().await?;
    let user = match Identity::from_headers(&headers) {
        Some(identity) => Some(identity.resolve(&mut tx).await?),
        None => None,
    };
    if user.as_ref().is_some_and(User::needs_setup) {
        tx.commit().await?;
        return Ok(Redirect::to("/board/setup").into_response());
    }
    let jobs = JobSelector::new(&mut tx).get_all(Some(true)).await?;
    tx.commit().await?;
    Ok(Html(IndexPage { user, jobs }.render()?).into_response())
}

pub async fn job(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<i32>,
) -> Result<Html<String>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_with_author(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("job {} not found", id)))?;
    let applied = ApplicationSelector::new(&mut tx)
        .already_applied(&user.id, id)
        .await?;
    let page = JobPage {
        user: user.as_ref().clone(),
        job,
        applied,
    };
    Ok(Html(page.render()?))
}

pub async fn apply(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<i32>,
) -> Result<Response> {
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobSelector::new(&mut tx)
        .get_with_author(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("job {} not found", id)))?;
    if ApplicationSelector::new(&mut tx)
        .already_applied(&user.id, id)
        .await?
    {
        return Ok(Redirect::to(&format!("/board/jobs/{}", id)).into_response());
    }
    let page = ApplyPage {
        user: user.as_ref().clone(),
        job,
    };
    Ok(Html(page.render()?).into_response())
}

pub async fn new_job(Extension(user): Extension<Arc<User>>) -> Result<Response> {
    if !user.company {
        return Ok(Redirect::to("/board").into_response());
    }
    let page = NewJobPage {
        user: user.as_ref().clone(),
    };
    Ok(Html(page.render()?).into_response())
}

pub async fn setup(Extension(user): Extension<Arc<User>>) -> Result<Response> {
    if !user.needs_setup() {
        return Ok(Redirect::to("/board").into_response());
    }
    let page = SetupPage {
        user: user.as_ref().clone(),
    };
    Ok(Html(page.render()?).into_response())
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Html<String>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let (jobs, applications) = match Dashboard::load(&mut tx, &user).await? {
        Dashboard::Company { jobs } => (jobs, vec![]),
        Dashboard::Applicant { applications } => (vec![], applications),
    };
    let page = DashboardPage {
        user: user.as_ref().clone(),
        jobs,
        applications,
    };
    Ok(Html(page.render()?))
}

pub async fn company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let company = UserSelector::new(&mut tx)
        .get_author(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("company {} not found", &id)))?;
    let jobs = JobSelector::new(&mut tx).get_published_by_author(&id).await?;
    Ok(Html(CompanyPage { company, jobs }.render()?))
}
