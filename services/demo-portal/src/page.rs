//! Page server: the rendered portal plus the message form endpoint
//!
//! The status panel and message list come from the shared snapshot. The form
//! values and the submission notice travel with each request and are only
//! ever shown to the visitor who submitted.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;

use crate::model::{MessageForm, Notice};
use crate::poller::ClientPoller;
use crate::render::{render, render_page};

/// Where a successful submission is sent; the query carries the notice
pub const SENT_LOCATION: &str = "/?notice=sent";

/// Page server application state
#[derive(Clone)]
pub struct PageState {
    pub poller: Arc<ClientPoller>,
}

#[derive(Debug, Default, Deserialize)]
struct IndexQuery {
    notice: Option<Notice>,
}

/// Build the page server axum router
pub fn build_router(poller: Arc<ClientPoller>) -> Router {
    let page_state = PageState { poller };

    Router::new()
        .route("/", get(index_handler))
        .route("/messages", post(submit_handler))
        .route("/api/view", get(view_handler))
        .route("/health", get(health_handler))
        .with_state(page_state)
}

async fn index_handler(
    State(page): State<PageState>,
    Query(query): Query<IndexQuery>,
) -> impl IntoResponse {
    // Failure notices are only rendered in the response to the failed POST
    let notice = query.notice.filter(Notice::is_success);
    let state = page.poller.state().read().await;
    Html(render_page(&state, &MessageForm::default(), notice))
}

async fn submit_handler(
    State(page): State<PageState>,
    Form(form): Form<MessageForm>,
) -> Response {
    tracing::debug!(
        "Form submission: author={} bytes, content={} bytes",
        form.author.len(),
        form.content.len()
    );
    let notice = page
        .poller
        .submit_message(&form.author, &form.content)
        .await;

    if notice.is_success() {
        return Redirect::to(SENT_LOCATION).into_response();
    }

    let state = page.poller.state().read().await;
    Html(render_page(&state, &form, Some(notice))).into_response()
}

async fn view_handler(State(page): State<PageState>) -> impl IntoResponse {
    let state = page.poller.state().read().await;
    Json(render(&state))
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}
