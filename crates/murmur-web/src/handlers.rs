//! Request handlers for the board routes.

use std::sync::Arc;

use askama::Template;
use axum::extract::{Form, Path, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;
use murmur::{Board, Posted, ThreadView};
use murmur_core::{PostId, RequestContext};
use murmur_store::Store;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::templates::{IndexTemplate, ThreadTemplate};

/// Header carrying the client address as set by the fronting proxy.
pub const FORWARDED_FOR: &str = "x-forwarded-for";

const USER_AGENT: &str = "user-agent";

/// Form data for a new thread or reply
#[derive(Debug, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub ticket: String,
    /// Present only on reply forms
    pub parent: Option<String>,
}

/// Build the digest inputs for a request from its headers.
///
/// Both values are taken verbatim; a missing header yields an empty string.
pub fn request_context(headers: &HeaderMap) -> RequestContext {
    let raw = |name: &str| {
        headers
            .get(name)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default()
    };
    RequestContext::new(raw(FORWARDED_FOR), raw(USER_AGENT))
}

/// Front page: every thread, newest first.
#[instrument(skip_all)]
pub async fn front_page<S: Store + 'static>(
    State(board): State<Arc<Board<S>>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let ctx = request_context(&headers);
    let page = board.front_page(&ctx).await?;
    debug!(threads = page.threads.len(), "rendering front page");

    let template = IndexTemplate::new(board.config(), &page, Utc::now());
    Ok(Html(template.render()?))
}

/// Thread page, or a redirect into the thread when the id names a reply.
#[instrument(skip_all, fields(id = %raw_id))]
pub async fn thread_page<S: Store + 'static>(
    State(board): State<Arc<Board<S>>>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let id: PostId = raw_id.parse().map_err(AppError::BadId)?;
    let ctx = request_context(&headers);

    match board.thread_page(id, &ctx).await? {
        ThreadView::Redirect { thread, post } => {
            Ok(Redirect::to(&format!("/{}/#post_{}", thread, post)).into_response())
        }
        ThreadView::Thread(page) => {
            let template = ThreadTemplate::new(board.config(), &page, Utc::now());
            Ok(Html(template.render()?).into_response())
        }
    }
}

/// Accept a new thread or reply and redirect to it.
#[instrument(skip_all, fields(reply = form.parent.is_some()))]
pub async fn submit<S: Store + 'static>(
    State(board): State<Arc<Board<S>>>,
    headers: HeaderMap,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    let ctx = request_context(&headers);
    let posted = board
        .submit(&ctx, &form.comment, &form.ticket, form.parent.as_deref())
        .await?;

    let location = match posted {
        Posted::Thread(id) => format!("/{}/", id),
        Posted::Reply { thread, id } => format!("/{}/#post_{}", thread, id),
    };
    Ok(Redirect::to(&location))
}
