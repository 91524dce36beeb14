use crate::adapters::http::HttpTransport;
use crate::app::pipelines::merge_starter_packs;
use crate::config::credentials::Credentials;
use crate::domain::model::MergeReport;
use crate::utils::error::{MergeError, Result};
use crate::web::flash::Flash;
use crate::web::page::render_index;
use crate::web::AppState;
use axum::extract::{Form, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::sync::Arc;

pub const NOT_FOUND_MESSAGE: &str =
    "Error: Unable to find one of the specified starter packs or lists.";
pub const SUCCESS_MESSAGE: &str = "Successfully merged the starter packs!";

#[derive(Clone, Deserialize)]
pub struct MergeForm {
    pub handle: String,
    pub apppassword: String,
    /// Target starter pack URL.
    pub packurl: String,
    /// Source starter pack URL.
    pub packsrcurl: String,
}

pub async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let flash = headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| Flash::from_cookie_header(cookies, &state.config.secret_key));

    let mut response = Html(render_index(flash.as_ref())).into_response();
    if flash.is_some() {
        set_cookie(&mut response, &Flash::clear_cookie());
    }
    response
}

pub async fn submit(State(state): State<Arc<AppState>>, Form(form): Form<MergeForm>) -> Response {
    tracing::info!(
        "📨 Merge requested by {}: {} -> {}",
        form.handle,
        form.packsrcurl,
        form.packurl
    );

    let flash = match run_merge(&state, form).await {
        Ok(report) => {
            tracing::info!(
                "✅ Merged {} accounts from {} into {}",
                report.appended,
                report.source,
                report.target
            );
            Flash::success(SUCCESS_MESSAGE)
        }
        Err(MergeError::StarterPackNotFound { pack_id, handle }) => {
            tracing::warn!("Starter pack {} of {} not found", pack_id, handle);
            Flash::danger(NOT_FOUND_MESSAGE)
        }
        Err(e) => {
            tracing::error!("❌ Merge failed: {} (Category: {:?})", e, e.category());
            Flash::danger(format!("Error: {}", e.summary()))
        }
    };

    let mut response = Redirect::to("/").into_response();
    match flash.to_set_cookie(&state.config.secret_key) {
        Ok(cookie) => set_cookie(&mut response, &cookie),
        Err(e) => tracing::warn!("Could not sign flash cookie: {}", e),
    }
    response
}

async fn run_merge(state: &AppState, form: MergeForm) -> Result<MergeReport> {
    let credentials = Credentials::new(form.handle, form.apppassword);
    let transport = HttpTransport::new(&state.config.service)?;
    merge_starter_packs(transport, &credentials, &form.packurl, &form.packsrcurl).await
}

fn set_cookie(response: &mut Response, cookie: &str) {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => tracing::warn!("Could not encode flash cookie: {}", e),
    }
}
