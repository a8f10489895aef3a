use super::{upload::Upload, AppState, GatewayError};
use crate::github::BuilderExecutor;
use axum::{
    extract::{Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
};

pub const API_KEY_HEADER: &str = "x-api-key";

pub async fn handle(State(state): State<AppState>, request: Request) -> Response {
    process(&state, request)
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

async fn process(state: &AppState, request: Request) -> Result<Response, GatewayError> {
    if request.method() == Method::OPTIONS {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    if request.method() != Method::POST {
        return Err(GatewayError::MethodNotAllowed);
    }

    authorize(request.headers(), &state.config.server.api_key)?;

    let repository = &state.config.repository;
    let upload = Upload::extract(request, &repository.path).await?;

    log::info!(
        "committing {} bytes to {}/{}:{} on {}",
        upload.content.len(),
        repository.owner,
        repository.repo,
        repository.path,
        repository.branch
    );

    let body = state
        .github
        .repo(&repository.owner, &repository.repo)
        .contents(&repository.path)
        .upsert(&repository.branch)
        .message(upload.message)
        .content(upload.content)
        .committer(upload.committer)
        .max_attempts(state.config.commit.max_attempts)
        .execute()
        .await?;

    log::info!("committed {}", repository.path);

    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}

/// Plain equality; a missing header compares as the empty string.
fn authorize(headers: &HeaderMap, api_key: &str) -> Result<(), GatewayError> {
    let provided = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if provided == api_key {
        Ok(())
    } else {
        Err(GatewayError::Unauthorized)
    }
}
