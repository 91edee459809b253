//! HTTP Handlers for the bookmark API

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequestParts, Path, State, rejection::BytesRejection},
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::store::BookmarkStore;
use super::{COLLECTION_PATH, serialize_bookmark, validate_new, validate_patch};
use crate::error::ApiError;
use crate::handler::AppState;
use crate::model::{Bookmark, BookmarkPatch, BookmarkPayload};

/// The bookmark named by the `:id` path segment. Extracting it is the
/// existence check for every item route: an unknown or non-numeric id ends
/// the request with 404 before the handler runs.
#[derive(Debug)]
pub struct ResolvedBookmark(pub Bookmark);

#[axum::async_trait]
impl FromRequestParts<AppState> for ResolvedBookmark {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;
        let Ok(id) = raw_id.parse::<i64>() else {
            return Err(ApiError::NotFound);
        };

        let store = BookmarkStore::new(state.db.connection());
        match store.get_by_id(id).await? {
            Some(bookmark) => Ok(ResolvedBookmark(bookmark)),
            None => {
                tracing::info!(id, "bookmark not found");
                Err(ApiError::NotFound)
            }
        }
    }
}

/// An empty body reads as `{}` so that it fails validation rather than
/// parsing. Anything else must be a JSON object; serde would otherwise map
/// an array onto the fields by position.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(Value::Object(Map::new()))
            .map_err(|e| ApiError::InvalidBody(e.to_string()));
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => {
            serde_json::from_value(value).map_err(|e| ApiError::InvalidBody(e.to_string()))
        }
        Ok(_) => Err(ApiError::InvalidBody("expected a JSON object".to_string())),
        Err(e) => Err(ApiError::InvalidBody(e.to_string())),
    }
}

pub async fn list_bookmarks(State(state): State<AppState>) -> Result<Response, ApiError> {
    let store = BookmarkStore::new(state.db.connection());
    let bookmarks: Vec<Bookmark> = store.list_all().await?.iter().map(serialize_bookmark).collect();

    tracing::info!(count = bookmarks.len(), "listed bookmarks");
    Ok((StatusCode::OK, Json(bookmarks)).into_response())
}

pub async fn get_bookmark(ResolvedBookmark(bookmark): ResolvedBookmark) -> Response {
    (StatusCode::OK, Json(serialize_bookmark(&bookmark))).into_response()
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let body = body?;
    let payload: BookmarkPayload = parse_body(&body)?;
    let new_bookmark = validate_new(payload)?;

    let store = BookmarkStore::new(state.db.connection());
    let bookmark = store.insert(new_bookmark).await?;

    tracing::info!(id = bookmark.id, "bookmark created");
    let location = format!("{}/{}", COLLECTION_PATH, bookmark.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(serialize_bookmark(&bookmark)),
    )
        .into_response())
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    ResolvedBookmark(bookmark): ResolvedBookmark,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let body = body?;
    let patch: BookmarkPatch = parse_body(&body)?;
    let patch = validate_patch(patch)?;

    let store = BookmarkStore::new(state.db.connection());
    let affected = store.update(bookmark.id, patch).await?;

    // A concurrent delete can leave nothing to update; the reply is 204 either way.
    tracing::info!(id = bookmark.id, affected, "bookmark updated");
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn delete_bookmark(
    State(state): State<AppState>,
    ResolvedBookmark(bookmark): ResolvedBookmark,
) -> Result<Response, ApiError> {
    let store = BookmarkStore::new(state.db.connection());
    store.delete(bookmark.id).await?;

    tracing::info!(id = bookmark.id, "bookmark deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}
