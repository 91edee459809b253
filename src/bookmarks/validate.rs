//! Request validation for bookmark writes.

use crate::error::{Field, ValidationError};
use crate::model::{BookmarkPatch, BookmarkPayload, NewBookmark};

/// Required fields are checked in a fixed order: title, url, description,
/// rating. The first missing one is reported.
pub fn validate_new(payload: BookmarkPayload) -> Result<NewBookmark, ValidationError> {
    let BookmarkPayload {
        title,
        url,
        description,
        rating,
    } = payload;

    Ok(NewBookmark {
        title: title.ok_or(ValidationError::MissingField(Field::Title))?,
        url: url.ok_or(ValidationError::MissingField(Field::Url))?,
        description: description.ok_or(ValidationError::MissingField(Field::Description))?,
        rating: rating.ok_or(ValidationError::MissingField(Field::Rating))?,
    })
}

/// Counts fields carrying a truthy value. Empty strings and zero ratings do
/// not count, so `{"title": ""}` alone is rejected.
pub fn provided_fields(patch: &BookmarkPatch) -> usize {
    let texts = [&patch.title, &patch.url, &patch.description]
        .into_iter()
        .filter(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
        .count();
    let rating = patch.rating.as_ref().is_some_and(|r| r.is_truthy()) as usize;
    texts + rating
}

pub fn validate_patch(patch: BookmarkPatch) -> Result<BookmarkPatch, ValidationError> {
    if provided_fields(&patch) == 0 {
        return Err(ValidationError::NoFieldsProvided);
    }
    Ok(patch)
}
