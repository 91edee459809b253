//! Bookmarks Module
//!
//! The single resource this service exposes: a saved link with a title,
//! description and rating.
//!
//! A request flows through the stages in this module in order:
//!
//! - `handler::ResolvedBookmark` looks up the `:id` of item routes
//! - `validate` checks write payloads
//! - `store::BookmarkStore` runs the SQL
//! - `serialize` escapes free text on the way out
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookmarks::bookmarks;
//!
//! let app = Router::new()
//!     .nest(bookmarks::COLLECTION_PATH, bookmarks::routes())
//!     .with_state(app_state);
//!
//! let store = bookmarks::BookmarkStore::new(db.connection());
//! let all = store.list_all().await?;
//! ```

mod handler;
mod routes;
pub mod serialize;
pub mod store;
pub mod validate;

pub use handler::ResolvedBookmark;
pub use routes::routes;
pub use serialize::{sanitize_text, serialize_bookmark};
pub use store::BookmarkStore;
pub use validate::{validate_new, validate_patch};

/// Where the collection is mounted. Item paths are `COLLECTION_PATH/<id>`.
pub const COLLECTION_PATH: &str = "/api/bookmark";

/// Statements that create the bookmark table if it is missing.
pub fn schema() -> &'static [(&'static str, &'static str)] {
    &[(
        "001_bookmark_links.sql",
        include_str!("schema/001_bookmark_links.sql"),
    )]
}
