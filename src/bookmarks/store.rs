use libsql::Connection;

use crate::error::StorageError;
use crate::model::{Bookmark, BookmarkPatch, NewBookmark, Rating};

type Result<T> = std::result::Result<T, StorageError>;

const COLUMNS: &str = "id, title, url, description, rating";

pub struct BookmarkStore<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<Bookmark>> {
        let query = format!("SELECT {COLUMNS} FROM bookmark_links ORDER BY id");
        let mut rows = self.conn.query(&query, ()).await?;

        let mut bookmarks = Vec::new();
        while let Some(row) = rows.next().await? {
            bookmarks.push(Self::row_to_bookmark(&row)?);
        }
        Ok(bookmarks)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>> {
        let query = format!("SELECT {COLUMNS} FROM bookmark_links WHERE id = ?");
        let mut rows = self.conn.query(&query, libsql::params![id]).await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::row_to_bookmark(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn insert(&self, input: NewBookmark) -> Result<Bookmark> {
        let query = format!(
            "INSERT INTO bookmark_links (title, url, description, rating) VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
        );
        let params: Vec<libsql::Value> = vec![
            input.title.into(),
            input.url.into(),
            input.description.into(),
            input.rating.into(),
        ];

        let mut rows = self.conn.query(&query, params).await?;
        match rows.next().await? {
            Some(row) => Self::row_to_bookmark(&row),
            None => Err(StorageError::NoRowReturned),
        }
    }

    /// Writes only the fields present in `patch`. Returns the number of rows
    /// touched; 0 means no such id (or nothing to write).
    pub async fn update(&self, id: i64, patch: BookmarkPatch) -> Result<u64> {
        let mut updates = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(title) = patch.title {
            updates.push("title = ?");
            params.push(title.into());
        }
        if let Some(url) = patch.url {
            updates.push("url = ?");
            params.push(url.into());
        }
        if let Some(description) = patch.description {
            updates.push("description = ?");
            params.push(description.into());
        }
        if let Some(rating) = patch.rating {
            updates.push("rating = ?");
            params.push(rating.into());
        }

        if updates.is_empty() {
            return Ok(0);
        }

        params.push(id.into());
        let query = format!("UPDATE bookmark_links SET {} WHERE id = ?", updates.join(", "));

        Ok(self.conn.execute(&query, params).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        Ok(self
            .conn
            .execute("DELETE FROM bookmark_links WHERE id = ?", libsql::params![id])
            .await?)
    }

    fn row_to_bookmark(row: &libsql::Row) -> Result<Bookmark> {
        let rating = Rating::try_from(row.get_value(4)?)
            .map_err(|value| StorageError::UnsupportedValue { column: "rating", value })?;

        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            description: row.get(3)?,
            rating,
        })
    }
}
