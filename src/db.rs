use crate::config::Config;
use anyhow::Result;
use libsql::{Builder, Connection, Database as LibsqlDatabase};
use std::sync::atomic::{AtomicU64, Ordering};

pub struct Database {
    _db: LibsqlDatabase,
    conn: Connection,
    checkouts: AtomicU64,
}

impl Database {
    /// Hands out the shared connection. Every checkout is counted so callers
    /// can tell whether a request reached the data layer at all.
    pub fn connection(&self) -> &Connection {
        self.checkouts.fetch_add(1, Ordering::Relaxed);
        &self.conn
    }

    pub fn checkouts(&self) -> u64 {
        self.checkouts.load(Ordering::Relaxed)
    }

    pub async fn new(cfg: &Config) -> Result<Self> {
        let db = match cfg.database.remote() {
            Some((url, token)) => {
                tracing::info!("[db] connecting to remote database at {}", url);
                Builder::new_remote(url.to_string(), token.to_string())
                    .build()
                    .await?
            }
            None => {
                tracing::info!("[db] opening local database {}", cfg.database.path);
                Builder::new_local(&cfg.database.path).build().await?
            }
        };

        Self::from_libsql(db).await
    }

    /// A private in-memory database, mostly for tests.
    pub async fn in_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:").build().await?;
        Self::from_libsql(db).await
    }

    async fn from_libsql(db: LibsqlDatabase) -> Result<Self> {
        let conn = db.connect()?;
        conn.query("SELECT 1", ()).await?;

        for (name, sql) in crate::bookmarks::schema() {
            tracing::debug!("ensuring schema {}", name);
            conn.execute_batch(sql)
                .await
                .map_err(|e| anyhow::anyhow!("failed to apply schema {name}: {e}"))?;
        }

        Ok(Database {
            _db: db,
            conn,
            checkouts: AtomicU64::new(0),
        })
    }
}
