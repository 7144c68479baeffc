use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::StoreError;
use crate::models::{Author, BlogPost, NewBlogPost, PostPatch};

const MEMORY_URLS: &[&str] = &[":memory:", "sqlite::memory:", "sqlite://:memory:"];

const SELECT_POST: &str =
    "SELECT id, author_first_name, author_last_name, title, content, created FROM blog_posts";

const INSERT_POST: &str =
    "INSERT INTO blog_posts (id, author_first_name, author_last_name, title, content, created) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

pub fn initialize(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch("PRAGMA journal_mode=WAL;").ok();

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS blog_posts (
            id TEXT PRIMARY KEY,
            author_first_name TEXT NOT NULL,
            author_last_name TEXT NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            created TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

/// Where a database URL points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location<'a> {
    Memory,
    File(&'a str),
}

pub fn parse_url(url: &str) -> Location<'_> {
    let url = url.trim();
    if MEMORY_URLS.contains(&url) {
        return Location::Memory;
    }
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    Location::File(path)
}

/// Shared handle to the blog post database.
///
/// Clones point at the same connection, so a test can seed through one handle
/// while the server answers requests through another.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(url: &str) -> Result<Self, StoreError> {
        let conn = match parse_url(url) {
            Location::Memory => Connection::open_in_memory(),
            Location::File(path) => {
                let parent = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty());
                if let Some(parent) = parent {
                    std::fs::create_dir_all(parent).map_err(|source| StoreError::Directory {
                        path: parent.display().to_string(),
                        source,
                    })?;
                }
                Connection::open(path)
            }
        }
        .map_err(|source| StoreError::Open { url: url.to_string(), source })?;

        initialize(&conn)?;
        tracing::info!(url, "opened blog post store");
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::open(":memory:")
    }

    /// Locks the connection, recovering from a poisoned mutex.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Inserts all posts in one transaction and returns them with their ids.
    pub fn insert_many(&self, posts: &[NewBlogPost]) -> Result<Vec<BlogPost>, StoreError> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let mut inserted = Vec::with_capacity(posts.len());
        {
            let mut stmt = tx.prepare(INSERT_POST)?;
            for new in posts {
                let post = BlogPost::assign(new.clone());
                stmt.execute(params![
                    post.id,
                    post.author.first_name,
                    post.author.last_name,
                    post.title,
                    post.content,
                    post.created,
                ])?;
                inserted.push(post);
            }
        }
        tx.commit()?;
        tracing::debug!(count = inserted.len(), "inserted blog posts");
        Ok(inserted)
    }

    pub fn create(&self, new: NewBlogPost) -> Result<BlogPost, StoreError> {
        let post = BlogPost::assign(new);
        self.conn().execute(
            INSERT_POST,
            params![
                post.id,
                post.author.first_name,
                post.author.last_name,
                post.title,
                post.content,
                post.created,
            ],
        )?;
        tracing::info!(id = %post.id, "created blog post");
        Ok(post)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let n: i64 = self.conn().query_row("SELECT COUNT(*) FROM blog_posts", [], |r| r.get(0))?;
        Ok(usize::try_from(n).unwrap_or(0))
    }

    /// All posts in insertion order.
    pub fn find_all(&self) -> Result<Vec<BlogPost>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{SELECT_POST} ORDER BY rowid ASC"))?;
        let posts = stmt.query_map([], row_to_post)?.collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = posts.len(), "listed blog posts");
        Ok(posts)
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<BlogPost>, StoreError> {
        find_by_id(&self.conn(), id)
    }

    /// The first post in insertion order, if any.
    pub fn find_one(&self) -> Result<Option<BlogPost>, StoreError> {
        let post = self
            .conn()
            .query_row(&format!("{SELECT_POST} ORDER BY rowid ASC LIMIT 1"), [], row_to_post)
            .optional()?;
        Ok(post)
    }

    pub fn update(&self, id: &str, patch: &PostPatch) -> Result<BlogPost, StoreError> {
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE blog_posts SET title = COALESCE(?1, title), content = COALESCE(?2, content) WHERE id = ?3",
            params![patch.title, patch.content, id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        tracing::info!(id, "updated blog post");
        find_by_id(&conn, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let deleted = self.conn().execute("DELETE FROM blog_posts WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        tracing::info!(id, "deleted blog post");
        Ok(())
    }

    /// Removes every post. Returns how many were dropped.
    pub fn drop_all(&self) -> Result<usize, StoreError> {
        let dropped = self.conn().execute("DELETE FROM blog_posts", [])?;
        tracing::debug!(dropped, "dropped all blog posts");
        Ok(dropped)
    }
}

fn find_by_id(conn: &Connection, id: &str) -> Result<Option<BlogPost>, StoreError> {
    let post = conn
        .query_row(&format!("{SELECT_POST} WHERE id = ?1"), [id], row_to_post)
        .optional()?;
    Ok(post)
}

fn row_to_post(row: &Row<'_>) -> rusqlite::Result<BlogPost> {
    Ok(BlogPost {
        id: row.get(0)?,
        author: Author { first_name: row.get(1)?, last_name: row.get(2)? },
        title: row.get(3)?,
        content: row.get(4)?,
        created: row.get(5)?,
    })
}
