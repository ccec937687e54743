use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::data::{Book, Catalog};
use crate::error::{BrowserError, Result};

/// The Library manages the SQLite catalog database.
/// It stores the imported books, in catalog order, plus the author and
/// genre tables, so the browser can start without re-reading the JSON file.
pub struct Library {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl Library {
    /// Open (or create) the library database at `db_path`.
    pub fn open(db_path: &Path) -> Result<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        info!(path = %db_path.display(), "Library database opened");

        let library = Library {
            conn,
            db_path: Some(db_path.to_path_buf()),
        };
        library.init_schema()?;
        Ok(library)
    }

    /// A throwaway library held in memory
    pub fn open_in_memory() -> Result<Self> {
        let library = Library {
            conn: Connection::open_in_memory()?,
            db_path: None,
        };
        library.init_schema()?;
        Ok(library)
    }

    /// Default location of the library file:
    /// - Linux: ~/.local/share/book-browser/library.db
    /// - macOS: ~/Library/Application Support/book-browser/library.db
    /// - Windows: %APPDATA%\book-browser\library.db
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
        path.push("book-browser");
        path.push("library.db");
        Some(path)
    }

    /// Create all tables if they don't exist.
    fn init_schema(&self) -> Result<()> {
        // `position` is the book's original catalog index
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS books (
                position        INTEGER PRIMARY KEY,
                id              TEXT NOT NULL UNIQUE,
                image           TEXT NOT NULL,
                title           TEXT NOT NULL,
                author          TEXT NOT NULL,
                description     TEXT NOT NULL,
                published       TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS book_genres (
                book_position   INTEGER NOT NULL,
                ordinal         INTEGER NOT NULL,
                genre           TEXT NOT NULL,
                PRIMARY KEY (book_position, ordinal),
                FOREIGN KEY(book_position) REFERENCES books(position) ON DELETE CASCADE
            );
            CREATE TABLE IF NOT EXISTS authors (
                key             TEXT PRIMARY KEY,
                name            TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS genres (
                key             TEXT PRIMARY KEY,
                name            TEXT NOT NULL
            );",
        )?;

        debug!("Library schema initialized");
        Ok(())
    }

    /// Path to the database file, `None` for in-memory libraries
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Number of stored books
    pub fn book_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        stored_count(count)
    }

    /// Replace the stored catalog with `catalog`, keeping its order.
    /// Runs in one transaction: either the whole catalog lands or nothing changes.
    pub fn import_catalog(&mut self, catalog: &Catalog) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            "DELETE FROM book_genres; DELETE FROM books; DELETE FROM authors; DELETE FROM genres;",
        )?;

        {
            let mut insert_author = tx.prepare("INSERT INTO authors (key, name) VALUES (?1, ?2)")?;
            for (key, name) in catalog.authors() {
                insert_author.execute(params![key, name])?;
            }

            let mut insert_genre = tx.prepare("INSERT INTO genres (key, name) VALUES (?1, ?2)")?;
            for (key, name) in catalog.genres() {
                insert_genre.execute(params![key, name])?;
            }

            let mut insert_book = tx.prepare(
                "INSERT INTO books (position, id, image, title, author, description, published)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            let mut insert_book_genre = tx.prepare(
                "INSERT INTO book_genres (book_position, ordinal, genre) VALUES (?1, ?2, ?3)",
            )?;
            for (position, book) in catalog.books().iter().enumerate() {
                let position = position as i64;
                insert_book.execute(params![
                    position,
                    book.id,
                    book.image,
                    book.title,
                    book.author,
                    book.description,
                    book.published.to_rfc3339(),
                ])?;
                for (ordinal, genre) in book.genres.iter().enumerate() {
                    insert_book_genre.execute(params![position, ordinal as i64, genre])?;
                }
            }
        }

        tx.commit()?;
        info!(books = catalog.len(), "Catalog imported into library");
        Ok(catalog.len())
    }

    /// Load the stored catalog in its fixed order
    pub fn load_catalog(&self) -> Result<Catalog> {
        let authors = self.load_table("SELECT key, name FROM authors")?;
        let genres = self.load_table("SELECT key, name FROM genres")?;

        let mut genre_stmt = self
            .conn
            .prepare("SELECT book_position, genre FROM book_genres ORDER BY book_position, ordinal")?;
        let mut book_genres: BTreeMap<i64, Vec<String>> = BTreeMap::new();
        let rows = genre_stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
        for row in rows {
            let (position, genre) = row?;
            book_genres.entry(position).or_default().push(genre);
        }

        let mut stmt = self.conn.prepare(
            "SELECT position, id, image, title, author, description, published
             FROM books ORDER BY position",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut books = Vec::new();
        for row in rows {
            let (position, id, image, title, author, description, published) = row?;
            let published = chrono::DateTime::parse_from_rfc3339(&published)
                .map_err(|_| BrowserError::InvalidPublished {
                    book_id: id.clone(),
                    value: published.clone(),
                })?
                .with_timezone(&chrono::Utc);

            books.push(Book {
                id,
                image,
                title,
                author,
                description,
                published,
                genres: book_genres.remove(&position).unwrap_or_default(),
            });
        }

        debug!(books = books.len(), "Catalog loaded from library");
        Catalog::new(books, authors, genres)
    }

    fn load_table(&self, sql: &str) -> Result<BTreeMap<String, String>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
        let mut table = BTreeMap::new();
        for row in rows {
            let (key, name) = row?;
            table.insert(key, name);
        }
        Ok(table)
    }
}

fn stored_count(count: i64) -> Result<usize> {
    usize::try_from(count).map_err(|_| BrowserError::InvalidCount(count))
}

/// Open the library (on disk, or in memory when `db_path` is `None`),
/// import `source` into it when given, and return the stored catalog.
pub fn load_catalog(source: Option<&Path>, db_path: Option<&Path>) -> Result<Catalog> {
    let mut library = match db_path {
        Some(path) => Library::open(path)?,
        None => Library::open_in_memory()?,
    };

    if let Some(source) = source {
        info!(source = %source.display(), "Importing JSON catalog");
        let catalog = Catalog::load_json(source)?;
        library.import_catalog(&catalog)?;
    }

    library.load_catalog()
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}
