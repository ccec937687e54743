/// Shared data structures for the application state
///
/// These structs represent the catalog that flows between the
/// loading layer (JSON file / SQLite library) and the browsing core.
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BrowserError, Result};

/// Sentinel key meaning "no constraint" for author and genre filters
pub const ALL: &str = "All";

/// Represents a single book in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier
    pub id: String,
    /// Cover image URI
    pub image: String,
    pub title: String,
    /// Key into the author table
    pub author: String,
    pub description: String,
    pub published: DateTime<Utc>,
    /// Keys into the genre table
    pub genres: Vec<String>,
}

impl Book {
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

/// On-disk layout of a JSON catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    books: Vec<Book>,
    #[serde(default)]
    authors: BTreeMap<String, String>,
    #[serde(default)]
    genres: BTreeMap<String, String>,
}

/// The immutable catalog: books in their fixed order plus the
/// author and genre lookup tables.
///
/// A book's position in `books()` is its original index, the handle
/// used by result sets and the detail overlay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    books: Vec<Book>,
    authors: BTreeMap<String, String>,
    genres: BTreeMap<String, String>,
}

impl Catalog {
    /// Build a catalog, checking that book ids are unique and every
    /// author/genre key a book references exists in the tables.
    pub fn new(
        books: Vec<Book>,
        authors: BTreeMap<String, String>,
        genres: BTreeMap<String, String>,
    ) -> Result<Self> {
        let mut seen = HashSet::with_capacity(books.len());
        for book in &books {
            if !seen.insert(book.id.as_str()) {
                return Err(BrowserError::DuplicateBook(book.id.clone()));
            }
            if !authors.contains_key(&book.author) {
                return Err(BrowserError::UnknownAuthor {
                    book_id: book.id.clone(),
                    author: book.author.clone(),
                });
            }
            if let Some(genre) = book.genres.iter().find(|g| !genres.contains_key(*g)) {
                return Err(BrowserError::UnknownGenre {
                    book_id: book.id.clone(),
                    genre: genre.clone(),
                });
            }
        }

        Ok(Self { books, authors, genres })
    }

    /// Parse a catalog from its JSON representation
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.books, file.authors, file.genres)
    }

    /// Read and parse a JSON catalog file
    pub fn load_json(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Book at its original catalog index
    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    pub fn authors(&self) -> &BTreeMap<String, String> {
        &self.authors
    }

    pub fn genres(&self) -> &BTreeMap<String, String> {
        &self.genres
    }

    pub fn author_name(&self, key: &str) -> Option<&str> {
        self.authors.get(key).map(String::as_str)
    }

    pub fn genre_name(&self, key: &str) -> Option<&str> {
        self.genres.get(key).map(String::as_str)
    }

    /// Assemble the detail overlay content for the book at `index`
    pub fn detail(&self, index: usize) -> Option<BookDetail> {
        let book = self.get(index)?;
        let author = self.author_name(&book.author).unwrap_or(&book.author);

        Some(BookDetail {
            image: book.image.clone(),
            title: book.title.clone(),
            subtitle: format!("{} ({})", author, book.published.year()),
            description: book.description.clone(),
        })
    }

    /// Author drop-down entries, led by the "All authors" option
    pub fn author_options(&self) -> Vec<FilterOption> {
        FilterOption::with_all("All authors", &self.authors)
    }

    /// Genre drop-down entries, led by the "All genres" option
    pub fn genre_options(&self) -> Vec<FilterOption> {
        FilterOption::with_all("All genres", &self.genres)
    }
}

/// Content of the detail overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub image: String,
    pub title: String,
    /// "<author name> (<published year>)"
    pub subtitle: String,
    pub description: String,
}

/// One entry of the author or genre pick list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub key: String,
    pub label: String,
}

impl FilterOption {
    fn with_all(all_label: &str, table: &BTreeMap<String, String>) -> Vec<Self> {
        let mut options = Vec::with_capacity(table.len() + 1);
        options.push(FilterOption {
            key: ALL.to_string(),
            label: all_label.to_string(),
        });
        options.extend(table.iter().map(|(key, name)| FilterOption {
            key: key.clone(),
            label: name.clone(),
        }));
        options
    }
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
