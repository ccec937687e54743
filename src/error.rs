use thiserror::Error;

/// Everything that can go wrong while configuring the browser or loading a catalog.
///
/// Paging, filtering and rendering never fail once a catalog is loaded, so
/// none of these variants are produced by the coordinator itself.
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON catalog error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Page size must be at least 1, got {0}")]
    InvalidPageSize(usize),

    #[error("Book '{book_id}' references unknown author '{author}'")]
    UnknownAuthor { book_id: String, author: String },

    #[error("Book '{book_id}' references unknown genre '{genre}'")]
    UnknownGenre { book_id: String, genre: String },

    #[error("Book '{book_id}' has an invalid published date '{value}'")]
    InvalidPublished { book_id: String, value: String },

    #[error("Duplicate book id '{0}'")]
    DuplicateBook(String),

    #[error("Library reported an invalid book count {0}")]
    InvalidCount(i64),
}

pub type Result<T> = std::result::Result<T, BrowserError>;
