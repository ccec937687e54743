/// Catalog filtering
///
/// Filtering is a pure function of the catalog and the submitted criteria.
/// The output keeps catalog order and remembers each book's original index.
use serde::{Deserialize, Serialize};

use super::data::{Book, Catalog, ALL};

/// Values submitted from the search form.
///
/// `"All"` (author, genre) and `""` (title) mean "no constraint". Missing or
/// blank fields are read the same way, so malformed criteria never fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub title: String,
    pub author: String,
    pub genre: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: ALL.to_string(),
            genre: ALL.to_string(),
        }
    }
}

impl FilterCriteria {
    /// True when no field restricts the result
    pub fn is_unrestricted(&self) -> bool {
        key_unconstrained(&self.author) && key_unconstrained(&self.genre) && self.title.is_empty()
    }

    /// Whether `book` satisfies every constrained field
    pub fn matches(&self, book: &Book) -> bool {
        let genre_match = key_unconstrained(&self.genre) || book.has_genre(&self.genre);
        let author_match = key_unconstrained(&self.author) || book.author == self.author;
        let title_match = self.title.is_empty()
            || book
                .title
                .to_lowercase()
                .contains(&self.title.to_lowercase());

        genre_match && author_match && title_match
    }
}

fn key_unconstrained(key: &str) -> bool {
    key == ALL || key.trim().is_empty()
}

/// Ordered original indices of the books in the active result.
///
/// Entries are always valid indices into the catalog the set was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    indices: Vec<usize>,
}

impl ResultSet {
    /// The unfiltered catalog: original index `i` at position `i`
    pub fn full(catalog: &Catalog) -> Self {
        Self {
            indices: (0..catalog.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Original catalog index of the entry at `position`
    pub fn original_index(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// `(book, original index)` pairs in result order
    pub fn entries<'c>(&'c self, catalog: &'c Catalog) -> impl Iterator<Item = (&'c Book, usize)> + 'c {
        self.indices
            .iter()
            .filter_map(move |&index| catalog.get(index).map(|book| (book, index)))
    }
}

/// Every catalog entry matching `criteria`, in catalog order
pub fn filter_catalog(catalog: &Catalog, criteria: &FilterCriteria) -> ResultSet {
    let indices = catalog
        .books()
        .iter()
        .enumerate()
        .filter(|(_, book)| criteria.matches(book))
        .map(|(index, _)| index)
        .collect();

    ResultSet { indices }
}
