/// State management module
///
/// This module handles all browsing state, including:
/// - Catalog data structures (data.rs)
/// - SQLite catalog storage (library.rs)
/// - Filtering into result sets (filter.rs)
/// - Page-by-page reveal tracking (pagination.rs)
/// - Turning user actions into render instructions (coordinator.rs)

pub mod coordinator;
pub mod data;
pub mod filter;
pub mod library;
pub mod pagination;

pub use coordinator::{apply_instructions, RenderCoordinator, RenderInstruction, RenderSurface};
pub use data::{Book, BookDetail, Catalog, FilterOption, ALL};
pub use filter::{filter_catalog, FilterCriteria, ResultSet};
pub use library::{load_catalog, Library};
pub use pagination::{PageSize, PaginationTracker, DEFAULT_PAGE_SIZE};
