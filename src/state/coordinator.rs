/// Render coordination
///
/// The coordinator owns the active result set and its pagination tracker,
/// and turns user actions into render instructions. It never touches
/// widgets: the caller applies the instructions to a [`RenderSurface`].
use std::sync::Arc;

use tracing::{debug, info};

use super::data::{Book, BookDetail, Catalog};
use super::filter::{filter_catalog, FilterCriteria, ResultSet};
use super::pagination::{PageSize, PaginationTracker};

/// A single change to apply to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderInstruction {
    /// Remove every preview
    Clear,
    /// Append the preview of the book at this catalog index
    Append { original_index: usize },
    SetLoadMoreEnabled(bool),
    /// Number shown in the load-more label
    SetRemaining(usize),
    ShowEmptyMessage(bool),
    ScrollToTop,
}

/// The display the instructions are applied to
pub trait RenderSurface {
    fn clear(&mut self);
    fn append_preview(&mut self, book: &Book, original_index: usize);
    fn set_load_more_enabled(&mut self, enabled: bool);
    fn set_remaining(&mut self, remaining: usize);
    fn set_empty_message_visible(&mut self, visible: bool);
    fn scroll_to_top(&mut self) {}
}

/// Apply `instructions` in order. Appends whose index is not in the
/// catalog are skipped.
pub fn apply_instructions<S: RenderSurface + ?Sized>(
    catalog: &Catalog,
    instructions: &[RenderInstruction],
    surface: &mut S,
) {
    for instruction in instructions {
        match *instruction {
            RenderInstruction::Clear => surface.clear(),
            RenderInstruction::Append { original_index } => {
                if let Some(book) = catalog.get(original_index) {
                    surface.append_preview(book, original_index);
                }
            }
            RenderInstruction::SetLoadMoreEnabled(enabled) => surface.set_load_more_enabled(enabled),
            RenderInstruction::SetRemaining(remaining) => surface.set_remaining(remaining),
            RenderInstruction::ShowEmptyMessage(visible) => surface.set_empty_message_visible(visible),
            RenderInstruction::ScrollToTop => surface.scroll_to_top(),
        }
    }
}

pub struct RenderCoordinator {
    catalog: Arc<Catalog>,
    page_size: PageSize,
    active: ResultSet,
    tracker: PaginationTracker,
}

impl RenderCoordinator {
    /// A coordinator over an empty catalog; call [`initialize`](Self::initialize) to load one
    pub fn new(page_size: PageSize) -> Self {
        Self {
            catalog: Arc::new(Catalog::default()),
            page_size,
            active: ResultSet::default(),
            tracker: PaginationTracker::new(page_size, 0),
        }
    }

    /// Show the first page of the whole catalog
    pub fn initialize(&mut self, catalog: Arc<Catalog>) -> Vec<RenderInstruction> {
        info!(books = catalog.len(), page_size = self.page_size.get(), "Catalog initialized");
        self.catalog = catalog;
        let full = ResultSet::full(&self.catalog);
        self.activate(full);
        self.first_page()
    }

    /// Reveal the next page of the active result set
    pub fn load_more(&mut self) -> Vec<RenderInstruction> {
        self.tracker.advance();

        let mut instructions = vec![RenderInstruction::SetRemaining(self.tracker.remaining_count())];
        for position in self.tracker.lower_bound()..self.tracker.upper_bound() {
            match self.active.original_index(position) {
                Some(original_index) => {
                    instructions.push(RenderInstruction::Append { original_index });
                }
                None => {
                    instructions.push(RenderInstruction::SetLoadMoreEnabled(false));
                    break;
                }
            }
        }

        debug!(
            revealed = self.tracker.lower_bound(),
            total = self.active.len(),
            remaining = self.tracker.remaining_count(),
            "Loaded more previews"
        );
        instructions
    }

    /// Replace the active result set with the books matching `criteria`
    /// and restart paging from its first page.
    pub fn apply_filter(&mut self, criteria: &FilterCriteria) -> Vec<RenderInstruction> {
        let result = filter_catalog(&self.catalog, criteria);
        info!(
            matched = result.len(),
            total = self.catalog.len(),
            unrestricted = criteria.is_unrestricted(),
            "Filter applied"
        );

        self.activate(result);
        let mut instructions = self.first_page();
        instructions.push(RenderInstruction::ScrollToTop);
        instructions
    }

    /// Detail overlay content for a rendered preview
    pub fn open_detail(&self, original_index: usize) -> Option<BookDetail> {
        self.catalog.detail(original_index)
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn active(&self) -> &ResultSet {
        &self.active
    }

    pub fn tracker(&self) -> &PaginationTracker {
        &self.tracker
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Swap in a new result set together with a fresh tracker
    fn activate(&mut self, result: ResultSet) {
        self.tracker = PaginationTracker::new(self.page_size, result.len());
        self.active = result;
    }

    /// Full replace of the display with the tracker's first slice
    fn first_page(&self) -> Vec<RenderInstruction> {
        let mut instructions = vec![RenderInstruction::Clear];

        if self.active.is_empty() {
            instructions.extend([
                RenderInstruction::ShowEmptyMessage(true),
                RenderInstruction::SetLoadMoreEnabled(false),
                RenderInstruction::SetRemaining(0),
            ]);
            return instructions;
        }

        instructions.push(RenderInstruction::ShowEmptyMessage(false));
        let end = self.tracker.upper_bound().min(self.active.len());
        instructions.extend(
            self.active.indices()[self.tracker.lower_bound()..end]
                .iter()
                .map(|&original_index| RenderInstruction::Append { original_index }),
        );

        let has_more = self.active.len() > self.page_size.get();
        instructions.push(RenderInstruction::SetLoadMoreEnabled(has_more));
        instructions.push(RenderInstruction::SetRemaining(if has_more {
            self.tracker.remaining_count()
        } else {
            0
        }));
        instructions
    }
}
