use iced::widget::{button, column, horizontal_space, row, scrollable, text};
use iced::{Alignment, Element, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;

use book_browser::config::{Args, BrowserConfig, LogLevel, ThemeChoice};
use book_browser::state::{
    apply_instructions, BookDetail, Catalog, FilterOption, RenderCoordinator, RenderInstruction,
};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

// Declare the ui module
mod ui;

use ui::grid::GridSurface;
use ui::overlay::SearchForm;

/// Which overlay, if any, is drawn above the grid
#[derive(Debug, Clone)]
enum Overlay {
    None,
    Detail(BookDetail),
    Search,
    Settings,
}

/// Main application state
struct BookBrowser {
    config: BrowserConfig,
    /// Owns the active result set and its pagination
    coordinator: RenderCoordinator,
    grid: GridSurface,
    overlay: Overlay,
    /// Values being edited in the search overlay
    search_form: SearchForm,
    /// Last submitted search, restored when the form is reopened
    submitted: Option<SearchForm>,
    author_options: Vec<FilterOption>,
    genre_options: Vec<FilterOption>,
    theme: ThemeChoice,
    /// Theme selected in the settings overlay, applied on save
    pending_theme: ThemeChoice,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Background catalog load finished
    CatalogLoaded(Result<Arc<Catalog>, String>),
    /// User clicked the "Import catalog" button
    ImportCatalog,
    LoadMore,
    /// A preview was clicked; carries its original catalog index
    OpenPreview(usize),
    CloseDetail,
    OpenSearch,
    CancelSearch,
    SearchTitleChanged(String),
    SearchAuthorSelected(FilterOption),
    SearchGenreSelected(FilterOption),
    SubmitSearch,
    OpenSettings,
    CancelSettings,
    SettingsThemeSelected(ThemeChoice),
    SaveSettings,
}

impl BookBrowser {
    /// Create a new instance of the application and start loading the catalog
    fn new(config: BrowserConfig) -> (Self, Task<Message>) {
        let empty = Catalog::default();
        let browser = BookBrowser {
            coordinator: RenderCoordinator::new(config.page_size),
            grid: GridSurface::default(),
            overlay: Overlay::None,
            search_form: SearchForm::reset(&empty),
            submitted: None,
            author_options: empty.author_options(),
            genre_options: empty.genre_options(),
            theme: config.theme,
            pending_theme: config.theme,
            status: "Loading catalog...".to_string(),
            config,
        };

        let task = Task::perform(
            load_catalog_async(browser.config.catalog.clone(), browser.config.db_path.clone()),
            Message::CatalogLoaded,
        );
        (browser, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogLoaded(Ok(catalog)) => {
                self.status = format!("{} books in catalog.", catalog.len());
                self.author_options = catalog.author_options();
                self.genre_options = catalog.genre_options();
                self.search_form = SearchForm::reset(&catalog);
                self.submitted = None;
                self.overlay = Overlay::None;

                let instructions = self.coordinator.initialize(catalog);
                self.render(&instructions)
            }
            Message::CatalogLoaded(Err(err)) => {
                error!(error = %err, "Failed to load catalog");
                self.status = format!("Could not load catalog: {}", err);
                Task::none()
            }
            Message::ImportCatalog => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select a JSON book catalog")
                    .add_filter("JSON catalog", &["json"])
                    .pick_file();

                match file {
                    Some(path) => {
                        self.status = format!("Importing {}...", path.display());
                        Task::perform(
                            load_catalog_async(Some(path), self.config.db_path.clone()),
                            Message::CatalogLoaded,
                        )
                    }
                    None => Task::none(),
                }
            }
            Message::LoadMore => {
                let instructions = self.coordinator.load_more();
                self.render(&instructions)
            }
            Message::OpenPreview(index) => {
                match self.coordinator.open_detail(index) {
                    Some(detail) => self.overlay = Overlay::Detail(detail),
                    None => warn!(index, "Preview index is not in the catalog"),
                }
                Task::none()
            }
            Message::CloseDetail | Message::CancelSettings => {
                self.overlay = Overlay::None;
                Task::none()
            }
            Message::OpenSearch => {
                self.search_form =
                    SearchForm::restore(self.submitted.as_ref(), self.coordinator.catalog());
                self.overlay = Overlay::Search;
                Task::none()
            }
            Message::CancelSearch => {
                self.search_form =
                    SearchForm::restore(self.submitted.as_ref(), self.coordinator.catalog());
                self.overlay = Overlay::None;
                Task::none()
            }
            Message::SearchTitleChanged(title) => {
                self.search_form.title = title;
                Task::none()
            }
            Message::SearchAuthorSelected(author) => {
                self.search_form.author = author;
                Task::none()
            }
            Message::SearchGenreSelected(genre) => {
                self.search_form.genre = genre;
                Task::none()
            }
            Message::SubmitSearch => {
                let instructions = self.coordinator.apply_filter(&self.search_form.criteria());
                self.submitted = Some(self.search_form.clone());
                self.overlay = Overlay::None;
                self.status = format!(
                    "{} of {} books match.",
                    self.coordinator.active().len(),
                    self.coordinator.catalog().len()
                );
                self.render(&instructions)
            }
            Message::OpenSettings => {
                self.pending_theme = self.theme;
                self.overlay = Overlay::Settings;
                Task::none()
            }
            Message::SettingsThemeSelected(choice) => {
                self.pending_theme = choice;
                Task::none()
            }
            Message::SaveSettings => {
                self.theme = self.pending_theme;
                info!(theme = %self.theme, "Theme changed");
                self.overlay = Overlay::None;
                Task::none()
            }
        }
    }

    /// Apply render instructions to the grid, scrolling to the top when asked
    fn render(&mut self, instructions: &[RenderInstruction]) -> Task<Message> {
        apply_instructions(self.coordinator.catalog(), instructions, &mut self.grid);

        if self.grid.take_scroll_request() {
            scrollable::scroll_to(
                ui::grid::scroll_id(),
                scrollable::AbsoluteOffset { x: 0.0, y: 0.0 },
            )
        } else {
            Task::none()
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = row![
            text("Book Browser").size(28),
            horizontal_space(),
            button("Search").on_press(Message::OpenSearch),
            button("Settings").on_press(Message::OpenSettings),
            button("Import catalog").on_press(Message::ImportCatalog),
        ]
        .spacing(10)
        .padding(20)
        .align_y(Alignment::Center);

        let base = column![
            header,
            text(self.status.as_str()).size(14),
            self.grid.view(self.coordinator.catalog()),
        ]
        .spacing(10)
        .align_x(Alignment::Center);

        match &self.overlay {
            Overlay::None => base.into(),
            Overlay::Detail(detail) => ui::overlay::modal(
                base,
                ui::overlay::detail_view(detail),
                Message::CloseDetail,
            ),
            Overlay::Search => ui::overlay::modal(
                base,
                ui::overlay::search_view(
                    &self.search_form,
                    &self.author_options,
                    &self.genre_options,
                ),
                Message::CancelSearch,
            ),
            Overlay::Settings => ui::overlay::modal(
                base,
                ui::overlay::settings_view(self.pending_theme),
                Message::CancelSettings,
            ),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        ui::theme::to_iced(self.theme)
    }
}

fn main() -> iced::Result {
    let args = Args::parse();
    initialize_tracing(args.log_level);

    let config = match BrowserConfig::from_args(args) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Invalid configuration");
            std::process::exit(2);
        }
    };
    info!(
        page_size = config.page_size.get(),
        db = ?config.db_path,
        catalog = ?config.catalog,
        "Book Browser starting"
    );

    iced::application("Book Browser", BookBrowser::update, BookBrowser::view)
        .theme(BookBrowser::theme)
        .centered()
        .run_with(move || BookBrowser::new(config))
}

/// Logs go to stderr; RUST_LOG takes precedence over --log-level
fn initialize_tracing(log_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load (and optionally import) the catalog on a blocking thread
async fn load_catalog_async(
    source: Option<PathBuf>,
    db_path: Option<PathBuf>,
) -> Result<Arc<Catalog>, String> {
    // Spawn blocking because SQLite and file IO are synchronous
    tokio::task::spawn_blocking(move || {
        book_browser::state::load_catalog(source.as_deref(), db_path.as_deref())
            .map(Arc::new)
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}
