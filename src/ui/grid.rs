/// Preview grid
///
/// Receives render instructions from the coordinator and turns them into
/// the scrollable grid of preview cards plus the "Show more" button.
use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Element, Length};
use iced_aw::Wrap;

use book_browser::state::{Book, Catalog, RenderSurface};

use crate::Message;

pub const EMPTY_MESSAGE: &str = "No results found. Your filters might be too narrow.";

const CARD_WIDTH: f32 = 200.0;

/// Scrollable id of the grid, used to jump back to the top
pub fn scroll_id() -> scrollable::Id {
    scrollable::Id::new("preview-grid")
}

/// Display state of the preview list
#[derive(Debug, Default)]
pub struct GridSurface {
    /// Original catalog indices, in display order
    previews: Vec<usize>,
    load_more_enabled: bool,
    remaining: usize,
    empty_visible: bool,
    scroll_requested: bool,
}

impl RenderSurface for GridSurface {
    fn clear(&mut self) {
        self.previews.clear();
    }

    fn append_preview(&mut self, _book: &Book, original_index: usize) {
        self.previews.push(original_index);
    }

    fn set_load_more_enabled(&mut self, enabled: bool) {
        self.load_more_enabled = enabled;
    }

    fn set_remaining(&mut self, remaining: usize) {
        self.remaining = remaining;
    }

    fn set_empty_message_visible(&mut self, visible: bool) {
        self.empty_visible = visible;
    }

    fn scroll_to_top(&mut self) {
        self.scroll_requested = true;
    }
}

impl GridSurface {
    pub fn previews(&self) -> &[usize] {
        &self.previews
    }

    pub fn load_more_enabled(&self) -> bool {
        self.load_more_enabled
    }

    /// Text of the load-more label
    pub fn remaining_label(&self) -> String {
        format!("({})", self.remaining)
    }

    pub fn empty_visible(&self) -> bool {
        self.empty_visible
    }

    /// Returns a pending scroll-to-top request and clears it
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    pub fn view<'a>(&'a self, catalog: &'a Catalog) -> Element<'a, Message> {
        let cards: Vec<Element<'a, Message>> = self
            .previews
            .iter()
            .filter_map(|&index| {
                let book = catalog.get(index)?;
                let author = catalog.author_name(&book.author).unwrap_or(&book.author);
                Some(preview_card(book, author, index))
            })
            .collect();

        let mut content = column![Wrap::with_elements(cards)]
            .spacing(20)
            .padding(20)
            .width(Length::Fill);

        if self.empty_visible {
            content = content.push(text(EMPTY_MESSAGE).size(18));
        }

        let show_more = button(row![text("Show more"), text(self.remaining_label())].spacing(8))
            .padding(10)
            .on_press_maybe(self.load_more_enabled.then_some(Message::LoadMore));
        content = content.push(show_more);

        scrollable(content)
            .id(scroll_id())
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

/// Placeholder for books without a cover URI
pub const NO_COVER: &str = "No cover image";

pub fn cover_text(image: &str) -> &str {
    if image.trim().is_empty() {
        NO_COVER
    } else {
        image
    }
}

/// Cover, title and author, top to bottom
fn card_lines<'a>(book: &'a Book, author: &'a str) -> [&'a str; 3] {
    [cover_text(&book.image), book.title.as_str(), author]
}

fn preview_card<'a>(book: &'a Book, author: &'a str, index: usize) -> Element<'a, Message> {
    let [cover, title, author] = card_lines(book, author);
    let info = column![
        text(cover).size(11),
        text(title).size(16),
        text(author).size(13),
    ]
    .spacing(6)
    .width(Length::Fixed(CARD_WIDTH));

    container(
        button(info)
            .padding(12)
            .style(button::secondary)
            .on_press(Message::OpenPreview(index)),
    )
    .padding(6)
    .into()
}
