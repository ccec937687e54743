/// Modal overlays: book detail, search form and theme settings
use iced::widget::{
    button, center, column, container, horizontal_space, mouse_area, opaque, pick_list, row, stack,
    text, text_input,
};
use iced::{Color, Element, Length};

use book_browser::config::ThemeChoice;
use book_browser::state::{BookDetail, Catalog, FilterCriteria, FilterOption};

use crate::ui::grid::cover_text;
use crate::Message;

const OVERLAY_WIDTH: f32 = 520.0;

/// Values currently entered in the search form
#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    pub title: String,
    pub author: FilterOption,
    pub genre: FilterOption,
}

impl SearchForm {
    /// An empty form with both pick lists on their "All" entry
    pub fn reset(catalog: &Catalog) -> Self {
        let first = |options: Vec<FilterOption>| options.into_iter().next();
        Self {
            title: String::new(),
            author: first(catalog.author_options()).unwrap_or_else(all_option),
            genre: first(catalog.genre_options()).unwrap_or_else(all_option),
        }
    }

    /// The form shown when the overlay opens or is cancelled: the last
    /// submitted values, or an empty form if nothing was submitted yet.
    pub fn restore(submitted: Option<&SearchForm>, catalog: &Catalog) -> Self {
        match submitted {
            Some(form) => form.clone(),
            None => Self::reset(catalog),
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            title: self.title.clone(),
            author: self.author.key.clone(),
            genre: self.genre.key.clone(),
        }
    }
}

fn all_option() -> FilterOption {
    FilterOption {
        key: book_browser::state::ALL.to_string(),
        label: "All".to_string(),
    }
}

/// Draw `content` centered above a dimmed `base`; clicking outside sends `on_blur`
pub fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(
                    Color {
                        a: 0.8,
                        ..Color::BLACK
                    }
                    .into(),
                ),
                ..container::Style::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

fn panel<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fixed(OVERLAY_WIDTH))
        .padding(24)
        .style(container::rounded_box)
        .into()
}

pub fn detail_view(detail: &BookDetail) -> Element<'_, Message> {
    panel(
        column![
            text(cover_text(&detail.image)).size(12),
            text(detail.title.as_str()).size(26),
            text(detail.subtitle.as_str()).size(16),
            text(detail.description.as_str()).size(14),
            row![
                horizontal_space(),
                button("Close").on_press(Message::CloseDetail)
            ],
        ]
        .spacing(14),
    )
}

pub fn search_view<'a>(
    form: &'a SearchForm,
    authors: &'a [FilterOption],
    genres: &'a [FilterOption],
) -> Element<'a, Message> {
    panel(
        column![
            text("Search").size(24),
            text("Title"),
            text_input("Any", &form.title)
                .on_input(Message::SearchTitleChanged)
                .on_submit(Message::SubmitSearch)
                .padding(8),
            text("Genre"),
            pick_list(genres, Some(form.genre.clone()), Message::SearchGenreSelected)
                .width(Length::Fill),
            text("Author"),
            pick_list(authors, Some(form.author.clone()), Message::SearchAuthorSelected)
                .width(Length::Fill),
            row![
                horizontal_space(),
                button("Cancel")
                    .style(button::secondary)
                    .on_press(Message::CancelSearch),
                button("Search").on_press(Message::SubmitSearch),
            ]
            .spacing(10),
        ]
        .spacing(10),
    )
}

pub fn settings_view<'a>(choice: ThemeChoice) -> Element<'a, Message> {
    panel(
        column![
            text("Settings").size(24),
            text("Theme"),
            pick_list(ThemeChoice::ALL, Some(choice), Message::SettingsThemeSelected)
                .width(Length::Fill),
            row![
                horizontal_space(),
                button("Cancel")
                    .style(button::secondary)
                    .on_press(Message::CancelSettings),
                button("Save").on_press(Message::SaveSettings),
            ]
            .spacing(10),
        ]
        .spacing(10),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use book_browser::state::ALL;

    #[test]
    fn test_reset_form_is_unrestricted() {
        let form = SearchForm::reset(&Catalog::default());
        assert_eq!(form.author.key, ALL);
        assert_eq!(form.genre.key, ALL);
        assert!(form.criteria().is_unrestricted());
    }

    #[test]
    fn test_restore_prefers_last_submitted_form() {
        let catalog = Catalog::default();
        let submitted = SearchForm {
            title: "sea".to_string(),
            ..SearchForm::reset(&catalog)
        };

        assert_eq!(SearchForm::restore(Some(&submitted), &catalog), submitted);
        assert_eq!(
            SearchForm::restore(None, &catalog),
            SearchForm::reset(&catalog)
        );
    }

    #[test]
    fn test_criteria_uses_option_keys() {
        let form = SearchForm {
            title: "dune".to_string(),
            author: FilterOption {
                key: "a2".to_string(),
                label: "Frank Herbert".to_string(),
            },
            genre: all_option(),
        };
        let criteria = form.criteria();
        assert_eq!(criteria.author, "a2");
        assert_eq!(criteria.genre, ALL);
        assert_eq!(criteria.title, "dune");
    }
}
