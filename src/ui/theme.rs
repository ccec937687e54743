/// Day and night color schemes
use iced::theme::Palette;
use iced::{Color, Theme};

use book_browser::config::ThemeChoice;

/// (dark, light) RGB pair of a scheme. Night swaps the day colors.
pub fn scheme(choice: ThemeChoice) -> ([u8; 3], [u8; 3]) {
    const INK: [u8; 3] = [10, 10, 20];
    const PAPER: [u8; 3] = [255, 255, 255];

    match choice {
        ThemeChoice::Day => (INK, PAPER),
        ThemeChoice::Night => (PAPER, INK),
    }
}

pub fn to_iced(choice: ThemeChoice) -> Theme {
    let ([dr, dg, db], [lr, lg, lb]) = scheme(choice);
    let base = match choice {
        ThemeChoice::Day => Palette::LIGHT,
        ThemeChoice::Night => Palette::DARK,
    };

    Theme::custom(
        choice.to_string(),
        Palette {
            background: Color::from_rgb8(lr, lg, lb),
            text: Color::from_rgb8(dr, dg, db),
            ..base
        },
    )
}
