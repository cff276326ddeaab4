//! List views: pure functions from a load state to display lines. Keeping
//! them free of widget state means every placeholder rule can be tested
//! without a terminal.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::{Book, Reader};

/// Lifecycle of a server-backed list. `Failed` is deliberately distinct from
/// an empty `Ready` so the UI can tell "nothing there" from "could not ask".
#[derive(Debug)]
pub enum LoadState<T> {
    /// No request issued yet (initial state of the search view).
    Idle,
    /// A request is in flight.
    Loading,
    /// The service answered; the vector may be empty.
    Ready(Vec<T>),
    /// The request failed.
    Failed,
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

/// Placeholder texts for one list view. The three strings must stay
/// distinguishable; tests rely on it.
pub struct Placeholders {
    pub idle: &'static str,
    pub empty: &'static str,
    pub failed: &'static str,
}

pub const BOOKS_PLACEHOLDERS: Placeholders = Placeholders {
    idle: "Loading…",
    empty: "No books are available right now.",
    failed: "Could not load books from the service.",
};

pub const READERS_PLACEHOLDERS: Placeholders = Placeholders {
    idle: "Loading…",
    empty: "No readers are registered yet.",
    failed: "Could not load readers from the service.",
};

pub const SEARCH_PLACEHOLDERS: Placeholders = Placeholders {
    idle: "Enter an author and press Enter to search.",
    empty: "No books matched that author.",
    failed: "The search could not be completed.",
};

fn placeholder_line(text: &'static str, style: Style) -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(text, style))]
}

fn placeholder_for<T>(state: &LoadState<T>, texts: &Placeholders) -> Option<Vec<Line<'static>>> {
    match state {
        LoadState::Idle => Some(placeholder_line(
            texts.idle,
            Style::default().fg(Color::DarkGray),
        )),
        LoadState::Loading => Some(placeholder_line(
            "Loading…",
            Style::default().fg(Color::DarkGray),
        )),
        LoadState::Ready(items) if items.is_empty() => Some(placeholder_line(
            texts.empty,
            Style::default().fg(Color::Gray),
        )),
        LoadState::Failed => Some(placeholder_line(texts.failed, Style::default().fg(Color::Red))),
        LoadState::Ready(_) => None,
    }
}

/// Render a book list in server order, one card of lines per book.
pub fn book_lines(state: &LoadState<Book>, texts: &Placeholders) -> Vec<Line<'static>> {
    if let Some(placeholder) = placeholder_for(state, texts) {
        return placeholder;
    }
    let LoadState::Ready(books) = state else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(books.len() * 4);
    for book in books {
        lines.push(Line::from(Span::styled(
            book.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("  Author: {}", book.author)));
        lines.push(Line::from(format!("  ISBN: {}", book.isbn)));
        let status_style = if book.available {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };
        lines.push(Line::from(Span::styled(
            format!("  {}", book.availability_label()),
            status_style,
        )));
        lines.push(Line::from(""));
    }
    lines
}

/// Render the reader list in server order.
pub fn reader_lines(state: &LoadState<Reader>) -> Vec<Line<'static>> {
    if let Some(placeholder) = placeholder_for(state, &READERS_PLACEHOLDERS) {
        return placeholder;
    }
    let LoadState::Ready(readers) = state else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(readers.len() * 4);
    for reader in readers {
        lines.push(Line::from(Span::styled(
            reader.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("  ID: {}", reader.id)));
        lines.push(Line::from(format!(
            "  Books borrowed: {}",
            reader.borrowed_books_count
        )));
        lines.push(Line::from(""));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, available: bool) -> Book {
        Book {
            isbn: "123".into(),
            title: title.into(),
            author: "A".into(),
            available,
        }
    }

    fn text_of(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_result_shows_empty_placeholder_not_error() {
        let lines = book_lines(&LoadState::Ready(Vec::new()), &BOOKS_PLACEHOLDERS);
        let text = text_of(&lines);
        assert!(text.contains(BOOKS_PLACEHOLDERS.empty));
        assert!(!text.contains(BOOKS_PLACEHOLDERS.failed));
    }

    #[test]
    fn failed_load_shows_error_placeholder_distinct_from_empty() {
        let lines = book_lines(&LoadState::Failed, &BOOKS_PLACEHOLDERS);
        let text = text_of(&lines);
        assert!(text.contains(BOOKS_PLACEHOLDERS.failed));
        assert!(!text.contains(BOOKS_PLACEHOLDERS.empty));
        assert_ne!(BOOKS_PLACEHOLDERS.failed, BOOKS_PLACEHOLDERS.empty);
    }

    #[test]
    fn books_render_in_server_order() {
        let state = LoadState::Ready(vec![book("Zeta", true), book("Alpha", false)]);
        let text = text_of(&book_lines(&state, &BOOKS_PLACEHOLDERS));
        let zeta = text.find("Zeta").expect("first book rendered");
        let alpha = text.find("Alpha").expect("second book rendered");
        assert!(zeta < alpha, "renderer must not sort");
        assert!(text.contains("Available"));
        assert!(text.contains("Checked out"));
    }

    #[test]
    fn readers_render_defaulted_borrow_count() {
        let state = LoadState::Ready(vec![Reader {
            id: "R1".into(),
            name: "Ada".into(),
            borrowed_books_count: 0,
        }]);
        let text = text_of(&reader_lines(&state));
        assert!(text.contains("Books borrowed: 0"));
    }

    #[test]
    fn search_idle_state_prompts_instead_of_loading() {
        let lines = book_lines(&LoadState::Idle, &SEARCH_PLACEHOLDERS);
        assert!(text_of(&lines).contains("Enter an author"));
    }
}
