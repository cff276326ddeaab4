//! Form state for the five input-driven workflows. Each form tracks its raw
//! field strings plus the focused field, and turns them into a typed request
//! record on submit. Validation is intentionally shallow — trim whitespace
//! and require non-empty values — because field formats (ISBN shape, reader
//! ID shape) are the service's business, not the client's.

use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{LoanSlip, NewBook, NewReader};

fn field_line(name: &str, value: &str, is_active: bool, placeholder: &str) -> Line<'static> {
    let display = if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    };
    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(format!("{name}: ")),
        Span::styled(display, style),
    ])
}

/// Fields of the "add book" form.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum BookField {
    #[default]
    Isbn,
    Title,
    Author,
}

/// Input state for registering a new book.
#[derive(Debug, Default, Clone)]
pub struct BookForm {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub active: BookField,
    pub error: Option<String>,
}

impl BookForm {
    /// Cycle focus across the three fields.
    pub fn next_field(&mut self) {
        self.active = match self.active {
            BookField::Isbn => BookField::Title,
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Isbn,
        };
    }

    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            BookField::Isbn => self.isbn.push(ch),
            BookField::Title => self.title.push(ch),
            BookField::Author => self.author.push(ch),
        }
        true
    }

    pub fn backspace(&mut self) {
        match self.active {
            BookField::Isbn => {
                self.isbn.pop();
            }
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
        }
    }

    /// Trim and validate the fields into the request payload.
    pub fn parse_inputs(&self) -> Result<NewBook> {
        let isbn = self.isbn.trim();
        if isbn.is_empty() {
            return Err(anyhow!("ISBN is required."));
        }
        let title = self.title.trim();
        if title.is_empty() {
            return Err(anyhow!("Title is required."));
        }
        let author = self.author.trim();
        if author.is_empty() {
            return Err(anyhow!("Author is required."));
        }
        Ok(NewBook {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
        })
    }

    /// Clear every field after a successful submission.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn build_line(&self, field_name: &str, field: BookField) -> Line<'static> {
        let value = match field {
            BookField::Isbn => &self.isbn,
            BookField::Title => &self.title,
            BookField::Author => &self.author,
        };
        field_line(field_name, value, self.active == field, "<required>")
    }

    pub fn value_len(&self, field: BookField) -> usize {
        match field {
            BookField::Isbn => self.isbn.chars().count(),
            BookField::Title => self.title.chars().count(),
            BookField::Author => self.author.chars().count(),
        }
    }
}

/// Fields of the "add reader" form.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum ReaderField {
    #[default]
    Id,
    Name,
}

/// Input state for registering a new reader.
#[derive(Debug, Default, Clone)]
pub struct ReaderForm {
    pub id: String,
    pub name: String,
    pub active: ReaderField,
    pub error: Option<String>,
}

impl ReaderForm {
    pub fn next_field(&mut self) {
        self.active = match self.active {
            ReaderField::Id => ReaderField::Name,
            ReaderField::Name => ReaderField::Id,
        };
    }

    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            ReaderField::Id => self.id.push(ch),
            ReaderField::Name => self.name.push(ch),
        }
        true
    }

    pub fn backspace(&mut self) {
        match self.active {
            ReaderField::Id => {
                self.id.pop();
            }
            ReaderField::Name => {
                self.name.pop();
            }
        }
    }

    pub fn parse_inputs(&self) -> Result<NewReader> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(anyhow!("Reader ID is required."));
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Name is required."));
        }
        Ok(NewReader {
            id: id.to_string(),
            name: name.to_string(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn build_line(&self, field_name: &str, field: ReaderField) -> Line<'static> {
        let value = match field {
            ReaderField::Id => &self.id,
            ReaderField::Name => &self.name,
        };
        field_line(field_name, value, self.active == field, "<required>")
    }

    pub fn value_len(&self, field: ReaderField) -> usize {
        match field {
            ReaderField::Id => self.id.chars().count(),
            ReaderField::Name => self.name.chars().count(),
        }
    }
}

/// Fields of the borrow/return forms.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum LoanField {
    #[default]
    Isbn,
    ReaderId,
}

/// Input state shared by the borrow and return workflows; both submit the
/// same slip, just to different endpoints.
#[derive(Debug, Default, Clone)]
pub struct LoanForm {
    pub isbn: String,
    pub reader_id: String,
    pub active: LoanField,
    pub error: Option<String>,
}

impl LoanForm {
    pub fn next_field(&mut self) {
        self.active = match self.active {
            LoanField::Isbn => LoanField::ReaderId,
            LoanField::ReaderId => LoanField::Isbn,
        };
    }

    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            LoanField::Isbn => self.isbn.push(ch),
            LoanField::ReaderId => self.reader_id.push(ch),
        }
        true
    }

    pub fn backspace(&mut self) {
        match self.active {
            LoanField::Isbn => {
                self.isbn.pop();
            }
            LoanField::ReaderId => {
                self.reader_id.pop();
            }
        }
    }

    pub fn parse_inputs(&self) -> Result<LoanSlip> {
        let isbn = self.isbn.trim();
        if isbn.is_empty() {
            return Err(anyhow!("ISBN is required."));
        }
        let reader_id = self.reader_id.trim();
        if reader_id.is_empty() {
            return Err(anyhow!("Reader ID is required."));
        }
        Ok(LoanSlip {
            isbn: isbn.to_string(),
            reader_id: reader_id.to_string(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn build_line(&self, field_name: &str, field: LoanField) -> Line<'static> {
        let value = match field {
            LoanField::Isbn => &self.isbn,
            LoanField::ReaderId => &self.reader_id,
        };
        field_line(field_name, value, self.active == field, "<required>")
    }

    pub fn value_len(&self, field: LoanField) -> usize {
        match field {
            LoanField::Isbn => self.isbn.chars().count(),
            LoanField::ReaderId => self.reader_id.chars().count(),
        }
    }
}

/// Single-field search form. Unlike the others, an empty value is legal —
/// the service decides what an empty author query means.
#[derive(Debug, Default, Clone)]
pub struct SearchForm {
    pub author: String,
}

impl SearchForm {
    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.author.push(ch);
        true
    }

    pub fn backspace(&mut self) {
        self.author.pop();
    }

    /// The trimmed author value to send.
    pub fn query(&self) -> String {
        self.author.trim().to_string()
    }

    pub fn build_line(&self) -> Line<'static> {
        field_line("Author", &self.author, true, "<any author>")
    }

    pub fn value_len(&self) -> usize {
        self.author.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_form_trims_fields_into_payload() {
        let form = BookForm {
            isbn: " 123 ".into(),
            title: " T ".into(),
            author: " A ".into(),
            ..Default::default()
        };
        let book = form.parse_inputs().expect("valid form");
        assert_eq!(
            book,
            NewBook {
                isbn: "123".into(),
                title: "T".into(),
                author: "A".into()
            }
        );
    }

    #[test]
    fn book_form_rejects_blank_required_field() {
        let form = BookForm {
            isbn: "123".into(),
            title: "   ".into(),
            author: "A".into(),
            ..Default::default()
        };
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn loan_form_builds_a_slip() {
        let form = LoanForm {
            isbn: "123".into(),
            reader_id: " R1 ".into(),
            ..Default::default()
        };
        let slip = form.parse_inputs().expect("valid form");
        assert_eq!(slip.reader_id, "R1");
    }

    #[test]
    fn search_form_allows_empty_query() {
        let form = SearchForm::default();
        assert_eq!(form.query(), "");
    }

    #[test]
    fn push_char_rejects_control_characters() {
        let mut form = ReaderForm::default();
        assert!(!form.push_char('\u{7}'));
        assert!(form.push_char('R'));
        assert_eq!(form.id, "R");
    }

    #[test]
    fn next_field_cycles() {
        let mut form = BookForm::default();
        form.next_field();
        assert_eq!(form.active, BookField::Title);
        form.next_field();
        form.next_field();
        assert_eq!(form.active, BookField::Isbn);
    }
}
