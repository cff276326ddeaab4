//! Domain models exchanged with the library service. These types stay
//! light-weight data holders so other layers can focus on presentation and
//! request orchestration: the client never mutates server state locally, it
//! only re-fetches, so every struct here is a transient projection of whatever
//! the service last reported.

use serde::{Deserialize, Serialize};

/// A book as reported by the library service. The ISBN is the stable
/// identifier used by the borrow and return workflows.
#[derive(Debug, Clone, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    /// Whether the book can currently be checked out. Defaults to `false`
    /// when the service omits the field rather than failing the decode.
    #[serde(default)]
    pub available: bool,
}

impl Book {
    /// Label shown next to the book in list views.
    pub fn availability_label(&self) -> &'static str {
        if self.available {
            "Available"
        } else {
            "Checked out"
        }
    }
}

/// A registered reader. `borrowed_books_count` is absent from some service
/// responses, so it defaults to zero instead of failing the decode.
#[derive(Debug, Clone, Deserialize)]
pub struct Reader {
    pub id: String,
    pub name: String,
    #[serde(rename = "borrowedBooksCount", default)]
    pub borrowed_books_count: u32,
}

/// Payload for registering a new book via `POST /books`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
}

/// Payload for registering a new reader via `POST /readers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReader {
    pub id: String,
    pub name: String,
}

/// Payload shared by the borrow and return endpoints: which book, and on
/// whose behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanSlip {
    pub isbn: String,
    #[serde(rename = "readerId")]
    pub reader_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_without_borrow_count_defaults_to_zero() {
        let reader: Reader =
            serde_json::from_str(r#"{"id":"R1","name":"Ada"}"#).expect("decode reader");
        assert_eq!(reader.borrowed_books_count, 0);
    }

    #[test]
    fn reader_decodes_camel_case_borrow_count() {
        let reader: Reader =
            serde_json::from_str(r#"{"id":"R1","name":"Ada","borrowedBooksCount":3}"#)
                .expect("decode reader");
        assert_eq!(reader.borrowed_books_count, 3);
    }

    #[test]
    fn book_without_availability_defaults_to_checked_out() {
        let book: Book =
            serde_json::from_str(r#"{"isbn":"123","title":"T","author":"A"}"#).expect("decode");
        assert!(!book.available);
        assert_eq!(book.availability_label(), "Checked out");
    }

    #[test]
    fn loan_slip_serializes_reader_id_in_camel_case() {
        let slip = LoanSlip {
            isbn: "123".into(),
            reader_id: "R1".into(),
        };
        let json = serde_json::to_string(&slip).expect("encode slip");
        assert_eq!(json, r#"{"isbn":"123","readerId":"R1"}"#);
    }
}
