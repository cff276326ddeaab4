//! Background worker that performs the actual HTTP calls.
//!
//! The UI thread never blocks on the network: it sends an [`ApiCommand`] and
//! keeps handling input while the worker resolves the call and pushes an
//! [`ApiEvent`] back. Events are drained once per draw loop tick.
//!
//! Data-bearing loads carry a generation token. The app only applies a
//! completion event whose token still matches the view's current token, so a
//! response that arrives after the user has already triggered a newer load
//! (or navigated away and back) is discarded instead of clobbering fresher
//! state. Commands are processed one at a time; two submissions can still
//! resolve out of order relative to unrelated views, which is tolerated
//! because every event only touches its own view.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, info};

use crate::api::{ApiClient, ApiError};
use crate::models::{Book, LoanSlip, NewBook, NewReader, Reader};

/// Requests from the UI thread to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    LoadAvailableBooks { token: u64 },
    LoadReaders { token: u64 },
    SearchBooks { token: u64, author: String },
    AddBook { book: NewBook },
    AddReader { reader: NewReader },
    BorrowBook { slip: LoanSlip },
    ReturnBook { slip: LoanSlip },
}

/// Completions from the worker back to the UI thread. Load events echo the
/// token of the command that produced them.
#[derive(Debug)]
pub enum ApiEvent {
    AvailableBooksLoaded {
        token: u64,
        result: Result<Vec<Book>, ApiError>,
    },
    ReadersLoaded {
        token: u64,
        result: Result<Vec<Reader>, ApiError>,
    },
    SearchFinished {
        token: u64,
        result: Result<Vec<Book>, ApiError>,
    },
    BookAdded { result: Result<(), ApiError> },
    ReaderAdded { result: Result<(), ApiError> },
    BookBorrowed { result: Result<(), ApiError> },
    BookReturned { result: Result<(), ApiError> },
}

/// Start the worker thread and hand back its channel endpoints.
pub fn spawn(client: ApiClient) -> std::io::Result<(Sender<ApiCommand>, Receiver<ApiEvent>)> {
    let (command_tx, command_rx) = mpsc::channel();
    let (event_tx, event_rx) = mpsc::channel();
    thread::Builder::new()
        .name("api-worker".to_string())
        .spawn(move || run(client, command_rx, event_tx))?;
    Ok((command_tx, event_rx))
}

/// Worker loop: exits once the UI side drops either channel endpoint.
fn run(client: ApiClient, commands: Receiver<ApiCommand>, events: Sender<ApiEvent>) {
    info!("api worker started");
    while let Ok(command) = commands.recv() {
        debug!(?command, "handling api command");
        let event = match command {
            ApiCommand::LoadAvailableBooks { token } => ApiEvent::AvailableBooksLoaded {
                token,
                result: client.available_books(),
            },
            ApiCommand::LoadReaders { token } => ApiEvent::ReadersLoaded {
                token,
                result: client.readers(),
            },
            ApiCommand::SearchBooks { token, author } => ApiEvent::SearchFinished {
                token,
                result: client.search_books(&author),
            },
            ApiCommand::AddBook { book } => ApiEvent::BookAdded {
                result: client.add_book(&book),
            },
            ApiCommand::AddReader { reader } => ApiEvent::ReaderAdded {
                result: client.add_reader(&reader),
            },
            ApiCommand::BorrowBook { slip } => ApiEvent::BookBorrowed {
                result: client.borrow_book(&slip),
            },
            ApiCommand::ReturnBook { slip } => ApiEvent::BookReturned {
                result: client.return_book(&slip),
            },
        };
        if events.send(event).is_err() {
            break;
        }
    }
    info!("api worker stopped");
}
