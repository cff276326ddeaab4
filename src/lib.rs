//! Core library surface for the Lending Desk TUI client.
//!
//! The application is a thin terminal front end for a remote library-lending
//! service: every piece of data on screen is a transient projection of a REST
//! response, and every user intent becomes exactly one HTTP call. The public
//! modules exposed here keep that pipeline reusable from the `bin` target and
//! from tests.
pub mod api;
pub mod config;
pub mod host;
pub mod logging;
pub mod models;
pub mod ui;
pub mod worker;

/// The gateway through which every network call flows.
pub use api::ApiClient;

/// Domain types exchanged with the service.
pub use models::{Book, Reader};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
