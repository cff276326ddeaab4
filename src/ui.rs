//! Terminal user interface: the tabbed application state, its forms and list
//! views, the footer notice board, and the crossterm-backed draw loop.

mod app;
mod forms;
mod helpers;
mod notice;
mod tabs;
mod terminal;
mod views;

pub use app::App;
pub use tabs::Tab;
pub use terminal::run_app;
