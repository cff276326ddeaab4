//! HTTP gateway to the library service. Every network call in the
//! application funnels through [`ApiClient`] so headers, status handling, and
//! body decoding stay uniform. The gateway is deliberately UI-agnostic: it
//! returns typed results and leaves user-facing feedback to the presentation
//! layer.

mod client;
mod error;

pub use client::ApiClient;
pub use error::{ApiError, Result};
