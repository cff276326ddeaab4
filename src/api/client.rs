use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use super::error::{ApiError, Result};
use crate::models::{Book, LoanSlip, NewBook, NewReader, Reader};

/// Thin blocking client over the library REST endpoints.
///
/// One attempt per call, no retries, no timeout configuration: resilience
/// policy belongs to the service side. The client runs on the background
/// worker thread, never on the UI thread.
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Build a client against the given base URL. A trailing slash is
    /// stripped so endpoint paths can always start with one.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: Client::new(),
        }
    }

    /// All books currently marked available.
    pub fn available_books(&self) -> Result<Vec<Book>> {
        self.fetch("/books/available", self.http.get(self.endpoint("/books/available")))
    }

    /// Books matching the given author. An empty author is a legal search;
    /// the service decides what it means. The value is percent-encoded here,
    /// never by callers.
    pub fn search_books(&self, author: &str) -> Result<Vec<Book>> {
        self.fetch("/books/search", self.search_builder(author))
    }

    /// All registered readers.
    pub fn readers(&self) -> Result<Vec<Reader>> {
        self.fetch("/readers", self.http.get(self.endpoint("/readers")))
    }

    /// Register a new book.
    pub fn add_book(&self, book: &NewBook) -> Result<()> {
        self.post_ack("/books", book)
    }

    /// Register a new reader.
    pub fn add_reader(&self, reader: &NewReader) -> Result<()> {
        self.post_ack("/readers", reader)
    }

    /// Check a book out to a reader.
    pub fn borrow_book(&self, slip: &LoanSlip) -> Result<()> {
        self.post_ack("/books/borrow", slip)
    }

    /// Check a book back in.
    pub fn return_book(&self, slip: &LoanSlip) -> Result<()> {
        self.post_ack("/books/return", slip)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn search_builder(&self, author: &str) -> RequestBuilder {
        self.http
            .get(self.endpoint("/books/search"))
            .query(&[("author", author)])
    }

    /// Send a request and run the shared status check. The JSON content type
    /// is injected on every call so no call site has to remember it.
    fn dispatch(&self, path: &str, builder: RequestBuilder) -> Result<reqwest::blocking::Response> {
        let response = builder
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .map_err(|err| {
                error!(path, %err, "transport failure");
                ApiError::Transport(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(path, %status, "service rejected request");
            return Err(ApiError::Http { status });
        }

        debug!(path, %status, "request succeeded");
        Ok(response)
    }

    /// GET-style call: the body must decode into `T`.
    fn fetch<T: DeserializeOwned>(&self, path: &str, builder: RequestBuilder) -> Result<T> {
        let response = self.dispatch(path, builder)?;
        let body = response.text().map_err(ApiError::Transport)?;
        serde_json::from_str(&body).map_err(|err| {
            error!(path, %err, "undecodable response body");
            ApiError::Decode(err)
        })
    }

    /// POST-style call where the response is an acknowledgment. Some
    /// endpoints echo the created entity, others return an empty body; both
    /// count as success, but a non-empty body that is not JSON does not.
    fn post_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let response = self.dispatch(path, self.http.post(self.endpoint(path)).json(body))?;
        let body = response.text().map_err(ApiError::Transport)?;
        if body.trim().is_empty() {
            return Ok(());
        }
        serde_json::from_str::<serde_json::Value>(&body)
            .map(|_| ())
            .map_err(|err| {
                error!(path, %err, "undecodable ack body");
                ApiError::Decode(err)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_on_base_url_is_stripped() {
        let client = ApiClient::new("http://localhost:8080/api/");
        assert_eq!(
            client.endpoint("/books/available"),
            "http://localhost:8080/api/books/available"
        );
    }

    #[test]
    fn search_query_is_percent_encoded() {
        let client = ApiClient::new("http://localhost:8080/api");
        let request = client
            .search_builder("O'Brien & Co")
            .build()
            .expect("build search request");
        assert_eq!(request.url().query(), Some("author=O%27Brien+%26+Co"));
    }

    #[test]
    fn empty_author_is_a_legal_search() {
        let client = ApiClient::new("http://localhost:8080/api");
        let request = client.search_builder("").build().expect("build search request");
        assert_eq!(request.url().query(), Some("author="));
    }
}
