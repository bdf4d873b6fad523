//! Async client: one GET per call over an injected `Transport`.
//!
//! Every method builds its request with `BibliaClient`, awaits exactly one
//! `Transport::get`, and parses the body. Transport and JSON failures are
//! returned unchanged. Nothing is retried or cached, and a failed call leaves
//! the client usable.

use tracing::debug;

use crate::client::{bible_names, BibliaClient};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{
    BibleList, ComparisonResult, GetBiblesOptions, ParseOptions, ParsedReference, PassageOptions,
    PassageText, ScanOptions, ScanResult, SearchOptions, SearchResult, Translation,
};

/// Async Biblia client over a `Transport`.
///
/// The translation is read when each request is built, so `set_bible` only
/// affects calls made after it. `set_bible` takes `&mut self`; share the
/// client behind your own lock if it must change while calls are in flight.
#[derive(Debug, Clone)]
pub struct Biblia<T> {
    client: BibliaClient,
    transport: T,
}

#[cfg(feature = "reqwest")]
impl Biblia<crate::transport::ReqwestTransport> {
    /// Client for the public API reading `asv` over a default `reqwest`
    /// transport. Use `with_translation` to start from another translation.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_transport(
            BibliaClient::new(api_key, Translation::default()),
            crate::transport::ReqwestTransport::new(),
        )
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(
            BibliaClient::from_config(config),
            crate::transport::ReqwestTransport::new(),
        )
    }
}

impl<T: Transport> Biblia<T> {
    pub fn with_transport(client: BibliaClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn with_translation(mut self, translation: Translation) -> Self {
        self.client.set_bible(translation);
        self
    }

    pub fn from_config_with_transport(config: &ClientConfig, transport: T) -> Self {
        Self::with_transport(BibliaClient::from_config(config), transport)
    }

    pub fn client(&self) -> &BibliaClient {
        &self.client
    }

    pub fn translation(&self) -> Translation {
        self.client.translation()
    }

    pub fn set_bible(&mut self, translation: Translation) {
        debug!(translation = %translation, "switching translation");
        self.client.set_bible(translation);
    }

    /// List the available translations.
    pub async fn get_bibles(&self, options: Option<&GetBiblesOptions>) -> Result<BibleList> {
        let request = self.client.build_get_bibles(options)?;
        let response = self.execute("find", &request).await?;
        self.client.parse_get_bibles(response)
    }

    /// Codes of every available translation, in listing order.
    pub async fn get_bible_names(&self) -> Result<Vec<String>> {
        let list = self.get_bibles(None).await?;
        Ok(bible_names(&list))
    }

    /// Parse free text as one or more references.
    pub async fn parse_text(&self, passage: &str, options: Option<&ParseOptions>) -> Result<ParsedReference> {
        let request = self.client.build_parse_text(passage, options)?;
        let response = self.execute("parse", &request).await?;
        self.client.parse_parse_text(response)
    }

    /// Find references mentioned in arbitrary text. `text` is sent unescaped.
    pub async fn scan_text(&self, text: &str, options: Option<&ScanOptions>) -> Result<ScanResult> {
        let request = self.client.build_scan_text(text, options)?;
        let response = self.execute("scan", &request).await?;
        self.client.parse_scan_text(response)
    }

    pub async fn compare(&self, first: &str, second: &str) -> Result<ComparisonResult> {
        let request = self.client.build_compare(first, second);
        let response = self.execute("compare", &request).await?;
        self.client.parse_compare(response)
    }

    /// Full-text or fuzzy search in the current translation.
    pub async fn search(&self, query: &str, options: Option<&SearchOptions>) -> Result<SearchResult> {
        let request = self.client.build_search(query, options)?;
        let response = self.execute("search", &request).await?;
        self.client.parse_search(response)
    }

    /// Passage content in the current translation.
    pub async fn get_passage(&self, passage: &str, options: Option<&PassageOptions>) -> Result<PassageText> {
        let request = self.client.build_get_passage(passage, options)?;
        let response = self.execute("content", &request).await?;
        self.client.parse_get_passage(response)
    }

    async fn execute(&self, endpoint: &'static str, request: &HttpRequest) -> Result<HttpResponse> {
        debug!(endpoint, url = %self.client.redacted_url(request), "GET");
        Ok(self.transport.get(request).await?)
    }
}
