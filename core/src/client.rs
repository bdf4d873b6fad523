//! Request builder and response parser for the Biblia API.
//!
//! # Design
//! `BibliaClient` holds the API key, the current translation and the base URL,
//! and does no I/O. Each endpoint is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The async `Biblia` wrapper pairs them around a `Transport`;
//! callers that own their HTTP stack can drive the two halves directly.
//!
//! URL layouts are fixed by the remote API and by existing fixtures, including
//! where the option fragment sits relative to the required parameter.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::{encode_component, encode_options, QueryOptions};
use crate::types::{
    BibleList, ComparisonResult, GetBiblesOptions, ParseOptions, ParsedReference, PassageOptions,
    PassageText, ScanOptions, ScanResult, SearchOptions, SearchResult, Translation,
};

/// Synchronous request builder and response parser for the Biblia API.
#[derive(Debug, Clone)]
pub struct BibliaClient {
    api_key: String,
    translation: Translation,
    base_url: String,
}

impl BibliaClient {
    pub fn new(api_key: impl Into<String>, translation: Translation) -> Self {
        Self {
            api_key: api_key.into(),
            translation,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_key.clone(), config.translation).with_base_url(&config.base_url)
    }

    /// Point the client at another host, e.g. a local stand-in for tests.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn translation(&self) -> Translation {
        self.translation
    }

    /// Change the translation used by subsequent `build_search` and
    /// `build_get_passage` calls. Requests already built are unaffected.
    pub fn set_bible(&mut self, translation: Translation) {
        self.translation = translation;
    }

    /// The request URL with this client's API key masked, for logging.
    /// The key is always the last parameter.
    pub fn redacted_url(&self, request: &HttpRequest) -> String {
        let suffix = format!("key={}", self.api_key);
        match request.url.strip_suffix(&suffix) {
            Some(prefix) => format!("{prefix}key=***"),
            None => request.url.clone(),
        }
    }

    pub fn build_get_bibles(&self, options: Option<&GetBiblesOptions>) -> Result<HttpRequest> {
        let params = encode(options)?;
        Ok(HttpRequest::get(format!(
            "{}/find.js?{params}key={}",
            self.base_url, self.api_key
        )))
    }

    pub fn build_parse_text(&self, passage: &str, options: Option<&ParseOptions>) -> Result<HttpRequest> {
        let params = encode(options)?;
        Ok(HttpRequest::get(format!(
            "{}/parse?passage={}&{params}key={}",
            self.base_url,
            encode_component(passage),
            self.api_key
        )))
    }

    /// `text` is sent as given; escaping it is the caller's job.
    pub fn build_scan_text(&self, text: &str, options: Option<&ScanOptions>) -> Result<HttpRequest> {
        let params = encode(options)?;
        Ok(HttpRequest::get(format!(
            "{}/scan.js?{params}text={text}&key={}",
            self.base_url, self.api_key
        )))
    }

    pub fn build_compare(&self, first: &str, second: &str) -> HttpRequest {
        HttpRequest::get(format!(
            "{}/compare?first={}&second={}&key={}",
            self.base_url,
            encode_component(first),
            encode_component(second),
            self.api_key
        ))
    }

    pub fn build_search(&self, query: &str, options: Option<&SearchOptions>) -> Result<HttpRequest> {
        let params = encode(options)?;
        Ok(HttpRequest::get(format!(
            "{}/search/{}.js?query={}&{params}key={}",
            self.base_url,
            self.translation,
            encode_component(query),
            self.api_key
        )))
    }

    pub fn build_get_passage(&self, passage: &str, options: Option<&PassageOptions>) -> Result<HttpRequest> {
        let params = encode(options)?;
        let format = if options.is_some_and(|o| o.html) { "html." } else { "" };
        Ok(HttpRequest::get(format!(
            "{}/content/{}.{format}js?{params}passage={}&key={}",
            self.base_url,
            self.translation,
            encode_component(passage),
            self.api_key
        )))
    }

    pub fn parse_get_bibles(&self, response: HttpResponse) -> Result<BibleList> {
        parse_json(response)
    }

    pub fn parse_parse_text(&self, response: HttpResponse) -> Result<ParsedReference> {
        parse_json(response)
    }

    pub fn parse_scan_text(&self, response: HttpResponse) -> Result<ScanResult> {
        parse_json(response)
    }

    pub fn parse_compare(&self, response: HttpResponse) -> Result<ComparisonResult> {
        parse_json(response)
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<SearchResult> {
        parse_json(response)
    }

    pub fn parse_get_passage(&self, response: HttpResponse) -> Result<PassageText> {
        parse_json(response)
    }
}

/// Project the translation codes out of a bible listing, in listing order.
pub fn bible_names(list: &BibleList) -> Vec<String> {
    list.bibles.iter().map(|b| b.bible.clone()).collect()
}

fn encode<T: Serialize>(options: Option<&T>) -> Result<String> {
    let options = options.map(QueryOptions::from_options).transpose()?;
    Ok(encode_options(options.as_ref()))
}

/// Deserialize the body whatever the status; the status is only logged.
fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T> {
    tracing::trace!(status = response.status, bytes = response.body.len(), "parsing response");
    Ok(serde_json::from_str(&response.body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::types::{PassageStyle, SearchMode};

    const BASE: &str = "https://api.biblia.com/v1/bible";

    fn client() -> BibliaClient {
        BibliaClient::new("KEY", Translation::Asv)
    }

    #[test]
    fn build_get_bibles_without_options() {
        let req = client().build_get_bibles(None).unwrap();
        assert_eq!(req.url, format!("{BASE}/find.js?key=KEY"));
    }

    #[test]
    fn build_get_bibles_with_limit() {
        let opts = GetBiblesOptions {
            limit: Some(2),
            ..Default::default()
        };
        let req = client().build_get_bibles(Some(&opts)).unwrap();
        assert_eq!(req.url, format!("{BASE}/find.js?&limit=2&key=KEY"));
    }

    #[test]
    fn build_parse_text_encodes_passage() {
        let req = client().build_parse_text("2 kgs 3-4", None).unwrap();
        assert_eq!(req.url, format!("{BASE}/parse?passage=2%20kgs%203-4&key=KEY"));
    }

    #[test]
    fn build_parse_text_places_options_after_passage() {
        let opts = ParseOptions {
            style: Some(crate::types::ReferenceStyle::Short),
        };
        let req = client().build_parse_text("John 3:16", Some(&opts)).unwrap();
        assert_eq!(
            req.url,
            format!("{BASE}/parse?passage=John%203%3A16&&style=short&key=KEY")
        );
    }

    #[test]
    fn build_scan_text_passes_text_raw() {
        let opts = ScanOptions {
            tag_chapters: Some(false),
        };
        let req = client().build_scan_text("see John 3:16", Some(&opts)).unwrap();
        assert_eq!(
            req.url,
            format!("{BASE}/scan.js?&tagChapters=false&text=see John 3:16&key=KEY")
        );
    }

    #[test]
    fn build_compare_encodes_both_references() {
        let req = client().build_compare("Ge 3:4", "Ge 3:1-10");
        assert_eq!(
            req.url,
            format!("{BASE}/compare?first=Ge%203%3A4&second=Ge%203%3A1-10&key=KEY")
        );
    }

    #[test]
    fn build_search_uses_current_translation() {
        let mut c = client();
        c.set_bible(Translation::Kjv);
        let req = c.build_search("bread", None).unwrap();
        assert_eq!(req.url, format!("{BASE}/search/kjv.js?query=bread&key=KEY"));
    }

    #[test]
    fn build_search_accepts_late_translation_codes() {
        let mut c = client();
        c.set_bible("ylt".parse().unwrap());
        let req = c.build_search("bread", None).unwrap();
        assert_eq!(req.url, format!("{BASE}/search/ylt.js?query=bread&key=KEY"));
    }

    #[test]
    fn redacted_url_masks_whole_key() {
        let c = BibliaClient::new("abckey=def", Translation::Asv);
        let req = c.build_get_bibles(None).unwrap();
        assert_eq!(c.redacted_url(&req), format!("{BASE}/find.js?key=***"));
        assert!(!c.redacted_url(&req).contains("def"));
    }

    #[test]
    fn redacted_url_leaves_foreign_urls_alone() {
        let req = HttpRequest::get("http://localhost/find.js");
        assert_eq!(client().redacted_url(&req), "http://localhost/find.js");
    }

    #[test]
    fn build_search_with_options_keeps_double_separators() {
        let opts = SearchOptions {
            mode: Some(SearchMode::Verse),
            limit: Some(5),
            ..Default::default()
        };
        let req = client().build_search("living water", Some(&opts)).unwrap();
        assert_eq!(
            req.url,
            format!("{BASE}/search/asv.js?query=living%20water&&mode=verse&&limit=5&key=KEY")
        );
    }

    #[test]
    fn build_get_passage_plain() {
        let req = client().build_get_passage("John 3:16", None).unwrap();
        assert_eq!(req.url, format!("{BASE}/content/asv.js?passage=John%203%3A16&key=KEY"));

        let req = client()
            .build_get_passage("John 3:16", Some(&PassageOptions::default()))
            .unwrap();
        assert_eq!(req.url, format!("{BASE}/content/asv.js?passage=John%203%3A16&key=KEY"));
    }

    #[test]
    fn build_get_passage_html_selects_path_and_is_not_a_query_key() {
        let opts = PassageOptions {
            html: true,
            style: Some(PassageStyle::FullyFormattedWithFootnotes),
            ..Default::default()
        };
        let req = client().build_get_passage("John 3:16-20", Some(&opts)).unwrap();
        assert_eq!(
            req.url,
            format!(
                "{BASE}/content/asv.html.js?&style=fullyFormattedWithFootnotes&passage=John%203%3A16-20&key=KEY"
            )
        );
        assert!(!req.url.contains("html=true"));
    }

    #[test]
    fn set_bible_does_not_touch_built_requests() {
        let mut c = client();
        let before = c.build_get_passage("Ps 23", None).unwrap();
        c.set_bible(Translation::Leb);
        let after = c.build_get_passage("Ps 23", None).unwrap();
        assert!(before.url.contains("/content/asv.js"));
        assert!(after.url.contains("/content/leb.js"));
        assert_eq!(c.translation(), Translation::Leb);
    }

    #[test]
    fn with_base_url_strips_trailing_slash() {
        let c = client().with_base_url("http://localhost:3000/v1/bible/");
        assert_eq!(c.base_url(), "http://localhost:3000/v1/bible");
        let req = c.build_compare("a", "b");
        assert_eq!(req.url, "http://localhost:3000/v1/bible/compare?first=a&second=b&key=KEY");
    }

    #[test]
    fn from_config_copies_every_setting() {
        let config = ClientConfig::new("abc")
            .with_translation(Translation::Darby)
            .with_base_url("http://h/v1/bible");
        let c = BibliaClient::from_config(&config);
        assert_eq!(c.translation(), Translation::Darby);
        assert_eq!(c.build_get_bibles(None).unwrap().url, "http://h/v1/bible/find.js?key=abc");
    }

    #[test]
    fn api_key_is_never_checked_locally() {
        let c = BibliaClient::new("", Translation::Asv);
        assert_eq!(c.build_get_bibles(None).unwrap().url, format!("{BASE}/find.js?key="));
    }

    #[test]
    fn parse_get_bibles_and_project_names() {
        let response = HttpResponse::ok(
            r#"{"bibles":[{"bible":"asv","title":"American Standard Version"},{"bible":"kjv","title":"King James Version"}]}"#,
        );
        let list = client().parse_get_bibles(response).unwrap();
        assert_eq!(bible_names(&list), vec!["asv".to_string(), "kjv".to_string()]);
    }

    #[test]
    fn parse_ignores_status_code() {
        let response = HttpResponse {
            status: 500,
            body: r#"{"text":"For God so loved the world"}"#.to_string(),
        };
        let passage = client().parse_get_passage(response).unwrap();
        assert_eq!(passage.text, "For God so loved the world");
    }

    #[test]
    fn parse_search_bad_json() {
        let err = client().parse_search(HttpResponse::ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_remote_error_payload_is_a_deserialization_error() {
        let response = HttpResponse {
            status: 403,
            body: r#"{"error":"Invalid API key."}"#.to_string(),
        };
        let err = client().parse_compare(response).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_scan_text_reads_offsets() {
        let response = HttpResponse::ok(r#"{"results":[{"passage":"John 3:16","textIndex":4,"textLength":9}]}"#);
        let scan = client().parse_scan_text(response).unwrap();
        assert_eq!(scan.results.len(), 1);
        assert_eq!(scan.results[0].text_index, 4);
        assert_eq!(scan.results[0].text_length, 9);
    }

    #[test]
    fn parse_parse_text_reads_passages() {
        let response = HttpResponse::ok(
            r#"{"passage":"John 3:16","passages":[{"passage":"John 3:16","parts":{"book":"John","chapter":3,"verse":16}}]}"#,
        );
        let parsed = client().parse_parse_text(response).unwrap();
        assert_eq!(parsed.passage, "John 3:16");
        assert_eq!(parsed.passages[0].parts.verse, Some(16));
    }
}
