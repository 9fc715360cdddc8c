use super::models::{Product, ProductResponse};
use reqwest::{StatusCode, Url};
use std::fmt;
use tracing::{debug, error, info, warn};

pub const DEFAULT_ENDPOINT: &str = "https://world.openfoodfacts.org/api/v2/product";
pub const DEFAULT_LANGUAGE: &str = "pt";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("product not found")]
    NotFound,
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// User-supplied product identifier, non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode(String);

impl Barcode {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of one lookup, already classified for the caller.
#[derive(Debug)]
pub enum LookupOutcome {
    Success(Box<Product>),
    NotFound,
    /// Non-2xx status other than 404, or `None` for a network/body failure.
    TransportError(Option<u16>),
}

impl From<Result<Product, ApiError>> for LookupOutcome {
    fn from(result: Result<Product, ApiError>) -> Self {
        match result {
            Ok(product) => LookupOutcome::Success(Box::new(product)),
            Err(ApiError::NotFound) => LookupOutcome::NotFound,
            Err(ApiError::Status(code)) => LookupOutcome::TransportError(Some(code)),
            Err(
                ApiError::InvalidEndpoint(_)
                | ApiError::Http(_)
                | ApiError::Parse(_)
                | ApiError::Io(_),
            ) => {
                LookupOutcome::TransportError(None)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub endpoint: String,
    pub language: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl LookupConfig {
    /// `{endpoint}/{barcode}.json?lc={language}`, with the barcode encoded
    /// as a single path segment.
    pub fn product_url(&self, barcode: &Barcode) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| ApiError::InvalidEndpoint(format!("{}: {e}", self.endpoint)))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidEndpoint(self.endpoint.clone()))?
            .pop_if_empty()
            .push(&format!("{barcode}.json"));
        url.query_pairs_mut().append_pair("lc", &self.language);
        Ok(url)
    }
}

/// Open Food Facts product client. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct ProductClient {
    http: reqwest::Client,
    config: LookupConfig,
}

impl ProductClient {
    pub fn new(config: LookupConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    pub fn with_http(http: reqwest::Client, config: LookupConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Looks up one barcode. Never fails: every error is folded into the outcome.
    pub async fn lookup(&self, barcode: &Barcode) -> LookupOutcome {
        let result = self.fetch_product(barcode).await;
        match &result {
            Ok(_) => info!(%barcode, "product found"),
            Err(ApiError::NotFound) => info!(%barcode, "product not found"),
            Err(ApiError::Status(code)) => warn!(%barcode, status = code, "lookup rejected"),
            Err(e) => error!(%barcode, error = %e, "lookup failed"),
        }
        LookupOutcome::from(result)
    }

    /// Fetches the product payload for a barcode.
    pub async fn fetch_product(&self, barcode: &Barcode) -> Result<Product, ApiError> {
        let url = self.config.product_url(barcode)?;
        debug!(%url, "requesting product");

        let resp = self.http.get(url).send().await?;
        check_status(resp.status())?;

        let body = resp.bytes().await?;
        parse_product(&body)
    }
}

fn check_status(status: StatusCode) -> Result<(), ApiError> {
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    Ok(())
}

// Upstream answers some unknown codes with a 2xx and no `product`.
fn parse_product(body: &[u8]) -> Result<Product, ApiError> {
    let response: ProductResponse = serde_json::from_slice(body)?;
    response.product.ok_or(ApiError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::not_found(StatusCode::NOT_FOUND, None)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, Some(500))]
    #[case::bad_gateway(StatusCode::BAD_GATEWAY, Some(502))]
    #[case::bad_request(StatusCode::BAD_REQUEST, Some(400))]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, Some(429))]
    fn classifies_non_success_statuses(#[case] status: StatusCode, #[case] expected: Option<u16>) {
        let outcome = LookupOutcome::from(check_status(status).map(|()| Product::default()));
        match expected {
            None => assert!(matches!(outcome, LookupOutcome::NotFound), "404 should map to NotFound"),
            Some(code) => assert!(
                matches!(outcome, LookupOutcome::TransportError(Some(c)) if c == code),
                "status {code} should map to TransportError",
            ),
        }
    }

    #[rstest]
    #[case(StatusCode::OK)]
    #[case(StatusCode::NO_CONTENT)]
    fn success_statuses_pass(#[case] status: StatusCode) {
        assert!(check_status(status).is_ok());
    }

    #[test]
    fn body_without_product_is_not_found() {
        let outcome = LookupOutcome::from(parse_product(br#"{"status":0,"status_verbose":"product not found"}"#));
        assert!(matches!(outcome, LookupOutcome::NotFound));
    }

    #[test]
    fn malformed_body_is_transport_error_without_status() {
        let outcome = LookupOutcome::from(parse_product(b"<html>oops</html>"));
        assert!(matches!(outcome, LookupOutcome::TransportError(None)));
    }

    #[test]
    fn body_with_product_is_success() {
        let outcome = LookupOutcome::from(parse_product(r#"{"product":{"product_name":"Água"}}"#.as_bytes()));
        match outcome {
            LookupOutcome::Success(product) => {
                assert_eq!(product.product_name.as_deref(), Some("Água"));
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[rstest]
    #[case("  7891000100103 ", Some("7891000100103"))]
    #[case("abc", Some("abc"))]
    #[case("", None)]
    #[case("   \t", None)]
    fn barcode_is_trimmed_and_non_empty(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(Barcode::parse(raw).as_ref().map(Barcode::as_str), expected);
    }

    #[test]
    fn builds_product_url_with_language() {
        let barcode = Barcode::parse("3017620422003").expect("barcode should parse");
        let config = LookupConfig::default();
        assert_eq!(
            config.product_url(&barcode).expect("url should build").as_str(),
            "https://world.openfoodfacts.org/api/v2/product/3017620422003.json?lc=pt"
        );

        let config = LookupConfig {
            endpoint: "http://127.0.0.1:9000/".into(),
            language: "en".into(),
        };
        assert_eq!(
            config.product_url(&barcode).expect("url should build").as_str(),
            "http://127.0.0.1:9000/3017620422003.json?lc=en"
        );
    }

    #[rstest]
    #[case("12?x", "https://world.openfoodfacts.org/api/v2/product/12%3Fx.json?lc=pt")]
    #[case("a/b", "https://world.openfoodfacts.org/api/v2/product/a%2Fb.json?lc=pt")]
    #[case("12 34", "https://world.openfoodfacts.org/api/v2/product/12%2034.json?lc=pt")]
    fn barcode_stays_one_path_segment(#[case] raw: &str, #[case] expected: &str) {
        let barcode = Barcode::parse(raw).expect("barcode should parse");
        let url = LookupConfig::default()
            .product_url(&barcode)
            .expect("url should build");
        assert_eq!(url.as_str(), expected);
        assert_eq!(url.query(), Some("lc=pt"));
    }

    #[test]
    fn unparsable_endpoint_is_transport_error() {
        let config = LookupConfig {
            endpoint: "not a url".into(),
            language: "pt".into(),
        };
        let barcode = Barcode::parse("123").expect("barcode should parse");
        let result = config.product_url(&barcode).map(|_| Product::default());
        assert!(matches!(result, Err(ApiError::InvalidEndpoint(_))));
        assert!(matches!(LookupOutcome::from(result), LookupOutcome::TransportError(None)));
    }
}
