//! HTTP client and paginated fetch loop
//!
//! Provides a small REST client that handles:
//! - Base-URL joining and default headers
//! - Automatic retries with exponential backoff
//! - Driving a pagination strategy across successive responses

use super::response::HttpResponse;
use crate::error::{is_retryable_status, Error, Result};
use crate::pagination::{Paginator, Params, RequestArgs};
use crate::utils::join_url;
use reqwest::{Client, Method};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Configuration for the REST client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for relative request paths
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            default_headers: HashMap::new(),
            user_agent: format!("pagekit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for the client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff bounds
    pub fn backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// REST client with retries and pagination support
#[derive(Debug)]
pub struct RestClient {
    client: Client,
    config: ClientConfig,
}

impl RestClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client, config })
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<HttpResponse> {
        self.request(Method::GET, &RequestArgs::new(path)).await
    }

    /// Make one request described by `args`, with retries
    pub async fn request(&self, method: Method, args: &RequestArgs) -> Result<HttpResponse> {
        let url = url::Url::parse(&self.build_url(&args.url))?;
        let max_retries = self.config.max_retries;

        let mut attempt = 0;
        loop {
            let mut req = self.client.request(method.clone(), url.clone());

            for (key, value) in &self.config.default_headers {
                req = req.header(key.as_str(), value.as_str());
            }
            if !args.params.is_empty() {
                req = req.query(&args.params);
            }
            if !args.body.is_empty() {
                req = req.json(&args.body);
            }

            match req.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        debug!("Request succeeded: {} {}", method, url);
                        return HttpResponse::from_reqwest(response).await;
                    }

                    if is_retryable_status(status.as_u16()) && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Request failed with {}, attempt {}/{}, retrying in {:?}",
                            status.as_u16(),
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    let body = response.text().await.unwrap_or_default();
                    return Err(Error::http_status(status.as_u16(), body));
                }
                Err(e) => {
                    if (e.is_timeout() || e.is_connect()) && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Transport error ({e}), attempt {}/{}, retrying in {:?}",
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    if e.is_timeout() {
                        return Err(Error::Timeout {
                            timeout_ms: self.config.timeout.as_millis() as u64,
                        });
                    }
                    return Err(Error::Http(e));
                }
            }
        }
    }

    /// Start a paginated fetch sequence for `path` driven by `paginator`.
    ///
    /// The paginator instance is consumed: it belongs to this one sequence
    /// and is discarded with the iterator.
    pub fn paginate<P: Paginator>(&self, path: &str, paginator: P) -> PageIter<'_, P> {
        PageIter {
            client: self,
            paginator,
            method: Method::GET,
            args: RequestArgs::new(path),
        }
    }

    /// Probe the endpoint by fetching a single page.
    ///
    /// Returns `(true, "")` on success, or `(false, message)` with the
    /// error rendered for diagnostics.
    pub async fn check_connection(&self, path: &str) -> (bool, String) {
        match self.get(path).await {
            Ok(_) => (true, String::new()),
            Err(e) => {
                error!("Error checking connection: {e}");
                (false, e.to_string())
            }
        }
    }

    /// Resolve a possibly-relative path against the configured base URL
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        match &self.config.base_url {
            Some(base) => join_url(base, path),
            None => path.to_string(),
        }
    }

    /// Exponential backoff delay for a given attempt, capped
    fn calculate_backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        std::cmp::min(
            self.config.initial_backoff * factor,
            self.config.max_backoff,
        )
    }
}

/// One paginated fetch sequence: a client, a strategy, and the request
/// arguments carried from page to page.
///
/// Each [`next_page`](Self::next_page) call prepares the request via the
/// strategy, sends it, feeds the response back through
/// [`Paginator::update_state`], and yields the response. Returns `Ok(None)`
/// once the strategy reports no further pages.
pub struct PageIter<'a, P: Paginator> {
    client: &'a RestClient,
    paginator: P,
    method: Method,
    args: RequestArgs,
}

impl<'a, P: Paginator> PageIter<'a, P> {
    /// Set the HTTP method for every request in the sequence
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the initial query parameters
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.args.params = params;
        self
    }

    /// Set the initial request body
    #[must_use]
    pub fn with_body(mut self, body: Params) -> Self {
        self.args.body = body;
        self
    }

    /// Access the driving paginator
    pub fn paginator(&self) -> &P {
        &self.paginator
    }

    /// Fetch the next page, or `None` when the sequence is exhausted
    pub async fn next_page(&mut self) -> Result<Option<HttpResponse>> {
        if !self.paginator.has_next_page() {
            return Ok(None);
        }

        let args =
            self.paginator
                .prepare_next_request_args(&self.args.url, &self.args.params, &self.args.body);
        let response = self.client.request(self.method.clone(), &args).await?;
        self.paginator.update_state(&response)?;
        // Prepared args become the seed for the next round, so a replaced
        // URL (link/body cursors) carries forward.
        self.args = args;

        Ok(Some(response))
    }

    /// Drain the sequence, collecting every page
    pub async fn collect_pages(mut self) -> Result<Vec<HttpResponse>> {
        let mut pages = Vec::new();
        while let Some(page) = self.next_page().await? {
            pages.push(page);
        }
        Ok(pages)
    }
}
