//! Extraction client: submit a job, then poll it to completion.

use crate::error::{Error, Result};
use crate::poll::{classify, PollConfig, PollOutcome};
use crate::types::*;
use crate::version::build_user_agent;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builder for constructing a [`Client`].
pub struct ClientBuilder {
    base_url: String,
    timeout: Duration,
    poll: PollConfig,
    user_agent_suffix: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll: PollConfig::default(),
            user_agent_suffix: None,
        }
    }

    /// Set the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the wait before each status query.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll.interval = interval;
        self
    }

    /// Set the maximum number of status queries.
    pub fn max_poll_attempts(mut self, attempts: u32) -> Self {
        self.poll.max_attempts = attempts;
        self
    }

    /// Replace the whole poll configuration.
    pub fn poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Set a custom User-Agent suffix.
    pub fn user_agent_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        if self.base_url.is_empty() {
            return Err(Error::Config("API base URL is required".into()));
        }
        if self.poll.max_attempts == 0 {
            return Err(Error::Config("max poll attempts must be at least 1".into()));
        }

        if !self.base_url.starts_with("https://") {
            warn!(
                base_url = %self.base_url,
                "API base URL is not using HTTPS. This is insecure."
            );
        }

        let http_client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Client {
            base_url: self.base_url,
            http_client,
            poll: self.poll,
            user_agent: build_user_agent(self.user_agent_suffix.as_deref()),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the extract API.
///
/// Holds no per-job state, so one client can serve concurrent extractions.
///
/// # Example
///
/// ```rust,no_run
/// use firecrawl_extract::{Client, Credentials, ExtractionRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), firecrawl_extract::Error> {
///     let client = Client::builder().build()?;
///
///     let result = client
///         .extract(
///             &ExtractionRequest::new("https://example.com", "What is this page about?"),
///             &Credentials::new("fc-your-api-key"),
///         )
///         .await?;
///
///     println!("{}", result.data);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http_client: reqwest::Client,
    poll: PollConfig,
    user_agent: String,
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The poll configuration in use.
    pub fn poll_config(&self) -> PollConfig {
        self.poll
    }

    /// Answer a question about a web page.
    ///
    /// Submits the job and, unless the API answers synchronously, polls its
    /// status until it completes, fails, is cancelled, or the attempt ceiling
    /// is reached.
    pub async fn extract(
        &self,
        request: &ExtractionRequest,
        credentials: &Credentials,
    ) -> Result<ExtractionResult> {
        credentials.validate()?;
        request.validate()?;

        let handle = match self.submit_unchecked(request, credentials).await? {
            Submission::Completed(data) => {
                debug!(url = %request.url, "Extraction completed immediately");
                return Ok(ExtractionResult::immediate(data));
            }
            Submission::Pending(handle) => handle,
        };

        self.wait_for(&handle, credentials).await
    }

    /// Submit an extraction job without polling it.
    pub async fn submit(
        &self,
        request: &ExtractionRequest,
        credentials: &Credentials,
    ) -> Result<Submission> {
        credentials.validate()?;
        request.validate()?;
        self.submit_unchecked(request, credentials).await
    }

    /// Fetch the current status of a job once.
    pub async fn status(
        &self,
        handle: &JobHandle,
        credentials: &Credentials,
    ) -> Result<StatusResponse> {
        credentials.validate()?;

        let url = format!("{}/extract/{}", self.base_url, handle.id);
        let response = self
            .http_client
            .get(&url)
            .headers(self.headers(credentials)?)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::status_check(response).await);
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(Error::malformed)
    }

    async fn submit_unchecked(
        &self,
        request: &ExtractionRequest,
        credentials: &Credentials,
    ) -> Result<Submission> {
        debug!(
            url = %request.url,
            key = %credentials.fingerprint(),
            "Submitting extraction job"
        );

        let body = CreateExtractBody {
            urls: [request.url.as_str()],
            prompt: request.question.as_str(),
        };
        let response = self
            .http_client
            .post(format!("{}/extract", self.base_url))
            .headers(self.headers(credentials)?)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::submission(response).await);
        }

        let body = response.bytes().await?;
        let created: CreateExtractResponse =
            serde_json::from_slice(&body).map_err(Error::malformed)?;
        created.into_submission()
    }

    async fn wait_for(
        &self,
        handle: &JobHandle,
        credentials: &Credentials,
    ) -> Result<ExtractionResult> {
        for attempt in 1..=self.poll.max_attempts {
            sleep(self.poll.interval).await;

            let response = self.status(handle, credentials).await?;
            debug!(
                job_id = %handle.id,
                attempt = attempt,
                status = ?response.status,
                "Polled extraction job"
            );
            if response.status == JobStatus::Unknown {
                warn!(
                    job_id = %handle.id,
                    attempt = attempt,
                    "Unrecognized job status, continuing to poll"
                );
            }

            match classify(response)? {
                PollOutcome::Done(data) => {
                    debug!(job_id = %handle.id, attempts = attempt, "Extraction completed");
                    return Ok(ExtractionResult::polled(data, attempt));
                }
                PollOutcome::Continue => {}
            }
        }

        Err(Error::ExtractionTimeout {
            attempts: self.poll.max_attempts,
        })
    }

    fn headers(&self, credentials: &Credentials) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", credentials.api_key()))
            .map_err(|_| Error::Config("API key contains invalid header characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|_| Error::Config("User-Agent contains invalid characters".into()))?,
        );
        Ok(headers)
    }
}
