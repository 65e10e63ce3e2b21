use std::fmt;
use std::io::Write;

use reqwest::Url;
use tokio::time::sleep;

use crate::{ApiError, Endpoint, Person, ResponseMode, Result, RetryPolicy};

#[derive(Clone)]
/// HTTP client for the Star Wars API resources, decorated with a [`RetryPolicy`].
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("retry", &self.retry)
            .finish()
    }
}

impl ApiClient {
    /// Creates a client for `base_url` using [`RetryPolicy::standard`].
    ///
    /// Relative paths are resolved against the base the same way a browser
    /// resolves links, so a base with a path component should end in `/`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let raw = base_url.as_ref().trim();
        let base_url = Url::parse(raw)
            .map_err(|err| ApiError::InvalidUrl(format!("'{raw}': {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!("'{raw}' cannot be a base address")));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            retry: RetryPolicy::standard(),
        })
    }

    /// Replaces the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Resolves a relative path against the base address.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::InvalidUrl(format!("'{path}': {err}")))
    }

    /// Issues a GET for `path` and returns the response body.
    pub async fn get(&self, path: &str) -> Result<String> {
        let url = self.url_for(path)?;
        self.get_with_retry(url).await
    }

    /// Issues a GET for the endpoint's fixed path and returns the body.
    pub async fn invoke_endpoint(&self, endpoint: Endpoint) -> Result<String> {
        self.get(endpoint.path()).await
    }

    /// Fetches the endpoint and parses the body into a [`Person`].
    pub async fn fetch_record(&self, endpoint: Endpoint) -> Result<Person> {
        let body = self.invoke_endpoint(endpoint).await?;
        Person::from_json(&body)
    }

    /// Fetches the endpoint and writes the result to `out`.
    ///
    /// In [`ResponseMode::Record`] the four record fields are written on
    /// separate lines. Nothing is written when the call or decoding fails.
    pub async fn report<W: Write + ?Sized>(
        &self,
        endpoint: Endpoint,
        mode: ResponseMode,
        out: &mut W,
    ) -> Result<()> {
        match mode {
            ResponseMode::Raw => {
                let body = self.invoke_endpoint(endpoint).await?;
                writeln!(out, "{body}")?;
            }
            ResponseMode::Record => {
                let person = self.fetch_record(endpoint).await?;
                for field in person.fields() {
                    writeln!(out, "{field}")?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Writes `message` on its own line.
    pub fn run<W: Write + ?Sized>(&self, message: &str, out: &mut W) -> Result<()> {
        writeln!(out, "{message}")?;
        out.flush()?;
        Ok(())
    }

    async fn get_with_retry(&self, url: Url) -> Result<String> {
        let mut attempt = 0u32;
        loop {
            let response = self.http.get(url.clone()).send().await;

            match response {
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.map_err(ApiError::Transport)?;

                    if status.is_success() {
                        tracing::debug!(%url, status = status.as_u16(), "request succeeded");
                        return Ok(body);
                    }

                    if self.retry.should_retry_status(status) && self.retry.allows(attempt + 1) {
                        attempt += 1;
                        tracing::warn!(
                            %url,
                            status = status.as_u16(),
                            attempt,
                            "retryable status, backing off"
                        );
                        self.wait_before_retry(attempt).await;
                        continue;
                    }

                    return Err(ApiError::Http {
                        status: status.as_u16(),
                        body,
                    });
                }
                Err(err) => {
                    if self.retry.should_retry_transport(&err) && self.retry.allows(attempt + 1) {
                        attempt += 1;
                        tracing::warn!(%url, error = %err, attempt, "transport failure, backing off");
                        self.wait_before_retry(attempt).await;
                        continue;
                    }
                    return Err(ApiError::Transport(err));
                }
            }
        }
    }

    async fn wait_before_retry(&self, attempt: u32) {
        let delay = self.retry.delay_for(attempt);
        tracing::debug!("retrying request after {} ms", delay.as_millis());
        sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::ApiClient;
    use crate::{ApiError, Endpoint, RetryPolicy};

    #[test]
    fn joins_endpoint_paths_onto_the_base() {
        let client = ApiClient::new("https://swapi.dev").expect("base must parse");
        let url = client
            .url_for(Endpoint::People.path())
            .expect("path must join");
        assert_eq!(url.as_str(), "https://swapi.dev/api/people/1/");
    }

    #[test]
    fn keeps_base_path_when_it_ends_with_a_slash() {
        let client = ApiClient::new("http://localhost:8080/mirror/").expect("base must parse");
        let url = client.url_for("api/films/1/").expect("path must join");
        assert_eq!(url.as_str(), "http://localhost:8080/mirror/api/films/1/");
    }

    #[test]
    fn rejects_invalid_base_addresses() {
        for base in ["not a url", "mailto:someone@example.com"] {
            let err = ApiClient::new(base).expect_err("base must be rejected");
            assert!(matches!(err, ApiError::InvalidUrl(_)), "{base}");
        }
    }

    #[test]
    fn uses_standard_retry_policy_by_default() {
        let client = ApiClient::new("https://swapi.dev/").expect("base must parse");
        assert_eq!(client.retry_policy(), &RetryPolicy::standard());
    }

    #[test]
    fn run_writes_the_message_line() {
        let client = ApiClient::new("https://swapi.dev/").expect("base must parse");
        let mut out = Vec::new();
        client
            .run("GenuineIntel Family 6", &mut out)
            .expect("write must succeed");
        assert_eq!(String::from_utf8(out).unwrap(), "GenuineIntel Family 6\n");
    }
}
