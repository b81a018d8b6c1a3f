use std::time::Duration;

use futures_util::StreamExt;
use url::Url;

use crate::{Cursor, EngineError, FetchError, Page, PeopleSource};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
        }
    }
}

/// Fetches pages from `GET {base_url}/people?next={cursor}` as JSON.
#[derive(Debug, Clone)]
pub struct HttpPeopleSource {
    client: reqwest::Client,
    endpoint: Url,
    max_bytes: u64,
}

impl HttpPeopleSource {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let mut base = Url::parse(&settings.base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("people")?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            max_bytes: settings.max_bytes,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn page_url(&self, cursor: Option<&Cursor>) -> Url {
        let mut url = self.endpoint.clone();
        if let Some(cursor) = cursor {
            url.query_pairs_mut().append_pair("next", cursor.as_str());
        }
        url
    }

    fn too_large(&self) -> FetchError {
        FetchError::new(format!(
            "The response exceeded the {} byte limit.",
            self.max_bytes
        ))
    }
}

#[async_trait::async_trait]
impl PeopleSource for HttpPeopleSource {
    async fn fetch(&self, cursor: Option<&Cursor>) -> Result<Page, FetchError> {
        let response = self
            .client
            .get(self.page_url(cursor))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(format!("Server responded with {status}.")));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(self.too_large());
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if body.len() as u64 + chunk.len() as u64 > self.max_bytes {
                return Err(self.too_large());
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(format!("Could not read the people list: {err}.")))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new("The request timed out.");
    }
    FetchError::new(format!("Network error: {err}."))
}
