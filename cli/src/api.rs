//! Reqwest-backed implementations of the wizard's remote ports.
//!
//! One client serves all three: the profile backend, the document parser,
//! and smart search. Backend rejection messages pass through verbatim; the
//! wizard shows them to the user unchanged.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use magpie_core::error::{ParseError, ProfileStoreError, SearchError};
use magpie_core::merge::PartialProfile;
use magpie_core::ports::{DocumentParser, ProfileSearch, ProfileStore, SearchKind, StoredProfile};

pub struct ApiClient {
    base: Url,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self, String> {
        let base =
            Url::parse(api_url).map_err(|error| format!("invalid API URL '{api_url}': {error}"))?;
        Ok(Self {
            base,
            token,
            http: crate::util::client(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, String> {
        self.base
            .join(path)
            .map_err(|error| format!("invalid request path '{path}': {error}"))
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, Value), String> {
        let response = request.send().await.map_err(|error| error.to_string())?;
        let status = response.status();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        Ok((status, body))
    }
}

/// The backend's own wording when it has one, the HTTP status text otherwise.
fn error_message(body: &Value, status: StatusCode) -> String {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!(
                "request failed with status {}",
                status.canonical_reason().unwrap_or("unknown")
            )
        })
}

#[async_trait]
impl ProfileStore for ApiClient {
    async fn fetch(&self) -> Result<Option<StoredProfile>, ProfileStoreError> {
        let url = self.url("/v1/profile").map_err(ProfileStoreError::Connection)?;
        let (status, body) = self
            .send(self.authorized(self.http.get(url)))
            .await
            .map_err(ProfileStoreError::Connection)?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ProfileStoreError::Rejected {
                status: status.as_u16(),
                message: error_message(&body, status),
            });
        }
        let profile = serde_json::from_value(body)
            .map_err(|error| ProfileStoreError::Decode(error.to_string()))?;
        Ok(Some(profile))
    }

    async fn create(&self, payload: &Value) -> Result<StoredProfile, ProfileStoreError> {
        self.write_profile(reqwest::Method::POST, "/v1/profiles", payload)
            .await
    }

    async fn update(&self, payload: &Value) -> Result<StoredProfile, ProfileStoreError> {
        self.write_profile(reqwest::Method::PUT, "/v1/profile", payload)
            .await
    }
}

impl ApiClient {
    async fn write_profile(
        &self,
        method: reqwest::Method,
        path: &str,
        payload: &Value,
    ) -> Result<StoredProfile, ProfileStoreError> {
        let url = self.url(path).map_err(ProfileStoreError::Connection)?;
        let request = self.authorized(self.http.request(method, url)).json(payload);
        let (status, body) = self
            .send(request)
            .await
            .map_err(ProfileStoreError::Connection)?;
        if !status.is_success() {
            return Err(ProfileStoreError::Rejected {
                status: status.as_u16(),
                message: error_message(&body, status),
            });
        }
        serde_json::from_value(body).map_err(|error| ProfileStoreError::Decode(error.to_string()))
    }
}

#[async_trait]
impl DocumentParser for ApiClient {
    async fn parse(&self, bytes: &[u8], filename: &str) -> Result<PartialProfile, ParseError> {
        let mut url = self
            .url("/v1/documents/parse")
            .map_err(ParseError::Connection)?;
        url.query_pairs_mut().append_pair("filename", filename);
        let request = self
            .authorized(self.http.post(url))
            .header("content-type", "application/octet-stream")
            .body(bytes.to_vec());
        let (status, body) = self.send(request).await.map_err(ParseError::Connection)?;
        if !status.is_success() {
            return Err(ParseError::Rejected {
                status: status.as_u16(),
                message: error_message(&body, status),
            });
        }
        serde_json::from_value(body).map_err(|error| ParseError::Decode(error.to_string()))
    }
}

#[async_trait]
impl ProfileSearch for ApiClient {
    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
    ) -> Result<Option<PartialProfile>, SearchError> {
        let mut url = self
            .url("/v1/profiles/search")
            .map_err(SearchError::Connection)?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("kind", kind.as_str());
        let (status, body) = self
            .send(self.authorized(self.http.get(url)))
            .await
            .map_err(SearchError::Connection)?;
        if status == StatusCode::NOT_FOUND || body.is_null() {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SearchError::Rejected {
                status: status.as_u16(),
                message: error_message(&body, status),
            });
        }
        let partial: PartialProfile = serde_json::from_value(body)
            .map_err(|error| SearchError::Decode(error.to_string()))?;
        if partial.is_empty() {
            return Ok(None);
        }
        Ok(Some(partial))
    }
}
