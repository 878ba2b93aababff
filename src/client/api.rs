use crate::error::ClientError;
use roster_schema::{DeleteResponse, NurseFields, NurseRecord, RawErrorBody};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default collection URL, matching the original browser front end.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/nurses";

/// Thin HTTP client for the record routes. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct NurseApi {
    client: reqwest::Client,
    base_url: Url,
}

impl NurseApi {
    /// `base_url` is the collection URL, e.g. `http://localhost:5000/records`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    /// `{base}/{id}` with the id percent-encoded as a single path segment.
    pub fn record_url(&self, id: &str) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    pub fn build_create_request(
        &self,
        fields: &NurseFields,
    ) -> Result<reqwest::Request, ClientError> {
        Ok(self
            .client
            .post(self.base_url.clone())
            .json(fields)
            .build()?)
    }

    pub fn build_update_request(
        &self,
        id: &str,
        fields: &NurseFields,
    ) -> Result<reqwest::Request, ClientError> {
        Ok(self.client.put(self.record_url(id)?).json(fields).build()?)
    }

    pub async fn list(&self) -> Result<Vec<NurseRecord>, ClientError> {
        let req = self.client.get(self.base_url.clone()).build()?;
        self.execute(req).await
    }

    pub async fn create(&self, fields: &NurseFields) -> Result<NurseRecord, ClientError> {
        let req = self.build_create_request(fields)?;
        self.execute(req).await
    }

    /// `Ok(None)` when the server had no record with this id.
    pub async fn update(
        &self,
        id: &str,
        fields: &NurseFields,
    ) -> Result<Option<NurseRecord>, ClientError> {
        let req = self.build_update_request(id, fields)?;
        self.execute(req).await
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteResponse, ClientError> {
        let req = self.client.delete(self.record_url(id)?).build()?;
        self.execute(req).await
    }

    async fn execute<T: DeserializeOwned>(&self, req: reqwest::Request) -> Result<T, ClientError> {
        let method = req.method().clone();
        let url = req.url().clone();
        let resp = self.client.execute(req).await?;
        let status = resp.status();
        debug!(%method, %url, %status, "Roster API call");

        if !status.is_success() {
            let body = resp.json::<RawErrorBody>().await.ok();
            return Err(ClientError::Status { status, body });
        }
        Ok(resp.json::<T>().await?)
    }
}
