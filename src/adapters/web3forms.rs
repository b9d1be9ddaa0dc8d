use crate::domain::model::{FormData, SubmitReply, SubmitResponse};
use crate::domain::ports::FormSubmitter;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;

pub const DEFAULT_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// Posts the serialized form to a Web3Forms-compatible endpoint.
#[derive(Debug, Clone)]
pub struct Web3FormsClient {
    client: Client,
    endpoint: String,
}

impl Web3FormsClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FormSubmitter for Web3FormsClient {
    async fn submit(&self, data: &FormData) -> Result<SubmitReply> {
        tracing::debug!("Making form POST request to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .form(data)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Forms API response status: {}", status);

        // A non-JSON body is a transport-level failure, same as a dropped connection.
        let bytes = response.bytes().await?;
        let body: SubmitResponse = serde_json::from_slice(&bytes)?;

        Ok(SubmitReply {
            http_ok: status.is_success(),
            body,
        })
    }
}
