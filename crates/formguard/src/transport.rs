//! Remote submission transport

use crate::error::TransportError;
use crate::host::FormData;
use async_trait::async_trait;

/// Response from the submission endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: u16,
}

impl SubmitResponse {
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a form snapshot to a remote endpoint
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    async fn submit(
        &self,
        endpoint: &str,
        data: &FormData,
    ) -> Result<SubmitResponse, TransportError>;
}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use super::{SubmitResponse, SubmitTransport};
    use crate::error::TransportError;
    use crate::host::FormData;
    use async_trait::async_trait;
    use reqwest::header::{ACCEPT, CONTENT_TYPE};
    use reqwest::Client;
    use tracing::debug;

    /// POSTs the form as `application/x-www-form-urlencoded`
    #[derive(Debug, Clone, Default)]
    pub struct HttpTransport {
        client: Client,
    }

    impl HttpTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(client: Client) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl SubmitTransport for HttpTransport {
        async fn submit(
            &self,
            endpoint: &str,
            data: &FormData,
        ) -> Result<SubmitResponse, TransportError> {
            debug!("Posting {} form entries to {}", data.len(), endpoint);

            let response = self
                .client
                .post(endpoint)
                .header(ACCEPT, "application/json")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(data.to_urlencoded())
                .send()
                .await?;

            Ok(SubmitResponse::new(response.status().as_u16()))
        }
    }
}
