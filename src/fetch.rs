//! Blocking-style GET of a whole response body, one attempt per call.
//!
//! Status codes are not interpreted here. A 404 with a body is returned like any other
//! response and left for the decoder to judge.

use crate::error::FetchError;

#[derive(Debug, Clone)]
pub(crate) struct Fetcher {
    client: reqwest::Client,
    max_response_size: usize,
}

impl Fetcher {
    pub(crate) fn new(config: &crate::config::Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(FetchError::ClientInit)?;

        Ok(Self {
            client,
            max_response_size: config.max_response_size,
        })
    }

    /// Returns the complete body in a buffer owned by the caller.
    ///
    /// Bodies larger than the configured ceiling fail with
    /// [`FetchError::ResponseTooLarge`] instead of being clipped.
    pub(crate) async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };
        let too_large = || FetchError::ResponseTooLarge {
            url: url.to_string(),
            limit: self.max_response_size,
        };

        let mut response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();

        let declared = response.content_length();
        if declared.is_some_and(|len| len > self.max_response_size as u64) {
            return Err(too_large());
        }

        let mut body = Vec::with_capacity(declared.unwrap_or(0) as usize);
        while let Some(chunk) = response.chunk().await.map_err(transport)? {
            if body.len() + chunk.len() > self.max_response_size {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        tracing::debug!(url, status = status.as_u16(), bytes = body.len(), "Fetched");
        Ok(body)
    }
}
