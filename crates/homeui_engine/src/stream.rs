use std::sync::mpsc;
use std::time::Duration;

use futures_util::StreamExt;

use crate::decode::ChunkDecoder;
use crate::{DeployEvent, StreamError, StreamFailureKind};

#[derive(Debug, Clone)]
pub struct StreamSettings {
    pub connect_timeout: Duration,
    /// Build output is open-ended, so there is no overall deadline by default.
    pub request_timeout: Option<Duration>,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// Receives deploy-stream events in arrival order.
pub trait DeploySink: Send + Sync {
    fn emit(&self, event: DeployEvent);
}

pub struct ChannelDeploySink {
    tx: mpsc::Sender<DeployEvent>,
}

impl ChannelDeploySink {
    pub fn new(tx: mpsc::Sender<DeployEvent>) -> Self {
        Self { tx }
    }
}

impl DeploySink for ChannelDeploySink {
    fn emit(&self, event: DeployEvent) {
        let _ = self.tx.send(event);
    }
}

/// Issues the deploy request and drains the response body into the sink.
///
/// Once the request is sent the streamer commits to draining the body to
/// completion or to a failure; there is no mid-stream cancellation.
#[async_trait::async_trait]
pub trait DeployStreamer: Send + Sync {
    async fn deploy(&self, url: &str, sink: &dyn DeploySink) -> Result<(), StreamError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestDeployStreamer {
    settings: StreamSettings,
}

impl ReqwestDeployStreamer {
    pub fn new(settings: StreamSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, StreamError> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.settings.connect_timeout);
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| StreamError::new(StreamFailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl DeployStreamer for ReqwestDeployStreamer {
    async fn deploy(&self, url: &str, sink: &dyn DeploySink) -> Result<(), StreamError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| StreamError::new(StreamFailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let response = client
            .post(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::new(
                StreamFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let mut decoder = ChunkDecoder::new();
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let text = decoder.push(&chunk);
            if !text.is_empty() {
                sink.emit(DeployEvent::Chunk(text));
            }
        }

        // Last read is non-streaming: flush a trailing partial sequence.
        let tail = decoder.finish();
        if !tail.is_empty() {
            sink.emit(DeployEvent::Chunk(tail));
        }

        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> StreamError {
    if err.is_timeout() {
        return StreamError::new(StreamFailureKind::Timeout, err.to_string());
    }
    StreamError::new(StreamFailureKind::Network, err.to_string())
}
