use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use web_sys::{File, FormData};

use imagechat_shared::{ChatReply, ChatRequest, UploadReply, UploadedImage};

use crate::config::ClientConfig;
use crate::controller::Backend;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// The request never completed; carries the browser's error message.
    #[error("{0}")]
    Network(String),
    #[error("unexpected reply (HTTP {status}): {detail}")]
    Decode { status: u16, detail: String },
    #[error("could not encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<gloo_net::Error> for ClientError {
    fn from(error: gloo_net::Error) -> Self {
        match error {
            gloo_net::Error::JsError(error) => ClientError::Network(error.message),
            gloo_net::Error::SerdeError(error) => ClientError::Encode(error),
            gloo_net::Error::GlooError(message) => ClientError::Network(message),
        }
    }
}

/// Decodes a reply body. The server sends JSON for error statuses too, so the
/// status only matters when the body is not the expected shape.
pub fn decode_reply<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|error| ClientError::Decode {
        status,
        detail: error.to_string(),
    })
}

async fn read_reply<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    decode_reply(status, &body)
}

/// `Backend` over the browser's `fetch`.
pub struct FetchBackend {
    config: ClientConfig,
}

impl FetchBackend {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl Backend for FetchBackend {
    type File = File;

    async fn upload(&self, file: &File) -> Result<UploadedImage, ClientError> {
        let form = FormData::new()
            .and_then(|form| {
                form.append_with_blob_and_filename("file", file, &file.name())?;
                Ok(form)
            })
            .map_err(|error| ClientError::Network(format!("{error:?}")))?;
        let response = Request::post(&self.config.upload_url)
            .body(form)?
            .send()
            .await?;
        log::debug!("upload {} -> HTTP {}", file.name(), response.status());
        read_reply::<UploadReply>(response)
            .await?
            .into_result()
            .map_err(ClientError::Rejected)
    }

    async fn chat(&self, payload: &ChatRequest) -> Result<String, ClientError> {
        let response = Request::post(&self.config.chat_url)
            .json(payload)?
            .send()
            .await?;
        log::debug!("chat -> HTTP {}", response.status());
        read_reply::<ChatReply>(response)
            .await?
            .into_result()
            .map_err(ClientError::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_with_json_body_is_decoded() {
        let reply: ChatReply =
            decode_reply(500, r#"{"success": false, "error": "boom"}"#).expect("decode");
        assert_eq!(reply.into_result(), Err("boom".to_string()));
    }

    #[test]
    fn html_body_is_a_decode_error() {
        let result = decode_reply::<UploadReply>(413, "<html>Request Entity Too Large</html>");
        match result {
            Err(ClientError::Decode { status, .. }) => assert_eq!(status, 413),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn rejected_displays_server_text_verbatim() {
        assert_eq!(
            ClientError::Rejected("No file part".to_string()).to_string(),
            "No file part"
        );
    }

    #[test]
    fn network_failure_displays_browser_message_only() {
        assert_eq!(
            ClientError::Network("Failed to fetch".to_string()).to_string(),
            "Failed to fetch"
        );
    }

    #[test]
    fn gloo_failure_maps_to_network() {
        let error = ClientError::from(gloo_net::Error::GlooError("aborted".to_string()));
        assert!(matches!(error, ClientError::Network(ref message) if message == "aborted"));
    }
}
