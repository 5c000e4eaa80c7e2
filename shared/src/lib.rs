use serde::{Deserialize, Serialize};

/// An image the server has stored, as reported by `POST /upload`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UploadedImage {
    pub filename: String,
    pub url: String,
}

/// Body of `POST /upload`: either `{success: true, filename, url}` or `{success: false, error}`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UploadReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadReply {
    /// Splits the reply into the stored image or the server's error text.
    pub fn into_result(self) -> Result<UploadedImage, String> {
        if !self.success {
            return Err(self.error.unwrap_or_else(|| "Unknown error".to_string()));
        }
        match (self.filename, self.url) {
            (Some(filename), Some(url)) => Ok(UploadedImage { filename, url }),
            _ => Err("Upload reply is missing filename or url".to_string()),
        }
    }
}

/// Body sent to `POST /chat`. `image_paths` holds filenames in gallery order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatRequest {
    pub prompt: String,
    pub image_paths: Vec<String>,
}

/// Body of `POST /chat`: either `{success: true, response}` or `{success: false, error}`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ChatReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatReply {
    pub fn into_result(self) -> Result<String, String> {
        if self.success {
            Ok(self.response.unwrap_or_default())
        } else {
            Err(self.error.unwrap_or_else(|| "Unknown error".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_success_yields_image() {
        let reply: UploadReply = serde_json::from_str(
            r#"{"success": true, "filename": "cat.png", "url": "/uploads/cat.png"}"#,
        )
        .expect("decode");
        assert_eq!(
            reply.into_result(),
            Ok(UploadedImage {
                filename: "cat.png".to_string(),
                url: "/uploads/cat.png".to_string(),
            })
        );
    }

    #[test]
    fn upload_failure_carries_server_error() {
        let reply: UploadReply =
            serde_json::from_str(r#"{"success": false, "error": "No selected file"}"#)
                .expect("decode");
        assert_eq!(reply.into_result(), Err("No selected file".to_string()));
    }

    #[test]
    fn upload_success_without_url_is_an_error() {
        let reply: UploadReply =
            serde_json::from_str(r#"{"success": true, "filename": "cat.png"}"#).expect("decode");
        assert!(reply.into_result().is_err());
    }

    #[test]
    fn chat_request_wire_shape() {
        let request = ChatRequest {
            prompt: "hello".to_string(),
            image_paths: vec!["a.png".to_string(), "b.jpg".to_string()],
        };
        let json = serde_json::to_value(&request).expect("encode");
        assert_eq!(
            json,
            serde_json::json!({"prompt": "hello", "image_paths": ["a.png", "b.jpg"]})
        );
    }

    #[test]
    fn chat_reply_success_and_failure() {
        let ok: ChatReply =
            serde_json::from_str(r#"{"success": true, "response": "A cat."}"#).expect("decode");
        assert_eq!(ok.into_result(), Ok("A cat.".to_string()));

        let err: ChatReply =
            serde_json::from_str(r#"{"success": false, "error": "CUDA out of memory"}"#)
                .expect("decode");
        assert_eq!(err.into_result(), Err("CUDA out of memory".to_string()));
    }
}
