pub use imagechat_shared::UploadedImage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    User,
    Assistant,
    Error,
}

impl MessageKind {
    /// CSS class the transcript entry is tagged with.
    pub fn class(self) -> &'static str {
        match self {
            MessageKind::User => "user",
            MessageKind::Assistant => "assistant",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::User,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Assistant,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }
}

/// Uploaded images in upload order. This order is both the gallery order and the
/// order of `image_paths` sent to the chat endpoint.
#[derive(Clone, Debug, Default)]
pub struct ImageList {
    images: Vec<UploadedImage>,
}

impl ImageList {
    pub fn push(&mut self, image: UploadedImage) {
        self.images.push(image);
    }

    /// Removes the image at `index`; out of range indexes leave the list untouched.
    pub fn remove(&mut self, index: usize) -> Option<UploadedImage> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn as_slice(&self) -> &[UploadedImage] {
        &self.images
    }

    pub fn filenames(&self) -> Vec<String> {
        self.images
            .iter()
            .map(|image| image.filename.clone())
            .collect()
    }
}

pub fn upload_summary(count: usize) -> String {
    if count == 1 {
        "Image uploaded! Ask me anything about it.".to_string()
    } else {
        format!("{count} images uploaded! I can compare and analyze them together.")
    }
}

pub fn removal_summary(remaining: usize) -> String {
    if remaining == 0 {
        "All images cleared.".to_string()
    } else {
        format!("Image removed. {remaining} image(s) remaining.")
    }
}

/// Label of the clear control, or `None` when it should be hidden.
pub fn clear_button_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("Clear Image".to_string()),
        count => Some(format!("Clear All Images ({count})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> UploadedImage {
        UploadedImage {
            filename: name.to_string(),
            url: format!("/uploads/{name}"),
        }
    }

    #[test]
    fn remove_out_of_range_is_ignored() {
        let mut list = ImageList::default();
        list.push(image("a.png"));
        assert_eq!(list.remove(3), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut list = ImageList::default();
        for name in ["a.png", "b.png", "c.png"] {
            list.push(image(name));
        }
        assert_eq!(list.remove(1), Some(image("b.png")));
        assert_eq!(list.filenames(), vec!["a.png", "c.png"]);
    }

    #[test]
    fn summaries_match_count() {
        assert_eq!(upload_summary(1), "Image uploaded! Ask me anything about it.");
        assert_eq!(
            upload_summary(3),
            "3 images uploaded! I can compare and analyze them together."
        );
        assert_eq!(removal_summary(0), "All images cleared.");
        assert_eq!(removal_summary(2), "Image removed. 2 image(s) remaining.");
    }

    #[test]
    fn clear_label_tracks_count() {
        assert_eq!(clear_button_label(0), None);
        assert_eq!(clear_button_label(1).as_deref(), Some("Clear Image"));
        assert_eq!(clear_button_label(4).as_deref(), Some("Clear All Images (4)"));
    }
}
