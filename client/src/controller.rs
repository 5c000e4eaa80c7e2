use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use imagechat_shared::ChatRequest;

use crate::events::Command;
use crate::net::ClientError;
use crate::state::{
    clear_button_label, removal_summary, upload_summary, ChatMessage, ImageList, UploadedImage,
};

/// The two HTTP endpoints the page talks to.
#[async_trait(?Send)]
pub trait Backend {
    type File;

    async fn upload(&self, file: &Self::File) -> Result<UploadedImage, ClientError>;

    async fn chat(&self, request: &ChatRequest) -> Result<String, ClientError>;
}

/// Everything the controller needs from the page.
pub trait View {
    /// Rebuilds the gallery from scratch. `clear_label` is `None` when the clear
    /// control must be hidden.
    fn render_gallery(&self, images: &[UploadedImage], clear_label: Option<&str>);
    fn append_message(&self, message: &ChatMessage);
    fn prompt_text(&self) -> String;
    fn clear_prompt(&self);
    /// Loading indicator shown and send control disabled while `busy`.
    fn set_busy(&self, busy: bool);
    fn show_lightbox(&self, url: &str);
    fn hide_lightbox(&self);
    fn open_file_picker(&self);
    fn reset_file_input(&self);
    fn set_drag_over(&self, active: bool);
}

/// Restores the send control when dropped, whichever way the request ended.
struct BusyGuard<'a, V: View> {
    view: &'a V,
}

impl<'a, V: View> BusyGuard<'a, V> {
    fn engage(view: &'a V) -> Self {
        view.set_busy(true);
        Self { view }
    }
}

impl<V: View> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_busy(false);
    }
}

pub struct Controller<B: Backend, V: View> {
    backend: B,
    view: V,
    images: RefCell<ImageList>,
    lightbox_open: Cell<bool>,
}

impl<B: Backend, V: View> Controller<B, V> {
    pub fn new(backend: B, view: V) -> Self {
        Self {
            backend,
            view,
            images: RefCell::new(ImageList::default()),
            lightbox_open: Cell::new(false),
        }
    }

    pub fn lightbox_open(&self) -> bool {
        self.lightbox_open.get()
    }

    pub async fn dispatch(&self, command: Command<B::File>) {
        match command {
            Command::OpenFilePicker => self.view.open_file_picker(),
            Command::SetDragOver(active) => self.view.set_drag_over(active),
            Command::Ingest(files) => self.ingest_files(files).await,
            Command::RemoveImage(index) => self.remove_image(index),
            Command::ClearImages => self.clear_images(),
            Command::Send => self.send_message().await,
            Command::ShowLightbox(url) => self.show_lightbox(&url),
            Command::CloseLightbox => self.close_lightbox(),
        }
    }

    /// Uploads `files` one at a time. A failed file is reported and skipped; the
    /// gallery is rebuilt once and a single summary follows the whole batch.
    pub async fn ingest_files(&self, files: Vec<B::File>) {
        if files.is_empty() {
            return;
        }
        log::debug!("uploading {} file(s)", files.len());
        for file in &files {
            match self.backend.upload(file).await {
                Ok(image) => {
                    log::debug!("uploaded {}", image.filename);
                    self.images.borrow_mut().push(image);
                }
                Err(error) => {
                    log::warn!("upload failed: {error}");
                    self.append(ChatMessage::error(format!(
                        "Error uploading image: {error}"
                    )));
                }
            }
        }
        self.render_gallery();
        let count = self.images.borrow().len();
        self.append(ChatMessage::assistant(upload_summary(count)));
    }

    pub fn remove_image(&self, index: usize) {
        let removed = self.images.borrow_mut().remove(index);
        let Some(removed) = removed else {
            log::debug!("ignoring remove of missing image {index}");
            return;
        };
        log::debug!("removed {}", removed.filename);
        self.render_gallery();
        let remaining = self.images.borrow().len();
        self.append(ChatMessage::assistant(removal_summary(remaining)));
    }

    pub fn clear_images(&self) {
        self.images.borrow_mut().clear();
        self.render_gallery();
        self.view.reset_file_input();
    }

    pub async fn send_message(&self) {
        let raw = self.view.prompt_text();
        let prompt = raw.trim();
        if prompt.is_empty() {
            return;
        }
        self.append(ChatMessage::user(prompt));
        self.view.clear_prompt();

        let request = ChatRequest {
            prompt: prompt.to_string(),
            image_paths: self.images.borrow().filenames(),
        };
        let _busy = BusyGuard::engage(&self.view);
        log::debug!("chat with {} image(s)", request.image_paths.len());
        match self.backend.chat(&request).await {
            Ok(response) => self.append(ChatMessage::assistant(response)),
            Err(error) => {
                log::warn!("chat failed: {error}");
                self.append(ChatMessage::error(format!("Error: {error}")));
            }
        }
    }

    pub fn show_lightbox(&self, url: &str) {
        self.view.show_lightbox(url);
        self.lightbox_open.set(true);
    }

    pub fn close_lightbox(&self) {
        self.view.hide_lightbox();
        self.lightbox_open.set(false);
    }

    /// Rebuilds the gallery and clear control from the current list.
    pub fn render_gallery(&self) {
        let images = self.images.borrow();
        let label = clear_button_label(images.len());
        self.view.render_gallery(images.as_slice(), label.as_deref());
    }

    fn append(&self, message: ChatMessage) {
        self.view.append_message(&message);
    }
}
