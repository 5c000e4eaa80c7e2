use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, DragEvent, Element, Event, EventTarget, File, FileList, HtmlButtonElement,
    HtmlElement, HtmlImageElement, HtmlInputElement, KeyboardEvent,
};

use crate::controller::View;
use crate::events::{DroppedFile, Handle, Trigger, UiEvent};
use crate::gallery::{gallery_action_from_event, render_gallery, GalleryAction};
use crate::state::{ChatMessage, UploadedImage};

pub const DROP_ZONE_ID: &str = "dropZone";
pub const FILE_INPUT_ID: &str = "fileInput";
pub const GALLERY_ID: &str = "imageGallery";
pub const CLEAR_IMAGES_ID: &str = "clearImage";
pub const TRANSCRIPT_ID: &str = "chatMessages";
pub const PROMPT_ID: &str = "promptInput";
pub const SEND_ID: &str = "sendBtn";
pub const LOADING_ID: &str = "loading";
pub const LIGHTBOX_ID: &str = "lightbox";
pub const LIGHTBOX_IMAGE_ID: &str = "lightboxImage";
pub const LIGHTBOX_CLOSE_ID: &str = "lightboxClose";

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

fn set_shown(element: &HtmlElement, class: &str, shown: bool) {
    let _ = element.class_list().toggle_with_force(class, shown);
}

fn file_list_to_vec(files: &FileList) -> Vec<File> {
    (0..files.length()).filter_map(|i| files.get(i)).collect()
}

/// The stable element handles the page is built from.
#[derive(Clone)]
pub struct PageElements {
    pub drop_zone: HtmlElement,
    pub file_input: HtmlInputElement,
    pub gallery: HtmlElement,
    pub clear_button: HtmlButtonElement,
    pub transcript: HtmlElement,
    pub prompt: HtmlInputElement,
    pub send_button: HtmlButtonElement,
    pub loading: HtmlElement,
    pub lightbox: HtmlElement,
    pub lightbox_image: HtmlImageElement,
    pub lightbox_close: HtmlElement,
}

impl PageElements {
    pub fn lookup(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            drop_zone: get_element(document, DROP_ZONE_ID)?,
            file_input: get_element(document, FILE_INPUT_ID)?,
            gallery: get_element(document, GALLERY_ID)?,
            clear_button: get_element(document, CLEAR_IMAGES_ID)?,
            transcript: get_element(document, TRANSCRIPT_ID)?,
            prompt: get_element(document, PROMPT_ID)?,
            send_button: get_element(document, SEND_ID)?,
            loading: get_element(document, LOADING_ID)?,
            lightbox: get_element(document, LIGHTBOX_ID)?,
            lightbox_image: get_element(document, LIGHTBOX_IMAGE_ID)?,
            lightbox_close: get_element(document, LIGHTBOX_CLOSE_ID)?,
        })
    }

    pub fn target(&self, handle: Handle, document: &Document) -> EventTarget {
        match handle {
            Handle::DropZone => self.drop_zone.clone().into(),
            Handle::FileInput => self.file_input.clone().into(),
            Handle::Gallery => self.gallery.clone().into(),
            Handle::ClearImages => self.clear_button.clone().into(),
            Handle::PromptInput => self.prompt.clone().into(),
            Handle::SendButton => self.send_button.clone().into(),
            Handle::Lightbox => self.lightbox.clone().into(),
            Handle::LightboxClose => self.lightbox_close.clone().into(),
            Handle::Document => document.clone().into(),
        }
    }

    /// Reads what a bound DOM event means for the page.
    pub fn read_event(&self, trigger: Trigger, event: &Event) -> Option<UiEvent<File>> {
        match trigger {
            Trigger::DropZoneClick => Some(UiEvent::DropZoneClick),
            Trigger::DragOver => {
                event.prevent_default();
                Some(UiEvent::DragOver)
            }
            Trigger::DragLeave => Some(UiEvent::DragLeave),
            Trigger::Drop => {
                event.prevent_default();
                let files = event
                    .dyn_ref::<DragEvent>()
                    .and_then(|drag| drag.data_transfer())
                    .and_then(|transfer| transfer.files())
                    .map(|files| file_list_to_vec(&files))
                    .unwrap_or_default();
                Some(UiEvent::Drop(
                    files
                        .into_iter()
                        .map(|file| DroppedFile {
                            mime: file.type_(),
                            file,
                        })
                        .collect(),
                ))
            }
            Trigger::FilesSelected => {
                let files = self.file_input.files()?;
                Some(UiEvent::FilesSelected(file_list_to_vec(&files)))
            }
            Trigger::GalleryClick => match gallery_action_from_event(event)? {
                GalleryAction::View(url) => Some(UiEvent::ThumbnailClick(url)),
                GalleryAction::Remove(index) => Some(UiEvent::RemoveClick(index)),
            },
            Trigger::ClearClick => Some(UiEvent::ClearClick),
            Trigger::PromptKeyPress => {
                let key = event.dyn_ref::<KeyboardEvent>()?.key();
                Some(UiEvent::PromptKey(key))
            }
            Trigger::SendClick => Some(UiEvent::SendClick),
            Trigger::LightboxClick => {
                let target_id = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .map(|element| element.id());
                Some(UiEvent::LightboxClick {
                    on_backdrop: is_backdrop_click(target_id.as_deref()),
                })
            }
            Trigger::LightboxCloseClick => Some(UiEvent::LightboxCloseClick),
            Trigger::KeyDown => {
                let key = event.dyn_ref::<KeyboardEvent>()?.key();
                Some(UiEvent::KeyDown(key))
            }
        }
    }
}

pub struct DomView {
    document: Document,
    elements: PageElements,
}

impl DomView {
    pub fn new(document: Document, elements: PageElements) -> Self {
        Self { document, elements }
    }
}

impl View for DomView {
    fn render_gallery(&self, images: &[UploadedImage], clear_label: Option<&str>) {
        render_gallery(&self.document, &self.elements.gallery, images);
        let clear_button = &self.elements.clear_button;
        match clear_label {
            Some(label) => {
                let _ = clear_button.style().set_property("display", "block");
                clear_button.set_text_content(Some(label));
            }
            None => {
                let _ = clear_button.style().set_property("display", "none");
            }
        }
    }

    fn append_message(&self, message: &ChatMessage) {
        let Ok(entry) = self.document.create_element("div") else {
            return;
        };
        entry.set_class_name(&format!("message {}", message.kind.class()));
        entry.set_text_content(Some(&message.text));
        let transcript = &self.elements.transcript;
        let _ = transcript.append_child(&entry);
        transcript.set_scroll_top(transcript.scroll_height());
    }

    fn prompt_text(&self) -> String {
        self.elements.prompt.value()
    }

    fn clear_prompt(&self) {
        self.elements.prompt.set_value("");
    }

    fn set_busy(&self, busy: bool) {
        set_shown(&self.elements.loading, "show", busy);
        self.elements.send_button.set_disabled(busy);
    }

    fn show_lightbox(&self, url: &str) {
        self.elements.lightbox_image.set_src(url);
        set_shown(&self.elements.lightbox, "show", true);
    }

    fn hide_lightbox(&self) {
        set_shown(&self.elements.lightbox, "show", false);
    }

    fn open_file_picker(&self) {
        self.elements.file_input.click();
    }

    fn reset_file_input(&self) {
        self.elements.file_input.set_value("");
    }

    fn set_drag_over(&self, active: bool) {
        set_shown(&self.elements.drop_zone, "drag-over", active);
    }
}

pub fn init_logging(debug: bool) {
    let level = if debug {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    wasm_logger::init(wasm_logger::Config::new(level));
}

/// A click on the overlay closes it only when it landed on the backdrop
/// itself, not on the image or close control inside it.
pub fn is_backdrop_click(target_id: Option<&str>) -> bool {
    target_id == Some(LIGHTBOX_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_click_targets_the_overlay_only() {
        assert!(is_backdrop_click(Some(LIGHTBOX_ID)));
        assert!(!is_backdrop_click(Some(LIGHTBOX_IMAGE_ID)));
        assert!(!is_backdrop_click(Some("")));
        assert!(!is_backdrop_click(None));
    }
}
