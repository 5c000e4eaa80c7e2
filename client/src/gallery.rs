use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlImageElement};

use crate::dom::GALLERY_ID;
use crate::state::UploadedImage;

#[derive(Debug, PartialEq, Eq)]
pub enum GalleryAction {
    View(String),
    Remove(usize),
}

pub fn render_gallery(document: &Document, gallery_el: &HtmlElement, images: &[UploadedImage]) {
    gallery_el.set_inner_html("");
    for (index, image) in images.iter().enumerate() {
        let Ok(item) = document.create_element("div") else {
            continue;
        };
        item.set_class_name("gallery-item");

        let Ok(element) = document.create_element("img") else {
            continue;
        };
        let Ok(thumbnail) = element.dyn_into::<HtmlImageElement>() else {
            continue;
        };
        thumbnail.set_src(&image.url);
        thumbnail.set_alt(&image.filename);
        let _ = thumbnail.set_attribute("data-url", &image.url);
        let _ = item.append_child(&thumbnail);

        if let Ok(remove_el) = document.create_element("button") {
            if let Ok(remove_button) = remove_el.dyn_into::<HtmlButtonElement>() {
                let _ = remove_button.set_attribute("type", "button");
                let _ = remove_button.set_attribute("data-action", "remove");
                let _ = remove_button.set_attribute("data-index", &index.to_string());
                let _ = remove_button
                    .set_attribute("aria-label", &format!("Remove {}", image.filename));
                remove_button.set_class_name("gallery-item-remove");
                remove_button.set_text_content(Some("\u{d7}"));
                let _ = item.append_child(&remove_button);
            }
        }
        let _ = gallery_el.append_child(&item);
    }
}

/// The attributes of one element on a click's path that the gallery cares about.
#[derive(Debug, Default)]
pub struct ClickedElement {
    pub id: String,
    pub action: Option<String>,
    pub index: Option<String>,
    pub url: Option<String>,
}

impl ClickedElement {
    fn read(element: &Element) -> Self {
        Self {
            id: element.id(),
            action: element.get_attribute("data-action"),
            index: element.get_attribute("data-index"),
            url: element.get_attribute("data-url"),
        }
    }
}

/// Walks from the clicked element up to the gallery container. The remove
/// control is checked before the thumbnail, so a remove click never opens the
/// lightbox.
pub fn resolve_gallery_click(
    path: impl IntoIterator<Item = ClickedElement>,
) -> Option<GalleryAction> {
    for element in path {
        if element.action.as_deref() == Some("remove") {
            let index = element.index?;
            return index.parse::<usize>().ok().map(GalleryAction::Remove);
        }
        if let Some(url) = element.url {
            return Some(GalleryAction::View(url));
        }
        if element.id == GALLERY_ID {
            return None;
        }
    }
    None
}

/// Decodes a click delegated to the gallery container.
pub fn gallery_action_from_event(event: &Event) -> Option<GalleryAction> {
    let target = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    let path = std::iter::successors(target, |element| element.parent_element());
    resolve_gallery_click(path.map(|element| ClickedElement::read(&element)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> ClickedElement {
        ClickedElement {
            id: GALLERY_ID.to_string(),
            ..Default::default()
        }
    }

    fn item() -> ClickedElement {
        ClickedElement::default()
    }

    fn thumbnail(url: &str) -> ClickedElement {
        ClickedElement {
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    fn remove_button(index: &str) -> ClickedElement {
        ClickedElement {
            action: Some("remove".to_string()),
            index: Some(index.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn thumbnail_click_views_image() {
        let path = vec![thumbnail("/uploads/a.png"), item(), gallery()];
        assert_eq!(
            resolve_gallery_click(path),
            Some(GalleryAction::View("/uploads/a.png".to_string()))
        );
    }

    #[test]
    fn remove_click_never_views() {
        let path = vec![remove_button("1"), item(), gallery()];
        assert_eq!(resolve_gallery_click(path), Some(GalleryAction::Remove(1)));
    }

    #[test]
    fn remove_wins_over_an_enclosing_thumbnail_url() {
        let path = vec![remove_button("0"), thumbnail("/uploads/a.png"), gallery()];
        assert_eq!(resolve_gallery_click(path), Some(GalleryAction::Remove(0)));
    }

    #[test]
    fn malformed_remove_index_does_nothing() {
        assert_eq!(resolve_gallery_click(vec![remove_button("x"), gallery()]), None);
        let missing = ClickedElement {
            action: Some("remove".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_gallery_click(vec![missing, gallery()]), None);
    }

    #[test]
    fn click_on_empty_gallery_space_does_nothing() {
        let path = vec![gallery(), thumbnail("/outside.png")];
        assert_eq!(resolve_gallery_click(path), None);
    }
}
