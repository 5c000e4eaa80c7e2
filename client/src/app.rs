use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event};

use crate::config::ClientConfig;
use crate::controller::Controller;
use crate::dom::{init_logging, DomView, PageElements};
use crate::events::{route, Binding, BINDINGS};
use crate::net::FetchBackend;

type PageController = Controller<FetchBackend, DomView>;

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    if document.ready_state() != "loading" {
        return start_app();
    }

    let onready = Closure::<dyn FnMut(Event)>::new(move |_| {
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", onready.as_ref().unchecked_ref())?;
    onready.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let config = ClientConfig::from_page(&window, &document);
    init_logging(config.debug);
    log::info!(
        "starting: upload={} chat={}",
        config.upload_url,
        config.chat_url
    );

    let elements = PageElements::lookup(&document)?;
    let backend = FetchBackend::new(config);
    let view = DomView::new(document.clone(), elements.clone());
    let controller = Rc::new(Controller::new(backend, view));
    controller.render_gallery();

    for binding in BINDINGS {
        bind_event(&document, &elements, &controller, binding)?;
    }
    log::debug!("bound {} page events", BINDINGS.len());

    Ok(())
}

fn bind_event(
    document: &Document,
    elements: &PageElements,
    controller: &Rc<PageController>,
    binding: Binding,
) -> Result<(), JsValue> {
    let target = elements.target(binding.handle, document);
    let elements = elements.clone();
    let controller = controller.clone();
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(ui_event) = elements.read_event(binding.trigger, &event) else {
            return;
        };
        let commands = route(ui_event, controller.lightbox_open());
        if commands.is_empty() {
            return;
        }
        let controller = controller.clone();
        wasm_bindgen_futures::spawn_local(async move {
            for command in commands {
                controller.dispatch(command).await;
            }
        });
    });
    target.add_event_listener_with_callback(binding.event, handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}
