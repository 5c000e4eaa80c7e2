//! The page's event table. Every DOM listener the client installs is one row of
//! [`BINDINGS`]; the raw event is turned into a [`UiEvent`] and [`route`] decides
//! which [`Command`]s the controller runs.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    DropZone,
    FileInput,
    Gallery,
    ClearImages,
    PromptInput,
    SendButton,
    Lightbox,
    LightboxClose,
    Document,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    DropZoneClick,
    DragOver,
    DragLeave,
    Drop,
    FilesSelected,
    GalleryClick,
    ClearClick,
    PromptKeyPress,
    SendClick,
    LightboxClick,
    LightboxCloseClick,
    KeyDown,
}

#[derive(Clone, Copy, Debug)]
pub struct Binding {
    pub handle: Handle,
    pub event: &'static str,
    pub trigger: Trigger,
}

const fn bind(handle: Handle, event: &'static str, trigger: Trigger) -> Binding {
    Binding {
        handle,
        event,
        trigger,
    }
}

pub const BINDINGS: [Binding; 12] = [
    bind(Handle::DropZone, "click", Trigger::DropZoneClick),
    bind(Handle::DropZone, "dragover", Trigger::DragOver),
    bind(Handle::DropZone, "dragleave", Trigger::DragLeave),
    bind(Handle::DropZone, "drop", Trigger::Drop),
    bind(Handle::FileInput, "change", Trigger::FilesSelected),
    bind(Handle::Gallery, "click", Trigger::GalleryClick),
    bind(Handle::ClearImages, "click", Trigger::ClearClick),
    bind(Handle::PromptInput, "keypress", Trigger::PromptKeyPress),
    bind(Handle::SendButton, "click", Trigger::SendClick),
    bind(Handle::Lightbox, "click", Trigger::LightboxClick),
    bind(Handle::LightboxClose, "click", Trigger::LightboxCloseClick),
    bind(Handle::Document, "keydown", Trigger::KeyDown),
];

pub struct DroppedFile<F> {
    pub file: F,
    pub mime: String,
}

/// What happened on the page, decoded from the DOM event.
pub enum UiEvent<F> {
    DropZoneClick,
    DragOver,
    DragLeave,
    Drop(Vec<DroppedFile<F>>),
    FilesSelected(Vec<F>),
    ThumbnailClick(String),
    RemoveClick(usize),
    ClearClick,
    PromptKey(String),
    SendClick,
    /// Click inside the overlay; `on_backdrop` is false when it landed on the image.
    LightboxClick { on_backdrop: bool },
    LightboxCloseClick,
    KeyDown(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command<F> {
    OpenFilePicker,
    SetDragOver(bool),
    Ingest(Vec<F>),
    RemoveImage(usize),
    ClearImages,
    Send,
    ShowLightbox(String),
    CloseLightbox,
}

/// Commands for one event, in the order they run. Most events yield at most one.
pub fn route<F>(event: UiEvent<F>, lightbox_open: bool) -> Vec<Command<F>> {
    let command = match event {
        UiEvent::DropZoneClick => Some(Command::OpenFilePicker),
        UiEvent::DragOver => Some(Command::SetDragOver(true)),
        UiEvent::DragLeave => Some(Command::SetDragOver(false)),
        UiEvent::Drop(files) => {
            let images: Vec<F> = files
                .into_iter()
                .filter(|dropped| dropped.mime.starts_with("image/"))
                .map(|dropped| dropped.file)
                .collect();
            let mut commands = vec![Command::SetDragOver(false)];
            commands.extend(ingest(images));
            return commands;
        }
        UiEvent::FilesSelected(files) => ingest(files),
        UiEvent::ThumbnailClick(url) => Some(Command::ShowLightbox(url)),
        UiEvent::RemoveClick(index) => Some(Command::RemoveImage(index)),
        UiEvent::ClearClick => Some(Command::ClearImages),
        UiEvent::PromptKey(key) => (key == "Enter").then_some(Command::Send),
        UiEvent::SendClick => Some(Command::Send),
        UiEvent::LightboxClick { on_backdrop } => on_backdrop.then_some(Command::CloseLightbox),
        UiEvent::LightboxCloseClick => Some(Command::CloseLightbox),
        UiEvent::KeyDown(key) => {
            (key == "Escape" && lightbox_open).then_some(Command::CloseLightbox)
        }
    };
    command.into_iter().collect()
}

fn ingest<F>(files: Vec<F>) -> Option<Command<F>> {
    if files.is_empty() {
        None
    } else {
        Some(Command::Ingest(files))
    }
}
