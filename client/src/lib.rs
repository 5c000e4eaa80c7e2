mod app;
mod config;
mod controller;
mod dom;
mod events;
mod gallery;
mod net;
mod state;

pub use app::run;
pub use config::ClientConfig;
pub use controller::{Backend, Controller, View};
pub use events::{route, Command, DroppedFile, UiEvent};
pub use net::ClientError;
pub use state::{ChatMessage, MessageKind, UploadedImage};
