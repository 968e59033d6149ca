pub mod codec;
pub mod config;
pub mod connection;
pub mod deck;
pub mod dispatch;
pub mod message;
pub mod monitor;
pub mod render;
#[cfg(feature = "streamdeck")]
pub mod streamdeck;
pub mod style;

pub use self::config::Config;
pub use self::connection::Listener;
pub use self::deck::{Controller, Deck};
pub use self::message::Message;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("font {path}: {source}")]
    Font {
        path: PathBuf,
        source: ab_glyph::InvalidFont,
    },

    #[error("device: {0}")]
    Device(Box<dyn std::error::Error + Send + Sync>),

    #[error("device lock poisoned by a panicked thread")]
    Poisoned,
}
