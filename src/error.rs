use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("ROM is too large for memory [size: {size}, capacity: {capacity}]")]
    CapacityExceeded { size: usize, capacity: usize },

    #[error("ROM not found, check the path provided: {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("stack overflow at {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("stack underflow at {pc:#05X}")]
    StackUnderflow { pc: u16 },

    #[error("window could not be created: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("pixel surface error: {0}")]
    Surface(#[from] pixels::Error),

    #[error("pixel surface could not be resized: {0}")]
    Texture(#[from] pixels::TextureError),
}
