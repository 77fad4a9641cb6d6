use thiserror::Error;

use crate::rect::Rect;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Mask of shape {mask:?} does not match image of shape {image:?}.")]
    ShapeMismatch {
        mask: (usize, usize),
        image: (usize, usize),
    },
    #[error("Rectangle {0} has an inverted row or column range.")]
    InvalidRectangle(Rect),
    #[error("Expected {expected} channel(s) but image has {found}.")]
    ChannelCount { expected: usize, found: usize },
    #[error("Panel '{panel}' has shape {found:?} but the original image has {expected:?}.")]
    PanelShape {
        panel: String,
        found: (usize, usize, usize),
        expected: (usize, usize, usize),
    },
    #[error("Images with {0} channel(s) cannot be written, expected 1, 3 or 4.")]
    UnsupportedChannels(usize),
    #[error("No image data have been provided")]
    NoData,
    #[error("NDArray had an error during initialization of shape: {0}")]
    NDArray(#[from] ndarray::ShapeError),
    #[cfg(feature = "image")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[cfg(feature = "image")]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
