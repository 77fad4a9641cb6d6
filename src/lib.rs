#![doc = include_str!("../README.md")]

mod damage;
mod error;
mod panel;
pub mod prelude;
mod rect;
mod restore;
pub mod sample;

pub use damage::{Damage, apply_damage, build_mask, damaged_pixel_count, simulate_damage};
pub use error::{Error, Result};
#[cfg(feature = "image")]
pub use panel::PngRenderer;
pub use panel::{Panel, PanelContent, Panels, Render};
pub use rect::{ClampedRect, Rect};
pub use restore::{ChannelMode, HarmonicFill, Restore};
