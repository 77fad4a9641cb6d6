//! The four titled panels handed to a renderer once damage and restoration
//! are done.

use ndarray::{Array2, Array3};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    Color(Array3<u8>),
    Mask(Array2<bool>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub content: PanelContent,
}

impl Panel {
    pub fn color(title: impl Into<String>, image: Array3<u8>) -> Self {
        Self {
            title: title.into(),
            content: PanelContent::Color(image),
        }
    }

    pub fn mask(title: impl Into<String>, mask: Array2<bool>) -> Self {
        Self {
            title: title.into(),
            content: PanelContent::Mask(mask),
        }
    }

    /// Title in lower snake case, usable as a file stem.
    pub fn slug(&self) -> String {
        self.title
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(|word| word.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join("_")
    }

    /// `(height, width)` of the panel.
    pub fn dim(&self) -> (usize, usize) {
        match &self.content {
            PanelContent::Color(image) => (image.dim().0, image.dim().1),
            PanelContent::Mask(mask) => mask.dim(),
        }
    }
}

const ORIGINAL: &str = "Original image";
const MASK: &str = "Mask";
const DAMAGED: &str = "Defected image";
const RESTORED: &str = "Inpainted image";

/// Original, mask, damaged and restored image side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct Panels {
    panels: [Panel; 4],
}

impl Panels {
    pub fn new(
        original: Array3<u8>,
        mask: Array2<bool>,
        damaged: Array3<u8>,
        restored: Array3<u8>,
    ) -> Result<Self> {
        let (height, width, channels) = original.dim();
        if mask.dim() != (height, width) {
            return Err(Error::ShapeMismatch {
                mask: mask.dim(),
                image: (height, width),
            });
        }
        for (title, other) in [(DAMAGED, &damaged), (RESTORED, &restored)] {
            if other.dim() != (height, width, channels) {
                return Err(Error::PanelShape {
                    panel: title.to_string(),
                    found: other.dim(),
                    expected: (height, width, channels),
                });
            }
        }

        Ok(Self {
            panels: [
                Panel::color(ORIGINAL, original),
                Panel::mask(MASK, mask),
                Panel::color(DAMAGED, damaged),
                Panel::color(RESTORED, restored),
            ],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    pub fn original(&self) -> &Panel {
        &self.panels[0]
    }

    pub fn mask(&self) -> &Panel {
        &self.panels[1]
    }

    pub fn damaged(&self) -> &Panel {
        &self.panels[2]
    }

    pub fn restored(&self) -> &Panel {
        &self.panels[3]
    }
}

/// Presents panels to the user. Implementations must not alter the data.
pub trait Render {
    fn render(&self, panels: &Panels) -> Result<()>;
}

#[cfg(feature = "image")]
mod png {
    use std::path::{Path, PathBuf};

    use image::{Luma, Rgb, Rgba};
    use tracing::info;

    use super::{Panel, PanelContent, Panels, Render};
    use crate::error::{Error, Result};
    use crate::prelude::{buffer_from_array, mask_to_luma};

    /// Writes every panel as `<dir>/<slug>.png`.
    #[derive(Debug, Clone)]
    pub struct PngRenderer {
        dir: PathBuf,
    }

    impl PngRenderer {
        pub fn new(dir: impl AsRef<Path>) -> Self {
            Self {
                dir: dir.as_ref().to_path_buf(),
            }
        }

        pub fn path_for(&self, panel: &Panel) -> PathBuf {
            self.dir.join(format!("{}.png", panel.slug()))
        }
    }

    impl Render for PngRenderer {
        fn render(&self, panels: &Panels) -> Result<()> {
            std::fs::create_dir_all(&self.dir)?;
            for panel in panels.iter() {
                let path = self.path_for(panel);
                match &panel.content {
                    PanelContent::Mask(mask) => mask_to_luma(mask).save(&path)?,
                    PanelContent::Color(image) => match image.dim().2 {
                        1 => buffer_from_array::<Luma<u8>>(image)?.save(&path)?,
                        3 => buffer_from_array::<Rgb<u8>>(image)?.save(&path)?,
                        4 => buffer_from_array::<Rgba<u8>>(image)?.save(&path)?,
                        found => return Err(Error::UnsupportedChannels(found)),
                    },
                }
                info!("wrote '{}' to {}", panel.title, path.display());
            }
            Ok(())
        }
    }

}

#[cfg(feature = "image")]
pub use png::PngRenderer;
