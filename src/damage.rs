//! Mask construction and pixel corruption.

use ndarray::{Array2, Array3, ArrayBase, Axis, Data, Ix2, Ix3, Zip, s};
use num_traits::Zero;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::rect::Rect;

/// Result of [`simulate_damage`]: the mask and the damaged copy of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct Damage<T> {
    pub mask: Array2<bool>,
    pub damaged: Array3<T>,
}

/// Build a `(height, width)` mask which is `true` wherever any of the
/// rectangles covers a pixel.
///
/// All rectangles are validated before anything is marked. Parts of a
/// rectangle outside of the image are clamped away.
pub fn build_mask(shape: (usize, usize), rects: &[Rect]) -> Result<Array2<bool>> {
    for rect in rects {
        rect.validate()?;
    }

    let mut mask = Array2::from_elem(shape, false);
    for rect in rects {
        let Some(clamped) = rect.clamp_to(shape) else {
            if !rect.is_empty() {
                warn!("rectangle {rect} lies outside of image {shape:?}, skipping");
            }
            continue;
        };
        if clamped.area() != rect.area() {
            trace!(
                "rectangle {rect} clamped to rows {:?}, cols {:?}",
                clamped.rows, clamped.cols
            );
        }
        mask.slice_mut(s![clamped.rows, clamped.cols]).fill(true);
    }

    debug!(
        "built mask of shape {shape:?} from {} rectangle(s), {} pixel(s) marked",
        rects.len(),
        damaged_pixel_count(&mask)
    );
    Ok(mask)
}

/// Copy `image` and zero every channel of every pixel marked in `mask`.
///
/// The input is only read; the returned array is a new allocation.
pub fn apply_damage<S, M, T>(
    image: &ArrayBase<S, Ix3>,
    mask: &ArrayBase<M, Ix2>,
) -> Result<Array3<T>>
where
    S: Data<Elem = T>,
    M: Data<Elem = bool>,
    T: Clone + Zero,
{
    let (height, width, _) = image.dim();
    if mask.dim() != (height, width) {
        return Err(Error::ShapeMismatch {
            mask: mask.dim(),
            image: (height, width),
        });
    }

    let mut damaged = image.to_owned();
    Zip::from(damaged.lanes_mut(Axis(2)))
        .and(mask)
        .for_each(|mut pixel, &masked| {
            if masked {
                pixel.fill(T::zero());
            }
        });
    Ok(damaged)
}

/// Build the mask for `rects` and apply it to a copy of `image`.
pub fn simulate_damage<S, T>(image: &ArrayBase<S, Ix3>, rects: &[Rect]) -> Result<Damage<T>>
where
    S: Data<Elem = T>,
    T: Clone + Zero,
{
    let (height, width, _) = image.dim();
    let mask = build_mask((height, width), rects)?;
    let damaged = apply_damage(image, &mask)?;
    Ok(Damage { mask, damaged })
}

/// Number of pixels flagged in a mask.
pub fn damaged_pixel_count<M>(mask: &ArrayBase<M, Ix2>) -> usize
where
    M: Data<Elem = bool>,
{
    mask.iter().filter(|masked| **masked).count()
}
