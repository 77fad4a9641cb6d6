pub use crate::damage::{Damage, apply_damage, build_mask, damaged_pixel_count, simulate_damage};
pub use crate::error::{Error, Result};
pub use crate::panel::{Panel, PanelContent, Panels, Render};
pub use crate::rect::{ClampedRect, Rect};
pub use crate::restore::{ChannelMode, HarmonicFill, Restore};

#[cfg(feature = "image")]
mod image_buffer {
    use image::{GrayImage, ImageBuffer, Luma, Pixel, Primitive};

    use std::ops::Deref;

    use crate::damage::simulate_damage;
    use crate::error::{Error, Result};
    use crate::rect::Rect;
    use crate::restore::{ChannelMode, Restore};
    use glam::USizeVec2;

    use ndarray::{Array2, Array3};
    use num_traits::{AsPrimitive, Zero};

    /// Copy an image buffer into a `(height, width, channels)` array.
    pub fn array_from_buffer<ImagePixel, ImageContainer>(
        buffer: &ImageBuffer<ImagePixel, Vec<ImageContainer>>,
    ) -> Result<Array3<ImageContainer>>
    where
        ImagePixel: Pixel<Subpixel = ImageContainer>,
        ImageContainer: Clone + Copy,
    {
        let resolution = USizeVec2::new(buffer.width() as usize, buffer.height() as usize);
        let array = Array3::from_shape_vec(
            (
                resolution.y,
                resolution.x,
                ImagePixel::CHANNEL_COUNT as usize,
            ),
            buffer.as_raw().to_vec(),
        )?;
        Ok(array)
    }

    /// Copy a `(height, width, channels)` array into an image buffer.
    pub fn buffer_from_array<ImagePixel>(
        array: &Array3<ImagePixel::Subpixel>,
    ) -> Result<ImageBuffer<ImagePixel, Vec<ImagePixel::Subpixel>>>
    where
        ImagePixel: Pixel,
    {
        let (height, width, channels) = array.dim();
        if channels != ImagePixel::CHANNEL_COUNT as usize {
            return Err(Error::ChannelCount {
                expected: ImagePixel::CHANNEL_COUNT as usize,
                found: channels,
            });
        }
        let data: Vec<ImagePixel::Subpixel> = array.iter().copied().collect();
        ImageBuffer::from_raw(width as u32, height as u32, data).ok_or(Error::NoData)
    }

    /// Render a mask as 8-bit gray, 255 where damaged.
    pub fn mask_to_luma(mask: &Array2<bool>) -> GrayImage {
        let (height, width) = mask.dim();
        GrayImage::from_fn(width as u32, height as u32, |x, y| {
            Luma([if mask[(y as usize, x as usize)] { 255 } else { 0 }])
        })
    }

    /// Any non-zero pixel of a gray image counts as damaged.
    pub fn mask_from_luma<MaskPixel, MaskContainer>(
        mask: &ImageBuffer<Luma<MaskPixel>, MaskContainer>,
    ) -> Array2<bool>
    where
        MaskPixel: Primitive,
        MaskContainer: Deref<Target = [MaskPixel]>,
    {
        let resolution = USizeVec2::new(mask.width() as usize, mask.height() as usize);
        Array2::from_shape_fn((resolution.y, resolution.x), |(row, col)| {
            !mask.get_pixel(col as u32, row as u32).0[0].is_zero()
        })
    }

    /// Damage and restoration for buffers of the `Image` crate.
    pub trait ImageDamage: Sized {
        /// Damaged copy of the image plus the mask which produced it.
        fn damage_regions(&self, rects: &[Rect]) -> Result<(Self, GrayImage)>;

        /// Restore the pixels flagged in `mask` in place.
        fn restore_regions<MaskPixel, MaskContainer, R>(
            &mut self,
            mask: &ImageBuffer<Luma<MaskPixel>, MaskContainer>,
            restorer: &R,
        ) -> Result<()>
        where
            MaskPixel: Primitive,
            MaskContainer: Deref<Target = [MaskPixel]>,
            R: Restore;
    }

    impl<ImagePixel, ImageContainer> ImageDamage for ImageBuffer<ImagePixel, Vec<ImageContainer>>
    where
        ImagePixel: Pixel<Subpixel = ImageContainer>,
        ImageContainer: Clone + Copy + Zero + AsPrimitive<f32>,
        f32: AsPrimitive<ImageContainer>,
    {
        fn damage_regions(&self, rects: &[Rect]) -> Result<(Self, GrayImage)> {
            let image = array_from_buffer(self)?;
            let damage = simulate_damage(&image, rects)?;
            let damaged = buffer_from_array::<ImagePixel>(&damage.damaged)?;
            Ok((damaged, mask_to_luma(&damage.mask)))
        }

        fn restore_regions<MaskPixel, MaskContainer, R>(
            &mut self,
            mask: &ImageBuffer<Luma<MaskPixel>, MaskContainer>,
            restorer: &R,
        ) -> Result<()>
        where
            MaskPixel: Primitive,
            MaskContainer: Deref<Target = [MaskPixel]>,
            R: Restore,
        {
            let process_image = array_from_buffer(self)?;
            let mask = mask_from_luma(mask);

            let restored = restorer.restore(&process_image, &mask, ChannelMode::Multichannel)?;

            let raw: &mut [ImageContainer] = self;
            for (target, value) in raw.iter_mut().zip(restored.iter()) {
                *target = *value;
            }
            Ok(())
        }
    }

}

#[cfg(feature = "image")]
pub use image_buffer::*;
