//! Restoration of damaged regions.
//!
//! The damage simulator only produces inputs for a restoration routine. The
//! [`Restore`] trait is the seam for plugging such a routine in, and
//! [`HarmonicFill`] is a small reference implementation which solves the
//! Laplace equation over the masked pixels.

use ndarray::{Array2, Array3, ArrayBase, Axis, Data, Ix2, Ix3};
use num_traits::AsPrimitive;
use tracing::debug;

use crate::damage::damaged_pixel_count;
use crate::error::{Error, Result};

/// How the last axis of an image is interpreted during restoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMode {
    /// Last axis holds colour channels, each restored on its own.
    #[default]
    Multichannel,
    /// Single channel image, the last axis must have length 1.
    Grayscale,
}

impl ChannelMode {
    fn check(&self, channels: usize) -> Result<()> {
        match self {
            ChannelMode::Grayscale if channels != 1 => Err(Error::ChannelCount {
                expected: 1,
                found: channels,
            }),
            _ => Ok(()),
        }
    }
}

/// A routine reconstructing the pixels flagged in a mask.
pub trait Restore {
    /// Restore `damaged` at every pixel where `mask` is `true`.
    ///
    /// The returned image has the same shape as `damaged`, pixels outside of
    /// the mask are returned unchanged.
    fn restore<S, M, T>(
        &self,
        damaged: &ArrayBase<S, Ix3>,
        mask: &ArrayBase<M, Ix2>,
        mode: ChannelMode,
    ) -> Result<Array3<T>>
    where
        S: Data<Elem = T>,
        M: Data<Elem = bool>,
        T: Copy + AsPrimitive<f32>,
        f32: AsPrimitive<T>;
}

/// Fills masked pixels with the harmonic interpolation of their surroundings.
///
/// Masked pixels start at the mean of the known pixels of their channel and
/// are then relaxed with Gauss-Seidel sweeps until no pixel moves more than
/// `tolerance` or `max_iterations` sweeps have run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicFill {
    pub max_iterations: usize,
    pub tolerance: f32,
}

impl Default for HarmonicFill {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            tolerance: 1e-3,
        }
    }
}

impl HarmonicFill {
    pub fn new(max_iterations: usize, tolerance: f32) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// Relax one channel in place, returning the number of sweeps done.
    fn relax(&self, channel: &mut Array2<f32>, unknown: &[(usize, usize)]) -> usize {
        let (height, width) = channel.dim();
        for sweep in 0..self.max_iterations {
            let mut largest_step = 0.0f32;
            for &(row, col) in unknown {
                let mut sum = 0.0;
                let mut count = 0.0;
                if row > 0 {
                    sum += channel[(row - 1, col)];
                    count += 1.0;
                }
                if row + 1 < height {
                    sum += channel[(row + 1, col)];
                    count += 1.0;
                }
                if col > 0 {
                    sum += channel[(row, col - 1)];
                    count += 1.0;
                }
                if col + 1 < width {
                    sum += channel[(row, col + 1)];
                    count += 1.0;
                }
                if count == 0.0 {
                    continue;
                }
                let value = sum / count;
                largest_step = largest_step.max((value - channel[(row, col)]).abs());
                channel[(row, col)] = value;
            }
            if largest_step < self.tolerance {
                return sweep + 1;
            }
        }
        self.max_iterations
    }
}

impl Restore for HarmonicFill {
    fn restore<S, M, T>(
        &self,
        damaged: &ArrayBase<S, Ix3>,
        mask: &ArrayBase<M, Ix2>,
        mode: ChannelMode,
    ) -> Result<Array3<T>>
    where
        S: Data<Elem = T>,
        M: Data<Elem = bool>,
        T: Copy + AsPrimitive<f32>,
        f32: AsPrimitive<T>,
    {
        let (height, width, channels) = damaged.dim();
        if mask.dim() != (height, width) {
            return Err(Error::ShapeMismatch {
                mask: mask.dim(),
                image: (height, width),
            });
        }
        mode.check(channels)?;

        let mut restored = damaged.to_owned();
        let unknown: Vec<(usize, usize)> = mask
            .indexed_iter()
            .filter(|(_, masked)| **masked)
            .map(|(index, _)| index)
            .collect();
        if unknown.is_empty() {
            return Ok(restored);
        }
        let known_count = height * width - damaged_pixel_count(mask);
        if known_count == 0 {
            return Err(Error::NoData);
        }

        for (index, mut plane) in restored.axis_iter_mut(Axis(2)).enumerate() {
            let mut channel: Array2<f32> = plane.mapv(|value| AsPrimitive::<f32>::as_(value));

            let known_sum: f64 = channel
                .iter()
                .zip(mask.iter())
                .filter(|(_, masked)| !**masked)
                .map(|(value, _)| *value as f64)
                .sum();
            let mean = (known_sum / known_count as f64) as f32;
            for &pixel in &unknown {
                channel[pixel] = mean;
            }

            let sweeps = self.relax(&mut channel, &unknown);
            debug!("channel {index} relaxed in {sweeps} sweep(s)");

            for &pixel in &unknown {
                plane[pixel] = AsPrimitive::<T>::as_(channel[pixel]);
            }
        }
        Ok(restored)
    }
}
