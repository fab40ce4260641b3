//! Row-major grids of elevation samples and their file/texture encodings.

mod codec;

pub use codec::{
    decode_raw, encode_raw, make_texture, read_image, read_raw, write_image, write_raw,
    write_raw_verified, TextureData, MISSING_SAMPLE_COLOR,
};

use crate::error::{HeightFieldError, Result};
use crate::gradient::ColorGradient;

/// Row-major `width x height` grid of elevation samples
///
/// Samples are nominally in [0, 1] once normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: usize,
    height: usize,
    samples: Vec<f32>,
}

impl HeightField {
    /// Wrap `samples`, checking they fill the grid exactly
    pub fn new(width: usize, height: usize, samples: Vec<f32>) -> Result<Self> {
        if samples.len() != width * height {
            return Err(HeightFieldError::DimensionMismatch {
                width,
                height,
                actual: samples.len(),
            });
        }
        Ok(Self::from_parts(width, height, samples))
    }

    /// Grid with every sample set to `value`
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self::from_parts(width, height, vec![value; width * height])
    }

    /// All-zero grid (flat terrain)
    pub fn zeros(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    pub(crate) fn from_parts(width: usize, height: usize, samples: Vec<f32>) -> Self {
        debug_assert_eq!(samples.len(), width * height);
        Self {
            width,
            height,
            samples,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Sample at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.samples[y * self.width + x])
        } else {
            None
        }
    }

    /// Smallest and largest sample, or `None` for an empty grid
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.samples.iter().fold(None, |acc, &s| match acc {
            None => Some((s, s)),
            Some((min, max)) => Some((min.min(s), max.max(s))),
        })
    }

    /// Map every sample through `gradient` into an RGB texture
    pub fn to_texture(&self, gradient: &ColorGradient) -> TextureData {
        make_texture(&self.samples, self.width, self.height, gradient)
    }

    /// One byte per sample, see [`encode_raw`]
    pub fn to_raw_bytes(&self) -> Vec<u8> {
        encode_raw(self)
    }
}
