//! Noise map generation and animation parameters.

use glam::Vec2;

/// Smallest usable noise scale; anything at or below zero is clamped to this
pub const MIN_SCALE: f32 = 0.0001;

/// Fractal noise map parameters
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseMapParams {
    /// Map width (samples)
    pub width: usize,

    /// Map height (samples)
    pub height: usize,

    /// Samples per noise lattice cell (larger = smoother, broader features)
    pub scale: f32,

    /// Number of noise layers summed per sample
    pub octaves: u32,

    /// Amplitude multiplier applied per octave (dimensionless, usually <= 1)
    pub persistence: f32,

    /// Frequency multiplier applied per octave (dimensionless, usually 2)
    pub lacunarity: f32,

    /// Sample-space offset added before scaling (pans the map)
    pub offset: Vec2,
}

impl Default for NoiseMapParams {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            scale: 50.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: Vec2::ZERO,
        }
    }
}

impl NoiseMapParams {
    /// Scale with the division-by-zero guard applied
    pub fn effective_scale(&self) -> f32 {
        if self.scale <= 0.0 {
            MIN_SCALE
        } else {
            self.scale
        }
    }

    /// Total number of samples in the generated map
    pub fn sample_count(&self) -> usize {
        self.width * self.height
    }

    /// Copy of these parameters panned to a different offset
    pub fn with_offset(&self, offset: Vec2) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }
}

/// Animated noise parameters
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationParams {
    /// Offset drift (sample-space units per second)
    pub drift: Vec2,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            drift: Vec2::new(0.5, 0.3),
        }
    }
}
