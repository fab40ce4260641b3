//! Piecewise-linear color ramps for visualizing normalized scalars.

use glam::Vec3;

/// Ordered list of RGB control colors (channels in [0, 1])
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGradient {
    colors: Vec<Vec3>,
}

impl ColorGradient {
    pub fn new(colors: Vec<Vec3>) -> Self {
        Self { colors }
    }

    /// Black through dark red, red, orange and yellow to white
    pub fn fire() -> Self {
        Self::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.5, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
        ])
    }

    /// Grass, dirt, rock, snow
    pub fn terrain() -> Self {
        Self::new(vec![
            Vec3::new(0.1, 0.6, 0.1),
            Vec3::new(0.7, 0.5, 0.1),
            Vec3::new(0.8, 0.7, 0.1),
            Vec3::new(1.0, 1.0, 1.0),
        ])
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at position `t` along the ramp
    ///
    /// `t` is clamped to [0, 1], scaled by `N - 1` and split into a segment
    /// index and blend factor. A single-color ramp always returns that color;
    /// an empty ramp returns `t` as gray.
    pub fn color_at(&self, t: f32) -> Vec3 {
        match self.colors.as_slice() {
            [] => Vec3::splat(t),
            [only] => *only,
            colors => {
                let last_segment = colors.len() - 2;
                let position = t.clamp(0.0, 1.0) * (colors.len() - 1) as f32;
                // Clamp before taking the fraction so t = 1 lands on the last color
                let index = (position.floor() as usize).min(last_segment);
                let blend = position - index as f32;

                colors[index] * (1.0 - blend) + colors[index + 1] * blend
            }
        }
    }
}

/// Scale a [0, 1] color to bytes (truncating, saturating)
pub fn color_to_rgb8(color: Vec3) -> [u8; 3] {
    [
        (color.x * 255.0) as u8,
        (color.y * 255.0) as u8,
        (color.z * 255.0) as u8,
    ]
}
