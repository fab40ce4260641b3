//! Time-driven noise maps that drift across the sample plane.

use glam::Vec2;

use super::PerlinNoise;
use crate::gradient::ColorGradient;
use crate::heightfield::{HeightField, TextureData};
use crate::params::{AnimationParams, NoiseMapParams};

/// Regenerates a noise map each step with an offset that grows with time
pub struct NoiseAnimator {
    noise: PerlinNoise,
    params: NoiseMapParams,
    animation: AnimationParams,
    gradient: ColorGradient,
    time_s: f32,
    frame: HeightField,
}

impl NoiseAnimator {
    /// Create an animator and generate its frame at t = 0
    pub fn new(
        noise: PerlinNoise,
        params: NoiseMapParams,
        animation: AnimationParams,
        gradient: ColorGradient,
    ) -> Self {
        let frame = noise.generate_map(&params);
        Self {
            noise,
            params,
            animation,
            gradient,
            time_s: 0.0,
            frame,
        }
    }

    /// Advance time by `dt_s` seconds and regenerate the frame
    pub fn advance(&mut self, dt_s: f32) -> &HeightField {
        self.time_s += dt_s;
        let params = self.params.with_offset(self.offset());
        self.frame = self.noise.generate_map(&params);
        &self.frame
    }

    /// Offset in effect for the current time
    pub fn offset(&self) -> Vec2 {
        self.params.offset + self.animation.drift * self.time_s
    }

    pub fn time(&self) -> f32 {
        self.time_s
    }

    pub fn frame(&self) -> &HeightField {
        &self.frame
    }

    /// Current frame mapped through the animator's gradient
    pub fn texture(&self) -> TextureData {
        self.frame.to_texture(&self.gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> NoiseMapParams {
        NoiseMapParams {
            width: 16,
            height: 16,
            scale: 5.0,
            ..NoiseMapParams::default()
        }
    }

    fn animator(seed: u32) -> NoiseAnimator {
        NoiseAnimator::new(
            PerlinNoise::new(seed),
            small_params(),
            AnimationParams::default(),
            ColorGradient::fire(),
        )
    }

    #[test]
    fn test_first_frame_matches_static_map() {
        let anim = animator(42);
        assert_eq!(anim.time(), 0.0);
        assert_eq!(anim.frame(), &PerlinNoise::new(42).generate_map(&small_params()));
    }

    #[test]
    fn test_offset_drifts_with_time() {
        let mut anim = animator(42);
        anim.advance(2.0);

        assert_eq!(anim.offset(), Vec2::new(1.0, 0.6));
        assert_eq!(
            anim.frame(),
            &PerlinNoise::new(42).generate_map(&small_params().with_offset(Vec2::new(1.0, 0.6)))
        );
    }

    #[test]
    fn test_advancing_changes_frame() {
        let mut anim = animator(7);
        let before = anim.frame().clone();
        anim.advance(1.5);
        assert_ne!(anim.frame(), &before);
    }

    #[test]
    fn test_same_steps_same_frames() {
        let mut a = animator(99);
        let mut b = animator(99);
        for _ in 0..3 {
            a.advance(0.016);
            b.advance(0.016);
        }
        assert_eq!(a.frame(), b.frame());
    }

    #[test]
    fn test_texture_covers_frame() {
        let anim = animator(1);
        let texture = anim.texture();
        assert_eq!((texture.width, texture.height), (16, 16));
        assert_eq!(texture.pixels.len(), 16 * 16 * 3);
    }
}
