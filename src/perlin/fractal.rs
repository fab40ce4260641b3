//! Fractal (multi-octave) composition and normalized map generation.

use log::{debug, warn};
use noise::NoiseFn;

use crate::heightfield::HeightField;
use crate::params::NoiseMapParams;

/// Height assigned to every sample of a map with no variation
pub const FLAT_MAP_LEVEL: f32 = 0.5;

/// Sum `octaves` layers of 2D noise, doubling frequency and scaling amplitude
/// by `persistence` each layer, divided by the total amplitude
///
/// Zero octaves yield 0.
pub fn fractal<N>(noise: &N, x: f64, y: f64, octaves: u32, persistence: f64) -> f64
where
    N: NoiseFn<f64, 2> + ?Sized,
{
    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += noise.get([x * frequency, y * frequency]) * amplitude;
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= 2.0;
    }

    if max_value == 0.0 {
        return 0.0;
    }
    total / max_value
}

/// Generate a `width x height` fractal noise map normalized to [0, 1]
///
/// Each sample is centered on the map and panned by `offset` before scaling.
/// Every octave is remapped with `2n - 1` and weighted by a decaying
/// amplitude while frequency grows by `lacunarity`. A second pass rescales
/// the map so its minimum is exactly 0 and its maximum exactly 1. A map with
/// no variation is filled with [`FLAT_MAP_LEVEL`] instead.
pub fn generate_map<N>(noise: &N, params: &NoiseMapParams) -> HeightField
where
    N: NoiseFn<f64, 2> + ?Sized,
{
    let width = params.width;
    let height = params.height;
    let scale = params.effective_scale() as f64;
    let persistence = params.persistence as f64;
    let lacunarity = params.lacunarity as f64;
    let offset_x = params.offset.x as f64;
    let offset_y = params.offset.y as f64;

    // Integer halving keeps the map centered on a sample
    let half_width = (width / 2) as f64;
    let half_height = (height / 2) as f64;

    let mut raw = Vec::with_capacity(width * height);
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for y in 0..height {
        for x in 0..width {
            let mut amplitude = 1.0;
            let mut frequency = 1.0;
            let mut value = 0.0;

            for _ in 0..params.octaves {
                let sample_x = (x as f64 - half_width + offset_x) / scale * frequency;
                let sample_y = (y as f64 - half_height + offset_y) / scale * frequency;

                value += (noise.get([sample_x, sample_y]) * 2.0 - 1.0) * amplitude;

                amplitude *= persistence;
                frequency *= lacunarity;
            }

            min = min.min(value);
            max = max.max(value);
            raw.push(value);
        }
    }

    let samples = if max > min {
        let range = max - min;
        raw.iter().map(|&v| ((v - min) / range) as f32).collect()
    } else {
        if !raw.is_empty() {
            warn!(
                "Noise map {}x{} has no variation (value {}), using flat level {}",
                width, height, min, FLAT_MAP_LEVEL
            );
        }
        vec![FLAT_MAP_LEVEL; raw.len()]
    };

    debug!(
        "Generated {}x{} noise map (scale {}, {} octaves, raw range [{}, {}])",
        width, height, scale, params.octaves, min, max
    );

    HeightField::from_parts(width, height, samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perlin::PerlinNoise;
    use glam::Vec2;
    use noise::Constant;

    fn scenario_params() -> NoiseMapParams {
        NoiseMapParams {
            width: 4,
            height: 4,
            scale: 10.0,
            octaves: 2,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: Vec2::ZERO,
        }
    }

    #[test]
    fn test_single_octave_equals_sample() {
        let perlin = PerlinNoise::new(42);
        for persistence in [0.0, 0.5, 1.0, 3.0] {
            for i in 0..20 {
                let x = i as f64 * 0.41 + 0.05;
                let y = i as f64 * -0.29 + 0.7;
                assert_eq!(
                    perlin.fractal(x, y, 1, persistence),
                    perlin.sample_2d(x, y)
                );
            }
        }
    }

    #[test]
    fn test_fractal_zero_octaves() {
        let perlin = PerlinNoise::new(42);
        assert_eq!(perlin.fractal(0.3, 0.4, 0, 0.5), 0.0);
    }

    #[test]
    fn test_fractal_roughly_bounded() {
        let perlin = PerlinNoise::new(11);
        for i in 0..200 {
            let t = i as f64 * 0.137;
            let value = perlin.fractal(t, t * 1.7 + 0.3, 5, 0.5);
            assert!(value.abs() <= 1.1);
        }
    }

    #[test]
    fn test_scenario_4x4_map() {
        let perlin = PerlinNoise::new(42);
        let params = scenario_params();

        let first = perlin.generate_map(&params);
        assert_eq!(first.samples().len(), 16);
        assert!(first.samples().iter().all(|&s| (0.0..=1.0).contains(&s)));

        let second = PerlinNoise::new(42).generate_map(&params);
        let first_bits: Vec<u32> = first.samples().iter().map(|s| s.to_bits()).collect();
        let second_bits: Vec<u32> = second.samples().iter().map(|s| s.to_bits()).collect();
        assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn test_normalization_hits_both_ends() {
        let perlin = PerlinNoise::new(1234);
        let params = NoiseMapParams {
            width: 32,
            height: 24,
            scale: 7.3,
            ..NoiseMapParams::default()
        };

        let map = perlin.generate_map(&params);
        let samples = map.samples();

        assert!(samples.iter().all(|&s| (0.0..=1.0).contains(&s)));
        assert!(samples.iter().any(|&s| s == 0.0));
        assert!(samples.iter().any(|&s| s == 1.0));
    }

    #[test]
    fn test_flat_noise_uses_flat_level() {
        let params = scenario_params();
        let map = generate_map(&Constant::new(0.3), &params);

        assert_eq!(map.samples().len(), 16);
        assert!(map.samples().iter().all(|&s| s == FLAT_MAP_LEVEL));
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let params = NoiseMapParams {
            octaves: 0,
            ..scenario_params()
        };
        let map = PerlinNoise::new(42).generate_map(&params);
        assert!(map.samples().iter().all(|&s| s == FLAT_MAP_LEVEL));
    }

    #[test]
    fn test_non_positive_scale_does_not_produce_nan() {
        let params = NoiseMapParams {
            scale: 0.0,
            ..scenario_params()
        };
        let map = PerlinNoise::new(42).generate_map(&params);
        assert!(map.samples().iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_offset_pans_the_map() {
        let perlin = PerlinNoise::new(8);
        let base = scenario_params();
        let panned = base.with_offset(Vec2::new(13.5, -4.25));

        assert_ne!(
            perlin.generate_map(&base).samples(),
            perlin.generate_map(&panned).samples()
        );
    }
}
