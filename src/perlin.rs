//! Classic improved Perlin noise with a seedable permutation table.
//!
//! Sampling is a pure function of the permutation table and the input
//! coordinates, so a fixed seed always reproduces the same field.

mod animation;
mod fractal;

pub use animation::NoiseAnimator;
pub use fractal::{fractal, generate_map};

use noise::NoiseFn;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::heightfield::HeightField;
use crate::params::NoiseMapParams;

/// Ken Perlin's reference permutation of 0..=255
const REFERENCE_PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Perlin noise generator
///
/// The 256-entry permutation is stored twice so corner hashing never needs
/// to wrap an index.
#[derive(Clone, Debug)]
pub struct PerlinNoise {
    permutation: [u8; 512],
    seed: u32,
}

impl PerlinNoise {
    /// Create a generator for `seed`
    ///
    /// Seed `0` keeps the reference permutation unshuffled. Any other seed
    /// shuffles the first half deterministically and mirrors it into the
    /// second half.
    pub fn new(seed: u32) -> Self {
        let mut base = REFERENCE_PERMUTATION;

        if seed != 0 {
            let mut rng = StdRng::seed_from_u64(u64::from(seed));
            base.shuffle(&mut rng);
        }

        let mut permutation = [0u8; 512];
        permutation[..256].copy_from_slice(&base);
        permutation[256..].copy_from_slice(&base);

        Self { permutation, seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Doubled permutation table (512 entries)
    pub fn permutation(&self) -> &[u8; 512] {
        &self.permutation
    }

    /// Sample 3D noise at a point
    ///
    /// Returns a value in roughly [-1, 1]; not normalized.
    pub fn sample_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        // Unit cube containing the point
        let xi = lattice(x);
        let yi = lattice(y);
        let zi = lattice(z);

        // Position within the cube
        let x = x - x.floor();
        let y = y - y.floor();
        let z = z - z.floor();

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        // Hash the 8 cube corners
        let p = &self.permutation;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        lerp(
            lerp(
                lerp(grad(p[aa], x, y, z), grad(p[ba], x - 1.0, y, z), u),
                lerp(grad(p[ab], x, y - 1.0, z), grad(p[bb], x - 1.0, y - 1.0, z), u),
                v,
            ),
            lerp(
                lerp(
                    grad(p[aa + 1], x, y, z - 1.0),
                    grad(p[ba + 1], x - 1.0, y, z - 1.0),
                    u,
                ),
                lerp(
                    grad(p[ab + 1], x, y - 1.0, z - 1.0),
                    grad(p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                    u,
                ),
                v,
            ),
            w,
        )
    }

    /// Sample 2D noise (the z = 0 slice of the 3D field)
    pub fn sample_2d(&self, x: f64, y: f64) -> f64 {
        self.sample_3d(x, y, 0.0)
    }

    /// Octave-summed 2D noise, see [`fractal`]
    pub fn fractal(&self, x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
        fractal(self, x, y, octaves, persistence)
    }

    /// Normalized fractal height field, see [`generate_map`]
    pub fn generate_map(&self, params: &NoiseMapParams) -> HeightField {
        generate_map(self, params)
    }
}

impl Default for PerlinNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NoiseFn<f64, 2> for PerlinNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample_2d(point[0], point[1])
    }
}

impl NoiseFn<f64, 3> for PerlinNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.sample_3d(point[0], point[1], point[2])
    }
}

/// Lattice cell index wrapped into the permutation range
fn lattice(t: f64) -> usize {
    (t.floor() as i64 & 255) as usize
}

/// Quintic fade curve 6t^5 - 15t^4 + 10t^3
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product with one of 12 gradient directions picked by the low 4 bits
fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
