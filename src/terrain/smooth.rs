//! Distance-weighted low-pass filter for height fields.

use crate::heightfield::HeightField;

/// Passes applied before every terrain mesh build
pub const SMOOTHING_PASSES: usize = 5;

/// Kernel reach in samples (5x5 neighborhood)
const RADIUS: isize = 2;

/// Weight of a neighbor `(dr, dc)` samples away: 1 / (1 + distance)
fn kernel_weight(dr: isize, dc: isize) -> f32 {
    let distance = ((dr * dr + dc * dc) as f32).sqrt();
    1.0 / (1.0 + distance)
}

/// Replace every sample with the weighted average of its 5x5 neighborhood
///
/// Neighbors outside the grid are left out of both the sum and the total
/// weight, so edges average over fewer samples instead of darkening.
pub fn smooth_pass(field: &HeightField) -> HeightField {
    let width = field.width();
    let depth = field.height();
    let samples = field.samples();

    let mut weights = [[0.0f32; 5]; 5];
    for dr in -RADIUS..=RADIUS {
        for dc in -RADIUS..=RADIUS {
            weights[(dr + RADIUS) as usize][(dc + RADIUS) as usize] = kernel_weight(dr, dc);
        }
    }

    let mut smoothed = Vec::with_capacity(samples.len());
    for row in 0..depth as isize {
        for col in 0..width as isize {
            let mut sum = 0.0;
            let mut total_weight = 0.0;

            for dr in -RADIUS..=RADIUS {
                let r = row + dr;
                if r < 0 || r >= depth as isize {
                    continue;
                }
                for dc in -RADIUS..=RADIUS {
                    let c = col + dc;
                    if c < 0 || c >= width as isize {
                        continue;
                    }
                    let weight = weights[(dr + RADIUS) as usize][(dc + RADIUS) as usize];
                    sum += samples[r as usize * width + c as usize] * weight;
                    total_weight += weight;
                }
            }

            smoothed.push(if total_weight > 0.0 {
                sum / total_weight
            } else {
                0.0
            });
        }
    }

    HeightField::from_parts(width, depth, smoothed)
}

/// Apply `passes` rounds of [`smooth_pass`]
pub fn smooth(field: HeightField, passes: usize) -> HeightField {
    (0..passes).fold(field, |field, _| smooth_pass(&field))
}
