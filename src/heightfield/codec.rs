//! Raw byte heightmaps, gradient-mapped images and RGB textures.
//!
//! Raw format: no header, exactly `width * height` unsigned bytes, row-major,
//! sample = byte / 255. Encoding truncates (`0.5 -> 127`), so a round trip
//! loses at most 1/255 per sample.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use log::{debug, info, warn};

use super::HeightField;
use crate::error::{HeightFieldError, Result};
use crate::gradient::{color_to_rgb8, ColorGradient};
use crate::rendering::TextureSink;

/// JPEG quality for visualization images (maximum)
const JPEG_QUALITY: u8 = 100;

/// Pixel written where the texture grid runs past the end of the samples
pub const MISSING_SAMPLE_COLOR: [u8; 3] = [255, 0, 0];

/// Tightly packed RGB8 pixel buffer ready for GPU upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// RGB triple at column `x`, row `y`
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 3;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }

    /// Hand the pixels to a texture sink
    pub fn upload<S: TextureSink>(&self, sink: &mut S) -> S::Texture {
        sink.upload_rgb8(self.width as u32, self.height as u32, &self.pixels)
    }
}

/// Quantize every sample to one byte (`(sample * 255) as u8`, saturating)
pub fn encode_raw(field: &HeightField) -> Vec<u8> {
    field.samples().iter().map(|&s| (s * 255.0) as u8).collect()
}

/// Turn the first `width * height` bytes into normalized samples
pub fn decode_raw(bytes: &[u8], width: usize, height: usize) -> Result<HeightField> {
    let count = width * height;
    if bytes.len() < count {
        return Err(HeightFieldError::DimensionMismatch {
            width,
            height,
            actual: bytes.len(),
        });
    }

    let samples = bytes[..count].iter().map(|&b| b as f32 / 255.0).collect();
    Ok(HeightField::from_parts(width, height, samples))
}

/// Write `field` as a raw byte heightmap, creating parent directories
pub fn write_raw(field: &HeightField, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_bytes(path, &encode_raw(field))?;
    info!("Saved raw heightmap {}", path.display());
    Ok(())
}

/// Write a raw heightmap and read it back to confirm it landed intact
///
/// If the primary file fails to write or verify, the data is written to
/// `backup`, verified there, and copied over the primary. Returns the path
/// that holds verified data: the primary when it could be restored, the
/// backup otherwise.
pub fn write_raw_verified(
    field: &HeightField,
    path: impl AsRef<Path>,
    backup: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let backup = backup.as_ref();
    let bytes = encode_raw(field);

    match write_bytes(path, &bytes) {
        Ok(()) if reads_back(path, &bytes) => {
            info!("Saved and verified raw heightmap {}", path.display());
            return Ok(path.to_path_buf());
        }
        Ok(()) => warn!(
            "{} did not read back as written, using backup {}",
            path.display(),
            backup.display()
        ),
        Err(e) => warn!("{}, using backup {}", e, backup.display()),
    }

    write_bytes(backup, &bytes)?;
    if !reads_back(backup, &bytes) {
        return Err(HeightFieldError::VerificationFailed {
            path: backup.to_path_buf(),
        });
    }

    let restored = create_parent_dirs(path)
        .and_then(|()| fs::copy(backup, path).map_err(|e| HeightFieldError::io(path, e)));
    match restored {
        Ok(_) if reads_back(path, &bytes) => {
            info!("Restored {} from backup", path.display());
            Ok(path.to_path_buf())
        }
        _ => {
            warn!("Keeping raw heightmap at backup {}", backup.display());
            Ok(backup.to_path_buf())
        }
    }
}

/// Read a raw byte heightmap of the given dimensions
///
/// Fails with [`HeightFieldError::ShortRead`] if the file holds fewer than
/// `width * height` bytes; extra trailing bytes are ignored.
pub fn read_raw(path: impl AsRef<Path>, width: usize, height: usize) -> Result<HeightField> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| HeightFieldError::io(path, e))?;

    let expected = width * height;
    if bytes.len() < expected {
        return Err(HeightFieldError::ShortRead {
            path: path.to_path_buf(),
            expected,
            actual: bytes.len(),
        });
    }

    debug!("Read {} bytes from {}", bytes.len(), path.display());
    decode_raw(&bytes, width, height)
}

/// Write a gradient-mapped RGB image of `field`
///
/// `.jpg`/`.jpeg` paths are encoded at maximum quality; any other extension
/// uses the format the `image` crate infers from it.
pub fn write_image(
    field: &HeightField,
    path: impl AsRef<Path>,
    gradient: &ColorGradient,
) -> Result<()> {
    let path = path.as_ref();
    let texture = field.to_texture(gradient);
    let image = RgbImage::from_raw(texture.width as u32, texture.height as u32, texture.pixels)
        .ok_or(HeightFieldError::DimensionMismatch {
            width: field.width(),
            height: field.height(),
            actual: field.len(),
        })?;

    create_parent_dirs(path)?;

    if is_jpeg(path) {
        let file = File::create(path).map_err(|e| HeightFieldError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
            .encode_image(&image)
            .map_err(|e| HeightFieldError::image(path, e))?;
        writer.flush().map_err(|e| HeightFieldError::io(path, e))?;
    } else {
        image
            .save(path)
            .map_err(|e| HeightFieldError::image(path, e))?;
    }

    info!("Saved heightmap image {}", path.display());
    Ok(())
}

/// Decode any image the `image` crate reads into a normalized height field
/// using its luma channel
pub fn read_image(path: impl AsRef<Path>) -> Result<HeightField> {
    let path = path.as_ref();
    let luma = image::open(path)
        .map_err(|e| HeightFieldError::image(path, e))?
        .to_luma8();

    let (width, height) = luma.dimensions();
    let samples = luma.pixels().map(|p| p.0[0] as f32 / 255.0).collect();
    Ok(HeightField::from_parts(
        width as usize,
        height as usize,
        samples,
    ))
}

/// Map samples through `gradient` into an RGB8 buffer of `width x height`
///
/// Grid positions past the end of `samples` get [`MISSING_SAMPLE_COLOR`].
pub fn make_texture(
    samples: &[f32],
    width: usize,
    height: usize,
    gradient: &ColorGradient,
) -> TextureData {
    let count = width * height;
    if samples.len() < count {
        warn!(
            "Texture {}x{} needs {} samples, only {} available",
            width,
            height,
            count,
            samples.len()
        );
    }

    let mut pixels = Vec::with_capacity(count * 3);
    for i in 0..count {
        let rgb = match samples.get(i) {
            Some(&s) => color_to_rgb8(gradient.color_at(s)),
            None => MISSING_SAMPLE_COLOR,
        };
        pixels.extend_from_slice(&rgb);
    }

    TextureData {
        width,
        height,
        pixels,
    }
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| HeightFieldError::io(dir, e))
        }
        _ => Ok(()),
    }
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    create_parent_dirs(path)?;
    fs::write(path, bytes).map_err(|e| HeightFieldError::io(path, e))
}

fn reads_back(path: &Path, expected: &[u8]) -> bool {
    fs::read(path).map(|b| b == expected).unwrap_or(false)
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("perlinscape-codec-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_raw_bytes_truncate() {
        let field = HeightField::new(2, 2, vec![0.0, 0.5, 1.0, 0.25]).unwrap();
        assert_eq!(encode_raw(&field), vec![0, 127, 255, 63]);
    }

    #[test]
    fn test_raw_bytes_saturate_out_of_range() {
        let field = HeightField::new(3, 1, vec![-0.5, 1.5, f32::NAN]).unwrap();
        assert_eq!(encode_raw(&field), vec![0, 255, 0]);
    }

    #[test]
    fn test_decode_raw_normalizes() {
        let field = decode_raw(&[0, 51, 255, 102], 2, 2).unwrap();
        assert_eq!(field.samples(), &[0.0, 0.2, 1.0, 0.4]);
    }

    #[test]
    fn test_decode_raw_rejects_short_input() {
        assert!(matches!(
            decode_raw(&[1, 2, 3], 2, 2),
            Err(HeightFieldError::DimensionMismatch { actual: 3, .. })
        ));
    }

    #[test]
    fn test_raw_file_round_trip_within_quantization() {
        let path = temp_path("round_trip/field.raw");
        let samples: Vec<f32> = (0..64).map(|i| (i as f32 * 0.37).sin() * 0.5 + 0.5).collect();
        let field = HeightField::new(8, 8, samples).unwrap();

        write_raw(&field, &path).unwrap();
        let decoded = read_raw(&path, 8, 8).unwrap();

        assert_eq!(decoded.width(), 8);
        assert_eq!(decoded.height(), 8);
        for (a, b) in field.samples().iter().zip(decoded.samples()) {
            assert!((a - b).abs() <= 1.0 / 255.0 + f32::EPSILON);
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_read_raw_missing_file() {
        let err = read_raw(temp_path("does_not_exist.raw"), 4, 4).unwrap_err();
        assert!(matches!(err, HeightFieldError::Io { .. }));
    }

    #[test]
    fn test_read_raw_short_file() {
        let path = temp_path("short.raw");
        write_bytes(&path, &[10, 20, 30]).unwrap();

        let err = read_raw(&path, 2, 2).unwrap_err();
        assert!(matches!(
            err,
            HeightFieldError::ShortRead {
                expected: 4,
                actual: 3,
                ..
            }
        ));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_verified_write_keeps_primary() {
        let path = temp_path("verified/primary.raw");
        let backup = temp_path("verified/backup.raw");
        let field = HeightField::new(2, 2, vec![0.0, 0.5, 1.0, 0.25]).unwrap();

        let written = write_raw_verified(&field, &path, &backup).unwrap();

        assert_eq!(written, path);
        assert_eq!(fs::read(&path).unwrap(), vec![0, 127, 255, 63]);
        assert!(!backup.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_verified_write_falls_back_to_backup() {
        // A directory cannot be written as a file
        let blocked = temp_path("blocked_dir");
        fs::create_dir_all(&blocked).unwrap();
        let backup = temp_path("fallback/backup.raw");
        let field = HeightField::new(2, 1, vec![1.0, 0.0]).unwrap();

        let written = write_raw_verified(&field, &blocked, &backup).unwrap();

        assert_eq!(written, backup);
        assert_eq!(fs::read(&backup).unwrap(), vec![255, 0]);

        let _ = fs::remove_file(&backup);
    }

    #[test]
    fn test_texture_maps_through_gradient() {
        let gradient = ColorGradient::new(vec![Vec3::ZERO, Vec3::ONE]);
        let texture = make_texture(&[0.0, 1.0], 2, 1, &gradient);

        assert_eq!(texture.pixels, vec![0, 0, 0, 255, 255, 255]);
        assert_eq!(texture.pixel(1, 0), Some([255, 255, 255]));
        assert_eq!(texture.pixel(2, 0), None);
    }

    #[test]
    fn test_texture_fills_missing_samples_with_sentinel() {
        let gradient = ColorGradient::new(vec![Vec3::ZERO, Vec3::ONE]);
        let texture = make_texture(&[0.0], 2, 2, &gradient);

        assert_eq!(texture.pixels.len(), 12);
        assert_eq!(texture.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(texture.pixel(1, 0), Some(MISSING_SAMPLE_COLOR));
        assert_eq!(texture.pixel(1, 1), Some(MISSING_SAMPLE_COLOR));
    }

    #[test]
    fn test_texture_upload_hands_off_pixels() {
        use crate::rendering::testing::{Call, RecordingBackend};

        let field = HeightField::filled(4, 2, 0.5);
        let mut backend = RecordingBackend::default();

        let handle = field.to_texture(&ColorGradient::fire()).upload(&mut backend);

        assert_eq!(handle, 1);
        assert_eq!(
            backend.calls,
            vec![Call::UploadTexture {
                width: 4,
                height: 2,
                bytes: 24
            }]
        );
    }

    #[test]
    fn test_image_write_and_read_back() {
        let path = temp_path("images/gray.png");
        let field = HeightField::new(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
        let grayscale = ColorGradient::new(vec![Vec3::ZERO, Vec3::ONE]);

        write_image(&field, &path, &grayscale).unwrap();
        let decoded = read_image(&path).unwrap();

        // PNG is lossless, so black/white survive exactly
        assert_eq!(decoded, field);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_jpeg_write_produces_file() {
        let path = temp_path("images/fire.jpg");
        let samples: Vec<f32> = (0..256).map(|i| i as f32 / 255.0).collect();
        let field = HeightField::new(16, 16, samples).unwrap();

        write_image(&field, &path, &ColorGradient::fire()).unwrap();

        let decoded = read_image(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 16));

        let _ = fs::remove_file(&path);
    }
}
