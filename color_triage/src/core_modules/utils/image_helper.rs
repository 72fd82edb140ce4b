pub mod image_helper {
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::error::{Result, TriageError};
    use image::imageops::FilterType;
    use image::{DynamicImage, ImageEncoder, RgbImage};
    use std::path::Path;

    /// Longer-edge cap applied before classification.
    pub const DEFAULT_MAX_DIMENSION: u32 = 500;

    /// Decodes an image file of any format the `image` crate recognizes.
    pub fn load_image(path: &Path) -> Result<DynamicImage> {
        let image = image::ImageReader::open(path)?
            .with_guessed_format()?
            .decode()?;
        if image.width() == 0 || image.height() == 0 {
            return Err(TriageError::InvalidDimensions {
                width: image.width(),
                height: image.height(),
            });
        }
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Decoded image"
        );
        Ok(image)
    }

    /// Filter used for every downscale.
    pub const DOWNSCALE_FILTER: FilterType = FilterType::Triangle;

    /// Target size for a `width`x`height` image whose longer edge must not exceed
    /// `max_dimension`, or `None` when no downscale is needed (`0` disables the cap).
    pub fn fitted_dimensions(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
        if max_dimension == 0 || width.max(height) <= max_dimension {
            return None;
        }
        let ratio = max_dimension as f64 / width.max(height) as f64;
        let scale = |edge: u32| ((edge as f64 * ratio).round() as u32).clamp(1, max_dimension);
        Some((scale(width), scale(height)))
    }

    /// Shrinks `image` so its longer edge is at most `max_dimension`, keeping the
    /// aspect ratio. Images already within bounds are returned untouched.
    pub fn fit_within(image: DynamicImage, max_dimension: u32) -> DynamicImage {
        let Some((width, height)) = fitted_dimensions(image.width(), image.height(), max_dimension)
        else {
            return image;
        };
        let resized = image.resize_exact(width, height, DOWNSCALE_FILTER);
        tracing::debug!(
            from_width = image.width(),
            from_height = image.height(),
            width = resized.width(),
            height = resized.height(),
            "Downscaled image"
        );
        resized
    }

    /// Flattens an image into row-major opaque pixels. Alpha is discarded.
    pub fn image_to_pixels(image: &DynamicImage) -> Vec<Pixel> {
        let rgb: RgbImage = image.to_rgb8();
        rgb.pixels().map(|px| Pixel::from(*px)).collect()
    }

    /// Writes an RGB buffer as PNG.
    pub fn save(path: &Path, width: u32, height: u32, buffer: &[u8]) -> Result<()> {
        let output = std::fs::File::create(path)?;
        let encoder = image::codecs::png::PngEncoder::new(output);
        encoder.write_image(buffer, width, height, image::ExtendedColorType::Rgb8)?;
        Ok(())
    }
}
