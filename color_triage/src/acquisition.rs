// THEORY:
// Acquisition is the first stage of the pipeline and the only one that touches
// the outside world. Whatever the origin of an image (a file on disk, a frame
// grabbed from a camera by some platform layer) it ends the same way: a
// row-major buffer of opaque RGB pixels, already capped to a manageable size.
// The classifier never sees where pixels came from.

use crate::core_modules::pixel::pixel::{Pixel, pixels_from_buffer};
use crate::core_modules::utils::image_helper::image_helper::{
    DOWNSCALE_FILTER, fit_within, fitted_dimensions, image_to_pixels, load_image,
};
use crate::error::{Result, TriageError};
use image::{DynamicImage, ImageBuffer, Rgb, Rgba, imageops};
use std::path::PathBuf;

/// Decoded, downscaled pixels ready for classification.
#[derive(Debug, Clone, PartialEq)]
pub struct AcquiredImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Pixel>,
}

impl AcquiredImage {
    pub fn from_image(image: &DynamicImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image_to_pixels(image),
        }
    }
}

/// Anything that can hand the pipeline a picture.
pub trait ImageSource {
    /// Produces the image, with its longer edge capped at `max_dimension`.
    fn acquire(&self, max_dimension: u32) -> Result<AcquiredImage>;
}

/// An image file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageSource for FileSource {
    fn acquire(&self, max_dimension: u32) -> Result<AcquiredImage> {
        let image = fit_within(load_image(&self.path)?, max_dimension);
        Ok(AcquiredImage::from_image(&image))
    }
}

/// A raw interleaved frame, e.g. one captured from a camera.
#[derive(Debug, Clone)]
pub struct FrameSource {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
}

impl FrameSource {
    /// `channels` is 4 for RGBA frames and 3 for RGB frames.
    pub fn new(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TriageError::InvalidDimensions { width, height });
        }
        if channels != 3 && channels != 4 {
            return Err(TriageError::InvalidChannelCount(channels));
        }
        if data.len() != width as usize * height as usize * channels {
            return Err(TriageError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, 4, data)
    }

    /// Resamples the frame through a borrowed view of `data`; the frame itself is
    /// never copied.
    fn resized<P>(&self, width: u32, height: u32) -> Result<Vec<u8>>
    where
        P: image::Pixel<Subpixel = u8> + 'static,
    {
        let view = ImageBuffer::<P, &[u8]>::from_raw(self.width, self.height, self.data.as_slice())
            .ok_or(TriageError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        Ok(imageops::resize(&view, width, height, DOWNSCALE_FILTER).into_raw())
    }
}

impl ImageSource for FrameSource {
    fn acquire(&self, max_dimension: u32) -> Result<AcquiredImage> {
        let Some((width, height)) = fitted_dimensions(self.width, self.height, max_dimension)
        else {
            return Ok(AcquiredImage {
                width: self.width,
                height: self.height,
                pixels: pixels_from_buffer(&self.data, self.channels)?,
            });
        };
        let resized = match self.channels {
            4 => self.resized::<Rgba<u8>>(width, height)?,
            _ => self.resized::<Rgb<u8>>(width, height)?,
        };
        tracing::debug!(
            from_width = self.width,
            from_height = self.height,
            width,
            height,
            "Downscaled frame"
        );
        Ok(AcquiredImage {
            width,
            height,
            pixels: pixels_from_buffer(&resized, self.channels)?,
        })
    }
}
