// THEORY:
// The `Pixel` module is the smallest unit the classifier works on. It is a "dumb"
// data container for the three color channels of one pixel, plus the
// single-pixel transforms the classifier needs (normalized channels, HSV, bucket).
// It knows nothing about neighbors or the image it came from.
//
// Alpha never reaches this type. Acquisition strips it while slicing the raw
// buffer (`pixels_from_buffer`), so the core only ever sees opaque RGB triples.

pub mod pixel {
    use crate::core_modules::bucket::bucket::{ColorBucket, classify_hsv};
    use crate::core_modules::hsv::hsv::{Hsv, hsv_from_normalized};
    use crate::error::{Result, TriageError};

    pub type Byte = u8;
    pub type Channel = Byte;
    pub type NormalizedChannel = f64;

    const RGB_CHANNELS: usize = 3;
    const RGBA_CHANNELS: usize = 4;

    /// A "dumb" data container representing a single opaque RGB pixel.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
    }

    impl Pixel {
        pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel { red, green, blue }
        }

        /// Gray pixel with all three channels set to `level`.
        pub const fn gray(level: Channel) -> Self {
            Pixel::new(level, level, level)
        }

        /// Channels scaled into 0.0..=1.0.
        pub fn normalized(&self) -> (NormalizedChannel, NormalizedChannel, NormalizedChannel) {
            (
                self.red as NormalizedChannel / 255.0,
                self.green as NormalizedChannel / 255.0,
                self.blue as NormalizedChannel / 255.0,
            )
        }

        pub fn hsv(&self) -> Hsv {
            let (red, green, blue) = self.normalized();
            hsv_from_normalized(red, green, blue)
        }

        /// The bucket this pixel falls into, or `None` when it matches no rule.
        pub fn bucket(&self) -> Option<ColorBucket> {
            classify_hsv(&self.hsv())
        }
    }

    impl From<(Channel, Channel, Channel)> for Pixel {
        fn from((red, green, blue): (Channel, Channel, Channel)) -> Self {
            Pixel::new(red, green, blue)
        }
    }

    impl From<[Channel; 3]> for Pixel {
        fn from([red, green, blue]: [Channel; 3]) -> Self {
            Pixel::new(red, green, blue)
        }
    }

    impl From<image::Rgb<Channel>> for Pixel {
        fn from(rgb: image::Rgb<Channel>) -> Self {
            Pixel::from(rgb.0)
        }
    }

    /// Slices an interleaved byte buffer into pixels.
    ///
    /// `channels` must be 3 (RGB) or 4 (RGBA). For RGBA the alpha byte is dropped.
    pub fn pixels_from_buffer(bytes: &[Byte], channels: usize) -> Result<Vec<Pixel>> {
        if channels != RGB_CHANNELS && channels != RGBA_CHANNELS {
            return Err(TriageError::InvalidChannelCount(channels));
        }
        if bytes.len() % channels != 0 {
            return Err(TriageError::TruncatedBuffer {
                len: bytes.len(),
                channels,
            });
        }
        Ok(bytes
            .chunks_exact(channels)
            .map(|px| Pixel::new(px[0], px[1], px[2]))
            .collect())
    }

}
