// THEORY:
// Bucketing is a fixed, ordered list of threshold rules over HSV. The first rule
// that matches wins and every other rule is skipped, so overlapping hue bands
// (orange/brown share 0.05..=0.08, yellow/orange share the 0.11 endpoint) are
// settled purely by order. The bands are kept exactly as the reference palette
// defines them, including which comparisons are inclusive.
//
// Rule order:
//   1. white   s < 0.15 and v > 0.8
//   2. black   s < 0.15 and v < 0.2
//   3. yellow  0.11 <= h <= 0.17, s > 0.5, v > 0.5
//   4. orange  0.05 <= h <= 0.11, s > 0.5, v > 0.5
//   5. brown   0.02 <= h <= 0.08, s > 0.3, v < 0.6
// Anything else is left unclassified.

pub mod bucket {
    use crate::core_modules::hsv::hsv::Hsv;
    use serde::Serialize;
    use std::fmt;
    use std::ops::RangeInclusive;

    const ACHROMATIC_SATURATION: f64 = 0.15;
    const WHITE_MIN_VALUE: f64 = 0.8;
    const BLACK_MAX_VALUE: f64 = 0.2;

    const YELLOW_HUE: RangeInclusive<f64> = 0.11..=0.17;
    const ORANGE_HUE: RangeInclusive<f64> = 0.05..=0.11;
    const BROWN_HUE: RangeInclusive<f64> = 0.02..=0.08;

    const VIVID_MIN_SATURATION: f64 = 0.5;
    const VIVID_MIN_VALUE: f64 = 0.5;
    const BROWN_MIN_SATURATION: f64 = 0.3;
    const BROWN_MAX_VALUE: f64 = 0.6;

    /// One of the five named color classes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum ColorBucket {
        White,
        Yellow,
        Orange,
        Brown,
        Black,
    }

    impl ColorBucket {
        /// All buckets in report order.
        pub const ALL: [ColorBucket; 5] = [
            ColorBucket::White,
            ColorBucket::Yellow,
            ColorBucket::Orange,
            ColorBucket::Brown,
            ColorBucket::Black,
        ];

        pub fn name(&self) -> &'static str {
            match self {
                ColorBucket::White => "white",
                ColorBucket::Yellow => "yellow",
                ColorBucket::Orange => "orange",
                ColorBucket::Brown => "brown",
                ColorBucket::Black => "black",
            }
        }

        /// Whether this bucket contributes to the cumulative warning score.
        pub fn is_warning(&self) -> bool {
            matches!(
                self,
                ColorBucket::Orange | ColorBucket::Brown | ColorBucket::Black
            )
        }
    }

    impl fmt::Display for ColorBucket {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.name())
        }
    }

    /// Assigns an HSV color to at most one bucket, first matching rule wins.
    pub fn classify_hsv(hsv: &Hsv) -> Option<ColorBucket> {
        let Hsv {
            hue,
            saturation,
            value,
        } = *hsv;

        if saturation < ACHROMATIC_SATURATION && value > WHITE_MIN_VALUE {
            Some(ColorBucket::White)
        } else if saturation < ACHROMATIC_SATURATION && value < BLACK_MAX_VALUE {
            Some(ColorBucket::Black)
        } else if YELLOW_HUE.contains(&hue)
            && saturation > VIVID_MIN_SATURATION
            && value > VIVID_MIN_VALUE
        {
            Some(ColorBucket::Yellow)
        } else if ORANGE_HUE.contains(&hue)
            && saturation > VIVID_MIN_SATURATION
            && value > VIVID_MIN_VALUE
        {
            Some(ColorBucket::Orange)
        } else if BROWN_HUE.contains(&hue)
            && saturation > BROWN_MIN_SATURATION
            && value < BROWN_MAX_VALUE
        {
            Some(ColorBucket::Brown)
        } else {
            None
        }
    }

}
