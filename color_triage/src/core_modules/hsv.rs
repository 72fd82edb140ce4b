// THEORY:
// HSV separates "which color" (hue) from "how much color" (saturation) and "how
// bright" (value), which is what makes simple threshold rules workable for
// bucketing. Hue here is expressed as a fraction of a full turn in [0, 1), not
// degrees, because every bucket boundary is written in that unit.
//
// Everything is computed in f64 from the 8-bit channels. Bucket edges like 0.11
// sit close to values real pixels produce, so the precision of the arithmetic
// decides which side of the edge a pixel lands on.

pub mod hsv {
    pub type Hue = f64;
    pub type Saturation = f64;
    pub type Value = f64;

    /// Hue, saturation and value of one pixel. Derived per pixel, never stored.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct Hsv {
        /// Fraction of a turn around the color wheel, in [0, 1).
        pub hue: Hue,
        /// Chroma relative to value, in [0, 1].
        pub saturation: Saturation,
        /// Brightest channel, in [0, 1].
        pub value: Value,
    }

    impl Hsv {
        pub const fn new(hue: Hue, saturation: Saturation, value: Value) -> Self {
            Hsv {
                hue,
                saturation,
                value,
            }
        }

        pub fn is_achromatic(&self) -> bool {
            self.saturation == 0.0
        }
    }

    /// Converts 8-bit RGB channels into HSV.
    ///
    /// Achromatic input (all channels equal) yields `hue = 0` and `saturation = 0`.
    pub fn rgb_to_hsv(red: u8, green: u8, blue: u8) -> Hsv {
        hsv_from_normalized(red as f64 / 255.0, green as f64 / 255.0, blue as f64 / 255.0)
    }

    /// Converts channels already scaled into 0.0..=1.0 into HSV.
    pub fn hsv_from_normalized(red: f64, green: f64, blue: f64) -> Hsv {
        let maximum = red.max(green).max(blue);
        let minimum = red.min(green).min(blue);
        let delta = maximum - minimum;

        let saturation = if maximum == 0.0 { 0.0 } else { delta / maximum };

        if delta == 0.0 {
            return Hsv::new(0.0, saturation, maximum);
        }

        let sector = if maximum == red {
            // Euclidean modulo keeps the red sector non-negative.
            ((green - blue) / delta).rem_euclid(6.0)
        } else if maximum == green {
            (blue - red) / delta + 2.0
        } else {
            (red - green) / delta + 4.0
        };

        let mut hue = sector / 6.0;
        if hue < 0.0 {
            hue += 1.0;
        }
        if hue >= 1.0 {
            hue -= 1.0;
        }

        Hsv::new(hue, saturation, maximum)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        const EPSILON: f64 = 1e-12;

        fn approx(a: f64, b: f64) -> bool {
            (a - b).abs() < EPSILON
        }

        #[test]
        fn grays_are_achromatic() {
            for level in [0u8, 1, 64, 128, 200, 255] {
                let hsv = rgb_to_hsv(level, level, level);
                assert_eq!(hsv.hue, 0.0);
                assert_eq!(hsv.saturation, 0.0);
                assert!(approx(hsv.value, level as f64 / 255.0));
                assert!(hsv.is_achromatic());
            }
        }

        #[test]
        fn primaries() {
            assert_eq!(rgb_to_hsv(255, 0, 0), Hsv::new(0.0, 1.0, 1.0));

            let green = rgb_to_hsv(0, 255, 0);
            assert!(approx(green.hue, 1.0 / 3.0));
            assert_eq!(green.saturation, 1.0);

            let blue = rgb_to_hsv(0, 0, 255);
            assert!(approx(blue.hue, 2.0 / 3.0));
            assert_eq!(blue.value, 1.0);
        }

        #[test]
        fn red_sector_wraps_negative_hue() {
            // Red max with blue above green lands just below a full turn.
            let magenta_red = rgb_to_hsv(255, 0, 128);
            let expected = 1.0 - (128.0 / 255.0) / 6.0;
            assert!(approx(magenta_red.hue, expected));
            assert!(magenta_red.hue >= 0.0 && magenta_red.hue < 1.0);
        }

        #[test]
        fn hue_stays_in_unit_range() {
            for r in (0..=255u16).step_by(15) {
                for g in (0..=255u16).step_by(15) {
                    for b in (0..=255u16).step_by(15) {
                        let hsv = rgb_to_hsv(r as u8, g as u8, b as u8);
                        assert!((0.0..1.0).contains(&hsv.hue), "hue {} for {r},{g},{b}", hsv.hue);
                        assert!((0.0..=1.0).contains(&hsv.saturation));
                        assert!((0.0..=1.0).contains(&hsv.value));
                    }
                }
            }
        }

        #[test]
        fn scaling_keeps_hue_and_saturation() {
            for (r, g, b) in [(50u8, 30u8, 10u8), (20, 100, 60), (90, 10, 120), (127, 64, 0)] {
                let base = rgb_to_hsv(r, g, b);
                let doubled = rgb_to_hsv(r * 2, g * 2, b * 2);
                assert!(approx(base.hue, doubled.hue));
                assert!(approx(base.saturation, doubled.saturation));
                assert!(approx(base.value * 2.0, doubled.value));
            }
        }

        #[test]
        fn gold_and_saddle_brown() {
            let gold = rgb_to_hsv(255, 200, 0);
            assert!(approx(gold.hue, (200.0 / 255.0) / 6.0));
            assert_eq!(gold.saturation, 1.0);

            let saddle = rgb_to_hsv(139, 69, 19);
            assert!(approx(saddle.hue, (50.0 / 120.0) / 6.0));
            assert!(approx(saddle.saturation, 120.0 / 139.0));
            assert!(approx(saddle.value, 139.0 / 255.0));
        }
    }
}
