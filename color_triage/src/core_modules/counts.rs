// THEORY:
// `ColorCounts` is the only mutable state in an analysis: five counters that go up
// by one per classified pixel and never go down. Counts from independent workers
// combine by plain addition, which is what lets the classification loop split
// across threads without any locking.
//
// Percentages are derived once, after counting is finished. They only exist when
// at least one pixel was classified; an empty classification is an error the
// caller has to handle, never a NaN.

pub mod counts {
    use crate::core_modules::bucket::bucket::ColorBucket;
    use crate::error::{Result, TriageError};
    use serde::Serialize;
    use std::iter::Sum;
    use std::ops::{Add, AddAssign};

    pub type Count = u64;
    pub type Percentage = f64;

    /// Per-bucket pixel tallies for one analysis.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
    pub struct ColorCounts {
        pub white: Count,
        pub yellow: Count,
        pub orange: Count,
        pub brown: Count,
        pub black: Count,
        /// Pixels that matched no bucket. Never part of the percentages.
        pub unclassified: Count,
    }

    impl ColorCounts {
        pub fn new() -> Self {
            Self::default()
        }

        /// Records the outcome of classifying one pixel.
        pub fn record(&mut self, bucket: Option<ColorBucket>) {
            match bucket {
                Some(bucket) => self.record_bucket(bucket),
                None => self.unclassified += 1,
            }
        }

        pub fn record_bucket(&mut self, bucket: ColorBucket) {
            *self.slot_mut(bucket) += 1;
        }

        pub fn get(&self, bucket: ColorBucket) -> Count {
            match bucket {
                ColorBucket::White => self.white,
                ColorBucket::Yellow => self.yellow,
                ColorBucket::Orange => self.orange,
                ColorBucket::Brown => self.brown,
                ColorBucket::Black => self.black,
            }
        }

        fn slot_mut(&mut self, bucket: ColorBucket) -> &mut Count {
            match bucket {
                ColorBucket::White => &mut self.white,
                ColorBucket::Yellow => &mut self.yellow,
                ColorBucket::Orange => &mut self.orange,
                ColorBucket::Brown => &mut self.brown,
                ColorBucket::Black => &mut self.black,
            }
        }

        /// Sum of the five bucket counters.
        pub fn total_classified(&self) -> Count {
            self.white + self.yellow + self.orange + self.brown + self.black
        }

        /// Every pixel seen, classified or not.
        pub fn total_pixels(&self) -> Count {
            self.total_classified() + self.unclassified
        }

        /// Share of each bucket among classified pixels.
        ///
        /// Fails with [`TriageError::EmptyClassification`] when no pixel was classified.
        pub fn percentages(&self) -> Result<ColorPercentages> {
            let total = self.total_classified();
            if total == 0 {
                return Err(TriageError::EmptyClassification);
            }
            let share = |count: Count| 100.0 * count as Percentage / total as Percentage;
            Ok(ColorPercentages {
                white: share(self.white),
                yellow: share(self.yellow),
                orange: share(self.orange),
                brown: share(self.brown),
                black: share(self.black),
            })
        }
    }

    impl AddAssign for ColorCounts {
        fn add_assign(&mut self, other: Self) {
            self.white += other.white;
            self.yellow += other.yellow;
            self.orange += other.orange;
            self.brown += other.brown;
            self.black += other.black;
            self.unclassified += other.unclassified;
        }
    }

    impl Add for ColorCounts {
        type Output = ColorCounts;

        fn add(mut self, other: Self) -> Self::Output {
            self += other;
            self
        }
    }

    impl Sum for ColorCounts {
        fn sum<I: Iterator<Item = ColorCounts>>(iter: I) -> Self {
            iter.fold(ColorCounts::default(), Add::add)
        }
    }

    /// Bucket shares in percent of classified pixels. Unrounded.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct ColorPercentages {
        pub white: Percentage,
        pub yellow: Percentage,
        pub orange: Percentage,
        pub brown: Percentage,
        pub black: Percentage,
    }

    impl ColorPercentages {
        pub fn get(&self, bucket: ColorBucket) -> Percentage {
            match bucket {
                ColorBucket::White => self.white,
                ColorBucket::Yellow => self.yellow,
                ColorBucket::Orange => self.orange,
                ColorBucket::Brown => self.brown,
                ColorBucket::Black => self.black,
            }
        }

        /// Cumulative warning mass: orange + brown + black.
        pub fn aggregate(&self) -> Percentage {
            ColorBucket::ALL
                .iter()
                .filter(|bucket| bucket.is_warning())
                .map(|bucket| self.get(*bucket))
                .sum()
        }

        pub fn sum(&self) -> Percentage {
            ColorBucket::ALL.iter().map(|bucket| self.get(*bucket)).sum()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use pretty_assertions::assert_eq;

        fn counts(white: Count, yellow: Count, orange: Count, brown: Count, black: Count) -> ColorCounts {
            ColorCounts {
                white,
                yellow,
                orange,
                brown,
                black,
                unclassified: 0,
            }
        }

        #[test]
        fn record_increments_one_counter() {
            let mut tally = ColorCounts::new();
            tally.record(Some(ColorBucket::Orange));
            tally.record(Some(ColorBucket::Orange));
            tally.record(Some(ColorBucket::Black));
            tally.record(None);

            assert_eq!(tally.orange, 2);
            assert_eq!(tally.black, 1);
            assert_eq!(tally.unclassified, 1);
            assert_eq!(tally.total_classified(), 3);
            assert_eq!(tally.total_pixels(), 4);
        }

        #[test]
        fn percentages_sum_to_hundred() {
            for tally in [counts(1, 2, 3, 4, 5), counts(7, 0, 0, 0, 0), counts(3, 3, 3, 0, 1)] {
                let shares = tally.percentages().unwrap();
                assert!((shares.sum() - 100.0).abs() < 1e-9, "sum {}", shares.sum());
            }
        }

        #[test]
        fn unclassified_pixels_do_not_dilute_shares() {
            let mut tally = counts(1, 0, 1, 0, 0);
            tally.unclassified = 98;
            let shares = tally.percentages().unwrap();
            assert_eq!(shares.white, 50.0);
            assert_eq!(shares.orange, 50.0);
        }

        #[test]
        fn empty_classification_is_an_error() {
            let mut tally = ColorCounts::new();
            tally.unclassified = 42;
            assert!(matches!(
                tally.percentages(),
                Err(TriageError::EmptyClassification)
            ));
        }

        #[test]
        fn aggregate_is_orange_brown_black() {
            let shares = counts(2, 2, 2, 2, 2).percentages().unwrap();
            assert!((shares.aggregate() - 60.0).abs() < 1e-9);

            let shares = counts(1, 1, 0, 0, 0).percentages().unwrap();
            assert_eq!(shares.aggregate(), 0.0);
        }

        #[test]
        fn partial_counts_merge_by_addition() {
            let mut left = counts(1, 2, 3, 4, 5);
            left.unclassified = 6;
            let mut right = counts(10, 20, 30, 40, 50);
            right.unclassified = 60;

            let merged: ColorCounts = vec![left, right, ColorCounts::new()].into_iter().sum();
            let mut expected = counts(11, 22, 33, 44, 55);
            expected.unclassified = 66;
            assert_eq!(merged, expected);
            assert_eq!(left + right, expected);
        }
    }
}
