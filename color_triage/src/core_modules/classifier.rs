// THEORY:
// The classifier is the core operation: walk a pixel sequence once, bucket every
// pixel, tally the buckets. It is a pure function of its input. Order does not
// matter, so any split of the sequence classified separately and summed gives
// the same result. `chunk_ranges` produces such a split for the parallel
// pipeline: contiguous row-major ranges, one per worker.

pub mod classifier {
    use crate::core_modules::counts::counts::ColorCounts;
    use crate::core_modules::pixel::pixel::Pixel;
    use std::ops::Range;

    /// Buckets every pixel and returns the tallies.
    pub fn classify(pixels: &[Pixel]) -> ColorCounts {
        let mut tally = ColorCounts::new();
        for pixel in pixels {
            tally.record(pixel.bucket());
        }
        tally
    }

    /// Splits `len` pixels into at most `workers` contiguous ranges of at least
    /// `min_per_chunk` pixels each (the last one may be shorter).
    pub fn chunk_ranges(len: usize, workers: usize, min_per_chunk: usize) -> Vec<Range<usize>> {
        if len == 0 {
            return Vec::new();
        }
        let by_size = len.div_ceil(min_per_chunk.max(1));
        let chunk_count = workers.max(1).min(by_size);
        let chunk_len = len.div_ceil(chunk_count);

        (0..len)
            .step_by(chunk_len)
            .map(|start| start..(start + chunk_len).min(len))
            .collect()
    }

}
