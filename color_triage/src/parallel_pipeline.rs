// THEORY:
// Classification is embarrassingly parallel: every pixel is bucketed on its own
// and counts merge by addition. `ParallelTriage` shares one read-only pixel
// buffer across a pool of blocking workers, gives each worker a contiguous range
// and a private `ColorCounts`, then sums the partial tallies. There is no lock
// anywhere on the hot path. The result is identical to the sequential pipeline;
// only wall-clock time changes.

use crate::acquisition::ImageSource;
use crate::core_modules::classifier::classifier::{chunk_ranges, classify};
use crate::core_modules::counts::counts::ColorCounts;
use crate::core_modules::pixel::pixel::Pixel;
use crate::error::{Result, TriageError};
use crate::pipeline::{Report, TriageConfig};
use futures::future::join_all;
use std::sync::Arc;

pub struct ParallelTriage {
    config: TriageConfig,
}

impl ParallelTriage {
    pub fn new(config: TriageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Classifies `pixels` across the worker pool and merges the partial counts.
    pub async fn classify(&self, pixels: Arc<[Pixel]>) -> Result<ColorCounts> {
        let ranges = chunk_ranges(
            pixels.len(),
            self.config.workers,
            self.config.min_pixels_per_worker,
        );
        tracing::debug!(
            pixels = pixels.len(),
            workers = ranges.len(),
            "Dispatching classification chunks"
        );

        let workers = ranges.into_iter().map(|range| {
            let pixels = Arc::clone(&pixels);
            tokio::task::spawn_blocking(move || classify(&pixels[range]))
        });

        let mut merged = ColorCounts::new();
        for partial in join_all(workers).await {
            merged += partial.map_err(|e| TriageError::Worker(e.to_string()))?;
        }
        Ok(merged)
    }

    pub async fn analyze_pixels(&self, pixels: Vec<Pixel>) -> Result<Report> {
        let counts = self.classify(Arc::from(pixels)).await?;
        Report::from_counts(counts)
    }

    /// Acquires the source on a blocking worker, then classifies it in parallel.
    pub async fn analyze_source<S>(&self, source: S) -> Result<Report>
    where
        S: ImageSource + Send + 'static,
    {
        let max_dimension = self.config.max_dimension;
        let acquired = tokio::task::spawn_blocking(move || source.acquire(max_dimension))
            .await
            .map_err(|e| TriageError::Worker(e.to_string()))??;

        let report = self.analyze_pixels(acquired.pixels).await?;
        tracing::info!(
            width = acquired.width,
            height = acquired.height,
            classified = report.counts().total_classified(),
            workers = self.config.workers,
            "Analyzed image"
        );
        Ok(report)
    }
}
