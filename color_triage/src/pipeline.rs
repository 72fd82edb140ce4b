// THEORY:
// The `pipeline` module is the top-level API of the crate. It wires the three
// stages together (acquisition produces pixels, the classifier counts them,
// aggregation turns counts into a composition) and hands back a `Report` the
// caller owns. No state survives between analyses.
//
// An image where no pixel lands in any bucket is a legitimate outcome for the
// tool, so the pipeline reports it as `Report::NoClassifiablePixels` rather than
// as an error. The lower-level `ColorCounts::percentages` still refuses to divide
// by zero for callers that work with counts directly.

use crate::acquisition::{AcquiredImage, ImageSource};
use crate::core_modules::classifier::classifier::classify;
use crate::core_modules::pixel::pixel::{Pixel, pixels_from_buffer};
use crate::core_modules::utils::image_helper::image_helper::{
    DEFAULT_MAX_DIMENSION, fit_within,
};
use crate::error::{Result, TriageError};
use image::DynamicImage;
use serde::{Deserialize, Serialize};

// Re-export key data structures for the public API.
pub use crate::core_modules::bucket::bucket::ColorBucket;
pub use crate::core_modules::counts::counts::{ColorCounts, ColorPercentages, Percentage};

const DEFAULT_MIN_PIXELS_PER_WORKER: usize = 16_384;

/// Tunables for an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Longer-edge cap applied by acquisition. Zero disables downscaling.
    pub max_dimension: u32,
    /// Number of parallel classification workers.
    pub workers: usize,
    /// Buffers are not split into chunks smaller than this.
    pub min_pixels_per_worker: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            workers: num_cpus::get(),
            min_pixels_per_worker: DEFAULT_MIN_PIXELS_PER_WORKER,
        }
    }
}

/// Color composition of an image with at least one classified pixel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub counts: ColorCounts,
    pub percentages: ColorPercentages,
    /// Orange + brown + black, in percent.
    pub aggregate: Percentage,
}

impl Composition {
    pub fn from_counts(counts: ColorCounts) -> Result<Self> {
        let percentages = counts.percentages()?;
        Ok(Self {
            counts,
            aggregate: percentages.aggregate(),
            percentages,
        })
    }
}

/// The primary output of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    /// Every pixel fell outside the buckets; there is nothing to show.
    NoClassifiablePixels { counts: ColorCounts },
    Composition(Composition),
}

impl Report {
    /// Builds the report for a finished tally. Only `EmptyClassification` maps to
    /// `NoClassifiablePixels`; any other aggregation error is returned as is.
    pub fn from_counts(counts: ColorCounts) -> Result<Self> {
        match Composition::from_counts(counts) {
            Ok(composition) => Ok(Report::Composition(composition)),
            Err(TriageError::EmptyClassification) => Ok(Report::NoClassifiablePixels { counts }),
            Err(other) => Err(other),
        }
    }

    pub fn counts(&self) -> &ColorCounts {
        match self {
            Report::NoClassifiablePixels { counts } => counts,
            Report::Composition(composition) => &composition.counts,
        }
    }

    pub fn composition(&self) -> Option<&Composition> {
        match self {
            Report::Composition(composition) => Some(composition),
            Report::NoClassifiablePixels { .. } => None,
        }
    }

    /// The composition, or `EmptyClassification` when there is none.
    pub fn into_composition(self) -> Result<Composition> {
        match self {
            Report::Composition(composition) => Ok(composition),
            Report::NoClassifiablePixels { .. } => Err(TriageError::EmptyClassification),
        }
    }
}

/// Sequential analysis pipeline.
#[derive(Debug, Clone, Default)]
pub struct TriagePipeline {
    config: TriageConfig,
}

impl TriagePipeline {
    pub fn new(config: TriageConfig) -> Self {
        Self { config }
    }

    pub fn analyze_pixels(&self, pixels: &[Pixel]) -> Result<Report> {
        let counts = classify(pixels);
        tracing::debug!(
            pixels = counts.total_pixels(),
            classified = counts.total_classified(),
            "Classified pixels"
        );
        Report::from_counts(counts)
    }

    /// Analyzes an interleaved RGB (3 channels) or RGBA (4 channels) buffer as is.
    pub fn analyze_buffer(&self, bytes: &[u8], channels: usize) -> Result<Report> {
        let pixels = pixels_from_buffer(bytes, channels)?;
        self.analyze_pixels(&pixels)
    }

    /// Downscales a decoded image per the config and analyzes it.
    pub fn analyze_image(&self, image: DynamicImage) -> Result<Report> {
        let image = fit_within(image, self.config.max_dimension);
        let acquired = AcquiredImage::from_image(&image);
        self.analyze_acquired(&acquired)
    }

    pub fn analyze_source(&self, source: &dyn ImageSource) -> Result<Report> {
        let acquired = source.acquire(self.config.max_dimension)?;
        self.analyze_acquired(&acquired)
    }

    fn analyze_acquired(&self, acquired: &AcquiredImage) -> Result<Report> {
        let report = self.analyze_pixels(&acquired.pixels)?;
        tracing::info!(
            width = acquired.width,
            height = acquired.height,
            classified = report.counts().total_classified(),
            "Analyzed image"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::FrameSource;
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;

    #[test]
    fn reference_scenario_report() {
        let pipeline = TriagePipeline::default();
        let bytes = [255, 255, 255, 0, 0, 0, 255, 200, 0, 139, 69, 19];
        let report = pipeline.analyze_buffer(&bytes, 3).unwrap();

        let composition = report.composition().expect("composition");
        assert_eq!(composition.counts.total_classified(), 4);
        assert_eq!(composition.percentages.yellow, 25.0);
        assert_eq!(composition.percentages.orange, 25.0);
        assert_eq!(composition.percentages.brown, 0.0);
        assert_eq!(composition.aggregate, 50.0);
    }

    #[test]
    fn unclassifiable_image_is_reported_distinctly() {
        let pipeline = TriagePipeline::default();
        let report = pipeline.analyze_pixels(&[Pixel::new(128, 115, 102); 9]).unwrap();
        assert_eq!(
            report,
            Report::NoClassifiablePixels {
                counts: ColorCounts {
                    unclassified: 9,
                    ..ColorCounts::default()
                }
            }
        );
        assert!(matches!(
            report.into_composition(),
            Err(TriageError::EmptyClassification)
        ));
    }

    #[test]
    fn analyze_image_applies_dimension_cap() {
        let pipeline = TriagePipeline::new(TriageConfig {
            max_dimension: 10,
            ..TriageConfig::default()
        });
        let image = RgbImage::from_pixel(100, 50, Rgb([0, 0, 0]));
        let report = pipeline.analyze_image(DynamicImage::ImageRgb8(image)).unwrap();
        assert_eq!(report.counts().black, 50);
        assert_eq!(report.composition().map(|c| c.percentages.black), Some(100.0));
    }

    #[test]
    fn analyze_source_uses_frame() {
        let pipeline = TriagePipeline::default();
        let frame = FrameSource::rgba(1, 2, vec![100, 50, 10, 255, 255, 255, 255, 255]).unwrap();
        let report = pipeline.analyze_source(&frame).unwrap();
        let composition = report.into_composition().unwrap();
        assert_eq!(composition.counts.brown, 1);
        assert_eq!(composition.counts.white, 1);
        assert_eq!(composition.aggregate, 50.0);
    }

    #[test]
    fn report_from_counts_maps_only_empty_classification() {
        let empty = ColorCounts {
            unclassified: 3,
            ..ColorCounts::default()
        };
        assert_eq!(
            Report::from_counts(empty).unwrap(),
            Report::NoClassifiablePixels { counts: empty }
        );

        let report = Report::from_counts(ColorCounts {
            white: 1,
            black: 1,
            ..ColorCounts::default()
        })
        .unwrap();
        assert_eq!(report.composition().map(|c| c.aggregate), Some(50.0));
    }

    #[test]
    fn config_defaults() {
        let config = TriageConfig::default();
        assert_eq!(config.max_dimension, 500);
        assert!(config.workers >= 1);
    }

    #[test]
    fn partial_config_json_keeps_defaults() {
        let config: TriageConfig = serde_json::from_str(r#"{"max_dimension": 250}"#).unwrap();
        assert_eq!(config.max_dimension, 250);
        assert_eq!(config.workers, num_cpus::get());
        assert_eq!(config.min_pixels_per_worker, 16_384);

        let config: TriageConfig = serde_json::from_str(r#"{"workers": 2}"#).unwrap();
        assert_eq!(config.max_dimension, 500);
        assert_eq!(config.workers, 2);

        assert_eq!(serde_json::from_str::<TriageConfig>("{}").unwrap(), TriageConfig::default());
    }
}
