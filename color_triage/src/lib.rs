// THEORY:
// This file is the entry point of the `color_triage` library crate. It exposes a
// three-stage pipeline (acquisition, classification, presentation) over a small
// pure core: RGB to HSV conversion, threshold bucketing into five color classes,
// and aggregation into percentages plus a cumulative warning score.
//
// `pipeline` and `parallel_pipeline` are the high-level interfaces. The core
// lives in `core_modules` and is usable on its own through `classify`.

pub mod acquisition;
pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;
pub mod presentation;

pub use core_modules::classifier::classifier::classify;
pub use core_modules::hsv::hsv::{Hsv, rgb_to_hsv};
pub use core_modules::pixel::pixel::Pixel;
pub use error::{Result, TriageError};
