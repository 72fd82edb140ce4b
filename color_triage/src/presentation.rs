// THEORY:
// Presentation is the last stage: it turns a `Report` into something a person
// reads. Each bucket gets a bar proportional to its share and its percentage at
// one decimal place, followed by the cumulative warning line. Rounding happens
// here and only here; the core keeps full precision.

use crate::core_modules::bucket::bucket::ColorBucket;
use crate::pipeline::{Composition, Report};
use std::fmt;

/// Character width of a 100% bar.
pub const BAR_WIDTH: usize = 40;

const FILLED: char = '█';
const EMPTY: char = '·';
const CUMULATIVE_LABEL: &str = "cumulative";
const LABEL_WIDTH: usize = CUMULATIVE_LABEL.len();

/// Renders the report as aligned text bars.
pub fn render_text(report: &Report) -> String {
    match report {
        Report::Composition(composition) => render_composition(composition, BAR_WIDTH),
        Report::NoClassifiablePixels { counts } => format!(
            "No classifiable pixels ({} analyzed); nothing to show.\n",
            counts.total_pixels()
        ),
    }
}

pub fn render_composition(composition: &Composition, bar_width: usize) -> String {
    CompositionBars {
        composition,
        bar_width,
    }
    .to_string()
}

/// One bar line per bucket, then the cumulative line.
pub struct CompositionBars<'a> {
    pub composition: &'a Composition,
    pub bar_width: usize,
}

impl fmt::Display for CompositionBars<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bucket in ColorBucket::ALL {
            let share = self.composition.percentages.get(bucket);
            writeln!(
                f,
                "{:<LABEL_WIDTH$} {} {:>5.1}%",
                bucket.name(),
                bar(share, self.bar_width),
                share
            )?;
        }
        // Percent signs line up with the bucket lines: bar, space, 5-wide number.
        writeln!(
            f,
            "{:<LABEL_WIDTH$} {:>w$.1}%",
            CUMULATIVE_LABEL,
            self.composition.aggregate,
            w = self.bar_width + 6
        )
    }
}

fn bar(share: f64, width: usize) -> String {
    let filled = ((share.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let mut bar = String::with_capacity(width * FILLED.len_utf8());
    bar.extend(std::iter::repeat_n(FILLED, filled));
    bar.extend(std::iter::repeat_n(EMPTY, width - filled));
    bar
}
