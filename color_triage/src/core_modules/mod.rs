pub mod bucket;
pub mod classifier;
pub mod counts;
pub mod hsv;
pub mod pixel;
pub mod utils;
