pub mod aligner;
pub mod screener;

pub use aligner::fill_missing_dates;
pub use screener::{combine_masks, Mask, RadiometerScreener, SatelliteScreener};
