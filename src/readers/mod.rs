pub mod radiometer;
pub mod satellite;

pub use radiometer::RadiometerReader;
pub use satellite::SatelliteReader;
