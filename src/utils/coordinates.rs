use crate::utils::constants::{
    MAX_VALID_LATITUDE, MAX_VALID_LONGITUDE, MIN_VALID_LATITUDE, MIN_VALID_LONGITUDE,
};

/// Check that a latitude/longitude pair lies inside the physically valid
/// ranges [-90, 90] and [-180, 180]. Samples outside carry malformed
/// geolocation and never reach the distance screen.
pub fn is_valid_geolocation(latitude: f64, longitude: f64) -> bool {
    (MIN_VALID_LATITUDE..=MAX_VALID_LATITUDE).contains(&latitude)
        && (MIN_VALID_LONGITUDE..=MAX_VALID_LONGITUDE).contains(&longitude)
}

/// Calculate the distance between two points using the Haversine formula
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}
