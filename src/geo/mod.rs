pub mod distance;
pub mod nominatim;
pub mod overpass;

use serde::{Deserialize, Serialize};

pub use distance::distance_km;
pub use nominatim::NominatimGeocoder;
pub use overpass::OverpassPlaces;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A record returned by the map-data service.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub id: u64,
    pub coordinate: Option<Coordinate>,
    pub name: Option<String>,
}

#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves a free-text address. `Ok(None)` means the service had no match.
    async fn locate(&self, address: &str) -> anyhow::Result<Option<Coordinate>>;
}

#[async_trait::async_trait]
pub trait PlacesSource: Send + Sync {
    /// Points of interest tagged `amenity=<amenity>` within `radius_m` meters of `center`.
    async fn nearby(
        &self,
        center: Coordinate,
        amenity: &str,
        radius_m: u32,
    ) -> anyhow::Result<Vec<PointOfInterest>>;
}
