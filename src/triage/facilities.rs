use std::cmp::Ordering;

use serde::Serialize;

use crate::geo::{Coordinate, PointOfInterest, distance_km};

/// Facilities listed per category next to the map.
pub const NEARBY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityKind {
    Hospital,
    Pharmacy,
}

impl FacilityKind {
    /// OpenStreetMap `amenity` tag value.
    pub fn amenity(self) -> &'static str {
        match self {
            FacilityKind::Hospital => "hospital",
            FacilityKind::Pharmacy => "pharmacy",
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            FacilityKind::Hospital => "Hospital",
            FacilityKind::Pharmacy => "Pharmacy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyFacility {
    pub name: String,
    pub coordinate: Coordinate,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: u64,
    pub coordinate: Coordinate,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilitySummary {
    pub kind: FacilityKind,
    pub total: usize,
    pub nearby: Vec<NearbyFacility>,
    pub markers: Vec<MapMarker>,
}

/// Map markers for every located place, plus the closest named ones.
pub fn summarize(origin: Coordinate, kind: FacilityKind, places: &[PointOfInterest]) -> FacilitySummary {
    let markers = places
        .iter()
        .filter_map(|place| {
            let coordinate = place.coordinate?;
            Some(MapMarker {
                id: place.id,
                coordinate,
                label: place
                    .name
                    .clone()
                    .unwrap_or_else(|| kind.default_label().to_string()),
            })
        })
        .collect();

    let mut nearby: Vec<NearbyFacility> = places
        .iter()
        .filter_map(|place| {
            let coordinate = place.coordinate?;
            let name = place.name.as_ref()?;
            Some(NearbyFacility {
                name: name.clone(),
                coordinate,
                distance_km: distance_km(origin, coordinate),
            })
        })
        .collect();
    nearby.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });
    nearby.truncate(NEARBY_LIMIT);

    FacilitySummary {
        kind,
        total: places.len(),
        nearby,
        markers,
    }
}
