use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use super::{Coordinate, PlacesSource, PointOfInterest};

/// Amenity search against an Overpass API interpreter endpoint.
pub struct OverpassPlaces {
    client: reqwest::Client,
    interpreter_url: String,
    user_agent: String,
}

impl OverpassPlaces {
    pub fn new(interpreter_url: &str, user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            interpreter_url: interpreter_url.to_string(),
            user_agent: user_agent.to_string(),
        }
    }
}

/// Nodes, ways and relations tagged with the amenity; `out center` gives
/// ways and relations a representative point.
pub fn build_query(center: Coordinate, amenity: &str, radius_m: u32) -> String {
    let filter = format!(
        "[\"amenity\"=\"{amenity}\"](around:{radius_m},{},{})",
        center.lat, center.lon
    );
    format!("[out:json];\n(\n  node{filter};\n  way{filter};\n  relation{filter};\n);\nout center;")
}

#[derive(Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Deserialize)]
struct OverpassElement {
    #[serde(default)]
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<Coordinate>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

impl From<OverpassElement> for PointOfInterest {
    fn from(mut element: OverpassElement) -> Self {
        let coordinate = match (element.lat, element.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => element.center,
        };
        PointOfInterest {
            id: element.id,
            coordinate,
            name: element.tags.remove("name"),
        }
    }
}

fn parse_elements(body: &str) -> anyhow::Result<Vec<PointOfInterest>> {
    let response: OverpassResponse = serde_json::from_str(body)
        .map_err(|e| anyhow::anyhow!("unexpected places response shape: {e}"))?;
    Ok(response.elements.into_iter().map(Into::into).collect())
}

#[async_trait::async_trait]
impl PlacesSource for OverpassPlaces {
    #[tracing::instrument(
        name = "places search",
        skip(self),
        fields(server.address = %self.interpreter_url, places.count)
    )]
    async fn nearby(
        &self,
        center: Coordinate,
        amenity: &str,
        radius_m: u32,
    ) -> anyhow::Result<Vec<PointOfInterest>> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|e| anyhow::anyhow!("invalid user agent header: {e}"))?,
        );

        let query = build_query(center, amenity, radius_m);
        let response = self
            .client
            .get(&self.interpreter_url)
            .headers(headers)
            .query(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(anyhow::anyhow!("places error ({status}): {body}"));
        }

        let places = parse_elements(&body)?;
        tracing::Span::current().record("places.count", places.len() as u64);

        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_covers_all_element_types() {
        let q = build_query(Coordinate::new(12.97, 77.59), "hospital", 5000);
        assert!(q.starts_with("[out:json];"));
        assert!(q.contains("node[\"amenity\"=\"hospital\"](around:5000,12.97,77.59);"));
        assert!(q.contains("way[\"amenity\"=\"hospital\"](around:5000,12.97,77.59);"));
        assert!(q.contains("relation[\"amenity\"=\"hospital\"](around:5000,12.97,77.59);"));
        assert!(q.ends_with("out center;"));
    }

    #[test]
    fn test_empty_elements() {
        let places = parse_elements(r#"{"version": 0.6, "elements": []}"#).unwrap();
        assert!(places.is_empty());
    }

    #[test]
    fn test_node_and_way_coordinates() {
        let body = r#"{"elements": [
            {"type": "node", "id": 1, "lat": 12.9, "lon": 77.6, "tags": {"name": "City Hospital", "amenity": "hospital"}},
            {"type": "way", "id": 2, "center": {"lat": 12.8, "lon": 77.5}, "tags": {"amenity": "hospital"}},
            {"type": "relation", "id": 3}
        ]}"#;
        let places = parse_elements(body).unwrap();
        assert_eq!(places.len(), 3);

        assert_eq!(places[0].name.as_deref(), Some("City Hospital"));
        assert_eq!(places[0].coordinate, Some(Coordinate::new(12.9, 77.6)));

        assert_eq!(places[1].name, None);
        assert_eq!(places[1].coordinate, Some(Coordinate::new(12.8, 77.5)));

        assert_eq!(places[2].coordinate, None);
    }

    #[test]
    fn test_missing_elements_is_error() {
        let err = parse_elements(r#"{"remark": "runtime error: timeout"}"#).unwrap_err();
        assert!(err.to_string().contains("unexpected places response shape"));
    }
}
