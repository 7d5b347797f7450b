use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use super::{Coordinate, Geocoder};

/// Geocoding against a Nominatim `/search` endpoint.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    search_url: String,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(search_url: &str, user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            search_url: search_url.to_string(),
            user_agent: user_agent.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

fn first_coordinate(places: &[NominatimPlace]) -> anyhow::Result<Option<Coordinate>> {
    let Some(place) = places.first() else {
        return Ok(None);
    };
    let lat = place
        .lat
        .parse::<f64>()
        .map_err(|e| anyhow::anyhow!("invalid latitude {:?}: {e}", place.lat))?;
    let lon = place
        .lon
        .parse::<f64>()
        .map_err(|e| anyhow::anyhow!("invalid longitude {:?}: {e}", place.lon))?;
    Ok(Some(Coordinate::new(lat, lon)))
}

#[async_trait::async_trait]
impl Geocoder for NominatimGeocoder {
    #[tracing::instrument(
        name = "geocode",
        skip(self),
        fields(server.address = %self.search_url, geocode.found)
    )]
    async fn locate(&self, address: &str) -> anyhow::Result<Option<Coordinate>> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|e| anyhow::anyhow!("invalid user agent header: {e}"))?,
        );

        let response = self
            .client
            .get(&self.search_url)
            .headers(headers)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("geocoding error ({status}): {body}"));
        }

        let places: Vec<NominatimPlace> = response.json().await?;
        let found = first_coordinate(&places)?;

        tracing::Span::current().record("geocode.found", found.is_some());

        Ok(found)
    }
}
