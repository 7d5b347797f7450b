use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use opentelemetry::KeyValue;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::geo::{Coordinate, Geocoder, PlacesSource};
use crate::llm::LlmClient;
use crate::report::REPORT_FILE_NAME;
use crate::telemetry::metrics::{ASSESSMENT_DURATION, FACILITIES_FOUND, GEOCODE_MISSES};

use super::advice::{self, AdviceReport};
use super::facilities::{self, FacilityKind, FacilitySummary};
use super::intake::{AgeCategory, AssessmentRequest, Severity};

pub const LOCATION_NOT_FOUND_WARNING: &str =
    "Unable to find coordinates for the given address. Please try again.";

/// External collaborators an assessment talks to.
#[derive(Clone)]
pub struct Services {
    pub llm_client: Arc<LlmClient>,
    pub geocoder: Arc<dyn Geocoder>,
    pub places: Arc<dyn PlacesSource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub age_category: AgeCategory,
    pub severity: Severity,
    pub report: AdviceReport,
    pub report_file_name: &'static str,
    pub location: Coordinate,
    pub radius_m: u32,
    pub hospitals: FacilitySummary,
    pub pharmacies: FacilitySummary,
}

async fn find_facilities(
    places: &dyn PlacesSource,
    origin: Coordinate,
    kind: FacilityKind,
    radius_m: u32,
) -> Result<FacilitySummary, AppError> {
    let found = places
        .nearby(origin, kind.amenity(), radius_m)
        .await
        .map_err(|e| AppError::Upstream(format!("{} search failed: {e}", kind.amenity())))?;

    FACILITIES_FOUND.record(
        found.len() as f64,
        &[KeyValue::new("facility.kind", kind.amenity())],
    );

    Ok(facilities::summarize(origin, kind, &found))
}

/// Runs one assessment end to end. Every external call is awaited in turn.
#[tracing::instrument(
    name = "assessment",
    skip(services, request),
    fields(
        assessment.id,
        assessment.severity,
        assessment.radius_m,
        assessment.duration_ms,
    )
)]
pub async fn run_assessment(
    services: &Services,
    request: AssessmentRequest,
) -> Result<Assessment, AppError> {
    let start = Instant::now();
    let intake = request.validate()?;

    let span = tracing::Span::current();
    span.record("assessment.severity", intake.severity.label());
    span.record("assessment.radius_m", intake.radius_m);

    let report = advice::query_assistant(
        &services.llm_client,
        &intake.symptoms,
        intake.age_category,
        intake.severity,
    )
    .await;

    let location = services
        .geocoder
        .locate(&intake.location)
        .await
        .map_err(|e| AppError::Upstream(format!("geocoding failed: {e}")))?;

    let Some(origin) = location else {
        GEOCODE_MISSES.add(1, &[]);
        return Err(AppError::LocationNotFound(
            LOCATION_NOT_FOUND_WARNING.to_string(),
        ));
    };

    let hospitals = find_facilities(
        services.places.as_ref(),
        origin,
        FacilityKind::Hospital,
        intake.radius_m,
    )
    .await?;
    let pharmacies = find_facilities(
        services.places.as_ref(),
        origin,
        FacilityKind::Pharmacy,
        intake.radius_m,
    )
    .await?;

    let assessment = Assessment {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        age_category: intake.age_category,
        severity: intake.severity,
        report,
        report_file_name: REPORT_FILE_NAME,
        location: origin,
        radius_m: intake.radius_m,
        hospitals,
        pharmacies,
    };

    let duration = start.elapsed();
    ASSESSMENT_DURATION.record(duration.as_secs_f64(), &[]);
    span.record("assessment.id", assessment.id.to_string());
    span.record("assessment.duration_ms", duration.as_millis() as u64);

    Ok(assessment)
}
