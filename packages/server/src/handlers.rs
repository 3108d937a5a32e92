//! HTTP handler functions for the road risk map API.

use actix_web::{HttpResponse, web};
use road_risk_database::queries;
use road_risk_database_models::NewIssue;
use road_risk_geometry::features::build_feature_collection;
use road_risk_geometry::{Geometry, Position};
use road_risk_road_models::IssueSeverity;
use road_risk_server_models::{
    ApiHealth, IssueProperties, ReportAck, ReportForm, RoadProperties, to_json_object,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/roads`
///
/// Returns every road as a `GeoJSON` feature with its blended risk
/// properties. A road whose stored geometry fails to decode is still
/// returned, with `null` geometry.
pub async fn roads(state: web::Data<AppState>) -> HttpResponse {
    match queries::query_roads(state.db.as_ref()).await {
        Ok(rows) => {
            let entities = rows
                .iter()
                .map(|row| {
                    let geometry = match Geometry::from_wkt(&row.geom) {
                        Ok(geometry) => Some(geometry),
                        Err(e) => {
                            log::warn!("Road {}: undecodable stored geometry: {e}", row.id);
                            None
                        }
                    };
                    (geometry, to_json_object(&RoadProperties::from(row)))
                })
                .collect();

            HttpResponse::Ok().json(build_feature_collection(entities))
        }
        Err(e) => {
            log::error!("Failed to query roads: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to query roads"
            }))
        }
    }
}

/// `GET /api/issues`
///
/// Returns every issue report as a `GeoJSON` point feature, in creation
/// order.
pub async fn issues(state: web::Data<AppState>) -> HttpResponse {
    match queries::query_issues(state.db.as_ref()).await {
        Ok(rows) => {
            let entities = rows
                .iter()
                .map(|row| {
                    let geometry = match Geometry::from_wkt(&row.geom) {
                        Ok(geometry) => Some(geometry),
                        Err(e) => {
                            log::warn!("Issue {}: undecodable stored geometry: {e}", row.id);
                            None
                        }
                    };
                    (geometry, to_json_object(&IssueProperties::from(row)))
                })
                .collect();

            HttpResponse::Ok().json(build_feature_collection(entities))
        }
        Err(e) => {
            log::error!("Failed to query issues: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to query issues"
            }))
        }
    }
}

/// `POST /api/report`
///
/// Records a new issue report, then recomputes the owning road's current
/// risk from the full set of its issues. Severity and road existence are
/// validated here; the aggregator itself is total.
pub async fn report(state: web::Data<AppState>, form: web::Form<ReportForm>) -> HttpResponse {
    let form = form.into_inner();

    let Ok(severity) = IssueSeverity::from_value(form.severity) else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Invalid severity {}: expected 0-5", form.severity)
        }));
    };

    if !form.lat.is_finite() || !form.lon.is_finite() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Report location must be finite coordinates"
        }));
    }

    match queries::road_exists(state.db.as_ref(), form.road_id).await {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("Unknown road: {}", form.road_id)
            }));
        }
        Err(e) => {
            log::error!("Failed to check road {}: {e}", form.road_id);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to record issue"
            }));
        }
    }

    let issue = NewIssue {
        road_id: form.road_id,
        issue_type: form.issue_type,
        severity,
        geom: Geometry::Point(Position::new(form.lon, form.lat)).to_wkt(),
        photo_path: form.photo_path,
    };

    // Insert and recompute as one logical unit; concurrent reports for
    // the same road must not interleave between the two steps.
    let _guard = state.report_lock.lock().await;

    if let Err(e) = queries::insert_issue(state.db.as_ref(), &issue).await {
        log::error!("Failed to insert issue for road {}: {e}", issue.road_id);
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to record issue"
        }));
    }

    match queries::recompute_road_risk(state.db.as_ref(), issue.road_id).await {
        Ok(current_risk) => HttpResponse::Ok().json(ReportAck {
            status: "Issue reported successfully".to_string(),
            current_risk,
        }),
        Err(e) => {
            log::error!("Failed to recompute risk for road {}: {e}", issue.road_id);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Issue recorded but risk recomputation failed"
            }))
        }
    }
}
