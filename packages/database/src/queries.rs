//! Database query functions for roads and road issues.
//!
//! All functions take a `&dyn Database` handle and use
//! `query_raw_params()`/`exec_raw_params()` with `$N` placeholders, so
//! they behave identically on the Postgres store and the in-memory
//! fallback. Risk recomputation always reads the full issue set for a
//! road and applies the aggregator in one place; there is no
//! incremental-delta path that could drift from stored state.

use moosicbox_json_utils::database::ToValue as _;
use road_risk_database_models::{IssueRow, NewIssue, NewRoad, RoadRow};
use switchy_database::{Database, DatabaseValue};

use crate::DbError;

/// Inserts a batch of classified roads.
///
/// Duplicate handling is left to the store via `ON CONFLICT DO NOTHING`.
/// Every road starts with `current_risk = baseline_risk`; the batch
/// recomputation after ingest re-derives it from whatever issues already
/// exist.
///
/// # Errors
///
/// Returns [`DbError`] if any database operation fails.
pub async fn insert_roads(db: &dyn Database, roads: &[NewRoad]) -> Result<u64, DbError> {
    let mut inserted = 0u64;

    for road in roads {
        let result = db
            .exec_raw_params(
                "INSERT INTO roads (name, highway, road_class, geom, baseline_risk, current_risk)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 ON CONFLICT DO NOTHING",
                &[
                    road.name
                        .as_ref()
                        .map_or(DatabaseValue::Null, |n| DatabaseValue::String(n.clone())),
                    road.highway
                        .as_ref()
                        .map_or(DatabaseValue::Null, |h| DatabaseValue::String(h.clone())),
                    DatabaseValue::String(road.road_class.to_string()),
                    DatabaseValue::String(road.geom.clone()),
                    DatabaseValue::Real64(road.baseline_risk),
                    DatabaseValue::Real64(road.baseline_risk),
                ],
            )
            .await?;

        inserted += result;
    }

    Ok(inserted)
}

/// Returns whether a road with the given ID exists.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn road_exists(db: &dyn Database, road_id: i64) -> Result<bool, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT id FROM roads WHERE id = $1",
            &[DatabaseValue::Int64(road_id)],
        )
        .await?;

    Ok(!rows.is_empty())
}

/// Inserts a new issue report.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn insert_issue(db: &dyn Database, issue: &NewIssue) -> Result<(), DbError> {
    db.exec_raw_params(
        "INSERT INTO road_issues (road_id, issue_type, severity, geom, photo_path)
         VALUES ($1, $2, $3, $4, $5)",
        &[
            DatabaseValue::Int64(issue.road_id),
            DatabaseValue::String(issue.issue_type.clone()),
            DatabaseValue::Int32(i32::from(issue.severity.value())),
            DatabaseValue::String(issue.geom.clone()),
            issue
                .photo_path
                .as_ref()
                .map_or(DatabaseValue::Null, |p| DatabaseValue::String(p.clone())),
        ],
    )
    .await?;

    Ok(())
}

/// Returns the maximum severity across all issues for a road, or `None`
/// if the road has no issues.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn max_severity_for_road(
    db: &dyn Database,
    road_id: i64,
) -> Result<Option<i64>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT MAX(severity) as max_severity FROM road_issues WHERE road_id = $1",
            &[DatabaseValue::Int64(road_id)],
        )
        .await?;

    let Some(row) = rows.first() else {
        return Ok(None);
    };

    let max_severity: Option<i64> = row.to_value("max_severity").unwrap_or(None);
    Ok(max_severity)
}

/// Recomputes and persists `current_risk` for a single road from the
/// full set of its issues.
///
/// Invoked after each durably recorded report. Callers must serialize
/// "insert issue, then recompute" for a given road so the recomputation
/// observes a consistent snapshot.
///
/// # Errors
///
/// Returns [`DbError`] if the road does not exist or a database
/// operation fails.
pub async fn recompute_road_risk(db: &dyn Database, road_id: i64) -> Result<f64, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT baseline_risk FROM roads WHERE id = $1",
            &[DatabaseValue::Int64(road_id)],
        )
        .await?;

    let row = rows.first().ok_or_else(|| DbError::Conversion {
        message: format!("Road not found: {road_id}"),
    })?;

    let baseline_risk: f64 = row.to_value("baseline_risk").map_err(|e| DbError::Conversion {
        message: format!("Failed to parse baseline_risk: {e}"),
    })?;

    let max_severity = max_severity_for_road(db, road_id).await?;
    let current_risk = road_risk_risk::compute_current_risk(baseline_risk, max_severity);

    db.exec_raw_params(
        "UPDATE roads SET current_risk = $2 WHERE id = $1",
        &[
            DatabaseValue::Int64(road_id),
            DatabaseValue::Real64(current_risk),
        ],
    )
    .await?;

    Ok(current_risk)
}

/// Recomputes and persists `current_risk` for every road, grouped by
/// road in a single pass. Used after batch ingest.
///
/// # Errors
///
/// Returns [`DbError`] if any database operation fails.
pub async fn recompute_all_road_risks(db: &dyn Database) -> Result<u64, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT r.id, r.baseline_risk, MAX(ri.severity) as max_severity
             FROM roads r
             LEFT JOIN road_issues ri ON r.id = ri.road_id
             GROUP BY r.id, r.baseline_risk",
            &[],
        )
        .await?;

    let mut updated = 0u64;

    for row in &rows {
        let id: i64 = row.to_value("id").unwrap_or(0);
        let baseline_risk: f64 = row.to_value("baseline_risk").unwrap_or(0.0);
        let max_severity: Option<i64> = row.to_value("max_severity").unwrap_or(None);

        let current_risk = road_risk_risk::compute_current_risk(baseline_risk, max_severity);

        db.exec_raw_params(
            "UPDATE roads SET current_risk = $2 WHERE id = $1",
            &[DatabaseValue::Int64(id), DatabaseValue::Real64(current_risk)],
        )
        .await?;

        updated += 1;
    }

    Ok(updated)
}

/// Queries all roads with the worst reported severity joined in.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn query_roads(db: &dyn Database) -> Result<Vec<RoadRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT r.id, r.name, r.highway, r.road_class,
                    r.baseline_risk, r.current_risk, r.geom,
                    MAX(ri.severity) as max_severity
             FROM roads r
             LEFT JOIN road_issues ri ON r.id = ri.road_id
             GROUP BY r.id, r.name, r.highway, r.road_class,
                      r.baseline_risk, r.current_risk, r.geom
             ORDER BY r.id",
            &[],
        )
        .await?;

    let mut roads = Vec::with_capacity(rows.len());

    for row in &rows {
        roads.push(RoadRow {
            id: row.to_value("id").unwrap_or(0),
            name: row.to_value("name").unwrap_or(None),
            highway: row.to_value("highway").unwrap_or(None),
            road_class: row.to_value("road_class").unwrap_or_default(),
            baseline_risk: row.to_value("baseline_risk").unwrap_or(0.0),
            current_risk: row.to_value("current_risk").unwrap_or(0.0),
            geom: row.to_value("geom").unwrap_or_default(),
            max_severity: row.to_value("max_severity").unwrap_or(None),
        });
    }

    Ok(roads)
}

/// Queries all issue reports in creation order.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn query_issues(db: &dyn Database) -> Result<Vec<IssueRow>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT id, road_id, issue_type, severity, geom, photo_path, created_at
             FROM road_issues
             ORDER BY id",
            &[],
        )
        .await?;

    let mut issues = Vec::with_capacity(rows.len());

    for row in &rows {
        let created_at_naive: chrono::NaiveDateTime =
            row.to_value("created_at").unwrap_or_default();
        let created_at = chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(
            created_at_naive,
            chrono::Utc,
        );

        issues.push(IssueRow {
            id: row.to_value("id").unwrap_or(0),
            road_id: row.to_value("road_id").unwrap_or(0),
            issue_type: row.to_value("issue_type").unwrap_or_default(),
            severity: row.to_value("severity").unwrap_or(0),
            geom: row.to_value("geom").unwrap_or_default(),
            photo_path: row.to_value("photo_path").unwrap_or(None),
            created_at,
        });
    }

    Ok(issues)
}
