use axum::Json;
use axum::http::{header, StatusCode};

/// Separator between points in the summarization service's output.
pub const POINT_DELIMITER: &str = "\n- ";

/// Splits a summary into its points. The split leaves the first point's bullet in place,
/// so a leading "- " is stripped from it.
pub fn split_points(summary: &str) -> Vec<String> {
    let mut points: Vec<String> = summary.split(POINT_DELIMITER).map(str::to_string).collect();

    if let Some(first) = points.first_mut() {
        if let Some(rest) = first.strip_prefix("- ") {
            *first = rest.to_string();
        }
    }

    points
}

pub fn success(
    points: Vec<String>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], Json<Vec<String>>) {
    (
        StatusCode::OK,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(points),
    )
}
