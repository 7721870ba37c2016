//! Map view settings and legend

use axum::{extract::State, Json};
use roadsense_common::config::MapConfig;
use roadsense_common::{Category, DisplayColor};
use serde::Serialize;

use crate::AppState;

/// One legend row
#[derive(Debug, Serialize)]
pub struct LegendEntry {
    pub category: Category,
    pub label: &'static str,
    pub color: DisplayColor,
    /// Whether the row is drawn in the on-map legend box
    pub shown: bool,
}

/// GET /api/map-config
pub async fn get_map_config(State(state): State<AppState>) -> Json<MapConfig> {
    Json(state.map.clone())
}

/// GET /api/legend
///
/// Built from the same category → color function the markers use.
pub async fn get_legend() -> Json<Vec<LegendEntry>> {
    Json(
        Category::ALL
            .iter()
            .map(|&category| LegendEntry {
                category,
                label: category.legend_label(),
                color: category.color(),
                shown: category.in_legend(),
            })
            .collect(),
    )
}
