use serde::{Deserialize, Serialize};

/// One row of aggregated input: total demand for a region, optionally split
/// per product. `demand` is the fallback figure when no breakdown exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionDemand {
    pub region: String,
    #[serde(default)]
    pub demand: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductDemand>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductDemand {
    pub product: String,
    pub units: u64,
}

/// A single placed category point. The full set is regenerated on every
/// layout pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub region: String,
    pub product: String,
    pub units: u64,
    pub lat: f64,
    pub lng: f64,
}

/// A render-ready marker: a placed point plus its display attributes.
#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub region: String,
    pub category: String,
    pub units: u64,
    /// Thousands-separated count for the detail panel.
    pub units_display: String,
    pub lat: f64,
    pub lng: f64,
    pub radius: f64,
    pub color: String,
    /// Hover text, "<category>: <units>".
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub category: String,
    pub color: String,
}

/// Stroke/fill constants applied uniformly to every marker.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerStyle {
    pub fill_opacity: f64,
    pub weight: u32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            fill_opacity: 0.7,
            weight: 1,
        }
    }
}

/// The generate artifact and the /api/layout response body.
#[derive(Debug, Clone, Serialize)]
pub struct MapLayer {
    pub center: [f64; 2],
    pub zoom: u8,
    pub style: MarkerStyle,
    pub markers: Vec<Marker>,
    pub legend: Vec<LegendEntry>,
}
