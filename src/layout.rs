use crate::config::AppConfig;
use crate::types::{MapPoint, RegionDemand};
use geo::Point;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

/// Category label given to a region's single fallback point when the input
/// carries no per-product breakdown.
pub const AGGREGATE_LABEL: &str = "Total Code";

/// Region label -> base coordinate. Case-sensitive exact match; a miss means
/// the region's records are excluded from the layout entirely.
pub struct CoordinateTable {
    coords: HashMap<String, Point<f64>>,
}

impl CoordinateTable {
    pub fn from_config(config: &AppConfig) -> Self {
        let coords = config
            .regions
            .iter()
            .map(|(name, [lat, lng])| (name.clone(), Point::new(*lng, *lat)))
            .collect();
        Self { coords }
    }

    pub fn resolve(&self, region: &str) -> Option<Point<f64>> {
        self.coords.get(region).copied()
    }
}

/// Expand demand records into placed category points.
///
/// A region with a product breakdown gets one point per product, spiraled
/// around the base coordinate: the angular step divides the circle among at
/// most 8 entries (beyond that, entries re-use angles but keep moving
/// outward, with a fixed phase nudge past index 8), and the radial offset
/// grows linearly with the index. A region without a breakdown collapses to
/// one aggregate point at the unmodified base coordinate. Unknown regions
/// produce nothing.
pub fn layout(records: &[RegionDemand], table: &CoordinateTable) -> Vec<MapPoint> {
    let mut points = Vec::new();

    for record in records {
        let base = match table.resolve(&record.region) {
            Some(p) => p,
            None => continue,
        };

        match &record.products {
            Some(products) if !products.is_empty() => {
                let divisor = products.len().min(8) as f64;
                for (i, prod) in products.iter().enumerate() {
                    let nudge = if i > 8 { 0.5 } else { 0.0 };
                    let angle = i as f64 * (2.0 * PI / divisor) + nudge;
                    let radius_offset = 0.5 + i as f64 * 0.15;

                    let lat_offset = angle.cos() * (1.0 + radius_offset);
                    let lng_offset = angle.sin() * (1.0 + radius_offset);

                    points.push(MapPoint {
                        region: record.region.clone(),
                        product: prod.product.clone(),
                        units: prod.units,
                        lat: base.y() + lat_offset,
                        lng: base.x() + lng_offset,
                    });
                }
            }
            _ => {
                points.push(MapPoint {
                    region: record.region.clone(),
                    product: AGGREGATE_LABEL.to_string(),
                    units: record.demand,
                    lat: base.y(),
                    lng: base.x(),
                });
            }
        }
    }

    points
}

/// Memoizes the last layout pass keyed on a content hash of the input
/// records. The coordinate table is load-time config, so the records alone
/// key the cache. Purely an optimization; a hit returns a clone of the
/// previous output.
#[derive(Default)]
pub struct LayoutCache {
    last: Option<(u64, Vec<MapPoint>)>,
}

impl LayoutCache {
    pub fn layout(&mut self, records: &[RegionDemand], table: &CoordinateTable) -> Vec<MapPoint> {
        let mut hasher = DefaultHasher::new();
        records.hash(&mut hasher);
        let key = hasher.finish();

        if let Some((cached_key, cached)) = &self.last {
            if *cached_key == key {
                return cached.clone();
            }
        }

        let points = layout(records, table);
        self.last = Some((key, points.clone()));
        points
    }
}
