use crate::config::AppConfig;
use crate::palette::Palette;
use crate::types::{LegendEntry, MapLayer, MapPoint, Marker, MarkerStyle};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const MIN_RADIUS: f64 = 8.0;
const RADIUS_SPAN: f64 = 20.0;

/// Largest unit count in the point set, floored at 1 so the radius
/// denominator is never zero.
pub fn max_units(points: &[MapPoint]) -> u64 {
    points.iter().map(|p| p.units).max().unwrap_or(0).max(1)
}

/// Marker radius in display pixels. [8, 28] for units <= max_units,
/// non-decreasing in units.
pub fn radius(units: u64, max_units: u64) -> f64 {
    MIN_RADIUS + (units as f64 / max_units as f64) * RADIUS_SPAN
}

/// Thousands-separated decimal rendering, e.g. 1234567 -> "1,234,567".
pub fn format_units(units: u64) -> String {
    let digits = units.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Pair every placed point with its display attributes. The unit maximum is
/// taken over the whole set once, so radii are comparable across the map.
pub fn build_markers(points: &[MapPoint], palette: &Palette) -> Vec<Marker> {
    let max = max_units(points);

    points
        .iter()
        .map(|point| {
            let color = palette.color_for(&point.product).to_string();
            Marker {
                region: point.region.clone(),
                category: point.product.clone(),
                units: point.units,
                units_display: format_units(point.units),
                lat: point.lat,
                lng: point.lng,
                radius: radius(point.units, max),
                label: format!("{}: {}", point.product, point.units),
                color,
            }
        })
        .collect()
}

/// Deduplicated (category, color) pairs in first-occurrence order.
pub fn build_legend(points: &[MapPoint], palette: &Palette) -> Vec<LegendEntry> {
    let mut seen = HashSet::new();
    let mut legend = Vec::new();

    for point in points {
        if seen.insert(point.product.as_str()) {
            legend.push(LegendEntry {
                category: point.product.clone(),
                color: palette.color_for(&point.product).to_string(),
            });
        }
    }

    legend
}

pub fn build_layer(config: &AppConfig, points: &[MapPoint], palette: &Palette) -> MapLayer {
    MapLayer {
        center: config.map.center,
        zoom: config.map.zoom,
        style: MarkerStyle::default(),
        markers: build_markers(points, palette),
        legend: build_legend(points, palette),
    }
}

pub fn write_layer(path: &Path, layer: &MapLayer) -> Result<()> {
    let json = serde_json::to_string_pretty(layer).context("Failed to serialize map layer")?;
    fs::write(path, json).with_context(|| format!("Failed to write map layer: {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaletteConfig;
    use crate::layout::AGGREGATE_LABEL;

    fn point(product: &str, units: u64) -> MapPoint {
        MapPoint {
            region: "North".to_string(),
            product: product.to_string(),
            units,
            lat: 28.6139,
            lng: 77.2090,
        }
    }

    #[test]
    fn radius_bounds_and_monotonicity() {
        assert_eq!(radius(0, 100), 8.0);
        assert_eq!(radius(100, 100), 28.0);
        assert_eq!(radius(50, 100), 18.0);

        let mut last = 0.0;
        for units in 0..=100 {
            let r = radius(units, 100);
            assert!(r >= last);
            last = r;
        }
    }

    #[test]
    fn max_units_never_below_one() {
        assert_eq!(max_units(&[]), 1);
        assert_eq!(max_units(&[point("Laptop", 0)]), 1);
        assert_eq!(max_units(&[point("Laptop", 3), point("Camera", 7)]), 7);
    }

    #[test]
    fn single_point_gets_full_radius() {
        let palette = Palette::from_config(&PaletteConfig::default());
        let markers = build_markers(&[point(AGGREGATE_LABEL, 500)], &palette);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].radius, 28.0);
    }

    #[test]
    fn markers_carry_labels_and_colors() {
        let palette = Palette::from_config(&PaletteConfig::default());
        let markers = build_markers(&[point("Laptop", 100), point("Smartphone", 50)], &palette);

        assert_eq!(markers[0].label, "Laptop: 100");
        assert_eq!(markers[0].color, "#3b82f6");
        assert_eq!(markers[0].radius, 28.0);

        assert_eq!(markers[1].label, "Smartphone: 50");
        assert_eq!(markers[1].color, "#ef4444");
        assert_eq!(markers[1].radius, 18.0);
    }

    #[test]
    fn unit_formatting_inserts_separators() {
        assert_eq!(format_units(0), "0");
        assert_eq!(format_units(999), "999");
        assert_eq!(format_units(1000), "1,000");
        assert_eq!(format_units(1234567), "1,234,567");
    }

    #[test]
    fn legend_dedupes_in_first_occurrence_order() {
        let palette = Palette::from_config(&PaletteConfig::default());
        let points = vec![
            point("Laptop", 10),
            point("Camera", 5),
            point("Laptop", 3),
            point("Widget", 2),
        ];
        let legend = build_legend(&points, &palette);

        let categories: Vec<&str> = legend.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(categories, ["Laptop", "Camera", "Widget"]);
        assert_eq!(legend[0].color, "#3b82f6");
    }

    #[test]
    fn same_category_across_regions_shares_a_color() {
        let palette = Palette::from_config(&PaletteConfig::default());
        let mut north = point("Widget", 10);
        let mut south = point("Widget", 20);
        north.region = "North".to_string();
        south.region = "South".to_string();

        let markers = build_markers(&[north, south], &palette);
        assert_eq!(markers[0].color, markers[1].color);
    }

    #[test]
    fn empty_point_set_builds_empty_layer() {
        let config = AppConfig::default();
        let palette = Palette::from_config(&config.palette);
        let layer = build_layer(&config, &[], &palette);

        assert!(layer.markers.is_empty());
        assert!(layer.legend.is_empty());
        assert_eq!(layer.center, [20.5937, 78.9629]);
        assert_eq!(layer.zoom, 5);
    }
}
