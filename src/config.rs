use std::collections::HashMap;
use serde::Deserialize;
use std::path::Path;
use std::fs;
use anyhow::{Context, Result};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Region label -> [lat, lng]. Exact-match keys, no normalization.
    pub regions: HashMap<String, [f64; 2]>,
    pub palette: PaletteConfig,
    pub map: MapConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PaletteConfig {
    /// Ordered palette, also the target set of the hash fallback.
    pub colors: Vec<String>,
    /// Known category labels with dedicated colors; takes precedence
    /// over the hash fallback.
    pub products: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MapConfig {
    pub center: [f64; 2],
    pub zoom: u8,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            regions: default_regions(),
            palette: PaletteConfig::default(),
            map: MapConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            products: default_products(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            // Center of India
            center: [20.5937, 78.9629],
            zoom: 5,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

fn default_regions() -> HashMap<String, [f64; 2]> {
    [
        // Major cities
        ("Delhi", [28.6139, 77.2090]),
        ("New Delhi", [28.6139, 77.2090]),
        ("Mumbai", [19.0760, 72.8777]),
        ("Bangalore", [12.9716, 77.5946]),
        ("Bengaluru", [12.9716, 77.5946]),
        ("Hyderabad", [17.3850, 78.4867]),
        ("Kolkata", [22.5726, 88.3639]),
        ("Chennai", [13.0827, 80.2707]),
        ("Pune", [18.5204, 73.8567]),
        ("Ahmedabad", [23.0225, 72.5714]),
        ("Jaipur", [26.9124, 75.7873]),
        ("Surat", [21.1702, 72.8311]),
        ("Lucknow", [26.8467, 80.9462]),
        ("Kanpur", [26.4499, 80.3319]),
        ("Nagpur", [21.1458, 79.0882]),
        ("Indore", [22.7196, 75.8577]),
        ("Thane", [19.2183, 72.9781]),
        ("Bhopal", [23.2599, 77.4126]),
        ("Visakhapatnam", [17.6868, 83.2185]),
        ("Patna", [25.5941, 85.1376]),
        ("Vadodara", [22.3072, 73.1812]),
        ("Ghaziabad", [28.6692, 77.4538]),
        ("Ludhiana", [30.9010, 75.8573]),
        ("Agra", [27.1767, 78.0081]),
        ("Nashik", [19.9975, 73.7898]),
        // Cardinal regions map to their main hub
        ("North", [28.6139, 77.2090]), // Delhi
        ("South", [12.9716, 77.5946]), // Bangalore
        ("East", [22.5726, 88.3639]),  // Kolkata
        ("West", [19.0760, 72.8777]),  // Mumbai
    ]
    .into_iter()
    .map(|(name, coord)| (name.to_string(), coord))
    .collect()
}

fn default_colors() -> Vec<String> {
    [
        "#ef4444", // Red
        "#3b82f6", // Blue
        "#f59e0b", // Amber
        "#10b981", // Emerald
        "#8b5cf6", // Violet
        "#ec4899", // Pink
        "#6366f1", // Indigo
        "#14b8a6", // Teal
        "#f97316", // Deep Orange
        "#64748b", // Slate
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_products() -> HashMap<String, String> {
    [
        ("Smartphone", "#ef4444"),
        ("Laptop", "#3b82f6"),
        ("Headphones", "#f59e0b"),
        ("Smartwatch", "#10b981"),
        ("Tablet", "#8b5cf6"),
        ("Camera", "#ec4899"),
        ("Printer", "#6366f1"),
        ("Monitor", "#14b8a6"),
        ("Speaker", "#f97316"),
        ("default", "#64748b"),
    ]
    .into_iter()
    .map(|(name, color)| (name.to_string(), color.to_string()))
    .collect()
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }

    /// Falls back to the built-in tables when no config file is present.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            println!("No config file at {:?}, using built-in tables", path);
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_match_reference_data() {
        let config = AppConfig::default();
        assert_eq!(config.regions["North"], [28.6139, 77.2090]);
        assert_eq!(config.regions["South"], [12.9716, 77.5946]);
        assert_eq!(config.palette.products["Laptop"], "#3b82f6");
        assert_eq!(config.palette.colors.len(), 10);
        assert_eq!(config.map.center, [20.5937, 78.9629]);
    }

    #[test]
    fn partial_toml_overrides_only_named_sections() {
        let config: AppConfig = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        // Unnamed sections keep the built-in tables.
        assert_eq!(config.regions.len(), 29);
        assert_eq!(config.palette.colors.len(), 10);
    }

    #[test]
    fn custom_region_table_replaces_builtin() {
        let config: AppConfig =
            toml::from_str("[regions]\n\"Springfield\" = [39.7817, -89.6501]\n").unwrap();
        assert_eq!(config.regions.len(), 1);
        assert_eq!(config.regions["Springfield"], [39.7817, -89.6501]);
    }
}
