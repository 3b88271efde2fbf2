use crate::types::{ProductDemand, RegionDemand};
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load aggregated demand records, dispatching on the file extension.
/// JSON carries the records directly; CSV is flat `region,product,units`
/// rows grouped back into per-region records.
pub fn load_records(path: &Path) -> Result<Vec<RegionDemand>> {
    println!("Loading demand records from {:?}...", path);

    let extension = path.extension()
        .and_then(|e| e.to_str())
        .map(|s: &str| s.to_lowercase())
        .ok_or_else(|| anyhow!("Input file has no extension"))?;

    let records = match extension.as_str() {
        "json" => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open JSON file: {:?}", path))?;
            read_json(BufReader::new(file))?
        }
        "csv" => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open CSV file: {:?}", path))?;
            read_csv(file)?
        }
        _ => return Err(anyhow!("Unsupported input format: {}", extension)),
    };

    println!("Loaded {} demand records", records.len());

    Ok(records)
}

fn read_json<R: Read>(reader: R) -> Result<Vec<RegionDemand>> {
    serde_json::from_reader(reader).context("Failed to parse demand records JSON")
}

fn read_csv<R: Read>(reader: R) -> Result<Vec<RegionDemand>> {
    let mut rdr = ReaderBuilder::new().from_reader(reader);
    let headers = rdr.headers()?.clone();

    let region_idx = headers.iter().position(|h| h == "region")
        .ok_or_else(|| anyhow!("Column 'region' not found in CSV"))?;
    let product_idx = headers.iter().position(|h| h == "product")
        .ok_or_else(|| anyhow!("Column 'product' not found in CSV"))?;
    let units_idx = headers.iter().position(|h| h == "units")
        .ok_or_else(|| anyhow!("Column 'units' not found in CSV"))?;

    // Group rows back into per-region records, keeping first-appearance
    // order. A region's total demand is the sum of all its rows; rows with
    // a blank product contribute to the aggregate only.
    let mut order: Vec<String> = Vec::new();
    let mut by_region: HashMap<String, RegionDemand> = HashMap::new();

    for result in rdr.records() {
        let record = result?;
        let region = record.get(region_idx).unwrap_or("").trim().to_string();

        if region.is_empty() { continue; }

        let product = record.get(product_idx).unwrap_or("").trim().to_string();
        let units: u64 = record.get(units_idx).unwrap_or("0").trim().parse().unwrap_or(0);

        let entry = by_region.entry(region.clone()).or_insert_with(|| {
            order.push(region.clone());
            RegionDemand {
                region: region.clone(),
                demand: 0,
                products: None,
            }
        });

        entry.demand += units;
        if !product.is_empty() {
            entry
                .products
                .get_or_insert_with(Vec::new)
                .push(ProductDemand { product, units });
        }
    }

    Ok(order
        .into_iter()
        .filter_map(|region| by_region.remove(&region))
        .collect())
}
