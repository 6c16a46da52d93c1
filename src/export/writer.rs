use anyhow::{Context, Result};
use geo::Coord;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::record::{NamedRecord, RecordGeometry};
use crate::geometry::PlanarProjection;

/// Convert planar records to a GeoJSON feature collection
///
/// Positions are written in GeoJSON order: [lon, lat].
pub fn to_feature_collection(
    records: &[NamedRecord],
    projection: &impl PlanarProjection,
) -> FeatureCollection {
    let position = |p: Coord<f64>| {
        let (lat, lon) = projection.to_geodetic(p);
        vec![lon, lat]
    };

    let features = records
        .iter()
        .map(|record| {
            let value = match &record.geometry {
                RecordGeometry::Line(points) => {
                    Value::LineString(points.iter().map(|&p| position(p)).collect())
                }
                RecordGeometry::Point(p) => Value::Point(position(*p)),
            };

            let mut properties = JsonObject::new();
            properties.insert("name".to_string(), record.name.clone().into());
            properties.insert("kind".to_string(), record.kind.clone().into());

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(value)),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Write records to a GeoJSON file
///
/// # Arguments
/// * `path` - Output file path
/// * `records` - Planar records in meters
/// * `projection` - Maps the planar frame back to WGS84
pub fn write_geojson(
    path: &Path,
    records: &[NamedRecord],
    projection: &impl PlanarProjection,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create GeoJSON file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let collection = to_feature_collection(records, projection);
    serde_json::to_writer_pretty(&mut writer, &collection)
        .context("Failed to serialize GeoJSON")?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}
