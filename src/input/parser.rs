use anyhow::{Context, Result, bail};

use crate::geometry::{FieldPolygon, Projector};

/// Sample football field boundary as (lat, lon), used when no input is given
pub const DEFAULT_FIELD: [(f64, f64); 8] = [
    (43.555830, 27.826090),
    (43.555775, 27.826100),
    (43.555422, 27.826747),
    (43.555425, 27.826786),
    (43.556182, 27.827557),
    (43.556217, 27.827538),
    (43.556559, 27.826893),
    (43.556547, 27.826833),
];

/// Parse "lat, lon" pairs, one per line
///
/// # Format
/// - Values separated by a comma and/or whitespace
/// - Blank lines and lines starting with `#` are skipped
/// - Repeating the first pair at the end to close the ring is optional
pub fn parse_coordinates(text: &str) -> Result<Vec<(f64, f64)>> {
    let mut coords = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no = index + 1;
        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if fields.len() != 2 {
            bail!(
                "Line {}: expected \"lat, lon\", found {:?}",
                line_no,
                line
            );
        }

        let lat: f64 = fields[0]
            .parse()
            .with_context(|| format!("Line {}: invalid latitude {:?}", line_no, fields[0]))?;
        let lon: f64 = fields[1]
            .parse()
            .with_context(|| format!("Line {}: invalid longitude {:?}", line_no, fields[1]))?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            bail!("Line {}: coordinate ({}, {}) out of range", line_no, lat, lon);
        }

        coords.push((lat, lon));
    }

    Ok(coords)
}

/// Project a geodetic ring into a planar field polygon
///
/// The projector is centered on the vertex average of `coords` and is
/// returned so results can be mapped back.
pub fn field_from_geodetic(coords: &[(f64, f64)]) -> Result<(FieldPolygon, Projector)> {
    let projector = Projector::centered_on(coords).context("No field coordinates given")?;
    let polygon = FieldPolygon::new(projector.project_points(coords))
        .context("Field boundary is not a usable polygon")?;
    Ok((polygon, projector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PlanarProjection;

    #[test]
    fn test_parse_coordinates() {
        let text = "# field corners\n43.555830, 27.826090\n\n43.555775 27.826100\n  43.555422,27.826747  \n";
        let coords = parse_coordinates(text).unwrap();
        assert_eq!(
            coords,
            vec![
                (43.555830, 27.826090),
                (43.555775, 27.826100),
                (43.555422, 27.826747)
            ]
        );
    }

    #[test]
    fn test_parse_reports_line_number() {
        let err = parse_coordinates("43.5, 27.8\n43.6, east\n").unwrap_err();
        assert!(err.to_string().contains("Line 2"));

        let err = parse_coordinates("43.5, 27.8, 1.0\n").unwrap_err();
        assert!(err.to_string().contains("Line 1"));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(parse_coordinates("95.0, 27.8\n").is_err());
    }

    #[test]
    fn test_default_field_projects() {
        let (polygon, projector) = field_from_geodetic(&DEFAULT_FIELD).unwrap();
        assert_eq!(polygon.len(), 8);
        // Centered projection puts the vertex average at the origin
        let c = polygon.centroid();
        assert!(c.x.abs() < 1e-6 && c.y.abs() < 1e-6);
        let (lat, lon) = projector.to_geodetic(c);
        assert!((lat - 43.5559).abs() < 1e-3);
        assert!((lon - 27.8268).abs() < 1e-3);
    }

    #[test]
    fn test_closed_input_is_normalized() {
        let mut closed = DEFAULT_FIELD.to_vec();
        closed.push(DEFAULT_FIELD[0]);
        let (polygon, _) = field_from_geodetic(&closed).unwrap();
        assert_eq!(polygon.len(), 8);

        // The repeated vertex does not pull the frame off the vertex average
        let c = polygon.centroid();
        assert!(c.x.abs() < 1e-6 && c.y.abs() < 1e-6);
    }

    #[test]
    fn test_too_few_points() {
        assert!(field_from_geodetic(&[]).is_err());
        assert!(field_from_geodetic(&[(43.5, 27.8), (43.6, 27.9)]).is_err());
    }
}
