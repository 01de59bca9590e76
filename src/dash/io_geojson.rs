// Country boundaries in the GeoJSON format.

use serde::Deserialize;
use serde_json::Value as JSValue;

use crate::dash::*;

#[derive(Debug, Deserialize)]
struct GeoJsonFeatureCollection {
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    #[serde(default)]
    properties: JSValue,
    geometry: Option<GeoJsonGeometry>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonGeometry {
    #[serde(rename = "type")]
    ty: String,
    coordinates: JSValue,
}

/// A closed line of (longitude, latitude) points.
pub type Ring = Vec<(f64, f64)>;

/// A named region of the map.
///
/// Each polygon is an outer ring followed by its holes.
#[derive(PartialEq, Debug, Clone)]
pub struct Boundary {
    pub name: String,
    pub polygons: Vec<Vec<Ring>>,
}

pub fn read_boundaries(path: &str) -> DashResult<Vec<Boundary>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    parse_boundaries(&contents, path)
}

pub fn parse_boundaries(contents: &str, path: &str) -> DashResult<Vec<Boundary>> {
    let fc: GeoJsonFeatureCollection =
        serde_json::from_str(contents).context(ParsingGeoJsonSnafu { path })?;
    let mut res: Vec<Boundary> = Vec::with_capacity(fc.features.len());
    for (idx, f) in fc.features.into_iter().enumerate() {
        let name = match f.properties.get("name").and_then(|n| n.as_str()) {
            Some(n) => n.to_string(),
            None => {
                warn!("parse_boundaries: feature {} has no name, skipping", idx);
                continue;
            }
        };
        let polygons = match f.geometry {
            Some(g) if g.ty == "Polygon" => vec![read_polygon(&g.coordinates, &name)?],
            Some(g) if g.ty == "MultiPolygon" => g
                .coordinates
                .as_array()
                .context(InvalidGeometrySnafu { name: name.as_str() })?
                .iter()
                .map(|p| read_polygon(p, &name))
                .collect::<DashResult<Vec<_>>>()?,
            Some(g) => {
                debug!("parse_boundaries: {:?}: ignoring geometry {:?}", name, g.ty);
                vec![]
            }
            None => vec![],
        };
        res.push(Boundary { name, polygons });
    }
    debug!("parse_boundaries: {:?}: {} regions", path, res.len());
    Ok(res)
}

fn read_polygon(js: &JSValue, name: &str) -> DashResult<Vec<Ring>> {
    let rings = js.as_array().context(InvalidGeometrySnafu { name })?;
    let mut res: Vec<Ring> = Vec::with_capacity(rings.len());
    for ring in rings {
        let points = ring.as_array().context(InvalidGeometrySnafu { name })?;
        let mut r: Ring = Vec::with_capacity(points.len());
        for p in points {
            // Positions may carry an altitude after the longitude and latitude.
            let coords = p.as_array().context(InvalidGeometrySnafu { name })?;
            match (
                coords.first().and_then(|x| x.as_f64()),
                coords.get(1).and_then(|x| x.as_f64()),
            ) {
                (Some(lon), Some(lat)) => r.push((lon, lat)),
                _ => return InvalidGeometrySnafu { name }.fail(),
            }
        }
        res.push(r);
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygons_and_multipolygons() {
        let js = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "name": "Chad" },
                  "geometry": { "type": "Polygon", "coordinates": [[[14.0, 8.0], [24.0, 8.0], [24.0, 23.0], [14.0, 8.0]]] } },
                { "type": "Feature", "properties": { "name": "Islands" },
                  "geometry": { "type": "MultiPolygon", "coordinates": [
                      [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0, 12.5], [0.0, 0.0]]],
                      [[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 5.0]]]
                  ] } },
                { "type": "Feature", "properties": { "iso": "XX" },
                  "geometry": { "type": "Polygon", "coordinates": [] } },
                { "type": "Feature", "properties": { "name": "Nowhere" }, "geometry": null }
            ]
        }"#;
        let b = parse_boundaries(js, "test.geojson").unwrap();
        let names: Vec<&str> = b.iter().map(|x| x.name.as_str()).collect();
        assert_eq!(names, vec!["Chad", "Islands", "Nowhere"]);
        assert_eq!(b[0].polygons.len(), 1);
        assert_eq!(b[0].polygons[0][0][1], (24.0, 8.0));
        assert_eq!(b[1].polygons.len(), 2);
        assert_eq!(b[1].polygons[0][0][2], (1.0, 1.0));
        assert!(b[2].polygons.is_empty());
    }

    #[test]
    fn broken_coordinates_name_the_region() {
        let js = r#"{ "features": [
            { "properties": { "name": "Chad" },
              "geometry": { "type": "Polygon", "coordinates": [[["a", 8.0]]] } }
        ] }"#;
        let err = parse_boundaries(js, "test.geojson").unwrap_err();
        assert_eq!(err.to_string(), "Invalid geometry for region Chad");
    }
}
