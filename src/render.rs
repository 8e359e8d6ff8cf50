//! Standalone HTML map of labelled points, drawn with Leaflet

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::cluster::{Label, Point};
use crate::config::MapStyle;
use crate::error::Result;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

#[derive(Debug, Serialize)]
struct Marker<'a> {
    latitude: f64,
    longitude: f64,
    color: &'a str,
    popup: String,
}

/// Renders one circle marker per point, colored by label
///
/// # Panics
///
/// Panics if `points` and `labels` differ in length
pub fn render_map(points: &[Point], labels: &[Label], style: &MapStyle) -> Result<String> {
    assert_eq!(points.len(), labels.len(), "one label per point");

    let markers: Vec<Marker> = points
        .iter()
        .zip(labels)
        .map(|(p, &label)| Marker {
            latitude: p.latitude,
            longitude: p.longitude,
            color: style.palette.color(label),
            popup: label.to_string(),
        })
        .collect();

    // keep "</script>" in data from closing the script element
    let markers = serde_json::to_string(&markers)?.replace("</", "<\\/");

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8"/>
<title>Hotspot clusters</title>
<link rel="stylesheet" href="{css}"/>
<script src="{js}"></script>
<style>html, body, #map {{ height: 100%; width: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const map = L.map("map").setView([{lat}, {lon}], {zoom});
L.tileLayer("{tiles}", {{
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
const markers = {markers};
for (const m of markers) {{
  L.circleMarker([m.latitude, m.longitude], {{
    radius: {radius},
    color: m.color,
    fill: true,
    fillOpacity: {opacity}
  }}).bindPopup(m.popup).addTo(map);
}}
</script>
</body>
</html>
"#,
        css = LEAFLET_CSS,
        js = LEAFLET_JS,
        lat = style.center.latitude,
        lon = style.center.longitude,
        zoom = style.zoom,
        tiles = TILE_URL,
        markers = markers,
        radius = style.marker_radius,
        opacity = style.fill_opacity,
    );

    Ok(html)
}

pub fn write_map(path: &Path, points: &[Point], labels: &[Label], style: &MapStyle) -> Result<()> {
    fs::write(path, render_map(points, labels, style)?)?;
    Ok(())
}
