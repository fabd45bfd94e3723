//! Renders classified places as colored markers on a standalone Leaflet map.

use crate::analysis::error::AnalysisError;
use crate::types::indicator::Indicator;
use crate::types::place_record::PlaceRecord;
use crate::utils::ensure_dir_exists;
use log::info;
use serde::Serialize;
use std::path::Path;

/// Geographic center of the continental US, as (latitude, longitude).
pub const US_CENTER: (f64, f64) = (40.0, -100.0);
/// Zoom level that shows the whole continental US.
pub const DEFAULT_ZOOM: u8 = 4;

const MARKERS_PLACEHOLDER: &str = "__MARKERS__";
const CENTER_PLACEHOLDER: &str = "__CENTER__";
const ZOOM_PLACEHOLDER: &str = "__ZOOM__";
const LEGEND_PLACEHOLDER: &str = "__LEGEND__";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>County temperature trends</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
html, body, #map { height: 100%; margin: 0; }
.legend { background: white; padding: 6px 8px; font: 13px sans-serif; line-height: 18px; }
.legend i { display: inline-block; width: 12px; height: 12px; margin-right: 6px; border-radius: 6px; }
</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map('map').setView(__CENTER__, __ZOOM__);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
  maxZoom: 18,
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);

var markers = __MARKERS__;
markers.forEach(function (m) {
  var popup = document.createElement('span');
  popup.textContent = m.popup;
  L.circleMarker([m.lat, m.lng], {
    radius: 7, weight: 1, color: m.color, fillColor: m.color, fillOpacity: 0.85
  }).bindPopup(popup).addTo(map);
});

var legend = L.control({position: 'bottomright'});
legend.onAdd = function () {
  var div = L.DomUtil.create('div', 'legend');
  __LEGEND__.forEach(function (entry) {
    div.innerHTML += '<i style="background:' + entry.color + '"></i>' + entry.label + '<br>';
  });
  return div;
};
legend.addTo(map);
</script>
</body>
</html>
"#;

/// One place on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    /// `"<county name>, <state abbreviation>"`
    pub popup: String,
    pub indicator: Indicator,
}

#[derive(Serialize)]
struct MarkerJson<'a> {
    lat: f64,
    lng: f64,
    popup: &'a str,
    color: &'static str,
    indicator: char,
}

#[derive(Serialize)]
struct LegendJson {
    label: &'static str,
    color: &'static str,
}

fn legend_label(indicator: Indicator) -> &'static str {
    match indicator {
        Indicator::Hot => "H: warmer (1%)",
        Indicator::Warm => "W: warmer (10%)",
        Indicator::Neutral => "N: no clear change",
        Indicator::Cool => "C: cooler (10%)",
        Indicator::Frigid => "F: cooler (1%)",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerMap {
    pub center: (f64, f64),
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl Default for MarkerMap {
    fn default() -> Self {
        Self {
            center: US_CENTER,
            zoom: DEFAULT_ZOOM,
            markers: Vec::new(),
        }
    }
}

impl MarkerMap {
    /// One marker per classified record; unclassified records are left off.
    pub fn from_records(records: &[PlaceRecord]) -> Self {
        let markers = records
            .iter()
            .filter_map(|record| {
                record.indicator.map(|indicator| Marker {
                    latitude: record.county.latitude,
                    longitude: record.county.longitude,
                    popup: record.county.display_name(),
                    indicator,
                })
            })
            .collect();
        Self {
            markers,
            ..Self::default()
        }
    }

    pub fn to_html(&self) -> Result<String, AnalysisError> {
        let markers: Vec<MarkerJson> = self
            .markers
            .iter()
            .map(|m| MarkerJson {
                lat: m.latitude,
                lng: m.longitude,
                popup: &m.popup,
                color: m.indicator.color(),
                indicator: m.indicator.letter(),
            })
            .collect();
        let legend: Vec<LegendJson> = Indicator::ALL
            .into_iter()
            .map(|indicator| LegendJson {
                label: legend_label(indicator),
                color: indicator.color(),
            })
            .collect();

        let center = serde_json::to_string(&[self.center.0, self.center.1])?;
        Ok(TEMPLATE
            .replace(CENTER_PLACEHOLDER, &center)
            .replace(ZOOM_PLACEHOLDER, &self.zoom.to_string())
            .replace(LEGEND_PLACEHOLDER, &script_json(&legend)?)
            .replace(MARKERS_PLACEHOLDER, &script_json(&markers)?))
    }

    /// Writes the map as a single HTML file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), AnalysisError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir_exists(parent)
                .map_err(|e| AnalysisError::MapDirCreation(parent.to_path_buf(), e))?;
        }
        std::fs::write(path, self.to_html()?)
            .map_err(|e| AnalysisError::MapWrite(path.to_path_buf(), e))?;
        info!(
            "Saved map with {} markers to {}",
            self.markers.len(),
            path.display()
        );
        Ok(())
    }
}

/// JSON safe to inline in a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(popup: &str, indicator: Indicator) -> Marker {
        Marker {
            latitude: 40.09,
            longitude: -105.36,
            popup: popup.to_string(),
            indicator,
        }
    }

    #[test]
    fn html_embeds_markers_and_center() {
        let map = MarkerMap {
            markers: vec![
                marker("Boulder County, CO", Indicator::Cool),
                marker("Harris County, TX", Indicator::Hot),
            ],
            ..MarkerMap::default()
        };
        let html = map.to_html().unwrap();

        assert!(html.contains("setView([40.0,-100.0], 4)"));
        assert!(html.contains(r#""popup":"Boulder County, CO","color":"lightblue","indicator":"C""#));
        assert!(html.contains(r#""popup":"Harris County, TX","color":"red","indicator":"H""#));
        assert!(!html.contains(MARKERS_PLACEHOLDER));
        assert!(!html.contains(LEGEND_PLACEHOLDER));
    }

    #[test]
    fn popup_text_cannot_close_the_script() {
        let map = MarkerMap {
            markers: vec![marker("</script><b>x", Indicator::Neutral)],
            ..MarkerMap::default()
        };
        let html = map.to_html().unwrap();
        assert!(html.contains(r#"<\/script><b>x"#));
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("images").join("results.html");
        MarkerMap::default().save(&path).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("var markers = [];"));
    }
}
