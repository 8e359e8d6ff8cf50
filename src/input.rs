//! Reading points from CSV or JSON and rejecting anything the engine should not see

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use serde::Deserialize;

use crate::cluster::{Point, PointList};
use crate::error::{Error, Result};

const LATITUDE_NAMES: [&str; 2] = ["latitude", "lat"];
const LONGITUDE_NAMES: [&str; 4] = ["longitude", "lon", "lng", "long"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Guesses the format from the file extension, CSV unless it is `.json`
    pub fn from_path(path: &Path) -> InputFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }
}

/// Request body accepted in JSON form: `{"points": [{"longitude": .., "latitude": ..}]}`
#[derive(Debug, Deserialize)]
struct PointsRequest {
    points: Vec<RawPoint>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    longitude: Option<f64>,
    latitude: Option<f64>,
}

/// Reads points from a file, or from stdin when `path` is `-`
///
/// `format` overrides the guess made from the file extension.
pub fn read_points(path: &Path, format: Option<InputFormat>) -> Result<PointList> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    debug!("Reading {:?} points from {:?}", format, path);

    if path == Path::new("-") {
        let stdin = io::stdin();
        return read_points_from(stdin.lock(), format);
    }

    read_points_from(File::open(path)?, format)
}

pub fn read_points_from<R: Read>(reader: R, format: InputFormat) -> Result<PointList> {
    match format {
        InputFormat::Csv => read_csv_points(reader),
        InputFormat::Json => read_json_points(reader),
    }
}

/// Reads points from CSV
///
/// Expected format: `latitude,longitude` (header row is optional). With a header,
/// coordinate columns are found by name and may appear in any position.
///
/// Records are numbered by their line in the input, the header included.
pub fn read_csv_points<R: Read>(reader: R) -> Result<PointList> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut points = PointList::new();
    let mut columns = (0, 1);

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let line = i + 1;

        // Determine if first row is header: a row with a missing field is still data
        if i == 0 && record.iter().any(|field| !field.is_empty() && field.parse::<f64>().is_err()) {
            columns = locate_columns(&record);
            continue;
        }

        let (lat_col, lon_col) = columns;
        let latitude = parse_field(&record, lat_col, "latitude", line)?;
        let longitude = parse_field(&record, lon_col, "longitude", line)?;
        points.push(validate_point(line, latitude, longitude)?);
    }

    Ok(points)
}

fn locate_columns(header: &StringRecord) -> (usize, usize) {
    let find = |names: &[&str]| {
        header
            .iter()
            .position(|h| names.iter().any(|name| h.eq_ignore_ascii_case(name)))
    };

    match (find(&LATITUDE_NAMES[..]), find(&LONGITUDE_NAMES[..])) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            warn!("Header {:?} does not name coordinate columns, assuming latitude,longitude", header);
            (0, 1)
        }
    }
}

fn parse_field(record: &StringRecord, column: usize, name: &str, line: usize) -> Result<f64> {
    let field = record.get(column).filter(|f| !f.is_empty()).ok_or_else(|| Error::MalformedInput {
        record: line,
        reason: format!("missing {}", name),
    })?;

    field.parse::<f64>().map_err(|e| Error::MalformedInput {
        record: line,
        reason: format!("{} {:?}: {}", name, field, e),
    })
}

/// Reads points from the JSON request body
///
/// Records are numbered by their position in the `points` array, starting at 1.
pub fn read_json_points<R: Read>(reader: R) -> Result<PointList> {
    let request: PointsRequest = serde_json::from_reader(reader)?;

    request
        .points
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let record = i + 1;
            let missing = |name: &str| Error::MalformedInput {
                record,
                reason: format!("missing {}", name),
            };
            let latitude = raw.latitude.ok_or_else(|| missing("latitude"))?;
            let longitude = raw.longitude.ok_or_else(|| missing("longitude"))?;
            validate_point(record, latitude, longitude)
        })
        .collect()
}

/// Checks that a coordinate pair is finite and within degree ranges
pub fn validate_point(record: usize, latitude: f64, longitude: f64) -> Result<Point> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::MalformedInput {
            record,
            reason: format!("latitude {} outside [-90, 90]", latitude),
        });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::MalformedInput {
            record,
            reason: format!("longitude {} outside [-180, 180]", longitude),
        });
    }

    Ok(Point::new(latitude, longitude))
}
