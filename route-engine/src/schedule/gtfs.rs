//! GTFS feed loading.
//!
//! Reads the four static files the engine needs (`stops.txt`,
//! `routes.txt`, `trips.txt` and `stop_times.txt`) into a [`Timetable`].
//! Columns the engine doesn't use are ignored.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::domain::{RouteLabel, Stop, StopId};

use super::{ScheduledTrip, SourceError, StopTime, Timetable};

#[derive(Debug, Deserialize)]
struct StopRecord {
    stop_id: String,
    #[serde(default)]
    stop_name: Option<String>,
    #[serde(default)]
    stop_lat: Option<f64>,
    #[serde(default)]
    stop_lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RouteRecord {
    route_id: String,
    #[serde(default)]
    route_short_name: Option<String>,
    #[serde(default)]
    route_long_name: Option<String>,
}

impl RouteRecord {
    /// Short name, then long name, then the raw id.
    fn label(&self) -> RouteLabel {
        [&self.route_short_name, &self.route_long_name]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .map(|name| RouteLabel::new(name.trim()))
            .unwrap_or_else(|| RouteLabel::new(&self.route_id))
    }
}

#[derive(Debug, Deserialize)]
struct TripRecord {
    route_id: String,
    trip_id: String,
}

#[derive(Debug, Deserialize)]
struct StopTimeRecord {
    trip_id: String,
    stop_id: String,
    stop_sequence: u32,
}

fn read_records<T: DeserializeOwned>(
    dir: &Path,
    file: &'static str,
) -> Result<Vec<T>, SourceError> {
    let path = dir.join(file);
    if !path.is_file() {
        return Err(SourceError::MissingFile(path));
    }

    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(&path)
        .map_err(|source| SourceError::Csv { file, source })?;

    reader
        .into_deserialize::<T>()
        .map(|row| row.map_err(|source| SourceError::Csv { file, source }))
        .collect()
}

/// Load a GTFS feed directory into a timetable.
///
/// Stops with non-numeric ids or without coordinates are dropped, as are
/// trips whose route is unknown and stop-time rows whose trip is unknown.
/// Rows naming a dropped stop are kept; the graph builder ignores them.
pub fn load_feed(dir: impl AsRef<Path>) -> Result<Timetable, SourceError> {
    let dir = dir.as_ref();

    let stops = read_stops(dir)?;
    if stops.is_empty() {
        return Err(SourceError::Empty("stops"));
    }

    let routes: HashMap<String, RouteLabel> = read_records::<RouteRecord>(dir, "routes.txt")?
        .into_iter()
        .map(|r| {
            let label = r.label();
            (r.route_id, label)
        })
        .collect();

    let mut trip_index: HashMap<String, usize> = HashMap::new();
    let mut trips: Vec<(RouteLabel, Vec<StopTime>)> = Vec::new();
    for record in read_records::<TripRecord>(dir, "trips.txt")? {
        let Some(label) = routes.get(&record.route_id) else {
            warn!(
                trip = %record.trip_id,
                route = %record.route_id,
                "trip references unknown route"
            );
            continue;
        };
        trip_index.insert(record.trip_id, trips.len());
        trips.push((label.clone(), Vec::new()));
    }

    let mut skipped_rows = 0usize;
    for record in read_records::<StopTimeRecord>(dir, "stop_times.txt")? {
        let Some(&idx) = trip_index.get(&record.trip_id) else {
            skipped_rows += 1;
            continue;
        };
        let Ok(stop_id) = StopId::parse(&record.stop_id) else {
            skipped_rows += 1;
            continue;
        };
        let (_, rows) = &mut trips[idx];
        rows.push(StopTime::new(stop_id, record.stop_sequence));
    }
    if skipped_rows > 0 {
        debug!(count = skipped_rows, "skipped stop_times rows");
    }

    let trips: Vec<ScheduledTrip> = trips
        .into_iter()
        .filter(|(_, rows)| rows.len() >= 2)
        .map(|(route, rows)| ScheduledTrip::new(route, rows))
        .collect();
    if trips.is_empty() {
        return Err(SourceError::Empty("trips"));
    }

    info!(
        stops = stops.len(),
        routes = routes.len(),
        trips = trips.len(),
        "loaded GTFS feed from {}",
        dir.display()
    );

    Ok(Timetable::new(stops, trips))
}

fn read_stops(dir: &Path) -> Result<Vec<Stop>, SourceError> {
    let mut stops = Vec::new();
    for record in read_records::<StopRecord>(dir, "stops.txt")? {
        let stop_id = match StopId::parse(&record.stop_id) {
            Ok(id) => id,
            Err(e) => {
                warn!("skipping stop: {e}");
                continue;
            }
        };
        let (Some(lat), Some(lon)) = (record.stop_lat, record.stop_lon) else {
            warn!(stop = %stop_id, "skipping stop without coordinates");
            continue;
        };
        let name = record.stop_name.unwrap_or_default();
        stops.push(Stop::new(stop_id, name, lat, lon));
    }
    Ok(stops)
}
