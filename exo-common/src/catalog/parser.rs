//! CSV catalog parser
//!
//! Reads the exoplanet archive's CSV export (header row + one planet per row)
//! into [`CelestialRecord`]s. Malformed rows are dropped, never reported as
//! errors; parsing itself cannot fail.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, trace, warn};

use super::record::{CelestialRecord, Rejection};

/// Planet name column
pub const NAME_COLUMN: &str = "pl_name";
/// Planet radius column (Earth radii)
pub const RADIUS_COLUMN: &str = "pl_rade";
/// Planet equilibrium temperature column (K)
pub const EQUILIBRIUM_TEMP_COLUMN: &str = "pl_eqt";
/// Host star effective temperature column (K)
pub const HOST_STAR_TEMP_COLUMN: &str = "st_teff";

/// Positions of the required columns within a row
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    name: usize,
    radius: usize,
    equilibrium_temp: usize,
    host_star_temp: usize,
}

impl ColumnMap {
    fn locate(headers: &StringRecord) -> Option<Self> {
        let find = |column: &str| headers.iter().position(|h| h == column);

        Some(Self {
            name: find(NAME_COLUMN)?,
            radius: find(RADIUS_COLUMN)?,
            equilibrium_temp: find(EQUILIBRIUM_TEMP_COLUMN)?,
            host_star_temp: find(HOST_STAR_TEMP_COLUMN)?,
        })
    }

    fn record_from(&self, row: &StringRecord) -> Result<CelestialRecord, Rejection> {
        let name = row.get(self.name).unwrap_or_default();
        let radius = parse_number(row.get(self.radius));
        let equilibrium_temp = parse_number(row.get(self.equilibrium_temp));
        let host_star_temp = parse_number(row.get(self.host_star_temp));

        CelestialRecord::new(name, radius, equilibrium_temp, host_star_temp)
    }
}

/// Missing or unparseable cells become NaN and fail record validation
fn parse_number(cell: Option<&str>) -> f64 {
    cell.and_then(|value| value.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Parse catalog CSV text into scored records
///
/// Rows are dropped when the name is empty, radius or equilibrium
/// temperature is not a positive finite number, host star temperature is not
/// finite, or the row itself is unreadable. Input order is preserved.
///
/// # Examples
/// ```
/// use exo_common::parse_catalog;
///
/// let csv = "pl_name,pl_rade,pl_eqt,st_teff\nEarth,1.0,288,5778\nBad,-1,300,5000\n";
/// let records = parse_catalog(csv);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].name(), "Earth");
/// ```
pub fn parse_catalog(text: &str) -> Vec<CelestialRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let columns = match reader.headers() {
        Ok(headers) => match ColumnMap::locate(headers) {
            Some(columns) => columns,
            None => {
                warn!(
                    headers = ?headers,
                    "Catalog is missing required columns, no records parsed"
                );
                return Vec::new();
            }
        },
        Err(e) => {
            warn!(error = %e, "Failed to read catalog header row");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (index, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                trace!(row = index, error = %e, "Dropping unreadable catalog row");
                dropped += 1;
                continue;
            }
        };

        match columns.record_from(&row) {
            Ok(record) => records.push(record),
            Err(reason) => {
                trace!(row = index, %reason, "Dropping catalog row");
                dropped += 1;
            }
        }
    }

    debug!(parsed = records.len(), dropped, "Parsed exoplanet catalog");

    records
}
