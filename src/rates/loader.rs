//! CSV-based rate table loader
//!
//! Loads per-period annual rates from a two-column CSV:
//! `period,annual_rate_pct`, one row per 6-month period in order.

use super::RateTable;
use std::error::Error;
use std::path::Path;

/// Raw CSV row for one 6-month period
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "period")]
    period: usize,
    #[serde(rename = "annual_rate_pct")]
    annual_rate_pct: f64,
}

/// Load a rate table from a CSV file
pub fn load_rate_table<P: AsRef<Path>>(path: P) -> Result<RateTable, Box<dyn Error>> {
    let reader = csv::Reader::from_path(path)?;
    read_rate_table(reader)
}

/// Load a rate table from any reader (e.g., string buffer)
pub fn load_rate_table_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<RateTable, Box<dyn Error>> {
    read_rate_table(csv::Reader::from_reader(reader))
}

fn read_rate_table<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<RateTable, Box<dyn Error>> {
    let mut rates = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        if row.period != rates.len() {
            log::warn!(
                "rate table row out of sequence: expected period {}, file says {}",
                rates.len(),
                row.period
            );
        }
        rates.push(row.annual_rate_pct);
    }

    Ok(RateTable::new(rates)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rate_table() {
        let csv = "period,annual_rate_pct\n0,8.5\n1,10.0\n2,11.2\n";
        let table = load_rate_table_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.periods(), 3);
        assert_eq!(table.resolve(1), (8.5, 0));
        assert_eq!(table.resolve(7), (10.0, 1));
    }

    #[test]
    fn test_load_empty_table_fails() {
        let csv = "period,annual_rate_pct\n";
        assert!(load_rate_table_from_reader(csv.as_bytes()).is_err());
    }
}
