//! Load prepayment requests from CSV
//!
//! Expected columns: `month,amount,fee_rate_pct`. Amounts are minor units.

use super::{Money, PrepaymentRequest};
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row matching the prepayment file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "month")]
    month: u32,
    #[serde(rename = "amount")]
    amount: Money,
    #[serde(rename = "fee_rate_pct")]
    fee_rate_pct: f64,
}

impl CsvRow {
    fn to_request(self) -> Result<PrepaymentRequest, Box<dyn Error>> {
        Ok(PrepaymentRequest::new(
            self.month,
            self.amount,
            self.fee_rate_pct,
        )?)
    }
}

/// Load all prepayment requests from a CSV file
pub fn load_prepayments<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<PrepaymentRequest>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut requests = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        requests.push(row.to_request()?);
    }

    Ok(requests)
}

/// Load prepayment requests from any reader (e.g., string buffer)
pub fn load_prepayments_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<PrepaymentRequest>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut requests = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        requests.push(row.to_request()?);
    }

    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_prepayments() {
        let csv = "month,amount,fee_rate_pct\n6,500000000,2.0\n9,100000000,0.0\n";
        let requests = load_prepayments_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].month, 6);
        assert_eq!(requests[0].amount, 500_000_000);
        assert_eq!(requests[0].fee_rate_pct, 2.0);
        assert_eq!(requests[1].fee_rate_pct, 0.0);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let csv = "month,amount,fee_rate_pct\n6,-100,2.0\n";
        assert!(load_prepayments_from_reader(csv.as_bytes()).is_err());
    }
}
