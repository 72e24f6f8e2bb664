//! Load bond quotes from CSV

use std::path::Path;

use csv::Reader;

use super::BondQuote;
use crate::bond::Bond;
use crate::date::Date;
use crate::error::BondError;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "BondID")]
    bond_id: String,
    #[serde(rename = "FaceValue")]
    face_value: f64,
    #[serde(rename = "CouponRate")]
    coupon_rate: f64,
    #[serde(rename = "NumYears")]
    num_years: u32,
    #[serde(rename = "Frequency")]
    frequency: u32,
    #[serde(rename = "SettleDate")]
    settle_date: String,
    #[serde(rename = "Price")]
    price: f64,
}

impl CsvRow {
    fn to_quote(self) -> Result<BondQuote, BondError> {
        let bond = Bond::try_new(self.face_value, self.coupon_rate, self.num_years, self.frequency)
            .map_err(|e| match e {
                BondError::InvalidTerms(reason) => {
                    BondError::InvalidTerms(format!("{}: {}", self.bond_id, reason))
                }
                other => other,
            })?;
        let settle: Date = self.settle_date.parse()?;

        Ok(BondQuote {
            bond_id: self.bond_id,
            bond,
            settle,
            price: self.price,
        })
    }
}

/// Load all quotes from a CSV file
pub fn load_quotes<P: AsRef<Path>>(path: P) -> Result<Vec<BondQuote>, BondError> {
    let reader = Reader::from_path(path)?;
    collect_quotes(reader)
}

/// Load quotes from any reader (string buffer, stdin, ...)
pub fn load_quotes_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<BondQuote>, BondError> {
    collect_quotes(Reader::from_reader(reader))
}

fn collect_quotes<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<BondQuote>, BondError> {
    let mut quotes = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        quotes.push(row.to_quote()?);
    }
    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "BondID,FaceValue,CouponRate,NumYears,Frequency,SettleDate,Price\n";

    #[test]
    fn test_load_from_reader() {
        let data = format!("{}A,1000,0.05,2,2,2024-01-01,995.5\nB,100,0.03,10,1,2024-06-30,97\n", HEADER);
        let quotes = load_quotes_from_reader(data.as_bytes()).unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].bond_id, "A");
        assert_eq!(quotes[0].bond, Bond::new(1000.0, 0.05, 2, 2));
        assert_eq!(quotes[1].settle, Date::new(2024, 6, 30));
        assert_eq!(quotes[1].price, 97.0);
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let data = format!("{}A,1000,0.05,2,0,2024-01-01,995.5\n", HEADER);
        let err = load_quotes_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(&err, BondError::InvalidTerms(msg) if msg.starts_with("A:")));
        assert_eq!(err.to_string(), "invalid bond terms: A: coupon frequency must be positive");
    }

    #[test]
    fn test_bad_date_rejected() {
        let data = format!("{}A,1000,0.05,2,2,01/01/2024,995.5\n", HEADER);
        let err = load_quotes_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, BondError::InvalidDate(_)));
    }

    #[test]
    fn test_malformed_row_rejected() {
        let data = format!("{}A,lots,0.05,2,2,2024-01-01,995.5\n", HEADER);
        assert!(matches!(load_quotes_from_reader(data.as_bytes()), Err(BondError::Csv(_))));
    }

    #[test]
    fn test_load_sample_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_bonds.csv");
        let quotes = load_quotes(path).expect("Failed to load sample bonds");
        assert_eq!(quotes.len(), 5);
        assert_eq!(quotes[4].bond.frequency, 1);
    }
}
