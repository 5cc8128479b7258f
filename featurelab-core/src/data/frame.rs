//! Multi-ticker adjusted-close frame and single-ticker extraction.
//!
//! A `PriceFrame` holds one shared date axis and one price column per ticker,
//! the shape a multi-ticker download produces. Cells a ticker did not trade
//! are NaN. `single_ticker` is the hand-off to the pipeline: a keyed lookup
//! that returns an owned `PriceSeries` with no storage shared between tickers.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use super::DataError;
use crate::domain::PriceSeries;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct PriceFrame {
    dates: Vec<NaiveDate>,
    tickers: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl PriceFrame {
    /// Build a frame from a date axis and (ticker, prices) columns.
    ///
    /// Dates must be strictly increasing, tickers unique, and every column as
    /// long as the date axis.
    pub fn new(dates: Vec<NaiveDate>, columns: Vec<(String, Vec<f64>)>) -> Result<Self, DataError> {
        for (row, pair) in dates.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(DataError::UnsortedDates {
                    row: row + 1,
                    date: pair[1],
                });
            }
        }

        let mut tickers = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(columns.len());
        for (ticker, prices) in columns {
            if tickers.contains(&ticker) {
                return Err(DataError::DuplicateTicker(ticker));
            }
            if prices.len() != dates.len() {
                return Err(DataError::Validation(format!(
                    "column '{ticker}' has {} values for {} dates",
                    prices.len(),
                    dates.len()
                )));
            }
            tickers.push(ticker);
            values.push(prices);
        }

        Ok(Self {
            dates,
            tickers,
            columns: values,
        })
    }

    /// Read a wide CSV: a `date` column (YYYY-MM-DD) followed by one column
    /// per ticker. Empty cells are missing observations.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = rdr.headers()?.clone();
        match headers.get(0) {
            Some(h) if h.eq_ignore_ascii_case("date") => {}
            _ => return Err(DataError::MissingDateColumn),
        }
        let tickers: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let mut dates = Vec::new();
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); tickers.len()];

        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            let raw_date = record.get(0).unwrap_or_default();
            let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| {
                DataError::InvalidDate {
                    row,
                    value: raw_date.to_string(),
                }
            })?;
            dates.push(date);

            for (col, ticker) in tickers.iter().enumerate() {
                let cell = record.get(col + 1).unwrap_or_default();
                let price = if cell.is_empty() {
                    f64::NAN
                } else {
                    cell.parse::<f64>().map_err(|_| DataError::InvalidPrice {
                        row,
                        ticker: ticker.clone(),
                        value: cell.to_string(),
                    })?
                };
                columns[col].push(price);
            }
        }

        Self::new(dates, tickers.into_iter().zip(columns).collect())
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, DataError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Raw column for `ticker`, NaN cells included.
    pub fn column(&self, ticker: &str) -> Option<&[f64]> {
        self.tickers
            .iter()
            .position(|t| t == ticker)
            .map(|i| self.columns[i].as_slice())
    }

    /// Keep only rows with `start <= date <= end`. Open bounds keep everything.
    pub fn clip(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let keep: Vec<usize> = self
            .dates
            .iter()
            .enumerate()
            .filter(|(_, d)| start.map_or(true, |s| **d >= s) && end.map_or(true, |e| **d <= e))
            .map(|(i, _)| i)
            .collect();
        Self {
            dates: keep.iter().map(|&i| self.dates[i]).collect(),
            tickers: self.tickers.clone(),
            columns: self
                .columns
                .iter()
                .map(|col| keep.iter().map(|&i| col[i]).collect())
                .collect(),
        }
    }

    /// Extract one ticker as an owned price series.
    ///
    /// Missing (NaN) cells are dates the ticker did not trade and are left
    /// out of the series; every other value must be a valid price.
    pub fn single_ticker(&self, ticker: &str) -> Result<PriceSeries, DataError> {
        let column = self
            .column(ticker)
            .ok_or_else(|| DataError::UnknownTicker(ticker.to_string()))?;

        let (dates, prices): (Vec<NaiveDate>, Vec<f64>) = self
            .dates
            .iter()
            .zip(column)
            .filter(|(_, p)| !p.is_nan())
            .map(|(&d, &p)| (d, p))
            .unzip();

        PriceSeries::from_parts(dates, prices).map_err(|source| DataError::Series {
            ticker: ticker.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
date,AAPL,MSFT
2024-01-02,185.64,370.87
2024-01-03,184.25,
2024-01-04,181.91,367.94
";

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn reads_wide_csv() {
        let frame = PriceFrame::from_csv_reader(CSV.as_bytes()).unwrap();
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.tickers(), &["AAPL".to_string(), "MSFT".to_string()]);
        assert_eq!(frame.column("AAPL").unwrap()[2], 181.91);
        assert!(frame.column("MSFT").unwrap()[1].is_nan());
    }

    #[test]
    fn single_ticker_skips_missing_cells() {
        let frame = PriceFrame::from_csv_reader(CSV.as_bytes()).unwrap();
        let msft = frame.single_ticker("MSFT").unwrap();
        assert_eq!(msft.dates(), &[day(2), day(4)]);
        assert_eq!(msft.prices(), &[370.87, 367.94]);

        let aapl = frame.single_ticker("AAPL").unwrap();
        assert_eq!(aapl.len(), 3);
    }

    #[test]
    fn unknown_ticker_errors() {
        let frame = PriceFrame::from_csv_reader(CSV.as_bytes()).unwrap();
        assert!(matches!(
            frame.single_ticker("TSLA"),
            Err(DataError::UnknownTicker(t)) if t == "TSLA"
        ));
    }

    #[test]
    fn rejects_unsorted_dates() {
        let csv = "date,AAPL\n2024-01-03,1.0\n2024-01-02,2.0\n";
        assert!(matches!(
            PriceFrame::from_csv_reader(csv.as_bytes()),
            Err(DataError::UnsortedDates { row: 1, .. })
        ));
    }

    #[test]
    fn rejects_missing_date_header() {
        let csv = "ticker,AAPL\nx,1.0\n";
        assert!(matches!(
            PriceFrame::from_csv_reader(csv.as_bytes()),
            Err(DataError::MissingDateColumn)
        ));
    }

    #[test]
    fn rejects_bad_price_cell() {
        let csv = "date,AAPL\n2024-01-02,abc\n";
        assert!(matches!(
            PriceFrame::from_csv_reader(csv.as_bytes()),
            Err(DataError::InvalidPrice { row: 0, .. })
        ));
    }

    #[test]
    fn non_positive_price_surfaces_on_extraction() {
        let csv = "date,AAPL\n2024-01-02,10.0\n2024-01-03,-1.0\n";
        let frame = PriceFrame::from_csv_reader(csv.as_bytes()).unwrap();
        assert!(matches!(
            frame.single_ticker("AAPL"),
            Err(DataError::Series { .. })
        ));
    }

    #[test]
    fn clip_is_inclusive() {
        let frame = PriceFrame::from_csv_reader(CSV.as_bytes()).unwrap();
        let clipped = frame.clip(Some(day(3)), Some(day(4)));
        assert_eq!(clipped.dates(), &[day(3), day(4)]);
        assert_eq!(clipped.column("AAPL").unwrap(), &[184.25, 181.91]);

        assert_eq!(frame.clip(None, None).len(), 3);
    }

    #[test]
    fn extracted_series_is_independent_of_frame() {
        let frame = PriceFrame::from_csv_reader(CSV.as_bytes()).unwrap();
        let series = frame.single_ticker("AAPL").unwrap();
        drop(frame);
        assert_eq!(series.prices()[0], 185.64);
    }
}
