//! Multi-ticker feature builds.
//!
//! Each ticker is cut from the shared price frame and run through the same
//! pipeline on the rayon pool. Tickers share nothing mutable, results come
//! back in the order the tickers were requested, and one ticker failing does
//! not stop the others.

use featurelab_core::data::{DataError, PriceFrame};
use featurelab_core::{FeatureError, FeaturePipeline, FeatureTable};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::data_loader::series_hash;

#[derive(Debug, Error)]
pub enum TickerError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// A successfully built feature table for one ticker.
#[derive(Debug, Clone)]
pub struct TickerTable {
    pub ticker: String,
    /// Observations in the ticker's price series before filtering.
    pub rows_in: usize,
    pub dataset_hash: String,
    pub table: FeatureTable,
}

#[derive(Debug)]
pub struct TickerOutcome {
    pub ticker: String,
    pub result: Result<TickerTable, TickerError>,
}

#[derive(Debug, Default)]
pub struct BatchResult {
    pub outcomes: Vec<TickerOutcome>,
}

impl BatchResult {
    pub fn succeeded(&self) -> impl Iterator<Item = &TickerTable> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &TickerError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.ticker.as_str(), e)))
    }

    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }
}

/// Build one ticker's feature table.
pub fn build_ticker(
    frame: &PriceFrame,
    ticker: &str,
    pipeline: &FeaturePipeline,
) -> Result<TickerTable, TickerError> {
    let series = frame.single_ticker(ticker)?;
    let table = pipeline.run(&series)?;
    Ok(TickerTable {
        ticker: ticker.to_string(),
        rows_in: series.len(),
        dataset_hash: series_hash(&series),
        table,
    })
}

pub fn run_batch(frame: &PriceFrame, tickers: &[String], pipeline: &FeaturePipeline) -> BatchResult {
    let outcomes: Vec<TickerOutcome> = tickers
        .par_iter()
        .map(|ticker| {
            let result = build_ticker(frame, ticker, pipeline);
            match &result {
                Ok(t) => info!(
                    ticker = %ticker,
                    rows_in = t.rows_in,
                    rows_out = t.table.len(),
                    "built feature table"
                ),
                Err(e) => warn!(ticker = %ticker, error = %e, "ticker failed"),
            }
            TickerOutcome {
                ticker: ticker.clone(),
                result,
            }
        })
        .collect();

    BatchResult { outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use featurelab_core::data::synthetic_frame;
    use featurelab_core::FeatureConfig;

    fn tickers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn frame() -> PriceFrame {
        synthetic_frame(
            &tickers(&["AAPL", "MSFT", "GOOGL"]),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn results_follow_request_order() {
        let pipeline = FeaturePipeline::new(&FeatureConfig::default()).unwrap();
        let batch = run_batch(&frame(), &tickers(&["GOOGL", "AAPL", "MSFT"]), &pipeline);
        let order: Vec<&str> = batch.outcomes.iter().map(|o| o.ticker.as_str()).collect();
        assert_eq!(order, vec!["GOOGL", "AAPL", "MSFT"]);
        assert_eq!(batch.success_count(), 3);
    }

    #[test]
    fn failing_ticker_does_not_stop_others() {
        let pipeline = FeaturePipeline::new(&FeatureConfig::default()).unwrap();
        let batch = run_batch(&frame(), &tickers(&["AAPL", "NVDA", "MSFT"]), &pipeline);
        assert_eq!(batch.success_count(), 2);
        let failed: Vec<&str> = batch.failed().map(|(t, _)| t).collect();
        assert_eq!(failed, vec!["NVDA"]);
        assert!(matches!(
            batch.failed().next(),
            Some((_, TickerError::Data(DataError::UnknownTicker(_))))
        ));
    }

    #[test]
    fn parallel_matches_sequential() {
        let pipeline = FeaturePipeline::new(&FeatureConfig::default()).unwrap();
        let frame = frame();
        let batch = run_batch(&frame, &tickers(&["AAPL", "MSFT", "GOOGL"]), &pipeline);
        for built in batch.succeeded() {
            let single = build_ticker(&frame, &built.ticker, &pipeline).unwrap();
            assert!(single.table.bitwise_eq(&built.table));
            assert_eq!(single.rows_in, built.rows_in);
            assert_eq!(single.table.len(), pipeline.expected_rows(single.rows_in));
        }
    }
}
