//! PriceSeries: the validated, time-ordered input to the feature pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single (date, adjusted close) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Malformed price input. Raised at construction, never coerced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("dates and prices differ in length ({dates} dates, {prices} prices)")]
    LengthMismatch { dates: usize, prices: usize },

    #[error("duplicate date {date} at index {index}")]
    DuplicateDate { index: usize, date: NaiveDate },

    #[error("date {date} at index {index} is earlier than the previous date {previous}")]
    NonIncreasingDate {
        index: usize,
        previous: NaiveDate,
        date: NaiveDate,
    },

    #[error("price at {date} is not finite: {price}")]
    NonFinitePrice { date: NaiveDate, price: f64 },

    #[error("price at {date} must be positive, got {price}")]
    NonPositivePrice { date: NaiveDate, price: f64 },
}

/// Daily adjusted-close history for one ticker.
///
/// Dates are strictly increasing and every price is finite and positive.
/// The series is immutable once built; the pipeline only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    dates: Vec<NaiveDate>,
    prices: Vec<f64>,
}

impl PriceSeries {
    /// Build a series from parallel date and price vectors.
    pub fn from_parts(dates: Vec<NaiveDate>, prices: Vec<f64>) -> Result<Self, SeriesError> {
        if dates.len() != prices.len() {
            return Err(SeriesError::LengthMismatch {
                dates: dates.len(),
                prices: prices.len(),
            });
        }

        for (index, (&date, &price)) in dates.iter().zip(&prices).enumerate() {
            if !price.is_finite() {
                return Err(SeriesError::NonFinitePrice { date, price });
            }
            if price <= 0.0 {
                return Err(SeriesError::NonPositivePrice { date, price });
            }
            if index > 0 {
                let previous = dates[index - 1];
                if date == previous {
                    return Err(SeriesError::DuplicateDate { index, date });
                }
                if date < previous {
                    return Err(SeriesError::NonIncreasingDate {
                        index,
                        previous,
                        date,
                    });
                }
            }
        }

        Ok(Self { dates, prices })
    }

    /// Build a series from (date, price) points.
    pub fn new(points: impl IntoIterator<Item = PricePoint>) -> Result<Self, SeriesError> {
        let (dates, prices) = points.into_iter().map(|p| (p.date, p.price)).unzip();
        Self::from_parts(dates, prices)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = PricePoint> + '_ {
        self.dates
            .iter()
            .zip(&self.prices)
            .map(|(&date, &price)| PricePoint { date, price })
    }
}
