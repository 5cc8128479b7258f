//! Synthetic price frames for offline development.
//!
//! A weekday-only random walk per ticker, seeded from the BLAKE3 hash of the
//! ticker name so the same ticker always produces the same prices. These are
//! clearly fake; callers tag anything built from them.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{DataError, PriceFrame};

pub fn synthetic_frame(
    tickers: &[String],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceFrame, DataError> {
    let dates: Vec<NaiveDate> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .collect();

    let columns = tickers
        .iter()
        .map(|ticker| (ticker.clone(), random_walk(ticker, dates.len())))
        .collect();

    PriceFrame::new(dates, columns)
}

fn random_walk(ticker: &str, len: usize) -> Vec<f64> {
    let seed: [u8; 32] = *blake3::hash(ticker.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut price = 100.0_f64;
    let mut prices = Vec::with_capacity(len);
    for _ in 0..len {
        prices.push(price);
        let daily_return: f64 = rng.gen_range(-0.03..0.03);
        price *= 1.0 + daily_return;
    }
    prices
}
