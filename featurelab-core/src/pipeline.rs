//! Feature pipeline orchestration.
//!
//! Stages run in a fixed order over one price series; each returns a fresh
//! table, and the completion filter runs once at the very end.
//!
//! Order: returns, moving averages, volatility, lags, RSI, MACD,
//! Bollinger width, target.

use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, FeatureConfig};
use crate::domain::{FeatureTable, PriceSeries, TableError, PRICE_COLUMN};
use crate::features::{
    drop_incomplete, BollingerWidthStage, FeatureStage, LagStage, MacdStage, MovingAverageStage,
    ReturnStage, RsiStage, TargetStage, VolatilityStage,
};

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("invalid feature config: {0}")]
    Config(#[from] ConfigError),

    #[error("stage '{stage}' failed: {source}")]
    Stage {
        stage: String,
        #[source]
        source: TableError,
    },
}

/// The ordered stage list for one configuration.
pub struct FeaturePipeline {
    stages: Vec<Box<dyn FeatureStage>>,
}

impl FeaturePipeline {
    /// Validate `config` and build the stage list.
    pub fn new(config: &FeatureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let stages: Vec<Box<dyn FeatureStage>> = vec![
            Box::new(ReturnStage),
            Box::new(MovingAverageStage::new(config.ma_windows.clone())),
            Box::new(VolatilityStage::new(config.volatility_window)),
            Box::new(LagStage::new(config.lag_offsets.clone())),
            Box::new(RsiStage::new(config.rsi_window, config.rsi_epsilon)),
            Box::new(MacdStage::new(
                config.macd_fast,
                config.macd_slow,
                config.macd_signal,
            )),
            Box::new(BollingerWidthStage::new(
                config.bollinger_window,
                config.bollinger_multiplier,
            )),
            Box::new(TargetStage::new(config.target_horizon)),
        ];
        Ok(Self { stages })
    }

    pub fn stages(&self) -> &[Box<dyn FeatureStage>] {
        &self.stages
    }

    /// Output schema: the price column followed by every stage's columns.
    pub fn columns(&self) -> Vec<String> {
        std::iter::once(PRICE_COLUMN.to_string())
            .chain(self.stages.iter().flat_map(|s| s.columns()))
            .collect()
    }

    /// First row index at which every feature column is defined.
    pub fn warmup(&self) -> usize {
        self.stages.iter().map(|s| s.warmup()).max().unwrap_or(0)
    }

    /// Trailing rows without a target.
    pub fn horizon(&self) -> usize {
        self.stages.iter().map(|s| s.horizon()).max().unwrap_or(0)
    }

    /// Rows left after filtering a series of `len` observations.
    pub fn expected_rows(&self, len: usize) -> usize {
        len.saturating_sub(self.warmup() + self.horizon())
    }

    /// Run every stage without filtering. Undefined cells stay NaN.
    pub fn compute(&self, series: &PriceSeries) -> Result<FeatureTable, FeatureError> {
        let mut table = FeatureTable::from_series(series);
        for stage in &self.stages {
            table = stage.apply(&table).map_err(|source| FeatureError::Stage {
                stage: stage.name().to_string(),
                source,
            })?;
            debug!(stage = stage.name(), columns = ?stage.columns(), "applied stage");
        }
        Ok(table)
    }

    /// Run every stage, then drop rows with any undefined value.
    pub fn run(&self, series: &PriceSeries) -> Result<FeatureTable, FeatureError> {
        let table = self.compute(series)?;
        Ok(drop_incomplete(&table))
    }
}

/// Full feature pipeline for one price series.
pub fn build_feature_dataset(
    series: &PriceSeries,
    config: &FeatureConfig,
) -> Result<FeatureTable, FeatureError> {
    FeaturePipeline::new(config)?.run(series)
}
