//! Core types: asset classes, positions, configuration.

mod asset_class;
mod config;
mod position;

pub use asset_class::AssetClass;
pub use config::{Band, LiquidityTable, RiskConfig, ScoreBands, TRADING_DAYS_PER_YEAR};
pub use position::{Position, PositionBuilder};
