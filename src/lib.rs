//! Monthly ticker-mention aggregation and gainers ranking.
//!
//! Mentions are read from a [`services::MentionStore`], grouped per UTC month
//! by [`services::aggregate_month`], and ranked by price performance through
//! [`services::GainersService`], which resolves prices via a shared
//! [`services::PriceSeriesCache`].

pub mod cli;
pub mod commands;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{AppError, Error, Result};
