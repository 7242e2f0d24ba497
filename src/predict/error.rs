use std::result;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PredictError {
    #[error("Current price {0} is not a positive finite number")]
    InvalidCurrentPrice(f64),
}

pub type Result<T> = result::Result<T, PredictError>;
