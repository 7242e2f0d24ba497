use std::result;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum StatsError {
    #[error("Empty input: no closing prices provided")]
    EmptyInput,

    #[error("Close at index {index} is not a finite number")]
    NonFiniteClose { index: usize },

    #[error("Close at index {index} is {value}, prices must be positive")]
    NonPositiveClose { index: usize, value: f64 },
}

pub type Result<T> = result::Result<T, StatsError>;
