use crate::{
    codec::{HexDecodeError, IntDecodeError},
    column::ColumnEncodeError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// CodecError
///
/// Structured codec error with a stable classification.
///
/// Only hard failures land here: contract violations and invalid caller input.
/// Malformed keys that were probed speculatively are reported as data
/// variants on the decode results and never become a `CodecError`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct CodecError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl CodecError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a contract violation for a specific origin.
    pub(crate) fn contract_violation(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::ContractViolation, origin, message)
    }

    /// Construct an invalid-input error for a specific origin.
    pub(crate) fn invalid_input(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvalidInput, origin, message)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<IntDecodeError> for CodecError {
    fn from(err: IntDecodeError) -> Self {
        Self::contract_violation(ErrorOrigin::Int, err.to_string())
    }
}

impl From<HexDecodeError> for CodecError {
    fn from(err: HexDecodeError) -> Self {
        Self::invalid_input(ErrorOrigin::Hex, err.to_string())
    }
}

impl From<ColumnEncodeError> for CodecError {
    fn from(err: ColumnEncodeError) -> Self {
        Self::invalid_input(
            ErrorOrigin::Column,
            format!("index column is not encodable: {err}"),
        )
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    ContractViolation,
    Malformed,
    InvalidInput,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ContractViolation => "contract_violation",
            Self::Malformed => "malformed",
            Self::InvalidInput => "invalid_input",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Int,
    Chunk,
    Column,
    Hex,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Int => "int",
            Self::Chunk => "chunk",
            Self::Column => "column",
            Self::Hex => "hex",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
