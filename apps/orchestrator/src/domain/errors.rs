use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    ParseCard(String),
    ParsePhase(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::ParseCard(s) => write!(f, "parse card: {s}"),
            DomainError::ParsePhase(s) => write!(f, "parse phase: {s}"),
        }
    }
}

impl Error for DomainError {}
