use std::{fmt::Display, num::ParseIntError};

#[derive(Debug)]
pub enum Error {
    BadSeverityInPri,
    BadFacilityInPri,
    UnexpectedEndOfInput,
    IntConversion(ParseIntError),
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::BadSeverityInPri => f.write_str("bad severity in message"),
            Error::BadFacilityInPri => f.write_str("bad facility in message"),
            Error::UnexpectedEndOfInput => f.write_str("unexpected eof"),
            Error::IntConversion(err) => write!(f, "integer conversion error: {err}"),
        }
    }
}

impl From<ParseIntError> for Error {
    fn from(value: ParseIntError) -> Self {
        Self::IntConversion(value)
    }
}
