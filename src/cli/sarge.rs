use std::convert::Infallible;
use std::num::ParseIntError;

use sarge::ArgumentType;

use crate::cli::{BatchSizeArg, InputArg};

impl ArgumentType for InputArg {
    type Error = Infallible;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        match val {
            None => Some(Ok(InputArg::default())),
            Some(v) => Some(Ok(InputArg::parse(v))),
        }
    }

    fn default_value() -> Option<Self> {
        Some(InputArg::default())
    }
}

impl ArgumentType for BatchSizeArg {
    type Error = ParseIntError;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        let v = val?;
        Some(v.trim().parse::<usize>().map(BatchSizeArg))
    }

    fn default_value() -> Option<Self> {
        Some(BatchSizeArg::default())
    }
}
