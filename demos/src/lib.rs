// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the `understory_map_view` demos.
//!
//! [`parse_lat_lon`] reads the `"lat, lon"` strings map services hand out.

use std::fmt;
use std::num::ParseFloatError;

use kurbo::Point;

/// Why a coordinate string could not be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoordinateError {
    /// No comma separating latitude from longitude.
    MissingSeparator,
    /// One half was not a number.
    Number(ParseFloatError),
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator => write!(f, "expected \"lat, lon\""),
            Self::Number(err) => write!(f, "invalid coordinate: {err}"),
        }
    }
}

impl std::error::Error for CoordinateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingSeparator => None,
            Self::Number(err) => Some(err),
        }
    }
}

impl From<ParseFloatError> for CoordinateError {
    fn from(err: ParseFloatError) -> Self {
        Self::Number(err)
    }
}

/// Parses `"lat, lon"` into a domain point (`x` = longitude, `y` = latitude).
///
/// ```
/// # use understory_map_view_demos::parse_lat_lon;
/// let p = parse_lat_lon("51.5072, -0.1276").unwrap();
/// assert_eq!((p.x, p.y), (-0.1276, 51.5072));
/// ```
pub fn parse_lat_lon(text: &str) -> Result<Point, CoordinateError> {
    let (lat, lon) = text
        .split_once(',')
        .ok_or(CoordinateError::MissingSeparator)?;
    let lat: f64 = lat.trim().parse()?;
    let lon: f64 = lon.trim().parse()?;
    Ok(Point::new(lon, lat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_into_lon_lat() {
        let p = parse_lat_lon("-33.8688,151.2093").unwrap();
        assert_eq!(p, Point::new(151.2093, -33.8688));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            parse_lat_lon("51.5 -0.1"),
            Err(CoordinateError::MissingSeparator)
        );
        assert!(matches!(
            parse_lat_lon("north, 3"),
            Err(CoordinateError::Number(_))
        ));
    }
}
