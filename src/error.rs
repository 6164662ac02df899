// Copyright (c) 2024 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The error module contains the errors returned by the library.
//!
//! Numerical anomalies such as the non-convergence of the inverse solution
//! near antipodal points are not errors, they are resolved within the
//! algorithms.

use thiserror::Error;

/// The errors that may be returned by `Ellipsoid` construction and the
/// direct and 3D geodetic calculations.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GeodeticError {
    /// The Semimajor axis is not positive or the flattening is not in [0, 1).
    #[error("invalid ellipsoid: semimajor axis {a} m, flattening {f}")]
    InvalidEllipsoid { a: f64, f: f64 },

    /// A calculation parameter is out of range, e.g. a negative distance.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// The direct solution failed to converge within its iteration limit.
    #[error("direct solution did not converge after {iterations} iterations")]
    DirectNotConverged { iterations: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geodetic_error_display() {
        let error = GeodeticError::InvalidEllipsoid { a: -1.0, f: 0.5 };
        assert_eq!(
            "invalid ellipsoid: semimajor axis -1 m, flattening 0.5",
            error.to_string()
        );

        let error = GeodeticError::InvalidInput("negative distance");
        assert_eq!("invalid input: negative distance", error.to_string());

        let error = GeodeticError::DirectNotConverged { iterations: 200 };
        assert_eq!(
            "direct solution did not converge after 200 iterations",
            error.to_string()
        );
    }
}
