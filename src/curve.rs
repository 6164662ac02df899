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

//! The curve module contains the results of geodetic calculations:
//! `GeodeticCurve` and `GeodeticMeasurement`.

use crate::Metres;
use angle_sc::Degrees;
use core::fmt;

/// The geodesic between two `GlobalCoordinates` on an ellipsoid.
///
/// Azimuths are in the range [0°, 360°) measured clockwise from North.
/// They are NaN where the geodesic direction is undefined, see
/// [`solve_inverse`](crate::vincenty::solve_inverse).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodeticCurve {
    /// The ellipsoidal distance.
    ellipsoidal_distance: Metres,
    /// The azimuth at the start point.
    azimuth: Degrees,
    /// The azimuth from the end point back to the start point.
    reverse_azimuth: Degrees,
}

impl GeodeticCurve {
    /// Constructor.
    /// * `ellipsoidal_distance` - the distance along the ellipsoid.
    /// * `azimuth` - the azimuth at the start point.
    /// * `reverse_azimuth` - the azimuth at the end point toward the start point.
    #[must_use]
    pub const fn new(ellipsoidal_distance: Metres, azimuth: Degrees, reverse_azimuth: Degrees) -> Self {
        Self {
            ellipsoidal_distance,
            azimuth,
            reverse_azimuth,
        }
    }

    #[must_use]
    pub const fn ellipsoidal_distance(&self) -> Metres {
        self.ellipsoidal_distance
    }

    #[must_use]
    pub const fn azimuth(&self) -> Degrees {
        self.azimuth
    }

    #[must_use]
    pub const fn reverse_azimuth(&self) -> Degrees {
        self.reverse_azimuth
    }
}

impl fmt::Display for GeodeticCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "s={};a12={};a21={};",
            self.ellipsoidal_distance.0, self.azimuth.0, self.reverse_azimuth.0
        )
    }
}

/// The three dimensional measurement between two `GlobalPosition`s.
///
/// The point to point distance is the hypotenuse of the ellipsoidal distance
/// and the change in elevation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodeticMeasurement {
    curve: GeodeticCurve,
    /// The change in elevation from the start point to the end point.
    elevation_change: Metres,
    /// The point to point distance.
    p2p: Metres,
}

impl GeodeticMeasurement {
    /// Construct a `GeodeticMeasurement` from its component values.
    /// * `ellipsoidal_distance` - the distance along the ellipsoid.
    /// * `azimuth` - the azimuth at the start point.
    /// * `reverse_azimuth` - the azimuth at the end point toward the start point.
    /// * `elevation_change` - the elevation change from start to end.
    #[must_use]
    pub fn new(
        ellipsoidal_distance: Metres,
        azimuth: Degrees,
        reverse_azimuth: Degrees,
        elevation_change: Metres,
    ) -> Self {
        Self::from_curve(
            GeodeticCurve::new(ellipsoidal_distance, azimuth, reverse_azimuth),
            elevation_change,
        )
    }

    /// Construct a `GeodeticMeasurement` from a `GeodeticCurve` and the
    /// elevation change from start to end.
    #[must_use]
    pub fn from_curve(curve: GeodeticCurve, elevation_change: Metres) -> Self {
        Self {
            curve,
            elevation_change,
            p2p: Metres(libm::hypot(
                curve.ellipsoidal_distance.0,
                elevation_change.0,
            )),
        }
    }

    /// The `GeodeticCurve` at the average elevation of the positions.
    #[must_use]
    pub const fn curve(&self) -> GeodeticCurve {
        self.curve
    }

    #[must_use]
    pub const fn ellipsoidal_distance(&self) -> Metres {
        self.curve.ellipsoidal_distance
    }

    #[must_use]
    pub const fn azimuth(&self) -> Degrees {
        self.curve.azimuth
    }

    #[must_use]
    pub const fn reverse_azimuth(&self) -> Degrees {
        self.curve.reverse_azimuth
    }

    #[must_use]
    pub const fn elevation_change(&self) -> Metres {
        self.elevation_change
    }

    /// The straight line distance between the positions.
    #[must_use]
    pub const fn point_to_point_distance(&self) -> Metres {
        self.p2p
    }
}

impl fmt::Display for GeodeticMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}elev12={};p2p={}",
            self.curve, self.elevation_change.0, self.p2p.0
        )
    }
}
