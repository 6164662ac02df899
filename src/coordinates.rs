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

//! The coordinates module contains the `GlobalCoordinates` and
//! `GlobalPosition` types.
//!
//! Any angle may be used for latitude and longitude, but they are
//! canonicalized such that:
//!
//! -90° <= latitude <= 90° and -180° < longitude <= 180°
//!
//! Negative latitudes are in the southern hemisphere and negative
//! longitudes are in the western hemisphere.

#![allow(clippy::float_cmp)]

use crate::Metres;
use angle_sc::{Degrees, Validate};
use core::cmp::Ordering;
use core::fmt;
use unit_sphere::LatLong;

/// Canonicalize a latitude and longitude.
///
/// A latitude beyond a pole is reflected back over the pole and the
/// longitude is moved to the opposite meridian.
/// Values that are already in range are returned unchanged.
/// * `latitude` - the latitude in degrees.
/// * `longitude` - the longitude in degrees.
///
/// returns the latitude in [-90, 90] and the longitude in (-180, 180].
/// # Examples
/// ```
/// use vincenty_geodesy::Degrees;
/// use vincenty_geodesy::coordinates::canonicalize;
///
/// let (lat, lon) = canonicalize(Degrees(100.0), Degrees(10.0));
/// assert_eq!(80.0, lat.0);
/// assert_eq!(-170.0, lon.0);
///
/// let (lat, lon) = canonicalize(Degrees(0.0), Degrees(-180.0));
/// assert_eq!(0.0, lat.0);
/// assert_eq!(180.0, lon.0);
/// ```
#[must_use]
pub fn canonicalize(latitude: Degrees, longitude: Degrees) -> (Degrees, Degrees) {
    let mut lat = latitude.0;
    let mut lon = longitude.0;

    if !(-90.0..=90.0).contains(&lat) {
        lat = libm::fmod(lat + 180.0, 360.0);
        if lat < 0.0 {
            lat += 360.0;
        }
        lat -= 180.0;

        // crossed a pole
        if lat > 90.0 {
            lat = 180.0 - lat;
            lon += 180.0;
        } else if lat < -90.0 {
            lat = -180.0 - lat;
            lon += 180.0;
        }
    }

    if !(lon > -180.0 && lon <= 180.0) {
        lon = libm::fmod(lon + 180.0, 360.0);
        if lon <= 0.0 {
            lon += 360.0;
        }
        lon -= 180.0;
    }

    (Degrees(lat), Degrees(lon))
}

/// A latitude and longitude on the surface of an ellipsoid.
#[derive(Clone, Copy, Debug)]
pub struct GlobalCoordinates {
    /// The latitude, negative is South.
    latitude: Degrees,
    /// The longitude, negative is West.
    longitude: Degrees,
}

impl GlobalCoordinates {
    /// Construct canonicalized `GlobalCoordinates`.
    /// * `latitude` - the latitude in degrees.
    /// * `longitude` - the longitude in degrees.
    #[must_use]
    pub fn new(latitude: Degrees, longitude: Degrees) -> Self {
        let (latitude, longitude) = canonicalize(latitude, longitude);
        Self {
            latitude,
            longitude,
        }
    }

    /// The latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> Degrees {
        self.latitude
    }

    /// The longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> Degrees {
        self.longitude
    }

    /// Copy these `GlobalCoordinates` with a new latitude.
    /// Note: the longitude changes if `latitude` is beyond a pole.
    #[must_use]
    pub fn with_latitude(&self, latitude: Degrees) -> Self {
        Self::new(latitude, self.longitude)
    }

    /// Copy these `GlobalCoordinates` with a new longitude.
    #[must_use]
    pub fn with_longitude(&self, longitude: Degrees) -> Self {
        Self::new(self.latitude, longitude)
    }
}

impl Validate for GlobalCoordinates {
    /// Test whether `GlobalCoordinates` are valid.
    /// I.e. -90° <= latitude <= 90° and -180° < longitude <= 180°.
    /// Only NaN or infinite inputs produce invalid `GlobalCoordinates`.
    fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude.0)
            && -180.0 < self.longitude.0
            && self.longitude.0 <= 180.0
    }
}

impl PartialEq for GlobalCoordinates {
    fn eq(&self, other: &Self) -> bool {
        self.longitude.0 == other.longitude.0 && self.latitude.0 == other.latitude.0
    }
}

impl PartialOrd for GlobalCoordinates {
    /// Western longitudes are less than eastern longitudes.
    /// If longitudes are equal, southern latitudes are less than northern.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.longitude.0.partial_cmp(&other.longitude.0) {
            Some(Ordering::Equal) => self.latitude.0.partial_cmp(&other.latitude.0),
            ordering => ordering,
        }
    }
}

impl fmt::Display for GlobalCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude.0 >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude.0 >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{}{ns};{}{ew};",
            libm::fabs(self.latitude.0),
            libm::fabs(self.longitude.0)
        )
    }
}

impl From<&LatLong> for GlobalCoordinates {
    fn from(a: &LatLong) -> Self {
        Self::new(a.lat(), a.lon())
    }
}

impl From<&GlobalCoordinates> for LatLong {
    fn from(a: &GlobalCoordinates) -> Self {
        Self::new(a.latitude, a.longitude)
    }
}

/// `GlobalCoordinates` with an elevation above the surface of the ellipsoid.
#[derive(Clone, Copy, Debug)]
pub struct GlobalPosition {
    coordinates: GlobalCoordinates,
    /// Negative elevations are below the ellipsoid.
    elevation: Metres,
}

impl GlobalPosition {
    /// Construct a `GlobalPosition` from a latitude, longitude and elevation.
    /// * `latitude` - the latitude in degrees.
    /// * `longitude` - the longitude in degrees.
    /// * `elevation` - the elevation above the ellipsoid.
    #[must_use]
    pub fn from_degrees(latitude: Degrees, longitude: Degrees, elevation: Metres) -> Self {
        Self::from_coordinates(GlobalCoordinates::new(latitude, longitude), elevation)
    }

    /// Construct a `GlobalPosition` from `GlobalCoordinates` and an elevation.
    #[must_use]
    pub const fn from_coordinates(coordinates: GlobalCoordinates, elevation: Metres) -> Self {
        Self {
            coordinates,
            elevation,
        }
    }

    #[must_use]
    pub const fn coordinates(&self) -> GlobalCoordinates {
        self.coordinates
    }

    #[must_use]
    pub const fn latitude(&self) -> Degrees {
        self.coordinates.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> Degrees {
        self.coordinates.longitude
    }

    #[must_use]
    pub const fn elevation(&self) -> Metres {
        self.elevation
    }

    /// Copy this `GlobalPosition` with a new latitude.
    #[must_use]
    pub fn with_latitude(&self, latitude: Degrees) -> Self {
        Self::from_coordinates(self.coordinates.with_latitude(latitude), self.elevation)
    }

    /// Copy this `GlobalPosition` with a new longitude.
    #[must_use]
    pub fn with_longitude(&self, longitude: Degrees) -> Self {
        Self::from_coordinates(self.coordinates.with_longitude(longitude), self.elevation)
    }

    /// Copy this `GlobalPosition` with a new elevation.
    #[must_use]
    pub const fn with_elevation(&self, elevation: Metres) -> Self {
        Self::from_coordinates(self.coordinates, elevation)
    }
}

impl Validate for GlobalPosition {
    fn is_valid(&self) -> bool {
        self.coordinates.is_valid() && self.elevation.0.is_finite()
    }
}

impl PartialEq for GlobalPosition {
    fn eq(&self, other: &Self) -> bool {
        self.elevation.0 == other.elevation.0 && self.coordinates == other.coordinates
    }
}

impl PartialOrd for GlobalPosition {
    /// Ordered by `GlobalCoordinates`, then lower elevations are less than
    /// higher elevations.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.coordinates.partial_cmp(&other.coordinates) {
            Some(Ordering::Equal) => self.elevation.0.partial_cmp(&other.elevation.0),
            ordering => ordering,
        }
    }
}

impl fmt::Display for GlobalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}elevation={}m", self.coordinates, self.elevation.0)
    }
}
