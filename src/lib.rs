// Copyright (c) 2024-2025 Ken Barker

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

//! vincenty-geodesy
//!
//! A library for solving the direct and inverse geodetic problems on a
//! reference ellipsoid, e.g. the
//! [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//! ellipsoid, using
//! [Vincenty's formulae](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf).
//!
//! ## Geodetic problems
//!
//! The shortest path between two points on the surface of an ellipsoid is a
//! [geodesic](https://en.wikipedia.org/wiki/Geodesics_on_an_ellipsoid).
//! It is the equivalent of a straight line segment in planar geometry or a
//! [great circle arc](https://en.wikipedia.org/wiki/Great_circle) on the
//! surface of a sphere.
//!
//! - the *direct* problem: given a start position, an azimuth and a distance,
//!   find the end position and the azimuth at the end position;
//! - the *inverse* problem: given two positions, find the length of the
//!   geodesic between them and its azimuths at both positions.
//!
//! The library also calculates three dimensional measurements between
//! positions with elevations, see [`vincenty::solve_3d`].
//!
//! ## Design
//!
//! The library is based on Mike Gavaghan's
//! [Geodesy](http://www.gavaghan.org/blog/free-source-code/geodesy-library-vincentys-formula/)
//! library.
//!
//! The `Ellipsoid` class represents an ellipsoid of revolution.
//! The statics, e.g. `WGS84_ELLIPSOID`, represent the preset `Ellipsoid`s.
//! `GlobalCoordinates` and `GlobalPosition` are immutable values whose latitudes
//! and longitudes are canonicalized on construction.
//! The results of the calculations are `DirectSolution`, `GeodeticCurve` and
//! `GeodeticMeasurement`.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`.
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres`.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications.
//!
//! # Examples
//! ```
//! use vincenty_geodesy::*;
//!
//! let calculator = GeodeticCalculator::default();
//!
//! let lincoln_memorial = GlobalCoordinates::new(Degrees(38.88922), Degrees(-77.04978));
//! let eiffel_tower = GlobalCoordinates::new(Degrees(48.85889), Degrees(2.29583));
//!
//! let curve = calculator.inverse(&lincoln_memorial, &eiffel_tower);
//! assert!((6_179_016.136 - curve.ellipsoidal_distance().0).abs() < 1.0e-3);
//!
//! let solution = calculator
//!     .direct(&lincoln_memorial, curve.azimuth(), curve.ellipsoidal_distance())
//!     .unwrap();
//! assert!((48.85889 - solution.destination().latitude().0).abs() < 1.0e-9);
//! ```

#![cfg_attr(not(test), no_std)]

extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod coordinates;
pub mod curve;
pub mod ellipsoid;
pub mod error;
pub mod vincenty;

pub use angle_sc::{Angle, Degrees, Radians, Validate};
pub use coordinates::{GlobalCoordinates, GlobalPosition};
pub use curve::{GeodeticCurve, GeodeticMeasurement};
pub use error::GeodeticError;
pub use icao_units::si::Metres;
pub use unit_sphere::LatLong;
pub use vincenty::DirectSolution;

use ellipsoid::presets;
use lazy_static::lazy_static;

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,
    /// The inverse flattening of the ellipsoid, infinite for a sphere.
    inverse_f: f64,

    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
}

impl Ellipsoid {
    /// Construct an `Ellipsoid` from parameters that have been validated.
    fn from_parameters(a: Metres, f: f64, inverse_f: f64) -> Self {
        Self {
            a,
            b: ellipsoid::calculate_minor_axis(a, f),
            f,
            inverse_f,
            one_minus_f: 1.0 - f,
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(f),
        }
    }

    /// Construct a preset `Ellipsoid`.
    fn preset(a: Metres, inverse_f: f64) -> Self {
        Self::from_parameters(a, ellipsoid::calculate_flattening(inverse_f), inverse_f)
    }

    /// Construct an `Ellipsoid` from its Semimajor axis and flattening.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio in the range [0, 1).
    ///
    /// # Errors
    ///
    /// `GeodeticError::InvalidEllipsoid` if `a` is not positive or `f` is out
    /// of range.
    pub fn from_a_and_f(a: Metres, f: f64) -> Result<Self, GeodeticError> {
        ellipsoid::validate_parameters(a, f)?;
        Ok(Self::from_parameters(a, f, 1.0 / f))
    }

    /// Construct an `Ellipsoid` from its Semimajor axis and inverse flattening.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `inverse_f` - the inverse flattening of the `Ellipsoid`,
    ///   greater than one, infinite for a sphere.
    ///
    /// # Errors
    ///
    /// `GeodeticError::InvalidEllipsoid` if `a` is not positive or
    /// `inverse_f` is not greater than one.
    pub fn from_a_and_inverse_f(a: Metres, inverse_f: f64) -> Result<Self, GeodeticError> {
        let f = ellipsoid::calculate_flattening(inverse_f);
        if inverse_f <= 1.0 || inverse_f.is_nan() {
            return Err(GeodeticError::InvalidEllipsoid { a: a.0, f });
        }
        ellipsoid::validate_parameters(a, f)?;
        Ok(Self::from_parameters(a, f, inverse_f))
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::preset(presets::WGS84_A, presets::WGS84_INVERSE_F)
    }

    /// Construct an `Ellipsoid` with the GRS-80 parameters.
    #[must_use]
    pub fn grs80() -> Self {
        Self::preset(presets::GRS80_A, presets::GRS80_INVERSE_F)
    }

    /// Construct a spherical `Ellipsoid` with the mean Earth radius.
    #[must_use]
    pub fn sphere() -> Self {
        Self::from_parameters(presets::SPHERE_RADIUS, 0.0, f64::INFINITY)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The inverse flattening of the ellipsoid.
    #[must_use]
    pub const fn inverse_f(&self) -> f64 {
        self.inverse_f
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }

    /// Convert a geodetic Latitude to a parametric Latitude on the
    /// auxiliary sphere.
    /// * `lat` - the geodetic Latitude
    #[must_use]
    pub fn calculate_parametric_latitude(&self, lat: Angle) -> Angle {
        ellipsoid::calculate_parametric_latitude(lat, self.one_minus_f)
    }
}

impl Validate for Ellipsoid {
    /// Test whether an `Ellipsoid` is valid.
    /// Whether 0 < `a`, 0 <= `f` < 1 and 0 < `b`.
    fn is_valid(&self) -> bool {
        ellipsoid::validate_parameters(self.a, self.f).is_ok() && 0.0 < self.b.0
    }
}

lazy_static! {
    /// A static instance of the WGS-84 `Ellipsoid`.
    pub static ref WGS84_ELLIPSOID: Ellipsoid = Ellipsoid::wgs84();
    /// A static instance of the GRS-80 `Ellipsoid`.
    pub static ref GRS80_ELLIPSOID: Ellipsoid = Ellipsoid::grs80();
    /// A static instance of the GRS-67 `Ellipsoid`.
    pub static ref GRS67_ELLIPSOID: Ellipsoid =
        Ellipsoid::preset(presets::GRS67_A, presets::GRS67_INVERSE_F);
    /// A static instance of the Australian National Spheroid.
    pub static ref ANS_ELLIPSOID: Ellipsoid =
        Ellipsoid::preset(presets::ANS_A, presets::ANS_INVERSE_F);
    /// A static instance of the WGS-72 `Ellipsoid`.
    pub static ref WGS72_ELLIPSOID: Ellipsoid =
        Ellipsoid::preset(presets::WGS72_A, presets::WGS72_INVERSE_F);
    /// A static instance of the Clarke 1858 `Ellipsoid`.
    pub static ref CLARKE1858_ELLIPSOID: Ellipsoid =
        Ellipsoid::preset(presets::CLARKE1858_A, presets::CLARKE1858_INVERSE_F);
    /// A static instance of the Clarke 1880 `Ellipsoid`.
    pub static ref CLARKE1880_ELLIPSOID: Ellipsoid =
        Ellipsoid::preset(presets::CLARKE1880_A, presets::CLARKE1880_INVERSE_F);
    /// A static instance of a spherical "ellipsoid".
    pub static ref SPHERE: Ellipsoid = Ellipsoid::sphere();
}

/// A calculator for the geodetic problems on an `Ellipsoid`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodeticCalculator<'a> {
    /// A reference to the underlying `Ellipsoid`.
    ellipsoid: &'a Ellipsoid,
}

impl<'a> GeodeticCalculator<'a> {
    /// Construct a `GeodeticCalculator` for an `Ellipsoid`.
    #[must_use]
    pub const fn new(ellipsoid: &'a Ellipsoid) -> Self {
        Self { ellipsoid }
    }

    /// Accessor for the reference to the underlying `Ellipsoid`.
    #[must_use]
    pub const fn ellipsoid(&self) -> &Ellipsoid {
        self.ellipsoid
    }

    /// Solve the direct geodetic problem, see [`vincenty::solve_direct`].
    /// * `start` - the start position.
    /// * `bearing` - the azimuth at the start position.
    /// * `distance` - the distance to travel.
    ///
    /// # Errors
    ///
    /// `GeodeticError::InvalidInput` if the distance is negative or the
    /// inputs are not finite, `GeodeticError::DirectNotConverged` if the
    /// solution did not converge.
    pub fn direct(
        &self,
        start: &GlobalCoordinates,
        bearing: Degrees,
        distance: Metres,
    ) -> Result<DirectSolution, GeodeticError> {
        vincenty::solve_direct(self.ellipsoid, start, bearing, distance)
    }

    /// Solve the inverse geodetic problem, see [`vincenty::solve_inverse`].
    #[must_use]
    pub fn inverse(&self, start: &GlobalCoordinates, end: &GlobalCoordinates) -> GeodeticCurve {
        vincenty::solve_inverse(self.ellipsoid, start, end)
    }

    /// The ellipsoidal distance between a pair of positions.
    #[must_use]
    pub fn distance(&self, start: &GlobalCoordinates, end: &GlobalCoordinates) -> Metres {
        self.inverse(start, end).ellipsoidal_distance()
    }

    /// Calculate the three dimensional measurement between a pair of
    /// positions, see [`vincenty::solve_3d`].
    ///
    /// # Errors
    ///
    /// `GeodeticError::InvalidEllipsoid` if the mean elevation is so far
    /// below the ellipsoid that no ellipsoid passes through it.
    pub fn measurement(
        &self,
        start: &GlobalPosition,
        end: &GlobalPosition,
    ) -> Result<GeodeticMeasurement, GeodeticError> {
        vincenty::solve_3d(self.ellipsoid, start, end)
    }
}

impl Default for GeodeticCalculator<'static> {
    /// A `GeodeticCalculator` on the WGS-84 `Ellipsoid`.
    fn default() -> Self {
        Self::new(&WGS84_ELLIPSOID)
    }
}

impl From<(&GlobalCoordinates, &GlobalCoordinates)> for GeodeticCurve {
    /// Construct a `GeodeticCurve` between a pair of positions on the
    /// WGS-84 `Ellipsoid`.
    fn from(params: (&GlobalCoordinates, &GlobalCoordinates)) -> Self {
        vincenty::solve_inverse(&WGS84_ELLIPSOID, params.0, params.1)
    }
}

impl From<(&GlobalPosition, &GlobalPosition)> for GeodeticMeasurement {
    /// Construct a `GeodeticMeasurement` between a pair of positions on the
    /// WGS-84 `Ellipsoid`.
    ///
    /// Note: the ellipsoidal distance is NaN if the mean elevation is below
    /// the centre of the WGS-84 `Ellipsoid`.
    fn from(params: (&GlobalPosition, &GlobalPosition)) -> Self {
        vincenty::solve_3d(&WGS84_ELLIPSOID, params.0, params.1).unwrap_or_else(|_| {
            GeodeticMeasurement::new(
                Metres(f64::NAN),
                Degrees(f64::NAN),
                Degrees(f64::NAN),
                Metres(params.1.elevation().0 - params.0.elevation().0),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_ellipsoid_wgs84() {
        let wgs84 = Ellipsoid::wgs84();
        assert!(wgs84.is_valid());
        assert_eq!(6_378_137.0, wgs84.a().0);
        assert_eq!(6_356_752.314_245_179, wgs84.b().0);
        assert_eq!(1.0 / 298.257_223_563, wgs84.f());
        assert_eq!(298.257_223_563, wgs84.inverse_f());
        assert_eq!(1.0 - 1.0 / 298.257_223_563, wgs84.one_minus_f());
        assert_eq!(0.006739496742276434, wgs84.ep_2());

        assert_eq!(wgs84, *WGS84_ELLIPSOID);
        let wgs84_clone = wgs84.clone();
        assert_eq!(wgs84_clone, wgs84);
        println!("Ellipsoid: {:?}", wgs84);
    }

    #[test]
    fn test_ellipsoid_construction_paths() {
        let a = Metres(6_378_137.0);
        let from_inverse_f = Ellipsoid::from_a_and_inverse_f(a, 298.257_223_563).unwrap();
        let from_f = Ellipsoid::from_a_and_f(a, 1.0 / 298.257_223_563).unwrap();
        assert_eq!(from_inverse_f, from_f);
        assert_eq!(*WGS84_ELLIPSOID, from_f);

        let from_inverse_f = Ellipsoid::from_a_and_inverse_f(a, 298.257_222_101).unwrap();
        assert_eq!(*GRS80_ELLIPSOID, from_inverse_f);
        assert_eq!(from_inverse_f.f(), 1.0 / from_inverse_f.inverse_f());
    }

    #[test]
    fn test_ellipsoid_sphere() {
        let sphere = Ellipsoid::from_a_and_f(Metres(6_371_000.0), 0.0).unwrap();
        assert!(sphere.is_valid());
        assert_eq!(sphere.a(), sphere.b());
        assert_eq!(0.0, sphere.ep_2());
        assert!(sphere.inverse_f().is_infinite());
        assert_eq!(*SPHERE, sphere);

        let sphere = Ellipsoid::from_a_and_inverse_f(Metres(6_371_000.0), f64::INFINITY).unwrap();
        assert_eq!(*SPHERE, sphere);
    }

    #[test]
    fn test_ellipsoid_invalid() {
        assert_eq!(
            Err(GeodeticError::InvalidEllipsoid { a: -1.0, f: 0.0 }),
            Ellipsoid::from_a_and_f(Metres(-1.0), 0.0)
        );
        assert!(Ellipsoid::from_a_and_f(Metres(0.0), 0.0).is_err());
        assert!(Ellipsoid::from_a_and_f(Metres(6_378_137.0), 1.0).is_err());
        assert!(Ellipsoid::from_a_and_f(Metres(6_378_137.0), -0.01).is_err());
        assert!(Ellipsoid::from_a_and_inverse_f(Metres(6_378_137.0), 1.0).is_err());
        assert!(Ellipsoid::from_a_and_inverse_f(Metres(6_378_137.0), 0.0).is_err());
        assert!(Ellipsoid::from_a_and_inverse_f(Metres(6_378_137.0), -298.0).is_err());
        assert!(Ellipsoid::from_a_and_inverse_f(Metres(6_378_137.0), f64::NAN).is_err());
        assert!(Ellipsoid::from_a_and_inverse_f(Metres(-6_378_137.0), 298.0).is_err());
    }

    #[test]
    fn test_preset_ellipsoids() {
        assert_eq!(6_378_160.0, GRS67_ELLIPSOID.a().0);
        assert_eq!(298.25, GRS67_ELLIPSOID.inverse_f());
        assert_eq!(*GRS67_ELLIPSOID, *ANS_ELLIPSOID);
        assert_eq!(6_378_135.0, WGS72_ELLIPSOID.a().0);
        assert_eq!(294.26, CLARKE1858_ELLIPSOID.inverse_f());
        assert_eq!(6_378_249.145, CLARKE1880_ELLIPSOID.a().0);

        for ellipsoid in [
            &*WGS84_ELLIPSOID,
            &*GRS80_ELLIPSOID,
            &*GRS67_ELLIPSOID,
            &*ANS_ELLIPSOID,
            &*WGS72_ELLIPSOID,
            &*CLARKE1858_ELLIPSOID,
            &*CLARKE1880_ELLIPSOID,
            &*SPHERE,
        ] {
            assert!(ellipsoid.is_valid());
            assert!(ellipsoid.b().0 <= ellipsoid.a().0);
            assert!(is_within_tolerance(
                ellipsoid.a().0 * (1.0 - ellipsoid.f()),
                ellipsoid.b().0,
                1.0e-9
            ));
        }
    }

    #[test]
    fn test_geodetic_calculator() {
        let calculator = GeodeticCalculator::default();
        assert_eq!(*WGS84_ELLIPSOID, *calculator.ellipsoid());

        let istanbul = GlobalCoordinates::new(Degrees(42.0), Degrees(29.0));
        let washington = GlobalCoordinates::new(Degrees(39.0), Degrees(-77.0));

        let curve = calculator.inverse(&istanbul, &washington);
        assert!(is_within_tolerance(
            8_339_863.136_024_537,
            curve.ellipsoidal_distance().0,
            1.0e-4
        ));
        assert!(is_within_tolerance(
            309.306_246_959_031_5,
            curve.azimuth().0,
            1.0e-9
        ));
        assert!(is_within_tolerance(
            47.735_339_288_207_975,
            curve.reverse_azimuth().0,
            1.0e-9
        ));
        assert_eq!(
            curve.ellipsoidal_distance(),
            calculator.distance(&istanbul, &washington)
        );
        assert_eq!(curve, GeodeticCurve::from((&istanbul, &washington)));

        let solution = calculator
            .direct(&istanbul, curve.azimuth(), curve.ellipsoidal_distance())
            .unwrap();
        assert!(is_within_tolerance(
            39.0,
            solution.destination().latitude().0,
            1.0e-9
        ));
        assert!(is_within_tolerance(
            -77.0,
            solution.destination().longitude().0,
            1.0e-9
        ));
    }

    #[test]
    fn test_geodetic_calculator_measurement() {
        let sphere_calculator = GeodeticCalculator::new(&SPHERE);
        assert_eq!(0.0, sphere_calculator.ellipsoid().f());

        let pikes_peak =
            GlobalPosition::from_degrees(Degrees(38.840511), Degrees(-105.0445896), Metres(4301.0));
        let alcatraz =
            GlobalPosition::from_degrees(Degrees(37.826389), Degrees(-122.4225), Metres(0.0));

        let calculator = GeodeticCalculator::default();
        let measurement = calculator.measurement(&pikes_peak, &alcatraz).unwrap();
        assert!(is_within_tolerance(
            1_521_788.826,
            measurement.point_to_point_distance().0,
            1.0e-3
        ));
        assert_eq!(-4301.0, measurement.elevation_change().0);
        assert_eq!(
            measurement,
            GeodeticMeasurement::from((&pikes_peak, &alcatraz))
        );

        // the mean elevation is below the centre of the Earth
        let deep = alcatraz.with_elevation(Metres(-20_000_000.0));
        assert!(calculator.measurement(&deep, &deep).is_err());
        let measurement = GeodeticMeasurement::from((&deep, &deep));
        assert!(measurement.ellipsoidal_distance().0.is_nan());
        assert_eq!(0.0, measurement.elevation_change().0);
    }
}
