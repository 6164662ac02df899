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

//! The ellipsoid module contains types and functions for defining an ellipsoid
//! given its Semimajor axis (the equivalent of its radius) and either its
//! flattening or inverse flattening ratio.
//!
//! It also contains the read-only registry of the named preset ellipsoids.

#![allow(clippy::suboptimal_flops)]

pub mod presets;

use crate::{
    Ellipsoid, GeodeticError, Metres, ANS_ELLIPSOID, CLARKE1858_ELLIPSOID, CLARKE1880_ELLIPSOID,
    GRS67_ELLIPSOID, GRS80_ELLIPSOID, SPHERE, WGS72_ELLIPSOID, WGS84_ELLIPSOID,
};
use angle_sc::Angle;

/// The names of the preset ellipsoids, see [`named`].
pub const PRESET_NAMES: [&str; 8] = [
    "WGS84",
    "GRS80",
    "GRS67",
    "ANS",
    "WGS72",
    "Clarke1858",
    "Clarke1880",
    "Sphere",
];

/// Find a preset `Ellipsoid` by name, ignoring ASCII case.
/// * `name` - one of the [`PRESET_NAMES`].
///
/// returns the static preset `Ellipsoid` or None if `name` is unknown.
/// # Examples
/// ```
/// use vincenty_geodesy::ellipsoid::named;
///
/// let grs80 = named("grs80").unwrap();
/// assert_eq!(298.257_222_101, grs80.inverse_f());
/// assert!(named("Airy1830").is_none());
/// ```
#[must_use]
pub fn named(name: &str) -> Option<&'static Ellipsoid> {
    let index = PRESET_NAMES
        .iter()
        .position(|preset| preset.eq_ignore_ascii_case(name))?;
    let ellipsoid: &'static Ellipsoid = match index {
        0 => &WGS84_ELLIPSOID,
        1 => &GRS80_ELLIPSOID,
        2 => &GRS67_ELLIPSOID,
        3 => &ANS_ELLIPSOID,
        4 => &WGS72_ELLIPSOID,
        5 => &CLARKE1858_ELLIPSOID,
        6 => &CLARKE1880_ELLIPSOID,
        _ => &SPHERE,
    };
    Some(ellipsoid)
}

/// Check the defining parameters of an ellipsoid.
/// * `a` - the Semimajor axis, it must be finite and positive.
/// * `f` - the flattening ratio, it must be in the range [0, 1).
///
/// returns `GeodeticError::InvalidEllipsoid` if the parameters do not
/// define an oblate ellipsoid or a sphere.
pub fn validate_parameters(a: Metres, f: f64) -> Result<(), GeodeticError> {
    if a.0.is_finite() && 0.0 < a.0 && (0.0..1.0).contains(&f) {
        Ok(())
    } else {
        Err(GeodeticError::InvalidEllipsoid { a: a.0, f })
    }
}

/// Calculate the flattening of an ellipsoid from its inverse flattening.
/// * `inverse_f` - the inverse flattening, infinite for a sphere.
/// # Examples
/// ```
/// use vincenty_geodesy::ellipsoid::{calculate_flattening, presets};
///
/// assert_eq!(1.0 / 298.257_223_563, calculate_flattening(presets::WGS84_INVERSE_F));
/// assert_eq!(0.0, calculate_flattening(f64::INFINITY));
/// ```
#[must_use]
pub fn calculate_flattening(inverse_f: f64) -> f64 {
    1.0 / inverse_f
}

/// Calculate the Semiminor axis of an ellipsoid.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use vincenty_geodesy::Metres;
/// use vincenty_geodesy::ellipsoid::{calculate_flattening, calculate_minor_axis, presets};
///
/// // The WGS 84 Semiminor axis measured in metres.
/// let b : Metres = Metres(6_356_752.314_245_179);
/// let f = calculate_flattening(presets::WGS84_INVERSE_F);
/// assert_eq!(b, calculate_minor_axis(presets::WGS84_A, f));
/// ```
#[must_use]
pub fn calculate_minor_axis(a: Metres, f: f64) -> Metres {
    Metres(a.0 * (1.0 - f))
}

/// Calculate the square of the Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use vincenty_geodesy::ellipsoid::{calculate_flattening, calculate_sq_eccentricity, presets};
///
/// // The WGS 84 sq_eccentricity.
/// let f = calculate_flattening(presets::WGS84_INVERSE_F);
/// assert_eq!(0.0066943799901413165, calculate_sq_eccentricity(f));
/// ```
#[must_use]
pub fn calculate_sq_eccentricity(f: f64) -> f64 {
    f * (2.0 - f)
}

/// Calculate the square of the second Eccentricity of an ellipsoid,
/// i.e. (a² - b²) / b².
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use vincenty_geodesy::ellipsoid::{calculate_flattening, calculate_sq_2nd_eccentricity, presets};
///
/// // The WGS 84 sq 2nd eccentricity.
/// let f = calculate_flattening(presets::WGS84_INVERSE_F);
/// assert_eq!(0.006739496742276434, calculate_sq_2nd_eccentricity(f));
/// ```
#[must_use]
pub fn calculate_sq_2nd_eccentricity(f: f64) -> f64 {
    let one_minus_f = 1.0 - f;
    calculate_sq_eccentricity(f) / (one_minus_f * one_minus_f)
}

/// Function to convert a `geodetic` Latitude to a `parametric` (reduced)
/// Latitude on the auxiliary sphere, i.e. tan(beta) = (1 - f) * tan(lat).
/// * `lat` - the `geodetic` Latitude
/// * `one_minus_f` - one minus the flattening ratio.
#[must_use]
pub fn calculate_parametric_latitude(lat: Angle, one_minus_f: f64) -> Angle {
    Angle::from_y_x(one_minus_f * lat.sin().0, lat.cos().0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::{is_within_tolerance, Degrees, Radians};

    #[test]
    fn test_validate_parameters() {
        assert!(validate_parameters(presets::WGS84_A, 1.0 / presets::WGS84_INVERSE_F).is_ok());
        assert!(validate_parameters(presets::SPHERE_RADIUS, 0.0).is_ok());

        assert_eq!(
            Err(GeodeticError::InvalidEllipsoid { a: 0.0, f: 0.1 }),
            validate_parameters(Metres(0.0), 0.1)
        );
        assert!(validate_parameters(Metres(-6_378_137.0), 0.1).is_err());
        assert!(validate_parameters(Metres(f64::INFINITY), 0.1).is_err());
        assert!(validate_parameters(Metres(f64::NAN), 0.1).is_err());
        assert!(validate_parameters(presets::WGS84_A, -0.1).is_err());
        assert!(validate_parameters(presets::WGS84_A, 1.0).is_err());
        assert!(validate_parameters(presets::WGS84_A, f64::NAN).is_err());
    }

    #[test]
    fn test_named() {
        for name in PRESET_NAMES {
            let ellipsoid = named(name).unwrap();
            assert!(0.0 < ellipsoid.a().0);
        }

        assert_eq!(&*WGS84_ELLIPSOID, named("WGS84").unwrap());
        assert_eq!(&*WGS84_ELLIPSOID, named("wgs84").unwrap());
        assert_eq!(&*CLARKE1880_ELLIPSOID, named("CLARKE1880").unwrap());
        assert_eq!(0.0, named("sphere").unwrap().f());
        assert!(named("").is_none());
        assert!(named("WGS 84").is_none());
    }

    #[test]
    fn test_calculate_parametric_latitude() {
        let one_minus_f = 1.0 - 1.0 / presets::WGS84_INVERSE_F;

        for i in -90_i32..91 {
            let latitude = f64::from(i);
            let lat = Angle::from(Degrees(latitude));
            let beta = calculate_parametric_latitude(lat, one_minus_f);

            // compare with the tangent formula away from the poles
            if i.abs() < 90 {
                let expected = libm::atan(one_minus_f * libm::tan(latitude.to_radians()));
                assert!(is_within_tolerance(
                    expected,
                    Radians::from(beta).0,
                    32.0 * f64::EPSILON
                ));
            }
            // the parametric latitude is closer to the Equator
            assert!(libm::fabs(beta.sin().0) <= libm::fabs(lat.sin().0));
        }

        let pole = calculate_parametric_latitude(Angle::from(Degrees(90.0)), one_minus_f);
        assert_eq!(1.0, pole.sin().0);
        assert_eq!(0.0, pole.cos().0);
    }
}
