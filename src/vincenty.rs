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


//! The vincenty module contains functions for solving the direct and
//! inverse geodetic problems on the surface of an ellipsoid using
//! [Vincenty's formulae](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf).
//!
//! Both problems are solved by fixed-point iteration on the auxiliary sphere.
//! The inverse iteration may fail to converge for nearly antipodal points,
//! in which case the azimuths fall back to those of a meridian,
//! see [`solve_inverse`].

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::suboptimal_flops)]

use crate::{
    Ellipsoid, GeodeticCurve, GeodeticError, GeodeticMeasurement, GlobalCoordinates,
    GlobalPosition, Metres,
};
use angle_sc::trig::UnitNegRange;
use angle_sc::{Angle, Degrees};

/// The convergence tolerance of the fixed-point iterations, in Radians.
pub const CONVERGENCE_TOLERANCE: f64 = 1.0e-13;

/// The maximum number of iterations of the inverse solution.
pub const INVERSE_MAX_ITERATIONS: u32 = 20;

/// The maximum number of iterations of the direct solution.
pub const DIRECT_MAX_ITERATIONS: u32 = 200;

/// Calculate Vincenty's A coefficient.
/// * `u2` - the square of u: cos^2 alpha * ep^2.
#[must_use]
fn calculate_a(u2: f64) -> f64 {
    1.0 + u2 / 16384.0 * (4096.0 + u2 * (-768.0 + u2 * (320.0 - 175.0 * u2)))
}

/// Calculate Vincenty's B coefficient.
/// * `u2` - the square of u: cos^2 alpha * ep^2.
#[must_use]
fn calculate_b(u2: f64) -> f64 {
    u2 / 1024.0 * (256.0 + u2 * (-128.0 + u2 * (74.0 - 47.0 * u2)))
}

/// Calculate Vincenty's C coefficient.
/// * `f` - the flattening of the ellipsoid.
/// * `cos2_alpha` - the square of the cosine of the azimuth at the equator.
#[must_use]
fn calculate_c(f: f64, cos2_alpha: f64) -> f64 {
    f / 16.0 * cos2_alpha * (4.0 + f * (4.0 - 3.0 * cos2_alpha))
}

/// Calculate the difference between the arc length on the auxiliary sphere
/// and the arc length scaled by the ellipsoid, delta sigma.
#[must_use]
fn calculate_delta_sigma(b: f64, sin_sigma: f64, cos_sigma: f64, cos_2sigma_m: f64) -> f64 {
    let cos2_2sigma_m = cos_2sigma_m * cos_2sigma_m;
    b * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos2_2sigma_m)
                    - b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos2_2sigma_m)))
}

/// Calculate the difference between the longitude difference on the
/// auxiliary sphere and the longitude difference on the ellipsoid.
#[allow(clippy::too_many_arguments)]
#[must_use]
fn calculate_longitude_correction(
    f: f64,
    c: f64,
    sin_alpha: f64,
    sigma: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    cos_2sigma_m: f64,
) -> f64 {
    (1.0 - c)
        * f
        * sin_alpha
        * (sigma
            + c * sin_sigma
                * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)))
}

/// Normalise an azimuth in Radians into the range [0, 360) Degrees.
#[must_use]
fn normalise_azimuth(radians: f64) -> Degrees {
    let radians = if radians < 0.0 {
        radians + core::f64::consts::TAU
    } else {
        radians
    };
    let degrees = radians.to_degrees();
    Degrees(if 360.0 <= degrees {
        degrees - 360.0
    } else {
        degrees
    })
}

/// Iterate the arc length on the auxiliary sphere of the direct solution.
/// * `s_over_b_a` - the distance divided by b and Vincenty's A coefficient.
/// * `sigma1` - the arc length on the auxiliary sphere from the equator.
/// * `b` - Vincenty's B coefficient.
///
/// returns the arc length and the number of iterations taken.
///
/// # Errors
///
/// `GeodeticError::DirectNotConverged` if the arc length did not converge
/// within `DIRECT_MAX_ITERATIONS`.
fn iterate_direct_sigma(s_over_b_a: f64, sigma1: f64, b: f64) -> Result<(f64, u32), GeodeticError> {
    let mut sigma = s_over_b_a;
    let mut prev_sigma = s_over_b_a;
    for iterations in 1..=DIRECT_MAX_ITERATIONS {
        let cos_2sigma_m = libm::cos(2.0 * sigma1 + sigma);
        let delta_sigma =
            calculate_delta_sigma(b, libm::sin(sigma), libm::cos(sigma), cos_2sigma_m);
        sigma = s_over_b_a + delta_sigma;

        if libm::fabs(sigma - prev_sigma) < CONVERGENCE_TOLERANCE {
            return Ok((sigma, iterations));
        }
        prev_sigma = sigma;
    }

    tracing::warn!(
        iterations = DIRECT_MAX_ITERATIONS,
        "direct solution did not converge"
    );
    Err(GeodeticError::DirectNotConverged {
        iterations: DIRECT_MAX_ITERATIONS,
    })
}

/// The solution of the direct geodetic problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectSolution {
    /// The destination.
    destination: GlobalCoordinates,
    /// The azimuth at the destination, in the range [0°, 360°).
    ending_bearing: Degrees,
    /// The number of iterations taken to converge.
    iterations: u32,
}

impl DirectSolution {
    #[must_use]
    pub const fn destination(&self) -> GlobalCoordinates {
        self.destination
    }

    /// The azimuth of the geodesic at the destination.
    #[must_use]
    pub const fn ending_bearing(&self) -> Degrees {
        self.ending_bearing
    }

    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Solve the direct geodetic problem: calculate the destination and the
/// ending bearing from a start position, a bearing and a distance.
/// * `ellipsoid` - the `Ellipsoid`.
/// * `start` - the start position.
/// * `bearing` - the azimuth at the start position.
/// * `distance` - the distance along the ellipsoid.
///
/// # Examples
/// ```
/// use vincenty_geodesy::{vincenty, Degrees, GlobalCoordinates, Metres, WGS84_ELLIPSOID};
///
/// // Flinders Peak to Buninyong, Vincenty's test case
/// let flinders_peak = GlobalCoordinates::new(Degrees(-37.95103342), Degrees(144.42486789));
/// let solution = vincenty::solve_direct(
///     &WGS84_ELLIPSOID,
///     &flinders_peak,
///     Degrees(306.86816),
///     Metres(54_972.271),
/// )
/// .unwrap();
///
/// let buninyong = solution.destination();
/// assert!((-37.65282114 - buninyong.latitude().0).abs() < 1.0e-8);
/// assert!((143.92649554 - buninyong.longitude().0).abs() < 1.0e-8);
/// assert!((307.17363142 - solution.ending_bearing().0).abs() < 1.0e-8);
/// ```
///
/// # Errors
///
/// `GeodeticError::InvalidInput` if the distance is negative or not finite,
/// or the bearing is not finite.
/// `GeodeticError::DirectNotConverged` if the solution did not converge.
pub fn solve_direct(
    ellipsoid: &Ellipsoid,
    start: &GlobalCoordinates,
    bearing: Degrees,
    distance: Metres,
) -> Result<DirectSolution, GeodeticError> {
    if !distance.0.is_finite() {
        return Err(GeodeticError::InvalidInput("distance is not finite"));
    }
    if distance.0 < 0.0 {
        return Err(GeodeticError::InvalidInput("distance is negative"));
    }
    if !bearing.0.is_finite() {
        return Err(GeodeticError::InvalidInput("bearing is not finite"));
    }

    let b = ellipsoid.b().0;
    let f = ellipsoid.f();

    let beta1 = ellipsoid.calculate_parametric_latitude(Angle::from(start.latitude()));
    let sin_u1 = beta1.sin().0;
    let cos_u1 = beta1.cos().0;

    let alpha1 = Angle::from(bearing);
    let sin_alpha1 = alpha1.sin().0;
    let cos_alpha1 = alpha1.cos().0;

    // the arc length on the auxiliary sphere from the equator to the start
    let sigma1 = libm::atan2(sin_u1, cos_u1 * cos_alpha1);

    // the azimuth of the geodesic at the equator
    let sin_alpha = cos_u1 * sin_alpha1;
    let sin2_alpha = sin_alpha * sin_alpha;
    let cos2_alpha = 1.0 - sin2_alpha;

    let u2 = cos2_alpha * ellipsoid.ep_2();
    let big_a = calculate_a(u2);
    let big_b = calculate_b(u2);

    let (sigma, iterations) = iterate_direct_sigma(distance.0 / (b * big_a), sigma1, big_b)?;

    let sin_sigma = libm::sin(sigma);
    let cos_sigma = libm::cos(sigma);
    let cos_2sigma_m = libm::cos(2.0 * sigma1 + sigma);

    let temp = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
    let phi2 = libm::atan2(
        sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1,
        ellipsoid.one_minus_f() * libm::sqrt(sin2_alpha + temp * temp),
    );

    // atan2 avoids the sign errors of a tan based solution near the poles
    let lambda = libm::atan2(
        sin_sigma * sin_alpha1,
        cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1,
    );

    let c = calculate_c(f, cos2_alpha);
    let l = lambda
        - calculate_longitude_correction(
            f,
            c,
            sin_alpha,
            sigma,
            sin_sigma,
            cos_sigma,
            cos_2sigma_m,
        );

    let alpha2 = libm::atan2(
        sin_alpha,
        -sin_u1 * sin_sigma + cos_u1 * cos_sigma * cos_alpha1,
    );

    Ok(DirectSolution {
        destination: GlobalCoordinates::new(
            Degrees(phi2.to_degrees()),
            Degrees(start.longitude().0 + l.to_degrees()),
        ),
        ending_bearing: normalise_azimuth(alpha2),
        iterations,
    })
}

/// Solve the inverse geodetic problem: calculate the ellipsoidal distance
/// and the azimuths of the geodesic between a pair of positions.
/// * `ellipsoid` - the `Ellipsoid`.
/// * `start` - the start position.
/// * `end` - the end position.
///
/// If the iteration does not converge, e.g. the positions are nearly
/// antipodal or lie on the same meridian, the azimuths are those of the
/// meridian between the latitudes: 180° and 0° heading South, 0° and 180°
/// heading North. If the latitudes are equal the azimuths are NaN.
///
/// # Examples
/// ```
/// use vincenty_geodesy::{vincenty, Degrees, GlobalCoordinates, WGS84_ELLIPSOID};
///
/// let a = GlobalCoordinates::new(Degrees(0.0), Degrees(0.0));
/// let b = GlobalCoordinates::new(Degrees(0.0), Degrees(1.0));
/// let curve = vincenty::solve_inverse(&WGS84_ELLIPSOID, &a, &b);
/// assert!((111_319.491 - curve.ellipsoidal_distance().0).abs() < 1.0e-3);
/// assert_eq!(90.0, curve.azimuth().0);
/// assert_eq!(270.0, curve.reverse_azimuth().0);
/// ```
#[must_use]
pub fn solve_inverse(
    ellipsoid: &Ellipsoid,
    start: &GlobalCoordinates,
    end: &GlobalCoordinates,
) -> GeodeticCurve {
    let b = ellipsoid.b().0;
    let f = ellipsoid.f();

    let phi1 = start.latitude().0;
    let phi2 = end.latitude().0;

    // the longitude difference on the ellipsoid
    let omega = end.longitude().0.to_radians() - start.longitude().0.to_radians();

    let beta1 = ellipsoid.calculate_parametric_latitude(Angle::from(start.latitude()));
    let sin_u1 = beta1.sin().0;
    let cos_u1 = beta1.cos().0;
    let beta2 = ellipsoid.calculate_parametric_latitude(Angle::from(end.latitude()));
    let sin_u2 = beta2.sin().0;
    let cos_u2 = beta2.cos().0;

    let sin_u1_sin_u2 = sin_u1 * sin_u2;
    let cos_u1_sin_u2 = cos_u1 * sin_u2;
    let sin_u1_cos_u2 = sin_u1 * cos_u2;
    let cos_u1_cos_u2 = cos_u1 * cos_u2;

    let mut lambda = omega;
    let mut big_a = 0.0;
    let mut sigma = 0.0;
    let mut delta_sigma = 0.0;
    let mut converged = false;
    let mut iterations = 0;

    for i in 0..INVERSE_MAX_ITERATIONS {
        iterations = i + 1;
        let lambda0 = lambda;
        let sin_lambda = libm::sin(lambda);
        let cos_lambda = libm::cos(lambda);

        let temp1 = cos_u2 * sin_lambda;
        let temp2 = cos_u1_sin_u2 - sin_u1_cos_u2 * cos_lambda;
        let sin2_sigma = temp1 * temp1 + temp2 * temp2;
        let sin_sigma = libm::sqrt(sin2_sigma);
        let cos_sigma = sin_u1_sin_u2 + cos_u1_cos_u2 * cos_lambda;
        sigma = libm::atan2(sin_sigma, cos_sigma);

        let sin_alpha = if sin2_sigma == 0.0 {
            0.0
        } else {
            UnitNegRange::clamp(cos_u1_cos_u2 * sin_lambda / sin_sigma).0
        };
        let cos_alpha = libm::cos(libm::asin(sin_alpha));
        let cos2_alpha = cos_alpha * cos_alpha;

        let cos_2sigma_m = if cos2_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1_sin_u2 / cos2_alpha
        };

        let u2 = cos2_alpha * ellipsoid.ep_2();
        big_a = calculate_a(u2);
        let big_b = calculate_b(u2);
        delta_sigma = calculate_delta_sigma(big_b, sin_sigma, cos_sigma, cos_2sigma_m);

        let c = calculate_c(f, cos2_alpha);
        lambda = omega
            + calculate_longitude_correction(
                f,
                c,
                sin_alpha,
                sigma,
                sin_sigma,
                cos_sigma,
                cos_2sigma_m,
            );

        // NaN if lambda is zero, i.e. the positions are on the same meridian
        let change = libm::fabs((lambda - lambda0) / lambda);
        if (i > 1) && (change < CONVERGENCE_TOLERANCE) {
            converged = true;
            break;
        }
    }

    let s = Metres(b * big_a * (sigma - delta_sigma));

    if converged {
        let sin_lambda = libm::sin(lambda);
        let cos_lambda = libm::cos(lambda);
        let alpha1 = libm::atan2(
            cos_u2 * sin_lambda,
            cos_u1_sin_u2 - sin_u1_cos_u2 * cos_lambda,
        );
        let alpha2 = libm::atan2(
            cos_u1 * sin_lambda,
            -sin_u1_cos_u2 + cos_u1_sin_u2 * cos_lambda,
        ) + core::f64::consts::PI;
        GeodeticCurve::new(s, normalise_azimuth(alpha1), normalise_azimuth(alpha2))
    } else {
        tracing::debug!(
            start_latitude = phi1,
            end_latitude = phi2,
            iterations,
            "inverse solution did not converge, using meridian azimuths"
        );
        let (alpha1, alpha2) = if phi1 > phi2 {
            (Degrees(180.0), Degrees(0.0))
        } else if phi1 < phi2 {
            (Degrees(0.0), Degrees(180.0))
        } else {
            (Degrees(f64::NAN), Degrees(f64::NAN))
        };
        GeodeticCurve::new(s, alpha1, alpha2)
    }
}

/// Calculate the three dimensional measurement between a pair of positions
/// with elevations.
///
/// The ellipsoidal distance and azimuths are calculated on an ellipsoid
/// with the flattening of `ellipsoid` whose surface passes through the mean
/// elevation of the positions at their mean latitude.
/// * `ellipsoid` - the `Ellipsoid`.
/// * `start` - the start position.
/// * `end` - the end position.
///
/// # Examples
/// ```
/// use vincenty_geodesy::{vincenty, Degrees, GlobalPosition, Metres, WGS84_ELLIPSOID};
///
/// let pikes_peak =
///     GlobalPosition::from_degrees(Degrees(38.840511), Degrees(-105.0445896), Metres(4301.0));
/// let alcatraz =
///     GlobalPosition::from_degrees(Degrees(37.826389), Degrees(-122.4225), Metres(0.0));
///
/// let measurement = vincenty::solve_3d(&WGS84_ELLIPSOID, &pikes_peak, &alcatraz).unwrap();
/// assert!((1_521_782.748 - measurement.ellipsoidal_distance().0).abs() < 1.0e-3);
/// assert_eq!(-4301.0, measurement.elevation_change().0);
/// ```
///
/// # Errors
///
/// `GeodeticError::InvalidEllipsoid` if the mean elevation is so far below
/// the ellipsoid that the adjusted Semimajor axis is not positive.
pub fn solve_3d(
    ellipsoid: &Ellipsoid,
    start: &GlobalPosition,
    end: &GlobalPosition,
) -> Result<GeodeticMeasurement, GeodeticError> {
    let mean_elevation = 0.5 * (start.elevation().0 + end.elevation().0);
    let mean_latitude = Angle::from(Degrees(0.5 * (start.latitude().0 + end.latitude().0)));

    let a = ellipsoid.a().0 + mean_elevation * (1.0 + ellipsoid.f() * mean_latitude.sin().0);
    tracing::trace!(semimajor_axis = a, "adjusted ellipsoid");
    let adjusted = Ellipsoid::from_a_and_f(Metres(a), ellipsoid.f())?;

    let curve = solve_inverse(&adjusted, &start.coordinates(), &end.coordinates());
    Ok(GeodeticMeasurement::from_curve(
        curve,
        Metres(end.elevation().0 - start.elevation().0),
    ))
}
