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

//! The presets module contains the defining parameters of the named
//! reference ellipsoids: the Semimajor axis and the inverse flattening.
//!
//! The WGS 84 values are from the ICAO
//! [WGS 84 Implementation Manual Version 2.4](https://www.icao.int/safety/pbn/Documentation/EUROCONTROL/Eurocontrol%20WGS%2084%20Implementation%20Manual.pdf)
//! Chapter 3, page 14.

use crate::ellipsoid::Metres;

/// The WGS 84 Semimajor axis measured in metres.  
/// This is the radius at the equator.
pub const WGS84_A: Metres = Metres(6_378_137.0);
/// The WGS 84 inverse flattening.
pub const WGS84_INVERSE_F: f64 = 298.257_223_563;

/// The GRS 80 Semimajor axis measured in metres.
pub const GRS80_A: Metres = Metres(6_378_137.0);
/// The GRS 80 inverse flattening.
pub const GRS80_INVERSE_F: f64 = 298.257_222_101;

/// The GRS 67 Semimajor axis measured in metres.
pub const GRS67_A: Metres = Metres(6_378_160.0);
/// The GRS 67 inverse flattening.
pub const GRS67_INVERSE_F: f64 = 298.25;

/// The Australian National Spheroid Semimajor axis measured in metres.
pub const ANS_A: Metres = Metres(6_378_160.0);
/// The Australian National Spheroid inverse flattening.
pub const ANS_INVERSE_F: f64 = 298.25;

/// The WGS 72 Semimajor axis measured in metres.
pub const WGS72_A: Metres = Metres(6_378_135.0);
/// The WGS 72 inverse flattening.
pub const WGS72_INVERSE_F: f64 = 298.26;

/// The Clarke 1858 Semimajor axis measured in metres.
pub const CLARKE1858_A: Metres = Metres(6_378_293.645);
/// The Clarke 1858 inverse flattening.
pub const CLARKE1858_INVERSE_F: f64 = 294.26;

/// The Clarke 1880 Semimajor axis measured in metres.
pub const CLARKE1880_A: Metres = Metres(6_378_249.145);
/// The Clarke 1880 inverse flattening.
pub const CLARKE1880_INVERSE_F: f64 = 293.465;

/// The radius of the spherical "ellipsoid" in metres, the mean Earth radius.
pub const SPHERE_RADIUS: Metres = Metres(6_371_000.0);
