//! Named scale factors for raw wire fields.
//!
//! Every physical-unit field is transmitted as an unsigned (or
//! two's-complement) fixed-width integer and converted as `raw * scale`.
//! The constants below are the wire contract shared with the sender; encode
//! paths (test fixtures included) must divide by the same constants rather
//! than recomputing values inline.
//!
//! Latitude/longitude use the semicircle convention: a 32-bit raw value
//! spans 180 degrees per 2^31 units. 16-bit angular fields use the matching
//! 180 / 2^15 step.

/// Degrees per unit for 32-bit latitude/longitude fields.
const SEMICIRCLE_32: f64 = 180.0 / 2_147_483_648.0;

/// Degrees per unit for 16-bit angular fields.
const SEMICIRCLE_16: f64 = 180.0 / 32_768.0;

// --- Opcode 101: position report ---

/// Latitude, degrees per unit.
pub const LAT_101: f64 = SEMICIRCLE_32;
/// Longitude, degrees per unit.
pub const LNG_101: f64 = SEMICIRCLE_32;
/// Altitude, feet per unit.
pub const ALT_101: f64 = 2.0;
/// North velocity component, feet/second per unit.
pub const VEL_NORTH: f64 = 0.1;
/// East velocity component, feet/second per unit.
pub const VEL_EAST: f64 = 0.1;
/// Up velocity component, feet/second per unit.
pub const VEL_UP: f64 = 0.1;
/// True heading, degrees per unit.
pub const HDG_TRUE: f64 = SEMICIRCLE_16;

// --- Opcode 102: member metadata ---

/// Radio frequencies, MHz per unit (raw kHz).
pub const RADIO_FREQ: f64 = 0.001;
/// Internal track identifier scaling.
pub const TRACK_ID: f64 = 1.0;
/// Barometric altitude, feet per unit.
pub const BARO_ALT: f64 = 0.25;
/// Ground speed, knots per unit.
pub const GS_102: f64 = 0.1;
/// Mach number per unit.
pub const MACH: f64 = 0.001;
/// Radar zone azimuth, degrees per unit.
pub const RADAR_AZ: f64 = SEMICIRCLE_16;
/// Radar zone elevation, degrees per unit.
pub const RADAR_EL: f64 = SEMICIRCLE_16;
/// Fuel, pounds per unit.
pub const FUEL: f64 = 10.0;
/// Circle ranges, nautical miles per unit.
pub const CIRCLE_RANGE: f64 = 0.1;

// --- Opcode 103: engagement ---

/// Outer launch-range threshold, nautical miles per unit.
pub const D_MAX1: f64 = 0.1;
/// Mid launch-range threshold, nautical miles per unit.
pub const D_MAX2: f64 = 0.1;
/// Minimum-range threshold, nautical miles per unit.
pub const D_MIN: f64 = 0.01;

// --- Opcode 104: target report ---

/// Latitude, degrees per unit.
pub const LAT_104: f64 = SEMICIRCLE_32;
/// Longitude, degrees per unit.
pub const LNG_104: f64 = SEMICIRCLE_32;
/// Altitude, feet per unit.
pub const ALT_104: f64 = 2.0;
/// Heading, degrees per unit.
pub const HDG_104: f64 = SEMICIRCLE_16;
/// Ground speed, knots per unit.
pub const GS_104: f64 = 0.1;
/// Slant range, nautical miles per unit.
pub const RANGE_104: f64 = 0.01;

// --- Opcode 106: threat warning ---

/// Threat range, nautical miles per unit.
pub const THREAT_RANGE: f64 = 1.0;
/// Threat azimuth, degrees per unit (full circle over 16 bits).
pub const THREAT_AZ: f64 = 360.0 / 65_536.0;
/// Emitter frequency, GHz per unit.
pub const THREAT_FREQ: f64 = 0.01;

// --- Opcode 122: geo message ---

/// Latitude, degrees per unit.
pub const LAT_122: f64 = SEMICIRCLE_32;
/// Longitude, degrees per unit.
pub const LNG_122: f64 = SEMICIRCLE_32;
/// Altitude, feet per unit.
pub const ALT_122: f64 = 2.0;
