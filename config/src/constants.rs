//! # Configuration Constants
//!
//! Centralized constants for the PolySet pipeline.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Grid**: Vertex quantization resolution
//! - **Preview**: Thickness of extruded 2D previews
//! - **Import**: Default importer parameters ($fn, $fa, $fs, convexity)

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Relative tolerance for degenerate triangles when computing face normals.
///
/// A triangle is degenerate when the length of its edge cross product is at
/// most `NORMAL_EPSILON` times the product of the two edge lengths, i.e. the
/// sine of the angle between the edges is below it. Being scale-relative,
/// it catches collinear points that only differ by rounding noise.
///
/// # Example
///
/// ```rust
/// use config::constants::NORMAL_EPSILON;
///
/// // Edges of length 1 and 2 whose cross product is pure float noise
/// let cross_length = 2.5e-16;
/// assert!(cross_length <= NORMAL_EPSILON * 1.0 * 2.0);
/// ```
pub const NORMAL_EPSILON: f64 = 1e-12;

// =============================================================================
// GRID CONSTANTS
// =============================================================================

/// Fine grid resolution used to weld vertices of a PolySet.
///
/// 2^-20 units: far below visible modeling scale, yet coarse enough to absorb
/// the rounding error of repeated transform composition. Being a power of two,
/// multiples of it are exactly representable.
///
/// # Example
///
/// ```rust
/// use config::constants::GRID_FINE;
///
/// assert_eq!(GRID_FINE, 1.0 / 1048576.0);
/// ```
pub const GRID_FINE: f64 = 0.000_000_953_674_316_406_25;

// =============================================================================
// PREVIEW CONSTANTS
// =============================================================================

/// Thickness of the prism used to preview flat (2D) shapes.
///
/// The top cap sits at `+FLAT_EXTRUSION_THICKNESS / 2`, the bottom cap at
/// `-FLAT_EXTRUSION_THICKNESS / 2`.
pub const FLAT_EXTRUSION_THICKNESS: f64 = 1.0;

/// Thickness multiplier for flat shapes rendered as part of a difference.
///
/// Makes subtracted 2D shapes slightly thicker than the shape they cut so the
/// coincident caps do not z-fight.
///
/// # Example
///
/// ```rust
/// use config::constants::{DIFFERENCE_THICKNESS_FACTOR, FLAT_EXTRUSION_THICKNESS};
///
/// let zbase = FLAT_EXTRUSION_THICKNESS * DIFFERENCE_THICKNESS_FACTOR;
/// assert!(zbase > FLAT_EXTRUSION_THICKNESS);
/// ```
pub const DIFFERENCE_THICKNESS_FACTOR: f64 = 1.1;

// =============================================================================
// IMPORT CONSTANTS (OpenSCAD $fn, $fa, $fs)
// =============================================================================

/// Default value for $fn (fragment count override).
///
/// OpenSCAD default: 0 (use $fa/$fs calculation)
pub const DEFAULT_FN: f64 = 0.0;

/// Default value for $fa (minimum fragment angle in degrees).
///
/// OpenSCAD default: 12.0 degrees
pub const DEFAULT_FA: f64 = 12.0;

/// Default value for $fs (minimum fragment size).
///
/// OpenSCAD default: 2.0 units
pub const DEFAULT_FS: f64 = 2.0;

/// Default convexity hint for imported geometry.
///
/// Convexity is forwarded untouched to boolean operations; it is the maximum
/// number of front faces a ray through the object may cross.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_CONVEXITY;
///
/// let user_convexity: Option<u32> = None;
/// let convexity = user_convexity.unwrap_or(DEFAULT_CONVEXITY);
/// assert_eq!(convexity, 1);
/// ```
pub const DEFAULT_CONVEXITY: u32 = 1;

/// Default scale factor applied to imported 2D drawings.
pub const DEFAULT_IMPORT_SCALE: f64 = 1.0;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Returns the preview thickness (`zbase`) for a flat shape.
///
/// # Example
///
/// ```rust
/// use config::constants::flat_preview_thickness;
///
/// assert_eq!(flat_preview_thickness(false), 1.0);
/// assert!(flat_preview_thickness(true) > 1.0);
/// ```
#[inline]
pub fn flat_preview_thickness(difference: bool) -> f64 {
    if difference {
        FLAT_EXTRUSION_THICKNESS * DIFFERENCE_THICKNESS_FACTOR
    } else {
        FLAT_EXTRUSION_THICKNESS
    }
}
