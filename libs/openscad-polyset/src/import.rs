//! # Import Parameters
//!
//! Parameters an importer node hands to the file readers that populate a
//! PolySet. The readers themselves live outside this crate; they only need
//! a correctly configured PolySet and the point mapping for 2D drawings.
//!
//! ## Example
//!
//! ```rust
//! use openscad_polyset::import::{ImportParams, ImportType};
//! use glam::{DVec2, DVec3};
//!
//! let mut params = ImportParams::for_file("drawing.dxf");
//! params.origin = DVec2::new(10.0, 0.0);
//! params.scale = 2.0;
//! assert_eq!(params.import_type, ImportType::Dxf);
//! assert_eq!(params.map_point(DVec2::new(11.0, 1.0)), DVec3::new(2.0, 2.0, 0.0));
//! ```

use crate::polyset::PolySet;
use crate::shape2d::{Outline2d, Polygon2d};
use config::constants::{DEFAULT_CONVEXITY, DEFAULT_FA, DEFAULT_FN, DEFAULT_FS, DEFAULT_IMPORT_SCALE};
use glam::{DVec2, DVec3};
use std::fmt;
use std::path::{Path, PathBuf};

/// File formats an importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportType {
    /// Extension not recognized
    #[default]
    Unknown,
    /// STL triangle mesh (ASCII or binary)
    Stl,
    /// OFF polygon mesh
    Off,
    /// DXF 2D drawing
    Dxf,
}

impl ImportType {
    /// Detects the format from a file extension, case-insensitively.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("stl") => Self::Stl,
            Some("off") => Self::Off,
            Some("dxf") => Self::Dxf,
            _ => Self::Unknown,
        }
    }

    /// Returns true for formats that produce flat geometry.
    pub fn is_2d(self) -> bool {
        matches!(self, Self::Dxf)
    }
}

/// Everything an import node forwards to its reader.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportParams {
    /// Detected file format
    pub import_type: ImportType,
    /// File to read
    pub filename: PathBuf,
    /// DXF layer to read, empty for all layers
    pub layer_name: String,
    /// Convexity hint for the produced PolySet
    pub convexity: u32,
    /// $fn used when flattening DXF curves
    pub fn_: f64,
    /// $fs used when flattening DXF curves
    pub fs: f64,
    /// $fa used when flattening DXF curves
    pub fa: f64,
    /// Drawing point mapped to the origin
    pub origin: DVec2,
    /// Scale applied after moving `origin` to zero
    pub scale: f64,
}

impl Default for ImportParams {
    fn default() -> Self {
        Self {
            import_type: ImportType::Unknown,
            filename: PathBuf::new(),
            layer_name: String::new(),
            convexity: DEFAULT_CONVEXITY,
            fn_: DEFAULT_FN,
            fs: DEFAULT_FS,
            fa: DEFAULT_FA,
            origin: DVec2::ZERO,
            scale: DEFAULT_IMPORT_SCALE,
        }
    }
}

impl ImportParams {
    /// Creates parameters for a file, detecting its type from the extension.
    pub fn for_file(filename: impl Into<PathBuf>) -> Self {
        let filename = filename.into();
        Self {
            import_type: ImportType::from_path(&filename),
            filename,
            ..Self::default()
        }
    }

    /// Maps a drawing point into model space: `(p - origin) * scale`, z = 0.
    #[inline]
    pub fn map_point(&self, p: DVec2) -> DVec3 {
        ((p - self.origin) * self.scale).extend(0.0)
    }

    /// Maps every point of a drawing outline into model space.
    pub fn map_outline(&self, outline: &[DVec2]) -> Outline2d {
        outline
            .iter()
            .map(|p| (*p - self.origin) * self.scale)
            .collect()
    }

    /// Creates the empty solid PolySet an STL/OFF reader fills.
    pub fn new_polyset(&self) -> PolySet {
        let mut ps = PolySet::new();
        ps.set_convexity(self.convexity);
        ps
    }

    /// Creates the empty flat PolySet a DXF reader fills, seeded with the
    /// already mapped outlines of the drawing.
    pub fn new_polyset_2d(&self, outlines: Polygon2d) -> PolySet {
        let mut ps = PolySet::from_polygon2d(outlines);
        ps.set_convexity(self.convexity);
        ps
    }
}

impl fmt::Display for ImportParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import(file = {:?}", self.filename.to_string_lossy())?;
        if self.import_type == ImportType::Dxf {
            write!(
                f,
                ", layer = {:?}, origin = [{}, {}], scale = {}",
                self.layer_name, self.origin.x, self.origin.y, self.scale
            )?;
        }
        write!(
            f,
            ", convexity = {}, $fn = {}, $fa = {}, $fs = {})",
            self.convexity, self.fn_, self.fa, self.fs
        )
    }
}
