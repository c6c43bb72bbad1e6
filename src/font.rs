//! Pre-triangulated font-outline resource.
//!
//! Label geometry is extruded from a JSON description of glyph outlines:
//! per glyph, a 2D vertex pool in em units, a fill triangulation of the
//! glyph interior, and the closed contour loops of its outline (used for
//! extrusion side walls). The file format is produced by an external
//! tool and is not under this crate's control; the schema is validated
//! on load so downstream mesh building never indexes out of bounds.
//!
//! Loading is asynchronous: [`spawn_loader`] reads and parses the file
//! on a background thread and delivers the result over a channel the
//! engine polls once per frame.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use serde::Deserialize;

/// Errors produced while loading or validating a font-outline file.
#[derive(Debug)]
pub enum FontError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The file is not valid font-outline JSON.
    Parse(serde_json::Error),
    /// The schema is structurally invalid (message names the glyph).
    Invalid(String),
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "font file unreadable: {e}"),
            Self::Parse(e) => write!(f, "font JSON invalid: {e}"),
            Self::Invalid(msg) => write!(f, "font schema invalid: {msg}"),
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

/// One glyph's pre-triangulated outline.
#[derive(Debug, Clone, Deserialize)]
pub struct Glyph {
    /// Horizontal pen advance after this glyph, in em units.
    pub advance: f32,
    /// 2D outline vertex pool, in em units with the baseline at y = 0.
    #[serde(default)]
    pub vertices: Vec<[f32; 2]>,
    /// Fill triangulation of the glyph interior (indices into
    /// `vertices`).
    #[serde(default)]
    pub triangles: Vec<[u32; 3]>,
    /// Closed outline loops (indices into `vertices`), wound
    /// counter-clockwise for outer contours. Consecutive entries are
    /// edges; the last vertex connects back to the first.
    #[serde(default)]
    pub contours: Vec<Vec<u32>>,
}

/// A parsed, validated font-outline description.
#[derive(Debug, Clone, Deserialize)]
pub struct Font {
    /// Font family name, informational only.
    #[serde(default)]
    pub family: String,
    /// Size of the em square the glyph coordinates are expressed in.
    pub units_per_em: f32,
    /// Glyph table keyed by the character it renders.
    pub glyphs: HashMap<char, Glyph>,
}

impl Font {
    /// Parse a font from JSON text and validate its index tables.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Parse`] for malformed JSON and
    /// [`FontError::Invalid`] for out-of-bounds glyph indices or a
    /// non-positive em size.
    pub fn from_json(text: &str) -> Result<Self, FontError> {
        let font: Self =
            serde_json::from_str(text).map_err(FontError::Parse)?;
        font.validate()?;
        Ok(font)
    }

    /// Read and parse a font file.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Io`] if the file is unreadable, otherwise
    /// the errors of [`Font::from_json`].
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let text = std::fs::read_to_string(path).map_err(FontError::Io)?;
        Self::from_json(&text)
    }

    /// Look up the glyph for `c`, if present.
    #[must_use]
    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&c)
    }

    /// Pen advance used for characters missing from the glyph table
    /// (the space glyph's advance, or a third of an em as a fallback).
    #[must_use]
    pub fn missing_advance(&self) -> f32 {
        self.glyphs
            .get(&' ')
            .map_or(self.units_per_em / 3.0, |g| g.advance)
    }

    fn validate(&self) -> Result<(), FontError> {
        if self.units_per_em <= 0.0 {
            return Err(FontError::Invalid(format!(
                "units_per_em must be positive, got {}",
                self.units_per_em
            )));
        }
        for (c, glyph) in &self.glyphs {
            let n = glyph.vertices.len() as u32;
            let tri_ok = glyph
                .triangles
                .iter()
                .all(|t| t.iter().all(|&i| i < n));
            if !tri_ok {
                return Err(FontError::Invalid(format!(
                    "glyph {c:?} has a triangle index out of bounds"
                )));
            }
            let contour_ok = glyph
                .contours
                .iter()
                .all(|loop_| loop_.iter().all(|&i| i < n));
            if !contour_ok {
                return Err(FontError::Invalid(format!(
                    "glyph {c:?} has a contour index out of bounds"
                )));
            }
            if glyph.contours.iter().any(|loop_| loop_.len() < 2) {
                return Err(FontError::Invalid(format!(
                    "glyph {c:?} has a degenerate contour"
                )));
            }
        }
        Ok(())
    }
}

/// Load a font on a background thread, delivering the result over the
/// returned channel. The engine polls the receiver once per frame while
/// in its `Loading` phase; a failed load leaves the component inert.
#[must_use]
pub fn spawn_loader(path: PathBuf) -> mpsc::Receiver<Result<Font, FontError>> {
    let (tx, rx) = mpsc::channel();
    let spawned = std::thread::Builder::new()
        .name("font-loader".into())
        .spawn(move || {
            let result = Font::load(&path);
            if let Err(ref e) = result {
                log::warn!("font load failed for {}: {e}", path.display());
            }
            // Receiver may be gone if the engine was dropped mid-load.
            let _ = tx.send(result);
        });
    if let Err(e) = spawned {
        log::warn!("failed to spawn font loader thread: {e}");
    }
    rx
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A minimal two-glyph font: a unit-square "I" and a space.
    pub(crate) fn square_font() -> Font {
        let json = r#"{
            "family": "test",
            "units_per_em": 1000,
            "glyphs": {
                "I": {
                    "advance": 600,
                    "vertices": [[0,0],[400,0],[400,700],[0,700]],
                    "triangles": [[0,1,2],[0,2,3]],
                    "contours": [[0,1,2,3]]
                },
                " ": { "advance": 500 }
            }
        }"#;
        Font::from_json(json).unwrap()
    }

    #[test]
    fn parses_and_validates() {
        let font = square_font();
        assert_eq!(font.units_per_em, 1000.0);
        assert_eq!(font.glyph('I').unwrap().vertices.len(), 4);
        assert!(font.glyph('X').is_none());
    }

    #[test]
    fn missing_advance_uses_space() {
        let font = square_font();
        assert_eq!(font.missing_advance(), 500.0);
    }

    #[test]
    fn rejects_out_of_bounds_triangle() {
        let json = r#"{
            "units_per_em": 1000,
            "glyphs": {
                "A": {
                    "advance": 600,
                    "vertices": [[0,0],[1,0],[1,1]],
                    "triangles": [[0,1,9]],
                    "contours": [[0,1,2]]
                }
            }
        }"#;
        assert!(matches!(
            Font::from_json(json),
            Err(FontError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_non_positive_em() {
        let json = r#"{ "units_per_em": 0, "glyphs": {} }"#;
        assert!(matches!(
            Font::from_json(json),
            Err(FontError::Invalid(_))
        ));
    }

    #[test]
    fn loader_delivers_parse_error_for_missing_file() {
        let rx = spawn_loader(PathBuf::from("/nonexistent/font.json"));
        let result = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
        assert!(matches!(result, Err(FontError::Io(_))));
    }
}
