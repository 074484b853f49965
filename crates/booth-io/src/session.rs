//! YAML session files.
//!
//! A session describes one print job: the template, which photo sits in
//! which frame, the filter catalog and the selected filter.
//!
//! ```yaml
//! canvas: { width: 1200, height: 1800 }
//! scale: 1.0
//! filter: pink
//! filters:
//!   - { id: original, name: Original }
//!   - { id: pink, name: Pink, path: filters/pink.cube }
//! template:
//!   background: template.png
//!   frames:
//!     - { id: top, x: 50, y: 60, width: 1100, height: 800, photo: a.jpg }
//! ```
//!
//! Relative paths are resolved against the session file's directory.
//! Photo ids are the path strings as written in the file.

use crate::{read_image, IoError, IoResult};
use booth_core::{Frame, PhotoId, RasterImage, Template};
use booth_lut::{ColorCube, LutError, LutResult};
use booth_ops::{FilterCatalog, FilterEntry, Session, ORIGINAL_FILTER, PAPER_4R};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
#[allow(unused_imports)]
use tracing::{debug, info, trace, warn};

/// Output canvas size in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSpec {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: PAPER_4R.0,
            height: PAPER_4R.1,
        }
    }
}

/// One filter as written in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Stable id
    pub id: String,
    /// Display name, defaults to the id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Cube file, relative to the session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Template section of a session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateSpec {
    /// Artwork image drawn above the photos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<PathBuf>,
    /// Frames in paint order
    #[serde(default)]
    pub frames: Vec<Frame>,
}

/// Session file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFile {
    /// Output canvas
    #[serde(default)]
    pub canvas: CanvasSpec,
    /// Template units to surface pixels
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Selected filter id
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Filter catalog
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
    /// Template layout and photo assignment
    #[serde(default)]
    pub template: TemplateSpec,
}

fn default_scale() -> f64 {
    1.0
}

fn default_filter() -> String {
    ORIGINAL_FILTER.to_string()
}

impl Default for SessionFile {
    fn default() -> Self {
        Self {
            canvas: CanvasSpec::default(),
            scale: default_scale(),
            filter: default_filter(),
            filters: Vec::new(),
            template: TemplateSpec::default(),
        }
    }
}

impl SessionFile {
    /// Parses session YAML. `path` is only used in error messages.
    pub fn from_yaml(text: &str, path: &Path) -> IoResult<Self> {
        let file: SessionFile = serde_yaml::from_str(text).map_err(|source| IoError::Session {
            path: path.to_path_buf(),
            source,
        })?;
        file.validate()?;
        Ok(file)
    }

    /// Reads and validates a session file.
    pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text, path)
    }

    /// Serializes back to YAML.
    pub fn to_yaml(&self) -> IoResult<String> {
        serde_yaml::to_string(self).map_err(|source| IoError::Session {
            path: PathBuf::new(),
            source,
        })
    }

    /// Writes the session as YAML.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        std::fs::write(path.as_ref(), self.to_yaml()?)?;
        Ok(())
    }

    /// Checks values serde cannot express.
    pub fn validate(&self) -> IoResult<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(IoError::InvalidSession(format!("scale must be positive, got {}", self.scale)));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(IoError::InvalidSession(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        let mut seen = HashSet::new();
        for frame in &self.template.frames {
            if !seen.insert(frame.id.as_str()) {
                return Err(IoError::InvalidSession(format!("duplicate frame id {:?}", frame.id)));
            }
        }
        Ok(())
    }

    /// Compositing settings for this session.
    pub fn session(&self) -> Session {
        Session {
            scale: self.scale,
            canvas: (self.canvas.width, self.canvas.height),
        }
    }

    /// Filter catalog with paths resolved against `base_dir`.
    pub fn catalog(&self, base_dir: &Path) -> FilterCatalog {
        FilterCatalog::new(
            self.filters
                .iter()
                .map(|f| FilterEntry {
                    id: f.id.clone(),
                    name: f.name.clone().unwrap_or_else(|| f.id.clone()),
                    path: f.path.as_ref().map(|p| base_dir.join(p)),
                })
                .collect(),
        )
    }
}

/// A session with its images decoded.
#[derive(Debug, Clone)]
pub struct LoadedSession {
    /// Parsed file
    pub file: SessionFile,
    /// Directory relative paths are resolved against
    pub base_dir: PathBuf,
    /// Template with decoded artwork
    pub template: Template,
    /// Decoded photos keyed by the id used in frames
    pub photos: HashMap<PhotoId, RasterImage>,
    /// Filter catalog
    pub catalog: FilterCatalog,
}

impl LoadedSession {
    /// Compositing settings.
    pub fn session(&self) -> Session {
        self.file.session()
    }

    /// Selected filter id.
    pub fn filter(&self) -> &str {
        &self.file.filter
    }
}

/// Reads a session file and decodes every image it references.
///
/// Photos that fail to decode are logged and left out; the composite
/// reports their frames as missing. A background that fails to decode is
/// an error.
pub fn load<P: AsRef<Path>>(path: P) -> IoResult<LoadedSession> {
    let path = path.as_ref();
    let file = SessionFile::read(path)?;
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    info!(path = %path.display(), frames = file.template.frames.len(), "loading session");

    let background = match &file.template.background {
        Some(bg) => Some(read_image(base_dir.join(bg))?),
        None => None,
    };

    let mut photos = HashMap::new();
    for id in file.template.frames.iter().filter_map(|f| f.photo.as_deref()) {
        if photos.contains_key(id) {
            continue;
        }
        match read_image(base_dir.join(id)) {
            Ok(img) => {
                debug!(photo = id, width = img.width(), height = img.height(), "photo decoded");
                photos.insert(id.to_string(), img);
            }
            Err(e) => warn!(photo = id, error = %e, "photo could not be decoded"),
        }
    }

    let template = Template::new(background, file.template.frames.clone());
    let catalog = file.catalog(&base_dir);
    Ok(LoadedSession {
        file,
        base_dir,
        template,
        photos,
        catalog,
    })
}

/// Cube loader for [`booth_ops::resolve_filter`] and [`booth_ops::previews`].
///
/// Catalog paths are already absolute or relative to the working directory.
/// An entry without a path has no cube to read and fails with
/// [`LutError::Io`].
pub fn load_cube(entry: &FilterEntry) -> LutResult<ColorCube> {
    match &entry.path {
        Some(path) => booth_lut::read_cube(path),
        None => Err(LutError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("filter {:?} has no cube file", entry.id),
        ))),
    }
}
