//! Filter catalog and preview thumbnails.
//!
//! A filter is a named color cube the operator can pick for the whole
//! print. The catalog only holds ids, display names and where each cube
//! lives; loading is delegated to a caller-supplied loader so this crate
//! stays free of file I/O.
//!
//! The id [`ORIGINAL_FILTER`] is reserved for "no filter".

use crate::composite::Condition;
use crate::OpsError;
use booth_core::RasterImage;
use booth_lut::{ColorCube, LutResult};
use std::path::PathBuf;
use std::sync::Arc;
#[allow(unused_imports)]
use tracing::{debug, trace, warn};

/// Filter id meaning "leave photos unfiltered".
pub const ORIGINAL_FILTER: &str = "original";

/// One selectable filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    /// Stable id, referenced by sessions
    pub id: String,
    /// Display name
    pub name: String,
    /// Cube file; `None` for the unfiltered entry
    pub path: Option<PathBuf>,
}

impl FilterEntry {
    /// Creates an entry backed by a cube file.
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: Some(path.into()),
        }
    }

    /// The reserved unfiltered entry.
    pub fn original() -> Self {
        Self {
            id: ORIGINAL_FILTER.to_string(),
            name: "Original".to_string(),
            path: None,
        }
    }

    /// `true` if selecting this entry applies no cube.
    pub fn is_original(&self) -> bool {
        self.id == ORIGINAL_FILTER || self.path.is_none()
    }
}

/// Ordered list of filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCatalog {
    entries: Vec<FilterEntry>,
}

impl FilterCatalog {
    /// Creates a catalog. An `original` entry is put first if missing.
    pub fn new(mut entries: Vec<FilterEntry>) -> Self {
        if !entries.iter().any(|e| e.id == ORIGINAL_FILTER) {
            entries.insert(0, FilterEntry::original());
        }
        Self { entries }
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: &str) -> Option<&FilterEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Number of entries, `original` included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of resolving a filter id.
#[derive(Debug, Default)]
pub struct ResolvedFilter {
    /// Cube to apply; `None` means unfiltered
    pub cube: Option<Arc<ColorCube>>,
    /// Set when the requested filter could not be used
    pub condition: Option<Condition>,
}

/// Resolves `filter_id` to a cube.
///
/// `original`, unknown ids and entries without a path resolve to no cube.
/// Loader failures and unusable cubes are returned as a condition and also
/// resolve to no cube, so the print goes out unfiltered.
pub fn resolve_filter<L>(catalog: &FilterCatalog, filter_id: &str, mut loader: L) -> ResolvedFilter
where
    L: FnMut(&FilterEntry) -> LutResult<ColorCube>,
{
    let Some(entry) = catalog.get(filter_id) else {
        warn!(filter = filter_id, "unknown filter, using original");
        return ResolvedFilter::default();
    };
    if entry.is_original() {
        return ResolvedFilter::default();
    }

    match loader(entry).and_then(|cube| cube.ensure_usable().map(|_| cube)) {
        Ok(cube) => {
            debug!(filter = filter_id, size = cube.size(), "filter loaded");
            ResolvedFilter {
                cube: Some(Arc::new(cube)),
                condition: None,
            }
        }
        Err(source) => {
            warn!(filter = filter_id, error = %source, "filter unusable, using original");
            ResolvedFilter {
                cube: None,
                condition: Some(Condition {
                    frame_id: None,
                    error: OpsError::Filter {
                        filter_id: filter_id.to_string(),
                        source,
                    },
                }),
            }
        }
    }
}

/// A filtered thumbnail for one catalog entry.
#[derive(Debug, Clone)]
pub struct FilterPreview {
    /// Catalog id
    pub id: String,
    /// Display name
    pub name: String,
    /// Sample image with the filter applied
    pub image: RasterImage,
}

/// Renders `sample` through every catalog entry.
///
/// Entries that fail to load show the unfiltered sample, like the print
/// itself would.
pub fn previews<L>(sample: &RasterImage, catalog: &FilterCatalog, mut loader: L) -> Vec<FilterPreview>
where
    L: FnMut(&FilterEntry) -> LutResult<ColorCube>,
{
    trace!(entries = catalog.len(), "filter::previews");
    catalog
        .entries()
        .iter()
        .map(|entry| {
            let resolved = resolve_filter(catalog, &entry.id, &mut loader);
            let image = match resolved.cube {
                Some(cube) => booth_lut::apply(sample, &cube).unwrap_or_else(|_| sample.clone()),
                None => sample.clone(),
            };
            FilterPreview {
                id: entry.id.clone(),
                name: entry.name.clone(),
                image,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use booth_lut::LutError;

    fn catalog() -> FilterCatalog {
        FilterCatalog::new(vec![
            FilterEntry::new("red", "Red", "red.cube"),
            FilterEntry::new("broken", "Broken", "broken.cube"),
        ])
    }

    fn loader(entry: &FilterEntry) -> LutResult<ColorCube> {
        match entry.id.as_str() {
            "red" => Ok(ColorCube::new(2, vec![[1.0, 0.0, 0.0]; 8])),
            _ => Err(LutError::MalformedHeader("missing LUT_3D_SIZE".into())),
        }
    }

    #[test]
    fn test_original_inserted_first() {
        let c = catalog();
        assert_eq!(c.len(), 3);
        assert_eq!(c.entries()[0].id, ORIGINAL_FILTER);
        assert!(c.entries()[0].is_original());

        let explicit = FilterCatalog::new(vec![
            FilterEntry::new("red", "Red", "red.cube"),
            FilterEntry::original(),
        ]);
        assert_eq!(explicit.len(), 2);
        assert_eq!(explicit.entries()[0].id, "red");
    }

    #[test]
    fn test_resolve() {
        let c = catalog();
        let red = resolve_filter(&c, "red", loader);
        assert!(red.cube.is_some());
        assert!(red.condition.is_none());

        assert!(resolve_filter(&c, ORIGINAL_FILTER, loader).cube.is_none());
        let unknown = resolve_filter(&c, "sepia", loader);
        assert!(unknown.cube.is_none());
        assert!(unknown.condition.is_none());
    }

    #[test]
    fn test_broken_filter_falls_back() {
        let r = resolve_filter(&catalog(), "broken", loader);
        assert!(r.cube.is_none());
        let cond = r.condition.unwrap();
        assert!(matches!(
            cond.error,
            OpsError::Filter { ref filter_id, source: LutError::MalformedHeader(_) } if filter_id == "broken"
        ));
    }

    #[test]
    fn test_degenerate_cube_rejected() {
        let r = resolve_filter(&catalog(), "red", |_: &FilterEntry| Ok(ColorCube::new(1, vec![[0.0; 3]])));
        assert!(r.cube.is_none());
        assert!(r.condition.is_some());
    }

    #[test]
    fn test_previews() {
        let sample = RasterImage::filled(4, 4, [10, 200, 30, 255]);
        let p = previews(&sample, &catalog(), loader);
        let ids: Vec<_> = p.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["original", "red", "broken"]);
        assert_eq!(p[0].image.pixel(0, 0), [10, 200, 30, 255]);
        assert_eq!(p[1].image.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(p[2].image.pixel(0, 0), [10, 200, 30, 255]);
    }
}
