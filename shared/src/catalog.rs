use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::colors::{Hsl, parse_hex};

const BUILTIN_CATALOG_JSON: &str = include_str!("../data/colors.json");

/// Tag carried by the near-white colors that shorter games leave out.
pub const LIGHT_TAG: &str = "light";
const LEVEL_TAG_MARKER: &str = "level-";

/// One CSS named color. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRecord {
    pub keyword: String,
    pub hex: String,
    #[serde(alias = "decimal")]
    pub rgb: [u8; 3],
    pub hsl: Hsl,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ColorRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog contains no colors")]
    Empty,

    #[error("duplicate keyword in catalog: {0}")]
    DuplicateKeyword(String),

    #[error("invalid hex {hex:?} for {keyword}")]
    InvalidHex { keyword: String, hex: String },

    #[error("hex {hex} does not match rgb {rgb:?} for {keyword}")]
    HexMismatch {
        keyword: String,
        hex: String,
        rgb: [u8; 3],
    },

    #[error("hsl {hsl} out of range for {keyword}")]
    HslOutOfRange { keyword: String, hsl: Hsl },
}

#[derive(Deserialize)]
struct CatalogFile {
    colors: Vec<ColorRecord>,
}

/// The static, read-only set of named colors.
#[derive(Debug, Clone)]
pub struct Catalog {
    colors: Vec<ColorRecord>,
    by_keyword: HashMap<String, usize>,
}

impl Catalog {
    /// Parse and validate a catalog document of the form `{"colors": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_colors(file.colors)
    }

    pub fn from_colors(colors: Vec<ColorRecord>) -> Result<Self, CatalogError> {
        if colors.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_keyword = HashMap::with_capacity(colors.len());
        for (idx, color) in colors.iter().enumerate() {
            validate_record(color)?;
            if by_keyword.insert(color.keyword.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateKeyword(color.keyword.clone()));
            }
        }

        Ok(Self { colors, by_keyword })
    }

    /// The 148 CSS named colors bundled with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }

    pub fn colors(&self) -> &[ColorRecord] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, keyword: &str) -> Option<&ColorRecord> {
        self.by_keyword.get(keyword).map(|&idx| &self.colors[idx])
    }

    /// Every tag referenced by any color, sorted and deduplicated.
    pub fn all_tags(&self) -> Vec<String> {
        self.colors
            .iter()
            .flat_map(|color| color.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Difficulty-level tags (`level-1`, `level-2`, ...).
    pub fn level_tags(&self) -> Vec<String> {
        self.all_tags()
            .into_iter()
            .filter(|tag| tag.contains(LEVEL_TAG_MARKER))
            .collect()
    }

    pub fn descriptive_tags(&self) -> Vec<String> {
        self.all_tags()
            .into_iter()
            .filter(|tag| !tag.contains(LEVEL_TAG_MARKER))
            .collect()
    }

    pub fn filter(&self, filter: &ColorFilter) -> Vec<&ColorRecord> {
        self.colors.iter().filter(|c| filter.matches(c)).collect()
    }

    /// Favorite colors in catalog order. Unknown keywords are skipped.
    pub fn favorites(&self, favorites: &[String]) -> Vec<&ColorRecord> {
        let wanted: HashSet<&str> = favorites.iter().map(String::as_str).collect();
        self.colors
            .iter()
            .filter(|c| wanted.contains(c.keyword.as_str()))
            .collect()
    }
}

fn validate_record(color: &ColorRecord) -> Result<(), CatalogError> {
    let Some(rgb) = parse_hex(&color.hex).filter(|_| color.hex.starts_with('#')) else {
        return Err(CatalogError::InvalidHex {
            keyword: color.keyword.clone(),
            hex: color.hex.clone(),
        });
    };
    if rgb != color.rgb {
        return Err(CatalogError::HexMismatch {
            keyword: color.keyword.clone(),
            hex: color.hex.clone(),
            rgb: color.rgb,
        });
    }

    let Hsl { h, s, l } = color.hsl;
    if !(0..360).contains(&h) || !(0..=100).contains(&s) || !(0..=100).contains(&l) {
        return Err(CatalogError::HslOutOfRange {
            keyword: color.keyword.clone(),
            hsl: color.hsl,
        });
    }
    Ok(())
}

/// Active search term and tag filters on the browse page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorFilter {
    search: String,
    active_tags: Vec<String>,
}

impl ColorFilter {
    pub fn new(search: &str, active_tags: Vec<String>) -> Self {
        let mut filter = Self {
            search: String::new(),
            active_tags,
        };
        filter.set_search(search);
        filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Spaces are stripped from search input.
    pub fn set_search(&mut self, search: &str) {
        self.search = search.replace(' ', "");
    }

    pub fn active_tags(&self) -> &[String] {
        &self.active_tags
    }

    pub fn is_active(&self, tag: &str) -> bool {
        self.active_tags.iter().any(|t| t == tag)
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if self.is_active(tag) {
            self.active_tags.retain(|t| t != tag);
        } else {
            self.active_tags.push(tag.to_owned());
        }
    }

    pub fn clear_tags(&mut self) {
        self.active_tags.clear();
    }

    /// A color matches when it carries every active tag and, with a search term set,
    /// its keyword or hex contains the term (case-insensitive).
    pub fn matches(&self, color: &ColorRecord) -> bool {
        if !self.active_tags.iter().all(|tag| color.has_tag(tag)) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        color.keyword.to_lowercase().contains(&needle) || color.hex.to_lowercase().contains(&needle)
    }
}

/// Parse the `tags` query-string value (`level-2,light`) into a tag list.
pub fn parse_tag_query(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}
