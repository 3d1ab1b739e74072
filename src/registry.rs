//! Supported glyph registry — the SMuFL code → name table loaded from
//! `supported.xml`, optionally extended with a font's alternate glyphs.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use roxmltree::Document;

use crate::error::{self, Error, Result};
use crate::metadata::FontMetadata;
use crate::model::is_glyph_code;

/// Ordered mapping of glyph code → SMuFL glyph name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    glyphs: IndexMap<String, String>,
}

impl Registry {
    /// Load the registry from a `supported.xml` file.
    pub fn load(path: &Path) -> Result<Self> {
        log::debug!("Getting supported glyph codes from {}", path.display());
        let xml = error::read_to_string(path)?;
        let doc = Document::parse(&xml).map_err(|source| Error::Xml {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_document(&doc)?;
        log::debug!("Found {} supported glyphs", registry.len());
        Ok(registry)
    }

    /// Parse the registry from the text of a `supported.xml` file.
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml).map_err(|e| Error::Parse(format!("supported glyphs: {e}")))?;
        Self::from_document(&doc)
    }

    fn from_document(doc: &Document) -> Result<Self> {
        let mut glyphs = IndexMap::new();
        for node in doc.descendants().filter(|n| n.has_tag_name("glyph")) {
            let pos = doc.text_pos_at(node.range().start);
            let (Some(code), Some(name)) = (node.attribute("glyph-code"), node.attribute("smufl-name"))
            else {
                return Err(Error::Parse(format!(
                    "glyph at {pos} needs both glyph-code and smufl-name"
                )));
            };
            if !is_glyph_code(code) {
                return Err(Error::Parse(format!("glyph at {pos} has invalid code '{code}'")));
            }
            glyphs.insert(code.to_string(), name.to_string());
        }
        Ok(Registry { glyphs })
    }

    /// Load `supported.xml` and merge in the alternates declared by the
    /// font metadata file. An unreadable metadata file leaves the base
    /// registry as is.
    pub fn load_with_alternates(supported: &Path, metadata_path: &Path) -> Result<Self> {
        let mut registry = Self::load(supported)?;
        let metadata = match FontMetadata::load(metadata_path) {
            Ok(m) => m,
            Err(e @ (Error::NotFound { .. } | Error::Unreadable { .. })) => {
                log::warn!("The metadata file could not be read: {e}");
                return Ok(registry);
            }
            Err(e) => return Err(e),
        };

        let alternates = registry.alternates(&metadata);
        if !alternates.is_empty() {
            log::debug!("Updating supported glyphs with alternates");
            registry.merge(alternates);
        }
        Ok(registry)
    }

    /// Alternate glyphs of every supported canonical glyph.
    ///
    /// Only the new entries are returned; `self` is left untouched.
    pub fn alternates(&self, metadata: &FontMetadata) -> IndexMap<String, String> {
        let inverted: HashMap<&str, &str> = self
            .glyphs
            .iter()
            .map(|(code, name)| (name.as_str(), code.as_str()))
            .collect();

        let mut additional = IndexMap::new();
        for (canonical, entry) in &metadata.glyphs_with_alternates {
            if !inverted.contains_key(canonical.as_str()) {
                continue;
            }
            for alt in &entry.alternates {
                additional.insert(alt.code().to_string(), alt.name.clone());
            }
        }

        log::debug!("Found {} alternate glyphs", additional.len());
        additional
    }

    /// Merge entries into the registry; incoming names win on collision.
    pub fn merge(&mut self, entries: IndexMap<String, String>) {
        for (code, name) in entries {
            self.glyphs.insert(code, name);
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.glyphs.contains_key(code)
    }

    /// SMuFL name registered for a code.
    pub fn name(&self, code: &str) -> Option<&str> {
        self.glyphs.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.glyphs.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.glyphs.keys().map(String::as_str)
    }
}

impl FromIterator<(String, String)> for Registry {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Registry {
            glyphs: iter.into_iter().collect(),
        }
    }
}
