//! `smufl.h` — the C++ enumeration of every supported glyph.

use std::path::{Path, PathBuf};

use crate::error::{self, Result};
use crate::registry::Registry;

pub const HEADER_FILE_NAME: &str = "smufl.h";

const HEADER_PREAMBLE: &str = "\
/////////////////////////////////////////////////////////////////////////////
// Name:        smufl.h
// Author:      Laurent Pugin
// Created:     2014-2022
// Copyright (c) Authors and others. All rights reserved.
/////////////////////////////////////////////////////////////////////////////

/////////////////////////////////////////////////////////////////////////////
// NOTE: this file was generated by the ./fonts/generate.py smufl script
// and should not be edited because changes will be lost.
/////////////////////////////////////////////////////////////////////////////

#ifndef __VRV_SMUFL_H__
#define __VRV_SMUFL_H__

//----------------------------------------------------------------------------

namespace vrv {

//----------------------------------------------------------------------------
// SMUFL glyphs available by default in Verovio
//----------------------------------------------------------------------------

enum {
";

/// Render the header text for a registry.
pub fn render_header(registry: &Registry) -> String {
    let entries: Vec<String> = registry
        .iter()
        .map(|(code, name)| format!("    SMUFL_{code}_{name} = 0x{code},"))
        .collect();

    let mut header = String::from(HEADER_PREAMBLE);
    header.push_str(&entries.join("\n"));
    header.push_str("\n};\n\n");
    header.push_str("/** The number of glyphs for verification **/\n");
    header.push_str(&format!("#define SMUFL_COUNT {}\n\n", entries.len()));
    header.push_str("} // namespace vrv\n\n#endif\n");
    header
}

/// Write `smufl.h` into `dir` and return its path.
pub fn write_header(registry: &Registry, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(HEADER_FILE_NAME);
    log::debug!("SMuFL header will contain {} supported glyphs", registry.len());
    log::debug!("Writing {}", path.display());
    error::write(&path, render_header(registry))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_lists_entries_in_registry_order() {
        let registry: Registry = [
            ("E0A4".to_string(), "noteheadBlack".to_string()),
            ("E050".to_string(), "gClef".to_string()),
        ]
        .into_iter()
        .collect();

        let header = render_header(&registry);
        assert!(header.starts_with("/////"));
        assert!(header.contains("should not be edited"));

        let tail = &header[HEADER_PREAMBLE.len()..];
        assert_eq!(
            tail,
            "    SMUFL_E0A4_noteheadBlack = 0xE0A4,\n    SMUFL_E050_gClef = 0xE050,\n};\n\n\
             /** The number of glyphs for verification **/\n#define SMUFL_COUNT 2\n\n\
             } // namespace vrv\n\n#endif\n"
        );
    }

    #[test]
    fn header_is_reproducible() {
        let registry: Registry = [("E0A4".to_string(), "noteheadBlack".to_string())]
            .into_iter()
            .collect();
        assert_eq!(render_header(&registry), render_header(&registry));
    }
}
