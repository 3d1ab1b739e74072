//! Coverage check — compares the supported glyph codes with the glyphs a
//! font actually provides.

use std::collections::BTreeSet;

use crate::model::{glyph_code, is_glyph_code, SvgFont};
use crate::registry::Registry;

/// Differences between the registry and a font, each sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    /// Supported codes the font does not provide
    pub missing_from_font: Vec<String>,
    /// Font codes that are not supported
    pub unsupported_in_font: Vec<String>,
}

/// The code a font glyph is reported under.
///
/// `space` and `uniXXXX` names map to their codes. Any other name is
/// reported verbatim; names that start with `uni` without four hex digits
/// after it are logged rather than truncated into a wrong code.
pub fn coverage_code(name: &str) -> String {
    if name == "space" {
        return glyph_code(name).to_string();
    }
    match name.strip_prefix("uni") {
        Some(rest) if is_glyph_code(rest) => rest.to_string(),
        Some(_) => {
            log::warn!("Glyph name {name} is not of the form uniXXXX; reporting it verbatim");
            name.to_string()
        }
        None => name.to_string(),
    }
}

/// Compare the registry codes with the codes of every named glyph.
pub fn check_coverage(registry: &Registry, font: &SvgFont) -> CoverageReport {
    let supported: BTreeSet<String> = registry.codes().map(String::from).collect();
    let in_font: BTreeSet<String> = font
        .glyphs
        .iter()
        .filter_map(|g| g.name.as_deref())
        .map(coverage_code)
        .collect();

    CoverageReport {
        missing_from_font: supported.difference(&in_font).cloned().collect(),
        unsupported_in_font: in_font.difference(&supported).cloned().collect(),
    }
}

impl CoverageReport {
    /// Human-readable report lines for a font.
    pub fn lines(&self, font_name: &str, show_unsupported: bool) -> Vec<String> {
        let mut lines = vec![format!(
            "Verovio-supported glyphs not in {font_name}:  {}",
            self.missing_from_font.join(", ")
        )];
        if show_unsupported {
            lines.push(format!(
                "{font_name} glyphs not supported by Verovio:  {}",
                self.unsupported_in_font.join(", ")
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontFace, FontGlyph};

    fn font(names: &[&str]) -> SvgFont {
        SvgFont {
            face: FontFace {
                family: "Leipzig".into(),
                units_per_em: "1000".into(),
                default_horiz_adv_x: "0".into(),
            },
            glyphs: names
                .iter()
                .map(|n| FontGlyph {
                    name: Some(n.to_string()),
                    ..Default::default()
                })
                .chain(std::iter::once(FontGlyph::default()))
                .collect(),
        }
    }

    fn registry(codes: &[&str]) -> Registry {
        codes
            .iter()
            .map(|c| (c.to_string(), format!("glyph{c}")))
            .collect()
    }

    #[test]
    fn coverage_codes() {
        assert_eq!(coverage_code("space"), "0020");
        assert_eq!(coverage_code("uniE0A4"), "E0A4");
        assert_eq!(coverage_code("ellipsis"), "ellipsis");
        assert_eq!(coverage_code("uniE0A4.alt"), "uniE0A4.alt");
    }

    #[test]
    fn reports_both_directions_sorted() {
        let report = check_coverage(
            &registry(&["E0A4", "0020", "E050", "E01A"]),
            &font(&["uniE0A4", "space", "uniF400", "uniE100"]),
        );
        assert_eq!(report.missing_from_font, vec!["E01A", "E050"]);
        assert_eq!(report.unsupported_in_font, vec!["E100", "F400"]);
    }

    #[test]
    fn differences_partition_both_sets() {
        let registry = registry(&["E0A4", "E050", "E01A"]);
        let font = font(&["uniE0A4", "uniE050", "uniF400"]);
        let report = check_coverage(&registry, &font);

        let missing: BTreeSet<_> = report.missing_from_font.iter().cloned().collect();
        let extra: BTreeSet<_> = report.unsupported_in_font.iter().cloned().collect();
        assert!(missing.is_disjoint(&extra));

        let supported: BTreeSet<String> = registry.codes().map(String::from).collect();
        let in_font: BTreeSet<String> = ["E0A4", "E050", "F400"].iter().map(|s| s.to_string()).collect();
        let common: BTreeSet<String> = supported.intersection(&in_font).cloned().collect();
        assert_eq!(&missing | &common, supported);
        assert_eq!(&extra | &common, in_font);
    }

    #[test]
    fn report_lines() {
        let report = CoverageReport {
            missing_from_font: vec!["E01A".into(), "E050".into()],
            unsupported_in_font: vec!["F400".into()],
        };
        assert_eq!(
            report.lines("Leipzig", false),
            vec!["Verovio-supported glyphs not in Leipzig:  E01A, E050"]
        );
        assert_eq!(report.lines("Leipzig", true).len(), 2);
    }
}
