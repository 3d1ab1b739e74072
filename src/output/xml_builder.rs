//! XML builder — accumulates elements and serializes them the way Python's
//! ElementTree does, so generated glyph and bounding-box files stay
//! byte-compatible with the files the rendering engine already ships.

// ═══════════════════════════════════════════════════════════════════════
// Element
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Append an attribute; attributes are written in insertion order.
    pub(crate) fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.push((name.to_string(), value.into()));
        self
    }

    #[cfg(test)]
    pub(crate) fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[cfg(test)]
    pub(crate) fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Serialize without any added whitespace.
    pub(crate) fn to_compact_string(&self) -> String {
        let mut out = String::new();
        self.write_compact(&mut out);
        out
    }

    /// Serialize with two-space indentation and an XML declaration.
    pub(crate) fn to_document_string(&self) -> String {
        let mut out = String::from(XML_DECLARATION);
        out.push('\n');
        self.write_indented(&mut out, 0);
        out
    }

    fn write_start(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
    }

    fn write_compact(&self, out: &mut String) {
        self.write_start(out);
        if self.text.is_none() && self.children.is_empty() {
            out.push_str(" />");
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape_text(text));
        }
        for child in &self.children {
            child.write_compact(out);
        }
        self.write_end(out);
    }

    fn write_indented(&self, out: &mut String, level: usize) {
        if self.children.is_empty() {
            self.write_compact(out);
            return;
        }
        self.write_start(out);
        out.push('>');
        for child in &self.children {
            out.push('\n');
            push_indent(out, level + 1);
            child.write_indented(out, level + 1);
        }
        out.push('\n');
        push_indent(out, level);
        self.write_end(out);
    }

    fn write_end(&self, out: &mut String) {
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════

pub(crate) const XML_DECLARATION: &str = "<?xml version='1.0' encoding='UTF-8'?>";

const INDENT: &str = "  ";

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub(crate) fn escape_attribute(value: &str) -> String {
    escape_text(value)
        .replace('"', "&quot;")
        .replace('\r', "&#13;")
        .replace('\n', "&#10;")
        .replace('\t', "&#09;")
}

/// Format a number the way Python's `str(float)` does for the rounded
/// values written to output files: `0.0`, `12.5`, `-3.14`.
pub(crate) fn format_number(value: f64) -> String {
    let mut s = format!("{value}");
    if value.is_finite() && !s.contains('.') {
        s.push_str(".0");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_element_is_self_closed() {
        let el = Element::new("a").attr("n", "stemUpSE");
        assert_eq!(el.to_compact_string(), r#"<a n="stemUpSE" />"#);
    }

    #[test]
    fn attributes_are_escaped() {
        let el = Element::new("g").attr("n", "a<b & \"c\"\n");
        assert_eq!(el.to_compact_string(), r#"<g n="a&lt;b &amp; &quot;c&quot;&#10;" />"#);
    }

    #[test]
    fn text_is_escaped() {
        let el = Element::new("metadata").text("Fish & Chips <1>");
        assert_eq!(el.to_compact_string(), "<metadata>Fish &amp; Chips &lt;1&gt;</metadata>");
    }

    #[test]
    fn document_is_indented_by_level() {
        let root = Element::new("root")
            .attr("k", "v")
            .child(Element::new("g").child(Element::new("a")))
            .child(Element::new("g"));
        assert_eq!(
            root.to_document_string(),
            "<?xml version='1.0' encoding='UTF-8'?>\n\
             <root k=\"v\">\n  <g>\n    <a />\n  </g>\n  <g />\n</root>"
        );
    }

    #[test]
    fn numbers_always_carry_a_fraction() {
        assert_eq!(format_number(0.0), "0.0");
        assert_eq!(format_number(295.0), "295.0");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-3.14), "-3.14");
        assert_eq!(format_number(-0.0), "-0.0");
    }
}
