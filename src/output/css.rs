//! CSS `@font-face` declaration embedding a base64 WOFF2 font.

use base64::Engine;

/// Render the `@font-face` block for a WOFF2 font.
pub fn render_font_face(font_name: &str, woff2: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(woff2);
    format!(
        "@font-face {{
    font-family: '{font_name}';
    src: url(data:application/font-woff2;charset=utf-8;base64,{encoded}) format('woff2');
    font-weight: normal;
    font-style: normal;
}}"
    )
}

/// License notice placed in the metadata of subset fonts.
pub fn subset_license(font_name: &str) -> String {
    format!(
        "
This font is licensed under the SIL Open Font License, http://scripts.sil.org/OFL, with
Reserved Font Name \"{font_name}\".

See https://github.com/rism-digital/verovio/blob/develop/fonts/README.md for more information.

This file is a subset of the full font containing only the glyphs supported by Verovio for efficiency.
Please do not use directly.
"
    )
}
