//! Escaping helpers for embedding untrusted text in markup or in quoted
//! script literals.

/// Escape the characters that are meaningful in HTML markup.
///
/// The output renders as literal text when inserted into a document and
/// cannot introduce new elements or attributes. `&` is replaced first so
/// entities produced by the later substitutions are not escaped twice.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape a string for embedding inside a quoted script literal.
///
/// Backslash, single quote, double quote, newline and carriage return are
/// each replaced by their two-character form. Backslash is handled first so
/// the backslashes introduced by the later substitutions survive intact.
pub fn escape_js(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
