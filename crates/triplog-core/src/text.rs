// crates/triplog-core/src/text.rs

/// Convert a string into a folded key suitable for ordering and comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
///
/// The ranker uses this for its locale-insensitive alphabetical tie-break.
///
/// # Examples
///
/// ```rust
/// use triplog_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("Straße"), "strasse");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}
