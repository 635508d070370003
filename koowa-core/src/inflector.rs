//! Word inflection used to build event names.

/// Uppercase the first character, leaving the rest untouched.
///
/// ```
/// use koowa_core::inflector::ucfirst;
/// assert_eq!(ucfirst("selectRow"), "SelectRow");
/// assert_eq!(ucfirst(""), "");
/// ```
pub fn ucfirst(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert an underscored or spaced word to `CamelCase`.
///
/// `select_row` and `selectRow` both become `SelectRow`.
pub fn camelize(word: &str) -> String {
    word.split(['_', ' ']).map(ucfirst).collect()
}

/// Join words into a single `CamelCase` word.
///
/// `["select", "row"]` becomes `SelectRow`.
pub fn implode<S: AsRef<str>>(words: &[S]) -> String {
    words.iter().map(|w| camelize(w.as_ref())).collect()
}
