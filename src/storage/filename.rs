// Upload filename rules

use unicode_normalization::UnicodeNormalization;

use crate::documents::DocumentKind;

/// Whether the text after the last `.` of `filename` is an accepted
/// extension (case-insensitive). Names without a `.` are not accepted.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| DocumentKind::from_extension(ext).is_some())
}

/// Reduce a client-supplied filename to a safe single path component.
///
/// The name is NFKD-normalized so accented letters keep their base letter,
/// then remaining non-ASCII characters are dropped, `/` becomes a space,
/// whitespace runs are joined with `_`, anything outside `[A-Za-z0-9_.-]`
/// is removed and leading/trailing `.` and `_` are stripped. The result may
/// be empty, which callers treat as "no filename".
pub fn secure_filename(filename: &str) -> String {
    let spaced: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}
