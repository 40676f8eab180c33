//! String normalization helpers shared by file naming and report generation

/// Convert a string to kebab-case (lowercase with hyphens).
///
/// Spaces and underscores become hyphens; any other character outside
/// `[a-z0-9-]` is dropped, not replaced. Used for both asset file names and
/// CSS variable names derived from Figma node names.
pub(crate) fn to_kebab_case(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}
