use crate::defaults::PATH_SEPARATOR;

/// Builds a `PATH`-like value by prepending `dirs` to `base`.
///
/// The base is never replaced: when it is non-empty it is kept verbatim after a single
/// separator. An empty base yields the prepended directories alone.
pub fn prepend<I, S>(dirs: I, base: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut composed = dirs
        .into_iter()
        .map(|d| d.as_ref().to_string())
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join(&PATH_SEPARATOR.to_string());

    if base.is_empty() {
        return composed;
    }
    if composed.is_empty() {
        return base.to_string();
    }
    composed.push(PATH_SEPARATOR);
    composed.push_str(base);
    composed
}
