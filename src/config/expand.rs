//! Environment-variable expansion for configured path values.

/// Expand `$NAME` and `${NAME}` references in `input`.
///
/// Names consist of ASCII letters, digits, and underscores.  References for
/// which `lookup` returns `None` are left in place verbatim, so callers can
/// detect them afterwards by searching for `$`.
///
/// # Examples
///
/// ```
/// use benchtool_installer::config::expand::expand_vars;
///
/// let lookup = |name: &str| (name == "HOME").then(|| "/home/me".to_string());
/// assert_eq!(expand_vars("$HOME/bench", lookup), "/home/me/bench");
/// assert_eq!(expand_vars("${HOME}/x", lookup), "/home/me/x");
/// assert_eq!(expand_vars("$NOPE/x", lookup), "$NOPE/x");
/// ```
pub fn expand_vars<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(rest.get(..pos).unwrap_or_default());
        let after = rest.get(pos + 1..).unwrap_or_default();

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (braced.get(..end).unwrap_or_default(), end + 2),
                None => ("", 0),
            }
        } else {
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (after.get(..len).unwrap_or_default(), len)
        };

        let reference = rest.get(pos..=pos + consumed).unwrap_or("$");
        match (name.is_empty(), lookup(name)) {
            (false, Some(value)) => out.push_str(&value),
            _ => out.push_str(reference),
        }
        rest = rest.get(pos + 1 + consumed..).unwrap_or_default();
    }

    out.push_str(rest);
    out
}

/// Whether `value` still contains a variable reference token.
#[must_use]
pub fn has_unresolved(value: &str) -> bool {
    value.contains('$')
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn plain_value_unchanged() {
        assert_eq!(expand_vars("/opt/bench", env(&[])), "/opt/bench");
    }

    #[test]
    fn expands_bare_reference() {
        let lookup = env(&[("HOME", "/home/u")]);
        assert_eq!(expand_vars("$HOME/app", lookup), "/home/u/app");
    }

    #[test]
    fn expands_braced_reference() {
        let lookup = env(&[("SCRATCH", "/scratch/u")]);
        assert_eq!(
            expand_vars("${SCRATCH}_bench/x", lookup),
            "/scratch/u_bench/x"
        );
    }

    #[test]
    fn expands_multiple_references() {
        let lookup = env(&[("A", "/a"), ("B", "b")]);
        assert_eq!(expand_vars("$A/$B/${B}", lookup), "/a/b/b");
    }

    #[test]
    fn bare_name_stops_at_punctuation() {
        let lookup = env(&[("install_dir", "/opt/app")]);
        assert_eq!(
            expand_vars("$install_dir/build.d", lookup),
            "/opt/app/build.d"
        );
    }

    #[test]
    fn unknown_reference_left_verbatim() {
        assert_eq!(expand_vars("$NOPE/x", env(&[])), "$NOPE/x");
        assert_eq!(expand_vars("${NOPE}/x", env(&[])), "${NOPE}/x");
    }

    #[test]
    fn lone_dollar_left_verbatim() {
        assert_eq!(expand_vars("cost$", env(&[])), "cost$");
        assert_eq!(expand_vars("a $ b", env(&[])), "a $ b");
    }

    #[test]
    fn unterminated_brace_left_verbatim() {
        assert_eq!(expand_vars("${HOME/x", env(&[("HOME", "/h")])), "${HOME/x");
    }

    #[test]
    fn has_unresolved_detects_dollar() {
        assert!(has_unresolved("$NOPE/x"));
        assert!(!has_unresolved("/opt/x"));
    }
}
