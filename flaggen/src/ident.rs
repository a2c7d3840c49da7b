//! Identifier transformations for generated bindings.
//!
//! Flag names are canonical registry strings such as `feature-x` or
//! `panel.title-search`. The TypeScript interface needs a property key that
//! consumers can use verbatim, and the Go accessors need a `PascalCase`
//! fragment to splice into method names. Both mappings are pure and never
//! fail.

/// Returns the property key used for `name` inside the TypeScript interface.
///
/// Names containing a hyphen or a dot are not valid bare identifiers, so they
/// are emitted in bracket-quoted form. Every other name is returned unchanged.
///
/// # Examples
///
/// ```
/// use flaggen::ident::to_property_key;
///
/// assert_eq!(to_property_key("myFlag"), "myFlag");
/// assert_eq!(to_property_key("my-flag"), "['my-flag']");
/// assert_eq!(to_property_key("my.flag"), "['my.flag']");
/// ```
#[must_use]
pub fn to_property_key(name: &str) -> String {
    if name.contains(['-', '.']) {
        format!("['{name}']")
    } else {
        name.to_owned()
    }
}

/// Returns the `PascalCase` method fragment for `name`.
///
/// Runs of characters that are neither letters nor digits act as a single
/// delimiter and are dropped. The first character of every remaining segment
/// is upper-cased; the rest of the segment is kept as written.
///
/// A name without any letter or digit produces an empty fragment. Callers
/// must treat that as an error rather than emit `IsEnabled`.
///
/// Upper-casing uses [`char::to_uppercase`], not title case, so a few
/// non-ASCII letters differ from Go's `strings.Title`: `ß` becomes `SS` and
/// `ǆ` becomes `Ǆ` rather than `ǅ`. Registry names are ASCII, so generated
/// accessors never hit these cases.
///
/// # Examples
///
/// ```
/// use flaggen::ident::to_method_fragment;
///
/// assert_eq!(to_method_fragment("feature-x"), "FeatureX");
/// assert_eq!(to_method_fragment("a.b.c"), "ABC");
/// assert_eq!(to_method_fragment("single"), "Single");
/// assert_eq!(to_method_fragment("--"), "");
/// ```
#[must_use]
pub fn to_method_fragment(name: &str) -> String {
    let mut fragment = String::with_capacity(name.len());
    for segment in name
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|segment| !segment.is_empty())
    {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            fragment.extend(first.to_uppercase());
            fragment.push_str(chars.as_str());
        }
    }
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("myFlag", "myFlag")]
    #[case("my-flag", "['my-flag']")]
    #[case("my.flag", "['my.flag']")]
    #[case("a-b.c", "['a-b.c']")]
    #[case("flag2", "flag2")]
    fn property_key_quotes_only_when_needed(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(to_property_key(name), expected);
    }

    #[rstest]
    #[case("feature-x", "FeatureX")]
    #[case("a.b.c", "ABC")]
    #[case("single", "Single")]
    #[case("dashboardPreviews", "DashboardPreviews")]
    #[case("live--pipeline..v2", "LivePipelineV2")]
    #[case("-leading.and.trailing-", "LeadingAndTrailing")]
    #[case("k8s-2fa", "K8s2fa")]
    #[case("énergie-flag", "ÉnergieFlag")]
    #[case("ß-flag", "SSFlag")]
    fn method_fragment_title_cases_segments(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(to_method_fragment(name), expected);
    }

    #[rstest]
    #[case("")]
    #[case("-")]
    #[case(".-.")]
    fn method_fragment_is_empty_without_alphanumerics(#[case] name: &str) {
        assert!(to_method_fragment(name).is_empty());
    }
}
