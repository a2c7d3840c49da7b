//! Registry fixtures.
//!
//! The fixtures are plain TOML and string pairs so they can be fed to any
//! loader without tying this crate to the library under test.

/// A registry covering bare, hyphenated, dotted and undocumented names.
pub const SAMPLE_REGISTRY: &str = r#"
[[flags]]
name = "feature-x"
description = "enables X"

[[flags]]
name = "dashboardPreviews"

[[flags]]
name = "panel.title-search"
description = "Search for dashboards using panel title"

[[flags]]
name = "k8s"
description = ""
"#;

/// `(name, description)` pairs matching [`SAMPLE_REGISTRY`], in order.
pub const SAMPLE_FLAGS: [(&str, &str); 4] = [
    ("feature-x", "enables X"),
    ("dashboardPreviews", ""),
    ("panel.title-search", "Search for dashboards using panel title"),
    ("k8s", ""),
];

/// Builds a TOML registry document from `(name, description)` pairs.
///
/// # Examples
///
/// ```
/// use flaggen_test_helpers::fixtures::registry_toml;
///
/// let doc = registry_toml(&[("a", "first")]);
/// assert_eq!(doc, "[[flags]]\nname = \"a\"\ndescription = \"first\"\n\n");
/// ```
#[must_use]
pub fn registry_toml(flags: &[(&str, &str)]) -> String {
    flags
        .iter()
        .map(|(name, description)| {
            format!(
                "[[flags]]\nname = {}\ndescription = {}\n\n",
                toml_string(name),
                toml_string(description)
            )
        })
        .collect()
}

fn toml_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
