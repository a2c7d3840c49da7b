//! TypeScript interface declaration generator.
//!
//! Emits a `FeatureToggles` interface with one optional boolean property per
//! flag, in registry order. Property keys come from
//! [`to_property_key`](crate::ident::to_property_key) so hyphenated and dotted
//! names are bracket-quoted exactly as consumers index them.

use crate::ident::to_property_key;
use crate::registry::Registry;

const INTERFACE_PREAMBLE: &str = "
/**
 * Describes available feature toggles. These can be configured to enable
 * features under development or not yet available in a stable version.
 *
 * @public
 */
export interface FeatureToggles {
  // [name: string]?: boolean; // support any string value

";

/// Pointers written into the file banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner<'a> {
    /// Where flags are edited (the registry path as configured).
    pub registry: &'a str,
    /// How regeneration is verified.
    pub verify: &'a str,
}

/// Renders the interface declaration for `registry`.
///
/// Taking a [`Registry`] guarantees every name is non-empty and unique, so
/// each property line is a well-formed key.
///
/// # Examples
///
/// ```
/// use flaggen::registry::{FlagRecord, Registry};
/// use flaggen::typescript::{Banner, generate};
///
/// let banner = Banner { registry: "flags.toml", verify: "flaggen check" };
/// let registry = Registry::new(vec![FlagRecord::new("my-flag", "")])?;
/// let out = generate(&registry, &banner);
/// assert!(out.contains("  ['my-flag']?: boolean;\n"));
/// assert!(out.ends_with("}\n"));
/// # Ok::<(), flaggen::registry::RegistryError>(())
/// ```
#[must_use]
pub fn generate(registry: &Registry, banner: &Banner<'_>) -> String {
    let mut content = String::with_capacity(512 + registry.len() * 40);

    content.push_str("// NOTE: This file was auto generated.  DO NOT EDIT DIRECTLY!\n");
    content.push_str("// To change feature flags, edit:\n");
    content.push_str(&format!("//  {}\n", banner.registry));
    content.push_str("// Then run tests in:\n");
    content.push_str(&format!("//  {}\n", banner.verify));
    content.push_str(INTERFACE_PREAMBLE);

    for record in registry {
        content.push_str("  ");
        content.push_str(&to_property_key(&record.name));
        content.push_str("?: boolean;\n");
    }

    content.push_str("}\n");
    content
}
