//! Compiled accessor templates.
//!
//! A template is literal text with `{fragment}`, `{name}` and `{description}`
//! placeholders; `{{` and `}}` stand for literal braces. Templates are parsed
//! once into segments so malformed input is rejected before any record is
//! rendered.

use std::borrow::Cow;

use thiserror::Error;

use crate::ident::to_method_fragment;
use crate::registry::FlagRecord;

/// Template used when no override is configured.
pub const DEFAULT_TEMPLATE: &str = "
// {fragment} checks for the flag: {name}{description}
func (ft *FeatureToggles) Is{fragment}Enabled() bool {{
\treturn ft.manager.IsEnabled(\"{name}\")
}}
";

/// Errors raised while compiling a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A placeholder names a field the renderer does not provide.
    #[error("unknown placeholder '{{{name}}}' at byte {offset}")]
    UnknownPlaceholder {
        /// Placeholder text between the braces.
        name: String,
        /// Byte offset of the opening brace.
        offset: usize,
    },

    /// A `{` was never closed.
    #[error("unterminated placeholder starting at byte {offset}")]
    Unterminated {
        /// Byte offset of the opening brace.
        offset: usize,
    },

    /// A lone `}` appeared outside a placeholder.
    #[error("unmatched '}}' at byte {offset}")]
    UnmatchedClose {
        /// Byte offset of the brace.
        offset: usize,
    },
}

/// Why a single record could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderErrorKind {
    /// The name has no letter or digit, so the method would be `IsEnabled`.
    #[error("name yields an empty method fragment")]
    EmptyFragment,

    /// The name cannot sit inside a double-quoted string literal.
    #[error("name contains {0:?}, which cannot appear in a string literal")]
    UnquotableName(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Fragment,
    Name,
    Description,
}

impl Field {
    fn from_placeholder(name: &str) -> Option<Self> {
        match name {
            "fragment" => Some(Self::Fragment),
            "name" => Some(Self::Name),
            "description" => Some(Self::Description),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed accessor template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorTemplate {
    segments: Vec<Segment>,
}

impl AccessorTemplate {
    /// Compiles `source` into a reusable template.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] for unknown or unterminated placeholders
    /// and for stray closing braces.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            match ch {
                '{' if chars.next_if(|&(_, next)| next == '{').is_some() => literal.push('{'),
                '{' => {
                    let mut placeholder = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, inner)) => placeholder.push(inner),
                            None => return Err(TemplateError::Unterminated { offset }),
                        }
                    }
                    let field = Field::from_placeholder(&placeholder).ok_or(
                        TemplateError::UnknownPlaceholder {
                            name: placeholder,
                            offset,
                        },
                    )?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                }
                '}' if chars.next_if(|&(_, next)| next == '}').is_some() => literal.push('}'),
                '}' => return Err(TemplateError::UnmatchedClose { offset }),
                _ => literal.push(ch),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Appends the rendering of `record` to `out`.
    ///
    /// Nothing is written when the record is rejected, so `out` always ends on
    /// a record boundary.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderErrorKind`] when the record cannot be expressed as a
    /// method.
    pub fn render_into(&self, record: &FlagRecord, out: &mut String) -> Result<(), RenderErrorKind> {
        if let Some(ch) = record
            .name
            .chars()
            .find(|ch| matches!(*ch, '"' | '\\') || ch.is_control())
        {
            return Err(RenderErrorKind::UnquotableName(ch));
        }
        let fragment = to_method_fragment(&record.name);
        if fragment.is_empty() {
            return Err(RenderErrorKind::EmptyFragment);
        }
        let description = fold_description(&record.description);
        let has_description = !record.description.is_empty();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(Field::Fragment) => out.push_str(&fragment),
                Segment::Field(Field::Name) => out.push_str(&record.name),
                Segment::Field(Field::Description) => {
                    if has_description {
                        out.push_str("\n// ");
                        out.push_str(&description);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Folds a multi-line description onto a single comment line.
///
/// Single-line descriptions are returned unchanged.
fn fold_description(description: &str) -> Cow<'_, str> {
    if !description.contains('\n') {
        return Cow::Borrowed(description);
    }
    let folded = description
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Cow::Owned(folded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn render(template: &AccessorTemplate, name: &str, description: &str) -> String {
        let mut out = String::new();
        template
            .render_into(&FlagRecord::new(name, description), &mut out)
            .expect("render");
        out
    }

    #[rstest]
    fn default_template_renders_described_flag() {
        let template = AccessorTemplate::parse(DEFAULT_TEMPLATE).expect("default template");
        let expected = "
// FeatureX checks for the flag: feature-x
// enables X
func (ft *FeatureToggles) IsFeatureXEnabled() bool {
\treturn ft.manager.IsEnabled(\"feature-x\")
}
";
        assert_eq!(render(&template, "feature-x", "enables X"), expected);
    }

    #[rstest]
    fn default_template_omits_empty_description() {
        let template = AccessorTemplate::parse(DEFAULT_TEMPLATE).expect("default template");
        let expected = "
// Single checks for the flag: single
func (ft *FeatureToggles) IsSingleEnabled() bool {
\treturn ft.manager.IsEnabled(\"single\")
}
";
        assert_eq!(render(&template, "single", ""), expected);
    }

    #[rstest]
    #[case(" ", "\n//  ")]
    #[case("  enables X  ", "\n//   enables X  ")]
    #[case("tab\tinside", "\n// tab\tinside")]
    fn single_line_descriptions_are_kept_verbatim(
        #[case] description: &str,
        #[case] expected: &str,
    ) {
        let template = AccessorTemplate::parse("{description}").expect("template");
        assert_eq!(render(&template, "a", description), expected);
    }

    #[rstest]
    fn whitespace_description_still_gets_a_comment_line() {
        let template = AccessorTemplate::parse(DEFAULT_TEMPLATE).expect("default template");
        let out = render(&template, "feature-x", " ");
        assert!(
            out.contains("// FeatureX checks for the flag: feature-x\n//  \nfunc"),
            "{out:?}"
        );
    }

    #[rstest]
    fn multi_line_descriptions_fold_onto_one_line() {
        let template = AccessorTemplate::parse("{description}").expect("template");
        assert_eq!(
            render(&template, "a", "first line\n   second line  \n\nthird"),
            "\n// first line second line third"
        );
    }

    #[rstest]
    #[case("{{literal}}", "{literal}")]
    #[case("Is{fragment}", "IsAB")]
    #[case("{name}/{name}", "a.b/a.b")]
    #[case("no placeholders", "no placeholders")]
    #[case("", "")]
    fn placeholders_and_escapes(#[case] source: &str, #[case] expected: &str) {
        let template = AccessorTemplate::parse(source).expect("template");
        assert_eq!(render(&template, "a.b", ""), expected);
    }

    #[rstest]
    #[case("{nmae}", TemplateError::UnknownPlaceholder { name: "nmae".to_owned(), offset: 0 })]
    #[case("ok {}", TemplateError::UnknownPlaceholder { name: String::new(), offset: 3 })]
    #[case("body {name", TemplateError::Unterminated { offset: 5 })]
    #[case("x } y", TemplateError::UnmatchedClose { offset: 2 })]
    fn malformed_templates_are_rejected(#[case] source: &str, #[case] expected: TemplateError) {
        assert_eq!(AccessorTemplate::parse(source), Err(expected));
    }

    #[rstest]
    #[case("--", RenderErrorKind::EmptyFragment)]
    #[case("say\"hi", RenderErrorKind::UnquotableName('"'))]
    #[case("back\\slash", RenderErrorKind::UnquotableName('\\'))]
    #[case("new\nline", RenderErrorKind::UnquotableName('\n'))]
    fn unrenderable_records_leave_output_untouched(
        #[case] name: &str,
        #[case] expected: RenderErrorKind,
    ) {
        let template = AccessorTemplate::parse(DEFAULT_TEMPLATE).expect("default template");
        let mut out = String::from("prefix");
        let err = template
            .render_into(&FlagRecord::new(name, ""), &mut out)
            .expect_err("render should fail");
        assert_eq!(err, expected);
        assert_eq!(out, "prefix");
    }
}
