//! Template compilation
//!
//! Turns a route template into an anchored, case-insensitive regular
//! expression plus the ordered list of parameter slots it captures.
//!
//! The token table:
//!
//! | token             | fragment            |
//! |-------------------|---------------------|
//! | `:string`         | `[a-z\-]+`          |
//! | `:number`         | `[0-9]+`            |
//! | `:any`            | `[[:word:]\-]+`     |
//! | `{#name :token}`  | named capture around the token's fragment |
//!
//! Multi-character tokens are recognized before the single-character brace
//! handling, so already-emitted group syntax is never corrupted. Literal
//! text, including `/` separators, is escaped for the regex engine. The
//! character classes are pinned to ASCII: `:number` must accept exactly one
//! or more ASCII digits regardless of the regex engine's Unicode defaults.
//!
//! Each placeholder, named or not, records exactly one capture slot together
//! with its capture-group index. Extraction later walks this slot list; it
//! never infers positions from the flattened match output.

use regex::{Regex, RegexBuilder};

use crate::error::RouterError;

/// Fragment for `:string`: lowercase letters and hyphens.
const STRING_FRAGMENT: &str = r"[a-z\-]+";
/// Fragment for `:number`: ASCII digits.
const NUMBER_FRAGMENT: &str = "[0-9]+";
/// Fragment for `:any`: ASCII word characters and hyphens.
const ANY_FRAGMENT: &str = r"[[:word:]\-]+";

/// The placeholder tokens in substitution order.
const TYPE_TOKENS: [(&str, &str); 3] = [
    (":string", STRING_FRAGMENT),
    (":number", NUMBER_FRAGMENT),
    (":any", ANY_FRAGMENT),
];

/// One parameter position in a compiled template.
///
/// `group` is the capture-group index inside the compiled regex; slots are
/// recorded in template order, so slot *i* always owns group *i + 1*.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSlot {
    name: Option<String>,
    group: usize,
}

impl ParamSlot {
    /// The declared name, for `{#name type}` placeholders.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn group(&self) -> usize {
        self.group
    }
}

/// A compiled route template: anchored case-insensitive matcher plus the
/// ordered capture slots. Immutable once built.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    template: String,
    regex: Regex,
    slots: Vec<ParamSlot>,
}

impl CompiledPattern {
    /// The template string this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The compiled regex source, anchored start-and-end.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Ordered parameter slots, one per placeholder.
    pub fn slots(&self) -> &[ParamSlot] {
        &self.slots
    }

    /// Whether the path matches, without extracting parameters.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Compiles a route template into a [`CompiledPattern`].
///
/// Fails with [`RouterError::Compile`] on unmatched `{`/`}`, an unknown
/// placeholder token, or a malformed named group.
///
/// # Examples
///
/// ```
/// use gamedesk_router::compile;
///
/// let pattern = compile("/example/{#id :number}").unwrap();
/// assert!(pattern.is_match("/example/45"));
/// assert!(!pattern.is_match("/example/45/extra"));
/// ```
pub fn compile(template: &str) -> Result<CompiledPattern, RouterError> {
    let mut source = String::with_capacity(template.len() + 8);
    source.push('^');

    let mut slots: Vec<ParamSlot> = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(c) = rest.chars().next() {
        match c {
            ':' => {
                let (fragment, consumed) = type_token(rest)
                    .ok_or_else(|| compile_error(template, unknown_token(rest)))?;
                flush_literal(&mut source, &mut literal);
                source.push('(');
                source.push_str(fragment);
                source.push(')');
                slots.push(ParamSlot {
                    name: None,
                    group: slots.len() + 1,
                });
                rest = &rest[consumed..];
            }
            '{' => {
                let (name, fragment, consumed) =
                    named_token(rest).map_err(|reason| compile_error(template, reason))?;
                flush_literal(&mut source, &mut literal);
                source.push_str("(?P<");
                source.push_str(name);
                source.push('>');
                source.push_str(fragment);
                source.push(')');
                slots.push(ParamSlot {
                    name: Some(name.to_string()),
                    group: slots.len() + 1,
                });
                rest = &rest[consumed..];
            }
            '}' => return Err(compile_error(template, "unmatched '}'")),
            _ => {
                literal.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    flush_literal(&mut source, &mut literal);
    source.push('$');

    let regex = RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .map_err(|e| compile_error(template, e.to_string()))?;

    Ok(CompiledPattern {
        template: template.to_string(),
        regex,
        slots,
    })
}

/// Matches one of the `:type` tokens at the start of `rest`.
///
/// Returns the regex fragment and the token's byte length. Prefix semantics:
/// `:anything` is `:any` followed by the literal `thing`, exactly as the
/// ordered substitution table behaves.
fn type_token(rest: &str) -> Option<(&'static str, usize)> {
    TYPE_TOKENS
        .iter()
        .find(|(token, _)| rest.starts_with(token))
        .map(|(token, fragment)| (*fragment, token.len()))
}

/// Parses a `{#name :type}` group at the start of `rest`.
///
/// Returns the capture name, the type's regex fragment, and the bytes
/// consumed including both braces.
fn named_token(rest: &str) -> Result<(&str, &'static str, usize), String> {
    let Some(end) = rest.find('}') else {
        return Err("unmatched '{'".to_string());
    };
    let body = &rest[1..end];

    let Some(body) = body.strip_prefix('#') else {
        return Err(format!("expected '#' after '{{' in {:?}", &rest[..=end]));
    };
    let Some((name, token)) = body.split_once(' ') else {
        return Err(format!("expected ' ' between name and type in {:?}", &rest[..=end]));
    };
    if name.is_empty() || !is_valid_name(name) {
        return Err(format!("invalid parameter name {name:?}"));
    }

    // The type token must fill the rest of the group exactly.
    let fragment = type_token(token)
        .filter(|(_, consumed)| *consumed == token.len())
        .map(|(fragment, _)| fragment)
        .ok_or_else(|| format!("unknown placeholder token {token:?} in named group"))?;

    Ok((name, fragment, end + 1))
}

/// Capture names must be valid regex group names.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn flush_literal(source: &mut String, literal: &mut String) {
    if !literal.is_empty() {
        source.push_str(&regex::escape(literal));
        literal.clear();
    }
}

fn compile_error(template: &str, reason: impl Into<String>) -> RouterError {
    RouterError::Compile {
        template: template.to_string(),
        reason: reason.into(),
    }
}

fn unknown_token(rest: &str) -> String {
    let token: String = rest.chars().take_while(|c| *c != '/').collect();
    format!("unknown placeholder token {token:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compile_unnamed_number() {
        let pattern = compile("/example/:number").unwrap();
        assert_eq!(pattern.as_str(), "^/example/([0-9]+)$");
        assert_eq!(pattern.slots().len(), 1);
        assert_eq!(pattern.slots()[0].name(), None);
    }

    #[test]
    fn test_compile_named_number() {
        let pattern = compile("/example/{#id :number}").unwrap();
        assert_eq!(pattern.as_str(), "^/example/(?P<id>[0-9]+)$");
        assert_eq!(pattern.slots()[0].name(), Some("id"));
    }

    #[test]
    fn test_compile_mixed_tokens() {
        let pattern = compile("/:string/{#id :number}").unwrap();
        assert_eq!(pattern.as_str(), r"^/([a-z\-]+)/(?P<id>[0-9]+)$");
        assert_eq!(pattern.slots().len(), 2);
        assert_eq!(pattern.slots()[0].name(), None);
        assert_eq!(pattern.slots()[1].name(), Some("id"));
    }

    #[test]
    fn test_compile_two_named_groups_one_segment() {
        let pattern = compile("/stream/create/{#id :number}-{#name :string}").unwrap();
        assert!(pattern.is_match("/stream/create/45-intro"));
        assert!(!pattern.is_match("/stream/create/45"));
        assert_eq!(pattern.slots()[1].name(), Some("name"));
    }

    #[test]
    fn test_token_prefix_substitution_order() {
        // `:anything` is `:any` followed by literal text, matching the
        // ordered substitution table.
        let pattern = compile("/:anything").unwrap();
        assert_eq!(pattern.as_str(), r"^/([[:word:]\-]+)thing$");
    }

    #[test]
    fn test_compile_is_case_insensitive() {
        let pattern = compile("/example/:string").unwrap();
        assert!(pattern.is_match("/EXAMPLE/JOHN-DOE"));
    }

    #[test]
    fn test_unknown_token_fails() {
        let err = compile("/x/:slug").unwrap_err();
        assert!(matches!(err, RouterError::Compile { .. }));
    }

    #[test]
    fn test_unmatched_open_brace_fails() {
        assert!(compile("/x/{#id :number").is_err());
    }

    #[test]
    fn test_unmatched_close_brace_fails() {
        assert!(compile("/x/}").is_err());
    }

    #[test]
    fn test_named_group_requires_hash_and_type() {
        assert!(compile("/x/{id :number}").is_err());
        assert!(compile("/x/{#id}").is_err());
        assert!(compile("/x/{#id :slug}").is_err());
        assert!(compile("/x/{# :number}").is_err());
    }

    #[test]
    fn test_literal_metacharacters_are_escaped() {
        let pattern = compile("/files/v1.2/:number").unwrap();
        assert!(pattern.is_match("/files/v1.2/7"));
        // An unescaped '.' would accept this.
        assert!(!pattern.is_match("/files/v1x2/7"));
    }
}
