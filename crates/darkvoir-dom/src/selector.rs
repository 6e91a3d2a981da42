//! CSS selector subset parser.
//!
//! Covers what the engines generate and the fixed scan pools need: tag,
//! `#id`, `.class` chains, `[attr]`, `[attr="value"]`, compounds of those,
//! and comma-separated groups. Combinators and pseudo-classes are outside
//! the subset and parse to `UnsupportedSelector`.

use crate::error::{DomError, DomResult};

/// One attribute condition inside a compound selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrCondition {
    Exists(String),
    Equals(String, String),
}

/// A compound simple selector, e.g. `input.form-control[type="text"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CompoundSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrCondition>,
}

impl CompoundSelector {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }
}

/// A parsed comma-group of compound selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(pub(crate) Vec<CompoundSelector>);

impl SelectorList {
    /// Parse a selector string into the supported subset.
    pub fn parse(input: &str) -> DomResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DomError::UnsupportedSelector(input.to_string()));
        }

        let mut groups = Vec::new();
        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(DomError::UnsupportedSelector(input.to_string()));
            }
            groups.push(parse_compound(part)
                .ok_or_else(|| DomError::UnsupportedSelector(input.to_string()))?);
        }
        Ok(Self(groups))
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_name(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if is_name_char(c) {
            name.push(c);
            chars.next();
        } else {
            break;
        }
    }
    if name.is_empty() { None } else { Some(name) }
}

fn parse_compound(part: &str) -> Option<CompoundSelector> {
    let mut sel = CompoundSelector::default();
    let mut chars = part.chars().peekable();

    // Leading tag, if any.
    if chars.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
        sel.tag = Some(take_name(&mut chars)?.to_ascii_lowercase());
    }

    while let Some(&c) = chars.peek() {
        match c {
            '#' => {
                chars.next();
                sel.id = Some(take_name(&mut chars)?);
            }
            '.' => {
                chars.next();
                sel.classes.push(take_name(&mut chars)?);
            }
            '[' => {
                chars.next();
                let name = take_name(&mut chars)?;
                match chars.next() {
                    Some(']') => sel.attrs.push(AttrCondition::Exists(name)),
                    Some('=') => {
                        let quote = chars.peek().copied();
                        let quote = match quote {
                            Some('"') | Some('\'') => {
                                chars.next();
                                quote
                            }
                            _ => None,
                        };
                        let mut value = String::new();
                        loop {
                            let c = chars.next()?;
                            match (quote, c) {
                                (Some(q), c) if c == q => break,
                                (None, ']') => break,
                                _ => value.push(c),
                            }
                        }
                        if quote.is_some() && chars.next() != Some(']') {
                            return None;
                        }
                        sel.attrs.push(AttrCondition::Equals(name, value));
                    }
                    _ => return None,
                }
            }
            // Combinators, pseudo-classes, universal: outside the subset.
            _ => return None,
        }
    }

    if sel.is_empty() { None } else { Some(sel) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let list = SelectorList::parse("#submit-btn").unwrap();
        assert_eq!(list.0.len(), 1);
        assert_eq!(list.0[0].id.as_deref(), Some("submit-btn"));
    }

    #[test]
    fn test_parse_tag_with_classes() {
        let list = SelectorList::parse("button.primary.large").unwrap();
        let sel = &list.0[0];
        assert_eq!(sel.tag.as_deref(), Some("button"));
        assert_eq!(sel.classes, vec!["primary", "large"]);
    }

    #[test]
    fn test_parse_attr_value() {
        let list = SelectorList::parse(r#"input[type="submit"]"#).unwrap();
        let sel = &list.0[0];
        assert_eq!(sel.tag.as_deref(), Some("input"));
        assert_eq!(
            sel.attrs,
            vec![AttrCondition::Equals("type".into(), "submit".into())]
        );
    }

    #[test]
    fn test_parse_bare_attr() {
        let list = SelectorList::parse("[aria-label]").unwrap();
        assert_eq!(list.0[0].attrs, vec![AttrCondition::Exists("aria-label".into())]);
    }

    #[test]
    fn test_parse_comma_group() {
        let list = SelectorList::parse(r#"button, input[type="submit"], [role="button"]"#).unwrap();
        assert_eq!(list.0.len(), 3);
    }

    #[test]
    fn test_unquoted_attr_value() {
        let list = SelectorList::parse("[name=email]").unwrap();
        assert_eq!(
            list.0[0].attrs,
            vec![AttrCondition::Equals("name".into(), "email".into())]
        );
    }

    #[test]
    fn test_rejects_combinators() {
        assert!(SelectorList::parse("div > button").is_err());
        assert!(SelectorList::parse("nav a.link").is_err());
        assert!(SelectorList::parse("button:hover").is_err());
        assert!(SelectorList::parse("").is_err());
    }
}
