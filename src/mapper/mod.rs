use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

mod template;

pub use template::{PathTemplate, TemplateError};

#[derive(Debug, Error)]
pub enum MapError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("invalid template: {0}")]
    InvalidTemplate(#[from] TemplateError),
    #[error("prefix not matched")]
    NoPrefixMatch,
    #[error("not matched")]
    NoMatch,
    #[error("error rendering template: {0}")]
    TemplateRender(#[from] fmt::Error),
}

/// Result of a prefix match. `prefix` and `tail` always concatenate back to the input.
#[derive(Debug, PartialEq, Eq)]
pub struct Mapped<'s> {
    pub path: String,
    pub prefix: &'s str,
    pub tail: &'s str,
}

/// Rewrites strings matching a regex into a template filled from its named groups.
#[derive(Debug)]
pub struct StringMapper {
    pattern: Regex,
    template: PathTemplate,
}

impl StringMapper {
    pub fn new(pattern: &str, template: &str) -> Result<Self, MapError> {
        let pattern = Regex::new(pattern)?;
        let template = template.parse::<PathTemplate>()?;

        for name in template.variables() {
            if !pattern.capture_names().flatten().any(|group| group == name) {
                log::warn!(
                    "Template variable {:?} is not a named group of {:?}, it will render empty",
                    name,
                    pattern.as_str()
                );
            }
        }

        Ok(Self { pattern, template })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Maps the leftmost-first match of the pattern, which must begin at the start of `input`.
    pub fn map_prefix<'s>(&self, input: &'s str) -> Result<Mapped<'s>, MapError> {
        let captures = self
            .pattern
            .captures(input)
            .ok_or(MapError::NoPrefixMatch)?;
        let whole = captures.get(0).ok_or(MapError::NoPrefixMatch)?;
        if whole.start() != 0 {
            return Err(MapError::NoPrefixMatch);
        }

        let vars = self
            .pattern
            .capture_names()
            .flatten()
            .filter_map(|name| captures.name(name).map(|m| (name, m.as_str())))
            .collect::<HashMap<_, _>>();
        let path = self.template.render(&vars)?;

        let (prefix, tail) = input.split_at(whole.end());
        Ok(Mapped { path, prefix, tail })
    }

    /// Like `map_prefix`, but the match must consume all of `input`.
    pub fn map_full(&self, input: &str) -> Result<String, MapError> {
        let mapped = self.map_prefix(input)?;
        if !mapped.tail.is_empty() {
            return Err(MapError::NoMatch);
        }
        Ok(mapped.path)
    }
}
