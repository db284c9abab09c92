use std::collections::HashMap;
use std::fmt::{self, Write};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unclosed action starting at byte {at}")]
    Unclosed { at: usize },
    #[error("empty variable name at byte {at}")]
    EmptyName { at: usize },
    #[error("invalid variable name {name:?} at byte {at}")]
    InvalidName { name: String, at: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Var(String),
}

/// Destination path template: literal text with `{{ name }}` substitutions.
///
/// `{{.name}}` is accepted as a synonym for `{{name}}`.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Names of all variables referenced, in order of appearance.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Var(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitutes `vars` into the template. Names missing from `vars` render empty.
    pub fn render(&self, vars: &HashMap<&str, &str>) -> Result<String, fmt::Error> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.write_str(text)?,
                Segment::Var(name) => {
                    out.write_str(vars.get(name.as_str()).copied().unwrap_or(""))?
                }
            }
        }
        Ok(out)
    }
}

impl FromStr for PathTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        let mut rest = s;
        let mut offset = 0;

        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let at = offset + open;
            let after_open = &rest[open + 2..];
            let close = after_open
                .find("}}")
                .ok_or(TemplateError::Unclosed { at })?;

            let raw = after_open[..close].trim();
            let name = raw.strip_prefix('.').unwrap_or(raw);
            if name.is_empty() {
                return Err(TemplateError::EmptyName { at });
            }
            if !is_identifier(name) {
                return Err(TemplateError::InvalidName {
                    name: raw.to_string(),
                    at,
                });
            }
            segments.push(Segment::Var(name.to_string()));

            let consumed = open + 2 + close + 2;
            rest = &rest[consumed..];
            offset += consumed;
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
