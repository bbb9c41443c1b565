//! Path pattern parsing and matching.
//!
//! # Syntax
//! - `literal` matches the segment exactly (case-sensitive)
//! - `:name` matches any non-empty segment and captures it, percent-decoded
//! - `*` as the last segment matches the rest of the path, including nothing

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("Pattern must start with '/': {0}")]
    MissingLeadingSlash(String),

    #[error("Wildcard must be the last segment: {0}")]
    WildcardNotLast(String),

    #[error("Parameter without a name: {0}")]
    UnnamedParam(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
    Wildcard,
}

/// Parameters captured by a match, in pattern order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    values: Vec<(String, String)>,
}

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn push(&mut self, name: &str, value: String) {
        self.values.push((name.to_string(), value));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(PatternError::MissingLeadingSlash(pattern.to_string()));
        };

        let parts = split_segments(rest);
        let mut segments = Vec::with_capacity(parts.len());

        for (i, part) in parts.iter().enumerate() {
            let segment = if *part == "*" {
                if i + 1 != parts.len() {
                    return Err(PatternError::WildcardNotLast(pattern.to_string()));
                }
                Segment::Wildcard
            } else if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(PatternError::UnnamedParam(pattern.to_string()));
                }
                Segment::Param(name.to_string())
            } else {
                Segment::Literal(part.to_string())
            };
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_wildcard(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Wildcard))
    }

    pub fn literal_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    /// Match a request path (without query string).
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let parts = split_segments(path);
        let mut params = RouteParams::default();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Wildcard => return Some(params),
                Segment::Literal(expected) => {
                    if parts.get(i) != Some(&expected.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.get(i).filter(|p| !p.is_empty())?;
                    params.push(name, decode_segment(value));
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }
}

/// Split a slash-free-prefixed path into segments, ignoring one trailing slash.
fn split_segments(path: &str) -> Vec<&str> {
    if path.is_empty() {
        return Vec::new();
    }
    let path = path.strip_suffix('/').unwrap_or(path);
    path.split('/').collect()
}

fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}
