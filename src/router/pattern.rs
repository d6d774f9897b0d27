use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::router::error::RouterError;

/// One segment of a parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    fn rank(&self) -> u8 {
        match self {
            Segment::Literal(_) => 0,
            Segment::Param(_) => 1,
        }
    }
}

/// A path pattern such as `/community-metrics/{communityMetric}/edit`.
///
/// Empty segments are dropped, so a trailing slash does not change what the
/// pattern matches. The source string is kept verbatim for reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, RouterError> {
        let invalid = |reason: &str| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if !pattern.starts_with('/') {
            return Err(invalid("pattern must start with '/'"));
        }

        let mut segments = Vec::new();
        for part in split_segments(pattern) {
            let opens = part.matches('{').count();
            let closes = part.matches('}').count();

            if opens == 0 && closes == 0 {
                segments.push(Segment::Literal(part.to_string()));
                continue;
            }

            if opens != 1 || closes != 1 || !part.starts_with('{') || !part.ends_with('}') {
                return Err(invalid(
                    "a parameter must fill its whole segment, like '{name}'",
                ));
            }

            let name = &part[1..part.len() - 1];
            if name.is_empty() {
                return Err(invalid("parameter name is empty"));
            }
            if segments
                .iter()
                .any(|s| matches!(s, Segment::Param(existing) if existing == name))
            {
                return Err(invalid(&format!("parameter '{}' appears twice", name)));
            }
            segments.push(Segment::Param(name.to_string()));
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match an already split request path, binding parameters on success.
    ///
    /// Request segments are percent-decoded before they are compared with
    /// literals or bound to parameters.
    pub fn matches(&self, path_segments: &[&str]) -> Option<HashMap<String, String>> {
        if path_segments.len() != self.segments.len() {
            return None;
        }

        let mut bindings = HashMap::new();
        for (segment, actual) in self.segments.iter().zip(path_segments) {
            // Undecodable input (invalid UTF-8) is compared as sent
            let decoded = urlencoding::decode(actual).unwrap_or(Cow::Borrowed(*actual));
            match segment {
                Segment::Literal(literal) => {
                    if *literal != decoded {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if decoded.is_empty() {
                        return None;
                    }
                    bindings.insert(name.clone(), decoded.into_owned());
                }
            }
        }
        Some(bindings)
    }

    /// Orders patterns so that a literal beats a parameter at the first
    /// position where the two differ.
    pub fn specificity_cmp(&self, other: &Self) -> Ordering {
        self.segments
            .iter()
            .map(Segment::rank)
            .cmp(other.segments.iter().map(Segment::rank))
    }

    /// Substitute parameters into the source string.
    ///
    /// Returns the name of the first missing parameter on failure.
    pub fn render(&self, params: &[(&str, &str)]) -> Result<String, String> {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            // parse() guarantees a closing brace follows
            let end = start + rest[start..].find('}').unwrap_or(rest.len() - start);
            let name = &rest[start + 1..end];
            let value = params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| name.to_string())?;
            out.push_str(&urlencoding::encode(value));
            rest = &rest[(end + 1).min(rest.len())..];
        }
        out.push_str(rest);

        Ok(out)
    }
}

/// Split a request or pattern path into its non-empty segments.
pub fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
