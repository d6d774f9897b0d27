use std::collections::{HashMap, HashSet};

use axum::http::Method;

use crate::router::error::RouterError;
use crate::router::pattern::{PathPattern, split_segments};

/// A single (method, pattern, handler, name) binding.
#[derive(Debug, Clone)]
pub struct RouteEntry<H> {
    method: Method,
    pattern: PathPattern,
    handler: H,
    name: String,
}

impl<H> RouteEntry<H> {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Parameters bound while matching a request path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(HashMap<String, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
impl<const N: usize> From<[(&str, &str); N]> for PathParams {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Result of a successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub route: &'a RouteEntry<H>,
    pub params: PathParams,
}

impl<H> RouteMatch<'_, H> {
    pub fn handler(&self) -> &H {
        self.route.handler()
    }
}

/// Collects route entries, then freezes them into a [`RouteTable`].
#[derive(Debug)]
pub struct RouteTableBuilder<H> {
    entries: Vec<RouteEntry<H>>,
    names: HashSet<String>,
}

impl<H> Default for RouteTableBuilder<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            names: HashSet::new(),
        }
    }
}

impl<H> RouteTableBuilder<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
        name: &str,
    ) -> Result<&mut Self, RouterError> {
        if self.names.contains(name) {
            return Err(RouterError::DuplicateName(name.to_string()));
        }
        let pattern = PathPattern::parse(pattern)?;

        self.names.insert(name.to_string());
        self.entries.push(RouteEntry {
            method,
            pattern,
            handler,
            name: name.to_string(),
        });
        Ok(self)
    }

    /// Register every route declared in `declare` under a path prefix and a
    /// name prefix. Both prefixes are concatenated as plain strings.
    pub fn group<F>(&mut self, prefix: &str, name_prefix: &str, declare: F) -> Result<&mut Self, RouterError>
    where
        F: FnOnce(&mut RouteGroup<'_, H>) -> Result<(), RouterError>,
    {
        let mut group = RouteGroup {
            builder: &mut *self,
            prefix: prefix.to_string(),
            name_prefix: name_prefix.to_string(),
        };
        declare(&mut group)?;
        Ok(self)
    }

    /// Freeze the table. Entries are stably sorted so that literal segments
    /// are tried before parameter segments at the same position.
    pub fn build(mut self) -> RouteTable<H> {
        self.entries.sort_by(|a, b| a.pattern.specificity_cmp(&b.pattern));
        RouteTable {
            entries: self.entries,
        }
    }
}

/// Registration scope that prefixes paths and names.
pub struct RouteGroup<'a, H> {
    builder: &'a mut RouteTableBuilder<H>,
    prefix: String,
    name_prefix: String,
}

impl<H> RouteGroup<'_, H> {
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
        name: &str,
    ) -> Result<&mut Self, RouterError> {
        let pattern = format!("{}{}", self.prefix, pattern);
        let name = format!("{}{}", self.name_prefix, name);
        self.builder.register(method, &pattern, handler, &name)?;
        Ok(self)
    }

    pub fn get(&mut self, pattern: &str, handler: H, name: &str) -> Result<&mut Self, RouterError> {
        self.register(Method::GET, pattern, handler, name)
    }

    pub fn post(&mut self, pattern: &str, handler: H, name: &str) -> Result<&mut Self, RouterError> {
        self.register(Method::POST, pattern, handler, name)
    }

    pub fn put(&mut self, pattern: &str, handler: H, name: &str) -> Result<&mut Self, RouterError> {
        self.register(Method::PUT, pattern, handler, name)
    }

    pub fn delete(&mut self, pattern: &str, handler: H, name: &str) -> Result<&mut Self, RouterError> {
        self.register(Method::DELETE, pattern, handler, name)
    }

    /// Nested group; prefixes stack onto this group's prefixes.
    pub fn group<F>(&mut self, prefix: &str, name_prefix: &str, declare: F) -> Result<&mut Self, RouterError>
    where
        F: FnOnce(&mut RouteGroup<'_, H>) -> Result<(), RouterError>,
    {
        let mut nested = RouteGroup {
            builder: &mut *self.builder,
            prefix: format!("{}{}", self.prefix, prefix),
            name_prefix: format!("{}{}", self.name_prefix, name_prefix),
        };
        declare(&mut nested)?;
        Ok(self)
    }
}

/// Immutable, ordered route table.
#[derive(Debug)]
pub struct RouteTable<H> {
    entries: Vec<RouteEntry<H>>,
}

impl<H> RouteTable<H> {
    /// Entries in evaluation order.
    pub fn entries(&self) -> &[RouteEntry<H>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn route(&self, name: &str) -> Option<&RouteEntry<H>> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// First entry whose method and pattern both match `path`.
    pub fn match_route(&self, method: &Method, path: &str) -> Result<RouteMatch<'_, H>, RouterError> {
        let path_segments: Vec<&str> = split_segments(path).collect();

        self.entries
            .iter()
            .filter(|entry| entry.method == *method)
            .find_map(|entry| {
                entry.pattern.matches(&path_segments).map(|bindings| RouteMatch {
                    route: entry,
                    params: PathParams(bindings),
                })
            })
            .ok_or_else(|| RouterError::NotFound {
                method: method.clone(),
                path: path.to_string(),
            })
    }

    /// Methods registered for any pattern matching `path`.
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let path_segments: Vec<&str> = split_segments(path).collect();
        let mut methods: Vec<Method> = Vec::new();
        for entry in &self.entries {
            if entry.pattern.matches(&path_segments).is_some() && !methods.contains(&entry.method) {
                methods.push(entry.method.clone());
            }
        }
        methods
    }

    /// Reverse lookup: build the concrete path for a named route.
    pub fn url_for(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
        let entry = self
            .route(name)
            .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?;

        entry
            .pattern
            .render(params)
            .map_err(|param| RouterError::MissingParameter {
                route: name.to_string(),
                param,
            })
    }
}
