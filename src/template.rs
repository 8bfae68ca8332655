//! URI template resolution.
//!
//! Templates look like `/communities/{community_id}/collections`. Each
//! `{name}` placeholder is replaced by the matching entry of a [`PathVars`]
//! map and percent-encoded as a single path segment, so a value may contain
//! `/`, `?`, spaces or any Unicode text. Query parameters are appended in the
//! order they were declared; parameters without a value are left out of the
//! query string entirely.

use crate::error::{RestError, Result};
use std::fmt::Display;
use url::Url;

/// Ordered placeholder values for one request.
///
/// A variable set to `None` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathVars {
    vars: Vec<(String, Option<String>)>,
}

impl PathVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a placeholder value
    pub fn var(self, name: &str, value: impl Display) -> Self {
        self.opt(name, Some(value))
    }

    /// Set a placeholder value that may be absent
    pub fn opt<V: Display>(mut self, name: &str, value: Option<V>) -> Self {
        let value = value.map(|v| v.to_string());
        match self.vars.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => self.vars.push((name.to_string(), value)),
        }
        self
    }

    /// Present value of a placeholder
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_deref())
    }
}

/// Source of optional query values, looked up by parameter name.
pub trait QueryArgs {
    fn query_value(&self, name: &str) -> Option<String>;
}

impl QueryArgs for () {
    fn query_value(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Ordered query parameters, each with an optional value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(String, Option<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the declared parameters, in declaration order, from `args`
    pub fn declared(names: &[&str], args: &dyn QueryArgs) -> Self {
        QueryParams {
            params: names
                .iter()
                .map(|name| (name.to_string(), args.query_value(name)))
                .collect(),
        }
    }

    /// Append a parameter; `None` keeps its slot but is never sent
    pub fn param<V: Display>(mut self, name: &str, value: Option<V>) -> Self {
        self.params
            .push((name.to_string(), value.map(|v| v.to_string())));
        self
    }

    /// Parameters that carry a value, in order
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .filter_map(|(name, value)| value.as_deref().map(|v| (name.as_str(), v)))
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

/// Names of the placeholders in `template`, in order of appearance
pub fn placeholders(template: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for segment in path_segments(template) {
        scan_segment(template, segment, |name| {
            names.push(name.to_string());
            Ok(String::new())
        })?;
    }
    Ok(names)
}

/// Resolve `template` against `base` into a fully encoded request URL.
///
/// Fails with [`RestError::TemplateResolution`] when a placeholder has no
/// value; nothing is sent in that case.
pub fn resolve(base: &Url, template: &str, vars: &PathVars, query: &QueryParams) -> Result<Url> {
    let segments = path_segments(template)
        .map(|segment| expand_segment(template, segment, vars))
        .collect::<Result<Vec<_>>>()?;

    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().map_err(|_| {
            RestError::InvalidConfig(format!("base URL {} cannot carry a path", base))
        })?;
        path.pop_if_empty();
        path.extend(segments.iter());
    }

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query.present());
    }

    Ok(url)
}

fn path_segments(template: &str) -> std::str::Split<'_, char> {
    template.strip_prefix('/').unwrap_or(template).split('/')
}

fn expand_segment(template: &str, segment: &str, vars: &PathVars) -> Result<String> {
    let mut substituted = false;
    let expanded = scan_segment(template, segment, |name| {
        substituted = true;
        vars.get(name)
            .map(str::to_string)
            .ok_or_else(|| RestError::TemplateResolution {
                template: template.to_string(),
                placeholder: name.to_string(),
            })
    })?;

    // Dot segments are collapsed by URL normalization and cannot carry a value.
    if substituted && (expanded == "." || expanded == "..") {
        return Err(RestError::MalformedTemplate {
            template: template.to_string(),
            reason: format!("segment {} expands to a dot segment", segment),
        });
    }
    Ok(expanded)
}

/// Walk one path segment, copying literal text and replacing each
/// placeholder with the output of `substitute`.
fn scan_segment<F>(template: &str, segment: &str, mut substitute: F) -> Result<String>
where
    F: FnMut(&str) -> Result<String>,
{
    let malformed = |reason: &str| RestError::MalformedTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    };

    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;
    while let Some(pos) = rest.find(|c: char| c == '{' || c == '}') {
        let (literal, tail) = rest.split_at(pos);
        out.push_str(literal);
        if tail.starts_with('}') {
            return Err(malformed("unmatched '}'"));
        }
        let close = tail.find('}').ok_or_else(|| malformed("unclosed '{'"))?;
        let name = &tail[1..close];
        if name.is_empty() || name.contains('{') {
            return Err(malformed("empty or nested placeholder"));
        }
        out.push_str(&substitute(name)?);
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
