//! Configuration layers and declaration sources.
//!
//! A [`Layer`] is an ordered sequence of declarations. The base layer
//! declares every key the deployment consumes; an override layer re-declares
//! a subset. Declaration order matters only for templates, which interpolate
//! keys resolved earlier in the pass.

use crate::resolver::env::EnvSource;
use crate::resolver::namespace::Namespace;
use crate::resolver::value::Value;

/// Where a declared value comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A fixed value.
    Literal(Value),

    /// An environment variable, with an optional default when unset.
    /// With no default an unset variable resolves to an empty string,
    /// never to a failure.
    Env {
        var: String,
        default: Option<Value>,
    },

    /// An environment variable split into a list on a separator.
    /// Unset or empty resolves to an empty list.
    EnvList { var: String, separator: char },

    /// A string template with `{key}` placeholders substituted from the
    /// namespace as resolved so far.
    Format { template: String },

    /// A list of string templates, each interpolated like [`Source::Format`].
    FormatList { templates: Vec<String> },
}

impl Source {
    /// Evaluate this source against the namespace-so-far and an environment.
    pub fn evaluate(&self, resolved: &Namespace, env: &dyn EnvSource) -> Value {
        match self {
            Source::Literal(value) => value.clone(),
            Source::Env { var, default } => match env.get(var) {
                Some(raw) => Value::Str(raw),
                None => default.clone().unwrap_or_else(Value::empty),
            },
            Source::EnvList { var, separator } => match env.get(var) {
                Some(raw) if !raw.is_empty() => {
                    Value::List(raw.split(*separator).map(str::to_owned).collect())
                }
                _ => Value::List(Vec::new()),
            },
            Source::Format { template } => Value::Str(interpolate(template, resolved)),
            Source::FormatList { templates } => Value::List(
                templates
                    .iter()
                    .map(|template| interpolate(template, resolved))
                    .collect(),
            ),
        }
    }
}

/// Substitute `{key}` placeholders from the namespace.
///
/// Unknown keys and non-scalar values interpolate as empty strings; the
/// resolver never fails.
fn interpolate(template: &str, resolved: &Namespace) -> String {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            output.push(ch);
            continue;
        }

        let mut key = String::new();
        for inner in chars.by_ref() {
            if inner == '}' {
                break;
            }
            key.push(inner);
        }

        if let Some(rendered) = resolved.get(&key).and_then(Value::render) {
            output.push_str(&rendered);
        }
    }

    output
}

/// One key bound to one source.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub key: String,
    pub source: Source,
}

/// An ordered sequence of declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    declarations: Vec<Declaration>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    fn declare(mut self, key: impl Into<String>, source: Source) -> Self {
        self.declarations.push(Declaration {
            key: key.into(),
            source,
        });
        self
    }

    /// Declare a literal value.
    pub fn set(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.declare(key, Source::Literal(value.into()))
    }

    /// Declare an environment-derived value with no default.
    pub fn env(self, key: impl Into<String>, var: impl Into<String>) -> Self {
        self.declare(
            key,
            Source::Env {
                var: var.into(),
                default: None,
            },
        )
    }

    /// Declare an environment-derived value with a default.
    pub fn env_or(
        self,
        key: impl Into<String>,
        var: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        self.declare(
            key,
            Source::Env {
                var: var.into(),
                default: Some(default.into()),
            },
        )
    }

    /// Declare a list derived from a separator-delimited environment variable.
    pub fn env_list(
        self,
        key: impl Into<String>,
        var: impl Into<String>,
        separator: char,
    ) -> Self {
        self.declare(
            key,
            Source::EnvList {
                var: var.into(),
                separator,
            },
        )
    }

    /// Declare a templated string interpolating previously resolved keys.
    pub fn format(self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.declare(
            key,
            Source::Format {
                template: template.into(),
            },
        )
    }

    /// Declare a list of templated strings.
    pub fn format_list<I, S>(self, key: impl Into<String>, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(
            key,
            Source::FormatList {
                templates: templates.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
