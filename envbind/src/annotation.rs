//! Field annotations and their resolution against the environment

use std::collections::HashMap;

use crate::env::Env;

/// Separator between parameter tokens in `params = "..."`.
const PARAM_SEPARATOR: char = ',';

/// Separator between key and value in a keyword parameter token.
const KEY_VALUE_SEPARATOR: char = '=';

/// The three independent `#[env(...)]` declarations of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Annotation {
    /// Source environment variable (`name = "..."`), with any container
    /// prefix already applied
    pub name: Option<&'static str>,
    /// Parser keyword (`parser = "..."`)
    pub parser: Option<&'static str>,
    /// Raw parameter list (`params = "..."`)
    pub params: Option<&'static str>,
}

impl Annotation {
    /// The variable name, if one was declared and it is not empty.
    pub fn var(&self) -> Option<&'static str> {
        self.name.filter(|name| !name.is_empty())
    }

    /// Whether the variable is declared and currently set in `env`.
    pub fn is_satisfied(&self, env: &dyn Env) -> bool {
        self.var().is_some_and(|name| env.lookup(name).is_some())
    }

    /// Look the variable up and, when it is set, collect everything a
    /// parser needs to bind it.
    pub fn resolve(&self, env: &dyn Env) -> Option<BindingRequest> {
        let var = self.var()?;
        let value = env.lookup(var)?;
        Some(BindingRequest {
            var,
            value,
            parser: self.parser.filter(|keyword| !keyword.is_empty()),
            params: self.params.map(Params::parse).unwrap_or_default(),
        })
    }
}

/// Everything needed to bind one satisfied field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingRequest {
    pub var: &'static str,
    pub value: String,
    pub parser: Option<&'static str>,
    pub params: Params,
}

/// Parameters passed to a coercion function.
///
/// Parsed from a `params = "..."` annotation: the string is split on `,`,
/// tokens containing `=` become keyword parameters (split at the first
/// `=`), the rest are positional parameters in order.
///
/// ```rust
/// use envbind::Params;
///
/// let params = Params::parse("a,sep=;,b");
/// assert_eq!(params.args(), ["a", "b"]);
/// assert_eq!(params.get("sep"), Some(";"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    args: Vec<String>,
    kwargs: HashMap<String, String>,
}

impl Params {
    pub fn parse(raw: &str) -> Self {
        let mut params = Self::default();
        if raw.is_empty() {
            return params;
        }
        for token in raw.split(PARAM_SEPARATOR) {
            match token.split_once(KEY_VALUE_SEPARATOR) {
                Some((key, value)) => {
                    params.kwargs.insert(key.to_string(), value.to_string());
                }
                None => params.args.push(token.to_string()),
            }
        }
        params
    }

    /// Positional parameters, in declaration order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Keyword parameter by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.kwargs.get(key).map(String::as_str)
    }

    /// All keyword parameters.
    pub fn kwargs(&self) -> &HashMap<String, String> {
        &self.kwargs
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }
}
