//! Parser registry: caller overrides in front of the built-in coercions

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::annotation::Params;
use crate::error::BoxError;
use crate::kind::{Kind, TypeInfo};

/// A coercion function: declared type, raw value and parameters in, typed
/// value out.
///
/// The returned value must be of the field's exact declared type (the
/// [`TypeInfo`] passed in). Anything else fails the bind with
/// [`BindError::TypeMismatch`](crate::BindError::TypeMismatch).
pub type ParserFn = dyn Fn(&TypeInfo, &str, &Params) -> Result<Box<dyn Any>, BoxError> + Send + Sync;

/// A lookup table of coercion functions.
pub type ParserTable<K> = HashMap<K, Arc<ParserFn>>;

/// Caller-supplied coercion overrides.
///
/// Consulted for every satisfied field, first match wins:
///
/// 1. the field's `parser = "..."` keyword
/// 2. the field's exact declared type
/// 3. the field's [`Kind`]
///
/// When nothing matches, the built-in coercion of the field type is used.
/// Fields without a built-in coercion are left unbound.
///
/// A registry is immutable once handed to a binder and can be shared
/// across threads.
///
/// ```rust
/// use envbind::{Kind, Params, Parsers, TypeInfo};
///
/// let parsers = Parsers::new()
///     .keyword("csv", |_ty: &TypeInfo, raw: &str, _params: &Params| {
///         let items: Vec<String> = raw.split(',').map(str::to_string).collect();
///         Ok(Box::new(items))
///     })
///     .for_type::<u16, _>(|raw, _params| Ok(raw.trim().parse()?));
///
/// let port = TypeInfo::of::<u16>();
/// assert!(parsers.resolve(None, &port).is_some());
/// assert!(parsers.resolve(None, &TypeInfo::of::<u32>()).is_none());
/// ```
#[derive(Clone, Default)]
pub struct Parsers {
    keywords: ParserTable<String>,
    types: ParserTable<TypeId>,
    kinds: ParserTable<Kind>,
}

impl Parsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the three raw lookup tables.
    pub fn from_tables(
        keywords: ParserTable<String>,
        types: ParserTable<TypeId>,
        kinds: ParserTable<Kind>,
    ) -> Self {
        Self {
            keywords,
            types,
            kinds,
        }
    }

    /// Register a parser selected by `#[env(parser = "keyword")]`.
    pub fn keyword<F>(mut self, keyword: impl Into<String>, parser: F) -> Self
    where
        F: Fn(&TypeInfo, &str, &Params) -> Result<Box<dyn Any>, BoxError> + Send + Sync + 'static,
    {
        self.keywords.insert(keyword.into(), Arc::new(parser));
        self
    }

    /// Register a parser for every field declared exactly as `T`.
    pub fn for_type<T, F>(mut self, parser: F) -> Self
    where
        T: Any,
        F: Fn(&str, &Params) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        let erased = move |_ty: &TypeInfo, raw: &str, params: &Params| {
            parser(raw, params).map(|value| Box::new(value) as Box<dyn Any>)
        };
        self.types.insert(TypeId::of::<T>(), Arc::new(erased));
        self
    }

    /// Register a parser for every field whose type belongs to `kind`.
    pub fn for_kind<F>(mut self, kind: Kind, parser: F) -> Self
    where
        F: Fn(&TypeInfo, &str, &Params) -> Result<Box<dyn Any>, BoxError> + Send + Sync + 'static,
    {
        self.kinds.insert(kind, Arc::new(parser));
        self
    }

    /// Find the override for a field, or `None` to fall back to the
    /// built-in coercion.
    pub fn resolve(&self, keyword: Option<&str>, ty: &TypeInfo) -> Option<&ParserFn> {
        keyword
            .and_then(|keyword| self.keywords.get(keyword))
            .or_else(|| self.types.get(&ty.id()))
            .or_else(|| self.kinds.get(&ty.kind()))
            .map(Arc::as_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.types.is_empty() && self.kinds.is_empty()
    }
}

impl fmt::Debug for Parsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parsers")
            .field("keywords", &self.keywords.keys().collect::<Vec<_>>())
            .field("types", &self.types.len())
            .field("kinds", &self.kinds.keys().collect::<Vec<_>>())
            .finish()
    }
}
