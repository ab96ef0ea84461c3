//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates binding attributes from structs and
//! their fields during macro expansion.

use syn::{Attribute, Field, LitStr};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Source environment variable name.
    ///
    /// If `None`, the field is never bound directly.
    pub name: Option<String>,

    /// Keyword selecting a registered parser.
    pub parser: Option<String>,

    /// Raw parameter list handed to the parser.
    pub params: Option<String>,

    /// Exclude the field from the record schema.
    pub skip: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    ///
    /// Attributes other than `env` are ignored so other derives can use them.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in env_attrs(&field.attrs) {
            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    attrs.name = Some(meta.value()?.parse::<LitStr>()?.value());
                    return Ok(());
                }

                // parser = "..."
                if meta.path.is_ident("parser") {
                    attrs.parser = Some(meta.value()?.parse::<LitStr>()?.value());
                    return Ok(());
                }

                // params = "..."
                if meta.path.is_ident("params") {
                    attrs.params = Some(meta.value()?.parse::<LitStr>()?.value());
                    return Ok(());
                }

                // skip
                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        Ok(attrs)
    }
}

/// Parsed `#[env(...)]` attributes from the struct itself.
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    /// Prepended to every declared variable name.
    pub prefix: String,

    /// The struct can be decoded wholesale from a JSON document.
    pub json: bool,
}

impl ContainerAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut container = Self::default();

        for attr in env_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                // prefix = "..."
                if meta.path.is_ident("prefix") {
                    container.prefix = meta.value()?.parse::<LitStr>()?.value();
                    return Ok(());
                }

                // json
                if meta.path.is_ident("json") {
                    container.json = true;
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level env attribute"))
            })?;
        }

        Ok(container)
    }

    /// Full variable name for a field-level `name`.
    pub fn var_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}

fn env_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("env"))
}
