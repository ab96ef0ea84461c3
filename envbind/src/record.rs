//! Compile-time schema of bindable records

use crate::annotation::Annotation;
use crate::error::BindError;
use crate::slot::Slot;

/// Static description of one public field of a record.
///
/// Owned by the record type, not by any instance. Emitted as a constant by
/// `#[derive(Record)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field identifier as declared
    pub name: &'static str,
    /// Declared type, as written in the source
    pub type_name: &'static str,
    /// Whether the field is an `Option<T>`
    pub optional: bool,
    /// `#[env(...)]` metadata of the field
    pub annotation: Annotation,
}

/// Callback receiving each field of a record, in declaration order.
pub type FieldVisitor<'a> =
    dyn FnMut(&'static FieldDescriptor, &mut dyn Slot) -> Result<(), BindError> + 'a;

/// A struct whose public fields can be bound from environment variables.
///
/// Usually derived:
///
/// ```rust
/// use envbind::Record;
///
/// #[derive(Debug, Default, Record)]
/// pub struct Config {
///     #[env(name = "APP_PORT")]
///     pub port: u16,
///
///     // no annotation: left untouched unless it is itself a record
///     pub name: String,
/// }
///
/// assert_eq!(Config::fields().len(), 2);
/// assert_eq!(Config::fields()[0].annotation.name, Some("APP_PORT"));
/// ```
pub trait Record: 'static {
    /// Descriptors of the public fields, in declaration order.
    fn fields() -> &'static [FieldDescriptor]
    where
        Self: Sized;

    /// Hand every public field to `visit`, in the order of [`fields`](Record::fields).
    ///
    /// Stops at, and returns, the first error reported by `visit`.
    fn visit_fields(&mut self, visit: &mut FieldVisitor<'_>) -> Result<(), BindError>;
}
