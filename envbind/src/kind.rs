//! Type categories used to dispatch coercions

use std::any::{self, TypeId};
use std::fmt;

use crate::value::Value;

/// Category of a field type, independent of its exact declared type.
///
/// Parsers registered with [`Parsers::for_kind`](crate::Parsers::for_kind)
/// apply to every field whose type belongs to the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Signed integers of any width
    Int,
    /// Unsigned integers of any width
    Uint,
    /// `f32` and `f64`
    Float,
    /// [`Complex64`](crate::Complex64) and [`Complex128`](crate::Complex128)
    Complex,
    Bool,
    String,
    /// Sequences decoded from a JSON array
    Sequence,
    /// Maps decoded from a JSON object
    Mapping,
    /// Nested records
    Record,
    /// Caller types with no built-in coercion
    Other,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Complex => "complex",
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
            Kind::Record => "record",
            Kind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Descriptor of a field's declared type, handed to every coercion function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
    kind: Kind,
    bits: u32,
}

impl TypeInfo {
    /// Descriptor for `T`.
    pub fn of<T: Value>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
            kind: T::KIND,
            bits: T::BITS,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Declared bit width for numeric kinds.
    ///
    /// `0` means the platform-native width (`isize`, `usize`) and is also
    /// reported for non-numeric kinds.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Whether this descriptor is for `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}
