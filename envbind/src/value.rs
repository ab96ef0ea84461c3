//! Bindable field types and their built-in coercions

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::ffi::OsString;
use std::hash::{BuildHasher, Hash};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use std::num::{
    NonZeroI128, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI8, NonZeroIsize, NonZeroU128,
    NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU8, NonZeroUsize,
};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::complex::{Complex128, Complex64};
use crate::de;
use crate::error::{BoxError, ValueError};
use crate::kind::Kind;
use crate::record::{FieldDescriptor, Record};

/// A type that can appear as a field of a [`Record`].
///
/// Implemented for the integer, float, complex, boolean and string types,
/// for the standard collections (decoded from JSON), and by
/// `#[derive(Record)]` for nested records. Paths are strings. Common std
/// leaf types such as `Duration`, `char`, the `std::net` addresses and the
/// `NonZero*` integers are [`Kind::Other`]. `Box<T>` behaves like `T`.
///
/// Caller types implement it with [`Kind::Other`] (or any kind whose
/// registered override should apply) and leave [`coerce`](Value::coerce) at
/// its default. Such fields are bound only through a registered parser and
/// are skipped otherwise.
///
/// ```rust
/// use envbind::{Kind, Value};
///
/// #[derive(Debug, PartialEq)]
/// struct Millis(u64);
///
/// impl Value for Millis {
///     const KIND: Kind = Kind::Other;
/// }
/// ```
pub trait Value: Sized + 'static {
    /// Category used for kind-keyed parser lookup.
    const KIND: Kind;

    /// Declared bit width for numeric kinds, `0` otherwise.
    const BITS: u32 = 0;

    /// Built-in coercion from a raw environment value.
    ///
    /// `None` when the type has no built-in coercion.
    fn coerce(_raw: &str) -> Option<Result<Self, BoxError>> {
        None
    }

    /// Schema of the nested record, for record types.
    fn record_fields() -> Option<&'static [FieldDescriptor]> {
        None
    }

    /// Mutable access to the nested record, for record types.
    fn as_record(&mut self) -> Option<&mut dyn Record> {
        None
    }

    /// Zero value used to materialize an absent optional record.
    fn empty_record() -> Option<Self> {
        None
    }
}

macro_rules! impl_integer {
    ($($ty:ty => $kind:ident, $bits:expr;)*) => {
        $(
            impl Value for $ty {
                const KIND: Kind = Kind::$kind;
                const BITS: u32 = $bits;

                fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
                    Some(raw.parse::<$ty>().map_err(Into::into))
                }
            }
        )*
    };
}

impl_integer! {
    i8 => Int, 8;
    i16 => Int, 16;
    i32 => Int, 32;
    i64 => Int, 64;
    i128 => Int, 128;
    isize => Int, 0;
    u8 => Uint, 8;
    u16 => Uint, 16;
    u32 => Uint, 32;
    u64 => Uint, 64;
    u128 => Uint, 128;
    usize => Uint, 0;
}

/// Floating point precision shared by float fields and complex components.
pub(crate) trait Float: FromStr + Copy + Default + 'static {
    const NAME: &'static str;

    fn is_infinite(self) -> bool;
}

impl Float for f32 {
    const NAME: &'static str = "f32";

    fn is_infinite(self) -> bool {
        f32::is_infinite(self)
    }
}

impl Float for f64 {
    const NAME: &'static str = "f64";

    fn is_infinite(self) -> bool {
        f64::is_infinite(self)
    }
}

/// Parse a base-10 float at the precision of `T`.
///
/// Finite literals that overflow `T` are rejected instead of rounding to
/// infinity.
pub(crate) fn parse_float<T: Float>(raw: &str) -> Result<T, ValueError> {
    let value = raw
        .parse::<T>()
        .map_err(|_| ValueError::syntax(raw, T::NAME))?;
    if value.is_infinite() && !is_infinity_literal(raw) {
        return Err(ValueError::out_of_range(raw, T::NAME));
    }
    Ok(value)
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

impl Value for f32 {
    const KIND: Kind = Kind::Float;
    const BITS: u32 = 32;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        Some(parse_float(raw).map_err(Into::into))
    }
}

impl Value for f64 {
    const KIND: Kind = Kind::Float;
    const BITS: u32 = 64;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        Some(parse_float(raw).map_err(Into::into))
    }
}

impl Value for Complex64 {
    const KIND: Kind = Kind::Complex;
    const BITS: u32 = 64;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        Some(raw.parse::<Self>().map_err(Into::into))
    }
}

impl Value for Complex128 {
    const KIND: Kind = Kind::Complex;
    const BITS: u32 = 128;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        Some(raw.parse::<Self>().map_err(Into::into))
    }
}

/// Parse one of the accepted boolean spellings.
pub(crate) fn parse_bool(raw: &str) -> Result<bool, ValueError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ValueError::syntax(raw, "bool")),
    }
}

impl Value for bool {
    const KIND: Kind = Kind::Bool;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        Some(parse_bool(raw).map_err(Into::into))
    }
}

impl Value for String {
    const KIND: Kind = Kind::String;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        Some(Ok(raw.to_string()))
    }
}

impl<T> Value for Vec<T>
where
    T: DeserializeOwned + 'static,
{
    const KIND: Kind = Kind::Sequence;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        Some(de::from_json(raw))
    }
}

impl<T> Value for VecDeque<T>
where
    T: DeserializeOwned + 'static,
{
    const KIND: Kind = Kind::Sequence;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        Some(de::from_json(raw))
    }
}

impl<T, S> Value for HashSet<T, S>
where
    T: DeserializeOwned + Eq + Hash + 'static,
    S: BuildHasher + Default + 'static,
{
    const KIND: Kind = Kind::Sequence;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        Some(de::from_json(raw))
    }
}

impl<T> Value for BTreeSet<T>
where
    T: DeserializeOwned + Ord + 'static,
{
    const KIND: Kind = Kind::Sequence;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        Some(de::from_json(raw))
    }
}

impl<K, V, S> Value for HashMap<K, V, S>
where
    K: DeserializeOwned + Eq + Hash + 'static,
    V: DeserializeOwned + 'static,
    S: BuildHasher + Default + 'static,
{
    const KIND: Kind = Kind::Mapping;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        Some(de::from_json(raw))
    }
}

impl<K, V> Value for BTreeMap<K, V>
where
    K: DeserializeOwned + Ord + 'static,
    V: DeserializeOwned + 'static,
{
    const KIND: Kind = Kind::Mapping;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        Some(de::from_json(raw))
    }
}

impl Value for PathBuf {
    const KIND: Kind = Kind::String;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        Some(Ok(PathBuf::from(raw)))
    }
}

impl Value for OsString {
    const KIND: Kind = Kind::String;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        Some(Ok(OsString::from(raw)))
    }
}

// Bindable fields with no built-in coercion, only through a registered parser
macro_rules! impl_other {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Value for $ty {
                const KIND: Kind = Kind::Other;
            }
        )*
    };
}

impl_other! {
    char,
    Duration,
    IpAddr,
    Ipv4Addr,
    Ipv6Addr,
    SocketAddr,
    SocketAddrV4,
    SocketAddrV6,
    NonZeroI8,
    NonZeroI16,
    NonZeroI32,
    NonZeroI64,
    NonZeroI128,
    NonZeroIsize,
    NonZeroU8,
    NonZeroU16,
    NonZeroU32,
    NonZeroU64,
    NonZeroU128,
    NonZeroUsize,
}

impl<T: Value> Value for Box<T> {
    const KIND: Kind = T::KIND;
    const BITS: u32 = T::BITS;

    fn coerce(raw: &str) -> Option<Result<Self, BoxError>> {
        T::coerce(raw).map(|result| result.map(Box::new))
    }

    fn record_fields() -> Option<&'static [FieldDescriptor]> {
        T::record_fields()
    }

    fn as_record(&mut self) -> Option<&mut dyn Record> {
        (**self).as_record()
    }

    fn empty_record() -> Option<Self> {
        T::empty_record().map(Box::new)
    }
}
