//! Bind environment variables into annotated structs, in place
//!
//! `envbind` fills the fields of an existing struct from environment
//! variables. Each field declares which variable feeds it; fields whose
//! variable is not set keep whatever value the caller put there, so
//! defaults are simply the values of the instance you pass in.
//!
//! # Features
//!
//! - **In place**: Bind into a pre-populated instance, unset variables leave fields alone
//! - **Declarative**: Field metadata with `#[derive(Record)]` and `#[env(...)]`
//! - **Nested records**: Records inside records are walked recursively, optional records are only allocated when something beneath them is set
//! - **Width-exact numbers**: `i8` rejects `"99999"`, `f32` rejects `"1e39"`
//! - **Structured values**: Sequences, maps and records decoded from JSON
//! - **Pluggable parsers**: Overrides by keyword, by exact type or by kind
//!
//! # Value Parsing
//!
//! **Built-in coercions**:
//! - Integers: `MAX_CONNECTIONS=42`, bounded by the declared width
//! - Floats: `RATIO=0.75`, `LIMIT=1e6`
//! - Complex: `IMPEDANCE=2-3i` into [`Complex64`] / [`Complex128`]
//! - Booleans: `DEBUG=true` (also `1`, `t`, `T`, `TRUE`, `True` and their false counterparts)
//! - Strings: taken verbatim
//! - `Vec`, `HashMap`, `BTreeMap`, sets: `INCLUDE=["/a","/b"]`, `KEY_MAP={"x":1}`
//!
//! **Overrides** - registered on a [`Parsers`] registry and selected, in
//! order, by the field's `parser` keyword, its exact type, or its [`Kind`].
//!
//! # Example
//!
//! ```rust
//! use envbind::Record;
//!
//! #[derive(Debug, Default, Record)]
//! pub struct Config {
//!     #[env(name = "DB_PORT")]
//!     pub port: i64,
//!
//!     #[env(name = "INCLUDE")]
//!     pub include: Vec<String>,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("DB_PORT", "5034");
//! #     std::env::set_var("INCLUDE", r#"["/a","/b"]"#);
//! let mut config = Config {
//!     port: 5432,
//!     ..Default::default()
//! };
//! envbind::bind(&mut config)?;
//! assert_eq!(config.port, 5034);
//! assert_eq!(config.include, ["/a", "/b"]);
//! #     Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[env(name = "VAR")]`
//!
//! Source environment variable of the field. Fields without a name are never
//! bound directly, but nested records among them are still walked.
//!
//! ## `#[env(parser = "keyword", params = "a,b,key=value")]`
//!
//! Select a parser registered under `keyword` and hand it parameters. The
//! parameter string is split on `,`; tokens containing `=` are keyword
//! parameters, the others positional.
//!
//! ```rust
//! # use envbind::{Params, Parsers, Record, TypeInfo};
//! #[derive(Debug, Default, Record)]
//! pub struct Config {
//!     #[env(name = "HOSTS", parser = "split", params = "sep=;")]
//!     pub hosts: Vec<String>,
//! }
//!
//! let parsers = Parsers::new().keyword("split", |_ty: &TypeInfo, raw: &str, params: &Params| {
//!     let sep = params.get("sep").unwrap_or(",");
//!     let hosts: Vec<String> = raw.split(sep).map(str::to_string).collect();
//!     Ok(Box::new(hosts))
//! });
//! # std::env::set_var("HOSTS", "a;b");
//! let mut config = Config::default();
//! envbind::bind_with_parsers(&mut config, &parsers).unwrap();
//! # assert_eq!(config.hosts, ["a", "b"]);
//! ```
//!
//! ## `#[env(skip)]`
//!
//! Leave a public field out of the schema. Non-public fields are never part
//! of it.
//!
//! ## Container attributes
//!
//! - `#[env(prefix = "APP_")]`: prepend to every variable name declared on the struct's fields
//! - `#[env(json)]`: the struct can itself be bound from one variable holding a JSON
//!   document (requires `serde::Deserialize`). Without it, a record field whose own
//!   variable is set is left unbound, even if the type derives `Deserialize`, and a
//!   warning is logged
//!
//! Besides the types listed under Value Parsing, `PathBuf` and `OsString` are taken
//! verbatim. `Duration`, `char`, the `std::net` addresses and the `NonZero*` integers
//! are accepted as fields of kind [`Kind::Other`]. They are skipped unless a parser is
//! registered for them.

mod annotation;
mod binder;
mod complex;
#[doc(hidden)]
pub mod de;
mod env;
mod error;
mod kind;
mod parser;
mod record;
pub mod slot;
mod value;

pub use annotation::{Annotation, BindingRequest, Params};
pub use binder::{bind, bind_with_parsers, Binder};
pub use complex::{Complex, Complex128, Complex64};
pub use env::{Env, OsEnv};
pub use envbind_derive::Record;
pub use error::{BindError, BoxError, ValueError};
pub use kind::{Kind, TypeInfo};
pub use parser::{ParserFn, ParserTable, Parsers};
pub use record::{FieldDescriptor, FieldVisitor, Record};
pub use slot::Slot;
pub use value::Value;

// Re-export for macro-generated code
#[doc(hidden)]
pub use anyhow;

// Lets the derive's `::envbind::` paths resolve inside this crate's tests
extern crate self as envbind;
