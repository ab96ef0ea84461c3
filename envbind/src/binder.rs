//! Recursive field walker that binds environment values into records

use tracing::{debug, trace, warn};

use crate::annotation::BindingRequest;
use crate::env::{Env, OsEnv};
use crate::error::BindError;
use crate::kind::Kind;
use crate::parser::Parsers;
use crate::record::{FieldDescriptor, Record};
use crate::slot::Slot;

/// Bind `record` from the process environment using only the built-in
/// coercions.
///
/// Fields whose variable is not set keep their current value.
///
/// # Errors
///
/// Returns the first field whose value cannot be coerced. Fields bound
/// before it keep their new values.
pub fn bind<R: Record>(record: &mut R) -> Result<(), BindError> {
    Walker::new(&OsEnv, &Parsers::new()).walk(record)
}

/// Bind `record` from the process environment, consulting `parsers` before
/// the built-in coercions.
///
/// # Errors
///
/// Same as [`bind`].
pub fn bind_with_parsers<R: Record>(record: &mut R, parsers: &Parsers) -> Result<(), BindError> {
    Walker::new(&OsEnv, parsers).walk(record)
}

/// Reusable binder owning an environment source and a parser registry.
///
/// ```rust
/// use std::collections::HashMap;
/// use envbind::{Binder, Record};
///
/// #[derive(Debug, Default, Record)]
/// pub struct Config {
///     #[env(name = "DB_PORT")]
///     pub port: i64,
/// }
///
/// let env: HashMap<String, String> = [("DB_PORT".to_string(), "5034".to_string())].into();
/// let binder = Binder::with_env(env);
///
/// let mut config = Config::default();
/// binder.bind(&mut config).unwrap();
/// assert_eq!(config.port, 5034);
/// ```
#[derive(Debug, Default)]
pub struct Binder<E = OsEnv> {
    env: E,
    parsers: Parsers,
}

impl Binder<OsEnv> {
    /// Binder over the process environment with no overrides.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Env> Binder<E> {
    /// Binder over a custom environment source.
    pub fn with_env(env: E) -> Self {
        Self {
            env,
            parsers: Parsers::new(),
        }
    }

    /// Replace the parser overrides.
    pub fn parsers(mut self, parsers: Parsers) -> Self {
        self.parsers = parsers;
        self
    }

    /// Bind `record` in place.
    ///
    /// # Errors
    ///
    /// Same as [`bind`].
    pub fn bind<R: Record>(&self, record: &mut R) -> Result<(), BindError> {
        Walker::new(&self.env, &self.parsers).walk(record)
    }
}

/// State of one bind call: where values come from and where we are.
struct Walker<'a> {
    env: &'a dyn Env,
    parsers: &'a Parsers,
    path: Vec<&'static str>,
}

impl<'a> Walker<'a> {
    fn new(env: &'a dyn Env, parsers: &'a Parsers) -> Self {
        Self {
            env,
            parsers,
            path: Vec::new(),
        }
    }

    fn walk(&mut self, record: &mut dyn Record) -> Result<(), BindError> {
        record.visit_fields(&mut |field: &'static FieldDescriptor, slot: &mut dyn Slot| {
            self.path.push(field.name);
            let result = self.field(field, slot);
            self.path.pop();
            result
        })
    }

    fn field(&mut self, field: &'static FieldDescriptor, slot: &mut dyn Slot) -> Result<(), BindError> {
        if let Some(request) = field.annotation.resolve(self.env) {
            return self.assign(slot, request);
        }

        let Some(nested) = slot.record_fields() else {
            return Ok(());
        };

        // only one level is inspected before materializing an absent record
        if slot.is_absent() && !nested.iter().any(|f| f.annotation.is_satisfied(self.env)) {
            trace!(field = %self.location(), "skipping optional record with nothing to bind");
            return Ok(());
        }

        match slot.record_mut() {
            Some(record) => self.walk(record),
            None => Ok(()),
        }
    }

    fn assign(&self, slot: &mut dyn Slot, request: BindingRequest) -> Result<(), BindError> {
        let ty = slot.type_info();
        let coerced = match self.parsers.resolve(request.parser, &ty) {
            Some(parser) => parser(&ty, &request.value, &request.params),
            None => match slot.coerce(&request.value) {
                Some(result) => result,
                None if ty.kind() == Kind::Record => {
                    warn!(
                        field = %self.location(),
                        var = request.var,
                        "record field is set but its type is not marked #[env(json)], leaving it unbound"
                    );
                    return Ok(());
                }
                None => {
                    debug!(
                        field = %self.location(),
                        var = request.var,
                        kind = %ty.kind(),
                        "no coercion for field type, leaving it unbound"
                    );
                    return Ok(());
                }
            },
        };

        let value = coerced.map_err(|source| BindError::Coercion {
            field: self.location(),
            var: request.var.to_string(),
            value: request.value,
            type_name: ty.name(),
            source,
        })?;

        slot.store(value).map_err(|_| BindError::TypeMismatch {
            field: self.location(),
            var: request.var.to_string(),
            type_name: ty.name(),
        })?;

        debug!(field = %self.location(), var = request.var, "bound field from environment");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.join(".")
    }
}
