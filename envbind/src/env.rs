//! Environment variable sources

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::hash::BuildHasher;

/// A source of environment variables.
///
/// The binder only ever asks one question: "what is the value of this
/// variable, if it is set?"
pub trait Env {
    fn lookup(&self, name: &str) -> Option<String>;
}

/// The environment of the current process.
///
/// Values that are not valid UTF-8 are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEnv;

impl Env for OsEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl<S: BuildHasher> Env for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Env for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<E: Env + ?Sized> Env for &E {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}
