//! Type-erased access to record fields

use std::any::Any;

use crate::error::BoxError;
use crate::kind::TypeInfo;
use crate::record::{FieldDescriptor, Record};
use crate::value::Value;

/// Object-safe view of one field, as seen by the binder.
///
/// For optional fields every query is about the wrapped type (the working
/// type), and storing a value materializes the option.
pub trait Slot {
    /// Descriptor of the working type.
    fn type_info(&self) -> TypeInfo;

    /// Whether the field is an optional that currently holds nothing.
    fn is_absent(&self) -> bool {
        false
    }

    /// Run the built-in coercion of the working type.
    ///
    /// `None` when the working type has no built-in coercion.
    fn coerce(&self, raw: &str) -> Option<Result<Box<dyn Any>, BoxError>>;

    /// Write a coerced value into the field.
    ///
    /// Hands the value back when it is not of the working type.
    fn store(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>>;

    /// Schema of the working type when it is a record.
    fn record_fields(&self) -> Option<&'static [FieldDescriptor]>;

    /// The nested record, allocating it first if the field is an absent
    /// optional. `None` when the working type is not a record.
    fn record_mut(&mut self) -> Option<&mut dyn Record>;
}

/// Slot over a plain field of type `T`.
pub struct Required<'a, T>(pub &'a mut T);

impl<T: Value> Slot for Required<'_, T> {
    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn coerce(&self, raw: &str) -> Option<Result<Box<dyn Any>, BoxError>> {
        T::coerce(raw).map(|result| result.map(|value| Box::new(value) as Box<dyn Any>))
    }

    fn store(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        *self.0 = *value.downcast::<T>()?;
        Ok(())
    }

    fn record_fields(&self) -> Option<&'static [FieldDescriptor]> {
        T::record_fields()
    }

    fn record_mut(&mut self) -> Option<&mut dyn Record> {
        self.0.as_record()
    }
}

/// Slot over an `Option<T>` field.
pub struct Optional<'a, T>(pub &'a mut Option<T>);

impl<T: Value> Slot for Optional<'_, T> {
    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    fn coerce(&self, raw: &str) -> Option<Result<Box<dyn Any>, BoxError>> {
        T::coerce(raw).map(|result| result.map(|value| Box::new(value) as Box<dyn Any>))
    }

    fn store(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        *self.0 = Some(*value.downcast::<T>()?);
        Ok(())
    }

    fn record_fields(&self) -> Option<&'static [FieldDescriptor]> {
        T::record_fields()
    }

    fn record_mut(&mut self) -> Option<&mut dyn Record> {
        if self.0.is_none() {
            *self.0 = Some(T::empty_record()?);
        }
        self.0.as_mut()?.as_record()
    }
}
