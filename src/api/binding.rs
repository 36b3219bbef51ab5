use thiserror::Error;

use crate::model::Arity;

/// Raised when token text cannot be coerced into a binding's target type.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot convert '{token}' to {type_name}.")]
pub struct InvalidConversion {
    pub(crate) token: String,
    pub(crate) type_name: &'static str,
}

/// Behaviour to bind an explicit generic type T from raw token text.
///
/// We use this at the bottom of the parser object graph so the compiler can maintain each field's type.
pub trait GenericBindable<'a, T> {
    /// Declare that the option was present in the token stream.
    fn matched(&mut self);

    /// Bind the collected raw values into the target field.
    ///
    /// Binding is atomic: either every value converts, or the field is left untouched.
    fn bind(&mut self, values: &[&str]) -> Result<(), InvalidConversion>;

    /// The value-cardinality the underlying field supports.
    fn arity(&self) -> Arity;
}

/// Behaviour to bind an implicit generic type T from raw token text.
///
/// We use this at the middle/top of the parser object graph so that fields of differing types may all live in a single registry.
pub(crate) trait AnonymousBindable {
    fn matched(&mut self);
    fn bind(&mut self, values: &[&str]) -> Result<(), InvalidConversion>;
    fn arity(&self) -> Arity;
}

pub(crate) struct AnonymousBinding<'a, T: 'a> {
    field: Box<dyn GenericBindable<'a, T> + 'a>,
}

impl<'a, T> AnonymousBinding<'a, T> {
    pub(crate) fn erase(field: impl GenericBindable<'a, T> + 'a) -> Self {
        Self {
            field: Box::new(field),
        }
    }
}

impl<'a, T> AnonymousBindable for AnonymousBinding<'a, T> {
    fn matched(&mut self) {
        self.field.matched();
    }

    fn bind(&mut self, values: &[&str]) -> Result<(), InvalidConversion> {
        self.field.bind(values)
    }

    fn arity(&self) -> Arity {
        self.field.arity()
    }
}
