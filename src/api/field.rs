use std::cell::RefCell;
use std::collections::HashSet;
use std::marker::PhantomData;
use std::rc::Rc;
use std::str::FromStr;

use crate::api::binding::*;
use crate::model::Arity;
use crate::prelude::Collectable;

/// A binding that takes a single value (arity [`Arity::Scalar`]).
///
/// Conversion goes through the target type's `FromStr`.
/// For enum targets, implement `FromStr` case-insensitively if that is the desired
/// command line behaviour; the binder itself performs no case folding.
pub struct Scalar<'a, T> {
    variable: Rc<RefCell<&'a mut T>>,
}

impl<'a, T> Scalar<'a, T> {
    /// Create a scalar binding.
    pub fn new(variable: &'a mut T) -> Self {
        Self {
            variable: Rc::new(RefCell::new(variable)),
        }
    }
}

impl<'a, T> GenericBindable<'a, T> for Scalar<'a, T>
where
    T: FromStr,
{
    fn matched(&mut self) {
        // Do nothing.
    }

    fn bind(&mut self, values: &[&str]) -> Result<(), InvalidConversion> {
        match values {
            [token] => {
                let value = T::from_str(token).map_err(|_| InvalidConversion {
                    token: token.to_string(),
                    type_name: std::any::type_name::<T>(),
                })?;
                **self.variable.borrow_mut() = value;
                Ok(())
            }
            _ => unreachable!("internal error - a scalar binds precisely one value"),
        }
    }

    fn arity(&self) -> Arity {
        Arity::Scalar
    }
}

/// A binding that takes no values (arity [`Arity::Boolean`]).
/// Presence writes the target value into the field.
pub struct Switch<'a, T> {
    variable: Rc<RefCell<&'a mut T>>,
    target: Option<T>,
}

impl<'a, T> Switch<'a, T> {
    /// Create a switch binding.
    pub fn new(variable: &'a mut T, target: T) -> Self {
        Self {
            variable: Rc::new(RefCell::new(variable)),
            target: Some(target),
        }
    }
}

impl<'a, T> GenericBindable<'a, T> for Switch<'a, T> {
    fn matched(&mut self) {
        // A repeated switch is idempotent; the target is only written once.
        if let Some(target) = self.target.take() {
            **self.variable.borrow_mut() = target;
        }
    }

    fn bind(&mut self, _values: &[&str]) -> Result<(), InvalidConversion> {
        unreachable!("internal error - must not bind values on a Switch");
    }

    fn arity(&self) -> Arity {
        Arity::Boolean
    }
}

/// A binding that maps down to [`Option`], taking a single value (arity [`Arity::Scalar`]).
/// The field stays `None` until the option is present with a well-formed value.
pub struct Optional<'a, T> {
    variable: Rc<RefCell<&'a mut Option<T>>>,
}

impl<'a, T> Optional<'a, T> {
    /// Create an optional binding.
    pub fn new(variable: &'a mut Option<T>) -> Self {
        Self {
            variable: Rc::new(RefCell::new(variable)),
        }
    }
}

impl<'a, T> GenericBindable<'a, T> for Optional<'a, T>
where
    T: FromStr,
{
    fn matched(&mut self) {
        // Do nothing.
    }

    fn bind(&mut self, values: &[&str]) -> Result<(), InvalidConversion> {
        match values {
            [token] => {
                let value = T::from_str(token).map_err(|_| InvalidConversion {
                    token: token.to_string(),
                    type_name: std::any::type_name::<T>(),
                })?;
                self.variable.borrow_mut().replace(value);
                Ok(())
            }
            _ => unreachable!("internal error - an optional binds precisely one value"),
        }
    }

    fn arity(&self) -> Arity {
        Arity::Scalar
    }
}

/// A binding that takes multiple values (arity [`Arity::Array`]).
///
/// Binding is all-or-nothing: every element is converted before any is added, so a
/// malformed element leaves the collection untouched.
pub struct List<'a, C, T>
where
    C: 'a + Collectable<T>,
{
    variable: Rc<RefCell<&'a mut C>>,
    _phantom: PhantomData<T>,
}

impl<'a, C, T> List<'a, C, T>
where
    C: 'a + Collectable<T>,
{
    /// Create a list binding.
    pub fn new(variable: &'a mut C) -> Self {
        Self {
            variable: Rc::new(RefCell::new(variable)),
            _phantom: PhantomData,
        }
    }
}

impl<'a, C, T> GenericBindable<'a, T> for List<'a, C, T>
where
    T: FromStr,
    C: 'a + Collectable<T>,
{
    fn matched(&mut self) {
        // Do nothing.
    }

    fn bind(&mut self, values: &[&str]) -> Result<(), InvalidConversion> {
        let mut converted = Vec::with_capacity(values.len());

        for token in values {
            let value = T::from_str(token).map_err(|_| InvalidConversion {
                token: token.to_string(),
                type_name: std::any::type_name::<T>(),
            })?;
            converted.push(value);
        }

        for value in converted {
            (**self.variable.borrow_mut()).add(value);
        }

        Ok(())
    }

    fn arity(&self) -> Arity {
        Arity::Array
    }
}

impl<T> Collectable<T> for Vec<T> {
    fn add(&mut self, item: T) {
        self.push(item);
    }
}

impl<T: Eq + std::hash::Hash> Collectable<T> for HashSet<T> {
    fn add(&mut self, item: T) {
        self.insert(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec() {
        let mut collection: Vec<u32> = Vec::default();
        collection.add(1);
        collection.add(0);
        assert_eq!(collection, vec![1, 0]);
    }

    #[test]
    fn hash_set() {
        let mut collection: HashSet<u32> = HashSet::default();
        collection.add(1);
        collection.add(0);
        collection.add(1);
        assert_eq!(collection, HashSet::from([1, 0]));
    }

    #[test]
    fn scalar_bind() {
        // Integer
        let mut variable: u32 = u32::default();
        let mut scalar = Scalar::new(&mut variable);
        scalar.bind(&["5"]).unwrap();
        drop(scalar);
        assert_eq!(variable, 5);

        // Boolean
        let mut variable: bool = false;
        let mut scalar = Scalar::new(&mut variable);
        scalar.bind(&["true"]).unwrap();
        drop(scalar);
        assert!(variable);
    }

    #[test]
    fn scalar_bind_invalid() {
        let mut variable: u32 = 7;
        let mut scalar = Scalar::new(&mut variable);
        let error = scalar.bind(&["blah"]).unwrap_err();
        assert_eq!(error.token, "blah");
        drop(scalar);
        assert_eq!(variable, 7);
    }

    #[test]
    #[should_panic]
    fn switch_bind() {
        let mut variable: u32 = u32::default();
        let mut switch = Switch::new(&mut variable, 1);
        match switch.bind(&["5"]) {
            Ok(_) => {}
            Err(_) => {}
        };
    }

    #[test]
    fn switch_matched() {
        let mut variable: u32 = u32::default();
        let mut switch = Switch::new(&mut variable, 2);
        switch.matched();
        drop(switch);
        assert_eq!(variable, 2);
    }

    #[test]
    fn switch_matched_repeat() {
        let mut variable: u32 = u32::default();
        let mut switch = Switch::new(&mut variable, 2);
        switch.matched();
        switch.matched();
        drop(switch);
        assert_eq!(variable, 2);
    }

    #[test]
    fn optional_bind() {
        let mut variable: Option<u32> = None;
        let mut optional = Optional::new(&mut variable);
        optional.bind(&["1"]).unwrap();
        drop(optional);
        assert_eq!(variable, Some(1));
    }

    #[test]
    fn optional_bind_invalid() {
        let mut variable: Option<u32> = None;
        let mut optional = Optional::new(&mut variable);
        optional.bind(&["blah"]).unwrap_err();
        drop(optional);
        assert_eq!(variable, None);
    }

    #[test]
    fn list_bind() {
        // Vec<u32>
        let mut variable: Vec<u32> = Vec::default();
        let mut list = List::new(&mut variable);
        list.bind(&["1", "0"]).unwrap();
        drop(list);
        assert_eq!(variable, vec![1, 0]);

        // HashSet<u32>
        let mut variable: HashSet<u32> = HashSet::default();
        let mut list = List::new(&mut variable);
        list.bind(&["1", "0", "0"]).unwrap();
        drop(list);
        assert_eq!(variable, HashSet::from([0, 1]));
    }

    #[test]
    fn list_bind_atomic() {
        // The malformed element must leave the whole collection untouched.
        let mut variable: Vec<u32> = Vec::default();
        let mut list = List::new(&mut variable);
        let error = list.bind(&["1", "2", "x"]).unwrap_err();
        assert_eq!(error.token, "x");
        drop(list);
        assert_eq!(variable, Vec::<u32>::default());
    }

    #[test]
    fn matched_non_switch() {
        let mut variable: u32 = u32::default();
        let mut scalar = Scalar::new(&mut variable);
        scalar.matched();
        drop(scalar);
        assert_eq!(variable, 0);

        let mut variable: Vec<u32> = Vec::default();
        let mut list = List::new(&mut variable);
        list.matched();
        drop(list);
        assert_eq!(variable, vec![]);
    }

    #[test]
    fn arities() {
        let mut variable: u32 = u32::default();
        let scalar = Scalar::new(&mut variable);
        assert_eq!(scalar.arity(), Arity::Scalar);

        let mut variable: u32 = u32::default();
        let switch = Switch::new(&mut variable, 2);
        assert_eq!(switch.arity(), Arity::Boolean);

        let mut variable: Option<u32> = None;
        let optional = Optional::new(&mut variable);
        assert_eq!(optional.arity(), Arity::Scalar);

        let mut variable: Vec<u32> = Vec::default();
        let list: List<Vec<u32>, u32> = List::new(&mut variable);
        assert_eq!(list.arity(), Arity::Array);
    }
}
