//! core::binder
//!
//! Value binders: the capability that turns a matched option's raw value
//! string into a typed value.
//!
//! # Contract
//!
//! - An empty value never modifies the target (the default is kept)
//! - A flag binder accepts no value at all; presence is the value
//! - List binders split on `,` with no escaping, convert every element,
//!   and fail the whole bind if any element fails
//!
//! # Example
//!
//! ```
//! use clapr::binder::{self, Binder, Bound};
//!
//! let sizes = Bound::new(vec![1_u32, 2, 3]);
//! let b = binder::list(&sizes);
//!
//! b.bind("--sizes=4,5,6", "4,5,6").unwrap();
//! assert_eq!(sizes.get(), vec![4, 5, 6]);
//!
//! b.bind("--sizes", "").unwrap();
//! assert_eq!(sizes.get(), vec![4, 5, 6]);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use thiserror::Error;

/// Errors from value binding.
#[derive(Debug, Error)]
pub enum BindError {
    /// The value does not convert to the target type.
    #[error("invalid option-argument: '{value}' for option: {option}")]
    Invalid { value: String, option: String },

    /// Failure reported by a user-supplied binder.
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}

impl BindError {
    fn invalid(value: &str, option: &str) -> Self {
        BindError::Invalid {
            value: value.to_string(),
            option: option.to_string(),
        }
    }
}

/// Assigns a parsed option value to its target.
///
/// `raw` is the command line token the option was matched from and
/// `value` is the resolved option-argument (empty when none was given).
pub trait Binder {
    fn bind(&self, raw: &str, value: &str) -> Result<(), BindError>;

    /// Whether the option is boolean-valued (set by presence, takes no value).
    fn is_flag(&self) -> bool {
        false
    }
}

impl<F> Binder for F
where
    F: Fn(&str, &str) -> Result<(), BindError>,
{
    fn bind(&self, raw: &str, value: &str) -> Result<(), BindError> {
        self(raw, value)
    }
}

/// A shared, mutable slot that binders write into and actions read from.
///
/// Cloning a `Bound` yields another handle to the same slot.
pub struct Bound<T>(Rc<RefCell<T>>);

impl<T> Bound<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }

    /// Run `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }
}

impl<T: Clone> Bound<T> {
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T> Clone for Bound<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for Bound<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Bound<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Bound").field(&*self.0.borrow()).finish()
    }
}

/// Types the built-in value and list binders can convert to.
pub trait Scalar: FromStr + Sized {
    fn parse_value(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    fn parse_element(s: &str) -> Option<Self> {
        Self::parse_value(s)
    }
}

impl Scalar for i32 {}
impl Scalar for i64 {}
impl Scalar for u32 {}
impl Scalar for u64 {}
impl Scalar for String {}

impl Scalar for f64 {
    // Float lists tolerate padding ("1.5, 2.5") but not empty elements.
    fn parse_element(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        s.parse().ok()
    }
}

/// Binder for boolean flags.
#[derive(Debug, Clone)]
pub struct FlagBinder {
    target: Bound<bool>,
}

impl Binder for FlagBinder {
    fn bind(&self, raw: &str, value: &str) -> Result<(), BindError> {
        if !value.is_empty() {
            return Err(BindError::invalid(value, raw));
        }
        self.target.set(true);
        Ok(())
    }

    fn is_flag(&self) -> bool {
        true
    }
}

/// Binder for a single scalar value.
#[derive(Debug, Clone)]
pub struct ValueBinder<T> {
    target: Bound<T>,
}

impl<T: Scalar> Binder for ValueBinder<T> {
    fn bind(&self, raw: &str, value: &str) -> Result<(), BindError> {
        if value.is_empty() {
            return Ok(());
        }
        let parsed = T::parse_value(value).ok_or_else(|| BindError::invalid(value, raw))?;
        self.target.set(parsed);
        Ok(())
    }
}

/// Binder for a comma-separated list of scalars.
#[derive(Debug, Clone)]
pub struct ListBinder<T> {
    target: Bound<Vec<T>>,
}

impl<T: Scalar> Binder for ListBinder<T> {
    fn bind(&self, raw: &str, value: &str) -> Result<(), BindError> {
        if value.is_empty() {
            return Ok(());
        }
        let parsed = value
            .split(',')
            .map(|element| T::parse_element(element).ok_or_else(|| BindError::invalid(element, raw)))
            .collect::<Result<Vec<_>, _>>()?;
        self.target.set(parsed);
        Ok(())
    }
}

/// Bind a boolean flag.
pub fn flag(target: &Bound<bool>) -> FlagBinder {
    FlagBinder {
        target: target.clone(),
    }
}

/// Bind a single `f64`, `i32`, `i64`, `u32`, `u64` or `String` value.
pub fn value<T: Scalar>(target: &Bound<T>) -> ValueBinder<T> {
    ValueBinder {
        target: target.clone(),
    }
}

/// Bind a comma-separated list of scalars.
pub fn list<T: Scalar>(target: &Bound<Vec<T>>) -> ListBinder<T> {
    ListBinder {
        target: target.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_sets_true_on_presence() {
        let target = Bound::new(false);
        flag(&target).bind("-v", "").unwrap();
        assert!(target.get());
    }

    #[test]
    fn flag_rejects_values() {
        let target = Bound::new(false);
        let err = flag(&target).bind("--verbose=yes", "yes").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid option-argument: 'yes' for option: --verbose=yes"
        );
        assert!(!target.get());
    }

    #[test]
    fn scalar_values_convert() {
        let f = Bound::new(0.0_f64);
        let i = Bound::new(0_i32);
        let l = Bound::new(0_i64);
        let u = Bound::new(0_u32);
        let ul = Bound::new(0_u64);
        let s = Bound::new(String::new());

        value(&f).bind("-f", "1.5").unwrap();
        value(&i).bind("-i", "-7").unwrap();
        value(&l).bind("-l", "9000000000").unwrap();
        value(&u).bind("-u", "7").unwrap();
        value(&ul).bind("-U", "18000000000").unwrap();
        value(&s).bind("-s", "hello").unwrap();

        assert_eq!(f.get(), 1.5);
        assert_eq!(i.get(), -7);
        assert_eq!(l.get(), 9_000_000_000);
        assert_eq!(u.get(), 7);
        assert_eq!(ul.get(), 18_000_000_000);
        assert_eq!(s.get(), "hello");
    }

    #[test]
    fn scalar_conversion_failures() {
        assert!(value(&Bound::new(0_u32)).bind("-u", "-1").is_err());
        assert!(value(&Bound::new(0_i32)).bind("-i", "4294967296").is_err());
        assert!(value(&Bound::new(0.0_f64)).bind("-f", "one").is_err());
    }

    #[test]
    fn empty_value_keeps_default() {
        let i = Bound::new(42_i64);
        let s = Bound::new("default".to_string());
        value(&i).bind("--count", "").unwrap();
        value(&s).bind("--name", "").unwrap();
        assert_eq!(i.get(), 42);
        assert_eq!(s.get(), "default");
    }

    #[test]
    fn list_replaces_default() {
        let ints = Bound::new(vec![1, 2, 3]);
        list(&ints).bind("--ints", "4,5,6").unwrap();
        assert_eq!(ints.get(), vec![4, 5, 6]);
    }

    #[test]
    fn list_failure_leaves_target_untouched() {
        let ints = Bound::new(vec![1_u64, 2, 3]);
        let err = list(&ints).bind("--ints", "4,x,6").unwrap_err();
        assert!(matches!(err, BindError::Invalid { ref value, .. } if value == "x"));
        assert_eq!(ints.get(), vec![1, 2, 3]);
    }

    #[test]
    fn float_list_trims_and_rejects_empty_elements() {
        let floats = Bound::new(Vec::<f64>::new());
        list(&floats).bind("-f", "1.5, 2.5").unwrap();
        assert_eq!(floats.get(), vec![1.5, 2.5]);
        assert!(list(&floats).bind("-f", "1.5,,2.5").is_err());
    }

    #[test]
    fn string_list_keeps_empty_elements() {
        let words = Bound::new(Vec::<String>::new());
        list(&words).bind("-w", "a,,b").unwrap();
        assert_eq!(words.get(), vec!["a", "", "b"]);
    }

    #[test]
    fn closures_are_binders() {
        let custom = |_: &str, value: &str| -> Result<(), BindError> {
            if value == "bad" {
                return Err(anyhow::anyhow!("custom rejection").into());
            }
            Ok(())
        };
        assert!(custom.bind("-c", "ok").is_ok());
        assert_eq!(custom.bind("-c", "bad").unwrap_err().to_string(), "custom rejection");
        assert!(!custom.is_flag());
    }
}
