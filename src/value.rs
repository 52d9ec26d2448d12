use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};

/// A fact value: rules only ever see numbers and booleans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
}

impl Value {
    /// Numeric view of the value; booleans count as 0 and 1.
    pub fn as_number(self) -> f64 {
        match self {
            Value::Number(n) => n,
            Value::Bool(b) => if b { 1.0 } else { 0.0 },
        }
    }

    /// Truthiness: a number is true when non-zero.
    pub fn truthy(self) -> bool {
        match self {
            Value::Number(n) => n != 0.0,
            Value::Bool(b) => b,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Number(value as f64)
            }
        })*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

/// Variable bindings a rule is evaluated against. The engine only reads from it.
pub trait Context {
    fn lookup(&self, name: &str) -> Option<Value>;
}

impl<K, S> Context for HashMap<K, Value, S>
where
    K: Borrow<str> + Eq + Hash,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).copied()
    }
}

impl<K> Context for BTreeMap<K, Value>
where
    K: Borrow<str> + Ord,
{
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).copied()
    }
}

impl<C: Context + ?Sized> Context for &C {
    fn lookup(&self, name: &str) -> Option<Value> {
        (**self).lookup(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion() {
        assert_eq!(Value::Bool(true).as_number(), 1.0);
        assert_eq!(Value::Bool(false).as_number(), 0.0);
        assert_eq!(Value::from(7u64).as_number(), 7.0);
        assert!(Value::Number(-2.0).truthy());
        assert!(!Value::Number(0.0).truthy());
    }

    #[test]
    fn test_map_contexts() {
        let hashed: HashMap<&str, Value> = HashMap::from([("days", Value::from(3))]);
        assert_eq!(hashed.lookup("days"), Some(Value::Number(3.0)));
        assert_eq!(hashed.lookup("DAYS"), None);

        let ordered: BTreeMap<String, Value> = BTreeMap::from([("x".to_string(), Value::from(true))]);
        assert_eq!((&ordered).lookup("x"), Some(Value::Bool(true)));
    }
}
