use crate::objects::Dictionary;
use std::fmt;

/// Indirect object identifier (`number generation R`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    number: u32,
    generation: u16,
}

impl ObjectId {
    pub fn new(number: u32, generation: u16) -> Self {
        Self { number, generation }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn generation(&self) -> u16 {
        self.generation
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    /// Literal string, written with `(` `)` delimiters and escaped
    String(String),
    Name(String),
    Array(Vec<Object>),
    Dictionary(Dictionary),
    Stream(Dictionary, Vec<u8>),
    Reference(ObjectId),
}

impl Object {
    /// Shorthand for `Object::Name`.
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Object::Real(f) => Some(*f),
            Object::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<ObjectId> {
        match self {
            Object::Reference(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Boolean(b)
    }
}

impl From<i32> for Object {
    fn from(i: i32) -> Self {
        Object::Integer(i as i64)
    }
}

impl From<i64> for Object {
    fn from(i: i64) -> Self {
        Object::Integer(i)
    }
}

impl From<u32> for Object {
    fn from(i: u32) -> Self {
        Object::Integer(i as i64)
    }
}

impl From<f64> for Object {
    fn from(f: f64) -> Self {
        Object::Real(f)
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::String(s)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::String(s.to_string())
    }
}

impl From<Vec<Object>> for Object {
    fn from(v: Vec<Object>) -> Self {
        Object::Array(v)
    }
}

impl From<Dictionary> for Object {
    fn from(d: Dictionary) -> Self {
        Object::Dictionary(d)
    }
}

impl From<ObjectId> for Object {
    fn from(id: ObjectId) -> Self {
        Object::Reference(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_display() {
        let id = ObjectId::new(12, 0);
        assert_eq!(id.to_string(), "12 0 R");
        assert_eq!(id.number(), 12);
        assert_eq!(id.generation(), 0);
    }

    #[test]
    fn test_object_id_ordering() {
        let mut ids = vec![ObjectId::new(3, 0), ObjectId::new(1, 0), ObjectId::new(2, 0)];
        ids.sort();
        let numbers: Vec<u32> = ids.iter().map(|id| id.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Object::from(true), Object::Boolean(true));
        assert_eq!(Object::from(7u32), Object::Integer(7));
        assert_eq!(Object::from(1.5), Object::Real(1.5));
        assert_eq!(Object::from("hi"), Object::String("hi".to_string()));
        assert_eq!(
            Object::from(ObjectId::new(4, 0)),
            Object::Reference(ObjectId::new(4, 0))
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Object::Integer(3).as_real(), Some(3.0));
        assert_eq!(Object::name("Page").as_name(), Some("Page"));
        assert_eq!(Object::Null.as_integer(), None);
        assert_eq!(
            Object::Reference(ObjectId::new(9, 0)).as_reference(),
            Some(ObjectId::new(9, 0))
        );
    }
}
