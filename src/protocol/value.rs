//! Values returned by remote method calls, decoded by the protocol runtime.

use super::handle::RemoteHandle;
use std::fmt;
use std::path::PathBuf;

/// Arrays keep their element type so primitive arrays can be boxed lazily
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayValue {
    Bytes(Vec<u8>),
    Shorts(Vec<i16>),
    Ints(Vec<i32>),
    Longs(Vec<i64>),
    Floats(Vec<f32>),
    Doubles(Vec<f64>),
    Booleans(Vec<bool>),
    Chars(Vec<char>),
    Objects(Vec<ResponseValue>),
}

impl ArrayValue {
    pub fn is_primitive(&self) -> bool {
        !matches!(self, ArrayValue::Objects(_))
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayValue::Bytes(v) => v.len(),
            ArrayValue::Shorts(v) => v.len(),
            ArrayValue::Ints(v) => v.len(),
            ArrayValue::Longs(v) => v.len(),
            ArrayValue::Floats(v) => v.len(),
            ArrayValue::Doubles(v) => v.len(),
            ArrayValue::Booleans(v) => v.len(),
            ArrayValue::Chars(v) => v.len(),
            ArrayValue::Objects(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Box every primitive element into a `ResponseValue`
    pub fn boxed(&self) -> Vec<ResponseValue> {
        match self {
            ArrayValue::Bytes(v) => v.iter().copied().map(ResponseValue::Byte).collect(),
            ArrayValue::Shorts(v) => v.iter().copied().map(ResponseValue::Short).collect(),
            ArrayValue::Ints(v) => v.iter().copied().map(ResponseValue::Int).collect(),
            ArrayValue::Longs(v) => v.iter().copied().map(ResponseValue::Long).collect(),
            ArrayValue::Floats(v) => v.iter().copied().map(ResponseValue::Float).collect(),
            ArrayValue::Doubles(v) => v.iter().copied().map(ResponseValue::Double).collect(),
            ArrayValue::Booleans(v) => v.iter().copied().map(ResponseValue::Bool).collect(),
            ArrayValue::Chars(v) => v.iter().copied().map(ResponseValue::Char).collect(),
            ArrayValue::Objects(v) => v.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseValue {
    Null,
    Bool(bool),
    Byte(u8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    Str(String),
    File(PathBuf),
    Collection(Vec<ResponseValue>),
    /// Entries in iteration order of the remote map
    Map(Vec<(ResponseValue, ResponseValue)>),
    Array(ArrayValue),
    Remote(RemoteHandle),
    /// Any other object, with the textual form the runtime produced for it
    Object { class_name: String, repr: String },
}

impl fmt::Display for ResponseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseValue::Null => f.write_str("null"),
            ResponseValue::Bool(v) => write!(f, "{v}"),
            ResponseValue::Byte(v) => write!(f, "{}", *v as i8),
            ResponseValue::Short(v) => write!(f, "{v}"),
            ResponseValue::Int(v) => write!(f, "{v}"),
            ResponseValue::Long(v) => write!(f, "{v}"),
            ResponseValue::Float(v) => write!(f, "{v:?}"),
            ResponseValue::Double(v) => write!(f, "{v:?}"),
            ResponseValue::Char(v) => write!(f, "{v}"),
            ResponseValue::Str(v) => f.write_str(v),
            ResponseValue::File(v) => write!(f, "{}", v.display()),
            ResponseValue::Collection(items) => {
                let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            ResponseValue::Map(entries) => {
                let rendered: Vec<String> =
                    entries.iter().map(|(k, v)| format!("{k}={v}")).collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            ResponseValue::Array(array) => {
                let rendered: Vec<String> = array.boxed().iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            ResponseValue::Remote(handle) => write!(f, "{}", handle.class_name),
            ResponseValue::Object { repr, .. } => f.write_str(repr),
        }
    }
}
