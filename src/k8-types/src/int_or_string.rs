use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kubernetes `intstr`: holds either an int32 or a string such as `"40%"`.
/// Marshals as the inner type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Int32OrString {
    Int(i32),
    String(String),
}

impl Default for Int32OrString {
    fn default() -> Self {
        Int32OrString::Int(0)
    }
}

/// strings holding a canonical int32 become `Int`, `"007"` stays a string
impl FromStr for Int32OrString {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i32>() {
            Ok(i) if i.to_string() == s => Ok(Int32OrString::Int(i)),
            _ => Ok(Int32OrString::String(s.to_string())),
        }
    }
}

impl fmt::Display for Int32OrString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
        }
    }
}

impl<'de> Deserialize<'de> for Int32OrString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IntOrStringVisitor;

        impl Visitor<'_> for IntOrStringVisitor {
            type Value = Int32OrString;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "a 32-bit integer or a string")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i32::try_from(v)
                    .map(Int32OrString::Int)
                    .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i32::try_from(v)
                    .map(Int32OrString::Int)
                    .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Int32OrString::String(v.to_owned()))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Int32OrString::String(v))
            }
        }

        deserializer.deserialize_any(IntOrStringVisitor)
    }
}

impl Serialize for Int32OrString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Int32OrString::Int(i) => i.serialize(serializer),
            Int32OrString::String(s) => s.serialize(serializer),
        }
    }
}
