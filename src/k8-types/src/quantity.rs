use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kubernetes resource quantity such as `"1000"`, `"64Gi"` or `"500m"`.
/// The API server accepts bare numbers as well, they are kept in their decimal form.
/// Always marshals as a string.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Quantity(pub String);

impl Quantity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct QuantityVisitor;

        impl Visitor<'_> for QuantityVisitor {
            type Value = Quantity;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "a quantity string or a number")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Quantity(v.to_string()))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Quantity(v.to_string()))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Quantity(v.to_string()))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Quantity(v.to_owned()))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Quantity(v))
            }
        }

        deserializer.deserialize_any(QuantityVisitor)
    }
}

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod test {

    use serde_json::json;

    use crate::Quantity;

    #[test]
    fn test_number_becomes_string() {
        let quantity: Quantity = serde_json::from_value(json!(1000)).expect("int");
        assert_eq!(quantity, Quantity::from("1000"));
        assert_eq!(serde_json::to_value(&quantity).expect("json"), json!("1000"));

        let quantity: Quantity = serde_json::from_value(json!(0.5)).expect("float");
        assert_eq!(quantity.as_str(), "0.5");
    }

    #[test]
    fn test_large_values_are_kept() {
        let quantity: Quantity = serde_json::from_value(json!(68719476736_u64)).expect("u64");
        assert_eq!(quantity.as_str(), "68719476736");

        let quantity: Quantity = serde_json::from_value(json!("68719476736")).expect("string");
        assert_eq!(quantity.as_str(), "68719476736");
        assert_eq!(
            serde_yaml::to_string(&quantity).expect("yaml"),
            "'68719476736'\n"
        );
    }

    #[test]
    fn test_suffixed_quantity() {
        let quantity: Quantity = serde_json::from_value(json!("64Gi")).expect("string");
        assert_eq!(quantity.to_string(), "64Gi");
        serde_json::from_value::<Quantity>(json!(true)).expect_err("bool");
    }
}
