//! Deserializers for form-style payloads, where every input arrives as a
//! string: numbers may be sent as `"1200.50"` and text fields as `42`.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(i) => i as f64,
        NumberOrString::Float(f) => f,
        NumberOrString::Str(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or_else(|| de::Error::custom(format!("expected a number, got {s:?}")))?,
    };

    // "NaN" and "inf" parse as f64 but cannot be stored.
    if !value.is_finite() {
        return Err(de::Error::custom(format!("expected a finite number, got {value}")));
    }
    Ok(value)
}

pub fn whole_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(i) => {
            i32::try_from(i).map_err(|_| de::Error::custom(format!("{i} is out of range")))
        }
        NumberOrString::Float(f) => Err(de::Error::custom(format!("expected a whole number, got {f}"))),
        NumberOrString::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a whole number, got {s:?}"))),
    }
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(i) => Ok(i.to_string()),
        NumberOrString::Float(f) => Ok(f.to_string()),
        NumberOrString::Str(s) => Ok(s),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Form {
        #[serde(deserialize_with = "super::number")]
        amount: f64,
        #[serde(deserialize_with = "super::whole_number")]
        quantity: i32,
        #[serde(deserialize_with = "super::text")]
        code: String,
    }

    #[test]
    fn accepts_strings_and_numbers() {
        let form: Form =
            serde_json::from_value(json!({"amount": "12.5", "quantity": "3", "code": 1001}))
                .unwrap();
        assert_eq!(form.amount, 12.5);
        assert_eq!(form.quantity, 3);
        assert_eq!(form.code, "1001");

        let form: Form =
            serde_json::from_value(json!({"amount": 7, "quantity": 2, "code": "EMP-1"})).unwrap();
        assert_eq!(form.amount, 7.0);
        assert_eq!(form.code, "EMP-1");
    }

    #[test]
    fn rejects_garbage_numbers() {
        let res = serde_json::from_value::<Form>(json!({"amount": "lots", "quantity": 1, "code": "x"}));
        assert!(res.is_err());

        let res = serde_json::from_value::<Form>(json!({"amount": 1, "quantity": 1.5, "code": "x"}));
        assert!(res.is_err());
    }

    #[test]
    fn rejects_non_finite_amounts() {
        for raw in ["NaN", "inf", "-infinity", " Infinity "] {
            let res = serde_json::from_value::<Form>(json!({"amount": raw, "quantity": 1, "code": "x"}));
            assert!(res.is_err(), "{raw:?} was accepted");
        }
    }
}
