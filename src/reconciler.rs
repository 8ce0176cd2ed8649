//! Reduces an edited cell's value to the scalar identifier the store accepts.
//! A cell edit may carry a full catalog reference object rather than a plain
//! code; the patch payload only ever carries the code or id.

use serde_json::Value;

use crate::models::{CellValue, GrupaWydatkow};

fn as_scalar(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::String(s) => CellValue::Text(s.clone()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => CellValue::Int(i),
            None => CellValue::Float(n.as_f64().unwrap_or(0.0)),
        },
        _ => CellValue::Null,
    }
}

/// Extract the scalar identifier from a cell's new value.
///
/// Reference objects are keyed by `kod`, by `id`, or — expense groups only,
/// the one catalog the grid keys by name — by `nazwa`, which is looked up in
/// the supplied catalog. Anything without a resolvable identifier becomes
/// `Null`, which callers treat as a dropped update. Idempotent: applying it
/// to its own output returns the same scalar.
pub fn extract_scalar(value: &Value, grupy: &[GrupaWydatkow]) -> CellValue {
    match value {
        Value::Object(map) => {
            if let Some(kod) = map.get("kod") {
                as_scalar(kod)
            } else if let Some(id) = map.get("id") {
                as_scalar(id)
            } else if let Some(nazwa) = map.get("nazwa").and_then(Value::as_str) {
                grupy
                    .iter()
                    .find(|g| g.nazwa == nazwa)
                    .map(|g| CellValue::Int(g.id))
                    .unwrap_or(CellValue::Null)
            } else {
                CellValue::Null
            }
        }
        other => as_scalar(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Paragrafy;
    use serde_json::json;

    fn grupy() -> Vec<GrupaWydatkow> {
        vec![
            GrupaWydatkow {
                id: 1,
                nazwa: "Wynagrodzenia".to_string(),
                paragrafy: Paragrafy::Lista(vec!["4010".into(), "4110".into()]),
            },
            GrupaWydatkow {
                id: 3,
                nazwa: "Rzeczowe".to_string(),
                paragrafy: Paragrafy::Lista(vec!["4210".into(), "4220".into()]),
            },
        ]
    }

    #[test]
    fn test_scalar_passes_through() {
        assert_eq!(extract_scalar(&json!("700"), &grupy()), CellValue::Text("700".into()));
        assert_eq!(extract_scalar(&json!(42), &grupy()), CellValue::Int(42));
        assert_eq!(extract_scalar(&json!(1.5), &grupy()), CellValue::Float(1.5));
        assert_eq!(extract_scalar(&Value::Null, &grupy()), CellValue::Null);
    }

    #[test]
    fn test_object_with_kod() {
        let v = json!({"kod": "70001", "nazwa": "Zakłady gospodarki mieszkaniowej", "dzial": "700"});
        assert_eq!(extract_scalar(&v, &grupy()), CellValue::Text("70001".into()));
    }

    #[test]
    fn test_object_with_id() {
        let v = json!({"id": 7, "nazwa": "Departament Budżetu"});
        assert_eq!(extract_scalar(&v, &grupy()), CellValue::Int(7));
    }

    #[test]
    fn test_kod_takes_precedence_over_id() {
        let v = json!({"kod": "4210", "id": 99});
        assert_eq!(extract_scalar(&v, &grupy()), CellValue::Text("4210".into()));
    }

    #[test]
    fn test_group_looked_up_by_nazwa() {
        let v = json!({"nazwa": "Rzeczowe"});
        assert_eq!(extract_scalar(&v, &grupy()), CellValue::Int(3));
    }

    #[test]
    fn test_unknown_nazwa_is_null() {
        let v = json!({"nazwa": "Wydatki osobowe"});
        assert_eq!(extract_scalar(&v, &grupy()), CellValue::Null);
    }

    #[test]
    fn test_unrecognized_shapes_are_null() {
        assert_eq!(extract_scalar(&json!({"tresc": "Zakup materiałów"}), &grupy()), CellValue::Null);
        assert_eq!(extract_scalar(&json!(["700", "750"]), &grupy()), CellValue::Null);
        assert_eq!(extract_scalar(&json!(true), &grupy()), CellValue::Null);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let catalog = grupy();
        let inputs = vec![
            json!({"kod": "700"}),
            json!({"id": 3}),
            json!({"nazwa": "Wynagrodzenia"}),
            json!({"nazwa": "nieznana"}),
            json!("4210"),
            json!(12),
            json!(0.5),
            Value::Null,
        ];
        for input in inputs {
            let once = extract_scalar(&input, &catalog);
            let twice = extract_scalar(&once.to_json(), &catalog);
            assert_eq!(once, twice, "not idempotent for {input}");
        }
    }
}
