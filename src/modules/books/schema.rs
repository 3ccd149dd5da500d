//! Declarative request-body schemas for books.
//!
//! Both schemas share [`BOOK_FIELDS`]; they differ only in whether every field
//! must be present. Violations are reported one message per broken
//! constraint, in field declaration order, so the output is deterministic.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Value type a field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer { minimum: Option<i64> },
}

impl FieldKind {
    fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer { .. } => "integer",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn string(name: &'static str) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::String,
    }
}

const fn integer(name: &'static str, minimum: Option<i64>) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Integer { minimum },
    }
}

pub const BOOK_FIELDS: &[FieldDef] = &[
    string("isbn"),
    string("amazon_url"),
    string("author"),
    string("language"),
    integer("pages", Some(0)),
    string("publisher"),
    string("title"),
    integer("year", None),
];

/// Whether a schema demands every declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldDef],
    pub presence: Presence,
}

/// Body of `POST /books`: every field required.
pub const NEW_BOOK_SCHEMA: Schema = Schema {
    fields: BOOK_FIELDS,
    presence: Presence::Required,
};

/// Body of `PUT /books/{isbn}`: every field optional. The `isbn` field is
/// refused by the route before this schema runs.
pub const UPDATE_BOOK_SCHEMA: Schema = Schema {
    fields: BOOK_FIELDS,
    presence: Presence::Optional,
};

impl Schema {
    /// Check `instance` and return every violation found.
    pub fn validate(&self, instance: &Value) -> Result<(), Vec<String>> {
        let Some(object) = instance.as_object() else {
            return Err(vec!["instance is not of a type(s) object".to_string()]);
        };

        let mut violations = Vec::new();

        for field in self.fields {
            match object.get(field.name) {
                None => {
                    if self.presence == Presence::Required {
                        violations.push(format!("instance requires property \"{}\"", field.name));
                    }
                }
                Some(value) => check_value(field, value, &mut violations),
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Validate, then deserialize into the typed payload.
    pub fn parse<T: DeserializeOwned>(&self, mut instance: Value) -> Result<T, Vec<String>> {
        self.validate(&instance)?;
        self.normalize_integers(&mut instance);
        serde_json::from_value(instance).map_err(|e| vec![e.to_string()])
    }

    // `264.0` passes as an integer; store it as `264`.
    fn normalize_integers(&self, instance: &mut Value) {
        let Some(object) = instance.as_object_mut() else {
            return;
        };
        for field in self.fields {
            if !matches!(field.kind, FieldKind::Integer { .. }) {
                continue;
            }
            if let Some(value) = object.get_mut(field.name) {
                if let Some(number) = as_integer(value) {
                    *value = Value::from(number);
                }
            }
        }
    }
}

fn check_value(field: &FieldDef, value: &Value, violations: &mut Vec<String>) {
    let type_error = || {
        format!(
            "instance.{} is not of a type(s) {}",
            field.name,
            field.kind.type_name()
        )
    };

    match field.kind {
        FieldKind::String => {
            if !value.is_string() {
                violations.push(type_error());
            }
        }
        FieldKind::Integer { minimum } => match as_integer(value) {
            None => violations.push(type_error()),
            Some(number) => {
                if let Some(minimum) = minimum {
                    if number < minimum {
                        violations.push(format!(
                            "instance.{} must be greater than or equal to {}",
                            field.name, minimum
                        ));
                    }
                }
            }
        },
    }
}

/// Integer value of `value`, counting floats with no fractional part.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(number) = value.as_i64() {
        return Some(number);
    }
    let float = value.as_f64()?;
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
    (float.is_finite() && float.fract() == 0.0 && in_range).then_some(float as i64)
}
