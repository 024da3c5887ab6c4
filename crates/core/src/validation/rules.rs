//! Field violation types and the conversion from `validator` errors.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Key used for violations that involve several fields at once.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// An explicit `null` was sent for a field that cannot hold one.
    pub fn null(field: &str) -> Self {
        Self::new(field, "null", "This field may not be null.")
    }

    /// A related record referenced by id does not exist.
    pub fn missing_reference(field: &str, id: impl fmt::Display) -> Self {
        Self::new(
            field,
            "does_not_exist",
            format!("Invalid pk \"{id}\" - object does not exist."),
        )
    }

    /// Another record already holds this value.
    pub fn duplicate(field: &str, entity: &str) -> Self {
        Self::new(
            field,
            "unique",
            format!("{entity} with this {field} already exists."),
        )
    }

    /// Another record already holds this combination of values.
    pub fn duplicate_set(fields: &[&str]) -> Self {
        Self::new(
            NON_FIELD_ERRORS,
            "unique",
            format!("The fields {} must make a unique set.", fields.join(", ")),
        )
    }
}

/// All violations found for one record, kept sorted by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: FieldViolation) {
        let at = self
            .0
            .partition_point(|existing| existing.field <= violation.field);
        self.0.insert(at, violation);
    }

    pub fn extend(&mut self, other: Violations) {
        for violation in other.0 {
            self.push(violation);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// Messages grouped by field, for response bodies.
    pub fn by_field(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for violation in &self.0 {
            grouped
                .entry(violation.field.as_str())
                .or_default()
                .push(violation.message.as_str());
        }
        grouped
    }

    /// `Ok(())` when nothing was violated.
    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", violation.field, violation.message)?;
        }
        Ok(())
    }
}

impl From<validator::ValidationErrors> for Violations {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut violations = Violations::new();
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                violations.push(FieldViolation::new(
                    field.to_string(),
                    err.code.to_string(),
                    describe(&err.code, &err.params),
                ));
            }
        }
        violations
    }
}

/// Render a `validator` error code and its parameters as a message.
fn describe(code: &str, params: &std::collections::HashMap<Cow<'static, str>, Value>) -> String {
    let param = |name: &str| params.get(name).map(|v| v.to_string()).unwrap_or_default();
    match code {
        "required" => "This field is required.".to_string(),
        "length" => match params.get("value") {
            Some(Value::String(s)) if s.is_empty() => "This field may not be blank.".to_string(),
            _ => format!(
                "Ensure this field has between {} and {} characters.",
                param("min"),
                param("max")
            ),
        },
        "range" => format!(
            "Ensure this value is between {} and {}.",
            param("min"),
            param("max")
        ),
        other => format!("Invalid value ({other})."),
    }
}
