//! Field-level validation failures reported by the backend on HTTP 422.
//!
//! The backend returns `{"detail": [{"loc": [...], "msg": "..."}]}`. Each
//! item is flattened into `"<loc joined by '.'>: <msg>"` and the items are
//! joined with `"; "` in array order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One segment of a violation location: a field name or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocSegment {
    Field(String),
    Index(i64),
}

impl fmt::Display for LocSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A single field violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    #[serde(default)]
    pub loc: Vec<LocSegment>,
    pub msg: String,
}

impl FieldViolation {
    /// Location segments joined by `.`.
    pub fn location(&self) -> String {
        self.loc
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location(), self.msg)
    }
}

/// Join violations into the single message shown to the user.
///
/// # Examples
/// ```
/// use frontend::domain::{FieldViolation, LocSegment, join_violations};
///
/// let violations = vec![FieldViolation {
///     loc: vec![LocSegment::Field("body".into()), LocSegment::Field("email".into())],
///     msg: "field required".into(),
/// }];
/// assert_eq!(join_violations(&violations), "body.email: field required");
/// ```
pub fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn joins_items_in_array_order() {
        let raw = json!([
            {"loc": ["body", "email"], "msg": "value is not a valid email address"},
            {"loc": ["body", "items", 0, "price"], "msg": "must be positive"},
        ]);
        let violations: Vec<FieldViolation> =
            serde_json::from_value(raw).expect("violations decode");

        assert_eq!(
            join_violations(&violations),
            "body.email: value is not a valid email address; body.items.0.price: must be positive"
        );
    }

    #[rstest]
    fn missing_location_renders_empty_prefix() {
        let violation: FieldViolation =
            serde_json::from_value(json!({"msg": "bad"})).expect("violation decodes");
        assert_eq!(violation.to_string(), ": bad");
    }

    #[rstest]
    fn empty_list_joins_to_empty_message() {
        assert_eq!(join_violations(&[]), "");
    }
}
