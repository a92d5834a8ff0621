//! Field validators shared by the request DTOs.
//!
//! Every function here has the signature `validator`'s
//! `#[validate(custom(function = ...))]` expects, so DTOs in `agencia-db`
//! and `agencia-api` can reference them directly. [`flatten_errors`] turns
//! a `ValidationErrors` tree into the flat `details` list the API returns.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::roles::{ROLE_ADMIN, ROLE_MEMBER};
use crate::types::Date;
use crate::vocab::{
    TASK_COLUMNS, VALID_CLIENT_STATUSES, VALID_PLANS, VALID_PRIORITIES, VALID_PROJECT_STATUSES,
    VALID_REVENUE_STATUSES,
};

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// One entry of the `details` array in a 400 validation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

fn one_of(value: &str, allowed: &[&str], code: &'static str) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new(code).with_message(Cow::Owned(format!(
            "must be one of: {}",
            allowed.join(", ")
        ))))
    }
}

pub fn client_status(value: &str) -> Result<(), ValidationError> {
    one_of(value, VALID_CLIENT_STATUSES, "client_status")
}

pub fn project_status(value: &str) -> Result<(), ValidationError> {
    one_of(value, VALID_PROJECT_STATUSES, "project_status")
}

pub fn task_status(value: &str) -> Result<(), ValidationError> {
    one_of(value, TASK_COLUMNS, "task_status")
}

pub fn task_priority(value: &str) -> Result<(), ValidationError> {
    one_of(value, VALID_PRIORITIES, "task_priority")
}

pub fn revenue_status(value: &str) -> Result<(), ValidationError> {
    one_of(value, VALID_REVENUE_STATUSES, "revenue_status")
}

pub fn plan(value: &str) -> Result<(), ValidationError> {
    one_of(value, VALID_PLANS, "plan")
}

/// Roles that can be granted through the users endpoint. `owner` is only
/// ever assigned at registration.
pub fn assignable_role(value: &str) -> Result<(), ValidationError> {
    one_of(value, &[ROLE_ADMIN, ROLE_MEMBER], "role")
}

/// `#RRGGBB` colour, as used by carousel brand colours.
pub fn hex_color(value: &str) -> Result<(), ValidationError> {
    static HEX: OnceLock<Regex> = OnceLock::new();
    let re = HEX.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("static regex"));
    if re.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color").with_message(Cow::Borrowed("must look like #RRGGBB")))
    }
}

/// Rejects ranges whose end precedes their start. Open ranges pass.
pub fn date_range(start: Option<Date>, end: Option<Date>) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Err(ValidationError::new("date_range")
            .with_message(Cow::Borrowed("end_date must not be before start_date"))),
        _ => Ok(()),
    }
}

/// Flatten nested validation errors into `field -> message` pairs.
///
/// Nested structs use dotted paths and list items use `[index]`, e.g.
/// `slides[2].title`. Schema-level errors are reported under `__all__`.
/// Output is sorted by field for stable responses.
pub fn flatten_errors(errors: &ValidationErrors) -> Vec<FieldIssue> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldIssue>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    out.push(FieldIssue {
                        field: path.clone(),
                        message: err
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("invalid value ({})", err.code)),
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(custom(function = "client_status"))]
        status: Option<String>,
    }

    #[test]
    fn vocabularies_accept_known_values() {
        assert!(client_status("prospect").is_ok());
        assert!(project_status("in_progress").is_ok());
        assert!(task_status("done").is_ok());
        assert!(task_priority("urgent").is_ok());
        assert!(revenue_status("received").is_ok());
        assert!(plan("pro").is_ok());
    }

    #[test]
    fn vocabularies_reject_unknown_values() {
        let err = client_status("archived").unwrap_err();
        assert_eq!(err.code, "client_status");
        assert!(err.message.unwrap().contains("active, inactive, prospect"));
        assert!(task_status("blocked").is_err());
    }

    #[test]
    fn owner_is_not_assignable() {
        assert!(assignable_role("member").is_ok());
        assert!(assignable_role("admin").is_ok());
        assert!(assignable_role("owner").is_err());
    }

    #[test]
    fn hex_color_requires_six_digits() {
        assert!(hex_color("#1a2B3c").is_ok());
        assert!(hex_color("#123").is_err());
        assert!(hex_color("123456").is_err());
        assert!(hex_color("#12345g").is_err());
    }

    #[test]
    fn date_range_rejects_inverted_range() {
        let jan = Date::from_ymd_opt(2026, 1, 1).unwrap();
        let feb = Date::from_ymd_opt(2026, 2, 1).unwrap();
        assert!(date_range(Some(jan), Some(feb)).is_ok());
        assert!(date_range(Some(jan), Some(jan)).is_ok());
        assert!(date_range(Some(feb), Some(jan)).is_err());
        assert!(date_range(None, Some(jan)).is_ok());
    }

    #[test]
    fn flatten_reports_every_field() {
        let sample = Sample {
            name: String::new(),
            status: Some("gone".into()),
        };
        let issues = flatten_errors(&sample.validate().unwrap_err());
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "name");
        assert_eq!(issues[0].message, "name is required");
        assert_eq!(issues[1].field, "status");
    }

    #[test]
    fn flatten_skips_absent_optionals() {
        let sample = Sample {
            name: "Acme".into(),
            status: None,
        };
        assert!(sample.validate().is_ok());
    }
}
