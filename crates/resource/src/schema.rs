// Rust guideline compliant 2026-10-16

//! Configuration shape accepted by the user notification rule resource.
//!
//! [`SCHEMA`] declares the fields for the owning framework. [`RawNotificationRule`]
//! is the untyped form the framework hands over; [`RawNotificationRule::validate`]
//! checks it against the declaration and yields a typed
//! [`NotificationRuleConfig`]. Nothing here talks to the remote service.

use domain::{ContactMethodType, RuleType, Urgency};
use serde::{Deserialize, Serialize};

use crate::config::{ContactMethodEntry, NotificationRuleConfig};

// ---------------------------------------------------------------------------
// Declaration
// ---------------------------------------------------------------------------

/// Value type of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// UTF-8 string.
    String,
    /// Signed integer.
    Int,
    /// Ordered list of nested objects described by [`FieldSchema::elem`].
    List,
}

/// Declaration of one configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    /// Field name as written in configuration.
    pub name: &'static str,
    /// Value type.
    pub kind: FieldKind,
    /// The field must be present in configuration.
    pub required: bool,
    /// The service fills the value in on read.
    pub computed: bool,
    /// Accepted literals; empty means unrestricted.
    pub allowed_values: &'static [&'static str],
    /// Fields of each list element; empty for scalar fields.
    pub elem: &'static [FieldSchema],
}

impl FieldSchema {
    const fn scalar(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true, computed: false, allowed_values: &[], elem: &[] }
    }

    const fn one_of(name: &'static str, allowed_values: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: FieldKind::String,
            required: true,
            computed: false,
            allowed_values,
            elem: &[],
        }
    }
}

/// Fields of one `contact_method` element.
pub const CONTACT_METHOD_SCHEMA: &[FieldSchema] = &[
    FieldSchema {
        name: "id",
        kind: FieldKind::String,
        required: false,
        computed: true,
        allowed_values: &[],
        elem: &[],
    },
    FieldSchema::one_of("type", ContactMethodType::VALUES),
];

/// Top-level fields of the resource.
pub const SCHEMA: &[FieldSchema] = &[
    FieldSchema::scalar("user_id", FieldKind::String),
    FieldSchema::one_of("type", RuleType::VALUES),
    FieldSchema::scalar("start_delay_in_minutes", FieldKind::Int),
    FieldSchema::one_of("urgency", Urgency::VALUES),
    FieldSchema {
        name: "contact_method",
        kind: FieldKind::List,
        required: true,
        computed: false,
        allowed_values: &[],
        elem: CONTACT_METHOD_SCHEMA,
    },
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A single field that does not conform to [`SCHEMA`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A required field is absent or empty.
    #[error("{field}: required field is missing")]
    Missing {
        /// Path of the field, e.g. `contact_method.0.type`.
        field: String,
    },
    /// An enumerated field holds a literal outside its allowed set.
    #[error("{field}: expected one of {allowed:?}, got {value:?}")]
    InvalidValue {
        /// Path of the field.
        field: String,
        /// Offending value.
        value: String,
        /// Accepted literals.
        allowed: &'static [&'static str],
    },
}

/// Every schema violation found in one configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid configuration: {}", join(.0))]
pub struct ValidationErrors(Vec<SchemaError>);

impl ValidationErrors {
    /// Individual violations, in field declaration order.
    #[must_use]
    pub fn errors(&self) -> &[SchemaError] {
        &self.0
    }
}

impl From<Vec<SchemaError>> for ValidationErrors {
    fn from(errors: Vec<SchemaError>) -> Self {
        Self(errors)
    }
}

fn join(errors: &[SchemaError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

// ---------------------------------------------------------------------------
// Raw configuration
// ---------------------------------------------------------------------------

/// One `contact_method` element as delivered by the framework.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawContactMethod {
    /// Referenced contact method id; optional on input.
    #[serde(default)]
    pub id: Option<String>,
    /// Channel kind literal.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Untyped resource configuration as delivered by the framework.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawNotificationRule {
    /// Owning user id.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Rule kind literal.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Notification delay in minutes.
    #[serde(default)]
    pub start_delay_in_minutes: Option<i64>,
    /// Urgency literal.
    #[serde(default)]
    pub urgency: Option<String>,
    /// Contact method references.
    #[serde(default)]
    pub contact_method: Option<Vec<RawContactMethod>>,
}

impl RawNotificationRule {
    /// Check every field against [`SCHEMA`] and build the typed configuration.
    ///
    /// All violations are collected before returning.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when a required field is missing or an
    /// enumerated field holds an unknown literal.
    pub fn validate(&self) -> Result<NotificationRuleConfig, ValidationErrors> {
        let mut errors = Vec::new();

        let user_id = required_str(self.user_id.as_deref(), "user_id", &mut errors);
        let kind = one_of(
            self.kind.as_deref(),
            "type",
            RuleType::VALUES,
            RuleType::from_wire,
            &mut errors,
        );
        if self.start_delay_in_minutes.is_none() {
            errors.push(SchemaError::Missing { field: "start_delay_in_minutes".to_owned() });
        }
        let urgency = one_of(
            self.urgency.as_deref(),
            "urgency",
            Urgency::VALUES,
            Urgency::from_wire,
            &mut errors,
        );
        let contact_method = match &self.contact_method {
            Some(entries) => Some(contact_methods(entries, &mut errors)),
            None => {
                errors.push(SchemaError::Missing { field: "contact_method".to_owned() });
                None
            }
        };

        let (
            Some(user_id),
            Some(kind),
            Some(start_delay_in_minutes),
            Some(urgency),
            Some(contact_method),
        ) = (user_id, kind, self.start_delay_in_minutes, urgency, contact_method)
        else {
            return Err(errors.into());
        };
        if !errors.is_empty() {
            return Err(errors.into());
        }
        Ok(NotificationRuleConfig {
            user_id: user_id.to_owned(),
            kind,
            start_delay_in_minutes,
            urgency,
            contact_method,
        })
    }
}

impl From<&NotificationRuleConfig> for RawNotificationRule {
    fn from(config: &NotificationRuleConfig) -> Self {
        Self {
            user_id: Some(config.user_id.clone()),
            kind: Some(config.kind.as_str().to_owned()),
            start_delay_in_minutes: Some(config.start_delay_in_minutes),
            urgency: Some(config.urgency.as_str().to_owned()),
            contact_method: Some(
                config
                    .contact_method
                    .iter()
                    .map(|entry| RawContactMethod {
                        id: Some(entry.id.clone()),
                        kind: Some(entry.kind.as_str().to_owned()),
                    })
                    .collect(),
            ),
        }
    }
}

fn required_str<'a>(
    value: Option<&'a str>,
    field: &str,
    errors: &mut Vec<SchemaError>,
) -> Option<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.push(SchemaError::Missing { field: field.to_owned() });
            None
        }
    }
}

fn one_of<T>(
    value: Option<&str>,
    field: &str,
    allowed: &'static [&'static str],
    parse: fn(&str) -> Option<T>,
    errors: &mut Vec<SchemaError>,
) -> Option<T> {
    let value = required_str(value, field, errors)?;
    let parsed = parse(value);
    if parsed.is_none() {
        errors.push(SchemaError::InvalidValue {
            field: field.to_owned(),
            value: value.to_owned(),
            allowed,
        });
    }
    parsed
}

fn contact_methods(
    entries: &[RawContactMethod],
    errors: &mut Vec<SchemaError>,
) -> Vec<ContactMethodEntry> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let kind = one_of(
                entry.kind.as_deref(),
                &format!("contact_method.{i}.type"),
                ContactMethodType::VALUES,
                ContactMethodType::from_wire,
                errors,
            )?;
            Some(ContactMethodEntry { id: entry.id.clone().unwrap_or_default(), kind })
        })
        .collect()
}
