// Rust guideline compliant 2026-10-16

//! Shared domain types for the user notification rule resource.
//!
//! Defines the remote entity (`NotificationRule`), the request body sent on
//! create/update (`NotificationRulePayload`), the enumerated attribute types,
//! `ApiError`, and the hexagonal port trait `UsersApi` through which the
//! resource adapter reaches the incident-management service.
//! Serde attributes pin the service's JSON field names and enum literals.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enumerated attributes
// ---------------------------------------------------------------------------

/// Kind of notification rule. The service currently accepts a single kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    /// Notify the user when an incident is assigned to them.
    AssignmentNotificationRule,
}

impl RuleType {
    /// Every accepted wire literal, in declaration order.
    pub const VALUES: &'static [&'static str] = &["assignment_notification_rule"];

    /// Wire literal for this variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AssignmentNotificationRule => "assignment_notification_rule",
        }
    }

    /// Parse a wire literal; `None` for anything outside [`Self::VALUES`].
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "assignment_notification_rule" => Some(Self::AssignmentNotificationRule),
            _ => None,
        }
    }
}

/// Incident urgency the rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// High-urgency incidents.
    High,
    /// Low-urgency incidents.
    Low,
}

impl Urgency {
    /// Every accepted wire literal, in declaration order.
    pub const VALUES: &'static [&'static str] = &["high", "low"];

    /// Wire literal for this variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }

    /// Parse a wire literal; `None` for anything outside [`Self::VALUES`].
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Self::High),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Channel kind of a referenced contact method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactMethodType {
    /// E-mail address.
    #[serde(rename = "email_contact_method")]
    Email,
    /// Voice call.
    #[serde(rename = "phone_contact_method")]
    Phone,
    /// Mobile push notification.
    #[serde(rename = "push_notification_contact_method")]
    PushNotification,
    /// Text message.
    #[serde(rename = "sms_contact_method")]
    Sms,
}

impl ContactMethodType {
    /// Every accepted wire literal, in declaration order.
    pub const VALUES: &'static [&'static str] = &[
        "email_contact_method",
        "phone_contact_method",
        "push_notification_contact_method",
        "sms_contact_method",
    ];

    /// Wire literal for this variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email_contact_method",
            Self::Phone => "phone_contact_method",
            Self::PushNotification => "push_notification_contact_method",
            Self::Sms => "sms_contact_method",
        }
    }

    /// Parse a wire literal; `None` for anything outside [`Self::VALUES`].
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "email_contact_method" => Some(Self::Email),
            "phone_contact_method" => Some(Self::Phone),
            "push_notification_contact_method" => Some(Self::PushNotification),
            "sms_contact_method" => Some(Self::Sms),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Reference to a contact method owned by the user elsewhere in the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMethodReference {
    /// Identifier of the referenced contact method.
    pub id: String,
    /// Channel kind of the referenced contact method.
    #[serde(rename = "type")]
    pub kind: ContactMethodType,
}

/// Request body for the create and update operations.
///
/// Always carries every field: updates are full replacements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRulePayload {
    /// Rule kind.
    #[serde(rename = "type")]
    pub kind: RuleType,
    /// Minutes to wait before notifying.
    pub start_delay_in_minutes: i64,
    /// Incident urgency the rule applies to.
    pub urgency: Urgency,
    /// Contact methods to notify, in order.
    pub contact_method: Vec<ContactMethodReference>,
}

/// Notification rule as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRule {
    /// Service-assigned identifier.
    pub id: String,
    /// Rule kind.
    #[serde(rename = "type")]
    pub kind: RuleType,
    /// Minutes to wait before notifying.
    pub start_delay_in_minutes: i64,
    /// Incident urgency the rule applies to.
    pub urgency: Urgency,
    /// Contact methods notified by this rule.
    #[serde(default)]
    pub contact_method: Vec<ContactMethodReference>,
}

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Errors returned by the `UsersApi` port.
///
/// Only `NotFound` is interpreted by callers; every other variant is passed
/// through to the user unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The referenced user or notification rule does not exist.
    #[error("{resource} {id} not found")]
    NotFound {
        /// Kind of the missing entity (e.g. `"user"`).
        resource: String,
        /// Identifier that was looked up.
        id: String,
    },
    /// The credentials were rejected.
    #[error("unauthorized: {reason}")]
    Unauthorized {
        /// Human-readable description.
        reason: String,
    },
    /// The request never produced a response.
    #[error("transport error: {reason}")]
    Transport {
        /// Human-readable description.
        reason: String,
    },
    /// The service answered with a non-success status.
    #[error("server error (status {status}): {reason}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Human-readable description.
        reason: String,
    },
}

impl ApiError {
    /// `true` for the distinguished not-found condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ---------------------------------------------------------------------------
// UsersApi port
// ---------------------------------------------------------------------------

/// Hexagonal port: notification-rule operations of the remote users API.
///
/// The resource adapter depends exclusively on this trait, never on a
/// concrete client. Authentication and transport belong to the implementor.
/// Every method returns `ApiError::NotFound` when the user or the rule does
/// not exist.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait UsersApi {
    /// Create a notification rule for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns the service error unchanged.
    async fn create_notification_rule(
        &self,
        user_id: &str,
        body: &NotificationRulePayload,
    ) -> Result<NotificationRule, ApiError>;

    /// Fetch notification rule `rule_id` of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns the service error unchanged.
    async fn get_notification_rule(
        &self,
        user_id: &str,
        rule_id: &str,
    ) -> Result<NotificationRule, ApiError>;

    /// Replace notification rule `rule_id` of `user_id` with `body`.
    ///
    /// # Errors
    ///
    /// Returns the service error unchanged.
    async fn update_notification_rule(
        &self,
        user_id: &str,
        rule_id: &str,
        body: &NotificationRulePayload,
    ) -> Result<NotificationRule, ApiError>;

    /// Delete notification rule `rule_id` of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns the service error unchanged.
    async fn delete_notification_rule(&self, user_id: &str, rule_id: &str)
    -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_literals_round_trip_through_from_wire() {
        for value in RuleType::VALUES {
            assert_eq!(RuleType::from_wire(value).map(RuleType::as_str), Some(*value));
        }
        for value in Urgency::VALUES {
            assert_eq!(Urgency::from_wire(value).map(Urgency::as_str), Some(*value));
        }
        for value in ContactMethodType::VALUES {
            assert_eq!(
                ContactMethodType::from_wire(value).map(ContactMethodType::as_str),
                Some(*value)
            );
        }
    }

    #[test]
    fn from_wire_rejects_unknown_and_differently_cased_literals() {
        assert_eq!(Urgency::from_wire("medium"), None);
        assert_eq!(Urgency::from_wire("HIGH"), None);
        assert_eq!(RuleType::from_wire("assignment"), None);
        assert_eq!(ContactMethodType::from_wire("email"), None);
    }

    #[test]
    fn payload_serializes_with_service_field_names() {
        let payload = NotificationRulePayload {
            kind: RuleType::AssignmentNotificationRule,
            start_delay_in_minutes: 5,
            urgency: Urgency::High,
            contact_method: vec![ContactMethodReference {
                id: "PXPGF42".to_owned(),
                kind: ContactMethodType::Sms,
            }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "assignment_notification_rule",
                "start_delay_in_minutes": 5,
                "urgency": "high",
                "contact_method": [{ "id": "PXPGF42", "type": "sms_contact_method" }],
            })
        );
    }

    #[test]
    fn rule_without_contact_methods_deserializes_to_empty_list() {
        let rule: NotificationRule = serde_json::from_value(serde_json::json!({
            "id": "PRULE01",
            "type": "assignment_notification_rule",
            "start_delay_in_minutes": 0,
            "urgency": "low",
        }))
        .unwrap();
        assert_eq!(rule.id, "PRULE01");
        assert_eq!(rule.urgency, Urgency::Low);
        assert!(rule.contact_method.is_empty());
    }

    #[test]
    fn api_error_messages() {
        let missing = ApiError::NotFound { resource: "user".to_owned(), id: "U1".to_owned() };
        assert_eq!(missing.to_string(), "user U1 not found");
        assert!(missing.is_not_found());

        let server = ApiError::Server { status: 502, reason: "bad gateway".to_owned() };
        assert_eq!(server.to_string(), "server error (status 502): bad gateway");
        assert!(!server.is_not_found());
    }

    /// Verify that a minimal `UsersApi` implementation compiles and satisfies all methods.
    #[tokio::test]
    async fn users_api_trait_compiles_with_minimal_impl() {
        struct Echo;

        impl UsersApi for Echo {
            async fn create_notification_rule(
                &self,
                _user_id: &str,
                body: &NotificationRulePayload,
            ) -> Result<NotificationRule, ApiError> {
                Ok(NotificationRule {
                    id: "PNEW001".to_owned(),
                    kind: body.kind,
                    start_delay_in_minutes: body.start_delay_in_minutes,
                    urgency: body.urgency,
                    contact_method: body.contact_method.clone(),
                })
            }

            async fn get_notification_rule(
                &self,
                _user_id: &str,
                rule_id: &str,
            ) -> Result<NotificationRule, ApiError> {
                Err(ApiError::NotFound {
                    resource: "notification rule".to_owned(),
                    id: rule_id.to_owned(),
                })
            }

            async fn update_notification_rule(
                &self,
                _user_id: &str,
                rule_id: &str,
                body: &NotificationRulePayload,
            ) -> Result<NotificationRule, ApiError> {
                let mut rule = self.create_notification_rule("", body).await?;
                rule.id = rule_id.to_owned();
                Ok(rule)
            }

            async fn delete_notification_rule(
                &self,
                _user_id: &str,
                _rule_id: &str,
            ) -> Result<(), ApiError> {
                Ok(())
            }
        }

        let api = Echo;
        let body = NotificationRulePayload {
            kind: RuleType::AssignmentNotificationRule,
            start_delay_in_minutes: 1,
            urgency: Urgency::Low,
            contact_method: vec![],
        };
        let created = api.create_notification_rule("U1", &body).await.unwrap();
        assert_eq!(created.id, "PNEW001");
        let err = api.get_notification_rule("U1", "R1").await.unwrap_err();
        assert!(err.is_not_found());
        let updated = api.update_notification_rule("U1", "R9", &body).await.unwrap();
        assert_eq!(updated.id, "R9");
        api.delete_notification_rule("U1", "R9").await.unwrap();
    }
}
