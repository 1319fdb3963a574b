// Rust guideline compliant 2026-10-16

//! Typed configuration of a user notification rule.
//!
//! [`NotificationRuleConfig`] is what the adapter operates on. It is produced
//! either by validating a [`RawNotificationRule`](crate::schema::RawNotificationRule)
//! at the framework boundary or programmatically via
//! [`NotificationRuleConfig::builder`].

use domain::{ContactMethodReference, ContactMethodType, NotificationRule, RuleType, Urgency};

use crate::schema::{SchemaError, ValidationErrors};

/// One configured `contact_method` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMethodEntry {
    /// Identifier of the referenced contact method. Empty until known.
    pub id: String,
    /// Channel kind.
    pub kind: ContactMethodType,
}

impl From<&ContactMethodReference> for ContactMethodEntry {
    fn from(reference: &ContactMethodReference) -> Self {
        Self { id: reference.id.clone(), kind: reference.kind }
    }
}

/// Validated configuration of a user notification rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRuleConfig {
    /// Owning user. Changing it means a different entity.
    pub user_id: String,
    /// Rule kind.
    pub kind: RuleType,
    /// Minutes to wait before notifying.
    pub start_delay_in_minutes: i64,
    /// Incident urgency the rule applies to.
    pub urgency: Urgency,
    /// Contact methods to notify, in order.
    pub contact_method: Vec<ContactMethodEntry>,
}

impl NotificationRuleConfig {
    /// Create a builder. `user_id` is the only parameter without a default.
    ///
    /// Default values: `kind = AssignmentNotificationRule`,
    /// `start_delay_in_minutes = 0`, `urgency = High`, no contact methods.
    #[must_use]
    pub fn builder(user_id: impl Into<String>) -> NotificationRuleConfigBuilder {
        NotificationRuleConfigBuilder {
            user_id: user_id.into(),
            kind: RuleType::AssignmentNotificationRule,
            start_delay_in_minutes: 0,
            urgency: Urgency::High,
            contact_method: Vec::new(),
        }
    }

    /// Build the configuration that mirrors `rule` as owned by `user_id`.
    #[must_use]
    pub fn from_remote(user_id: impl Into<String>, rule: &NotificationRule) -> Self {
        Self {
            user_id: user_id.into(),
            kind: rule.kind,
            start_delay_in_minutes: rule.start_delay_in_minutes,
            urgency: rule.urgency,
            contact_method: rule.contact_method.iter().map(ContactMethodEntry::from).collect(),
        }
    }

    /// Overwrite every service-owned field with the values of `rule`.
    ///
    /// `user_id` is left untouched: the service does not echo it.
    pub fn apply_remote(&mut self, rule: &NotificationRule) {
        self.kind = rule.kind;
        self.start_delay_in_minutes = rule.start_delay_in_minutes;
        self.urgency = rule.urgency;
        self.contact_method = rule.contact_method.iter().map(ContactMethodEntry::from).collect();
    }
}

/// Builder for [`NotificationRuleConfig`].
///
/// Obtain via [`NotificationRuleConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct NotificationRuleConfigBuilder {
    user_id: String,
    kind: RuleType,
    start_delay_in_minutes: i64,
    urgency: Urgency,
    contact_method: Vec<ContactMethodEntry>,
}

impl NotificationRuleConfigBuilder {
    /// Override the notification delay.
    #[must_use]
    pub fn start_delay_in_minutes(mut self, minutes: i64) -> Self {
        self.start_delay_in_minutes = minutes;
        self
    }

    /// Override the urgency.
    #[must_use]
    pub fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Append a contact method reference.
    #[must_use]
    pub fn contact_method(mut self, id: impl Into<String>, kind: ContactMethodType) -> Self {
        self.contact_method.push(ContactMethodEntry { id: id.into(), kind });
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when `user_id` is empty.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<NotificationRuleConfig, ValidationErrors> {
        if self.user_id.is_empty() {
            return Err(ValidationErrors::from(vec![SchemaError::Missing {
                field: "user_id".to_owned(),
            }]));
        }
        Ok(NotificationRuleConfig {
            user_id: self.user_id,
            kind: self.kind,
            start_delay_in_minutes: self.start_delay_in_minutes,
            urgency: self.urgency,
            contact_method: self.contact_method,
        })
    }
}
