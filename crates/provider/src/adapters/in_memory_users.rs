// Rust guideline compliant 2026-10-16

//! In-memory adapter for the `UsersApi` port.
//!
//! Behaves like the remote users API for notification rules: ids are
//! assigned on create, bodies are echoed back, and unknown users or rules
//! yield `ApiError::NotFound`. Intended for demo runs and tests only.

use std::cell::RefCell;
use std::collections::BTreeMap;

use domain::{ApiError, NotificationRule, NotificationRulePayload, UsersApi};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Characters used after the leading `P` of a generated id.
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of random characters in a generated id.
const ID_SUFFIX_LEN: usize = 6;

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`InMemoryUsersApi`].
///
/// Obtain via [`InMemoryUsersApi::builder`]; finalize with [`build`](Self::build).
#[derive(Debug, Default)]
pub struct InMemoryUsersApiBuilder {
    users: Vec<String>,
    seed: Option<u64>,
}

impl InMemoryUsersApiBuilder {
    /// Register a user that owns no rules yet.
    #[must_use]
    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.users.push(user_id.into());
        self
    }

    /// Fix the RNG seed for deterministic ids (useful in tests).
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the adapter.
    #[must_use]
    pub fn build(self) -> InMemoryUsersApi {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let users = self.users.into_iter().map(|u| (u, BTreeMap::new())).collect();
        InMemoryUsersApi { users: RefCell::new(users), rng: RefCell::new(rng) }
    }
}

// ---------------------------------------------------------------------------
// InMemoryUsersApi
// ---------------------------------------------------------------------------

/// Rules of each user, keyed by rule id.
type RuleTable = BTreeMap<String, BTreeMap<String, NotificationRule>>;

/// `UsersApi` adapter backed by nested in-memory maps.
///
/// Interior mutability is required because the port takes `&self`. Borrows
/// never span an `.await`.
#[derive(Debug)]
pub struct InMemoryUsersApi {
    users: RefCell<RuleTable>,
    rng: RefCell<StdRng>,
}

impl InMemoryUsersApi {
    /// Create a builder with no users and an OS-seeded RNG.
    #[must_use]
    pub fn builder() -> InMemoryUsersApiBuilder {
        InMemoryUsersApiBuilder::default()
    }

    /// Number of rules currently owned by `user_id`; `0` for unknown users.
    #[must_use]
    pub fn rule_count(&self, user_id: &str) -> usize {
        self.users.borrow().get(user_id).map_or(0, BTreeMap::len)
    }

    /// Generate a fresh id of the form `P` + six uppercase alphanumerics.
    fn next_id(&self) -> String {
        let mut rng = self.rng.borrow_mut();
        let mut id = String::with_capacity(ID_SUFFIX_LEN + 1);
        id.push('P');
        for _ in 0..ID_SUFFIX_LEN {
            id.push(char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]));
        }
        id
    }

    fn user_not_found(user_id: &str) -> ApiError {
        ApiError::NotFound { resource: "user".to_owned(), id: user_id.to_owned() }
    }

    fn rule_not_found(rule_id: &str) -> ApiError {
        ApiError::NotFound { resource: "notification rule".to_owned(), id: rule_id.to_owned() }
    }

    fn to_rule(id: String, body: &NotificationRulePayload) -> NotificationRule {
        NotificationRule {
            id,
            kind: body.kind,
            start_delay_in_minutes: body.start_delay_in_minutes,
            urgency: body.urgency,
            contact_method: body.contact_method.clone(),
        }
    }
}

impl UsersApi for InMemoryUsersApi {
    async fn create_notification_rule(
        &self,
        user_id: &str,
        body: &NotificationRulePayload,
    ) -> Result<NotificationRule, ApiError> {
        let id = self.next_id();
        let mut users = self.users.borrow_mut();
        let rules = users.get_mut(user_id).ok_or_else(|| Self::user_not_found(user_id))?;
        let rule = Self::to_rule(id, body);
        rules.insert(rule.id.clone(), rule.clone());
        tracing::debug!(user_id = %user_id, rule_id = %rule.id, "in_memory_users.create");
        Ok(rule)
    }

    async fn get_notification_rule(
        &self,
        user_id: &str,
        rule_id: &str,
    ) -> Result<NotificationRule, ApiError> {
        let users = self.users.borrow();
        let rules = users.get(user_id).ok_or_else(|| Self::user_not_found(user_id))?;
        rules.get(rule_id).cloned().ok_or_else(|| Self::rule_not_found(rule_id))
    }

    async fn update_notification_rule(
        &self,
        user_id: &str,
        rule_id: &str,
        body: &NotificationRulePayload,
    ) -> Result<NotificationRule, ApiError> {
        let mut users = self.users.borrow_mut();
        let rules = users.get_mut(user_id).ok_or_else(|| Self::user_not_found(user_id))?;
        let slot = rules.get_mut(rule_id).ok_or_else(|| Self::rule_not_found(rule_id))?;
        *slot = Self::to_rule(rule_id.to_owned(), body);
        tracing::debug!(user_id = %user_id, rule_id = %rule_id, "in_memory_users.update");
        Ok(slot.clone())
    }

    async fn delete_notification_rule(
        &self,
        user_id: &str,
        rule_id: &str,
    ) -> Result<(), ApiError> {
        let mut users = self.users.borrow_mut();
        let rules = users.get_mut(user_id).ok_or_else(|| Self::user_not_found(user_id))?;
        rules.remove(rule_id).ok_or_else(|| Self::rule_not_found(rule_id))?;
        tracing::debug!(user_id = %user_id, rule_id = %rule_id, "in_memory_users.delete");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::InMemoryUsersApi;
    use domain::{
        ApiError, ContactMethodReference, ContactMethodType, NotificationRulePayload, RuleType,
        Urgency, UsersApi as _,
    };

    fn make_body(urgency: Urgency) -> NotificationRulePayload {
        NotificationRulePayload {
            kind: RuleType::AssignmentNotificationRule,
            start_delay_in_minutes: 5,
            urgency,
            contact_method: vec![ContactMethodReference {
                id: "PCM0001".to_owned(),
                kind: ContactMethodType::Sms,
            }],
        }
    }

    fn make_api() -> InMemoryUsersApi {
        InMemoryUsersApi::builder().user("U1").seed(7).build()
    }

    // IMU-T01: create assigns a PagerDuty-style id and echoes the body.
    #[tokio::test]
    async fn create_assigns_id_and_echoes_body() {
        let api = make_api();
        let rule = api.create_notification_rule("U1", &make_body(Urgency::High)).await.unwrap();
        assert_eq!(rule.id.len(), 7);
        assert!(rule.id.starts_with('P'));
        assert!(rule.id[1..].bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        assert_eq!(rule.urgency, Urgency::High);
        assert_eq!(rule.contact_method.len(), 1);
        assert_eq!(api.rule_count("U1"), 1);
    }

    // IMU-T02: the same seed yields the same ids.
    #[tokio::test]
    async fn seeded_ids_are_reproducible() {
        let a = make_api();
        let b = make_api();
        let body = make_body(Urgency::Low);
        let ra = a.create_notification_rule("U1", &body).await.unwrap();
        let rb = b.create_notification_rule("U1", &body).await.unwrap();
        assert_eq!(ra.id, rb.id);
    }

    // IMU-T03: unknown user is not-found on every operation.
    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let api = make_api();
        let body = make_body(Urgency::High);
        let err = api.create_notification_rule("NOPE", &body).await.unwrap_err();
        assert_eq!(err, ApiError::NotFound { resource: "user".to_owned(), id: "NOPE".to_owned() });
        assert!(api.get_notification_rule("NOPE", "R1").await.unwrap_err().is_not_found());
        assert!(api.update_notification_rule("NOPE", "R1", &body).await.unwrap_err().is_not_found());
        assert!(api.delete_notification_rule("NOPE", "R1").await.unwrap_err().is_not_found());
    }

    // IMU-T04: update replaces the stored rule in place.
    #[tokio::test]
    async fn update_replaces_rule() {
        let api = make_api();
        let created = api.create_notification_rule("U1", &make_body(Urgency::High)).await.unwrap();
        let updated = api
            .update_notification_rule("U1", &created.id, &make_body(Urgency::Low))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        let fetched = api.get_notification_rule("U1", &created.id).await.unwrap();
        assert_eq!(fetched.urgency, Urgency::Low);
    }

    // IMU-T05: deleting twice reports not-found the second time.
    #[tokio::test]
    async fn second_delete_is_not_found() {
        let api = make_api();
        let created = api.create_notification_rule("U1", &make_body(Urgency::High)).await.unwrap();
        api.delete_notification_rule("U1", &created.id).await.unwrap();
        assert_eq!(api.rule_count("U1"), 0);
        let err = api.delete_notification_rule("U1", &created.id).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::NotFound { resource: "notification rule".to_owned(), id: created.id }
        );
    }
}
