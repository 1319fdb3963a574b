// Rust guideline compliant 2026-10-16

//! Resource adapter for a user's notification rules.
//!
//! [`NotificationRuleResource`] maps the declarative configuration of a
//! notification rule onto the `domain::UsersApi` port: create, read, update,
//! delete, and import of an entity that already exists remotely.
//! The adapter holds no state between calls; the framework's state record
//! ([`ResourceData`]) and the API handle are passed into every operation.
//!
//! Entry points: [`NotificationRuleResource::create`],
//! [`NotificationRuleResource::read`], [`NotificationRuleResource::update`],
//! [`NotificationRuleResource::delete`], [`NotificationRuleResource::import`].

pub mod config;
pub mod schema;

pub use config::{ContactMethodEntry, NotificationRuleConfig, NotificationRuleConfigBuilder};
pub use schema::{
    FieldKind, FieldSchema, RawContactMethod, RawNotificationRule, SCHEMA, SchemaError,
    ValidationErrors,
};

use domain::{ApiError, ContactMethodReference, NotificationRulePayload, UsersApi};

/// Separator between the user id and the rule id in an import identifier.
const IMPORT_ID_SEPARATOR: char = ':';

// ---------------------------------------------------------------------------
// ResourceError
// ---------------------------------------------------------------------------

/// Errors returned by the resource lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The configuration does not conform to the schema.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// The import identifier is not `<user_id>:<notification_rule_id>`.
    #[error(
        "error importing user notification rule: expecting an id formed as \
         '<user_id>:<notification_rule_id>', got {id:?}"
    )]
    InvalidImportId {
        /// Identifier as supplied.
        id: String,
    },
    /// The operation needs a remote id but the state record has none.
    #[error("user notification rule has no id")]
    MissingId,
    /// The remote service failed; message passed through verbatim.
    #[error(transparent)]
    Api(#[from] ApiError),
}

// ---------------------------------------------------------------------------
// ResourceData
// ---------------------------------------------------------------------------

/// In/out state record for one notification rule.
///
/// `id` is `None` while the entity does not exist remotely (or has been
/// found missing), which tells the framework to plan a create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceData {
    id: Option<String>,
    /// Current configuration; refreshed from the service on read.
    pub config: NotificationRuleConfig,
}

impl ResourceData {
    /// Record for a rule that has not been created yet.
    #[must_use]
    pub fn new(config: NotificationRuleConfig) -> Self {
        Self { id: None, config }
    }

    /// Record for a rule already known by `id`. An empty `id` means absent.
    #[must_use]
    pub fn with_id(id: impl Into<String>, config: NotificationRuleConfig) -> Self {
        let mut data = Self::new(config);
        data.set_id(id);
        data
    }

    /// Remote identifier, if the rule exists.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Record the remote identifier. An empty `id` marks the rule as absent.
    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.id = (!id.is_empty()).then_some(id);
    }

    /// Mark the rule as absent.
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    fn require_id(&self) -> Result<String, ResourceError> {
        self.id.clone().ok_or(ResourceError::MissingId)
    }
}

// ---------------------------------------------------------------------------
// Build-request
// ---------------------------------------------------------------------------

/// Translate `config` into the body sent on create and update.
///
/// Every field is always present; each contact method keeps only its `id`
/// and `type`, in configuration order.
#[must_use]
pub fn build_request(config: &NotificationRuleConfig) -> NotificationRulePayload {
    NotificationRulePayload {
        kind: config.kind,
        start_delay_in_minutes: config.start_delay_in_minutes,
        urgency: config.urgency,
        contact_method: config
            .contact_method
            .iter()
            .map(|entry| ContactMethodReference { id: entry.id.clone(), kind: entry.kind })
            .collect(),
    }
}

/// Split an import identifier into `(user_id, rule_id)`.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidImportId`] unless `id` has exactly two
/// non-empty colon-separated segments.
pub fn parse_import_id(id: &str) -> Result<(&str, &str), ResourceError> {
    let mut parts = id.split(IMPORT_ID_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(user_id), Some(rule_id), None) if !user_id.is_empty() && !rule_id.is_empty() => {
            Ok((user_id, rule_id))
        }
        _ => Err(ResourceError::InvalidImportId { id: id.to_owned() }),
    }
}

// ---------------------------------------------------------------------------
// NotificationRuleResource
// ---------------------------------------------------------------------------

/// Lifecycle operations of the `user_notification_rule` resource.
///
/// Stateless; generic over any `UsersApi` adapter supplied per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotificationRuleResource;

impl NotificationRuleResource {
    /// Create the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Declared configuration fields.
    #[must_use]
    pub fn schema(&self) -> &'static [FieldSchema] {
        SCHEMA
    }

    /// Create the rule remotely, record its id, then read it back.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] with the remote error unchanged,
    /// including not-found for an unknown user.
    pub async fn create<A: UsersApi>(
        &self,
        api: &A,
        data: &mut ResourceData,
    ) -> Result<(), ResourceError> {
        let user_id = data.config.user_id.clone();
        let body = build_request(&data.config);
        tracing::info!(user_id = %user_id, "resource.create");

        let created = api.create_notification_rule(&user_id, &body).await?;
        tracing::debug!(user_id = %user_id, rule_id = %created.id, "resource.create.assigned");
        data.set_id(created.id);

        self.read(api, data).await
    }

    /// Refresh `data` from the service.
    ///
    /// A missing rule clears the id and succeeds so the framework plans a
    /// re-create. A record without an id is already absent and is returned
    /// as is. Any other failure leaves `data` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] for any remote error other than not-found.
    pub async fn read<A: UsersApi>(
        &self,
        api: &A,
        data: &mut ResourceData,
    ) -> Result<(), ResourceError> {
        let Some(rule_id) = data.id().map(str::to_owned) else {
            return Ok(());
        };
        let user_id = data.config.user_id.clone();

        match api.get_notification_rule(&user_id, &rule_id).await {
            Ok(rule) => {
                data.config.apply_remote(&rule);
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                tracing::warn!(
                    user_id = %user_id,
                    rule_id = %rule_id,
                    "resource.read.gone: removing from state"
                );
                data.clear_id();
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Replace the remote rule with the full current configuration, then
    /// read it back.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] when `data` has no id, or
    /// [`ResourceError::Api`] with the remote error unchanged.
    pub async fn update<A: UsersApi>(
        &self,
        api: &A,
        data: &mut ResourceData,
    ) -> Result<(), ResourceError> {
        let rule_id = data.require_id()?;
        let user_id = data.config.user_id.clone();
        let body = build_request(&data.config);
        tracing::info!(user_id = %user_id, rule_id = %rule_id, "resource.update");

        api.update_notification_rule(&user_id, &rule_id, &body).await?;

        self.read(api, data).await
    }

    /// Delete the remote rule and clear the id. A rule that is already gone,
    /// remotely or because `data` has no id, counts as deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] for any remote error other than not-found.
    pub async fn delete<A: UsersApi>(
        &self,
        api: &A,
        data: &mut ResourceData,
    ) -> Result<(), ResourceError> {
        let Some(rule_id) = data.id().map(str::to_owned) else {
            return Ok(());
        };
        let user_id = data.config.user_id.clone();
        tracing::info!(user_id = %user_id, rule_id = %rule_id, "resource.delete");

        match api.delete_notification_rule(&user_id, &rule_id).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                tracing::debug!(rule_id = %rule_id, "resource.delete.already_gone");
            }
            Err(err) => return Err(err.into()),
        }
        data.clear_id();
        Ok(())
    }

    /// Adopt an existing rule identified by `"<user_id>:<rule_id>"`.
    ///
    /// The identifier is checked before any remote call; the rule is then
    /// fetched to confirm it exists and to populate the returned record.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidImportId`] for a malformed identifier,
    /// or [`ResourceError::Api`] (not-found included) when the fetch fails.
    pub async fn import<A: UsersApi>(
        &self,
        api: &A,
        import_id: &str,
    ) -> Result<ResourceData, ResourceError> {
        let (user_id, rule_id) = parse_import_id(import_id)?;
        tracing::info!(user_id = %user_id, rule_id = %rule_id, "resource.import");

        let rule = api.get_notification_rule(user_id, rule_id).await?;
        Ok(ResourceData::with_id(rule_id, NotificationRuleConfig::from_remote(user_id, &rule)))
    }
}
