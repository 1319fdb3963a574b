// Rust guideline compliant 2026-10-16

//! User notification rule provider entry point.
//!
//! Loads a resource description from JSON, validates it, and drives the
//! `user_notification_rule` resource through create, update, read, import
//! and delete against the in-memory users API.
//!
//! # Usage
//!
//! ```text
//! # Bundled description
//! RUST_LOG=info cargo run
//!
//! # Own description, with adapter-level debug events
//! RUST_LOG=debug cargo run -- path/to/rule.json
//! ```

mod adapters;

use std::path::{Path, PathBuf};

use adapters::in_memory_users::InMemoryUsersApi;
use anyhow::Context as _;
use domain::Urgency;
use resource::{
    NotificationRuleConfig, NotificationRuleResource, RawNotificationRule, ResourceData,
};
use tracing_subscriber::EnvFilter;

/// Description used when no path is given on the command line.
const DEFAULT_DESCRIPTION: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/demos/user_notification_rule.json");

/// Read and validate a resource description.
fn load_description(path: &Path) -> anyhow::Result<NotificationRuleConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let raw: RawNotificationRule = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    raw.validate().with_context(|| format!("invalid description in {}", path.display()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_DESCRIPTION), PathBuf::from);
    let config = load_description(&path)?;

    let api = InMemoryUsersApi::builder().user(config.user_id.clone()).build();
    let resource = NotificationRuleResource::new();
    let mut data = ResourceData::new(config);

    resource.create(&api, &mut data).await.context("create failed")?;
    let rule_id = data.id().context("create returned no id")?.to_owned();
    tracing::info!(rule_id = %rule_id, urgency = data.config.urgency.as_str(), "main.created");

    data.config.urgency = match data.config.urgency {
        Urgency::High => Urgency::Low,
        Urgency::Low => Urgency::High,
    };
    resource.update(&api, &mut data).await.context("update failed")?;
    tracing::info!(rule_id = %rule_id, urgency = data.config.urgency.as_str(), "main.updated");

    let import_id = format!("{}:{rule_id}", data.config.user_id);
    let imported = resource.import(&api, &import_id).await.context("import failed")?;
    tracing::info!(
        import_id = %import_id,
        matches_state = (imported == data),
        "main.imported"
    );

    resource.delete(&api, &mut data).await.context("delete failed")?;
    resource.delete(&api, &mut data).await.context("repeated delete failed")?;
    tracing::info!(
        rule_id = %rule_id,
        remaining = api.rule_count(&data.config.user_id),
        "main.deleted"
    );

    Ok(())
}
