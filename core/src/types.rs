//! Input and outcome types for the resource adapters.
//!
//! # Design
//! Each adapter invocation takes an immutable request value and hands back
//! a tagged outcome, so nothing mutates shared parameter state between
//! calls. `CheckRequest` derives `Deserialize` so the JSON test vectors can
//! load inputs directly.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::ApiError;

/// Desired state for a check, passed to `Checks::create`.
///
/// Defaults mirror the API defaults: empty strings, no tags, a one-hour
/// grace period, automatic resume on ping.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckRequest {
    pub name: String,
    pub desc: String,
    pub slug: String,
    pub tags: Vec<String>,
    /// Expected reporting period in seconds (Simple check).
    pub timeout: Option<u64>,
    /// Grace period in seconds.
    pub grace: u64,
    /// Cron expression (Cron check, together with `tz`).
    pub schedule: Option<String>,
    pub tz: Option<String>,
    pub manual_resume: bool,
    /// Allowed ping methods: `""` for HEAD/GET/POST, `"POST"` for POST only.
    pub methods: String,
    /// Integration channels: `""`, `"*"`, or comma-separated channel ids.
    pub channels: String,
    /// Upsert match fields; empty means always create.
    pub unique: Vec<UniqueField>,
}

impl Default for CheckRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            desc: String::new(),
            slug: String::new(),
            tags: Vec::new(),
            timeout: None,
            grace: 3600,
            schedule: None,
            tz: None,
            manual_resume: false,
            methods: String::new(),
            channels: String::new(),
            unique: Vec::new(),
        }
    }
}

impl CheckRequest {
    /// The JSON body sent to `POST checks/`.
    ///
    /// Tags are space-joined on the wire. Both `schedule` and `tz` set
    /// drops `timeout` (Cron check); otherwise a set `timeout` drops
    /// `schedule`/`tz` (Simple check). When neither condition holds the
    /// fields pass through for the API's own validation.
    pub fn payload(&self) -> Value {
        let mut body = Map::new();
        body.insert("name".to_string(), Value::from(self.name.as_str()));
        body.insert("desc".to_string(), Value::from(self.desc.as_str()));
        body.insert("slug".to_string(), Value::from(self.slug.as_str()));
        body.insert("tags".to_string(), Value::from(self.tags.join(" ")));
        body.insert("grace".to_string(), Value::from(self.grace));
        body.insert("manual_resume".to_string(), Value::from(self.manual_resume));
        body.insert("methods".to_string(), Value::from(self.methods.as_str()));
        body.insert("channels".to_string(), Value::from(self.channels.as_str()));
        body.insert(
            "unique".to_string(),
            Value::from(self.unique.iter().map(|f| f.as_str()).collect::<Vec<_>>()),
        );
        if let Some(timeout) = self.timeout {
            body.insert("timeout".to_string(), Value::from(timeout));
        }
        if let Some(schedule) = &self.schedule {
            body.insert("schedule".to_string(), Value::from(schedule.as_str()));
        }
        if let Some(tz) = &self.tz {
            body.insert("tz".to_string(), Value::from(tz.as_str()));
        }
        if self.schedule.is_some() && self.tz.is_some() {
            body.remove("timeout");
        } else if self.timeout.is_some() {
            body.remove("schedule");
            body.remove("tz");
        }
        Value::Object(body)
    }
}

/// Fields the upsert match may key on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniqueField {
    Name,
    Tags,
    Timeout,
    Grace,
}

impl UniqueField {
    pub fn as_str(self) -> &'static str {
        match self {
            UniqueField::Name => "name",
            UniqueField::Tags => "tags",
            UniqueField::Timeout => "timeout",
            UniqueField::Grace => "grace",
        }
    }
}

/// Liveness signal carried by a ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Success,
    Fail,
    Start,
}

impl Signal {
    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Success => "success",
            Signal::Fail => "fail",
            Signal::Start => "start",
        }
    }
}

/// Successful outcome of one adapter operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Whether the operation changed remote state.
    pub changed: bool,
    pub message: Option<String>,
    /// Check uuid, when the operation resolved one.
    pub uuid: Option<String>,
    /// Decoded response payload; JSON null when the API returned none.
    pub data: Value,
}

impl Report {
    /// Dry-run outcome: no call made, nothing changed, empty data.
    pub fn skipped() -> Self {
        Self {
            changed: false,
            message: None,
            uuid: None,
            data: json!({}),
        }
    }

    pub(crate) fn changed(message: String, data: Value) -> Self {
        Self {
            changed: true,
            message: Some(message),
            uuid: None,
            data,
        }
    }

    pub(crate) fn unchanged(message: String, data: Value) -> Self {
        Self {
            changed: false,
            message: Some(message),
            uuid: None,
            data,
        }
    }

    pub(crate) fn fetched(data: Value) -> Self {
        Self {
            changed: false,
            message: None,
            uuid: None,
            data,
        }
    }
}

/// What every adapter operation hands back.
pub type Outcome = Result<Report, ApiError>;
