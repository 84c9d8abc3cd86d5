//! Read-only info adapters: one GET each, decoded JSON passed through.
//!
//! Five adapters instead of one generic lookup because their endpoints,
//! query handling, and failure messages differ; `ChecksFlipsInfo` in
//! particular reports failures without the upstream message text, and that
//! difference is part of the wire-visible contract.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::response::{error_field, Response};
use crate::types::{Outcome, Report};

/// Filter for `ChecksInfo::get`: at most one of `tags` and `uuid`.
///
/// The mutual exclusion is the caller's contract; when both are set, tags
/// win, matching the upstream precedence.
#[derive(Debug, Clone, Default)]
pub struct ChecksQuery {
    pub tags: Option<Vec<String>>,
    pub uuid: Option<String>,
}

impl ChecksQuery {
    pub fn by_tags(tags: Vec<String>) -> Self {
        Self {
            tags: Some(tags),
            uuid: None,
        }
    }

    pub fn by_uuid(uuid: impl Into<String>) -> Self {
        Self {
            tags: None,
            uuid: Some(uuid.into()),
        }
    }

    /// Endpoint for this query: repeated `tag=` parameters, a uuid path
    /// segment, or the bare listing.
    pub fn endpoint(&self) -> String {
        if let Some(tags) = self.tags.as_deref().filter(|tags| !tags.is_empty()) {
            let filter = tags
                .iter()
                .map(|tag| format!("tag={tag}"))
                .collect::<Vec<_>>()
                .join("&");
            return format!("checks?{filter}");
        }
        match self.uuid.as_deref().filter(|uuid| !uuid.is_empty()) {
            Some(uuid) => format!("checks/{uuid}"),
            None => "checks".to_string(),
        }
    }
}

/// List checks, filter them by tag, or fetch one by uuid.
pub struct ChecksInfo<'a> {
    rest: &'a ApiClient,
    dry_run: bool,
}

impl<'a> ChecksInfo<'a> {
    pub fn new(rest: &'a ApiClient) -> Self {
        Self {
            rest,
            dry_run: false,
        }
    }

    pub fn dry_run(rest: &'a ApiClient) -> Self {
        Self {
            rest,
            dry_run: true,
        }
    }

    pub fn get(&self, query: &ChecksQuery) -> Outcome {
        if self.dry_run {
            return Ok(Report::skipped());
        }
        let endpoint = query.endpoint();
        let response = self.rest.get(&endpoint, None);
        info_outcome(&endpoint, &response)
    }
}

/// Pings logged for one check.
pub struct ChecksPingsInfo<'a> {
    rest: &'a ApiClient,
    dry_run: bool,
}

impl<'a> ChecksPingsInfo<'a> {
    pub fn new(rest: &'a ApiClient) -> Self {
        Self {
            rest,
            dry_run: false,
        }
    }

    pub fn dry_run(rest: &'a ApiClient) -> Self {
        Self {
            rest,
            dry_run: true,
        }
    }

    pub fn get(&self, uuid: &str) -> Outcome {
        if self.dry_run {
            return Ok(Report::skipped());
        }
        let endpoint = format!("checks/{uuid}/pings");
        let response = self.rest.get(&endpoint, None);
        info_outcome(&endpoint, &response)
    }
}

/// Up/down transitions recorded for one check.
pub struct ChecksFlipsInfo<'a> {
    rest: &'a ApiClient,
    dry_run: bool,
}

impl<'a> ChecksFlipsInfo<'a> {
    pub fn new(rest: &'a ApiClient) -> Self {
        Self {
            rest,
            dry_run: false,
        }
    }

    pub fn dry_run(rest: &'a ApiClient) -> Self {
        Self {
            rest,
            dry_run: true,
        }
    }

    pub fn get(&self, uuid: &str) -> Outcome {
        if self.dry_run {
            return Ok(Report::skipped());
        }
        let endpoint = format!("checks/{uuid}/flips");
        let response = self.rest.get(&endpoint, None);
        flips_outcome(&endpoint, &response)
    }
}

/// Notification integrations configured on the project.
pub struct ChannelsInfo<'a> {
    rest: &'a ApiClient,
    dry_run: bool,
}

impl<'a> ChannelsInfo<'a> {
    pub fn new(rest: &'a ApiClient) -> Self {
        Self {
            rest,
            dry_run: false,
        }
    }

    pub fn dry_run(rest: &'a ApiClient) -> Self {
        Self {
            rest,
            dry_run: true,
        }
    }

    pub fn get(&self) -> Outcome {
        if self.dry_run {
            return Ok(Report::skipped());
        }
        let response = self.rest.get("channels", None);
        info_outcome("channels", &response)
    }
}

/// Status badge URLs, keyed by tag.
pub struct BadgesInfo<'a> {
    rest: &'a ApiClient,
    dry_run: bool,
}

impl<'a> BadgesInfo<'a> {
    pub fn new(rest: &'a ApiClient) -> Self {
        Self {
            rest,
            dry_run: false,
        }
    }

    pub fn dry_run(rest: &'a ApiClient) -> Self {
        Self {
            rest,
            dry_run: true,
        }
    }

    pub fn get(&self) -> Outcome {
        if self.dry_run {
            return Ok(Report::skipped());
        }
        let response = self.rest.get("badges", None);
        info_outcome("badges", &response)
    }
}

fn info_outcome(endpoint: &str, response: &Response) -> Outcome {
    let status = response.status_code();
    let data = response.json().unwrap_or(Value::Null);
    if status == 200 {
        return Ok(Report::fetched(data));
    }
    Err(ApiError::api(format!(
        "Failed to get {endpoint} [HTTP {status}: {}]",
        error_field(&data, "message"),
    )))
}

// Flips failures never carried the upstream message text; keep it that way.
fn flips_outcome(endpoint: &str, response: &Response) -> Outcome {
    let status = response.status_code();
    let data = response.json().unwrap_or(Value::Null);
    if status == 200 {
        return Ok(Report::fetched(data));
    }
    Err(ApiError::api(format!(
        "Failed to get {endpoint} [HTTP {status}]"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::{json, Map};

    fn response(status: i64, body: Option<&str>) -> Response {
        let mut info = Map::new();
        info.insert("status".to_string(), Value::from(status));
        Response::new(body.map(str::to_string), info)
    }

    #[test]
    fn tags_become_repeated_query_parameters() {
        let query = ChecksQuery::by_tags(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(query.endpoint(), "checks?tag=a&tag=b");
    }

    #[test]
    fn a_uuid_becomes_a_path_segment() {
        assert_eq!(ChecksQuery::by_uuid("12345").endpoint(), "checks/12345");
    }

    #[test]
    fn no_filter_lists_everything() {
        assert_eq!(ChecksQuery::default().endpoint(), "checks");
        assert_eq!(ChecksQuery::by_tags(Vec::new()).endpoint(), "checks");
        assert_eq!(ChecksQuery::by_uuid("").endpoint(), "checks");
    }

    #[test]
    fn tags_win_when_both_filters_are_set() {
        let query = ChecksQuery {
            tags: Some(vec!["a".to_string()]),
            uuid: Some("12345".to_string()),
        };
        assert_eq!(query.endpoint(), "checks?tag=a");
    }

    #[test]
    fn a_200_passes_the_payload_through() {
        let report = info_outcome("checks", &response(200, Some(r#"{"checks":[]}"#))).unwrap();
        assert!(!report.changed);
        assert_eq!(report.data, json!({"checks": []}));
    }

    #[test]
    fn an_undecodable_200_passes_through_as_null() {
        let report = info_outcome("badges", &response(200, Some("not json"))).unwrap();
        assert_eq!(report.data, Value::Null);
    }

    #[test]
    fn failures_embed_endpoint_status_and_message() {
        let err = info_outcome("channels", &response(500, Some(r#"{"message":"boom"}"#)))
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to get channels [HTTP 500: boom]");

        let err = info_outcome("badges", &response(500, None)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to get badges [HTTP 500: (empty error message)]"
        );
    }

    #[test]
    fn flips_failures_omit_the_upstream_message() {
        let err = flips_outcome(
            "checks/x/flips",
            &response(500, Some(r#"{"message":"boom"}"#)),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Failed to get checks/x/flips [HTTP 500]");
    }

    #[test]
    fn dry_run_never_touches_the_network() {
        let client = ApiClient::new(&Config {
            api_token: "t".to_string(),
            api_url: "http://127.0.0.1:1".to_string(),
            timeout: 1,
        });
        assert_eq!(
            ChecksInfo::dry_run(&client).get(&ChecksQuery::default()).unwrap(),
            Report::skipped()
        );
        assert_eq!(ChecksPingsInfo::dry_run(&client).get("x").unwrap(), Report::skipped());
        assert_eq!(ChecksFlipsInfo::dry_run(&client).get("x").unwrap(), Report::skipped());
        assert_eq!(ChannelsInfo::dry_run(&client).get().unwrap(), Report::skipped());
        assert_eq!(BadgesInfo::dry_run(&client).get().unwrap(), Report::skipped());
    }
}
