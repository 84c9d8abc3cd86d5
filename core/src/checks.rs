//! Checks resource adapter: create-or-update, delete, pause.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::response::{error_field, Response};
use crate::types::{CheckRequest, Outcome, Report};

/// Reported in place of a uuid when `ping_url` cannot be parsed.
pub const UNKNOWN_UUID: &str = "(unable to determine uuid)";

pub struct Checks<'a> {
    rest: &'a ApiClient,
    dry_run: bool,
}

impl<'a> Checks<'a> {
    pub fn new(rest: &'a ApiClient) -> Self {
        Self {
            rest,
            dry_run: false,
        }
    }

    /// Dry-run variant: every operation reports an empty success without
    /// calling the API.
    pub fn dry_run(rest: &'a ApiClient) -> Self {
        Self {
            rest,
            dry_run: true,
        }
    }

    /// Create a check, or update an existing one when `unique` matches.
    ///
    /// The API answers 200 for an upsert hit and 201 for a fresh check;
    /// both are reported as changed, with the uuid taken from the returned
    /// `ping_url`.
    pub fn create(&self, request: &CheckRequest) -> Outcome {
        if self.dry_run {
            return Ok(Report::skipped());
        }
        let response = self.rest.post("checks/", Some(&request.payload()));
        create_outcome(&response)
    }

    /// Delete by uuid. Deleting a check that is already gone succeeds
    /// unchanged.
    pub fn delete(&self, uuid: &str) -> Outcome {
        if self.dry_run {
            return Ok(Report::skipped());
        }
        let endpoint = format!("checks/{uuid}");
        let response = self.rest.delete(&endpoint, None);
        delete_outcome(uuid, &endpoint, &response)
    }

    /// Pause pinging for a check. Same idempotent mapping as `delete`.
    pub fn pause(&self, uuid: &str) -> Outcome {
        if self.dry_run {
            return Ok(Report::skipped());
        }
        let endpoint = format!("checks/{uuid}/pause");
        let response = self.rest.post(&endpoint, None);
        pause_outcome(uuid, &endpoint, &response)
    }
}

fn create_outcome(response: &Response) -> Outcome {
    let status = response.status_code();
    let data = response.json().unwrap_or(Value::Null);
    match status {
        200 | 201 => {
            let uuid = uuid_from_ping_url(data.get("ping_url").and_then(Value::as_str));
            let message = if status == 201 {
                format!("New check {uuid} created")
            } else {
                format!("Existing check {uuid} found and updated")
            };
            Ok(Report {
                changed: true,
                message: Some(message),
                uuid: Some(uuid),
                data,
            })
        }
        _ => Err(ApiError::api(format!(
            "Failed to create checks/ [HTTP {status}: {}]",
            error_field(&data, "error"),
        ))),
    }
}

fn delete_outcome(uuid: &str, endpoint: &str, response: &Response) -> Outcome {
    let status = response.status_code();
    let data = response.json().unwrap_or(Value::Null);
    match status {
        200 => Ok(Report::changed(format!("Check {uuid} deleted"), data)),
        404 => Ok(Report::unchanged(
            format!("Check {uuid} not found"),
            Value::Null,
        )),
        _ => Err(ApiError::api(format!(
            "Failed to delete {endpoint} [HTTP {status}: {}]",
            error_field(&data, "error"),
        ))),
    }
}

fn pause_outcome(uuid: &str, endpoint: &str, response: &Response) -> Outcome {
    let status = response.status_code();
    let data = response.json().unwrap_or(Value::Null);
    match status {
        200 => Ok(Report::changed(format!("Check {uuid} paused"), data)),
        404 => Ok(Report::unchanged(
            format!("Check {uuid} not found"),
            Value::Null,
        )),
        _ => Err(ApiError::api(format!(
            "Failed to pause {endpoint} [HTTP {status}: {}]",
            error_field(&data, "error"),
        ))),
    }
}

/// Trailing path segment of a check's `ping_url`.
///
/// The uuid is advisory output, so extraction never fails: an absent or
/// empty url, or one with nothing after the last slash, yields
/// [`UNKNOWN_UUID`].
pub fn uuid_from_ping_url(ping_url: Option<&str>) -> String {
    ping_url
        .and_then(|url| url.rsplit('/').next())
        .filter(|tail| !tail.is_empty())
        .map_or_else(|| UNKNOWN_UUID.to_string(), str::to_string)
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
    fn uuid_comes_from_the_ping_url_tail() {
        assert_eq!(
            uuid_from_ping_url(Some("https://hc-ping.com/803f680d-e89b-492b-82ef-2be54b3c3ff7")),
            "803f680d-e89b-492b-82ef-2be54b3c3ff7"
        );
    }

    #[test]
    fn missing_or_bare_ping_urls_yield_the_sentinel() {
        assert_eq!(uuid_from_ping_url(None), UNKNOWN_UUID);
        assert_eq!(uuid_from_ping_url(Some("")), UNKNOWN_UUID);
        assert_eq!(uuid_from_ping_url(Some("https://hc-ping.com/")), UNKNOWN_UUID);
    }

    #[test]
    fn a_201_reports_a_new_check() {
        let body = r#"{"name":"test","ping_url":"https://hc-ping.com/abc-123"}"#;
        let report = create_outcome(&response(201, Some(body))).unwrap();
        assert!(report.changed);
        assert_eq!(report.message.as_deref(), Some("New check abc-123 created"));
        assert_eq!(report.uuid.as_deref(), Some("abc-123"));
        assert_eq!(report.data["name"], "test");
    }

    #[test]
    fn a_200_reports_an_upsert_hit() {
        let body = r#"{"ping_url":"https://hc-ping.com/abc-123"}"#;
        let report = create_outcome(&response(200, Some(body))).unwrap();
        assert!(report.changed);
        assert_eq!(
            report.message.as_deref(),
            Some("Existing check abc-123 found and updated")
        );
    }

    #[test]
    fn create_without_a_ping_url_still_succeeds() {
        let report = create_outcome(&response(201, Some("{}"))).unwrap();
        assert_eq!(report.uuid.as_deref(), Some(UNKNOWN_UUID));
    }

    #[test]
    fn create_failures_embed_the_api_error() {
        let err = create_outcome(&response(400, Some(r#"{"error":"bad cron syntax"}"#)))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to create checks/ [HTTP 400: bad cron syntax]"
        );
    }

    #[test]
    fn create_failures_without_a_body_use_the_placeholder() {
        let err = create_outcome(&response(500, None)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to create checks/ [HTTP 500: (empty error message)]"
        );
    }

    #[test]
    fn delete_maps_200_to_changed() {
        let report =
            delete_outcome("abc", "checks/abc", &response(200, Some(r#"{"name":"x"}"#))).unwrap();
        assert!(report.changed);
        assert_eq!(report.message.as_deref(), Some("Check abc deleted"));
        assert_eq!(report.data, json!({"name": "x"}));
    }

    #[test]
    fn delete_maps_404_to_unchanged_success() {
        let report = delete_outcome("abc", "checks/abc", &response(404, None)).unwrap();
        assert!(!report.changed);
        assert_eq!(report.message.as_deref(), Some("Check abc not found"));
    }

    #[test]
    fn delete_maps_other_statuses_to_failure() {
        let err = delete_outcome("abc", "checks/abc", &response(503, None)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to delete checks/abc [HTTP 503: (empty error message)]"
        );
    }

    #[test]
    fn pause_follows_the_delete_mapping() {
        let paused =
            pause_outcome("abc", "checks/abc/pause", &response(200, Some("{}"))).unwrap();
        assert!(paused.changed);
        assert_eq!(paused.message.as_deref(), Some("Check abc paused"));

        let missing = pause_outcome("abc", "checks/abc/pause", &response(404, None)).unwrap();
        assert!(!missing.changed);

        let err = pause_outcome("abc", "checks/abc/pause", &response(400, None)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to pause checks/abc/pause"));
    }

    // Nothing listens on port 1: a dry-run that touched the network would
    // come back as a transport failure, not a skipped success.
    #[test]
    fn dry_run_never_touches_the_network() {
        let client = ApiClient::new(&Config {
            api_token: "t".to_string(),
            api_url: "http://127.0.0.1:1".to_string(),
            timeout: 1,
        });
        let checks = Checks::dry_run(&client);
        assert_eq!(checks.create(&CheckRequest::default()).unwrap(), Report::skipped());
        assert_eq!(checks.delete("abc").unwrap(), Report::skipped());
        assert_eq!(checks.pause("abc").unwrap(), Report::skipped());
    }
}
