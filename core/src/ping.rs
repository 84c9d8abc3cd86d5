//! Ping adapter: submit a liveness signal for a check.

use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::response::Response;
use crate::types::{Outcome, Report, Signal};

pub struct Ping<'a> {
    rest: &'a ApiClient,
    dry_run: bool,
}

impl<'a> Ping<'a> {
    pub fn new(rest: &'a ApiClient) -> Self {
        Self {
            rest,
            dry_run: false,
        }
    }

    /// Dry-run variant: reports an empty success without calling the API.
    pub fn dry_run(rest: &'a ApiClient) -> Self {
        Self {
            rest,
            dry_run: true,
        }
    }

    /// Submit `signal` for the check identified by `uuid`.
    ///
    /// The service encodes the success signal as the bare uuid path;
    /// `fail` and `start` are path suffixes.
    pub fn send(&self, uuid: &str, signal: Signal) -> Outcome {
        if self.dry_run {
            return Ok(Report::skipped());
        }
        let response = self.rest.head(&ping_endpoint(uuid, signal));
        ping_outcome(uuid, signal, &response)
    }
}

fn ping_endpoint(uuid: &str, signal: Signal) -> String {
    match signal {
        Signal::Success => uuid.to_string(),
        Signal::Fail | Signal::Start => format!("{uuid}/{}", signal.as_str()),
    }
}

fn ping_outcome(uuid: &str, signal: Signal, response: &Response) -> Outcome {
    let status = response.status_code();
    if status == 200 {
        return Ok(Report::changed(
            format!("Sent {} signal to {uuid}", signal.as_str()),
            json!({}),
        ));
    }
    Err(ApiError::api(format!(
        "Failed to send {} signal to {uuid} [HTTP {status}]",
        signal.as_str(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::{Map, Value};

    fn response(status: i64) -> Response {
        let mut info = Map::new();
        info.insert("status".to_string(), Value::from(status));
        Response::new(Some(String::new()), info)
    }

    #[test]
    fn success_pings_use_the_bare_uuid() {
        assert_eq!(ping_endpoint("abc-123", Signal::Success), "abc-123");
    }

    #[test]
    fn other_signals_are_path_suffixes() {
        assert_eq!(ping_endpoint("abc-123", Signal::Fail), "abc-123/fail");
        assert_eq!(ping_endpoint("abc-123", Signal::Start), "abc-123/start");
    }

    #[test]
    fn a_200_reports_the_signal_as_sent() {
        let report = ping_outcome("abc", Signal::Start, &response(200)).unwrap();
        assert!(report.changed);
        assert_eq!(report.message.as_deref(), Some("Sent start signal to abc"));
    }

    #[test]
    fn other_statuses_fail_with_the_status_code() {
        let err = ping_outcome("abc", Signal::Fail, &response(404)).unwrap_err();
        assert_eq!(err.to_string(), "Failed to send fail signal to abc [HTTP 404]");
    }

    #[test]
    fn dry_run_never_touches_the_network() {
        let client = ApiClient::new(&Config {
            api_token: "t".to_string(),
            api_url: "http://127.0.0.1:1".to_string(),
            timeout: 1,
        });
        let ping = Ping::dry_run(&client);
        assert_eq!(ping.send("abc", Signal::Success).unwrap(), Report::skipped());
    }
}
