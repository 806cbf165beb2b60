use lanequote_core::config::{AppConfig, LoadOptions};
use lanequote_core::geo::GeocodeTable;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed: {error}\"}}"
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_routing_credential(&config));
            checks.push(check_llm_credential(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
        }
    }

    checks.push(check_geocode_table());

    let overall_status = if checks.iter().any(|check| check.status == CheckStatus::Fail) {
        CheckStatus::Fail
    } else {
        CheckStatus::Pass
    };
    let summary = match overall_status {
        CheckStatus::Pass => "all checks passed".to_string(),
        _ => "one or more checks failed".to_string(),
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_routing_credential(config: &AppConfig) -> DoctorCheck {
    if config.routing.is_configured() {
        DoctorCheck {
            name: "routing_credential",
            status: CheckStatus::Pass,
            details: "mapbox token present, live distances and route maps enabled".to_string(),
        }
    } else {
        DoctorCheck {
            name: "routing_credential",
            status: CheckStatus::Skipped,
            details: "no mapbox token, quotes will use great-circle fallback distances"
                .to_string(),
        }
    }
}

fn check_llm_credential(config: &AppConfig) -> DoctorCheck {
    if config.llm.api_key.is_some() {
        DoctorCheck {
            name: "llm_credential",
            status: CheckStatus::Pass,
            details: format!("api key present for model `{}`", config.llm.model),
        }
    } else {
        DoctorCheck {
            name: "llm_credential",
            status: CheckStatus::Skipped,
            details: "no llm api key, email extraction unavailable".to_string(),
        }
    }
}

fn check_geocode_table() -> DoctorCheck {
    let table = GeocodeTable::builtin();
    if table.is_empty() {
        DoctorCheck {
            name: "geocode_table",
            status: CheckStatus::Fail,
            details: "built-in geocode table is empty".to_string(),
        }
    } else {
        DoctorCheck {
            name: "geocode_table",
            status: CheckStatus::Pass,
            details: format!("{} postal codes loaded", table.len()),
        }
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = vec![format!("doctor: {}", report.summary)];
    for check in &report.checks {
        let status = match check.status {
            CheckStatus::Pass => "pass",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("  [{status}] {} - {}", check.name, check.details));
    }
    lines.join("\n")
}
