//! Scenario runner
//!
//! Executes every canonical chain as an independent scenario. A failing
//! scenario is recorded and the run moves on to the next one; only the
//! affected scenario terminates, never the whole run.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::chains;
use crate::client::AuthClient;
use crate::config::HarnessConfig;
use crate::error::{FailureClass, ProbeError};

/// Result of one scenario.
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub result: Result<(), ProbeError>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregated result of a full run.
#[derive(Debug)]
pub struct RunReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(ScenarioOutcome::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    /// One line per scenario, with contract and infrastructure failures
    /// labeled distinctly.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for o in &self.outcomes {
            let line = match &o.result {
                Ok(()) => format!("PASS  {}\n", o.name),
                Err(e) => {
                    let label = match e.class() {
                        FailureClass::Contract => "FAIL ",
                        FailureClass::Infrastructure => "ERROR",
                    };
                    format!("{} {}: {}\n", label, o.name, e)
                }
            };
            out.push_str(&line);
        }
        let failed = self.failures().count();
        out.push_str(&format!(
            "{} scenarios, {} passed, {} failed\n",
            self.outcomes.len(),
            self.outcomes.len() - failed,
            failed
        ));
        out
    }
}

/// Names of the canonical scenarios, in execution order.
pub const SCENARIOS: &[&str] = &[
    "heartbeat",
    "signin-logout",
    "signin-list-users",
    "signin-upload-avatar",
    "signin-fetch-avatar",
    "signin-add-user",
    "signin-add-duplicate-user",
];

fn record(
    outcomes: &mut Vec<ScenarioOutcome>,
    name: &'static str,
    result: Result<(), ProbeError>,
) {
    match &result {
        Ok(()) => info!(scenario = name, "passed"),
        Err(e) => error!(scenario = name, error = %e, "failed"),
    }
    outcomes.push(ScenarioOutcome { name, result });
}

/// Run every canonical chain against the configured deployment.
///
/// `avatar` is the image file uploaded by the avatar scenario. Scenarios
/// share nothing but the immutable config: each signs in on its own, so a
/// failure in one cannot poison another.
pub async fn run_all(config: &HarnessConfig, avatar: &Path) -> RunReport {
    let client = AuthClient::new(config.clone());
    let mut outcomes = Vec::new();

    record(&mut outcomes, "heartbeat", chains::heartbeat(&client).await);
    record(
        &mut outcomes,
        "signin-logout",
        chains::signin_logout(&client).await,
    );
    record(
        &mut outcomes,
        "signin-list-users",
        chains::signin_list_users(&client).await,
    );
    record(
        &mut outcomes,
        "signin-upload-avatar",
        chains::signin_upload_avatar(&client, avatar).await,
    );
    record(
        &mut outcomes,
        "signin-fetch-avatar",
        chains::signin_fetch_avatar(&client).await,
    );
    record(
        &mut outcomes,
        "signin-add-user",
        chains::signin_add_user(&client).await,
    );
    record(
        &mut outcomes,
        "signin-add-duplicate-user",
        chains::signin_add_duplicate_user(&client).await,
    );

    RunReport { outcomes }
}

/// Write the embedded avatar fixture to a temp file and return both the
/// guard and the path. The file lives as long as the guard does.
pub fn default_avatar() -> Result<(tempfile::NamedTempFile, PathBuf), ProbeError> {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new()
        .map_err(|e| ProbeError::Fixture(format!("cannot create avatar fixture: {}", e)))?;
    file.write_all(crate::fixtures::AVATAR_PNG)
        .map_err(|e| ProbeError::Fixture(format!("cannot write avatar fixture: {}", e)))?;
    let path = file.path().to_path_buf();
    Ok((file, path))
}
