//! Scenario catalog
//!
//! The parametrized table behind the data-independent liveness checks, plus
//! the suffix used to probe that unknown paths 404.

use crate::config::HarnessConfig;
use crate::contract::ExpectedContract;

/// Which service a catalog entry targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Heartbeat,
    Auth,
}

/// One liveness probe: a path on a target service and its expected contract.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub target: Target,
    pub path: &'static str,
    pub expect: ExpectedContract,
}

impl CatalogEntry {
    pub fn url(&self, config: &HarnessConfig) -> String {
        match self.target {
            Target::Heartbeat => config.heartbeat_url(self.path),
            Target::Auth => config.auth_url(self.path),
        }
    }
}

/// The liveness probes: each known heartbeat endpoint must answer 200 (the
/// bare service with its documented body), and the same path with an
/// invalid `_wrongurl` suffix appended must answer 404.
pub fn heartbeat_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            name: "heartbeat service liveness",
            target: Target::Heartbeat,
            path: "/heartbeat",
            expect: ExpectedContract::with_fields(
                200,
                vec![("status", "200"), ("title", "Health OK")],
            ),
        },
        CatalogEntry {
            name: "heartbeat service unknown path",
            target: Target::Heartbeat,
            path: "/heartbeat_wrongurl",
            expect: ExpectedContract::status(404),
        },
        CatalogEntry {
            name: "auth service liveness",
            target: Target::Auth,
            path: "/heartbeat",
            expect: ExpectedContract::status(200),
        },
        CatalogEntry {
            name: "auth service unknown path",
            target: Target::Auth,
            path: "/heartbeat_wrongurl",
            expect: ExpectedContract::status(404),
        },
    ]
}
