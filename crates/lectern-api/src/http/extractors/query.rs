//! Query parameter extractors.

use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use serde::Deserialize;

use lectern_types::chat::DemoVariant;

/// Query parameters for the chat endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct DemoQuery {
    /// Prompt strategy: `1`, `2`, `Demo01` or `Demo02` (case-insensitive).
    #[serde(alias = "demoToRun")]
    pub demo: Option<String>,
}

impl DemoQuery {
    /// The selected strategy; unknown or missing values select Demo01.
    pub fn variant(&self) -> DemoVariant {
        DemoVariant::from_query(self.demo.as_deref())
    }
}

/// Resolve the strategy from a possibly rejected query string.
///
/// A query that cannot be decoded at all (repeated keys, for example)
/// selects Demo01 like any other unrecognised value.
pub fn demo_variant(query: Result<Query<DemoQuery>, QueryRejection>) -> DemoVariant {
    match query {
        Ok(Query(query)) => query.variant(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "undecodable chat query, using Demo01");
            DemoVariant::default()
        }
    }
}
