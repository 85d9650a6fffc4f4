//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `POST /incidents/add` (`?count=`).
#[derive(Debug, Default, Deserialize)]
pub struct GenerateParams {
    pub count: Option<usize>,
}
