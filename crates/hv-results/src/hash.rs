//! Content-based hashing for calculation request identity.
//!
//! Two requests built from equal specifications share an id, so a response
//! can be matched against the form state that is current when it arrives.

use hv_project::ProjectSpecification;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex digits, for log lines.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn compute_request_id(spec: &ProjectSpecification) -> RequestId {
    let mut hasher = Sha256::new();

    let spec_json = serde_json::to_string(spec).unwrap_or_default();
    hasher.update(spec_json.as_bytes());

    let result = hasher.finalize();
    RequestId(format!("{:x}", result))
}
