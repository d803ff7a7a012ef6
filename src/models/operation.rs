use serde_json::Value;
use std::fmt;

/// HTTP methods recognised as operation keys under a path item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    /// Parse a path-item key, case-insensitively. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(key))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Methods whose samplers carry a synthesized body
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON request-body schema with its references already followed.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBodySchema {
    /// The literal (non-reference) schema
    pub schema: Value,
    /// Pointers followed to reach `schema`, outermost first
    pub via: Vec<String>,
}

/// One (path, method) pair found under `paths`
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    pub path: String,
    pub method: HttpMethod,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub request_body_schema: Option<RequestBodySchema>,
}

impl OperationDescriptor {
    /// Display name: operationId, else summary, else "METHOD path".
    /// Blank values are skipped.
    pub fn display_name(&self) -> String {
        let present = |s: &&str| !s.trim().is_empty();
        self.operation_id
            .as_deref()
            .filter(present)
            .or(self.summary.as_deref().filter(present))
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} {}", self.method, self.path))
    }
}
