use super::OperationDescriptor;
use std::fmt;

/// An operation paired with its serialized request body, if it sends one
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedOperation {
    pub descriptor: OperationDescriptor,
    pub body: Option<String>,
}

/// A rendered test plan.
///
/// This is plain text owned by the caller; nothing in it refers back to the
/// compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPlanDocument(String);

impl TestPlanDocument {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TestPlanDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TestPlanDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
