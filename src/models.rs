use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an application record. The backend may hand out numeric or
/// string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApplicationId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationId::Number(n) => write!(f, "{}", n),
            ApplicationId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ApplicationId {
    fn from(id: u64) -> Self {
        ApplicationId::Number(id)
    }
}

/// A loan application as served by `/api/applications`.
///
/// Only `id` is required; display fields that are missing on the wire render
/// as empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub loan_amount: Option<f64>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
}

impl Application {
    /// Bare record carrying only an id
    pub fn with_id(id: impl Into<ApplicationId>) -> Self {
        Self {
            id: id.into(),
            company: None,
            first_name: None,
            last_name: None,
            email: None,
            loan_amount: None,
            date_created: None,
            expiry_date: None,
        }
    }

    /// Applicant's full name, `first last`
    pub fn full_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => String::new(),
        }
    }
}
