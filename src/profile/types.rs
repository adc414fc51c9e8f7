use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference profile. Name is the only key and it is not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(rename = "linkedinUrl", default)]
    pub profile_url: Option<String>,

    #[serde(default)]
    pub position: Option<String>,

    #[serde(default)]
    pub language: Option<String>,
}

impl ProfileRecord {
    pub fn new(name: &str) -> Self {
        ProfileRecord {
            name: name.to_string(),
            company: None,
            profile_url: None,
            position: None,
            language: None,
        }
    }

    pub fn with_company(mut self, company: &str) -> Self {
        self.company = Some(company.to_string());
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.profile_url = Some(url.to_string());
        self
    }

    pub fn with_position(mut self, position: &str) -> Self {
        self.position = Some(position.to_string());
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }
}

/// Terminal state of a single lookup, as written to the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Success,
    Ambiguous,
    NotFound,
    Error,
}

impl fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupStatus::Success => write!(f, "success"),
            LookupStatus::Ambiguous => write!(f, "ambiguous"),
            LookupStatus::NotFound => write!(f, "not_found"),
            LookupStatus::Error => write!(f, "error"),
        }
    }
}

/// What the matcher decided for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Success(ProfileRecord),

    // First match in reference order, plus how many records tied
    Ambiguous {
        chosen: ProfileRecord,
        candidates: usize,
    },

    NotFound,

    // The profile source itself failed
    Error(String),
}

impl ResolutionOutcome {
    pub fn status(&self) -> LookupStatus {
        match self {
            ResolutionOutcome::Success(_) => LookupStatus::Success,
            ResolutionOutcome::Ambiguous { .. } => LookupStatus::Ambiguous,
            ResolutionOutcome::NotFound => LookupStatus::NotFound,
            ResolutionOutcome::Error(_) => LookupStatus::Error,
        }
    }

    /// The record to report, if any was resolved
    pub fn record(&self) -> Option<&ProfileRecord> {
        match self {
            ResolutionOutcome::Success(record) => Some(record),
            ResolutionOutcome::Ambiguous { chosen, .. } => Some(chosen),
            ResolutionOutcome::NotFound | ResolutionOutcome::Error(_) => None,
        }
    }
}

/// One line of the output report. Field order matches the JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub name: String,
    pub linkedin_url: Option<String>,
    pub position: Option<String>,
    pub company: Option<String>,
    pub language: Option<String>,
    pub search_query: String,
    pub status: LookupStatus,
}

impl ResultRecord {
    /// Build a record from a matcher outcome. Language falls back to the
    /// preferred language when nothing resolved or the profile has none.
    pub fn from_outcome(
        name: &str,
        search_query: String,
        outcome: &ResolutionOutcome,
        preferred_language: Option<&str>,
    ) -> Self {
        if let ResolutionOutcome::Error(_) = outcome {
            return ResultRecord {
                name: name.to_string(),
                linkedin_url: None,
                position: None,
                company: None,
                language: None,
                search_query,
                status: LookupStatus::Error,
            };
        }

        let profile = outcome.record();
        ResultRecord {
            name: name.to_string(),
            linkedin_url: profile.and_then(|p| p.profile_url.clone()),
            position: profile.and_then(|p| p.position.clone()),
            company: profile.and_then(|p| p.company.clone()),
            language: profile
                .and_then(|p| p.language.clone())
                .or_else(|| preferred_language.map(str::to_string)),
            search_query,
            status: outcome.status(),
        }
    }

    /// Placeholder for an entry whose unit of work died before producing an
    /// outcome.
    pub fn failed(name: &str) -> Self {
        ResultRecord {
            name: name.to_string(),
            linkedin_url: None,
            position: None,
            company: None,
            language: None,
            search_query: format!("lookup:{}", name),
            status: LookupStatus::Error,
        }
    }
}
