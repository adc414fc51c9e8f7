use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::source::{ProfileSource, StaticProfileSource};
use super::types::{ProfileRecord, ResolutionOutcome};
use super::TARGET_LOOKUP;

/// Resolves a person against a reference collection using a strict pass
/// (name plus whichever of company/language were supplied) followed by a
/// name-only fallback when the strict pass finds nothing.
///
/// Ties are broken by reference order: the first matching record wins, so
/// the result is stable for a given dataset.
#[derive(Clone)]
pub struct ProfileMatcher {
    source: Arc<dyn ProfileSource>,
}

impl ProfileMatcher {
    pub fn new(source: Arc<dyn ProfileSource>) -> Self {
        Self { source }
    }

    pub fn builtin() -> Self {
        Self::new(Arc::new(StaticProfileSource::builtin()))
    }

    pub fn resolve(
        &self,
        name: &str,
        company: Option<&str>,
        language: Option<&str>,
    ) -> ResolutionOutcome {
        debug!(
            target: TARGET_LOOKUP,
            "Looking up profile: name={:?}, company={:?}, language={:?}",
            name, company, language
        );

        let profiles = match self.source.profiles() {
            Ok(profiles) => profiles,
            Err(err) => {
                error!(target: TARGET_LOOKUP, "Lookup for {:?} failed: {}", name, err);
                return ResolutionOutcome::Error(err.to_string());
            }
        };

        let matches = find_matches(profiles, name, company, language);

        match matches.as_slice() {
            [] => {
                info!(target: TARGET_LOOKUP, "No profile found for {:?}", name);
                ResolutionOutcome::NotFound
            }
            [only] => {
                info!(
                    target: TARGET_LOOKUP,
                    "Profile match for {:?} -> {}",
                    name,
                    only.profile_url.as_deref().unwrap_or("<no url>")
                );
                ResolutionOutcome::Success((*only).clone())
            }
            [first, ..] => {
                warn!(
                    target: TARGET_LOOKUP,
                    "Multiple profiles ({}) found for {:?}, returning the first match: {}",
                    matches.len(),
                    name,
                    first.profile_url.as_deref().unwrap_or("<no url>")
                );
                ResolutionOutcome::Ambiguous {
                    chosen: (*first).clone(),
                    candidates: matches.len(),
                }
            }
        }
    }
}

/// Case-insensitive, whitespace-trimmed comparison key. Absent is empty.
fn normalize(value: Option<&str>) -> String {
    value.unwrap_or("").trim().to_lowercase()
}

fn find_matches<'a>(
    profiles: &'a [ProfileRecord],
    name: &str,
    company: Option<&str>,
    language: Option<&str>,
) -> Vec<&'a ProfileRecord> {
    let n_name = normalize(Some(name));
    let n_company = normalize(company);
    let n_language = normalize(language);

    let same_name = |profile: &&ProfileRecord| normalize(Some(&profile.name)) == n_name;

    let strict: Vec<&ProfileRecord> = profiles
        .iter()
        .filter(same_name)
        .filter(|p| n_company.is_empty() || normalize(p.company.as_deref()) == n_company)
        .filter(|p| n_language.is_empty() || normalize(p.language.as_deref()) == n_language)
        .collect();

    if !strict.is_empty() {
        return strict;
    }

    // Disambiguators didn't line up with the data; settle for name-only
    debug!(
        target: TARGET_LOOKUP,
        "Strict match failed for {:?}, retrying on name only", name
    );
    profiles.iter().filter(same_name).collect()
}
