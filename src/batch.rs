use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, info_span, Instrument};

use crate::error::{FinderError, Result};
use crate::profile::{LookupStatus, ProfileMatcher, ResultRecord};
use crate::query::build_search_query;
use crate::{LookupRequest, TARGET_BATCH};

pub const DEFAULT_WORKERS: usize = 4;

/// Settings that apply to every entry in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub preferred_language: Option<String>,
    pub worker_limit: usize,
}

impl BatchConfig {
    pub fn new(preferred_language: Option<String>, worker_limit: usize) -> Result<Self> {
        if worker_limit == 0 {
            return Err(FinderError::InvalidWorkerCount(worker_limit));
        }
        Ok(Self {
            preferred_language: preferred_language.filter(|l| !l.trim().is_empty()),
            worker_limit,
        })
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            preferred_language: None,
            worker_limit: DEFAULT_WORKERS,
        }
    }
}

/// Per-status tally of a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub success: usize,
    pub ambiguous: usize,
    pub not_found: usize,
    pub error: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[ResultRecord]) -> Self {
        let mut summary = BatchSummary {
            total: records.len(),
            ..Default::default()
        };
        for record in records {
            match record.status {
                LookupStatus::Success => summary.success += 1,
                LookupStatus::Ambiguous => summary.ambiguous += 1,
                LookupStatus::NotFound => summary.not_found += 1,
                LookupStatus::Error => summary.error += 1,
            }
        }
        summary
    }
}

/// One unit of work: describe the query, resolve it, shape the record.
pub fn process_entry(
    request: &LookupRequest,
    preferred_language: Option<&str>,
    matcher: &ProfileMatcher,
) -> ResultRecord {
    let search_query = build_search_query(
        &request.name,
        request.company.as_deref(),
        request.position.as_deref(),
        preferred_language,
    );
    debug!(target: TARGET_BATCH, "Search query for '{}': {}", request.name, search_query);

    let outcome = matcher.resolve(
        &request.name,
        request.company.as_deref(),
        preferred_language,
    );

    ResultRecord::from_outcome(&request.name, search_query, &outcome, preferred_language)
}

/// Process every request on the tokio runtime with at most
/// `config.worker_limit` lookups in flight.
///
/// Always returns exactly one record per request. Records arrive in
/// completion order, not input order. A unit of work that panics is
/// reported as an `error` record rather than failing the batch.
pub async fn run_batch(
    requests: Vec<LookupRequest>,
    config: &BatchConfig,
    matcher: ProfileMatcher,
) -> Vec<ResultRecord> {
    let total = requests.len();
    let semaphore = Arc::new(Semaphore::new(config.worker_limit));
    let mut pending = FuturesUnordered::new();

    info!(
        target: TARGET_BATCH,
        "Processing {} entries with up to {} workers", total, config.worker_limit
    );

    for request in requests {
        let semaphore = Arc::clone(&semaphore);
        let matcher = matcher.clone();
        let language = config.preferred_language.clone();
        let name = request.name.clone();
        let company = request.company.clone();
        let span = info_span!("entry", name = %request.name, line = request.line);

        let handle = tokio::spawn(
            async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|err| format!("worker pool closed: {}", err))?;
                Ok::<_, String>(process_entry(&request, language.as_deref(), &matcher))
            }
            .instrument(span),
        );

        pending.push(async move { (name, company, handle.await) });
    }

    let mut results = Vec::with_capacity(total);
    while let Some((name, company, joined)) = pending.next().await {
        let company_suffix = company
            .as_deref()
            .map(|c| format!(" @ {}", c))
            .unwrap_or_default();

        let record = match joined {
            Ok(Ok(record)) => {
                info!(
                    target: TARGET_BATCH,
                    "Processed '{}'{} -> status={}", name, company_suffix, record.status
                );
                record
            }
            Ok(Err(reason)) => {
                error!(target: TARGET_BATCH, "Error while processing '{}': {}", name, reason);
                ResultRecord::failed(&name)
            }
            Err(join_err) => {
                error!(target: TARGET_BATCH, "Error while processing '{}': {}", name, join_err);
                ResultRecord::failed(&name)
            }
        };
        results.push(record);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ProfileRecord, ProfileSource, SourceError, StaticProfileSource};
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    /// Counts how many lookups run at the same time
    struct GaugeSource {
        inner: StaticProfileSource,
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    impl ProfileSource for GaugeSource {
        fn profiles(&self) -> std::result::Result<&[ProfileRecord], SourceError> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            self.active.fetch_sub(1, Ordering::SeqCst);
            self.inner.profiles()
        }
    }

    struct PanicSource;

    impl ProfileSource for PanicSource {
        fn profiles(&self) -> std::result::Result<&[ProfileRecord], SourceError> {
            panic!("reference data corrupted");
        }
    }

    fn requests(names: &[&str]) -> Vec<LookupRequest> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| LookupRequest::new(n).with_line(i + 1))
            .collect()
    }

    #[test]
    fn test_config_rejects_zero_workers() {
        assert!(matches!(
            BatchConfig::new(None, 0),
            Err(FinderError::InvalidWorkerCount(0))
        ));
        let config = BatchConfig::new(Some("  ".into()), 2).unwrap();
        assert!(config.preferred_language.is_none());
    }

    #[test]
    fn test_process_entry_not_found_uses_preferred_language() {
        let matcher = ProfileMatcher::builtin();
        let request = LookupRequest::new("Nobody Special").with_company("Initech");
        let record = process_entry(&request, Some("German"), &matcher);

        assert_eq!(record.status, LookupStatus::NotFound);
        assert_eq!(record.language.as_deref(), Some("German"));
        assert!(record.linkedin_url.is_none());
        assert!(record.position.is_none());
        assert!(record.company.is_none());
        assert_eq!(
            record.search_query,
            "professional profile search: Nobody Special \"Initech\" language:German"
        );

        let record = process_entry(&request, None, &matcher);
        assert!(record.language.is_none());
    }

    #[tokio::test]
    async fn test_one_record_per_request() {
        let names = [
            "John Malkovich",
            "Jane Doe",
            "Carlos García",
            "Nobody Special",
            "Jane Doe",
        ];
        let config = BatchConfig::new(Some("English".into()), 2).unwrap();
        let results = run_batch(requests(&names), &config, ProfileMatcher::builtin()).await;

        assert_eq!(results.len(), names.len());
        let mut got: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        let mut want = names.to_vec();
        got.sort();
        want.sort();
        assert_eq!(got, want);

        let summary = BatchSummary::from_records(&results);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.success, 4);
        assert_eq!(summary.not_found, 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let results = run_batch(Vec::new(), &BatchConfig::default(), ProfileMatcher::builtin()).await;
        assert!(results.is_empty());
        assert_eq!(BatchSummary::from_records(&results), BatchSummary::default());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_worker_limit_bounds_concurrency() {
        let source = Arc::new(GaugeSource {
            inner: StaticProfileSource::builtin(),
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let matcher = ProfileMatcher::new(source.clone());
        let names: Vec<String> = (0..12).map(|i| format!("Person {}", i)).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let config = BatchConfig::new(None, 2).unwrap();
        let results = run_batch(requests(&names), &config, matcher).await;

        assert_eq!(results.len(), 12);
        assert!(source.peak.load(Ordering::SeqCst) <= 2);
        assert!(source.peak.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn test_panicking_lookup_becomes_error_record() {
        let matcher = ProfileMatcher::new(Arc::new(PanicSource));
        let config = BatchConfig::new(Some("English".into()), 3).unwrap();
        let results = run_batch(requests(&["Jane Doe", "Alice"]), &config, matcher).await;

        assert_eq!(results.len(), 2);
        let names: BTreeSet<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, BTreeSet::from(["Alice", "Jane Doe"]));
        for record in &results {
            assert_eq!(record.status, LookupStatus::Error);
            assert_eq!(record.search_query, format!("lookup:{}", record.name));
            assert!(record.language.is_none());
            assert!(record.company.is_none());
        }
    }

    #[tokio::test]
    async fn test_ambiguous_choice_is_stable_across_runs() {
        let source = Arc::new(StaticProfileSource::new(vec![
            ProfileRecord::new("John Malkovich")
                .with_company("Malkovich Enterprises")
                .with_url("https://www.linkedin.com/in/john-malkovich-1"),
            ProfileRecord::new("John Malkovich")
                .with_company("Other Co")
                .with_url("https://www.linkedin.com/in/john-malkovich-2"),
        ]));
        let matcher = ProfileMatcher::new(source);
        let config = BatchConfig::new(None, 4).unwrap();

        for _ in 0..5 {
            let results = run_batch(requests(&["John Malkovich"]), &config, matcher.clone()).await;
            assert_eq!(results[0].status, LookupStatus::Ambiguous);
            assert_eq!(
                results[0].linkedin_url.as_deref(),
                Some("https://www.linkedin.com/in/john-malkovich-1")
            );
            assert_eq!(results[0].company.as_deref(), Some("Malkovich Enterprises"));
        }
    }
}
