use std::sync::Arc;
use tracing::{info, warn};

use crate::batch::{run_batch, BatchSummary};
use crate::entries::load_entries;
use crate::error::Result;
use crate::output::write_results;
use crate::profile::{ProfileMatcher, StaticProfileSource};
use crate::settings::RunConfig;

/// Build the matcher for a run: the configured profiles file if there is
/// one, otherwise the built-in sample collection.
pub fn build_matcher(config: &RunConfig) -> Result<ProfileMatcher> {
    let source = match &config.profiles_path {
        Some(path) => StaticProfileSource::from_json_file(path)?,
        None => StaticProfileSource::builtin(),
    };
    Ok(ProfileMatcher::new(Arc::new(source)))
}

/// Load entries, resolve them all, then write the report once.
///
/// Missing input or an unwritable destination aborts the run; problems with
/// individual entries only show up as `error` records in the report.
pub async fn run(config: &RunConfig) -> Result<BatchSummary> {
    info!(
        "Configuration: input={}, output={}, language={:?}, workers={}",
        config.input_path.display(),
        config.output_path.display(),
        config.batch.preferred_language,
        config.batch.worker_limit
    );

    let matcher = build_matcher(config)?;
    let entries = load_entries(&config.input_path)?;

    if entries.is_empty() {
        warn!("No valid entries found in {}", config.input_path.display());
    }

    let results = run_batch(entries, &config.batch, matcher).await;
    write_results(&config.output_path, &results)?;

    let summary = BatchSummary::from_records(&results);
    info!(
        "Processing completed. Success: {}, Ambiguous: {}, Not found: {}, Error: {}, Total: {}",
        summary.success, summary.ambiguous, summary.not_found, summary.error, summary.total
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchConfig;
    use crate::error::FinderError;
    use crate::profile::{LookupStatus, ResultRecord};
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn config_in(dir: &Path, language: Option<&str>) -> RunConfig {
        RunConfig {
            input_path: dir.join("names.txt"),
            output_path: dir.join("out").join("results.json"),
            log_path: dir.join("run.log"),
            profiles_path: None,
            batch: BatchConfig::new(language.map(str::to_string), 2).unwrap(),
        }
    }

    fn read_results(path: &Path) -> Vec<ResultRecord> {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_run_writes_every_input_name() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path(), Some("English"));
        fs::write(
            &config.input_path,
            "# people to find\n\
             John Malkovich\n\
             Jane Doe|Acme Corp|Head of Growth\n\
             \n\
             |Orphan Co\n\
             Carlos García|DataVision\n\
             Nobody Special|Initech|Engineer|Backend\n",
        )
        .unwrap();

        let summary = run(&config).await.unwrap();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.not_found, 1);

        let results = read_results(&config.output_path);
        let names: BTreeSet<String> = results.iter().map(|r| r.name.clone()).collect();
        let expected: BTreeSet<String> = [
            "John Malkovich",
            "Jane Doe",
            "Carlos García",
            "Nobody Special",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(names, expected);

        let missing = results
            .iter()
            .find(|r| r.name == "Nobody Special")
            .unwrap();
        assert_eq!(missing.status, LookupStatus::NotFound);
        assert_eq!(missing.language.as_deref(), Some("English"));
        assert_eq!(
            missing.search_query,
            "professional profile search: Nobody Special \"Initech\" Engineer|Backend language:English"
        );
    }

    #[tokio::test]
    async fn test_empty_input_still_writes_report() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path(), None);
        fs::write(&config.input_path, "# nothing here\n\n").unwrap();

        let summary = run(&config).await.unwrap();
        assert_eq!(summary.total, 0);
        assert!(read_results(&config.output_path).is_empty());
    }

    #[tokio::test]
    async fn test_missing_input_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path(), None);

        let err = run(&config).await.unwrap_err();
        assert!(matches!(err, FinderError::InputNotFound { .. }));
        assert!(!config.output_path.exists());
    }

    #[tokio::test]
    async fn test_profiles_file_replaces_builtin_data() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(dir.path(), None);
        let profiles = dir.path().join("profiles.json");
        fs::write(
            &profiles,
            r#"[{"name": "Grace Hopper", "company": "US Navy", "linkedinUrl": "https://example.com/grace", "position": "Rear Admiral", "language": "English"}]"#,
        )
        .unwrap();
        config.profiles_path = Some(profiles);
        fs::write(&config.input_path, "Grace Hopper\nJane Doe\n").unwrap();

        run(&config).await.unwrap();

        let results = read_results(&config.output_path);
        let grace = results.iter().find(|r| r.name == "Grace Hopper").unwrap();
        assert_eq!(grace.status, LookupStatus::Success);
        assert_eq!(grace.linkedin_url.as_deref(), Some("https://example.com/grace"));
        let jane = results.iter().find(|r| r.name == "Jane Doe").unwrap();
        assert_eq!(jane.status, LookupStatus::NotFound);
    }
}
