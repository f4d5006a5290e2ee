// src/job.rs
// =============================================================================
// One batch run, start to finish:
//
//   seed list -> dispatcher -> (N x fetch + extract) -> output file
//
// Fatal problems (bad config, unreadable seed list, unwritable output,
// client construction) abort the run with an error. Per-seed problems are
// logged by the fetch layer and simply leave that seed out of the output.
// =============================================================================

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

use crate::config::JobConfig;
use crate::fetch::{build_client, dispatch};
use crate::output::write_results;
use crate::seeds::load_seeds;

/// What a finished run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSummary {
    pub seeds: usize,
    pub urls_written: usize,
}

pub async fn run_job(config: &JobConfig) -> Result<JobSummary> {
    config.validate().context("invalid configuration")?;

    let seeds = load_seeds(&config.input)?;
    let seed_count = seeds.len();
    info!(
        "loaded {} seed(s) from {}",
        seed_count,
        config.input.display()
    );

    // Truncate the output up front so a run never leaves stale results behind
    let file = File::create(&config.output)
        .with_context(|| format!("failed to create output file {}", config.output.display()))?;
    let mut writer = BufWriter::new(file);

    let client = build_client(config.max_connections, config.request_timeout)
        .context("failed to build HTTP client")?;
    let extractor = config.extractor();

    let results = dispatch(
        &client,
        seeds,
        extractor.as_ref(),
        config.dispatch_options(),
    )
    .await;

    let urls_written = write_results(&mut writer, &results)
        .and_then(|n| writer.flush().map(|_| n))
        .with_context(|| format!("failed to write {}", config.output.display()))?;

    info!(
        "wrote {} URL(s) to {}",
        urls_written,
        config.output.display()
    );

    Ok(JobSummary {
        seeds: seed_count,
        urls_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigOverrides, Platform};
    use crate::test_server::{refused_url, serve, Route};
    use std::fs;
    use std::path::Path;
    use std::time::Duration;

    fn config_in(dir: &Path, platform: Platform, seeds: &[String]) -> JobConfig {
        let input = dir.join("seeds.urls");
        fs::write(&input, seeds.join("\n")).unwrap();

        let mut config = JobConfig::for_platform(platform);
        config.apply(ConfigOverrides {
            input: Some(input),
            output: Some(dir.join("out.txt")),
            launch_delay_ms: Some(0),
            request_timeout_secs: Some(10),
            ..ConfigOverrides::default()
        });
        config
    }

    #[tokio::test]
    async fn test_pdf_job_skips_unreachable_seed() {
        let base = serve(vec![("/a", Route::html(r#"<a href="/f.pdf">PDF</a>"#))]).await;
        let seeds = vec![format!("{}/a", base), refused_url("/b").await];

        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), Platform::PdfLinks, &seeds);

        let summary = run_job(&config).await.unwrap();

        assert_eq!(summary, JobSummary { seeds: 2, urls_written: 1 });
        let output = fs::read_to_string(&config.output).unwrap();
        assert_eq!(output, "http://elar.uspu.ru/f.pdf\n");
    }

    #[tokio::test]
    async fn test_viewer_job_keeps_seed_order() {
        let base = serve(vec![
            (
                "/issue/1",
                Route::html(
                    r#"<ul class="slidee"><li data-page="10"><img src="/small_images/10.jpg"></li></ul>"#,
                )
                .delayed(Duration::from_millis(200)),
            ),
            (
                "/issue/2",
                Route::html(r#"<a data-type="picture" data-picture-id="3">Photo</a>"#),
            ),
            ("/issue/3", Route::status(500)),
        ])
        .await;
        let seeds = vec![
            format!("{}/issue/1", base),
            format!("{}/issue/2", base),
            format!("{}/issue/3", base),
        ];

        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), Platform::ViewerResources, &seeds);

        run_job(&config).await.unwrap();

        let output = fs::read_to_string(&config.output).unwrap();
        assert_eq!(
            output,
            "https://libraria.ua/big_images/10.jpg\n\
             https://libraria.ua/page?get_page=10\n\
             https://libraria.ua/page?get_item=picture&id=3\n"
        );
    }

    #[tokio::test]
    async fn test_rerun_overwrites_output() {
        let base = serve(vec![("/a", Route::html(r#"<a href="/f.pdf">PDF</a>"#))]).await;
        let seeds = vec![format!("{}/a", base)];

        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), Platform::PdfLinks, &seeds);

        run_job(&config).await.unwrap();
        let first = fs::read(&config.output).unwrap();
        run_job(&config).await.unwrap();
        let second = fs::read(&config.output).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_seed_list_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = JobConfig::for_platform(Platform::PdfLinks);
        config.input = dir.path().join("missing.urls");
        config.output = dir.path().join("out.txt");

        assert!(run_job(&config).await.is_err());
        // Nothing was written
        assert!(!config.output.exists());
    }

    #[tokio::test]
    async fn test_invalid_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), Platform::PdfLinks, &[]);
        config.max_connections = 0;

        let err = run_job(&config).await.unwrap_err();
        assert!(err.to_string().contains("invalid configuration"));
    }
}
