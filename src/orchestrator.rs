use anyhow::{bail, Result};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::extract;
use crate::fetch;
use crate::models::Tallies;
use crate::report;
use crate::tally;

pub async fn run_pipeline(output_dir: &str, delay_ms: u64) -> Result<()> {
    let pipeline_start = std::time::Instant::now();
    info!(
        "Pipeline started - output_dir={}, delay_ms={}",
        output_dir, delay_ms
    );

    let out_dir = Path::new(output_dir);
    std::fs::create_dir_all(out_dir.join("characters").join("NER"))?;
    debug!("Output directory: {}", out_dir.display());

    let client = Client::builder().build()?;

    // 1) fetch the index, then every episode page it links
    let fetch_start = std::time::Instant::now();
    let index_html = fetch::fetch_index(&client).await?;
    let slugs = fetch::episode_slugs(&index_html);
    if slugs.is_empty() {
        bail!("No episode links found at {}", fetch::INDEX_URL);
    }
    info!("Episode links discovered - count={}", slugs.len());
    let fetched = fetch::fetch_episodes(
        &client,
        &slugs,
        out_dir,
        Duration::from_millis(delay_ms),
    )
    .await?;
    info!(
        "Episode fetch completed - duration={:.2}s, pages={}",
        fetch_start.elapsed().as_secs_f32(),
        fetched
    );

    // 2) normalize raw pages into records; locations tally here
    let mut tallies = Tallies::new();
    let extract_start = std::time::Instant::now();
    let normalized = extract::extract_all(out_dir, &mut tallies)?;
    info!(
        "Extraction completed - duration={:.2}s, records={}, distinct_locations={}",
        extract_start.elapsed().as_secs_f32(),
        normalized,
        tallies.locations.len()
    );

    // 3) speaker set and line counts over the normalized records
    let tally_start = std::time::Instant::now();
    let records = tally::tally_all(out_dir, &mut tallies)?;
    info!(
        "Speaker tally completed - duration={:.2}s, speakers={}, speaker_lines={}",
        tally_start.elapsed().as_secs_f32(),
        tallies.speakers.len(),
        tallies.speaker_lines.values().sum::<u32>()
    );

    // 4) corpora, word/entity/sentiment summaries, charts, summary.json
    let report_start = std::time::Instant::now();
    report::run_report(out_dir, &records, &tallies)?;
    info!(
        "Report completed - duration={:.2}s",
        report_start.elapsed().as_secs_f32()
    );

    let pipeline_elapsed = pipeline_start.elapsed();
    info!(
        "Pipeline completed successfully - total_duration={:.2}s, episodes={}, speakers={}",
        pipeline_elapsed.as_secs_f32(),
        normalized,
        tallies.speakers.len()
    );
    Ok(())
}
