use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Index page listing every episode transcript for the series.
pub const INDEX_URL: &str = "https://transcripts.fandom.com/wiki/Stranger_Things";
/// Joined with a slug to address one episode page.
pub const WIKI_BASE: &str = "https://transcripts.fandom.com/wiki/";
/// Identifying header sent with every request.
pub const USER_AGENT: &str = "transcript_vibes/0.1 (single pass, throttled)";

/// Episode anchors are recognized by this title-attribute prefix,
/// compared case-insensitively.
const TITLE_PREFIX: &str = "Ch";

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href][title]").unwrap());

async fn get_text(client: &Client, url: &str) -> Result<String> {
    debug!("Fetching page - url={}", url);
    let body = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .with_context(|| format!("Request failed for {}", url))?
        .error_for_status()
        .with_context(|| format!("HTTP error for {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading body of {}", url))?;
    Ok(body)
}

/// Fetches the series index page.
pub async fn fetch_index(client: &Client) -> Result<String> {
    let start = std::time::Instant::now();
    let body = get_text(client, INDEX_URL).await?;
    info!(
        "Index fetch completed - duration={:.2}s, bytes={}",
        start.elapsed().as_secs_f32(),
        body.len()
    );
    Ok(body)
}

/// Pulls episode slugs out of the index page: every `/wiki/` anchor
/// whose title starts with the chapter prefix, in document order.
/// Duplicates are kept; the fetch loop mirrors the page exactly.
pub fn episode_slugs(index_html: &str) -> Vec<String> {
    let doc = Html::parse_document(index_html);
    let mut slugs = Vec::new();
    for anchor in doc.select(&ANCHOR_SELECTOR) {
        let (Some(href), Some(title)) = (anchor.value().attr("href"), anchor.value().attr("title"))
        else {
            continue;
        };
        let Some(slug) = href.strip_prefix("/wiki/") else {
            continue;
        };
        if slug.is_empty() {
            continue;
        }
        let matches_prefix = title
            .get(..TITLE_PREFIX.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(TITLE_PREFIX));
        if matches_prefix {
            slugs.push(slug.to_string());
        }
    }
    slugs
}

/// Downloads each episode page into `out_dir` as `<slug>.html`, pausing
/// `delay` after every request. Returns the number of pages written.
pub async fn fetch_episodes(
    client: &Client,
    slugs: &[String],
    out_dir: &Path,
    delay: Duration,
) -> Result<usize> {
    let mut written = 0usize;
    for slug in slugs {
        let url = Url::parse(&format!("{WIKI_BASE}{slug}"))
            .with_context(|| format!("Invalid episode URL for slug {slug:?}"))?;
        let body = get_text(client, url.as_str()).await?;

        let dest = out_dir.join(format!("{slug}.html"));
        std::fs::write(&dest, &body)
            .with_context(|| format!("writing raw page {}", dest.display()))?;
        written += 1;
        debug!("Saved episode page - slug={}, bytes={}", slug, body.len());

        tokio::time::sleep(delay).await;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"<html><body>
<a href="/wiki/Chapter_One:_The_Vanishing_of_Will_Byers" title="Chapter One">Chapter One</a>
<a href="/wiki/Chapter_Two:_The_Weirdo_on_Maple_Street" title="chapter Two">Chapter Two</a>
<a href="/wiki/Stranger_Things" title="Stranger Things">Home</a>
<a href="/wiki/Chapter_One:_The_Vanishing_of_Will_Byers" title="Chapter One">Again</a>
<a href="/elsewhere/Chapter_Nine" title="Chapter Nine">Off-wiki</a>
<a href="/wiki/Chatty_Page" title="Chatty Page">Prefix lookalike</a>
</body></html>"#;

    #[test]
    fn slugs_follow_title_prefix_case_insensitively() {
        let slugs = episode_slugs(INDEX);
        assert_eq!(
            slugs,
            vec![
                "Chapter_One:_The_Vanishing_of_Will_Byers",
                "Chapter_Two:_The_Weirdo_on_Maple_Street",
                "Chapter_One:_The_Vanishing_of_Will_Byers",
                "Chatty_Page",
            ]
        );
    }

    #[test]
    fn anchors_without_wiki_hrefs_are_ignored() {
        let slugs = episode_slugs(r#"<a href="/elsewhere/x" title="Chapter Ten">x</a>"#);
        assert!(slugs.is_empty());
    }

    #[test]
    fn episode_urls_parse_with_colons_in_the_slug() {
        let url = Url::parse(&format!(
            "{WIKI_BASE}Chapter_One:_The_Vanishing_of_Will_Byers"
        ))
        .unwrap();
        assert_eq!(url.host_str(), Some("transcripts.fandom.com"));
        assert!(url.path().starts_with("/wiki/Chapter_One"));
    }
}
