use reqwest::{Client, ClientBuilder};
use scraper::{Html, Selector};
use std::time::Duration;
use futures_util::future::join_all;
use once_cell::sync::Lazy;
use crate::error::Result;

// Shared keep-alive client; every outbound call in the process goes through
// this pool. The timeouts bound each scrape, speech and device call.
pub static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

// Static selector to avoid recompiling it on each request
static BODY_DESCENDANTS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body *").expect("Failed to parse body selector")
});

/// Cleaned text pulled from one configured page. `text` is empty when the
/// fetch or parse failed; the slot itself is always present.
#[derive(Debug, Clone)]
pub struct PageFragment {
    pub url: String,
    pub text: String,
}

pub async fn fetch_html(url: &str) -> Result<String> {
    let response = CLIENT.get(url).send().await?;
    // Non-success statuses count as fetch failures, same as network errors
    let response = response.error_for_status()?;
    let html = response.text().await?;
    Ok(html)
}

/// Visible body text, coarsely filtered. Every element under <body> is
/// visited in document order; an element's trimmed text is kept when it is
/// longer than two characters and is not copyright/footer boilerplate.
/// A parent's text includes its descendants', so nested repetition happens
/// and is accepted.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut kept: Vec<String> = Vec::new();

    for element in document.select(&BODY_DESCENDANTS) {
        let content = element.text().collect::<String>();
        let content = content.trim();
        if content.chars().count() > 2
            && !content.contains('©')
            && !content.contains("Powered by")
        {
            kept.push(content.to_string());
        }
    }

    kept.join(" ")
}

async fn scrape_page(url: &str) -> PageFragment {
    println!("Scraping: {}", url);
    let text = match fetch_html(url).await {
        Ok(html) => extract_text(&html),
        Err(err) => {
            // A dead page degrades to an empty contribution; it never fails
            // the request or any sibling scrape.
            eprintln!("Failed to scrape {}: {}", url, err);
            String::new()
        }
    };

    PageFragment {
        url: url.to_string(),
        text,
    }
}

/// Fetches every configured page concurrently. `join_all` yields results in
/// input order, so the fragments come back in configuration order no matter
/// which fetch finishes first.
pub async fn scrape_all(pages: &[String]) -> Vec<PageFragment> {
    println!("Fetching {} pages in parallel...", pages.len());
    let tasks = pages.iter().map(|url| scrape_page(url));
    join_all(tasks).await
}

/// Joins fragments into the single context blob sent to the model. Each
/// fragment is wrapped with a page marker (kept even when the text is empty,
/// so one slot per configured page survives), whitespace runs collapse to
/// single spaces, and the result is capped at `max_chars` characters.
pub fn compose_context(fragments: &[PageFragment], max_chars: usize) -> String {
    let mut joined = String::new();
    for fragment in fragments {
        joined.push_str("--- Page: ");
        joined.push_str(&fragment.url);
        joined.push_str(" --- ");
        joined.push_str(&fragment.text);
        joined.push(' ');
    }

    let compact = joined.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.chars().count() <= max_chars {
        return compact;
    }

    let capped: String = compact.chars().take(max_chars).collect();
    capped.trim_end().to_string()
}
