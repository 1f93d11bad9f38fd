//! HackerNews front-page scraping.
//!
//! This is a thin collaborator: the rest of the crate only ever sees the
//! `(title, story URL, comment URL)` triples it produces. Extraction runs
//! two anchored regexes over the fetched page instead of a DOM walk; the
//! front page is rigidly templated and the parse is fixture-tested.

use crate::bytemark::Bytemark;
use regex::Regex;
use std::sync::OnceLock;

pub const HN_URL: &str = "https://news.ycombinator.com/";

/// Number of stories on the front page. Selection bounds and menu paging
/// are derived from this, never from a repeated literal.
pub const FRONT_PAGE_SIZE: usize = 30;

/// One scraped story, before conversion to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub story_url: String,
    /// Absent for stories with no comments page (e.g. job posts).
    pub comment_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    Http(String),
    /// The page fetched but nothing matched; the markup probably changed.
    NoArticles,
}

impl std::fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeError::Http(msg) => write!(f, "HTTP error: {msg}"),
            ScrapeError::NoArticles => {
                write!(f, "no articles found on the front page (markup change?)")
            }
        }
    }
}

impl std::error::Error for ScrapeError {}

fn story_row_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Story rows: <tr class='athing submission' id='NNNN'>
    RE.get_or_init(|| {
        Regex::new(r#"<tr[^>]*class=['"]athing[^'"]*['"][^>]*id=['"]?(\d+)['"]?"#)
            .expect("story row regex")
    })
}

fn titleline_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<span class="titleline"><a href="([^"]+)"[^>]*>(.*?)</a>"#)
            .expect("titleline regex")
    })
}

/// Fetch the front page and return its articles, in page order.
pub fn scrape_front_page() -> Result<Vec<Article>, ScrapeError> {
    tracing::info!(url = HN_URL, "visiting");
    let body = ureq::get(HN_URL)
        .call()
        .map_err(|e| ScrapeError::Http(e.to_string()))?
        .into_string()
        .map_err(|e| ScrapeError::Http(e.to_string()))?;

    let articles = parse_front_page(&body);
    if articles.is_empty() {
        return Err(ScrapeError::NoArticles);
    }
    tracing::info!(count = articles.len(), "scraped front page");
    Ok(articles)
}

/// Extract articles from front-page HTML.
///
/// Story rows and title anchors appear in lockstep, one pair per story;
/// the row id doubles as the comments-page item id. At most
/// [`FRONT_PAGE_SIZE`] articles are returned.
pub fn parse_front_page(html: &str) -> Vec<Article> {
    let ids: Vec<&str> = story_row_regex()
        .captures_iter(html)
        .map(|c| c.get(1).map_or("", |m| m.as_str()))
        .collect();
    let titles: Vec<(String, String)> = titleline_regex()
        .captures_iter(html)
        .map(|c| (c[1].to_string(), decode_entities(&c[2])))
        .collect();

    ids.iter()
        .zip(titles)
        .take(FRONT_PAGE_SIZE)
        .map(|(id, (href, title))| {
            let comments = format!("item?id={id}");
            // The subtext row links to the comments page iff one exists.
            let comment_url = if html.contains(&format!("href=\"{comments}\"")) {
                Some(format!("{HN_URL}{comments}"))
            } else {
                None
            };
            Article { title, story_url: href, comment_url }
        })
        .collect()
}

/// Convert a scraped article into a timestamped record. The comment link
/// becomes the first row, or `No comments.` when there is none.
pub fn article_to_bytemark(article: &Article) -> Bytemark {
    let mut b = Bytemark::new(article.title.clone(), article.story_url.clone());
    b.rows.push(match &article.comment_url {
        Some(url) => format!("Comments: {url}"),
        None => "No comments.".to_string(),
    });
    b
}

/// The handful of entities HN titles actually contain.
fn decode_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
<table>
<tr class='athing submission' id='1001'>
  <td class="title"><span class="titleline"><a href="https://example.com/a">First &amp; Foremost</a><span class="sitebit comhead"></span></span></td>
</tr>
<tr><td class="subtext">
  <a href="item?id=1001">12&nbsp;comments</a>
</td></tr>
<tr class='athing submission' id='1002'>
  <td class="title"><span class="titleline"><a href="item?id=1002" rel="nofollow">Ask HN: Anything?</a></span></td>
</tr>
<tr><td class="subtext">
  <a href="item?id=1002">discuss</a>
</td></tr>
<tr class='athing submission' id='1003'>
  <td class="title"><span class="titleline"><a href="https://example.com/jobs">Hiring (YC W26)</a></span></td>
</tr>
<tr><td class="subtext"></td></tr>
</table>
"#;

    #[test]
    fn test_parse_pairs_rows_with_titles() {
        let articles = parse_front_page(FIXTURE);
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "First & Foremost");
        assert_eq!(articles[0].story_url, "https://example.com/a");
        assert_eq!(
            articles[0].comment_url.as_deref(),
            Some("https://news.ycombinator.com/item?id=1001")
        );
    }

    #[test]
    fn test_parse_discuss_link_still_counts_as_comments_page() {
        let articles = parse_front_page(FIXTURE);
        assert_eq!(
            articles[1].comment_url.as_deref(),
            Some("https://news.ycombinator.com/item?id=1002")
        );
    }

    #[test]
    fn test_parse_job_post_has_no_comment_url() {
        let articles = parse_front_page(FIXTURE);
        assert_eq!(articles[2].comment_url, None);
    }

    #[test]
    fn test_parse_empty_page() {
        assert!(parse_front_page("<html></html>").is_empty());
    }

    #[test]
    fn test_article_to_bytemark_rows() {
        let articles = parse_front_page(FIXTURE);
        let with = article_to_bytemark(&articles[0]);
        assert_eq!(with.rows, vec!["Comments: https://news.ycombinator.com/item?id=1001"]);
        let without = article_to_bytemark(&articles[2]);
        assert_eq!(without.rows, vec!["No comments."]);
    }
}
