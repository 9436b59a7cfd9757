use std::future::Future;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{Comment, Draft, PageContext};

/// Log request timing to file if KAIWA_DEBUG is set
#[inline]
fn debug_log(operation: &str, elapsed_ms: u128) {
    if std::env::var("KAIWA_DEBUG").is_ok() {
        use std::io::Write;
        if let Some(mut path) = dirs::config_dir() {
            path.push("kaiwa");
            path.push("perf.log");
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
            {
                let _ = writeln!(file, "{:>6}ms  {}", elapsed_ms, operation);
            }
        }
    }
}

/// Validate a configured service host and normalize it (no trailing slash)
pub fn parse_service_host(host: &str) -> Result<String> {
    let url = Url::parse(host).context("Invalid service host URL")?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow!(
            "Service host must be an http(s) URL, got '{}'",
            host
        ));
    }

    if url.host_str().is_none() {
        return Err(anyhow!("Service host URL has no host: '{}'", host));
    }

    Ok(host.trim_end_matches('/').to_string())
}

/// Build the shared HTTP client
pub fn client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("kaiwa/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

fn comments_endpoint(host: &str) -> String {
    format!("{}/api/open/comments", host.trim_end_matches('/'))
}

// ============================================================================
// Fetching
// ============================================================================

/// One page of the service's comment listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    #[serde(default)]
    pub data: Vec<Comment>,
    #[serde(default = "default_page_count")]
    pub page_count: u32,
}

fn default_page_count() -> u32 {
    1
}

/// Response envelope wrapping every service payload
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    data: CommentPage,
}

/// Fetch a single page of approved comments for a page context
async fn fetch_comment_page(
    client: &Client,
    page: &PageContext,
    page_no: u32,
) -> Result<CommentPage> {
    let start = Instant::now();
    let page_param = page_no.to_string();

    let response = client
        .get(comments_endpoint(&page.host))
        .query(&[
            ("appId", page.app_id.as_str()),
            ("pageId", page.page_id.as_str()),
            ("page", page_param.as_str()),
        ])
        .send()
        .await
        .with_context(|| format!("Failed to fetch comments for '{}'", page.page_id))?;

    debug_log(
        &format!("GET comments {} page {}", page.page_id, page_no),
        start.elapsed().as_millis(),
    );

    if !response.status().is_success() {
        return Err(anyhow!(
            "Comment service returned {} for '{}' page {}",
            response.status(),
            page.page_id,
            page_no
        ));
    }

    let envelope: ApiEnvelope = response
        .json()
        .await
        .context("Failed to parse comment list response")?;

    Ok(envelope.data)
}

/// Walk every page of a comment listing, strictly sequentially, and
/// aggregate the items in page order.
///
/// Page N+1 is requested only after page N's response has been handled;
/// this bounds concurrent load on the service and keeps ordering
/// deterministic. Any page failing aborts the whole aggregation; callers
/// never see a partial list.
pub async fn aggregate_pages<F, Fut>(mut fetch_page: F) -> Result<Vec<Comment>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<CommentPage>>,
{
    let mut all = Vec::new();
    let mut page_no = 1u32;

    loop {
        let page = fetch_page(page_no).await?;
        let page_count = page.page_count.max(1);
        all.extend(page.data);

        if page_no >= page_count {
            break;
        }
        page_no += 1;
    }

    Ok(all)
}

/// Fetch the complete set of approved comments for a page context.
///
/// An empty result is a valid success, distinct from a fetch failure.
pub async fn fetch_all_comments(client: &Client, page: &PageContext) -> Result<Vec<Comment>> {
    aggregate_pages(|page_no| fetch_comment_page(client, page, page_no)).await
}

// ============================================================================
// Submission
// ============================================================================

/// JSON body for posting a new comment or reply
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBody {
    pub app_id: String,
    pub page_id: String,
    pub content: String,
    pub nickname: String,
    pub email: String,
    pub page_title: String,
    pub page_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Build the submission body for a validated draft.
/// `parentId` is present only when the draft targets a reply.
pub fn build_submit_body(page: &PageContext, draft: &Draft) -> SubmitBody {
    SubmitBody {
        app_id: page.app_id.clone(),
        page_id: page.page_id.clone(),
        content: draft.content.clone(),
        nickname: draft.author_name.clone(),
        // Optional and unvalidated, passed through as typed
        email: draft.author_email.clone(),
        page_title: page.page_title.clone(),
        page_url: page.page_url.clone(),
        parent_id: draft.reply_target.as_ref().map(|t| t.parent_id.clone()),
    }
}

/// POST one comment to the service. The success response body is not
/// relied upon; only the status matters.
pub async fn submit_comment(client: &Client, page: &PageContext, draft: &Draft) -> Result<()> {
    let start = Instant::now();
    let body = build_submit_body(page, draft);

    let response = client
        .post(comments_endpoint(&page.host))
        .json(&body)
        .send()
        .await
        .context("Failed to submit comment")?;

    debug_log(
        &format!("POST comment {}", page.page_id),
        start.elapsed().as_millis(),
    );

    if !response.status().is_success() {
        return Err(anyhow!(
            "Comment service rejected the submission: {}",
            response.status()
        ));
    }

    Ok(())
}
