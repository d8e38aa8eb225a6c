//! Reachability probe for the rover's video feed.
//!
//! The feed is an HTTP media endpoint consumed passively by whatever is
//! rendering it; the console never reads the stream itself. This probe
//! issues a GET and returns once response headers arrive, so a live
//! (endless) stream still resolves quickly.

use std::time::Duration;

use url::Url;

use crate::error::LinkError;

/// Check that the video feed answers with a success status.
///
/// Only headers are awaited; the body is dropped unread.
pub async fn probe_feed(feed_url: &Url, timeout: Duration) -> Result<(), LinkError> {
    let client = reqwest::Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()?;

    let response = client.get(feed_url.as_str()).send().await?;
    response.error_for_status()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn probe_unreachable_feed_fails() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let url: Url = format!("http://{addr}/video").parse().expect("url");
        let result = probe_feed(&url, Duration::from_millis(500)).await;
        assert!(matches!(result, Err(LinkError::Probe(_))));
    }
}
