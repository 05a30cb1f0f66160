use insiderkit::{Insider, InsiderConfig, InsiderError, InsiderUrls};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const THROTTLED: &str =
    "<html><body><h1>Request Rate Threshold Exceeded</h1></body></html>";
const DENIED: &str = "<?xml version=\"1.0\"?><Error><Code>AccessDenied</Code></Error>";
const FILING_PATH: &str = "edgar/data/320193/0000320193-23-000081.txt";

/// Answers every connection with the next of `responses`, repeating the last one.
async fn serve(responses: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            let (status, body) = responses[n.min(responses.len() - 1)];

            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(read) => request.extend_from_slice(&buf[..read]),
                }
            }

            let reason = match status {
                200 => "OK",
                403 => "Forbidden",
                404 => "Not Found",
                _ => "Internal Server Error",
            };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{addr}"), hits)
}

fn insider(archives: &str, max_retries: Option<u32>) -> Insider {
    let mut config = InsiderConfig::new("test_agent example@example.com")
        .with_rate_limit_pause(Duration::from_millis(5))
        .with_base_urls(InsiderUrls {
            archives: archives.to_string(),
        });
    if let Some(max) = max_retries {
        config = config.with_max_rate_limit_retries(max);
    }
    Insider::with_config(config).unwrap()
}

fn filing_url(insider: &Insider) -> String {
    format!("{}/{}", insider.archives_url(), FILING_PATH)
}

#[tokio::test]
async fn throttled_request_is_retried() {
    let (base, hits) = serve(vec![(403, THROTTLED), (200, "hello")]).await;
    let insider = insider(&base, None);

    let body = insider.get(&filing_url(&insider)).await.unwrap();

    assert_eq!(body, "hello");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn throttle_page_with_success_status_is_retried() {
    let (base, hits) = serve(vec![(200, THROTTLED), (200, THROTTLED), (200, "hello")]).await;
    let insider = insider(&base, None);

    let body = insider.get(&filing_url(&insider)).await.unwrap();

    assert_eq!(body, "hello");
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn retry_cap_gives_rate_limit_exceeded() {
    let (base, hits) = serve(vec![(403, THROTTLED)]).await;
    let insider = insider(&base, Some(2));

    let result = insider.get(&filing_url(&insider)).await;

    assert!(matches!(result, Err(InsiderError::RateLimitExceeded)));
    // The first attempt plus two retries.
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn access_denied_is_not_retried() {
    let (base, hits) = serve(vec![(403, DENIED), (200, "hello")]).await;
    let insider = insider(&base, None);
    let url = filing_url(&insider);

    let result = insider.get(&url).await;

    match result {
        Err(InsiderError::AccessDenied(denied)) => assert_eq!(denied, url),
        other => panic!("expected AccessDenied, got {other:?}"),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unmarked_error_statuses() {
    let (base, _) = serve(vec![(404, "gone"), (500, "oops")]).await;
    let insider = insider(&base, None);
    let url = filing_url(&insider);

    assert!(matches!(
        insider.get(&url).await,
        Err(InsiderError::NotFound)
    ));
    assert!(matches!(
        insider.get(&url).await,
        Err(InsiderError::InvalidResponse(_))
    ));
}
