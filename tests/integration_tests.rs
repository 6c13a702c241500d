//! Integration tests for pastpapers
//!
//! These tests run the public operations against a local mock HTTP server with
//! pinned HTML fixtures.

use std::io::{self, Write};
use std::time::Duration;

use mockito::{Matcher, Server, ServerGuard};
use pastpapers::config::Config;
use pastpapers::models::LinkType;
use pastpapers::{DownloadError, PastPapersSource};
use tempfile::TempDir;

const SEARCH_PAGE: &str = r#"
<html><body>
  <div class="post-item">
    <img src="/wp-content/uploads/maths.jpg">
    <h2><a href="/grade-11-maths-2023/">Grade 11 Maths 2023</a></h2>
  </div>
  <article>
    <h3><a>Untitled link</a></h3>
  </article>
  <div class="search-result-item">
    <h3><a href="/grade-11-science-2023/">Grade 11 Science 2023</a></h3>
  </div>
</body></html>
"#;

const DETAIL_PAGE: &str = r#"
<html><body>
  <img src="/wp-content/uploads/logo.png">
  <h1>Grade 11 Maths 2023</h1>
  <div class="post-content">
    <p>Maths past paper with answers.</p>
    <img src="/wp-content/uploads/maths-cover.jpg">
    <a href="/wp-content/uploads/maths-2023.pdf">Paper</a>
    <a href="https://drive.google.com/file/d/xyz/view">Mirror</a>
  </div>
</body></html>
"#;

/// Source pointed at the mock server, downloading into a fresh temp dir
fn source_for(server: &ServerGuard) -> (PastPapersSource, TempDir) {
    source_with_timeout(server, 5)
}

fn source_with_timeout(server: &ServerGuard, timeout_secs: u64) -> (PastPapersSource, TempDir) {
    let downloads = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.site.base_url = server.url();
    config.site.timeout_secs = timeout_secs;
    config.downloads.default_path = downloads.path().to_path_buf();

    (PastPapersSource::from_config(&config).unwrap(), downloads)
}

#[tokio::test]
async fn test_search_returns_valid_stubs_in_order() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/page/1/")
        .match_query(Matcher::UrlEncoded("s".into(), "maths 2023".into()))
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(SEARCH_PAGE)
        .create_async()
        .await;

    let (source, _downloads) = source_for(&server);
    let stubs = source.search("maths 2023", 1).await;

    mock.assert_async().await;
    assert_eq!(stubs.len(), 2);
    assert_eq!(stubs[0].title, "Grade 11 Maths 2023");
    assert_eq!(stubs[0].url, "/grade-11-maths-2023/");
    assert_eq!(
        stubs[0].image.as_deref(),
        Some("/wp-content/uploads/maths.jpg")
    );
    assert_eq!(stubs[1].title, "Grade 11 Science 2023");
}

#[tokio::test]
async fn test_search_server_error_is_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/page/2/")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let (source, _downloads) = source_for(&server);
    assert!(source.search("anything", 2).await.is_empty());
}

#[tokio::test]
async fn test_recent_uses_plain_page_path() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/page/3/")
        .with_status(200)
        .with_body(
            r#"<article><h2><a href="/latest/">Latest Paper</a></h2></article>"#,
        )
        .create_async()
        .await;

    let (source, _downloads) = source_for(&server);
    let stubs = source.recent(3).await;

    mock.assert_async().await;
    assert_eq!(stubs.len(), 1);
    assert_eq!(stubs[0].url, "/latest/");
}

#[tokio::test]
async fn test_details_pdf_and_external_links() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/grade-11-maths-2023/")
        .with_status(200)
        .with_body(DETAIL_PAGE)
        .create_async()
        .await;

    let (source, _downloads) = source_for(&server);
    let detail = source
        .get_details("/grade-11-maths-2023/")
        .await
        .expect("detail page should parse");

    assert_eq!(detail.title, "Grade 11 Maths 2023");
    assert_eq!(detail.description, "Maths past paper with answers.");

    let types: Vec<LinkType> = detail.download_links.iter().map(|l| l.link_type).collect();
    assert_eq!(types, vec![LinkType::Pdf, LinkType::External]);
    assert_eq!(
        detail.download_links[0].url,
        format!("{}/wp-content/uploads/maths-2023.pdf", server.url())
    );

    assert_eq!(
        detail.images,
        vec![format!("{}/wp-content/uploads/maths-cover.jpg", server.url())]
    );
}

#[tokio::test]
async fn test_details_not_found_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/missing/")
        .with_status(404)
        .create_async()
        .await;

    let (source, _downloads) = source_for(&server);
    assert!(source.get_details("/missing/").await.is_none());
}

#[tokio::test]
async fn test_download_uses_content_disposition_name() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/get/42")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_header("content-disposition", r#"attachment; filename="paper.pdf""#)
        .with_body(b"%PDF-1.4 test".to_vec())
        .create_async()
        .await;

    let (source, downloads) = source_for(&server);
    let result = source
        .download(&format!("{}/get/42", server.url()), Some("ignored-name"))
        .await
        .unwrap();

    assert_eq!(result.file_path, downloads.path().join("paper.pdf"));
    assert!(result.file_path.is_absolute());
    assert_eq!(std::fs::read(&result.file_path).unwrap(), b"%PDF-1.4 test");
    assert_eq!(result.bytes, Some(13));
}

#[tokio::test]
async fn test_download_fallback_name_with_zip_extension() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/files/bundle")
        .with_status(200)
        .with_header("content-type", "application/zip")
        .with_body(b"PK\x03\x04".to_vec())
        .create_async()
        .await;

    let (source, downloads) = source_for(&server);
    let result = source.download("/files/bundle", None).await.unwrap();

    assert_eq!(result.file_path, downloads.path().join("download.zip"));
    assert!(result.file_path.exists());
}

#[tokio::test]
async fn test_download_creates_missing_directory() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/notes")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("notes")
        .create_async()
        .await;

    let downloads = tempfile::tempdir().unwrap();
    let target = downloads.path().join("nested").join("downloads");

    let mut config = Config::default();
    config.site.base_url = server.url();
    config.downloads.default_path = target.clone();
    let source = PastPapersSource::from_config(&config).unwrap();

    let result = source.download("/notes", Some("notes")).await.unwrap();
    assert_eq!(result.file_path, target.join("notes"));
}

#[tokio::test]
async fn test_download_error_status_propagates() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/gone.pdf")
        .with_status(410)
        .create_async()
        .await;

    let (source, downloads) = source_for(&server);
    let err = source.download("/gone.pdf", None).await.unwrap_err();

    assert!(matches!(err, DownloadError::Status { status: 410, .. }));
    assert!(!downloads.path().join("download").exists());
}

#[tokio::test]
async fn test_slow_download_outlives_request_timeout() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/slow.pdf")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_chunked_body(|w| {
            for _ in 0..4 {
                w.write_all(&[b'x'; 1024])?;
                w.flush()?;
                std::thread::sleep(Duration::from_millis(600));
            }
            Ok(())
        })
        .create_async()
        .await;

    let (source, downloads) = source_with_timeout(&server, 1);
    let result = source.download("/slow.pdf", None).await.unwrap();

    assert_eq!(result.file_path, downloads.path().join("download.pdf"));
    assert_eq!(result.bytes, Some(4096));
    assert_eq!(std::fs::metadata(&result.file_path).unwrap().len(), 4096);
}

#[tokio::test]
async fn test_download_dropped_mid_stream_is_network_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/broken.pdf")
        .with_status(200)
        .with_chunked_body(|w| {
            w.write_all(b"%PDF-1.4 partial")?;
            w.flush()?;
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "upstream went away"))
        })
        .create_async()
        .await;

    let (source, downloads) = source_for(&server);
    let err = source
        .download("/broken.pdf", Some("broken.pdf"))
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::Network { .. }), "{err:?}");
    // Whatever arrived stays on disk
    assert!(downloads.path().join("broken.pdf").exists());
}

#[tokio::test]
async fn test_download_unwritable_directory_is_io_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/paper.pdf")
        .with_status(200)
        .with_body("data")
        .create_async()
        .await;

    let scratch = tempfile::tempdir().unwrap();
    let not_a_dir = scratch.path().join("occupied");
    std::fs::write(&not_a_dir, b"regular file").unwrap();

    let mut config = Config::default();
    config.site.base_url = server.url();
    config.downloads.default_path = not_a_dir.clone();
    let source = PastPapersSource::from_config(&config).unwrap();

    let err = source.download("/paper.pdf", None).await.unwrap_err();
    assert!(matches!(err, DownloadError::Io { .. }), "{err:?}");
}

#[tokio::test]
async fn test_download_unresolvable_url_is_invalid() {
    let server = Server::new_async().await;
    let (source, downloads) = source_for(&server);

    let err = source.download("//[::1", None).await.unwrap_err();

    assert!(matches!(err, DownloadError::InvalidUrl(_)), "{err:?}");
    assert_eq!(std::fs::read_dir(downloads.path()).unwrap().count(), 0);
}
