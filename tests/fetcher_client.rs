use ddo_monsters::fetcher::{FetchError, HttpPageSource, PageSource, fetch};
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const QUEST_PAGE: &str = r#"<html><head><title>The Pit</title></head><body><h2><span id="Monsters">Monsters</span></h2></body></html>"#;

#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page/The_Pit"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(QUEST_PAGE.as_bytes())
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/page/The_Pit", mock_server.uri());
    let page = fetch(&url).await.unwrap();

    assert!(page.body_utf8.contains(r#"id="Monsters""#));
    assert_eq!(page.url_final.as_str(), url);
}

#[tokio::test]
async fn test_fetch_decodes_legacy_charset() {
    let mock_server = MockServer::start().await;

    let mut body = b"<html><body><p>Race: Dro".to_vec();
    body.push(0xE9); // e-acute in windows-1252
    body.extend_from_slice(b"</p></body></html>");

    Mock::given(method("GET"))
        .and(path("/page/Drow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("Content-Type", "text/html; charset=windows-1252"),
        )
        .mount(&mock_server)
        .await;

    let page = fetch(&format!("{}/page/Drow", mock_server.uri())).await.unwrap();
    assert!(page.body_utf8.contains("Race: Droé"));
}

#[tokio::test]
async fn test_fetch_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page/Missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/page/Missing", mock_server.uri());
    match fetch(&url).await {
        Err(FetchError::Http { status, retriable }) => {
            assert_eq!(status.as_u16(), 404);
            assert!(!retriable);
        }
        other => panic!("Expected HTTP 404 error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_500_retryable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page/Broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let url = format!("{}/page/Broken", mock_server.uri());
    match fetch(&url).await {
        Err(FetchError::Http { status, retriable }) => {
            assert_eq!(status.as_u16(), 500);
            assert!(retriable);
        }
        other => panic!("Expected HTTP 500 error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_follows_wiki_redirect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page/Pit"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/page/The_Pit"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page/The_Pit"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(QUEST_PAGE.as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let page = fetch(&format!("{}/page/Pit", mock_server.uri())).await.unwrap();

    assert!(page.body_utf8.contains("Monsters"));
    assert!(page.url_final.as_str().ends_with("/page/The_Pit"));
}

#[tokio::test]
async fn test_fetch_gzip_compression() {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(QUEST_PAGE.as_bytes()).unwrap();
    let compressed_data = encoder.finish().unwrap();

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page/The_Pit"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(compressed_data)
                .insert_header("Content-Type", "text/html; charset=utf-8")
                .insert_header("Content-Encoding", "gzip"),
        )
        .mount(&mock_server)
        .await;

    let page = fetch(&format!("{}/page/The_Pit", mock_server.uri())).await.unwrap();
    assert_eq!(page.body_utf8, QUEST_PAGE);
}

#[tokio::test]
async fn test_fetch_unsupported_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/Goblin.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0x89, 0x50, 0x4E, 0x47])
                .insert_header("Content-Type", "image/png"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/images/Goblin.png", mock_server.uri());
    match fetch(&url).await {
        Err(FetchError::UnsupportedContentType(content_type)) => {
            assert_eq!(content_type, "image/png");
        }
        other => panic!("Expected UnsupportedContentType error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_body_too_large() {
    let mock_server = MockServer::start().await;

    let large_body = "x".repeat(6 * 1024 * 1024);

    Mock::given(method("GET"))
        .and(path("/page/Everything"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(large_body.as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/page/Everything", mock_server.uri());
    match fetch(&url).await {
        Err(FetchError::BodyTooLarge(size)) => {
            assert_eq!(size, 6 * 1024 * 1024);
        }
        other => panic!("Expected BodyTooLarge error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_invalid_url() {
    match fetch("not-a-valid-url").await {
        Err(FetchError::InvalidUrl(_)) => {}
        other => panic!("Expected InvalidUrl error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_page_source_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page/The_Pit"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(QUEST_PAGE.as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = Url::parse(&format!("{}/page/The_Pit", mock_server.uri())).unwrap();
    let body = HttpPageSource::new().fetch_page(&url).await.unwrap();
    assert_eq!(body, QUEST_PAGE);
}

#[tokio::test]
async fn test_error_retry_classification() {
    assert!(!FetchError::InvalidUrl(url::ParseError::EmptyHost).should_retry());
    assert!(!FetchError::BodyTooLarge(1000).should_retry());
    assert!(!FetchError::UnsupportedContentType("image/png".to_string()).should_retry());
    assert!(!FetchError::Charset("Invalid encoding".to_string()).should_retry());

    assert!(FetchError::Connect("connection refused".to_string()).should_retry());
    assert!(FetchError::ConnectTimeout.should_retry());
    assert!(FetchError::RequestTimeout.should_retry());

    assert!(
        !FetchError::Http {
            status: reqwest::StatusCode::NOT_FOUND,
            retriable: false
        }
        .should_retry()
    );
    assert!(
        FetchError::Http {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            retriable: true
        }
        .should_retry()
    );
}
