use crate::common::{closed_port, run_entries, test_config, test_config_with_headers};
use std::time::Duration;
use url_sieve::checker::NetworkErrorKind;
use url_sieve::output::Event;
use url_sieve::{Bucket, Checker, UrlOutcome};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_success_is_written_to_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/ok", mock_server.uri());
    let (summary, lines, notifier) = run_entries(&test_config(), &[url.clone()]).await;

    assert_eq!(lines, vec![url.clone()]);
    assert_eq!(summary.total, 1);
    assert_eq!(summary.success, 1);
    assert!(summary.is_consistent());
    assert!(summary.records[0].response_time.is_some());
    assert_eq!(
        notifier.events(),
        vec![Event::Success { url, status: 200 }]
    );
}

#[tokio::test]
async fn test_client_and_server_errors() {
    let mock_server = MockServer::start().await;

    for (route, status) in [("/missing", 404u16), ("/broken", 500), ("/permanent", 308)] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&mock_server)
            .await;
    }

    let entries: Vec<String> = ["/missing", "/broken", "/permanent"]
        .iter()
        .map(|route| format!("{}{}", mock_server.uri(), route))
        .collect();

    let (summary, lines, notifier) = run_entries(&test_config(), &entries).await;

    assert!(lines.is_empty());
    assert_eq!(summary.errors, 3);
    assert_eq!(summary.success, 0);
    assert_eq!(summary.redirects, 0);
    assert!(summary.is_consistent());

    let statuses: Vec<Option<u16>> = summary.records.iter().map(|r| r.status()).collect();
    assert_eq!(statuses, vec![Some(404), Some(500), Some(308)]);

    assert!(notifier
        .events()
        .iter()
        .all(|event| matches!(event, Event::Error { .. })));
}

#[tokio::test]
async fn test_network_error_does_not_abort_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let ok_url = format!("{}/ok", mock_server.uri());
    let entries = vec![
        format!("http://127.0.0.1:{}/", closed_port()),
        ok_url.clone(),
    ];

    let (summary, lines, notifier) = run_entries(&test_config(), &entries).await;

    assert_eq!(lines, vec![ok_url]);
    assert_eq!(summary.network_errors, 1);
    assert_eq!(summary.success, 1);
    assert!(summary.is_consistent());
    assert!(summary.records[0].response_time.is_none());
    assert_eq!(summary.records[0].bucket(), Bucket::NetworkError);
    assert!(matches!(
        notifier.events()[0],
        Event::NetworkError { .. }
    ));
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let mut config = test_config();
    config.probe.timeout_secs = 1;
    let checker = Checker::new(&config).unwrap();

    let (outcome, response_time) = checker
        .check_url(&format!("{}/slow", mock_server.uri()))
        .await;

    match outcome {
        UrlOutcome::NetworkError { error } => assert_eq!(error.kind, NetworkErrorKind::Timeout),
        other => panic!("expected timeout, got {:?}", other),
    }
    assert!(response_time.is_none());
}

#[tokio::test]
async fn test_configured_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/private"))
        .and(header("X-Api-Key", "secret"))
        .and(header("Accept-Language", "en"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config_with_headers(&[("X-Api-Key", "secret"), ("Accept-Language", "en")]);
    let url = format!("{}/private", mock_server.uri());

    let (summary, lines, _) = run_entries(&config, &[url.clone()]).await;

    assert_eq!(summary.success, 1);
    assert_eq!(lines, vec![url]);
}

#[tokio::test]
async fn test_missing_headers_do_not_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/private"))
        .and(header("X-Api-Key", "secret"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    // Without the header wiremock falls through to its default 404
    let url = format!("{}/private", mock_server.uri());
    let (summary, lines, _) = run_entries(&test_config(), &[url]).await;

    assert_eq!(summary.errors, 1);
    assert!(lines.is_empty());
}

#[tokio::test]
async fn test_unresolvable_domain_is_network_error() {
    let config = test_config();
    let (summary, lines, _) =
        run_entries(&config, &["https://www.doesnotexist.invalid".to_string()]).await;

    assert!(lines.is_empty());
    assert_eq!(summary.network_errors, 1);
    assert!(summary.is_consistent());
}
