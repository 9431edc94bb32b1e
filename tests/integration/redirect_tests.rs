use crate::common::{closed_port, run_entries, test_config, test_config_with_headers};
use url_sieve::checker::RedirectFollow;
use url_sieve::output::Event;
use url_sieve::UrlOutcome;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_redirect_followed_once_writes_target() {
    let mock_server = MockServer::start().await;
    let target = format!("{}/target", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", target.as_str()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/target"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let original = format!("{}/old", mock_server.uri());
    let (summary, lines, notifier) = run_entries(&test_config(), &[original.clone()]).await;

    // Only the resolved target goes to the output
    assert_eq!(lines, vec![target.clone()]);

    // The original URL is counted as a redirect, never as a success
    assert_eq!(summary.redirects, 1);
    assert_eq!(summary.success, 0);
    assert!(summary.is_consistent());

    let record = &summary.records[0];
    assert_eq!(record.url, original);
    assert_eq!(record.status(), Some(301));
    assert_eq!(record.resolved_url(), Some(target.as_str()));

    let events = notifier.events();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        Event::Redirect {
            url: original,
            status: 301,
            location: Some(target.clone()),
        }
    );
    assert_eq!(
        events[1],
        Event::RedirectFollowed {
            url: record.url.clone(),
            follow: RedirectFollow::Resolved {
                target,
                status: 200
            },
        }
    );
}

#[tokio::test]
async fn test_redirect_without_location() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nowhere"))
        .respond_with(ResponseTemplate::new(301))
        .mount(&mock_server)
        .await;

    let url = format!("{}/nowhere", mock_server.uri());
    let (summary, lines, notifier) = run_entries(&test_config(), &[url]).await;

    assert!(lines.is_empty());
    assert_eq!(summary.redirects, 1);
    assert!(summary.is_consistent());
    assert_eq!(
        summary.records[0].outcome,
        UrlOutcome::Redirect {
            status: 301,
            follow: RedirectFollow::MissingLocation
        }
    );
    assert!(notifier.events().iter().any(|event| matches!(
        event,
        Event::RedirectFollowed {
            follow: RedirectFollow::MissingLocation,
            ..
        }
    )));
}

#[tokio::test]
async fn test_redirect_chain_stops_after_one_hop() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/b"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/c"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let url = format!("{}/a", mock_server.uri());
    let (summary, lines, _) = run_entries(&test_config(), &[url]).await;

    assert!(lines.is_empty());
    assert_eq!(summary.redirects, 1);
    assert_eq!(
        summary.records[0].outcome,
        UrlOutcome::Redirect {
            status: 302,
            follow: RedirectFollow::Unresolved {
                target: format!("{}/b", mock_server.uri()),
                status: 301
            }
        }
    );
}

#[tokio::test]
async fn test_redirect_to_error_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(307).insert_header("Location", "/gone"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&mock_server)
        .await;

    let url = format!("{}/moved", mock_server.uri());
    let (summary, lines, _) = run_entries(&test_config(), &[url]).await;

    assert!(lines.is_empty());
    assert_eq!(summary.redirects, 1);
    assert_eq!(summary.errors, 0);
    assert!(matches!(
        summary.records[0].outcome,
        UrlOutcome::Redirect {
            follow: RedirectFollow::Unresolved { status: 410, .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_redirect_to_unreachable_target() {
    let mock_server = MockServer::start().await;
    let dead_target = format!("http://127.0.0.1:{}/", closed_port());

    Mock::given(method("GET"))
        .and(path("/away"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", dead_target.as_str()))
        .mount(&mock_server)
        .await;

    let url = format!("{}/away", mock_server.uri());
    let (summary, lines, _) = run_entries(&test_config(), &[url]).await;

    assert!(lines.is_empty());
    assert_eq!(summary.redirects, 1);
    assert_eq!(summary.network_errors, 0);
    assert!(summary.records[0].response_time.is_some());
    assert!(matches!(
        &summary.records[0].outcome,
        UrlOutcome::Redirect {
            follow: RedirectFollow::Failed { target, .. },
            ..
        } if *target == dead_target
    ));
}

#[tokio::test]
async fn test_headers_sent_on_follow_up() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/start"))
        .and(header("X-Trace", "abc"))
        .respond_with(ResponseTemplate::new(303).insert_header("Location", "/end"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/end"))
        .and(header("X-Trace", "abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config_with_headers(&[("X-Trace", "abc")]);
    let url = format!("{}/start", mock_server.uri());
    let (summary, lines, _) = run_entries(&config, &[url]).await;

    assert_eq!(lines, vec![format!("{}/end", mock_server.uri())]);
    assert_eq!(summary.redirects, 1);
}
