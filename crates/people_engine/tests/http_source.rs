use std::time::Duration;

use people_engine::{Cursor, EngineError, FetchSettings, HttpPeopleSource, PeopleSource, Person};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer) -> HttpPeopleSource {
    HttpPeopleSource::new(FetchSettings {
        base_url: server.uri(),
        ..FetchSettings::default()
    })
    .expect("source")
}

#[tokio::test]
async fn first_page_decodes_people_and_next() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/people"))
        .and(query_param_is_missing("next"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"people":[{"id":1,"fullName":"A"},{"id":2,"fullName":"B"}],"next":"c1"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let page = source_for(&server).fetch(None).await.expect("fetch ok");
    assert_eq!(
        page.people,
        vec![
            Person {
                id: 1,
                full_name: "A".to_string()
            },
            Person {
                id: 2,
                full_name: "B".to_string()
            },
        ]
    );
    assert_eq!(page.next, Some(Cursor::from("c1")));
}

#[tokio::test]
async fn cursor_is_sent_as_next_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/people"))
        .and(query_param("next", "c1 & more"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"people":[{"id":3,"fullName":"C"}]}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cursor = Cursor::from("c1 & more");
    let page = source_for(&server)
        .fetch(Some(&cursor))
        .await
        .expect("fetch ok");
    assert_eq!(page.people.len(), 1);
    assert_eq!(page.next, None);
}

#[tokio::test]
async fn http_status_becomes_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/people"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = source_for(&server).fetch(None).await.unwrap_err();
    assert!(err.description().contains("500"), "{err}");
}

#[tokio::test]
async fn malformed_body_becomes_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/people"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = source_for(&server).fetch(None).await.unwrap_err();
    assert!(err.description().starts_with("Could not read the people list"));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/people"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string(r#"{"people":[]}"#),
        )
        .mount(&server)
        .await;

    let source = HttpPeopleSource::new(FetchSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    })
    .unwrap();

    let err = source.fetch(None).await.unwrap_err();
    assert_eq!(err.description(), "The request timed out.");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/people"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"people":[]}"#))
        .mount(&server)
        .await;

    let source = HttpPeopleSource::new(FetchSettings {
        base_url: server.uri(),
        max_bytes: 4,
        ..FetchSettings::default()
    })
    .unwrap();

    let err = source.fetch(None).await.unwrap_err();
    assert!(err.description().contains("byte limit"));
}

#[test]
fn base_path_is_kept_when_building_endpoint() {
    let source = HttpPeopleSource::new(FetchSettings {
        base_url: "http://example.com/api/v1".to_string(),
        ..FetchSettings::default()
    })
    .unwrap();

    assert_eq!(source.endpoint().as_str(), "http://example.com/api/v1/people");
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = HttpPeopleSource::new(FetchSettings {
        base_url: "not a url".to_string(),
        ..FetchSettings::default()
    });

    assert!(matches!(result, Err(EngineError::BaseUrl(_))));
}
