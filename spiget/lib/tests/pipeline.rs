//! End-to-end behaviour of the request pipeline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use reqwest::StatusCode;
use spiget_lib::types::{Category, Resource};
use spiget_lib::{
    ApiError, ApiRequest, ApiResponse, ClientConfig, ClientError, JsonFormat, ListOptions,
    RawResponse, RequestContext, RestMethod, SpigetClient, Transport,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SpigetClient {
    let config = ClientConfig::default().base_url(server.uri()).unwrap();
    SpigetClient::new(config).unwrap()
}

/// Answers 200 with the request body and records what it saw.
#[derive(Default)]
struct Echo {
    calls: AtomicUsize,
}

impl Transport for Echo {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RawResponse::new(StatusCode::OK, request.url).with_body(request.body.unwrap_or_default()))
    }
}

/// Never answers; flags that it was reached.
#[derive(Default)]
struct Blackhole {
    reached: Arc<AtomicBool>,
}

impl Transport for Blackhole {
    async fn send(&self, _request: ApiRequest) -> Result<RawResponse, ClientError> {
        self.reached.store(true, Ordering::SeqCst);
        std::future::pending().await
    }
}

/// Always answers with the given status.
struct Fixed {
    status: StatusCode,
    calls: AtomicUsize,
}

impl Transport for Fixed {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RawResponse::new(self.status, request.url))
    }
}

#[tokio::test]
async fn not_found_with_json_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources/999999999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "not found"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .resources()
        .get(&RequestContext::background(), 999_999_999)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    let ApiError::Status(status) = &err else {
        panic!("expected status error, got {err:?}");
    };
    assert_eq!(status.api_message.as_deref(), Some("not found"));
    assert!(err.response().is_some());
    assert!(!err.is_transport());
}

#[tokio::test]
async fn empty_success_body_yields_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let answer = client_for(&server)
        .categories()
        .list(&RequestContext::background(), None)
        .await
        .unwrap();

    assert!(answer.value.is_empty());
    assert_eq!(answer.response.status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_success_body_keeps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-RateLimit-Remaining", "41")
                .set_body_string("[1, 2"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .resources()
        .list(&RequestContext::background(), None)
        .await
        .unwrap_err();

    let ApiError::Decode(decode) = &err else {
        panic!("expected decode error, got {err:?}");
    };
    assert_eq!(decode.response.status, StatusCode::OK);
    assert_eq!(decode.response.rate_limit.as_ref().unwrap().remaining, Some(41));
}

#[tokio::test]
async fn metadata_headers_are_exposed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources/free"))
        .and(query_param("size", "2"))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Page-Index", "3")
                .insert_header("X-Page-Size", "2")
                .insert_header("X-Page-Count", "7")
                .insert_header("X-Page-Sort", "-downloads")
                .insert_header("X-Page-Order", "-1")
                .insert_header("X-RateLimit-Limit", "100")
                .insert_header("X-RateLimit-Remaining", "0")
                .insert_header("X-RateLimit-Reset", "1700000000")
                .set_body_json(serde_json::json!([{"id": 1}, {"id": 2}])),
        )
        .mount(&server)
        .await;

    let options = ListOptions::new().size(2).page(3);
    let answer = client_for(&server)
        .resources()
        .list_free(&RequestContext::background(), Some(&options))
        .await
        .unwrap();

    assert_eq!(answer.value.len(), 2);

    let pagination = answer.response.pagination.as_ref().unwrap();
    assert_eq!(pagination.page, Some(3));
    assert_eq!(pagination.size, Some(2));
    assert_eq!(pagination.total_pages, Some(7));
    assert_eq!(pagination.sort.as_deref(), Some("-downloads"));
    assert_eq!(pagination.next_page(), Some(4));

    let rate = answer.response.rate_limit.as_ref().unwrap();
    assert_eq!(rate.limit, Some(100));
    assert!(rate.is_exhausted());
    assert_eq!(rate.reset.unwrap().timestamp(), 1_700_000_000);
}

#[tokio::test]
async fn absent_metadata_headers_are_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 4, "name": "Bungee"})))
        .mount(&server)
        .await;

    let answer = client_for(&server)
        .categories()
        .get(&RequestContext::background(), 4)
        .await
        .unwrap();

    assert_eq!(answer.value.name, "Bungee");
    assert!(answer.response.pagination.is_none());
    assert!(answer.response.rate_limit.is_none());
}

#[tokio::test]
async fn echo_round_trip() {
    let client = SpigetClient::with_transport(ClientConfig::default(), Echo::default());
    let sent = Category {
        id: 12,
        name: "Tools and Utilities".to_string(),
    };

    let request = client
        .new_request_with_body(RestMethod::Post, "echo", &sent)
        .unwrap();
    let answer: ApiResponse<Category> = client
        .execute::<JsonFormat<Category>>(&RequestContext::background(), request)
        .await
        .unwrap();

    assert_eq!(answer.value, sent);
    assert_eq!(answer.response.url.as_str(), "https://api.spiget.org/v2/echo");
}

#[tokio::test]
async fn cancellation_aborts_in_flight_call() {
    let transport = Blackhole::default();
    let reached = Arc::clone(&transport.reached);
    let client = SpigetClient::with_transport(ClientConfig::default(), transport);

    let ctx = RequestContext::background();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let err = client.status().get(&ctx).await.unwrap_err();
    assert!(err.is_cancelled());
    assert!(err.response().is_none());
    assert!(reached.load(Ordering::SeqCst));
}

#[tokio::test]
async fn cancelled_context_never_reaches_transport() {
    let transport = Blackhole::default();
    let reached = Arc::clone(&transport.reached);
    let client = SpigetClient::with_transport(ClientConfig::default(), transport);

    let ctx = RequestContext::background();
    ctx.cancel();

    let err = client.resources().get(&ctx, 1).await.unwrap_err();
    assert!(matches!(err, ApiError::Client(ClientError::Cancelled)));
    assert!(!reached.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn deadline_aborts_in_flight_call() {
    let client = SpigetClient::with_transport(ClientConfig::default(), Blackhole::default());
    let ctx = RequestContext::background().with_timeout(Duration::from_secs(2));

    let err = client.authors().get(&ctx, 1).await.unwrap_err();
    assert!(err.is_timeout());
    assert!(!err.is_cancelled());
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let transport = Fixed {
        status: StatusCode::SERVICE_UNAVAILABLE,
        calls: AtomicUsize::new(0),
    };
    let client = SpigetClient::with_transport(ClientConfig::default(), transport);

    let err = client
        .resources()
        .list(&RequestContext::background(), None)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert_eq!(client.transport().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::default()
        .base_url(format!("http://{addr}/v2"))
        .unwrap();
    let client = SpigetClient::new(config).unwrap();

    let err = client
        .status()
        .get(&RequestContext::background())
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert!(err.response().is_none());
    assert!(err.status_code().is_none());
}

#[tokio::test]
async fn leading_slash_paths_hit_the_same_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/resources/6245"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 6245})))
        .expect(2)
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .base_url(format!("{}/api/v2", server.uri()))
        .unwrap();
    let client = SpigetClient::new(config).unwrap();
    let ctx = RequestContext::background();

    for relative in ["resources/6245", "/resources/6245"] {
        let request = client.new_request(RestMethod::Get, relative).unwrap();
        let answer = client
            .execute::<JsonFormat<Resource>>(&ctx, request)
            .await
            .unwrap();
        assert_eq!(answer.value.id, 6245);
    }
}

#[tokio::test]
async fn encoding_errors_stop_before_the_network() {
    let client = SpigetClient::with_transport(ClientConfig::default(), Echo::default());
    let options = ListOptions::new().fields(["id", ""]);

    let err = client
        .resources()
        .list(&RequestContext::background(), Some(&options))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Encoding(_)));
    assert_eq!(client.transport().calls.load(Ordering::SeqCst), 0);
}
