//! Every endpoint method hits the documented path with the expected method.

use reqwest::StatusCode;
use serde_json::{Value, json};
use spiget_lib::types::Webhook;
use spiget_lib::{
    ApiError, ClientConfig, EncodingError, ListOptions, RequestContext, ResourceListByVersionsOptions,
    ResourceSearchOptions, SearchField, Sort, SpigetClient, VersionMatch,
};
use wiremock::matchers::{any, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, SpigetClient) {
    let server = MockServer::start().await;
    let config = ClientConfig::default().base_url(server.uri()).unwrap();
    let client = SpigetClient::new(config).unwrap();
    (server, client)
}

async fn mount_get(server: &MockServer, at: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn ctx() -> RequestContext {
    RequestContext::background()
}

#[tokio::test]
async fn resource_lists() {
    let (server, client) = setup().await;
    let resources = client.resources();

    mount_get(&server, "/resources", json!([{"id": 1}])).await;
    mount_get(&server, "/resources/free", json!([{"id": 2}])).await;
    mount_get(&server, "/resources/new", json!([{"id": 3}])).await;
    mount_get(&server, "/resources/premium", json!([{"id": 4, "premium": true, "price": 4.99}])).await;

    assert_eq!(resources.list(&ctx(), None).await.unwrap().value[0].id, 1);
    assert_eq!(resources.list_free(&ctx(), None).await.unwrap().value[0].id, 2);
    assert_eq!(resources.list_new(&ctx(), None).await.unwrap().value[0].id, 3);

    let premium = resources.list_premium(&ctx(), None).await.unwrap().value;
    assert!(premium[0].premium);
    assert_eq!(premium[0].price, 4.99);
}

#[tokio::test]
async fn resource_list_sends_options() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/resources"))
        .and(query_param("size", "10"))
        .and(query_param("sort", "-downloads"))
        .and(query_param("fields", "id,name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let options = ListOptions::new()
        .size(10)
        .sort(Sort::descending("downloads"))
        .fields(["id", "name"]);
    let answer = client.resources().list(&ctx(), Some(&options)).await.unwrap();
    assert!(answer.value.is_empty());
}

#[tokio::test]
async fn resources_by_versions() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/resources/for/1.19,1.20"))
        .and(query_param("method", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 5, "testedVersions": ["1.19", "1.20"]}])))
        .expect(1)
        .mount(&server)
        .await;

    let options = ResourceListByVersionsOptions {
        method: Some(VersionMatch::All),
        ..Default::default()
    };
    let answer = client
        .resources()
        .list_by_versions(&ctx(), &["1.19", "1.20"], Some(&options))
        .await
        .unwrap();
    assert_eq!(answer.value[0].tested_versions.len(), 2);
}

#[tokio::test]
async fn resources_by_versions_requires_a_version() {
    let (_server, client) = setup().await;
    let err = client
        .resources()
        .list_by_versions(&ctx(), &[], None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Encoding(EncodingError::EmptyValue { name: "versions" })
    ));
}

#[tokio::test]
async fn resource_details() {
    let (server, client) = setup().await;
    let resources = client.resources();

    mount_get(&server, "/resources/6245", json!({"id": 6245, "name": "PlaceholderAPI"})).await;
    mount_get(&server, "/resources/6245/author", json!({"id": 1, "name": "clip"})).await;
    mount_get(&server, "/resources/6245/reviews", json!([{"id": 10, "rating": {"average": 5.0}}])).await;
    mount_get(&server, "/resources/6245/updates", json!([{"id": 20}, {"id": 21}])).await;
    mount_get(&server, "/resources/6245/updates/latest", json!({"id": 21, "title": "2.11.6"})).await;
    mount_get(&server, "/resources/6245/versions", json!([{"id": 30}])).await;
    mount_get(&server, "/resources/6245/versions/latest", json!({"id": 31, "name": "2.11.6"})).await;
    mount_get(&server, "/resources/6245/versions/30", json!({"id": 30, "name": "2.11.5"})).await;

    assert_eq!(resources.get(&ctx(), 6245).await.unwrap().value.name, "PlaceholderAPI");
    assert_eq!(resources.get_author(&ctx(), 6245).await.unwrap().value.name, "clip");
    assert_eq!(resources.get_reviews(&ctx(), 6245, None).await.unwrap().value[0].rating.average, 5.0);
    assert_eq!(resources.get_updates(&ctx(), 6245, None).await.unwrap().value.len(), 2);
    assert_eq!(resources.get_latest_update(&ctx(), 6245).await.unwrap().value.title, "2.11.6");
    assert_eq!(resources.get_versions(&ctx(), 6245, None).await.unwrap().value[0].id, 30);
    assert_eq!(resources.get_latest_version(&ctx(), 6245).await.unwrap().value.id, 31);
    assert_eq!(resources.get_version(&ctx(), 6245, 30).await.unwrap().value.name, "2.11.5");
}

#[tokio::test]
async fn downloads_return_the_envelope_only() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/resources/6245/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x50, 0x4b, 0x03, 0x04]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resources/6245/versions/30/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x50, 0x4b]))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.resources().download(&ctx(), 6245).await.unwrap();
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.url.path(), "/resources/6245/download");

    let response = client
        .resources()
        .download_version(&ctx(), 6245, 30)
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn download_follows_redirects() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/resources/7/download"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/cdn/7.jar", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cdn/7.jar"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .mount(&server)
        .await;

    let response = client.resources().download(&ctx(), 7).await.unwrap();
    assert_eq!(response.url.path(), "/cdn/7.jar");
}

#[tokio::test]
async fn resource_search_escapes_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/search/resources/world%20edit%2F%3F"))
        .and(query_param("field", "tag"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 13932, "name": "WorldEdit"}])))
        .expect(1)
        .mount(&server)
        .await;

    let options = ResourceSearchOptions {
        field: Some(SearchField::Tag),
        ..Default::default()
    };
    let answer = client
        .resources()
        .search(&ctx(), "world edit/?", Some(&options))
        .await
        .unwrap();
    assert_eq!(answer.value[0].name, "WorldEdit");
}

#[tokio::test]
async fn empty_search_query_is_rejected() {
    let (_server, client) = setup().await;
    let err = client.search().resources(&ctx(), "", None).await.unwrap_err();
    assert!(matches!(err, ApiError::Encoding(EncodingError::EmptyValue { name: "query" })));
}

#[tokio::test]
async fn authors() {
    let (server, client) = setup().await;
    let authors = client.authors();

    mount_get(&server, "/authors", json!([{"id": 1}, {"id": 2}])).await;
    mount_get(&server, "/authors/1", json!({"id": 1, "name": "inventivetalent", "identities": {"github": "InventivetalentDev"}})).await;
    mount_get(&server, "/authors/1/resources", json!([{"id": 6245}])).await;
    mount_get(&server, "/authors/1/reviews", json!([{"id": 99, "resource": 6245}])).await;
    mount_get(&server, "/search/authors/inventive", json!([{"id": 1}])).await;

    assert_eq!(authors.list(&ctx(), None).await.unwrap().value.len(), 2);

    let author = authors.get(&ctx(), 1).await.unwrap().value;
    assert_eq!(author.identities["github"], "InventivetalentDev");

    assert_eq!(authors.get_resources(&ctx(), 1, None).await.unwrap().value[0].id, 6245);
    assert_eq!(authors.get_reviews(&ctx(), 1, None).await.unwrap().value[0].resource, 6245);
    assert_eq!(authors.search(&ctx(), "inventive", None).await.unwrap().value[0].id, 1);
}

#[tokio::test]
async fn search_group_delegates() {
    let (server, client) = setup().await;

    mount_get(&server, "/search/resources/luckperms", json!([{"id": 28140}])).await;
    mount_get(&server, "/search/authors/luck", json!([{"id": 100356}])).await;

    let resources = client.search().resources(&ctx(), "luckperms", None).await.unwrap();
    assert_eq!(resources.value[0].id, 28140);
    let authors = client.search().authors(&ctx(), "luck", None).await.unwrap();
    assert_eq!(authors.value[0].id, 100356);
}

#[tokio::test]
async fn categories() {
    let (server, client) = setup().await;
    let categories = client.categories();

    mount_get(&server, "/categories", json!([{"id": 2, "name": "Bungee - Spigot"}])).await;
    mount_get(&server, "/categories/2", json!({"id": 2, "name": "Bungee - Spigot"})).await;
    mount_get(&server, "/categories/2/resources", json!([{"id": 3}])).await;

    assert_eq!(categories.list(&ctx(), None).await.unwrap().value[0].id, 2);
    assert_eq!(categories.get(&ctx(), 2).await.unwrap().value.name, "Bungee - Spigot");
    assert_eq!(categories.get_resources(&ctx(), 2, None).await.unwrap().value[0].id, 3);
}

#[tokio::test]
async fn status() {
    let (server, client) = setup().await;

    mount_get(
        &server,
        "/status",
        json!({"status": {"server": {"name": "spiget", "mode": "api"}}, "stats": {"resources": 12, "resource_updates": 3}}),
    )
    .await;

    let status = client.status().get(&ctx()).await.unwrap().value;
    assert_eq!(status.status.server.mode, "api");
    assert_eq!(status.stats.resources, 12);
    assert_eq!(status.stats.resource_updates, 3);
}

#[tokio::test]
async fn webhooks() {
    let (server, client) = setup().await;
    let webhook = client.webhook();

    mount_get(&server, "/webhook/events", json!({"events": ["resource-update", "new-resource"]})).await;
    mount_get(&server, "/webhook/status/abc", json!({"status": 0, "failedConnections": 2})).await;

    Mock::given(method("POST"))
        .and(path("/webhook/register"))
        .and(body_json(json!({"url": "https://example.com/hook", "events": ["resource-update"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc", "secret": "s3cr3t"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/webhook/delete/abc/s3cr3t"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let events = webhook.events(&ctx()).await.unwrap().value;
    assert_eq!(events.events.len(), 2);

    let registered = webhook
        .register(&ctx(), "https://example.com/hook", &["resource-update".to_string()])
        .await
        .unwrap()
        .value;
    assert_eq!(
        registered,
        Webhook {
            id: "abc".to_string(),
            secret: "s3cr3t".to_string(),
        }
    );

    let status = webhook.status(&ctx(), "abc").await.unwrap().value;
    assert_eq!(status.failed_connections, 2);

    let response = webhook.delete(&ctx(), &registered).await.unwrap();
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn webhook_delete_requires_secret() {
    let (_server, client) = setup().await;
    let hook = Webhook {
        id: "abc".to_string(),
        secret: String::new(),
    };
    let err = client.webhook().delete(&ctx(), &hook).await.unwrap_err();
    assert!(matches!(err, ApiError::Encoding(EncodingError::EmptyValue { name: "secret" })));
}

fn is_dot_segment(err: &ApiError, expected: &str) -> bool {
    matches!(err, ApiError::Encoding(EncodingError::DotSegment { segment, .. }) if segment == expected)
}

#[tokio::test]
async fn dot_segments_never_reach_the_service() {
    let (server, client) = setup().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.resources().search(&ctx(), "..", None).await.unwrap_err();
    assert!(is_dot_segment(&err, ".."));

    let err = client.authors().search(&ctx(), ".", None).await.unwrap_err();
    assert!(is_dot_segment(&err, "."));

    let err = client
        .resources()
        .list_by_versions(&ctx(), &["1.20", ".."], None)
        .await
        .unwrap_err();
    assert!(is_dot_segment(&err, ".."));

    let err = client.webhook().status(&ctx(), "..").await.unwrap_err();
    assert!(is_dot_segment(&err, ".."));

    let hook = Webhook {
        id: "..".to_string(),
        secret: "events".to_string(),
    };
    let err = client.webhook().delete(&ctx(), &hook).await.unwrap_err();
    assert!(is_dot_segment(&err, ".."));

    let hook = Webhook {
        id: "abc".to_string(),
        secret: ".".to_string(),
    };
    let err = client.webhook().delete(&ctx(), &hook).await.unwrap_err();
    assert!(is_dot_segment(&err, "."));
}

#[tokio::test]
async fn dotted_queries_stay_one_segment() {
    let (server, client) = setup().await;

    mount_get(&server, "/search/resources/...", json!([{"id": 1}])).await;

    let answer = client.resources().search(&ctx(), "...", None).await.unwrap();
    assert_eq!(answer.value[0].id, 1);
}

#[tokio::test]
async fn downloads_accept_any_content_type() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/resources/6245/download"))
        .and(header("accept", "*/*"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x50, 0x4b]))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.resources().download(&ctx(), 6245).await.unwrap();
    assert_eq!(response.status, StatusCode::OK);
}
