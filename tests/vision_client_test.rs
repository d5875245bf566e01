//! REST client tests against a local mock server

use base64::Engine;
use product_search::client::{
    ImageAnnotator, ListStep, ProductSearchService, ProductSetCursor, VisionClient,
};
use product_search::context::CallContext;
use product_search::error::{ProductSearchError, RemoteError};
use product_search::operations::{
    delete_product, list_product_sets, search_similar_products, SimilarProductsQuery,
};
use product_search::payload::ImagePayload;
use product_search_common::{ImageContext, IndexTime, ProductSearchParams, ResourceName};
use serde_json::json;
use std::io::Cursor;
use std::time::Duration;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn client(server: &MockServer) -> VisionClient {
    VisionClient::new(server.uri(), TOKEN)
        .expect("client")
        .with_page_size(2)
}

fn png_payload() -> ImagePayload {
    let img = image::RgbImage::new(2, 2);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    ImagePayload::from_bytes(buf.into_inner(), "memory").unwrap()
}

fn product_set_json(index: u32) -> serde_json::Value {
    json!({
        "name": format!("projects/p/locations/l/productSets/s{}", index),
        "displayName": format!("Set {}", index),
        "indexTime": "1970-01-01T00:00:10.000000020Z"
    })
}

/// DELETE goes to /v1/{name} with a bearer token
#[tokio::test]
async fn test_delete_sends_bearer_request() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/projects/p/locations/l/products/x"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .delete(&ResourceName::product("p", "l", "x"))
        .await
        .expect("delete failed");
}

/// Quota project travels as x-goog-user-project
#[tokio::test]
async fn test_quota_project_header() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(header("x-goog-user-project", "billing-proj"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .with_quota_project("billing-proj")
        .delete(&ResourceName::reference_image("p", "l", "x", "r"))
        .await
        .expect("delete failed");
}

/// Google error envelope becomes RemoteError::Status
#[tokio::test]
async fn test_delete_not_found_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": 404,
                "message": "Product not found.",
                "status": "NOT_FOUND"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .delete(&ResourceName::product("p", "l", "missing"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RemoteError::Status {
            http_status: 404,
            status: "NOT_FOUND".into(),
            message: "Product not found.".into(),
        }
    );
}

/// Unreachable endpoint is a transport error
#[tokio::test]
async fn test_transport_error() {
    let client = VisionClient::new("http://127.0.0.1:9", TOKEN).unwrap();
    let err = client
        .delete(&ResourceName::product("p", "l", "x"))
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::Transport(_)));
}

/// The cursor follows nextPageToken and then reports exhaustion
#[tokio::test]
async fn test_cursor_follows_page_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/projects/p/locations/l/productSets"))
        .and(query_param("pageSize", "2"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "productSets": [product_set_json(1), product_set_json(2)],
            "nextPageToken": "page-2"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/projects/p/locations/l/productSets"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "productSets": [product_set_json(3)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut cursor = client.list_product_sets(&ResourceName::location("p", "l"));

    let mut names = Vec::new();
    loop {
        match cursor.next().await {
            ListStep::Item(set) => {
                assert_eq!(set.index_time, IndexTime::new(10, 20));
                names.push(set.display_name);
            }
            ListStep::Exhausted => break,
            ListStep::Failed(e) => panic!("unexpected failure: {}", e),
        }
    }

    assert_eq!(names, vec!["Set 1", "Set 2", "Set 3"]);
    // not restartable
    assert_eq!(cursor.next().await, ListStep::Exhausted);
}

/// An empty location yields Exhausted on the first step
#[tokio::test]
async fn test_cursor_empty_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut cursor = client.list_product_sets(&ResourceName::location("p", "l"));
    assert_eq!(cursor.next().await, ListStep::Exhausted);
}

/// A failing page ends the cursor
#[tokio::test]
async fn test_cursor_failure_then_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": 403, "message": "denied", "status": "PERMISSION_DENIED"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut cursor = client.list_product_sets(&ResourceName::location("p", "l"));

    match cursor.next().await {
        ListStep::Failed(RemoteError::Status { status, .. }) => {
            assert_eq!(status, "PERMISSION_DENIED")
        }
        other => panic!("unexpected step: {:?}", other),
    }
    assert_eq!(cursor.next().await, ListStep::Exhausted);
}

/// Listing over HTTP renders every page, in order
#[tokio::test]
async fn test_list_product_sets_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "productSets": [product_set_json(1)],
            "nextPageToken": "t2"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("pageToken", "t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "productSets": [product_set_json(2)]
        })))
        .mount(&server)
        .await;

    let mut out: Vec<u8> = Vec::new();
    list_product_sets(&client(&server), &CallContext::default(), &mut out, "p", "l")
        .await
        .expect("listing failed");

    let text = String::from_utf8(out).unwrap();
    let first = text.find("productSets/s1").expect("s1 missing");
    let second = text.find("productSets/s2").expect("s2 missing");
    assert!(first < second);
    assert_eq!(text.matches("Product set index time:").count(), 2);
    assert!(text.contains("  seconds: 10\n  nanos: 20\n"));
}

/// Annotate request carries base64 content, feature and search params
#[tokio::test]
async fn test_annotate_request_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images:annotate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responses": [{
                "productSearchResults": {
                    "indexTime": "1970-01-01T00:01:00Z",
                    "results": [{
                        "product": {"name": "products/p1", "displayName": "Shoe A"},
                        "score": 0.91,
                        "image": "images/1.jpg"
                    }]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = png_payload();
    let set = ResourceName::product_set("p", "l", "s");
    let context: ImageContext = ProductSearchParams::new(&set, "apparel-v2", "style=womens").into();

    let results = client(&server)
        .product_search(&payload, &context)
        .await
        .expect("search failed");

    assert_eq!(results.index_time, IndexTime::new(60, 0));
    assert_eq!(results.results.len(), 1);
    assert_eq!(results.results[0].product.display_name, "Shoe A");

    let requests = server.received_requests().await.expect("recording enabled");
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let request = &body["requests"][0];

    let content = request["image"]["content"].as_str().unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(content)
        .unwrap();
    assert_eq!(decoded, payload.as_bytes());
    assert_eq!(request["features"], json!([{"type": "PRODUCT_SEARCH"}]));
    assert_eq!(
        request["imageContext"]["productSearchParams"],
        json!({
            "productSet": "projects/p/locations/l/productSets/s",
            "productCategories": ["apparel-v2"],
            "filter": "style=womens"
        })
    );
}

/// Per-image error inside a 200 response is a remote failure
#[tokio::test]
async fn test_annotate_embedded_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responses": [{"error": {"code": 3, "message": "Bad image data."}}]
        })))
        .mount(&server)
        .await;

    let set = ResourceName::product_set("p", "l", "s");
    let context: ImageContext = ProductSearchParams::new(&set, "toys-v2", "").into();
    let err = client(&server)
        .product_search(&png_payload(), &context)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RemoteError::Status {
            http_status: 200,
            status: "INVALID_ARGUMENT".into(),
            message: "Bad image data.".into(),
        }
    );
}

/// Missing responses array is malformed
#[tokio::test]
async fn test_annotate_without_responses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let set = ResourceName::product_set("p", "l", "s");
    let context: ImageContext = ProductSearchParams::new(&set, "toys-v2", "").into();
    let err = client(&server)
        .product_search(&png_payload(), &context)
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::Malformed(_)));
}

/// End to end search from a file on disk
#[tokio::test]
async fn test_search_similar_products_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responses": [{
                "productSearchResults": {
                    "results": [
                        {"product": {"name": "products/p1", "displayName": "Shoe A"}, "score": 0.91, "image": "images/1.jpg"},
                        {"product": {"name": "products/p2", "displayName": "Shoe B"}, "score": 0.42, "image": "images/2.jpg"}
                    ]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("query.png");
    std::fs::write(&file, png_payload().as_bytes()).unwrap();

    let query = SimilarProductsQuery {
        project_id: "p",
        location: "l",
        product_set_id: "s",
        product_category: "apparel-v2",
        filter: "",
    };

    let mut out: Vec<u8> = Vec::new();
    search_similar_products(&client(&server), &CallContext::default(), &mut out, &query, &file)
        .await
        .expect("search failed");

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Product set index time:\n  seconds: 0\n  nanos: 0\n"));
    let a = text.find("Product display name: Shoe A").unwrap();
    let b = text.find("Product display name: Shoe B").unwrap();
    assert!(a < b);
    assert!(text.contains("Score(Confidence): 0.42\n"));
}

/// A slow service trips the deadline
#[tokio::test]
async fn test_deadline_aborts_slow_call() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let ctx = CallContext::new(Some(Duration::from_millis(100)));
    let mut out: Vec<u8> = Vec::new();
    let err = delete_product(&client(&server), &ctx, &mut out, "p", "l", "x")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProductSearchError::Remote(RemoteError::DeadlineExceeded(_))
    ));
    assert!(out.is_empty());
}
