#![cfg(feature = "server")]

// HTTP contract tests - drive the router in-process, one fresh store per test

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use estate_catalog::api::{app, AppState};
use estate_catalog::{seed, BlogPost, ContactSubmission, MemStorage, Property};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState::new(Arc::new(MemStorage::new())), "/api")
}

fn seeded_app() -> Router {
    let storage = Arc::new(MemStorage::new());
    seed::load_sample_data(storage.as_ref()).unwrap();
    app(AppState::new(storage), "/api")
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn plot_a() -> Value {
    json!({
        "title": "Plot A",
        "price": 1000000,
        "area": 5,
        "areaUnit": "acres",
        "propertyType": "land",
        "listingStatus": "for_sale",
        "featuredImage": "x",
        "location": "Pune",
        "address": "a",
        "city": "Pune",
        "state": "MH",
        "description": "d"
    })
}

fn article(title: &str, category: &str) -> Value {
    json!({
        "title": title,
        "content": "<p>body</p>",
        "summary": "summary",
        "authorName": "Priya Iyer",
        "category": category,
        "featuredImage": "img",
        "isFeatured": true
    })
}

fn inquiry() -> Value {
    json!({
        "name": "Meera",
        "email": "meera@example.com",
        "phone": "+91 98200 00000",
        "interest": "buying",
        "message": "Is the plot still available?"
    })
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[tokio::test]
async fn test_create_property_assigns_sequential_ids() {
    let app = test_app();

    let (status, first) = send_json(&app, Method::POST, "/api/properties", Some(plot_a())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["id"], 1);
    assert_eq!(first["isFeatured"], false);
    assert!(first["createdAt"].is_string());
    assert_eq!(first["priceUnit"], "₹");

    let (status, second) = send_json(&app, Method::POST, "/api/properties", Some(plot_a())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["id"], 2);
}

#[tokio::test]
async fn test_get_property_matches_created() {
    let app = test_app();

    let (_, created) = send_json(&app, Method::POST, "/api/properties", Some(plot_a())).await;
    let (status, fetched) = send_json(&app, Method::GET, "/api/properties/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let property: Property = serde_json::from_value(fetched).unwrap();
    assert_eq!(property.title, "Plot A");
}

#[tokio::test]
async fn test_get_property_not_found_vs_bad_id() {
    let app = test_app();

    let (status, body) = send_json(&app, Method::GET, "/api/properties/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Property not found");

    let (status, body) = send_json(&app, Method::GET, "/api/properties/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid property ID");
}

#[tokio::test]
async fn test_property_type_filter() {
    let app = test_app();
    send(&app, Method::POST, "/api/properties", Some(plot_a())).await;

    let mut office = plot_a();
    office["propertyType"] = json!("commercial");
    send(&app, Method::POST, "/api/properties", Some(office)).await;

    let (status, body) = send_json(&app, Method::GET, "/api/properties/type/land", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send_json(&app, Method::GET, "/api/properties/type/industrial", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send_json(&app, Method::GET, "/api/properties/type/houseboat", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid property type");
}

#[tokio::test]
async fn test_featured_properties() {
    let app = seeded_app();

    let (status, body) = send_json(&app, Method::GET, "/api/properties/featured", None).await;
    assert_eq!(status, StatusCode::OK);
    let featured: Vec<Property> = serde_json::from_value(body).unwrap();
    assert_eq!(featured.len(), 3);
    assert!(featured.iter().all(|p| p.is_featured));

    let (status, body) = send_json(&app, Method::GET, "/api/properties/featured/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send_json(&app, Method::GET, "/api/properties/featured/lots", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid limit value");
}

#[tokio::test]
async fn test_create_property_validation_errors() {
    let app = test_app();

    let mut input = plot_a();
    input["propertyType"] = json!("houseboat");
    input["price"] = json!("expensive");
    input.as_object_mut().unwrap().remove("city");

    let (status, body) = send_json(&app, Method::POST, "/api/properties", Some(input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation error");

    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields.len(), 3);
    assert!(fields.contains(&"propertyType"));
    assert!(fields.contains(&"price"));
    assert!(fields.contains(&"city"));

    // Nothing was stored
    let (_, all) = send_json(&app, Method::GET, "/api/properties", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/properties")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_property() {
    let app = test_app();
    let (_, created) = send_json(&app, Method::POST, "/api/properties", Some(plot_a())).await;

    let (status, updated) = send_json(
        &app,
        Method::PUT,
        "/api/properties/1",
        Some(json!({ "listingStatus": "sold", "isFeatured": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["listingStatus"], "sold");
    assert_eq!(updated["isFeatured"], true);
    assert_eq!(updated["title"], created["title"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, unchanged) = send_json(&app, Method::PUT, "/api/properties/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged, updated);
}

#[tokio::test]
async fn test_update_property_errors() {
    let app = test_app();
    send(&app, Method::POST, "/api/properties", Some(plot_a())).await;

    let (status, _) = send_json(&app, Method::PUT, "/api/properties/7", Some(json!({ "price": 5 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/api/properties/1",
        Some(json!({ "listingStatus": "auction" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "listingStatus");

    let (status, _) = send_json(&app, Method::PUT, "/api/properties/x", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Rejected update left the record untouched
    let (_, current) = send_json(&app, Method::GET, "/api/properties/1", None).await;
    assert_eq!(current["listingStatus"], "for_sale");
}

#[tokio::test]
async fn test_delete_property() {
    let app = test_app();
    send(&app, Method::POST, "/api/properties", Some(plot_a())).await;

    let (status, body) = send(&app, Method::DELETE, "/api/properties/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, Method::DELETE, "/api/properties/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/properties/one", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Freed id is not handed out again
    let (_, next) = send_json(&app, Method::POST, "/api/properties", Some(plot_a())).await;
    assert_eq!(next["id"], 2);
}

#[tokio::test]
async fn test_property_id_beyond_id_space_is_not_found() {
    let app = test_app();
    send(&app, Method::POST, "/api/properties", Some(plot_a())).await;

    let (status, body) = send_json(&app, Method::GET, "/api/properties/4294967296", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Property not found");

    let (status, _) = send_json(&app, Method::PUT, "/api/properties/4294967296", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/properties/4294967296", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_signed_property_id_is_bad_request() {
    let app = test_app();
    send(&app, Method::POST, "/api/properties", Some(plot_a())).await;

    let (status, body) = send_json(&app, Method::GET, "/api/properties/+1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid property ID");

    let (status, _) = send_json(&app, Method::GET, "/api/properties/-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// BLOG POSTS
// ============================================================================

#[tokio::test]
async fn test_blog_post_lifecycle() {
    let app = test_app();

    let (status, created) =
        send_json(&app, Method::POST, "/api/blog-posts", Some(article("Farmland 101", "Investment"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let post: BlogPost = serde_json::from_value(created.clone()).unwrap();
    assert_eq!(post.id, 1);
    assert!(created["publishedDate"].is_string());

    let (status, updated) = send_json(
        &app,
        Method::PUT,
        "/api/blog-posts/1",
        Some(json!({ "summary": "updated" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["summary"], "updated");
    assert_eq!(updated["publishedDate"], created["publishedDate"]);

    let (status, _) = send(&app, Method::DELETE, "/api/blog-posts/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_json(&app, Method::GET, "/api/blog-posts/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Blog post not found");
}

#[tokio::test]
async fn test_blog_category_filter() {
    let app = test_app();
    send(&app, Method::POST, "/api/blog-posts", Some(article("a", "Finance"))).await;
    send(&app, Method::POST, "/api/blog-posts", Some(article("b", "finance"))).await;

    let (status, body) = send_json(&app, Method::GET, "/api/blog-posts/category/Finance", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "a");

    let (status, body) = send_json(&app, Method::GET, "/api/blog-posts/category/Unknown", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_featured_blog_posts_default_limit() {
    let app = test_app();
    for i in 0..5 {
        send(&app, Method::POST, "/api/blog-posts", Some(article(&format!("post {}", i), "News"))).await;
    }

    let (status, body) = send_json(&app, Method::GET, "/api/blog-posts/featured", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = send_json(&app, Method::GET, "/api/blog-posts/featured/10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_update_blog_post_bad_id() {
    let app = test_app();

    let (status, body) = send_json(&app, Method::PUT, "/api/blog-posts/abc", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid blog post ID");
}

#[tokio::test]
async fn test_update_blog_post_invalid_body() {
    let app = test_app();
    send(&app, Method::POST, "/api/blog-posts", Some(article("a", "Finance"))).await;

    let (status, body) = send_json(&app, Method::PUT, "/api/blog-posts/1", Some(json!({ "title": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation error");
    assert_eq!(body["errors"][0]["field"], "title");

    let (_, current) = send_json(&app, Method::GET, "/api/blog-posts/1", None).await;
    assert_eq!(current["title"], "a");
}

#[tokio::test]
async fn test_update_blog_post_missing() {
    let app = test_app();

    let (status, body) = send_json(&app, Method::PUT, "/api/blog-posts/5", Some(json!({ "summary": "s" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Blog post not found");
}

#[tokio::test]
async fn test_delete_blog_post_missing() {
    let app = test_app();

    let (status, body) = send_json(&app, Method::DELETE, "/api/blog-posts/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Blog post not found");

    let (status, body) = send_json(&app, Method::DELETE, "/api/blog-posts/five", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid blog post ID");
}

#[tokio::test]
async fn test_featured_blog_posts_bad_limit() {
    let app = test_app();

    let (status, body) = send_json(&app, Method::GET, "/api/blog-posts/featured/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid limit value");
}

// ============================================================================
// CONTACT SUBMISSIONS
// ============================================================================

#[tokio::test]
async fn test_get_contact_submission_errors() {
    let app = test_app();

    let (status, body) = send_json(&app, Method::GET, "/api/contact/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid submission ID");

    let (status, body) = send_json(&app, Method::GET, "/api/contact/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Submission not found");
}

#[tokio::test]
async fn test_contact_submission_and_mark_read() {
    let app = test_app();

    let (status, created) = send_json(&app, Method::POST, "/api/contact", Some(inquiry())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["isRead"], false);
    assert!(created["submittedAt"].is_string());

    let (status, read) = send_json(&app, Method::PATCH, "/api/contact/1/read", None).await;
    assert_eq!(status, StatusCode::OK);
    let submission: ContactSubmission = serde_json::from_value(read).unwrap();
    assert!(submission.is_read);

    let (status, again) = send_json(&app, Method::PATCH, "/api/contact/1/read", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["isRead"], true);

    let (status, _) = send_json(&app, Method::PATCH, "/api/contact/9/read", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send_json(&app, Method::PATCH, "/api/contact/nine/read", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid submission ID");
}

#[tokio::test]
async fn test_contact_email_validation() {
    let app = test_app();

    let mut input = inquiry();
    input["email"] = json!("meera.example.com");

    let (status, body) = send_json(&app, Method::POST, "/api/contact", Some(input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!([{ "field": "email", "message": "Invalid email" }]));
}

#[tokio::test]
async fn test_contact_list_and_get() {
    let app = test_app();
    send(&app, Method::POST, "/api/contact", Some(inquiry())).await;
    send(&app, Method::POST, "/api/contact", Some(inquiry())).await;

    let (status, all) = send_json(&app, Method::GET, "/api/contact", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, one) = send_json(&app, Method::GET, "/api/contact/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["id"], 2);

    // No general update or delete for submissions
    let (status, _) = send(&app, Method::DELETE, "/api/contact/2", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// ============================================================================
// MISC
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = test_app();

    let (status, body) = send_json(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], estate_catalog::VERSION);
}

#[tokio::test]
async fn test_custom_prefix() {
    let app = app(AppState::new(Arc::new(MemStorage::new())), "/v1");

    let (status, _) = send(&app, Method::GET, "/v1/properties", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/api/properties", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
