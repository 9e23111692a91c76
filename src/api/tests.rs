//! HTTP tests for the API client against the in-process stub

use std::sync::Arc;

use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use super::testing::{envelope, image_json, message_json, page_json, post_json, StubApi};
use super::{upload_path, ApiError};
use crate::models::{
    ChangeCredentialsInput, ChangePasswordInput, ContactInput, CreatePageInput, ListQuery, LoginInput, NewGalleryImage,
    Paged, Settings, UpdatePageInput, UpdatePostInput, UploadFile,
};
use crate::session::{MemoryTokenStore, Session};

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let stub = StubApi::start().await;
    stub.on("GET", "/api/page/home", 200, page_json("p1", "home", true));

    let page = stub.client().homepage().await.unwrap();
    assert!(page.is_homepage);
    assert!(stub.last().header("authorization").is_none());
}

#[tokio::test]
async fn test_token_read_before_each_request() {
    let stub = StubApi::start().await;
    stub.on("GET", "/api/me", 200, json!({"username": "admin", "must_change_password": false}));

    let session = Arc::new(Session::open(MemoryTokenStore::boxed()));
    let api = stub.client_with(session.clone());

    api.me().await.ok();
    assert!(stub.last().header("authorization").is_none());

    session.login("tok-abc").unwrap();
    assert_ok!(api.me().await);
    assert_eq!(stub.last().header("authorization"), Some("Bearer tok-abc"));

    session.logout().unwrap();
    assert_ok!(api.me().await);
    assert!(stub.last().header("authorization").is_none());
}

#[tokio::test]
async fn test_not_found_maps_to_status_error() {
    let stub = StubApi::start().await;
    stub.on("GET", "/api/page/missing", 404, json!({"detail": "Page not found"}));

    let err = assert_err!(stub.client().page_by_slug("missing").await);
    assert!(err.is_not_found());
    assert_eq!(err.detail(), Some("Page not found"));
}

#[tokio::test]
async fn test_slug_is_percent_encoded() {
    let stub = StubApi::start().await;
    stub.on("GET", "/api/blog/hello%20world", 200, post_json("b1", "hello world", &[]));

    let post = stub.client().post_by_slug("hello world").await.unwrap();
    assert_eq!(post.slug, "hello world");
    assert_eq!(stub.last().path, "/api/blog/hello%20world");
}

#[tokio::test]
async fn test_list_query_serialized_as_parameters() {
    let stub = StubApi::start().await;
    stub.on(
        "GET",
        "/api/blog",
        200,
        envelope("posts", vec![post_json("b1", "one", &["rust"])], 2, 3),
    );

    let query = ListQuery::new(10)
        .with_search("retro web")
        .with_tags(vec!["rust".to_string(), "web".to_string()])
        .with_published(Some(true))
        .with_page(2);
    let list = stub.client().list_posts(&query).await.unwrap();

    assert_eq!(list.items().len(), 1);
    assert_eq!(list.pagination().current_page, 2);
    assert_eq!(list.pagination().total_pages, 3);

    let request = stub.last();
    assert_eq!(request.query_param("page").as_deref(), Some("2"));
    assert_eq!(request.query_param("limit").as_deref(), Some("10"));
    assert_eq!(request.query_param("search").as_deref(), Some("retro web"));
    assert_eq!(request.query_param("tags").as_deref(), Some("rust,web"));
    assert_eq!(request.query_param("published").as_deref(), Some("true"));
    assert!(request.query_param("featured").is_none());
}

#[tokio::test]
async fn test_bare_array_list_is_accepted() {
    let stub = StubApi::start().await;
    stub.on(
        "GET",
        "/api/pages",
        200,
        json!([page_json("p1", "home", true), page_json("p2", "about", false)]),
    );

    let list = stub.client().list_pages(&ListQuery::new(20)).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.pagination.total_pages, 1);
}

#[tokio::test]
async fn test_tags_accept_both_shapes() {
    let stub = StubApi::start().await;
    stub.on("GET", "/api/blog/tags", 200, json!(["rust", "web"]));
    stub.on("GET", "/api/gallery/tags", 200, json!({"tags": ["retro"]}));

    let api = stub.client();
    assert_eq!(api.blog_tags().await.unwrap(), vec!["rust", "web"]);
    assert_eq!(api.gallery_tags().await.unwrap(), vec!["retro"]);
}

#[tokio::test]
async fn test_create_page_duplicate_slug_detail() {
    let stub = StubApi::start().await;
    stub.on("POST", "/api/pages", 400, json!({"detail": "Page with this slug already exists"}));

    let input = CreatePageInput {
        title: "About".to_string(),
        slug: "about".to_string(),
        content: "<p>hi</p>".to_string(),
    };
    let err = assert_err!(stub.client().create_page(&input).await);
    assert_eq!(err.message(), "Page with this slug already exists");
    assert_eq!(
        stub.last().body_json(),
        json!({"title": "About", "slug": "about", "content": "<p>hi</p>"})
    );
}

#[tokio::test]
async fn test_update_sends_partial_payload() {
    let stub = StubApi::start().await;
    stub.on("PUT", "/api/pages/p1", 200, json!({"message": "Page updated successfully"}));
    stub.on("PUT", "/api/blog/b1", 200, json!({"message": "Blog post updated successfully"}));

    let api = stub.client();
    api.update_page(
        "p1",
        &UpdatePageInput {
            title: Some("New".to_string()),
            content: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(stub.last().body_json(), json!({"title": "New"}));

    api.update_post(
        "b1",
        &UpdatePostInput {
            published: Some(false),
            ..UpdatePostInput::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(stub.last().method, "PUT");
    assert_eq!(stub.last().body_json(), json!({"published": false}));
}

#[tokio::test]
async fn test_deletes_use_ids() {
    let stub = StubApi::start().await;
    stub.on("DELETE", "/api/pages/p1", 200, json!({}));
    stub.on("DELETE", "/api/blog/b1", 200, json!({}));
    stub.on("DELETE", "/api/gallery/g1", 200, json!({}));
    stub.on("DELETE", "/api/contact-messages/m1", 200, json!({}));

    let api = stub.client();
    assert_ok!(api.delete_page("p1").await);
    assert_ok!(api.delete_post("b1").await);
    assert_ok!(api.delete_gallery_image("g1").await);
    assert_ok!(api.delete_contact_message("m1").await);

    let paths: Vec<_> = stub.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec![
            "/api/pages/p1",
            "/api/blog/b1",
            "/api/gallery/g1",
            "/api/contact-messages/m1"
        ]
    );
}

#[tokio::test]
async fn test_gallery_upload_is_multipart() {
    let stub = StubApi::start().await;
    stub.on("POST", "/api/gallery", 200, image_json("g1", true));

    let image = NewGalleryImage {
        title: "Sunset".to_string(),
        description: "Over the bay".to_string(),
        tags: vec!["sky".to_string(), "sea".to_string()],
        is_featured: true,
        file: UploadFile::new("sunset.png", vec![1, 2, 3]),
    };
    assert_ok!(stub.client().upload_gallery_image(&image).await);

    let request = stub.last();
    assert!(request
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data"));
    let body = request.body_text();
    assert!(body.contains(r#"name="file"; filename="sunset.png""#));
    assert!(body.to_lowercase().contains("content-type: image/png"));
    assert!(body.contains("sky,sea"));
    assert!(body.contains(r#"name="is_featured""#));
}

#[tokio::test]
async fn test_contact_rate_limit_detail() {
    let stub = StubApi::start().await;
    stub.on(
        "POST",
        "/api/contact",
        429,
        json!({"detail": "Please wait 4 minutes before sending another message"}),
    );

    let input = ContactInput {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        message: "Hi".to_string(),
    };
    let err = assert_err!(stub.client().send_contact(&input).await);
    assert!(err.is_rate_limited());
    assert_eq!(
        err.detail(),
        Some("Please wait 4 minutes before sending another message")
    );
}

#[tokio::test]
async fn test_contact_messages_envelope() {
    let stub = StubApi::start().await;
    stub.on(
        "GET",
        "/api/contact-messages",
        200,
        envelope("messages", vec![message_json("m1"), message_json("m2")], 1, 1),
    );

    let list = stub
        .client()
        .list_contact_messages(&ListQuery::new(20))
        .await
        .unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.items[0].email, "ada@example.com");
}

#[tokio::test]
async fn test_login_and_change_credentials() {
    let stub = StubApi::start().await;
    stub.on(
        "POST",
        "/api/login",
        200,
        json!({"access_token": "tok", "token_type": "bearer", "must_change_password": true}),
    );
    stub.on("POST", "/api/change-credentials", 200, json!({"message": "ok"}));

    let api = stub.client();
    let response = api
        .login(&LoginInput {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.access_token, "tok");
    assert!(response.must_change_password);
    assert!(!api.session().is_authenticated());

    api.change_credentials(&ChangeCredentialsInput {
        old_password: "admin123".to_string(),
        new_username: "owner".to_string(),
        new_password: "s3cret pass".to_string(),
    })
    .await
    .unwrap();

    let request = stub.last();
    assert_eq!(
        request.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(
        request.body_text(),
        "old_password=admin123&new_username=owner&new_password=s3cret+pass"
    );
}

#[tokio::test]
async fn test_change_password_wrong_old_password() {
    let stub = StubApi::start().await;
    stub.on("POST", "/api/change-password", 400, json!({"detail": "Invalid old password"}));

    let input = ChangePasswordInput {
        old_password: "nope".to_string(),
        new_password: "fresh".to_string(),
    };
    let err = assert_err!(stub.client().change_password(&input).await);
    assert_eq!(err.detail(), Some("Invalid old password"));
    assert_eq!(stub.last().body_text(), "old_password=nope&new_password=fresh");
}

#[tokio::test]
async fn test_login_requires_credentials_before_sending() {
    let stub = StubApi::start().await;
    let err = assert_err!(stub.client().login(&LoginInput::default()).await);
    assert!(matches!(err, ApiError::InvalidRequest(_)));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_settings_roundtrip_form_encoded() {
    let stub = StubApi::start().await;
    stub.on("GET", "/api/settings", 200, json!({"site_title": "Mine", "contact_cooldown": 60}));
    stub.on("PUT", "/api/settings", 200, json!({"message": "Settings updated successfully"}));

    let api = stub.client();
    let mut settings = api.settings().await.unwrap();
    assert_eq!(settings.contact_cooldown, 60);

    settings.site_title = "Sector Five".to_string();
    assert_ok!(api.update_settings(&settings).await);

    let body = stub.last().body_text();
    assert!(body.contains("site_title=Sector+Five"));
    assert!(body.contains("contact_cooldown=60"));
    assert!(body.contains("background_type=default"));
    assert!(!body.contains("background_value"));
}

#[tokio::test]
async fn test_public_settings_defaults() {
    let stub = StubApi::start().await;
    stub.on("GET", "/api/public-settings", 200, json!({"background_type": "color", "background_value": "#000"}));

    let public = stub.client().public_settings().await.unwrap();
    assert_eq!(public.site_title, Settings::default().site_title);
    assert_eq!(public.background_value.as_deref(), Some("#000"));
}

#[tokio::test]
async fn test_analytics_query_and_report() {
    let stub = StubApi::start().await;
    stub.on(
        "GET",
        "/api/analytics",
        200,
        json!({
            "total_visits": 120,
            "unique_visitors": 30,
            "recent_visits": [],
            "top_pages": [{"_id": "/", "count": 80}],
            "pagination": {"current_page": 1, "total_pages": 3, "total_results": 120}
        }),
    );

    let mut query = ListQuery::new(50);
    query.set_country("Finland");
    let report = stub.client().analytics(&query).await.unwrap();

    assert_eq!(report.total_visits, 120);
    assert_eq!(report.pagination().total_pages, 3);
    assert_eq!(stub.last().query_param("country").as_deref(), Some("Finland"));
}

#[tokio::test]
async fn test_upload_and_download() {
    let stub = StubApi::start().await;
    stub.on(
        "POST",
        "/api/upload",
        200,
        json!({"filename": "abc.png", "original_name": "bg.png", "size": 3}),
    );
    stub.on_bytes("GET", "/api/uploads/abc.png", &[9, 8, 7]);

    let api = stub.client();
    let uploaded = api
        .upload_file(&UploadFile::new("bg.png", vec![1, 2, 3]))
        .await
        .unwrap();
    assert_eq!(uploaded.filename, "abc.png");
    assert_eq!(upload_path(&uploaded.filename), "/api/uploads/abc.png");

    let bytes = api.download_upload("abc.png").await.unwrap();
    assert_eq!(bytes, vec![9, 8, 7]);
    assert_eq!(
        api.upload_url("abc.png"),
        format!("{}/api/uploads/abc.png", stub.backend_url())
    );
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let stub = StubApi::start().await;
    stub.on("GET", "/api/page/home", 200, json!({"unexpected": true}));

    let err = assert_err!(stub.client().homepage().await);
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_transport_error_when_backend_down() {
    let config = crate::config::ApiConfig {
        backend_url: "http://127.0.0.1:1".to_string(),
        ..Default::default()
    };
    let session = Arc::new(Session::open(MemoryTokenStore::boxed()));
    let api = super::ApiClient::new(&config, session).unwrap();

    let err = assert_err!(api.homepage().await);
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(err.status().is_none());
}
