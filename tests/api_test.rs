//! Router tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Method, Request, StatusCode,
    },
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use order_desk::api::{create_router, AppState};
use order_desk::config::Config;
use order_desk::domain::{Category, CustomerDraft, NewProduct, OrderDraft, OrderStatus};
use order_desk::infra::Database;

const ADMIN_PASSWORD: &str = "admin-password-1";

struct TestApp {
    router: Router,
    state: AppState,
}

impl TestApp {
    async fn spawn() -> Self {
        let config = Config::new(
            "sqlite::memory:",
            "integration-test-secret-that-is-long-enough",
        );
        let database = Database::connect(&config)
            .await
            .expect("in-memory database");
        let state = AppState::from_config(Arc::new(database), config);
        let router = create_router(state.clone());
        Self { router, state }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, headers, body)
    }

    async fn admin_token(&self) -> String {
        self.state
            .auth()
            .create_admin(
                "boss".to_string(),
                "boss@example.com".to_string(),
                ADMIN_PASSWORD.to_string(),
            )
            .await
            .unwrap();
        self.token_for("boss", ADMIN_PASSWORD).await
    }

    async fn token_for(&self, username: &str, password: &str) -> String {
        self.state
            .auth()
            .login(username.to_string(), password.to_string())
            .await
            .unwrap()
            .access_token
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> StatusCode {
        let body = format!(
            "username={username}&email={email}&password1={password}&password2={password}"
        );
        let (status, _, _) = self.send(form(Method::POST, "/register/", None, body)).await;
        status
    }

    async fn seed_product(&self, name: &str) -> Uuid {
        self.state
            .products()
            .create_product(NewProduct {
                name: name.to_string(),
                price: 12.0,
                category: Category::Indoor,
                description: None,
                image: None,
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_customer(&self, name: &str) -> Uuid {
        self.state
            .customers()
            .create_customer(CustomerDraft {
                name: name.to_string(),
                email: None,
                phone: None,
                profile_pic: None,
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_order(&self, customer_id: Uuid, product_id: Uuid, note: Option<&str>) -> Uuid {
        self.state
            .orders()
            .create_order(OrderDraft {
                customer_id,
                product_id,
                status: OrderStatus::Pending,
                note: note.map(str::to_string),
            })
            .await
            .unwrap()
            .id
    }
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn form(method: Method, uri: &str, token: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

fn json_post(uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn location(headers: &axum::http::HeaderMap) -> &str {
    headers[LOCATION].to_str().unwrap()
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_register_creates_customer_and_redirects_to_login() {
    let app = TestApp::spawn().await;

    assert_eq!(
        app.register("jdoe", "jdoe%40example.com", "longenough1").await,
        StatusCode::SEE_OTHER
    );

    let customers = app.state.customers().list_customers().await.unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].name, "jdoe");
    assert!(customers[0].user_id.is_some());
}

#[tokio::test]
async fn test_duplicate_username_is_a_field_error() {
    let app = TestApp::spawn().await;
    app.register("jdoe", "jdoe%40example.com", "longenough1").await;

    let body = "username=jdoe&email=other%40example.com&password1=longenough1&password2=longenough1";
    let (status, _, body) = app
        .send(form(Method::POST, "/register/", None, body.to_string()))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["username"].is_array());
    assert_eq!(app.state.customers().list_customers().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::spawn().await;
    app.register("jdoe", "jdoe%40example.com", "longenough1").await;

    let (status, headers, _) = app
        .send(form(
            Method::POST,
            "/login/",
            None,
            "username=jdoe&password=longenough1".to_string(),
        ))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");

    let cookie = headers[SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    // The cookie alone authenticates; a customer lands on their own page
    let session = cookie.split(';').next().unwrap().to_string();
    let request = Request::builder()
        .uri("/")
        .header(COOKIE, session)
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = app.send(request).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/user/");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::spawn().await;
    app.register("jdoe", "jdoe%40example.com", "longenough1").await;

    let (status, headers, _) = app
        .send(form(
            Method::POST,
            "/login/",
            None,
            "username=jdoe&password=wrong-password".to_string(),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(headers.get(SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_signed_in_user_cannot_log_in_again() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let (status, headers, _) = app
        .send(form(
            Method::POST,
            "/login/",
            Some(&token),
            format!("username=boss&password={ADMIN_PASSWORD}"),
        ))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");
}

// =============================================================================
// Access control
// =============================================================================

#[tokio::test]
async fn test_anonymous_visitor_is_sent_to_login() {
    let app = TestApp::spawn().await;

    for uri in ["/", "/user/", "/products/", "/create_order/"] {
        let (status, headers, _) = app.send(get(uri, None)).await;
        assert_eq!(status, StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&headers), "/login/", "{uri}");
    }
}

#[tokio::test]
async fn test_customer_home_and_admin_pages() {
    let app = TestApp::spawn().await;
    app.register("jdoe", "jdoe%40example.com", "longenough1").await;
    let token = app.token_for("jdoe", "longenough1").await;

    let (status, _, body) = app.send(get("/user/", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_orders"], 0);

    let (status, _, _) = app.send(get("/products/", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, headers, _) = app.send(get("/create_order/", Some(&token))).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/user/");
}

#[tokio::test]
async fn test_admin_is_kept_off_customer_pages() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let (status, headers, _) = app.send(get("/user/", Some(&token))).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");
}

// =============================================================================
// Dashboard, customers and orders
// =============================================================================

#[tokio::test]
async fn test_dashboard_counts() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let product = app.seed_product("Lamp").await;
    let first = app.seed_customer("Ann").await;
    let second = app.seed_customer("Bob").await;
    app.seed_order(first, product, None).await;
    let delivered = app.seed_order(second, product, None).await;
    app.state
        .orders()
        .update_order(
            delivered,
            OrderDraft {
                customer_id: second,
                product_id: product,
                status: OrderStatus::Delivered,
                note: None,
            },
        )
        .await
        .unwrap();

    let (status, _, body) = app.send(get("/", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_customers"], 2);
    assert_eq!(body["total_orders"], 2);
    assert_eq!(body["total_delivered"], 1);
    assert_eq!(body["total_pending"], 1);
}

#[tokio::test]
async fn test_customer_filter_narrows_orders_only() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let product = app.seed_product("Lamp").await;
    let customer = app.seed_customer("Ann").await;
    app.seed_order(customer, product, Some("Fragile, handle with care")).await;
    app.seed_order(customer, product, Some("leave at door")).await;

    let uri = format!("/customer/{customer}/?note=FRAGILE");
    let (status, _, body) = app.send(get(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_orders"], 2);
    assert_eq!(body["orders"].as_array().unwrap().len(), 1);

    let uri = format!("/customer/{customer}/?start_date=2999-01-01");
    let (_, _, body) = app.send(get(&uri, Some(&token))).await;
    assert!(body["orders"].as_array().unwrap().is_empty());

    let uri = format!("/customer/{customer}/?start_date=yesterday");
    let (status, _, body) = app.send(get(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["start_date"].is_array());
}

#[tokio::test]
async fn test_create_order_with_unknown_product() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let customer = app.seed_customer("Ann").await;

    let body = format!(
        "customer={customer}&product={}&status=Pending&note=",
        Uuid::new_v4()
    );
    let (status, _, body) = app
        .send(form(Method::POST, "/create_order/", Some(&token), body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["product"].is_array());
    assert!(app.state.orders().list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_customer_removes_their_orders() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let product = app.seed_product("Lamp").await;
    let customer = app.seed_customer("Ann").await;
    let order = app.seed_order(customer, product, None).await;

    let (status, headers, _) = app
        .send(form(
            Method::POST,
            &format!("/delete_customer/{customer}/"),
            Some(&token),
            String::new(),
        ))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");

    let (status, _, _) = app
        .send(get(&format!("/update_order/{order}/"), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = app
        .send(get(&format!("/customer/{customer}/"), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_formset_places_nothing() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let customer = app.seed_customer("Ann").await;

    let forms: Vec<Value> = (0..10).map(|_| json!({})).collect();
    let (status, headers, _) = app
        .send(json_post(
            &format!("/place_order_cus/{customer}/"),
            &token,
            json!({ "forms": forms }),
        ))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");
    assert!(app.state.orders().list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_formset_places_rows_or_reports_them() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let product = app.seed_product("Lamp").await;
    let customer = app.seed_customer("Ann").await;
    let uri = format!("/place_order_cus/{customer}/");

    let bad = json!({ "forms": [
        { "product": product.to_string(), "status": "Pending" },
        {},
        { "product": Uuid::new_v4().to_string(), "status": "Pending" },
    ]});
    let (status, _, body) = app.send(json_post(&uri, &token, bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["form-2-product"].is_array());
    assert!(app.state.orders().list_orders().await.unwrap().is_empty());

    let good = json!({ "forms": [
        { "product": product.to_string(), "status": "Pending" },
        { "product": "", "status": "" },
        { "product": product.to_string(), "status": "Delivered" },
    ]});
    let (status, _, _) = app.send(json_post(&uri, &token, good)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let orders = app
        .state
        .orders()
        .orders_for_customer(customer)
        .await
        .unwrap();
    assert_eq!(orders.len(), 2);
}

#[tokio::test]
async fn test_formset_for_unknown_customer_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let rows = json!({ "forms": [{ "product": "bogus", "status": "Lost" }] });
    let (status, _, _) = app
        .send(json_post(
            &format!("/place_order_cus/{}/", Uuid::new_v4()),
            &token,
            rows,
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_order_sets_any_status() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let product = app.seed_product("Lamp").await;
    let customer = app.seed_customer("Ann").await;
    let order = app.seed_order(customer, product, None).await;
    let uri = format!("/update_order/{order}/");

    for label in ["Delivered", "Pending", "Out for delivery"] {
        let body = format!(
            "customer={customer}&product={product}&status={}&note=ring+twice",
            label.replace(' ', "+")
        );
        let (status, headers, _) = app
            .send(form(Method::POST, &uri, Some(&token), body))
            .await;
        assert_eq!(status, StatusCode::SEE_OTHER, "{label}");
        assert_eq!(location(&headers), "/");

        let stored = app.state.orders().get_order(order).await.unwrap();
        assert_eq!(stored.status.as_str(), label);
        assert_eq!(stored.note.as_deref(), Some("ring twice"));
    }

    let (status, _, body) = app.send(get(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["id"], order.to_string());
}

#[tokio::test]
async fn test_update_unknown_order_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let product = app.seed_product("Lamp").await;
    let customer = app.seed_customer("Ann").await;
    let uri = format!("/update_order/{}/", Uuid::new_v4());

    let valid = format!("customer={customer}&product={product}&status=Pending");
    let (status, _, _) = app.send(form(Method::POST, &uri, Some(&token), valid)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The missing order wins over a broken body
    let (status, _, _) = app
        .send(form(Method::POST, &uri, Some(&token), "status=Lost".to_string()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_order() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let product = app.seed_product("Lamp").await;
    let customer = app.seed_customer("Ann").await;
    let order = app.seed_order(customer, product, None).await;
    let kept = app.seed_order(customer, product, None).await;
    let uri = format!("/delete_order/{order}/");

    let (status, _, body) = app.send(get(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["id"], order.to_string());

    let (status, headers, _) = app
        .send(form(Method::POST, &uri, Some(&token), String::new()))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");

    let (status, _, _) = app.send(get(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = app
        .send(form(Method::POST, &uri, Some(&token), String::new()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let remaining = app.state.orders().list_orders().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept);
}

#[tokio::test]
async fn test_add_customer() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let body = "name=+Jane+Doe+&email=jane%40example.com&phone=%2B1+555+0100".to_string();
    let (status, headers, _) = app
        .send(form(Method::POST, "/add_customer/", Some(&token), body))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");

    let customers = app.state.customers().list_customers().await.unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].name, "Jane Doe");
    assert_eq!(customers[0].email.as_deref(), Some("jane@example.com"));
    assert_eq!(customers[0].profile_pic.as_deref(), Some("profile1.png"));
    assert!(customers[0].user_id.is_none());
}

#[tokio::test]
async fn test_add_customer_with_blank_name() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let (status, _, body) = app
        .send(form(
            Method::POST,
            "/add_customer/",
            Some(&token),
            "name=%20%20%20".to_string(),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["name"].is_array());
    assert!(app.state.customers().list_customers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_setting_keeps_picture_when_omitted() {
    let app = TestApp::spawn().await;
    app.register("jdoe", "jdoe%40example.com", "longenough1").await;
    let token = app.token_for("jdoe", "longenough1").await;

    let (status, _, body) = app.send(get("/profile_setting", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customer"]["name"], "jdoe");

    let (status, _, body) = app
        .send(form(
            Method::POST,
            "/profile_setting",
            Some(&token),
            "name=Jane&profile_pic=avatar.png".to_string(),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customer"]["profile_pic"], "avatar.png");

    let (status, _, body) = app
        .send(form(
            Method::POST,
            "/profile_setting",
            Some(&token),
            "name=Jane+Doe&phone=555".to_string(),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customer"]["name"], "Jane Doe");
    assert_eq!(body["customer"]["phone"], "555");
    assert_eq!(body["customer"]["profile_pic"], "avatar.png");
}

#[tokio::test]
async fn test_profile_setting_with_blank_name() {
    let app = TestApp::spawn().await;
    app.register("jdoe", "jdoe%40example.com", "longenough1").await;
    let token = app.token_for("jdoe", "longenough1").await;

    let (status, _, body) = app
        .send(form(
            Method::POST,
            "/profile_setting",
            Some(&token),
            "name=+++".to_string(),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["name"].is_array());

    let customers = app.state.customers().list_customers().await.unwrap();
    assert_eq!(customers[0].name, "jdoe");
}

#[tokio::test]
async fn test_customer_filter_by_status_and_product() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let lamp = app.seed_product("Lamp").await;
    let ball = app.seed_product("Ball").await;
    let customer = app.seed_customer("Ann").await;
    app.seed_order(customer, lamp, None).await;
    app.seed_order(customer, ball, None).await;

    let uri = format!("/customer/{customer}/?status=Delivered");
    let (status, _, body) = app.send(get(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["orders"].as_array().unwrap().is_empty());
    assert_eq!(body["total_orders"], 2);

    let uri = format!("/customer/{customer}/?status=Pending&product={ball}");
    let (_, _, body) = app.send(get(&uri, Some(&token))).await;
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["product_id"], ball.to_string());

    let uri = format!("/customer/{customer}/?status=Lost");
    let (status, _, body) = app.send(get(&uri, Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["status"].is_array());
}

// =============================================================================
// Password reset
// =============================================================================

#[tokio::test]
async fn test_password_reset_flow() {
    let app = TestApp::spawn().await;
    app.register("jdoe", "jdoe%40example.com", "longenough1").await;

    let (status, headers, _) = app
        .send(form(
            Method::POST,
            "/password_reset/",
            None,
            "email=nobody%40example.com".to_string(),
        ))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/password_reset/done/");

    let links = app
        .state
        .auth()
        .request_password_reset("jdoe@example.com".to_string())
        .await
        .unwrap();
    assert_eq!(links.len(), 1);
    let confirm = format!(
        "/password_reset_confirm/{}/{}/",
        links[0].user_id, links[0].token
    );

    let (status, _, body) = app.send(get(&confirm, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["validlink"], true);

    let new_password = "new_password1=brand-new-pass&new_password2=brand-new-pass";
    let (status, headers, _) = app
        .send(form(Method::POST, &confirm, None, new_password.to_string()))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/password-reset-complete/");

    // Used links stop working once the password has changed
    let (_, _, body) = app.send(get(&confirm, None)).await;
    assert_eq!(body["validlink"], false);
    let (status, _, _) = app
        .send(form(Method::POST, &confirm, None, new_password.to_string()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let login = app
        .state
        .auth()
        .login("jdoe".to_string(), "brand-new-pass".to_string())
        .await;
    assert!(login.is_ok());
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::spawn().await;

    let (status, _, body) = app.send(get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
