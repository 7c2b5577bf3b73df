//! Integration tests for the employee endpoints.
//!
//! Run with: cargo test --test employees_integration

mod common;

use axum::http::{header, Method, StatusCode};
use common::{
    create_test_app, create_test_employee, delete_request, get_request, json_request,
    parse_response_body, raw_request, test_config, TestEmployee,
};
use serde_json::json;
use tower::ServiceExt;

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_employee_success() {
    let app = create_test_app(test_config());

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/employee",
            json!({"name": "John Doe", "email": "johndoe@test.com", "department": "TI"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["email"], "johndoe@test.com");
    assert_eq!(body["department"], "TI");
    assert!(body["id"].is_string());
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn test_create_employee_missing_email() {
    let app = create_test_app(test_config());

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/employee",
            json!({"name": "John Doe", "department": "TI"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "Employee email is required");
    assert_eq!(body["code"], "validation_error");

    // Nothing was stored
    let response = app.oneshot(get_request("/employee")).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_employee_empty_body_names_every_field() {
    let app = create_test_app(test_config());

    let response = app
        .oneshot(json_request(Method::POST, "/employee", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Employee name is required"));
    assert!(message.contains("Employee email is required"));
    assert!(message.contains("Employee department is required"));
}

#[tokio::test]
async fn test_create_employee_duplicate_email() {
    let app = create_test_app(test_config());
    let employee = TestEmployee::new().with_email("johndoe@test.com");
    create_test_employee(&app, &employee).await;

    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/employee", employee.to_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("johndoe@test.com"));

    let response = app.oneshot(get_request("/employee")).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_employee_accepts_javascript_content_type() {
    let app = create_test_app(test_config());

    let response = app
        .oneshot(raw_request(
            Method::POST,
            "/employee",
            "application/javascript",
            r#"{"name":"John Doe","email":"johndoe@test.com","department":"TI"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert_eq!(body["email"], "johndoe@test.com");
}

#[tokio::test]
async fn test_create_employee_null_field_is_required() {
    let app = create_test_app(test_config());

    let response = app
        .oneshot(raw_request(
            Method::POST,
            "/employee",
            "application/json",
            r#"{"name":null,"email":"johndoe@test.com","department":"TI"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "Employee name is required");
}

#[tokio::test]
async fn test_create_employee_from_form_body() {
    let app = create_test_app(test_config());

    let response = app
        .clone()
        .oneshot(raw_request(
            Method::POST,
            "/employee",
            "application/x-www-form-urlencoded",
            "name=John+Doe&email=johndoe%40test.com&department=TI",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["email"], "johndoe@test.com");

    let response = app
        .oneshot(raw_request(
            Method::POST,
            "/employee",
            "application/x-www-form-urlencoded",
            "name=Jane+Doe&department=TI",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "Employee email is required");
}

#[tokio::test]
async fn test_update_employee_from_form_body() {
    let app = create_test_app(test_config());
    create_test_employee(&app, &TestEmployee::new().with_email("johndoe@test.com")).await;

    let response = app
        .oneshot(raw_request(
            Method::PUT,
            "/employee/johndoe@test.com",
            "application/x-www-form-urlencoded",
            "department=HR",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["department"], "HR");
    assert_eq!(body["email"], "johndoe@test.com");
}

#[tokio::test]
async fn test_create_employee_rejects_plain_text() {
    let app = create_test_app(test_config());

    let response = app
        .oneshot(raw_request(
            Method::POST,
            "/employee",
            "text/plain",
            r#"{"name":"John Doe","email":"johndoe@test.com","department":"TI"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_create_employee_malformed_json() {
    let app = create_test_app(test_config());

    let response = app
        .oneshot(raw_request(
            Method::POST,
            "/employee",
            "application/json",
            "{\"name\": ",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["code"], "validation_error");
}

#[tokio::test]
async fn test_create_employee_body_too_large() {
    let mut config = test_config();
    config.server.max_body_size = 64;
    let app = create_test_app(config);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/employee",
            json!({"name": "x".repeat(256), "email": "johndoe@test.com", "department": "TI"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
async fn test_list_employees() {
    let app = create_test_app(test_config());
    for i in 1..=3 {
        let employee = TestEmployee::new().with_email(&format!("johndoe{}@test.com", i));
        create_test_employee(&app, &employee).await;
    }

    let response = app.oneshot(get_request("/employee")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let employees = body.as_array().unwrap();
    assert_eq!(employees.len(), 3);
    assert_eq!(employees[0]["email"], "johndoe1@test.com");
    assert_eq!(employees[2]["email"], "johndoe3@test.com");
}

#[tokio::test]
async fn test_list_employees_empty() {
    let app = create_test_app(test_config());

    let response = app.oneshot(get_request("/employee")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await, json!([]));
}

#[tokio::test]
async fn test_list_employees_filtered_by_department() {
    let app = create_test_app(test_config());
    for (email, department) in [("a@test.com", "TI"), ("b@test.com", "HR"), ("c@test.com", "TI")] {
        let employee = TestEmployee::new()
            .with_email(email)
            .with_department(department);
        create_test_employee(&app, &employee).await;
    }

    let response = app
        .oneshot(get_request("/employee?department=HR"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let employees = body.as_array().unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0]["department"], "HR");
}

#[tokio::test]
async fn test_get_employee_by_email() {
    let app = create_test_app(test_config());
    let created = create_test_employee(
        &app,
        &TestEmployee::new().with_email("johndoe@test.com"),
    )
    .await;

    let response = app
        .oneshot(get_request("/employee/johndoe@test.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body, created);
}

#[tokio::test]
async fn test_get_employee_not_found() {
    let app = create_test_app(test_config());

    let response = app
        .oneshot(get_request("/employee/johndoe@test.notexists.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = parse_response_body(response).await;
    assert_eq!(
        body["error"],
        "Employee with email: \"johndoe@test.notexists.com\" not found"
    );
    assert_eq!(body["code"], "not_found");
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_employee_name() {
    let app = create_test_app(test_config());
    let created = create_test_employee(
        &app,
        &TestEmployee::new().with_email("johndoe@test.com"),
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/employee/johndoe@test.com",
            json!({"name": "John Doe Harrison"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["name"], "John Doe Harrison");
    assert_eq!(body["email"], "johndoe@test.com");
    assert_eq!(body["department"], created["department"]);
    assert_eq!(body["id"], created["id"]);

    let response = app
        .oneshot(get_request("/employee/johndoe@test.com"))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["name"], "John Doe Harrison");
}

#[tokio::test]
async fn test_update_employee_email() {
    let app = create_test_app(test_config());
    create_test_employee(&app, &TestEmployee::new().with_email("johndoe@test.com")).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/employee/johndoe@test.com",
            json!({"email": "john.harrison@test.com"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["email"], "john.harrison@test.com");

    let response = app
        .clone()
        .oneshot(get_request("/employee/johndoe@test.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(get_request("/employee/john.harrison@test.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_employee_not_found() {
    let app = create_test_app(test_config());

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/employee/johndoe@test.notexists.com",
            json!({"name": "John Doe Harrison"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = parse_response_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("johndoe@test.notexists.com"));
}

#[tokio::test]
async fn test_update_employee_to_taken_email() {
    let app = create_test_app(test_config());
    create_test_employee(&app, &TestEmployee::new().with_email("a@test.com")).await;
    create_test_employee(&app, &TestEmployee::new().with_email("b@test.com")).await;

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/employee/b@test.com",
            json!({"email": "a@test.com"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_employee() {
    let app = create_test_app(test_config());
    create_test_employee(&app, &TestEmployee::new().with_email("johndoe@test.com")).await;

    let response = app
        .clone()
        .oneshot(delete_request("/employee/johndoe@test.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());

    let response = app
        .clone()
        .oneshot(get_request("/employee/johndoe@test.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(delete_request("/employee/johndoe@test.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Ambient behavior
// ============================================================================

#[tokio::test]
async fn test_responses_carry_security_headers_and_request_id() {
    let app = create_test_app(test_config());

    let response = app
        .oneshot(get_request("/employee/johndoe@test.notexists.com"))
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.get(header::STRICT_TRANSPORT_SECURITY).is_none());
    assert!(headers.get("x-request-id").is_some());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = create_test_app(test_config());

    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/employee")
        .header("x-request-id", "req-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "req-123");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = create_test_app(test_config());

    let response = app.clone().oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["connected"], true);

    let response = app
        .clone()
        .oneshot(get_request("/health/live"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["status"], "alive");

    let response = app.oneshot(get_request("/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["status"], "ready");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app(test_config());

    let response = app.oneshot(get_request("/employees")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
