//! User endpoint behavior: pagination, version branching, not-found
//! envelopes, authentication, and entitlement merging.

mod common;

use axum::http::{header, StatusCode};
use idgate_scim::ScimVersion;
use idgate_store::SqlValue;

use common::{encode_auth, get, router_with, valid_auth, MockStore};

#[tokio::test]
async fn list_users_first_page() {
    let router = router_with(MockStore::default(), ScimVersion::V20, false);
    let (status, body) = get(
        &router,
        "/scim/v2/Users?startIndex=1&count=2",
        Some(&valid_auth()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["schemas"][0],
        "urn:ietf:params:scim:api:messages:2.0:ListResponse"
    );
    assert_eq!(body["totalResults"], 3);
    assert_eq!(body["startIndex"], 1);
    assert_eq!(body["itemsPerPage"], 2);

    let resources = body["Resources"].as_array().unwrap();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0]["id"], "1");
    assert_eq!(resources[1]["id"], "2");
}

#[tokio::test]
async fn list_users_second_page_is_partial() {
    let router = router_with(MockStore::default(), ScimVersion::V20, false);
    let (status, body) = get(
        &router,
        "/scim/v2/Users?startIndex=3&count=2",
        Some(&valid_auth()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalResults"], 3);
    assert_eq!(body["startIndex"], 3);
    assert_eq!(body["itemsPerPage"], 1);
    assert_eq!(body["Resources"][0]["id"], "3");
}

#[tokio::test]
async fn list_users_beyond_range_is_empty() {
    let router = router_with(MockStore::default(), ScimVersion::V20, false);
    let (status, body) = get(
        &router,
        "/scim/v2/Users?startIndex=5&count=10",
        Some(&valid_auth()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalResults"], 3);
    // The out-of-range start is echoed unmodified.
    assert_eq!(body["startIndex"], 5);
    assert_eq!(body["itemsPerPage"], 0);
    assert!(body["Resources"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn list_users_count_zero_keeps_total() {
    let router = router_with(MockStore::default(), ScimVersion::V20, false);
    let (status, body) = get(&router, "/scim/v2/Users?count=0", Some(&valid_auth())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalResults"], 3);
    assert_eq!(body["itemsPerPage"], 0);
}

#[tokio::test]
async fn list_users_defaults() {
    let router = router_with(MockStore::default(), ScimVersion::V20, false);
    let (status, body) = get(&router, "/scim/v2/Users", Some(&valid_auth())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["startIndex"], 1);
    assert_eq!(body["itemsPerPage"], 3);
}

#[tokio::test]
async fn list_users_rejects_malformed_start_index() {
    let router = router_with(MockStore::default(), ScimVersion::V20, false);
    let (status, body) = get(
        &router,
        "/scim/v2/Users?startIndex=abc",
        Some(&valid_auth()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["schemas"][0],
        "urn:ietf:params:scim:api:messages:2.0:Error"
    );
    assert_eq!(body["status"], "400");
    assert!(body["detail"].as_str().unwrap().contains("startIndex"));
}

#[tokio::test]
async fn list_users_rejects_malformed_count_v11_shape() {
    let router = router_with(MockStore::default(), ScimVersion::V11, false);
    let (status, body) = get(&router, "/scim/v2/Users?count=ten", Some(&valid_auth())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("schemas").is_none());
    assert_eq!(body["Errors"][0]["code"], "400");
    assert!(body["Errors"][0]["description"]
        .as_str()
        .unwrap()
        .contains("count"));
}

#[tokio::test]
async fn list_users_v11_omits_schemas_everywhere() {
    let router = router_with(MockStore::default(), ScimVersion::V11, false);
    let (status, body) = get(&router, "/scim/v2/Users?count=1", Some(&valid_auth())).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("schemas").is_none());

    let user = &body["Resources"][0];
    assert!(user.get("schemas").is_none());
    assert!(user["name"].get("formatted").is_none());
    // The 1.1 variant keeps the v2 location path.
    assert_eq!(user["meta"]["location"], "/scim/v2/Users/1");
}

#[tokio::test]
async fn get_user_by_id() {
    let router = router_with(MockStore::default(), ScimVersion::V20, false);
    let (status, body) = get(&router, "/scim/v2/Users/2", Some(&valid_auth())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "2");
    assert_eq!(body["userName"], "bkhan");
    assert_eq!(body["name"]["givenName"], "Bilal");
    assert_eq!(body["name"]["formatted"], "Bilal Khan");
    assert_eq!(body["emails"][0]["type"], "work");
    assert_eq!(body["active"], true);
    assert_eq!(body["externalId"], "ext-2");
    assert_eq!(
        body["schemas"][0],
        "urn:ietf:params:scim:schemas:core:2.0:User"
    );
}

#[tokio::test]
async fn get_user_not_found_v2() {
    let router = router_with(MockStore::default(), ScimVersion::V20, false);
    let (status, body) = get(&router, "/scim/v2/Users/999", Some(&valid_auth())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["schemas"][0],
        "urn:ietf:params:scim:api:messages:2.0:Error"
    );
    assert_eq!(body["status"], "404");
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn get_user_not_found_v11() {
    let router = router_with(MockStore::default(), ScimVersion::V11, false);
    let (status, body) = get(&router, "/scim/v2/Users/999", Some(&valid_auth())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["Errors"][0]["description"], "User not found");
    assert_eq!(body["Errors"][0]["code"], "404");
}

#[tokio::test]
async fn users_require_credentials() {
    let router = router_with(MockStore::default(), ScimVersion::V20, false);

    let (status, body) = get(&router, "/scim/v2/Users", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "401");

    let (status, _) = get(
        &router,
        "/scim/v2/Users",
        Some(&encode_auth("scim_import", "wrong")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(
        &router,
        "/scim/v2/Users/1",
        Some(&encode_auth("intruder", "s3cret")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unauthorized_carries_basic_challenge() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let router = router_with(MockStore::default(), ScimVersion::V20, false);
    let response = router
        .oneshot(
            Request::builder()
                .uri("/scim/v2/Users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Basic realm=\"SCIM\"")
    );
}

#[tokio::test]
async fn users_carry_entitlements_when_enabled() {
    let store = MockStore {
        user_entitlements: vec![(
            "1".to_string(),
            vec![vec![
                SqlValue::Int(10),
                SqlValue::Text("admin".to_string()),
                SqlValue::Text("Administrator".to_string()),
                SqlValue::Text("role".to_string()),
            ]],
        )],
        ..MockStore::default()
    };
    let router = router_with(store, ScimVersion::V20, true);
    let (status, body) = get(&router, "/scim/v2/Users", Some(&valid_auth())).await;

    assert_eq!(status, StatusCode::OK);

    let resources = body["Resources"].as_array().unwrap();
    assert_eq!(resources[0]["entitlements"][0]["value"], "admin");
    assert_eq!(resources[0]["entitlements"][0]["type"], "role");
    assert_eq!(resources[0]["entitlements"][0]["display"], "Administrator");
    // Users without grants omit the attribute entirely.
    assert!(resources[1].get("entitlements").is_none());
}

#[tokio::test]
async fn entitlement_lookup_failure_never_fails_user_fetch() {
    let store = MockStore {
        fail_user_entitlements: true,
        ..MockStore::default()
    };
    let router = router_with(store, ScimVersion::V20, true);

    let (status, body) = get(&router, "/scim/v2/Users", Some(&valid_auth())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalResults"], 3);
    assert!(body["Resources"][0].get("entitlements").is_none());

    let (status, body) = get(&router, "/scim/v2/Users/1", Some(&valid_auth())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "1");
    assert!(body.get("entitlements").is_none());
}
