//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use posts_core::{
    HttpMethod, HttpRequest, HttpResponse, Post, PostClient, PostDraft, PostId, TransportError,
    TransportErrorKind,
};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn client() -> PostClient {
    PostClient::new(BASE_URL)
}

fn load(raw: &str) -> Vec<serde_json::Value> {
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn check_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn check_error(name: &str, err: &TransportError, expected: &str) {
    let matched = match expected {
        "NotFound" => matches!(err.kind, TransportErrorKind::NotFound),
        "Status" => matches!(err.kind, TransportErrorKind::Status { .. }),
        "Decode" => matches!(err.kind, TransportErrorKind::Decode(_)),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {expected}, got {err:?}");
}

/// A vector without `createdAt` in its expected post means the parsed post
/// must carry no timestamp.
fn check_created_at(name: &str, post: &Post, expected: &serde_json::Value) {
    if expected.get("createdAt").is_none() {
        assert_eq!(post.created_at, None, "{name}: createdAt should be absent");
    }
}

fn input_id(case: &serde_json::Value) -> PostId {
    serde_json::from_value(case["input_id"].clone()).unwrap()
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        check_request(name, &c.build_list_posts(), &case["expected_request"]);

        let result = c.parse_list_posts(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, &result.unwrap_err(), expected.as_str().unwrap()),
            None => {
                let expected: Vec<Post> = serde_json::from_value(case["expected_result"].clone()).unwrap();
                let posts = result.unwrap();
                for (post, raw) in posts.iter().zip(case["expected_result"].as_array().unwrap()) {
                    check_created_at(name, post, raw);
                }
                assert_eq!(posts, expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let id = input_id(&case);
        check_request(name, &c.build_get_post(&id), &case["expected_request"]);

        let result = c.parse_get_post(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, &result.unwrap_err(), expected.as_str().unwrap()),
            None => {
                let expected: Post = serde_json::from_value(case["expected_result"].clone()).unwrap();
                let post = result.unwrap();
                check_created_at(name, &post, &case["expected_result"]);
                assert_eq!(post, expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: PostDraft = serde_json::from_value(case["input"].clone()).unwrap();
        check_request(name, &c.build_create_post(&input).unwrap(), &case["expected_request"]);

        let saved = c.parse_create_post(simulated(&case)).unwrap();
        let expected: Option<PostId> = serde_json::from_value(case["expected_id"].clone()).unwrap();
        assert_eq!(saved.id(), expected.as_ref(), "{name}: saved id");
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let id = input_id(&case);
        let input: PostDraft = serde_json::from_value(case["input"].clone()).unwrap();
        check_request(name, &c.build_update_post(&id, &input).unwrap(), &case["expected_request"]);

        let result = c.parse_update_post(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, &result.unwrap_err(), expected.as_str().unwrap()),
            None => {
                let expected: Option<PostId> = serde_json::from_value(case["expected_id"].clone()).unwrap();
                assert_eq!(result.unwrap().id(), expected.as_ref(), "{name}: saved id");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id = input_id(&case);
        check_request(name, &c.build_delete_post(&id), &case["expected_request"]);

        let result = c.parse_delete_post(&id, simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, &result.unwrap_err(), expected.as_str().unwrap()),
            None => assert_eq!(result.unwrap(), id, "{name}: echoed id"),
        }
    }
}
