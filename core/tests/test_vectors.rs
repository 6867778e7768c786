//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Request vectors pin the exact wire shape of every operation; response
//! vectors pin the success/failure classification. Bodies are compared as
//! parsed JSON so field ordering does not matter.

use crud_core::{
    ApiClient, CreateComment, CreatePost, CreateUser, HttpMethod, HttpRequest, HttpResponse,
    UpdatePost,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> ApiClient {
    ApiClient::new(BASE_URL)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn build(operation: &str, input: &Value) -> HttpRequest {
    let c = client();
    let id = || input["id"].as_i64().unwrap();
    match operation {
        "create_post" => {
            let input: CreatePost = serde_json::from_value(input.clone()).unwrap();
            c.build_create_post(&input).unwrap()
        }
        "create_user" => {
            let input: CreateUser = serde_json::from_value(input.clone()).unwrap();
            c.build_create_user(&input).unwrap()
        }
        "create_comment" => {
            let input: CreateComment = serde_json::from_value(input.clone()).unwrap();
            c.build_create_comment(&input).unwrap()
        }
        "update_post" => {
            let input = UpdatePost::new(
                id(),
                input["title"].as_str().unwrap(),
                input["body"].as_str().unwrap(),
            );
            c.build_update_post(input.id, &input).unwrap()
        }
        "get_post" => c.build_get_post(id()),
        "delete_post" => c.build_delete_post(id()),
        other => panic!("unknown operation: {other}"),
    }
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_request"];
        let req = build(case["operation"].as_str().unwrap(), &case["input"]);

        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.endpoint, expected["path"].as_str().unwrap(), "{name}: endpoint");
        assert_eq!(req.url, format!("{BASE_URL}{}", req.endpoint), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let body = req
            .body
            .as_deref()
            .map(|b| serde_json::from_str::<Value>(b).unwrap())
            .unwrap_or(Value::Null);
        assert_eq!(body, expected["body"], "{name}: body");
    }
}

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse {
            status: case["status"].as_u64().unwrap() as u16,
            status_text: case["status_text"].as_str().unwrap().to_string(),
            headers: Vec::new(),
            body: case["body"].as_str().unwrap().to_string(),
        };
        let expected = &case["expected"];

        let result = c.parse_created(response);
        assert_eq!(result.is_ok(), expected["ok"].as_bool().unwrap(), "{name}: classification");
        if let Some(reason) = expected["reason"].as_str() {
            assert_eq!(result.unwrap_err().to_string(), reason, "{name}: reason");
        }
    }
}
