//! End-to-end tests: requests through a full pipeline, responses collected
//! and checked as a client would see them.

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use lastline::prelude::*;
use lastline_test::{fixtures, TestClient};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn client() -> TestClient {
    TestClient::default()
}

fn teapot(failure: &Failure) -> Option<Response> {
    Some(
        http::Response::builder()
            .status(StatusCode::IM_A_TEAPOT)
            .header("x-failure-type", failure.type_name())
            .body(Full::new(Bytes::from("short and stout")))
            .unwrap(),
    )
}

#[tokio::test]
async fn missing_code_resolves_to_internal_server_error() {
    let response = client()
        .send(fixtures::request("/"), fixtures::fail(Failure::new("RuntimeError", "boom")))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_reason_phrase("Internal Server Error")
        .assert_failure_page()
        .assert_body_contains("500 Internal Server Error");
}

#[tokio::test]
async fn known_code_uses_table_phrase() {
    let failure = Failure::new("NotFound", "No route for /missing").with_code(404);
    let response = client()
        .send(fixtures::request("/missing"), fixtures::fail(failure))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_reason_phrase("Not Found")
        .assert_body_contains("404 Not Found");
}

#[tokio::test]
async fn unknown_code_falls_back_to_500() {
    let failure = Failure::new("Weird", "odd").with_code(999);
    let response = client()
        .send(fixtures::request("/"), fixtures::fail(failure))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_reason_phrase("Internal Server Error")
        .assert_body_contains("<div class=\"failure-code\">999</div>");
}

#[tokio::test]
async fn handler_override_is_returned_unchanged() {
    let client = TestClient::with_exception(ExceptionMiddleware::new().error_handler(teapot));
    let response = client
        .send(fixtures::request("/"), fixtures::fail(fixtures::forbidden()))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::IM_A_TEAPOT)
        .assert_header("x-failure-type", "AccessDenied")
        .assert_body_eq("short and stout");
    assert_eq!(response.headers().len(), 1);
    assert!(response.reason_phrase().is_none());
}

#[tokio::test]
async fn declining_handler_renders_default_page() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let exception = ExceptionMiddleware::new().error_handler(move |_: &Failure| -> Option<Response> {
        seen.fetch_add(1, Ordering::SeqCst);
        None
    });

    let with_handler = TestClient::with_exception(exception)
        .send(fixtures::request("/"), fixtures::fail(fixtures::forbidden()))
        .await
        .unwrap();
    let without_handler = client()
        .send(fixtures::request("/"), fixtures::fail(fixtures::forbidden()))
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(with_handler.status(), without_handler.status());
    assert_eq!(with_handler.headers(), without_handler.headers());
    assert_eq!(with_handler.body(), without_handler.body());
}

#[tokio::test]
async fn script_message_is_escaped() {
    let response = client()
        .send(fixtures::request("/"), fixtures::fail(fixtures::script_message()))
        .await
        .unwrap();

    response
        .assert_body_lacks("<script>")
        .assert_body_contains("<title>&lt;script&gt;alert(1)&lt;/script&gt;</title>")
        .assert_body_contains("</small>&lt;script&gt;alert(1)&lt;/script&gt;</h1>")
        .assert_body_contains(
            "throw new RuntimeError(&quot;&lt;script&gt;alert(1)&lt;/script&gt;&quot;);",
        );
}

#[tokio::test]
async fn text_trace_becomes_structured_blocks() {
    let response = client()
        .send(fixtures::request("/"), fixtures::fail(fixtures::text_trace()))
        .await
        .unwrap();
    let body = response.text().unwrap();

    let blocks: Vec<usize> = body.match_indices("<div class=\"trace\">").map(|(i, _)| i).collect();
    assert_eq!(blocks.len(), 3);

    let expected = [
        ("0", "/srv/app/Controller.php", "21", "App\\Service-&gt;run()"),
        ("1", "/srv/app/Router.php", "88", "App\\Controller-&gt;show()"),
        ("2", "/srv/public/index.php", "5", "App\\Router-&gt;dispatch()"),
    ];
    for (start, (num, path, line, call)) in blocks.iter().zip(expected) {
        let block = &body[*start..];
        let block = &block[..block.find("\n</div>").unwrap()];
        assert!(block.contains(&format!("<div class=\"num\">{num}</div>")));
        assert!(block.contains(&format!("<div class=\"path\">{path}</div>")));
        assert!(block.contains(&format!("<div class=\"line\">{line}</div>")));
        assert!(block.contains(&format!("<span class=\"call-line\">{line}</span>{call}</div>")));
    }

    let main = body.find("#3 {main}").unwrap();
    assert!(main > *blocks.last().unwrap());
}

#[tokio::test]
async fn forbidden_failure_page() {
    let response = client()
        .send(fixtures::request("/admin"), fixtures::fail(fixtures::forbidden()))
        .await
        .unwrap();
    let body = response.text().unwrap();

    response
        .assert_status(StatusCode::FORBIDDEN)
        .assert_reason_phrase("Forbidden")
        .assert_failure_page()
        .assert_body_contains("403")
        .assert_body_contains("Forbidden");

    let first = body.find("<div class=\"trace first\">").unwrap();
    let first_block = &body[first..];
    let first_block = &first_block[..first_block.find("\n</div>").unwrap()];
    assert!(first_block.contains("<div class=\"path\">/srv/app/Admin.php</div>"));
    assert!(first_block.contains("<em>throw new AccessDenied(&quot;Forbidden&quot;, 403);</em>"));
    assert!(first < body.find("<div class=\"trace\">").unwrap());
}

#[tokio::test]
async fn success_passes_through_untouched() {
    let response = client()
        .send(fixtures::request("/"), fixtures::respond(fixtures::ok_response("hello")))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-handled-by", "downstream")
        .assert_body_eq("hello");
    assert_eq!(response.headers().len(), 1);
    assert!(response.reason_phrase().is_none());
}

#[tokio::test]
async fn downstream_panic_renders_page() {
    let response = client()
        .send(fixtures::request("/"), fixtures::panic_with("index out of bounds"))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_failure_page()
        .assert_body_contains("index out of bounds");
}

#[tokio::test]
async fn guarded_handler_panic_degrades_to_default_page() {
    let exception = ExceptionMiddleware::new()
        .guard_error_handler(true)
        .error_handler(|_: &Failure| -> Option<Response> { panic!("handler bug") });

    let response = TestClient::with_exception(exception)
        .send(fixtures::request("/"), fixtures::fail(fixtures::forbidden()))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::FORBIDDEN)
        .assert_failure_page();
}

#[tokio::test]
async fn legacy_policy_inserts_headline_verbatim() {
    let exception = ExceptionMiddleware::new().escape_policy(EscapePolicy::Legacy);
    let failure = Failure::new("Markup", "<b>bold</b>").at("/srv/<dir>/a.php", 1);

    let response = TestClient::with_exception(exception)
        .send(fixtures::request("/"), fixtures::fail(failure))
        .await
        .unwrap();

    response
        .assert_body_contains("<title>&lt;b&gt;bold&lt;/b&gt;</title>")
        .assert_body_contains("</small><b>bold</b></h1>")
        .assert_body_contains("<strong>/srv/<dir>/a.php</strong>");
}

#[tokio::test]
async fn configured_pipeline_hides_trace() {
    let config = LastlineConfig::production();
    let pipeline = Pipeline::builder()
        .exception(lastline::exception_middleware(&config))
        .build();

    let response = TestClient::new(pipeline)
        .send(fixtures::request("/"), fixtures::fail(fixtures::text_trace()))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_body_contains("<h1>")
        .assert_body_lacks("class=\"trace")
        .assert_body_lacks("{main}");
}
