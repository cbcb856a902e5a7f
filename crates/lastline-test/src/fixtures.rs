//! Requests, failures and handlers for exercising the error boundary.
//!
//! Handlers here have the shape [`Pipeline::process`] expects, so tests can
//! write `client.send(fixtures::request("/"), fixtures::fail(failure))`.
//!
//! [`Pipeline::process`]: lastline_middleware::Pipeline::process

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use lastline_core::{Failure, Frame};
use lastline_middleware::{BoxFuture, HandlerResult, MiddlewareContext, Request, Response};

/// A downstream handler as accepted by the pipeline.
pub trait Handler:
    FnOnce(&mut MiddlewareContext, Request) -> BoxFuture<'static, HandlerResult> + Send + 'static
{
}

impl<F> Handler for F where
    F: FnOnce(&mut MiddlewareContext, Request) -> BoxFuture<'static, HandlerResult> + Send + 'static
{
}

/// Builds a GET request with an empty body.
///
/// # Panics
///
/// Panics if `path` is not a valid URI.
#[must_use]
pub fn request(path: &str) -> Request {
    http::Request::builder()
        .uri(path)
        .body(Full::new(Bytes::new()))
        .expect("valid request path")
}

/// Builds a 200 response with a plain body and one custom header.
///
/// # Panics
///
/// Never in practice; all parts are static.
#[must_use]
pub fn ok_response(body: &'static str) -> Response {
    http::Response::builder()
        .status(StatusCode::OK)
        .header("x-handled-by", "downstream")
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .expect("static response parts")
}

/// A handler that returns `response`.
pub fn respond(response: Response) -> impl Handler {
    move |_ctx: &mut MiddlewareContext, _req: Request| -> BoxFuture<'static, HandlerResult> {
        Box::pin(async move { Ok(response) })
    }
}

/// A handler that fails with `failure`.
pub fn fail(failure: Failure) -> impl Handler {
    move |_ctx: &mut MiddlewareContext, _req: Request| -> BoxFuture<'static, HandlerResult> {
        Box::pin(async move { Err(failure) })
    }
}

/// A handler that panics with `message`.
pub fn panic_with(message: &'static str) -> impl Handler {
    move |_ctx: &mut MiddlewareContext, _req: Request| -> BoxFuture<'static, HandlerResult> {
        Box::pin(panicking(message))
    }
}

async fn panicking(message: &'static str) -> HandlerResult {
    panic!("{message}")
}

/// `AccessDenied("Forbidden", 403)` raised at `/srv/app/Admin.php:12`.
#[must_use]
pub fn forbidden() -> Failure {
    Failure::new("AccessDenied", "Forbidden")
        .with_code(403)
        .at("/srv/app/Admin.php", 12)
        .with_frames(vec![
            Frame::new(0, "/srv/app/Router.php", 88, "App\\Admin->show()"),
            Frame::new(1, "/srv/public/index.php", 5, "App\\Router->dispatch()"),
        ])
}

/// A failure whose message is a script tag.
#[must_use]
pub fn script_message() -> Failure {
    Failure::new("RuntimeError", "<script>alert(1)</script>").at("/srv/app/View.php", 3)
}

/// A failure carrying a text trace of three frames and a trailing
/// `#3 {main}` line.
#[must_use]
pub fn text_trace() -> Failure {
    Failure::new("RuntimeError", "boom")
        .at("/srv/app/Service.php", 40)
        .with_trace_text(TEXT_TRACE)
}

/// The trace used by [`text_trace`].
pub const TEXT_TRACE: &str = "#0 /srv/app/Controller.php(21): App\\Service->run()
#1 /srv/app/Router.php(88): App\\Controller->show()
#2 /srv/public/index.php(5): App\\Router->dispatch()
#3 {main}";
