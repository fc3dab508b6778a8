//! BDD step definitions for message submission through the page server

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use cucumber::{given, then, when};
use demo_portal::page::build_router;
use demo_portal::render::escape_html;
use tower::ServiceExt;

use crate::world::{PortalWorld, Reply};

/// Scenario values are plain words; spaces are the only thing to encode
fn form_body(author: &str, content: &str) -> String {
    format!(
        "author={}&content={}",
        author.replace(' ', "+"),
        content.replace(' ', "+")
    )
}

async fn fetch_page(app: Router, request: Request<Body>) -> String {
    let response = app.clone().oneshot(request).await.unwrap();
    let response = if response.status() == StatusCode::SEE_OTHER {
        let location = response.headers()[header::LOCATION]
            .to_str()
            .unwrap()
            .to_string();
        app.oneshot(Request::builder().uri(location).body(Body::empty()).unwrap())
            .await
            .unwrap()
    } else {
        response
    };
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn page(world: &PortalWorld) -> &str {
    world.page.as_deref().expect("no page was loaded")
}

#[given(expr = "the backend accepts new messages with HTTP {int}")]
fn backend_accepts(world: &mut PortalWorld, status: u16) {
    world
        .backend
        .respond("POST /api/messages", status, r#"{"id": 1, "message": "created"}"#);
}

#[given(expr = "the backend rejects new messages with HTTP {int}")]
fn backend_rejects(world: &mut PortalWorld, status: u16) {
    world
        .backend
        .respond("POST /api/messages", status, r#"{"error": "insert failed"}"#);
}

#[given("the backend is unreachable for new messages")]
fn backend_unreachable_for_posts(world: &mut PortalWorld) {
    world.backend.set("POST /api/messages", Reply::Unreachable);
}

#[when(expr = "the user submits author {string} and content {string}")]
async fn user_submits(world: &mut PortalWorld, author: String, content: String) {
    world.requests_before_submit = world.backend.requests().len();
    let request = Request::builder()
        .method("POST")
        .uri("/messages")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body(&author, &content)))
        .unwrap();
    let html = fetch_page(build_router(world.poller()), request).await;
    world.page = Some(html);
}

#[when("another visitor opens the portal")]
async fn another_visitor_opens(world: &mut PortalWorld) {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let html = fetch_page(build_router(world.poller()), request).await;
    world.page = Some(html);
}

#[then(expr = "the backend received author {string} and content {string}")]
fn backend_received(world: &mut PortalWorld, author: String, content: String) {
    let posted = world.backend.posted();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0]["author"], author.as_str());
    assert_eq!(posted[0]["content"], content.as_str());
}

#[then("the form is empty")]
fn form_is_empty(world: &mut PortalWorld) {
    let html = page(world);
    assert!(html.contains(r#"name="author" placeholder="Your name" value="""#), "{html}");
    assert!(html.contains("required></textarea>"), "{html}");
}

#[then(expr = "the form still holds author {string} and content {string}")]
fn form_holds(world: &mut PortalWorld, author: String, content: String) {
    let html = page(world);
    assert!(
        html.contains(&format!(r#"value="{}""#, escape_html(&author))),
        "{html}"
    );
    assert!(
        html.contains(&format!("required>{}</textarea>", escape_html(&content))),
        "{html}"
    );
}

#[then(expr = "the page does not show {string}")]
fn page_does_not_show(world: &mut PortalWorld, text: String) {
    let html = page(world);
    assert!(!html.contains(&escape_html(&text)), "{html}");
}

#[then("the message list and stats were fetched again")]
fn refreshed(world: &mut PortalWorld) {
    let after: Vec<String> = world.backend.requests()[world.requests_before_submit..].to_vec();
    assert_eq!(
        after,
        vec![
            "POST /api/messages".to_string(),
            "GET /api/messages".to_string(),
            "GET /api/stats".to_string(),
        ]
    );
}

#[then("no refresh was triggered")]
fn not_refreshed(world: &mut PortalWorld) {
    let after: Vec<String> = world.backend.requests()[world.requests_before_submit..].to_vec();
    assert_eq!(after, vec!["POST /api/messages".to_string()]);
}

#[then(expr = "the notice is {string}")]
fn notice_is(world: &mut PortalWorld, expected: String) {
    let html = page(world);
    let banner = html
        .split(r#"<div id="notice""#)
        .nth(1)
        .unwrap_or_else(|| panic!("no notice shown:\n{html}"));
    assert!(banner.contains(&escape_html(&expected)), "{banner}");
}

#[then("no notice is shown")]
fn no_notice(world: &mut PortalWorld) {
    let html = page(world);
    assert!(!html.contains(r#"id="notice""#), "{html}");
}
