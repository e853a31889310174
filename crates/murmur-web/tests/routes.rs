//! Router tests driven through `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use murmur_core::RequestContext;
use murmur_store::Store;
use murmur_testkit::generators::{comment, request_context};
use murmur_testkit::{client, clients, TestBoard};
use proptest::prelude::*;
use tower::ServiceExt;

struct App {
    fixture: TestBoard,
    router: Router,
    _assets: tempfile::TempDir,
}

fn app() -> App {
    let assets = tempfile::tempdir().unwrap();
    std::fs::write(assets.path().join("style.css"), "body { color: red; }").unwrap();

    let fixture = TestBoard::new();
    let router = murmur_web::router(fixture.board.clone(), assets.path());
    App {
        fixture,
        router,
        _assets: assets,
    }
}

fn urlencode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}

fn get(uri: &str, ctx: &RequestContext) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-forwarded-for", &ctx.source_address)
        .header(header::USER_AGENT, &ctx.user_agent)
        .body(Body::empty())
        .unwrap()
}

fn post(ctx: &RequestContext, fields: &[(&str, &str)]) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencode(v)))
        .collect::<Vec<_>>()
        .join("&");

    Request::builder()
        .method("POST")
        .uri("/post")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("x-forwarded-for", &ctx.source_address)
        .header(header::USER_AGENT, &ctx.user_agent)
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn front_page_embeds_ticket() {
    let app = app();
    let ctx = client(1);

    let response = app.router.clone().oneshot(get("/", &ctx)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::X_FRAME_OPTIONS).unwrap(),
        "DENY"
    );

    let html = body_text(response).await;
    assert!(html.contains("murmur"));
    assert!(html.contains("name=\"ticket\""));
    assert!(!html.contains("name=\"parent\""));
}

#[tokio::test]
async fn posting_a_thread_redirects_to_it() {
    let app = app();
    let ctx = client(1);
    let ticket = app.fixture.ticket(&ctx);

    let response = app
        .router
        .clone()
        .oneshot(post(&ctx, &[("comment", "hello board"), ("ticket", &ticket)]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/1/");

    let response = app.router.clone().oneshot(get("/1/", &ctx)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("hello board"));
    assert!(html.contains("name=\"parent\" value=\"1\""));
}

#[tokio::test]
async fn wrong_ticket_is_rejected_without_writing() {
    let app = app();
    let ctx = client(1);
    let foreign = app.fixture.ticket(&client(2));

    let response = app
        .router
        .clone()
        .oneshot(post(&ctx, &[("comment", "spam"), ("ticket", &foreign)]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "invalid ticket");
    assert_eq!(app.fixture.board.store().count_posts().await.unwrap(), 0);
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let app = app();
    let ctx = client(1);
    let ticket = app.fixture.ticket(&ctx);

    let response = app
        .router
        .clone()
        .oneshot(post(&ctx, &[("comment", "   "), ("ticket", &ticket)]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "missing message body");

    let response = app
        .router
        .clone()
        .oneshot(post(&ctx, &[("comment", "no ticket")]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "invalid ticket");
}

#[tokio::test]
async fn replies_redirect_into_thread() {
    let app = app();
    let op = client(1);
    let other = client(2);
    let thread = app.fixture.open_thread(&op, "opener").await.unwrap();

    let ticket = app.fixture.ticket(&other);
    let parent = thread.to_string();
    let response = app
        .router
        .clone()
        .oneshot(post(
            &other,
            &[("comment", "a reply"), ("ticket", &ticket), ("parent", &parent)],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/1/#post_2");

    let response = app.router.clone().oneshot(get("/2/", &op)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/1/#post_2");
}

#[tokio::test]
async fn bad_parents_are_rejected() {
    let app = app();
    let ctx = client(1);
    let ticket = app.fixture.ticket(&ctx);
    let thread = app.fixture.open_thread(&ctx, "opener").await.unwrap();
    let reply = app.fixture.reply(&ctx, thread, "reply").await.unwrap();
    let reply = reply.to_string();

    for parent in ["abc", "", "99", reply.as_str()] {
        let response = app
            .router
            .clone()
            .oneshot(post(
                &ctx,
                &[("comment", "x"), ("ticket", &ticket), ("parent", parent)],
            ))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "parent {:?}",
            parent
        );
    }

    assert_eq!(app.fixture.board.store().count_posts().await.unwrap(), 2);
}

#[tokio::test]
async fn thread_lookup_errors() {
    let app = app();
    let ctx = client(1);

    let response = app.router.clone().oneshot(get("/abc/", &ctx)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.router.clone().oneshot(get("/99/", &ctx)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn opener_is_marked_in_thread() {
    let app = app();
    let op = client(1);
    let other = client(2);
    let thread = app.fixture.open_thread(&op, "opener").await.unwrap();
    app.fixture.reply(&other, thread, "first reply").await.unwrap();
    app.fixture.reply(&op, thread, "op again").await.unwrap();

    let response = app
        .router
        .clone()
        .oneshot(get(&format!("/{}/", thread), &other))
        .await
        .unwrap();
    let html = body_text(response).await;

    assert_eq!(html.matches("class=\"post op\"").count(), 2);
    assert_eq!(html.matches("class=\"post\"").count(), 1);
}

#[tokio::test]
async fn assets_are_served() {
    let app = app();

    let response = app
        .router
        .clone()
        .oneshot(get("/assets/style.css", &client(1)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "body { color: red; }");
}

#[tokio::test]
async fn each_client_gets_its_own_ticket() {
    let app = app();
    let visitors = clients(4);
    let tickets: Vec<_> = visitors.iter().map(|c| app.fixture.ticket(c)).collect();

    for (i, ctx) in visitors.iter().enumerate() {
        let response = app.router.clone().oneshot(get("/", ctx)).await.unwrap();
        // Base64 may carry '/', which the template escapes.
        let html = body_text(response).await.replace("&#x2f;", "/");
        assert!(html.contains(&tickets[i]));
        for (j, other) in tickets.iter().enumerate() {
            if i != j {
                assert!(!html.contains(other.as_str()));
            }
        }
    }
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_client_can_open_a_thread(ctx in request_context(), text in comment()) {
        let app = app();
        let ticket = app.fixture.ticket(&ctx);

        let (status, target, count) = block_on(async {
            let response = app
                .router
                .clone()
                .oneshot(post(&ctx, &[("comment", &text), ("ticket", &ticket)]))
                .await
                .unwrap();
            let status = response.status();
            let target = location(&response).to_string();
            let count = app.fixture.board.store().count_posts().await.unwrap();
            (status, target, count)
        });

        prop_assert_eq!(status, StatusCode::SEE_OTHER);
        prop_assert_eq!(target, "/1/");
        prop_assert_eq!(count, 1);
    }

    #[test]
    fn borrowed_tickets_never_post(
        owner in request_context(),
        sender in request_context(),
        text in comment(),
    ) {
        prop_assume!(
            format!("{}{}", owner.source_address, owner.user_agent)
                != format!("{}{}", sender.source_address, sender.user_agent)
        );
        let app = app();
        let ticket = app.fixture.ticket(&owner);

        let (status, count) = block_on(async {
            let response = app
                .router
                .clone()
                .oneshot(post(&sender, &[("comment", &text), ("ticket", &ticket)]))
                .await
                .unwrap();
            let count = app.fixture.board.store().count_posts().await.unwrap();
            (response.status(), count)
        });

        prop_assert_eq!(status, StatusCode::BAD_REQUEST);
        prop_assert_eq!(count, 0);
    }
}
