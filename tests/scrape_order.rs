use std::net::SocketAddr;
use std::time::Duration;

use axum::{routing::get, Router, http::StatusCode, response::Html};
use tokio::net::TcpListener;

use school_chat_server::scrape::{scrape_all, compose_context};

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn page(text: &'static str) -> Html<String> {
    Html(format!("<html><body><p>{}</p></body></html>", text))
}

#[tokio::test]
async fn fragments_come_back_in_configured_order() {
    let app = Router::new()
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                page("alpha wing news")
            }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/fast", get(|| async { page("gamma wing news") }));
    let addr = serve(app).await;

    let pages = vec![
        format!("http://{}/slow", addr),
        format!("http://{}/broken", addr),
        format!("http://{}/fast", addr),
    ];

    let fragments = scrape_all(&pages).await;

    // One slot per configured page, in configuration order, even though the
    // fast page finished long before the slow one
    assert_eq!(fragments.len(), 3);
    assert_eq!(fragments[0].url, pages[0]);
    assert_eq!(fragments[1].url, pages[1]);
    assert_eq!(fragments[2].url, pages[2]);

    assert!(fragments[0].text.contains("alpha wing news"));
    assert!(fragments[1].text.is_empty());
    assert!(fragments[2].text.contains("gamma wing news"));
}

#[tokio::test]
async fn composed_context_keeps_markers_ordered_with_empty_failed_slot() {
    let app = Router::new()
        .route("/one", get(|| async { page("first page body") }))
        .route(
            "/two",
            get(|| async { (StatusCode::NOT_FOUND, "missing") }),
        )
        .route("/three", get(|| async { page("third page body") }));
    let addr = serve(app).await;

    let pages = vec![
        format!("http://{}/one", addr),
        format!("http://{}/two", addr),
        format!("http://{}/three", addr),
    ];

    let fragments = scrape_all(&pages).await;
    let context = compose_context(&fragments, 10_000);

    let first = context.find(&format!("--- Page: {} ---", pages[0])).unwrap();
    let second = context.find(&format!("--- Page: {} ---", pages[1])).unwrap();
    let third = context.find(&format!("--- Page: {} ---", pages[2])).unwrap();
    assert!(first < second && second < third);

    // The 404 page contributes a marker and nothing else
    assert!(context.contains(&format!(
        "--- Page: {} --- --- Page: {} ---",
        pages[1], pages[2]
    )));

    // Whitespace is fully normalized
    assert!(!context.contains("  "));
    assert_eq!(context, context.trim());
}

#[tokio::test]
async fn all_pages_down_still_yields_every_marker() {
    // Bind-then-drop leaves a port nothing is listening on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = listener.local_addr().unwrap();
    drop(listener);

    let pages = vec![
        format!("http://{}/a", dead),
        format!("http://{}/b", dead),
    ];

    let fragments = scrape_all(&pages).await;
    assert_eq!(fragments.len(), 2);
    assert!(fragments.iter().all(|f| f.text.is_empty()));

    let context = compose_context(&fragments, 10_000);
    assert!(context.contains(&format!("--- Page: {} ---", pages[0])));
    assert!(context.contains(&format!("--- Page: {} ---", pages[1])));
}
