#![cfg(feature = "highlight")]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use page_seo_audit::dom;
use page_seo_audit::highlight::{DocumentHost, HighlightResponder, HighlightState, PageHost, Rect};
use page_seo_audit::messaging::{Ack, Command, MessageDispatcher};
use page_seo_audit::{audit, Options, Page};
use tokio::task::LocalSet;
use tokio::time::sleep;

const OVERLAY: &str = "seo-highlight-overlay";

const PAGE: &str = r#"<html><body>
    <main>
        <h1 id="title">Title</h1>
        <section><h2>First</h2></section>
        <section><h2>Second</h2><img src="/img/chart.png" width="400" height="300"></section>
    </main>
</body></html>"#;

fn responder() -> HighlightResponder<DocumentHost> {
    let host = Rc::new(RefCell::new(DocumentHost::new(dom::parse(PAGE))));
    HighlightResponder::new(host, &Options::default())
}

fn overlay_count(responder: &HighlightResponder<DocumentHost>) -> usize {
    responder.host().borrow().overlay_count(OVERLAY)
}

fn overlay_token(responder: &HighlightResponder<DocumentHost>) -> Option<u64> {
    responder.host().borrow().overlay_token(OVERLAY)
}

#[tokio::test(start_paused = true)]
async fn two_successive_highlights_leave_one_overlay() {
    LocalSet::new()
        .run_until(async {
            let responder = responder();

            assert_eq!(responder.highlight("#title"), Ack::ok());
            assert_eq!(responder.highlight("img"), Ack::ok());

            assert_eq!(overlay_count(&responder), 1);
            assert_eq!(overlay_token(&responder), Some(2));
            assert_eq!(responder.state(), HighlightState::Highlighting { token: 2 });
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn overlay_removed_after_dwell() {
    LocalSet::new()
        .run_until(async {
            let responder = responder();
            responder.highlight("img");

            sleep(Duration::from_millis(2_999)).await;
            assert_eq!(overlay_count(&responder), 1);

            sleep(Duration::from_millis(2)).await;
            tokio::task::yield_now().await;
            assert_eq!(overlay_count(&responder), 0);
            assert_eq!(responder.state(), HighlightState::Idle);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn stale_timer_does_not_remove_newer_overlay() {
    LocalSet::new()
        .run_until(async {
            let responder = responder();
            responder.highlight("#title");

            sleep(Duration::from_secs(2)).await;
            responder.highlight("img");

            // first timer fires at 3s, second at 5s
            sleep(Duration::from_millis(1_500)).await;
            tokio::task::yield_now().await;
            assert_eq!(overlay_count(&responder), 1);
            assert_eq!(overlay_token(&responder), Some(2));
            assert_eq!(responder.state(), HighlightState::Highlighting { token: 2 });

            sleep(Duration::from_secs(2)).await;
            tokio::task::yield_now().await;
            assert_eq!(overlay_count(&responder), 0);
            assert_eq!(responder.state(), HighlightState::Idle);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn unresolved_selector_clears_and_acknowledges() {
    LocalSet::new()
        .run_until(async {
            let responder = responder();
            responder.highlight("#title");

            assert_eq!(responder.highlight("#does-not-exist"), Ack::ok());
            assert_eq!(overlay_count(&responder), 0);
            assert_eq!(responder.state(), HighlightState::Idle);

            assert_eq!(responder.highlight("div[[["), Ack::ok());
            assert_eq!(responder.state(), HighlightState::Idle);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn overlay_covers_element_and_scrolls() {
    LocalSet::new()
        .run_until(async {
            let responder = responder();
            responder.highlight("img");

            let host = responder.host().borrow();
            let overlay = host.document().select(&format!("#{OVERLAY}"));
            let style = dom::get_attribute(&overlay, "style").expect("overlay has a style");
            assert!(style.contains("width: 400px; height: 300px;"));
            assert_eq!(host.last_scroll().map(|(s, _)| s.as_str()), Some("img"));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn report_selectors_resolve_for_highlighting() {
    let page = Page::parse(PAGE, "https://example.com/").expect("valid location");
    let report = audit(&page);
    let second = report
        .headings
        .structure
        .iter()
        .find(|h| h.text == "Second")
        .expect("second heading")
        .selector
        .clone();
    let image = report.images.images_without_alt[0].selector.clone();

    LocalSet::new()
        .run_until(async {
            let responder = responder();
            for selector in [&second, &image] {
                responder.highlight(selector);
                assert_eq!(overlay_count(&responder), 1, "{selector} should resolve");
            }
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn dispatcher_routes_highlight_messages() {
    LocalSet::new()
        .run_until(async {
            let host = Rc::new(RefCell::new(DocumentHost::new(dom::parse(PAGE))));
            let mut dispatcher = MessageDispatcher::new();
            dispatcher.register(Box::new(HighlightResponder::new(Rc::clone(&host), &Options::default())));

            let ack = dispatcher
                .dispatch_json(r##"{"action": "highlightElement", "selector": "#title"}"##)
                .await
                .expect("well-formed message");
            assert_eq!(ack, Some(Ack { success: true }));
            assert_eq!(host.borrow().overlay_count(OVERLAY), 1);

            let ack = dispatcher
                .dispatch(&Command::HighlightElement { selector: String::new() })
                .await;
            assert_eq!(ack, None);

            let ack = dispatcher
                .dispatch_json(r#"{"action": "highlightElement"}"#)
                .await
                .expect("well-formed message");
            assert_eq!(ack, None);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn custom_dwell_from_options() {
    LocalSet::new()
        .run_until(async {
            let host = Rc::new(RefCell::new(DocumentHost::new(dom::parse(PAGE))));
            let options = Options {
                highlight_dwell: Duration::from_millis(500),
                ..Options::default()
            };
            let responder = HighlightResponder::new(host, &options);
            responder.highlight("#title");

            sleep(Duration::from_millis(501)).await;
            tokio::task::yield_now().await;
            assert_eq!(overlay_count(&responder), 0);
        })
        .await;
}

#[test]
fn overlay_rect_is_viewport_relative() {
    let host = DocumentHost::new(dom::parse(PAGE));
    assert_eq!(
        host.bounding_box("img"),
        Some(Rect { top: 0.0, left: 0.0, width: 400.0, height: 300.0 })
    );
}

#[test]
fn no_body_means_no_overlay_and_no_timer() {
    let host = DocumentHost::new(dom::parse(PAGE));
    dom::remove(&host.document().select("body"));
    let responder = HighlightResponder::new(Rc::new(RefCell::new(host)), &Options::default());

    // runs outside a LocalSet: scheduling a removal here would panic
    assert_eq!(responder.highlight("head"), Ack::ok());
    assert_eq!(overlay_count(&responder), 0);
    assert_eq!(responder.state(), HighlightState::Idle);
}
