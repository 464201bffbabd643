use axum::{body::Body, response::Response};
use scraper::{Html, Selector};

async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).to_string()
}

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&body_text(response).await)
}

pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&body_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// The text of the summary card tagged `data-summary="{key}"` on the month page,
/// e.g. "$1,200.00" for the key "month-total".
#[track_caller]
pub(crate) fn get_summary_value(html: &Html, key: &str) -> String {
    let selector = Selector::parse(&format!("[data-summary='{key}'] p")).unwrap();

    html.select(&selector)
        .next()
        .unwrap_or_else(|| panic!("summary card {key} missing"))
        .text()
        .collect::<String>()
        .trim()
        .to_owned()
}
