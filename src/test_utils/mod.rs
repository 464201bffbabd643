//! Assertions and helpers shared by the page and endpoint tests.

#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_checked_radio, assert_form_error_message, assert_form_input,
    assert_form_input_with_value, assert_form_submit_button_with_text, assert_hx_endpoint,
    assert_selected_option, must_get_form,
};
pub(crate) use html::{
    assert_valid_html, get_summary_value, parse_html_document, parse_html_fragment,
};
pub(crate) use http::{assert_content_type, assert_hx_redirect};
