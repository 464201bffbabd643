//! Shared page layout, style classes and formatting helpers for the maud views.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{endpoints, expense::Amount};

pub const LINK_STYLE: &str = "text-indigo-600 hover:text-indigo-500 \
    dark:text-indigo-400 dark:hover:text-indigo-300 underline";

pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 rounded-lg text-white \
    bg-indigo-600 hover:bg-indigo-700 disabled:bg-indigo-400 \
    dark:bg-indigo-500 dark:hover:bg-indigo-600";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-400 dark:hover:text-red-300 underline bg-transparent \
    border-none cursor-pointer";

pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto max-w-md text-slate-900 dark:text-white";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-slate-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-slate-900 dark:text-white bg-slate-50 dark:bg-slate-700 \
    border border-slate-300 dark:border-slate-600 dark:placeholder-slate-400 \
    focus:ring-indigo-600 focus:border-indigo-600";
pub const FORM_RADIO_GROUP_STYLE: &str = "grid grid-cols-2 gap-3";
pub const FORM_RADIO_INPUT_STYLE: &str = "peer h-4 w-4 shrink-0 cursor-pointer \
    text-indigo-600 border-slate-300 dark:border-slate-600";
pub const FORM_RADIO_LABEL_STYLE: &str = "flex-1 rounded border border-slate-300 \
    dark:border-slate-600 bg-white dark:bg-slate-700 px-3 py-2 text-sm font-medium \
    text-slate-700 dark:text-white cursor-pointer \
    peer-checked:border-indigo-600 peer-checked:bg-indigo-50 peer-checked:text-indigo-700 \
    peer-checked:dark:bg-indigo-600/20 peer-checked:dark:text-indigo-200";

pub const TABLE_HEADER_STYLE: &str = "text-xs text-slate-700 uppercase \
    bg-slate-100 dark:bg-slate-700 dark:text-slate-300";
pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-slate-800 dark:border-slate-700";
pub const TABLE_CELL_STYLE: &str = "px-6 py-3";

pub const CARD_STYLE: &str = "p-4 rounded-2xl shadow bg-white dark:bg-slate-800";

pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-slate-900 dark:text-white";

/// Extra elements to add to a page's `<head>`.
pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
    Style(PreEscaped<String>),
}

/// The page skeleton shared by every full page.
pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Expense Manager" }

                script src="https://cdn.tailwindcss.com" {}
                script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4/dist/response-targets.js" {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                        HeadElement::Style(text) => style { (text) }
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="min-h-screen bg-gradient-to-br from-white to-slate-50 dark:from-slate-900 dark:to-slate-900"
            {
                (content)

                div
                    id="alert-container"
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

/// A full page explaining an error, e.g. a 404 or 500.
pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="py-16 px-4 mx-auto max-w-screen-sm text-center"
        {
            h1 class="mb-4 text-7xl lg:text-9xl font-extrabold tracking-tight text-indigo-600 dark:text-indigo-400"
            {
                (header)
            }

            p class="mb-4 text-3xl md:text-4xl font-bold tracking-tight text-slate-900 dark:text-white"
            {
                (description)
            }

            p class="mb-4 text-xl md:text-2xl text-slate-700 dark:text-slate-300"
            {
                (fix)
            }

            a
                href=(endpoints::ROOT)
                class="inline-flex my-4 px-5 py-2.5 rounded-lg text-sm font-medium text-white bg-indigo-600 hover:bg-indigo-700"
            {
                "Back to Expenses"
            }
        }
    );

    base(title, &[], &content)
}

/// Returns the CSS styles for adding a currency sign prefix to number inputs.
pub fn currency_input_styles() -> HeadElement {
    HeadElement::Style(PreEscaped(
        r#"
        .input-wrapper {
            position: relative;
        }
        .input-wrapper input[type="number"] {
            padding-left: 1.4rem;
        }
        .input-wrapper::before {
            content: '$';
            position: absolute;
            left: 0.6rem;
            top: 50%;
            transform: translateY(-50%);
            pointer-events: none;
        }
        "#
        .to_owned(),
    ))
}

/// Format `amount` as dollars with thousands separators and two decimal places, e.g. "$1,234.50".
///
/// The dollars and cents are formatted from the integer cents, so every
/// amount an [Amount] can hold is shown exactly.
pub fn format_currency(amount: Amount) -> String {
    let cents = amount.cents();
    let sign = if cents < 0 { "-" } else { "" };
    let dollars = (cents.unsigned_abs() / 100).to_string();
    let remainder = cents.unsigned_abs() % 100;

    let mut whole = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (index, digit) in dollars.chars().enumerate() {
        if index > 0 && (dollars.len() - index) % 3 == 0 {
            whole.push(',');
        }
        whole.push(digit);
    }

    format!("{sign}${whole}.{remainder:02}")
}
