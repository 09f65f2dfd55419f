use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use time::Date;

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_SECONDARY_STYLE: &str = "px-3 py-1.5 text-sm font-medium \
    text-gray-900 bg-white rounded border border-gray-200 \
    hover:bg-gray-100 hover:text-blue-700 focus:z-10 dark:bg-gray-800 \
    dark:text-gray-400 dark:border-gray-600 dark:hover:text-white \
    dark:hover:bg-gray-700";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Badge styles
pub const BADGE_GREEN_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold rounded-full text-green-800 bg-green-100 \
    dark:bg-green-900 dark:text-green-300";

pub const BADGE_YELLOW_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold rounded-full text-yellow-800 bg-yellow-100 \
    dark:bg-yellow-900 dark:text-yellow-300";

pub const BADGE_RED_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold rounded-full text-red-800 bg-red-100 \
    dark:bg-red-900 dark:text-red-300";

pub const BADGE_BLUE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold rounded-full text-blue-800 bg-blue-100 \
    dark:bg-blue-900 dark:text-blue-300";

// Card and tab styles
pub const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-sm";

pub const TAB_ACTIVE_STYLE: &str = "inline-block px-4 py-2 rounded-lg \
    text-white bg-blue-600 dark:bg-blue-500";

pub const TAB_INACTIVE_STYLE: &str = "inline-block px-4 py-2 rounded-lg \
    hover:text-gray-900 hover:bg-gray-100 dark:hover:bg-gray-800 \
    dark:hover:text-white";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col w-full max-w-7xl px-6 py-8 mx-auto lg:py-10 text-gray-900 dark:text-white";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Admin" }
                link href="/static/main.css" rel="stylesheet";

                script src="/static/htmx-2.0.8-min.js" integrity="sha384-/TgkGk7p307TH7EXJDuUlgG3Ce1UVolAOFopFekQkkXihi5u/6OCvVKyz1W+idaz" {}
                script src="/static/htmx-ext-response-targets-2.0.4.js" integrity="sha384-T41oglUPvXLGBVyRdZsVRxNWnOOqCynaPubjUVjxhsjFTKrFJGEMm3/0KGmNQ+Pg" {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }

                script src="/static/app.js" defer {}
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                // Alert container for out-of-band swaps
                div
                    id="alert-container"
                    class="hidden w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Dashboard"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// A row of tab links where the tab matching `active` is highlighted.
///
/// `tabs` holds `(value, label, url)` triples.
pub fn tab_bar(tabs: &[(&str, &str, String)], active: &str) -> Markup {
    html!(
        ul
            class="flex flex-wrap gap-2 text-sm font-medium text-center
                text-gray-500 dark:text-gray-400"
            role="tablist"
        {
            @for (value, label, url) in tabs {
                li role="presentation"
                {
                    a
                        href=(url)
                        role="tab"
                        aria-selected=(if *value == active { "true" } else { "false" })
                        class=(if *value == active { TAB_ACTIVE_STYLE } else { TAB_INACTIVE_STYLE })
                    {
                        (label)
                    }
                }
            }
        }
    )
}

/// A horizontal progress bar filled to `percent` (clamped to 0-100).
pub fn progress_bar(percent: u32, fill_style: &str) -> Markup {
    let percent = percent.min(100);

    html!(
        div
            class="w-full bg-gray-200 rounded-full h-2 dark:bg-gray-700"
            role="progressbar"
            aria-valuemin="0"
            aria-valuemax="100"
            aria-valuenow=(percent)
        {
            div
                class={ "rounded-full h-2 " (fill_style) }
                style={ "width: " (percent) "%" }
            {}
        }
    )
}

/// Convert a decimal amount to `f64` for display, rounded to cents.
pub fn to_display_f64(amount: Decimal) -> f64 {
    amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

pub fn format_currency(amount: Decimal) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let number = to_display_f64(amount);

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits trailing zeros, so we must add them back ourselves.
    // For example, "12.30" is rendered as "12.3" and "650.00" as "650".
    match formatted_string.find('.') {
        None => formatted_string.push_str(".00"),
        Some(dot) if formatted_string.len() - dot == 2 => formatted_string.push('0'),
        Some(_) => {}
    }

    formatted_string
}

/// Format an hours value without trailing zeros, e.g. "7.5 h".
pub fn format_hours(hours: Decimal) -> String {
    format!("{} h", hours.normalize())
}

/// Format a date as e.g. "14 June 2025".
pub fn format_date_long(date: Date) -> String {
    format!("{} {} {}", date.day(), date.month(), date.year())
}
