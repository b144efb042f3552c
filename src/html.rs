use maud::{DOCTYPE, Markup, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

// Front-end assets, served from the static directory.
pub const STYLESHEET: &str = "/static/main.css";
pub const HTMX_SCRIPT: &str = "/static/htmx-2.0.8-min.js";
pub const HTMX_SCRIPT_INTEGRITY: &str =
    "sha384-/TgkGk7p307TH7EXJDuUlgG3Ce1UVolAOFopFekQkkXihi5u/6OCvVKyz1W+idaz";
pub const HTMX_RESPONSE_TARGETS_SCRIPT: &str = "/static/htmx-ext-response-targets-2.0.4.js";
pub const HTMX_RESPONSE_TARGETS_SCRIPT_INTEGRITY: &str =
    "sha384-T41oglUPvXLGBVyRdZsVRxNWnOOqCynaPubjUVjxhsjFTKrFJGEMm3/0KGmNQ+Pg";
pub const ECHARTS_SCRIPT: &str = "/static/echarts.6.0.0.min.js";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
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
                title { (title) " - Survey Insights" }

                link href=(STYLESHEET) rel="stylesheet";

                script src=(HTMX_SCRIPT) integrity=(HTMX_SCRIPT_INTEGRITY) {}
                script
                    src=(HTMX_RESPONSE_TARGETS_SCRIPT)
                    integrity=(HTMX_RESPONSE_TARGETS_SCRIPT_INTEGRITY)
                {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                // Alert container for out-of-band swaps
                div
                    id="alert-container"
                    class="w-full max-w-md px-4"
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

/// Formats a count with thousands separators, e.g., 12345 -> "12,345".
pub fn format_count(count: usize) -> String {
    static COUNT_FMT: OnceLock<Formatter> = OnceLock::new();

    let count_fmt = COUNT_FMT.get_or_init(|| {
        Formatter::currency("")
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    if count == 0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "0".to_owned()
    } else {
        count_fmt.fmt_string(count as f64)
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::{
        HTMX_RESPONSE_TARGETS_SCRIPT_INTEGRITY, HTMX_SCRIPT_INTEGRITY, error_view, format_count,
    };

    #[test]
    fn formats_counts_with_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(42), "42");
        assert_eq!(format_count(1234), "1,234");
    }

    #[test]
    fn error_view_is_valid_html() {
        let markup = error_view("Not Found", "404", "Page not found", "Check the URL");

        let html = Html::parse_document(&markup.into_string());

        assert!(html.errors.is_empty(), "{:?}", html.errors);
        let h1 = html.select(&Selector::parse("h1").unwrap()).next().unwrap();
        assert_eq!(h1.text().collect::<String>().trim(), "404");
    }

    #[test]
    fn assets_are_served_locally_with_pinned_scripts() {
        let markup = error_view("Not Found", "404", "Page not found", "Check the URL");

        let html = Html::parse_document(&markup.into_string());

        let scripts: Vec<_> = html
            .select(&Selector::parse("head script").unwrap())
            .map(|script| script.value())
            .collect();
        assert!(!scripts.is_empty());
        for script in &scripts {
            let src = script.attr("src").unwrap_or_default();
            assert!(src.starts_with("/static/"), "{src} is not a local asset");
        }

        let integrity: Vec<_> = scripts
            .iter()
            .filter_map(|script| script.attr("integrity"))
            .collect();
        assert_eq!(
            integrity,
            vec![HTMX_SCRIPT_INTEGRITY, HTMX_RESPONSE_TARGETS_SCRIPT_INTEGRITY]
        );

        let stylesheet = html
            .select(&Selector::parse("head link[rel='stylesheet']").unwrap())
            .next()
            .unwrap();
        assert_eq!(stylesheet.value().attr("href"), Some("/static/main.css"));
        assert!(html.select(&Selector::parse("head style").unwrap()).next().is_none());
    }
}
