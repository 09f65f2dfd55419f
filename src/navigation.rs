//! This file defines the templates and a convenience function for creating the sidebar navigation.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_sidebar_html(self) -> Markup {
        let style = if self.is_current {
            "flex items-center px-3 py-2 rounded-lg text-white bg-blue-600
            dark:bg-blue-500"
        } else {
            "flex items-center px-3 py-2 rounded-lg text-gray-900
            hover:bg-gray-100 dark:text-white dark:hover:bg-gray-700"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                span { (self.title) }
            }
        )
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let pages = [
            (endpoints::DASHBOARD_VIEW, "Dashboard"),
            (endpoints::CALENDAR_VIEW, "Calendar"),
            (endpoints::EMPLOYEES_VIEW, "Employee Progress"),
            (endpoints::RENT_TRACKER_VIEW, "Rent Tracker"),
            (endpoints::EVENT_TRACKING_VIEW, "Event Tracking"),
            (endpoints::RESOURCES_VIEW, "Resources"),
        ];

        let links = pages
            .into_iter()
            .map(|(url, title)| Link {
                url,
                title,
                is_current: active_endpoint == url,
            })
            .collect();

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        let links = self.links;

        // Template adapted from https://flowbite.com/docs/components/sidebar/
        html!(
            aside
                class="w-full lg:w-64 lg:min-h-screen shrink-0 bg-white
                border-b lg:border-b-0 lg:border-r border-gray-200
                dark:bg-gray-800 dark:border-gray-700"
                aria-label="Sidebar"
            {
                div class="px-3 py-4"
                {
                    a
                        href=(endpoints::DASHBOARD_VIEW)
                        class="flex items-center ps-2.5 mb-5"
                    {
                        span
                            class="self-center text-xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "Admin Dashboard"
                        }
                    }

                    ul class="flex flex-wrap gap-1 lg:flex-col lg:space-y-1 font-medium"
                    {
                        @for link in links {
                            li { (link.into_sidebar_html()) }
                        }
                    }
                }
            }
        )
    }
}

/// Wrap a page's main content with the sidebar, highlighting `active_endpoint`.
pub fn with_sidebar(active_endpoint: &str, content: &Markup) -> Markup {
    let nav_bar = NavBar::new(active_endpoint).into_html();

    html!(
        div class="lg:flex"
        {
            (nav_bar)

            main class="flex-1 min-w-0"
            {
                (content)
            }
        }
    )
}
