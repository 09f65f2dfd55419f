//! Stat cards shown at the top of the dashboard.

use maud::{Markup, html};

use crate::html::{CARD_STYLE, LINK_STYLE};

/// A single headline number on the dashboard.
pub(super) struct StatCard<'a> {
    /// Used as the card's `data-stat` attribute, e.g. "events".
    pub key: &'a str,
    pub label: &'a str,
    pub value: String,
    /// The page the card links to for more detail.
    pub link: &'a str,
}

pub(super) fn stat_cards_view(cards: &[StatCard]) -> Markup {
    html!(
        section
            id="stat-cards"
            class="grid grid-cols-1 sm:grid-cols-2 xl:grid-cols-4 gap-4 mb-6"
        {
            @for card in cards {
                (stat_card_view(card))
            }
        }
    )
}

fn stat_card_view(card: &StatCard) -> Markup {
    html!(
        div class=(CARD_STYLE) data-stat=(card.key)
        {
            p class="text-sm text-gray-600 dark:text-gray-400" { (card.label) }
            p class="text-3xl font-bold mt-1" data-value { (card.value) }
            a href=(card.link) class={ "text-sm " (LINK_STYLE) } { "View" }
        }
    )
}
