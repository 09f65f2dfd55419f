//! The rent tracker page: this month's payment status and the payment history.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    charts::{PageChart, charts_head_elements, charts_view},
    endpoints::{self, format_endpoint},
    html::{
        BADGE_BLUE_STYLE, BADGE_GREEN_STYLE, BADGE_RED_STYLE, BUTTON_PRIMARY_STYLE,
        BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency, format_date_long, format_hours, tab_bar,
    },
    navigation::with_sidebar,
    rent::{
        MonthKey, PaymentRecord, RentLedger,
        charts::collection_chart,
        ledger::{MonthlyCollection, RentHistoryRow, RentRow},
        trailing_months,
    },
    timezone::local_today,
};

/// The state needed for the rent tracker page.
#[derive(Debug, Clone)]
pub struct RentTrackerState {
    pub rent_ledger: Arc<Mutex<RentLedger>>,
    pub local_timezone: String,
    pub months_displayed: usize,
}

impl FromRef<AppState> for RentTrackerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            rent_ledger: state.rent_ledger.clone(),
            local_timezone: state.local_timezone.clone(),
            months_displayed: state.months_displayed,
        }
    }
}

/// The month and tab selected on the rent tracker page.
#[derive(Debug, Default, Deserialize)]
pub struct RentTrackerQuery {
    pub month: Option<String>,
    pub tab: Option<String>,
}

/// The views of the rent tracker page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RentTab {
    Status,
    History,
}

impl RentTab {
    /// Unknown or missing tabs fall back to [RentTab::Status].
    fn from_query(tab: Option<&str>) -> Self {
        match tab {
            Some("history") => RentTab::History,
            _ => RentTab::Status,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            RentTab::Status => "status",
            RentTab::History => "history",
        }
    }
}

/// The URL of the rent tracker page for `month` and `tab`.
///
/// Falls back to the page without a query if the query cannot be encoded.
fn rent_tracker_url(month: &MonthKey, tab: &str) -> String {
    match serde_urlencoded::to_string([("month", month.as_str()), ("tab", tab)]) {
        Ok(query) => format!("{}?{}", endpoints::RENT_TRACKER_VIEW, query),
        Err(error) => {
            tracing::error!("Could not encode rent tracker query for {month}: {error}");
            endpoints::RENT_TRACKER_VIEW.to_owned()
        }
    }
}

/// Render the rent tracker page for the month and tab in the query.
///
/// Months outside the displayed range select the current month.
pub async fn get_rent_tracker_page(
    State(state): State<RentTrackerState>,
    Query(query): Query<RentTrackerQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let months = trailing_months(today, state.months_displayed);
    let current_month = MonthKey::from_date(today);

    let selected_month = query
        .month
        .as_deref()
        .map(MonthKey::new)
        .filter(|month| months.contains(month))
        .unwrap_or(current_month);
    let tab = RentTab::from_query(query.tab.as_deref());

    let ledger = state
        .rent_ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire rent ledger lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let page = match tab {
        RentTab::Status => {
            let rows = ledger.month_view(&selected_month)?;
            let summary = month_collection(&ledger, &selected_month)?;

            rent_tracker_view(
                &months,
                &selected_month,
                tab,
                &[],
                &status_view(&rows, &summary, &selected_month),
            )
        }
        RentTab::History => {
            let history = ledger.history_view(&months)?;
            let collections = ledger.collection_summary(&months)?;
            let charts = [PageChart {
                id: "rent-collection-chart",
                options: collection_chart(&collections).to_string(),
            }];

            rent_tracker_view(
                &months,
                &selected_month,
                tab,
                &charts,
                &history_view(&months, &history, &charts),
            )
        }
    };

    Ok(page.into_response())
}

pub(super) fn month_collection(
    ledger: &RentLedger,
    month: &MonthKey,
) -> Result<MonthlyCollection, Error> {
    Ok(ledger
        .collection_summary(std::slice::from_ref(month))?
        .pop()
        .unwrap_or(MonthlyCollection {
            month: month.clone(),
            paid_count: 0,
            unpaid_count: 0,
            collected: Default::default(),
        }))
}

fn rent_tracker_view(
    months: &[MonthKey],
    selected_month: &MonthKey,
    tab: RentTab,
    charts: &[PageChart],
    tab_content: &Markup,
) -> Markup {
    let tabs = [
        ("status", "Payment Status", rent_tracker_url(selected_month, "status")),
        ("history", "Payment History", rent_tracker_url(selected_month, "history")),
    ];

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex flex-wrap items-end justify-between gap-4 mb-6"
            {
                div
                {
                    h1 class="text-2xl font-bold" { "Rent Tracker" }
                    p class="text-gray-600 dark:text-gray-400"
                    {
                        "Track monthly rent payments and kitchen hours."
                    }
                }

                form
                    method="get"
                    action=(endpoints::RENT_TRACKER_VIEW)
                    class="flex items-end gap-2"
                {
                    input type="hidden" name="tab" value=(tab.as_str());

                    div
                    {
                        label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                        select
                            id="month"
                            name="month"
                            class=(FORM_TEXT_INPUT_STYLE)
                            onchange="this.form.submit()"
                        {
                            @for month in months.iter().rev() {
                                option
                                    value=(month)
                                    selected[month == selected_month]
                                {
                                    (month)
                                }
                            }
                        }
                    }

                    noscript
                    {
                        button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Show" }
                    }
                }
            }

            div class="mb-6" { (tab_bar(&tabs, tab.as_str())) }

            (tab_content)
        }
    );

    let head_elements = if charts.is_empty() {
        Vec::new()
    } else {
        charts_head_elements(charts)
    };

    base(
        "Rent Tracker",
        &head_elements,
        &with_sidebar(endpoints::RENT_TRACKER_VIEW, &content),
    )
}

fn status_view(rows: &[RentRow], summary: &MonthlyCollection, month: &MonthKey) -> Markup {
    html!(
        (rent_summary_view(summary, false))

        div id="member-cards" class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-4"
        {
            @for row in rows {
                (member_card_view(row, month))
            }
        }
    )
}

/// The paid and unpaid counts for a month.
///
/// When `swap_oob` is set the summary replaces the one already on the page.
pub(super) fn rent_summary_view(summary: &MonthlyCollection, swap_oob: bool) -> Markup {
    html!(
        div
            id="rent-summary"
            hx-swap-oob=[swap_oob.then_some("true")]
            class="grid grid-cols-1 sm:grid-cols-3 gap-4 mb-6"
        {
            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-600 dark:text-gray-400" { "Paid" }
                p class="text-2xl font-bold" data-summary="paid" { (summary.paid_count) }
            }

            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-600 dark:text-gray-400" { "Unpaid" }
                p class="text-2xl font-bold" data-summary="unpaid" { (summary.unpaid_count) }
            }

            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-600 dark:text-gray-400"
                {
                    "Collected in " (summary.month)
                }
                p class="text-2xl font-bold" data-summary="collected"
                {
                    (format_currency(summary.collected))
                }
            }
        }
    )
}

pub(super) fn member_card_id(row: &RentRow) -> String {
    format!("member-{}", row.member.id)
}

/// A member's rent details for `month`, with forms to change them.
pub(super) fn member_card_view(row: &RentRow, month: &MonthKey) -> Markup {
    let card_id = member_card_id(row);
    let card_target = format!("#{card_id}");
    let toggle_endpoint = format_endpoint(endpoints::TOGGLE_RENT_PAYMENT, row.member.id);
    let base_rent_endpoint = format_endpoint(endpoints::PUT_BASE_RENT, row.member.id);
    let hours_endpoint = format_endpoint(endpoints::PUT_VARIABLE_HOURS, row.member.id);
    let base_rent_input_id = format!("base-rent-{}", row.member.id);
    let hours_input_id = format!("hours-{}", row.member.id);

    html!(
        div id=(card_id) class={ (CARD_STYLE) " flex flex-col gap-3" }
        {
            div class="flex items-start justify-between"
            {
                div
                {
                    h3 class="text-lg font-semibold" { (row.member.name) }
                    span class=(BADGE_BLUE_STYLE) { (row.member.department) }
                }

                @match &row.record {
                    PaymentRecord::Paid(_) => {
                        span class=(BADGE_GREEN_STYLE) data-status="paid" { "Paid" }
                    }
                    PaymentRecord::Unpaid => {
                        span class=(BADGE_RED_STYLE) data-status="unpaid" { "Unpaid" }
                    }
                }
            }

            dl class="grid grid-cols-2 gap-x-4 gap-y-1 text-sm"
            {
                dt class="text-gray-600 dark:text-gray-400" { "Rent due" }
                dd { (format_currency(row.effective_rent)) }

                @if let Some(hours) = row.member.applicable_hours() {
                    dt class="text-gray-600 dark:text-gray-400" { "Kitchen hours" }
                    dd { (format_hours(hours)) }
                }

                @if let PaymentRecord::Paid(payment) = &row.record {
                    dt class="text-gray-600 dark:text-gray-400" { "Paid on" }
                    dd { (format_date_long(payment.paid_on.date())) }

                    dt class="text-gray-600 dark:text-gray-400" { "Amount paid" }
                    dd data-amount-paid { (format_currency(payment.amount_paid)) }

                    @if let Some(hours) = payment.hours_snapshot {
                        dt class="text-gray-600 dark:text-gray-400" { "Hours at payment" }
                        dd { (format_hours(hours)) }
                    }
                }

                dt class="text-gray-600 dark:text-gray-400" { "Total paid" }
                dd data-total-paid { (format_currency(row.total_paid)) }
            }

            form
                hx-post=(toggle_endpoint)
                hx-target=(card_target)
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                data-form="toggle-payment"
            {
                input type="hidden" name="month" value=(month);

                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    @if row.record.is_paid() { "Mark as Unpaid" } @else { "Mark as Paid" }
                }
            }

            form
                hx-put=(base_rent_endpoint)
                hx-target=(card_target)
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                data-form="base-rent"
                class="flex items-end gap-2"
            {
                input type="hidden" name="month" value=(month);

                div class="flex-1"
                {
                    label for=(base_rent_input_id) class=(FORM_LABEL_STYLE) { "Base rent" }
                    input
                        id=(base_rent_input_id)
                        type="number"
                        name="amount"
                        min="0"
                        step="0.01"
                        value=(row.member.base_rent)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Save" }
            }

            @if row.member.department.has_variable_hours() {
                form
                    hx-put=(hours_endpoint)
                    hx-target=(card_target)
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    data-form="hours"
                    class="flex items-end gap-2"
                {
                    input type="hidden" name="month" value=(month);

                    div class="flex-1"
                    {
                        label for=(hours_input_id) class=(FORM_LABEL_STYLE) { "Kitchen hours" }
                        input
                            id=(hours_input_id)
                            type="number"
                            name="hours"
                            min="0"
                            step="0.5"
                            value=(row.member.variable_hours.unwrap_or_default())
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Save" }
                }
            }
        }
    )
}

fn history_view(months: &[MonthKey], history: &[RentHistoryRow], charts: &[PageChart]) -> Markup {
    html!(
        (charts_view(charts))

        div class="overflow-x-auto rounded-lg"
        {
            table id="rent-history" class="w-full text-sm text-left rtl:text-right"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Member" }
                        @for month in months {
                            th scope="col" class=(TABLE_CELL_STYLE) { (month) }
                        }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Total paid" }
                    }
                }

                tbody
                {
                    @for row in history {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            th scope="row" class=(TABLE_CELL_STYLE)
                            {
                                (row.member.name)
                            }

                            @for record in &row.records {
                                td class=(TABLE_CELL_STYLE)
                                {
                                    @match record {
                                        PaymentRecord::Paid(payment) => {
                                            span
                                                class=(BADGE_GREEN_STYLE)
                                                title=(format_date_long(payment.paid_on.date()))
                                            {
                                                (format_currency(payment.amount_paid))
                                            }
                                        }
                                        PaymentRecord::Unpaid => {
                                            span class=(BADGE_RED_STYLE) { "Unpaid" }
                                        }
                                    }
                                }
                            }

                            td class=(TABLE_CELL_STYLE) { (format_currency(row.total_paid)) }
                        }
                    }
                }
            }
        }
    )
}
