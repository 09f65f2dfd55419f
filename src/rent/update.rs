//! Endpoints that change the rent ledger.
//!
//! Each successful change responds with the member's re-rendered card, the
//! month summary as an out-of-band swap and a toast describing the change.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    html::{format_currency, format_hours},
    rent::{
        MemberId, MonthKey, RentLedger,
        page::{member_card_view, month_collection, rent_summary_view},
    },
    timezone::{local_now, local_today},
};

/// The state needed for changing the rent ledger.
#[derive(Debug, Clone)]
pub struct RentEndpointState {
    pub rent_ledger: Arc<Mutex<RentLedger>>,
    pub local_timezone: String,
}

impl FromRef<AppState> for RentEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            rent_ledger: state.rent_ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The month shown on the page that submitted the form.
#[derive(Debug, Clone, Deserialize)]
pub struct TogglePaymentForm {
    pub month: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseRentForm {
    pub amount: String,
    pub month: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariableHoursForm {
    pub hours: String,
    pub month: String,
}

fn lock_ledger(state: &RentEndpointState) -> Result<MutexGuard<'_, RentLedger>, Error> {
    state
        .rent_ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire rent ledger lock: {error}"))
        .map_err(|_| Error::StoreLockError)
}

/// Flip whether a member has paid rent for the month in the form.
pub async fn toggle_payment_endpoint(
    Path(member_id): Path<MemberId>,
    State(state): State<RentEndpointState>,
    Form(form): Form<TogglePaymentForm>,
) -> Response {
    let now = match local_now(&state.local_timezone) {
        Ok(now) => now,
        Err(error) => return error.into_alert_response(),
    };

    let mut ledger = match lock_ledger(&state) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    let month = MonthKey::new(&form.month);

    match ledger.toggle_payment(member_id, month.clone(), now) {
        Ok(toggled) => {
            let message = toggled.notification();
            tracing::info!("{message}");

            updated_member_response(&ledger, member_id, &month, Alert::SuccessSimple { message })
        }
        Err(error) => {
            tracing::warn!("Could not toggle rent payment for member {member_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// Change a member's base rent.
pub async fn update_base_rent_endpoint(
    Path(member_id): Path<MemberId>,
    State(state): State<RentEndpointState>,
    Form(form): Form<BaseRentForm>,
) -> Response {
    let mut ledger = match lock_ledger(&state) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    let alert = match ledger.set_base_rent(member_id, &form.amount) {
        Ok(member) => {
            tracing::info!(
                "Set base rent of member {member_id} to {}",
                member.base_rent
            );

            Alert::Success {
                message: "Base rent updated".to_owned(),
                details: format!(
                    "{}'s base rent is now {}",
                    member.name,
                    format_currency(member.base_rent)
                ),
            }
        }
        Err(error) => {
            tracing::warn!("Rejected base rent for member {member_id}: {error}");
            return error.into_alert_response();
        }
    };

    updated_member_response(&ledger, member_id, &MonthKey::new(&form.month), alert)
}

/// Change a member's kitchen hours.
///
/// A payment already recorded for the current month is updated to match.
pub async fn update_variable_hours_endpoint(
    Path(member_id): Path<MemberId>,
    State(state): State<RentEndpointState>,
    Form(form): Form<VariableHoursForm>,
) -> Response {
    let current_month = match local_today(&state.local_timezone) {
        Ok(today) => MonthKey::from_date(today),
        Err(error) => return error.into_alert_response(),
    };

    let mut ledger = match lock_ledger(&state) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    let alert = match ledger.set_variable_hours(member_id, &form.hours, &current_month) {
        Ok(member) => {
            let hours = member.variable_hours.unwrap_or_default();
            tracing::info!("Set kitchen hours of member {member_id} to {hours}");

            Alert::Success {
                message: "Kitchen hours updated".to_owned(),
                details: format!("{} has worked {}", member.name, format_hours(hours)),
            }
        }
        Err(error) => {
            tracing::warn!("Rejected kitchen hours for member {member_id}: {error}");
            return error.into_alert_response();
        }
    };

    updated_member_response(&ledger, member_id, &MonthKey::new(&form.month), alert)
}

fn updated_member_response(
    ledger: &RentLedger,
    member_id: MemberId,
    month: &MonthKey,
    alert: Alert,
) -> Response {
    let (row, summary) = match ledger
        .row(member_id, month)
        .and_then(|row| Ok((row, month_collection(ledger, month)?)))
    {
        Ok(row_and_summary) => row_and_summary,
        Err(error) => return error.into_alert_response(),
    };

    html!(
        (member_card_view(&row, month))
        (rent_summary_view(&summary, true))
        (alert.into_oob_html())
    )
    .into_response()
}

#[cfg(test)]
mod rent_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
    };
    use rust_decimal::Decimal;
    use scraper::{Html, Selector};

    use crate::{
        rent::{Department, Member, MonthKey, PaymentRecord, RentLedger, RentPolicy},
        test_utils::{assert_valid_html, parse_html_fragment},
        timezone::local_today,
    };

    use super::{
        BaseRentForm, RentEndpointState, TogglePaymentForm, VariableHoursForm,
        toggle_payment_endpoint, update_base_rent_endpoint, update_variable_hours_endpoint,
    };

    fn get_state() -> RentEndpointState {
        let ledger = RentLedger::new(
            vec![
                Member {
                    id: 1,
                    name: "Alex Johnson".to_owned(),
                    department: Department::Fletcher,
                    base_rent: Decimal::from(600),
                    variable_hours: None,
                },
                Member {
                    id: 2,
                    name: "Michael Chen".to_owned(),
                    department: Department::Culinary,
                    base_rent: Decimal::from(600),
                    variable_hours: Some(Decimal::from(10)),
                },
            ],
            RentPolicy::default(),
        );

        RentEndpointState {
            rent_ledger: Arc::new(Mutex::new(ledger)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn current_month() -> MonthKey {
        MonthKey::from_date(local_today("Etc/UTC").unwrap())
    }

    fn text_of(html: &Html, selector: &str) -> String {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap_or_else(|| panic!("No element matches {selector}"))
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }

    #[tokio::test]
    async fn toggle_marks_member_paid() {
        let state = get_state();
        let month = current_month();

        let response = toggle_payment_endpoint(
            Path(2),
            State(state.clone()),
            Form(TogglePaymentForm {
                month: month.to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert_eq!(text_of(&html, "#member-2 [data-amount-paid]"), "$650.00");
        assert_eq!(text_of(&html, "#member-2 [data-total-paid]"), "$650.00");
        assert_eq!(text_of(&html, "#rent-summary [data-summary=paid]"), "1");
        assert_eq!(
            text_of(&html, "#alert-container p"),
            format!("Michael Chen's rent for {month} has been marked as paid")
        );

        let ledger = state.rent_ledger.lock().unwrap();
        assert!(ledger.record_for(2, &month).unwrap().is_paid());
    }

    #[tokio::test]
    async fn toggle_twice_marks_member_unpaid() {
        let state = get_state();
        let form = || {
            Form(TogglePaymentForm {
                month: "June 2025".to_owned(),
            })
        };

        toggle_payment_endpoint(Path(1), State(state.clone()), form()).await;
        let response = toggle_payment_endpoint(Path(1), State(state.clone()), form()).await;

        let html = parse_html_fragment(response).await;
        assert_eq!(
            text_of(&html, "#alert-container p"),
            "Alex Johnson's rent for June 2025 has been marked as unpaid"
        );
        let ledger = state.rent_ledger.lock().unwrap();
        assert_eq!(
            ledger.record_for(1, &MonthKey::new("June 2025")),
            Ok(PaymentRecord::Unpaid)
        );
        assert_eq!(ledger.total_paid(1), Ok(Decimal::ZERO));
    }

    #[tokio::test]
    async fn toggle_unknown_member_is_not_found_alert() {
        let response = toggle_payment_endpoint(
            Path(999),
            State(get_state()),
            Form(TogglePaymentForm {
                month: "June 2025".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert_eq!(text_of(&html, "p"), "Member not found");
    }

    #[tokio::test]
    async fn base_rent_update_rerenders_card() {
        let state = get_state();

        let response = update_base_rent_endpoint(
            Path(1),
            State(state.clone()),
            Form(BaseRentForm {
                amount: "700".to_owned(),
                month: "June 2025".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let input = html
            .select(&Selector::parse("#member-1 input[name=amount]").unwrap())
            .next()
            .expect("No base rent input");
        assert_eq!(input.value().attr("value"), Some("700"));
        assert_eq!(
            state.rent_ledger.lock().unwrap().effective_rent(1),
            Ok(Decimal::from(700))
        );
    }

    #[tokio::test]
    async fn negative_base_rent_is_rejected() {
        let state = get_state();
        let before = state.rent_ledger.lock().unwrap().clone();

        let response = update_base_rent_endpoint(
            Path(1),
            State(state.clone()),
            Form(BaseRentForm {
                amount: "-5".to_owned(),
                month: "June 2025".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        assert_eq!(text_of(&html, "p"), "Invalid input");
        assert_eq!(*state.rent_ledger.lock().unwrap(), before);
    }

    #[tokio::test]
    async fn hours_update_recomputes_current_month_payment() {
        let state = get_state();
        let month = current_month();
        toggle_payment_endpoint(
            Path(2),
            State(state.clone()),
            Form(TogglePaymentForm {
                month: month.to_string(),
            }),
        )
        .await;

        let response = update_variable_hours_endpoint(
            Path(2),
            State(state.clone()),
            Form(VariableHoursForm {
                hours: "12".to_owned(),
                month: month.to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_eq!(text_of(&html, "#member-2 [data-amount-paid]"), "$660.00");
        assert_eq!(
            state.rent_ledger.lock().unwrap().total_paid(2),
            Ok(Decimal::from(660))
        );
    }

    #[tokio::test]
    async fn hours_update_for_fletcher_member_is_rejected() {
        let response = update_variable_hours_endpoint(
            Path(1),
            State(get_state()),
            Form(VariableHoursForm {
                hours: "12".to_owned(),
                month: "June 2025".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_hours_are_rejected_and_ledger_stays_usable() {
        let state = get_state();
        let before = state.rent_ledger.lock().unwrap().clone();

        let response = update_variable_hours_endpoint(
            Path(2),
            State(state.clone()),
            Form(VariableHoursForm {
                hours: "79228162514264337593543950335".to_owned(),
                month: "June 2025".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!state.rent_ledger.is_poisoned());
        assert_eq!(*state.rent_ledger.lock().unwrap(), before);

        let response = update_base_rent_endpoint(
            Path(2),
            State(state.clone()),
            Form(BaseRentForm {
                amount: "79228162514264337593543950335".to_owned(),
                month: "June 2025".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!state.rent_ledger.is_poisoned());
        assert_eq!(*state.rent_ledger.lock().unwrap(), before);
    }
}
