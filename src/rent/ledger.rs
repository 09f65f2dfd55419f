//! The rent ledger store: members, their monthly payment history and the
//! operations that change it.

use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    Error,
    rent::{
        Member, MemberId, MonthKey, Payment, PaymentRecord, RentPolicy, calculator::effective_rent,
    },
    validation::{ValidationError, parse_non_negative_decimal},
};

/// A member together with their payment history, one record per month.
#[derive(Debug, Clone, PartialEq)]
struct MemberAccount {
    member: Member,
    history: Vec<(MonthKey, PaymentRecord)>,
}

impl MemberAccount {
    fn record(&self, month: &MonthKey) -> Option<&PaymentRecord> {
        self.history
            .iter()
            .find(|(key, _)| key == month)
            .map(|(_, record)| record)
    }

    fn record_mut(&mut self, month: &MonthKey) -> Option<&mut PaymentRecord> {
        self.history
            .iter_mut()
            .find(|(key, _)| key == month)
            .map(|(_, record)| record)
    }

    fn upsert(&mut self, month: MonthKey, record: PaymentRecord) {
        match self.record_mut(&month) {
            Some(existing) => *existing = record,
            None => self.history.push((month, record)),
        }
    }

    fn total_paid(&self) -> Result<Decimal, ValidationError> {
        checked_sum(
            self.history
                .iter()
                .filter_map(|(_, record)| record.amount_paid()),
        )
        .ok_or_else(|| ValidationError::RentTooLarge(self.member.name.clone()))
    }
}

/// Add up `amounts`, or `None` if the total does not fit in a [Decimal].
fn checked_sum(mut amounts: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    amounts.try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}

/// The outcome of toggling a member's payment for a month.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentToggled {
    pub member_name: String,
    pub month: MonthKey,
    pub record: PaymentRecord,
}

impl PaymentToggled {
    /// The message shown to the user after the toggle.
    pub fn notification(&self) -> String {
        let state = if self.record.is_paid() {
            "paid"
        } else {
            "unpaid"
        };

        format!(
            "{}'s rent for {} has been marked as {state}",
            self.member_name, self.month
        )
    }
}

/// One member's row for a selected month.
#[derive(Debug, Clone, PartialEq)]
pub struct RentRow {
    pub member: Member,
    pub record: PaymentRecord,
    /// The rent the member would be charged if they paid now.
    pub effective_rent: Decimal,
    pub total_paid: Decimal,
}

/// One member's payment status over a range of months.
#[derive(Debug, Clone, PartialEq)]
pub struct RentHistoryRow {
    pub member: Member,
    /// The records in the same order as the months requested.
    pub records: Vec<PaymentRecord>,
    pub total_paid: Decimal,
}

/// How much rent was collected in a month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyCollection {
    pub month: MonthKey,
    pub paid_count: usize,
    pub unpaid_count: usize,
    pub collected: Decimal,
}

/// The store of members and their monthly rent payments.
///
/// All changes go through [RentLedger::toggle_payment],
/// [RentLedger::set_base_rent] and [RentLedger::set_variable_hours].
#[derive(Debug, Clone, PartialEq)]
pub struct RentLedger {
    accounts: Vec<MemberAccount>,
    policy: RentPolicy,
}

impl RentLedger {
    /// Create a ledger with `members` and no payment history.
    pub fn new(members: Vec<Member>, policy: RentPolicy) -> Self {
        let accounts = members
            .into_iter()
            .map(|member| MemberAccount {
                member,
                history: Vec::new(),
            })
            .collect();

        Self { accounts, policy }
    }

    pub fn policy(&self) -> &RentPolicy {
        &self.policy
    }

    /// The members in the order they were added.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.accounts.iter().map(|account| &account.member)
    }

    pub fn member(&self, member_id: MemberId) -> Result<&Member, Error> {
        self.account(member_id).map(|account| &account.member)
    }

    fn account(&self, member_id: MemberId) -> Result<&MemberAccount, Error> {
        self.accounts
            .iter()
            .find(|account| account.member.id == member_id)
            .ok_or(Error::MemberNotFound(member_id))
    }

    fn account_mut(&mut self, member_id: MemberId) -> Result<&mut MemberAccount, Error> {
        self.accounts
            .iter_mut()
            .find(|account| account.member.id == member_id)
            .ok_or(Error::MemberNotFound(member_id))
    }

    /// The record for `member_id` in `month`.
    ///
    /// Months without a stored record are reported as [PaymentRecord::Unpaid]
    /// and the history is left untouched.
    pub fn record_for(&self, member_id: MemberId, month: &MonthKey) -> Result<PaymentRecord, Error> {
        let account = self.account(member_id)?;

        Ok(account.record(month).cloned().unwrap_or_default())
    }

    /// The sum of all amounts paid by `member_id`, computed from their history.
    pub fn total_paid(&self, member_id: MemberId) -> Result<Decimal, Error> {
        Ok(self.account(member_id)?.total_paid()?)
    }

    /// The rent `member_id` would be charged if they paid now.
    pub fn effective_rent(&self, member_id: MemberId) -> Result<Decimal, Error> {
        Ok(effective_rent(self.member(member_id)?, &self.policy)?)
    }

    /// Flip whether `member_id` has paid rent for `month`.
    ///
    /// Marking a month as paid records `now`, the member's current rent and
    /// their kitchen hours. Marking it as unpaid clears all three.
    ///
    /// # Errors
    ///
    /// Returns [Error::MemberNotFound] if `member_id` does not exist and
    /// [Error::Validation] if the member's rent is too large to calculate.
    /// Nothing is changed on error.
    pub fn toggle_payment(
        &mut self,
        member_id: MemberId,
        month: MonthKey,
        now: OffsetDateTime,
    ) -> Result<PaymentToggled, Error> {
        let policy = self.policy;
        let account = self.account_mut(member_id)?;

        let was_paid = account.record(&month).is_some_and(PaymentRecord::is_paid);

        let record = if was_paid {
            PaymentRecord::Unpaid
        } else {
            PaymentRecord::Paid(Payment {
                paid_on: now,
                amount_paid: effective_rent(&account.member, &policy)?,
                hours_snapshot: account.member.applicable_hours(),
            })
        };

        account.upsert(month.clone(), record.clone());

        Ok(PaymentToggled {
            member_name: account.member.name.clone(),
            month,
            record,
        })
    }

    /// Set the base rent of `member_id` from the form value `raw_amount`.
    ///
    /// Payments already recorded keep the amount they were made with.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if `raw_amount` is not a number between
    /// zero and [MAX_AMOUNT](crate::validation::MAX_AMOUNT) or the resulting
    /// rent is too large to calculate, and [Error::MemberNotFound] if
    /// `member_id` does not exist. Nothing is changed on error.
    pub fn set_base_rent(&mut self, member_id: MemberId, raw_amount: &str) -> Result<&Member, Error> {
        let policy = self.policy;
        let account = self.account_mut(member_id)?;
        let amount = parse_non_negative_decimal(raw_amount)?;

        let updated = Member {
            base_rent: amount,
            ..account.member.clone()
        };
        effective_rent(&updated, &policy)?;

        account.member = updated;

        Ok(&account.member)
    }

    /// Set the kitchen hours of `member_id` from the form value `raw_hours`.
    ///
    /// If `current_month` has already been paid, that payment is updated to
    /// the rent and hours implied by the new value.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if `raw_hours` is not a number between
    /// zero and [MAX_AMOUNT](crate::validation::MAX_AMOUNT), the resulting
    /// rent is too large to calculate or the member's department does not
    /// record kitchen hours, and
    /// [Error::MemberNotFound] if `member_id` does not exist. Nothing is
    /// changed on error.
    pub fn set_variable_hours(
        &mut self,
        member_id: MemberId,
        raw_hours: &str,
        current_month: &MonthKey,
    ) -> Result<&Member, Error> {
        let policy = self.policy;
        let account = self.account_mut(member_id)?;

        if !account.member.department.has_variable_hours() {
            return Err(ValidationError::HoursNotApplicable(account.member.name.clone()).into());
        }

        let hours = parse_non_negative_decimal(raw_hours)?;
        let updated = Member {
            variable_hours: Some(hours),
            ..account.member.clone()
        };
        let new_rent = effective_rent(&updated, &policy)?;

        account.member = updated;
        if let Some(PaymentRecord::Paid(payment)) = account.record_mut(current_month) {
            payment.amount_paid = new_rent;
            payment.hours_snapshot = Some(hours);
        }

        Ok(&account.member)
    }

    /// The row of `member_id` for `month`.
    pub fn row(&self, member_id: MemberId, month: &MonthKey) -> Result<RentRow, Error> {
        let account = self.account(member_id)?;

        self.row_for_account(account, month)
    }

    fn row_for_account(&self, account: &MemberAccount, month: &MonthKey) -> Result<RentRow, Error> {
        Ok(RentRow {
            member: account.member.clone(),
            record: account.record(month).cloned().unwrap_or_default(),
            effective_rent: effective_rent(&account.member, &self.policy)?,
            total_paid: account.total_paid()?,
        })
    }

    /// Every member's row for `month`, in member order.
    pub fn month_view(&self, month: &MonthKey) -> Result<Vec<RentRow>, Error> {
        self.accounts
            .iter()
            .map(|account| self.row_for_account(account, month))
            .collect()
    }

    /// Every member's payment status for each of `months`.
    pub fn history_view(&self, months: &[MonthKey]) -> Result<Vec<RentHistoryRow>, Error> {
        self.accounts
            .iter()
            .map(|account| -> Result<RentHistoryRow, Error> {
                Ok(RentHistoryRow {
                    member: account.member.clone(),
                    records: months
                        .iter()
                        .map(|month| account.record(month).cloned().unwrap_or_default())
                        .collect(),
                    total_paid: account.total_paid()?,
                })
            })
            .collect()
    }

    /// How many members paid, and how much was collected, in each of `months`.
    pub fn collection_summary(&self, months: &[MonthKey]) -> Result<Vec<MonthlyCollection>, Error> {
        months
            .iter()
            .map(|month| -> Result<MonthlyCollection, Error> {
                let amounts = self
                    .accounts
                    .iter()
                    .filter_map(|account| account.record(month).and_then(PaymentRecord::amount_paid))
                    .collect::<Vec<_>>();

                let collected = checked_sum(amounts.iter().copied())
                    .ok_or_else(|| ValidationError::RentTooLarge(month.to_string()))?;

                Ok(MonthlyCollection {
                    month: month.clone(),
                    paid_count: amounts.len(),
                    unpaid_count: self.accounts.len() - amounts.len(),
                    collected,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod rent_ledger_tests {
    use rust_decimal::Decimal;
    use time::{OffsetDateTime, macros::datetime};

    use crate::{
        Error,
        rent::{
            Department, HoursAdjustment, Member, MonthKey, Payment, PaymentRecord, RentPolicy,
        },
        validation::ValidationError,
    };

    use super::RentLedger;

    const CHEN: i64 = 2;
    const JOHNSON: i64 = 1;

    fn now() -> OffsetDateTime {
        datetime!(2025-06-14 09:30 UTC)
    }

    fn june() -> MonthKey {
        MonthKey::new("June 2025")
    }

    fn get_ledger() -> RentLedger {
        RentLedger::new(
            vec![
                Member {
                    id: JOHNSON,
                    name: "Alex Johnson".to_owned(),
                    department: Department::Fletcher,
                    base_rent: Decimal::from(600),
                    variable_hours: None,
                },
                Member {
                    id: CHEN,
                    name: "Michael Chen".to_owned(),
                    department: Department::Culinary,
                    base_rent: Decimal::from(600),
                    variable_hours: Some(Decimal::from(10)),
                },
            ],
            RentPolicy::default(),
        )
    }

    #[test]
    fn toggle_marks_culinary_member_paid_with_hours() {
        let mut ledger = get_ledger();

        let toggled = ledger.toggle_payment(CHEN, june(), now()).unwrap();

        let want = PaymentRecord::Paid(Payment {
            paid_on: now(),
            amount_paid: Decimal::from(650),
            hours_snapshot: Some(Decimal::from(10)),
        });
        assert_eq!(toggled.record, want);
        assert_eq!(ledger.record_for(CHEN, &june()), Ok(want));
        assert_eq!(ledger.total_paid(CHEN), Ok(Decimal::from(650)));
        assert_eq!(
            toggled.notification(),
            "Michael Chen's rent for June 2025 has been marked as paid"
        );
    }

    #[test]
    fn toggle_twice_restores_record_and_total() {
        let mut ledger = get_ledger();
        let before_record = ledger.record_for(CHEN, &june()).unwrap();
        let before_total = ledger.total_paid(CHEN).unwrap();

        ledger.toggle_payment(CHEN, june(), now()).unwrap();
        let toggled = ledger.toggle_payment(CHEN, june(), now()).unwrap();

        assert_eq!(ledger.record_for(CHEN, &june()), Ok(before_record));
        assert_eq!(ledger.total_paid(CHEN), Ok(before_total));
        assert_eq!(
            toggled.notification(),
            "Michael Chen's rent for June 2025 has been marked as unpaid"
        );
    }

    #[test]
    fn toggle_twice_restores_previously_paid_months() {
        let mut ledger = get_ledger();
        let may = MonthKey::new("May 2025");
        ledger.toggle_payment(JOHNSON, may.clone(), now()).unwrap();
        let before = ledger.clone();

        ledger.toggle_payment(JOHNSON, may.clone(), now()).unwrap();
        ledger.toggle_payment(JOHNSON, may.clone(), now()).unwrap();

        assert_eq!(ledger.record_for(JOHNSON, &may), before.record_for(JOHNSON, &may));
        assert_eq!(ledger.total_paid(JOHNSON), before.total_paid(JOHNSON));
    }

    #[test]
    fn fletcher_payment_has_no_hours_snapshot() {
        let mut ledger = get_ledger();

        let toggled = ledger.toggle_payment(JOHNSON, june(), now()).unwrap();

        match toggled.record {
            PaymentRecord::Paid(payment) => {
                assert_eq!(payment.amount_paid, Decimal::from(600));
                assert_eq!(payment.hours_snapshot, None);
            }
            PaymentRecord::Unpaid => panic!("want paid record, got unpaid"),
        }
    }

    #[test]
    fn total_paid_sums_paid_months() {
        let mut ledger = get_ledger();

        ledger.toggle_payment(CHEN, MonthKey::new("May 2025"), now()).unwrap();
        ledger.toggle_payment(CHEN, june(), now()).unwrap();
        assert_eq!(ledger.total_paid(CHEN), Ok(Decimal::from(1300)));

        ledger.toggle_payment(CHEN, june(), now()).unwrap();
        assert_eq!(ledger.total_paid(CHEN), Ok(Decimal::from(650)));
    }

    #[test]
    fn toggle_unknown_member_fails() {
        let mut ledger = get_ledger();
        let before = ledger.clone();

        let result = ledger.toggle_payment(999, june(), now());

        assert_eq!(result, Err(Error::MemberNotFound(999)));
        assert_eq!(ledger, before);
    }

    #[test]
    fn toggle_accepts_any_month_key() {
        let mut ledger = get_ledger();

        let toggled = ledger
            .toggle_payment(JOHNSON, MonthKey::new("not a month"), now())
            .unwrap();

        assert!(toggled.record.is_paid());
    }

    #[test]
    fn unseen_month_is_virtual_unpaid_record() {
        let ledger = get_ledger();
        let before = ledger.clone();

        let record = ledger.record_for(CHEN, &MonthKey::new("March 2025"));

        assert_eq!(record, Ok(PaymentRecord::Unpaid));
        assert_eq!(ledger, before);
    }

    #[test]
    fn set_base_rent_updates_member() {
        let mut ledger = get_ledger();

        let member = ledger.set_base_rent(JOHNSON, "725.50").unwrap();

        assert_eq!(member.base_rent, Decimal::new(72550, 2));
        assert_eq!(ledger.effective_rent(JOHNSON), Ok(Decimal::new(72550, 2)));
    }

    #[test]
    fn set_base_rent_rejects_negative_amount() {
        let mut ledger = get_ledger();
        let before = ledger.clone();

        let result = ledger.set_base_rent(JOHNSON, "-5");

        assert_eq!(
            result.map(|member| member.base_rent),
            Err(Error::Validation(ValidationError::NegativeNumber(
                Decimal::from(-5)
            )))
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn set_base_rent_rejects_text() {
        let mut ledger = get_ledger();
        let before = ledger.clone();

        let result = ledger.set_base_rent(JOHNSON, "lots");

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(ledger, before);
    }

    #[test]
    fn set_base_rent_keeps_existing_payments() {
        let mut ledger = get_ledger();
        ledger.toggle_payment(JOHNSON, june(), now()).unwrap();

        ledger.set_base_rent(JOHNSON, "700").unwrap();

        assert_eq!(ledger.total_paid(JOHNSON), Ok(Decimal::from(600)));
    }

    #[test]
    fn set_variable_hours_recomputes_paid_current_month() {
        let mut ledger = get_ledger();
        ledger.toggle_payment(CHEN, june(), now()).unwrap();

        ledger.set_variable_hours(CHEN, "20", &june()).unwrap();

        let want = PaymentRecord::Paid(Payment {
            paid_on: now(),
            amount_paid: Decimal::from(700),
            hours_snapshot: Some(Decimal::from(20)),
        });
        assert_eq!(ledger.record_for(CHEN, &june()), Ok(want));
        assert_eq!(ledger.total_paid(CHEN), Ok(Decimal::from(700)));
    }

    #[test]
    fn set_variable_hours_leaves_other_months_alone() {
        let mut ledger = get_ledger();
        let may = MonthKey::new("May 2025");
        ledger.toggle_payment(CHEN, may.clone(), now()).unwrap();

        ledger.set_variable_hours(CHEN, "20", &june()).unwrap();

        assert_eq!(
            ledger.record_for(CHEN, &may).unwrap().amount_paid(),
            Some(Decimal::from(650))
        );
        assert_eq!(ledger.record_for(CHEN, &june()), Ok(PaymentRecord::Unpaid));
    }

    #[test]
    fn set_variable_hours_rejects_fletcher_member() {
        let mut ledger = get_ledger();
        let before = ledger.clone();

        let result = ledger
            .set_variable_hours(JOHNSON, "10", &june())
            .map(|member| member.variable_hours);

        assert_eq!(
            result,
            Err(Error::Validation(ValidationError::HoursNotApplicable(
                "Alex Johnson".to_owned()
            )))
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn set_variable_hours_rejects_negative_hours() {
        let mut ledger = get_ledger();
        let before = ledger.clone();

        let result = ledger
            .set_variable_hours(CHEN, "-1", &june())
            .map(|member| member.variable_hours);

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(ledger, before);
    }

    #[test]
    fn set_base_rent_rejects_amount_above_maximum() {
        let mut ledger = get_ledger();
        let before = ledger.clone();

        let result = ledger
            .set_base_rent(JOHNSON, "79228162514264337593543950335")
            .map(|member| member.base_rent);

        assert_eq!(
            result,
            Err(Error::Validation(ValidationError::NumberTooLarge(
                Decimal::MAX
            )))
        );
        assert_eq!(ledger, before);
        assert_eq!(ledger.month_view(&june()).map(|rows| rows.len()), Ok(2));
    }

    #[test]
    fn set_variable_hours_rejects_hours_above_maximum() {
        let mut ledger = get_ledger();
        ledger.toggle_payment(CHEN, june(), now()).unwrap();
        let before = ledger.clone();

        let result = ledger
            .set_variable_hours(CHEN, "79228162514264337593543950335", &june())
            .map(|member| member.variable_hours);

        assert_eq!(
            result,
            Err(Error::Validation(ValidationError::NumberTooLarge(
                Decimal::MAX
            )))
        );
        assert_eq!(ledger, before);
        assert_eq!(ledger.total_paid(CHEN), Ok(Decimal::from(650)));
    }

    #[test]
    fn largest_accepted_values_do_not_overflow() {
        let mut ledger = get_ledger();

        ledger.set_base_rent(CHEN, "1000000000").unwrap();
        ledger.set_variable_hours(CHEN, "1000000000", &june()).unwrap();
        ledger.toggle_payment(CHEN, june(), now()).unwrap();

        assert_eq!(
            ledger.total_paid(CHEN),
            Ok(Decimal::from(6_000_000_000_i64))
        );
    }

    #[test]
    fn set_variable_hours_rejects_rent_that_overflows() {
        let mut ledger = get_ledger();
        ledger.policy.unit_rate = Decimal::MAX;
        let before = ledger.clone();

        let result = ledger
            .set_variable_hours(CHEN, "2", &june())
            .map(|member| member.variable_hours);

        assert_eq!(
            result,
            Err(Error::Validation(ValidationError::RentTooLarge(
                "Michael Chen".to_owned()
            )))
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn set_base_rent_rejects_rent_that_overflows() {
        let mut ledger = get_ledger();
        ledger.policy.unit_rate = Decimal::MAX / Decimal::from(10);
        let before = ledger.clone();

        let result = ledger
            .set_base_rent(CHEN, "1000000000")
            .map(|member| member.base_rent);

        assert_eq!(
            result,
            Err(Error::Validation(ValidationError::RentTooLarge(
                "Michael Chen".to_owned()
            )))
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn toggle_with_rent_that_overflows_changes_nothing() {
        let mut ledger = get_ledger();
        ledger.policy.unit_rate = Decimal::MAX;
        let before = ledger.clone();

        let result = ledger.toggle_payment(CHEN, june(), now());

        assert!(matches!(result, Err(Error::Validation(ValidationError::RentTooLarge(_)))));
        assert_eq!(ledger, before);
    }

    #[test]
    fn discount_policy_applies_to_payments() {
        let mut ledger = get_ledger();
        ledger.policy = RentPolicy {
            unit_rate: Decimal::from(5),
            adjustment: HoursAdjustment::Discount,
        };

        let toggled = ledger.toggle_payment(CHEN, june(), now()).unwrap();

        assert_eq!(toggled.record.amount_paid(), Some(Decimal::from(550)));
    }

    #[test]
    fn month_view_lists_every_member() {
        let mut ledger = get_ledger();
        ledger.toggle_payment(CHEN, june(), now()).unwrap();

        let rows = ledger.month_view(&june()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].member.id, JOHNSON);
        assert_eq!(rows[0].record, PaymentRecord::Unpaid);
        assert_eq!(rows[0].effective_rent, Decimal::from(600));
        assert_eq!(rows[1].member.id, CHEN);
        assert!(rows[1].record.is_paid());
        assert_eq!(rows[1].total_paid, Decimal::from(650));
    }

    #[test]
    fn history_and_collection_summary_follow_month_order() {
        let mut ledger = get_ledger();
        let months = [MonthKey::new("May 2025"), june()];
        ledger.toggle_payment(JOHNSON, months[0].clone(), now()).unwrap();
        ledger.toggle_payment(JOHNSON, june(), now()).unwrap();
        ledger.toggle_payment(CHEN, june(), now()).unwrap();

        let history = ledger.history_view(&months).unwrap();
        assert!(history[0].records.iter().all(PaymentRecord::is_paid));
        assert_eq!(history[1].records[0], PaymentRecord::Unpaid);
        assert!(history[1].records[1].is_paid());

        let summary = ledger.collection_summary(&months).unwrap();
        assert_eq!(summary[0].paid_count, 1);
        assert_eq!(summary[0].unpaid_count, 1);
        assert_eq!(summary[0].collected, Decimal::from(600));
        assert_eq!(summary[1].paid_count, 2);
        assert_eq!(summary[1].unpaid_count, 0);
        assert_eq!(summary[1].collected, Decimal::from(1250));
    }
}
