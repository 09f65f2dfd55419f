//! The data every store starts with.

use rust_decimal::Decimal;
use time::{OffsetDateTime, macros::date};

use crate::{
    attendance::{AttendanceKind, AttendanceLog},
    progress::{Employee, EmployeeRoster, Program, Subtask},
    rent::{Department, Member, MonthKey, RentLedger, RentPolicy},
};

const BASE_RENT: i64 = 600;

/// The members, with `(name, department, kitchen hours, paid this month)`.
const MEMBERS: [(&str, Department, Option<i64>, bool); 8] = [
    ("Alex Johnson", Department::Fletcher, None, true),
    ("Sarah Miller", Department::Fletcher, None, false),
    ("Michael Chen", Department::Culinary, Some(10), true),
    ("Emily Parker", Department::Fletcher, None, true),
    ("David Thompson", Department::Culinary, Some(8), false),
    ("Jessica Lee", Department::Culinary, Some(12), false),
    ("Robert Wilson", Department::Culinary, Some(6), true),
    ("Maria Rodriguez", Department::Culinary, Some(10), true),
];

/// The rent ledger with its members, some of whom have paid for the month of `now`.
pub fn rent_ledger(policy: RentPolicy, now: OffsetDateTime) -> RentLedger {
    let members = MEMBERS
        .iter()
        .zip(1..)
        .map(|(&(name, department, hours, _), id)| Member {
            id,
            name: name.to_owned(),
            department,
            base_rent: Decimal::from(BASE_RENT),
            variable_hours: hours.map(Decimal::from),
        })
        .collect();

    let mut ledger = RentLedger::new(members, policy);
    let current_month = MonthKey::from_date(now.date());

    for (id, _) in (1..).zip(MEMBERS).filter(|(_, (.., paid))| *paid) {
        if let Err(error) = ledger.toggle_payment(id, current_month.clone(), now) {
            tracing::error!("Could not seed rent payment for member {id}: {error}");
        }
    }

    ledger
}

/// `(name, business unit, program, task, subtasks, number of subtasks completed)`.
type EmployeeSeed<'a> = (&'a str, &'a str, Program, &'a str, &'a [&'a str], usize);

const EMPLOYEES: [EmployeeSeed<'static>; 6] = [
    (
        "Alex Johnson",
        "Sales Department",
        Program::NinetyDay,
        "Q1 Analytics Report",
        &[
            "Gather data sources",
            "Clean dataset",
            "Create visualization",
            "Draft findings",
            "Prepare presentation",
            "Present to stakeholders",
        ],
        3,
    ),
    (
        "Sarah Miller",
        "Marketing",
        Program::NinetyDay,
        "Client Presentations",
        &[
            "Research client background",
            "Create slide deck",
            "Prepare talking points",
            "Rehearse presentation",
            "Revise based on feedback",
            "Deliver final presentation",
        ],
        2,
    ),
    (
        "Michael Chen",
        "Design Team",
        Program::NinetyDay,
        "Website Redesign",
        &[
            "Analyze current website",
            "Conduct user research",
            "Create wireframes",
            "Design mockups",
            "User testing",
            "Implement feedback",
        ],
        5,
    ),
    (
        "Emily Parker",
        "Research Division",
        Program::Graduation,
        "Market Research",
        &[
            "Define research questions",
            "Collect primary data",
            "Analyze findings",
            "Present conclusions",
        ],
        3,
    ),
    (
        "David Thompson",
        "Finance",
        Program::Graduation,
        "Financial Analysis",
        &[
            "Compile financial data",
            "Create financial models",
            "Generate projections",
            "Prepare final report",
        ],
        1,
    ),
    (
        "Jessica Lee",
        "Product Development",
        Program::Graduation,
        "Product Design",
        &[
            "Market analysis",
            "Feature prioritization",
            "Product specifications",
            "Final presentation",
        ],
        4,
    ),
];

/// The employees in the onboarding programs. Subtask IDs run on across employees.
pub fn employee_roster() -> EmployeeRoster {
    let mut next_subtask_id = 1;

    let employees = EMPLOYEES
        .iter()
        .zip(1..)
        .map(
            |(&(name, business_unit, program, task, subtask_names, completed), id)| {
                let subtasks = subtask_names
                    .iter()
                    .enumerate()
                    .map(|(index, subtask_name)| {
                        let subtask = Subtask {
                            id: next_subtask_id,
                            name: (*subtask_name).to_owned(),
                            completed: index < completed,
                        };
                        next_subtask_id += 1;
                        subtask
                    })
                    .collect();

                Employee {
                    id,
                    name: name.to_owned(),
                    business_unit: business_unit.to_owned(),
                    program,
                    task: task.to_owned(),
                    subtasks,
                }
            },
        )
        .collect();

    EmployeeRoster::new(employees)
}

/// The attendance recorded so far this season.
pub fn attendance_log() -> AttendanceLog {
    let records = [
        (
            AttendanceKind::PitSessions,
            "John Doe",
            date!(2025 - 04 - 01),
            "Worked on advanced techniques",
            "",
        ),
        (
            AttendanceKind::PitSessions,
            "Jane Smith",
            date!(2025 - 04 - 03),
            "First session, basics covered",
            "",
        ),
        (
            AttendanceKind::ChamberEvents,
            "John Doe",
            date!(2025 - 03 - 15),
            "Quartet performance",
            "",
        ),
        (
            AttendanceKind::ChamberEvents,
            "Jane Smith",
            date!(2025 - 03 - 15),
            "Quartet performance",
            "",
        ),
        (
            AttendanceKind::ChamberEvents,
            "Alice Johnson",
            date!(2025 - 03 - 22),
            "Solo recital",
            "",
        ),
        (
            AttendanceKind::EducationHours,
            "Alice Johnson",
            date!(2025 - 04 - 05),
            "Music theory class",
            "4",
        ),
        (
            AttendanceKind::EducationHours,
            "Bob Brown",
            date!(2025 - 04 - 06),
            "Workshop attendance",
            "6",
        ),
        (
            AttendanceKind::EducationHours,
            "Alice Johnson",
            date!(2025 - 04 - 10),
            "Composition workshop",
            "3",
        ),
        (
            AttendanceKind::EducationHours,
            "John Doe",
            date!(2025 - 04 - 11),
            "History of music lecture",
            "2",
        ),
        (
            AttendanceKind::EducationHours,
            "Jane Smith",
            date!(2025 - 04 - 12),
            "Practical session",
            "5",
        ),
    ];

    let mut log = AttendanceLog::new();

    for (kind, member_name, date, notes, hours) in records {
        if let Err(error) = log.add_record(kind, member_name, date, notes, hours) {
            tracing::error!("Could not seed {kind} record for {member_name}: {error}");
        }
    }

    log
}

#[cfg(test)]
mod seed_tests {
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use crate::{
        attendance::AttendanceKind,
        progress::Program,
        rent::{Department, MonthKey, RentPolicy},
    };

    use super::{attendance_log, employee_roster, rent_ledger};

    #[test]
    fn rent_ledger_marks_current_month_paid() {
        let now = datetime!(2025-06-14 09:00 UTC);

        let ledger = rent_ledger(RentPolicy::default(), now);

        let month = MonthKey::new("June 2025");
        let paid = ledger
            .members()
            .filter(|member| {
                ledger
                    .record_for(member.id, &month)
                    .is_ok_and(|record| record.is_paid())
            })
            .map(|member| member.id)
            .collect::<Vec<_>>();
        assert_eq!(paid, [1, 3, 4, 7, 8]);

        let chen = ledger.member(3).unwrap();
        assert_eq!(chen.department, Department::Culinary);
        assert_eq!(ledger.total_paid(3), Ok(Decimal::from(650)));
    }

    #[test]
    fn subtask_ids_are_unique_across_employees() {
        let roster = employee_roster();

        let ids = roster
            .employees(None)
            .into_iter()
            .flat_map(|employee| employee.subtasks.iter().map(|subtask| subtask.id))
            .collect::<Vec<_>>();

        assert_eq!(ids, (1..=30).collect::<Vec<_>>());
        assert_eq!(roster.employees(Some(Program::NinetyDay)).len(), 3);
        assert_eq!(roster.employees(Some(Program::Graduation)).len(), 3);
    }

    #[test]
    fn jessica_lee_has_finished() {
        let roster = employee_roster();

        let jessica = roster
            .employees(None)
            .into_iter()
            .find(|employee| employee.name == "Jessica Lee")
            .unwrap();

        assert_eq!(jessica.progress_percent(), 100);
    }

    #[test]
    fn attendance_log_has_every_kind() {
        let log = attendance_log();

        assert_eq!(log.records(AttendanceKind::PitSessions).len(), 2);
        assert_eq!(log.records(AttendanceKind::ChamberEvents).len(), 3);
        assert_eq!(log.records(AttendanceKind::EducationHours).len(), 5);
    }
}
