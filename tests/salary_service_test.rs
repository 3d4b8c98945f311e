//! Salary service behavior tests against in-memory repositories.

mod common;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use hr_api::domain::{CreateSalary, Salary, UpdateSalary};
use hr_api::errors::AppError;
use hr_api::services::{SalaryManager, SalaryService};

use common::TestUnitOfWork;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn money(amount: i64) -> Decimal {
    Decimal::from(amount)
}

fn setup() -> (Arc<TestUnitOfWork>, i32) {
    let uow = Arc::new(TestUnitOfWork::default());
    let employee_id = uow.employees.seed("Jane Doe");
    (uow, employee_id)
}

fn period(id: i32, employee_id: i32, amount: i64, from: NaiveDate, to: Option<NaiveDate>) -> Salary {
    Salary {
        id,
        employee_id,
        base_salary: money(amount),
        effective_from: from,
        effective_to: to,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn create_open_period_succeeds_when_none_exists() {
    let (uow, employee_id) = setup();
    let service = SalaryManager::new(uow);

    let salary = service
        .create_salary(CreateSalary {
            employee_id,
            base_salary: money(50_000),
            effective_from: day(2024, 1, 1),
            effective_to: None,
        })
        .await
        .unwrap();

    assert!(salary.is_open());
}

#[tokio::test]
async fn second_open_period_conflicts() {
    let (uow, employee_id) = setup();
    uow.salaries
        .seed(period(1, employee_id, 50_000, day(2024, 1, 1), None));
    let service = SalaryManager::new(uow);

    let result = service
        .create_salary(CreateSalary {
            employee_id,
            base_salary: money(60_000),
            effective_from: day(2024, 6, 1),
            effective_to: None,
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn closed_period_is_allowed_alongside_an_open_one() {
    let (uow, employee_id) = setup();
    uow.salaries
        .seed(period(1, employee_id, 50_000, day(2024, 1, 1), None));
    let service = SalaryManager::new(uow);

    let result = service
        .create_salary(CreateSalary {
            employee_id,
            base_salary: money(45_000),
            effective_from: day(2023, 1, 1),
            effective_to: Some(day(2023, 12, 31)),
        })
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn create_rejects_non_positive_amount() {
    let (uow, employee_id) = setup();
    let service = SalaryManager::new(uow);

    let result = service
        .create_salary(CreateSalary {
            employee_id,
            base_salary: money(0),
            effective_from: day(2024, 1, 1),
            effective_to: None,
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn create_rejects_inverted_period() {
    let (uow, employee_id) = setup();
    let service = SalaryManager::new(uow);

    let result = service
        .create_salary(CreateSalary {
            employee_id,
            base_salary: money(50_000),
            effective_from: day(2024, 6, 1),
            effective_to: Some(day(2024, 1, 1)),
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn create_rejects_unknown_employee() {
    let (uow, _) = setup();
    let service = SalaryManager::new(uow);

    let result = service
        .create_salary(CreateSalary {
            employee_id: 999,
            base_salary: money(50_000),
            effective_from: day(2024, 1, 1),
            effective_to: None,
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn current_salary_prefers_latest_start_on_boundary_overlap() {
    let (uow, employee_id) = setup();
    // Succession convention: the old period is closed on the day the new
    // one starts, so both cover the boundary date.
    let boundary = day(2024, 6, 1);
    uow.salaries
        .seed(period(1, employee_id, 50_000, day(2024, 1, 1), Some(boundary)));
    uow.salaries
        .seed(period(2, employee_id, 60_000, boundary, None));
    let service = SalaryManager::new(uow);

    let current = service
        .current_salary(employee_id, Some(boundary))
        .await
        .unwrap();
    assert_eq!(current.base_salary, money(60_000));

    let before = service
        .current_salary(employee_id, Some(day(2024, 5, 31)))
        .await
        .unwrap();
    assert_eq!(before.base_salary, money(50_000));
}

#[tokio::test]
async fn current_salary_not_found_before_first_period() {
    let (uow, employee_id) = setup();
    uow.salaries
        .seed(period(1, employee_id, 50_000, day(2024, 1, 1), None));
    let service = SalaryManager::new(uow);

    let result = service
        .current_salary(employee_id, Some(day(2023, 6, 1)))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn history_returns_newest_first() {
    let (uow, employee_id) = setup();
    uow.salaries
        .seed(period(1, employee_id, 50_000, day(2023, 1, 1), Some(day(2023, 12, 31))));
    uow.salaries
        .seed(period(2, employee_id, 60_000, day(2024, 1, 1), None));
    let service = SalaryManager::new(uow);

    let history = service.salary_history(employee_id).await.unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].base_salary, money(60_000));
    assert_eq!(history[1].base_salary, money(50_000));
}

#[tokio::test]
async fn update_validates_the_merged_period() {
    let (uow, employee_id) = setup();
    uow.salaries
        .seed(period(1, employee_id, 50_000, day(2024, 6, 1), None));
    let service = SalaryManager::new(uow);

    // Supplying only effective_to must still be checked against the
    // record's existing effective_from
    let result = service
        .update_salary(
            1,
            UpdateSalary {
                effective_to: Some(day(2024, 1, 1)),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}
