//! Department, position and employee service behavior tests.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;

use hr_api::domain::{
    CreateDepartment, CreateEmployee, CreatePosition, EmploymentStatus, PositionLevel,
    UpdateEmployee,
};
use hr_api::errors::AppError;
use hr_api::services::{
    DepartmentManager, DepartmentService, EmployeeManager, EmployeeService, PositionManager,
    PositionService,
};

use common::TestUnitOfWork;

fn new_department(name: &str, code: Option<&str>) -> CreateDepartment {
    CreateDepartment {
        name: name.to_string(),
        code: code.map(str::to_string),
        description: None,
    }
}

fn new_employee(code: &str, email: &str) -> CreateEmployee {
    CreateEmployee {
        employee_code: code.to_string(),
        full_name: "Jane Doe".to_string(),
        email: email.to_string(),
        phone: None,
        department_id: None,
        position_id: None,
        hire_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        employment_status: EmploymentStatus::Active,
    }
}

#[tokio::test]
async fn department_name_must_be_unique() {
    let uow = Arc::new(TestUnitOfWork::default());
    let service = DepartmentManager::new(uow);

    service
        .create_department(new_department("Engineering", Some("ENG")))
        .await
        .unwrap();

    let result = service
        .create_department(new_department("Engineering", Some("ENG2")))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Duplicate(_)));
}

#[tokio::test]
async fn department_code_must_be_unique_when_present() {
    let uow = Arc::new(TestUnitOfWork::default());
    let service = DepartmentManager::new(uow);

    service
        .create_department(new_department("Engineering", Some("ENG")))
        .await
        .unwrap();

    let result = service
        .create_department(new_department("Engine Room", Some("ENG")))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Duplicate(_)));
}

#[tokio::test]
async fn department_delete_is_blocked_while_employees_remain() {
    let uow = Arc::new(TestUnitOfWork::default());
    let service = DepartmentManager::new(uow.clone());

    let department = service
        .create_department(new_department("Engineering", Some("ENG")))
        .await
        .unwrap();
    uow.departments.set_employee_count(department.id, 3);

    let result = service.delete_department(department.id).await;
    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));

    // Once the employees are reassigned the delete goes through
    uow.departments.set_employee_count(department.id, 0);
    assert!(service.delete_department(department.id).await.is_ok());
}

#[tokio::test]
async fn position_code_must_be_unique() {
    let uow = Arc::new(TestUnitOfWork::default());
    let service = PositionManager::new(uow);

    service
        .create_position(CreatePosition {
            title: "Software Engineer".to_string(),
            code: "SE".to_string(),
            level: PositionLevel::Senior,
            description: None,
        })
        .await
        .unwrap();

    let result = service
        .create_position(CreatePosition {
            title: "Sales Executive".to_string(),
            code: "SE".to_string(),
            level: PositionLevel::Junior,
            description: None,
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Duplicate(_)));
}

#[tokio::test]
async fn employee_code_and_email_must_be_unique() {
    let uow = Arc::new(TestUnitOfWork::default());
    let service = EmployeeManager::new(uow);

    service
        .create_employee(new_employee("EMP0001", "jane@example.com"))
        .await
        .unwrap();

    let same_code = service
        .create_employee(new_employee("EMP0001", "other@example.com"))
        .await;
    assert!(matches!(same_code.unwrap_err(), AppError::Duplicate(_)));

    let same_email = service
        .create_employee(new_employee("EMP0002", "jane@example.com"))
        .await;
    assert!(matches!(same_email.unwrap_err(), AppError::Duplicate(_)));
}

#[tokio::test]
async fn employee_references_must_exist() {
    let uow = Arc::new(TestUnitOfWork::default());
    let service = EmployeeManager::new(uow);

    let mut data = new_employee("EMP0001", "jane@example.com");
    data.department_id = Some(999);

    let result = service.create_employee(data).await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn employee_delete_is_a_status_flip() {
    let uow = Arc::new(TestUnitOfWork::default());
    let service = EmployeeManager::new(uow);

    let employee = service
        .create_employee(new_employee("EMP0001", "jane@example.com"))
        .await
        .unwrap();

    service.terminate_employee(employee.id).await.unwrap();

    // The row is still there, flipped to terminated
    let employee = service.get_employee(employee.id).await.unwrap();
    assert!(employee.is_terminated());
    assert_eq!(employee.employment_status, EmploymentStatus::Terminated);
}

#[tokio::test]
async fn employee_partial_update_keeps_other_fields() {
    let uow = Arc::new(TestUnitOfWork::default());
    let service = EmployeeManager::new(uow);

    let employee = service
        .create_employee(new_employee("EMP0001", "jane@example.com"))
        .await
        .unwrap();

    let updated = service
        .update_employee(
            employee.id,
            UpdateEmployee {
                phone: Some("+1234567890".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.phone.as_deref(), Some("+1234567890"));
    assert_eq!(updated.email, "jane@example.com");
    assert_eq!(updated.employee_code, "EMP0001");

    // Repeating the same partial update is idempotent
    let repeated = service
        .update_employee(
            employee.id,
            UpdateEmployee {
                phone: Some("+1234567890".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(repeated, updated);
}
