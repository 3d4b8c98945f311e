//! Authentication and user account behavior tests.

mod common;

use std::sync::Arc;

use hr_api::config::Config;
use hr_api::domain::{CreateUser, Password, UpdateUser, UserRole};
use hr_api::errors::AppError;
use hr_api::services::{AuthService, Authenticator, UserManager, UserService};

use common::TestUnitOfWork;

const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

fn new_user(username: &str, employee_id: Option<i32>) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        password: "SecurePass123!".to_string(),
        employee_id,
        role: UserRole::Employee,
        is_active: true,
    }
}

#[tokio::test]
async fn create_user_hashes_password_and_lowercases_username() {
    let uow = Arc::new(TestUnitOfWork::default());
    let service = UserManager::new(uow);

    let user = service.create_user(new_user("JDoe", None)).await.unwrap();

    assert_eq!(user.username, "jdoe");
    assert_ne!(user.hashed_password, "SecurePass123!");
    assert!(Password::from_hash(user.hashed_password.clone()).verify("SecurePass123!"));
}

#[tokio::test]
async fn username_must_be_unique() {
    let uow = Arc::new(TestUnitOfWork::default());
    let service = UserManager::new(uow);

    service.create_user(new_user("jdoe", None)).await.unwrap();
    let result = service.create_user(new_user("JDOE", None)).await;

    assert!(matches!(result.unwrap_err(), AppError::Duplicate(_)));
}

#[tokio::test]
async fn linked_employee_must_exist() {
    let uow = Arc::new(TestUnitOfWork::default());
    let service = UserManager::new(uow);

    let result = service.create_user(new_user("jdoe", Some(999))).await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn one_account_per_employee() {
    let uow = Arc::new(TestUnitOfWork::default());
    let employee_id = uow.employees.seed("Jane Doe");
    let service = UserManager::new(uow);

    service
        .create_user(new_user("jdoe", Some(employee_id)))
        .await
        .unwrap();
    let result = service
        .create_user(new_user("jane", Some(employee_id)))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn update_rehashes_a_new_password() {
    let uow = Arc::new(TestUnitOfWork::default());
    let service = UserManager::new(uow);

    let user = service.create_user(new_user("jdoe", None)).await.unwrap();
    let updated = service
        .update_user(
            user.id,
            UpdateUser {
                password: Some("AnotherPass456!".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(Password::from_hash(updated.hashed_password.clone()).verify("AnotherPass456!"));
    assert!(!Password::from_hash(updated.hashed_password).verify("SecurePass123!"));
}

#[tokio::test]
async fn login_round_trips_through_token_verification() {
    let uow = Arc::new(TestUnitOfWork::default());
    let employee_id = uow.employees.seed("Jane Doe");
    let hash = Password::new("SecurePass123!").unwrap().into_string();
    let user = uow
        .users
        .seed("jdoe", &hash, UserRole::Manager, Some(employee_id), true);

    let auth = Authenticator::new(uow.clone(), Config::with_secret(TEST_SECRET));

    let token = auth
        .login("JDoe".to_string(), "SecurePass123!".to_string())
        .await
        .unwrap();
    assert_eq!(token.token_type, "Bearer");

    let claims = auth.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.username, "jdoe");
    assert_eq!(claims.role, UserRole::Manager);
    assert_eq!(claims.employee_id, Some(employee_id));

    // Successful login stamps last_login
    assert!(uow.users.get(user.id).unwrap().last_login.is_some());
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let uow = Arc::new(TestUnitOfWork::default());
    let hash = Password::new("SecurePass123!").unwrap().into_string();
    uow.users.seed("jdoe", &hash, UserRole::Employee, None, true);

    let auth = Authenticator::new(uow, Config::with_secret(TEST_SECRET));

    let result = auth
        .login("jdoe".to_string(), "WrongPass".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn login_rejects_unknown_username() {
    let uow = Arc::new(TestUnitOfWork::default());
    let auth = Authenticator::new(uow, Config::with_secret(TEST_SECRET));

    let result = auth
        .login("ghost".to_string(), "SecurePass123!".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn login_rejects_inactive_user() {
    let uow = Arc::new(TestUnitOfWork::default());
    let hash = Password::new("SecurePass123!").unwrap().into_string();
    uow.users.seed("jdoe", &hash, UserRole::Employee, None, false);

    let auth = Authenticator::new(uow, Config::with_secret(TEST_SECRET));

    let result = auth
        .login("jdoe".to_string(), "SecurePass123!".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let uow = Arc::new(TestUnitOfWork::default());
    let hash = Password::new("SecurePass123!").unwrap().into_string();
    uow.users.seed("jdoe", &hash, UserRole::Employee, None, true);

    let auth = Authenticator::new(uow, Config::with_secret(TEST_SECRET));
    let token = auth
        .login("jdoe".to_string(), "SecurePass123!".to_string())
        .await
        .unwrap();

    let mut tampered = token.access_token;
    tampered.push('x');
    assert!(auth.verify_token(&tampered).is_err());
}

#[tokio::test]
async fn register_applies_the_same_creation_rules() {
    let uow = Arc::new(TestUnitOfWork::default());
    let auth = Authenticator::new(uow, Config::with_secret(TEST_SECRET));

    auth.register(new_user("jdoe", None)).await.unwrap();
    let result = auth.register(new_user("jdoe", None)).await;

    assert!(matches!(result.unwrap_err(), AppError::Duplicate(_)));
}
