//! User account storage: hashing, duplicate emails, approval flow.

use foh_server::db::models::{Role, UserCreate, UserStatus, UserUpdate};
use foh_server::db::repository::UserRepository;
use foh_server::db::connect;

fn new_user(email: &str) -> UserCreate {
    UserCreate {
        name: "Test Waiter".to_string(),
        email: email.to_string(),
        password: "a-strong-password".to_string(),
        role: Role::Waiter,
        status: None,
    }
}

#[tokio::test]
async fn passwords_are_hashed_and_verifiable() {
    let tmp = tempfile::tempdir().unwrap();
    let db = connect(tmp.path()).await.unwrap();
    let repo = UserRepository::new(db);

    let user = repo.create(new_user("w1@foh.local")).await.unwrap();
    assert_ne!(user.hash_pass, "a-strong-password");
    assert!(user.verify_password("a-strong-password").unwrap());
    assert!(!user.verify_password("wrong-password").unwrap());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let db = connect(tmp.path()).await.unwrap();
    let repo = UserRepository::new(db);

    repo.create(new_user("dup@foh.local")).await.unwrap();
    assert!(repo.create(new_user("dup@foh.local")).await.is_err());
}

#[tokio::test]
async fn pending_account_can_be_approved() {
    let tmp = tempfile::tempdir().unwrap();
    let db = connect(tmp.path()).await.unwrap();
    let repo = UserRepository::new(db);

    let mut create = new_user("pending@foh.local");
    create.status = Some(UserStatus::Pending);
    let user = repo.create(create).await.unwrap();
    assert_eq!(user.status, UserStatus::Pending);

    let id = user.id.as_ref().unwrap().to_string();
    let approved = repo
        .update(
            &id,
            UserUpdate {
                name: None,
                email: None,
                password: None,
                role: None,
                status: Some(UserStatus::Approved),
            },
        )
        .await
        .unwrap();
    assert_eq!(approved.status, UserStatus::Approved);

    let reloaded = repo.find_by_email("pending@foh.local").await.unwrap().unwrap();
    assert_eq!(reloaded.status, UserStatus::Approved);
}
