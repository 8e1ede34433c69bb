//! Access Guard Integration Tests
//!
//! Credential verification (argon2 and legacy plaintext), the rehash
//! migration, tenant provisioning and cascade delete against real SQLite.

use std::sync::Arc;

use waitline_core::application::access::{
    CreateBusinessRequest, SuperAdminConfig, UpdateBusinessRequest, VerifyRequest,
};
use waitline_core::application::queue::JoinRequest;
use waitline_core::application::{AccessService, QueueService};
use waitline_core::domain::{Business, HASH_PREFIX};
use waitline_core::error::AppError;
use waitline_core::port::credential_hasher::Argon2Hasher;
use waitline_core::port::id_provider::UuidProvider;
use waitline_core::port::time_provider::SystemTimeProvider;
use waitline_core::port::{
    BusinessRepository, NoopNotifier, TicketRepository, TransactionalQueueStore,
};
use waitline_infra_sqlite::{create_pool, run_migrations, SqliteQueueStore};

struct Env {
    store: Arc<SqliteQueueStore>,
    access: AccessService,
    queue: QueueService,
}

async fn setup(super_admin: Option<SuperAdminConfig>) -> Env {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let store = Arc::new(SqliteQueueStore::new(pool));
    let access = AccessService::new(
        store.clone(),
        Arc::new(Argon2Hasher),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
        super_admin,
    );
    let queue = QueueService::new(
        store.clone(),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
        Arc::new(NoopNotifier),
    );
    Env {
        store,
        access,
        queue,
    }
}

fn create_req(slug: &str, password: &str) -> CreateBusinessRequest {
    CreateBusinessRequest {
        slug: slug.to_string(),
        name: "Test Business".to_string(),
        password: password.to_string(),
    }
}

fn verify_req(slug: &str, password: &str) -> VerifyRequest {
    VerifyRequest {
        slug: slug.to_string(),
        password: password.to_string(),
        set_online: None,
    }
}

async fn business_by_slug(store: &SqliteQueueStore, slug: &str) -> Business {
    BusinessRepository::find_by_slug(store, slug)
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn test_created_business_stores_argon2_hash() {
    let env = setup(None).await;
    env.access
        .create_business(create_req("cafe", "open-sesame"))
        .await
        .unwrap();

    let business = business_by_slug(&env.store, "cafe").await;
    let credential = business.credential.as_deref().unwrap();
    assert!(credential.starts_with(HASH_PREFIX));
    assert_ne!(credential, "open-sesame");

    assert!(env
        .access
        .verify_password(verify_req("cafe", "open-sesame"))
        .await
        .unwrap());
    assert!(!env
        .access
        .verify_password(verify_req("cafe", "wrong"))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_verify_unknown_slug_is_false_not_error() {
    let env = setup(None).await;
    let valid = env
        .access
        .verify_password(verify_req("ghost", "anything"))
        .await
        .unwrap();
    assert!(!valid);
}

#[tokio::test]
async fn test_verify_can_flip_online_flag() {
    let env = setup(None).await;
    env.access
        .create_business(create_req("cafe", "pw"))
        .await
        .unwrap();

    // Successful login marks the business offline (closing shop)
    let mut req = verify_req("cafe", "pw");
    req.set_online = Some(false);
    assert!(env.access.verify_password(req).await.unwrap());
    assert_eq!(
        business_by_slug(&env.store, "cafe").await.is_online,
        Some(false)
    );

    // A failed attempt must not touch the flag
    let mut req = verify_req("cafe", "wrong");
    req.set_online = Some(true);
    assert!(!env.access.verify_password(req).await.unwrap());
    assert_eq!(
        business_by_slug(&env.store, "cafe").await.is_online,
        Some(false)
    );
}

#[tokio::test]
async fn test_legacy_plaintext_verify_and_rehash() {
    let env = setup(None).await;

    // Seed a row the way the pre-hashing deployment left it
    let mut business = Business::new_test("old-cafe", "Old Cafe");
    business.credential = Some("hunter2".to_string());
    let mut tx = env.store.begin_transaction().await.unwrap();
    tx.insert_business(&business).await.unwrap();
    tx.commit().await.unwrap();

    assert!(env
        .access
        .verify_password(verify_req("old-cafe", "hunter2"))
        .await
        .unwrap());

    let upgraded = env.access.rehash_legacy_credentials().await.unwrap();
    assert_eq!(upgraded, 1);

    let after = business_by_slug(&env.store, "old-cafe").await;
    assert!(after.has_hashed_credential());

    // Same password still verifies through the hashed path
    assert!(env
        .access
        .verify_password(verify_req("old-cafe", "hunter2"))
        .await
        .unwrap());

    // Second sweep finds nothing to upgrade
    assert_eq!(env.access.rehash_legacy_credentials().await.unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_slug_is_conflict() {
    let env = setup(None).await;
    env.access
        .create_business(create_req("cafe", "pw"))
        .await
        .unwrap();

    let result = env.access.create_business(create_req("cafe", "other")).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_update_preserves_credential_without_password() {
    let env = setup(None).await;
    let id = env
        .access
        .create_business(create_req("cafe", "pw"))
        .await
        .unwrap();
    let before = business_by_slug(&env.store, "cafe").await.credential;

    for password in [None, Some(String::new())] {
        env.access
            .update_business(UpdateBusinessRequest {
                id: id.clone(),
                slug: "cafe".to_string(),
                name: "Renamed Cafe".to_string(),
                password,
            })
            .await
            .unwrap();
    }

    let after = business_by_slug(&env.store, "cafe").await;
    assert_eq!(after.name, "Renamed Cafe");
    assert_eq!(after.credential, before);

    // A real replacement does rehash
    env.access
        .update_business(UpdateBusinessRequest {
            id,
            slug: "cafe".to_string(),
            name: "Renamed Cafe".to_string(),
            password: Some("new-pw".to_string()),
        })
        .await
        .unwrap();
    assert!(env
        .access
        .verify_password(verify_req("cafe", "new-pw"))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_update_to_taken_slug_is_conflict() {
    let env = setup(None).await;
    env.access
        .create_business(create_req("cafe-a", "pw"))
        .await
        .unwrap();
    let id_b = env
        .access
        .create_business(create_req("cafe-b", "pw"))
        .await
        .unwrap();

    let result = env
        .access
        .update_business(UpdateBusinessRequest {
            id: id_b,
            slug: "cafe-a".to_string(),
            name: "B".to_string(),
            password: None,
        })
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_delete_cascades_to_tickets() {
    let env = setup(None).await;
    let id = env
        .access
        .create_business(create_req("cafe", "pw"))
        .await
        .unwrap();

    let ticket_id = env
        .queue
        .join(JoinRequest {
            slug: "cafe".to_string(),
            name: None,
            phone: None,
        })
        .await
        .unwrap();

    env.access.delete_business(&id).await.unwrap();

    assert!(BusinessRepository::find_by_slug(env.store.as_ref(), "cafe")
        .await
        .unwrap()
        .is_none());
    assert!(
        TicketRepository::find_by_id(env.store.as_ref(), &ticket_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_delete_unknown_business_not_found() {
    let env = setup(None).await;
    let result = env.access.delete_business(&"ghost".to_string()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_super_admin_checked_against_config() {
    let env = setup(Some(SuperAdminConfig {
        user: "root".to_string(),
        password: "top-secret".to_string(),
    }))
    .await;

    assert!(env.access.verify_super_admin("root", "top-secret"));
    assert!(!env.access.verify_super_admin("root", "wrong"));
    assert!(!env.access.verify_super_admin("admin", "top-secret"));
}

#[tokio::test]
async fn test_super_admin_locked_out_without_config() {
    let env = setup(None).await;
    assert!(!env.access.verify_super_admin("root", "anything"));
}
