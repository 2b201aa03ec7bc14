use crate::{category, client, phone, sell, user};
use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::{setup_test_db, skip_db_tests};

/// Test category CRUD operations
#[tokio::test]
async fn test_category_crud() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    // Create
    let description = format!("Electronics {}", Uuid::new_v4());
    let created = category::ActiveModel {
        description: Set(description.clone()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    assert!(created.id > 0);
    assert_eq!(created.description, description);

    // Read
    let found = category::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().description, description);

    // Find by description
    let found_by_desc = category::Entity::find()
        .filter(category::Column::Description.eq(description.clone()))
        .one(&db)
        .await?;
    assert_eq!(found_by_desc.unwrap().id, created.id);

    // Update
    let renamed = format!("Clothing {}", Uuid::new_v4());
    let mut am: category::ActiveModel = created.clone().into();
    am.description = Set(renamed.clone());
    let updated = am.update(&db).await?;
    assert_eq!(updated.description, renamed);

    // Delete
    category::Entity::delete_by_id(created.id).exec(&db).await?;
    let gone = category::Entity::find_by_id(created.id).one(&db).await?;
    assert!(gone.is_none());

    Ok(())
}

/// Test client CRUD operations
#[tokio::test]
async fn test_client_crud() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let name = format!("Alice {}", Uuid::new_v4());
    let created = client::ActiveModel {
        name: Set(name.clone()),
        address: Set("1 Main Street".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    let found = client::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());
    let found = found.unwrap();
    assert_eq!(found.name, name);
    assert_eq!(found.address, "1 Main Street");

    // Update address
    let mut am: client::ActiveModel = found.into();
    am.address = Set("2 Side Avenue".to_string());
    let updated = am.update(&db).await?;
    assert_eq!(updated.address, "2 Side Avenue");

    client::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

/// Test phone CRUD and its client foreign key
#[tokio::test]
async fn test_phone_crud() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let owner = client::ActiveModel {
        name: Set(format!("Bob {}", Uuid::new_v4())),
        address: Set("3 Phone Road".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    let created = phone::ActiveModel {
        number: Set("555-0100".to_string()),
        client_id: Set(owner.id),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    assert_eq!(created.client_id, owner.id);

    // Find by owning client
    let owned = phone::Entity::find()
        .filter(phone::Column::ClientId.eq(owner.id))
        .all(&db)
        .await?;
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].id, created.id);

    // Inserting with a missing client must violate the FK
    let orphan = phone::ActiveModel {
        number: Set("555-0199".to_string()),
        client_id: Set(i32::MAX),
        ..Default::default()
    }
    .insert(&db)
    .await;
    assert!(orphan.is_err());

    phone::Entity::delete_by_id(created.id).exec(&db).await?;
    client::Entity::delete_by_id(owner.id).exec(&db).await?;
    Ok(())
}

/// Test sell CRUD, date round-trip and cascade delete
#[tokio::test]
async fn test_sell_crud() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let buyer = client::ActiveModel {
        name: Set(format!("Carol {}", Uuid::new_v4())),
        address: Set("4 Sale Square".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let created = sell::ActiveModel {
        client_id: Set(buyer.id),
        date: Set(date),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    let found = sell::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());
    let found = found.unwrap();
    assert_eq!(found.date, date);
    assert_eq!(found.client_id, buyer.id);

    // Deleting the client cascades to its sales
    client::Entity::delete_by_id(buyer.id).exec(&db).await?;
    let gone = sell::Entity::find_by_id(created.id).one(&db).await?;
    assert!(gone.is_none());

    Ok(())
}

/// Test user CRUD and the unique email constraint
#[tokio::test]
async fn test_user_crud() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let email = format!("crud_{}@example.com", Uuid::new_v4());
    let created = user::ActiveModel {
        name: Set("Test User".to_string()),
        email: Set(email.clone()),
        password: Set("hashed-password".to_string()),
        roles: Set("USER,ADMIN".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    assert!(created.has_role("admin"));
    assert_eq!(created.role_list(), vec!["USER", "ADMIN"]);

    // Find by email
    let found = user::Entity::find()
        .filter(user::Column::Email.eq(email.clone()))
        .one(&db)
        .await?;
    assert_eq!(found.unwrap().id, created.id);

    // Duplicate email must be rejected
    let duplicate = user::ActiveModel {
        name: Set("Other User".to_string()),
        email: Set(email.clone()),
        password: Set("hashed-password".to_string()),
        roles: Set("USER".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await;
    assert!(duplicate.is_err());

    user::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

/// Test batch operations
#[tokio::test]
async fn test_batch_operations() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let batch_size = 5;
    let mut category_ids = vec![];

    for i in 0..batch_size {
        let created = category::ActiveModel {
            description: Set(format!("batch_category_{}_{}", i, Uuid::new_v4())),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        category_ids.push(created.id);
    }

    for &id in &category_ids {
        let found = category::Entity::find_by_id(id).one(&db).await?;
        assert!(found.is_some());
    }

    for id in category_ids {
        category::Entity::delete_by_id(id).exec(&db).await?;
    }

    Ok(())
}
