mod common;

use std::time::Duration;

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};
use uuid::Uuid;

use lever_entities::{position as position_entity, Status};
use lever_services::position::{self, NewPosition};
use lever_services::{user, Error};

async fn setup() -> (DatabaseConnection, position::Service, Uuid) {
    let db = common::setup_db().await;
    let owner = user::Service::new(db.clone())
        .create_or_find_user("0xowner")
        .await
        .unwrap();

    (db.clone(), position::Service::new(db), owner.id)
}

fn new_position(user_id: Uuid, amount: &str, multiplier: i32) -> NewPosition {
    NewPosition {
        user_id,
        token_symbol: "ETH".to_string(),
        amount: amount.to_string(),
        multiplier,
    }
}

#[tokio::test]
async fn new_positions_start_pending() {
    let (_db, positions, user_id) = setup().await;

    let position = positions
        .open_position(new_position(user_id, "1.2500", 3))
        .await
        .unwrap();

    assert_eq!(position.status, Some(Status::Pending));
    assert_eq!(position.user_id, user_id);
    assert_eq!(position.token_symbol, "ETH");
    assert_eq!(position.amount, "1.2500");
    assert_eq!(position.multiplier, 3);
    assert_eq!(position::amount_of(&position).unwrap(), Decimal::new(125, 2));
    assert_eq!(positions.find_by_id(position.id).await.unwrap(), Some(position));
}

#[tokio::test]
async fn unknown_user_is_a_missing_reference() {
    let (_db, positions, _user_id) = setup().await;

    let result = positions
        .open_position(new_position(Uuid::new_v4(), "1", 2))
        .await;

    assert!(matches!(result, Err(Error::MissingReference(_))), "{result:?}");
}

#[tokio::test]
async fn invalid_input_is_rejected_before_insert() {
    let (_db, positions, user_id) = setup().await;

    assert!(matches!(
        positions.open_position(new_position(user_id, "-3", 2)).await,
        Err(Error::InvalidAmount(_))
    ));
    assert!(matches!(
        positions.open_position(new_position(user_id, "ten", 2)).await,
        Err(Error::InvalidAmount(_))
    ));
    assert!(matches!(
        positions.open_position(new_position(user_id, "0.12345678901234567890123456789", 2)).await,
        Err(Error::InvalidAmount(_))
    ));
    assert!(matches!(
        positions.open_position(new_position(user_id, "10", 0)).await,
        Err(Error::InvalidInput(_))
    ));

    let mut blank_symbol = new_position(user_id, "10", 2);
    blank_symbol.token_symbol = " ".to_string();
    assert!(matches!(
        positions.open_position(blank_symbol).await,
        Err(Error::InvalidInput(_))
    ));

    assert!(positions.list_for_user(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn lifecycle_moves_forward_only() {
    let (_db, positions, user_id) = setup().await;
    let position = positions
        .open_position(new_position(user_id, "5", 2))
        .await
        .unwrap();

    let opened = positions.mark_opened(position.id).await.unwrap();
    assert_eq!(opened.status, Some(Status::Opened));

    let result = positions.transition(position.id, Status::Pending).await;
    assert!(matches!(
        result,
        Err(Error::InvalidTransition { from: Status::Opened, to: Status::Pending })
    ));

    let closed = positions.mark_closed(position.id).await.unwrap();
    assert_eq!(closed.status, Some(Status::Closed));

    assert!(matches!(
        positions.mark_opened(position.id).await,
        Err(Error::InvalidTransition { from: Status::Closed, to: Status::Opened })
    ));
    assert!(matches!(
        positions.mark_closed(position.id).await,
        Err(Error::InvalidTransition { from: Status::Closed, to: Status::Closed })
    ));
}

#[tokio::test]
async fn pending_position_can_close_directly() {
    let (_db, positions, user_id) = setup().await;
    let position = positions
        .open_position(new_position(user_id, "5", 2))
        .await
        .unwrap();

    let closed = positions.mark_closed(position.id).await.unwrap();
    assert_eq!(closed.status, Some(Status::Closed));
}

#[tokio::test]
async fn null_status_counts_as_pending() {
    let (db, positions, user_id) = setup().await;
    let position = position_entity::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        token_symbol: ActiveValue::Set("BTC".to_string()),
        amount: ActiveValue::Set("0.1".to_string()),
        multiplier: ActiveValue::Set(1),
        status: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();
    assert_eq!(position.status, None);
    assert_eq!(position.effective_status(), Status::Pending);

    let opened = positions.mark_opened(position.id).await.unwrap();
    assert_eq!(opened.status, Some(Status::Opened));
}

#[tokio::test]
async fn transition_of_unknown_position_is_not_found() {
    let (_db, positions, _user_id) = setup().await;

    assert!(matches!(
        positions.mark_opened(Uuid::new_v4()).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn positions_are_listed_oldest_first() {
    let (_db, positions, user_id) = setup().await;

    let mut expected = Vec::new();
    for amount in ["1", "2", "3"] {
        let position = positions
            .open_position(new_position(user_id, amount, 2))
            .await
            .unwrap();
        expected.push(position.id);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let listed: Vec<Uuid> = positions
        .list_for_user(user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(listed, expected);

    assert!(positions.list_for_user(Uuid::new_v4()).await.unwrap().is_empty());
}
