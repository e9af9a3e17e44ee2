//! Order submission against an in-memory database.

mod support;

use backend::domain::{a001_product, a002_order};
use backend::shared::data::db::connect_in_memory;
use backend::shared::error::AppError;
use backend::usecases::u501_submit_order::SubmitOrderExecutor;
use contracts::domain::a001_product::{NumericField, ProductListQuery, UpdateProductDto};
use contracts::domain::a002_order::{OrderStatus, UpdateOrderStatusDto};
use support::{checkout, seed_product, stock_of};

#[tokio::test]
async fn accepted_order_decrements_stock() {
    let db = connect_in_memory().await.unwrap();
    let beads = seed_product(&db, "Prayer Beads", 10.0, 5).await;
    let executor = SubmitOrderExecutor::new(db.clone());

    let resp = executor.execute(checkout(&[(&beads, 3)])).await.unwrap();
    assert!(resp.success);
    assert_eq!(stock_of(&db, &beads).await, 2);

    let orders = a002_order::repository::list_all(&db).await.unwrap();
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.product_name, "Prayer Beads");
    assert_eq!(order.quantity, 3);
    assert_eq!(order.total_price, 30.0);
    assert_eq!(order.order_status, OrderStatus::Pending);
    assert_eq!(order.regional_board, "Western India");
    assert_eq!(order.sub_local_board, None);
}

#[tokio::test]
async fn ordering_exact_stock_clears_in_stock() {
    let db = connect_in_memory().await.unwrap();
    let beads = seed_product(&db, "Prayer Beads", 10.0, 3).await;
    let executor = SubmitOrderExecutor::new(db.clone());

    executor.execute(checkout(&[(&beads, 3)])).await.unwrap();

    let stored = a001_product::repository::get_by_id(&db, &beads.id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.stock_quantity, 0);
    assert!(!stored.in_stock);
}

#[tokio::test]
async fn insufficient_stock_changes_nothing() {
    let db = connect_in_memory().await.unwrap();
    let beads = seed_product(&db, "Prayer Beads", 10.0, 2).await;
    let executor = SubmitOrderExecutor::new(db.clone());

    let err = executor.execute(checkout(&[(&beads, 5)])).await.unwrap_err();
    match err {
        AppError::InsufficientStock { product, remaining } => {
            assert_eq!(product, "Prayer Beads");
            assert_eq!(remaining, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(stock_of(&db, &beads).await, 2);
    assert!(a002_order::repository::list_all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_board_is_rejected_before_any_read() {
    let db = connect_in_memory().await.unwrap();
    let beads = seed_product(&db, "Prayer Beads", 10.0, 5).await;
    let executor = SubmitOrderExecutor::new(db.clone());

    let mut request = checkout(&[(&beads, 1)]);
    request.regional_board = None;

    let err = executor.execute(request).await.unwrap_err();
    match err {
        AppError::Validation(msg) => assert!(msg.contains("regionalBoard"), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(stock_of(&db, &beads).await, 5);
}

#[tokio::test]
async fn multi_item_cart_is_all_or_nothing() {
    let db = connect_in_memory().await.unwrap();
    let beads = seed_product(&db, "Prayer Beads", 10.0, 5).await;
    let shawl = seed_product(&db, "Shawl", 40.0, 1).await;
    let executor = SubmitOrderExecutor::new(db.clone());

    let err = executor
        .execute(checkout(&[(&beads, 2), (&shawl, 2)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock { .. }));
    assert_eq!(stock_of(&db, &beads).await, 5);
    assert_eq!(stock_of(&db, &shawl).await, 1);
    assert!(a002_order::repository::list_all(&db).await.unwrap().is_empty());

    executor
        .execute(checkout(&[(&beads, 2), (&shawl, 1)]))
        .await
        .unwrap();
    assert_eq!(stock_of(&db, &beads).await, 3);
    assert_eq!(stock_of(&db, &shawl).await, 0);
    assert_eq!(a002_order::repository::list_all(&db).await.unwrap().len(), 2);
}

#[tokio::test]
async fn repeated_lines_are_summed() {
    let db = connect_in_memory().await.unwrap();
    let beads = seed_product(&db, "Prayer Beads", 10.0, 5).await;
    let executor = SubmitOrderExecutor::new(db.clone());

    let err = executor
        .execute(checkout(&[(&beads, 3), (&beads, 3)]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InsufficientStock { remaining: 5, .. }
    ));
    assert_eq!(stock_of(&db, &beads).await, 5);

    executor
        .execute(checkout(&[(&beads, 2), (&beads, 3)]))
        .await
        .unwrap();
    assert_eq!(stock_of(&db, &beads).await, 0);
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let db = connect_in_memory().await.unwrap();
    let beads = seed_product(&db, "Prayer Beads", 10.0, 5).await;
    let executor = SubmitOrderExecutor::new(db.clone());

    let mut request = checkout(&[(&beads, 1)]);
    request.items[0].product_id = Some("no-such-product".into());

    let err = executor.execute(request).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn concurrent_orders_never_overdraw() {
    let db = connect_in_memory().await.unwrap();
    let beads = seed_product(&db, "Prayer Beads", 10.0, 5).await;
    let executor = SubmitOrderExecutor::new(db.clone());

    let mut handles = Vec::new();
    for _ in 0..4 {
        let executor = executor.clone();
        let request = checkout(&[(&beads, 2)]);
        handles.push(tokio::spawn(async move { executor.execute(request).await }));
    }

    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(AppError::InsufficientStock { .. }) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(accepted, 2);
    assert_eq!(stock_of(&db, &beads).await, 1);
    assert_eq!(a002_order::repository::list_all(&db).await.unwrap().len(), 2);
}

#[tokio::test]
async fn soft_deleted_product_cannot_be_ordered_but_history_remains() {
    let db = connect_in_memory().await.unwrap();
    let beads = seed_product(&db, "Prayer Beads", 10.0, 5).await;
    let id = beads.id.to_string();
    let executor = SubmitOrderExecutor::new(db.clone());

    executor.execute(checkout(&[(&beads, 1)])).await.unwrap();

    a001_product::service::delete(&db, &id).await.unwrap();
    a001_product::service::delete(&db, &id).await.unwrap();

    let listed = a001_product::service::list_for_storefront(&db, &ProductListQuery::default()).await;
    assert!(listed.iter().all(|p| p.id != beads.id));

    let err = executor.execute(checkout(&[(&beads, 1)])).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let history: Vec<_> = a002_order::repository::list_all(&db)
        .await
        .unwrap()
        .into_iter()
        .filter(|o| o.product_id == id)
        .collect();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].product_name, "Prayer Beads");
}

#[tokio::test]
async fn order_snapshot_survives_price_change() {
    let db = connect_in_memory().await.unwrap();
    let beads = seed_product(&db, "Prayer Beads", 10.0, 5).await;
    let executor = SubmitOrderExecutor::new(db.clone());

    executor.execute(checkout(&[(&beads, 2)])).await.unwrap();

    a001_product::service::update(
        &db,
        &beads.id.to_string(),
        UpdateProductDto {
            price: Some(NumericField::Number(99.0)),
            stock_quantity: Some(NumericField::Number(3.0)),
        },
    )
    .await
    .unwrap();

    let items = a002_order::service::list_all(&db).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].order.total_price, 20.0);
    assert_eq!(items[0].unit_price, 10.0);
}

#[tokio::test]
async fn order_status_can_move_both_ways() {
    let db = connect_in_memory().await.unwrap();
    let beads = seed_product(&db, "Prayer Beads", 10.0, 5).await;
    SubmitOrderExecutor::new(db.clone())
        .execute(checkout(&[(&beads, 1)]))
        .await
        .unwrap();
    let order = a002_order::repository::list_all(&db).await.unwrap().remove(0);
    let id = order.id.to_string();

    let set = |status: Option<&str>| UpdateOrderStatusDto {
        status: status.map(str::to_string),
    };

    let processed = a002_order::service::update_status(&db, &id, set(Some("processed")))
        .await
        .unwrap();
    assert_eq!(processed.order_status, OrderStatus::Processed);
    assert!(processed.metadata.updated_at >= order.metadata.updated_at);

    let pending = a002_order::service::update_status(&db, &id, set(Some("pending")))
        .await
        .unwrap();
    assert_eq!(pending.order_status, OrderStatus::Pending);

    assert!(matches!(
        a002_order::service::update_status(&db, &id, set(None)).await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        a002_order::service::update_status(&db, &id, set(Some("shipped"))).await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        a002_order::service::update_status(&db, "missing", set(Some("pending"))).await,
        Err(AppError::NotFound(_))
    ));
}
