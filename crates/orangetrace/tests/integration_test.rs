//! Full system: real batch, cart and order actors wired by `MarketSystem`.

use orangetrace::batch_actor::InventoryError;
use orangetrace::clients::DecrementOutcome;
use orangetrace::lifecycle::{seed_demo_batches, MarketSystem, DEMO_FARMER};
use orangetrace::model::{
    Batch, BatchCreate, BatchId, BatchStatus, BatchUpdate, CartLineItem, DeliveryAddress, OrderCreate,
    OrderStatus, PaymentDetails, StockLine, UserId,
};
use orangetrace::order_actor::OrderError;

fn form(batch_id: &str, quantity: u32, price_per_kg: f64) -> BatchCreate {
    BatchCreate {
        batch_id: batch_id.to_string(),
        variety: "Nagpur Mandarin".to_string(),
        quantity,
        price_per_kg,
        harvest_date: None,
        quality_grade: "A".to_string(),
        location: "Katol".to_string(),
        description: None,
    }
}

fn address() -> DeliveryAddress {
    DeliveryAddress {
        full_name: "Priya Sharma".to_string(),
        phone: Some("+91 9876543210".to_string()),
        address: "123, MG Road".to_string(),
        city: "Nagpur".to_string(),
        state: "Maharashtra".to_string(),
        pincode: "440001".to_string(),
    }
}

fn order_for(buyer: &str, lines: &[(&Batch, u32)]) -> OrderCreate {
    let items: Vec<CartLineItem> = lines
        .iter()
        .map(|(batch, qty)| CartLineItem::from_batch(batch, *qty))
        .collect();
    let total = items.iter().map(CartLineItem::line_total).sum();
    OrderCreate {
        buyer_id: buyer.into(),
        delivery_address: address(),
        items,
        total,
        payment: PaymentDetails::cash_on_delivery(),
    }
}

async fn register(system: &MarketSystem, batch_id: &str, quantity: u32) -> Batch {
    let id = system
        .batch_client
        .register_batch("farmer_1".into(), form(batch_id, quantity, 45.0))
        .await
        .unwrap();
    system.batch_client.get_batch(id).await.unwrap()
}

#[tokio::test]
async fn test_concurrent_orders_never_oversell() {
    let system = MarketSystem::start(32, 1024);
    let batch = register(&system, "NG2024001", 5).await;

    let big = system.order_client.clone();
    let small = system.order_client.clone();
    let big_order = order_for("buyer_a", &[(&batch, 5)]);
    let small_order = order_for("buyer_b", &[(&batch, 1)]);

    let (a, b) = tokio::join!(
        tokio::spawn(async move { big.place_order(big_order).await }),
        tokio::spawn(async move { small.place_order(small_order).await }),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert!(a.is_ok() != b.is_ok(), "exactly one order must win: {a:?} / {b:?}");
    let loser = a.as_ref().err().or(b.as_ref().err()).unwrap();
    match loser {
        OrderError::Inventory(InventoryError::InsufficientStock { batch_id, .. }) => {
            assert_eq!(batch_id, &BatchId::from("NG2024001"));
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    let remaining = system.batch_client.check_stock(batch.batch_id.clone()).await.unwrap();
    let expected = if a.is_ok() { 0 } else { 4 };
    assert_eq!(remaining, expected);

    let placed = system.order_client.list_for_buyer("buyer_a".into()).await.unwrap().len()
        + system.order_client.list_for_buyer("buyer_b".into()).await.unwrap().len();
    assert_eq!(placed, 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_placement_takes_stock_and_clears_cart() {
    let system = MarketSystem::start(32, 1024);
    let batch = register(&system, "NG2024001", 5).await;
    let buyer = UserId::from("buyer_1");

    system
        .cart_client
        .add_item(buyer.clone(), &batch, 5)
        .await
        .unwrap();

    let order_id = system
        .order_client
        .place_order(order_for("buyer_1", &[(&batch, 5)]))
        .await
        .unwrap();

    let order = system
        .order_client
        .get_for_buyer(&buyer, order_id.clone())
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Placed);
    assert_eq!(order.items[0].selected_quantity, 5);

    let stored = system.batch_client.get_batch(batch.batch_id.clone()).await.unwrap();
    assert_eq!(stored.quantity, 0);
    assert_eq!(stored.status, BatchStatus::Sold);
    assert!(system.batch_client.list_available(None).await.unwrap().is_empty());

    assert!(system.cart_client.list_items(buyer).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_placement_changes_nothing() {
    let system = MarketSystem::start(32, 1024);
    let plenty = register(&system, "NG2024001", 10).await;
    let scarce = register(&system, "NG2024002", 1).await;
    let buyer = UserId::from("buyer_1");

    system
        .cart_client
        .add_item(buyer.clone(), &plenty, 2)
        .await
        .unwrap();

    let err = system
        .order_client
        .place_order(order_for("buyer_1", &[(&plenty, 2), (&scarce, 3)]))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::Inventory(InventoryError::InsufficientStock {
            batch_id: "NG2024002".into(),
            requested: 3,
            available: 1,
        })
    );

    assert_eq!(system.batch_client.check_stock(plenty.batch_id).await.unwrap(), 10);
    assert_eq!(system.batch_client.check_stock(scarce.batch_id).await.unwrap(), 1);
    assert_eq!(system.cart_client.list_items(buyer.clone()).await.unwrap().len(), 1);
    assert!(system.order_client.list_for_buyer(buyer).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_standalone_decrement_after_placement_is_replayed() {
    let system = MarketSystem::start(32, 1024);
    let batch = register(&system, "NG2024001", 5).await;

    let order_id = system
        .order_client
        .place_order(order_for("buyer_1", &[(&batch, 2)]))
        .await
        .unwrap();

    let outcome = system
        .batch_client
        .decrement_stock(
            vec![StockLine::new("NG2024001", 2)],
            Some(order_id.inventory_key()),
        )
        .await
        .unwrap();
    assert_eq!(outcome, DecrementOutcome::Replayed);
    assert_eq!(system.batch_client.check_stock(batch.batch_id).await.unwrap(), 3);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_order_status_moves_forward_only() {
    let system = MarketSystem::start(32, 1024);
    let batch = register(&system, "NG2024001", 5).await;
    let order_id = system
        .order_client
        .place_order(order_for("buyer_1", &[(&batch, 1)]))
        .await
        .unwrap();

    let shipped = system
        .order_client
        .advance_status(order_id.clone(), OrderStatus::Shipped)
        .await
        .unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);

    let err = system
        .order_client
        .advance_status(order_id.clone(), OrderStatus::Placed)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::InvalidTransition {
            from: OrderStatus::Shipped,
            to: OrderStatus::Placed,
        }
    );

    system
        .order_client
        .advance_status(order_id.clone(), OrderStatus::Delivered)
        .await
        .unwrap();
    assert!(system
        .order_client
        .advance_status(order_id, OrderStatus::Cancelled)
        .await
        .is_err());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_owner_edits_and_sales_overview() {
    let system = MarketSystem::start(32, 1024);
    let batch = register(&system, "NG2024001", 5).await;

    let err = system
        .batch_client
        .update_batch(
            "farmer_2".into(),
            batch.batch_id.clone(),
            BatchUpdate {
                price_per_kg: Some(10.0),
                ..BatchUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, InventoryError::Forbidden(batch.batch_id.clone()));

    let order_id = system
        .order_client
        .place_order(order_for("buyer_1", &[(&batch, 5)]))
        .await
        .unwrap();

    // Sold out, then restocked by the owner.
    let relisted = system
        .batch_client
        .update_batch(
            "farmer_1".into(),
            batch.batch_id.clone(),
            BatchUpdate {
                quantity: Some(8),
                ..BatchUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(relisted.status, BatchStatus::Available);

    let mine = system
        .batch_client
        .list_by_farmer("farmer_1".into())
        .await
        .unwrap();
    let ids = mine.iter().map(|b| b.batch_id.clone()).collect();
    let sales = system.order_client.sales_for_batches(ids).await.unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].order_id, order_id);
    assert_eq!(sales[0].quantity, 5);
    assert_eq!(sales[0].total_price, 225.0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_placed_order_keeps_its_price_snapshot() {
    let system = MarketSystem::start(32, 1024);
    let batch = register(&system, "NG2024001", 10).await;
    let buyer = UserId::from("buyer_1");

    let order_id = system
        .order_client
        .place_order(order_for("buyer_1", &[(&batch, 4)]))
        .await
        .unwrap();

    let edited = system
        .batch_client
        .update_batch(
            "farmer_1".into(),
            batch.batch_id.clone(),
            BatchUpdate {
                price_per_kg: Some(60.0),
                quantity: Some(20),
                ..BatchUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.price_per_kg, 60.0);
    assert_eq!(edited.quantity, 20);

    let order = system
        .order_client
        .get_for_buyer(&buyer, order_id.clone())
        .await
        .unwrap();
    assert_eq!(order.items[0].unit_price, 45.0);
    assert_eq!(order.items[0].available_quantity, 10);
    assert_eq!(order.items[0].selected_quantity, 4);
    assert_eq!(order.total_amount, 180.0);

    let sales = system
        .order_client
        .sales_for_batches([batch.batch_id.clone()].into_iter().collect())
        .await
        .unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].order_id, order_id);
    assert_eq!(sales[0].price_per_kg, 45.0);
    assert_eq!(sales[0].total_price, 180.0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_demo_seed_is_repeatable() {
    let system = MarketSystem::start(32, 1024);

    let first = seed_demo_batches(&system.batch_client).await.unwrap();
    assert_eq!(first.len(), 3);
    let second = seed_demo_batches(&system.batch_client).await.unwrap();
    assert!(second.is_empty());

    let demo = system
        .batch_client
        .list_by_farmer(DEMO_FARMER.into())
        .await
        .unwrap();
    assert_eq!(demo.len(), 3);
    assert_eq!(
        system.batch_client.check_stock("NG2024001".into()).await.unwrap(),
        5
    );

    system.shutdown().await.unwrap();
}
