//! End-to-end order workflow tests against a real Postgres instance.
//!
//! These tests are skipped unless DATABASE_URL points at a database the
//! test run may write to.

use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use agriconnect_api::auth::jwt::JwtService;
use agriconnect_api::config::Config;
use agriconnect_api::database::schema::types::{ListingStatus, OrderStatus, UserRole};
use agriconnect_api::error::{ApiError, ErrorCode};
use agriconnect_api::models::listing::CreateListingRequest;
use agriconnect_api::models::order::OrderDecision;
use agriconnect_api::models::user::{BuyerProfile, RegisterRequest, SupplierProfile};
use agriconnect_api::services::{AuthService, ListingService, OrderService};

fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        port: 0,
        database_url: std::env::var("DATABASE_URL").unwrap_or_default(),
        jwt_secret: "integration-test-secret".to_string(),
        jwt_expiration: 3600,
        max_connections: 5,
        request_timeout: 30,
        log_level: "debug".to_string(),
        bcrypt_cost: 4,
    }
}

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .ok()?;
    sqlx::migrate!("./migrations").run(&pool).await.ok()?;
    Some(pool)
}

struct TestContext {
    listing_service: ListingService,
    order_service: OrderService,
    supplier_id: Uuid,
    buyer_id: Uuid,
    auth_service: AuthService,
}

async fn setup() -> Result<Option<TestContext>> {
    let Some(pool) = test_pool().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return Ok(None);
    };

    let config = test_config();
    let jwt_service = JwtService::new(&config.jwt_secret);
    let auth_service = AuthService::new(pool.clone(), config, jwt_service);
    let listing_service = ListingService::new(pool.clone());
    let order_service = OrderService::new(pool.clone());

    let tag = Uuid::new_v4().simple().to_string();

    let supplier = auth_service
        .register(RegisterRequest {
            username: format!("farm_{}", &tag[..12]),
            email: format!("farm_{}@example.com", &tag[..12]),
            password: "correct-horse-battery".to_string(),
            role: UserRole::Supplier,
            first_name: Some("Asha".to_string()),
            last_name: None,
            phone: None,
            supplier_profile: Some(SupplierProfile {
                farm_name: Some("Green Valley".to_string()),
                location: "Pune".to_string(),
                description: None,
            }),
            buyer_profile: None,
        })
        .await?;

    let buyer = auth_service
        .register(RegisterRequest {
            username: format!("cafe_{}", &tag[..12]),
            email: format!("cafe_{}@example.com", &tag[..12]),
            password: "correct-horse-battery".to_string(),
            role: UserRole::Buyer,
            first_name: Some("Luna".to_string()),
            last_name: None,
            phone: None,
            supplier_profile: None,
            buyer_profile: Some(BuyerProfile {
                business_name: "Cafe Luna".to_string(),
                business_type: "cafe".to_string(),
                address: "12 Hill Road".to_string(),
                tax_id: None,
            }),
        })
        .await?;

    Ok(Some(TestContext {
        listing_service,
        order_service,
        supplier_id: supplier.user.id,
        buyer_id: buyer.user.id,
        auth_service,
    }))
}

fn tomato_listing(quantity: &str, price: &str) -> CreateListingRequest {
    CreateListingRequest {
        name: "Tomatoes".to_string(),
        quantity: quantity.parse().unwrap(),
        price_per_kg: price.parse().unwrap(),
        availability_date: chrono::Utc::now().date_naive(),
        contact_number: None,
    }
}

#[tokio::test]
async fn test_full_order_lifecycle() -> Result<()> {
    let Some(ctx) = setup().await? else { return Ok(()) };

    // Listing with 100 kg at 50 per kg is available
    let listing = ctx
        .listing_service
        .create_listing(ctx.supplier_id, tomato_listing("100", "50"))
        .await?;
    assert_eq!(listing.status, ListingStatus::Available);

    // Buyer requests 60 kg
    let order = ctx
        .order_service
        .place_order(ctx.buyer_id, listing.id, "60".parse()?)
        .await?;
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_price, Decimal::from(3000));
    assert_eq!(order.supplier_id, ctx.supplier_id);

    // Supplier accepts: inventory drops to 40 kg, low stock
    let accepted = ctx
        .order_service
        .transition_order(ctx.supplier_id, order.id, OrderDecision::Accepted)
        .await?;
    assert_eq!(accepted.status, OrderStatus::Accepted);

    let listing = ctx
        .listing_service
        .find_by_id(listing.id)
        .await?
        .expect("listing still exists");
    assert_eq!(listing.quantity, Decimal::from(40));
    assert_eq!(listing.status, ListingStatus::Pending);

    // A second accept must fail without double-decrementing
    let err = ctx
        .order_service
        .transition_order(ctx.supplier_id, order.id, OrderDecision::Accepted)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::WithCodeAndDetails(ErrorCode::InvalidTransition, _, _)
    ));

    let listing = ctx
        .listing_service
        .find_by_id(listing.id)
        .await?
        .expect("listing still exists");
    assert_eq!(listing.quantity, Decimal::from(40));

    Ok(())
}

#[tokio::test]
async fn test_place_order_rejects_non_positive_quantity() -> Result<()> {
    let Some(ctx) = setup().await? else { return Ok(()) };

    let listing = ctx
        .listing_service
        .create_listing(ctx.supplier_id, tomato_listing("80", "25"))
        .await?;

    for quantity in ["0", "-3.5"] {
        let err = ctx
            .order_service
            .place_order(ctx.buyer_id, listing.id, quantity.parse()?)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::WithCode(ErrorCode::InvalidQuantity, _)
        ));
    }

    // No order row was created for this buyer
    let orders = ctx.order_service.orders_for_buyer(ctx.buyer_id).await?;
    assert!(orders.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_place_order_rejects_excessive_quantity() -> Result<()> {
    let Some(ctx) = setup().await? else { return Ok(()) };

    let listing = ctx
        .listing_service
        .create_listing(ctx.supplier_id, tomato_listing("10", "25"))
        .await?;

    let err = ctx
        .order_service
        .place_order(ctx.buyer_id, listing.id, "10.01".parse()?)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::WithCodeAndDetails(ErrorCode::InsufficientStock, _, _)
    ));

    Ok(())
}

#[tokio::test]
async fn test_transition_denied_for_non_owning_supplier() -> Result<()> {
    let Some(ctx) = setup().await? else { return Ok(()) };

    let listing = ctx
        .listing_service
        .create_listing(ctx.supplier_id, tomato_listing("100", "20"))
        .await?;
    let order = ctx
        .order_service
        .place_order(ctx.buyer_id, listing.id, "5".parse()?)
        .await?;

    // A different supplier tries to accept
    let tag = Uuid::new_v4().simple().to_string();
    let intruder = ctx
        .auth_service
        .register(RegisterRequest {
            username: format!("other_{}", &tag[..12]),
            email: format!("other_{}@example.com", &tag[..12]),
            password: "correct-horse-battery".to_string(),
            role: UserRole::Supplier,
            first_name: None,
            last_name: None,
            phone: None,
            supplier_profile: Some(SupplierProfile {
                farm_name: None,
                location: "Nashik".to_string(),
                description: None,
            }),
            buyer_profile: None,
        })
        .await?;

    let err = ctx
        .order_service
        .transition_order(intruder.user.id, order.id, OrderDecision::Accepted)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::WithCode(ErrorCode::ResourceAccessDenied, _)
    ));

    // Order and listing are untouched
    let order = ctx
        .order_service
        .find_by_id(order.id)
        .await?
        .expect("order still exists");
    assert_eq!(order.status, OrderStatus::Pending);

    let listing = ctx
        .listing_service
        .find_by_id(listing.id)
        .await?
        .expect("listing still exists");
    assert_eq!(listing.quantity, Decimal::from(100));

    Ok(())
}

#[tokio::test]
async fn test_rejection_leaves_inventory_untouched() -> Result<()> {
    let Some(ctx) = setup().await? else { return Ok(()) };

    let listing = ctx
        .listing_service
        .create_listing(ctx.supplier_id, tomato_listing("70", "15"))
        .await?;
    let order = ctx
        .order_service
        .place_order(ctx.buyer_id, listing.id, "30".parse()?)
        .await?;

    let rejected = ctx
        .order_service
        .transition_order(ctx.supplier_id, order.id, OrderDecision::Rejected)
        .await?;
    assert_eq!(rejected.status, OrderStatus::Rejected);

    let listing = ctx
        .listing_service
        .find_by_id(listing.id)
        .await?
        .expect("listing still exists");
    assert_eq!(listing.quantity, Decimal::from(70));
    assert_eq!(listing.status, ListingStatus::Available);

    // Rejection is terminal
    let err = ctx
        .order_service
        .transition_order(ctx.supplier_id, order.id, OrderDecision::Accepted)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::WithCodeAndDetails(ErrorCode::InvalidTransition, _, _)
    ));

    Ok(())
}

#[tokio::test]
async fn test_competing_orders_first_accepted_wins() -> Result<()> {
    let Some(ctx) = setup().await? else { return Ok(()) };

    let listing = ctx
        .listing_service
        .create_listing(ctx.supplier_id, tomato_listing("60", "10"))
        .await?;

    // Both requests pass the advisory stock check
    let first = ctx
        .order_service
        .place_order(ctx.buyer_id, listing.id, "40".parse()?)
        .await?;
    let second = ctx
        .order_service
        .place_order(ctx.buyer_id, listing.id, "40".parse()?)
        .await?;

    // First acceptance consumes the stock
    ctx.order_service
        .transition_order(ctx.supplier_id, first.id, OrderDecision::Accepted)
        .await?;

    // The second can no longer be accepted; it stays pending
    let err = ctx
        .order_service
        .transition_order(ctx.supplier_id, second.id, OrderDecision::Accepted)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::WithCodeAndDetails(ErrorCode::InsufficientStock, _, _)
    ));

    let second = ctx
        .order_service
        .find_by_id(second.id)
        .await?
        .expect("order still exists");
    assert_eq!(second.status, OrderStatus::Pending);

    let listing = ctx
        .listing_service
        .find_by_id(listing.id)
        .await?
        .expect("listing still exists");
    assert_eq!(listing.quantity, Decimal::from(20));
    assert_eq!(listing.status, ListingStatus::Pending);

    // The supplier can still reject the stale request
    let rejected = ctx
        .order_service
        .transition_order(ctx.supplier_id, second.id, OrderDecision::Rejected)
        .await?;
    assert_eq!(rejected.status, OrderStatus::Rejected);

    Ok(())
}
