//! Listing creation, status derivation on write, registration and login.
//!
//! Skipped unless DATABASE_URL points at a writable test database.

use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use agriconnect_api::auth::jwt::JwtService;
use agriconnect_api::config::Config;
use agriconnect_api::database::schema::types::{ListingStatus, UserRole};
use agriconnect_api::error::{ApiError, ErrorCode};
use agriconnect_api::models::listing::CreateListingRequest;
use agriconnect_api::models::order::OrderDecision;
use agriconnect_api::models::user::{
    BuyerProfile, LoginRequest, RegisterRequest, SupplierProfile,
};
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

fn supplier_request(tag: &str) -> RegisterRequest {
    RegisterRequest {
        username: format!("farm_{}", tag),
        email: format!("farm_{}@example.com", tag),
        password: "correct-horse-battery".to_string(),
        role: UserRole::Supplier,
        first_name: None,
        last_name: None,
        phone: None,
        supplier_profile: Some(SupplierProfile {
            farm_name: Some("Sunrise Farm".to_string()),
            location: "Nagpur".to_string(),
            description: Some("Organic produce".to_string()),
        }),
        buyer_profile: None,
    }
}

fn buyer_request(tag: &str) -> RegisterRequest {
    RegisterRequest {
        username: format!("cafe_{}", tag),
        email: format!("cafe_{}@example.com", tag),
        password: "correct-horse-battery".to_string(),
        role: UserRole::Buyer,
        first_name: None,
        last_name: None,
        phone: None,
        supplier_profile: None,
        buyer_profile: Some(BuyerProfile {
            business_name: "Cafe Luna".to_string(),
            business_type: "cafe".to_string(),
            address: "12 Hill Road".to_string(),
            tax_id: None,
        }),
    }
}

fn fresh_tag() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

#[tokio::test]
async fn test_listing_status_derived_on_create() -> Result<()> {
    let Some(pool) = test_pool().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return Ok(());
    };
    let config = test_config();
    let auth = AuthService::new(pool.clone(), config.clone(), JwtService::new(&config.jwt_secret));
    let listings = ListingService::new(pool);

    let supplier = auth.register(supplier_request(&fresh_tag())).await?;

    // Low stock on creation
    let low = listings
        .create_listing(
            supplier.user.id,
            CreateListingRequest {
                name: "Spinach".to_string(),
                quantity: "30".parse()?,
                price_per_kg: "12".parse()?,
                availability_date: chrono::Utc::now().date_naive(),
                contact_number: None,
            },
        )
        .await?;
    assert_eq!(low.status, ListingStatus::Pending);

    // Exactly at the low-stock boundary
    let boundary = listings
        .create_listing(
            supplier.user.id,
            CreateListingRequest {
                name: "Potatoes".to_string(),
                quantity: "50".parse()?,
                price_per_kg: "8".parse()?,
                availability_date: chrono::Utc::now().date_naive(),
                contact_number: None,
            },
        )
        .await?;
    assert_eq!(boundary.status, ListingStatus::Available);

    let mine = listings.listings_for_supplier(supplier.user.id).await?;
    assert_eq!(mine.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_listing_rejects_non_positive_inputs() -> Result<()> {
    let Some(pool) = test_pool().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return Ok(());
    };
    let config = test_config();
    let auth = AuthService::new(pool.clone(), config.clone(), JwtService::new(&config.jwt_secret));
    let listings = ListingService::new(pool);

    let supplier = auth.register(supplier_request(&fresh_tag())).await?;

    let err = listings
        .create_listing(
            supplier.user.id,
            CreateListingRequest {
                name: "Onions".to_string(),
                quantity: "0".parse()?,
                price_per_kg: "10".parse()?,
                availability_date: chrono::Utc::now().date_naive(),
                contact_number: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::WithCode(ErrorCode::InvalidQuantity, _)
    ));

    let err = listings
        .create_listing(
            supplier.user.id,
            CreateListingRequest {
                name: "Onions".to_string(),
                quantity: "25".parse()?,
                price_per_kg: "-1".parse()?,
                availability_date: chrono::Utc::now().date_naive(),
                contact_number: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::WithCode(ErrorCode::InvalidPrice, _)));

    // Nothing was written
    let mine = listings.listings_for_supplier(supplier.user.id).await?;
    assert!(mine.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_sold_out_listings_hidden_from_buyers() -> Result<()> {
    let Some(pool) = test_pool().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return Ok(());
    };
    let config = test_config();
    let auth = AuthService::new(pool.clone(), config.clone(), JwtService::new(&config.jwt_secret));
    let listings = ListingService::new(pool.clone());
    let orders = OrderService::new(pool);

    let supplier = auth.register(supplier_request(&fresh_tag())).await?;
    let buyer = auth.register(buyer_request(&fresh_tag())).await?;

    let listing = listings
        .create_listing(
            supplier.user.id,
            CreateListingRequest {
                name: "Carrots".to_string(),
                quantity: "55".parse()?,
                price_per_kg: "18".parse()?,
                availability_date: chrono::Utc::now().date_naive(),
                contact_number: None,
            },
        )
        .await?;

    // Buy out the full stock
    let order = orders
        .place_order(buyer.user.id, listing.id, "55".parse()?)
        .await?;
    orders
        .transition_order(supplier.user.id, order.id, OrderDecision::Accepted)
        .await?;

    let sold_out = listings
        .find_by_id(listing.id)
        .await?
        .expect("listing still exists");
    assert_eq!(sold_out.quantity, Decimal::ZERO);
    assert_eq!(sold_out.status, ListingStatus::SoldOut);

    // Buyers no longer see it
    let visible = listings.browse_listings().await?;
    assert!(visible.iter().all(|l| l.id != listing.id));

    // The supplier still does
    let mine = listings.listings_for_supplier(supplier.user.id).await?;
    assert!(mine.iter().any(|l| l.id == listing.id));

    Ok(())
}

#[tokio::test]
async fn test_registration_and_login_flow() -> Result<()> {
    let Some(pool) = test_pool().await else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return Ok(());
    };
    let config = test_config();
    let auth = AuthService::new(pool, config.clone(), JwtService::new(&config.jwt_secret));

    let tag = fresh_tag();
    let registered = auth.register(supplier_request(&tag)).await?;
    assert_eq!(registered.user.role, "supplier");
    assert!(!registered.access_token.is_empty());

    // Duplicate email is rejected
    let err = auth.register(supplier_request(&tag)).await.unwrap_err();
    assert!(matches!(err, ApiError::WithCode(ErrorCode::AlreadyExists, _)));

    // Email existence check matches
    assert!(auth.email_exists(&format!("farm_{}@example.com", tag)).await?);
    assert!(!auth.email_exists("nobody@example.com").await?);

    // Logging in under the wrong role fails
    let err = auth
        .login(LoginRequest {
            email: format!("farm_{}@example.com", tag),
            password: "correct-horse-battery".to_string(),
            role: UserRole::Buyer,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::WithCode(ErrorCode::RoleMismatch, _)));

    // Correct role and password succeeds
    let session = auth
        .login(LoginRequest {
            email: format!("farm_{}@example.com", tag),
            password: "correct-horse-battery".to_string(),
            role: UserRole::Supplier,
        })
        .await?;
    assert_eq!(session.user.username, format!("farm_{}", tag));

    // Wrong password fails
    let err = auth
        .login(LoginRequest {
            email: format!("farm_{}@example.com", tag),
            password: "wrong-password-here".to_string(),
            role: UserRole::Supplier,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::WithCode(ErrorCode::InvalidCredentials, _)
    ));

    Ok(())
}
