//! Shared fixtures for the in-memory database tests.

use chrono::Utc;
use uuid::Uuid;

use crate::pool::{Database, DbConfig};
use shoplite_core::{NewProduct, Role, SessionContext, Shop, User};

/// Opens a fresh in-memory database with migrations applied.
pub async fn test_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

/// Creates a shop with one Sales user and returns the sales session.
pub async fn seed_shop(db: &Database) -> SessionContext {
    let owner_id = Uuid::new_v4().to_string();
    let shop = Shop {
        id: Uuid::new_v4().to_string(),
        name: "Test Shop".to_string(),
        owner_id: owner_id.clone(),
        location: None,
        created_at: Utc::now(),
    };
    db.shops().insert(&shop).await.expect("insert shop");

    let user = User {
        id: Uuid::new_v4().to_string(),
        email: format!("{}@test.local", Uuid::new_v4()),
        full_name: "Yaw Darko".to_string(),
        role: Role::Sales,
        shop_id: Some(shop.id.clone()),
        must_reset_password: false,
        created_at: Utc::now(),
    };
    db.users().insert(&user).await.expect("insert user");

    SessionContext {
        user_id: user.id,
        shop_id: Some(shop.id),
        role: Role::Sales,
        display_name: user.full_name,
    }
}

/// Admin session without a shop assignment.
pub fn admin_ctx() -> SessionContext {
    SessionContext {
        user_id: Uuid::new_v4().to_string(),
        shop_id: None,
        role: Role::Admin,
        display_name: "Abena Owusu".to_string(),
    }
}

/// Inserts a product into the session's shop and returns its id.
pub async fn seed_product(
    db: &Database,
    ctx: &SessionContext,
    name: &str,
    price_cents: i64,
    discount_bps: u32,
    stock: i64,
) -> String {
    let shop_id = ctx.shop_id.as_deref().expect("shop-scoped session");
    let input = NewProduct {
        name: name.to_string(),
        price_cents,
        cost_price_cents: Some(price_cents * 6 / 10),
        stock,
        discount_bps,
        category: "Food".to_string(),
        unit: "Piece".to_string(),
        attachment_url: None,
    };

    db.products()
        .create(shop_id, &input, Role::Manager)
        .await
        .expect("insert product")
        .id
}
