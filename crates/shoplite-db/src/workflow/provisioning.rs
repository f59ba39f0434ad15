//! # Provisioning Workflow
//!
//! Account and shop lifecycle:
//!
//! - self-service signup with the caller's chosen role, no shop
//! - Admin-side provisioning with a forced first-login password reset
//! - role/shop reassignment and shop creation, Admin-gated
//!
//! Credential storage itself (hashing, tokens) belongs to the identity
//! provider in front of this service; this layer owns the account
//! documents and the reset flag.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, WorkflowResult};
use crate::pool::Database;
use shoplite_core::validation::validate_email;
use shoplite_core::{CoreError, NewUser, Role, SessionContext, Shop, User};

/// Registers a self-service account with the role the user picked.
///
/// Signups carry no shop; an Admin assigns one afterwards. No forced
/// password reset - the user chose their own credential.
pub async fn signup(
    db: &Database,
    email: &str,
    full_name: &str,
    role: Role,
) -> WorkflowResult<User> {
    validate_email(email)?;
    let email = email.trim().to_lowercase();

    // The UNIQUE index is the backstop; checking first gives the caller
    // the stored address instead of a constraint message.
    if db.users().get_by_email(&email).await?.is_some() {
        return Err(DbError::UniqueViolation {
            field: "users.email".to_string(),
            value: email,
        }
        .into());
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        email,
        full_name: full_name.trim().to_string(),
        role,
        shop_id: None,
        must_reset_password: false,
        created_at: Utc::now(),
    };

    db.users().insert(&user).await?;
    info!(user_id = %user.id, "User signed up");
    Ok(user)
}

/// Provisions an account on behalf of someone else. Admin only.
///
/// The account starts with `must_reset_password` set: the provisioned
/// default credential has to be replaced before any dashboard access.
pub async fn provision_user(
    db: &Database,
    ctx: &SessionContext,
    input: &NewUser,
) -> WorkflowResult<User> {
    require_admin(ctx, "provision user")?;
    validate_email(&input.email)?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        email: input.email.trim().to_lowercase(),
        full_name: input.full_name.trim().to_string(),
        role: input.role,
        shop_id: input.shop_id.clone(),
        must_reset_password: true,
        created_at: Utc::now(),
    };

    db.users().insert(&user).await?;
    info!(user_id = %user.id, admin = %ctx.user_id, "User provisioned");
    Ok(user)
}

/// Reassigns a user's role and shop. Admin only.
pub async fn assign_role(
    db: &Database,
    ctx: &SessionContext,
    user_id: &str,
    role: Role,
    shop_id: Option<&str>,
) -> WorkflowResult<()> {
    require_admin(ctx, "assign role")?;

    db.users().update_role_and_shop(user_id, role, shop_id).await?;
    info!(user_id = %user_id, admin = %ctx.user_id, "Role assigned");
    Ok(())
}

/// Marks a provisioned account's forced password reset as completed, on
/// the user's own behalf.
pub async fn complete_password_reset(db: &Database, ctx: &SessionContext) -> WorkflowResult<()> {
    debug!(user_id = %ctx.user_id, "Completing password reset");

    db.users().clear_reset_flag(&ctx.user_id).await?;
    Ok(())
}

/// Creates a new shop. Admin only.
pub async fn create_shop(
    db: &Database,
    ctx: &SessionContext,
    name: &str,
    owner_id: &str,
    location: Option<&str>,
) -> WorkflowResult<Shop> {
    require_admin(ctx, "create shop")?;

    let shop = Shop {
        id: Uuid::new_v4().to_string(),
        name: name.trim().to_string(),
        owner_id: owner_id.to_string(),
        location: location.map(|l| l.trim().to_string()),
        created_at: Utc::now(),
    };

    db.shops().insert(&shop).await?;
    info!(shop_id = %shop.id, name = %shop.name, "Shop created");
    Ok(shop)
}

fn require_admin(ctx: &SessionContext, action: &str) -> Result<(), CoreError> {
    if ctx.role.can_provision() {
        Ok(())
    } else {
        Err(CoreError::Forbidden {
            role: ctx.role,
            action: action.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
