use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::user::{PlanUpdateRequest, UserCreateRequest},
    models::user::{AuthCredentials, User},
};

pub async fn exists_user_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_user_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_user_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: UserCreateRequest,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, first_name, last_name)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(data.email)
    .bind(data.first_name)
    .bind(data.last_name)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_user_credentials<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: AuthCredentials,
) -> Res<()> {
    sqlx::query(
        r#"
        INSERT INTO auth_credentials (user_id, password_hash)
        VALUES ($1, $2)
        "#,
    )
    .bind(data.user_id)
    .bind(data.password_hash)
    .execute(executor)
    .await?;
    Ok(())
}

#[derive(sqlx::FromRow)]
struct UserWithHash {
    #[sqlx(flatten)]
    user: User,
    password_hash: String,
}

pub async fn get_user_with_password_hash<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<(User, AuthCredentials)> {
    let record = sqlx::query_as::<_, UserWithHash>(
        r#"
        SELECT u.*, ac.password_hash
        FROM users u
        JOIN auth_credentials ac ON u.id = ac.user_id
        WHERE u.email = $1
        "#,
    )
    .bind(email)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)?;

    let credentials = AuthCredentials {
        user_id: record.user.id,
        password_hash: record.password_hash,
    };
    Ok((record.user, credentials))
}

pub async fn mark_verified<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET verified_at = now(), updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_plan<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: PlanUpdateRequest,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET plan = $2,
            plan_expires_at = $3,
            paystack_customer_code = COALESCE($4, paystack_customer_code),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.plan)
    .bind(data.plan_expires_at)
    .bind(data.paystack_customer_code)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<()> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn list_users<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    limit: i64,
    offset: i64,
) -> Res<Vec<User>> {
    sqlx::query_as::<_, User>(
        "SELECT * FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn count_users<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}
