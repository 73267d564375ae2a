//! `PostgreSQL` implementation of the [`Storage`] trait.
//!
//! Rows are fetched into plain row structs and converted into domain
//! models, so invalid database content surfaces as
//! [`RepositoryError::DataCorruption`] instead of a decode panic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use guarana_core::{Cpf, Email, OrderId, Phone, UserId};

use super::{RepositoryError, Storage};
use crate::models::order::{NewOrder, Order};
use crate::models::user::{NewUser, User};

/// `PostgreSQL`-backed storage.
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Create a new storage backed by the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw `users` row.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    password: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            username: row.username,
            password: row.password,
            created_at: row.created_at,
        }
    }
}

/// Raw `orders` row.
///
/// Contact fields stay as `String` here; the [`TryFrom`] conversion is
/// where they are checked against the domain types.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    product_sku: String,
    product_name: String,
    original_price: String,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    customer_cpf: String,
    shipping_address: String,
    shipping_city: String,
    shipping_state: String,
    shipping_postal_code: String,
    shipping_number: String,
    shipping_complement: Option<String>,
    shipping_method: String,
    shipping_price: String,
    payment_complete: bool,
    survey_answers: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let customer_email = Email::parse(&row.customer_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let customer_phone = Phone::parse(&row.customer_phone).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid phone in database: {e}"))
        })?;
        let customer_cpf = Cpf::parse(&row.customer_cpf).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid CPF in database: {e}"))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            product_sku: row.product_sku,
            product_name: row.product_name,
            original_price: row.original_price,
            customer_name: row.customer_name,
            customer_email,
            customer_phone,
            customer_cpf,
            shipping_address: row.shipping_address,
            shipping_city: row.shipping_city,
            shipping_state: row.shipping_state,
            shipping_postal_code: row.shipping_postal_code,
            shipping_number: row.shipping_number,
            shipping_complement: row.shipping_complement,
            shipping_method: row.shipping_method,
            shipping_price: row.shipping_price,
            payment_complete: row.payment_complete,
            survey_answers: row.survey_answers,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, password, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, password, created_at
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password, created_at
            ",
        )
        .bind(&new_user.username)
        .bind(&new_user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(User::from(row))
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT
                id, product_sku, product_name, original_price,
                customer_name, customer_email, customer_phone, customer_cpf,
                shipping_address, shipping_city, shipping_state, shipping_postal_code,
                shipping_number, shipping_complement, shipping_method, shipping_price,
                payment_complete, survey_answers, created_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    async fn get_all_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT
                id, product_sku, product_name, original_price,
                customer_name, customer_email, customer_phone, customer_cpf,
                shipping_address, shipping_city, shipping_state, shipping_postal_code,
                shipping_number, shipping_complement, shipping_method, shipping_price,
                payment_complete, survey_answers, created_at
            FROM orders
            ORDER BY created_at ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn create_order(&self, new_order: NewOrder) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (
                product_sku, product_name, original_price, customer_name,
                customer_email, customer_phone, customer_cpf, shipping_address,
                shipping_city, shipping_state, shipping_postal_code, shipping_number,
                shipping_complement, shipping_method, shipping_price, payment_complete,
                survey_answers
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING
                id, product_sku, product_name, original_price,
                customer_name, customer_email, customer_phone, customer_cpf,
                shipping_address, shipping_city, shipping_state, shipping_postal_code,
                shipping_number, shipping_complement, shipping_method, shipping_price,
                payment_complete, survey_answers, created_at
            ",
        )
        .bind(&new_order.product_sku)
        .bind(&new_order.product_name)
        .bind(&new_order.original_price)
        .bind(&new_order.customer_name)
        .bind(new_order.customer_email.as_str())
        .bind(new_order.customer_phone.as_str())
        .bind(new_order.customer_cpf.as_str())
        .bind(&new_order.shipping_address)
        .bind(&new_order.shipping_city)
        .bind(&new_order.shipping_state)
        .bind(&new_order.shipping_postal_code)
        .bind(&new_order.shipping_number)
        .bind(&new_order.shipping_complement)
        .bind(&new_order.shipping_method)
        .bind(&new_order.shipping_price)
        .bind(new_order.payment_complete)
        .bind(&new_order.survey_answers)
        .fetch_one(&self.pool)
        .await?;

        Order::try_from(row)
    }

    async fn update_order_payment(
        &self,
        id: OrderId,
        payment_complete: bool,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            UPDATE orders
            SET payment_complete = $2
            WHERE id = $1
            RETURNING
                id, product_sku, product_name, original_price,
                customer_name, customer_email, customer_phone, customer_cpf,
                shipping_address, shipping_city, shipping_state, shipping_postal_code,
                shipping_number, shipping_complement, shipping_method, shipping_price,
                payment_complete, survey_answers, created_at
            ",
        )
        .bind(id.as_i32())
        .bind(payment_complete)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
