//! In-memory [`Storage`] implementation for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use guarana_core::{OrderId, UserId};

use super::{RepositoryError, Storage};
use crate::models::order::{NewOrder, Order};
use crate::models::user::{NewUser, User};

/// Test storage holding everything in two vectors.
///
/// IDs are assigned serially starting at 1, and orders keep insertion
/// order, which matches how the real table behaves under
/// `ORDER BY created_at ASC`.
#[derive(Debug, Default)]
pub struct MemStorage {
    users: Mutex<Vec<User>>,
    orders: Mutex<Vec<Order>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock().expect("lock poisoned");
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock().expect("lock poisoned");
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().expect("lock poisoned");
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(RepositoryError::Conflict(
                "username already exists".to_owned(),
            ));
        }

        let id = i32::try_from(users.len() + 1).expect("test storage overflow");
        let user = User {
            id: UserId::new(id),
            username: new_user.username,
            password: new_user.password,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let orders = self.orders.lock().expect("lock poisoned");
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    async fn get_all_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = self.orders.lock().expect("lock poisoned");
        Ok(orders.clone())
    }

    async fn create_order(&self, new_order: NewOrder) -> Result<Order, RepositoryError> {
        let mut orders = self.orders.lock().expect("lock poisoned");
        let id = i32::try_from(orders.len() + 1).expect("test storage overflow");
        let order = Order {
            id: OrderId::new(id),
            product_sku: new_order.product_sku,
            product_name: new_order.product_name,
            original_price: new_order.original_price,
            customer_name: new_order.customer_name,
            customer_email: new_order.customer_email,
            customer_phone: new_order.customer_phone,
            customer_cpf: new_order.customer_cpf,
            shipping_address: new_order.shipping_address,
            shipping_city: new_order.shipping_city,
            shipping_state: new_order.shipping_state,
            shipping_postal_code: new_order.shipping_postal_code,
            shipping_number: new_order.shipping_number,
            shipping_complement: new_order.shipping_complement,
            shipping_method: new_order.shipping_method,
            shipping_price: new_order.shipping_price,
            payment_complete: new_order.payment_complete,
            survey_answers: new_order.survey_answers,
            created_at: Utc::now(),
        };
        orders.push(order.clone());
        Ok(order)
    }

    async fn update_order_payment(
        &self,
        id: OrderId,
        payment_complete: bool,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut orders = self.orders.lock().expect("lock poisoned");
        match orders.iter_mut().find(|o| o.id == id) {
            Some(order) => {
                order.payment_complete = payment_complete;
                Ok(Some(order.clone()))
            }
            None => Ok(None),
        }
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use guarana_core::{Cpf, Email, Phone};

    use super::*;

    fn sample_new_order() -> NewOrder {
        NewOrder {
            product_sku: "SKU-1".to_owned(),
            product_name: "Tênis Runner".to_owned(),
            original_price: "199.90".to_owned(),
            customer_name: "Maria Silva".to_owned(),
            customer_email: Email::parse("maria@example.com").unwrap(),
            customer_phone: Phone::parse("11987654321").unwrap(),
            customer_cpf: Cpf::parse("52998224725").unwrap(),
            shipping_address: "Rua das Flores".to_owned(),
            shipping_city: "São Paulo".to_owned(),
            shipping_state: "SP".to_owned(),
            shipping_postal_code: "01310100".to_owned(),
            shipping_number: "100".to_owned(),
            shipping_complement: None,
            shipping_method: "SEDEX".to_owned(),
            shipping_price: "25.00".to_owned(),
            payment_complete: false,
            survey_answers: None,
        }
    }

    #[tokio::test]
    async fn test_orders_are_listed_in_creation_order() {
        let storage = MemStorage::new();
        let first = storage.create_order(sample_new_order()).await.unwrap();
        let second = storage.create_order(sample_new_order()).await.unwrap();

        let all = storage.get_all_orders().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
    }

    #[tokio::test]
    async fn test_update_payment_returns_none_for_missing_order() {
        let storage = MemStorage::new();
        let updated = storage
            .update_order_payment(OrderId::new(42), true)
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let storage = MemStorage::new();
        let new_user = NewUser {
            username: "admin".to_owned(),
            password: "secret".to_owned(),
        };
        storage.create_user(new_user.clone()).await.unwrap();

        let err = storage.create_user(new_user).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
