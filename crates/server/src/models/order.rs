//! Order domain types.
//!
//! The wire shape uses camelCase keys to match what the checkout frontend
//! sends and expects back. Prices are opaque text (already formatted by
//! the frontend); no arithmetic is ever performed on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use guarana_core::{Cpf, Email, OrderId, Phone};

/// A customer order (domain type).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    pub product_sku: String,
    pub product_name: String,
    pub original_price: String,
    pub customer_name: String,
    pub customer_email: Email,
    pub customer_phone: Phone,
    pub customer_cpf: Cpf,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_postal_code: String,
    pub shipping_number: String,
    pub shipping_complement: Option<String>,
    pub shipping_method: String,
    pub shipping_price: String,
    /// Whether payment has been confirmed. Always false on creation.
    pub payment_complete: bool,
    /// Free-form survey answers collected at checkout, if any.
    pub survey_answers: Option<serde_json::Value>,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a new order.
///
/// `id` and `created_at` are generated by the database. The payment flag
/// is carried explicitly because the create route always forces it false.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub product_sku: String,
    pub product_name: String,
    pub original_price: String,
    pub customer_name: String,
    pub customer_email: Email,
    pub customer_phone: Phone,
    pub customer_cpf: Cpf,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_postal_code: String,
    pub shipping_number: String,
    pub shipping_complement: Option<String>,
    pub shipping_method: String,
    pub shipping_price: String,
    pub payment_complete: bool,
    pub survey_answers: Option<serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_serializes_camel_case_with_nulls() {
        let order = Order {
            id: OrderId::new(1),
            product_sku: "SKU-1".to_string(),
            product_name: "Caneca".to_string(),
            original_price: "49.90".to_string(),
            customer_name: "Ana Souza".to_string(),
            customer_email: Email::parse("ana@example.com").unwrap(),
            customer_phone: Phone::parse("11987654321").unwrap(),
            customer_cpf: Cpf::parse("52998224725").unwrap(),
            shipping_address: "Rua das Flores".to_string(),
            shipping_city: "São Paulo".to_string(),
            shipping_state: "SP".to_string(),
            shipping_postal_code: "01310100".to_string(),
            shipping_number: "100".to_string(),
            shipping_complement: None,
            shipping_method: "sedex".to_string(),
            shipping_price: "25.00".to_string(),
            payment_complete: false,
            survey_answers: None,
            created_at: "2024-05-01T12:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["productSku"], "SKU-1");
        assert_eq!(json["customerCpf"], "52998224725");
        assert_eq!(json["paymentComplete"], false);
        // Absent optionals serialize as explicit nulls
        assert!(json["shippingComplement"].is_null());
        assert!(json["surveyAnswers"].is_null());
        assert!(json.get("createdAt").is_some());
    }
}
