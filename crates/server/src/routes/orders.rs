//! Order route handlers.
//!
//! Orders arrive from the checkout as a flat JSON payload. Validation
//! stops at the first violated rule and answers with that rule's message,
//! so the client always sees one actionable problem at a time.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use guarana_core::{Cpf, Email, OrderId, Phone};

use crate::error::{AppError, AppJson};
use crate::models::order::{NewOrder, Order};
use crate::state::AppState;

/// Payload accepted by `POST /api/orders`.
///
/// Every field is optional at the deserialization layer; requiredness is
/// enforced in [`CreateOrderRequest::into_new_order`] so a missing field
/// yields the field's own message instead of a generic decode error.
/// Unknown fields, including any client-supplied payment flag, are
/// ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub product_sku: Option<String>,
    pub product_name: Option<String>,
    pub original_price: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_cpf: Option<String>,
    pub shipping_address: Option<String>,
    pub shipping_city: Option<String>,
    pub shipping_state: Option<String>,
    pub shipping_postal_code: Option<String>,
    pub shipping_number: Option<String>,
    pub shipping_complement: Option<String>,
    pub shipping_method: Option<String>,
    pub shipping_price: Option<String>,
    pub survey_answers: Option<serde_json::Value>,
}

impl CreateOrderRequest {
    /// Validate the payload and build the order to insert.
    ///
    /// Checks run in field order and stop at the first violation. New
    /// orders always start unpaid; payment is confirmed later through
    /// `PATCH /api/orders/payment`.
    fn into_new_order(self) -> Result<NewOrder, String> {
        let product_sku = require(self.product_sku, "productSku")?;
        let product_name = require(self.product_name, "productName")?;
        let original_price = require(self.original_price, "originalPrice")?;
        let customer_name = require(self.customer_name, "customerName")?;

        let customer_email = Email::parse(&require(self.customer_email, "customerEmail")?)
            .map_err(|_| "Email inválido".to_owned())?;
        let customer_phone = Phone::parse(&require(self.customer_phone, "customerPhone")?)
            .map_err(|_| "Telefone deve conter pelo menos 10 dígitos".to_owned())?;
        let customer_cpf = Cpf::parse(&require(self.customer_cpf, "customerCpf")?)
            .map_err(|_| "CPF deve conter 11 dígitos numéricos".to_owned())?;

        let shipping_address = require(self.shipping_address, "shippingAddress")?;
        let shipping_city = require(self.shipping_city, "shippingCity")?;
        let shipping_state = require(self.shipping_state, "shippingState")?;
        let shipping_postal_code = require(self.shipping_postal_code, "shippingPostalCode")?;
        let shipping_number = require(self.shipping_number, "shippingNumber")?;
        let shipping_method = require(self.shipping_method, "shippingMethod")?;
        let shipping_price = require(self.shipping_price, "shippingPrice")?;

        Ok(NewOrder {
            product_sku,
            product_name,
            original_price,
            customer_name,
            customer_email,
            customer_phone,
            customer_cpf,
            shipping_address,
            shipping_city,
            shipping_state,
            shipping_postal_code,
            shipping_number,
            shipping_complement: self.shipping_complement,
            shipping_method,
            shipping_price,
            payment_complete: false,
            survey_answers: self.survey_answers,
        })
    }
}

/// First-violation message for a missing required field.
fn require(value: Option<String>, json_key: &str) -> Result<String, String> {
    value.ok_or_else(|| format!("{json_key} é obrigatório"))
}

/// Payload accepted by `PATCH /api/orders/payment`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentRequest {
    pub order_id: Option<i32>,
    pub payment_complete: Option<bool>,
}

/// Response body for a created order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedResponse {
    pub message: String,
    pub order_id: OrderId,
}

/// Response body for a payment status update.
#[derive(Debug, Serialize)]
pub struct PaymentUpdatedResponse {
    pub message: String,
    pub order: Order,
}

/// Create a new order.
///
/// `POST /api/orders`
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), AppError> {
    let new_order = body.into_new_order().map_err(AppError::BadRequest)?;

    let order = state
        .storage()
        .create_order(new_order)
        .await
        .map_err(|e| AppError::internal("Erro ao criar pedido", e))?;

    tracing::info!(order_id = %order.id, "order created");

    Ok((
        StatusCode::CREATED,
        Json(OrderCreatedResponse {
            message: "Pedido criado com sucesso".to_owned(),
            order_id: order.id,
        }),
    ))
}

/// Fetch a single order.
///
/// `GET /api/orders/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, AppError> {
    let id: i32 = id
        .parse()
        .map_err(|_| AppError::BadRequest("ID do pedido inválido".to_owned()))?;

    let order = state
        .storage()
        .get_order(OrderId::new(id))
        .await
        .map_err(|e| AppError::internal("Erro ao buscar pedido", e))?
        .ok_or_else(|| AppError::NotFound("Pedido não encontrado".to_owned()))?;

    Ok(Json(order))
}

/// List all orders, oldest first.
///
/// `GET /api/orders`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    let orders = state
        .storage()
        .get_all_orders()
        .await
        .map_err(|e| AppError::internal("Erro ao buscar pedidos", e))?;

    Ok(Json(orders))
}

/// Update an order's payment status.
///
/// `PATCH /api/orders/payment`
#[instrument(skip(state, body))]
pub async fn update_payment(
    State(state): State<AppState>,
    AppJson(body): AppJson<UpdatePaymentRequest>,
) -> Result<Json<PaymentUpdatedResponse>, AppError> {
    let order_id = body
        .order_id
        .ok_or_else(|| AppError::BadRequest("orderId é obrigatório".to_owned()))?;
    let payment_complete = body
        .payment_complete
        .ok_or_else(|| AppError::BadRequest("paymentComplete é obrigatório".to_owned()))?;

    let order = state
        .storage()
        .update_order_payment(OrderId::new(order_id), payment_complete)
        .await
        .map_err(|e| AppError::internal("Erro ao atualizar status de pagamento", e))?
        .ok_or_else(|| AppError::NotFound("Pedido não encontrado".to_owned()))?;

    tracing::info!(order_id = %order.id, payment_complete, "payment status updated");

    Ok(Json(PaymentUpdatedResponse {
        message: "Status de pagamento atualizado com sucesso".to_owned(),
        order,
    }))
}
