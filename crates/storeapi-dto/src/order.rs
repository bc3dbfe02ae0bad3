//! Order details endpoint.

use serde::{Deserialize, Serialize};

use storeapi_core::request::{ApiRequest, RequestInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    AwaitingPayment,
    Paid,
    Cancelled,
    Refunded,
    PartiallyRefunded,
    Incomplete,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentStatus {
    AwaitingProcessing,
    Processing,
    Shipped,
    Delivered,
    WillNotDeliver,
    Returned,
    ReadyForPickup,
    OutForDelivery,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: Option<u64>,
    pub sku: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedOrder {
    pub order_number: u64,
    pub vendor_order_number: Option<String>,
    pub email: Option<String>,
    pub subtotal: Option<f64>,
    pub total: Option<f64>,
    pub payment_status: Option<PaymentStatus>,
    pub fulfillment_status: Option<FulfillmentStatus>,
    pub create_date: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl FetchedOrder {
    /// Total quantity across line items, saturating at `u32::MAX`.
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity))
    }
}

/// `GET orders/{orderNumber}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDetailsRequest {
    pub order_number: u64,
}

impl OrderDetailsRequest {
    pub fn new(order_number: u64) -> Self {
        Self { order_number }
    }
}

impl ApiRequest for OrderDetailsRequest {
    type Response = FetchedOrder;

    fn to_request_info(&self) -> RequestInfo {
        RequestInfo::get(format!("orders/{}", self.order_number))
    }
}
