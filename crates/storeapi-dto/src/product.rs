//! Product endpoints: details, create, update, delete.
//!
//! `FetchedProduct` is what the API returns; `UpdatedProduct` is what it
//! accepts. Every field of `UpdatedProduct` is optional and omitted when
//! unset, so a sparse value updates only the fields it carries.

use serde::{Deserialize, Serialize};

use storeapi_core::request::{ApiRequest, RequestBody, RequestInfo};

use crate::model::{
    AttributeValueLocation, ProductDimensions, ProductOption, RelatedProducts, ShippingSettings,
    TaxInfo, WholesalePrice,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedProduct {
    pub id: u64,
    pub sku: Option<String>,
    pub url: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,

    pub enabled: Option<bool>,
    pub quantity: Option<i64>,
    pub unlimited: Option<bool>,
    pub in_stock: Option<bool>,
    pub warning_limit: Option<i64>,

    pub category_ids: Option<Vec<u64>>,
    pub default_category_id: Option<u64>,
    pub show_on_frontpage: Option<i32>,

    pub price: Option<f64>,
    pub wholesale_prices: Option<Vec<WholesalePrice>>,
    pub compare_to_price: Option<f64>,

    pub weight: Option<f64>,
    pub dimensions: Option<ProductDimensions>,
    pub shipping: Option<ShippingSettings>,
    pub is_shipping_required: Option<bool>,

    pub product_class_id: Option<u64>,
    pub attributes: Option<Vec<FetchedAttributeValue>>,

    pub seo_title: Option<String>,
    pub seo_description: Option<String>,

    pub options: Option<Vec<ProductOption>>,
    pub tax: Option<TaxInfo>,
    pub related_products: Option<RelatedProducts>,
    pub media: Option<FetchedProductMedia>,

    pub created: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchedAttributeValue {
    pub id: Option<u64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub alias: Option<String>,
    pub value: Option<String>,
    pub show: Option<AttributeValueLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchedProductMedia {
    pub images: Vec<FetchedProductImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchedProductImage {
    pub id: String,
    pub order_by: i32,
    pub is_main: bool,
    pub image160px_url: Option<String>,
    pub image400px_url: Option<String>,
    pub image800px_url: Option<String>,
    pub image1500px_url: Option<String>,
    pub image_original_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlimited: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_limit: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_category_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_on_frontpage: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wholesale_prices: Option<Vec<WholesalePrice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_to_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<ProductDimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ShippingSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_shipping_required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_class_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<UpdatedAttributeValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ProductOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<TaxInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_products: Option<RelatedProducts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<UpdatedProductMedia>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedAttributeValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<AttributeValueLocation>,
}

/// Image ordering only; image content is uploaded through its own endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProductMedia {
    #[serde(default)]
    pub images: Vec<UpdatedProductImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProductImage {
    pub id: String,
    pub order_by: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreateResult {
    pub id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdateResult {
    pub update_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDeleteResult {
    pub delete_count: u32,
}

/// `GET products/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductDetailsRequest {
    pub product_id: u64,
}

impl ProductDetailsRequest {
    pub fn new(product_id: u64) -> Self {
        Self { product_id }
    }
}

impl ApiRequest for ProductDetailsRequest {
    type Response = FetchedProduct;

    fn to_request_info(&self) -> RequestInfo {
        RequestInfo::get(format!("products/{}", self.product_id))
    }
}

/// `POST products`
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreateRequest {
    pub product: UpdatedProduct,
}

impl ApiRequest for ProductCreateRequest {
    type Response = ProductCreateResult;

    fn to_request_info(&self) -> RequestInfo {
        RequestInfo::post("products", RequestBody::dto(&self.product))
    }
}

/// `PUT products/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdateRequest {
    pub product_id: u64,
    pub product: UpdatedProduct,
}

impl ApiRequest for ProductUpdateRequest {
    type Response = ProductUpdateResult;

    fn to_request_info(&self) -> RequestInfo {
        RequestInfo::put(
            format!("products/{}", self.product_id),
            RequestBody::dto(&self.product),
        )
    }
}

/// `DELETE products/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductDeleteRequest {
    pub product_id: u64,
}

impl ApiRequest for ProductDeleteRequest {
    type Response = ProductDeleteResult;

    fn to_request_info(&self) -> RequestInfo {
        RequestInfo::delete(format!("products/{}", self.product_id))
    }
}
