//! storeapi-dto: typed endpoints for StoreAPI.
//!
//! Each request type implements [`ApiRequest`](storeapi_core::request::ApiRequest)
//! and names the shape its response decodes into, so it can be sent on its
//! own or added to a batch as a typed slot.

pub mod converter;
pub mod model;
pub mod order;
pub mod product;

pub use order::{FetchedOrder, OrderDetailsRequest};
pub use product::{
    FetchedProduct, ProductCreateRequest, ProductCreateResult, ProductDeleteRequest,
    ProductDeleteResult, ProductDetailsRequest, ProductUpdateRequest, ProductUpdateResult,
    UpdatedProduct,
};
