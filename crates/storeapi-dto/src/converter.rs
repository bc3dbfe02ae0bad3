//! Fetched → updated product conversion, for read-modify-write updates.

use crate::product::{
    FetchedAttributeValue, FetchedProduct, FetchedProductImage, FetchedProductMedia,
    UpdatedAttributeValue, UpdatedProduct, UpdatedProductImage, UpdatedProductMedia,
};

impl FetchedProduct {
    /// Build an update payload that writes back every editable field.
    ///
    /// Read-only fields (id, url, stock flag, timestamps) are dropped. Tax
    /// settings are left unset.
    pub fn to_updated(&self) -> UpdatedProduct {
        UpdatedProduct {
            name: self.name.clone(),
            description: self.description.clone(),
            sku: self.sku.clone(),

            enabled: self.enabled,
            quantity: self.quantity,
            unlimited: self.unlimited,
            warning_limit: self.warning_limit,

            category_ids: self.category_ids.clone(),
            default_category_id: self.default_category_id,
            show_on_frontpage: self.show_on_frontpage,

            price: self.price,
            wholesale_prices: self.wholesale_prices.clone(),
            compare_to_price: self.compare_to_price,

            weight: self.weight,
            dimensions: self.dimensions.clone(),
            shipping: self.shipping.clone(),
            is_shipping_required: self.is_shipping_required,

            product_class_id: self.product_class_id,
            attributes: self
                .attributes
                .as_ref()
                .map(|attrs| attrs.iter().map(FetchedAttributeValue::to_updated).collect()),

            seo_title: self.seo_title.clone(),
            seo_description: self.seo_description.clone(),

            options: self.options.clone(),
            tax: None,
            related_products: self.related_products.clone(),

            media: self.media.as_ref().map(FetchedProductMedia::to_updated),
        }
    }
}

impl FetchedAttributeValue {
    pub fn to_updated(&self) -> UpdatedAttributeValue {
        UpdatedAttributeValue {
            id: self.id,
            name: self.name.clone(),
            alias: self.alias.clone(),
            value: self.value.clone(),
            show: self.show,
        }
    }
}

impl FetchedProductMedia {
    pub fn to_updated(&self) -> UpdatedProductMedia {
        UpdatedProductMedia {
            images: self.images.iter().map(FetchedProductImage::to_updated).collect(),
        }
    }
}

impl FetchedProductImage {
    pub fn to_updated(&self) -> UpdatedProductImage {
        UpdatedProductImage {
            id: self.id.clone(),
            order_by: self.order_by,
        }
    }
}
