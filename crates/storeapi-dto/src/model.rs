//! Value types shared by fetched and updated product shapes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WholesalePrice {
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingSettingsType {
    GlobalMethods,
    SelectedMethods,
    FlatRate,
    FreeShipping,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingSettings {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ShippingSettingsType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_markup: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_methods: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_methods: Option<Vec<String>>,
}

/// Where an attribute value is shown on the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValueLocation {
    #[serde(rename = "NOTSHOW")]
    NotShow,
    #[serde(rename = "DESCR")]
    Description,
    #[serde(rename = "PRICE")]
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceModifierType {
    Absolute,
    Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionChoice {
    pub text: String,
    #[serde(default)]
    pub price_modifier: f64,
    #[serde(default = "default_price_modifier_type")]
    pub price_modifier_type: PriceModifierType,
}

fn default_price_modifier_type() -> PriceModifierType {
    PriceModifierType::Absolute
}

/// A product option, tagged on the wire by its `type` field.
///
/// Choice-based kinds carry their choices; input kinds only a name and
/// whether the shopper must fill them in. `default_choice` is an index into
/// `choices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ProductOption {
    #[serde(rename = "SELECT")]
    Select {
        name: String,
        #[serde(default)]
        choices: Vec<ProductOptionChoice>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_choice: Option<usize>,
        #[serde(default)]
        required: bool,
    },
    #[serde(rename = "RADIO")]
    Radio {
        name: String,
        #[serde(default)]
        choices: Vec<ProductOptionChoice>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_choice: Option<usize>,
        #[serde(default)]
        required: bool,
    },
    #[serde(rename = "CHECKBOX")]
    Checkbox {
        name: String,
        #[serde(default)]
        choices: Vec<ProductOptionChoice>,
    },
    #[serde(rename = "TEXTFIELD")]
    TextField {
        name: String,
        #[serde(default)]
        required: bool,
    },
    #[serde(rename = "TEXTAREA")]
    TextArea {
        name: String,
        #[serde(default)]
        required: bool,
    },
    #[serde(rename = "DATE")]
    Date {
        name: String,
        #[serde(default)]
        required: bool,
    },
    #[serde(rename = "FILES")]
    Files {
        name: String,
        #[serde(default)]
        required: bool,
    },
}

impl ProductOption {
    pub fn name(&self) -> &str {
        match self {
            Self::Select { name, .. }
            | Self::Radio { name, .. }
            | Self::Checkbox { name, .. }
            | Self::TextField { name, .. }
            | Self::TextArea { name, .. }
            | Self::Date { name, .. }
            | Self::Files { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedCategory {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedProducts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_ids: Option<Vec<u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_category: Option<RelatedCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_location_included_tax_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_manual_tax_ids: Option<Vec<u64>>,
}
