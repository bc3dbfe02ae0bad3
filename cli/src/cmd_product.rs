//! `storeapi product`: fetch one product.

use anyhow::{Context, Result};

use storeapi_core::client::ApiClient;
use storeapi_dto::ProductDetailsRequest;

pub async fn run(client: &ApiClient, id: u64, as_update: bool) -> Result<()> {
    let product = client
        .send(&ProductDetailsRequest::new(id))
        .await
        .with_context(|| format!("fetching product {id}"))?;

    let rendered = if as_update {
        serde_json::to_string_pretty(&product.to_updated())?
    } else {
        serde_json::to_string_pretty(&product)?
    };
    println!("{rendered}");
    Ok(())
}
