//! Authenticated-tier remote store.
//!
//! [`RemoteStore`] is the sync contract the server exposes; [`HttpRemote`]
//! is its production implementation over the storefront JSON API. The
//! session credential rides the cookie jar, so a remote constructed after
//! login syncs against that user's record.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use atelier_core::{CartLine, ProductId, WishlistEntry};

use crate::error::SyncError;

/// Upper bound on any single sync request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The remote half of the sync contract.
///
/// Mutations return `Ok(())` on a 2xx response; the response body (the
/// server's resulting list) is intentionally ignored - the caller already
/// applied the same mutation optimistically with identical identity-key
/// semantics, so the two sides converge without adoption.
pub trait RemoteStore {
    /// Fetch the cart. [`SyncError::Unauthorized`] means no valid session.
    fn fetch_cart(&self) -> impl Future<Output = Result<Vec<CartLine>, SyncError>> + Send;

    /// Replace the entire cart with `lines`.
    fn replace_cart(&self, lines: &[CartLine])
    -> impl Future<Output = Result<(), SyncError>> + Send;

    /// Add-or-increment a single line by identity key.
    fn add_cart_line(&self, line: &CartLine) -> impl Future<Output = Result<(), SyncError>> + Send;

    /// Fetch the wishlist. [`SyncError::Unauthorized`] means no valid session.
    fn fetch_wishlist(&self) -> impl Future<Output = Result<Vec<WishlistEntry>, SyncError>> + Send;

    /// Toggle wishlist membership for `product_id`; the server decides
    /// whether that means add or remove.
    fn toggle_wishlist(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<(), SyncError>> + Send;
}

// Wire envelopes, matching the server's route DTOs.

#[derive(Debug, Deserialize)]
struct CartEnvelope {
    cart: Vec<CartLine>,
}

#[derive(Debug, Serialize)]
struct CartReplaceBody<'a> {
    cart: &'a [CartLine],
}

#[derive(Debug, Serialize)]
struct CartAddBody<'a> {
    item: &'a CartLine,
}

#[derive(Debug, Deserialize)]
struct WishlistEnvelope {
    wishlist: Vec<WishlistEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WishlistToggleBody {
    product_id: ProductId,
}

/// Remote store over the storefront HTTP API.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    cart_url: Url,
    wishlist_url: Url,
}

impl HttpRemote {
    /// Create a remote rooted at `base_url`.
    ///
    /// The client keeps a cookie jar (session credential) and bounds every
    /// request to 10 seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` cannot be a base (e.g. `data:` URLs)
    /// or the HTTP client cannot be constructed.
    pub fn new(base_url: &Url) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .cookie_store(true)
            .build()?;
        Self::with_client(client, base_url)
    }

    /// Create a remote using an existing client (shared cookie jar).
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` cannot be a base.
    pub fn with_client(client: reqwest::Client, base_url: &Url) -> Result<Self, SyncError> {
        let join = |path: &str| {
            base_url.join(path).map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("invalid base url {base_url}: {e}"),
                )
            })
        };
        Ok(Self {
            client,
            cart_url: join("cart")?,
            wishlist_url: join("wishlist")?,
        })
    }

    /// Map a response status to the sync error taxonomy.
    fn check(response: &reqwest::Response) -> Result<(), SyncError> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SyncError::Unauthorized);
        }
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }
        Ok(())
    }
}

impl RemoteStore for HttpRemote {
    async fn fetch_cart(&self) -> Result<Vec<CartLine>, SyncError> {
        let response = self.client.get(self.cart_url.clone()).send().await?;
        Self::check(&response)?;
        let envelope: CartEnvelope = response.json().await?;
        Ok(envelope.cart)
    }

    async fn replace_cart(&self, lines: &[CartLine]) -> Result<(), SyncError> {
        let response = self
            .client
            .put(self.cart_url.clone())
            .json(&CartReplaceBody { cart: lines })
            .send()
            .await?;
        Self::check(&response)
    }

    async fn add_cart_line(&self, line: &CartLine) -> Result<(), SyncError> {
        let response = self
            .client
            .post(self.cart_url.clone())
            .json(&CartAddBody { item: line })
            .send()
            .await?;
        Self::check(&response)
    }

    async fn fetch_wishlist(&self) -> Result<Vec<WishlistEntry>, SyncError> {
        let response = self.client.get(self.wishlist_url.clone()).send().await?;
        Self::check(&response)?;
        let envelope: WishlistEnvelope = response.json().await?;
        Ok(envelope.wishlist)
    }

    async fn toggle_wishlist(&self, product_id: ProductId) -> Result<(), SyncError> {
        let response = self
            .client
            .post(self.wishlist_url.clone())
            .json(&WishlistToggleBody { product_id })
            .send()
            .await?;
        Self::check(&response)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joining() {
        let base: Url = "https://shop.example/".parse().unwrap();
        let remote = HttpRemote::new(&base).unwrap();
        assert_eq!(remote.cart_url.as_str(), "https://shop.example/cart");
        assert_eq!(
            remote.wishlist_url.as_str(),
            "https://shop.example/wishlist"
        );
    }

    #[test]
    fn test_rejects_cannot_be_a_base() {
        let base: Url = "data:text/plain,hello".parse().unwrap();
        assert!(HttpRemote::new(&base).is_err());
    }

    #[test]
    fn test_toggle_body_wire_shape() {
        let body = WishlistToggleBody {
            product_id: ProductId::new(9),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"productId": 9}));
    }
}
