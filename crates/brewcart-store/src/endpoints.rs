//! # Endpoints
//!
//! URLs of the storefront service, built from [`StoreConfig`].

use url::Url;

use crate::error::StoreResult;
use crate::state::StoreConfig;

const CATALOG_PATH: &str = "app/product/getallproductlist";
const LOGIN_PATH: &str = "app/auth/login";
const SIGNUP_PATH: &str = "app/auth/signup";

#[derive(Debug, Clone)]
pub struct Endpoints {
    api: Url,
    media: Url,
}

impl Endpoints {
    pub fn new(config: &StoreConfig) -> Self {
        Endpoints {
            api: config.api_base_url.clone(),
            media: config.media_base_url.clone(),
        }
    }

    /// `GET <base>/app/product/getallproductlist?search=<text>`
    ///
    /// The query parameter is always present, empty when not searching.
    pub fn catalog_url(&self, search: &str) -> StoreResult<Url> {
        let mut url = self.api.join(CATALOG_PATH)?;
        url.query_pairs_mut().append_pair("search", search);
        Ok(url)
    }

    pub fn login_url(&self) -> StoreResult<Url> {
        Ok(self.api.join(LOGIN_PATH)?)
    }

    pub fn signup_url(&self) -> StoreResult<Url> {
        Ok(self.api.join(SIGNUP_PATH)?)
    }

    /// Resolves a product image reference against the media host.
    /// Absolute references are returned unchanged.
    pub fn media_url(&self, image: &str) -> StoreResult<Url> {
        if let Ok(absolute) = Url::parse(image) {
            return Ok(absolute);
        }
        Ok(self.media.join(image.trim_start_matches('/'))?)
    }
}
