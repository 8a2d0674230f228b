//! Raw page input and the page-type taxonomy.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// Opaque page identifier, scoped to a single analysis run.
pub type PageId = u64;

/// A page as handed over by the page source.
///
/// Only `url`, `post_type`, and `is_homepage` influence classification; the
/// remaining metadata rides along for reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page id, unique within the site.
    pub id: PageId,
    /// Full page URL.
    pub url: String,
    /// Page title.
    pub title: String,
    /// Publication status; only `publish` participates.
    pub status: String,
    /// Noindex pages never compete for search intent.
    pub is_noindex: bool,
    /// Explicit homepage flag from the CMS.
    pub is_homepage: bool,
    /// CMS post type, e.g. `product` or `product_cat`.
    pub post_type: Option<String>,
    /// Word count, when known.
    pub word_count: Option<u32>,
    /// First heading, when known.
    pub h1: Option<String>,
    /// Meta description, when known.
    pub meta_desc: Option<String>,
    /// Inbound internal link count, when known.
    pub internal_links_in: Option<u32>,
    /// Outbound internal link count, when known.
    pub internal_links_out: Option<u32>,
    /// Structured-data schema type, when known.
    pub schema_type: Option<String>,
}

impl Page {
    /// Whether the page participates in analysis at all.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.status == "publish" && !self.is_noindex
    }
}

/// Classified role of a page, resolved by the priority-ordered rule chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Homepage,
    Location,
    Blog,
    Product,
    CategoryWoo,
    ShopRoot,
    CategoryShop,
    ProductIndex,
    CategoryCustom,
    ServiceHub,
    ServiceSpoke,
    Portfolio,
    Utility,
    Uncategorized,
}

impl PageType {
    /// Persisted snake_case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Homepage => "homepage",
            Self::Location => "location",
            Self::Blog => "blog",
            Self::Product => "product",
            Self::CategoryWoo => "category_woo",
            Self::ShopRoot => "shop_root",
            Self::CategoryShop => "category_shop",
            Self::ProductIndex => "product_index",
            Self::CategoryCustom => "category_custom",
            Self::ServiceHub => "service_hub",
            Self::ServiceSpoke => "service_spoke",
            Self::Portfolio => "portfolio",
            Self::Utility => "utility",
            Self::Uncategorized => "uncategorized",
        }
    }

    /// Category-style pages (the right winners for plural queries).
    #[must_use]
    pub const fn is_category(self) -> bool {
        matches!(self, Self::CategoryWoo | Self::CategoryShop | Self::CategoryCustom)
    }

    /// Commercial pages that should outrank a blog on transactional intent.
    #[must_use]
    pub const fn is_commercial(self) -> bool {
        matches!(
            self,
            Self::CategoryWoo
                | Self::CategoryShop
                | Self::CategoryCustom
                | Self::ServiceHub
                | Self::ServiceSpoke
                | Self::Product
        )
    }

    /// Specific pages a homepage tends to hoard queries from.
    #[must_use]
    pub const fn is_specific(self) -> bool {
        matches!(
            self,
            Self::ServiceHub
                | Self::ServiceSpoke
                | Self::Product
                | Self::CategoryWoo
                | Self::CategoryShop
        )
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
