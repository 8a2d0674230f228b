//! P1 — Ingest & Classify.
//!
//! Consumes eligible pages, normalizes their URLs, and resolves each page's
//! role through a priority-ordered rule chain (first match wins). Legacy
//! detection is a boolean flag, never a page type.

use crate::model::classification::Classification;
use crate::model::page::{Page, PageType};
use crate::url::geo::{extract_geo_node, extract_service_keyword};
use crate::url::legacy::is_legacy_variant;
use crate::url::normalize::{
    folder_root, normalize_full_url, normalize_path, parent_path, path_parts, slug_last,
};
use crate::url::tokens::extract_slug_tokens;

/// Classify every eligible page. Pages with an empty URL are silently
/// skipped. Output is ordered by page id so downstream phases are
/// deterministic.
#[must_use]
pub fn run_ingest(pages: &[Page]) -> Vec<Classification> {
    let mut classifications: Vec<Classification> = pages
        .iter()
        .filter(|page| page.is_eligible())
        .filter_map(classify_page)
        .collect();
    classifications.sort_by_key(|classification| classification.page_id);
    classifications
}

/// Build the classification record for a single page.
#[must_use]
pub fn classify_page(page: &Page) -> Option<Classification> {
    if page.url.trim().is_empty() {
        return None;
    }

    let normalized_url = normalize_full_url(&page.url);
    let normalized_path = normalize_path(&page.url);
    let parts = path_parts(&normalized_path);
    let depth = parts.len();
    let folder = folder_root(&normalized_path);
    let parent = parent_path(&normalized_path);
    let slug = slug_last(&normalized_path);
    let slug_tokens = extract_slug_tokens(&normalized_path, true);

    let classified_type = classify_page_type(
        &normalized_path,
        &parts,
        depth,
        &folder,
        page.post_type.as_deref(),
        page.is_homepage,
    );

    let geo_node = if classified_type == PageType::Location {
        extract_geo_node(&normalized_path).unwrap_or_default()
    } else {
        String::new()
    };
    let service_keyword = extract_service_keyword(&normalized_path).unwrap_or_default();

    Some(Classification {
        page_id: page.id,
        url: page.url.clone(),
        title: page.title.clone(),
        normalized_url,
        is_legacy_variant: is_legacy_variant(&normalized_path),
        normalized_path,
        path_parts: parts,
        depth,
        folder_root: folder,
        parent_path: parent,
        slug_last: slug,
        slug_tokens,
        classified_type,
        geo_node,
        service_keyword,
    })
}

/// Resolve the page type. First matching rule wins; rule order is the
/// contract, not an implementation detail.
#[must_use]
pub fn classify_page_type(
    path: &str,
    parts: &[String],
    depth: usize,
    folder_root: &str,
    post_type: Option<&str>,
    is_homepage: bool,
) -> PageType {
    use crate::lexicon::folders;

    // 1. Homepage.
    if path == "/" || is_homepage {
        return PageType::Homepage;
    }

    // 2. Location pages.
    if folders::is_location_folder(folder_root) {
        return PageType::Location;
    }

    // 3. Dated blog permalinks (/2024/02/post-title/).
    if depth >= 3 && is_year_segment(&parts[0]) && is_month_segment(&parts[1]) {
        return PageType::Blog;
    }

    // 4. Blog folders.
    if folders::is_blog_folder(folder_root) {
        return PageType::Blog;
    }

    // 5. WooCommerce product post type.
    if post_type == Some("product") {
        return PageType::Product;
    }

    // 6. WooCommerce category post type.
    if matches!(post_type, Some("product_cat" | "product_category")) {
        return PageType::CategoryWoo;
    }

    // 7–9. Shop hierarchy by depth.
    if folder_root == "shop" {
        return match depth {
            1 => PageType::ShopRoot,
            2 => PageType::CategoryShop,
            _ => PageType::Product,
        };
    }

    // 10. Product index pages.
    if matches!(parts.last().map(String::as_str), Some("products" | "items")) {
        return PageType::ProductIndex;
    }

    // 11. /product-category/ hierarchy by depth.
    if folder_root == "product-category" {
        return if depth >= 3 {
            PageType::Product
        } else {
            PageType::CategoryWoo
        };
    }

    // 12. Custom rental catalogs by depth.
    if folders::is_rental_folder(folder_root) {
        if depth == 2 {
            return PageType::CategoryCustom;
        }
        if depth >= 3 {
            return PageType::Product;
        }
    }

    // 13. Service hub/spoke by depth.
    if folders::is_service_folder(folder_root) {
        return if depth == 1 {
            PageType::ServiceHub
        } else {
            PageType::ServiceSpoke
        };
    }

    // 14. Portfolio.
    if folders::is_portfolio_folder(folder_root) {
        return PageType::Portfolio;
    }

    // 15. Utility.
    if folders::is_utility_folder(folder_root) {
        return PageType::Utility;
    }

    // 16. Fallback.
    PageType::Uncategorized
}

fn is_year_segment(segment: &str) -> bool {
    segment.len() == 4 && segment.chars().all(|c| c.is_ascii_digit())
}

fn is_month_segment(segment: &str) -> bool {
    segment.len() == 2 && segment.chars().all(|c| c.is_ascii_digit())
}
