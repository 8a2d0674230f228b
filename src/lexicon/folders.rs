//! Folder-root taxonomy: which top-level URL folder implies which page role.

/// Folders whose children are per-city location pages.
pub const LOCATION_FOLDERS: &[&str] = &[
    "service-area",
    "service-areas",
    "locations",
    "location",
    "city",
    "cities",
];

/// Location roots whose second segment names a service
/// (`/service-area/<service>/<city>/`). Narrower than `LOCATION_FOLDERS`:
/// bare `city`/`cities` roots hold city pages directly, with no service
/// segment in between.
pub const SERVICE_LOCATION_FOLDERS: &[&str] =
    &["service-area", "service-areas", "locations", "location"];

/// Folders that hold editorial content.
pub const BLOG_FOLDERS: &[&str] = &[
    "blog",
    "news",
    "articles",
    "article",
    "insights",
    "resources",
    "journal",
];

/// Folders that hold service hub/spoke pages.
pub const SERVICE_FOLDERS: &[&str] = &["service", "services", "residential", "commercial"];

/// Custom rental catalogs that mirror a shop hierarchy without WooCommerce.
pub const RENTAL_FOLDERS: &[&str] = &["rentals", "rental", "product-rentals", "equipment"];

/// Showcase folders.
pub const PORTFOLIO_FOLDERS: &[&str] = &[
    "portfolio",
    "portfolios",
    "projects",
    "gallery",
    "our-work",
    "case-studies",
];

/// Housekeeping pages that never compete for search intent.
pub const UTILITY_FOLDERS: &[&str] = &[
    "cart",
    "checkout",
    "my-account",
    "account",
    "wp-admin",
    "wp-login",
    "wp-content",
    "privacy-policy",
    "terms",
    "terms-of-service",
    "thank-you",
    "sitemap",
    "search",
    "feed",
];

/// True when `folder` is a location folder root.
#[must_use]
pub fn is_location_folder(folder: &str) -> bool {
    LOCATION_FOLDERS.contains(&folder)
}

/// True when `folder` is a location root that nests services.
#[must_use]
pub fn is_service_location_folder(folder: &str) -> bool {
    SERVICE_LOCATION_FOLDERS.contains(&folder)
}

/// True when `folder` is a blog folder root.
#[must_use]
pub fn is_blog_folder(folder: &str) -> bool {
    BLOG_FOLDERS.contains(&folder)
}

/// True when `folder` is a service folder root.
#[must_use]
pub fn is_service_folder(folder: &str) -> bool {
    SERVICE_FOLDERS.contains(&folder)
}

/// True when `folder` is a custom rental catalog root.
#[must_use]
pub fn is_rental_folder(folder: &str) -> bool {
    RENTAL_FOLDERS.contains(&folder)
}

/// True when `folder` is a portfolio root.
#[must_use]
pub fn is_portfolio_folder(folder: &str) -> bool {
    PORTFOLIO_FOLDERS.contains(&folder)
}

/// True when `folder` is a utility root.
#[must_use]
pub fn is_utility_folder(folder: &str) -> bool {
    UTILITY_FOLDERS.contains(&folder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_sets_are_disjoint() {
        let sets: &[&[&str]] = &[
            LOCATION_FOLDERS,
            BLOG_FOLDERS,
            SERVICE_FOLDERS,
            RENTAL_FOLDERS,
            PORTFOLIO_FOLDERS,
            UTILITY_FOLDERS,
        ];
        let mut seen = std::collections::HashSet::new();
        for set in sets {
            for folder in *set {
                assert!(seen.insert(*folder), "folder {folder} appears in two sets");
            }
        }
    }

    #[test]
    fn known_roots_resolve() {
        assert!(is_location_folder("service-area"));
        assert!(is_blog_folder("blog"));
        assert!(is_service_folder("services"));
        assert!(is_rental_folder("rentals"));
        assert!(is_portfolio_folder("portfolio"));
        assert!(is_utility_folder("my-account"));
        assert!(!is_location_folder("shop"));
    }

    #[test]
    fn city_roots_are_locations_but_not_service_locations() {
        for folder in SERVICE_LOCATION_FOLDERS {
            assert!(
                is_location_folder(folder),
                "{folder} must stay a location root"
            );
        }
        assert!(is_location_folder("city"));
        assert!(is_location_folder("cities"));
        assert!(!is_service_location_folder("city"));
        assert!(!is_service_location_folder("cities"));
    }
}
