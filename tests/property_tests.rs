//! Property tests for the universal invariants of the pipeline.

use cannibalscope::core::config::PipelineConfig;
use cannibalscope::phases::cluster::run_cluster;
use cannibalscope::phases::ingest::{classify_page, run_ingest};
use cannibalscope::phases::safe_pairs::{is_safe_pair, run_safe_pairs};
use cannibalscope::phases::static_detect::run_static_detect;
use cannibalscope::phases::traffic::group_rows_by_query;
use cannibalscope::prelude::*;
use cannibalscope::url::legacy::strip_legacy_suffix;
use cannibalscope::url::normalize::normalize_full_url;
use cannibalscope::url::tokens::{extract_slug_tokens, slug_similarity};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("shop".to_string()),
        Just("services".to_string()),
        Just("locations".to_string()),
        Just("blog".to_string()),
        Just("product-category".to_string()),
        Just("cart".to_string()),
        "[a-z]{3,10}",
        "[a-z]{3,8}-[a-z]{3,8}",
        "[a-z]{3,8}-old",
        "[a-z]{3,8}-2",
    ]
}

fn path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 0..4)
        .prop_map(|segments| format!("/{}/", segments.join("/")).replace("//", "/"))
}

fn page_from_path(id: u64, path: &str, post_type: Option<&str>, is_homepage: bool) -> Page {
    Page {
        id,
        url: format!("https://example.com{path}"),
        title: format!("Title {id}"),
        status: "publish".to_string(),
        is_homepage,
        post_type: post_type.map(str::to_string),
        ..Page::default()
    }
}

fn site() -> impl Strategy<Value = Vec<Page>> {
    prop::collection::vec(
        (
            path(),
            prop::option::of(prop_oneof![
                Just("product".to_string()),
                Just("product_cat".to_string()),
                Just("page".to_string()),
            ]),
            any::<bool>(),
        ),
        1..20,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (path, post_type, is_homepage))| {
                page_from_path(i as u64 + 1, &path, post_type.as_deref(), is_homepage)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn full_url_normalization_is_idempotent(
        host in "[a-z]{2,10}\\.(com|org)",
        raw_path in path(),
        query in prop::option::of("[a-z]{1,8}=[a-z0-9]{1,8}"),
        with_www in any::<bool>(),
    ) {
        let www = if with_www { "www." } else { "" };
        let query = query.map(|q| format!("?{q}")).unwrap_or_default();
        let url = format!("https://{www}{host}{raw_path}{query}");
        let once = normalize_full_url(&url);
        prop_assert_eq!(normalize_full_url(&once), once);
    }

    #[test]
    fn legacy_strip_reaches_a_fixpoint(raw_path in path()) {
        let once = strip_legacy_suffix(&raw_path);
        prop_assert_eq!(strip_legacy_suffix(&once), once);
    }

    #[test]
    fn jaccard_similarity_is_bounded(a in path(), b in path()) {
        let similarity = slug_similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&similarity));
    }

    #[test]
    fn self_similarity_is_one_when_tokens_exist(a in path()) {
        let similarity = slug_similarity(&a, &a);
        if extract_slug_tokens(&a, true).is_empty() {
            prop_assert!(similarity.abs() < f64::EPSILON);
        } else {
            prop_assert!((similarity - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn safe_pairs_are_symmetric(pages in site()) {
        let config = PipelineConfig::default();
        let classifications: Vec<Classification> =
            pages.iter().filter_map(classify_page).collect();
        for a in &classifications {
            for b in &classifications {
                prop_assert_eq!(
                    is_safe_pair(a, b, &config),
                    is_safe_pair(b, a, &config),
                    "asymmetry for {} / {}",
                    a.normalized_path,
                    b.normalized_path
                );
            }
        }
    }

    #[test]
    fn classification_ignores_reporting_metadata(
        raw_path in path(),
        title in "[A-Za-z ]{0,20}",
        word_count in prop::option::of(0u32..5000),
    ) {
        let bare = page_from_path(1, &raw_path, None, false);
        let decorated = Page {
            title,
            word_count,
            h1: Some("Heading".to_string()),
            ..bare.clone()
        };
        let bare_type = classify_page(&bare).map(|c| c.classified_type);
        let decorated_type = classify_page(&decorated).map(|c| c.classified_type);
        prop_assert_eq!(bare_type, decorated_type);
    }

    #[test]
    fn impression_shares_sum_to_at_most_one(
        impressions in prop::collection::vec(20u64..5000, 1..8),
        clicks in prop::collection::vec(0u64..50, 8),
    ) {
        let config = PipelineConfig::default();
        let pages: Vec<Page> = (0..impressions.len())
            .map(|i| page_from_path(i as u64 + 1, &format!("/topic-{i}/"), None, false))
            .collect();
        let classifications = run_ingest(&pages);
        let rows: Vec<TrafficRow> = impressions
            .iter()
            .zip(&clicks)
            .enumerate()
            .map(|(i, (imp, clk))| TrafficRow {
                query: "shared query".to_string(),
                page_url: format!("https://example.com/topic-{i}/"),
                clicks: *clk,
                impressions: *imp,
                position: 4.0,
            })
            .collect();
        let groups = group_rows_by_query(&classifications, &rows, None, None, &config);
        for rows in groups.values() {
            let noise_floor = config.traffic.noise_share_floor;
            let surviving: f64 = rows
                .iter()
                .filter(|row| row.share >= noise_floor || row.clicks > 0)
                .map(|row| row.share)
                .sum();
            prop_assert!(surviving > 0.0);
            prop_assert!(surviving <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn clusters_respect_cap_and_sort_order(pages in site()) {
        let config = PipelineConfig::default();
        let classifications = run_ingest(&pages);
        let safe = run_safe_pairs(&classifications, &config);
        let issues = run_static_detect(&classifications, &safe, &config);
        let clusters = run_cluster(&issues, &classifications, &config);

        for cluster in &clusters {
            prop_assert!(cluster.page_count <= config.cluster.max_cluster_size);
            prop_assert!(cluster.priority_score <= 100);
        }
        for window in clusters.windows(2) {
            let (a, b) = (&window[0], &window[1]);
            prop_assert!(a.bucket.rank() <= b.bucket.rank());
            if a.bucket == b.bucket {
                prop_assert!(a.priority_score >= b.priority_score);
            }
        }
    }

    #[test]
    fn static_pipeline_is_deterministic(pages in site()) {
        let config = PipelineConfig::default();
        let run = |pages: &[Page]| {
            let classifications = run_ingest(pages);
            let safe = run_safe_pairs(&classifications, &config);
            let issues = run_static_detect(&classifications, &safe, &config);
            run_cluster(&issues, &classifications, &config)
        };
        let first = serde_json::to_string(&run(&pages)).expect("serialize");
        let second = serde_json::to_string(&run(&pages)).expect("serialize");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn no_static_cluster_is_exactly_a_safe_pair(pages in site()) {
        let config = PipelineConfig::default();
        let classifications = run_ingest(&pages);
        let safe = run_safe_pairs(&classifications, &config);
        let issues = run_static_detect(&classifications, &safe, &config);
        let clusters = run_cluster(&issues, &classifications, &config);
        let suppressed_families = [
            ConflictType::NearDuplicateContent,
            ConflictType::TaxonomyClash,
            ConflictType::ContextDuplicate,
            ConflictType::LocationBoilerplate,
        ];
        for cluster in &clusters {
            if suppressed_families.contains(&cluster.conflict_type) && cluster.pages.len() == 2 {
                let key = (cluster.pages[0].page_id, cluster.pages[1].page_id);
                prop_assert!(
                    !safe.contains(&key),
                    "cluster {} covers safe pair {key:?}",
                    cluster.cluster_key
                );
            }
        }
    }
}
