use castellan_catalog::{CatalogEntry, CatalogStore, FilterState, RevealController, Viewport, filter, visible_entries};
use castellan_kernel::prelude::{CategorySet, FilterCategory};
use proptest::prelude::*;
use proptest::sample::{select, subsequence};

fn catalogs() -> impl Strategy<Value = Vec<CatalogEntry>> {
    let entries = CatalogStore::castle().entries().to_vec();
    let len = entries.len();
    subsequence(entries, 0..=len)
}

fn category_sets() -> impl Strategy<Value = CategorySet> {
    any::<u8>().prop_map(CategorySet::from_bits_truncate)
}

fn queries() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        select(vec!["castle", "TOUR", "events", "suite", "a", " ", "picasso", "zzz"]).prop_map(str::to_owned),
        "[a-zA-Z ]{0,6}",
    ]
}

fn is_subsequence(sub: &[&CatalogEntry], full: &[&CatalogEntry]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|entry| rest.any(|candidate| candidate.title == entry.title))
}

proptest! {
    #[test]
    fn restricting_categories_never_adds_entries(catalog in catalogs(), active in category_sets(), q in queries()) {
        let restricted = filter(&catalog, active, &q);
        let unrestricted = filter(&catalog, CategorySet::empty(), &q);
        prop_assert!(is_subsequence(&restricted, &unrestricted));
    }

    #[test]
    fn adding_a_query_never_adds_entries(catalog in catalogs(), active in category_sets(), q in queries()) {
        let searched = filter(&catalog, active, &q);
        let unsearched = filter(&catalog, active, "");
        prop_assert!(is_subsequence(&searched, &unsearched));
    }

    #[test]
    fn filter_matches_both_predicates(catalog in catalogs(), active in category_sets(), q in queries()) {
        let needle = q.to_lowercase();
        let expected: Vec<&str> = catalog
            .iter()
            .filter(|e| active.is_empty() || e.categories.intersects(active))
            .filter(|e| e.title.to_lowercase().contains(&needle) || e.description.to_lowercase().contains(&needle))
            .map(|e| e.title)
            .collect();
        let actual: Vec<&str> = filter(&catalog, active, &q).iter().map(|e| e.title).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn toggle_is_an_involution(active in category_sets(), index in 0..FilterCategory::ALL.len()) {
        let mut state = FilterState::new(active, "");
        state.toggle(FilterCategory::ALL[index]);
        state.toggle(FilterCategory::ALL[index]);
        prop_assert_eq!(state.active_categories(), active);
    }

    #[test]
    fn reset_clears_categories_only(active in category_sets(), q in queries()) {
        let mut state = FilterState::new(active, q.clone());
        state.reset();
        prop_assert!(state.active_categories().is_empty());
        prop_assert_eq!(state.search_query(), q.as_str());
    }

    #[test]
    fn narrow_visible_len_is_min_of_reveal_and_len(len in 0usize..40, reveal in 0usize..50) {
        let filtered: Vec<usize> = (0..len).collect();
        prop_assert_eq!(visible_entries(&filtered, reveal, Viewport::Narrow).len(), reveal.min(len));
        prop_assert_eq!(visible_entries(&filtered, reveal, Viewport::Wide).len(), len);
    }

    #[test]
    fn advancing_strictly_grows_visible_until_exhausted(len in 0usize..40, steps in 0usize..20) {
        let filtered: Vec<usize> = (0..len).collect();
        let mut reveal = RevealController::default();
        for _ in 0..steps {
            let before = reveal.visible(&filtered, Viewport::Narrow).len();
            let advanced = reveal.advance(len);
            let after = reveal.visible(&filtered, Viewport::Narrow).len();
            prop_assert_eq!(advanced, before < len);
            if advanced {
                prop_assert!(after > before);
            } else {
                prop_assert_eq!(after, before);
            }
            prop_assert!(after <= len);
        }
    }
}
