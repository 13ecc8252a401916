/// Derived table view: filter, sort and paginate the fetched vessels
///
/// Everything here is a pure function of the source collection and a
/// [`ListQuery`]. The source slice is only ever borrowed.
use crate::domain::VesselSummary;
use std::cmp::Ordering;

/// Sortable table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Type,
    YearBuilt,
    /// Derived from the length of the mission list
    MissionCount,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Name,
            SortKey::Type,
            SortKey::YearBuilt,
            SortKey::MissionCount,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Type => "Type",
            SortKey::YearBuilt => "Year Built",
            SortKey::MissionCount => "Missions",
        }
    }

    /// Compare two vessels by this key, ascending
    pub fn compare(&self, a: &VesselSummary, b: &VesselSummary) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Type => a.vessel_type.cmp(&b.vessel_type),
            SortKey::YearBuilt => a.year_built.cmp(&b.year_built),
            SortKey::MissionCount => a.mission_count().cmp(&b.mission_count()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Search text, sort choice and page for one list screen activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    search: String,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
}

impl ListQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// 1-based page number
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the search text. Always returns to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.page = 1;
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.page = 1;
    }

    /// Same key flips the direction, a new key starts ascending. The page is kept.
    pub fn apply_sort(&mut self, key: SortKey) {
        self.sort = Some(match self.sort {
            Some(current) if current.key == key => SortSpec {
                key,
                direction: current.direction.flipped(),
            },
            _ => SortSpec {
                key,
                direction: SortDirection::Ascending,
            },
        });
    }

    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.page = clamp_page(page, total_pages);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.go_to_page(self.page.saturating_add(1), total_pages);
    }

    pub fn prev_page(&mut self, total_pages: usize) {
        self.go_to_page(self.page.saturating_sub(1), total_pages);
    }

    pub fn last_page(&mut self, total_pages: usize) {
        self.go_to_page(total_pages, total_pages);
    }
}

/// One page of the derived view
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub rows: Vec<&'a VesselSummary>,
    pub page: usize,
    pub total_pages: usize,
    /// Rows that passed the filter, across all pages
    pub matched: usize,
}

/// Keep vessels whose name contains `search`, ignoring case
pub fn filter_by_name<'a>(source: &'a [VesselSummary], search: &str) -> Vec<&'a VesselSummary> {
    if search.is_empty() {
        return source.iter().collect();
    }
    let needle = search.to_lowercase();
    source
        .iter()
        .filter(|v| v.name.to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort; ties keep their incoming order in both directions
pub fn sort_rows(rows: &mut [&VesselSummary], sort: Option<SortSpec>) {
    let Some(spec) = sort else {
        return;
    };
    rows.sort_by(|a, b| {
        let ord = spec.key.compare(a, b);
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

pub fn total_pages(rows: usize, page_size: usize) -> usize {
    rows.div_ceil(page_size.max(1))
}

/// Clamp a 1-based page into `1..=total_pages` (page 1 when there are none)
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Rows `[(page-1)*size, page*size)`, empty when out of range
pub fn page_slice<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(size).min(rows.len());
    let end = start.saturating_add(size).min(rows.len());
    &rows[start..end]
}

/// Run filter, sort and paginate for the current query
pub fn derive_view<'a>(source: &'a [VesselSummary], query: &ListQuery) -> PageView<'a> {
    let mut rows = filter_by_name(source, query.search());
    sort_rows(&mut rows, query.sort());

    let matched = rows.len();
    let total_pages = total_pages(matched, query.page_size());
    let page = clamp_page(query.page(), total_pages);
    let rows = page_slice(&rows, page, query.page_size()).to_vec();

    PageView {
        rows,
        page,
        total_pages,
        matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mission;
    use proptest::prelude::*;

    fn vessel(id: &str, name: &str) -> VesselSummary {
        VesselSummary {
            id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn with_missions(id: &str, count: usize) -> VesselSummary {
        VesselSummary {
            missions: (0..count)
                .map(|i| Mission {
                    name: format!("M{i}"),
                    flight: Some(i as u32),
                })
                .collect(),
            ..vessel(id, id)
        }
    }

    fn names(rows: &[&VesselSummary]) -> Vec<String> {
        rows.iter().map(|v| v.name.clone()).collect()
    }

    const NATO: [&str; 12] = [
        "Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel", "India",
        "Juliett", "Kilo", "Lima",
    ];

    #[test]
    fn test_twelve_records_page_size_ten() {
        let source: Vec<_> = NATO.iter().map(|n| vessel(n, n)).collect();
        let mut query = ListQuery::new(10);

        let first = derive_view(&source, &query);
        assert_eq!(first.total_pages, 2);
        assert_eq!(names(&first.rows), NATO[..10].to_vec());

        query.next_page(first.total_pages);
        let second = derive_view(&source, &query);
        assert_eq!(second.page, 2);
        assert_eq!(names(&second.rows), vec!["Kilo", "Lima"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let source = vec![vessel("1", "Alpha"), vessel("2", "Beta"), vessel("3", "Orion")];
        assert_eq!(names(&filter_by_name(&source, "a")), vec!["Alpha", "Beta"]);
        assert_eq!(names(&filter_by_name(&source, "ORI")), vec!["Orion"]);
    }

    #[test]
    fn test_sort_by_mission_count_ascending() {
        let source = vec![with_missions("three", 3), with_missions("zero", 0), with_missions("one", 1)];
        let mut query = ListQuery::new(10);
        query.apply_sort(SortKey::MissionCount);

        let view = derive_view(&source, &query);
        let counts: Vec<_> = view.rows.iter().map(|v| v.mission_count()).collect();
        assert_eq!(counts, vec![0, 1, 3]);
    }

    #[test]
    fn test_apply_sort_toggles_and_resets() {
        let mut query = ListQuery::new(10);
        query.apply_sort(SortKey::Name);
        assert_eq!(query.sort().unwrap().direction, SortDirection::Ascending);
        query.apply_sort(SortKey::Name);
        assert_eq!(query.sort().unwrap().direction, SortDirection::Descending);
        query.apply_sort(SortKey::YearBuilt);
        assert_eq!(
            query.sort(),
            Some(SortSpec {
                key: SortKey::YearBuilt,
                direction: SortDirection::Ascending
            })
        );
    }

    #[test]
    fn test_search_resets_page_but_sort_keeps_it() {
        let mut query = ListQuery::new(2);
        query.go_to_page(3, 5);
        query.apply_sort(SortKey::Type);
        assert_eq!(query.page(), 3);

        query.push_search_char('x');
        assert_eq!(query.page(), 1);

        query.go_to_page(2, 5);
        query.pop_search_char();
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_missing_year_sorts_first() {
        let mut old = vessel("old", "old");
        old.year_built = Some(1990);
        let unknown = vessel("unknown", "unknown");
        let source = vec![old, unknown];
        let mut rows = filter_by_name(&source, "");
        sort_rows(&mut rows, Some(SortSpec { key: SortKey::YearBuilt, direction: SortDirection::Ascending }));
        assert_eq!(names(&rows), vec!["unknown", "old"]);
    }

    #[test]
    fn test_page_is_clamped_after_filter_shrinks() {
        let source: Vec<_> = NATO.iter().map(|n| vessel(n, n)).collect();
        let mut query = ListQuery::new(5);
        query.go_to_page(3, 3);
        assert_eq!(query.page(), 3);

        // page 3 no longer exists once the source shrinks to four rows
        let view = derive_view(&source[..4], &query);
        assert_eq!(view.page, 1);
        assert_eq!(view.rows.len(), 4);
    }

    #[test]
    fn test_empty_collection_has_no_pages() {
        let query = ListQuery::new(10);
        let view = derive_view(&[], &query);
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.page, 1);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_page_navigation_is_bounded() {
        let mut query = ListQuery::new(10);
        query.prev_page(4);
        assert_eq!(query.page(), 1);
        query.last_page(4);
        assert_eq!(query.page(), 4);
        query.next_page(4);
        assert_eq!(query.page(), 4);
    }

    fn arb_vessels() -> impl Strategy<Value = Vec<VesselSummary>> {
        prop::collection::vec(("[a-cA-C]{0,4}", 0usize..4, prop::option::of(1990u32..1995)), 0..40)
            .prop_map(|specs| {
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (name, missions, year))| {
                        let mut v = with_missions(&i.to_string(), missions);
                        v.name = name;
                        v.year_built = year;
                        v
                    })
                    .collect()
            })
    }

    fn arb_key() -> impl Strategy<Value = SortKey> {
        prop::sample::select(SortKey::all().to_vec())
    }

    proptest! {
        #[test]
        fn test_filter_keeps_only_matches(source in arb_vessels(), search in "[a-cA-C]{0,2}") {
            let rows = filter_by_name(&source, &search);
            let needle = search.to_lowercase();
            for row in &rows {
                prop_assert!(row.name.to_lowercase().contains(&needle));
            }
            let expected = source.iter().filter(|v| v.name.to_lowercase().contains(&needle)).count();
            prop_assert_eq!(rows.len(), expected);
        }

        #[test]
        fn test_empty_search_is_identity(source in arb_vessels()) {
            let rows = filter_by_name(&source, "");
            let ids: Vec<_> = rows.iter().map(|v| v.id.clone()).collect();
            let expected: Vec<_> = source.iter().map(|v| v.id.clone()).collect();
            prop_assert_eq!(ids, expected);
        }

        #[test]
        fn test_sort_is_stable(source in arb_vessels(), key in arb_key(), descending in any::<bool>()) {
            let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
            let mut rows = filter_by_name(&source, "");
            sort_rows(&mut rows, Some(SortSpec { key, direction }));

            for pair in rows.windows(2) {
                let ord = key.compare(pair[0], pair[1]);
                match direction {
                    SortDirection::Ascending => { prop_assert_ne!(ord, Ordering::Greater); }
                    SortDirection::Descending => { prop_assert_ne!(ord, Ordering::Less); }
                }
                if ord == Ordering::Equal {
                    // ids are source indices
                    let a: usize = pair[0].id.parse().unwrap();
                    let b: usize = pair[1].id.parse().unwrap();
                    prop_assert!(a < b);
                }
            }
        }

        #[test]
        fn test_double_toggle_restores_ascending(source in arb_vessels(), key in arb_key()) {
            let mut once = ListQuery::new(1000);
            once.apply_sort(key);

            let mut thrice = ListQuery::new(1000);
            thrice.apply_sort(key);
            thrice.apply_sort(key);
            thrice.apply_sort(key);

            let a: Vec<_> = derive_view(&source, &once).rows.iter().map(|v| v.id.clone()).collect();
            let b: Vec<_> = derive_view(&source, &thrice).rows.iter().map(|v| v.id.clone()).collect();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn test_pages_reconstruct_sorted_collection(
            source in arb_vessels(),
            key in arb_key(),
            page_size in 1usize..8,
            search in "[a-c]{0,1}",
        ) {
            let mut query = ListQuery::new(page_size);
            query.set_search(search.clone());
            query.apply_sort(key);

            let mut expected = filter_by_name(&source, &search);
            sort_rows(&mut expected, query.sort());
            let total = total_pages(expected.len(), page_size);
            prop_assert_eq!(total, expected.len().div_ceil(page_size));

            let mut rebuilt = Vec::new();
            for page in 1..=total {
                query.go_to_page(page, total);
                let view = derive_view(&source, &query);
                prop_assert_eq!(view.total_pages, total);
                prop_assert!(!view.rows.is_empty());
                rebuilt.extend(view.rows.iter().map(|v| v.id.clone()));
            }
            let expected: Vec<_> = expected.iter().map(|v| v.id.clone()).collect();
            prop_assert_eq!(rebuilt, expected);
        }

        #[test]
        fn test_search_always_resets_page(page in 1usize..50, c in any::<char>()) {
            let mut query = ListQuery::new(3);
            query.go_to_page(page, 50);
            query.push_search_char(c);
            prop_assert_eq!(query.page(), 1);
        }
    }
}
