// src/storage/roster.rs
use std::collections::{BTreeSet, HashSet};

use crate::config::RosterRules;
use crate::lookup;
use crate::models::player::{merge_enrichment, EnrichmentPatch, PlayerRecord, RosterStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Real,
    Bots,
    Gm,
}

impl TypeFilter {
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg.to_lowercase().as_str() {
            "all" => Some(Self::All),
            "real" => Some(Self::Real),
            "bots" => Some(Self::Bots),
            "gm" => Some(Self::Gm),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Name,
    Level,
    Race,
    Class,
    Map,
    Zone,
    Account,
}

impl SortColumn {
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg.to_lowercase().as_str() {
            "name" => Some(Self::Name),
            "level" => Some(Self::Level),
            "race" => Some(Self::Race),
            "class" => Some(Self::Class),
            "map" => Some(Self::Map),
            "zone" => Some(Self::Zone),
            "account" => Some(Self::Account),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RosterFilterState {
    pub search_text: String,
    pub type_filter: TypeFilter,
    pub map_filter: Option<i64>,
    pub sort_column: SortColumn,
    pub sort_ascending: bool,
    pub page: usize,
    pub page_size: usize,
}

impl Default for RosterFilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            type_filter: TypeFilter::All,
            map_filter: None,
            sort_column: SortColumn::Name,
            sort_ascending: true,
            page: 1,
            page_size: 25,
        }
    }
}

/// In-memory roster with a derived, always-consistent view. Single writer:
/// every mutation goes through `&mut self` and reruns the same
/// filter-sort-clamp pipeline, so the view can never be half-updated.
pub struct RosterView {
    all: Vec<PlayerRecord>,
    filtered: Vec<usize>,
    state: RosterFilterState,
    rules: RosterRules,
}

impl RosterView {
    pub fn new(rules: RosterRules) -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            state: RosterFilterState::default(),
            rules,
        }
    }

    pub fn rules(&self) -> &RosterRules {
        &self.rules
    }

    pub fn state(&self) -> &RosterFilterState {
        &self.state
    }

    pub fn total(&self) -> usize {
        self.all.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn page(&self) -> usize {
        self.state.page
    }

    pub fn page_count(&self) -> usize {
        if self.state.page_size == 0 || self.filtered.is_empty() {
            return 1;
        }
        (self.filtered.len() + self.state.page_size - 1) / self.state.page_size
    }

    /// Records visible on the current page, in view order.
    pub fn page_records(&self) -> Vec<&PlayerRecord> {
        if self.state.page_size == 0 {
            return self.filtered.iter().map(|&i| &self.all[i]).collect();
        }
        let start = (self.state.page - 1) * self.state.page_size;
        self.filtered
            .iter()
            .skip(start)
            .take(self.state.page_size)
            .map(|&i| &self.all[i])
            .collect()
    }

    /// Replaces the roster wholesale with a fresh server snapshot.
    pub fn ingest(&mut self, records: Vec<PlayerRecord>) {
        self.all = records;
        self.state.page = 1;
        self.recompute();
    }

    pub fn clear(&mut self) {
        self.all.clear();
        self.state.page = 1;
        self.recompute();
    }

    pub fn set_search(&mut self, text: &str) {
        self.state.search_text = text.to_string();
        self.state.page = 1;
        self.recompute();
    }

    pub fn set_type_filter(&mut self, filter: TypeFilter) {
        self.state.type_filter = filter;
        self.state.page = 1;
        self.recompute();
    }

    pub fn set_map_filter(&mut self, map_id: Option<i64>) {
        self.state.map_filter = map_id;
        self.state.page = 1;
        self.recompute();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.state.page_size = page_size;
        self.state.page = 1;
        self.recompute();
    }

    /// Same column toggles direction; a new column starts ascending. The
    /// current page is kept.
    pub fn set_sort(&mut self, column: SortColumn) {
        if self.state.sort_column == column {
            self.state.sort_ascending = !self.state.sort_ascending;
        } else {
            self.state.sort_column = column;
            self.state.sort_ascending = true;
        }
        self.recompute();
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.page = page;
        self.clamp_page();
    }

    pub fn first_page(&mut self) {
        self.state.page = 1;
    }

    pub fn prev_page(&mut self) {
        if self.state.page > 1 {
            self.state.page -= 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.state.page < self.page_count() {
            self.state.page += 1;
        }
    }

    pub fn last_page(&mut self) {
        self.state.page = self.page_count();
    }

    /// Merges a pinfo patch into the named record and reruns the pipeline,
    /// since enrichment can change what a search or sort sees. Returns false
    /// when the player is no longer in the roster.
    pub fn apply_enrichment(&mut self, name: &str, patch: &EnrichmentPatch) -> bool {
        let pos = match self.all.iter().position(|p| p.name == name) {
            Some(pos) => pos,
            None => return false,
        };
        let merged = merge_enrichment(&self.all[pos], patch);
        self.all[pos] = merged;
        self.recompute();
        true
    }

    /// Counts over the whole roster, not the filtered view.
    pub fn stats(&self) -> RosterStats {
        let bots = self.all.iter().filter(|p| p.is_bot).count();
        let accounts = self
            .all
            .iter()
            .map(|p| p.account.as_str())
            .collect::<HashSet<_>>()
            .len();
        RosterStats {
            total: self.all.len(),
            real: self.all.len() - bots,
            bots,
            accounts,
        }
    }

    /// Distinct map ids present in the roster, ascending, with names.
    pub fn map_options(&self) -> Vec<(i64, String)> {
        let ids: BTreeSet<i64> = self.all.iter().map(|p| p.map_id).collect();
        ids.into_iter().map(|id| (id, lookup::map_name(id))).collect()
    }

    fn recompute(&mut self) {
        let needle = self.state.search_text.to_lowercase();
        let state = &self.state;
        let rules = &self.rules;
        let indices: Vec<usize> = self
            .all
            .iter()
            .enumerate()
            .filter(|(_, p)| record_matches(state, rules, &needle, p))
            .map(|(i, _)| i)
            .collect();
        self.filtered = indices;
        self.sort_filtered();
        self.clamp_page();
    }

    fn sort_filtered(&mut self) {
        let all = &self.all;
        let column = self.state.sort_column;
        let ascending = self.state.sort_ascending;
        // Stable sort; equal keys keep roster order in both directions.
        self.filtered.sort_by(|&a, &b| {
            let pa = &all[a];
            let pb = &all[b];
            let ord = match column {
                SortColumn::Name => pa.name.to_lowercase().cmp(&pb.name.to_lowercase()),
                SortColumn::Level => level_value(pa).cmp(&level_value(pb)),
                SortColumn::Race => pa.race.to_lowercase().cmp(&pb.race.to_lowercase()),
                SortColumn::Class => {
                    pa.class_name.to_lowercase().cmp(&pb.class_name.to_lowercase())
                }
                SortColumn::Map => pa.map_name.to_lowercase().cmp(&pb.map_name.to_lowercase()),
                SortColumn::Zone => pa.zone_name.to_lowercase().cmp(&pb.zone_name.to_lowercase()),
                SortColumn::Account => pa.account.to_lowercase().cmp(&pb.account.to_lowercase()),
            };
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }

    fn clamp_page(&mut self) {
        let count = self.page_count();
        if self.state.page > count {
            self.state.page = count;
        }
        if self.state.page < 1 {
            self.state.page = 1;
        }
    }
}

fn level_value(p: &PlayerRecord) -> i64 {
    p.level.parse().unwrap_or(0)
}

fn record_matches(
    state: &RosterFilterState,
    rules: &RosterRules,
    needle: &str,
    p: &PlayerRecord,
) -> bool {
    match state.type_filter {
        TypeFilter::All => {}
        TypeFilter::Real => {
            if p.is_bot {
                return false;
            }
        }
        TypeFilter::Bots => {
            if !p.is_bot {
                return false;
            }
        }
        TypeFilter::Gm => {
            if !rules.is_gm(p.gm_level) {
                return false;
            }
        }
    }

    if let Some(map_id) = state.map_filter {
        if p.map_id != map_id {
            return false;
        }
    }

    if !needle.is_empty() {
        let haystack = [
            p.name.as_str(),
            p.account.as_str(),
            p.ip.as_str(),
            p.map_name.as_str(),
            p.zone_name.as_str(),
            p.level.as_str(),
            p.race.as_str(),
            p.class_name.as_str(),
        ]
        .join(" ")
        .to_lowercase();
        if !haystack.contains(needle) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::RaceClass;

    fn record(name: &str, account: &str, map_id: i64, zone_id: i64, gm: i64) -> PlayerRecord {
        let rules = RosterRules::default();
        PlayerRecord {
            account: account.to_string(),
            name: name.to_string(),
            ip: "1.2.3.4".to_string(),
            map_id,
            zone_id,
            expansion_id: 2,
            gm_level: gm,
            is_bot: rules.is_bot_account(account),
            map_name: lookup::map_name(map_id),
            zone_name: lookup::zone_name(zone_id),
            level: String::new(),
            race: String::new(),
            class_name: String::new(),
            race_id: 0,
            class_id: 0,
        }
    }

    fn fixture() -> Vec<PlayerRecord> {
        vec![
            record("Zelda", "acct1", 0, 12, 0),
            record("Alpha", "acct2", 1, 14, 0),
            record("Botone", "RNDBOT0001", 1, 1, 0),
            record("Bottwo", "RNDBOT0002", 0, 12, 0),
            record("Gamma", "acct1", 530, 3483, 3),
        ]
    }

    fn view() -> RosterView {
        let mut view = RosterView::new(RosterRules::default());
        view.ingest(fixture());
        view
    }

    fn names(view: &RosterView) -> Vec<String> {
        view.page_records().iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_default_view_sorted_by_name() {
        let view = view();
        assert_eq!(names(&view), ["Alpha", "Botone", "Bottwo", "Gamma", "Zelda"]);
        assert_eq!(view.total(), 5);
        assert_eq!(view.filtered_count(), 5);
        assert_eq!(view.page(), 1);
        assert_eq!(view.page_count(), 1);
    }

    #[test]
    fn test_type_filters() {
        let mut view = view();
        view.set_type_filter(TypeFilter::Real);
        assert_eq!(names(&view), ["Alpha", "Gamma", "Zelda"]);

        view.set_type_filter(TypeFilter::Bots);
        assert_eq!(names(&view), ["Botone", "Bottwo"]);

        view.set_type_filter(TypeFilter::Gm);
        assert_eq!(names(&view), ["Gamma"]);

        view.set_type_filter(TypeFilter::All);
        assert_eq!(view.filtered_count(), 5);
    }

    #[test]
    fn test_gm_filter_honors_threshold() {
        let mut records = fixture();
        records.push(record("Midge", "acct3", 0, 12, 1));
        let mut view = RosterView::new(RosterRules {
            bot_prefix: "RNDBOT".to_string(),
            gm_level_min: 2,
        });
        view.ingest(records);
        view.set_type_filter(TypeFilter::Gm);
        assert_eq!(names(&view), ["Gamma"]);
    }

    #[test]
    fn test_map_filter_and_combination() {
        let mut view = view();
        view.set_map_filter(Some(1));
        assert_eq!(names(&view), ["Alpha", "Botone"]);

        view.set_type_filter(TypeFilter::Real);
        assert_eq!(names(&view), ["Alpha"]);

        view.set_map_filter(None);
        assert_eq!(names(&view), ["Alpha", "Gamma", "Zelda"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let mut view = view();
        view.set_search("ELWYNN");
        assert_eq!(names(&view), ["Bottwo", "Zelda"]);

        view.set_search("acct1");
        assert_eq!(names(&view), ["Gamma", "Zelda"]);

        view.set_search("no such thing");
        assert!(names(&view).is_empty());
        assert_eq!(view.page_count(), 1);
    }

    #[test]
    fn test_filter_is_subset_and_idempotent() {
        let mut view = view();
        view.set_type_filter(TypeFilter::Bots);
        let first = names(&view);
        for p in view.page_records() {
            assert!(p.is_bot);
        }
        view.set_type_filter(TypeFilter::Bots);
        assert_eq!(names(&view), first);
        assert!(view.filtered_count() <= view.total());
    }

    #[test]
    fn test_sort_toggle_direction() {
        let mut view = view();
        view.set_sort(SortColumn::Name);
        assert_eq!(names(&view), ["Zelda", "Gamma", "Bottwo", "Botone", "Alpha"]);
        view.set_sort(SortColumn::Name);
        assert_eq!(names(&view), ["Alpha", "Botone", "Bottwo", "Gamma", "Zelda"]);
    }

    #[test]
    fn test_sort_switch_column_resets_ascending() {
        let mut view = view();
        view.set_sort(SortColumn::Name);
        assert!(!view.state().sort_ascending);
        view.set_sort(SortColumn::Account);
        assert!(view.state().sort_ascending);
        assert_eq!(view.state().sort_column, SortColumn::Account);
    }

    #[test]
    fn test_level_sort_is_numeric_with_blank_as_zero() {
        let mut view = view();
        view.set_sort(SortColumn::Level);
        let patch = |lvl: &str| EnrichmentPatch {
            level: Some(lvl.to_string()),
            race_class: None,
        };
        assert!(view.apply_enrichment("Zelda", &patch("9")));
        assert!(view.apply_enrichment("Gamma", &patch("80")));
        // Blanks parse as 0 and keep their ingest order as ties.
        assert_eq!(names(&view), ["Alpha", "Botone", "Bottwo", "Zelda", "Gamma"]);

        view.set_sort(SortColumn::Level);
        assert_eq!(names(&view), ["Gamma", "Zelda", "Alpha", "Botone", "Bottwo"]);
    }

    #[test]
    fn test_enrichment_feeds_search() {
        let mut view = view();
        let patch = EnrichmentPatch {
            level: Some("80".to_string()),
            race_class: Some(RaceClass {
                race: "Night Elf".to_string(),
                class_name: "Druid".to_string(),
                race_id: 4,
                class_id: 11,
            }),
        };
        assert!(view.apply_enrichment("Zelda", &patch));
        view.set_search("druid");
        assert_eq!(names(&view), ["Zelda"]);
    }

    #[test]
    fn test_enrichment_unknown_player() {
        let mut view = view();
        assert!(!view.apply_enrichment("Nobody", &EnrichmentPatch::default()));
    }

    #[test]
    fn test_pagination_window_and_bounds() {
        let mut view = view();
        view.set_page_size(2);
        assert_eq!(view.page_count(), 3);
        assert_eq!(names(&view), ["Alpha", "Botone"]);

        view.next_page();
        assert_eq!(names(&view), ["Bottwo", "Gamma"]);

        view.next_page();
        assert_eq!(names(&view), ["Zelda"]);

        // At the last page next is a no-op.
        view.next_page();
        assert_eq!(view.page(), 3);
        assert_eq!(names(&view), ["Zelda"]);

        view.first_page();
        assert_eq!(view.page(), 1);
        view.prev_page();
        assert_eq!(view.page(), 1);

        view.last_page();
        assert_eq!(view.page(), 3);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut view = view();
        view.set_page_size(2);
        view.set_page(99);
        assert_eq!(view.page(), 3);
        view.set_page(0);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_page_size_zero_shows_everything() {
        let mut view = view();
        view.set_page_size(0);
        assert_eq!(view.page_count(), 1);
        assert_eq!(view.page(), 1);
        assert_eq!(names(&view).len(), 5);
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut view = view();
        view.set_page_size(2);
        view.last_page();
        assert_eq!(view.page(), 3);

        view.set_type_filter(TypeFilter::Real);
        assert_eq!(view.page(), 1);

        view.last_page();
        view.set_search("a");
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut view = view();
        view.set_page_size(2);
        view.next_page();
        assert_eq!(view.page(), 2);
        view.set_page_size(3);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_sort_keeps_page() {
        let mut view = view();
        view.set_page_size(2);
        view.next_page();
        assert_eq!(view.page(), 2);
        view.set_sort(SortColumn::Account);
        assert_eq!(view.page(), 2);
    }

    #[test]
    fn test_ingest_resets_page_and_replaces() {
        let mut view = view();
        view.set_page_size(2);
        view.last_page();
        view.ingest(vec![record("Solo", "acct9", 0, 12, 0)]);
        assert_eq!(view.page(), 1);
        assert_eq!(view.total(), 1);
        assert_eq!(names(&view), ["Solo"]);
    }

    #[test]
    fn test_clear_empties_view() {
        let mut view = view();
        view.clear();
        assert_eq!(view.total(), 0);
        assert_eq!(view.filtered_count(), 0);
        assert!(view.page_records().is_empty());
        assert_eq!(view.page_count(), 1);
    }

    #[test]
    fn test_stats_count_whole_roster() {
        let mut view = view();
        let stats = view.stats();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.real, 3);
        assert_eq!(stats.bots, 2);
        assert_eq!(stats.accounts, 4);

        // Stats ignore the active filter.
        view.set_type_filter(TypeFilter::Bots);
        assert_eq!(view.stats().total, 5);
    }

    #[test]
    fn test_map_options_sorted_unique() {
        let view = view();
        assert_eq!(
            view.map_options(),
            vec![
                (0, "Eastern Kingdoms".to_string()),
                (1, "Kalimdor".to_string()),
                (530, "Outland".to_string()),
            ]
        );
    }

    #[test]
    fn test_type_filter_from_arg() {
        assert_eq!(TypeFilter::from_arg("Bots"), Some(TypeFilter::Bots));
        assert_eq!(TypeFilter::from_arg("GM"), Some(TypeFilter::Gm));
        assert_eq!(TypeFilter::from_arg("nope"), None);
    }

    #[test]
    fn test_sort_column_from_arg() {
        assert_eq!(SortColumn::from_arg("zone"), Some(SortColumn::Zone));
        assert_eq!(SortColumn::from_arg("Level"), Some(SortColumn::Level));
        assert_eq!(SortColumn::from_arg("height"), None);
    }
}
