//! The view pipeline — filter → sort → paginate.
//!
//! Pure functions over `(records, ViewState)`, recomputed in full on
//! every control change. No terminal coupling here, so the whole
//! pipeline is unit-testable without a UI harness.

use crate::model::ProxyRecord;

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Ip,
    Port,
    Protocol,
    Country,
    Latency,
    Status,
    Speed,
    Anonymity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Latency range selector. A record with no latency fails every bucket
/// but passes when no bucket is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyBucket {
    Under100,
    From100To300,
    From300To600,
    Over600,
}

impl LatencyBucket {
    pub const ALL: [LatencyBucket; 4] = [
        LatencyBucket::Under100,
        LatencyBucket::From100To300,
        LatencyBucket::From300To600,
        LatencyBucket::Over600,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LatencyBucket::Under100 => "0-100 ms",
            LatencyBucket::From100To300 => "100-300 ms",
            LatencyBucket::From300To600 => "300-600 ms",
            LatencyBucket::Over600 => "600+ ms",
        }
    }

    pub fn matches(self, latency_ms: Option<f64>) -> bool {
        let Some(ms) = latency_ms else {
            return false;
        };
        match self {
            LatencyBucket::Under100 => ms <= 100.0,
            LatencyBucket::From100To300 => ms > 100.0 && ms <= 300.0,
            LatencyBucket::From300To600 => ms > 300.0 && ms <= 600.0,
            LatencyBucket::Over600 => ms > 600.0,
        }
    }
}

/// Active filter values. `None` / empty query means "no constraint".
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub protocol: Option<String>,
    pub country: Option<String>,
    pub anonymity: Option<String>,
    pub speed: Option<String>,
    pub latency_bucket: Option<LatencyBucket>,
    /// Free-text IP substring, case-folded containment.
    pub query: String,
    /// When set, inactive/dead records pass the status predicate too.
    pub include_inactive: bool,
}

impl Filters {
    /// True iff the record passes every active predicate.
    pub fn matches(&self, rec: &ProxyRecord) -> bool {
        if !self.include_inactive && !rec.is_active() {
            return false;
        }
        if !self.query.is_empty()
            && !rec.ip.to_lowercase().contains(&self.query.to_lowercase())
        {
            return false;
        }
        if let Some(protocol) = &self.protocol {
            if &rec.protocol != protocol {
                return false;
            }
        }
        if let Some(country) = &self.country {
            if &rec.country != country {
                return false;
            }
        }
        if let Some(anonymity) = &self.anonymity {
            if rec.anonymity.as_deref() != Some(anonymity.as_str()) {
                return false;
            }
        }
        if let Some(speed) = &self.speed {
            if rec.effective_speed() != speed {
                return false;
            }
        }
        if let Some(bucket) = self.latency_bucket {
            if !bucket.matches(rec.latency_ms) {
                return false;
            }
        }
        true
    }

    pub fn clear(&mut self) {
        *self = Filters {
            include_inactive: self.include_inactive,
            ..Filters::default()
        };
    }
}

/// The passed-around UI state — sort, page, filters. Never persisted.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub sort_key: SortKey,
    pub sort_dir: SortDirection,
    /// 1-based; always clamped to `[1, total_pages]`.
    pub page: usize,
    pub page_size: usize,
    pub filters: Filters,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sort_key: SortKey::Latency,
            sort_dir: SortDirection::Asc,
            page: 1,
            page_size: 15,
            filters: Filters::default(),
        }
    }
}

impl ViewState {
    /// Column-header click semantics: same key toggles direction,
    /// a new key resets to ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_dir = self.sort_dir.flipped();
        } else {
            self.sort_key = key;
            self.sort_dir = SortDirection::Asc;
        }
    }
}

/// A comparator operand: numeric when the column is numeric, otherwise
/// a case-folded string. Missing values are nullish — zero or empty
/// per the branch taken.
enum SortValue {
    Num(f64),
    Str(String),
}

fn sort_value(rec: &ProxyRecord, key: SortKey) -> SortValue {
    match key {
        SortKey::Ip => SortValue::Str(rec.ip.to_lowercase()),
        SortKey::Port => SortValue::Num(rec.port.map(f64::from).unwrap_or(0.0)),
        SortKey::Protocol => SortValue::Str(rec.protocol.to_lowercase()),
        SortKey::Country => SortValue::Str(rec.country.to_lowercase()),
        SortKey::Latency => SortValue::Num(rec.latency_ms.unwrap_or(0.0)),
        SortKey::Status => SortValue::Str(rec.status.to_lowercase()),
        SortKey::Speed => SortValue::Str(rec.effective_speed().to_lowercase()),
        SortKey::Anonymity => {
            SortValue::Str(rec.anonymity.as_deref().unwrap_or("").to_lowercase())
        }
    }
}

fn compare(a: &ProxyRecord, b: &ProxyRecord, key: SortKey) -> std::cmp::Ordering {
    match (sort_value(a, key), sort_value(b, key)) {
        (SortValue::Num(x), SortValue::Num(y)) => {
            x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal)
        }
        (SortValue::Str(x), SortValue::Str(y)) => x.cmp(&y),
        // Mixed operands cannot occur: the extractor is uniform per key.
        _ => std::cmp::Ordering::Equal,
    }
}

/// Keep the records passing every active predicate, in input order.
pub fn filter(records: &[ProxyRecord], filters: &Filters) -> Vec<ProxyRecord> {
    records.iter().filter(|r| filters.matches(r)).cloned().collect()
}

/// Order records by `key`; `Desc` reverses the comparator.
pub fn sort(records: &mut [ProxyRecord], key: SortKey, dir: SortDirection) {
    records.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match dir {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// `max(1, ceil(len / page_size))` — at least one page even when empty.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested 1-based page into `[1, total_pages]`.
pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(len, page_size))
}

/// The slice of `records` visible on `page` (clamped first).
pub fn page_slice(records: &[ProxyRecord], page_size: usize, page: usize) -> &[ProxyRecord] {
    let page = clamp_page(page, records.len(), page_size);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(records.len());
    &records[start..end]
}

/// Distinct non-empty values for a filter dropdown, sorted.
pub fn distinct_options<F>(records: &[ProxyRecord], extract: F) -> Vec<String>
where
    F: Fn(&ProxyRecord) -> Option<&str>,
{
    let mut values: Vec<String> = records
        .iter()
        .filter_map(|r| extract(r))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    values.sort();
    values.dedup();
    values
}

/// Summary figures over the full record set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    /// Mean over records that actually carry a latency.
    pub avg_latency_ms: f64,
    /// active / total, as a percentage.
    pub success_rate: f64,
}

impl Stats {
    pub fn compute(records: &[ProxyRecord]) -> Self {
        let total = records.len();
        let active = records.iter().filter(|r| r.is_active()).count();
        let latencies: Vec<f64> = records.iter().filter_map(|r| r.latency_ms).collect();
        let avg_latency_ms = if latencies.is_empty() {
            0.0
        } else {
            latencies.iter().sum::<f64>() / latencies.len() as f64
        };
        let success_rate = if total == 0 {
            0.0
        } else {
            active as f64 / total as f64 * 100.0
        };
        Self {
            total,
            active,
            avg_latency_ms,
            success_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(ip: &str, latency: Option<f64>) -> ProxyRecord {
        ProxyRecord {
            ip: ip.into(),
            port: None,
            protocol: "HTTP".into(),
            country: "US".into(),
            latency_ms: latency,
            status: "Active".into(),
            anonymity: None,
            speed_category: None,
        }
    }

    fn sample() -> Vec<ProxyRecord> {
        let mut a = rec("1.1.1.1", Some(50.0));
        a.country = "US".into();
        let mut b = rec("2.2.2.2", Some(10.0));
        b.country = "DE".into();
        b.protocol = "SOCKS5".into();
        let mut c = rec("10.0.0.1", Some(700.0));
        c.status = "Inactive".into();
        vec![a, b, c]
    }

    #[test]
    fn filter_is_narrowing() {
        let records = sample();
        let mut filters = Filters {
            include_inactive: true,
            ..Filters::default()
        };
        let all = filter(&records, &filters);
        assert_eq!(all.len(), records.len());

        // Each added constraint never grows the result.
        filters.protocol = Some("HTTP".into());
        let narrowed = filter(&records, &filters);
        assert!(narrowed.len() <= all.len());
        filters.country = Some("US".into());
        let narrower = filter(&records, &filters);
        assert!(narrower.len() <= narrowed.len());
        assert!(narrower.iter().all(|r| records.contains(r)));
    }

    #[test]
    fn country_filter_exact_match() {
        let records = sample();
        let filters = Filters {
            country: Some("US".into()),
            ..Filters::default()
        };
        let out = filter(&records, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].ip, "1.1.1.1");
    }

    #[test]
    fn search_is_casefolded_substring() {
        let records = sample();
        let filters = Filters {
            query: "10.".into(),
            include_inactive: true,
            ..Filters::default()
        };
        let out = filter(&records, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].ip, "10.0.0.1");
    }

    #[test]
    fn inactive_records_need_the_flag() {
        let records = sample();
        let out = filter(&records, &Filters::default());
        assert!(out.iter().all(|r| r.is_active()));

        let with_dead = filter(
            &records,
            &Filters {
                include_inactive: true,
                ..Filters::default()
            },
        );
        assert_eq!(with_dead.len(), 3);
    }

    #[test]
    fn bucket_excludes_missing_latency() {
        let mut records = sample();
        records.push(rec("3.3.3.3", None));
        let filters = Filters {
            latency_bucket: Some(LatencyBucket::Under100),
            ..Filters::default()
        };
        let out = filter(&records, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].ip, "1.1.1.1");

        // No bucket selected → the latency-less record passes.
        let none = filter(&records, &Filters::default());
        assert!(none.iter().any(|r| r.ip == "3.3.3.3"));
    }

    #[test]
    fn bucket_boundaries() {
        assert!(LatencyBucket::Under100.matches(Some(100.0)));
        assert!(!LatencyBucket::Under100.matches(Some(100.1)));
        assert!(LatencyBucket::From100To300.matches(Some(300.0)));
        assert!(LatencyBucket::From300To600.matches(Some(301.0)));
        assert!(LatencyBucket::Over600.matches(Some(601.0)));
        assert!(!LatencyBucket::Over600.matches(None));
    }

    #[test]
    fn speed_filter_uses_derived_category() {
        let records = sample(); // 50ms → Excellent, 10ms → Excellent, 700ms → Poor
        let filters = Filters {
            speed: Some("Poor".into()),
            include_inactive: true,
            ..Filters::default()
        };
        let out = filter(&records, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].ip, "10.0.0.1");
    }

    #[test]
    fn sort_by_latency_both_directions() {
        let mut records = vec![rec("1.1.1.1", Some(50.0)), rec("2.2.2.2", Some(10.0))];
        sort(&mut records, SortKey::Latency, SortDirection::Asc);
        assert_eq!(records[0].ip, "2.2.2.2");
        assert_eq!(records[1].ip, "1.1.1.1");

        sort(&mut records, SortKey::Latency, SortDirection::Desc);
        assert_eq!(records[0].ip, "1.1.1.1");
    }

    #[test]
    fn sort_is_idempotent() {
        let mut records = sample();
        sort(&mut records, SortKey::Ip, SortDirection::Asc);
        let once: Vec<String> = records.iter().map(|r| r.ip.clone()).collect();
        sort(&mut records, SortKey::Ip, SortDirection::Asc);
        let twice: Vec<String> = records.iter().map(|r| r.ip.clone()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn string_sort_is_casefolded() {
        let mut a = rec("1.1.1.1", None);
        a.protocol = "socks5".into();
        let mut b = rec("2.2.2.2", None);
        b.protocol = "HTTP".into();
        let mut records = vec![a, b];
        sort(&mut records, SortKey::Protocol, SortDirection::Asc);
        // "http" < "socks5" regardless of original case.
        assert_eq!(records[0].protocol, "HTTP");
    }

    #[test]
    fn missing_latency_sorts_as_zero() {
        let mut records = vec![rec("1.1.1.1", Some(5.0)), rec("2.2.2.2", None)];
        sort(&mut records, SortKey::Latency, SortDirection::Asc);
        assert_eq!(records[0].ip, "2.2.2.2");
    }

    #[test]
    fn toggle_sort_semantics() {
        let mut state = ViewState::default();
        assert_eq!(state.sort_key, SortKey::Latency);
        state.toggle_sort(SortKey::Latency);
        assert_eq!(state.sort_dir, SortDirection::Desc);
        state.toggle_sort(SortKey::Country);
        assert_eq!(state.sort_key, SortKey::Country);
        assert_eq!(state.sort_dir, SortDirection::Asc);
    }

    #[test]
    fn pagination_clamps_and_never_leaves_range() {
        assert_eq!(total_pages(0, 15), 1);
        assert_eq!(total_pages(15, 15), 1);
        assert_eq!(total_pages(16, 15), 2);

        for requested in [0usize, 1, 2, 99] {
            let clamped = clamp_page(requested, 31, 15);
            assert!((1..=3).contains(&clamped));
        }

        let records: Vec<ProxyRecord> =
            (0..31).map(|i| rec(&format!("10.0.0.{i}"), Some(i as f64))).collect();
        assert_eq!(page_slice(&records, 15, 1).len(), 15);
        assert_eq!(page_slice(&records, 15, 3).len(), 1);
        // Out-of-range request lands on the last page.
        assert_eq!(page_slice(&records, 15, 99).len(), 1);
        assert!(page_slice(&[], 15, 1).is_empty());
    }

    #[test]
    fn distinct_options_skip_empty_values() {
        let mut records = sample();
        records[2].country = String::new();
        let countries = distinct_options(&records, |r| Some(r.country.as_str()));
        assert_eq!(countries, vec!["DE".to_string(), "US".to_string()]);
    }

    #[test]
    fn stats_over_full_set() {
        let stats = Stats::compute(&sample());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert!((stats.avg_latency_ms - (50.0 + 10.0 + 700.0) / 3.0).abs() < 1e-9);
        assert!((stats.success_rate - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn clear_keeps_include_inactive() {
        let mut filters = Filters {
            protocol: Some("HTTP".into()),
            query: "10".into(),
            include_inactive: true,
            ..Filters::default()
        };
        filters.clear();
        assert!(filters.protocol.is_none());
        assert!(filters.query.is_empty());
        assert!(filters.include_inactive);
    }
}
