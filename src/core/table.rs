//! Search / filter / sort / paginate over the row sequence.
//!
//! A stateless pipeline with a fixed operation order: search, model filter,
//! kind filter, stable sort, paginate. The caller owns the query state and
//! recomputes the view from scratch on every change.

use std::cmp::Ordering;

use crate::core::models::row::UsageRow;

/// Fixed page size for the tabular view.
pub const PAGE_SIZE: usize = 20;

/// Sentinel value meaning "no model/kind filter".
pub const FILTER_ALL: &str = "all";

/// Candidate headers probed (in order) to find the kind/request-type column.
const KIND_CANDIDATES: [&str; 5] = ["Kind", "Request Type", "Type", "RequestType", "Request_Type"];

/// The ten sortable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    Kind,
    Model,
    MaxMode,
    InputWithCacheWrite,
    InputWithoutCacheWrite,
    CacheRead,
    OutputTokens,
    TotalTokens,
    Cost,
}

impl SortField {
    /// The column header this field sorts on.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Date => "Date",
            SortField::Kind => "Kind",
            SortField::Model => "Model",
            SortField::MaxMode => "Max Mode",
            SortField::InputWithCacheWrite => "Input (w/ Cache Write)",
            SortField::InputWithoutCacheWrite => "Input (w/o Cache Write)",
            SortField::CacheRead => "Cache Read",
            SortField::OutputTokens => "Output Tokens",
            SortField::TotalTokens => "Total Tokens",
            SortField::Cost => "Cost",
        }
    }

    /// Resolve a column header (exact) or a dashed shorthand
    /// (`total-tokens`, `max-mode`, ...) to a sort field.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase();
        match normalized.as_str() {
            "date" => Some(SortField::Date),
            "kind" => Some(SortField::Kind),
            "model" => Some(SortField::Model),
            "max mode" | "max-mode" => Some(SortField::MaxMode),
            "input (w/ cache write)" | "input-with-cache-write" => {
                Some(SortField::InputWithCacheWrite)
            }
            "input (w/o cache write)" | "input-without-cache-write" => {
                Some(SortField::InputWithoutCacheWrite)
            }
            "cache read" | "cache-read" => Some(SortField::CacheRead),
            "output tokens" | "output-tokens" => Some(SortField::OutputTokens),
            "total tokens" | "total-tokens" => Some(SortField::TotalTokens),
            "cost" => Some(SortField::Cost),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Query state for the tabular view. Defaults mirror the untouched UI:
/// no search, no filters, newest first, first page.
#[derive(Debug, Clone)]
pub struct TableQuery {
    pub search: String,
    /// Model to keep, or [`FILTER_ALL`].
    pub model: String,
    /// Kind to keep, or [`FILTER_ALL`].
    pub kind: String,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    /// 1-based. The engine does not clamp: an out-of-range page yields an
    /// empty page. Callers clamp to `[1, max(total_pages, 1)]` before
    /// querying.
    pub page: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            model: FILTER_ALL.to_string(),
            kind: FILTER_ALL.to_string(),
            sort_field: SortField::Date,
            sort_direction: SortDirection::Descending,
            page: 1,
        }
    }
}

/// One page of the filtered/sorted view.
#[derive(Debug, Clone)]
pub struct TablePage {
    pub rows: Vec<UsageRow>,
    pub total_count: usize,
    pub total_pages: usize,
}

/// Find the column carrying the kind/request-type label.
///
/// Probes the fixed candidate list against the first row's values, then
/// falls back to any column whose name contains "type", "request", or
/// "kind". Heuristic and order-dependent, kept for compatibility with the
/// upstream exporter's varying headers.
pub fn detect_kind_column(rows: &[UsageRow]) -> Option<String> {
    let first = rows.first()?;
    for candidate in KIND_CANDIDATES {
        if !first.get(candidate).is_empty() {
            return Some(candidate.to_string());
        }
    }
    // The record always answers to the ten canonical headers, so the
    // name scan only counts columns that actually carry a value —
    // mirroring the original's scan over the file's own header set.
    first
        .columns()
        .into_iter()
        .find(|column| {
            if first.get(column).is_empty() {
                return false;
            }
            let lower = column.to_lowercase();
            lower.contains("type") || lower.contains("request") || lower.contains("kind")
        })
        .map(str::to_string)
}

/// Distinct non-blank models, sorted.
pub fn distinct_models(rows: &[UsageRow]) -> Vec<String> {
    let mut models: Vec<String> = rows
        .iter()
        .map(|row| row.model.clone())
        .filter(|m| !m.is_empty())
        .collect();
    models.sort();
    models.dedup();
    models
}

/// Distinct non-blank values of the detected kind column, sorted.
/// Empty when no kind-like column exists.
pub fn distinct_kinds(rows: &[UsageRow]) -> Vec<String> {
    let Some(column) = detect_kind_column(rows) else {
        return Vec::new();
    };
    let mut kinds: Vec<String> = rows
        .iter()
        .map(|row| row.get(&column).to_string())
        .filter(|k| !k.is_empty())
        .collect();
    kinds.sort();
    kinds.dedup();
    kinds
}

fn compare_by(a: &UsageRow, b: &UsageRow, field: SortField) -> Ordering {
    match field {
        // Unparsable dates sort before every parsed timestamp.
        SortField::Date => a.datetime().cmp(&b.datetime()),
        SortField::TotalTokens => a.total_tokens_value().cmp(&b.total_tokens_value()),
        SortField::Cost => a
            .cost_value()
            .partial_cmp(&b.cost_value())
            .unwrap_or(Ordering::Equal),
        other => {
            let column = other.column();
            a.get(column)
                .to_lowercase()
                .cmp(&b.get(column).to_lowercase())
        }
    }
}

/// The filtered and sorted (unpaginated) view — the export surface.
pub fn filtered_sorted(rows: &[UsageRow], query: &TableQuery) -> Vec<UsageRow> {
    let term = query.search.to_lowercase();
    let kind_column = detect_kind_column(rows);

    let mut out: Vec<UsageRow> = rows
        .iter()
        .filter(|row| {
            let matches_search = term.is_empty()
                || [&row.model, &row.kind, &row.max_mode, &row.date]
                    .iter()
                    .any(|value| value.to_lowercase().contains(&term));
            let matches_model = query.model == FILTER_ALL || row.model == query.model;
            // Without a kind-like column the kind filter is inert.
            let matches_kind = query.kind == FILTER_ALL
                || kind_column
                    .as_deref()
                    .is_none_or(|column| row.get(column) == query.kind);
            matches_search && matches_model && matches_kind
        })
        .cloned()
        .collect();

    // sort_by is stable: ties keep their filtered order.
    out.sort_by(|a, b| {
        let ordering = compare_by(a, b, query.sort_field);
        match query.sort_direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    out
}

/// Run the full pipeline and slice out the requested page.
pub fn query(rows: &[UsageRow], query: &TableQuery) -> TablePage {
    let matched = filtered_sorted(rows, query);
    let total_count = matched.len();
    let total_pages = total_count.div_ceil(PAGE_SIZE);

    let start = query.page.saturating_sub(1) * PAGE_SIZE;
    let rows = if start < total_count {
        matched[start..(start + PAGE_SIZE).min(total_count)].to_vec()
    } else {
        Vec::new()
    };

    TablePage {
        rows,
        total_count,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, kind: &str, model: &str, tokens: &str, cost: &str) -> UsageRow {
        UsageRow {
            date: date.into(),
            kind: kind.into(),
            model: model.into(),
            total_tokens: tokens.into(),
            cost: cost.into(),
            ..Default::default()
        }
    }

    fn sample_rows() -> Vec<UsageRow> {
        vec![
            row("2024-01-01", "Included", "gpt-4", "100", "0.50"),
            row("2024-01-02", "Usage-based", "claude-3", "200", "1.00"),
            row("2024-01-03", "Included", "gpt-4", "300", "0.75"),
            row("2024-01-04", "Included", "gemini-pro", "50", "0.10"),
        ]
    }

    #[test]
    fn search_matches_case_insensitive_substrings() {
        let rows = sample_rows();
        let q = TableQuery {
            search: "CLAUDE".into(),
            ..Default::default()
        };
        let out = filtered_sorted(&rows, &q);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].model, "claude-3");
    }

    #[test]
    fn search_also_covers_kind_and_date() {
        let rows = sample_rows();
        let by_kind = filtered_sorted(
            &rows,
            &TableQuery {
                search: "usage-based".into(),
                ..Default::default()
            },
        );
        assert_eq!(by_kind.len(), 1);

        let by_date = filtered_sorted(
            &rows,
            &TableQuery {
                search: "2024-01-03".into(),
                ..Default::default()
            },
        );
        assert_eq!(by_date.len(), 1);
    }

    #[test]
    fn empty_search_matches_everything() {
        let rows = sample_rows();
        let out = filtered_sorted(&rows, &TableQuery::default());
        assert_eq!(out.len(), rows.len());
    }

    #[test]
    fn model_filter_is_exact() {
        let rows = sample_rows();
        let q = TableQuery {
            model: "gpt-4".into(),
            ..Default::default()
        };
        let out = filtered_sorted(&rows, &q);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.model == "gpt-4"));
    }

    #[test]
    fn kind_filter_uses_detected_column() {
        let rows = sample_rows();
        let q = TableQuery {
            kind: "Included".into(),
            ..Default::default()
        };
        let out = filtered_sorted(&rows, &q);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn kind_filter_inert_without_kind_like_column() {
        // No Kind value anywhere and no type/request/kind column name.
        let rows = vec![row("2024-01-01", "", "gpt-4", "1", "0")];
        let q = TableQuery {
            kind: "Included".into(),
            ..Default::default()
        };
        let out = filtered_sorted(&rows, &q);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn kind_detection_prefers_candidate_list_then_substring() {
        let mut with_kind = row("2024-01-01", "Included", "m", "1", "0");
        with_kind.set("Request Category", "chat".into());
        assert_eq!(detect_kind_column(&[with_kind]), Some("Kind".to_string()));

        let mut fallback = row("2024-01-01", "", "m", "1", "0");
        fallback.set("Billing Category Type", "chat".into());
        assert_eq!(
            detect_kind_column(&[fallback]),
            Some("Billing Category Type".to_string())
        );

        assert_eq!(detect_kind_column(&[]), None);
    }

    #[test]
    fn kind_detection_ignores_empty_valued_columns() {
        // Kind-like names with no data in the first row don't count; the
        // canonical "Kind" header in particular must not match by name
        // alone when its cells are empty.
        let mut r = row("2024-01-01", "", "m", "1", "0");
        r.set("Request Style", String::new());
        assert_eq!(detect_kind_column(&[r]), None);
    }

    #[test]
    fn sort_by_date_uses_parsed_timestamps() {
        let rows = sample_rows();
        let q = TableQuery {
            sort_field: SortField::Date,
            sort_direction: SortDirection::Ascending,
            ..Default::default()
        };
        let out = filtered_sorted(&rows, &q);
        let dates: Vec<&str> = out.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04"]);
    }

    #[test]
    fn sort_by_tokens_is_numeric_not_lexicographic() {
        let rows = vec![
            row("2024-01-01", "k", "a", "9", "0"),
            row("2024-01-01", "k", "b", "100", "0"),
            row("2024-01-01", "k", "c", "20", "0"),
        ];
        let q = TableQuery {
            sort_field: SortField::TotalTokens,
            sort_direction: SortDirection::Ascending,
            ..Default::default()
        };
        let tokens: Vec<i64> = filtered_sorted(&rows, &q)
            .iter()
            .map(UsageRow::total_tokens_value)
            .collect();
        assert_eq!(tokens, vec![9, 20, 100]);
    }

    #[test]
    fn sort_treats_unparsable_numbers_as_zero() {
        let rows = vec![
            row("2024-01-01", "k", "a", "50", "0"),
            row("2024-01-01", "k", "b", "junk", "0"),
        ];
        let q = TableQuery {
            sort_field: SortField::TotalTokens,
            sort_direction: SortDirection::Ascending,
            ..Default::default()
        };
        let out = filtered_sorted(&rows, &q);
        assert_eq!(out[0].model, "b");
    }

    #[test]
    fn string_sort_is_case_insensitive() {
        let rows = vec![
            row("2024-01-01", "k", "Zeta", "1", "0"),
            row("2024-01-01", "k", "alpha", "1", "0"),
        ];
        let q = TableQuery {
            sort_field: SortField::Model,
            sort_direction: SortDirection::Ascending,
            ..Default::default()
        };
        let out = filtered_sorted(&rows, &q);
        assert_eq!(out[0].model, "alpha");
    }

    #[test]
    fn equal_keys_preserve_original_order() {
        let rows: Vec<UsageRow> = (0..10)
            .map(|i| {
                let mut r = row("2024-01-01", "k", "same", "5", "0.5");
                r.output_tokens = i.to_string(); // marker, not the sort key
                r
            })
            .collect();
        for field in [SortField::Model, SortField::TotalTokens, SortField::Cost, SortField::Date] {
            let q = TableQuery {
                sort_field: field,
                sort_direction: SortDirection::Descending,
                ..Default::default()
            };
            let markers: Vec<String> = filtered_sorted(&rows, &q)
                .iter()
                .map(|r| r.output_tokens.clone())
                .collect();
            let expected: Vec<String> = (0..10).map(|i| i.to_string()).collect();
            assert_eq!(markers, expected, "unstable for {:?}", field);
        }
    }

    #[test]
    fn pagination_splits_25_rows_into_20_and_5() {
        let rows: Vec<UsageRow> = (0..25)
            .map(|i| row("2024-01-01", "k", "m", "1", &format!("{}.00", i)))
            .collect();
        let base = TableQuery {
            sort_field: SortField::Cost,
            sort_direction: SortDirection::Descending,
            ..Default::default()
        };

        let page1 = query(&rows, &TableQuery { page: 1, ..base.clone() });
        assert_eq!(page1.rows.len(), 20);
        assert_eq!(page1.total_count, 25);
        assert_eq!(page1.total_pages, 2);
        assert_eq!(page1.rows[0].cost, "24.00");

        let page2 = query(&rows, &TableQuery { page: 2, ..base });
        assert_eq!(page2.rows.len(), 5);
    }

    #[test]
    fn pages_reconstruct_the_full_view_without_gaps() {
        let rows: Vec<UsageRow> = (0..47)
            .map(|i| row("2024-01-01", "k", &format!("m{:02}", i), "1", "0"))
            .collect();
        let base = TableQuery {
            sort_field: SortField::Model,
            sort_direction: SortDirection::Ascending,
            ..Default::default()
        };
        let full = filtered_sorted(&rows, &base);

        let total_pages = query(&rows, &base).total_pages;
        assert_eq!(total_pages, 3);
        let mut rebuilt = Vec::new();
        for page in 1..=total_pages {
            rebuilt.extend(query(&rows, &TableQuery { page, ..base.clone() }).rows);
        }
        assert_eq!(rebuilt, full);
    }

    #[test]
    fn out_of_range_page_yields_empty_rows() {
        let rows = sample_rows();
        let page = query(&rows, &TableQuery { page: 99, ..Default::default() });
        assert!(page.rows.is_empty());
        assert_eq!(page.total_count, 4);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn empty_input_has_zero_pages() {
        let page = query(&[], &TableQuery::default());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn distinct_models_sorted_and_blank_filtered() {
        let mut rows = sample_rows();
        rows.push(row("2024-01-05", "Included", "", "1", "0"));
        assert_eq!(distinct_models(&rows), vec!["claude-3", "gemini-pro", "gpt-4"]);
    }

    #[test]
    fn distinct_kinds_sorted_and_blank_filtered() {
        let rows = sample_rows();
        assert_eq!(distinct_kinds(&rows), vec!["Included", "Usage-based"]);
    }

    #[test]
    fn sort_field_resolves_headers_and_shorthands() {
        assert_eq!(SortField::from_name("Total Tokens"), Some(SortField::TotalTokens));
        assert_eq!(SortField::from_name("total-tokens"), Some(SortField::TotalTokens));
        assert_eq!(SortField::from_name("Max Mode"), Some(SortField::MaxMode));
        assert_eq!(SortField::from_name("bogus"), None);
    }
}
