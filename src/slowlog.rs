// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0
//! Slow-query log parsing for the two engine families RDS exposes log files
//! for. MySQL ships a dedicated `slowquery/mysql-slowquery.log`; PostgreSQL
//! interleaves slow statements into `error/postgresql.log.*` as
//! `duration: ... ms  statement: ...` lines.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Display cap for a single statement.
const MAX_SQL_LEN: usize = 1500;
/// IN-lists longer than this collapse to first three / last two values.
const MAX_IN_LIST_VALUES: usize = 5;

/// One parsed slow-query entry. Fields the engine does not report stay
/// `None`: PostgreSQL logs carry no lock time or row counts, and its
/// durations are in milliseconds where MySQL reports seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlowQueryEntry {
    pub timestamp: Option<String>,
    pub query_time: Option<f64>,
    pub lock_time: Option<f64>,
    pub rows_sent: Option<i64>,
    pub rows_examined: Option<i64>,
    pub sql: Option<String>,
}

impl SlowQueryEntry {
    fn empty() -> Self {
        Self {
            timestamp: None,
            query_time: None,
            lock_time: None,
            rows_sent: None,
            rows_examined: None,
            sql: None,
        }
    }
}

fn query_stats_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\w+): (\d+\.?\d*)").expect("query stats pattern"))
}

fn postgres_duration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)LOG:  duration: (\d+\.?\d*) ms  statement: (.*)")
            .expect("postgres duration pattern")
    })
}

fn postgres_line_start_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} UTC:").expect("postgres line prefix")
    })
}

/// Parse the MySQL slow query log.
///
/// Entries are delimited by `# Time:` headers. The `# Query_time:` line
/// carries the statistics; `SET timestamp=` and `use` bookkeeping lines are
/// dropped; everything else accumulates as the statement text.
pub fn parse_mysql_slow_log(data: &str) -> Vec<SlowQueryEntry> {
    let mut entries = Vec::new();
    let mut current = SlowQueryEntry::empty();
    let mut sql_lines: Vec<&str> = Vec::new();

    for line in data.lines() {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("# Time:") {
            flush_mysql_entry(&mut entries, &mut current, &mut sql_lines);
            current.timestamp = DateTime::parse_from_rfc3339(rest.trim())
                .ok()
                .map(|ts| ts.with_timezone(&Utc).to_rfc3339());
        } else if line.starts_with("# Query_time:") {
            for caps in query_stats_re().captures_iter(line) {
                let value = &caps[2];
                match &caps[1] {
                    "Query_time" => current.query_time = value.parse().ok(),
                    "Lock_time" => current.lock_time = value.parse().ok(),
                    "Rows_sent" => current.rows_sent = value.parse().ok(),
                    "Rows_examined" => current.rows_examined = value.parse().ok(),
                    _ => {}
                }
            }
        } else if line.starts_with('#')
            || line.starts_with("SET timestamp=")
            || line.starts_with("use ")
            || line.is_empty()
        {
            // comment or session bookkeeping line
        } else {
            sql_lines.push(line);
        }
    }
    flush_mysql_entry(&mut entries, &mut current, &mut sql_lines);

    entries
}

fn flush_mysql_entry(
    entries: &mut Vec<SlowQueryEntry>,
    current: &mut SlowQueryEntry,
    sql_lines: &mut Vec<&str>,
) {
    if current.query_time.is_some() && !sql_lines.is_empty() {
        current.sql = Some(shape_sql(&sql_lines.join(" ")));
        entries.push(current.clone());
    }
    *current = SlowQueryEntry::empty();
    sql_lines.clear();
}

/// Parse a PostgreSQL log file downloaded from RDS.
///
/// Each log line starts with a `YYYY-MM-DD HH:MM:SS UTC:` prefix;
/// continuation lines of a multi-line statement do not. Only entries that
/// report a statement duration are kept.
pub fn parse_postgres_log(data: &str) -> Vec<SlowQueryEntry> {
    let mut entries = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for line in data.lines() {
        let line = line.trim();
        if postgres_line_start_re().is_match(line) {
            flush_postgres_entry(&mut entries, &buffer);
            buffer = vec![line];
        } else if !buffer.is_empty() {
            buffer.push(line);
        }
    }
    flush_postgres_entry(&mut entries, &buffer);

    entries
}

fn flush_postgres_entry(entries: &mut Vec<SlowQueryEntry>, buffer: &[&str]) {
    if buffer.is_empty() {
        return;
    }
    let entry = buffer.join("\n");
    if let Some(caps) = postgres_duration_re().captures(&entry) {
        entries.push(SlowQueryEntry {
            timestamp: None,
            query_time: caps[1].parse().ok(),
            lock_time: None,
            rows_sent: None,
            rows_examined: None,
            sql: Some(shape_sql(&caps[2])),
        });
    }
}

/// Sort by query time, slowest first, and keep at most `cap` entries.
pub fn sort_and_cap(mut entries: Vec<SlowQueryEntry>, cap: usize) -> Vec<SlowQueryEntry> {
    entries.sort_by(|a, b| {
        let (a, b) = (a.query_time.unwrap_or(0.0), b.query_time.unwrap_or(0.0));
        b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
    });
    entries.truncate(cap);
    entries
}

/// Shorten a statement for display: collapse long IN-lists, then cut at
/// [`MAX_SQL_LEN`] characters.
pub fn shape_sql(sql: &str) -> String {
    truncate_sql(collapse_in_list(sql))
}

fn collapse_in_list(sql: &str) -> String {
    let Some(pos) = sql
        .as_bytes()
        .windows(4)
        .position(|w| w.eq_ignore_ascii_case(b"in ("))
    else {
        return sql.to_string();
    };
    let open = pos + 4;
    let Some(close) = sql[open..].find(')').map(|i| open + i) else {
        return sql.to_string();
    };

    let values: Vec<&str> = sql[open..close].split(',').collect();
    if values.len() <= MAX_IN_LIST_VALUES {
        return sql.to_string();
    }
    format!(
        "{}{}, ... {}{}",
        &sql[..open],
        values[..3].join(","),
        values[values.len() - 2..].join(","),
        &sql[close..]
    )
}

fn truncate_sql(mut sql: String) -> String {
    if sql.len() <= MAX_SQL_LEN {
        return sql;
    }
    let mut cut = MAX_SQL_LEN;
    while !sql.is_char_boundary(cut) {
        cut -= 1;
    }
    sql.truncate(cut);
    sql.push_str("... [truncated]");
    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    const MYSQL_LOG: &str = "\
# Time: 2024-01-01T10:00:00.000Z
# User@Host: app[app] @  [10.0.1.20]  Id:  1234
# Query_time: 10.5  Lock_time: 0.1 Rows_sent: 100  Rows_examined: 1000
SET timestamp=1704103200;
SELECT * FROM users WHERE status = 'active';
# Time: 2024-01-01T10:05:00.000Z
# User@Host: app[app] @  [10.0.1.21]  Id:  1235
# Query_time: 2.25  Lock_time: 0.0 Rows_sent: 1  Rows_examined: 50000
use orders;
SELECT o.id, o.total
FROM orders o
WHERE o.created_at > '2023-12-01';
";

    const POSTGRES_LOG: &str = "\
2024-01-01 10:00:00 UTC:10.0.1.20(53338):app@orders:[3124]:LOG:  duration: 2543.100 ms  statement: SELECT * FROM orders
WHERE created_at > '2023-12-01'
2024-01-01 10:00:02 UTC:10.0.1.20(53338):app@orders:[3124]:LOG:  connection received: host=10.0.1.20
2024-01-01 10:00:05 UTC:10.0.1.21(53340):app@orders:[3125]:LOG:  duration: 104.2 ms  statement: UPDATE orders SET shipped = true WHERE id = 7
";

    #[test]
    fn parses_mysql_entries_with_stats() {
        let entries = parse_mysql_slow_log(MYSQL_LOG);
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(
            first.timestamp.as_deref(),
            Some("2024-01-01T10:00:00+00:00")
        );
        assert_eq!(first.query_time, Some(10.5));
        assert_eq!(first.lock_time, Some(0.1));
        assert_eq!(first.rows_sent, Some(100));
        assert_eq!(first.rows_examined, Some(1000));
        assert_eq!(
            first.sql.as_deref(),
            Some("SELECT * FROM users WHERE status = 'active';")
        );

        // multi-line statement is joined, `use` line dropped
        let second = &entries[1];
        assert_eq!(second.query_time, Some(2.25));
        assert_eq!(
            second.sql.as_deref(),
            Some("SELECT o.id, o.total FROM orders o WHERE o.created_at > '2023-12-01';")
        );
    }

    #[test]
    fn mysql_entry_without_stats_is_dropped() {
        let log = "# Time: 2024-01-01T10:00:00.000Z\nSELECT 1;\n";
        assert!(parse_mysql_slow_log(log).is_empty());
    }

    #[test]
    fn parses_postgres_duration_entries_only() {
        let entries = parse_postgres_log(POSTGRES_LOG);
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].query_time, Some(2543.1));
        assert_eq!(
            entries[0].sql.as_deref(),
            Some("SELECT * FROM orders\nWHERE created_at > '2023-12-01'")
        );
        assert_eq!(entries[0].timestamp, None);
        assert_eq!(entries[0].rows_examined, None);

        assert_eq!(entries[1].query_time, Some(104.2));
    }

    #[test]
    fn sorts_descending_and_caps() {
        let mut entries = Vec::new();
        for qt in [1.0, 9.0, 5.0, 3.0] {
            entries.push(SlowQueryEntry {
                query_time: Some(qt),
                ..SlowQueryEntry::empty()
            });
        }
        let sorted = sort_and_cap(entries, 3);
        let times: Vec<_> = sorted.iter().map(|e| e.query_time.unwrap()).collect();
        assert_eq!(times, vec![9.0, 5.0, 3.0]);
    }

    #[test]
    fn collapses_long_in_lists() {
        let sql = "SELECT * FROM users WHERE id IN (1,2,3,4,5,6,7) AND active = 1";
        assert_eq!(
            shape_sql(sql),
            "SELECT * FROM users WHERE id IN (1,2,3, ... 6,7) AND active = 1"
        );
    }

    #[test]
    fn short_in_lists_are_left_alone() {
        let sql = "SELECT * FROM users WHERE id IN (1,2,3)";
        assert_eq!(shape_sql(sql), sql);
    }

    #[test]
    fn in_list_collapse_is_case_insensitive() {
        let sql = "select * from users where id in (1,2,3,4,5,6)";
        assert_eq!(
            shape_sql(sql),
            "select * from users where id in (1,2,3, ... 5,6)"
        );
    }

    #[test]
    fn truncates_oversized_statements() {
        let sql = format!("SELECT '{}'", "x".repeat(2000));
        let shaped = shape_sql(&sql);
        assert!(shaped.ends_with("... [truncated]"));
        assert_eq!(shaped.len(), 1500 + "... [truncated]".len());
    }
}
