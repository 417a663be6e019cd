/// SQLite layout for the report log when it is kept in a database rather
/// than a JSON-lines file.
///
/// ```sql
/// CREATE TABLE IF NOT EXISTS report_log (
///     seq          INTEGER PRIMARY KEY AUTOINCREMENT,
///     received_at  TEXT NOT NULL,
///     body_json    TEXT NOT NULL
/// );
///
/// CREATE INDEX IF NOT EXISTS idx_report_received ON report_log(received_at);
/// ```
///
/// Rows are only ever inserted. `seq` is the log order.
pub const REPORT_LOG_DDL: &str = "\
CREATE TABLE IF NOT EXISTS report_log (
    seq          INTEGER PRIMARY KEY AUTOINCREMENT,
    received_at  TEXT NOT NULL,
    body_json    TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_report_received ON report_log(received_at);
";

/// Default file name of the JSON-lines log.
pub const DEFAULT_LOG_FILE: &str = "call_reports.jsonl";
