// ==========================================
// 染整换色排产系统 - 性能埋点
// ==========================================
// PerfGuard: 记录一次操作的耗时、SQL 条数、慢 SQL 条数 (target = "perf")
// SQL 计数依赖 rusqlite trace/profile 钩子,仅统计 Guard 作用域内的语句
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// 开关环境变量
pub const PERF_SQL_ENV: &str = "RAINBOW_SCHEDULER_PERF_SQL";
/// 慢 SQL 阈值环境变量（毫秒）
pub const SLOW_SQL_MS_ENV: &str = "RAINBOW_SCHEDULER_SLOW_SQL_MS";

static SQL_TRACING_ON: AtomicBool = AtomicBool::new(false);
static SLOW_SQL_MS: AtomicU64 = AtomicU64::new(0);

// ==========================================
// SqlPerfSettings - SQL 埋点参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlPerfSettings {
    pub enabled: bool,
    pub slow_sql_ms: u64,
}

impl SqlPerfSettings {
    /// 由原始环境变量值解析
    ///
    /// Debug 构建默认开启(阈值 50ms), Release 默认关闭(阈值 200ms)
    pub fn parse(enabled_raw: Option<&str>, slow_ms_raw: Option<&str>) -> Self {
        let enabled = enabled_raw
            .map(|v| {
                matches!(
                    v.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )
            })
            .unwrap_or(cfg!(debug_assertions));
        let default_ms = if cfg!(debug_assertions) { 50 } else { 200 };
        let slow_sql_ms = slow_ms_raw
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(default_ms);
        Self {
            enabled,
            slow_sql_ms,
        }
    }

    pub fn from_env() -> Self {
        let enabled = std::env::var(PERF_SQL_ENV).ok();
        let slow = std::env::var(SLOW_SQL_MS_ENV).ok();
        Self::parse(enabled.as_deref(), slow.as_deref())
    }
}

// ==========================================
// 线程内计数
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
struct SqlCounters {
    depth: u32,
    statements: u64,
    slow_statements: u64,
}

thread_local! {
    static COUNTERS: Cell<SqlCounters> = const {
        Cell::new(SqlCounters { depth: 0, statements: 0, slow_statements: 0 })
    };
}

fn update_counters(f: impl FnOnce(&mut SqlCounters)) -> SqlCounters {
    COUNTERS.with(|cell| {
        let mut counters = cell.get();
        f(&mut counters);
        cell.set(counters);
        counters
    })
}

fn one_line_sql(sql: &str, max_chars: usize) -> String {
    let flat = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &flat[..idx]),
        None => flat,
    }
}

/// 为连接安装 SQL 计数与慢查询日志钩子
pub fn install_sqlite_tracing(conn: &mut Connection) {
    let settings = SqlPerfSettings::from_env();
    SQL_TRACING_ON.store(settings.enabled, Ordering::Relaxed);
    SLOW_SQL_MS.store(settings.slow_sql_ms, Ordering::Relaxed);

    if settings.enabled {
        conn.trace(Some(on_sql_statement));
        conn.profile(Some(on_sql_profiled));
    } else {
        conn.trace(None);
        conn.profile(None);
    }
}

fn on_sql_statement(_sql: &str) {
    if !SQL_TRACING_ON.load(Ordering::Relaxed) {
        return;
    }
    update_counters(|c| {
        if c.depth > 0 {
            c.statements = c.statements.saturating_add(1);
        }
    });
}

fn on_sql_profiled(sql: &str, elapsed: Duration) {
    let threshold = SLOW_SQL_MS.load(Ordering::Relaxed);
    if !SQL_TRACING_ON.load(Ordering::Relaxed) || threshold == 0 {
        return;
    }
    let ms = elapsed.as_millis() as u64;
    if ms < threshold {
        return;
    }

    tracing::warn!(target: "slow_sql", duration_ms = ms, sql = %one_line_sql(sql, 240), "慢 SQL");
    update_counters(|c| {
        if c.depth > 0 {
            c.slow_statements = c.slow_statements.saturating_add(1);
        }
    });
}

// ==========================================
// PerfGuard - 操作级性能统计
// ==========================================
///
/// ```ignore
/// let _perf = rainbow_scheduler::perf::PerfGuard::new("schedule.generate");
/// ```
pub struct PerfGuard {
    op: &'static str,
    started: Instant,
    baseline: SqlCounters,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        let baseline = update_counters(|c| c.depth = c.depth.saturating_add(1));
        Self {
            op,
            started: Instant::now(),
            baseline,
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let now = update_counters(|c| c.depth = c.depth.saturating_sub(1));

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            sql_count = now.statements.saturating_sub(self.baseline.statements),
            slow_sql_count = now.slow_statements.saturating_sub(self.baseline.slow_statements),
            "操作完成"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_sql() {
        assert_eq!(one_line_sql("SELECT 1\n   FROM t", 100), "SELECT 1 FROM t");
        assert_eq!(one_line_sql("SELECT * FROM dye_order", 6), "SELECT…");
    }

    #[test]
    fn test_settings_parse() {
        let on = SqlPerfSettings::parse(Some(" YES "), Some("120"));
        assert!(on.enabled);
        assert_eq!(on.slow_sql_ms, 120);

        let off = SqlPerfSettings::parse(Some("off"), Some("abc"));
        assert!(!off.enabled);
        assert!(off.slow_sql_ms == 50 || off.slow_sql_ms == 200);
    }

    #[test]
    fn test_guard_counts_only_inside_scope() {
        on_sql_statement("SELECT 1");
        let before = update_counters(|_| {});
        {
            let _guard = PerfGuard::new("test");
            assert_eq!(update_counters(|_| {}).depth, before.depth + 1);
        }
        assert_eq!(update_counters(|_| {}).depth, before.depth);
    }
}
