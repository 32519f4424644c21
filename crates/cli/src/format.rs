//! Result and statistics formatting.

use std::path::PathBuf;

use sift_search::CacheStats;

/// Format a result list: a count line, then one identifier per line.
pub fn format_results(results: &[PathBuf]) -> String {
    let mut out = format!("found {} result(s):", results.len());
    for id in results {
        out.push('\n');
        out.push_str(&id.display().to_string());
    }
    out
}

/// Format cache statistics, or a note that the cache is off.
pub fn format_stats(stats: Option<CacheStats>) -> String {
    match stats {
        Some(s) => format!(
            "cache: {}/{} entries, {} hit(s), {} miss(es), {} eviction(s), hit rate {:.1}%",
            s.len,
            s.capacity,
            s.hits,
            s.misses,
            s.evictions,
            s.hit_rate() * 100.0
        ),
        None => "cache: disabled".to_string(),
    }
}
