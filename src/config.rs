/// Number of entries exposed by the recent-activity view.
pub const ACTIVITY_WINDOW: usize = 50;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:80";

pub fn bind_addr() -> String {
    std::env::var("BORD_BIND_ADDR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
}

/// Worker count for the HTTP server; `None` keeps the actix default.
pub fn workers() -> Option<usize> {
    std::env::var("BORD_WORKERS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|n| *n > 0)
}

/// Seed the demo accounts and posts on start-up.
pub fn seed_demo_data() -> bool {
    std::env::var("BORD_SEED_DEMO")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}
