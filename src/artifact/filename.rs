use chrono::{DateTime, Utc};

/// Family label used when none is set.
const UNNAMED_FAMILY: &str = "Custom";

/// `{YYYY-MM-DD}_{family}_{displacement}ci_baseline` with every character
/// outside `[A-Za-z0-9_-]` replaced by `_`.
pub fn file_stem(engine_family: &str, displacement_ci: f64, now: DateTime<Utc>) -> String {
    let family = if engine_family.trim().is_empty() {
        UNNAMED_FAMILY
    } else {
        engine_family
    };
    let raw = format!(
        "{}_{}_{}ci_baseline",
        now.format("%Y-%m-%d"),
        family,
        displacement_ci
    );
    sanitize(&raw)
}

pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
