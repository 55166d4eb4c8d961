//! Result sanitization
//!
//! Generation backends sometimes echo prompt scaffolding verbatim (the
//! expected-output hint, most often). This module strips those echoes and
//! substitutes a fallback when nothing presentable remains. It is best-effort
//! textual cleanup, not a semantic validator.

/// Strip echo markers, trim, and fall back when empty
///
/// Each marker is removed by exact substring match, repeated to a fixpoint:
/// removing a marker can splice its surroundings into a fresh occurrence, and
/// the fixpoint keeps the operation idempotent. Markers are processed longest
/// first so a marker that contains another is stripped whole.
#[must_use]
pub fn sanitize_output(raw: &str, markers: &[&str], fallback: &str) -> String {
    let mut markers: Vec<&str> = markers.iter().copied().filter(|m| !m.is_empty()).collect();
    markers.sort_by_key(|m| std::cmp::Reverse(m.len()));

    let mut text = raw.to_string();
    loop {
        let mut changed = false;
        for marker in &markers {
            if text.contains(marker) {
                text = text.replace(marker, "");
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
