//! Photo role inference.
//!
//! Guesses a photo's role from its original filename. Photographers name
//! files things like `front.jpg`, `tyl_2.jpg` (Polish "back"), or
//! `measure1.png`; the substring checks below turn that habit into a
//! default role. This is a best-effort heuristic only -- an explicit role
//! supplied with the upload always wins.

pub const ROLE_FRONT: &str = "front";
pub const ROLE_BACK: &str = "back";
pub const ROLE_MEASURE1: &str = "measure1";
pub const ROLE_MEASURE2: &str = "measure2";
pub const ROLE_EXTRA: &str = "extra";

/// Infer a role from the client-supplied filename.
///
/// Checks run in priority order; the first match wins. Both English and
/// Polish naming conventions are recognized (`prz` for "przód"/front,
/// `tyl`/`tył` for back).
pub fn infer_role(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();

    if lower.contains("front") || lower.contains("prz") {
        ROLE_FRONT
    } else if lower.contains("back") || lower.contains("tyl") || lower.contains("tył") {
        ROLE_BACK
    } else if lower.contains("ab") || lower.contains("measure1") {
        ROLE_MEASURE1
    } else if lower.contains("c") || lower.contains("measure2") {
        ROLE_MEASURE2
    } else {
        ROLE_EXTRA
    }
}
