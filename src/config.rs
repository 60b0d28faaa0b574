const DEFAULT_API_BASE: &str = "http://localhost:7777";
const SHEET_DATA_PATH: &str = "/getsheetsdata";

/// Base URL of the sheet backend. Baked in at build time; Trunk only passes
/// `TRUNK_PUBLIC_`-prefixed values through, the bare name covers plain cargo
/// builds.
pub fn api_base_url() -> String {
    option_env!("TAKEOUT_API_BASE")
        .into_iter()
        .chain(option_env!("TRUNK_PUBLIC_TAKEOUT_API_BASE"))
        .find_map(normalize_base)
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

pub fn sheet_data_url() -> String {
    join_endpoint(&api_base_url())
}

fn normalize_base(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn join_endpoint(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), SHEET_DATA_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_overrides_are_ignored() {
        assert_eq!(normalize_base(""), None);
        assert_eq!(normalize_base("   "), None);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            normalize_base("  http://sheets.internal  ").as_deref(),
            Some("http://sheets.internal")
        );
    }

    #[test]
    fn the_endpoint_joins_without_a_double_slash() {
        assert_eq!(
            join_endpoint("http://localhost:7777/"),
            "http://localhost:7777/getsheetsdata"
        );
        assert_eq!(
            join_endpoint("http://localhost:7777"),
            "http://localhost:7777/getsheetsdata"
        );
    }

    #[test]
    fn the_resolved_endpoint_targets_the_sheet_route() {
        assert!(sheet_data_url().ends_with("/getsheetsdata"));
    }
}
