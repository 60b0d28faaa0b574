use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::config;

const HEADER_ROWS: usize = 1;
// Affirmations live in column C of the sheet.
const AFFIRMATION_COLUMN: usize = 2;

const FALLBACK_DATASET: &str = include_str!("../assets/affirmations.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrigin {
    Remote,
    Local,
}

impl fmt::Display for ContentOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentOrigin::Remote => write!(f, "remote"),
            ContentOrigin::Local => write!(f, "bundled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    pub affirmations: Vec<String>,
    pub origin: ContentOrigin,
}

#[derive(Debug)]
pub enum FetchError {
    Network(String),
    Malformed(String),
    Backend(String),
    Empty,
}

impl FetchError {
    fn network<E: fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn malformed<E: fmt::Display>(err: E) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(detail) => write!(f, "network failure: {detail}"),
            FetchError::Malformed(detail) => write!(f, "malformed response: {detail}"),
            FetchError::Backend(message) => write!(f, "backend reported an error: {message}"),
            FetchError::Empty => write!(f, "no usable rows in the response"),
        }
    }
}

/// Neither the endpoint nor the bundled list produced a single affirmation.
/// The only fetch problem the user ever sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcesExhausted;

impl fmt::Display for SourcesExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no affirmations available from the remote endpoint or the bundled list"
        )
    }
}

#[derive(Deserialize)]
struct SheetPayload {
    #[serde(default)]
    data: Option<Vec<Vec<Value>>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct FallbackFile {
    affirmations: Vec<String>,
}

/// One remote attempt, one fallback attempt, no retries. Called exactly once
/// at startup.
pub async fn resolve() -> Result<ResolvedContent, SourcesExhausted> {
    let remote = fetch_remote().await;
    if let Err(err) = &remote {
        log::warn!("falling back to the bundled affirmations: {err}");
    }
    settle(remote, fallback_affirmations())
}

fn settle(
    remote: Result<Vec<String>, FetchError>,
    fallback: Vec<String>,
) -> Result<ResolvedContent, SourcesExhausted> {
    match remote {
        Ok(affirmations) => Ok(ResolvedContent {
            affirmations,
            origin: ContentOrigin::Remote,
        }),
        Err(_) if fallback.is_empty() => Err(SourcesExhausted),
        Err(_) => Ok(ResolvedContent {
            affirmations: fallback,
            origin: ContentOrigin::Local,
        }),
    }
}

async fn fetch_remote() -> Result<Vec<String>, FetchError> {
    let url = config::sheet_data_url();
    let response = Request::get(&url)
        .send()
        .await
        .map_err(FetchError::network)?;

    if !response.ok() {
        return Err(FetchError::Network(format!(
            "HTTP {} from {}",
            response.status(),
            url
        )));
    }

    let payload: SheetPayload = response.json().await.map_err(FetchError::malformed)?;

    if let Some(message) = payload.error {
        return Err(FetchError::Backend(message));
    }

    let rows = payload
        .data
        .ok_or_else(|| FetchError::Malformed("response carries no data rows".to_string()))?;

    let affirmations = extract_affirmations(&rows);
    if affirmations.is_empty() {
        return Err(FetchError::Empty);
    }

    Ok(affirmations)
}

fn extract_affirmations(rows: &[Vec<Value>]) -> Vec<String> {
    rows.iter()
        .skip(HEADER_ROWS)
        .filter_map(|row| row.get(AFFIRMATION_COLUMN))
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
        .collect()
}

fn fallback_affirmations() -> Vec<String> {
    match parse_fallback(FALLBACK_DATASET) {
        Ok(affirmations) => affirmations,
        Err(err) => {
            log::warn!("bundled affirmations are unreadable: {err}");
            Vec::new()
        }
    }
}

fn parse_fallback(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    let file: FallbackFile = serde_json::from_str(raw)?;
    Ok(file
        .affirmations
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Vec<Value>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn extraction_skips_the_header_and_blank_cells() {
        let table = rows(json!([
            ["h1", "h2", "h3"],
            ["a", "b", "First"],
            ["a", "b", ""],
            ["a", "b", "Second"],
        ]));
        assert_eq!(extract_affirmations(&table), ["First", "Second"]);
    }

    #[test]
    fn extraction_ignores_short_and_non_string_rows() {
        let table = rows(json!([
            ["h1", "h2", "h3"],
            ["only-two", "cells"],
            ["a", "b", 17],
            ["a", "b", "  padded  "],
        ]));
        assert_eq!(extract_affirmations(&table), ["padded"]);
    }

    #[test]
    fn a_header_only_table_extracts_nothing() {
        let table = rows(json!([["h"]]));
        assert!(extract_affirmations(&table).is_empty());
    }

    #[test]
    fn a_remote_list_keeps_its_remote_origin() {
        let resolved = settle(Ok(vec!["First".to_string()]), vec!["X".to_string()]).unwrap();
        assert_eq!(resolved.origin, ContentOrigin::Remote);
        assert_eq!(resolved.affirmations, ["First"]);
    }

    #[test]
    fn a_failed_fetch_uses_the_fallback() {
        let fallback = vec!["X".to_string(), "Y".to_string(), "Z".to_string()];
        let resolved = settle(
            Err(FetchError::Network("connection refused".to_string())),
            fallback,
        )
        .unwrap();
        assert_eq!(resolved.origin, ContentOrigin::Local);
        assert_eq!(resolved.affirmations, ["X", "Y", "Z"]);
    }

    #[test]
    fn both_sources_empty_is_terminal() {
        assert_eq!(
            settle(Err(FetchError::Empty), Vec::new()),
            Err(SourcesExhausted)
        );
    }

    #[test]
    fn fallback_parsing_trims_and_filters() {
        let parsed = parse_fallback(r#"{"affirmations": ["  X  ", "", "Y"]}"#).unwrap();
        assert_eq!(parsed, ["X", "Y"]);
    }

    #[test]
    fn fallback_parsing_rejects_malformed_documents() {
        assert!(parse_fallback("not json").is_err());
        assert!(parse_fallback(r#"{"somethingelse": []}"#).is_err());
    }

    #[test]
    fn the_bundled_dataset_is_usable() {
        assert!(!fallback_affirmations().is_empty());
    }

    #[test]
    fn fetch_errors_name_their_cause() {
        assert_eq!(
            FetchError::Backend("quota exceeded".to_string()).to_string(),
            "backend reported an error: quota exceeded"
        );
        assert_eq!(
            FetchError::Empty.to_string(),
            "no usable rows in the response"
        );
    }
}
