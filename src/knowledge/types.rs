use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::knowledge::site_api::Endpoint;

/// Origin of a knowledge entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Hand-authored, fixed at build time
    Static,
    /// Derived from a live fetch, rebuilt on every knowledge load
    Dynamic,
}

/// One retrievable unit of site information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: String,
    pub title: String,
    pub url: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub details: Vec<String>,
    pub actions: Vec<String>,
    pub extra: String,
    pub source_type: SourceType,
}

/// Knowledge entry with its derived token set, ready for scoring.
/// Tokens are computed once at index-construction time and never serialized.
#[derive(Debug, Clone)]
pub struct IndexedEntry {
    pub entry: KnowledgeEntry,
    pub tokens: HashSet<String>,
}

/// Extraction strategy for a dynamic source's raw payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    Generic,
    Admissions,
    Institutional,
    Downloads,
}

/// Declaration of one external content feed
#[derive(Debug, Clone)]
pub struct DynamicSource {
    pub id: &'static str,
    pub title: &'static str,
    pub url: &'static str,
    pub keywords: &'static [&'static str],
    pub section: Option<&'static str>,
    pub endpoint: Endpoint,
    pub keys: &'static [&'static str],
    pub extractor: ExtractorKind,
}

/// Entry scored against one user query
#[derive(Debug, Clone)]
pub struct ScoredEntry<'a> {
    pub entry: &'a IndexedEntry,
    pub score: f32,
}

/// Result of matching a query against the knowledge index
#[derive(Debug, Clone)]
pub struct MatchOutcome<'a> {
    pub matches: Vec<ScoredEntry<'a>>,
    pub top_score: f32,
    pub normalized_message: String,
}

/// Grounding context forwarded to the fallback backend.
/// Deliberately limited to title, url and summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextItem {
    pub title: String,
    pub url: String,
    pub summary: String,
}
