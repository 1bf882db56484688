use serde_json::Value;

use crate::knowledge::types::{DynamicSource, ExtractorKind, KnowledgeEntry, SourceType};
use crate::text::tokenize;

/// Dynamic entry summaries are cut to this many characters.
pub const SUMMARY_CHAR_LIMIT: usize = 260;

/// Field priority for assembling a summary out of a raw record.
const SUMMARY_FIELDS: &[&str] = &[
    "description",
    "summary",
    "details",
    "body",
    "content",
    "overview",
    "program_overview",
    "career_prospects",
    "requirement_text",
    "text",
    "title",
    "name",
    "department_name",
    "position",
    "role",
    "goals",
    "core_values",
    "mission",
    "vision",
    "duration_text",
    "units_text",
    "enhancements_text",
];

const TITLE_FIELDS: &[&str] = &[
    "title",
    "name",
    "department_name",
    "position",
    "role",
    "short_title",
];

const GENERIC_ACTIONS: [&str; 2] = [
    "Open the page for full details",
    "Ask for a specific item to narrow the result",
];

/// Pull usable text out of an arbitrary JSON value. Strings pass through,
/// arrays contribute their non-empty string elements, everything else is
/// dropped. Feeds occasionally ship list-valued fields, so this keeps
/// extraction tolerant of schema drift.
pub fn extract_text_from_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|item| !item.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    }
}

/// Non-empty string field lookup.
fn string_field<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// Renderable scalar field: non-empty strings as-is, numbers formatted.
fn display_field(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// First usable title-like field, else the fallback.
pub fn build_title_from_item(item: &Value, fallback: &str) -> String {
    TITLE_FIELDS
        .iter()
        .find_map(|field| string_field(item, field))
        .unwrap_or(fallback)
        .to_string()
}

/// Concatenate every recognized descriptive field in priority order.
/// Returns the fallback only when nothing usable is present.
pub fn build_summary_from_item(item: &Value, fallback: &str) -> String {
    if !item.is_object() {
        return fallback.to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    for field in SUMMARY_FIELDS {
        let value = extract_text_from_value(item.get(*field));
        if !value.is_empty() {
            parts.push(value);
        }
    }
    for field in ["core_courses", "specializations"] {
        let value = extract_text_from_value(item.get(field));
        if !value.is_empty() {
            parts.push(value);
        }
    }

    let summary = parts.join(" ").trim().to_string();
    if summary.is_empty() {
        fallback.to_string()
    } else {
        summary
    }
}

/// One line per recognized structured field, in a fixed order.
/// Absent fields are omitted without placeholders.
pub fn build_details_from_item(item: &Value) -> Vec<String> {
    let mut details = Vec::new();
    if !item.is_object() {
        return details;
    }

    let date = ["date", "event_date", "achievement_date"]
        .iter()
        .find_map(|field| display_field(item, field));
    if let Some(date) = date {
        details.push(format!("Date: {date}"));
    }
    if let Some(location) = display_field(item, "location") {
        details.push(format!("Location: {location}"));
    }
    if let Some(time) = display_field(item, "formatted_time") {
        details.push(format!("Time: {time}"));
    } else if let (Some(start), Some(end)) = (
        display_field(item, "start_time"),
        display_field(item, "end_time"),
    ) {
        details.push(format!("Time: {start} - {end}"));
    }
    if let Some(category) = display_field(item, "category") {
        details.push(format!("Category: {category}"));
    }
    if let Some(department) = display_field(item, "department_name") {
        details.push(format!("Department: {department}"));
    }
    if let Some(office) = display_field(item, "office_location") {
        details.push(format!("Office: {office}"));
    }
    if let Some(phone) = display_field(item, "phone") {
        details.push(format!("Phone: {phone}"));
    }
    if let Some(email) = display_field(item, "email") {
        details.push(format!("Email: {email}"));
    }

    details
}

/// Locate the item array inside a response envelope. Accepts a bare array,
/// or an object carrying the array under the first matching candidate key.
pub fn resolve_items<'a>(data: &'a Value, keys: &[&str]) -> Vec<&'a Value> {
    if let Some(items) = data.as_array() {
        return items.iter().collect();
    }
    if data.is_object() {
        for key in keys {
            if let Some(items) = data.get(*key).and_then(Value::as_array) {
                return items.iter().collect();
            }
        }
    }
    Vec::new()
}

fn truncate_chars(input: &str, max_chars: usize) -> String {
    input.chars().take(max_chars).collect()
}

/// Ordered union of base keywords and tokens of the item title.
fn merge_keywords(base: &[&str], title: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for keyword in base
        .iter()
        .map(|keyword| keyword.to_string())
        .chain(tokenize(title))
    {
        if seen.insert(keyword.clone()) {
            keywords.push(keyword);
        }
    }
    keywords
}

/// Compose one dynamic entry out of a raw record.
pub fn build_dynamic_entry(
    source: &DynamicSource,
    base_url: &str,
    item: &Value,
    index: usize,
) -> KnowledgeEntry {
    let item_title = build_title_from_item(item, source.title);
    let summary = truncate_chars(
        &build_summary_from_item(item, source.title),
        SUMMARY_CHAR_LIMIT,
    );

    KnowledgeEntry {
        id: format!("{}-{}", source.id, index),
        title: format!("{}: {}", source.title, item_title),
        url: base_url.to_string(),
        summary: if summary.is_empty() {
            source.title.to_string()
        } else {
            summary
        },
        keywords: merge_keywords(source.keywords, &item_title),
        details: build_details_from_item(item),
        actions: GENERIC_ACTIONS.iter().map(|action| action.to_string()).collect(),
        extra: source.title.to_string(),
        source_type: SourceType::Dynamic,
    }
}

/// Hyphens to spaces, each word capitalized.
fn humanize_category(category: &str) -> String {
    category
        .replace('-', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Requirements and enrollment steps, one entry per item per category.
fn build_admissions_entries(data: &Value, limit: usize) -> Vec<KnowledgeEntry> {
    let mut entries = Vec::new();

    if let Some(requirements) = data
        .get("requirements_by_category")
        .and_then(Value::as_object)
    {
        for (category, items) in requirements {
            let Some(items) = items.as_array() else {
                continue;
            };
            let category_label = humanize_category(category);
            for (index, item) in items.iter().take(limit).enumerate() {
                let text = string_field(item, "text");
                entries.push(KnowledgeEntry {
                    id: format!("admissions-req-{category}-{index}"),
                    title: format!("Admissions Requirement: {}", text.unwrap_or(category)),
                    url: "/admissions".to_string(),
                    summary: text
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Requirements for {category}")),
                    keywords: vec![
                        "admissions".to_string(),
                        "requirements".to_string(),
                        category.to_lowercase(),
                        "new student".to_string(),
                        "continuing student".to_string(),
                        "scholar".to_string(),
                        "non scholar".to_string(),
                    ],
                    details: vec![format!("Category: {category_label}")],
                    actions: vec![
                        "Review the full requirements list for this category".to_string(),
                        "Follow the enrollment process steps below the requirements".to_string(),
                    ],
                    extra: "Admissions requirements".to_string(),
                    source_type: SourceType::Dynamic,
                });
            }
        }
    }

    if let Some(steps) = data
        .get("process_steps_by_category")
        .and_then(Value::as_object)
    {
        for (category, items) in steps {
            let Some(items) = items.as_array() else {
                continue;
            };
            let category_label = humanize_category(category);
            for (index, item) in items.iter().take(limit).enumerate() {
                let step_title = string_field(item, "title").map(str::to_string).unwrap_or_else(|| {
                    let number = display_field(item, "step_number")
                        .unwrap_or_else(|| (index + 1).to_string());
                    format!("Step {number}")
                });
                entries.push(KnowledgeEntry {
                    id: format!("admissions-step-{category}-{index}"),
                    title: format!("Enrollment Step: {step_title}"),
                    url: "/admissions".to_string(),
                    summary: string_field(item, "description")
                        .map(str::to_string)
                        .unwrap_or_else(|| step_title.clone()),
                    keywords: vec![
                        "admissions".to_string(),
                        "enrollment".to_string(),
                        "steps".to_string(),
                        category.to_lowercase(),
                        "new student".to_string(),
                        "continuing student".to_string(),
                        "scholar".to_string(),
                        "non scholar".to_string(),
                    ],
                    details: vec![format!("Category: {category_label}")],
                    actions: vec![
                        "Complete the steps in order".to_string(),
                        "Contact admissions if a step is unclear".to_string(),
                    ],
                    extra: "Enrollment process".to_string(),
                    source_type: SourceType::Dynamic,
                });
            }
        }
    }

    entries
}

fn field_is_present(item: &Value, key: &str) -> bool {
    match item.get(key) {
        Some(Value::Null) | None => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    }
}

/// Exactly one entry describing which institutional statements exist.
/// The detail lines announce presence only, never the statement text.
fn build_institutional_entry(data: &Value) -> Vec<KnowledgeEntry> {
    let info = match data.get("institutional_info") {
        Some(inner) if !inner.is_null() => inner,
        _ => data,
    };

    let mut details = Vec::new();
    if field_is_present(info, "mission") {
        details.push("Mission statement available".to_string());
    }
    if field_is_present(info, "vision") {
        details.push("Vision statement available".to_string());
    }
    if field_is_present(info, "goals") {
        details.push("Goals listed".to_string());
    }
    if field_is_present(info, "core_values") {
        details.push("Core values listed".to_string());
    }

    vec![KnowledgeEntry {
        id: "institutional-info".to_string(),
        title: "Institutional Information".to_string(),
        url: "/about".to_string(),
        summary: build_summary_from_item(info, "Institutional information"),
        keywords: vec![
            "mission".to_string(),
            "vision".to_string(),
            "goals".to_string(),
            "core values".to_string(),
            "about".to_string(),
        ],
        details,
        actions: vec![
            "Open About Us for the full mission and vision".to_string(),
            "Review goals and core values sections".to_string(),
        ],
        extra: "Institutional information".to_string(),
        source_type: SourceType::Dynamic,
    }]
}

/// Category anchor on the downloads page.
fn downloads_anchor(category: &str) -> &'static str {
    if category.starts_with("forms-") {
        "#forms"
    } else if category == "hr-policies" {
        "#hr-policies"
    } else if category == "hr-forms" {
        "#hr-forms"
    } else {
        "#documents"
    }
}

/// One entry per file item, anchored to its category's section.
fn build_downloads_entries(data: &Value, limit: usize) -> Vec<KnowledgeEntry> {
    let downloads = match data.get("downloads") {
        Some(inner) if inner.is_object() => inner,
        _ => data,
    };
    let Some(categories) = downloads.as_object() else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for (category, items) in categories {
        let Some(items) = items.as_array() else {
            continue;
        };
        let anchor = downloads_anchor(category);
        for (index, item) in items.iter().take(limit).enumerate() {
            entries.push(KnowledgeEntry {
                id: format!("downloads-{category}-{index}"),
                title: format!(
                    "Download: {}",
                    string_field(item, "title").unwrap_or(category)
                ),
                url: format!("/downloads{anchor}"),
                summary: string_field(item, "description")
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Downloadable file in {category}")),
                keywords: vec!["downloads".to_string(), category.to_string()],
                details: string_field(item, "file_type")
                    .map(|file_type| vec![format!("File type: {file_type}")])
                    .unwrap_or_default(),
                actions: vec![
                    "Open the download to view or save the file".to_string(),
                    "Browse other categories for related documents".to_string(),
                ],
                extra: "Downloads".to_string(),
                source_type: SourceType::Dynamic,
            });
        }
    }

    entries
}

/// Turn one source's raw fetch result into knowledge entries.
/// Never fails: malformed payloads simply produce fewer or plainer entries.
pub fn extract_entries(source: &DynamicSource, data: &Value, limit: usize) -> Vec<KnowledgeEntry> {
    match source.extractor {
        ExtractorKind::Admissions => build_admissions_entries(data, limit),
        ExtractorKind::Institutional => build_institutional_entry(data),
        ExtractorKind::Downloads => build_downloads_entries(data, limit),
        ExtractorKind::Generic => {
            let base_url = match source.section {
                Some(section) => format!("{}?section={}", source.url, section),
                None => source.url.to_string(),
            };
            resolve_items(data, source.keys)
                .into_iter()
                .take(limit)
                .enumerate()
                .map(|(index, item)| build_dynamic_entry(source, &base_url, item, index))
                .collect()
        }
    }
}
