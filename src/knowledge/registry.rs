use crate::knowledge::site_api::Endpoint;
use crate::knowledge::types::{DynamicSource, ExtractorKind, KnowledgeEntry, SourceType};

fn static_entry(
    id: &str,
    title: &str,
    url: &str,
    summary: &str,
    keywords: &[&str],
    details: &[&str],
    actions: &[&str],
) -> KnowledgeEntry {
    KnowledgeEntry {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        summary: summary.to_string(),
        keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
        details: details.iter().map(|detail| detail.to_string()).collect(),
        actions: actions.iter().map(|action| action.to_string()).collect(),
        extra: String::new(),
        source_type: SourceType::Static,
    }
}

/// Hand-authored entries, one per main site page or section.
pub fn static_entries() -> Vec<KnowledgeEntry> {
    vec![
        static_entry(
            "home",
            "Home",
            "/",
            "Overview of City College of Bayawan, highlights, quick links, announcements, and featured updates.",
            &[
                "home", "homepage", "overview", "ccb", "highlights", "welcome", "quick links",
                "announcements", "updates",
            ],
            &[
                "Latest announcements, events, achievements, and news highlights",
                "Hero sections and campus overview content",
                "Quick links to Admissions, Academics, and Contact",
            ],
            &[
                "Browse the latest updates carousel",
                "Jump to featured sections and quick links",
                "Open News & Events for full listings",
            ],
        ),
        static_entry(
            "services-menu",
            "Services Menu",
            "/",
            "Services dropdown in the main navigation for library, GIYA Center, student affairs, and registrar.",
            &[
                "services", "menu", "dropdown", "library", "giya", "student affairs", "registrar",
            ],
            &[
                "Services dropdown is in the top navigation bar",
                "Links open in a new tab for official service pages",
            ],
            &[
                "Open the Services dropdown in the navbar",
                "Select the service link you need",
            ],
        ),
        static_entry(
            "academics",
            "Academic Programs",
            "/academics",
            "Programs, course offerings, program details, and academic pathways for each department.",
            &[
                "academics", "programs", "courses", "curriculum", "degree", "program list",
                "department", "specialization",
            ],
            &[
                "Degree program list with descriptions and durations",
                "Program overviews, core courses, and career prospects",
                "Specializations and department information",
            ],
            &[
                "Review program descriptions and course outlines",
                "Compare program duration and units",
                "Check specializations within each program",
            ],
        ),
        static_entry(
            "admissions",
            "Admissions",
            "/admissions",
            "Admission requirements, enrollment process, and step-by-step guidance for new and transferring students.",
            &[
                "admissions", "apply", "application", "requirements", "enrollment",
                "how to apply", "steps", "process",
            ],
            &[
                "Requirements per applicant category (scholar/non-scholar, new/continuing)",
                "Enrollment process steps and timelines",
                "Important notes and reminders",
            ],
            &[
                "Choose your applicant category tab",
                "Follow the enrollment steps in order",
                "Use Contact Us for admissions inquiries",
            ],
        ),
        static_entry(
            "students",
            "Students",
            "/students",
            "Student resources, guidelines, activities, support services, and campus life information.",
            &[
                "students", "student services", "guidelines", "activities", "resources",
                "campus life", "support",
            ],
            &[
                "Student handbook and academic calendar",
                "Student services and campus life highlights",
                "Campus activities and event listings",
            ],
            &[
                "Open the student handbook and calendar sections",
                "Review campus activities and events",
                "Explore student services and support",
            ],
        ),
        static_entry(
            "faculty",
            "Faculty & Staff",
            "/faculty",
            "Faculty and staff directory, departments, academic leadership, and contacts.",
            &[
                "faculty", "staff", "departments", "directory", "professors", "instructors",
                "contacts",
            ],
            &[
                "Department directory with heads and contacts",
                "Faculty and staff listings by department",
                "Administrative offices and support units",
            ],
            &[
                "Locate a department contact",
                "Review department personnel lists",
                "Find administrative office details",
            ],
        ),
        static_entry(
            "about",
            "About Us",
            "/about",
            "Mission, vision, goals, core values, and institutional background of the college.",
            &[
                "about", "mission", "vision", "goals", "core values", "history", "background",
                "institution",
            ],
            &[
                "Institutional history and milestones",
                "Mission, vision, goals, and core values",
                "Administrative officers and facilities",
            ],
            &[
                "Open Mission & Vision details",
                "Review the organizational chart",
                "Check administrative officers and campus facilities",
            ],
        ),
        static_entry(
            "news",
            "News & Events",
            "/news",
            "Latest announcements, events, achievements, and campus updates.",
            &[
                "news", "events", "announcements", "updates", "achievements", "latest", "recent",
                "campus",
            ],
            &[
                "Announcements, news, achievements, and events sections",
                "Calendar view with dates and highlights",
                "Modal details for each item",
            ],
            &[
                "Open the Events section: [Events](/news?section=events)",
                "Open the News section: [News](/news?section=news)",
                "Open Announcements: [Announcements](/news?section=announcements)",
                "Open Achievements: [Achievements](/news?section=achievements)",
            ],
        ),
        static_entry(
            "downloads",
            "Downloads",
            "/downloads",
            "Forms, documents, and downloadable resources for students and staff.",
            &["downloads", "forms", "documents", "resources", "files", "pdf"],
            &[
                "Enrollment, clearance, and request forms",
                "HR policies, HR forms, syllabi, manuals, and handbooks",
                "Category-based downloads with pagination",
            ],
            &[
                "Open Forms section: [Forms](/downloads#forms)",
                "Open HR Policies & Forms: [HR Policies](/downloads#hr-policies)",
                "Open Documents section: [Syllabi & Manuals](/downloads#documents)",
            ],
        ),
        static_entry(
            "contact",
            "Contact Us",
            "/contact",
            "Contact form, email verification, and ways to reach the college.",
            &[
                "contact", "email", "inquiries", "support", "reach us", "message", "help",
            ],
            &[
                "Contact form with subject categories",
                "Office address, phone numbers, and email",
                "Campus location map",
            ],
            &[
                "Send a message using the contact form",
                "Check office hours and contact details",
                "Use the map to locate the campus",
            ],
        ),
        static_entry(
            "ccb-logo",
            "CCB Logo",
            "/ccb-logo",
            "Official college logo and branding assets.",
            &["logo", "branding", "ccb logo", "assets", "identity", "seal"],
            &[
                "Official branding elements and logo assets",
                "Usage guidance for CCB identity",
            ],
            &[
                "View and reference official logo assets",
                "Review branding guidelines if available",
            ],
        ),
    ]
}

/// Declared feeds, fetched fresh on every knowledge load.
/// Order is fixed; each source names the site API operation that supplies it.
pub fn dynamic_sources() -> Vec<DynamicSource> {
    vec![
        DynamicSource {
            id: "academic-programs",
            title: "Academic Programs",
            url: "/academics",
            keywords: &["academics", "programs", "courses"],
            section: None,
            endpoint: Endpoint::AcademicPrograms,
            keys: &["programs"],
            extractor: ExtractorKind::Generic,
        },
        DynamicSource {
            id: "news-events",
            title: "News & Events",
            url: "/news",
            keywords: &["news", "events", "updates"],
            section: None,
            endpoint: Endpoint::NewsEvents,
            keys: &["news_items", "news", "events"],
            extractor: ExtractorKind::Generic,
        },
        DynamicSource {
            id: "announcements",
            title: "Announcements",
            url: "/news",
            keywords: &["announcements", "updates", "notices"],
            section: Some("announcements"),
            endpoint: Endpoint::Announcements,
            keys: &["announcements"],
            extractor: ExtractorKind::Generic,
        },
        DynamicSource {
            id: "events",
            title: "Events",
            url: "/news",
            keywords: &["events", "calendar", "activities"],
            section: Some("events"),
            endpoint: Endpoint::Events,
            keys: &["events"],
            extractor: ExtractorKind::Generic,
        },
        DynamicSource {
            id: "achievements",
            title: "Achievements",
            url: "/news",
            keywords: &["achievements", "awards", "recognition"],
            section: Some("achievements"),
            endpoint: Endpoint::Achievements,
            keys: &["achievements"],
            extractor: ExtractorKind::Generic,
        },
        DynamicSource {
            id: "news",
            title: "News",
            url: "/news",
            keywords: &["news", "announcements", "latest"],
            section: Some("news"),
            endpoint: Endpoint::News,
            keys: &["news"],
            extractor: ExtractorKind::Generic,
        },
        DynamicSource {
            id: "downloads",
            title: "Downloads",
            url: "/downloads",
            keywords: &["downloads", "forms", "documents"],
            section: None,
            endpoint: Endpoint::Downloads,
            keys: &["downloads"],
            extractor: ExtractorKind::Downloads,
        },
        DynamicSource {
            id: "departments",
            title: "Departments",
            url: "/faculty",
            keywords: &["departments", "faculty", "staff"],
            section: None,
            endpoint: Endpoint::Departments,
            keys: &["departments"],
            extractor: ExtractorKind::Generic,
        },
        DynamicSource {
            id: "personnel",
            title: "Faculty & Staff",
            url: "/faculty",
            keywords: &["faculty", "staff", "personnel"],
            section: None,
            endpoint: Endpoint::Personnel,
            keys: &["personnel"],
            extractor: ExtractorKind::Generic,
        },
        DynamicSource {
            id: "institutional-info",
            title: "Institutional Info",
            url: "/about",
            keywords: &["mission", "vision", "goals", "core values", "about"],
            section: None,
            endpoint: Endpoint::InstitutionalInfo,
            keys: &["institutional_info"],
            extractor: ExtractorKind::Institutional,
        },
        DynamicSource {
            id: "admissions-info",
            title: "Admissions",
            url: "/admissions",
            keywords: &["admissions", "requirements", "enrollment"],
            section: None,
            endpoint: Endpoint::AdmissionsInfo,
            keys: &[],
            extractor: ExtractorKind::Admissions,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_entries_are_complete() {
        let entries = static_entries();
        assert_eq!(entries.len(), 11);
        for entry in &entries {
            assert!(!entry.title.is_empty());
            assert!(!entry.url.is_empty());
            assert!(!entry.summary.is_empty());
            assert!(!entry.keywords.is_empty());
            assert_eq!(entry.source_type, SourceType::Static);
        }
    }

    #[test]
    fn test_static_entry_ids_are_unique() {
        let entries = static_entries();
        let mut ids: Vec<&str> = entries.iter().map(|entry| entry.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), entries.len());
    }

    #[test]
    fn test_dynamic_sources_are_declared_once() {
        let sources = dynamic_sources();
        assert_eq!(sources.len(), 11);
        let mut ids: Vec<&str> = sources.iter().map(|source| source.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 11);
    }

    #[test]
    fn test_sectioned_sources_share_the_news_page() {
        let sources = dynamic_sources();
        for id in ["announcements", "events", "achievements", "news"] {
            let source = sources.iter().find(|source| source.id == id).unwrap();
            assert_eq!(source.url, "/news");
            assert_eq!(source.section, Some(id));
        }
    }
}
