use std::collections::HashSet;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

// ───── Patterns ──────────────────────────────────────────────────────

/// Absolute HTTP(S) URL with at least one dot in the remainder.
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://.+\..+").unwrap()
});

/// Inline image payload produced by the upload-preview flow.
static BASE64_IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/[a-zA-Z0-9.+-]+;base64,[A-Za-z0-9+/=]+$").unwrap()
});

// ───── Database Model ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub technologies: Vec<String>,
    pub created_at: DateTime<Utc>,
}

// ───── API Requests ──────────────────────────────────────────────────

/// Incoming create payload. Every field is optional at the serde level so
/// that a missing field surfaces as our own validation message rather than
/// a deserializer error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub project_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub technologies: Option<Vec<String>>,
}

/// `technologies` must not bounce at the deserializer: a wrong-typed value
/// still has to reach the ordered checks so the caller gets the field's own
/// message. Anything that is not an array of strings counts as absent.
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect::<Option<Vec<_>>>(),
        _ => None,
    }))
}

/// Validated, trimmed fields ready for insertion.
#[derive(Debug, Clone)]
pub struct ProjectInsert {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub technologies: Vec<String>,
}

impl TryFrom<NewProjectRequest> for ProjectInsert {
    type Error = AppError;

    /// Checks run in a fixed order and the first failure wins.
    fn try_from(req: NewProjectRequest) -> Result<Self, Self::Error> {
        let title = match req.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => return Err(AppError::validation("title", "Title is required")),
        };

        let description = match req.description.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => return Err(AppError::validation("description", "Description is required")),
        };

        let technologies = match req.technologies {
            Some(techs) if !techs.is_empty() => techs,
            _ => {
                return Err(AppError::validation(
                    "technologies",
                    "At least one technology is required",
                ))
            }
        };

        let mut seen = HashSet::new();
        for tech in &technologies {
            if !seen.insert(tech.as_str()) {
                return Err(AppError::validation(
                    "technologies",
                    &format!("Duplicate technology: {}", tech),
                ));
            }
        }

        let image_url = normalize_optional(req.image_url);
        if let Some(url) = &image_url {
            if !URL_RE.is_match(url) && !BASE64_IMAGE_RE.is_match(url) {
                return Err(AppError::validation("imageUrl", "Invalid URL format"));
            }
        }

        let project_url = normalize_optional(req.project_url);
        if let Some(url) = &project_url {
            if !URL_RE.is_match(url) {
                return Err(AppError::validation("projectUrl", "Invalid URL format"));
            }
        }

        let github_url = normalize_optional(req.github_url);
        if let Some(url) = &github_url {
            if !URL_RE.is_match(url) {
                return Err(AppError::validation("githubUrl", "Invalid URL format"));
            }
        }

        Ok(ProjectInsert {
            title,
            description,
            image_url,
            project_url,
            github_url,
            technologies,
        })
    }
}

/// Empty strings from cleared form fields count as absent.
fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> NewProjectRequest {
        NewProjectRequest {
            title: Some("Demo".into()),
            description: Some("A demo".into()),
            technologies: Some(vec!["Go".into(), "Rust".into()]),
            ..Default::default()
        }
    }

    fn first_field(err: AppError) -> String {
        match err {
            AppError::ValidationError(details) => details[0].field.clone(),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn valid_request_passes_and_keeps_technology_order() {
        let insert = ProjectInsert::try_from(valid_request()).unwrap();
        assert_eq!(insert.technologies, vec!["Go", "Rust"]);
    }

    #[test]
    fn title_is_trimmed() {
        let mut req = valid_request();
        req.title = Some("  Demo  ".into());
        let insert = ProjectInsert::try_from(req).unwrap();
        assert_eq!(insert.title, "Demo");
    }

    #[test]
    fn missing_title_rejected() {
        let mut req = valid_request();
        req.title = None;
        assert_eq!(first_field(ProjectInsert::try_from(req).unwrap_err()), "title");
    }

    #[test]
    fn whitespace_title_rejected() {
        let mut req = valid_request();
        req.title = Some("   ".into());
        assert_eq!(first_field(ProjectInsert::try_from(req).unwrap_err()), "title");
    }

    #[test]
    fn title_failure_reported_before_other_failures() {
        let req = NewProjectRequest {
            title: Some("".into()),
            description: None,
            technologies: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(first_field(ProjectInsert::try_from(req).unwrap_err()), "title");
    }

    #[test]
    fn missing_description_rejected() {
        let mut req = valid_request();
        req.description = Some("  ".into());
        assert_eq!(
            first_field(ProjectInsert::try_from(req).unwrap_err()),
            "description"
        );
    }

    #[test]
    fn empty_technologies_rejected() {
        let mut req = valid_request();
        req.technologies = Some(vec![]);
        assert_eq!(
            first_field(ProjectInsert::try_from(req).unwrap_err()),
            "technologies"
        );
    }

    #[test]
    fn wrong_typed_technologies_fails_the_length_check() {
        let req: NewProjectRequest = serde_json::from_value(serde_json::json!({
            "title": "Demo",
            "description": "A demo",
            "technologies": "Go"
        }))
        .unwrap();
        assert!(req.technologies.is_none());
        assert_eq!(
            first_field(ProjectInsert::try_from(req).unwrap_err()),
            "technologies"
        );
    }

    #[test]
    fn non_string_technology_elements_count_as_absent() {
        let req: NewProjectRequest = serde_json::from_value(serde_json::json!({
            "title": "Demo",
            "description": "A demo",
            "technologies": ["Go", 5]
        }))
        .unwrap();
        assert!(req.technologies.is_none());
    }

    #[test]
    fn duplicate_technology_rejected_case_sensitively() {
        let mut req = valid_request();
        req.technologies = Some(vec!["Rust".into(), "Go".into(), "Rust".into()]);
        let err = ProjectInsert::try_from(req).unwrap_err();
        assert_eq!(first_field(err), "technologies");

        // Differing case is a distinct tag.
        let mut req = valid_request();
        req.technologies = Some(vec!["rust".into(), "Rust".into()]);
        assert!(ProjectInsert::try_from(req).is_ok());
    }

    #[test]
    fn malformed_project_url_rejected() {
        let mut req = valid_request();
        req.project_url = Some("not-a-url".into());
        assert_eq!(
            first_field(ProjectInsert::try_from(req).unwrap_err()),
            "projectUrl"
        );
    }

    #[test]
    fn malformed_github_url_rejected() {
        let mut req = valid_request();
        req.github_url = Some("ftp://example.com/repo".into());
        assert_eq!(
            first_field(ProjectInsert::try_from(req).unwrap_err()),
            "githubUrl"
        );
    }

    #[test]
    fn image_url_accepts_http_and_base64() {
        let mut req = valid_request();
        req.image_url = Some("https://example.com/logo.png".into());
        assert!(ProjectInsert::try_from(req).is_ok());

        let mut req = valid_request();
        req.image_url = Some("data:image/png;base64,iVBORw0KGgo=".into());
        assert!(ProjectInsert::try_from(req).is_ok());

        let mut req = valid_request();
        req.image_url = Some("/local/logo.png".into());
        assert_eq!(
            first_field(ProjectInsert::try_from(req).unwrap_err()),
            "imageUrl"
        );
    }

    #[test]
    fn blank_optional_urls_treated_as_absent() {
        let mut req = valid_request();
        req.project_url = Some("".into());
        req.github_url = Some("   ".into());
        let insert = ProjectInsert::try_from(req).unwrap();
        assert!(insert.project_url.is_none());
        assert!(insert.github_url.is_none());
    }
}
