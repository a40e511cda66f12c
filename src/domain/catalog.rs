use crate::domain::model::{CourseRecord, Level};
use crate::utils::error::{AppError, Result};
use std::path::Path;

const EMBEDDED_CATALOG: &str = include_str!("../../data/courses.json");

/// Read-only course list shown to the model as the only permitted recommendation source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<CourseRecord>,
}

impl Catalog {
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let courses: Vec<CourseRecord> =
            serde_json::from_str(content).map_err(|e| AppError::ConfigError {
                message: format!("Course catalog is not valid JSON: {}", e),
            })?;
        Self::new(courses)
    }

    pub fn new(courses: Vec<CourseRecord>) -> Result<Self> {
        if courses.is_empty() {
            return Err(AppError::ConfigError {
                message: "Course catalog is empty".to_string(),
            });
        }
        Ok(Self { courses })
    }

    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn count_by_level(&self, level: Level) -> usize {
        self.courses.iter().filter(|c| c.level == level).count()
    }

    /// Every record and field, pretty-printed with two-space indentation.
    pub fn to_prompt_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.courses)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.len(), 17);
        assert_eq!(
            catalog.courses()[0].title,
            "CS50's Introduction to Computer Science"
        );
        assert_eq!(catalog.count_by_level(Level::Advanced), 3);
    }

    #[test]
    fn test_prompt_json_keeps_order_and_fields() {
        let catalog = Catalog::from_json_str(
            r#"[
                {"title": "B", "provider": "P", "level": "Advanced", "duration": "1 week", "cost": "$10", "skills": "x, y", "link": "https://b.example"},
                {"title": "A", "provider": "Q", "level": "Beginner", "duration": "Short", "cost": "Free", "skills": "z", "link": "https://a.example"}
            ]"#,
        )
        .unwrap();

        let json = catalog.to_prompt_json().unwrap();
        assert!(json.starts_with("[\n  {\n    \"title\": \"B\""));
        assert!(json.find("\"title\": \"B\"").unwrap() < json.find("\"title\": \"A\"").unwrap());
        for field in ["provider", "level", "duration", "cost", "skills", "link"] {
            assert_eq!(json.matches(&format!("\"{}\"", field)).count(), 2);
        }
    }

    #[test]
    fn test_duplicates_are_permitted() {
        let record = r#"{"title": "Same", "provider": "P", "level": "Beginner", "duration": "d", "cost": "Free", "skills": "s", "link": "https://x.example"}"#;
        let catalog = Catalog::from_json_str(&format!("[{},{}]", record, record)).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            Catalog::from_json_str("[]"),
            Err(AppError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_unknown_level_rejected() {
        let result = Catalog::from_json_str(
            r#"[{"title": "T", "provider": "P", "level": "Expert", "duration": "d", "cost": "c", "skills": "s", "link": "l"}]"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"[{"title": "File Course", "provider": "P", "level": "Intermediate", "duration": "d", "cost": "c", "skills": "s", "link": "https://f.example"}]"#,
            )
            .unwrap();

        let catalog = Catalog::from_file(temp_file.path()).unwrap();
        assert_eq!(catalog.courses()[0].title, "File Course");
    }
}
