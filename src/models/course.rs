// src/models/course.rs

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum length of a derived course key.
pub const COURSE_KEY_MAX_LEN: usize = 30;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]").expect("valid course key pattern"));

/// Course track shown in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseType {
    Functional,
    Technical,
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseType::Functional => f.write_str("Functional"),
            CourseType::Technical => f.write_str("Technical"),
        }
    }
}

/// A course offering. The name is the human key and is unique case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    #[serde(rename = "type")]
    pub course_type: CourseType,
    pub description: String,
}

impl Course {
    pub fn new(name: &str, course_type: CourseType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            course_type,
            description: description.to_string(),
        }
    }

    pub fn key(&self) -> String {
        derive_key(&self.name)
    }
}

/// Derives the question bank key for a course name.
///
/// Lowercases the name, strips everything that is not `a-z` or `0-9`
/// and keeps at most 30 characters.
pub fn derive_key(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "")
        .chars()
        .take(COURSE_KEY_MAX_LEN)
        .collect()
}

/// Catalog entry as returned to clients, including its derived key.
#[derive(Debug, Serialize)]
pub struct CourseView {
    pub key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub course_type: CourseType,
    pub description: String,
}

impl From<&Course> for CourseView {
    fn from(course: &Course) -> Self {
        Self {
            key: course.key(),
            name: course.name.clone(),
            course_type: course.course_type,
            description: course.description.clone(),
        }
    }
}

/// DTO for adding a new module to the catalog.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "Course name is required."))]
    pub name: String,
    #[serde(rename = "type")]
    pub course_type: CourseType,
    #[validate(length(min = 1, max = 2000, message = "Course description is required."))]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_strips_and_lowercases() {
        assert_eq!(
            derive_key("SAP S/4HANA Financial Accounting (FI/CO)"),
            "saps4hanafinancialaccountingfi"
        );
        assert_eq!(derive_key("SAP Fiori/UI5 Development"), "sapfioriui5development");
    }

    #[test]
    fn test_derive_key_truncates_to_thirty() {
        let key = derive_key("SAP Analytics Cloud (SAC) Design & Storyboarding");
        assert_eq!(key.len(), COURSE_KEY_MAX_LEN);
        assert_eq!(key, "sapanalyticscloudsacdesignstor");
    }

    #[test]
    fn test_derive_key_is_stable() {
        let name = "SAP Business Technology Platform (BTP) – Extension Suite";
        assert_eq!(derive_key(name), derive_key(name));
        assert_eq!(derive_key(name), "sapbusinesstechnologyplatformb");
    }

    #[test]
    fn test_course_type_wire_format() {
        let course = Course::new("X", CourseType::Technical, "d");
        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(json["type"], "Technical");
    }
}
