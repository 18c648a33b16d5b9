// src/store/catalog.rs

use crate::{
    error::AppError,
    models::course::{Course, CourseType, derive_key},
};

/// Ordered list of course offerings. Courses are only ever appended.
#[derive(Debug, Default)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

impl CourseCatalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// All courses in insertion order.
    pub fn list(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Appends a course unless one with the same name (ignoring case) or the
    /// same derived key exists.
    pub fn add(&mut self, course: Course) -> Result<(), AppError> {
        let lowered = course.name.to_lowercase();
        if self.courses.iter().any(|c| c.name.to_lowercase() == lowered) {
            return Err(AppError::DuplicateName(course.name));
        }

        let key = course.key();
        if let Some(existing) = self.courses.iter().find(|c| c.key() == key) {
            return Err(AppError::Conflict(format!(
                "'{}' would share the course key '{}' with '{}'",
                course.name, key, existing.name
            )));
        }
        self.courses.push(course);
        Ok(())
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.name == name)
    }

    pub fn find_by_key(&self, key: &str) -> Option<&Course> {
        self.courses.iter().find(|c| derive_key(&c.name) == key)
    }

    /// Filters by track and by a case-insensitive search over name and description.
    pub fn filter(&self, course_type: Option<CourseType>, query: Option<&str>) -> Vec<&Course> {
        let needle = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();
        self.courses
            .iter()
            .filter(|c| course_type.is_none_or(|t| c.course_type == t))
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::initial_courses;

    #[test]
    fn test_add_rejects_case_variant() {
        let mut catalog = CourseCatalog::default();
        catalog.add(Course::new("X", CourseType::Functional, "first")).unwrap();

        let err = catalog
            .add(Course::new("x", CourseType::Technical, "second"))
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateName(ref n) if n == "x"));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.list()[0].name, "X");
    }

    #[test]
    fn test_add_rejects_key_collision() {
        let mut catalog = CourseCatalog::new(initial_courses());

        let err = catalog
            .add(Course::new(
                "SAP S/4HANA Financial Accounting (FI/CO) Advanced",
                CourseType::Functional,
                "Same first thirty key characters",
            ))
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref m) if m.contains("saps4hanafinancialaccountingfi")));
        assert_eq!(catalog.len(), 20);
        assert_eq!(
            catalog.find_by_key("saps4hanafinancialaccountingfi").unwrap().name,
            "SAP S/4HANA Financial Accounting (FI/CO)"
        );
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut catalog = CourseCatalog::new(initial_courses());
        catalog
            .add(Course::new("SAP Signavio", CourseType::Functional, "Process mining"))
            .unwrap();
        assert_eq!(catalog.len(), 21);
        assert_eq!(catalog.list().last().unwrap().name, "SAP Signavio");
    }

    #[test]
    fn test_filter_by_type_and_text() {
        let catalog = CourseCatalog::new(initial_courses());

        assert_eq!(catalog.filter(Some(CourseType::Technical), None).len(), 10);
        assert_eq!(catalog.filter(None, None).len(), 20);

        let hits = catalog.filter(None, Some("PROCUREMENT"));
        assert!(hits.iter().any(|c| c.name == "SAP S/4HANA Materials Management (MM)"));

        let hits = catalog.filter(Some(CourseType::Technical), Some("fiori"));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_find_by_key() {
        let catalog = CourseCatalog::new(initial_courses());
        let course = catalog.find_by_key("sapfioriui5development").unwrap();
        assert_eq!(course.name, "SAP Fiori/UI5 Development");
        assert!(catalog.find_by_key("nope").is_none());
    }
}
