//! Form auto-fill: merges an `ExtractedData` record into the application form.
//!
//! Only fields the extractor actually found are written; everything else keeps
//! whatever the applicant already typed.

use serde::{Deserialize, Serialize};

use crate::resume::ExtractedData;

/// State of the job-application form as the client holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationForm {
    // Personal info
    pub full_name: String,
    pub email: String,
    pub phone: String,

    // Contact
    pub location: String,
    pub linked_in: String,
    pub portfolio: String,

    // Experience
    pub current_role: String,
    pub years_of_experience: String,
    pub has_experience: bool,
    pub company: String,

    // Resume
    pub resume_file_name: String,

    // Additional
    pub cover_letter: String,
    pub availability: String,
    pub salary: String,
    pub remote: String,

    pub auto_fill_completed: bool,
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            linked_in: String::new(),
            portfolio: String::new(),
            current_role: String::new(),
            years_of_experience: String::new(),
            has_experience: false,
            company: String::new(),
            resume_file_name: String::new(),
            cover_letter: String::new(),
            availability: "immediately".to_string(),
            salary: String::new(),
            remote: "hybrid".to_string(),
            auto_fill_completed: false,
        }
    }
}

impl ApplicationForm {
    /// Copies every present field of `data` into the form and marks auto-fill done.
    /// Returns the wire names of the fields that were written.
    pub fn apply_extracted(&mut self, data: &ExtractedData) -> Vec<&'static str> {
        let mut filled = Vec::new();

        let targets: [(&'static str, &Option<String>, &mut String); 6] = [
            ("fullName", &data.full_name, &mut self.full_name),
            ("email", &data.email, &mut self.email),
            ("phone", &data.phone, &mut self.phone),
            ("location", &data.location, &mut self.location),
            ("linkedIn", &data.linked_in, &mut self.linked_in),
            ("portfolio", &data.portfolio, &mut self.portfolio),
        ];

        for (name, source, target) in targets {
            if let Some(value) = source {
                target.clone_from(value);
                filled.push(name);
            }
        }

        self.auto_fill_completed = true;
        filled
    }

    pub fn attach_resume(&mut self, file_name: &str) {
        self.resume_file_name = file_name.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::extract_data_from_text;

    #[test]
    fn test_default_form_matches_client_initial_state() {
        let form = ApplicationForm::default();
        assert_eq!(form.availability, "immediately");
        assert_eq!(form.remote, "hybrid");
        assert!(!form.auto_fill_completed);
    }

    #[test]
    fn test_apply_fills_present_fields_only() {
        let mut form = ApplicationForm {
            phone: "555-0000".to_string(),
            portfolio: "https://janedoe.com".to_string(),
            current_role: "Staff Engineer".to_string(),
            ..Default::default()
        };
        let data = extract_data_from_text("Jane Doe\njane@example.com\nAustin, TX 78701");

        let filled = form.apply_extracted(&data);

        assert_eq!(filled, vec!["fullName", "email", "location"]);
        assert_eq!(form.full_name, "Jane Doe");
        assert_eq!(form.email, "jane@example.com");
        assert_eq!(form.location, "Austin, TX");
        // untouched
        assert_eq!(form.phone, "555-0000");
        assert_eq!(form.portfolio, "https://janedoe.com");
        assert_eq!(form.current_role, "Staff Engineer");
        assert!(form.auto_fill_completed);
    }

    #[test]
    fn test_apply_overwrites_existing_values_when_found() {
        let mut form = ApplicationForm {
            email: "old@example.com".to_string(),
            ..Default::default()
        };
        form.apply_extracted(&extract_data_from_text("new@example.com"));
        assert_eq!(form.email, "new@example.com");
    }

    #[test]
    fn test_apply_empty_extraction_still_marks_completed() {
        let mut form = ApplicationForm::default();
        let filled = form.apply_extracted(&ExtractedData::default());
        assert!(filled.is_empty());
        assert_eq!(form.full_name, "");
        assert!(form.auto_fill_completed);
    }

    #[test]
    fn test_attach_resume() {
        let mut form = ApplicationForm::default();
        form.attach_resume("Jane_Doe_Resume.pdf");
        assert_eq!(form.resume_file_name, "Jane_Doe_Resume.pdf");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let form: ApplicationForm =
            serde_json::from_str(r#"{"fullName": "Alex Kim", "linkedIn": "x"}"#).unwrap();
        assert_eq!(form.full_name, "Alex Kim");
        assert_eq!(form.linked_in, "x");
        assert_eq!(form.remote, "hybrid");
    }
}
