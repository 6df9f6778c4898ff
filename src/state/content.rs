/// The flyer content record
///
/// One instance lives for the whole session, owned by the app root and
/// mutated only through editor callbacks. It is serialized to JSON for the
/// optional save/load-draft feature.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of service entries; the editor mutates by index, never inserts.
pub const SERVICE_COUNT: usize = 5;

/// Errors raised by content mutations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    /// `set_service` was called with an index outside the fixed range
    #[error("service index {0} out of range (0..{SERVICE_COUNT})")]
    ServiceIndexOutOfRange(usize),
}

/// Scalar fields of the flyer, addressed by the editor bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Title,
    Bio,
    Phone,
    Email,
    Location,
    Instagram,
    Twitter,
    Github,
    Cta,
}

/// Everything the user types into the form.
///
/// All fields are free text — no format validation, matching the original
/// behavior. Every field has a non-empty default so the flyer renders
/// without any input at all.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FlyerContent {
    pub name: String,
    pub title: String,
    pub bio: String,
    /// Fixed-size list; see `set_service`
    pub services: Vec<String>,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub instagram: String,
    pub twitter: String,
    pub github: String,
    /// Call-to-action line shown in the closing block
    pub cta: String,
}

impl Default for FlyerContent {
    fn default() -> Self {
        Self {
            name: "Ugwu Chukwuma Emmanuel".into(),
            title: "Front-End Developer".into(),
            bio: "Passionate Front-End Developer with expertise in creating responsive, \
                  user-centric web applications. Specializing in React and TypeScript, \
                  I combine technical excellence with an eye for design to deliver \
                  exceptional digital experiences."
                .into(),
            services: vec![
                "Modern Frontend Development (React, TypeScript)".into(),
                "Responsive Web Design & Implementation".into(),
                "UI/UX Development with Tailwind CSS".into(),
                "Web Application Architecture & Optimization".into(),
                "Version Control & Collaborative Development".into(),
            ],
            phone: "+234 816 177 0490".into(),
            email: "echukwuma561@gmail.com".into(),
            location: "Enugu, Nigeria".into(),
            instagram: "emmanuel23670".into(),
            twitter: "CEmmanuel25543".into(),
            github: "github.com/Chukwwumaemmannuel233".into(),
            cta: "Ready to bring your web project to life? Let's create something \
                  extraordinary together!"
                .into(),
        }
    }
}

impl FlyerContent {
    /// Replace one scalar field. No validation by design.
    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Title => self.title = value,
            Field::Bio => self.bio = value,
            Field::Phone => self.phone = value,
            Field::Email => self.email = value,
            Field::Location => self.location = value,
            Field::Instagram => self.instagram = value,
            Field::Twitter => self.twitter = value,
            Field::Github => self.github = value,
            Field::Cta => self.cta = value,
        }
    }

    /// Replace one service entry.
    ///
    /// The list is fixed-size; an out-of-range index is an explicit error
    /// and leaves the record untouched.
    pub fn set_service(&mut self, index: usize, value: String) -> Result<(), ContentError> {
        match self.services.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(ContentError::ServiceIndexOutOfRange(index)),
        }
    }

    /// Serialize to JSON for a draft file
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from a draft file
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_complete() {
        let content = FlyerContent::default();
        assert!(!content.name.is_empty());
        assert!(!content.github.is_empty());
        assert_eq!(content.services.len(), SERVICE_COUNT);
        assert!(content.services.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_set_field_replaces_only_that_field() {
        let mut content = FlyerContent::default();
        let before = content.clone();
        content.set_field(Field::Email, "new@example.com".into());

        assert_eq!(content.email, "new@example.com");
        assert_eq!(content.name, before.name);
        assert_eq!(content.services, before.services);
    }

    #[test]
    fn test_set_service_touches_only_that_index() {
        let mut content = FlyerContent::default();
        let before = content.services.clone();
        content.set_service(2, "Something else".into()).unwrap();

        assert_eq!(content.services[2], "Something else");
        assert_eq!(content.services.len(), before.len());
        for i in [0, 1, 3, 4] {
            assert_eq!(content.services[i], before[i]);
        }
    }

    #[test]
    fn test_set_service_out_of_range_is_an_error() {
        let mut content = FlyerContent::default();
        let before = content.clone();

        let err = content.set_service(SERVICE_COUNT, "nope".into());
        assert_eq!(err, Err(ContentError::ServiceIndexOutOfRange(SERVICE_COUNT)));
        assert_eq!(content, before);
    }

    #[test]
    fn test_draft_round_trip() {
        let mut content = FlyerContent::default();
        content.set_field(Field::Name, "Ada Lovelace".into());
        content.set_service(0, "Analytical engines".into()).unwrap();

        let json = content.to_json().unwrap();
        let restored = FlyerContent::from_json(&json).unwrap();

        assert_eq!(content, restored);
    }
}
