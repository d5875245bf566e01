//! Resource names
//!
//! Hierarchical paths identifying product search entities:
//! `projects/{project}/locations/{location}/...`
//!
//! Identifiers are inserted exactly as given. Nothing is validated or
//! escaped here; a malformed identifier is rejected by the service.

use std::fmt;

/// Fully-qualified resource name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceName(String);

impl ResourceName {
    /// `projects/{project_id}/locations/{location}`
    pub fn location(project_id: &str, location: &str) -> Self {
        Self(format!("projects/{}/locations/{}", project_id, location))
    }

    /// `projects/{project_id}/locations/{location}/products/{product_id}`
    pub fn product(project_id: &str, location: &str, product_id: &str) -> Self {
        Self(format!(
            "projects/{}/locations/{}/products/{}",
            project_id, location, product_id
        ))
    }

    /// `projects/{project_id}/locations/{location}/products/{product_id}/referenceImages/{reference_image_id}`
    pub fn reference_image(
        project_id: &str,
        location: &str,
        product_id: &str,
        reference_image_id: &str,
    ) -> Self {
        Self(format!(
            "projects/{}/locations/{}/products/{}/referenceImages/{}",
            project_id, location, product_id, reference_image_id
        ))
    }

    /// `projects/{project_id}/locations/{location}/productSets/{product_set_id}`
    pub fn product_set(project_id: &str, location: &str, product_set_id: &str) -> Self {
        Self(format!(
            "projects/{}/locations/{}/productSets/{}",
            project_id, location, product_set_id
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
