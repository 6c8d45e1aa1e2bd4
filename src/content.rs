//! Résumé content shown when a target goes down
//!
//! The document is optional: anything missing or malformed leaves that
//! section empty and the popup falls back to placeholder text.

use serde::{Deserialize, Serialize};

use crate::sim::Section;

/// One project entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub desc: String,
}

/// Contact details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    pub linkedin: String,
}

/// Résumé document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub skills: Option<Vec<String>>,
    pub projects: Option<Vec<Project>>,
    pub education: Option<Vec<String>>,
    pub contact: Option<Contact>,
}

/// Popup title and body lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<String>,
}

impl ResumeData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse, or start empty if the document is malformed
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            log::warn!("resume document unreadable ({}), using placeholders", e);
            Self::default()
        })
    }

    /// Body text for a section
    pub fn section_lines(&self, section: Section) -> Vec<String> {
        match section {
            Section::Skills => match &self.skills {
                Some(skills) => vec![skills.join(", ")],
                None => vec!["Skills info.".to_string()],
            },
            Section::Projects => match &self.projects {
                Some(projects) => projects
                    .iter()
                    .map(|p| format!("{}: {}", p.name, p.desc))
                    .collect(),
                None => vec!["Projects info.".to_string()],
            },
            Section::Education => match &self.education {
                Some(education) => education.clone(),
                None => vec!["Education info.".to_string()],
            },
            Section::Contact => match &self.contact {
                Some(contact) => vec![
                    format!("📧 {}", contact.email),
                    format!("🔗 {}", contact.linkedin),
                ],
                None => vec!["Contact info.".to_string()],
            },
        }
    }

    /// Popup for a target label; unknown labels get a generic body
    pub fn popup(&self, label: &str) -> Popup {
        let lines = match Section::from_label(label) {
            Some(section) => self.section_lines(section),
            None => vec!["Info".to_string()],
        };
        Popup {
            title: label.to_string(),
            lines,
        }
    }

    /// Link for the congrats screen
    pub fn profile_link(&self) -> &str {
        self.contact
            .as_ref()
            .map(|c| c.linkedin.as_str())
            .filter(|link| !link.is_empty())
            .unwrap_or("#")
    }
}

/// Fetch the résumé document once; any failure yields empty data
#[cfg(target_arch = "wasm32")]
pub async fn fetch_resume(url: &str) -> ResumeData {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    async fn fetch_text(url: &str) -> Option<String> {
        let window = web_sys::window()?;
        let response = JsFuture::from(window.fetch_with_str(url)).await.ok()?;
        let response: web_sys::Response = response.dyn_into().ok()?;
        if !response.ok() {
            return None;
        }
        let text = JsFuture::from(response.text().ok()?).await.ok()?;
        text.as_string()
    }

    match fetch_text(url).await {
        Some(json) => ResumeData::from_json_or_default(&json),
        None => {
            log::warn!("{} not found", url);
            ResumeData::default()
        }
    }
}
