use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    /// The backend may omit ids; missing ones are assigned on receipt
    #[serde(default)]
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Give every item without an id a positional one ("faq-1", "faq-2", ...)
pub fn assign_missing_ids(items: &mut [FaqItem]) {
    for (index, item) in items.iter_mut().enumerate() {
        if item.id.trim().is_empty() {
            item.id = format!("faq-{}", index + 1);
        }
    }
}

/// Status line shown above the FAQ list
pub fn faq_status_line(visa_status: &str, language: &str) -> String {
    if visa_status.trim().is_empty() || language.trim().is_empty() {
        "Please select your visa status and language preference in the sidebar to see relevant FAQs."
            .to_string()
    } else {
        format!("Showing FAQs for {} in {}", visa_status, language)
    }
}
