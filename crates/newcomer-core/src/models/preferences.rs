use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Personal attributes that drive every personalized panel.
///
/// The record is replaced as a whole; the `with_*` helpers return a merged
/// copy so callers can build the next record before handing it to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub visa_status: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub language_preference: String,
    #[serde(default)]
    pub interests: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceField {
    VisaStatus,
    State,
    Country,
    LanguagePreference,
    Interests,
}

/// Set of fields that differ between two preference records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangedFields(Vec<PreferenceField>);

impl ChangedFields {
    pub fn contains(&self, field: PreferenceField) -> bool {
        self.0.contains(&field)
    }

    pub fn contains_any(&self, fields: &[PreferenceField]) -> bool {
        fields.iter().any(|f| self.contains(*f))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl UserPreferences {
    pub fn with_visa_status(&self, visa_status: impl Into<String>) -> Self {
        Self {
            visa_status: visa_status.into(),
            ..self.clone()
        }
    }

    pub fn with_state(&self, state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            ..self.clone()
        }
    }

    pub fn with_country(&self, country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..self.clone()
        }
    }

    pub fn with_language(&self, language: impl Into<String>) -> Self {
        Self {
            language_preference: language.into(),
            ..self.clone()
        }
    }

    /// Add the interest if absent, remove it if present
    pub fn with_interest_toggled(&self, interest: &str) -> Self {
        let mut next = self.clone();
        if !next.interests.remove(interest) {
            next.interests.insert(interest.to_string());
        }
        next
    }

    /// FAQs can only be requested once both status and language are chosen
    pub fn has_faq_inputs(&self) -> bool {
        !self.visa_status.trim().is_empty() && !self.language_preference.trim().is_empty()
    }

    pub fn interests_vec(&self) -> Vec<String> {
        self.interests.iter().cloned().collect()
    }

    pub fn changed_fields(&self, next: &UserPreferences) -> ChangedFields {
        let mut changed = Vec::new();
        if self.visa_status != next.visa_status {
            changed.push(PreferenceField::VisaStatus);
        }
        if self.state != next.state {
            changed.push(PreferenceField::State);
        }
        if self.country != next.country {
            changed.push(PreferenceField::Country);
        }
        if self.language_preference != next.language_preference {
            changed.push(PreferenceField::LanguagePreference);
        }
        if self.interests != next.interests {
            changed.push(PreferenceField::Interests);
        }
        ChangedFields(changed)
    }
}
