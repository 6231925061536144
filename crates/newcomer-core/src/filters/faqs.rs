use crate::models::FaqItem;
use crate::search::{any_field_contains, normalize_term};

/// Search question or answer text, then restrict to one category.
/// An empty search term or an empty category leaves that step out.
pub fn filter_faqs(faqs: &[FaqItem], search_term: &str, category: &str) -> Vec<FaqItem> {
    let term = normalize_term(search_term);
    faqs.iter()
        .filter(|faq| match term {
            Some(term) => any_field_contains(&[faq.question.as_str(), faq.answer.as_str()], term),
            None => true,
        })
        .filter(|faq| category.is_empty() || faq.category.as_deref() == Some(category))
        .cloned()
        .collect()
}

/// Distinct non-empty categories in first-seen order
pub fn faq_categories(faqs: &[FaqItem]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for category in faqs.iter().filter_map(|faq| faq.category.as_deref()) {
        if !category.is_empty() && !categories.iter().any(|c| c == category) {
            categories.push(category.to_string());
        }
    }
    categories
}
