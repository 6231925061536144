use crate::models::{Event, UserPreferences};
use crate::search::{any_field_contains, contains_ignore_case, normalize_term};

/// Narrow the catalog to the user's region and interests.
///
/// Region: location must contain the selected state. Interests: category
/// equals an interest, or title/description mentions one. An empty result
/// falls back to the region-only result, then to the whole catalog, so the
/// panel is never blank.
pub fn filter_events_for_preferences(catalog: &[Event], preferences: &UserPreferences) -> Vec<Event> {
    let regional: Vec<&Event> = match normalize_term(&preferences.state) {
        Some(state) => catalog
            .iter()
            .filter(|event| contains_ignore_case(&event.location, state))
            .collect(),
        None => catalog.iter().collect(),
    };

    let interests: Vec<&str> = preferences
        .interests
        .iter()
        .filter_map(|i| normalize_term(i))
        .collect();

    let matched: Vec<&Event> = if interests.is_empty() {
        regional.clone()
    } else {
        regional
            .iter()
            .copied()
            .filter(|event| matches_any_interest(event, &interests))
            .collect()
    };

    let chosen = if !matched.is_empty() {
        matched
    } else if !regional.is_empty() {
        regional
    } else {
        catalog.iter().collect()
    };

    chosen.into_iter().cloned().collect()
}

fn matches_any_interest(event: &Event, interests: &[&str]) -> bool {
    interests.iter().any(|interest| {
        event.category == *interest
            || any_field_contains(&[event.title.as_str(), event.description.as_str()], interest)
    })
}

/// Display filter: `None` means "all events"
pub fn filter_events_by_category(events: &[Event], category: Option<&str>) -> Vec<Event> {
    match category {
        Some(category) => events
            .iter()
            .filter(|event| event.category == category)
            .cloned()
            .collect(),
        None => events.to_vec(),
    }
}

/// Distinct categories in first-seen order
pub fn event_categories(events: &[Event]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for event in events {
        if !categories.contains(&event.category) {
            categories.push(event.category.clone());
        }
    }
    categories
}
