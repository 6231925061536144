use serde::{Deserialize, Serialize};

/// A local event shown in the events panel. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub category: String,
    pub image_ref: String,
}

struct SampleEvent {
    id: &'static str,
    title: &'static str,
    date: &'static str,
    time: &'static str,
    location: &'static str,
    description: &'static str,
    category: &'static str,
    image_ref: &'static str,
}

const SAMPLE_EVENTS: &[SampleEvent] = &[
    SampleEvent {
        id: "1",
        title: "Immigration Workshop: Know Your Rights",
        date: "2024-01-15",
        time: "2:00 PM",
        location: "Community Center Downtown",
        description: "Free workshop covering basic immigration rights and resources available to new immigrants.",
        category: "Legal Services",
        image_ref: "https://images.pexels.com/photos/8369648/pexels-photo-8369648.jpeg?auto=compress&cs=tinysrgb&w=400",
    },
    SampleEvent {
        id: "2",
        title: "Job Fair for International Professionals",
        date: "2024-01-18",
        time: "10:00 AM",
        location: "Convention Center",
        description: "Connect with employers looking for international talent. Bring your resume and work authorization documents.",
        category: "Job Search",
        image_ref: "https://images.pexels.com/photos/1181396/pexels-photo-1181396.jpeg?auto=compress&cs=tinysrgb&w=400",
    },
    SampleEvent {
        id: "3",
        title: "English Conversation Club",
        date: "2024-01-12",
        time: "6:30 PM",
        location: "Public Library Main Branch",
        description: "Practice English conversation skills in a friendly, supportive environment. All levels welcome.",
        category: "Language Learning",
        image_ref: "https://images.pexels.com/photos/159844/books-students-library-university-159844.jpeg?auto=compress&cs=tinysrgb&w=400",
    },
    SampleEvent {
        id: "4",
        title: "Cultural Festival: Celebrating Diversity",
        date: "2024-01-20",
        time: "12:00 PM",
        location: "City Park",
        description: "Join us for a celebration of cultures with food, music, and dance from around the world.",
        category: "Cultural Events",
        image_ref: "https://images.pexels.com/photos/1190297/pexels-photo-1190297.jpeg?auto=compress&cs=tinysrgb&w=400",
    },
    SampleEvent {
        id: "5",
        title: "Housing Workshop for New Residents",
        date: "2024-01-22",
        time: "1:00 PM",
        location: "Housing Authority Office",
        description: "Learn about tenant rights, finding affordable housing, and understanding lease agreements.",
        category: "Housing",
        image_ref: "https://images.pexels.com/photos/1370704/pexels-photo-1370704.jpeg?auto=compress&cs=tinysrgb&w=400",
    },
    SampleEvent {
        id: "6",
        title: "Healthcare Navigation Seminar",
        date: "2024-01-25",
        time: "3:00 PM",
        location: "Health Center Auditorium",
        description: "Understanding the healthcare system, insurance options, and accessing medical services.",
        category: "Healthcare",
        image_ref: "https://images.pexels.com/photos/356040/pexels-photo-356040.jpeg?auto=compress&cs=tinysrgb&w=400",
    },
];

impl SampleEvent {
    fn to_event(&self, location: String) -> Event {
        Event {
            id: self.id.to_string(),
            title: self.title.to_string(),
            date: self.date.to_string(),
            time: self.time.to_string(),
            location,
            description: self.description.to_string(),
            category: self.category.to_string(),
            image_ref: self.image_ref.to_string(),
        }
    }
}

/// The built-in catalog used when no recommendations are available
pub fn sample_catalog() -> Vec<Event> {
    SAMPLE_EVENTS
        .iter()
        .map(|e| e.to_event(e.location.to_string()))
        .collect()
}

/// The built-in catalog placed in the selected region.
/// With no region selected this is the plain sample catalog.
pub fn regional_catalog(state: &str) -> Vec<Event> {
    let state = state.trim();
    if state.is_empty() {
        return sample_catalog();
    }
    SAMPLE_EVENTS
        .iter()
        .map(|e| e.to_event(format!("{}, {}", e.location, state)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_ids_unique() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 6);
        let ids: std::collections::HashSet<_> = catalog.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_regional_catalog_places_events_in_state() {
        let catalog = regional_catalog("Texas");
        assert!(catalog.iter().all(|e| e.location.ends_with(", Texas")));
        assert_eq!(catalog[0].location, "Community Center Downtown, Texas");
    }

    #[test]
    fn test_regional_catalog_without_state() {
        assert_eq!(regional_catalog("  "), sample_catalog());
    }
}
