//! Application-wide constants
//!
//! Centralized location for fixed copy, option catalogs and backend
//! defaults that are used across multiple modules.

/// Default backend base URL
pub const API_BASE_URL: &str = "http://127.0.0.1:5000";

/// Backend routes, relative to the base URL
pub mod routes {
    pub const CHAT: &str = "/chat";
    pub const FAQS: &str = "/faqs";
    pub const PRESET_QUESTIONS: &str = "/personalized-queries";
    pub const RECOMMENDATIONS: &str = "/recommendations";
}

// Chat copy
pub const CHAT_GREETING: &str = "Hello! I'm your immigration assistant. I can help you with visa questions, legal processes, and finding the right resources. How can I assist you today?";
pub const CHAT_APOLOGY: &str = "I'm sorry, I encountered an error while processing your request. Please try again later.";

// Preset question fallbacks. The panel never renders without an option.
pub const INITIAL_PRESET_QUESTION: &str = "How do I apply for a work permit?";
pub const FALLBACK_PRESET_QUESTION: &str = "What documents do I need for green card application?";

// Community author pools
pub const QUESTION_AUTHORS: &[&str] = &["Hari", "Ram"];
pub const ANSWER_AUTHORS: &[&str] = &["OM", "Prakash", "Pandey", "Ramu", "Kumar"];

/// Timestamp label given to community posts created in this session
pub const JUST_NOW: &str = "just now";

/// Sidebar option catalogs
pub mod options {
    pub const VISA_STATUSES: &[&str] = &[
        "Student Visa",
        "Work Visa",
        "Tourist Visa",
        "Permanent Resident",
        "Citizen",
        "Asylum Seeker",
        "Refugee Status",
    ];

    pub const INTERESTS: &[&str] = &[
        "Job Search",
        "Housing",
        "Education",
        "Healthcare",
        "Legal Services",
        "Language Learning",
        "Networking",
        "Cultural Events",
        "Sports",
        "Arts",
    ];

    pub const LANGUAGES: &[&str] = &[
        "English", "Spanish", "Chinese", "Hindi", "Arabic", "French", "Nepali",
    ];
}
