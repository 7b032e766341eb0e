use serde::{Deserialize, Serialize};

pub const HABIT_COUNT: usize = 5;

/// The five fixed daily habits, in slot order: (key, label).
pub const HABITS: [(&str, &str); HABIT_COUNT] = [
    ("mission_morning", "Morning mission"),
    ("drink_water", "Drink water"),
    ("study_read", "Study / reading"),
    ("workout", "Workout"),
    ("sleep_well", "Good sleep"),
];

pub const CITIES: [&str; 10] = [
    "Seoul", "Busan", "Incheon", "Daegu", "Daejeon", "Gwangju", "Suwon", "Ulsan", "Jeju", "Gangneung",
];

pub const MOOD_MIN: u8 = 1;
pub const MOOD_MAX: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSnapshot {
    pub date: String,
    pub labels_completed: Vec<String>,
    pub mood: u8,
    pub completion_rate: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: String,
    pub completion_rate: u8,
    pub mood: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature: f64,
    pub description: String,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogPartner {
    pub image_url: String,
    pub breed: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TarotCard {
    pub name: String,
    pub meaning: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    SternSeer,
    GentleWitch,
    Trickster,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::SternSeer, Persona::GentleWitch, Persona::Trickster];

    pub fn key(self) -> &'static str {
        match self {
            Persona::SternSeer => "stern_seer",
            Persona::GentleWitch => "gentle_witch",
            Persona::Trickster => "trickster",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Persona::SternSeer => "Stern Seer",
            Persona::GentleWitch => "Gentle Witch",
            Persona::Trickster => "Trickster of Fate",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|persona| persona.key() == key.trim())
    }
}

/// Everything the report composer needs for one report. Built per request and dropped after.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub persona_key: String,
    pub snapshot: HabitSnapshot,
    pub weather: Option<WeatherReading>,
    pub dog_breed: Option<String>,
    pub tarot: Option<TarotCard>,
}

#[derive(Debug, Deserialize)]
pub struct CheckinRequest {
    #[serde(default)]
    pub habits: Vec<String>,
    /// Range-checked against 1..=10 by the handler, not at parse time.
    pub mood: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct KeysRequest {
    pub model_api_key: Option<String>,
    pub weather_api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportBody {
    pub city: String,
    pub persona: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Locked,
    Unlocked,
}

#[derive(Debug, Serialize)]
pub struct HabitOption {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PersonaOption {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub habits: Vec<HabitOption>,
    pub cities: Vec<&'static str>,
    pub personas: Vec<PersonaOption>,
    pub unlock_threshold: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub snapshot: HabitSnapshot,
    pub completed_count: usize,
    pub gate: GateState,
    pub tarot: Option<TarotCard>,
    pub tarot_excerpt: Option<String>,
    pub chart: Vec<HistoryRecord>,
    pub has_model_key: bool,
    pub has_weather_key: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub city: String,
    pub persona: String,
    pub weather: Option<WeatherReading>,
    pub dog: Option<DogPartner>,
    pub tarot: Option<TarotCard>,
    pub report: String,
    pub notices: Vec<String>,
}
