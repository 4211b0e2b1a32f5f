use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::llm::ListItem;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarRequest {
    pub niche: Option<String>,
    pub platform: Option<String>,
    pub days: Option<u32>,
    pub posts_per_day: Option<u32>,
    pub start_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    #[serde(default)]
    pub day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub title: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub description: String,
}

impl ListItem for CalendarEntry {
    fn validate_item(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("calendar entry without a title".into());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub calendar: Vec<CalendarEntry>,
    pub used_fallback: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NichesRequest {
    pub interests: Option<String>,
    pub platform: Option<String>,
    pub experience: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Niche {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub competition: String,
    #[serde(default)]
    pub monetization: String,
    #[serde(default)]
    pub content_ideas: Vec<String>,
}

impl ListItem for Niche {
    fn validate_item(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("niche without a name".into());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NichesResponse {
    pub niches: Vec<Niche>,
    pub used_fallback: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrendsRequest {
    pub niche: Option<String>,
    pub platform: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub topic: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub popularity: String,
    #[serde(default)]
    pub content_idea: String,
}

impl ListItem for Trend {
    fn validate_item(&self) -> Result<(), String> {
        if self.topic.trim().is_empty() {
            return Err("trend without a topic".into());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsResponse {
    pub trends: Vec<Trend>,
    pub used_fallback: bool,
}

const FALLBACK_FORMATS: &[(&str, &str)] = &[
    ("Tutorial", "Teach one concrete skill step by step."),
    ("Behind the scenes", "Show your process and the tools you use."),
    ("Tips list", "Share quick, practical tips your audience can apply today."),
    ("Story", "Tell a personal story with a lesson at the end."),
    ("Q&A", "Answer the most common questions from your audience."),
    ("Trend remix", "Put your own spin on a current trend in the niche."),
    ("Community spotlight", "Feature a follower, collaborator or comment."),
];

pub fn fallback_calendar(niche: &str, days: u32, posts_per_day: u32) -> Vec<CalendarEntry> {
    let mut entries = Vec::with_capacity((days * posts_per_day) as usize);
    for day in 1..=days {
        for slot in 0..posts_per_day {
            let idx = ((day - 1) * posts_per_day + slot) as usize % FALLBACK_FORMATS.len();
            let (format, description) = FALLBACK_FORMATS[idx];
            entries.push(CalendarEntry {
                day,
                date: None,
                title: format!("{format}: {niche}"),
                format: format.to_string(),
                description: description.to_string(),
            });
        }
    }
    entries
}

/// Keeps model-assigned days that fall inside the plan, renumbers the rest by
/// position, and stamps dates when a start date is known.
pub fn schedule_calendar(
    entries: Vec<CalendarEntry>,
    days: u32,
    posts_per_day: u32,
    start: Option<NaiveDate>,
) -> Vec<CalendarEntry> {
    entries
        .into_iter()
        .take((days * posts_per_day) as usize)
        .enumerate()
        .map(|(i, mut entry)| {
            if entry.day == 0 || entry.day > days {
                entry.day = i as u32 / posts_per_day + 1;
            }
            entry.date = start
                .and_then(|s| s.checked_add_days(Days::new(u64::from(entry.day - 1))))
                .map(|d| d.format("%Y-%m-%d").to_string());
            entry
        })
        .collect()
}

pub fn fallback_niches(interests: &str) -> Vec<Niche> {
    vec![Niche {
        name: format!("Beginner's guide to {interests}"),
        description: format!(
            "Document your journey learning {interests} and teach what you discover along the way."
        ),
        competition: "medium".into(),
        monetization: "Affiliate links, sponsorships and digital products".into(),
        content_ideas: vec![
            "My first week: what surprised me".into(),
            "Tools I actually use".into(),
            "Mistakes to avoid when starting out".into(),
        ],
    }]
}

pub fn fallback_trends(niche: &str) -> Vec<Trend> {
    vec![Trend {
        topic: format!("Quick {niche} tips"),
        description: "Short, practical tip videos continue to perform well across platforms.".into(),
        popularity: "steady".into(),
        content_idea: format!("A 30-second video sharing one {niche} tip most people miss."),
    }]
}
