use crate::llm::Prompt;

use super::clip;
use super::styles::PlatformGuide;

pub const NICHE_COUNT: u32 = 5;
pub const TREND_COUNT: u32 = 6;

pub fn calendar(niche: &str, platform: &PlatformGuide, days: u32, posts_per_day: u32) -> Prompt {
    let entries = days * posts_per_day;
    let system = format!(
        "You are a content planner for {platform} creators.\n\
         Plan {days} days of content with {posts_per_day} post(s) per day, \
         exactly {entries} entries in total.\n\
         Vary formats (tutorial, behind the scenes, list, story, Q&A, trend, collab) \
         and build momentum across the week.\n\
         Respond with ONLY a JSON array. Each element must have these fields:\n\
         {{\"day\": <1-based day number>, \"title\": string, \"format\": string, \"description\": string}}",
        platform = platform.name,
    );
    let user = format!("Niche: {}", clip(niche));
    let budget = (entries * 120 + 300).min(4000);
    Prompt::new(system, user).with_sampling(0.8, budget)
}

pub fn niches(interests: &str, platform: &PlatformGuide, experience: Option<&str>) -> Prompt {
    let system = format!(
        "You help aspiring {platform} creators find a profitable, sustainable niche.\n\
         Suggest exactly {NICHE_COUNT} niches that fit the user's interests.\n\
         Respond with ONLY a JSON array. Each element must have these fields:\n\
         {{\"name\": string, \"description\": string, \"competition\": \"low\" | \"medium\" | \"high\", \
         \"monetization\": string, \"contentIdeas\": [string, string, string]}}",
        platform = platform.name,
    );
    let mut user = format!("Interests: {}", clip(interests));
    if let Some(experience) = experience {
        user.push_str(&format!("\nExperience level: {}", clip(experience)));
    }
    Prompt::new(system, user).with_sampling(0.8, 2000)
}

pub fn trends(niche: &str, platform: &PlatformGuide, region: Option<&str>) -> Prompt {
    let system = format!(
        "You are a {platform} trend analyst.\n\
         Based on your knowledge, list exactly {TREND_COUNT} topics or formats that are rising in the niche.\n\
         Respond with ONLY a JSON array. Each element must have these fields:\n\
         {{\"topic\": string, \"description\": string, \"popularity\": \"rising\" | \"hot\" | \"steady\", \
         \"contentIdea\": string}}",
        platform = platform.name,
    );
    let mut user = format!("Niche: {}", clip(niche));
    if let Some(region) = region {
        user.push_str(&format!("\nRegion: {}", clip(region)));
    }
    Prompt::new(system, user).with_sampling(0.8, 1500)
}
