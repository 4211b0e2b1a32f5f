use crate::llm::Prompt;
use crate::youtube::ChannelStats;

use super::clip;
use super::styles::PlatformGuide;

pub fn competitor(
    channel: &str,
    niche: Option<&str>,
    platform: &PlatformGuide,
    stats: Option<&ChannelStats>,
) -> Prompt {
    let system = format!(
        "You are a {platform} competitive analyst advising a creator about a rival channel.\n\
         Be specific and actionable; avoid generic advice.\n\
         Respond with ONLY a JSON object with these fields:\n\
         {{\"summary\": string, \"strengths\": [string], \"weaknesses\": [string], \
         \"contentStrategy\": string, \"opportunities\": [string], \"recommendations\": [string]}}",
        platform = platform.name,
    );

    let mut user = format!("Channel: {}", clip(channel));
    if let Some(niche) = niche {
        user.push_str(&format!("\nNiche: {}", clip(niche)));
    }
    if let Some(stats) = stats {
        user.push_str(&format!("\nChannel title: {}", stats.title));
        if let Some(subs) = stats.subscriber_count {
            user.push_str(&format!("\nSubscribers: {subs}"));
        }
        if let Some(videos) = stats.video_count {
            user.push_str(&format!("\nVideos: {videos}"));
        }
        if let Some(views) = stats.view_count {
            user.push_str(&format!("\nTotal views: {views}"));
        }
        if !stats.description.is_empty() {
            user.push_str(&format!("\nAbout: {}", clip(&stats.description)));
        }
    }

    Prompt::new(system, user).with_sampling(0.6, 1500)
}

pub fn thumbnail(description: &str, title: Option<&str>, niche: Option<&str>) -> Prompt {
    let system = "You are a YouTube thumbnail expert who has reviewed thousands of high-CTR thumbnails.\n\
         Critique the thumbnail described by the user: focal point, contrast, text legibility, \
         emotion, and how well it pairs with the title.\n\
         Respond with ONLY a JSON object with these fields:\n\
         {\"score\": <integer 0-10>, \"summary\": string, \"strengths\": [string], \"improvements\": [string]}";

    let mut user = format!("Thumbnail: {}", clip(description));
    if let Some(title) = title {
        user.push_str(&format!("\nVideo title: {}", clip(title)));
    }
    if let Some(niche) = niche {
        user.push_str(&format!("\nNiche: {}", clip(niche)));
    }
    Prompt::new(system, user).with_sampling(0.5, 1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::styles::platform;

    #[test]
    fn channel_stats_enrich_the_user_message() {
        let stats = ChannelStats {
            id: "UC1".into(),
            title: "Tiny Kitchen".into(),
            description: String::new(),
            subscriber_count: Some(52_000),
            video_count: None,
            view_count: Some(1_000_000),
        };
        let prompt = competitor("@tinykitchen", Some("cooking"), platform(None), Some(&stats));
        let user = prompt.user();
        assert!(user.contains("Subscribers: 52000"));
        assert!(user.contains("Total views: 1000000"));
        assert!(!user.contains("Videos:"));
        assert!(!user.contains("About:"));
    }

    #[test]
    fn thumbnail_prompt_requests_a_score() {
        let prompt = thumbnail("red arrow pointing at a cake", Some("I baked 100 cakes"), None);
        assert!(prompt.system().contains("\"score\""));
        assert!(prompt.user().contains("Video title: I baked 100 cakes"));
    }
}
