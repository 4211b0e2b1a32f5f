use crate::llm::Prompt;

use super::clip;
use super::styles::{self, HOOK_STYLES, PlatformGuide, ScriptLength, TITLE_STYLES, TONES};

pub fn titles(topic: &str, platform: &PlatformGuide, style: Option<&str>, count: u32) -> Prompt {
    let (style_name, style_guide) = styles::lookup(TITLE_STYLES, style);
    let system = format!(
        "You are an expert {platform} content strategist who writes high-performing titles.\n\
         Style ({style_name}): {style_guide}\n\
         Platform rules: {rules}\n\
         Generate exactly {count} titles.\n\
         Return one title per line with no numbering, no quotes and no commentary.",
        platform = platform.name,
        rules = platform.title,
    );
    let user = format!("Topic: {}", clip(topic));
    Prompt::new(system, user).with_sampling(0.8, 800)
}

pub fn hooks(topic: &str, platform: &PlatformGuide, style: Option<&str>, count: u32) -> Prompt {
    let (style_name, style_guide) = styles::lookup(HOOK_STYLES, style);
    let system = format!(
        "You write the first one or two sentences of {platform} {format} content, \
         the part that decides whether a viewer keeps watching.\n\
         Hook style ({style_name}): {style_guide}\n\
         Each hook must be speakable in under five seconds.\n\
         Generate exactly {count} hooks.\n\
         Return one hook per line with no numbering, no quotes and no commentary.",
        platform = platform.name,
        format = platform.format,
    );
    let user = format!("Topic: {}", clip(topic));
    Prompt::new(system, user).with_sampling(0.9, 600)
}

pub fn hashtags(topic: &str, platform: &PlatformGuide, count: u32) -> Prompt {
    let system = format!(
        "You are a {platform} growth specialist.\n\
         Hashtag strategy: {strategy}\n\
         Generate exactly {count} relevant hashtags.\n\
         Respond with ONLY a JSON array of strings, each starting with '#' and containing no spaces. \
         Example: [\"#example\", \"#another\"]",
        platform = platform.name,
        strategy = platform.hashtags,
    );
    let user = format!("Topic: {}", clip(topic));
    Prompt::new(system, user).with_sampling(0.7, 500)
}

pub fn script(
    topic: &str,
    niche: Option<&str>,
    platform: &PlatformGuide,
    length: &ScriptLength,
    tone: Option<&str>,
) -> Prompt {
    let (tone_name, tone_guide) = styles::lookup(TONES, tone);
    let system = format!(
        "You are a professional scriptwriter for {platform} creators.\n\
         Write a {format} script that runs {duration} (roughly {words} words).\n\
         Tone ({tone_name}): {tone_guide}\n\
         Structure the script with these section markers on their own lines:\n\
         [HOOK]\n[INTRO]\n[MAIN CONTENT]\n[CALL TO ACTION]\n\
         Include brief visual or B-roll cues in parentheses where useful.\n\
         Return only the script.",
        platform = platform.name,
        format = platform.format,
        duration = length.duration,
        words = length.words,
    );
    let mut user = format!("Topic: {}", clip(topic));
    if let Some(niche) = niche {
        user.push_str(&format!("\nNiche: {}", clip(niche)));
    }
    Prompt::new(system, user).with_sampling(0.7, length.max_tokens)
}

pub fn description(
    topic: &str,
    platform: &PlatformGuide,
    keywords: &[String],
    tone: Option<&str>,
) -> Prompt {
    let (tone_name, tone_guide) = styles::lookup(TONES, tone);
    let system = format!(
        "You write {platform} descriptions that rank in search and convert viewers.\n\
         Tone ({tone_name}): {tone_guide}\n\
         Stay under {limit} characters.\n\
         Open with a one-sentence summary, follow with what the viewer will learn, \
         and close with a call to action.\n\
         Weave the keywords in naturally; never list them.\n\
         Return only the description text.",
        platform = platform.name,
        limit = platform.description_limit,
    );
    let mut user = format!("Topic: {}", clip(topic));
    if !keywords.is_empty() {
        let keywords: Vec<String> = keywords.iter().take(20).map(|k| clip(k)).collect();
        user.push_str(&format!("\nKeywords: {}", keywords.join(", ")));
    }
    Prompt::new(system, user).with_sampling(0.7, 1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::styles::{platform, script_length};

    #[test]
    fn titles_prompt_carries_count_and_style() {
        let prompt = titles("home espresso", platform(Some("youtube")), Some("listicle"), 7);
        assert!(prompt.system().contains("exactly 7 titles"));
        assert!(prompt.system().contains("Style (listicle)"));
        assert_eq!(prompt.user(), "Topic: home espresso");
    }

    #[test]
    fn unknown_hook_style_uses_default_guide() {
        let prompt = hooks("budget travel", platform(None), Some("weird"), 3);
        assert!(prompt.system().contains("Hook style (question)"));
    }

    #[test]
    fn hashtags_prompt_asks_for_json_array() {
        let prompt = hashtags("vegan baking", platform(Some("instagram")), 12);
        assert!(prompt.system().contains("exactly 12"));
        assert!(prompt.system().contains("JSON array"));
    }

    #[test]
    fn script_budget_follows_length() {
        let prompt = script("sourdough", Some("baking"), platform(None), script_length(Some("long")), None);
        assert_eq!(prompt.max_tokens, 4000);
        assert!(prompt.user().contains("Niche: baking"));
        assert!(prompt.system().contains("[CALL TO ACTION]"));
    }

    #[test]
    fn description_lists_keywords_in_user_message() {
        let keywords = vec!["coffee".to_string(), "latte art".to_string()];
        let prompt = description("latte art basics", platform(Some("tiktok")), &keywords, None);
        assert!(prompt.user().contains("Keywords: coffee, latte art"));
        assert!(prompt.system().contains("2200"));
    }
}
