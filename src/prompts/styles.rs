//! Static style guides keyed by a caller-supplied name.

pub type GuideTable = &'static [(&'static str, &'static str)];

/// Case-insensitive lookup; unknown or missing keys resolve to the table's first entry.
pub fn lookup(table: GuideTable, key: Option<&str>) -> (&'static str, &'static str) {
    let wanted = key.map(|k| k.trim().to_ascii_lowercase());
    wanted
        .and_then(|k| table.iter().find(|(name, _)| *name == k).copied())
        .unwrap_or(table[0])
}

pub const TITLE_STYLES: GuideTable = &[
    (
        "engaging",
        "Make titles energetic and curiosity-driven. Use strong verbs and a clear payoff for the viewer.",
    ),
    (
        "clickbait",
        "Use bold claims, emotional triggers and open loops, but never promise something the content cannot deliver.",
    ),
    (
        "educational",
        "Lead with the skill or answer the viewer will gain. Prefer 'How to', 'Why' and 'Explained' framings.",
    ),
    (
        "professional",
        "Keep a measured, authoritative tone. Avoid slang, all-caps and excessive punctuation.",
    ),
    (
        "storytelling",
        "Frame each title as the start of a story: a person, a struggle, a turning point.",
    ),
    (
        "listicle",
        "Use numbered formats such as '7 Ways', 'Top 10' or '5 Mistakes'. Put the number first.",
    ),
    (
        "question",
        "Phrase every title as a question the target viewer is already asking themselves.",
    ),
];

pub const HOOK_STYLES: GuideTable = &[
    (
        "question",
        "Open with a provocative question that the viewer needs answered.",
    ),
    (
        "statistic",
        "Open with a surprising number or fact that reframes the topic.",
    ),
    (
        "story",
        "Open in the middle of a short personal moment that creates tension.",
    ),
    (
        "bold",
        "Open with a confident, contrarian statement delivered without hedging.",
    ),
    (
        "controversial",
        "Open by challenging a popular belief in the niche, respectfully but directly.",
    ),
    (
        "curiosity",
        "Open by teasing a result or reveal that only comes at the end.",
    ),
];

pub const TONES: GuideTable = &[
    ("friendly", "Warm, conversational and approachable."),
    ("professional", "Clear, credible and concise."),
    ("humorous", "Light, playful and witty without undermining the message."),
    ("inspirational", "Uplifting and motivating with a clear call to act."),
    ("educational", "Patient and structured, explaining terms as they appear."),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformGuide {
    pub key: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub description_limit: usize,
    pub hashtags: &'static str,
    pub format: &'static str,
}

pub const PLATFORMS: &[PlatformGuide] = &[
    PlatformGuide {
        key: "youtube",
        name: "YouTube",
        title: "Keep titles under 60 characters and put the main keyword near the start.",
        description_limit: 5000,
        hashtags: "Mix broad and niche tags; only the first three appear above the title.",
        format: "long-form video",
    },
    PlatformGuide {
        key: "tiktok",
        name: "TikTok",
        title: "Keep captions punchy, under 100 characters, and written for a scrolling audience.",
        description_limit: 2200,
        hashtags: "Combine trending tags with a few community-specific tags.",
        format: "short vertical video",
    },
    PlatformGuide {
        key: "instagram",
        name: "Instagram",
        title: "Front-load the first line of the caption; it is all most people see.",
        description_limit: 2200,
        hashtags: "Use a spread of high, medium and low volume tags.",
        format: "reel or carousel",
    },
    PlatformGuide {
        key: "twitter",
        name: "X (Twitter)",
        title: "Stay well within 280 characters and make the first clause carry the idea.",
        description_limit: 280,
        hashtags: "Use at most two tags; more looks like spam.",
        format: "post or thread",
    },
    PlatformGuide {
        key: "linkedin",
        name: "LinkedIn",
        title: "Write headline-style hooks aimed at professionals; avoid hype words.",
        description_limit: 3000,
        hashtags: "Use three to five professional or industry tags.",
        format: "post or article",
    },
];

/// Same fallback rule as [`lookup`]: YouTube unless a known platform is named.
pub fn platform(key: Option<&str>) -> &'static PlatformGuide {
    let wanted = key.map(|k| match k.trim().to_ascii_lowercase().as_str() {
        "x" => "twitter".to_string(),
        other => other.to_string(),
    });
    wanted
        .and_then(|k| PLATFORMS.iter().find(|p| p.key == k))
        .unwrap_or(&PLATFORMS[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLength {
    pub key: &'static str,
    pub duration: &'static str,
    pub words: u32,
    pub max_tokens: u32,
}

pub const SCRIPT_LENGTHS: &[ScriptLength] = &[
    ScriptLength {
        key: "medium",
        duration: "about 5 minutes",
        words: 750,
        max_tokens: 2048,
    },
    ScriptLength {
        key: "short",
        duration: "about 60 seconds",
        words: 150,
        max_tokens: 600,
    },
    ScriptLength {
        key: "long",
        duration: "about 10 minutes",
        words: 1500,
        max_tokens: 4000,
    },
];

pub fn script_length(key: Option<&str>) -> &'static ScriptLength {
    let wanted = key.map(|k| k.trim().to_ascii_lowercase());
    wanted
        .and_then(|k| SCRIPT_LENGTHS.iter().find(|l| l.key == k))
        .unwrap_or(&SCRIPT_LENGTHS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_style_falls_back_to_default() {
        assert_eq!(lookup(TITLE_STYLES, Some("nonsense")).0, "engaging");
        assert_eq!(lookup(TITLE_STYLES, None).0, "engaging");
        assert_eq!(lookup(TITLE_STYLES, Some(" Listicle ")).0, "listicle");
    }

    #[test]
    fn platform_aliases_resolve() {
        assert_eq!(platform(Some("X")).key, "twitter");
        assert_eq!(platform(Some("TikTok")).name, "TikTok");
        assert_eq!(platform(Some("myspace")).key, "youtube");
    }

    #[test]
    fn script_length_defaults_to_medium() {
        assert_eq!(script_length(None).words, 750);
        assert_eq!(script_length(Some("short")).words, 150);
    }
}
