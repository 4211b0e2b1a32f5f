use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TitlesRequest {
    pub topic: Option<String>,
    pub platform: Option<String>,
    pub style: Option<String>,
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitlesResponse {
    pub titles: Vec<String>,
    pub used_fallback: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HooksRequest {
    pub topic: Option<String>,
    pub platform: Option<String>,
    pub style: Option<String>,
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HooksResponse {
    pub hooks: Vec<String>,
    pub used_fallback: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HashtagsRequest {
    pub topic: Option<String>,
    pub platform: Option<String>,
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashtagsResponse {
    pub hashtags: Vec<String>,
    pub used_fallback: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScriptRequest {
    pub topic: Option<String>,
    pub niche: Option<String>,
    pub platform: Option<String>,
    pub script_length: Option<String>,
    pub tone: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptResponse {
    pub script: String,
    pub used_fallback: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DescriptionRequest {
    pub topic: Option<String>,
    pub platform: Option<String>,
    pub keywords: Vec<String>,
    pub tone: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionResponse {
    pub description: String,
    pub used_fallback: bool,
}

pub fn fallback_titles(topic: &str, count: u32) -> Vec<String> {
    [
        format!("{topic}: The Complete Beginner's Guide"),
        format!("How I Got Good at {topic} (And You Can Too)"),
        format!("5 {topic} Mistakes Everyone Makes"),
        format!("The Truth About {topic}"),
        format!("{topic} Explained in 10 Minutes"),
        format!("I Tried {topic} for 30 Days"),
        format!("{topic}: What I Wish I Knew Sooner"),
        format!("Stop Doing {topic} Wrong"),
        format!("The Only {topic} Tutorial You Need"),
        format!("Is {topic} Worth It?"),
        format!("{topic} for Absolute Beginners"),
        format!("Why Most People Quit {topic}"),
        format!("The {topic} Routine That Changed Everything"),
        format!("{topic}: Beginner vs Expert"),
        format!("Everything You Need to Start {topic}"),
        format!("{topic} Myths You Still Believe"),
        format!("My Honest {topic} Results"),
        format!("The Easiest Way to Get Into {topic}"),
        format!("{topic} Tips Nobody Tells You"),
        format!("What 1 Year of {topic} Taught Me"),
    ]
    .into_iter()
    .take(count as usize)
    .collect()
}

pub fn fallback_hooks(topic: &str, count: u32) -> Vec<String> {
    [
        format!("What if everything you know about {topic} is wrong?"),
        format!("Nobody talks about this side of {topic}."),
        format!("I spent a month on {topic} so you don't have to."),
        format!("Here's the {topic} trick I wish I learned years ago."),
        format!("Stop scrolling if you've ever struggled with {topic}."),
        format!("Most people get {topic} backwards. Here's why."),
        format!("This one change made {topic} ten times easier."),
        format!("You're probably making this {topic} mistake right now."),
        format!("Give me 60 seconds and I'll change how you see {topic}."),
        format!("The best {topic} advice I ever got came from a stranger."),
    ]
    .into_iter()
    .take(count as usize)
    .collect()
}

const FALLBACK_HASHTAGS: &[&str] = &[
    "#contentcreator",
    "#creator",
    "#tips",
    "#howto",
    "#learn",
    "#trending",
    "#viral",
    "#explore",
    "#fyp",
    "#community",
    "#motivation",
    "#tutorial",
    "#creatortips",
    "#growth",
    "#inspiration",
    "#learnontiktok",
    "#youtuber",
    "#smallcreator",
    "#contentstrategy",
    "#socialmedia",
    "#dailytips",
    "#lifehacks",
    "#beginners",
    "#stepbystep",
    "#didyouknow",
    "#newvideo",
    "#behindthescenes",
    "#creatorcommunity",
    "#protips",
    "#mustwatch",
];

pub fn fallback_hashtags(count: u32) -> Vec<String> {
    FALLBACK_HASHTAGS
        .iter()
        .take(count as usize)
        .map(|tag| tag.to_string())
        .collect()
}

/// Forces a leading `#`, strips whitespace and drops case-insensitive duplicates.
pub fn normalize_hashtags(tags: Vec<String>, count: u32) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let body: String = tag
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .trim_start_matches('#')
            .to_string();
        if body.is_empty() {
            continue;
        }
        let tag = format!("#{body}");
        if out.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            continue;
        }
        out.push(tag);
        if out.len() == count as usize {
            break;
        }
    }
    out
}

pub fn fallback_script(topic: &str) -> String {
    format!(
        "[HOOK]\nEver wondered what it really takes to get started with {topic}?\n\n\
         [INTRO]\nIn this video we break {topic} down step by step.\n\n\
         [MAIN CONTENT]\n1. What {topic} is and why it matters\n\
         2. The most common mistakes beginners make\n\
         3. A simple plan you can follow today\n\n\
         [CALL TO ACTION]\nIf this helped, subscribe and tell me in the comments what you want to see next."
    )
}

pub fn fallback_description(topic: &str, keywords: &[String]) -> String {
    let mut description = format!(
        "Everything you need to know about {topic}, explained simply.\n\n\
         In this video you'll learn the fundamentals, the common pitfalls and \
         a practical plan to get results.\n\n\
         Subscribe for more and let me know your questions in the comments!"
    );
    if !keywords.is_empty() {
        description.push_str("\n\n");
        description.push_str(&keywords.join(" · "));
    }
    description
}
