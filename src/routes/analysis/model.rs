use serde::{Deserialize, Serialize};

use crate::llm::{JsonShape, StructuredOutput};
use crate::youtube::ChannelStats;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompetitorRequest {
    pub channel: Option<String>,
    pub niche: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorAnalysis {
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub content_strategy: String,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl StructuredOutput for CompetitorAnalysis {
    const SHAPE: JsonShape = JsonShape::Object;

    fn validate(&self) -> Result<(), String> {
        if self.summary.trim().is_empty() {
            return Err("analysis without a summary".into());
        }
        if self.strengths.is_empty() || self.recommendations.is_empty() {
            return Err("analysis missing strengths or recommendations".into());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorResponse {
    pub analysis: CompetitorAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelStats>,
    pub used_fallback: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThumbnailRequest {
    pub description: Option<String>,
    pub title: Option<String>,
    pub niche: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailCritique {
    pub score: f32,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

impl StructuredOutput for ThumbnailCritique {
    const SHAPE: JsonShape = JsonShape::Object;

    fn validate(&self) -> Result<(), String> {
        if !(0.0..=10.0).contains(&self.score) {
            return Err(format!("score {} outside 0-10", self.score));
        }
        if self.improvements.is_empty() {
            return Err("critique without improvements".into());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailResponse {
    pub critique: ThumbnailCritique,
    pub used_fallback: bool,
}

pub fn fallback_analysis(channel: &str) -> CompetitorAnalysis {
    CompetitorAnalysis {
        summary: format!(
            "{channel} appears to be an established creator in its niche. A detailed analysis is not available right now."
        ),
        strengths: vec![
            "Consistent upload schedule".into(),
            "Clear channel branding".into(),
        ],
        weaknesses: vec!["Limited engagement with comments".into()],
        content_strategy: "Regular uploads built around the channel's core topics.".into(),
        opportunities: vec![
            "Cover beginner questions the channel skips".into(),
            "Experiment with short-form versions of popular videos".into(),
        ],
        recommendations: vec![
            "Study their top 10 videos by views and note recurring title patterns".into(),
            "Differentiate with a stronger point of view or format".into(),
        ],
    }
}

pub fn fallback_critique() -> ThumbnailCritique {
    ThumbnailCritique {
        score: 5.0,
        summary: "A detailed critique is not available right now; here are general guidelines.".into(),
        strengths: vec!["Has a clear subject".into()],
        improvements: vec![
            "Use one focal point, ideally an expressive face".into(),
            "Keep text to three or four large, high-contrast words".into(),
            "Make sure it reads at mobile size".into(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::structured::parse_structured;

    #[test]
    fn critique_score_must_be_in_range() {
        let ok = r#"{"score": 7.5, "summary": "s", "strengths": [], "improvements": ["bigger text"]}"#;
        assert_eq!(parse_structured::<ThumbnailCritique>(ok).unwrap().score, 7.5);

        let high = r#"{"score": 11, "improvements": ["x"]}"#;
        assert!(parse_structured::<ThumbnailCritique>(high).is_err());

        let no_improvements = r#"{"score": 3}"#;
        assert!(parse_structured::<ThumbnailCritique>(no_improvements).is_err());
    }

    #[test]
    fn analysis_requires_summary_and_recommendations() {
        let thin = r#"{"summary": "ok", "strengths": ["a"]}"#;
        assert!(parse_structured::<CompetitorAnalysis>(thin).is_err());

        let full = r#"Analysis: {"summary": "ok", "strengths": ["a"], "recommendations": ["b"], "contentStrategy": "weekly"}"#;
        let parsed = parse_structured::<CompetitorAnalysis>(full).unwrap();
        assert_eq!(parsed.content_strategy, "weekly");
        assert!(parsed.weaknesses.is_empty());
    }

    #[test]
    fn fallbacks_satisfy_their_own_schema() {
        assert!(fallback_analysis("chan").validate().is_ok());
        assert!(fallback_critique().validate().is_ok());
    }
}
