//! Marketing campaign generation. Output is read-only and never touches the
//! site document.

use crate::business::BusinessInfo;
use crate::error::GenerationError;
use crate::generator::{strip_code_fence, LanguageModel, ModelGenerator};
use crate::prompt;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingCampaign {
    pub google_ad: GoogleAd,
    pub facebook_post: FacebookPost,
    pub email: EmailCampaign,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleAd {
    pub headline: String,
    pub description: String,
    /// Call to action
    pub cta: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookPost {
    pub text: String,
    /// Prompt for an image generator
    pub image_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCampaign {
    pub subject: String,
    pub body: String,
}

/// Source of marketing campaigns
#[async_trait]
pub trait MarketingGenerator: Send + Sync {
    async fn generate_campaign(
        &self,
        info: &BusinessInfo,
        goal: &str,
    ) -> Result<MarketingCampaign, GenerationError>;
}

#[async_trait]
impl<M: LanguageModel> MarketingGenerator for ModelGenerator<M> {
    async fn generate_campaign(
        &self,
        info: &BusinessInfo,
        goal: &str,
    ) -> Result<MarketingCampaign, GenerationError> {
        let reply = self
            .model()
            .complete(&prompt::campaign_prompt(info, goal))
            .await?;
        parse_campaign(&reply)
    }
}

/// Parse a model reply, tolerating a markdown code fence
pub fn parse_campaign(reply: &str) -> Result<MarketingCampaign, GenerationError> {
    let json = strip_code_fence(reply);
    if json.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_campaign() {
        let reply = r#"```json
        {
            "googleAd": {"headline": "Fresh bread daily", "description": "Sourdough baked at dawn.", "cta": "Order now"},
            "facebookPost": {"text": "Brunch is back! 🥐", "imageDescription": "Croissants on a wooden table"},
            "email": {"subject": "Sunday brunch", "body": "Join us this Sunday."}
        }
        ```"#;

        let campaign = parse_campaign(reply).unwrap();
        assert_eq!(campaign.google_ad.cta, "Order now");
        assert_eq!(
            campaign.facebook_post.image_description,
            "Croissants on a wooden table"
        );
        assert_eq!(campaign.email.subject, "Sunday brunch");
    }

    #[test]
    fn test_missing_channel_is_malformed() {
        let reply = r#"{"googleAd": {"headline": "a", "description": "b", "cta": "c"}}"#;
        assert!(matches!(
            parse_campaign(reply),
            Err(GenerationError::MalformedResponse(_))
        ));
    }
}
