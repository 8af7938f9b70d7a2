//! Integration tests for the services crate

use async_trait::async_trait;
use chrono::Utc;
use sonasite_services::{
    generate_or_fallback, BusinessInfo, ContactStatus, FileStore, GenerationError, InvoiceDraft,
    InvoiceItem, LanguageModel, MarketingGenerator, ModelGenerator, NewContact, RecordStore,
    RecordStoreError,
};
use std::sync::Mutex;

/// Model answering with a fixed reply and remembering the prompts it saw
struct ScriptedModel {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn answering(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(GenerationError::Provider)
    }
}

fn bakery() -> BusinessInfo {
    BusinessInfo::new("Bakery Luna", "bakery", "Valencia", "Español")
}

#[tokio::test]
async fn test_generated_site_is_used() {
    let generator = ModelGenerator::new(ScriptedModel::answering(
        r#"{"businessName": "Bakery Luna", "pages": {"home": [
            {"id": "h", "type": "header", "content": {}},
            {"id": "a", "type": "about", "content": {"title": "Sobre nosotros"}},
            {"id": "f", "type": "footer", "content": {}}
        ]}}"#,
    ));

    let doc = generate_or_fallback(&generator, &bakery()).await;

    assert_eq!(doc.language, "Español");
    assert_eq!(doc.sections.len(), 3);
    assert!(generator.model().prompts.lock().unwrap()[0].contains("Bakery Luna"));
}

#[tokio::test]
async fn test_provider_failure_yields_fallback() {
    let generator = ModelGenerator::new(ScriptedModel::failing("quota exceeded"));
    let doc = generate_or_fallback(&generator, &bakery()).await;

    assert_eq!(doc.name, "Bakery Luna");
    assert!(doc.is_well_framed());
    assert_eq!(doc.theme.primary_color, "#7c3aed");
}

#[tokio::test]
async fn test_unparseable_reply_yields_fallback() {
    let generator = ModelGenerator::new(ScriptedModel::answering("Sorry, I can't help."));
    let doc = generate_or_fallback(&generator, &bakery()).await;

    assert_eq!(doc.section("hero").map(|s| s.kind().as_str()), Some("hero"));
}

#[tokio::test]
async fn test_campaign_generation() {
    let generator = ModelGenerator::new(ScriptedModel::answering(
        r#"{"googleAd": {"headline": "h", "description": "d", "cta": "c"},
            "facebookPost": {"text": "t", "imageDescription": "i"},
            "email": {"subject": "s", "body": "b"}}"#,
    ));

    let campaign = generator
        .generate_campaign(&bakery(), "More weekday customers")
        .await
        .unwrap();

    assert_eq!(campaign.email.body, "b");
    assert!(generator.model().prompts.lock().unwrap()[0].contains("More weekday customers"));
}

#[tokio::test]
async fn test_file_store_persists_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("records.json");

    let store = FileStore::new(&path);
    store
        .add_contact(NewContact::new("Ana", "ana@example.com", ContactStatus::Lead))
        .await
        .unwrap();
    store
        .add_contact(NewContact::new("Bo", "bo@example.com", ContactStatus::Contacted))
        .await
        .unwrap();

    let invoice = InvoiceDraft {
        customer_name: "Ana".to_string(),
        customer_email: "ana@example.com".to_string(),
        items: vec![InvoiceItem {
            description: "Wedding cake".to_string(),
            quantity: 1,
            price: 180.0,
        }],
    }
    .issue(Utc::now());
    store.add_invoice(invoice.clone()).await.unwrap();

    // A fresh handle reads what the first one wrote
    let reopened = FileStore::new(&path);
    let contacts = reopened.contacts().await.unwrap();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].name, "Bo");
    assert_eq!(contacts[0].id, 2);
    assert_eq!(reopened.invoices().await.unwrap(), vec![invoice]);
}

#[tokio::test]
async fn test_file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("none.json"));

    assert!(store.contacts().await.unwrap().is_empty());
    assert!(store.invoices().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_file_store_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    std::fs::write(&path, "not json").unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(
        store.contacts().await,
        Err(RecordStoreError::Corrupt(_))
    ));
}
