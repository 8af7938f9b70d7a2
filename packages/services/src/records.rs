//! CRM contacts and invoices.
//!
//! Flat records kept outside the site document. They are created and listed,
//! never edited by path.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Days between issue and due date of an invoice
pub const PAYMENT_TERM_DAYS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactStatus {
    Lead,
    Contacted,
    Customer,
    Lost,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 4] = [
        ContactStatus::Lead,
        ContactStatus::Contacted,
        ContactStatus::Customer,
        ContactStatus::Lost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactStatus::Lead => "Lead",
            ContactStatus::Contacted => "Contacted",
            ContactStatus::Customer => "Customer",
            ContactStatus::Lost => "Lost",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Unknown contact status: {} (expected Lead, Contacted, Customer or Lost)",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmContact {
    /// Assigned by the store
    pub id: u64,
    pub name: String,
    pub email: String,
    pub status: ContactStatus,
    pub last_contacted: NaiveDate,
}

/// Contact as entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub status: ContactStatus,
}

impl NewContact {
    pub fn new(name: impl Into<String>, email: impl Into<String>, status: ContactStatus) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            status,
        }
    }

    /// Stored form, last contacted `today`
    pub fn into_contact(self, id: u64, today: NaiveDate) -> CrmContact {
        CrmContact {
            id,
            name: self.name,
            email: self.email,
            status: self.status,
            last_contacted: today,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: u32,
    pub price: f64,
}

impl InvoiceItem {
    pub fn amount(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// `INV-<unix millis>`
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<InvoiceItem>,
    pub total: f64,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// Invoice before it is issued
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<InvoiceItem>,
}

impl InvoiceDraft {
    pub fn total(&self) -> f64 {
        self.items.iter().map(InvoiceItem::amount).sum()
    }

    /// Issue at `now`: id from the timestamp, due after the payment term
    pub fn issue(self, now: DateTime<Utc>) -> Invoice {
        let issue_date = now.date_naive();
        let due_date = issue_date
            .checked_add_days(Days::new(PAYMENT_TERM_DAYS))
            .unwrap_or(issue_date);

        Invoice {
            id: format!("INV-{}", now.timestamp_millis()),
            total: self.total(),
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            items: self.items,
            issue_date,
            due_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_issue_invoice() {
        let draft = InvoiceDraft {
            customer_name: "Ana".to_string(),
            customer_email: "ana@example.com".to_string(),
            items: vec![
                InvoiceItem {
                    description: "Cake".to_string(),
                    quantity: 2,
                    price: 12.5,
                },
                InvoiceItem {
                    description: "Coffee".to_string(),
                    quantity: 3,
                    price: 2.0,
                },
            ],
        };
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();

        let invoice = draft.issue(now);
        assert_eq!(invoice.total, 31.0);
        assert_eq!(invoice.id, format!("INV-{}", now.timestamp_millis()));
        assert_eq!(invoice.issue_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(invoice.due_date, NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
    }

    #[test]
    fn test_empty_draft_totals_zero() {
        assert_eq!(InvoiceDraft::default().total(), 0.0);
    }

    #[test]
    fn test_contact_wire_shape() {
        let contact = NewContact::new("Ana", "ana@example.com", ContactStatus::Lead)
            .into_contact(7, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        assert_eq!(
            serde_json::to_value(&contact).unwrap(),
            serde_json::json!({
                "id": 7,
                "name": "Ana",
                "email": "ana@example.com",
                "status": "Lead",
                "lastContacted": "2024-03-01"
            })
        );
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("customer".parse::<ContactStatus>(), Ok(ContactStatus::Customer));
        assert!("vip".parse::<ContactStatus>().is_err());
    }
}
