use chrono::NaiveDate;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Role chosen at sign-up; selects which table the panel works against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Donor,
    Volunteer,
    Recipient,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Donor, Role::Volunteer, Role::Recipient];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Donor => "Donor",
            Role::Volunteer => "Volunteer",
            Role::Recipient => "Recipient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "donor" => Ok(Role::Donor),
            "volunteer" => Ok(Role::Volunteer),
            "recipient" => Ok(Role::Recipient),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RecipientCategory {
    General,
    Educational,
    Healthcare,
    #[serde(rename = "Disaster relief")]
    DisasterRelief,
    Custom,
}

impl RecipientCategory {
    pub const ALL: [RecipientCategory; 5] = [
        RecipientCategory::General,
        RecipientCategory::Educational,
        RecipientCategory::Healthcare,
        RecipientCategory::DisasterRelief,
        RecipientCategory::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecipientCategory::General => "General",
            RecipientCategory::Educational => "Educational",
            RecipientCategory::Healthcare => "Healthcare",
            RecipientCategory::DisasterRelief => "Disaster relief",
            RecipientCategory::Custom => "Custom",
        }
    }
}

impl fmt::Display for RecipientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipientCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RecipientCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown recipient category '{}'", wanted))
    }
}

// --- Write payloads ---

#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Donor plus the first donation, written by one stored-procedure call.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct NewDonor {
    pub name: String,
    pub phone_number: String,
    pub address: String,
    /// Recipient the donation is earmarked for
    pub donate_to: Option<i32>,
    /// Donation amount in USD, never negative
    pub donation_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct NewVolunteer {
    pub name: String,
    pub phone_number: String,
    pub availability_start: NaiveDate,
    pub availability_end: NaiveDate,
    /// Recipient the volunteer wants to help; adds a mapping row when present
    pub recipient_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct NewRecipient {
    pub name: String,
    pub address: String,
    pub category: RecipientCategory,
}

#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct DonorUpdate {
    pub name: String,
    pub phone_number: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct VolunteerUpdate {
    pub name: String,
    pub phone_number: String,
    pub availability_start: NaiveDate,
    pub availability_end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct RecipientUpdate {
    pub name: String,
    pub address: String,
    pub category: RecipientCategory,
}

// --- Read rows, aggregates recomputed on every read ---

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, ToSchema)]
pub struct DonorRow {
    pub donor_id: i32,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub donate_to: Option<i32>,
    /// Sum of this donor's donations, zero when there are none
    pub total_donation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, ToSchema)]
pub struct VolunteerRow {
    pub volunteer_id: i32,
    pub name: String,
    pub phone_number: String,
    pub availability_start: NaiveDate,
    pub availability_end: NaiveDate,
    /// Number of recipients this volunteer is mapped to
    pub recipients_helped: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, ToSchema)]
pub struct RecipientRow {
    pub recipient_id: i32,
    pub name: String,
    pub address: String,
    pub category: String,
    /// Sum of donations from donors whose `donate_to` is this recipient
    pub amount_raised: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CreatedId {
    pub id: i32,
}
