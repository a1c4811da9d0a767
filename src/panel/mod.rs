//! Presentation layer: the role × section state machine.
//!
//! Each of the twelve [`Panel`] branches has a fixed form (or none, for Read)
//! and dispatches a submission to exactly one store operation. Failures come
//! back as an inline [`Outcome`] rather than an error status.

mod form;
mod table;

pub use form::{Field, FormInput, FormSpec, Widget};
pub use table::Table;

use crate::models::{
    DonorUpdate, NewDonor, NewRecipient, NewUser, NewVolunteer, RecipientCategory, RecipientUpdate, Role,
    VolunteerUpdate,
};
use crate::store::CharityStore;
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Section {
    Create,
    Read,
    Update,
    Delete,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Create, Section::Read, Section::Update, Section::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Create => "Create",
            Section::Read => "Read",
            Section::Update => "Update",
            Section::Delete => "Delete",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" => Ok(Section::Create),
            "read" => Ok(Section::Read),
            "update" => Ok(Section::Update),
            "delete" => Ok(Section::Delete),
            other => Err(format!("unknown section '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

/// Inline message shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Outcome {
    pub level: Level,
    pub message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: Level::Success, message: message.into() }
    }

    pub fn error(message: impl fmt::Display) -> Self {
        Self { level: Level::Error, message: format!("Error: {}", message) }
    }

    pub fn is_success(&self) -> bool {
        self.level == Level::Success
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PanelView {
    pub role: Role,
    pub section: Section,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Table>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Outcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Panel {
    pub role: Role,
    pub section: Section,
}

impl Panel {
    pub fn new(role: Role, section: Section) -> Self {
        Self { role, section }
    }

    pub fn all() -> impl Iterator<Item = Panel> {
        Role::ALL
            .into_iter()
            .flat_map(|role| Section::ALL.into_iter().map(move |section| Panel::new(role, section)))
    }

    pub fn title(&self) -> String {
        match self.section {
            Section::Create | Section::Read => format!("{} Information", self.role),
            Section::Update => format!("Update {} Information", self.role),
            Section::Delete => format!("Delete {} Information", self.role),
        }
    }

    /// Widgets for this branch; Read branches have none.
    pub fn form(&self, today: NaiveDate) -> Option<FormSpec> {
        use Role::*;
        use Section::*;

        let categories = RecipientCategory::ALL.iter().map(|c| c.as_str());
        let (fields, submit) = match (self.role, self.section) {
            (_, Read) => return None,
            (Donor, Create) => (
                vec![
                    Field::text("name", "Enter Name:"),
                    Field::text("phone_number", "Enter Phone number:"),
                    Field::text("address", "Enter Address:"),
                    Field::text("donate_to", "Enter Recipient ID to donate to:"),
                    Field::number("donation_amount", "Enter Donation Amount (in USD)", 0.0),
                ],
                "Submit Information",
            ),
            (Volunteer, Create) => (
                vec![
                    Field::text("name", "Enter Name:"),
                    Field::text("phone_number", "Enter Phone number:"),
                    Field::date("availability_start", "Select Start date", today),
                    Field::date("availability_end", "Select End date", today),
                    Field::text("recipient_id", "Enter Recipient ID of whom you want to help:"),
                ],
                "Submit Information",
            ),
            (Recipient, Create) => (
                vec![
                    Field::text("name", "Recipient Name:"),
                    Field::text("address", "Recipient Address:"),
                    Field::select("category", "Recipient Category:", categories),
                ],
                "Submit Information",
            ),
            (Donor, Update) => (
                vec![
                    Field::text("donor_id", "Enter Your Donor ID"),
                    Field::text("name", "Enter New donor Name"),
                    Field::text("phone_number", "Enter new phone Number"),
                    Field::text("address", "Enter new Address"),
                ],
                "Update Donor",
            ),
            (Volunteer, Update) => (
                vec![
                    Field::text("volunteer_id", "Enter Your Volunteer ID"),
                    Field::text("name", "Enter Volunteer Name"),
                    Field::text("phone_number", "Enter Phone Number"),
                    Field::date("availability_start", "Select Start Date", today),
                    Field::date("availability_end", "Select End Date", today),
                ],
                "Update Volunteer",
            ),
            (Recipient, Update) => (
                vec![
                    Field::text("recipient_id", "Enter Your Recipient ID"),
                    Field::text("name", "Enter Recipient Name"),
                    Field::text("address", "Enter Recipient Address"),
                    Field::select("category", "Recipient Category:", categories),
                ],
                "Update Recipient",
            ),
            (Donor, Delete) => (vec![Field::text("donor_id", "Enter Donor ID to Delete")], "Delete Donor"),
            (Volunteer, Delete) => (
                vec![Field::text("volunteer_id", "Enter Volunteer ID to Delete")],
                "Delete Volunteer",
            ),
            (Recipient, Delete) => (
                vec![Field::text("recipient_id", "Enter Recipient ID to Delete")],
                "Delete Recipient",
            ),
        };

        Some(FormSpec {
            title: self.title(),
            fields,
            submit_label: submit.to_string(),
        })
    }
}

pub fn signup_form() -> FormSpec {
    FormSpec {
        title: "Create an Account".to_string(),
        fields: vec![
            Field::text("username", "Username"),
            Field::text("email", "Email"),
            Field::password("password", "Password"),
            Field::select("role", "Choose Role: ", Role::ALL.iter().map(|r| r.as_str())),
        ],
        submit_label: "Sign Up".to_string(),
    }
}

/// Builds the view for a branch. Create forms for donors and volunteers show
/// the recipient table so an id can be picked; Read shows the role's table.
pub async fn render(panel: Panel, store: &dyn CharityStore, today: NaiveDate) -> PanelView {
    let table = match (panel.role, panel.section) {
        (Role::Donor | Role::Volunteer, Section::Create) | (Role::Recipient, Section::Read) => {
            store.display_recipient_table().await.map(|rows| Table::recipients(&rows))
        }
        (Role::Donor, Section::Read) => store.display_donor_table().await.map(|rows| Table::donors(&rows)),
        (Role::Volunteer, Section::Read) => store
            .display_volunteer_table()
            .await
            .map(|rows| Table::volunteers(&rows)),
        _ => Ok(None),
    };

    let (table, notice) = match table {
        Ok(table) => (table, None),
        Err(e) => {
            tracing::error!(role = %panel.role, section = %panel.section, "failed to load table: {}", e);
            (None, Some(Outcome::error(e)))
        }
    };

    PanelView {
        role: panel.role,
        section: panel.section,
        title: panel.title(),
        form: panel.form(today),
        table,
        notice,
    }
}

enum Failure {
    Input(String),
    Store(DbErr),
}

impl From<DbErr> for Failure {
    fn from(err: DbErr) -> Self {
        Failure::Store(err)
    }
}

fn outcome(panel: &str, result: Result<&'static str, Failure>) -> Outcome {
    match result {
        Ok(message) => Outcome::success(message),
        Err(Failure::Input(msg)) => {
            tracing::warn!(panel, "rejected form input: {}", msg);
            Outcome::error(msg)
        }
        Err(Failure::Store(e)) => {
            tracing::error!(panel, "store operation failed: {}", e);
            Outcome::error(e)
        }
    }
}

/// Coerces `input` for the branch and invokes exactly one store operation.
pub async fn submit(panel: Panel, input: &FormInput, store: &dyn CharityStore, now: NaiveDateTime) -> Outcome {
    let name = format!("{}/{}", panel.role, panel.section);
    outcome(&name, dispatch(panel, input, store, now).await)
}

async fn dispatch(
    panel: Panel,
    input: &FormInput,
    store: &dyn CharityStore,
    now: NaiveDateTime,
) -> Result<&'static str, Failure> {
    use Role::*;
    use Section::*;

    let today = now.date();
    match (panel.role, panel.section) {
        (_, Read) => Err(Failure::Input(format!("the {} Read view has nothing to submit", panel.role))),
        (Donor, Create) => {
            let donor = NewDonor {
                name: input.text("name"),
                phone_number: input.text("phone_number"),
                address: input.text("address"),
                donate_to: input.optional_id("donate_to").map_err(Failure::Input)?,
                donation_amount: input.number("donation_amount", 0.0).map_err(Failure::Input)?,
            };
            store.insert_donor_with_donation(donor, now).await?;
            Ok("Donor and donation information submitted successfully!")
        }
        (Volunteer, Create) => {
            let volunteer = NewVolunteer {
                name: input.text("name"),
                phone_number: input.text("phone_number"),
                availability_start: input.date("availability_start", today).map_err(Failure::Input)?,
                availability_end: input.date("availability_end", today).map_err(Failure::Input)?,
                recipient_id: input.optional_id("recipient_id").map_err(Failure::Input)?,
            };
            store.insert_volunteer(volunteer).await?;
            Ok("Volunteer information submitted successfully!")
        }
        (Recipient, Create) => {
            let recipient = NewRecipient {
                name: input.text("name"),
                address: input.text("address"),
                category: input
                    .choice("category", RecipientCategory::General)
                    .map_err(Failure::Input)?,
            };
            store.insert_recipient(recipient).await?;
            Ok("Recipient information submitted successfully!")
        }
        (Donor, Update) => {
            let donor_id = input.id("donor_id").map_err(Failure::Input)?;
            let update = DonorUpdate {
                name: input.text("name"),
                phone_number: input.text("phone_number"),
                address: input.text("address"),
            };
            store.update_donor(donor_id, update).await?;
            Ok("Donor information updated successfully!")
        }
        (Volunteer, Update) => {
            let volunteer_id = input.id("volunteer_id").map_err(Failure::Input)?;
            let update = VolunteerUpdate {
                name: input.text("name"),
                phone_number: input.text("phone_number"),
                availability_start: input.date("availability_start", today).map_err(Failure::Input)?,
                availability_end: input.date("availability_end", today).map_err(Failure::Input)?,
            };
            store.update_volunteer(volunteer_id, update).await?;
            Ok("Volunteer information updated successfully!")
        }
        (Recipient, Update) => {
            let recipient_id = input.id("recipient_id").map_err(Failure::Input)?;
            let update = RecipientUpdate {
                name: input.text("name"),
                address: input.text("address"),
                category: input
                    .choice("category", RecipientCategory::General)
                    .map_err(Failure::Input)?,
            };
            store.update_recipient(recipient_id, update).await?;
            Ok("Recipient information updated successfully!")
        }
        (Donor, Delete) => {
            store.delete_donor(input.id("donor_id").map_err(Failure::Input)?).await?;
            Ok("Donor information deleted successfully!")
        }
        (Volunteer, Delete) => {
            store
                .delete_volunteer(input.id("volunteer_id").map_err(Failure::Input)?)
                .await?;
            Ok("Volunteer information deleted successfully!")
        }
        (Recipient, Delete) => {
            store
                .delete_recipient(input.id("recipient_id").map_err(Failure::Input)?)
                .await?;
            Ok("Recipient information deleted successfully!")
        }
    }
}

pub async fn submit_signup(input: &FormInput, store: &dyn CharityStore) -> Outcome {
    outcome("signup", register(input, store).await)
}

async fn register(input: &FormInput, store: &dyn CharityStore) -> Result<&'static str, Failure> {
    let user = NewUser {
        username: input.text("username"),
        email: input.text("email"),
        password: input.text("password"),
        role: input.choice("role", Role::Donor).map_err(Failure::Input)?,
    };
    store.sign_up(user).await?;
    Ok("Account created successfully!")
}
