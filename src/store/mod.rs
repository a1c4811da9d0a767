//! Data-access layer.
//!
//! Every operation is one all-or-nothing unit: it leases a connection, runs a
//! single statement or stored-procedure call, commits, and releases the
//! connection. Errors are returned as [`DbErr`] for the caller to surface.

mod memory;
pub mod sql;

pub use memory::MemoryStore;
pub use sql::SqlStore;

use crate::models::{
    DonorRow, DonorUpdate, NewDonor, NewRecipient, NewUser, NewVolunteer, RecipientRow, RecipientUpdate,
    VolunteerRow, VolunteerUpdate,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::DbErr;

#[async_trait]
pub trait CharityStore: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    async fn sign_up(&self, user: NewUser) -> Result<(), DbErr>;

    /// Donors with their `total_donation`, ordered by id.
    async fn display_donor_table(&self) -> Result<Vec<DonorRow>, DbErr>;

    /// Volunteers with the number of recipients they are mapped to, ordered by id.
    async fn display_volunteer_table(&self) -> Result<Vec<VolunteerRow>, DbErr>;

    /// Recipients with their `amount_raised`, ordered by id.
    async fn display_recipient_table(&self) -> Result<Vec<RecipientRow>, DbErr>;

    async fn insert_donor_with_donation(&self, donor: NewDonor, donated_at: NaiveDateTime) -> Result<(), DbErr>;

    /// Returns the new volunteer id. Also writes the recipient mapping when one is given.
    async fn insert_volunteer(&self, volunteer: NewVolunteer) -> Result<i32, DbErr>;

    async fn insert_recipient(&self, recipient: NewRecipient) -> Result<i32, DbErr>;

    async fn update_donor(&self, donor_id: i32, update: DonorUpdate) -> Result<(), DbErr>;

    async fn update_volunteer(&self, volunteer_id: i32, update: VolunteerUpdate) -> Result<(), DbErr>;

    async fn update_recipient(&self, recipient_id: i32, update: RecipientUpdate) -> Result<(), DbErr>;

    async fn delete_donor(&self, donor_id: i32) -> Result<(), DbErr>;

    async fn delete_volunteer(&self, volunteer_id: i32) -> Result<(), DbErr>;

    async fn delete_recipient(&self, recipient_id: i32) -> Result<(), DbErr>;
}
