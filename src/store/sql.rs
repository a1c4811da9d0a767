use super::CharityStore;
use crate::db::Connector;
use crate::entities::{recipient, user, volunteer, volunteer_recipient_map};
use crate::models::{
    DonorRow, DonorUpdate, NewDonor, NewRecipient, NewUser, NewVolunteer, RecipientRow, RecipientUpdate,
    VolunteerRow, VolunteerUpdate,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveValue::NotSet, ConnectionTrait, DatabaseBackend, DbErr, EntityTrait, FromQueryResult, Set, Statement,
    TransactionTrait, Value,
};

pub const DONOR_TABLE_SQL: &str = "\
SELECT d.donor_id, d.name, d.phone_number, d.address, d.donate_to, \
CAST(COALESCE(SUM(Donation.donation_amount), 0) AS DOUBLE) AS total_donation \
FROM Donor d \
LEFT JOIN Donation ON d.donor_id = Donation.donor_id \
GROUP BY d.donor_id, d.name, d.phone_number, d.address, d.donate_to \
ORDER BY d.donor_id";

pub const VOLUNTEER_TABLE_SQL: &str = "\
SELECT v.volunteer_id, v.name, v.phone_number, v.availability_start, v.availability_end, \
COUNT(m.recipient_id) AS recipients_helped \
FROM Volunteer v \
LEFT JOIN VolunteerRecipientMap m ON v.volunteer_id = m.volunteer_id \
GROUP BY v.volunteer_id, v.name, v.phone_number, v.availability_start, v.availability_end \
ORDER BY v.volunteer_id";

pub const RECIPIENT_TABLE_SQL: &str = "\
SELECT r.recipient_id, r.name, r.address, r.category, \
CAST(COALESCE(SUM(Donation.donation_amount), 0) AS DOUBLE) AS amount_raised \
FROM Recipient r \
LEFT JOIN Donor ON r.recipient_id = Donor.donate_to \
LEFT JOIN Donation ON Donor.donor_id = Donation.donor_id \
GROUP BY r.recipient_id, r.name, r.address, r.category \
ORDER BY r.recipient_id";

pub const INSERT_DONOR_WITH_DONATION: &str = "CALL InsertDonorWithDonation(?, ?, ?, ?, ?, ?)";
pub const UPDATE_DONOR: &str = "CALL UpdateDonor(?, ?, ?, ?)";
pub const UPDATE_VOLUNTEER: &str = "CALL UpdateVolunteer(?, ?, ?, ?, ?)";
pub const UPDATE_RECIPIENT: &str = "CALL UpdateRecipient(?, ?, ?, ?)";
pub const DELETE_DONOR: &str = "CALL DeleteDonorAndRelatedData(?)";
pub const DELETE_VOLUNTEER: &str = "CALL DeleteVolunteerAndRelatedData(?)";
pub const DELETE_RECIPIENT: &str = "CALL DeleteRecipientAndRelatedData(?)";

/// MySQL-backed store. Composite writes and cascades live in stored procedures.
pub struct SqlStore {
    connector: Connector,
}

impl SqlStore {
    pub fn new(connector: Connector) -> Self {
        Self { connector }
    }

    async fn call_procedure(&self, sql: &'static str, values: Vec<Value>) -> Result<(), DbErr> {
        tracing::debug!(procedure = sql, "calling stored procedure");
        self.connector
            .run(move |db| {
                Box::pin(async move {
                    let txn = db.begin().await?;
                    txn.execute(Statement::from_sql_and_values(DatabaseBackend::MySql, sql, values))
                        .await?;
                    txn.commit().await
                })
            })
            .await
    }

    async fn fetch_all<R>(&self, sql: &'static str) -> Result<Vec<R>, DbErr>
    where
        R: FromQueryResult + Send + Sync + 'static,
    {
        self.connector
            .run(move |db| {
                Box::pin(async move {
                    R::find_by_statement(Statement::from_string(DatabaseBackend::MySql, sql))
                        .all(db)
                        .await
                })
            })
            .await
    }
}

#[async_trait]
impl CharityStore for SqlStore {
    fn backend_tag(&self) -> &'static str {
        "mysql"
    }

    async fn sign_up(&self, new_user: NewUser) -> Result<(), DbErr> {
        self.connector
            .run(move |db| {
                Box::pin(async move {
                    let txn = db.begin().await?;
                    user::Entity::insert(user::ActiveModel {
                        user_id: NotSet,
                        username: Set(new_user.username),
                        email: Set(new_user.email),
                        password: Set(new_user.password),
                        role: Set(new_user.role.as_str().to_string()),
                    })
                    .exec_without_returning(&txn)
                    .await?;
                    txn.commit().await
                })
            })
            .await
    }

    async fn display_donor_table(&self) -> Result<Vec<DonorRow>, DbErr> {
        self.fetch_all(DONOR_TABLE_SQL).await
    }

    async fn display_volunteer_table(&self) -> Result<Vec<VolunteerRow>, DbErr> {
        self.fetch_all(VOLUNTEER_TABLE_SQL).await
    }

    async fn display_recipient_table(&self) -> Result<Vec<RecipientRow>, DbErr> {
        self.fetch_all(RECIPIENT_TABLE_SQL).await
    }

    async fn insert_donor_with_donation(&self, donor: NewDonor, donated_at: NaiveDateTime) -> Result<(), DbErr> {
        self.call_procedure(
            INSERT_DONOR_WITH_DONATION,
            vec![
                donor.name.into(),
                donor.phone_number.into(),
                donor.address.into(),
                donor.donation_amount.into(),
                donated_at.into(),
                donor.donate_to.into(),
            ],
        )
        .await
    }

    async fn insert_volunteer(&self, new: NewVolunteer) -> Result<i32, DbErr> {
        self.connector
            .run(move |db| {
                Box::pin(async move {
                    let txn = db.begin().await?;
                    let inserted = volunteer::Entity::insert(volunteer::ActiveModel {
                        volunteer_id: NotSet,
                        name: Set(new.name),
                        phone_number: Set(new.phone_number),
                        availability_start: Set(new.availability_start),
                        availability_end: Set(new.availability_end),
                    })
                    .exec(&txn)
                    .await?;
                    let volunteer_id = inserted.last_insert_id;

                    if let Some(recipient_id) = new.recipient_id {
                        volunteer_recipient_map::Entity::insert(volunteer_recipient_map::ActiveModel {
                            volunteer_id: Set(volunteer_id),
                            recipient_id: Set(recipient_id),
                        })
                        .exec_without_returning(&txn)
                        .await?;
                    }

                    txn.commit().await?;
                    Ok(volunteer_id)
                })
            })
            .await
    }

    async fn insert_recipient(&self, new: NewRecipient) -> Result<i32, DbErr> {
        self.connector
            .run(move |db| {
                Box::pin(async move {
                    let txn = db.begin().await?;
                    let inserted = recipient::Entity::insert(recipient::ActiveModel {
                        recipient_id: NotSet,
                        name: Set(new.name),
                        address: Set(new.address),
                        category: Set(new.category.as_str().to_string()),
                    })
                    .exec(&txn)
                    .await?;
                    txn.commit().await?;
                    Ok(inserted.last_insert_id)
                })
            })
            .await
    }

    async fn update_donor(&self, donor_id: i32, update: DonorUpdate) -> Result<(), DbErr> {
        self.call_procedure(
            UPDATE_DONOR,
            vec![
                donor_id.into(),
                update.name.into(),
                update.phone_number.into(),
                update.address.into(),
            ],
        )
        .await
    }

    async fn update_volunteer(&self, volunteer_id: i32, update: VolunteerUpdate) -> Result<(), DbErr> {
        self.call_procedure(
            UPDATE_VOLUNTEER,
            vec![
                volunteer_id.into(),
                update.name.into(),
                update.phone_number.into(),
                update.availability_start.into(),
                update.availability_end.into(),
            ],
        )
        .await
    }

    async fn update_recipient(&self, recipient_id: i32, update: RecipientUpdate) -> Result<(), DbErr> {
        self.call_procedure(
            UPDATE_RECIPIENT,
            vec![
                recipient_id.into(),
                update.name.into(),
                update.address.into(),
                update.category.as_str().into(),
            ],
        )
        .await
    }

    async fn delete_donor(&self, donor_id: i32) -> Result<(), DbErr> {
        self.call_procedure(DELETE_DONOR, vec![donor_id.into()]).await
    }

    async fn delete_volunteer(&self, volunteer_id: i32) -> Result<(), DbErr> {
        self.call_procedure(DELETE_VOLUNTEER, vec![volunteer_id.into()]).await
    }

    async fn delete_recipient(&self, recipient_id: i32) -> Result<(), DbErr> {
        self.call_procedure(DELETE_RECIPIENT, vec![recipient_id.into()]).await
    }
}
