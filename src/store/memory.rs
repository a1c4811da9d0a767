use super::CharityStore;
use crate::entities::{donation, donor, recipient, user, volunteer, volunteer_recipient_map};
use crate::models::{
    DonorRow, DonorUpdate, NewDonor, NewRecipient, NewUser, NewVolunteer, RecipientRow, RecipientUpdate,
    VolunteerRow, VolunteerUpdate,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::DbErr;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Default)]
struct Tables {
    users: Vec<user::Model>,
    donors: BTreeMap<i32, donor::Model>,
    donations: Vec<donation::Model>,
    volunteers: BTreeMap<i32, volunteer::Model>,
    recipients: BTreeMap<i32, recipient::Model>,
    volunteer_recipients: Vec<volunteer_recipient_map::Model>,
    next_user_id: i32,
    next_donor_id: i32,
    next_donation_id: i32,
    next_volunteer_id: i32,
    next_recipient_id: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

fn foreign_key_error(child: &str, column: &str, parent: &str) -> DbErr {
    DbErr::Custom(format!(
        "Cannot add or update a child row: a foreign key constraint fails (`{}`.`{}` references `{}`)",
        child, column, parent
    ))
}

impl Tables {
    fn check_recipient(&self, child: &str, column: &str, recipient_id: i32) -> Result<(), DbErr> {
        if self.recipients.contains_key(&recipient_id) {
            Ok(())
        } else {
            Err(foreign_key_error(child, column, "Recipient"))
        }
    }

    fn total_for_donor(&self, donor_id: i32) -> f64 {
        self.donations
            .iter()
            .filter(|d| d.donor_id == donor_id)
            .map(|d| d.donation_amount)
            .sum()
    }
}

/// In-process store with the same schema rules as the MySQL schema:
/// foreign keys are checked and deletes cascade like the stored procedures.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.lock().await.users.len()
    }

    pub async fn donations_for(&self, donor_id: i32) -> Vec<donation::Model> {
        self.tables
            .lock()
            .await
            .donations
            .iter()
            .filter(|d| d.donor_id == donor_id)
            .cloned()
            .collect()
    }

    pub async fn recipients_of(&self, volunteer_id: i32) -> Vec<i32> {
        self.tables
            .lock()
            .await
            .volunteer_recipients
            .iter()
            .filter(|m| m.volunteer_id == volunteer_id)
            .map(|m| m.recipient_id)
            .collect()
    }
}

#[async_trait]
impl CharityStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn sign_up(&self, new_user: NewUser) -> Result<(), DbErr> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.username == new_user.username) {
            return Err(DbErr::Custom(format!(
                "Duplicate entry '{}' for key 'User.username'",
                new_user.username
            )));
        }
        let user_id = next_id(&mut tables.next_user_id);
        tables.users.push(user::Model {
            user_id,
            username: new_user.username,
            email: new_user.email,
            password: new_user.password,
            role: new_user.role.as_str().to_string(),
        });
        Ok(())
    }

    async fn display_donor_table(&self) -> Result<Vec<DonorRow>, DbErr> {
        let tables = self.tables.lock().await;
        Ok(tables
            .donors
            .values()
            .map(|d| DonorRow {
                donor_id: d.donor_id,
                name: d.name.clone(),
                phone_number: d.phone_number.clone(),
                address: d.address.clone(),
                donate_to: d.donate_to,
                total_donation: tables.total_for_donor(d.donor_id),
            })
            .collect())
    }

    async fn display_volunteer_table(&self) -> Result<Vec<VolunteerRow>, DbErr> {
        let tables = self.tables.lock().await;
        Ok(tables
            .volunteers
            .values()
            .map(|v| VolunteerRow {
                volunteer_id: v.volunteer_id,
                name: v.name.clone(),
                phone_number: v.phone_number.clone(),
                availability_start: v.availability_start,
                availability_end: v.availability_end,
                recipients_helped: tables
                    .volunteer_recipients
                    .iter()
                    .filter(|m| m.volunteer_id == v.volunteer_id)
                    .count() as i64,
            })
            .collect())
    }

    async fn display_recipient_table(&self) -> Result<Vec<RecipientRow>, DbErr> {
        let tables = self.tables.lock().await;
        Ok(tables
            .recipients
            .values()
            .map(|r| RecipientRow {
                recipient_id: r.recipient_id,
                name: r.name.clone(),
                address: r.address.clone(),
                category: r.category.clone(),
                amount_raised: tables
                    .donors
                    .values()
                    .filter(|d| d.donate_to == Some(r.recipient_id))
                    .map(|d| tables.total_for_donor(d.donor_id))
                    .sum(),
            })
            .collect())
    }

    async fn insert_donor_with_donation(&self, new: NewDonor, donated_at: NaiveDateTime) -> Result<(), DbErr> {
        let mut tables = self.tables.lock().await;
        if let Some(recipient_id) = new.donate_to {
            tables.check_recipient("Donor", "donate_to", recipient_id)?;
        }
        let donor_id = next_id(&mut tables.next_donor_id);
        tables.donors.insert(
            donor_id,
            donor::Model {
                donor_id,
                name: new.name,
                phone_number: new.phone_number,
                address: new.address,
                donate_to: new.donate_to,
            },
        );
        let donation_id = next_id(&mut tables.next_donation_id);
        tables.donations.push(donation::Model {
            donation_id,
            donor_id,
            donation_amount: new.donation_amount,
            donation_date: donated_at,
        });
        Ok(())
    }

    async fn insert_volunteer(&self, new: NewVolunteer) -> Result<i32, DbErr> {
        let mut tables = self.tables.lock().await;
        if let Some(recipient_id) = new.recipient_id {
            tables.check_recipient("VolunteerRecipientMap", "recipient_id", recipient_id)?;
        }
        let volunteer_id = next_id(&mut tables.next_volunteer_id);
        tables.volunteers.insert(
            volunteer_id,
            volunteer::Model {
                volunteer_id,
                name: new.name,
                phone_number: new.phone_number,
                availability_start: new.availability_start,
                availability_end: new.availability_end,
            },
        );
        if let Some(recipient_id) = new.recipient_id {
            tables.volunteer_recipients.push(volunteer_recipient_map::Model {
                volunteer_id,
                recipient_id,
            });
        }
        Ok(volunteer_id)
    }

    async fn insert_recipient(&self, new: NewRecipient) -> Result<i32, DbErr> {
        let mut tables = self.tables.lock().await;
        let recipient_id = next_id(&mut tables.next_recipient_id);
        tables.recipients.insert(
            recipient_id,
            recipient::Model {
                recipient_id,
                name: new.name,
                address: new.address,
                category: new.category.as_str().to_string(),
            },
        );
        Ok(recipient_id)
    }

    async fn update_donor(&self, donor_id: i32, update: DonorUpdate) -> Result<(), DbErr> {
        let mut tables = self.tables.lock().await;
        if let Some(d) = tables.donors.get_mut(&donor_id) {
            d.name = update.name;
            d.phone_number = update.phone_number;
            d.address = update.address;
        }
        Ok(())
    }

    async fn update_volunteer(&self, volunteer_id: i32, update: VolunteerUpdate) -> Result<(), DbErr> {
        let mut tables = self.tables.lock().await;
        if let Some(v) = tables.volunteers.get_mut(&volunteer_id) {
            v.name = update.name;
            v.phone_number = update.phone_number;
            v.availability_start = update.availability_start;
            v.availability_end = update.availability_end;
        }
        Ok(())
    }

    async fn update_recipient(&self, recipient_id: i32, update: RecipientUpdate) -> Result<(), DbErr> {
        let mut tables = self.tables.lock().await;
        if let Some(r) = tables.recipients.get_mut(&recipient_id) {
            r.name = update.name;
            r.address = update.address;
            r.category = update.category.as_str().to_string();
        }
        Ok(())
    }

    async fn delete_donor(&self, donor_id: i32) -> Result<(), DbErr> {
        let mut tables = self.tables.lock().await;
        tables.donations.retain(|d| d.donor_id != donor_id);
        tables.donors.remove(&donor_id);
        Ok(())
    }

    async fn delete_volunteer(&self, volunteer_id: i32) -> Result<(), DbErr> {
        let mut tables = self.tables.lock().await;
        tables.volunteer_recipients.retain(|m| m.volunteer_id != volunteer_id);
        tables.volunteers.remove(&volunteer_id);
        Ok(())
    }

    async fn delete_recipient(&self, recipient_id: i32) -> Result<(), DbErr> {
        let mut tables = self.tables.lock().await;
        tables.volunteer_recipients.retain(|m| m.recipient_id != recipient_id);
        for d in tables.donors.values_mut() {
            if d.donate_to == Some(recipient_id) {
                d.donate_to = None;
            }
        }
        tables.recipients.remove(&recipient_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecipientCategory, Role};
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn recipient(name: &str) -> NewRecipient {
        NewRecipient {
            name: name.to_string(),
            address: "9 Elm St".to_string(),
            category: RecipientCategory::Healthcare,
        }
    }

    fn donor(name: &str, donate_to: Option<i32>, amount: f64) -> NewDonor {
        NewDonor {
            name: name.to_string(),
            phone_number: "555-1111".to_string(),
            address: "1 Main St".to_string(),
            donate_to,
            donation_amount: amount,
        }
    }

    #[tokio::test]
    async fn amount_raised_sums_earmarked_donations() {
        let store = MemoryStore::new();
        let clinic = store.insert_recipient(recipient("Clinic")).await.unwrap();
        let school = store.insert_recipient(recipient("School")).await.unwrap();
        store.insert_donor_with_donation(donor("Alice", Some(clinic), 50.0), at()).await.unwrap();
        store.insert_donor_with_donation(donor("Bob", Some(clinic), 25.5), at()).await.unwrap();
        store.insert_donor_with_donation(donor("Carol", None, 10.0), at()).await.unwrap();

        let rows = store.display_recipient_table().await.unwrap();
        let raised: Vec<(i32, f64)> = rows.iter().map(|r| (r.recipient_id, r.amount_raised)).collect();
        assert_eq!(raised, vec![(clinic, 75.5), (school, 0.0)]);
    }

    #[tokio::test]
    async fn dangling_recipient_is_rejected() {
        let store = MemoryStore::new();
        let err = store
            .insert_donor_with_donation(donor("Alice", Some(42), 5.0), at())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("foreign key constraint fails"));
        assert!(store.display_donor_table().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_recipient_detaches_donors_and_volunteers() {
        let store = MemoryStore::new();
        let clinic = store.insert_recipient(recipient("Clinic")).await.unwrap();
        store.insert_donor_with_donation(donor("Alice", Some(clinic), 50.0), at()).await.unwrap();
        let volunteer_id = store
            .insert_volunteer(NewVolunteer {
                name: "Vic".to_string(),
                phone_number: "555-2222".to_string(),
                availability_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                availability_end: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                recipient_id: Some(clinic),
            })
            .await
            .unwrap();

        store.delete_recipient(clinic).await.unwrap();

        let donors = store.display_donor_table().await.unwrap();
        assert_eq!(donors[0].donate_to, None);
        assert_eq!(donors[0].total_donation, 50.0);
        assert!(store.recipients_of(volunteer_id).await.is_empty());
        assert!(store.display_recipient_table().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_username_fails() {
        let store = MemoryStore::new();
        let user = NewUser {
            username: "alice".to_string(),
            email: "a@example.org".to_string(),
            password: "pw".to_string(),
            role: Role::Donor,
        };
        store.sign_up(user.clone()).await.unwrap();
        let err = store.sign_up(user).await.unwrap_err();
        assert!(err.to_string().contains("Duplicate entry 'alice'"));
        assert_eq!(store.user_count().await, 1);
    }
}
