use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use charityhub::models::{
    DonorRow, DonorUpdate, NewDonor, NewRecipient, NewUser, NewVolunteer, RecipientCategory, RecipientRow,
    RecipientUpdate, Role, VolunteerRow, VolunteerUpdate,
};
use charityhub::panel::{self, FormInput, Level, Panel, Section, Widget};
use charityhub::store::{CharityStore, MemoryStore};
use sea_orm::DbErr;
use std::collections::HashSet;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn now() -> NaiveDateTime {
    today().and_hms_opt(9, 30, 0).unwrap()
}

/// Store whose every operation fails like an unreachable server.
struct BrokenStore;

fn unreachable() -> DbErr {
    DbErr::Custom("Can't connect to MySQL server on 'localhost:3306'".to_string())
}

#[async_trait]
impl CharityStore for BrokenStore {
    fn backend_tag(&self) -> &'static str {
        "broken"
    }

    async fn sign_up(&self, _user: NewUser) -> Result<(), DbErr> {
        Err(unreachable())
    }

    async fn display_donor_table(&self) -> Result<Vec<DonorRow>, DbErr> {
        Err(unreachable())
    }

    async fn display_volunteer_table(&self) -> Result<Vec<VolunteerRow>, DbErr> {
        Err(unreachable())
    }

    async fn display_recipient_table(&self) -> Result<Vec<RecipientRow>, DbErr> {
        Err(unreachable())
    }

    async fn insert_donor_with_donation(&self, _donor: NewDonor, _at: NaiveDateTime) -> Result<(), DbErr> {
        Err(unreachable())
    }

    async fn insert_volunteer(&self, _volunteer: NewVolunteer) -> Result<i32, DbErr> {
        Err(unreachable())
    }

    async fn insert_recipient(&self, _recipient: NewRecipient) -> Result<i32, DbErr> {
        Err(unreachable())
    }

    async fn update_donor(&self, _id: i32, _update: DonorUpdate) -> Result<(), DbErr> {
        Err(unreachable())
    }

    async fn update_volunteer(&self, _id: i32, _update: VolunteerUpdate) -> Result<(), DbErr> {
        Err(unreachable())
    }

    async fn update_recipient(&self, _id: i32, _update: RecipientUpdate) -> Result<(), DbErr> {
        Err(unreachable())
    }

    async fn delete_donor(&self, _id: i32) -> Result<(), DbErr> {
        Err(unreachable())
    }

    async fn delete_volunteer(&self, _id: i32) -> Result<(), DbErr> {
        Err(unreachable())
    }

    async fn delete_recipient(&self, _id: i32) -> Result<(), DbErr> {
        Err(unreachable())
    }
}

async fn seed_recipient(store: &MemoryStore) -> i32 {
    store
        .insert_recipient(NewRecipient {
            name: "Food Bank".to_string(),
            address: "9 Pier Rd".to_string(),
            category: RecipientCategory::General,
        })
        .await
        .unwrap()
}

#[test]
fn test_every_role_and_section_is_a_distinct_panel() {
    let panels: HashSet<Panel> = Panel::all().collect();
    assert_eq!(panels.len(), 12);
    for panel in Panel::all() {
        let form = panel.form(today());
        assert_eq!(form.is_none(), panel.section == Section::Read, "{:?}", panel);
    }
}

#[test]
fn test_donor_create_form_fields() {
    let form = Panel::new(Role::Donor, Section::Create).form(today()).unwrap();
    let names: Vec<&str> = form.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["name", "phone_number", "address", "donate_to", "donation_amount"]);
    assert_eq!(form.fields[4].widget, Widget::Number { min: 0.0 });
    assert_eq!(form.submit_label, "Submit Information");
}

#[test]
fn test_volunteer_dates_default_to_today() {
    let form = Panel::new(Role::Volunteer, Section::Update).form(today()).unwrap();
    let dates: Vec<_> = form.fields.iter().filter(|f| f.widget == Widget::Date).collect();
    assert_eq!(dates.len(), 2);
    assert!(dates.iter().all(|f| f.default.as_deref() == Some("2024-03-15")));
}

#[test]
fn test_recipient_category_select_lists_all_categories() {
    let form = Panel::new(Role::Recipient, Section::Create).form(today()).unwrap();
    let category = form.fields.iter().find(|f| f.name == "category").unwrap();
    match &category.widget {
        Widget::Select { options } => {
            assert_eq!(options, &["General", "Educational", "Healthcare", "Disaster relief", "Custom"]);
        }
        other => panic!("unexpected widget {:?}", other),
    }
    assert_eq!(category.default.as_deref(), Some("General"));
}

#[tokio::test]
async fn test_negative_amount_never_reaches_the_store() {
    let store = MemoryStore::new();
    let input = FormInput::new()
        .with("name", "Alice")
        .with("phone_number", "555-0000")
        .with("address", "1 Main St")
        .with("donation_amount", -10.0);

    let outcome = panel::submit(Panel::new(Role::Donor, Section::Create), &input, &store, now()).await;
    assert_eq!(outcome.level, Level::Error);
    assert!(store.display_donor_table().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_donor_submission_records_timestamp() {
    let store = MemoryStore::new();
    let recipient_id = seed_recipient(&store).await;
    let input = FormInput::new()
        .with("name", "Alice")
        .with("phone_number", "555-0000")
        .with("address", "1 Main St")
        .with("donate_to", recipient_id.to_string())
        .with("donation_amount", "12.5");

    let outcome = panel::submit(Panel::new(Role::Donor, Section::Create), &input, &store, now()).await;
    assert!(outcome.is_success(), "{:?}", outcome);

    let donations = store.donations_for(1).await;
    assert_eq!(donations.len(), 1);
    assert_eq!(donations[0].donation_amount, 12.5);
    assert_eq!(donations[0].donation_date, now());
}

#[tokio::test]
async fn test_unknown_recipient_is_reported_inline() {
    let store = MemoryStore::new();
    let input = FormInput::new().with("name", "Alice").with("donate_to", "42");

    let outcome = panel::submit(Panel::new(Role::Donor, Section::Create), &input, &store, now()).await;
    assert_eq!(outcome.level, Level::Error);
    assert!(outcome.message.contains("foreign key constraint fails"));
}

#[tokio::test]
async fn test_update_of_missing_id_succeeds() {
    let store = MemoryStore::new();
    let input = FormInput::new()
        .with("recipient_id", "77")
        .with("name", "Nobody")
        .with("address", "Nowhere");

    let outcome = panel::submit(Panel::new(Role::Recipient, Section::Update), &input, &store, now()).await;
    assert_eq!(outcome.message, "Recipient information updated successfully!");
    assert!(store.display_recipient_table().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_volunteer_delete_removes_mapping() {
    let store = MemoryStore::new();
    let recipient_id = seed_recipient(&store).await;
    let create = FormInput::new()
        .with("name", "Vic")
        .with("phone_number", "555-2222")
        .with("recipient_id", recipient_id);
    let created = panel::submit(Panel::new(Role::Volunteer, Section::Create), &create, &store, now()).await;
    assert!(created.is_success());
    assert_eq!(store.recipients_of(1).await, vec![recipient_id]);

    let delete = FormInput::new().with("volunteer_id", "1");
    let deleted = panel::submit(Panel::new(Role::Volunteer, Section::Delete), &delete, &store, now()).await;
    assert_eq!(deleted.message, "Volunteer information deleted successfully!");
    assert!(store.recipients_of(1).await.is_empty());
    assert!(store.display_volunteer_table().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_read_submission_is_rejected() {
    let store = MemoryStore::new();
    let outcome = panel::submit(Panel::new(Role::Donor, Section::Read), &FormInput::new(), &store, now()).await;
    assert_eq!(outcome.level, Level::Error);
}

#[tokio::test]
async fn test_create_views_show_recipients_once_there_are_some() {
    let store = MemoryStore::new();
    let donor_create = Panel::new(Role::Donor, Section::Create);

    let empty = panel::render(donor_create, &store, today()).await;
    assert!(empty.table.is_none());
    assert!(empty.form.is_some());

    seed_recipient(&store).await;
    let seeded = panel::render(donor_create, &store, today()).await;
    let table = seeded.table.unwrap();
    assert_eq!(table.caption, "Recipients:");
    assert_eq!(table.rows.len(), 1);

    let update = panel::render(Panel::new(Role::Donor, Section::Update), &store, today()).await;
    assert!(update.table.is_none());
}

#[tokio::test]
async fn test_store_failures_become_notices() {
    let view = panel::render(Panel::new(Role::Volunteer, Section::Read), &BrokenStore, today()).await;
    assert!(view.table.is_none());
    let notice = view.notice.unwrap();
    assert_eq!(notice.level, Level::Error);
    assert!(notice.message.starts_with("Error: "));

    let input = FormInput::new().with("donor_id", "1");
    let outcome = panel::submit(Panel::new(Role::Donor, Section::Delete), &input, &BrokenStore, now()).await;
    assert_eq!(outcome.level, Level::Error);
    assert!(outcome.message.contains("Can't connect"));
}

#[tokio::test]
async fn test_signup_defaults_role_and_counts_users() {
    let store = MemoryStore::new();
    let input = FormInput::new()
        .with("username", "carol")
        .with("email", "c@example.org")
        .with("password", "secret");

    let outcome = panel::submit_signup(&input, &store).await;
    assert!(outcome.is_success());
    assert_eq!(store.user_count().await, 1);

    let bad_role = input.clone().with("username", "dave").with("role", "Admin");
    let rejected = panel::submit_signup(&bad_role, &store).await;
    assert_eq!(rejected.level, Level::Error);
    assert_eq!(store.user_count().await, 1);
}
