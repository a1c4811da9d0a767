use crate::models::{DonorRow, RecipientRow, VolunteerRow};
use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

/// Display table. Builders return `None` for an empty result set so nothing is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Table {
    pub caption: String,
    pub columns: Vec<String>,
    #[schema(value_type = Vec<Vec<Object>>)]
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    fn build<R>(caption: &str, columns: &[&str], rows: &[R], cells: impl Fn(&R) -> Vec<Value>) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        Some(Self {
            caption: caption.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows.iter().map(cells).collect(),
        })
    }

    pub fn donors(rows: &[DonorRow]) -> Option<Self> {
        Self::build(
            "Donors:",
            &["Donor ID", "Name", "Phone Number", "Address", "Donate To", "Total Donation"],
            rows,
            |d| {
                vec![
                    json!(d.donor_id),
                    json!(d.name),
                    json!(d.phone_number),
                    json!(d.address),
                    json!(d.donate_to),
                    json!(d.total_donation),
                ]
            },
        )
    }

    pub fn volunteers(rows: &[VolunteerRow]) -> Option<Self> {
        Self::build(
            "Volunteers:",
            &[
                "Volunteer ID",
                "Name",
                "Phone Number",
                "Available from",
                "Available Till",
                "Recipients Helped",
            ],
            rows,
            |v| {
                vec![
                    json!(v.volunteer_id),
                    json!(v.name),
                    json!(v.phone_number),
                    json!(v.availability_start),
                    json!(v.availability_end),
                    json!(v.recipients_helped),
                ]
            },
        )
    }

    pub fn recipients(rows: &[RecipientRow]) -> Option<Self> {
        Self::build(
            "Recipients:",
            &["Recipient ID", "Name", "Address", "Category", "Amount Raised"],
            rows,
            |r| {
                vec![
                    json!(r.recipient_id),
                    json!(r.name),
                    json!(r.address),
                    json!(r.category),
                    json!(r.amount_raised),
                ]
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_rows_render_nothing() {
        assert!(Table::donors(&[]).is_none());
        assert!(Table::volunteers(&[]).is_none());
        assert!(Table::recipients(&[]).is_none());
    }

    #[test]
    fn volunteer_dates_render_as_iso() {
        let table = Table::volunteers(&[VolunteerRow {
            volunteer_id: 1,
            name: "Vic".to_string(),
            phone_number: "555-2222".to_string(),
            availability_start: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            availability_end: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            recipients_helped: 0,
        }])
        .unwrap();
        assert_eq!(table.columns.len(), table.rows[0].len());
        assert_eq!(table.rows[0][3], json!("2024-01-02"));
    }

    #[test]
    fn unassigned_donor_shows_null_recipient() {
        let table = Table::donors(&[DonorRow {
            donor_id: 4,
            name: "Carol".to_string(),
            phone_number: "555-3333".to_string(),
            address: "3 Oak Ave".to_string(),
            donate_to: None,
            total_donation: 0.0,
        }])
        .unwrap();
        assert_eq!(table.caption, "Donors:");
        assert_eq!(table.rows[0][4], Value::Null);
    }
}
