use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Donor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub donor_id: i32,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub donate_to: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::donation::Entity")]
    Donation,
    #[sea_orm(
        belongs_to = "super::recipient::Entity",
        from = "Column::DonateTo",
        to = "super::recipient::Column::RecipientId"
    )]
    Recipient,
}

impl Related<super::donation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donation.def()
    }
}

impl Related<super::recipient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
