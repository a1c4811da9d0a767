use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Recipient")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub recipient_id: i32,
    pub name: String,
    pub address: String,
    pub category: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::donor::Entity")]
    Donor,
    #[sea_orm(has_many = "super::volunteer_recipient_map::Entity")]
    VolunteerRecipientMap,
}

impl Related<super::donor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donor.def()
    }
}

impl Related<super::volunteer::Entity> for Entity {
    fn to() -> RelationDef {
        super::volunteer_recipient_map::Relation::Volunteer.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::volunteer_recipient_map::Relation::Recipient.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
