use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Volunteer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub volunteer_id: i32,
    pub name: String,
    pub phone_number: String,
    pub availability_start: Date,
    pub availability_end: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::volunteer_recipient_map::Entity")]
    VolunteerRecipientMap,
}

impl Related<super::recipient::Entity> for Entity {
    fn to() -> RelationDef {
        super::volunteer_recipient_map::Relation::Recipient.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::volunteer_recipient_map::Relation::Volunteer.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
