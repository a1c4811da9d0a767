pub mod donation;
pub mod donor;
pub mod recipient;
pub mod user;
pub mod volunteer;
pub mod volunteer_recipient_map;
