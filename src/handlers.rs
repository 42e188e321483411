pub mod adherents;
pub mod dues;
pub mod expenses;
pub mod health;
pub mod payments;
pub mod reminder_config;
pub mod synthese;
