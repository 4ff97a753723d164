pub mod companies;
pub mod contacts;
pub mod outreach;
pub mod scan;
