pub mod account;
pub mod algorithm;
pub mod blocklist;
pub mod history;
pub mod policy;
pub mod reset;
pub mod session;
