pub mod add;
pub mod host;
pub mod ledger;
pub mod list;
pub mod manage;
pub mod provider;
