pub mod accessory;
pub mod amc_contract;
pub mod assignment;
pub mod branding;
pub mod company_portal;
pub mod device;
pub mod directory;
mod id;
pub mod platform;
pub mod slot;
pub mod ticket;
pub mod visit;
pub mod warranty;

pub use id::Id;
pub use ticket::Ticket;
