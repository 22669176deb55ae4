pub mod certificate;
pub mod page;
pub mod resident;
pub mod template;
pub mod user;
