pub mod business;
pub mod menu;

pub use business::{BusinessRecord, CreateBusinessRequest, NewBusiness};
pub use menu::MenuEntry;
