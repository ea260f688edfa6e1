pub mod catalog;
pub mod catalog_item;
pub mod commands;
pub mod errors;
pub mod loan;
pub mod member;
pub mod value_objects;

pub use catalog::*;
pub use catalog_item::*;
pub use errors::*;
pub use loan::*;
pub use member::*;
pub use value_objects::*;
