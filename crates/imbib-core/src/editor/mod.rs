//! Entry editor models
//!
//! Which fields an editor shows and how its rows are weighted. No rendering
//! happens here.

mod field_set;
mod layout;
mod user_tab;

pub use field_set::*;
pub use layout::*;
pub use user_tab::*;
