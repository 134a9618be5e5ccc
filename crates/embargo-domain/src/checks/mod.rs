//! One module per rule. Each `run` appends findings and never short-circuits another rule.

pub(crate) mod availability_date;
pub(crate) mod campus_availability;
pub(crate) mod grants;
pub(crate) mod item_public;
pub(crate) mod protection;
pub(crate) mod public_access_date;
pub(crate) mod public_bundle;
pub(crate) mod readers;
pub(crate) mod terms;
pub(crate) mod utils;
pub(crate) mod visible_bundle;
