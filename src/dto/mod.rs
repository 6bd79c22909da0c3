//! Response bodies that combine several domain values.

pub mod leads;
pub mod pipeline;
pub mod quiz;
pub mod site;
