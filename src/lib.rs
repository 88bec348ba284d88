pub mod dates;
pub mod delta;
pub mod errors;
pub mod fetch;
pub mod pipeline;
pub mod reconcile;
pub mod record;
pub mod store;
