pub mod adapters;
pub mod datetime;
pub mod normalize;
pub mod numeric;
pub mod resolve;

pub use adapters::{
    AdapterOutcome, GsaAdapter, NychaAdapter, SourceAdapter, UsaspendingAdapter, adapter_for,
};
pub use datetime::{duration_days, parse_date};
pub use normalize::{Normalized, NormalizeWarning, normalize};
pub use numeric::parse_amount;
pub use resolve::{DuplicatePolicy, Resolution, Resolver, SharedSeenIds, shared_seen_ids};
