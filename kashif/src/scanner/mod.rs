pub mod accumulator;
pub mod fan_out;
pub mod token;

pub use accumulator::AddressSet;
pub use accumulator::buyer_candidate;
pub use accumulator::extract_buyer_candidates;
pub use fan_out::FanOutAggregator;
pub use fan_out::merge_occurrences;
pub use token::TokenScanner;
