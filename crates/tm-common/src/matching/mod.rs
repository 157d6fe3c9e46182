pub mod coverage;
pub mod filter;
pub mod location;
pub mod pipeline;
pub mod profile;
pub mod ranker;
pub mod requirements;
pub mod scoring;
pub mod weights;
