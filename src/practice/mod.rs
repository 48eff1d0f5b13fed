//! Practice records and the per-practice pipeline stages

mod data;
pub mod sampler;
pub mod joiner;
pub mod revenue;
pub mod supplement;

pub use data::{Practice, SampledPractice, ResolvedPractice, RevenueBreakdown, SupplementTotals};
pub use sampler::PracticeSampler;
pub use revenue::RevenueParams;
