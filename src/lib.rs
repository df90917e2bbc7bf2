//! Synthetic follower networks: fake users and tweets, word-overlap
//! similarity between users, follower/similarity graphs and charts.

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod faker;
pub mod graph;
pub mod layout;
pub mod persist;
pub mod report;

pub use analysis::{SimilarityScores, TopWords, UserPair, WordCounts};
pub use config::Config;
pub use dataset::{DatasetGenerator, UserRecord, UsernamePools};
pub use error::{Error, Result};
pub use graph::SocialGraph;
pub use report::Reporter;
