use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Everything a run needs, fixed at compile time.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` seeds from OS entropy, so every run differs.
    pub seed: Option<u64>,
    pub num_users: usize,
    pub common_pool_size: usize,
    pub follow_range: RangeInclusive<u32>,
    pub tweet_range: RangeInclusive<usize>,
    /// How many corpus-wide words end up in the bar chart.
    pub top_words: usize,
    /// Size of each user's top-word list fed into Jaccard.
    pub user_top_words: usize,
    pub similarity_threshold: f64,
    pub top_similarities: usize,
    /// Buckets in the follower-count histogram.
    pub histogram_bins: usize,
    pub layout_iterations: usize,
    pub dataset_path: PathBuf,
    pub scores_path: PathBuf,
    pub dot_path: PathBuf,
    pub chart_dir: PathBuf,
    pub open_viewer: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            seed: None,
            num_users: 50,
            common_pool_size: 50,
            follow_range: 30..=200,
            tweet_range: 10..=50,
            top_words: 25,
            user_top_words: 200,
            similarity_threshold: 0.3,
            top_similarities: 100,
            histogram_bins: 10,
            layout_iterations: 50,
            dataset_path: PathBuf::from("Similarity_Dataset.json"),
            scores_path: PathBuf::from("similarity_scores.csv"),
            dot_path: PathBuf::from("follower_graph.dot"),
            chart_dir: PathBuf::from("charts"),
            open_viewer: true,
        }
    }
}
