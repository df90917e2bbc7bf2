use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tweetsim::analysis::{corpus_word_counts, user_top_words};
use tweetsim::layout::spring_layout;
use tweetsim::persist::{write_dataset, write_similarity_csv};
use tweetsim::report::open_charts;
use tweetsim::{Config, DatasetGenerator, Reporter, SimilarityScores, SocialGraph};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tweetsim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::default();
    let layout_seed = config.seed.unwrap_or_else(rand::random);

    // 1. Generate data
    let progress = ProgressBar::new(config.num_users as u64);
    progress.set_style(
        ProgressStyle::with_template("Generating Dataset {bar:40} {pos}/{len} users {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let dataset = DatasetGenerator::new(&config)
        .generate_with_progress(config.num_users, &progress)
        .context("generating dataset")?;

    // 2. Save it for later runs
    write_dataset(&config.dataset_path, &dataset)
        .with_context(|| format!("writing {}", config.dataset_path.display()))?;

    // 3. Word statistics and pairwise similarity
    let corpus = corpus_word_counts(&dataset);
    let top_words = corpus.most_common(config.top_words);
    info!(
        tokens = corpus.total(),
        distinct = corpus.len(),
        "corpus word counts ready"
    );

    let scores = SimilarityScores::compute(&user_top_words(&dataset, config.user_top_words));
    write_similarity_csv(&config.scores_path, &scores)
        .with_context(|| format!("writing {}", config.scores_path.display()))?;

    // 4. Graphs
    let followers = SocialGraph::from_followers(&dataset);
    followers
        .write_dot(&config.dot_path)
        .with_context(|| format!("writing {}", config.dot_path.display()))?;

    let mut weighted = followers.clone();
    weighted.add_similarity_edges(&scores, config.similarity_threshold);
    let mst = weighted.minimum_spanning_tree();
    info!(
        nodes = followers.node_count(),
        follow_edges = followers.edge_count(),
        components = followers.component_count(),
        mst_edges = mst.edge_count(),
        "graphs built"
    );

    // 5. Charts
    let mut reporter = Reporter::new(&config.chart_dir)?;
    reporter.top_words(&top_words)?;
    reporter.followers(&dataset)?;
    reporter.followers_histogram(&dataset, config.histogram_bins)?;
    reporter.top_similarities(&scores.top(config.top_similarities))?;
    reporter.graph(
        "follower_graph",
        "Follower relationships between users",
        &followers,
        &spring_layout(&followers, config.layout_iterations, layout_seed),
    )?;
    reporter.graph(
        "similarity_mst",
        "Users linked by similar interests (minimum spanning tree)",
        &mst,
        &spring_layout(&mst, config.layout_iterations, layout_seed),
    )?;

    if config.open_viewer {
        open_charts(reporter.written())?;
    }

    Ok(())
}
