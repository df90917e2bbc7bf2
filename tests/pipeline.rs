use petgraph::algo::is_cyclic_undirected;
use std::collections::HashSet;
use tempfile::tempdir;

use tweetsim::analysis::{corpus_word_counts, user_top_words};
use tweetsim::layout::spring_layout;
use tweetsim::persist::{read_dataset, write_dataset, write_similarity_csv};
use tweetsim::{Config, DatasetGenerator, Reporter, SimilarityScores, SocialGraph};

fn seeded_config(seed: u64) -> Config {
    Config {
        seed: Some(seed),
        num_users: 20,
        open_viewer: false,
        ..Config::default()
    }
}

#[test]
fn full_run_with_fixed_seed() {
    let dir = tempdir().unwrap();
    let config = seeded_config(2023);

    let dataset = DatasetGenerator::new(&config)
        .generate(config.num_users)
        .unwrap();
    assert_eq!(dataset.len(), 20);

    let path = dir.path().join("Similarity_Dataset.json");
    write_dataset(&path, &dataset).unwrap();
    assert_eq!(read_dataset(&path).unwrap(), dataset);

    let corpus = corpus_word_counts(&dataset);
    let total_tweet_words: usize = dataset
        .iter()
        .flat_map(|u| &u.tweets)
        .map(|t| t.split_whitespace().count())
        .sum();
    assert_eq!(corpus.total(), total_tweet_words);
    let top = corpus.most_common(config.top_words);
    assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));

    let scores = SimilarityScores::compute(&user_top_words(&dataset, config.user_top_words));
    assert_eq!(scores.len(), 20 * 19 / 2);
    for (pair, score) in scores.iter() {
        assert!((0.0..=1.0).contains(&score));
        assert_eq!(scores.get(pair.second(), pair.first()), Some(score));
    }
    write_similarity_csv(&dir.path().join("scores.csv"), &scores).unwrap();

    let followers = SocialGraph::from_followers(&dataset);
    for user in &dataset {
        assert!(followers.contains(&user.username));
    }
    let mut weighted = followers.clone();
    weighted.add_similarity_edges(&scores, config.similarity_threshold);
    let mst = weighted.minimum_spanning_tree();
    assert_eq!(mst.node_count(), weighted.node_count());
    assert_eq!(
        mst.edge_count(),
        weighted.node_count() - weighted.component_count()
    );
    assert!(!is_cyclic_undirected(mst.inner()));

    let mut reporter = Reporter::new(dir.path().join("charts")).unwrap();
    reporter.top_words(&top).unwrap();
    reporter.followers(&dataset).unwrap();
    reporter
        .followers_histogram(&dataset, config.histogram_bins)
        .unwrap();
    reporter
        .top_similarities(&scores.top(config.top_similarities))
        .unwrap();
    reporter
        .graph("follower_graph", "followers", &followers, &spring_layout(&followers, 10, 1))
        .unwrap();
    reporter
        .graph("similarity_mst", "mst", &mst, &spring_layout(&mst, 10, 1))
        .unwrap();
    assert_eq!(reporter.written().len(), 6);
    for chart in reporter.written() {
        assert!(chart.exists(), "{} missing", chart.display());
    }
}

#[test]
fn same_seed_same_statistics() {
    let run = |seed| {
        let config = seeded_config(seed);
        let dataset = DatasetGenerator::new(&config)
            .generate(config.num_users)
            .unwrap();
        let top = corpus_word_counts(&dataset).most_common(25);
        let scores = SimilarityScores::compute(&user_top_words(&dataset, 10));
        (dataset, top, scores.top(100))
    };
    let (a_data, a_top, a_scores) = run(77);
    let (b_data, b_top, b_scores) = run(77);
    assert_eq!(a_data, b_data);
    assert_eq!(a_top, b_top);
    assert_eq!(a_scores, b_scores);
}

#[test]
fn generated_follow_lists_come_from_the_pools() {
    let config = seeded_config(5);
    let mut generator = DatasetGenerator::new(&config);
    let pools = generator.pools(config.num_users).unwrap();
    let known: HashSet<&String> = pools.common.iter().chain(&pools.unique).collect();
    for _ in 0..config.num_users {
        let user = generator.generate_user(&pools).unwrap();
        assert!(user.followers.len() <= user.followers_count as usize);
        assert!(user.followers.iter().all(|f| known.contains(f)));
        assert!(user.following.iter().all(|f| known.contains(f)));
    }
}
