use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::analysis::SimilarityScores;
use crate::dataset::UserRecord;
use crate::error::Result;

/// Pretty JSON with four-space indentation, replacing whatever is at `path`.
pub fn write_dataset(path: &Path, dataset: &[UserRecord]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    dataset.serialize(&mut ser)?;
    writer.flush()?;
    info!(path = %path.display(), users = dataset.len(), "dataset written");
    Ok(())
}

pub fn read_dataset(path: &Path) -> Result<Vec<UserRecord>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[derive(Debug, Serialize)]
struct ScoreRow<'a> {
    user_a: &'a str,
    user_b: &'a str,
    similarity: f64,
}

/// One `user_a,user_b,similarity` row per scored pair.
pub fn write_similarity_csv(path: &Path, scores: &SimilarityScores) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (pair, similarity) in scores.iter() {
        writer.serialize(ScoreRow {
            user_a: pair.first(),
            user_b: pair.second(),
            similarity,
        })?;
    }
    writer.flush()?;
    info!(path = %path.display(), pairs = scores.len(), "similarity scores written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use tempfile::tempdir;

    fn sample() -> Vec<UserRecord> {
        vec![
            UserRecord {
                username: "quietowl12".into(),
                name: "Mary Lee".into(),
                followers_count: 31,
                following_count: 200,
                language: "tr".into(),
                region: "TR".into(),
                tweets: vec!["Quia et sed.".into()],
                followers: vec!["redfox7".into()],
                following: vec![],
            },
            UserRecord {
                username: "redfox7".into(),
                name: "John Smith".into(),
                followers_count: 120,
                following_count: 45,
                language: "en".into(),
                region: "US".into(),
                tweets: vec!["Ut enim.".into(), "Dolor sit amet ipsum.".into()],
                followers: vec!["quietowl12".into(), "redfox7".into()],
                following: vec!["quietowl12".into()],
            },
        ]
    }

    #[test]
    fn round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        let dataset = sample();
        write_dataset(&path, &dataset).unwrap();
        assert_eq!(read_dataset(&path).unwrap(), dataset);
    }

    #[test]
    fn layout_uses_four_space_indent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        write_dataset(&path, &sample()[..1]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        expect![[r#"
            [
                {
                    "username": "quietowl12",
                    "name": "Mary Lee",
                    "followers_count": 31,
                    "following_count": 200,
                    "language": "tr",
                    "region": "TR",
                    "tweets": [
                        "Quia et sed."
                    ],
                    "followers": [
                        "redfox7"
                    ],
                    "following": []
                }
            ]"#]]
        .assert_eq(&text);
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        std::fs::write(&path, "not json at all, and quite a bit longer than []").unwrap();
        write_dataset(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("dataset.json");
        let err = write_dataset(&path, &sample()).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }

    #[test]
    fn scores_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        let mut scores = SimilarityScores::new();
        scores.insert("b", "a", 0.5);
        scores.insert("a", "c", 0.25);
        write_similarity_csv(&path, &scores).unwrap();
        expect![[r#"
            user_a,user_b,similarity
            a,b,0.5
            a,c,0.25
        "#]]
        .assert_eq(&std::fs::read_to_string(&path).unwrap());
    }
}
