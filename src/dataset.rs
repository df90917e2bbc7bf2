use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::RangeInclusive;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::faker::Faker;

/// Give up on drawing distinct names after this many tries per name wanted.
const DRAW_ATTEMPTS_PER_NAME: usize = 64;

/// One fake account. Key order here is the key order in the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub name: String,
    pub followers_count: u32,
    pub following_count: u32,
    pub language: String,
    pub region: String,
    pub tweets: Vec<String>,
    pub followers: Vec<String>,
    pub following: Vec<String>,
}

/// Usernames that follower and following lists are sampled from.
///
/// `common` is shared by every user so the follower graph ends up connected;
/// `unique` pads lists up to their target size. The two may overlap.
#[derive(Debug, Clone, Default)]
pub struct UsernamePools {
    pub common: Vec<String>,
    pub unique: Vec<String>,
}

impl UsernamePools {
    pub fn new(common: Vec<String>, unique: Vec<String>) -> Self {
        UsernamePools { common, unique }
    }

    /// `common_size` draws (repeats allowed), then exactly `unique_size`
    /// distinct names.
    pub fn generate<R: Rng + ?Sized>(
        faker: &Faker,
        rng: &mut R,
        unique_size: usize,
        common_size: usize,
    ) -> Result<Self> {
        let common = (0..common_size).map(|_| faker.user_name(rng)).collect();

        let mut seen = HashSet::with_capacity(unique_size);
        let mut unique = Vec::with_capacity(unique_size);
        let mut attempts = 0;
        while unique.len() < unique_size {
            if attempts >= unique_size * DRAW_ATTEMPTS_PER_NAME {
                return Err(Error::PoolExhausted {
                    wanted: unique_size,
                    got: unique.len(),
                });
            }
            attempts += 1;
            let name = faker.user_name(rng);
            if seen.insert(name.clone()) {
                unique.push(name);
            }
        }

        Ok(UsernamePools { common, unique })
    }

    pub fn contains(&self, username: &str) -> bool {
        self.common.iter().any(|n| n == username) || self.unique.iter().any(|n| n == username)
    }
}

pub struct DatasetGenerator {
    faker: Faker,
    rng: StdRng,
    common_pool_size: usize,
    follow_range: RangeInclusive<u32>,
    tweet_range: RangeInclusive<usize>,
    used_names: HashSet<String>,
}

impl DatasetGenerator {
    pub fn new(config: &Config) -> Self {
        Self::with_faker(config, Faker::new())
    }

    pub fn with_faker(config: &Config, faker: Faker) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        DatasetGenerator {
            faker,
            rng,
            common_pool_size: config.common_pool_size,
            follow_range: config.follow_range.clone(),
            tweet_range: config.tweet_range.clone(),
            used_names: HashSet::new(),
        }
    }

    pub fn pools(&mut self, num_users: usize) -> Result<UsernamePools> {
        UsernamePools::generate(&self.faker, &mut self.rng, num_users, self.common_pool_size)
    }

    pub fn generate(&mut self, num_users: usize) -> Result<Vec<UserRecord>> {
        self.generate_with_progress(num_users, &ProgressBar::hidden())
    }

    pub fn generate_with_progress(
        &mut self,
        num_users: usize,
        progress: &ProgressBar,
    ) -> Result<Vec<UserRecord>> {
        let pools = self.pools(num_users)?;
        debug!(
            common = pools.common.len(),
            unique = pools.unique.len(),
            "username pools ready"
        );

        let mut dataset = Vec::with_capacity(num_users);
        for idx in 0..num_users {
            progress.set_message(format!("User {}/{}", idx + 1, num_users));
            dataset.push(self.generate_user(&pools)?);
            progress.inc(1);
        }
        progress.finish();

        info!(users = dataset.len(), "dataset generated");
        Ok(dataset)
    }

    pub fn generate_user(&mut self, pools: &UsernamePools) -> Result<UserRecord> {
        let username = self.fresh_username()?;
        let name = self.faker.name(&mut self.rng);
        let followers_count = self.rng.gen_range(self.follow_range.clone());
        let following_count = self.rng.gen_range(self.follow_range.clone());

        let followers = sample_capped(pools, followers_count as usize, &mut self.rng);
        let following = sample_capped(pools, following_count as usize, &mut self.rng);

        let num_tweets = self.rng.gen_range(self.tweet_range.clone());
        let tweets = (0..num_tweets)
            .map(|_| self.faker.sentence(&mut self.rng))
            .collect();

        Ok(UserRecord {
            username,
            name,
            followers_count,
            following_count,
            language: self.faker.language_code(&mut self.rng),
            region: self.faker.country_code(&mut self.rng),
            tweets,
            followers,
            following,
        })
    }

    fn fresh_username(&mut self) -> Result<String> {
        for _ in 0..DRAW_ATTEMPTS_PER_NAME {
            let name = self.faker.user_name(&mut self.rng);
            if self.used_names.insert(name.clone()) {
                return Ok(name);
            }
        }
        Err(Error::UsernameCollisions {
            attempts: DRAW_ATTEMPTS_PER_NAME,
            taken: self.used_names.len(),
        })
    }
}

/// Sample `count` names without replacement from the common pool, then top
/// up from the unique pool. Either pool running dry just leaves the list
/// short.
pub fn sample_capped<R: Rng + ?Sized>(
    pools: &UsernamePools,
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut picked: Vec<String> = pools
        .common
        .choose_multiple(rng, count.min(pools.common.len()))
        .cloned()
        .collect();
    let remaining = count - picked.len();
    picked.extend(
        pools
            .unique
            .choose_multiple(rng, remaining.min(pools.unique.len()))
            .cloned(),
    );
    picked
}
