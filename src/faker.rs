use rand::Rng;
use rand::seq::SliceRandom;

const PREFIXES: &[&str] = &[
    "dark", "shadow", "light", "blue", "red", "green", "gold", "silver", "phantom", "ninja",
    "stealth", "epic", "legend", "super", "mega", "quiet", "lucky", "wild", "cosmic", "urban",
];

const SUFFIXES: &[&str] = &[
    "warrior", "hunter", "mage", "slayer", "knight", "rogue", "wizard", "fox", "lord", "king",
    "queen", "master", "pro", "noob", "gamer", "writer", "coder", "runner", "dreamer", "owl",
];

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Betty", "Mark",
    "Sandra", "Steven", "Ashley", "Andrew", "Emily", "Joshua", "Donna", "Kevin", "Michelle",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
];

const LOREM_WORDS: &[&str] = &[
    "a", "ab", "accusamus", "ad", "alias", "aliquam", "amet", "animi", "aperiam", "architecto",
    "at", "atque", "autem", "beatae", "blanditiis", "commodi", "consectetur", "corporis",
    "culpa", "cum", "cupiditate", "debitis", "delectus", "deleniti", "dicta", "dignissimos",
    "distinctio", "dolor", "dolore", "dolorem", "dolores", "dolorum", "ducimus", "ea", "earum",
    "eius", "eligendi", "enim", "eos", "error", "esse", "est", "et", "eum", "eveniet", "ex",
    "excepturi", "exercitationem", "expedita", "explicabo", "facere", "facilis", "fuga",
    "fugiat", "fugit", "harum", "hic", "id", "illo", "illum", "impedit", "in", "incidunt",
    "inventore", "ipsa", "ipsam", "ipsum", "iste", "itaque", "iure", "iusto", "labore",
    "laboriosam", "laborum", "laudantium", "libero", "magnam", "magni", "maiores", "maxime",
    "minima", "minus", "modi", "molestiae", "mollitia", "nam", "natus", "necessitatibus",
    "nemo", "neque", "nesciunt", "nihil", "nisi", "nobis", "non", "nostrum", "nulla", "numquam",
    "occaecati", "odio", "odit", "officia", "omnis", "optio", "pariatur", "perferendis",
    "perspiciatis", "placeat", "porro", "possimus", "praesentium", "provident", "quae",
    "quaerat", "quam", "quas", "quasi", "qui", "quia", "quibusdam", "quidem", "quis", "quisquam",
    "quo", "quod", "quos", "ratione", "recusandae", "reiciendis", "rem", "repellat",
    "repellendus", "reprehenderit", "repudiandae", "rerum", "saepe", "sapiente", "sed", "sequi",
    "similique", "sint", "sit", "soluta", "sunt", "suscipit", "tempora", "tempore", "temporibus",
    "tenetur", "totam", "ullam", "unde", "ut", "vel", "velit", "veniam", "veritatis", "vero",
    "vitae", "voluptas", "voluptate", "voluptatem", "voluptates", "voluptatibus", "voluptatum",
];

const LANGUAGE_CODES: &[&str] = &[
    "ar", "bn", "cs", "da", "de", "el", "en", "es", "fa", "fi", "fr", "he", "hi", "hu", "id",
    "it", "ja", "ko", "ms", "nl", "no", "pl", "pt", "ro", "ru", "sv", "sw", "th", "tr", "uk",
    "ur", "vi", "zh",
];

const COUNTRY_CODES: &[&str] = &[
    "AR", "AU", "AT", "BE", "BR", "CA", "CH", "CL", "CN", "CO", "CZ", "DE", "DK", "EG", "ES",
    "FI", "FR", "GB", "GR", "HU", "ID", "IE", "IL", "IN", "IT", "JP", "KE", "KR", "MX", "NG",
    "NL", "NO", "NZ", "PE", "PH", "PK", "PL", "PT", "RO", "RU", "SA", "SE", "TH", "TR", "UA",
    "US", "VN", "ZA",
];

/// Source of fake identities and filler text.
///
/// Every method draws from the caller's rng, so a seeded rng gives a
/// reproducible stream of identities.
pub struct Faker {
    prefixes: &'static [&'static str],
    suffixes: &'static [&'static str],
}

impl Default for Faker {
    fn default() -> Self {
        Self::new()
    }
}

impl Faker {
    pub fn new() -> Self {
        Faker {
            prefixes: PREFIXES,
            suffixes: SUFFIXES,
        }
    }

    /// Restrict usernames to the given handle parts.
    pub fn with_handles(
        prefixes: &'static [&'static str],
        suffixes: &'static [&'static str],
    ) -> Self {
        Faker { prefixes, suffixes }
    }

    /// Number of distinct usernames this faker can produce.
    pub fn username_space(&self) -> usize {
        self.prefixes.len() * self.suffixes.len() * 998
    }

    pub fn user_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let prefix = pick(self.prefixes, rng);
        let suffix = pick(self.suffixes, rng);
        let num = rng.gen_range(1..999);
        format!("{}{}{}", prefix, suffix, num)
    }

    pub fn name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        format!("{} {}", pick(FIRST_NAMES, rng), pick(LAST_NAMES, rng))
    }

    /// Three to eight lorem words, first one capitalised, ending in a period.
    pub fn sentence<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let nb_words = rng.gen_range(3..=8);
        let mut sentence = (0..nb_words)
            .map(|_| pick(LOREM_WORDS, rng))
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(first) = sentence.get(..1) {
            let upper = first.to_ascii_uppercase();
            sentence.replace_range(..1, &upper);
        }
        sentence.push('.');
        sentence
    }

    pub fn language_code<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        pick(LANGUAGE_CODES, rng).to_string()
    }

    pub fn country_code<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        pick(COUNTRY_CODES, rng).to_string()
    }
}

// All word lists above are non-empty.
fn pick<R: Rng + ?Sized>(words: &[&'static str], rng: &mut R) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}
