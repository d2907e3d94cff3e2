use crate::domain::model::{avatar_url, Demographics, DemoScenario, RegistrationRecord};
use crate::utils::error::{Result, SeederError};
use chrono::{Duration, Utc};
use fake::faker::address::en::CityName;
use fake::faker::internet::en::Username;
use fake::faker::lorem::en::{Sentence, Words};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Shared password of every persona and generated record.
pub const DEMO_PASSWORD: &str = "Demo123!";
pub const DEMO_EMAIL_DOMAIN: &str = "demo.example.com";
pub const DEMO_PHONE_PREFIX: &str = "415555";
/// Upper bound on users generated in one request.
pub const MAX_USER_COUNT: usize = 10_000;

const GENDERS: [&str; 4] = ["Male", "Female", "Other", "Prefer not to say"];
const PERSONAS: [&str; 5] = ["alice", "bob", "charlie", "diana", "eve"];

pub const DEMO_SCENARIOS: [DemoScenario; 2] = [
    DemoScenario {
        name: "perfect_match_journey",
        description: "Alice and Bob - Perfect Match Story",
        users: &["demo.alice@example.com", "demo.bob@example.com"],
        actions: &[
            "Both users swipe right on each other",
            "Immediate match notification",
            "Bob sends first message: 'Hi Alice! I see we both love hiking and cooking. What's your favorite trail in the Bay Area?'",
            "Alice responds within minutes with enthusiasm",
            "Natural conversation develops over 10+ messages",
            "Eventually plan to meet for coffee",
        ],
    },
    DemoScenario {
        name: "discovery_journey",
        description: "Charlie's Profile Discovery Experience",
        users: &["demo.charlie@example.com"],
        actions: &[
            "Charlie logs in and sees curated profile stack",
            "Swipes through 15 profiles with realistic timing",
            "Likes 3 profiles, passes on others",
            "Gets 1 immediate match, 1 match later",
            "Receives notification about new matches",
        ],
    },
];

/// The five fixed personas used for consistent demos.
pub fn demo_personas() -> Vec<RegistrationRecord> {
    PERSONAS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            RegistrationRecord::new(
                format!("{}_demo", name),
                format!("demo.{}@example.com", name),
                DEMO_PASSWORD,
            )
            .with_phone(format!("{}{}", DEMO_PHONE_PREFIX, 1001 + i))
            .with_picture(avatar_url(name))
        })
        .collect()
}

pub fn demo_scenarios() -> &'static [DemoScenario] {
    &DEMO_SCENARIOS
}

/// Random record source. Unseeded unless built with [`FixtureGenerator::with_seed`].
pub struct FixtureGenerator {
    rng: StdRng,
}

impl FixtureGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map(Self::with_seed).unwrap_or_default()
    }

    /// Returns the seed personas in order followed by `count` random records.
    pub fn generate(
        &mut self,
        count: usize,
        seed_personas: &[RegistrationRecord],
    ) -> Vec<RegistrationRecord> {
        let mut records =
            Vec::with_capacity(seed_personas.len().saturating_add(count.min(MAX_USER_COUNT)));
        records.extend_from_slice(seed_personas);
        for _ in 0..count {
            records.push(self.random_record());
        }
        records
    }

    /// Personas plus `fill` generated demo users.
    pub fn demo_users(&mut self, fill: usize) -> Vec<RegistrationRecord> {
        self.generate(fill, &demo_personas())
    }

    pub fn random_record(&mut self) -> RegistrationRecord {
        let handle: String = Username().fake_with_rng(&mut self.rng);
        let first: String = FirstName().fake_with_rng(&mut self.rng);
        let last: String = LastName().fake_with_rng(&mut self.rng);
        let suffix: u16 = self.rng.gen_range(0..1000);

        let email = format!(
            "{}.{}{}@{}",
            email_part(&first),
            email_part(&last),
            suffix,
            DEMO_EMAIL_DOMAIN
        );
        let phone = format!("{}{:04}", DEMO_PHONE_PREFIX, self.rng.gen_range(0..10_000));
        let picture = avatar_url(&self.random_uuid().to_string());

        RegistrationRecord::new(format!("{}_demo", handle.to_lowercase()), email, DEMO_PASSWORD)
            .with_phone(phone)
            .with_picture(picture)
    }

    pub fn random_uuid(&mut self) -> Uuid {
        uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid()
    }

    /// Demographic filler for direct inserts.
    pub fn filler(&mut self) -> Demographics {
        let now = Utc::now();
        let age_days = self.rng.gen_range(18 * 365..68 * 365);
        let idle_minutes = self.rng.gen_range(0..30 * 24 * 60);
        let interests: Vec<String> = Words(3..8).fake_with_rng(&mut self.rng);

        Demographics {
            date_of_birth: now - Duration::days(age_days),
            bio: Sentence(10..11).fake_with_rng(&mut self.rng),
            gender: GENDERS
                .choose(&mut self.rng)
                .copied()
                .unwrap_or("Other")
                .to_string(),
            location: CityName().fake_with_rng(&mut self.rng),
            interests: interests.join(", "),
            last_active: now - Duration::minutes(idle_minutes),
        }
    }

    /// Comma-separated preference words for profile rows.
    pub fn preferences(&mut self) -> String {
        let words: Vec<String> = Words(5..6).fake_with_rng(&mut self.rng);
        words.join(", ")
    }
}

impl Default for FixtureGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a requested user count, rejecting anything above [`MAX_USER_COUNT`].
pub fn parse_user_count(input: &str) -> Result<usize> {
    let input = input.trim();
    let count = input
        .parse::<usize>()
        .map_err(|_| SeederError::InvalidInput {
            message: format!("'{}' is not a valid user count", input),
        })?;
    if count > MAX_USER_COUNT {
        return Err(SeederError::InvalidInput {
            message: format!("{} users requested, the maximum is {}", count, MAX_USER_COUNT),
        });
    }
    Ok(count)
}

fn email_part(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_length_is_seeds_plus_count() {
        let mut generator = FixtureGenerator::new();
        let personas = demo_personas();
        for count in [0, 1, 7, 45] {
            assert_eq!(
                generator.generate(count, &personas).len(),
                personas.len() + count
            );
        }
        assert_eq!(generator.generate(3, &[]).len(), 3);
    }

    #[test]
    fn test_generate_zero_returns_personas_in_order() {
        let mut generator = FixtureGenerator::new();
        let records = generator.generate(0, &demo_personas());

        let emails: Vec<&str> = records.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(
            emails,
            vec![
                "demo.alice@example.com",
                "demo.bob@example.com",
                "demo.charlie@example.com",
                "demo.diana@example.com",
                "demo.eve@example.com",
            ]
        );
        assert_eq!(records[0].username, "alice_demo");
        assert_eq!(records[4].phone_number.as_deref(), Some("4155551005"));
    }

    #[test]
    fn test_personas_identical_across_calls() {
        assert_eq!(demo_personas(), demo_personas());

        let mut a = FixtureGenerator::new();
        let mut b = FixtureGenerator::new();
        let first = a.generate(2, &demo_personas());
        let second = b.generate(2, &demo_personas());
        assert_eq!(first[..5], second[..5]);
    }

    #[test]
    fn test_generated_records_follow_templates() {
        let mut generator = FixtureGenerator::with_seed(42);
        for record in generator.generate(25, &[]) {
            assert_eq!(record.password, record.confirm_password);
            assert_eq!(record.password, DEMO_PASSWORD);
            assert!(record.username.ends_with("_demo"));
            assert!(record.email.ends_with("@demo.example.com"));

            let phone = record.phone_number.unwrap();
            assert_eq!(phone.len(), 10);
            assert!(phone.starts_with("415555"));
            assert!(phone.chars().all(|c| c.is_ascii_digit()));

            assert!(record
                .profile_picture
                .unwrap()
                .starts_with("https://i.pravatar.cc/150?u="));
        }
    }

    #[test]
    fn test_seeded_generators_are_reproducible() {
        let mut a = FixtureGenerator::with_seed(7);
        let mut b = FixtureGenerator::with_seed(7);
        assert_eq!(a.generate(5, &[]), b.generate(5, &[]));
    }

    #[test]
    fn test_user_count_bounds() {
        assert_eq!(parse_user_count("0").unwrap(), 0);
        assert_eq!(parse_user_count(" 25 ").unwrap(), 25);
        assert_eq!(parse_user_count("10000").unwrap(), MAX_USER_COUNT);
        assert!(parse_user_count("10001").is_err());
        assert!(parse_user_count("18446744073709551615").is_err());
        assert!(parse_user_count("99999999999999999999999").is_err());
        assert!(parse_user_count("-2").is_err());
        assert!(parse_user_count("abc").is_err());
    }

    #[test]
    fn test_demo_users_total() {
        let mut generator = FixtureGenerator::with_seed(1);
        assert_eq!(generator.demo_users(45).len(), 50);
    }

    #[test]
    fn test_filler_ranges() {
        let mut generator = FixtureGenerator::with_seed(3);
        let now = Utc::now();
        for _ in 0..20 {
            let filler = generator.filler();
            let age = now - filler.date_of_birth;
            assert!(age >= Duration::days(18 * 365) - Duration::minutes(1));
            assert!(age < Duration::days(68 * 365) + Duration::minutes(1));
            assert!(now - filler.last_active <= Duration::days(30));
            assert!(GENDERS.contains(&filler.gender.as_str()));
            let interest_count = filler.interests.split(", ").count();
            assert!((3..8).contains(&interest_count));
        }
    }

    #[test]
    fn test_scenarios_reference_personas() {
        let persona_emails: Vec<String> = demo_personas().into_iter().map(|p| p.email).collect();
        for scenario in demo_scenarios() {
            for user in scenario.users {
                assert!(persona_emails.iter().any(|e| e == user));
            }
        }
    }
}
