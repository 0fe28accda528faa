use chrono::{Duration, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{IssueType, Status};

/// Source of every random value the ticket generator draws.
pub trait ValueProvider {
    /// A company-like display name.
    fn company(&mut self) -> String;

    /// A timestamp in `[start, end]`, second resolution.
    fn datetime_between(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> NaiveDateTime;

    fn issue_type(&mut self) -> IssueType;

    fn status(&mut self) -> Status;

    /// Integer hours in `[min, max]`.
    fn resolution_hours(&mut self, min: u32, max: u32) -> u32;
}

const LAST_NAMES: &[&str] = &[
    "Anderson", "Bailey", "Barnes", "Bennett", "Brooks", "Campbell", "Carter", "Collins",
    "Cooper", "Davis", "Edwards", "Evans", "Fisher", "Foster", "Garcia", "Gray", "Hayes",
    "Henderson", "Hughes", "Jenkins", "Kelly", "Lopez", "Martin", "Mitchell", "Morgan",
    "Murphy", "Nelson", "Parker", "Perry", "Powell", "Reed", "Reyes", "Richardson", "Ross",
    "Russell", "Sanders", "Stewart", "Sullivan", "Turner", "Walker", "Ward", "Watson",
    "Williams", "Wood", "Young",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Ltd", "Group", "PLC", "and Sons"];

/// rand-backed provider producing Faker-style company names.
pub struct FakerProvider<R: Rng = StdRng> {
    rng: R,
}

impl FakerProvider<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> FakerProvider<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.rng.gen_range(0..items.len())]
    }
}

impl<R: Rng> ValueProvider for FakerProvider<R> {
    fn company(&mut self) -> String {
        match self.rng.gen_range(0..3) {
            0 => {
                let name = self.pick(LAST_NAMES);
                let suffix = self.pick(COMPANY_SUFFIXES);
                format!("{} {}", name, suffix)
            }
            1 => {
                let a = self.pick(LAST_NAMES);
                let b = self.pick(LAST_NAMES);
                format!("{}-{}", a, b)
            }
            _ => {
                let a = self.pick(LAST_NAMES);
                let b = self.pick(LAST_NAMES);
                let c = self.pick(LAST_NAMES);
                format!("{}, {} and {}", a, b, c)
            }
        }
    }

    fn datetime_between(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> NaiveDateTime {
        let span = (end - start).num_seconds();
        if span <= 0 {
            return start;
        }
        start + Duration::seconds(self.rng.gen_range(0..=span))
    }

    fn issue_type(&mut self) -> IssueType {
        IssueType::ALL[self.rng.gen_range(0..IssueType::ALL.len())]
    }

    fn status(&mut self) -> Status {
        Status::ALL[self.rng.gen_range(0..Status::ALL.len())]
    }

    fn resolution_hours(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }
}
