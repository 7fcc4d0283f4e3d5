use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::Candidate;

/// Errors that can occur while loading a candidate batch
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid candidate data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Supplies the initial ordered candidate deck
pub trait CandidateSource {
    fn load(&mut self) -> Result<Vec<Candidate>, SourceError>;
}

/// Deterministic demo deck standing in for the profile-fetch backend
#[derive(Debug, Clone)]
pub struct DemoCandidateSource {
    count: usize,
}

impl DemoCandidateSource {
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

const DEMO_PROFILES: &[(&str, u8, &str, bool)] = &[
    ("Anna", 24, "Love traveling and photography", true),
    ("Maria", 26, "Designer, coffee and books person", true),
    ("Elena", 23, "Sports, yoga, healthy living", false),
    ("Ksenia", 25, "Marketer by day, dancer by night", true),
    ("Daria", 27, "Animal lover who cooks a lot", false),
    ("Sofia", 22, "Student and aspiring artist", true),
    ("Victoria", 28, "Entrepreneur, always on the move", true),
    ("Alisa", 24, "Music is my life, guitar and singing", false),
    ("Polina", 26, "HR manager into people and psychology", true),
    ("Ekaterina", 25, "Travel blogger, 15 countries so far", true),
];

const DEMO_TAG_SETS: &[&[&str]] = &[
    &["movies", "music", "books"],
    &["coffee", "wine", "food"],
    &["gym", "yoga", "running"],
    &["travel", "beach", "mountains"],
    &["art", "photo", "theatre"],
];

impl CandidateSource for DemoCandidateSource {
    fn load(&mut self) -> Result<Vec<Candidate>, SourceError> {
        let deck = DEMO_PROFILES
            .iter()
            .take(self.count)
            .enumerate()
            .map(|(i, &(name, age, bio, is_verified))| Candidate {
                id: i as u64 + 1,
                name: name.to_string(),
                age,
                bio: bio.to_string(),
                distance_km: (i as u16 % 10) + 1,
                is_verified,
                image_urls: (0..3)
                    .map(|n| format!("https://i.pravatar.cc/400?img={}", i + 10 * (n + 1)))
                    .collect(),
                tags: DEMO_TAG_SETS[i % DEMO_TAG_SETS.len()]
                    .iter()
                    .map(|t| t.to_string())
                    .collect(),
            })
            .collect();
        Ok(deck)
    }
}

/// Loads a candidate batch from a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CandidateSource for JsonFileSource {
    fn load(&mut self) -> Result<Vec<Candidate>, SourceError> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
