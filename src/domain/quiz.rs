//! Volunteer-welfare quiz: question catalog, scoring and profile buckets.
//!
//! Every question belongs to one [`Dimension`]. Answers are summed per
//! dimension, turned into a percentage of the dimension maximum and combined
//! into a weighted overall score which selects a [`Profile`].

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Welfare/management category scored by the quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Waardering,
    Communicatie,
    Werkdruk,
    Betrokkenheid,
    Organisatie,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Waardering,
        Dimension::Communicatie,
        Dimension::Werkdruk,
        Dimension::Betrokkenheid,
        Dimension::Organisatie,
    ];

    /// Relative weight in the overall score. The weights sum to 20.
    pub const fn weight(self) -> u32 {
        match self {
            Dimension::Waardering => 5,
            Dimension::Communicatie => 4,
            Dimension::Werkdruk => 4,
            Dimension::Betrokkenheid => 4,
            Dimension::Organisatie => 3,
        }
    }

    /// Average percentage reached by comparable volunteer organisations.
    pub const fn sector_average(self) -> f64 {
        match self {
            Dimension::Waardering => 62.0,
            Dimension::Communicatie => 58.0,
            Dimension::Werkdruk => 55.0,
            Dimension::Betrokkenheid => 64.0,
            Dimension::Organisatie => 60.0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Dimension::Waardering => "waardering",
            Dimension::Communicatie => "communicatie",
            Dimension::Werkdruk => "werkdruk",
            Dimension::Betrokkenheid => "betrokkenheid",
            Dimension::Organisatie => "organisatie",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Dimension::Waardering => "Waardering",
            Dimension::Communicatie => "Communicatie",
            Dimension::Werkdruk => "Werkdruk",
            Dimension::Betrokkenheid => "Betrokkenheid",
            Dimension::Organisatie => "Organisatie",
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable answer of a question.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct QuizOption {
    pub label: &'static str,
    pub score: u8,
}

/// A single quiz question.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub dimension: Dimension,
    pub text: &'static str,
    pub options: [QuizOption; 4],
}

impl Question {
    pub fn max_score(&self) -> u8 {
        self.options.iter().map(|o| o.score).max().unwrap_or(0)
    }
}

const fn opt(label: &'static str, score: u8) -> QuizOption {
    QuizOption { label, score }
}

const FREQUENCY: [QuizOption; 4] = [
    opt("Nooit", 0),
    opt("Soms", 1),
    opt("Vaak", 2),
    opt("Altijd", 3),
];

const AGREEMENT: [QuizOption; 4] = [
    opt("Helemaal oneens", 0),
    opt("Oneens", 1),
    opt("Eens", 2),
    opt("Helemaal eens", 3),
];

const PRESSURE: [QuizOption; 4] = [
    opt("Heel vaak", 0),
    opt("Regelmatig", 1),
    opt("Soms", 2),
    opt("Zelden", 3),
];

/// The fixed question catalog.
pub static QUESTIONS: [Question; 11] = [
    Question {
        id: "q1",
        dimension: Dimension::Waardering,
        text: "Hoe vaak bedankt je organisatie vrijwilligers persoonlijk voor hun inzet?",
        options: FREQUENCY,
    },
    Question {
        id: "q2",
        dimension: Dimension::Waardering,
        text: "Vrijwilligers weten welk verschil hun werk maakt.",
        options: AGREEMENT,
    },
    Question {
        id: "q3",
        dimension: Dimension::Communicatie,
        text: "Hoe vaak krijgen vrijwilligers tijdig de informatie die ze nodig hebben?",
        options: FREQUENCY,
    },
    Question {
        id: "q4",
        dimension: Dimension::Communicatie,
        text: "Vrijwilligers weten bij wie ze terechtkunnen met vragen.",
        options: AGREEMENT,
    },
    Question {
        id: "q5",
        dimension: Dimension::Werkdruk,
        text: "Hoe vaak geven vrijwilligers aan dat ze het te druk hebben?",
        options: PRESSURE,
    },
    Question {
        id: "q6",
        dimension: Dimension::Werkdruk,
        text: "Hoe vaak vallen diensten op dezelfde vaste groep mensen terug?",
        options: PRESSURE,
    },
    Question {
        id: "q7",
        dimension: Dimension::Betrokkenheid,
        text: "Vrijwilligers denken actief mee over de koers van de organisatie.",
        options: AGREEMENT,
    },
    Question {
        id: "q8",
        dimension: Dimension::Betrokkenheid,
        text: "Hoe vaak brengen vrijwilligers zelf nieuwe vrijwilligers aan?",
        options: FREQUENCY,
    },
    Question {
        id: "q9",
        dimension: Dimension::Organisatie,
        text: "Roosters en planning zijn voor iedereen op één plek te vinden.",
        options: AGREEMENT,
    },
    Question {
        id: "q10",
        dimension: Dimension::Organisatie,
        text: "Hoe vaak lukt het om een open dienst binnen een dag in te vullen?",
        options: FREQUENCY,
    },
    Question {
        id: "q11",
        dimension: Dimension::Organisatie,
        text: "Coördinatoren hebben zicht op beschikbaarheid en inzet van vrijwilligers.",
        options: AGREEMENT,
    },
];

/// Looks up a question by id.
pub fn question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Maximum attainable points for a dimension.
pub fn max_points(dimension: Dimension) -> u32 {
    QUESTIONS
        .iter()
        .filter(|q| q.dimension == dimension)
        .map(|q| u32::from(q.max_score()))
        .sum()
}

/// A submitted answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    #[serde(deserialize_with = "saturating_score")]
    pub score: u8,
}

/// Accepts any non-negative integer; scoring caps it at the question maximum.
fn saturating_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = u64::deserialize(deserializer)?;
    Ok(u8::try_from(raw).unwrap_or(u8::MAX))
}

impl Answer {
    pub fn new(question_id: impl Into<String>, score: u8) -> Self {
        Self {
            question_id: question_id.into(),
            score,
        }
    }
}

/// Score reached within one dimension.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub points: u32,
    pub max_points: u32,
    pub percentage: f64,
}

/// Outcome of scoring a set of answers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizScores {
    pub dimensions: Vec<DimensionScore>,
    pub overall: f64,
}

impl QuizScores {
    /// Percentage for `dimension`, zero when the dimension is absent.
    pub fn percentage(&self, dimension: Dimension) -> f64 {
        self.dimensions
            .iter()
            .find(|d| d.dimension == dimension)
            .map(|d| d.percentage)
            .unwrap_or(0.0)
    }

    pub fn profile(&self) -> Profile {
        Profile::classify(self.overall)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Scores a set of answers.
///
/// Unknown questions are ignored, a repeated question keeps its last answer
/// and scores above the question maximum are capped. Unanswered questions
/// count as zero.
pub fn score_answers(answers: &[Answer]) -> QuizScores {
    let mut accepted: HashMap<&'static str, u8> = HashMap::new();
    for answer in answers {
        if let Some(q) = question(&answer.question_id) {
            accepted.insert(q.id, answer.score.min(q.max_score()));
        }
    }

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let dimensions = Dimension::ALL
        .iter()
        .map(|&dimension| {
            let points: u32 = QUESTIONS
                .iter()
                .filter(|q| q.dimension == dimension)
                .filter_map(|q| accepted.get(q.id))
                .map(|&score| u32::from(score))
                .sum();
            let max = max_points(dimension);
            let percentage = if max == 0 {
                0.0
            } else {
                clamp_percentage(f64::from(points) / f64::from(max) * 100.0)
            };
            weighted_sum += f64::from(dimension.weight()) * percentage;
            weight_total += f64::from(dimension.weight());
            DimensionScore {
                dimension,
                points,
                max_points: max,
                percentage: round1(percentage),
            }
        })
        .collect();

    let overall = if weight_total == 0.0 {
        0.0
    } else {
        round1(clamp_percentage(weighted_sum / weight_total))
    };

    QuizScores {
        dimensions,
        overall,
    }
}

/// Qualitative bucket derived from the overall score, ordered worst to best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Starter,
    Groeier,
    Bouwer,
    Kampioen,
}

impl Profile {
    /// Lower bounds (inclusive) of each bucket above [`Profile::Starter`].
    const THRESHOLDS: [(f64, Profile); 3] = [
        (80.0, Profile::Kampioen),
        (60.0, Profile::Bouwer),
        (40.0, Profile::Groeier),
    ];

    pub fn classify(overall: f64) -> Profile {
        Self::THRESHOLDS
            .iter()
            .find(|(bound, _)| overall >= *bound)
            .map(|(_, profile)| *profile)
            .unwrap_or(Profile::Starter)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Profile::Starter => "starter",
            Profile::Groeier => "groeier",
            Profile::Bouwer => "bouwer",
            Profile::Kampioen => "kampioen",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Profile::Starter => "Startende organisatie",
            Profile::Groeier => "Groeiende organisatie",
            Profile::Bouwer => "Bewuste organisatie",
            Profile::Kampioen => "Vrijwilligerskampioen",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Profile::Starter => {
                "Er liggen veel kansen om vrijwilligers beter te ondersteunen en te behouden."
            }
            Profile::Groeier => {
                "De basis staat. Met meer structuur groeit het plezier van je vrijwilligers mee."
            }
            Profile::Bouwer => {
                "Je organisatie heeft oog voor vrijwilligers. Verfijn waar het nog wringt."
            }
            Profile::Kampioen => {
                "Je vrijwilligers voelen zich gezien en gesteund. Houd dit vast en deel je aanpak."
            }
        }
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "starter" => Ok(Profile::Starter),
            "groeier" => Ok(Profile::Groeier),
            "bouwer" => Ok(Profile::Bouwer),
            "kampioen" => Ok(Profile::Kampioen),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Size class chosen in the quiz intro.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationSize {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl OrganizationSize {
    /// Representative volunteer count used when none is given explicitly.
    pub const fn volunteer_count(self) -> u32 {
        match self {
            OrganizationSize::Xs => 20,
            OrganizationSize::Sm => 60,
            OrganizationSize::Md => 150,
            OrganizationSize::Lg => 350,
            OrganizationSize::Xl => 750,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            OrganizationSize::Xs => "xs",
            OrganizationSize::Sm => "sm",
            OrganizationSize::Md => "md",
            OrganizationSize::Lg => "lg",
            OrganizationSize::Xl => "xl",
        }
    }
}

impl Display for OrganizationSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganizationSize {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xs" => Ok(OrganizationSize::Xs),
            "sm" => Ok(OrganizationSize::Sm),
            "md" => Ok(OrganizationSize::Md),
            "lg" => Ok(OrganizationSize::Lg),
            "xl" => Ok(OrganizationSize::Xl),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Comparison of one dimension against the sector average.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BenchmarkEntry {
    pub dimension: Dimension,
    pub score: f64,
    pub sector_average: f64,
    pub delta: f64,
}

/// Quiz scores compared to the sector.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Benchmark {
    pub entries: Vec<BenchmarkEntry>,
    pub strongest: Dimension,
    pub weakest: Dimension,
}

/// Benchmarks the scores; ties resolve to the dimension listed first.
pub fn benchmark(scores: &QuizScores) -> Benchmark {
    let entries: Vec<BenchmarkEntry> = Dimension::ALL
        .iter()
        .map(|&dimension| {
            let score = scores.percentage(dimension);
            let sector_average = dimension.sector_average();
            BenchmarkEntry {
                dimension,
                score,
                sector_average,
                delta: round1(score - sector_average),
            }
        })
        .collect();

    let mut strongest = entries[0];
    let mut weakest = entries[0];
    for entry in &entries[1..] {
        if entry.delta > strongest.delta {
            strongest = *entry;
        }
        if entry.delta < weakest.delta {
            weakest = *entry;
        }
    }

    Benchmark {
        strongest: strongest.dimension,
        weakest: weakest.dimension,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_answers(score: u8) -> Vec<Answer> {
        QUESTIONS.iter().map(|q| Answer::new(q.id, score)).collect()
    }

    #[test]
    fn catalog_covers_every_dimension() {
        assert_eq!(QUESTIONS.len(), 11);
        for dimension in Dimension::ALL {
            assert!(max_points(dimension) > 0, "{dimension} has no questions");
        }
        let weights: u32 = Dimension::ALL.iter().map(|d| d.weight()).sum();
        assert_eq!(weights, 20);
    }

    #[test]
    fn all_maximum_answers_score_one_hundred() {
        let scores = score_answers(&all_answers(3));
        assert_eq!(scores.overall, 100.0);
        assert!(scores.dimensions.iter().all(|d| d.percentage == 100.0));
        assert_eq!(scores.profile(), Profile::Kampioen);
    }

    #[test]
    fn all_zero_answers_score_zero() {
        let scores = score_answers(&all_answers(0));
        assert_eq!(scores.overall, 0.0);
        assert_eq!(scores.profile(), Profile::Starter);
    }

    #[test]
    fn missing_answers_count_as_zero() {
        let scores = score_answers(&[Answer::new("q1", 3), Answer::new("q2", 3)]);
        assert_eq!(scores.percentage(Dimension::Waardering), 100.0);
        assert_eq!(scores.percentage(Dimension::Organisatie), 0.0);
        assert_eq!(scores.overall, 25.0);
    }

    #[test]
    fn out_of_range_and_unknown_answers_are_clamped_or_skipped() {
        let scores = score_answers(&[
            Answer::new("q1", 250),
            Answer::new("q1", 3),
            Answer::new("q99", 3),
            Answer::new("q2", 200),
        ]);
        let waardering = scores.dimensions[0];
        assert_eq!(waardering.points, 6);
        assert_eq!(waardering.percentage, 100.0);
        for d in &scores.dimensions {
            assert!((0.0..=100.0).contains(&d.percentage));
        }
    }

    #[test]
    fn oversized_submitted_scores_are_capped() {
        let answer: Answer =
            serde_json::from_str(r#"{"question_id": "q1", "score": 1000}"#).unwrap();
        assert_eq!(answer.score, u8::MAX);

        let scores = score_answers(&[answer]);
        assert_eq!(scores.dimensions[0].points, 3);
        assert!(serde_json::from_str::<Answer>(r#"{"question_id": "q1", "score": -1}"#).is_err());
    }

    #[test]
    fn duplicate_answers_keep_the_last_one() {
        let scores = score_answers(&[Answer::new("q3", 3), Answer::new("q3", 0)]);
        assert_eq!(scores.dimensions[1].points, 0);
    }

    #[test]
    fn profile_classification_is_monotonic() {
        let mut previous = Profile::classify(0.0);
        let mut score = 0.0;
        while score <= 100.0 {
            let profile = Profile::classify(score);
            assert!(profile >= previous, "profile dropped at {score}");
            previous = profile;
            score += 0.5;
        }
        assert_eq!(Profile::classify(39.9), Profile::Starter);
        assert_eq!(Profile::classify(40.0), Profile::Groeier);
        assert_eq!(Profile::classify(60.0), Profile::Bouwer);
        assert_eq!(Profile::classify(80.0), Profile::Kampioen);
        assert_eq!(Profile::classify(f64::NAN), Profile::Starter);
    }

    #[test]
    fn profile_round_trips_through_str() {
        for profile in [
            Profile::Starter,
            Profile::Groeier,
            Profile::Bouwer,
            Profile::Kampioen,
        ] {
            assert_eq!(profile.as_str().parse::<Profile>().unwrap(), profile);
        }
    }

    #[test]
    fn organization_size_maps_to_volunteers() {
        assert_eq!("sm".parse::<OrganizationSize>().unwrap().volunteer_count(), 60);
        assert!("xxl".parse::<OrganizationSize>().is_err());
    }

    #[test]
    fn benchmark_reports_strongest_and_weakest() {
        let answers = vec![
            Answer::new("q1", 3),
            Answer::new("q2", 3),
            Answer::new("q5", 0),
            Answer::new("q6", 0),
        ];
        let result = benchmark(&score_answers(&answers));
        assert_eq!(result.strongest, Dimension::Waardering);
        assert_eq!(result.weakest, Dimension::Betrokkenheid);
        assert_eq!(result.entries[0].delta, 38.0);
    }
}
