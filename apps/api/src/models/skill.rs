use std::fmt;

use serde::{Deserialize, Serialize};

/// A skill label. Case-sensitive; identity is the label itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skill(String);

impl Skill {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Input capture: trims surrounding whitespace and rejects blank labels.
    /// This is the only normalization a label ever receives.
    pub fn capture(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Skill {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// Skills unique by label, kept in insertion order.
///
/// Serialized as a plain array of labels, which is also the form the
/// skill-set store and the recommendation provider exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Skill>", into = "Vec<Skill>")]
pub struct SkillSet {
    skills: Vec<Skill>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw labels, keeping the first occurrence of each.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        labels.into_iter().map(Skill::new).collect()
    }

    /// Like [`SkillSet::from_labels`], but runs each label through
    /// [`Skill::capture`] and drops blanks.
    pub fn capture_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .filter_map(|l| Skill::capture(l.as_ref()))
            .collect()
    }

    /// Returns `true` if the skill was not already present.
    pub fn insert(&mut self, skill: Skill) -> bool {
        if self.contains(&skill) {
            return false;
        }
        self.skills.push(skill);
        true
    }

    /// Returns `true` if the skill was present.
    pub fn remove(&mut self, skill: &Skill) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s != skill);
        self.skills.len() != before
    }

    pub fn contains(&self, skill: &Skill) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Skill> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.as_str().to_string()).collect()
    }
}

impl FromIterator<Skill> for SkillSet {
    fn from_iter<I: IntoIterator<Item = Skill>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}

impl Extend<Skill> for SkillSet {
    fn extend<I: IntoIterator<Item = Skill>>(&mut self, iter: I) {
        for skill in iter {
            self.insert(skill);
        }
    }
}

impl From<Vec<Skill>> for SkillSet {
    fn from(skills: Vec<Skill>) -> Self {
        skills.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<Skill> {
    fn from(set: SkillSet) -> Self {
        set.skills
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a Skill;
    type IntoIter = std::slice::Iter<'a, Skill>;

    fn into_iter(self) -> Self::IntoIter {
        self.skills.iter()
    }
}
