use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const FIRST_JUZ: i32 = 1;
pub const LAST_JUZ: i32 = 30;

/// How the introductory surah (al-Fatiha) is kept out of candidate sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroExclusion {
    /// Excluded while a pick from juz 1 is being resolved.
    FirstJuz,
    /// Excluded from every pick.
    Global,
}

impl FromStr for IntroExclusion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first_juz" => Ok(IntroExclusion::FirstJuz),
            "global" => Ok(IntroExclusion::Global),
            other => Err(format!(
                "unknown intro exclusion '{other}' (expected 'first_juz' or 'global')"
            )),
        }
    }
}

/// Tunables of the generation run. `Default` is the production policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationPolicy {
    pub intro_surah: i32,
    pub intro_exclusion: IntroExclusion,
    /// Long surahs that may be drawn again after being used.
    pub reusable_surahs: Vec<i32>,
    /// Juz of short surahs where the requested size is used unscaled.
    pub short_surah_juz: i32,
    pub size_ratio: f64,
    pub max_attempts_per_pick: usize,
    pub max_question_count: usize,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            intro_surah: 1,
            intro_exclusion: IntroExclusion::FirstJuz,
            reusable_surahs: vec![2, 3, 4],
            short_surah_juz: LAST_JUZ,
            size_ratio: 0.75,
            max_attempts_per_pick: 10,
            max_question_count: 200,
        }
    }
}

impl GenerationPolicy {
    pub fn excludes_intro(&self, juz: i32) -> bool {
        match self.intro_exclusion {
            IntroExclusion::Global => true,
            IntroExclusion::FirstJuz => juz == FIRST_JUZ,
        }
    }

    pub fn is_reusable(&self, surah: i32) -> bool {
        self.reusable_surahs.contains(&surah)
    }

    /// Excerpt length to ask the selector for, given `available` ayat in the
    /// chosen surah. Always within `1..=available` when `available > 0`.
    pub fn effective_size(&self, juz: i32, requested: usize, available: usize) -> usize {
        let wanted = if juz == self.short_surah_juz {
            requested
        } else {
            (requested as f64 * self.size_ratio) as usize
        };
        wanted.min(available).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_size_scales_outside_last_juz() {
        let policy = GenerationPolicy::default();
        assert_eq!(policy.effective_size(5, 8, 100), 6);
        assert_eq!(policy.effective_size(5, 8, 4), 4);
    }

    #[test]
    fn test_effective_size_floors_at_one() {
        let policy = GenerationPolicy::default();
        // 1 * 0.75 truncates to 0
        assert_eq!(policy.effective_size(5, 1, 100), 1);
    }

    #[test]
    fn test_effective_size_last_juz_uses_requested_capped() {
        let policy = GenerationPolicy::default();
        assert_eq!(policy.effective_size(30, 8, 100), 8);
        assert_eq!(policy.effective_size(30, 8, 3), 3);
    }

    #[test]
    fn test_intro_exclusion_modes() {
        let mut policy = GenerationPolicy::default();
        assert!(policy.excludes_intro(1));
        assert!(!policy.excludes_intro(2));

        policy.intro_exclusion = IntroExclusion::Global;
        assert!(policy.excludes_intro(2));
    }

    #[test]
    fn test_intro_exclusion_parses_config_values() {
        assert_eq!(
            "Global".parse::<IntroExclusion>().unwrap(),
            IntroExclusion::Global
        );
        assert_eq!(
            " first_juz ".parse::<IntroExclusion>().unwrap(),
            IntroExclusion::FirstJuz
        );
        assert!("sometimes".parse::<IntroExclusion>().is_err());
    }
}
