use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `quran` table. Ids are unique and follow mushaf order, so
/// the verses of a surah are contiguous in id space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Verse {
    pub id: i64,
    #[sqlx(rename = "jozz")]
    pub juz: i32,
    #[sqlx(rename = "sura_no")]
    pub surah: i32,
    #[sqlx(rename = "sura_name_en")]
    pub surah_name_en: Option<String>,
    #[sqlx(rename = "sura_name_ar")]
    pub surah_name_ar: Option<String>,
    pub page: Option<i32>,
    #[sqlx(rename = "aya_no")]
    pub aya: i32,
    #[sqlx(rename = "aya_text")]
    pub text: String,
    /// Plain (imla'i) spelling of the aya, when the corpus carries it.
    #[sqlx(rename = "aya_text_emlaey")]
    pub text_plain: Option<String>,
}
