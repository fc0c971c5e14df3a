use serde::Serialize;
use time::macros::time;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time, Weekday};

use crate::catalog::repo_types::LocalizedText;

/// One dated class instance inside a requested week.
#[derive(Debug, Clone, Serialize)]
pub struct ClassSession {
    pub title: LocalizedText,
    pub sport_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
}

struct ClassSlot {
    weekday: Weekday,
    start: Time,
    sport_id: &'static str,
    title_ar: &'static str,
    title_en: &'static str,
}

/// The mock live schedule repeats weekly; times are wall-clock UTC.
fn weekly_template() -> Vec<ClassSlot> {
    vec![
        ClassSlot {
            weekday: Weekday::Monday,
            start: time!(18:00),
            sport_id: "kickboxing",
            title_ar: "كيك بوكسينج - للمبتدئين",
            title_en: "Kickboxing - Beginners",
        },
        ClassSlot {
            weekday: Weekday::Tuesday,
            start: time!(19:00),
            sport_id: "bodybuilding",
            title_ar: "كمال الأجسام - تمارين صدر",
            title_en: "Bodybuilding - Chest day",
        },
        ClassSlot {
            weekday: Weekday::Wednesday,
            start: time!(20:00),
            sport_id: "powerlifting",
            title_ar: "رفع الأثقال - سكوات",
            title_en: "Powerlifting - Squat",
        },
        ClassSlot {
            weekday: Weekday::Thursday,
            start: time!(18:00),
            sport_id: "fitness",
            title_ar: "لياقة بدنية - HIIT",
            title_en: "Fitness - HIIT",
        },
        ClassSlot {
            weekday: Weekday::Saturday,
            start: time!(17:00),
            sport_id: "kickboxing",
            title_ar: "كيك بوكسينج - متقدم",
            title_en: "Kickboxing - Advanced",
        },
    ]
}

/// The Monday on or before `date`.
pub fn week_start(date: Date) -> Date {
    date - Duration::days(i64::from(date.weekday().number_days_from_monday()))
}

pub fn week_days(start: Date) -> Vec<Date> {
    (0..7).map(|i| start + Duration::days(i)).collect()
}

/// Instantiates the weekly template inside the week beginning at `start`
/// (assumed to be a Monday). Each class runs one hour.
pub fn classes_for_week(start: Date) -> Vec<ClassSession> {
    weekly_template()
        .into_iter()
        .map(|slot| {
            let date =
                start + Duration::days(i64::from(slot.weekday.number_days_from_monday()));
            let begin = PrimitiveDateTime::new(date, slot.start).assume_utc();
            ClassSession {
                title: LocalizedText {
                    ar: slot.title_ar.to_string(),
                    en: slot.title_en.to_string(),
                },
                sport_id: slot.sport_id.to_string(),
                start: begin,
                end: begin + Duration::hours(1),
            }
        })
        .collect()
}
