//! Seed data for offline demos and tests.

use crate::models::{Contestant, ContestantStatus, VoteMethod, VoteRecord};
use chrono::{NaiveDate, NaiveDateTime};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap_or_default()
}

fn contestant(
    id: i64,
    name: &str,
    email: &str,
    contest: &str,
    votes: u64,
    joined: NaiveDate,
) -> Contestant {
    Contestant {
        id,
        name: name.to_string(),
        email: Some(email.to_string()),
        contest: contest.to_string(),
        votes,
        status: ContestantStatus::Active,
        joined,
    }
}

pub fn sample_contestants() -> Vec<Contestant> {
    vec![
        contestant(1, "Olivia Chen", "olivia.chen@example.com", "Singing Competition 2024", 1402, date(2024, 12, 1)),
        contestant(2, "Liam Rodriguez", "liam.rodriguez@example.com", "Annual Bake-Off", 986, date(2024, 11, 28)),
        contestant(3, "Ava Patel", "ava.patel@example.com", "Art Showcase", 754, date(2024, 11, 25)),
        contestant(4, "Noah Kim", "noah.kim@example.com", "Singing Competition 2024", 1120, date(2024, 11, 20)),
        contestant(5, "Emma Watson", "emma.watson@example.com", "Design Challenge 2024", 892, date(2024, 11, 15)),
        contestant(6, "James Miller", "james.miller@example.com", "Singing Competition 2024", 1567, date(2024, 11, 10)),
    ]
}

pub fn sample_votes() -> Vec<VoteRecord> {
    let rows = [
        ("YV-8A3B4C", "Alice Johnson", "user@***.com", VoteMethod::Web, "2023-10-27 14:30:15", "Talent Show 2024"),
        ("YV-9B1D5E", "Bob Williams", "+1-555-***-1234", VoteMethod::Sms, "2023-10-27 14:29:58", "Talent Show 2024"),
        ("YV-7C2F6G", "Charlie Brown", "charlie@***.com", VoteMethod::Web, "2023-10-27 14:29:41", "Design Awards"),
        ("YV-6D3G7H", "Diana Prince", "+1-555-***-5678", VoteMethod::Sms, "2023-10-27 14:28:33", "Talent Show 2024"),
        ("YV-5E4H8I", "Ethan Hunt", "ethan.h@***.net", VoteMethod::Web, "2023-10-27 14:28:10", "Design Awards"),
        ("YV-4F5I9J", "Fiona Glenanne", "fiona.g@***.org", VoteMethod::Web, "2023-10-27 14:27:55", "Talent Show 2024"),
        ("YV-3G6J1K", "George Costanza", "+1-555-***-9012", VoteMethod::Sms, "2023-10-27 14:27:22", "Design Awards"),
        ("YV-2H7K2L", "Hannah Abbott", "hannah.a@***.com", VoteMethod::Web, "2023-10-27 14:26:49", "Talent Show 2024"),
    ];
    rows.iter()
        .map(|(id, contestant, voter, method, ts, contest)| {
            VoteRecord::new(*id, *contestant, voter, *method, at(ts), *contest)
        })
        .collect()
}
