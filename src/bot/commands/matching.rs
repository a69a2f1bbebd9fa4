use std::collections::{BTreeMap, BTreeSet};

use crate::database::models::UserProfile;
use crate::database::Store;
use crate::error::HandlerError;
use crate::utils::validation::{split_args, validate_key};

pub const FIND_MATCHES_USAGE: &str = "Usage: /find_matches <id> <interest1> [interest2 ...]";
pub const NO_OTHER_USERS: &str = "No other users found.";
pub const NO_MATCHES: &str = "No matches found.";

/// Another user sharing at least one interest with the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestMatch {
    pub user_id: String,
    pub common: BTreeSet<String>,
}

impl InterestMatch {
    pub fn render(&self) -> String {
        let common: Vec<&str> = self.common.iter().map(String::as_str).collect();
        format!("{} matches with you on: {}", self.user_id, common.join(", "))
    }
}

/// Intersects the caller's interests with every other profile.
pub fn find_matches(
    user_id: &str,
    interests: &[String],
    profiles: &BTreeMap<String, UserProfile>,
) -> Vec<InterestMatch> {
    let wanted: BTreeSet<&str> = interests.iter().map(String::as_str).collect();

    profiles
        .iter()
        .filter(|(other_id, _)| other_id.as_str() != user_id)
        .filter_map(|(other_id, profile)| {
            let common: BTreeSet<String> = profile
                .interests
                .iter()
                .filter(|interest| wanted.contains(interest.as_str()))
                .cloned()
                .collect();
            if common.is_empty() {
                None
            } else {
                Some(InterestMatch {
                    user_id: other_id.clone(),
                    common,
                })
            }
        })
        .collect()
}

/// Saves the caller's interests, then scans every stored profile for overlap.
/// The save is not undone if the scan fails.
pub async fn handle_find_matches(store: &dyn Store, args: &str) -> Result<String, HandlerError> {
    let args = split_args(args);
    let (user_id, interests) = match args.split_first() {
        Some((user_id, interests)) if !interests.is_empty() => (*user_id, interests),
        _ => return Ok(FIND_MATCHES_USAGE.to_string()),
    };
    if let Err(e) = validate_key(user_id) {
        return Ok(format!("{e}. {FIND_MATCHES_USAGE}"));
    }

    let interests: Vec<String> = interests.iter().map(|s| s.to_string()).collect();
    UserProfile::new(interests.clone()).save(store, user_id).await?;

    let profiles = UserProfile::all(store).await?;
    if !profiles.keys().any(|id| id != user_id) {
        return Ok(NO_OTHER_USERS.to_string());
    }

    let matches = find_matches(user_id, &interests, &profiles);
    if matches.is_empty() {
        return Ok(NO_MATCHES.to_string());
    }

    Ok(matches
        .iter()
        .map(InterestMatch::render)
        .collect::<Vec<_>>()
        .join("\n"))
}
