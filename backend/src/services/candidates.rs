use crate::constants::{DEFAULT_CANDIDATE_COUNT, DEFAULT_SEARCH_RADIUS_KM, MAX_CANDIDATES_PER_REQUEST};
use crate::db;
use crate::errors::AppError;
use crate::models::{Plant, Preferences};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Swipeable plants for a user: in radius, not their own, passing every
/// configured preference predicate, and not yet swiped away.
///
/// Pure read — no state changes, safe to call repeatedly; clients that don't
/// swipe everything away will see repeats.
pub async fn find_candidates(
    pool: &PgPool,
    user_id: Uuid,
    max_count: Option<usize>,
) -> Result<Vec<Plant>, AppError> {
    let user = db::users::get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {} not found", user_id)))?;

    let (latitude, longitude) = match (user.latitude, user.longitude) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return Err(AppError::Configuration(format!(
                "user {} has no location set",
                user_id
            )))
        }
    };

    let preferences = db::users::get_preferences(pool, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Configuration(format!("user {} has no preferences set", user_id))
        })?;

    let radius_km = effective_radius_km(preferences.search_radius_km);
    let in_range =
        db::plants::get_plants_within_radius(pool, latitude, longitude, radius_km, user_id).await?;

    let mut candidates: Vec<Plant> = in_range
        .into_iter()
        .filter(|plant| plant_matches_preferences(plant, &preferences))
        .collect();

    // A candidate drops out only once every one of the requester's plants
    // has swiped on it; as long as one of their plants still could swipe, it
    // stays in rotation.
    let own_plants = db::plants::get_plants_by_owner(pool, user_id).await?;
    if !own_plants.is_empty() && !candidates.is_empty() {
        let candidate_ids: Vec<Uuid> = candidates.iter().map(|plant| plant.id).collect();
        let counts: HashMap<Uuid, i64> =
            db::swipes::count_owner_swipes_per_candidate(pool, user_id, &candidate_ids)
                .await?
                .into_iter()
                .collect();

        let owned = own_plants.len();
        candidates.retain(|plant| {
            !is_fully_swiped(counts.get(&plant.id).copied().unwrap_or(0), owned)
        });
    }

    let cap = max_count
        .unwrap_or(DEFAULT_CANDIDATE_COUNT)
        .min(MAX_CANDIDATES_PER_REQUEST);
    candidates.truncate(cap);

    Ok(candidates)
}

/// Zero and negative radii fall back to the default.
fn effective_radius_km(configured: f64) -> f64 {
    if configured > 0.0 {
        configured
    } else {
        DEFAULT_SEARCH_RADIUS_KM
    }
}

/// An empty restriction list allows everything.
fn list_allows(allowed: &[String], value: &str) -> bool {
    allowed.is_empty() || allowed.iter().any(|entry| entry == value)
}

/// Conjunction of the optional preference predicates. Each one is skipped
/// when unset; `extras` demands every requested tag on the candidate.
fn plant_matches_preferences(plant: &Plant, preferences: &Preferences) -> bool {
    list_allows(&preferences.stages, &plant.stage)
        && list_allows(&preferences.categories, &plant.category)
        && list_allows(&preferences.watering_needs, &plant.watering_need)
        && list_allows(&preferences.light_requirements, &plant.light_requirement)
        && list_allows(&preferences.sizes, &plant.size)
        && list_allows(&preferences.environments, &plant.environment)
        && list_allows(&preferences.propagation_difficulties, &plant.propagation_difficulty)
        && (!preferences.pet_friendly_only || plant.pet_friendly)
        && preferences.extras.iter().all(|extra| plant.tags.contains(extra))
}

/// A requester with zero plants can't have swiped anything away.
fn is_fully_swiped(swiped_by_count: i64, owned_plant_count: usize) -> bool {
    owned_plant_count > 0 && swiped_by_count >= owned_plant_count as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn plant() -> Plant {
        Plant {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Pilea peperomioides".to_string(),
            stage: "cutting".to_string(),
            category: "foliage".to_string(),
            watering_need: "weekly".to_string(),
            light_requirement: "indirect".to_string(),
            size: "small".to_string(),
            environment: "indoor".to_string(),
            propagation_difficulty: "easy".to_string(),
            pet_friendly: true,
            tags: vec!["rare".to_string(), "variegated".to_string()],
            latitude: Some(52.52),
            longitude: Some(13.405),
            is_traded: false,
            created_at: Utc::now(),
        }
    }

    fn open_preferences() -> Preferences {
        Preferences {
            user_id: Uuid::new_v4(),
            search_radius_km: 10.0,
            stages: vec![],
            categories: vec![],
            watering_needs: vec![],
            light_requirements: vec![],
            sizes: vec![],
            environments: vec![],
            propagation_difficulties: vec![],
            pet_friendly_only: false,
            extras: vec![],
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_preferences_allow_everything() {
        assert!(plant_matches_preferences(&plant(), &open_preferences()));
    }

    #[test]
    fn test_list_predicate_filters_on_membership() {
        let mut prefs = open_preferences();
        prefs.stages = vec!["mature".to_string()];
        assert!(!plant_matches_preferences(&plant(), &prefs));

        prefs.stages = vec!["mature".to_string(), "cutting".to_string()];
        assert!(plant_matches_preferences(&plant(), &prefs));
    }

    #[test]
    fn test_predicates_are_a_conjunction() {
        let mut prefs = open_preferences();
        prefs.categories = vec!["foliage".to_string()]; // passes
        prefs.sizes = vec!["large".to_string()]; // fails
        assert!(!plant_matches_preferences(&plant(), &prefs));
    }

    #[test]
    fn test_pet_friendly_only() {
        let mut prefs = open_preferences();
        prefs.pet_friendly_only = true;
        assert!(plant_matches_preferences(&plant(), &prefs));

        let mut toxic = plant();
        toxic.pet_friendly = false;
        assert!(!plant_matches_preferences(&toxic, &prefs));
    }

    #[test]
    fn test_extras_require_every_tag() {
        let mut prefs = open_preferences();
        prefs.extras = vec!["rare".to_string()];
        assert!(plant_matches_preferences(&plant(), &prefs));

        prefs.extras = vec!["rare".to_string(), "fragrant".to_string()];
        assert!(!plant_matches_preferences(&plant(), &prefs));
    }

    #[test]
    fn test_effective_radius_falls_back_on_nonpositive() {
        assert_eq!(effective_radius_km(25.0), 25.0);
        assert_eq!(effective_radius_km(0.0), DEFAULT_SEARCH_RADIUS_KM);
        assert_eq!(effective_radius_km(-3.0), DEFAULT_SEARCH_RADIUS_KM);
    }

    #[test]
    fn test_fully_swiped_exclusion() {
        // All three of the requester's plants have swiped: excluded.
        assert!(is_fully_swiped(3, 3));
        // Only some have: still a candidate.
        assert!(!is_fully_swiped(2, 3));
        assert!(!is_fully_swiped(0, 3));
        // No owned plants means nothing can be swiped away.
        assert!(!is_fully_swiped(0, 0));
    }
}
