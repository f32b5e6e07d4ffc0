use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Meal selection of one resident for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPreference {
    pub id: u64,
    #[serde(default)]
    pub resident_id: Option<u64>,
    #[serde(default)]
    pub resident_name: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default, with = "crate::models::date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub breakfast: Option<bool>,
    #[serde(default)]
    pub lunch: Option<bool>,
    #[serde(default)]
    pub dinner: Option<bool>,
    /// `VEG`, `NON_VEG` or free text.
    #[serde(default)]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub special_requirements: Option<String>,
}

/// `food/stats` payload: meal counts for the backend's current day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FoodStats {
    #[serde(with = "crate::models::date")]
    pub date: Option<NaiveDate>,
    pub breakfast: u64,
    pub lunch: u64,
    pub dinner: u64,
    pub veg: u64,
    pub non_veg: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_stats_camel_case() {
        let stats: FoodStats =
            serde_json::from_str(r#"{"breakfast":3,"lunch":2,"veg":1,"nonVeg":4}"#).unwrap();
        assert_eq!(stats.non_veg, 4);
        assert_eq!(stats.dinner, 0);
    }

    #[test]
    fn test_preference_decodes() {
        let pref: FoodPreference = serde_json::from_str(
            r#"{"id":2,"residentName":"Amaya","breakfast":true,"lunch":false,"mealType":"VEG"}"#,
        )
        .unwrap();
        assert_eq!(pref.breakfast, Some(true));
        assert_eq!(pref.dinner, None);
    }
}
