use serde::{Deserialize, Serialize};

pub const FEATURE_COUNT: usize = 29;

/// Wire names in the order the model was trained on. Reordering this list
/// requires retraining the model artifact.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "City",
    "Day_of_Week",
    "Latitude",
    "Longitude",
    "Ride_Distance_KM",
    "Ride_Type",
    "Weather",
    "Event",
    "Payment_Type",
    "Available_Drivers",
    "User_Booking_Count",
    "Traffic_Density",
    "Previous_Surge",
    "Fare_Acceptance",
    "Demand_Level",
    "Surge_Multiplier",
    "Final_Fare",
    "Hour_of_Day",
    "Is_Weekend",
    "Real_Time_Demand",
    "Driver_Performance_Score",
    "Smart_Timeout",
    "AI_Demand_Prediction",
    "Driver_XP",
    "Ride_Priority",
    "Fare_Protection",
    "Year",
    "Month",
    "Day",
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PredictionInput {
    #[serde(rename = "City")]
    pub city: i64,
    #[serde(rename = "Day_of_Week")]
    pub day_of_week: i64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Ride_Distance_KM")]
    pub ride_distance_km: f64,
    #[serde(rename = "Ride_Type")]
    pub ride_type: i64,
    #[serde(rename = "Weather")]
    pub weather: i64,
    #[serde(rename = "Event")]
    pub event: i64,
    #[serde(rename = "Payment_Type")]
    pub payment_type: i64,
    #[serde(rename = "Available_Drivers")]
    pub available_drivers: i64,
    #[serde(rename = "User_Booking_Count")]
    pub user_booking_count: i64,
    #[serde(rename = "Traffic_Density")]
    pub traffic_density: f64,
    #[serde(rename = "Previous_Surge")]
    pub previous_surge: f64,
    #[serde(rename = "Fare_Acceptance")]
    pub fare_acceptance: f64,
    #[serde(rename = "Demand_Level")]
    pub demand_level: f64,
    #[serde(rename = "Surge_Multiplier")]
    pub surge_multiplier: f64,
    #[serde(rename = "Final_Fare")]
    pub final_fare: f64,
    #[serde(rename = "Hour_of_Day")]
    pub hour_of_day: i64,
    #[serde(rename = "Is_Weekend")]
    pub is_weekend: i64,
    #[serde(rename = "Real_Time_Demand")]
    pub real_time_demand: f64,
    #[serde(rename = "Driver_Performance_Score")]
    pub driver_performance_score: f64,
    #[serde(rename = "Smart_Timeout")]
    pub smart_timeout: f64,
    #[serde(rename = "AI_Demand_Prediction")]
    pub ai_demand_prediction: f64,
    #[serde(rename = "Driver_XP")]
    pub driver_xp: f64,
    #[serde(rename = "Ride_Priority")]
    pub ride_priority: i64,
    #[serde(rename = "Fare_Protection")]
    pub fare_protection: i64,
    #[serde(rename = "Year")]
    pub year: i64,
    #[serde(rename = "Month")]
    pub month: i64,
    #[serde(rename = "Day")]
    pub day: i64,
}

impl PredictionInput {
    /// Flattens the record in `FEATURE_NAMES` order.
    pub fn to_features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.city as f64,
            self.day_of_week as f64,
            self.latitude,
            self.longitude,
            self.ride_distance_km,
            self.ride_type as f64,
            self.weather as f64,
            self.event as f64,
            self.payment_type as f64,
            self.available_drivers as f64,
            self.user_booking_count as f64,
            self.traffic_density,
            self.previous_surge,
            self.fare_acceptance,
            self.demand_level,
            self.surge_multiplier,
            self.final_fare,
            self.hour_of_day as f64,
            self.is_weekend as f64,
            self.real_time_demand,
            self.driver_performance_score,
            self.smart_timeout,
            self.ai_demand_prediction,
            self.driver_xp,
            self.ride_priority as f64,
            self.fare_protection as f64,
            self.year as f64,
            self.month as f64,
            self.day as f64,
        ]
    }
}

/// Whatever the model emits: a regression value or a class code.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prediction {
    Class(i64),
    Value(f64),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: Prediction,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub message: String,
}
