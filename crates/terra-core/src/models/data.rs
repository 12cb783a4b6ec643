// ABOUTME: Terra v2 data records returned by data endpoints and delivered by data webhooks
// ABOUTME: Activity, body, daily, menstruation, nutrition, and sleep schemas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Terra v2 data records
//!
//! Every field is optional: providers populate different subsets and unknown fields
//! are ignored. A record only fails to parse when a present field has the wrong type.

use serde::{Deserialize, Serialize};

use super::common::{
    ActiveDurationsData, CaloriesData, DeviceData, DistanceData, HeartRateData, MetData,
    Metadata, OxygenData, Sample,
};

/// A workout or activity session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Session metadata
    pub metadata: Option<Metadata>,
    /// Intensity durations
    pub active_durations_data: Option<ActiveDurationsData>,
    /// Energy expenditure
    pub calories_data: Option<CaloriesData>,
    /// Recording device
    pub device_data: Option<DeviceData>,
    /// Distance and elevation
    pub distance_data: Option<DistanceData>,
    /// Heart rate
    pub heart_rate_data: Option<HeartRateData>,
    /// Metabolic equivalent
    #[serde(rename = "MET_data")]
    pub met_data: Option<MetData>,
    /// Speed, pace and cadence
    pub movement_data: Option<MovementData>,
    /// Blood oxygen
    pub oxygen_data: Option<OxygenData>,
    /// Power output
    pub power_data: Option<PowerData>,
    /// Training stress score
    #[serde(rename = "TSS_data")]
    pub tss_data: Option<TssData>,
}

/// Speed, pace and cadence during an activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementData {
    /// Average speed in m/s
    pub avg_speed_meters_per_second: Option<f64>,
    /// Maximum speed in m/s
    pub max_speed_meters_per_second: Option<f64>,
    /// Normalized speed in m/s
    pub normalized_speed_meters_per_second: Option<f64>,
    /// Average pace in min/km
    pub avg_pace_minutes_per_kilometer: Option<f64>,
    /// Best pace in min/km
    pub max_pace_minutes_per_kilometer: Option<f64>,
    /// Average cadence
    pub avg_cadence_rpm: Option<f64>,
    /// Maximum cadence
    pub max_cadence_rpm: Option<f64>,
    /// Speed samples
    pub speed_samples: Option<Vec<Sample>>,
}

/// Power output during an activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerData {
    /// Average watts
    pub avg_watts: Option<f64>,
    /// Maximum watts
    pub max_watts: Option<f64>,
    /// Power samples
    pub power_samples: Option<Vec<Sample>>,
}

/// Training stress score values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TssData {
    /// Intensity factor and TSS pairs calculated by the provider
    pub tss_samples: Option<Vec<TssSample>>,
}

/// One training stress calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TssSample {
    /// Intensity factor
    pub intensity_factor_actual: Option<f64>,
    /// Training stress score
    pub actual: Option<f64>,
    /// Calculation method
    pub method: Option<String>,
}

/// Body measurements such as weight, composition and glucose
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Covered period
    pub metadata: Option<Metadata>,
    /// Recording device
    pub device_data: Option<DeviceData>,
    /// Heart measurements
    pub heart_data: Option<HeartData>,
    /// Blood oxygen
    pub oxygen_data: Option<OxygenData>,
    /// Weight, height, BMI and composition
    pub measurements_data: Option<MeasurementsData>,
    /// Blood glucose
    pub glucose_data: Option<GlucoseData>,
}

/// Heart measurements captured outside activities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartData {
    /// Heart rate
    pub heart_rate_data: Option<HeartRateData>,
}

/// Body composition measurements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementsData {
    /// Individual measurements
    pub measurements: Option<Vec<MeasurementSample>>,
}

/// A single body composition measurement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSample {
    /// When the measurement was taken
    pub measurement_time: Option<String>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimetres
    pub height_cm: Option<f64>,
    /// Body mass index
    #[serde(rename = "BMI")]
    pub bmi: Option<f64>,
    /// Body fat percentage
    pub bodyfat_percentage: Option<f64>,
    /// Lean mass in grams
    pub lean_mass_g: Option<f64>,
}

/// Blood glucose values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlucoseData {
    /// Daily average in mg/dL
    #[serde(rename = "day_avg_blood_glucose_mg_per_dL")]
    pub day_avg_blood_glucose_mg_per_dl: Option<f64>,
    /// Glucose samples
    pub blood_glucose_samples: Option<Vec<Sample>>,
}

/// Daily summary of activity and stress
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Daily {
    /// Covered day
    pub metadata: Option<Metadata>,
    /// Recording device
    pub device_data: Option<DeviceData>,
    /// Intensity durations
    pub active_durations_data: Option<ActiveDurationsData>,
    /// Energy expenditure
    pub calories_data: Option<CaloriesData>,
    /// Distance and steps
    pub distance_data: Option<DistanceData>,
    /// Heart rate
    pub heart_rate_data: Option<HeartRateData>,
    /// Metabolic equivalent
    #[serde(rename = "MET_data")]
    pub met_data: Option<MetData>,
    /// Blood oxygen
    pub oxygen_data: Option<OxygenData>,
    /// Stress
    pub stress_data: Option<StressData>,
}

/// Stress levels and durations over a day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StressData {
    /// Average stress level
    pub avg_stress_level: Option<f64>,
    /// Maximum stress level
    pub max_stress_level: Option<f64>,
    /// Seconds at rest
    pub rest_stress_duration_seconds: Option<f64>,
    /// Seconds under stress
    pub stress_duration_seconds: Option<f64>,
    /// Seconds at low stress
    pub low_stress_duration_seconds: Option<f64>,
    /// Seconds at medium stress
    pub medium_stress_duration_seconds: Option<f64>,
    /// Seconds at high stress
    pub high_stress_duration_seconds: Option<f64>,
    /// Stress samples
    pub samples: Option<Vec<Sample>>,
}

/// Menstrual cycle tracking record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menstruation {
    /// Covered period
    pub metadata: Option<Metadata>,
    /// Cycle details
    pub menstruation_data: Option<MenstruationData>,
}

/// Cycle details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenstruationData {
    /// Period length in days
    pub period_length_days: Option<i32>,
    /// Current phase code
    pub current_phase: Option<i32>,
    /// Length of the current phase in days
    pub length_of_current_phase_days: Option<i32>,
    /// Days until the next phase
    pub days_until_next_phase: Option<i32>,
    /// Start date of the period
    pub period_start_date: Option<String>,
    /// Predicted cycle length in days
    pub predicted_cycle_length_days: Option<i32>,
    /// Day within the cycle
    pub day_in_cycle: Option<i32>,
    /// Cycle length in days
    pub cycle_length_days: Option<i32>,
    /// Provider's last update time
    pub last_updated_time: Option<String>,
}

/// Daily nutrition log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    /// Covered day
    pub metadata: Option<Metadata>,
    /// Totals for the day
    pub summary: Option<NutritionSummary>,
    /// Individual meals
    pub meals: Option<Vec<Meal>>,
}

/// Nutrition totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    /// Macronutrients
    pub macros: Option<Macros>,
    /// Water in millilitres
    pub water_ml: Option<f64>,
}

/// Macronutrient amounts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    /// Calories
    pub calories: Option<f64>,
    /// Protein in grams
    pub protein_g: Option<f64>,
    /// Carbohydrates in grams
    pub carbohydrates_g: Option<f64>,
    /// Fat in grams
    pub fat_g: Option<f64>,
    /// Fibre in grams
    pub fiber_g: Option<f64>,
    /// Sugar in grams
    pub sugar_g: Option<f64>,
}

/// A logged meal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Meal name
    pub name: Option<String>,
    /// Provider meal ID
    pub id: Option<String>,
    /// Meal type code
    #[serde(rename = "type")]
    pub meal_type: Option<i32>,
    /// Macronutrients
    pub macros: Option<Macros>,
}

/// A sleep session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sleep {
    /// Session metadata
    pub metadata: Option<Metadata>,
    /// Recording device
    pub device_data: Option<DeviceData>,
    /// Heart rate while asleep
    pub heart_rate_data: Option<HeartRateData>,
    /// Stage durations
    pub sleep_durations_data: Option<SleepDurationsData>,
    /// Breathing, snoring and oxygen
    pub respiration_data: Option<RespirationData>,
}

/// Time spent in each sleep stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepDurationsData {
    /// Sleep efficiency
    pub sleep_efficiency: Option<f64>,
    /// Asleep stage durations
    pub asleep: Option<AsleepDurations>,
    /// Awake durations and events
    pub awake: Option<AwakeDurations>,
}

/// Asleep stage durations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsleepDurations {
    /// Total seconds asleep
    pub duration_asleep_state_seconds: Option<f64>,
    /// Seconds in light sleep
    pub duration_light_sleep_state_seconds: Option<f64>,
    /// Seconds in deep sleep
    pub duration_deep_sleep_state_seconds: Option<f64>,
    /// Seconds in REM sleep
    #[serde(rename = "duration_REM_sleep_state_seconds")]
    pub duration_rem_sleep_state_seconds: Option<f64>,
    /// Number of REM events
    #[serde(rename = "num_REM_events")]
    pub num_rem_events: Option<i32>,
}

/// Awake durations and interruptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AwakeDurations {
    /// Seconds awake
    pub duration_awake_state_seconds: Option<f64>,
    /// Seconds before falling asleep
    pub sleep_latency_seconds: Option<f64>,
    /// Seconds between waking and getting up
    pub wake_up_latency_seconds: Option<f64>,
    /// Number of wake-up events
    pub num_wakeup_events: Option<i32>,
    /// Number of out-of-bed events
    pub num_out_of_bed_events: Option<i32>,
}

/// Breathing, snoring and oxygen saturation during sleep
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RespirationData {
    /// Breathing rate
    pub breaths_data: Option<BreathsData>,
    /// Snoring
    pub snoring_data: Option<SnoringData>,
}

/// Breathing rate summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreathsData {
    /// Minimum breaths per minute
    pub min_breaths_per_min: Option<f64>,
    /// Average breaths per minute
    pub avg_breaths_per_min: Option<f64>,
    /// Maximum breaths per minute
    pub max_breaths_per_min: Option<f64>,
}

/// Snoring summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnoringData {
    /// Number of snoring events
    pub num_snoring_events: Option<i32>,
    /// Total seconds snoring
    pub total_snoring_duration_seconds: Option<f64>,
}
