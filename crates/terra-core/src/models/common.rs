// ABOUTME: Sub-structures shared across Terra data records
// ABOUTME: Metadata, device, heart rate, distance, calories, MET, oxygen, and time-series samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata common to every Terra data record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Start of the covered period
    pub start_time: Option<DateTime<Utc>>,
    /// End of the covered period
    pub end_time: Option<DateTime<Utc>>,
    /// Human-readable name
    pub name: Option<String>,
    /// Provider-side summary ID
    pub summary_id: Option<String>,
    /// Numeric activity type code
    #[serde(rename = "type")]
    pub activity_type: Option<i32>,
    /// How the record was uploaded
    pub upload_type: Option<i32>,
    /// City
    pub city: Option<String>,
    /// Country
    pub country: Option<String>,
}

/// Recording device information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceData {
    /// Device name
    pub name: Option<String>,
    /// Manufacturer
    pub manufacturer: Option<String>,
    /// Serial number
    pub serial_number: Option<String>,
    /// Software version
    pub software_version: Option<String>,
    /// Hardware version
    pub hardware_version: Option<String>,
}

/// A single timestamped measurement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Time of the measurement
    pub timestamp: Option<DateTime<Utc>>,
    /// Measured value
    pub value: Option<f64>,
}

/// Heart rate sample in beats per minute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    /// Time of the measurement
    pub timestamp: Option<DateTime<Utc>>,
    /// Beats per minute
    pub bpm: Option<f64>,
}

/// Heart rate summary values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSummary {
    /// Average BPM
    pub avg_hr_bpm: Option<f64>,
    /// Maximum BPM
    pub max_hr_bpm: Option<f64>,
    /// Minimum BPM
    pub min_hr_bpm: Option<f64>,
    /// Resting BPM
    pub resting_hr_bpm: Option<f64>,
    /// Average HRV (RMSSD)
    pub avg_hrv_rmssd: Option<f64>,
    /// Average HRV (SDNN)
    pub avg_hrv_sdnn: Option<f64>,
}

/// Heart rate detail samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartRateDetailed {
    /// BPM samples
    pub hr_samples: Option<Vec<HeartRateSample>>,
}

/// Heart rate data block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartRateData {
    /// Summary values
    pub summary: Option<HeartRateSummary>,
    /// Sample series
    pub detailed: Option<HeartRateDetailed>,
}

/// Distance and elevation metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceData {
    /// Distance in metres
    pub distance_meters: Option<f64>,
    /// Step count
    pub steps: Option<f64>,
    /// Floors climbed
    pub floors_climbed: Option<f64>,
    /// Elevation summary
    pub elevation: Option<ElevationData>,
}

/// Elevation values in metres
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElevationData {
    /// Total gain
    pub gain_actual_meters: Option<f64>,
    /// Total loss
    pub loss_actual_meters: Option<f64>,
    /// Maximum
    pub max_meters: Option<f64>,
    /// Minimum
    pub min_meters: Option<f64>,
    /// Average
    pub avg_meters: Option<f64>,
}

/// Energy expenditure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaloriesData {
    /// Total calories burned
    pub total_burned_calories: Option<f64>,
    /// Calories from activity only
    pub net_activity_calories: Option<f64>,
    /// Basal metabolic rate calories
    #[serde(rename = "BMR_calories")]
    pub bmr_calories: Option<f64>,
    /// Net calories consumed
    pub net_intake_calories: Option<f64>,
}

/// Metabolic equivalent data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetData {
    /// Average MET level
    pub avg_level: Option<f64>,
    /// Minutes at low intensity
    pub num_low_intensity_minutes: Option<f64>,
    /// Minutes at moderate intensity
    pub num_moderate_intensity_minutes: Option<f64>,
    /// Minutes at high intensity
    pub num_high_intensity_minutes: Option<f64>,
    /// Minutes inactive
    pub num_inactive_minutes: Option<f64>,
}

/// Blood oxygen data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OxygenData {
    /// Average saturation percentage
    pub avg_saturation_percentage: Option<f64>,
    /// VO2 max estimate
    pub vo2max_ml_per_min_per_kg: Option<f64>,
    /// Saturation samples
    pub saturation_samples: Option<Vec<Sample>>,
}

/// Time spent at each intensity level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveDurationsData {
    /// Seconds active
    pub activity_seconds: Option<f64>,
    /// Seconds resting
    pub rest_seconds: Option<f64>,
    /// Seconds at low intensity
    pub low_intensity_seconds: Option<f64>,
    /// Seconds at moderate intensity
    pub moderate_intensity_seconds: Option<f64>,
    /// Seconds at vigorous intensity
    pub vigorous_intensity_seconds: Option<f64>,
    /// Seconds inactive
    pub inactivity_seconds: Option<f64>,
}
