use scoring::{
    AgeCategory, Gender, HandicapConfig, HandicapStart, Measurement, calculate,
    compute_handicap_starts, format_time, parse_time,
};
use storage::dto::scoring::{
    CalculatePointsRequest, CalculatePointsResponse, HandicapRequest, ParseTimeResponse,
};

use crate::error::WebResult;

pub fn calculate_points(request: &CalculatePointsRequest) -> WebResult<CalculatePointsResponse> {
    let category = AgeCategory::parse_or_default(&request.age_category);
    let gender = Gender::parse_or_default(&request.gender);
    let measurement = Measurement::from_payload(request.discipline, &request.raw_data)?;

    Ok(CalculatePointsResponse {
        discipline: request.discipline,
        age_category: category.to_string(),
        points: calculate(&measurement, category, gender),
    })
}

pub fn normalize_time(value: &str) -> ParseTimeResponse {
    let hundredths = parse_time(value);

    ParseTimeResponse {
        hundredths,
        formatted: format_time(hundredths),
        parsed: hundredths > 0,
    }
}

pub fn schedule(request: &HandicapRequest, default_stations: u32) -> Vec<HandicapStart> {
    let config = HandicapConfig::for_category(AgeCategory::parse_or_default(&request.age_category))
        .with_shooting_stations(request.shooting_stations.unwrap_or(default_stations));

    compute_handicap_starts(&request.athletes, &config)
}
