use crate::domain::model::{
    Practitioner, RowOutcome, SkipReason, SourceRow, APPROVED_AT_SERVER_TIME, APPROVED_BY,
    STATUS_APPROVED,
};
use crate::utils::error::{ImportError, Result};

/// Split a raw full name into (first, last). Strips surrounding whitespace and
/// one layer of surrounding double quotes before tokenizing.
pub fn parse_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);

    let mut parts = trimmed.split_whitespace();
    match parts.next() {
        None => ("Unknown".to_string(), "Unknown".to_string()),
        Some(first) => {
            let rest: Vec<&str> = parts.collect();
            (first.to_string(), rest.join(" "))
        }
    }
}

fn parse_coordinate(field: &'static str, value: &Option<String>) -> Result<Option<f64>> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ImportError::InvalidNumericFieldError {
                field,
                value: raw.clone(),
            }),
    }
}

/// Map one source row to a target record, applying the default policy in field
/// order. Rows without an email are skipped before any transformation.
pub fn transform_row(row: &SourceRow) -> Result<RowOutcome> {
    let email = match &row.email {
        Some(email) => email.clone(),
        None => return Ok(RowOutcome::Skipped(SkipReason::MissingEmail)),
    };

    let (first_name, parsed_last) = parse_name(row.title.as_deref().unwrap_or(""));
    let last_name = if parsed_last.is_empty() {
        "N/A".to_string()
    } else {
        parsed_last
    };

    let latitude = parse_coordinate("latitude", &row.lat)?;
    let longitude = parse_coordinate("longitude", &row.lng)?;

    let clinic_name = row
        .description
        .clone()
        .unwrap_or_else(|| format!("{} {} Practice", first_name, last_name));

    let certifications = vec![row
        .categories
        .clone()
        .unwrap_or_else(|| "Certified".to_string())];

    Ok(RowOutcome::Record(Practitioner {
        first_name,
        last_name,
        email,
        phone: row.phone.clone(),
        clinic_name,
        website: row.website.clone(),
        street_address: row
            .street
            .clone()
            .unwrap_or_else(|| "Not provided".to_string()),
        city: row.city.clone().unwrap_or_else(|| "Unknown".to_string()),
        state: row.state.clone().unwrap_or_default(),
        zip_code: row.postal_code.clone().unwrap_or_default(),
        country: row.country.clone().unwrap_or_else(|| "Unknown".to_string()),
        latitude,
        longitude,
        certifications,
        bio: row.description_2.clone(),
        status: STATUS_APPROVED.to_string(),
        approved_at: APPROVED_AT_SERVER_TIME.to_string(),
        approved_by: APPROVED_BY.to_string(),
    }))
}
