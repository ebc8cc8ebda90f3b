//! Pure, deterministic transforms from raw astronomical records to
//! display-ready structures. No I/O and no clock reads happen here.

use crate::http_handler::http_response::asteroid::AsteroidRecord;
use crate::http_handler::http_response::neo_feed::NeoFeedResponse;
use chrono::NaiveDateTime;


/// Timestamp format of `close_approach_date_full`, e.g. `2026-Aug-30 14:23`.
const APPROACH_TS_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Display-ready single-lookup panel content.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupView {
    pub name: String,
    pub hazardous: bool,
    pub hazard_text: &'static str,
    pub diameter_km: String,
    pub magnitude: String,
    pub orbital: Option<OrbitalView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalView {
    pub class_type: String,
    pub eccentricity: String,
    pub semi_major_axis: String,
    pub orbital_period: String,
    pub perihelion: String,
    pub aphelion: String,
    pub inclination: String,
}

/// Display-ready feed card content. The simulator link and the impact
/// affordance exist only for hazardous entries.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedCardView {
    pub id: String,
    pub name: String,
    pub hazardous: bool,
    pub diameter_min_m: String,
    pub diameter_max_m: String,
    pub approach: String,
    pub velocity_kms: String,
    pub miss_distance_km: String,
    pub simulator_url: Option<String>,
}

pub fn lookup_view(record: &AsteroidRecord) -> LookupView {
    LookupView {
        name: String::from(record.name()),
        hazardous: record.is_hazardous(),
        hazard_text: if record.is_hazardous() { "Yes" } else { "No" },
        diameter_km: fmt_f64(record.estimated_diameter().kilometers().max(), 2),
        magnitude: record.absolute_magnitude().to_string(),
        orbital: record.orbital_data().map(|orbital| OrbitalView {
            class_type: String::from(orbital.orbit_class().class_type()),
            eccentricity: fmt_decimal_str(orbital.eccentricity(), 4),
            semi_major_axis: fmt_decimal_str(orbital.semi_major_axis(), 4),
            orbital_period: fmt_decimal_str(orbital.orbital_period(), 2),
            perihelion: fmt_decimal_str(orbital.perihelion_distance(), 4),
            aphelion: fmt_decimal_str(orbital.aphelion_distance(), 4),
            inclination: fmt_decimal_str(orbital.inclination(), 4),
        }),
    }
}

/// Flattens the date-keyed feed into one sequence, sorted ascending by the
/// first close-approach timestamp. The sort is stable, so ties and records
/// without a parseable timestamp keep their input order (date keys ascend in
/// the map, entries keep their order within a date).
pub fn flatten_feed(feed: &NeoFeedResponse) -> Vec<&AsteroidRecord> {
    let mut records: Vec<&AsteroidRecord> =
        feed.near_earth_objects().values().flatten().collect();
    records.sort_by_key(|r| approach_timestamp(r).unwrap_or(NaiveDateTime::MAX));
    records
}

/// Parsed timestamp of the record's earliest close approach.
pub fn approach_timestamp(record: &AsteroidRecord) -> Option<NaiveDateTime> {
    let event = record.first_approach()?;
    NaiveDateTime::parse_from_str(event.date_full(), APPROACH_TS_FORMAT).ok()
}

pub fn feed_card(record: &AsteroidRecord) -> FeedCardView {
    let meters = record.estimated_diameter().meters();
    let (approach, velocity, miss) = record.first_approach().map_or_else(
        || (String::from("unknown"), String::from("unknown"), String::from("unknown")),
        |event| {
            let approach = NaiveDateTime::parse_from_str(event.date_full(), APPROACH_TS_FORMAT)
                .map_or_else(
                    |_| String::from(event.date_full()),
                    |ts| ts.format("%Y-%m-%d %H:%M UTC").to_string(),
                );
            (approach, fmt_decimal_str(event.velocity_kms(), 2), group_thousands(event.miss_distance_km()))
        },
    );
    FeedCardView {
        id: String::from(record.id()),
        name: String::from(record.name()),
        hazardous: record.is_hazardous(),
        diameter_min_m: fmt_f64(meters.min(), 2),
        diameter_max_m: fmt_f64(meters.max(), 2),
        approach,
        velocity_kms: velocity,
        miss_distance_km: miss,
        simulator_url: record.is_hazardous().then(|| simulator_url(record)),
    }
}

/// Deep link into the down2earth impact simulator. Diameter goes in as an
/// integer meter value, velocity with two decimals; every other parameter is
/// a fixed default.
pub fn simulator_url(record: &AsteroidRecord) -> String {
    let diameter_m = fmt_f64(record.estimated_diameter().meters().max(), 0);
    let velocity = record
        .first_approach()
        .map_or_else(|| String::from("0.00"), |e| fmt_decimal_str(e.velocity_kms(), 2));
    format!(
        "https://simulator.down2earth.eu/results.html?lang=en&planet=Earth&dist=100&diam={diameter_m}&traj=45&velo={velocity}&pjd=2&tjd=i&wlvl=0"
    )
}

/// Prompt for the lookup panel's factsheet sub-flow.
pub fn factsheet_prompt(record: &AsteroidRecord) -> String {
    let diameter_km = fmt_f64(record.estimated_diameter().kilometers().max(), 2);
    let (class_description, period) = record.orbital_data().map_or(
        ("unknown", "unknown"),
        |o| (o.orbit_class().description(), o.orbital_period()),
    );
    format!(
        "You are a science communicator at a planetarium. Take the following technical data \
         about asteroid \"{}\" and generate a fun, engaging, and easy-to-understand factsheet \
         in a single paragraph for a general audience. Explain what its orbital class \
         ({class_description}) means in simple terms and provide a relatable size comparison \
         for its maximum diameter ({diameter_km} km). Data: Orbit Period: {period} days.",
        record.name()
    )
}

/// Prompt for a hazardous feed card's impact-assessment sub-flow.
pub fn impact_prompt(record: &AsteroidRecord) -> String {
    let meters = record.estimated_diameter().meters();
    let (miss, velocity) = record.first_approach().map_or_else(
        || (String::from("unknown"), String::from("unknown")),
        |e| (group_thousands(e.miss_distance_km()), fmt_decimal_str(e.velocity_kms(), 2)),
    );
    format!(
        "Analyze the following data for a potentially hazardous asteroid named \"{}\". In a \
         concise, single paragraph, explain the potential threat level in layman's terms. \
         Emphasize the vastness of the miss distance ({miss} km) to provide context and \
         prevent alarmism. Also, explain why an object with such a large miss distance is \
         still classified as 'potentially hazardous'. Data: Diameter: {} - {} meters, \
         Velocity: {velocity} km/s.",
        record.name(),
        fmt_f64(meters.min(), 2),
        fmt_f64(meters.max(), 2),
    )
}

fn fmt_f64(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Fixed-precision formatting of a decimal string. Unparseable input is
/// passed through unchanged.
fn fmt_decimal_str(raw: &str, decimals: usize) -> String {
    raw.trim().parse::<f64>().map_or_else(|_| String::from(raw), |v| fmt_f64(v, decimals))
}

/// Renders a decimal-string kilometre distance with thousands separators,
/// rounded to a whole number.
fn group_thousands(raw: &str) -> String {
    let Ok(value) = raw.trim().parse::<f64>() else {
        return String::from(raw);
    };
    #[allow(clippy::cast_possible_truncation)]
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 { format!("-{grouped}") } else { grouped }
}
