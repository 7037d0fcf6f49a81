//! Non-interactive subcommands.

use std::collections::BTreeSet;

use crime_dashboard_analytics::{
    catalog::{distinct_offenses, distinct_streets},
    filters::apply_filter,
    offenses::top_offenses,
    streets::{dominant_period, rank_streets, street_breakdown, street_frequencies},
    temporal::{day_frequencies, hour_histogram, month_frequencies},
};
use crime_dashboard_analytics_models::IncidentFilter;
use crime_dashboard_config::DashboardConfig;
use crime_dashboard_dataset::Dataset;
use crime_dashboard_incident_models::Month;
use crime_dashboard_presenter::{dominant_summary, map_view, panels::informative_panel};

use crate::Commands;

/// Runs `command` and prints its report.
pub fn run(
    command: Commands,
    dataset: Dataset,
    config: DashboardConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if matches!(command, Commands::Serve) {
        actix_web::rt::System::new().block_on(crime_dashboard_server::serve(dataset, config))?;
        return Ok(());
    }

    let report = report(&command, &dataset, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Builds the JSON report for every command except `serve`.
fn report(
    command: &Commands,
    dataset: &Dataset,
    config: &DashboardConfig,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let table = dataset.table();
    let limits = &config.limits;

    let value = match command {
        Commands::Ranking => serde_json::to_value(rank_streets(&table, limits.street_ranking))?,
        Commands::Streets => serde_json::to_value(distinct_streets(&table))?,
        Commands::Offenses => serde_json::to_value(distinct_offenses(&table))?,
        Commands::StreetBar { streets } => {
            serde_json::to_value(street_frequencies(&table, streets))?
        }
        Commands::Map {
            offenses,
            days,
            months,
        } => {
            let filter = IncidentFilter {
                offenses: offenses.iter().cloned().collect(),
                days: days.iter().copied().collect(),
                months: months
                    .iter()
                    .map(|&m| Month::from_number(m))
                    .collect::<Result<_, _>>()?,
            };
            serde_json::to_value(map_view(&apply_filter(&table, &filter), config.map.zoom))?
        }
        Commands::Hours => serde_json::to_value(hour_histogram(&table))?,
        Commands::Days => serde_json::to_value(day_frequencies(&table))?,
        Commands::Months => serde_json::to_value(month_frequencies(&table))?,
        Commands::TopOffenses => serde_json::to_value(top_offenses(&table, limits.top_offenses))?,
        Commands::StreetView { streets } => {
            serde_json::to_value(street_breakdown(&table, streets, limits.street_view))?
        }
        Commands::Dominant { streets } => {
            let selected: BTreeSet<String> = streets.iter().cloned().collect();
            let period = dominant_period(&table, &selected);
            serde_json::json!({
                "period": period,
                "summary": dominant_summary(streets, period.as_ref()),
            })
        }
        Commands::Informative => serde_json::to_value(informative_panel(dataset, config))?,
        Commands::Serve => serde_json::Value::Null,
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crime_dashboard_config::DuplicatePolicy;
    use crime_dashboard_incident_models::{DayOfWeek, Incident};

    fn dataset() -> Dataset {
        let incident = |id: &str, street: &str, offense: &str, day: DayOfWeek| Incident {
            incident_number: id.to_string(),
            offense_description: offense.to_string(),
            street: street.to_string(),
            day_of_week: Some(day),
            month: Some(Month::March),
            hour: 6,
            occurred_on: NaiveDate::from_ymd_opt(2023, 3, 14).and_then(|d| d.and_hms_opt(6, 0, 0)),
            latitude: Some(42.31),
            longitude: Some(-71.05),
        };

        Dataset::from_incidents(
            vec![
                incident("1", "CENTRE ST", "THEFT", DayOfWeek::Tuesday),
                incident("2", "CENTRE ST", "FRAUD", DayOfWeek::Tuesday),
                incident("3", "DUDLEY ST", "THEFT", DayOfWeek::Saturday),
            ],
            DuplicatePolicy::Reject,
        )
        .unwrap()
    }

    #[test]
    fn map_report_applies_filters() {
        let data = dataset();
        let command = Commands::Map {
            offenses: vec!["THEFT".to_string()],
            days: vec![DayOfWeek::Saturday],
            months: vec![3],
        };

        let value = report(&command, &data, &DashboardConfig::default()).unwrap();

        assert_eq!(value["points"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["points"][0]["offense"], "THEFT");
    }

    #[test]
    fn dominant_report_includes_period_and_summary() {
        let data = dataset();
        let command = Commands::Dominant {
            streets: vec!["CENTRE ST".to_string()],
        };

        let value = report(&command, &data, &DashboardConfig::default()).unwrap();

        assert_eq!(value["period"]["day"], "Tuesday");
        assert_eq!(value["period"]["month"], "March");
        assert_eq!(value["summary"]["status"], "found");
    }

    #[test]
    fn dominant_report_for_unknown_street() {
        let data = dataset();
        let command = Commands::Dominant {
            streets: vec!["ELM ST".to_string()],
        };

        let value = report(&command, &data, &DashboardConfig::default()).unwrap();

        assert!(value["period"].is_null());
        assert_eq!(value["summary"]["status"], "noData");
    }

    #[test]
    fn days_report_has_seven_entries() {
        let data = dataset();
        let value = report(&Commands::Days, &data, &DashboardConfig::default()).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(7));
    }
}
