//! Interactive mode.
//!
//! Lets the user pick a dashboard tab and answer its controls, then prints
//! the resulting panel.

use std::collections::BTreeSet;

use crime_dashboard_analytics::catalog::{distinct_offenses, distinct_streets};
use crime_dashboard_config::DashboardConfig;
use crime_dashboard_dataset::Dataset;
use crime_dashboard_incident_models::{DayOfWeek, Month};
use crime_dashboard_presenter::panels::{
    InteractiveSelection, informative_panel, interactive_panel,
};
use dialoguer::{Input, MultiSelect, Select};

/// Top-level tab selection.
enum Tab {
    Informative,
    Interactive,
    Server,
}

impl Tab {
    const ALL: &[Self] = &[Self::Informative, Self::Interactive, Self::Server];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Informative => "Informative (hours, streets, days, months, offenses)",
            Self::Interactive => "Interactive (street chart, map, street analysis)",
            Self::Server => "Start server",
        }
    }
}

/// Runs the interactive session.
pub fn run(dataset: Dataset, config: DashboardConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Crime Dashboard");
    println!();

    let labels: Vec<&str> = Tab::ALL.iter().map(Tab::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to see?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tab::ALL[idx] {
        Tab::Informative => {
            let panel = informative_panel(&dataset, &config);
            println!("{}", serde_json::to_string_pretty(&panel)?);
        }
        Tab::Interactive => {
            let selection = prompt_selection(&dataset)?;
            let panel = interactive_panel(&dataset, &selection, &config);
            println!("{}", serde_json::to_string_pretty(&panel)?);
        }
        Tab::Server => {
            actix_web::rt::System::new()
                .block_on(crime_dashboard_server::interactive::run(dataset, config))?;
        }
    }

    Ok(())
}

fn prompt_selection(
    dataset: &Dataset,
) -> Result<InteractiveSelection, Box<dyn std::error::Error>> {
    let table = dataset.table();

    let street_text: String = Input::new()
        .with_prompt("Streets to chart (comma-separated)")
        .allow_empty(true)
        .interact_text()?;

    let offenses = distinct_offenses(&table);
    let offenses = pick(&offenses, "Offenses to map")?;

    let day_labels: Vec<String> = DayOfWeek::all().iter().map(ToString::to_string).collect();
    let days = MultiSelect::new()
        .with_prompt("Days to map")
        .items(&day_labels)
        .interact()?
        .into_iter()
        .map(|i| DayOfWeek::all()[i])
        .collect();

    let month: u8 = Input::new()
        .with_prompt("Month to map (1-12)")
        .default(Month::May.number())
        .validate_with(|m: &u8| {
            if (1..=12).contains(m) {
                Ok(())
            } else {
                Err("month must be between 1 and 12")
            }
        })
        .interact_text()?;

    let streets = distinct_streets(&table);
    let streets = pick(&streets, "Streets to analyze")?;

    Ok(InteractiveSelection {
        street_text,
        offenses,
        days,
        month: Month::from_number(month)?,
        streets: streets.into_iter().collect(),
    })
}

fn pick(options: &[String], prompt: &str) -> Result<BTreeSet<String>, dialoguer::Error> {
    Ok(MultiSelect::new()
        .with_prompt(prompt)
        .items(options)
        .max_length(15)
        .interact()?
        .into_iter()
        .map(|i| options[i].clone())
        .collect())
}
