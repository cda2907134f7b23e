use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use console::style;
use fitfindr_core::api::{GEOCODE_FALLBACK_MESSAGE, api_from_config};
use fitfindr_core::render::{EXPORT_FILE_NAME, write_csv};
use fitfindr_core::{Config, PageComposer, Panel, Preference, PreferenceCollector, SubmitOutcome, ViewMode};
use inquire::{Select, Text};

use crate::{form, present};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "fitfindr", version, about = "Find gyms tailored to your preferences")]
pub struct Cli {
    /// Base URL of the recommendation backend; overrides config and FITFINDR_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the backend URL and default view.
    Configure,

    /// Get recommendations for a location and print them.
    Search(SearchArgs),

    /// Fill in preferences step by step and browse the results.
    Interactive,

    /// Resolve a location to coordinates through the backend.
    Geocode {
        /// Address or location name.
        location: String,
    },

    /// Check that the backend is reachable.
    Health,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Address or location name, e.g. "Austin, TX".
    pub location: String,

    #[arg(long, default_value_t = 3, value_parser = importance)]
    pub hygiene: u8,

    #[arg(long, default_value_t = 3, value_parser = importance)]
    pub equipment_quality: u8,

    #[arg(long, default_value_t = 3, value_parser = importance)]
    pub less_crowd: u8,

    #[arg(long, default_value_t = 3, value_parser = importance)]
    pub trainer_knowledge: u8,

    #[arg(long, default_value_t = 3, value_parser = importance)]
    pub price: u8,

    #[arg(long, default_value_t = 3, value_parser = importance)]
    pub amenities: u8,

    #[arg(long, default_value_t = 3, value_parser = importance)]
    pub atmosphere: u8,

    /// Custom keyword filter as KEYWORD[:IMPORTANCE]; repeatable.
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, u8)>,

    /// Lowest acceptable rating, 0 to 5.
    #[arg(long, default_value_t = 0.0, value_parser = min_rating)]
    pub min_rating: f64,

    /// Search radius in kilometers, 1 to 10.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub max_distance: u8,

    /// View to print: list, map or chart. Defaults to the configured view.
    #[arg(long)]
    pub view: Option<ViewMode>,

    /// Also write every result to a CSV file.
    #[arg(long, num_args = 0..=1, default_missing_value = EXPORT_FILE_NAME)]
    pub export: Option<PathBuf>,
}

impl SearchArgs {
    fn collector(&self) -> PreferenceCollector {
        let mut form = PreferenceCollector::new();
        form.set_location(self.location.as_str());

        let weights = [
            (Preference::Hygiene, self.hygiene),
            (Preference::EquipmentQuality, self.equipment_quality),
            (Preference::LessCrowd, self.less_crowd),
            (Preference::TrainerKnowledge, self.trainer_knowledge),
            (Preference::Price, self.price),
            (Preference::Amenities, self.amenities),
            (Preference::Atmosphere, self.atmosphere),
        ];
        for (pref, value) in weights {
            form.set_importance(pref, value);
        }

        for (keyword, importance) in &self.filters {
            form.set_new_filter_importance(*importance);
            form.add_filter(keyword);
        }

        form.set_min_rating(self.min_rating);
        form.set_max_distance(self.max_distance);
        form
    }
}

fn importance(s: &str) -> Result<u8, String> {
    let value: u8 = s.parse().map_err(|_| format!("'{s}' is not a whole number"))?;
    if (1..=5).contains(&value) {
        Ok(value)
    } else {
        Err(format!("importance must be between 1 and 5, got {value}"))
    }
}

fn min_rating(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if (0.0..=5.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("minimum rating must be between 0 and 5, got {value}"))
    }
}

fn parse_filter(s: &str) -> Result<(String, u8), String> {
    let (keyword, weight) = match s.rsplit_once(':') {
        Some((keyword, weight)) => (keyword, importance(weight)?),
        None => (s, 3),
    };

    if keyword.trim().is_empty() {
        return Err("filter keyword must not be empty".to_string());
    }
    Ok((keyword.to_string(), weight))
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?.with_api_url_override(self.api_url);

        match self.command {
            Command::Configure => configure(config)?,
            Command::Search(args) => search(&config, args).await?,
            Command::Interactive => {
                let api = api_from_config(&config);
                form::run(api.as_ref(), config.default_view()).await?;
            }
            Command::Geocode { location } => {
                let api = api_from_config(&config);
                let echo = api
                    .geocode_location(&location)
                    .await
                    .map_err(|e| anyhow::anyhow!(e.display_message_or(GEOCODE_FALLBACK_MESSAGE)))
                    .with_context(|| format!("Could not geocode '{location}'"))?;
                println!("{}", echo.formatted_address);
                println!("{:.6}, {:.6}", echo.latitude, echo.longitude);
            }
            Command::Health => {
                let base = config.api_base_url();
                let api = api_from_config(&config);
                let health = api
                    .health_check()
                    .await
                    .with_context(|| format!("Backend at {base} is not reachable"))?;
                println!("{base}: {}", health.status);
            }
        }

        Ok(())
    }
}

async fn search(config: &Config, args: SearchArgs) -> anyhow::Result<()> {
    let api = api_from_config(config);
    let view = args.view.unwrap_or_else(|| config.default_view());
    let mut page = PageComposer::with_collector(args.collector());

    let submission = page.begin_search()?;
    let spinner = present::loading_spinner();
    let result = submission.send(api.as_ref()).await;
    let outcome = page.complete_search(submission, result);
    spinner.finish_and_clear();

    if let SubmitOutcome::Failed { message } = outcome {
        bail!(message);
    }

    match page.panel() {
        Panel::Results { gyms, location } => {
            println!("{}\n", present::header(gyms, location, view));
            println!("{}", present::render(gyms, view));

            if let Some(path) = &args.export {
                write_csv(gyms, path)?;
                println!("\nSaved {} gyms to {}", gyms.len(), path.display());
            }
        }
        Panel::Empty | Panel::Loading => println!("{}", present::empty_state()),
    }

    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let current = config.api_base_url();
    let url = Text::new("Backend URL").with_default(&current).prompt()?;
    config.set_api_url(url.trim());

    let views = ViewMode::all().to_vec();
    let start = views.iter().position(|v| *v == config.default_view()).unwrap_or(0);
    let view = Select::new("Default view", views).with_starting_cursor(start).prompt()?;
    config.default_view = Some(view);

    config.save()?;
    println!(
        "{} saved to {}",
        style("Configuration").green(),
        Config::config_file_path()?.display()
    );
    Ok(())
}
