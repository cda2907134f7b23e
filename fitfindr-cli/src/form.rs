//! Interactive preference form driven by `inquire` prompts.

use std::fmt;
use std::path::Path;

use anyhow::Result;
use console::style;
use fitfindr_core::render::{EXPORT_FILE_NAME, write_csv};
use fitfindr_core::{
    CustomFilter, PageComposer, Panel, Preference, RecommendationApi, SubmitOutcome, ViewMode,
};
use inquire::{CustomType, Select, Text};

use crate::present;

#[derive(Debug, Clone, Copy)]
enum FormAction {
    Search,
    Location,
    Importance,
    AddFilter,
    RemoveFilter,
    MinRating,
    MaxDistance,
    Quit,
}

impl FormAction {
    const ALL: [FormAction; 8] = [
        FormAction::Search,
        FormAction::Location,
        FormAction::Importance,
        FormAction::AddFilter,
        FormAction::RemoveFilter,
        FormAction::MinRating,
        FormAction::MaxDistance,
        FormAction::Quit,
    ];
}

impl fmt::Display for FormAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormAction::Search => "Find Gyms",
            FormAction::Location => "Set location",
            FormAction::Importance => "Rate importance (1-5)",
            FormAction::AddFilter => "Add custom filter",
            FormAction::RemoveFilter => "Remove custom filter",
            FormAction::MinRating => "Minimum rating",
            FormAction::MaxDistance => "Max distance",
            FormAction::Quit => "Quit",
        };
        f.write_str(s)
    }
}

/// A custom filter as offered for removal, remembering its position.
#[derive(Debug, Clone, PartialEq)]
struct FilterChoice {
    index: usize,
    label: String,
}

impl fmt::Display for FilterChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn filter_choices(filters: &[CustomFilter]) -> Vec<FilterChoice> {
    filters
        .iter()
        .enumerate()
        .map(|(index, f)| FilterChoice {
            index,
            label: format!("{}. {} ({})", index + 1, f.keyword, f.importance),
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum ResultAction {
    View(ViewMode),
    Export,
    Back,
}

impl fmt::Display for ResultAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultAction::View(mode) => f.write_str(mode.title()),
            ResultAction::Export => f.write_str("Download CSV"),
            ResultAction::Back => f.write_str("Back to preferences"),
        }
    }
}

/// Run the form until the user quits. Prompt cancellation (Esc) backs out.
pub async fn run(api: &dyn RecommendationApi, initial_view: ViewMode) -> Result<()> {
    let mut page = PageComposer::new();

    loop {
        print_form(&page);

        let Some(action) = Select::new("What next?", FormAction::ALL.to_vec()).prompt_skippable()?
        else {
            return Ok(());
        };

        let form = page.collector_mut();
        match action {
            FormAction::Search => {
                if search(&mut page, api).await? {
                    browse_results(&page, initial_view)?;
                }
            }
            FormAction::Location => {
                if let Some(location) = Text::new("Location")
                    .with_placeholder("e.g., New York, NY")
                    .with_initial_value(form.location())
                    .prompt_skippable()?
                {
                    form.set_location(location);
                }
            }
            FormAction::Importance => {
                let Some(pref) = Select::new("Preference", Preference::all().to_vec()).prompt_skippable()?
                else {
                    continue;
                };
                if let Some(value) = prompt_u8(pref.label(), form.importance(pref).get(), 1, 5)? {
                    form.set_importance(pref, value);
                }
            }
            FormAction::AddFilter => {
                let Some(keyword) = Text::new("Keyword")
                    .with_placeholder("e.g., parking")
                    .prompt_skippable()?
                else {
                    continue;
                };
                let current = form.new_filter_importance().get();
                if let Some(value) = prompt_u8("Importance", current, 1, 5)? {
                    form.set_new_filter_importance(value);
                }
                if !form.add_filter(&keyword) {
                    println!("{}", style("Keyword must not be empty").yellow());
                }
            }
            FormAction::RemoveFilter => {
                let choices = filter_choices(form.custom_filters());
                if choices.is_empty() {
                    println!("No custom filters to remove");
                    continue;
                }
                if let Some(choice) = Select::new("Remove which filter?", choices).prompt_skippable()? {
                    form.remove_filter(choice.index);
                }
            }
            FormAction::MinRating => {
                if let Some(value) = CustomType::<f64>::new("Minimum rating (0-5)")
                    .with_default(form.min_rating().get())
                    .with_error_message("Please enter a number")
                    .prompt_skippable()?
                {
                    form.set_min_rating(value);
                }
            }
            FormAction::MaxDistance => {
                let current = form.max_distance().km();
                if let Some(value) = prompt_u8("Max distance in km (1-10)", current, 1, 10)? {
                    form.set_max_distance(value);
                }
            }
            FormAction::Quit => return Ok(()),
        }
    }
}

/// Submit the form. Returns whether there are results to browse.
async fn search(page: &mut PageComposer, api: &dyn RecommendationApi) -> Result<bool> {
    let submission = match page.begin_search() {
        Ok(submission) => submission,
        Err(err) => {
            println!("{}", style(err).yellow());
            return Ok(false);
        }
    };

    let spinner = present::loading_spinner();
    let result = submission.send(api).await;
    let outcome = page.complete_search(submission, result);
    spinner.finish_and_clear();

    Ok(match outcome {
        SubmitOutcome::Delivered { .. } => {
            if matches!(page.panel(), Panel::Empty) {
                println!("{}", present::empty_state());
            }
            !page.state().gyms.is_empty()
        }
        SubmitOutcome::Failed { .. } | SubmitOutcome::Stale => false,
    })
}

fn browse_results(page: &PageComposer, initial_view: ViewMode) -> Result<()> {
    let Panel::Results { gyms, location } = page.panel() else {
        return Ok(());
    };

    let mut active = initial_view;
    loop {
        println!("\n{}\n", present::header(gyms, location, active));
        println!("{}", present::render(gyms, active));

        let options: Vec<ResultAction> = ViewMode::all()
            .iter()
            .map(|m| ResultAction::View(*m))
            .chain([ResultAction::Export, ResultAction::Back])
            .collect();

        match Select::new("Results", options).prompt_skippable()? {
            Some(ResultAction::View(mode)) => active = mode,
            Some(ResultAction::Export) => {
                let path = Path::new(EXPORT_FILE_NAME);
                write_csv(gyms, path)?;
                println!("Saved {} gyms to {}", gyms.len(), path.display());
            }
            Some(ResultAction::Back) | None => return Ok(()),
        }
    }
}

fn print_form(page: &PageComposer) {
    let form = page.collector();

    println!("\n{}", style("Your Preferences").bold());
    let location = if form.location().is_empty() { "(not set)" } else { form.location() };
    println!("  Location: {location}");
    for pref in Preference::all() {
        println!("  {:<18} {}", pref.label(), form.importance(*pref));
    }
    println!("  {:<18} {:.1}", "Minimum Rating", form.min_rating().get());
    println!("  {:<18} {} km", "Max Distance", form.max_distance().km());

    if !form.custom_filters().is_empty() {
        let filters: Vec<String> =
            form.custom_filters().iter().map(|f| format!("{} ({})", f.keyword, f.importance)).collect();
        println!("  Custom Filters:    {}", filters.join(", "));
    }

    if let Some(error) = form.last_error() {
        println!("{}", style(error).red());
    }
}

fn prompt_u8(label: &str, current: u8, min: u8, max: u8) -> Result<Option<u8>> {
    let value = CustomType::<u8>::new(label)
        .with_default(current)
        .with_error_message("Please enter a whole number")
        .with_help_message(&format!("{min} to {max}"))
        .prompt_skippable()?;
    Ok(value.map(|v| v.clamp(min, max)))
}
